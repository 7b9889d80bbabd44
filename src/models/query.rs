use serde_json::{Map, Value};
use std::collections::HashMap;

/// 单次请求的参数集合
///
/// 键为参数名，值为文本或基础类型。由共享默认值与单条查询的覆盖值
/// 合并而成，派发后不再修改。
pub type QuerySpec = Map<String, Value>;

/// 批量查询请求：调用方自定义标识符 -> 查询参数
///
/// 标识符对本库完全不透明，输出结果的键集合与输入严格一致。
pub type BatchRequest = HashMap<String, QuerySpec>;

/// 批量查询结果：标识符 -> 解码后的响应（成功）或错误描述对象（失败）
///
/// 两种形态都是普通 JSON 值，调用方通过是否存在 `error` 键来区分。
pub type BatchResult = HashMap<String, Value>;
