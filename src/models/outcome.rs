use crate::error::Result;
use serde_json::{json, Map, Value};

/// 单条查询的最终结果
///
/// 每个批量条目恰好产生一个 Outcome：要么是解码后的响应原文，
/// 要么是带可选状态码的失败描述。
#[derive(Debug, Clone)]
pub enum Outcome {
    /// 请求成功，携带解码后的 JSON 响应（不做任何字段裁剪）
    Success(Value),
    /// 请求失败（传输失败、解码失败或远端逻辑错误）
    Failure {
        message: String,
        code: Option<u16>,
    },
}

impl Outcome {
    /// 创建失败结果
    pub fn failure(message: impl Into<String>, code: Option<u16>) -> Self {
        Outcome::Failure {
            message: message.into(),
            code,
        }
    }

    /// 从执行结果转换
    ///
    /// 所有错误在这里折叠为 Failure，不会继续向上传播。
    pub fn from_result(result: Result<Value>) -> Self {
        match result {
            Ok(value) => Outcome::Success(value),
            Err(err) => {
                let code = err.status_code();
                Outcome::Failure {
                    message: err.to_string(),
                    code,
                }
            }
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    /// 转换为对外的统一 JSON 形态
    ///
    /// 成功时原样返回响应；失败时返回 `{"error": ..., "code": ...}`
    /// 描述对象（code 仅在存在时写入）。调用方只需检查 `error` 键。
    pub fn into_value(self) -> Value {
        match self {
            Outcome::Success(value) => value,
            Outcome::Failure { message, code } => {
                let mut descriptor = Map::new();
                descriptor.insert("error".to_string(), Value::String(message));
                if let Some(code) = code {
                    descriptor.insert("code".to_string(), json!(code));
                }
                Value::Object(descriptor)
            }
        }
    }
}
