//! 单次请求执行器
//!
//! 对一组已规范化的参数发起一次 GET 请求，解码响应体，
//! 区分成功与各类失败。每次调用彼此独立，内部不做重试。

use crate::error::{AppError, Result};
use crate::models::{Outcome, QuerySpec};
use crate::transport::Transport;
use reqwest::Method;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// 请求执行器
///
/// 只持有传输句柄，可随意 clone 后分发给并发任务。
#[derive(Clone)]
pub struct RequestExecutor {
    transport: Arc<dyn Transport>,
}

impl RequestExecutor {
    /// 创建新的请求执行器
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// 执行一次请求并返回类型化结果
    ///
    /// 失败分类（对单条请求而言都是致命的，但互不影响其他请求）：
    /// - 连接/超时等传输失败 -> `ApiError::RequestFailed`；
    /// - 非 2xx 状态码 -> `ApiError::BadStatus`，此时不再检查响应体，
    ///   传输错误优先于响应体内的 error 字段；
    /// - 响应体不是合法 JSON -> `ApiError::JsonParseFailed`；
    /// - 2xx 且解码成功但带 error 字段 -> `ApiError::RemoteError`，
    ///   取该字段文本作为错误信息。
    ///
    /// 其余情况原样返回解码后的 JSON，不做字段裁剪。
    pub async fn fetch(&self, endpoint: &str, params: &QuerySpec) -> Result<Value> {
        let raw = self.transport.send(Method::GET, endpoint, params).await?;

        if !(200..300).contains(&raw.status) {
            return Err(AppError::bad_status(endpoint, raw.status));
        }

        let value: Value = serde_json::from_str(&raw.body)?;

        if let Some(error) = value.get("error") {
            let message = match error {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            return Err(AppError::remote_error(endpoint, message));
        }

        debug!("请求成功: {}", endpoint);

        Ok(value)
    }

    /// 执行一次请求并把所有错误折叠为 Outcome
    ///
    /// 批量路径使用：任何失败都只产生该条目的 Failure，不向外抛出。
    pub async fn execute(&self, endpoint: &str, params: &QuerySpec) -> Outcome {
        Outcome::from_result(self.fetch(endpoint, params).await)
    }
}
