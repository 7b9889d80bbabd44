//! 基于 reqwest 的生产传输实现

use crate::error::{AppError, ConfigError, Result};
use crate::models::QuerySpec;
use crate::transport::{RawResponse, Transport};
use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// HTTP 传输
///
/// 内部的 reqwest Client 自带连接池且可安全地跨任务共享，
/// 并发调用无需额外同步。
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// 创建新的 HTTP 传输
    ///
    /// # 参数
    /// - `timeout_secs`: 单个请求的超时时间（秒），超时只影响该次请求
    pub fn new(timeout_secs: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| {
                AppError::Config(ConfigError::HttpClientBuildFailed {
                    source: Box::new(e),
                })
            })?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, method: Method, url: &str, params: &QuerySpec) -> Result<RawResponse> {
        let pairs = to_query_pairs(params);

        debug!("发送请求: {} {} (参数 {} 个)", method, url, pairs.len());

        let response = self
            .client
            .request(method, url)
            .query(&pairs)
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(url, e))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::api_request_failed(url, e))?;

        debug!("收到响应: HTTP {} ({} 字节)", status, body.len());

        Ok(RawResponse { status, body })
    }
}

/// 将参数集合展开为查询字符串键值对
///
/// 字符串取原文，其他基础类型（数字、布尔）取其文本形式。
fn to_query_pairs(params: &QuerySpec) -> Vec<(String, String)> {
    let mut pairs = Vec::with_capacity(params.len());
    for (key, value) in params {
        let text = match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        pairs.push((key.clone(), text));
    }
    pairs
}
