//! 传输层（Transport Layer）
//!
//! 对外只暴露"发送一次请求，拿回状态码和原始响应体"的能力。
//! 生产实现是基于 reqwest 的 [`HttpTransport`]；测试通过
//! [`Transport`] trait 注入可编程的假传输。
//!
//! 所有实现必须能被多个并发任务同时调用而无需外部加锁。

pub mod http;

pub use http::HttpTransport;

use crate::error::Result;
use crate::models::QuerySpec;
use async_trait::async_trait;
use reqwest::Method;

/// 一次传输调用的原始结果
///
/// 只要远端给出了 HTTP 响应（无论状态码），就返回 RawResponse；
/// 只有连接、超时这类拿不到响应的失败才走 Err 分支。
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

/// 传输能力
#[async_trait]
pub trait Transport: Send + Sync {
    /// 发送一次请求
    ///
    /// # 参数
    /// - `method`: HTTP 方法
    /// - `url`: 完整请求地址
    /// - `params`: 序列化为查询字符串的参数集合
    async fn send(&self, method: Method, url: &str, params: &QuerySpec) -> Result<RawResponse>;
}
