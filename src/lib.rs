//! # SerpApi Client
//!
//! 一个用于搜索结果 API 的并发批量查询客户端
//!
//! ## 架构设计
//!
//! 本库采用严格的四层架构：
//!
//! ### ① 传输层（Transport）
//! - `transport/` - 只暴露"发一次请求，拿回原始响应"的能力
//! - `HttpTransport` - 基于 reqwest 的生产实现，连接池可安全并发共享
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单条查询
//! - `query_normalizer` - 默认值合并 + 凭证/传输参数注入
//! - `RequestExecutor` - 单次请求执行与失败分类
//!
//! ### ③ 编排层（Orchestration）
//! - `orchestrator/BatchProcessor` - 并发派发一批查询，
//!   单一汇合点等待全部完成，失败隔离，键集合保持
//!
//! ### ④ 客户端层（Clients）
//! - `clients/SerpApiClient` - 对外门面：单次搜索、批量搜索、
//!   账户/位置/档案查询，以及组合式的固定引擎特化
//!
//! ## 模块结构

pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod transport;
pub mod utils;

// 重新导出常用类型
pub use clients::SerpApiClient;
pub use config::Config;
pub use error::{ApiError, AppError, ConfigError, Result};
pub use models::{BatchRequest, BatchResult, Outcome, QueryFile, QuerySpec};
pub use orchestrator::BatchProcessor;
pub use services::RequestExecutor;
pub use transport::{HttpTransport, RawResponse, Transport};
