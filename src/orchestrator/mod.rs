//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责批量查询的并发调度和结果汇总。
//!
//! ## 层次关系
//!
//! ```text
//! clients::SerpApiClient (对外门面)
//!     ↓
//! orchestrator::BatchProcessor (并发派发 + 单一汇合点)
//!     ↓
//! services::RequestExecutor (单次请求 -> Outcome)
//!     ↓
//! transport (传输：一次请求，一个原始响应)
//! ```
//!
//! ## 设计原则
//!
//! 1. **失败隔离**：单条失败绝不升级为批次失败
//! 2. **键集合保持**：输出与输入的标识符集合严格一致
//! 3. **无业务逻辑**：只做调度和统计，不解释响应内容

pub mod batch_processor;

// 重新导出主要类型
pub use batch_processor::BatchProcessor;
