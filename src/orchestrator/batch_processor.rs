//! 批量查询处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块是并发批量查询的核心，负责任务派发和结果汇总。
//!
//! ## 核心功能
//!
//! 1. **参数规范化**：为每个条目合并默认值并注入传输参数
//! 2. **并发派发**：每个条目立即 spawn 一个独立任务，互不等待
//! 3. **并发控制**：使用 Semaphore 限制同时在途的请求数量
//! 4. **单一汇合点**：join_all 等待全部任务完成后恰好恢复一次
//! 5. **失败隔离**：单个条目的失败只产生该条目的 Failure，
//!    绝不中断批次，也绝不升级为批次级错误
//! 6. **键集合保持**：输出的标识符集合与输入严格一致
//!
//! ## 设计特点
//!
//! - **时间上界**：批次耗时受最慢的单个请求约束，而不是各请求之和
//! - **无取消**：兄弟任务失败时，其余任务照常跑完
//! - **资源隔离**：每个任务持有自己的参数副本，共享的只有传输连接池
//! - **完成顺序无关**：任务以任意顺序完成，结果按标识符归位

use crate::error::Result;
use crate::models::{BatchRequest, BatchResult, Outcome, QuerySpec};
use crate::services::{query_normalizer, RequestExecutor};
use futures::future::join_all;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{debug, error, info, warn};

/// 批量查询处理器
pub struct BatchProcessor {
    executor: RequestExecutor,
    endpoint: String,
    api_key: String,
    max_concurrent: usize,
}

impl BatchProcessor {
    /// 创建新的批量查询处理器
    ///
    /// # 参数
    /// - `executor`: 请求执行器（会被 clone 给每个并发任务）
    /// - `endpoint`: 搜索端点完整地址
    /// - `api_key`: 配置的凭证
    /// - `max_concurrent`: 最大并发请求数（下限 1，防止死锁）
    pub fn new(
        executor: RequestExecutor,
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        max_concurrent: usize,
    ) -> Self {
        Self {
            executor,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            max_concurrent: max_concurrent.max(1),
        }
    }

    /// 并发执行一批查询
    ///
    /// 对 `queries` 里的每个标识符规范化参数并调度恰好一次请求，
    /// 全部完成后返回与输入键集合一致的结果映射。空输入返回空结果。
    ///
    /// 返回 Err 仅保留给无法调度的结构性问题；单条请求的失败
    /// 一律折叠为该标识符的 `{"error": ...}` 条目。
    pub async fn run_batch(
        &self,
        queries: BatchRequest,
        defaults: &QuerySpec,
    ) -> Result<BatchResult> {
        if queries.is_empty() {
            debug!("批量查询为空，直接返回");
            return Ok(BatchResult::new());
        }

        let total = queries.len();
        info!(
            "📦 开始批量查询: 共 {} 条 (最大并发 {})",
            total, self.max_concurrent
        );

        let semaphore = Arc::new(Semaphore::new(self.max_concurrent));
        let mut ids = Vec::with_capacity(total);
        let mut handles = Vec::with_capacity(total);

        // 为每个条目创建并发任务；permit 在任务内部获取，
        // 派发本身不会被前面的条目阻塞
        for (id, overrides) in queries {
            let params = query_normalizer::normalize(defaults, &overrides, &self.api_key);
            let executor = self.executor.clone();
            let endpoint = self.endpoint.clone();
            let semaphore = semaphore.clone();
            let task_id = id.clone();

            let handle = tokio::spawn(async move {
                let _permit = match semaphore.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(e) => {
                        return Outcome::failure(format!("并发调度失败: {}", e), None);
                    }
                };

                let outcome = executor.execute(&endpoint, &params).await;

                if let Outcome::Failure { message, .. } = &outcome {
                    warn!("[{}] ❌ 查询失败: {}", task_id, message);
                }

                outcome
            });

            ids.push(id);
            handles.push(handle);
        }

        // 唯一的汇合点：等待全部任务完成，完成顺序不影响归位
        let joined = join_all(handles).await;

        let mut results = BatchResult::with_capacity(total);
        let mut failed = 0usize;

        for (id, joined_outcome) in ids.into_iter().zip(joined) {
            let outcome = match joined_outcome {
                Ok(outcome) => outcome,
                Err(e) => {
                    // 任务 panic 或被取消也只影响这一个标识符
                    error!("[{}] 任务执行失败: {}", id, e);
                    Outcome::failure(format!("批量任务执行失败: {}", e), None)
                }
            };

            if !outcome.is_success() {
                failed += 1;
            }
            results.insert(id, outcome.into_value());
        }

        info!("✓ 批量查询完成: 成功 {}/{}", total - failed, total);

        Ok(results)
    }
}
