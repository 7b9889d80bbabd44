/// SerpApi 客户端
///
/// 封装所有与搜索结果 API 相关的调用逻辑，是本库的对外门面。
use crate::config::Config;
use crate::error::Result;
use crate::models::{BatchRequest, BatchResult, QuerySpec};
use crate::orchestrator::BatchProcessor;
use crate::services::query_normalizer::{self, PARAM_API_KEY};
use crate::services::RequestExecutor;
use crate::transport::{HttpTransport, Transport};
use serde_json::{json, Value};
use std::sync::Arc;

/// SerpApi 客户端
pub struct SerpApiClient {
    config: Config,
    executor: RequestExecutor,
    /// 固定引擎覆盖层（组合式特化，见 [`Self::with_engine`]）
    engine: Option<String>,
}

impl SerpApiClient {
    /// 创建新的客户端（使用默认的 HTTP 传输）
    pub fn new(config: Config) -> Result<Self> {
        let transport: Arc<dyn Transport> = Arc::new(HttpTransport::new(config.timeout_secs)?);
        Ok(Self::with_transport(config, transport))
    }

    /// 注入自定义传输创建客户端（测试用）
    pub fn with_transport(config: Config, transport: Arc<dyn Transport>) -> Self {
        Self {
            executor: RequestExecutor::new(transport),
            config,
            engine: None,
        }
    }

    /// 固定搜索引擎
    ///
    /// 引擎特化用组合而不是继承：固定引擎只是注入在默认值层的
    /// 一个参数，单条查询里显式指定的 engine 仍然生效。
    pub fn with_engine(mut self, engine: impl Into<String>) -> Self {
        self.engine = Some(engine.into());
        self
    }

    /// 创建固定引擎的客户端
    pub fn for_engine(config: Config, engine: impl Into<String>) -> Result<Self> {
        Ok(Self::new(config)?.with_engine(engine))
    }

    /// 执行一次搜索
    ///
    /// # 参数
    /// - `params`: 搜索参数（q、location 等）
    ///
    /// # 返回
    /// 返回解码后的完整响应 JSON；传输失败、解码失败和远端逻辑
    /// 错误分别以不同的 [`crate::error::ApiError`] 形态返回
    pub async fn search(&self, params: QuerySpec) -> Result<Value> {
        let normalized =
            query_normalizer::normalize(&self.engine_defaults(), &params, &self.config.api_key);

        self.executor
            .fetch(&self.endpoint("/search"), &normalized)
            .await
    }

    /// 并发执行一批搜索
    ///
    /// 批量路径永远返回完整的结果映射：每个标识符要么对应解码后的
    /// 响应，要么对应 `{"error": ...}` 描述对象，调用方逐条检查
    /// `error` 键即可。
    ///
    /// # 参数
    /// - `queries`: 标识符 -> 搜索参数
    /// - `defaults`: 整批共享的默认参数
    pub async fn search_batch(
        &self,
        queries: BatchRequest,
        defaults: QuerySpec,
    ) -> Result<BatchResult> {
        // 固定引擎位于调用方默认值之下
        let mut merged_defaults = self.engine_defaults();
        for (key, value) in defaults {
            merged_defaults.insert(key, value);
        }

        let processor = BatchProcessor::new(
            self.executor.clone(),
            self.endpoint("/search"),
            self.config.api_key.clone(),
            self.config.max_concurrent_requests,
        );

        processor.run_batch(queries, &merged_defaults).await
    }

    /// 查询账户信息（套餐、剩余额度等）
    pub async fn account(&self) -> Result<Value> {
        self.executor
            .fetch(&self.endpoint("/account"), &self.key_only_params())
            .await
    }

    /// 查询地理位置候选
    ///
    /// 注意：locations 端点返回的是 JSON 数组而不是对象。
    pub async fn location(&self, q: &str, limit: u32) -> Result<Value> {
        let mut params = QuerySpec::new();
        params.insert("q".to_string(), json!(q));
        params.insert("limit".to_string(), json!(limit));

        self.executor
            .fetch(&self.endpoint("/locations.json"), &params)
            .await
    }

    /// 从搜索档案中取回历史结果
    pub async fn search_archive(&self, search_id: &str) -> Result<Value> {
        let url = format!("{}/searches/{}.json", self.config.base_url, search_id);

        self.executor.fetch(&url, &self.key_only_params()).await
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    fn key_only_params(&self) -> QuerySpec {
        let mut params = QuerySpec::new();
        params.insert(
            PARAM_API_KEY.to_string(),
            Value::String(self.config.api_key.clone()),
        );
        params
    }

    fn engine_defaults(&self) -> QuerySpec {
        let mut defaults = QuerySpec::new();
        if let Some(engine) = &self.engine {
            defaults.insert("engine".to_string(), Value::String(engine.clone()));
        }
        defaults
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ApiError, AppError};
    use crate::transport::mock::MockTransport;

    fn test_config() -> Config {
        Config {
            api_key: "secret".to_string(),
            base_url: "https://serpapi.test".to_string(),
            ..Config::default()
        }
    }

    fn query(entries: &[(&str, &str)]) -> QuerySpec {
        let mut spec = QuerySpec::new();
        for (key, value) in entries {
            spec.insert(key.to_string(), json!(value));
        }
        spec
    }

    #[tokio::test]
    async fn test_search_returns_decoded_payload() {
        let transport = Arc::new(MockTransport::json_ok(
            r#"{"organic_results": [{"title": "X"}]}"#,
        ));
        let client = SerpApiClient::with_transport(test_config(), transport.clone());

        let results = client.search(query(&[("q", "Coffee")])).await.unwrap();

        assert_eq!(results["organic_results"][0]["title"], "X");

        let requests = transport.requests();
        let (url, params) = &requests[0];
        assert_eq!(url, "https://serpapi.test/search");
        assert_eq!(params["q"], "Coffee");
        assert_eq!(params["api_key"], "secret");
        assert_eq!(params["output"], "json");
        assert_eq!(params["source"], "rust");
    }

    #[tokio::test]
    async fn test_search_surfaces_remote_error() {
        let transport = Arc::new(MockTransport::json_ok(r#"{"error": "Invalid API key"}"#));
        let client = SerpApiClient::with_transport(test_config(), transport);

        let err = client
            .search(query(&[("q", "Coffee")]))
            .await
            .expect_err("应当失败");

        assert!(matches!(err, AppError::Api(ApiError::RemoteError { .. })));
    }

    #[tokio::test]
    async fn test_fixed_engine_injected_as_default() {
        let transport = Arc::new(MockTransport::json_ok("{}"));
        let client =
            SerpApiClient::with_transport(test_config(), transport.clone()).with_engine("google");

        client.search(query(&[("q", "Coffee")])).await.unwrap();

        let requests = transport.requests();
        let (_, params) = &requests[0];
        assert_eq!(params["engine"], "google");
    }

    #[tokio::test]
    async fn test_explicit_engine_wins_over_fixed_engine() {
        let transport = Arc::new(MockTransport::json_ok("{}"));
        let client =
            SerpApiClient::with_transport(test_config(), transport.clone()).with_engine("google");

        client
            .search(query(&[("q", "Coffee"), ("engine", "bing")]))
            .await
            .unwrap();

        let requests = transport.requests();
        let (_, params) = &requests[0];
        assert_eq!(params["engine"], "bing");
    }

    #[tokio::test]
    async fn test_search_batch_layers_engine_under_defaults() {
        let transport = Arc::new(MockTransport::json_ok("{}"));
        let client =
            SerpApiClient::with_transport(test_config(), transport.clone()).with_engine("google");

        let mut queries = BatchRequest::new();
        queries.insert("a".to_string(), query(&[("q", "Coffee")]));

        let results = client
            .search_batch(queries, query(&[("location", "Austin")]))
            .await
            .unwrap();

        assert_eq!(results.len(), 1);

        let requests = transport.requests();
        let (_, params) = &requests[0];
        assert_eq!(params["engine"], "google");
        assert_eq!(params["location"], "Austin");
        assert_eq!(params["q"], "Coffee");
    }

    #[tokio::test]
    async fn test_account_sends_only_credential() {
        let transport = Arc::new(MockTransport::json_ok(
            r#"{"account_email": "test@serpapi.com", "total_searches_left": 100}"#,
        ));
        let client = SerpApiClient::with_transport(test_config(), transport.clone());

        let account = client.account().await.unwrap();

        assert_eq!(account["account_email"], "test@serpapi.com");
        assert_eq!(account["total_searches_left"], 100);

        let requests = transport.requests();
        let (url, params) = &requests[0];
        assert_eq!(url, "https://serpapi.test/account");
        assert_eq!(params.len(), 1);
        assert_eq!(params["api_key"], "secret");
    }

    #[tokio::test]
    async fn test_search_archive_url() {
        let transport = Arc::new(MockTransport::json_ok("{}"));
        let client = SerpApiClient::with_transport(test_config(), transport.clone());

        client.search_archive("abc123").await.unwrap();

        let requests = transport.requests();
        let (url, _) = &requests[0];
        assert_eq!(url, "https://serpapi.test/searches/abc123.json");
    }
}
