/// 程序配置文件
#[derive(Clone, Debug)]
pub struct Config {
    /// SerpApi 私有 API Key
    pub api_key: String,
    /// API 基础地址
    pub base_url: String,
    /// 单个请求的超时时间（秒）
    pub timeout_secs: u64,
    /// 批量搜索的最大并发请求数
    pub max_concurrent_requests: usize,
    /// 批量查询 TOML 文件路径（演示程序使用）
    pub queries_file: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输出日志文件
    pub output_log_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://serpapi.com".to_string(),
            timeout_secs: 10,
            max_concurrent_requests: 100,
            queries_file: "queries.toml".to_string(),
            verbose_logging: false,
            output_log_file: "output.txt".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            api_key: std::env::var("SERPAPI_API_KEY").unwrap_or(default.api_key),
            base_url: std::env::var("SERPAPI_BASE_URL").unwrap_or(default.base_url),
            timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.timeout_secs),
            max_concurrent_requests: std::env::var("MAX_CONCURRENT_REQUESTS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.max_concurrent_requests),
            queries_file: std::env::var("QUERIES_FILE").unwrap_or(default.queries_file),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file),
        }
    }
}
