use anyhow::Result;
use serde_json::json;
use serpapi_client::models::load_query_file;
use serpapi_client::utils::logging;
use serpapi_client::{BatchRequest, Config, QuerySpec, SerpApiClient};
use std::path::Path;
use std::time::Instant;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let config = Config::from_env();

    // 初始化日志
    logging::init(config.verbose_logging);

    if config.api_key.is_empty() {
        warn!("⚠️ 未设置 SERPAPI_API_KEY，程序结束");
        return Ok(());
    }

    logging::init_log_file(&config.output_log_file)?;
    logging::log_startup(&config);

    let client = SerpApiClient::new(config.clone())?;

    // ---------- 1. 单次搜索 ----------
    info!("\n--- 1. 单次搜索 ---");

    let mut params = QuerySpec::new();
    params.insert("engine".to_string(), json!("google"));
    params.insert("q".to_string(), json!("Coffee"));
    params.insert("location".to_string(), json!("Dallas, Texas"));

    match client.search(params).await {
        Ok(results) => {
            let title = results["organic_results"][0]["title"]
                .as_str()
                .unwrap_or("无标题");
            info!("✅ 第一条结果: {}", logging::truncate_text(title, 60));
        }
        Err(e) => error!("❌ 单次搜索失败: {}", e),
    }

    // ---------- 2. 批量搜索（并发） ----------
    info!("\n--- 2. 批量搜索 ---");

    let (defaults, queries) = load_queries(&config).await;
    let total = queries.len();

    let start = Instant::now();
    let results = client.search_batch(queries, defaults).await?;
    info!("⚡ 总耗时: {:.2}s", start.elapsed().as_secs_f64());

    let mut success = 0usize;
    for (id, data) in &results {
        let line = match data.get("error").and_then(|v| v.as_str()) {
            Some(message) => format!("❌ [{}] 失败: {}", id, message),
            None => {
                success += 1;
                let title = data["organic_results"][0]["title"]
                    .as_str()
                    .unwrap_or("无标题");
                format!("✅ [{}] 第一条结果: {}", id, logging::truncate_text(title, 60))
            }
        };
        info!("{}", line);
        logging::append_result_line(&config.output_log_file, &line)?;
    }

    logging::print_batch_stats(success, total - success, total, &config.output_log_file);

    Ok(())
}

/// 加载批量查询：优先读取配置的 TOML 文件，失败时回落到内置示例
async fn load_queries(config: &Config) -> (QuerySpec, BatchRequest) {
    let path = Path::new(&config.queries_file);

    if path.exists() {
        match load_query_file(path).await {
            Ok(file) => {
                info!(
                    "📁 已加载查询文件: {} ({} 条)",
                    config.queries_file,
                    file.queries.len()
                );
                return (file.defaults, file.queries);
            }
            Err(e) => warn!("⚠️ 查询文件加载失败，改用内置示例: {}", e),
        }
    }

    builtin_queries()
}

/// 内置示例查询
fn builtin_queries() -> (QuerySpec, BatchRequest) {
    let mut defaults = QuerySpec::new();
    defaults.insert("engine".to_string(), json!("google"));

    let mut queries = BatchRequest::new();

    let mut cafe = QuerySpec::new();
    cafe.insert("q".to_string(), json!("Coffee"));
    cafe.insert("location".to_string(), json!("Chicago, IL"));
    queries.insert("cafe".to_string(), cafe);

    let mut pizza = QuerySpec::new();
    pizza.insert("q".to_string(), json!("Pizza"));
    pizza.insert("location".to_string(), json!("Detroit, MI"));
    queries.insert("pizza".to_string(), pizza);

    let mut tacos = QuerySpec::new();
    tacos.insert("q".to_string(), json!("Tamales"));
    tacos.insert("location".to_string(), json!("Mexico City"));
    tacos.insert("hl".to_string(), json!("es"));
    queries.insert("tacos".to_string(), tacos);

    (defaults, queries)
}
