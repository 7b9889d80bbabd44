use crate::models::{BatchRequest, QuerySpec};
use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;
use tokio::fs;

/// 批量查询文件
///
/// 对应 TOML 结构：
///
/// ```toml
/// [defaults]
/// engine = "google"
///
/// [queries.cafe]
/// q = "Coffee"
/// location = "Chicago, IL"
/// ```
#[derive(Debug, Clone)]
pub struct QueryFile {
    pub defaults: QuerySpec,
    pub queries: BatchRequest,
}

#[derive(Debug, Deserialize)]
struct RawQueryFile {
    #[serde(default)]
    defaults: toml::Table,
    #[serde(default)]
    queries: BTreeMap<String, toml::Table>,
}

/// 从 TOML 文件加载批量查询
pub async fn load_query_file(path: &Path) -> Result<QueryFile> {
    let content = fs::read_to_string(path)
        .await
        .with_context(|| format!("无法读取查询文件: {}", path.display()))?;

    parse_query_file(&content).with_context(|| format!("无法解析查询文件: {}", path.display()))
}

/// 解析批量查询文件内容
pub fn parse_query_file(content: &str) -> Result<QueryFile> {
    let raw: RawQueryFile = toml::from_str(content)?;

    let defaults = table_to_query_spec(&raw.defaults)?;
    let mut queries = BatchRequest::new();
    for (id, table) in &raw.queries {
        queries.insert(id.clone(), table_to_query_spec(table)?);
    }

    Ok(QueryFile { defaults, queries })
}

/// 将 TOML 表转换为查询参数集合
fn table_to_query_spec(table: &toml::Table) -> Result<QuerySpec> {
    let value = serde_json::to_value(table).context("TOML表无法转换为JSON对象")?;
    match value {
        Value::Object(map) => Ok(map),
        _ => anyhow::bail!("查询参数必须是键值表"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_query_file() {
        let content = r#"
[defaults]
engine = "google"

[queries.cafe]
q = "Coffee"
location = "Chicago, IL"

[queries.pizza]
q = "Pizza"
num = 20
"#;

        let file = parse_query_file(content).unwrap();

        assert_eq!(file.defaults["engine"], "google");
        assert_eq!(file.queries.len(), 2);
        assert_eq!(file.queries["cafe"]["q"], "Coffee");
        assert_eq!(file.queries["cafe"]["location"], "Chicago, IL");
        assert_eq!(file.queries["pizza"]["num"], 20);
    }

    #[test]
    fn test_parse_query_file_without_defaults() {
        let content = r#"
[queries.a]
q = "Tamales"
"#;

        let file = parse_query_file(content).unwrap();

        assert!(file.defaults.is_empty());
        assert_eq!(file.queries["a"]["q"], "Tamales");
    }

    #[test]
    fn test_parse_query_file_rejects_bad_toml() {
        assert!(parse_query_file("queries = 42").is_err());
    }
}
