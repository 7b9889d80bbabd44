//! 查询参数规范化
//!
//! 把共享默认值和单条查询的覆盖值合并成最终上线的参数集合，
//! 并补齐传输必需的三个参数（api_key / output / source）。
//! 纯转换，无任何 I/O，永远成功。

use crate::models::QuerySpec;
use serde_json::Value;

/// 凭证参数名
pub const PARAM_API_KEY: &str = "api_key";
/// 输出格式参数名
pub const PARAM_OUTPUT: &str = "output";
/// 客户端来源标记参数名
pub const PARAM_SOURCE: &str = "source";

/// 固定输出格式：结构化 JSON
pub const OUTPUT_FORMAT: &str = "json";
/// 固定来源标记
pub const SOURCE_TAG: &str = "rust";

/// 合并默认值与覆盖值并注入传输参数
///
/// 规则：
/// - 以 `defaults` 为底，`overrides` 的同名键覆盖之；
/// - 合并结果里没有 api_key 才注入配置的凭证（调用方显式给出的凭证保留，便于测试覆盖）；
/// - output 与 source 无条件强制为固定值，调用方传入的同名参数会被覆盖。
///
/// # 参数
/// - `defaults`: 整批共享的默认参数
/// - `overrides`: 单条查询的参数
/// - `api_key`: 配置的凭证
///
/// # 返回
/// 返回新的参数集合，入参不被修改
pub fn normalize(defaults: &QuerySpec, overrides: &QuerySpec, api_key: &str) -> QuerySpec {
    let mut merged = defaults.clone();

    for (key, value) in overrides {
        merged.insert(key.clone(), value.clone());
    }

    if !merged.contains_key(PARAM_API_KEY) {
        merged.insert(
            PARAM_API_KEY.to_string(),
            Value::String(api_key.to_string()),
        );
    }

    merged.insert(
        PARAM_OUTPUT.to_string(),
        Value::String(OUTPUT_FORMAT.to_string()),
    );
    merged.insert(
        PARAM_SOURCE.to_string(),
        Value::String(SOURCE_TAG.to_string()),
    );

    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn spec(entries: &[(&str, Value)]) -> QuerySpec {
        let mut map = QuerySpec::new();
        for (key, value) in entries {
            map.insert(key.to_string(), value.clone());
        }
        map
    }

    #[test]
    fn test_defaults_merge_precedence() {
        let defaults = spec(&[("engine", json!("google")), ("location", json!("Austin"))]);
        let overrides = spec(&[("q", json!("A"))]);

        let merged = normalize(&defaults, &overrides, "secret");

        assert_eq!(merged["q"], "A");
        assert_eq!(merged["engine"], "google");
        assert_eq!(merged["location"], "Austin");
    }

    #[test]
    fn test_override_wins_on_collision() {
        let defaults = spec(&[("engine", json!("google"))]);
        let overrides = spec(&[("q", json!("A")), ("engine", json!("bing"))]);

        let merged = normalize(&defaults, &overrides, "secret");

        assert_eq!(merged["engine"], "bing");
    }

    #[test]
    fn test_credential_injected_when_absent() {
        let merged = normalize(&QuerySpec::new(), &QuerySpec::new(), "secret");

        assert_eq!(merged[PARAM_API_KEY], "secret");
    }

    #[test]
    fn test_caller_credential_kept() {
        let overrides = spec(&[(PARAM_API_KEY, json!("caller_key"))]);

        let merged = normalize(&QuerySpec::new(), &overrides, "secret");

        assert_eq!(merged[PARAM_API_KEY], "caller_key");
    }

    #[test]
    fn test_credential_injection_idempotent() {
        let defaults = spec(&[("engine", json!("google"))]);
        let overrides = spec(&[("q", json!("Coffee"))]);

        let once = normalize(&defaults, &overrides, "secret");
        let twice = normalize(&once, &QuerySpec::new(), "other_secret");

        // 第二次规范化不改变已注入的凭证
        assert_eq!(twice[PARAM_API_KEY], "secret");
        assert_eq!(once, twice);
    }

    #[test]
    fn test_transport_params_forced() {
        let overrides = spec(&[
            (PARAM_OUTPUT, json!("html")),
            (PARAM_SOURCE, json!("curl")),
        ]);

        let merged = normalize(&QuerySpec::new(), &overrides, "secret");

        assert_eq!(merged[PARAM_OUTPUT], OUTPUT_FORMAT);
        assert_eq!(merged[PARAM_SOURCE], SOURCE_TAG);
    }
}
