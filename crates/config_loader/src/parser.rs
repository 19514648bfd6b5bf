//! 配置解析模块
//!
//! 支持 TOML (主要) 和 JSON (可选) 格式。
//! 解析产出原始配置（transport 仍为点分字符串），由 validator 解析并定型。

use contracts::RelayError;
use serde::Deserialize;

/// 配置文件格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// TOML 格式 (推荐)
    Toml,
    /// JSON 格式
    Json,
}

impl ConfigFormat {
    /// 从文件扩展名推断格式
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Raw configuration, transport descriptors not yet resolved
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawConfig {
    #[serde(default)]
    pub destinations: Vec<RawDestination>,
    #[serde(default)]
    pub settings: RawSettings,
}

/// Raw destination entry as written in the config file
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawDestination {
    pub name: String,
    /// Dotted `scheme.action` descriptor, e.g. `http.POST` or `log.warn`
    pub transport: String,
    /// Target address, required for network transports
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct RawSettings {
    #[serde(default)]
    pub default_strategy: Option<String>,
    #[serde(default)]
    pub dispatch_timeout_ms: Option<u64>,
}

/// 解析 TOML 格式配置
pub(crate) fn parse_toml(content: &str) -> Result<RawConfig, RelayError> {
    toml::from_str(content).map_err(|e| RelayError::ConfigParse {
        message: format!("TOML parse error: {e}"),
        source: Some(Box::new(e)),
    })
}

/// 解析 JSON 格式配置
pub(crate) fn parse_json(content: &str) -> Result<RawConfig, RelayError> {
    serde_json::from_str(content).map_err(|e| RelayError::ConfigParse {
        message: format!("JSON parse error: {e}"),
        source: Some(Box::new(e)),
    })
}

/// 根据格式解析配置
pub(crate) fn parse(content: &str, format: ConfigFormat) -> Result<RawConfig, RelayError> {
    match format {
        ConfigFormat::Toml => parse_toml(content),
        ConfigFormat::Json => parse_json(content),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_toml_minimal() {
        let content = r#"
[[destinations]]
name = "hook"
transport = "http.POST"
url = "http://localhost:9000/events"

[[destinations]]
name = "trace"
transport = "log.debug"

[settings]
default_strategy = "ALL"
dispatch_timeout_ms = 5000
"#;
        let result = parse_toml(content);
        assert!(result.is_ok(), "Failed: {:?}", result.err());
        let raw = result.unwrap();
        assert_eq!(raw.destinations.len(), 2);
        assert_eq!(raw.destinations[0].transport, "http.POST");
        assert_eq!(raw.settings.dispatch_timeout_ms, Some(5000));
    }

    #[test]
    fn test_parse_json_minimal() {
        let content = r#"{
            "destinations": [
                {"name": "hook", "transport": "http.PUT", "url": "http://x/"},
                {"name": "warnings", "transport": "log.warn"}
            ],
            "settings": {"default_strategy": "SMALL"}
        }"#;
        let result = parse_json(content);
        assert!(result.is_ok(), "Failed: {:?}", result.err());
        let raw = result.unwrap();
        assert_eq!(raw.settings.default_strategy.as_deref(), Some("SMALL"));
    }

    #[test]
    fn test_parse_toml_syntax_error() {
        let content = "invalid toml [[[";
        let result = parse_toml(content);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, RelayError::ConfigParse { .. }));
    }

    #[test]
    fn test_settings_are_optional() {
        let raw = parse_toml("[[destinations]]\nname = \"d\"\ntransport = \"log.info\"\n")
            .unwrap();
        assert!(raw.settings.default_strategy.is_none());
        assert!(raw.settings.dispatch_timeout_ms.is_none());
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            ConfigFormat::from_extension("toml"),
            Some(ConfigFormat::Toml)
        );
        assert_eq!(
            ConfigFormat::from_extension("TOML"),
            Some(ConfigFormat::Toml)
        );
        assert_eq!(
            ConfigFormat::from_extension("json"),
            Some(ConfigFormat::Json)
        );
        assert_eq!(ConfigFormat::from_extension("yaml"), None);
    }
}
