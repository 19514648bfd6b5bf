//! 配置校验模块
//!
//! 校验规则：
//! - destination name 非空且唯一
//! - transport 描述符合法 (scheme.action)
//! - http transport 必须带合法 url，log transport 不允许 url
//! - dispatch_timeout_ms > 0

use std::collections::HashSet;

use contracts::{Destination, RelayBlueprint, RelayError, RelaySettings, Transport};

use crate::parser::{RawConfig, RawDestination};

/// 校验原始配置并解析为 `RelayBlueprint`
///
/// 返回第一个遇到的错误，或解析结果。
pub(crate) fn resolve(raw: RawConfig) -> Result<RelayBlueprint, RelayError> {
    validate_names(&raw.destinations)?;
    validate_timeout(&raw)?;

    let mut destinations = Vec::with_capacity(raw.destinations.len());
    for dest in &raw.destinations {
        destinations.push(resolve_destination(dest)?);
    }

    Ok(RelayBlueprint {
        destinations,
        settings: RelaySettings {
            default_strategy: raw.settings.default_strategy,
            dispatch_timeout_ms: raw
                .settings
                .dispatch_timeout_ms
                .unwrap_or(contracts::DEFAULT_DISPATCH_TIMEOUT_MS),
        },
    })
}

/// 校验 destination name 非空且唯一
fn validate_names(destinations: &[RawDestination]) -> Result<(), RelayError> {
    let mut seen = HashSet::new();
    for (idx, dest) in destinations.iter().enumerate() {
        if dest.name.is_empty() {
            return Err(RelayError::config_validation(
                format!("destinations[{idx}].name"),
                "destination name cannot be empty",
            ));
        }
        if !seen.insert(&dest.name) {
            return Err(RelayError::config_validation(
                format!("destinations[name={}]", dest.name),
                "duplicate destination name",
            ));
        }
    }
    Ok(())
}

fn validate_timeout(raw: &RawConfig) -> Result<(), RelayError> {
    if raw.settings.dispatch_timeout_ms == Some(0) {
        return Err(RelayError::config_validation(
            "settings.dispatch_timeout_ms",
            "dispatch_timeout_ms must be > 0",
        ));
    }
    Ok(())
}

/// 解析单个 destination：描述符定型 + url 检查
fn resolve_destination(dest: &RawDestination) -> Result<Destination, RelayError> {
    let transport = Transport::from_descriptor(&dest.transport, dest.url.as_deref())?;

    match &transport {
        Transport::Http { url, .. } => {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(RelayError::config_validation(
                    format!("destinations[name={}].url", dest.name),
                    format!("url must start with http:// or https://, got '{url}'"),
                ));
            }
        }
        Transport::Log { .. } => {
            if dest.url.is_some() {
                return Err(RelayError::config_validation(
                    format!("destinations[name={}].url", dest.name),
                    "log transport does not take a url",
                ));
            }
        }
    }

    Ok(Destination::new(&dest.name, transport))
}
