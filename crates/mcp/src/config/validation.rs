//! Validation of tool parameters before a script is built.
//!
//! Every helper trims its input first and returns the normalized value, so
//! callers never embed untrimmed text in a script.

use url::Url;
use wlst_types::{MetricType, StageMode};

use crate::types::WlstError;

const ADMIN_URL_MAX_CHARS: usize = 500;
const USERNAME_MAX_CHARS: usize = 100;
const ADMIN_URL_SCHEMES: [&str; 4] = ["t3://", "t3s://", "http://", "https://"];

pub const SERVER_NAME_MAX_CHARS: usize = 100;
pub const APP_NAME_MAX_CHARS: usize = 200;
pub const DATASOURCE_NAME_MAX_CHARS: usize = 200;
pub const JNDI_NAME_MAX_CHARS: usize = 500;

pub const DEFAULT_MIN_CAPACITY: u32 = 1;
pub const DEFAULT_MAX_CAPACITY: u32 = 15;
const MIN_CAPACITY_LIMIT: u32 = 100;
const MAX_CAPACITY_LIMIT: u32 = 500;

/// Trim an optional value, mapping blank input to `None`.
pub fn trimmed(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|value| !value.is_empty()).map(str::to_string)
}

/// Validate a WebLogic admin server URL.
pub fn validate_admin_url(url: &str) -> Result<String, WlstError> {
    let url = url.trim();
    if url.chars().count() > ADMIN_URL_MAX_CHARS {
        return Err(WlstError::invalid_parameter(
            "admin_url",
            format!("must be at most {ADMIN_URL_MAX_CHARS} characters"),
        ));
    }
    let lowered = url.to_ascii_lowercase();
    if !ADMIN_URL_SCHEMES.iter().any(|scheme| lowered.starts_with(scheme)) {
        return Err(WlstError::invalid_parameter(
            "admin_url",
            "URL must start with t3://, t3s://, http://, or https://",
        ));
    }
    let parsed = Url::parse(url).map_err(|error| WlstError::invalid_parameter("admin_url", format!("not a valid URL: {error}")))?;
    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(WlstError::invalid_parameter("admin_url", "URL must include a host"));
    }
    Ok(url.to_string())
}

/// Validate an admin username.
pub fn validate_username(username: &str) -> Result<String, WlstError> {
    let username = username.trim();
    if username.chars().count() > USERNAME_MAX_CHARS {
        return Err(WlstError::invalid_parameter(
            "username",
            format!("must be at most {USERNAME_MAX_CHARS} characters"),
        ));
    }
    Ok(username.to_string())
}

/// Require a trimmed value whose length lies within `1..=max_chars`.
pub fn require_name(field: &str, value: &str, max_chars: usize) -> Result<String, WlstError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(WlstError::invalid_parameter(field, "must not be empty"));
    }
    if value.chars().count() > max_chars {
        return Err(WlstError::invalid_parameter(field, format!("must be at most {max_chars} characters")));
    }
    Ok(value.to_string())
}

/// Require a non-blank value without an upper bound.
pub fn require_present(field: &str, value: &str) -> Result<String, WlstError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(WlstError::invalid_parameter(field, "must not be empty"));
    }
    Ok(value.to_string())
}

/// Parse an optional stage mode; absent means `stage`.
pub fn parse_stage_mode(value: Option<&str>) -> Result<StageMode, WlstError> {
    match trimmed(value) {
        Some(raw) => raw
            .parse::<StageMode>()
            .map_err(|error| WlstError::invalid_parameter(error.field, error.to_string())),
        None => Ok(StageMode::default()),
    }
}

/// Parse an optional metric category; absent means `all`.
pub fn parse_metric_type(value: Option<&str>) -> Result<MetricType, WlstError> {
    match trimmed(value) {
        Some(raw) => raw
            .parse::<MetricType>()
            .map_err(|error| WlstError::invalid_parameter(error.field, error.to_string())),
        None => Ok(MetricType::default()),
    }
}

/// Validate the JDBC pool bounds, applying defaults for missing values.
pub fn validate_pool_capacity(min_capacity: Option<u32>, max_capacity: Option<u32>) -> Result<(u32, u32), WlstError> {
    let min_capacity = min_capacity.unwrap_or(DEFAULT_MIN_CAPACITY);
    let max_capacity = max_capacity.unwrap_or(DEFAULT_MAX_CAPACITY);

    if min_capacity > MIN_CAPACITY_LIMIT {
        return Err(WlstError::invalid_parameter(
            "min_capacity",
            format!("must be between 0 and {MIN_CAPACITY_LIMIT}"),
        ));
    }
    if !(1..=MAX_CAPACITY_LIMIT).contains(&max_capacity) {
        return Err(WlstError::invalid_parameter(
            "max_capacity",
            format!("must be between 1 and {MAX_CAPACITY_LIMIT}"),
        ));
    }
    if min_capacity > max_capacity {
        return Err(WlstError::invalid_parameter(
            "min_capacity",
            format!("must not exceed max_capacity ({max_capacity})"),
        ));
    }
    Ok((min_capacity, max_capacity))
}

/// Split a comma-separated target list, dropping blank entries.
pub fn split_targets(targets: &str) -> Vec<String> {
    targets
        .split(',')
        .map(str::trim)
        .filter(|target| !target.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_supported_url_schemes() {
        for url in ["t3://localhost:7001", "t3s://admin.example.com:7002", "http://10.0.0.5:7001", "https://host"] {
            assert!(validate_admin_url(url).is_ok(), "{url} should be accepted");
        }
        assert_eq!(validate_admin_url("  t3://localhost:7001 ").unwrap(), "t3://localhost:7001");
    }

    #[test]
    fn rejects_unsupported_url_schemes() {
        let error = validate_admin_url("ftp://localhost:7001").unwrap_err();
        assert!(matches!(error, WlstError::InvalidParameter { ref field, .. } if field == "admin_url"));
        assert!(validate_admin_url("localhost:7001").is_err());
    }

    #[test]
    fn rejects_url_without_host() {
        assert!(validate_admin_url("t3://").is_err());
    }

    #[test]
    fn rejects_overlong_url() {
        let url = format!("t3://{}.example.com", "a".repeat(500));
        assert!(validate_admin_url(&url).is_err());
    }

    #[test]
    fn username_length_is_bounded() {
        assert!(validate_username(&"u".repeat(100)).is_ok());
        assert!(validate_username(&"u".repeat(101)).is_err());
    }

    #[test]
    fn names_are_trimmed_and_bounded() {
        assert_eq!(require_name("server_name", "  ms1 ", SERVER_NAME_MAX_CHARS).unwrap(), "ms1");
        assert!(require_name("server_name", "   ", SERVER_NAME_MAX_CHARS).is_err());
        assert!(require_name("server_name", &"s".repeat(101), SERVER_NAME_MAX_CHARS).is_err());
        assert!(require_name("app_name", &"a".repeat(200), APP_NAME_MAX_CHARS).is_ok());
    }

    #[test]
    fn stage_mode_is_case_insensitive() {
        assert_eq!(parse_stage_mode(Some("NoStage")).unwrap(), StageMode::NoStage);
        assert_eq!(parse_stage_mode(None).unwrap(), StageMode::Stage);
        let error = parse_stage_mode(Some("lazy")).unwrap_err();
        assert!(error.to_string().contains("stage, nostage, external_stage"));
    }

    #[test]
    fn metric_type_defaults_to_all() {
        assert_eq!(parse_metric_type(Some(" ")).unwrap(), MetricType::All);
        assert_eq!(parse_metric_type(Some("JDBC")).unwrap(), MetricType::Jdbc);
        assert!(parse_metric_type(Some("disk")).is_err());
    }

    #[test]
    fn pool_capacity_bounds() {
        assert_eq!(validate_pool_capacity(None, None).unwrap(), (1, 15));
        assert_eq!(validate_pool_capacity(Some(0), Some(1)).unwrap(), (0, 1));
        assert!(validate_pool_capacity(Some(101), Some(200)).is_err());
        assert!(validate_pool_capacity(Some(1), Some(0)).is_err());
        assert!(validate_pool_capacity(Some(1), Some(501)).is_err());
        assert!(validate_pool_capacity(Some(20), Some(10)).is_err());
    }

    #[test]
    fn targets_are_split_on_commas() {
        assert_eq!(split_targets("AdminServer, cluster1,,"), vec!["AdminServer", "cluster1"]);
        assert!(split_targets(" ").is_empty());
    }
}
