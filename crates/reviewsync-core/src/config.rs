//! ExecutorConfig - executor の設定（TOML）
//!
//! 全フィールドにデフォルトがあるので、空の TOML（またはファイル無し）で
//! Pretty Reviews endpoint 向けにそのまま動く。
//!
//! ```toml
//! expected_kind = "mod_prettyreviews"
//! http_timeout_secs = 30
//! user_agent = "reviewsync/0.1"
//!
//! [endpoint]
//! path = "index.php"
//! query = [["option", "com_ajax"], ["module", "prettyreviews"], ["method", "updateGoogleReviews"], ["format", "json"]]
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutorConfig {
    /// routine が処理対象とする module の kind
    #[serde(default = "default_expected_kind")]
    pub expected_kind: String,

    /// 呼び出し側が timeout を指定しなかったときに使う
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    #[serde(default)]
    pub endpoint: EndpointConfig,
}

/// リモート URL の固定部分（root 以下の path と操作セレクタ）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointConfig {
    #[serde(default = "default_path")]
    pub path: String,

    /// module ごとのフィールドより前に、この順で出力する
    #[serde(default = "default_query")]
    pub query: Vec<(String, String)>,
}

impl ExecutorConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: ExecutorConfig = toml::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.expected_kind.trim().is_empty() {
            return Err(ConfigError::Invalid("expected_kind must not be empty".into()));
        }
        if self.http_timeout_secs == 0 {
            return Err(ConfigError::Invalid("http_timeout_secs must be > 0".into()));
        }
        Ok(())
    }
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            expected_kind: default_expected_kind(),
            http_timeout_secs: default_http_timeout_secs(),
            user_agent: default_user_agent(),
            endpoint: EndpointConfig::default(),
        }
    }
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            query: default_query(),
        }
    }
}

fn default_expected_kind() -> String {
    "mod_prettyreviews".to_string()
}

fn default_http_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    concat!("reviewsync/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_path() -> String {
    "index.php".to_string()
}

fn default_query() -> Vec<(String, String)> {
    [
        ("option", "com_ajax"),
        ("module", "prettyreviews"),
        ("method", "updateGoogleReviews"),
        ("format", "json"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_gives_defaults() {
        let cfg = ExecutorConfig::from_toml_str("").unwrap();
        assert_eq!(cfg, ExecutorConfig::default());
        assert_eq!(cfg.expected_kind, "mod_prettyreviews");
        assert_eq!(cfg.http_timeout(), Duration::from_secs(30));
        assert_eq!(cfg.endpoint.path, "index.php");
        assert_eq!(cfg.endpoint.query[0], ("option".into(), "com_ajax".into()));
    }

    #[test]
    fn fields_can_be_overridden() {
        let cfg = ExecutorConfig::from_toml_str(
            r#"
            expected_kind = "mod_reviews2"
            http_timeout_secs = 5

            [endpoint]
            path = "api/reviews"
            query = [["op", "update-reviews"]]
            "#,
        )
        .unwrap();

        assert_eq!(cfg.expected_kind, "mod_reviews2");
        assert_eq!(cfg.http_timeout(), Duration::from_secs(5));
        assert_eq!(cfg.endpoint.path, "api/reviews");
        assert_eq!(cfg.endpoint.query, vec![("op".into(), "update-reviews".into())]);
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let err = ExecutorConfig::from_toml_str("http_timeout_secs = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn unknown_types_are_parse_errors() {
        let err = ExecutorConfig::from_toml_str("http_timeout_secs = \"soon\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reviewsync.toml");
        std::fs::write(&path, "http_timeout_secs = 12\n").unwrap();

        let cfg = ExecutorConfig::load(&path).unwrap();
        assert_eq!(cfg.http_timeout_secs, 12);

        let err = ExecutorConfig::load(&dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
