//! Layered configuration for nabdex.
//!
//! Values are merged from, lowest priority first:
//! 1. built-in defaults,
//! 2. a configuration file (TOML, YAML or JSON, picked by extension),
//! 3. environment variables prefixed with `NABDEX_`, using `__` to separate
//!    nested keys (`NABDEX_INDEXER__API_KEY=...`).
//!
//! Without an explicit path the file is looked up in the platform config
//! directory, e.g. `~/.config/nabdex/config.toml`.

pub mod error;
mod validation;

use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use exn::ResultExt;
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use url::Url;

use crate::error::{ErrorKind, Result};

/// Prefix for environment variable overrides.
pub const ENV_PREFIX: &str = "NABDEX_";
/// Environment variable naming an explicit configuration file.
pub const CONFIG_ENV_VAR: &str = "NABDEX_CONFIG";

/// Extension namespaces recognised on feed attributes unless configured otherwise.
pub const DEFAULT_NAMESPACES: [&str; 2] = ["newznab", "torznab"];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub indexer: IndexerConfig,
    pub decode: DecodeConfig,
}

/// The indexer feeds are fetched from. Recorded on every decoded entry so
/// results can be traced back to where they came from.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexerConfig {
    pub name: Option<String>,
    pub endpoint: Option<Url>,
    pub api_key: Option<String>,
}
impl Debug for IndexerConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("IndexerConfig")
            .field("name", &self.name)
            .field("endpoint", &self.endpoint.as_ref().map(Url::as_str))
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeConfig {
    /// XML namespace prefixes whose `attr` elements carry extension attributes.
    pub namespaces: Vec<String>,
}
impl Default for DecodeConfig {
    fn default() -> Self {
        Self {
            namespaces: DEFAULT_NAMESPACES.iter().map(|ns| ns.to_string()).collect(),
        }
    }
}

impl Config {
    /// Loads from the default sources: the file named by `NABDEX_CONFIG`, or
    /// the platform config file when that variable is unset.
    pub fn load() -> Result<Self> {
        let path = std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from).or_else(default_path);
        Self::load_from(path.as_deref())
    }

    /// Loads with an explicit file. A missing file contributes nothing; defaults
    /// and the environment still apply.
    #[instrument]
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        if let Some(path) = path {
            figment = match path.extension().and_then(|ext| ext.to_str()) {
                Some("toml") => figment.merge(Toml::file(path)),
                Some("yaml" | "yml") => figment.merge(Yaml::file(path)),
                Some("json") => figment.merge(Json::file(path)),
                other => exn::bail!(ErrorKind::UnsupportedFormat(other.unwrap_or_default().to_string())),
            };
        }
        let figment = figment.merge(Env::prefixed(ENV_PREFIX).ignore(&["config"]).split("__"));
        Self::from_figment(&figment)
    }

    /// Extracts and validates a configuration from a prepared figment.
    pub fn from_figment(figment: &Figment) -> Result<Self> {
        let config: Config = figment.extract().or_raise(|| ErrorKind::Load)?;
        config.validate()?;
        tracing::debug!(
            endpoint = config.indexer.endpoint.as_ref().map(Url::as_str),
            namespaces = ?config.decode.namespaces,
            "configuration loaded"
        );
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        validation::validate(self)
    }
}

/// `<platform config dir>/nabdex/config.toml`, when a home directory exists.
pub fn default_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "nabdex").map(|dirs| dirs.config_dir().join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.decode.namespaces, vec!["newznab", "torznab"]);
        assert!(config.indexer.endpoint.is_none());
        config.validate().unwrap();
    }

    #[test]
    fn load_toml_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
[indexer]
name = "example"
endpoint = "https://indexer.example/api"
api_key = "0123456789abcdef"

[decode]
namespaces = ["newznab"]
            "#,
        )
        .unwrap();

        let config = Config::load_from(Some(&path)).unwrap();
        assert_eq!(config.indexer.name.as_deref(), Some("example"));
        assert_eq!(config.indexer.endpoint.as_ref().map(Url::as_str), Some("https://indexer.example/api"));
        assert_eq!(config.decode.namespaces, vec!["newznab"]);
    }

    #[test]
    fn load_yaml_file_keeps_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.yaml");
        fs::write(&path, "indexer:\n  name: yaml\n").unwrap();

        let config = Config::load_from(Some(&path)).unwrap();
        assert_eq!(config.indexer.name.as_deref(), Some("yaml"));
        assert_eq!(config.decode, DecodeConfig::default());
    }

    #[test]
    fn unsupported_extension() {
        let err = Config::load_from(Some(Path::new("config.ini"))).unwrap_err();
        assert_eq!(*err, ErrorKind::UnsupportedFormat("ini".to_string()));
    }

    #[test]
    fn environment_overrides_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("config.toml", "[indexer]\napi_key = \"from-file\"\n")?;
            jail.set_env("NABDEX_INDEXER__API_KEY", "from-env");
            let config = Config::load_from(Some(Path::new("config.toml"))).unwrap();
            assert_eq!(config.indexer.api_key.as_deref(), Some("from-env"));
            Ok(())
        });
    }

    #[test]
    fn invalid_values_are_rejected() {
        let figment = Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::string("[indexer]\nendpoint = \"ftp://indexer.example/\"\n"));
        let err = Config::from_figment(&figment).unwrap_err();
        assert!(matches!(*err, ErrorKind::Invalid { field: "indexer.endpoint", .. }));

        let figment = Figment::from(Toml::string("[indexer]\nendpoint = \"not a url\"\n"));
        let err = Config::from_figment(&figment).unwrap_err();
        assert_eq!(*err, ErrorKind::Load);
    }

    #[test]
    fn api_key_is_redacted() {
        let indexer = IndexerConfig {
            api_key: Some("secret".to_string()),
            ..Default::default()
        };
        let debug = format!("{indexer:?}");
        assert!(!debug.contains("secret"));
        assert!(debug.contains("<redacted>"));
    }
}
