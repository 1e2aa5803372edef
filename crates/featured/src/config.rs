//! Scoped storefront configuration.
//!
//! Values are keyed by path (`section/group/field`) and may be set at default,
//! website or store scope. Lookups fall back store → website → default.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Comma- or newline-separated list of featured product SKUs.
pub const FEATURED_SKUS_PATH: &str = "featured_products/general/skus";

/// Environment variable that overrides [`FEATURED_SKUS_PATH`] at every scope.
pub const FEATURED_SKUS_ENV: &str = "STOREFRONT_FEATURED_SKUS";

/// The website/store a configuration value is read for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct StoreScope {
    website: Option<String>,
    store: Option<String>,
}

impl StoreScope {
    /// Default scope only (no website or store override applies).
    pub fn default_scope() -> Self {
        Self::default()
    }

    pub fn website(code: impl Into<String>) -> Self {
        Self {
            website: Some(code.into()),
            store: None,
        }
    }

    pub fn store(website: impl Into<String>, store: impl Into<String>) -> Self {
        Self {
            website: Some(website.into()),
            store: Some(store.into()),
        }
    }

    pub fn website_code(&self) -> Option<&str> {
        self.website.as_deref()
    }

    pub fn store_code(&self) -> Option<&str> {
        self.store.as_deref()
    }
}

/// Source of configuration values.
pub trait ConfigSource: Send + Sync {
    fn value(&self, path: &str, scope: &StoreScope) -> Option<String>;
}

impl<S> ConfigSource for std::sync::Arc<S>
where
    S: ConfigSource + ?Sized,
{
    fn value(&self, path: &str, scope: &StoreScope) -> Option<String> {
        (**self).value(path, scope)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("could not parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// In-memory scoped configuration, loadable from TOML:
///
/// ```toml
/// [default]
/// "featured_products/general/skus" = "WJ01, MS-RED"
///
/// [websites.base]
/// "featured_products/general/skus" = "WJ01"
///
/// [stores.french]
/// "featured_products/general/skus" = "MS-BLUE"
/// ```
///
/// Store codes are global, as in the catalog, so `[stores.<code>]` does not
/// repeat the website.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScopedConfig {
    #[serde(default)]
    default: HashMap<String, String>,
    #[serde(default)]
    websites: HashMap<String, HashMap<String, String>>,
    #[serde(default)]
    stores: HashMap<String, HashMap<String, String>>,
    #[serde(skip)]
    overrides: HashMap<String, String>,
}

impl ScopedConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| ConfigError::ParseFile {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn set_default(&mut self, path: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.default.insert(path.into(), value.into());
        self
    }

    pub fn set_website(
        &mut self,
        website: impl Into<String>,
        path: impl Into<String>,
        value: impl Into<String>,
    ) -> &mut Self {
        self.websites
            .entry(website.into())
            .or_default()
            .insert(path.into(), value.into());
        self
    }

    pub fn set_store(
        &mut self,
        store: impl Into<String>,
        path: impl Into<String>,
        value: impl Into<String>,
    ) -> &mut Self {
        self.stores
            .entry(store.into())
            .or_default()
            .insert(path.into(), value.into());
        self
    }

    /// Apply environment overrides from the process environment.
    pub fn apply_env(&mut self) -> &mut Self {
        self.apply_env_with(|key| std::env::var(key).ok())
    }

    /// Apply environment overrides using `lookup` to read variables.
    pub fn apply_env_with<F>(&mut self, lookup: F) -> &mut Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(skus) = lookup(FEATURED_SKUS_ENV) {
            tracing::debug!(env = FEATURED_SKUS_ENV, "featured SKUs overridden from environment");
            self.overrides.insert(FEATURED_SKUS_PATH.to_string(), skus);
        }
        self
    }
}

impl ConfigSource for ScopedConfig {
    fn value(&self, path: &str, scope: &StoreScope) -> Option<String> {
        if let Some(v) = self.overrides.get(path) {
            return Some(v.clone());
        }
        let store = scope
            .store_code()
            .and_then(|code| self.stores.get(code))
            .and_then(|values| values.get(path));
        let website = || {
            scope
                .website_code()
                .and_then(|code| self.websites.get(code))
                .and_then(|values| values.get(path))
        };
        store
            .or_else(website)
            .or_else(|| self.default.get(path))
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
[default]
"featured_products/general/skus" = "A,B"

[websites.base]
"featured_products/general/skus" = "W"

[stores.french]
"featured_products/general/skus" = "S"
"#;

    #[test]
    fn store_scope_falls_back_to_website_then_default() {
        let config = ScopedConfig::from_toml_str(SAMPLE).unwrap();

        let store = StoreScope::store("base", "french");
        assert_eq!(config.value(FEATURED_SKUS_PATH, &store).as_deref(), Some("S"));

        let other_store = StoreScope::store("base", "german");
        assert_eq!(config.value(FEATURED_SKUS_PATH, &other_store).as_deref(), Some("W"));

        let other_site = StoreScope::store("b2b", "wholesale");
        assert_eq!(config.value(FEATURED_SKUS_PATH, &other_site).as_deref(), Some("A,B"));

        assert_eq!(
            config.value(FEATURED_SKUS_PATH, &StoreScope::default_scope()).as_deref(),
            Some("A,B")
        );
        assert_eq!(config.value("other/path", &store), None);
    }

    #[test]
    fn env_override_wins_at_every_scope() {
        let mut config = ScopedConfig::from_toml_str(SAMPLE).unwrap();
        config.apply_env_with(|key| (key == FEATURED_SKUS_ENV).then(|| "ENV-1".to_string()));

        for scope in [StoreScope::default_scope(), StoreScope::store("base", "french")] {
            assert_eq!(config.value(FEATURED_SKUS_PATH, &scope).as_deref(), Some("ENV-1"));
        }
    }

    #[test]
    fn missing_env_leaves_config_untouched() {
        let mut config = ScopedConfig::from_toml_str(SAMPLE).unwrap();
        config.apply_env_with(|_| None);
        assert_eq!(
            config.value(FEATURED_SKUS_PATH, &StoreScope::default_scope()).as_deref(),
            Some("A,B")
        );
    }

    #[test]
    fn setters_build_scoped_values() {
        let mut config = ScopedConfig::new();
        config
            .set_default(FEATURED_SKUS_PATH, "D")
            .set_website("base", FEATURED_SKUS_PATH, "W");
        assert_eq!(
            config.value(FEATURED_SKUS_PATH, &StoreScope::website("base")).as_deref(),
            Some("W")
        );
        config.set_store("default", FEATURED_SKUS_PATH, "S");
        assert_eq!(
            config.value(FEATURED_SKUS_PATH, &StoreScope::store("base", "default")).as_deref(),
            Some("S")
        );
    }

    #[test]
    fn load_reports_missing_file() {
        let err = ScopedConfig::load("/definitely/not/here.toml").unwrap_err();
        match err {
            ConfigError::ReadFile { path, .. } => assert!(path.ends_with("here.toml")),
            other => panic!("Expected ReadFile error, got {other:?}"),
        }
    }

    #[test]
    fn malformed_toml_is_rejected() {
        match ScopedConfig::from_toml_str("[default\n").unwrap_err() {
            ConfigError::Parse(_) => {}
            other => panic!("Expected Parse error, got {other:?}"),
        }
    }
}
