//! Configuration loading.
//!
//! Values come from a TOML file (explicit path, else the per-user config
//! directory, else nothing) and are then overridden by command-line flags.

use crate::deployment::SiteLocation;
use crate::error::ConfigError;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Directory name under the platform config dir.
pub const CONFIG_DIR_NAME: &str = "customization-catalog";

/// File name inside [`CONFIG_DIR_NAME`].
pub const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogConfig {
    pub site: SiteConfig,
    pub local: LocalConfig,
    pub published: PublishedConfig,
    pub loader: LoaderConfig,
    pub server: ServerConfig,
}

/// Where the catalog is hosted. No URL means local mode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LocalConfig {
    /// Checkout root holding `docs/` and `.windsurf/`.
    pub root: String,
}

impl Default for LocalConfig {
    fn default() -> Self {
        Self {
            root: "..".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PublishedConfig {
    /// Used when the site hostname has no leading label.
    pub default_owner: String,
    /// Used when the site URL has no path segment.
    pub default_repo: String,
    pub branch: String,
    pub raw_host: String,
}

impl Default for PublishedConfig {
    fn default() -> Self {
        Self {
            default_owner: "Windsurf-Samples".to_string(),
            default_repo: "cascade-customizations-catalog".to_string(),
            branch: "main".to_string(),
            raw_host: "raw.githubusercontent.com".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoaderConfig {
    /// Maximum documents fetched at once.
    pub concurrency: usize,
    /// HTTP request timeout in seconds; `0` disables it.
    pub timeout_secs: u64,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            concurrency: 8,
            timeout_secs: 10,
        }
    }
}

impl LoaderConfig {
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Canonical sources kept in memory by `get_source`.
    pub source_cache_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            source_cache_size: 32,
        }
    }
}

impl CatalogConfig {
    /// Parse TOML text. `origin` only labels errors.
    pub fn from_toml_str(text: &str, origin: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: origin.display().to_string(),
            source,
        })
    }

    /// Read and parse a config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text, path)
    }

    /// Default per-user config file location, if the platform has one.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load from `explicit` when given (it must exist), else from the default
    /// location when a file is there, else fall back to built-in defaults.
    pub fn discover(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            tracing::debug!(path = %path.display(), "Loading config file");
            return Self::from_file(path);
        }

        match Self::default_path() {
            Some(path) if path.is_file() => {
                tracing::debug!(path = %path.display(), "Loading config file");
                Self::from_file(&path)
            }
            _ => Ok(Self::default()),
        }
    }

    /// Apply command-line overrides on top of file values.
    pub fn with_overrides(mut self, site_url: Option<String>, root: Option<String>) -> Self {
        if site_url.is_some() {
            self.site.url = site_url;
        }
        if let Some(root) = root {
            self.local.root = root;
        }
        self
    }

    /// Parsed hosting location, or `None` for local mode.
    pub fn site_location(&self) -> Result<Option<SiteLocation>, ConfigError> {
        self.site
            .url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .map(SiteLocation::parse)
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::{check, let_assert};

    #[test]
    fn test_defaults() {
        let config = CatalogConfig::default();
        check!(config.local.root == "..");
        check!(config.loader.concurrency == 8);
        check!(config.loader.timeout() == Some(Duration::from_secs(10)));
        check!(config.published.branch == "main");
        check!(config.site_location().unwrap().is_none());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let text = "[site]\nurl = \"https://acme.github.io/catalog/\"\n\n[loader]\ntimeout_secs = 0\n";
        let config = CatalogConfig::from_toml_str(text, Path::new("test.toml")).unwrap();
        check!(config.loader.concurrency == 8);
        check!(config.loader.timeout().is_none());
        check!(config.published.default_owner == "Windsurf-Samples");

        let_assert!(Ok(Some(location)) = config.site_location());
        check!(location.hostname == "acme.github.io");
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let result = CatalogConfig::from_toml_str("[loader]\nparallel = 3\n", Path::new("bad.toml"));
        let_assert!(Err(ConfigError::Parse { path, .. }) = result);
        check!(path == "bad.toml");
    }

    #[test]
    fn test_overrides_win() {
        let config = CatalogConfig::default()
            .with_overrides(Some("https://x.github.io/".to_string()), Some("/srv".to_string()));
        check!(config.site.url.as_deref() == Some("https://x.github.io/"));
        check!(config.local.root == "/srv");

        let unchanged = config.clone().with_overrides(None, None);
        check!(unchanged == config);
    }

    #[test]
    fn test_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.toml");
        std::fs::write(&path, "[server]\nsource_cache_size = 4\n").unwrap();

        let config = CatalogConfig::discover(Some(&path)).unwrap();
        check!(config.server.source_cache_size == 4);
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = CatalogConfig::discover(Some(&dir.path().join("nope.toml")));
        let_assert!(Err(ConfigError::Read { .. }) = result);
    }
}
