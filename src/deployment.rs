//! Hosting-dependent path resolution.
//!
//! The same manifest is served two ways: raw markdown from a local checkout, or
//! a statically rendered GitHub Pages site whose canonical sources live on the
//! raw content host. Which one applies is decided once, from where the catalog
//! is hosted.

use crate::config::CatalogConfig;
use crate::error::ConfigError;
use crate::manifest::ManifestEntry;
use crate::metadata::ContentEncoding;
use std::borrow::Cow;
use std::fmt;

/// Hostname fragment that marks a statically published site.
pub const PUBLISHED_HOST_MARKER: &str = "github.io";

/// Where the catalog is hosted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteLocation {
    pub scheme: String,
    pub hostname: String,
    pub pathname: String,
}

impl SiteLocation {
    /// Parse an absolute site URL such as `https://owner.github.io/repo/`.
    pub fn parse(url: &str) -> Result<Self, ConfigError> {
        let parsed = reqwest::Url::parse(url.trim()).map_err(|e| ConfigError::SiteUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        let hostname = parsed.host_str().ok_or_else(|| ConfigError::SiteUrl {
            url: url.to_string(),
            reason: "missing host".to_string(),
        })?;

        Ok(Self {
            scheme: parsed.scheme().to_string(),
            hostname: hostname.to_string(),
            pathname: parsed.path().to_string(),
        })
    }

    pub fn is_published(&self) -> bool {
        self.hostname.contains(PUBLISHED_HOST_MARKER)
    }

    /// First non-empty path segment.
    fn first_segment(&self) -> Option<&str> {
        self.pathname.split('/').find(|segment| !segment.is_empty())
    }

    /// First dot-separated hostname label, if non-empty.
    fn first_label(&self) -> Option<&str> {
        self.hostname.split('.').next().filter(|label| !label.is_empty())
    }
}

/// Path and encoding decisions for one hosting mode.
pub trait DeploymentContext: Send + Sync + fmt::Debug {
    /// Short mode name for logs and stats.
    fn name(&self) -> &'static str;

    /// Prefix shared by every display path.
    fn base_path(&self) -> &str;

    /// Suffix of display documents, including the dot.
    fn file_extension(&self) -> &'static str;

    /// Encoding of the documents behind [`display_path`](Self::display_path).
    fn encoding(&self) -> ContentEncoding;

    /// Location fetched to build the record.
    fn display_path(&self, entry: &ManifestEntry) -> String;

    /// Location of the canonical markdown, used for copy and download.
    fn source_path(&self, entry: &ManifestEntry) -> String;
}

/// Raw markdown served from a local checkout.
#[derive(Debug, Clone)]
pub struct LocalContext {
    root: String,
}

impl LocalContext {
    pub fn new(root: impl Into<String>) -> Self {
        let root: String = root.into();
        let trimmed = root.trim_end_matches('/');
        let root = if trimmed.is_empty() && root.starts_with('/') {
            "/".to_string()
        } else {
            trimmed.to_string()
        };
        Self { root }
    }

    fn join(&self, tail: &str) -> String {
        if self.root == "/" {
            format!("/{}", tail)
        } else {
            format!("{}/{}", self.root, tail)
        }
    }
}

impl DeploymentContext for LocalContext {
    fn name(&self) -> &'static str {
        "local"
    }

    fn base_path(&self) -> &str {
        &self.root
    }

    fn file_extension(&self) -> &'static str {
        ".md"
    }

    fn encoding(&self) -> ContentEncoding {
        ContentEncoding::Frontmatter
    }

    fn display_path(&self, entry: &ManifestEntry) -> String {
        self.join(&format!("docs/{}{}", entry.relative_stem(), self.file_extension()))
    }

    fn source_path(&self, entry: &ManifestEntry) -> String {
        self.join(&format!(".windsurf/{}.md", entry.relative_stem()))
    }
}

/// Rendered HTML on a published site, with sources on the raw content host.
#[derive(Debug, Clone)]
pub struct PublishedContext {
    origin: String,
    base_path: String,
    owner: String,
    repo: String,
    branch: String,
    raw_host: String,
}

impl PublishedContext {
    pub fn new(location: &SiteLocation, config: &CatalogConfig) -> Self {
        let published = &config.published;
        let repo = location
            .first_segment()
            .unwrap_or(&published.default_repo)
            .to_string();
        let owner = location
            .first_label()
            .unwrap_or(&published.default_owner)
            .to_string();

        Self {
            origin: format!("{}://{}", location.scheme, location.hostname),
            base_path: format!("/{}", repo),
            owner,
            repo,
            branch: published.branch.clone(),
            raw_host: published.raw_host.trim_end_matches('/').to_string(),
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn repo(&self) -> &str {
        &self.repo
    }
}

impl DeploymentContext for PublishedContext {
    fn name(&self) -> &'static str {
        "published"
    }

    fn base_path(&self) -> &str {
        &self.base_path
    }

    fn file_extension(&self) -> &'static str {
        ".html"
    }

    fn encoding(&self) -> ContentEncoding {
        ContentEncoding::Rendered
    }

    fn display_path(&self, entry: &ManifestEntry) -> String {
        format!(
            "{}{}/docs/{}{}",
            self.origin,
            self.base_path,
            entry.relative_stem(),
            self.file_extension()
        )
    }

    fn source_path(&self, entry: &ManifestEntry) -> String {
        format!(
            "https://{}/{}/{}/{}/.windsurf/{}.md",
            self.raw_host,
            self.owner,
            self.repo,
            self.branch,
            entry.relative_stem()
        )
    }
}

/// Pick the deployment context for `location`. No location means local mode.
pub fn resolve(location: Option<&SiteLocation>, config: &CatalogConfig) -> Box<dyn DeploymentContext> {
    match location {
        Some(location) if location.is_published() => {
            let context = PublishedContext::new(location, config);
            tracing::info!(
                owner = %context.owner(),
                repo = %context.repo(),
                "Using published site documents"
            );
            Box::new(context)
        }
        _ => {
            let root = expand_tilde(&config.local.root);
            tracing::info!(root = %root, "Using local documents");
            Box::new(LocalContext::new(root.into_owned()))
        }
    }
}

/// Expands tilde (`~`) in a path to the user's home directory.
///
/// - `~/foo` becomes `/home/user/foo`
/// - `~` becomes `/home/user`
/// - Other paths are returned unchanged
pub fn expand_tilde(path: &str) -> Cow<'_, str> {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return Cow::Owned(home.join(stripped).display().to_string());
        }
    } else if path == "~"
        && let Some(home) = dirs::home_dir()
    {
        return Cow::Owned(home.display().to_string());
    }
    Cow::Borrowed(path)
}
