//! Where template bytes come from
//!
//! - [`DirSource`]: a local directory (the default `templates/`)
//! - [`HttpSource`]: a static HTTP(S) host, fetched with a blocking client

use docfill_core::config::TemplatesConfig;
use docfill_core::{DocfillError, Result};
use reqwest::blocking::Client;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;
use url::Url;

/// Default timeout for template requests (30 seconds)
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// User agent sent with template requests
pub const USER_AGENT: &str = concat!("docfill/", env!("CARGO_PKG_VERSION"));

/// Retrieves raw template files by relative path
pub trait TemplateSource {
    /// Fetch the complete file at `path`
    fn fetch(&self, path: &str) -> Result<Vec<u8>>;

    /// Human-readable location, for logs and status output
    fn describe(&self) -> String;
}

/// Low-level fetch failures, folded into `FETCH_FAILED`
#[derive(Debug, Error)]
enum FetchError {
    #[error("HTTP {status} from {url}")]
    Status {
        url: Url,
        status: reqwest::StatusCode,
    },

    #[error("invalid template path: {0}")]
    InvalidPath(#[from] url::ParseError),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FetchError {
    fn into_docfill(self, path: &str) -> DocfillError {
        DocfillError::FetchFailed {
            path: path.to_string(),
            reason: self.to_string(),
        }
    }
}

/// Templates stored in a local directory
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl TemplateSource for DirSource {
    fn fetch(&self, path: &str) -> Result<Vec<u8>> {
        let full = self.root.join(path);
        debug!(path = %full.display(), "reading template");
        std::fs::read(&full).map_err(|source| {
            FetchError::Io { path: full, source }.into_docfill(path)
        })
    }

    fn describe(&self) -> String {
        self.root.display().to_string()
    }
}

/// Templates served over HTTP(S) below a base URL
#[derive(Debug, Clone)]
pub struct HttpSource {
    base: Url,
    client: Client,
}

impl HttpSource {
    /// Create a source with the default timeout
    pub fn new(base: Url) -> Result<Self> {
        Self::with_timeout(base, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(mut base: Url, timeout: Duration) -> Result<Self> {
        // Without a trailing slash `join` would replace the last segment
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| DocfillError::Generic(format!("cannot build HTTP client: {}", e)))?;

        Ok(Self { base, client })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    fn download(&self, path: &str) -> std::result::Result<Vec<u8>, FetchError> {
        let url = self.base.join(path)?;
        debug!(url = %url, "downloading template");

        let response = self.client.get(url.as_str()).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status { url, status });
        }

        Ok(response.bytes()?.to_vec())
    }
}

impl TemplateSource for HttpSource {
    fn fetch(&self, path: &str) -> Result<Vec<u8>> {
        self.download(path).map_err(|e| e.into_docfill(path))
    }

    fn describe(&self) -> String {
        self.base.to_string()
    }
}

/// Build the source named by `[templates].source`
///
/// `http://` and `https://` values are remote hosts; anything else is a
/// directory, resolved against `base_dir` when relative.
pub fn source_from_config(
    config: &TemplatesConfig,
    base_dir: &Path,
) -> Result<Box<dyn TemplateSource>> {
    let source = config.source.trim();

    if source.starts_with("http://") || source.starts_with("https://") {
        let base = Url::parse(source).map_err(|e| DocfillError::ConfigInvalidValue {
            field: "templates.source".to_string(),
            reason: e.to_string(),
        })?;
        return Ok(Box::new(HttpSource::new(base)?));
    }

    Ok(Box::new(DirSource::new(base_dir.join(source))))
}
