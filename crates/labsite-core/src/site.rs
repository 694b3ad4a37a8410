//! Page source: a local HTML file or an http(s) URL.

use std::fmt;
use std::path::{Path, PathBuf};

use reqwest::Url;
use tracing::debug;

use crate::error::SiteError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SiteSource {
    Url(Url),
    Path(PathBuf),
}

impl SiteSource {
    /// `http://` and `https://` are fetched; anything else is a filesystem path.
    pub fn parse(raw: &str) -> Result<Self, SiteError> {
        let raw = raw.trim();
        if raw.starts_with("http://") || raw.starts_with("https://") {
            let url = Url::parse(raw).map_err(|_| SiteError::InvalidUrl(raw.to_string()))?;
            Ok(Self::Url(url))
        } else {
            Ok(Self::Path(PathBuf::from(raw)))
        }
    }

    /// Resolve a path relative to this page (like a relative `href`).
    pub fn join(&self, relative: &str) -> Result<Self, SiteError> {
        match self {
            Self::Url(base) => base
                .join(relative)
                .map(Self::Url)
                .map_err(|_| SiteError::InvalidUrl(relative.to_string())),
            Self::Path(page) => {
                let dir = page.parent().unwrap_or_else(|| Path::new(""));
                Ok(Self::Path(dir.join(relative)))
            }
        }
    }

    /// Fetch the text at this source. A non-success status is an error.
    pub async fn fetch(&self, client: &reqwest::Client) -> Result<String, SiteError> {
        match self {
            Self::Url(url) => {
                let response = request(client, url).await?;
                let status = response.status();
                if !status.is_success() {
                    return Err(SiteError::Status {
                        url: url.to_string(),
                        status: status.as_u16(),
                    });
                }
                Ok(response.text().await?)
            }
            Self::Path(path) => {
                tokio::fs::read_to_string(path)
                    .await
                    .map_err(|source| SiteError::Io {
                        path: path.clone(),
                        source,
                    })
            }
        }
    }

    /// Like `fetch`, but a missing file or a non-success status gives `None`.
    /// Transport failures are still errors.
    pub async fn fetch_optional(
        &self,
        client: &reqwest::Client,
    ) -> Result<Option<String>, SiteError> {
        match self {
            Self::Url(url) => {
                let response = request(client, url).await?;
                let status = response.status();
                if !status.is_success() {
                    debug!("{} returned {}", url, status);
                    return Ok(None);
                }
                Ok(Some(response.text().await?))
            }
            Self::Path(path) => match tokio::fs::read_to_string(path).await {
                Ok(text) => Ok(Some(text)),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
                Err(source) => Err(SiteError::Io {
                    path: path.clone(),
                    source,
                }),
            },
        }
    }
}

async fn request(client: &reqwest::Client, url: &Url) -> Result<reqwest::Response, SiteError> {
    let response = client
        .get(url.clone())
        .header(reqwest::header::CACHE_CONTROL, "no-store")
        .send()
        .await?;
    Ok(response)
}

impl fmt::Display for SiteSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url(url) => write!(f, "{}", url),
            Self::Path(path) => write!(f, "{}", path.display()),
        }
    }
}
