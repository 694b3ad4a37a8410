use std::path::PathBuf;

/// Failures at the I/O edges of the crate (reading, fetching and parsing the
/// page). The media pipeline itself never fails.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    #[error("page has no #mediaList element")]
    NoMediaList,

    #[error("invalid selector `{0}`")]
    Selector(&'static str),

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid url `{0}`")]
    InvalidUrl(String),
}
