//! Overlay partial loader.
//!
//! Fetches every partial concurrently, joins the fragments in list order and
//! reports them in one `PartialsLoaded`. A missing fragment is skipped; a
//! transport failure abandons the whole batch with a warning.

use futures_util::future::try_join_all;
use tracing::{info, warn};

use crate::error::SiteError;
use crate::site::SiteSource;

pub const DEFAULT_PARTIALS: &[&str] = &[
    "partials/overlay-aboutOverlay.html",
    "partials/overlay-professorOverlay.html",
    "partials/overlay-teamOverlay.html",
    "partials/overlay-publicationOverlay.html",
    "partials/overlay-activityOverlay.html",
    "partials/overlay-insideLabOverlay.html",
    "partials/overlay-researchOverlay.html",
    "partials/overlay-contactOverlay.html",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartialsLoaded {
    /// Non-empty fragments joined with newlines.
    pub html: String,
    pub loaded: usize,
    pub skipped: usize,
}

/// Load the partials next to `page`. Never fails: `None` means nothing was
/// injected (all fragments missing, or the batch was abandoned).
pub async fn load_partials(
    client: &reqwest::Client,
    page: &SiteSource,
    files: &[String],
) -> Option<PartialsLoaded> {
    if files.is_empty() {
        return None;
    }
    match try_load(client, page, files).await {
        Ok(loaded) => {
            if let Some(p) = &loaded {
                info!(
                    "[partials] loaded {} fragment(s), skipped {}",
                    p.loaded, p.skipped
                );
            }
            loaded
        }
        Err(e) => {
            warn!("[partials] failed to load overlays: {}", e);
            None
        }
    }
}

async fn try_load(
    client: &reqwest::Client,
    page: &SiteSource,
    files: &[String],
) -> Result<Option<PartialsLoaded>, SiteError> {
    let sources = files
        .iter()
        .map(|f| page.join(f))
        .collect::<Result<Vec<_>, _>>()?;

    let chunks = try_join_all(sources.iter().map(|s| s.fetch_optional(client))).await?;

    let fragments: Vec<String> = chunks
        .into_iter()
        .flatten()
        .filter(|chunk| !chunk.is_empty())
        .collect();
    let loaded = fragments.len();
    let html = fragments.join("\n");
    if html.is_empty() {
        return Ok(None);
    }
    Ok(Some(PartialsLoaded {
        html,
        loaded,
        skipped: files.len() - loaded,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn write(dir: &Path, rel: &str, body: &str) {
        let path = dir.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, body).unwrap();
    }

    fn files(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_joins_in_list_order_and_skips_missing() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "partials/b.html", "<section id=\"b\"></section>");
        write(dir.path(), "partials/a.html", "<section id=\"a\"></section>");
        write(dir.path(), "partials/empty.html", "");

        let page = SiteSource::Path(dir.path().join("media.html"));
        let client = reqwest::Client::new();
        let loaded = load_partials(
            &client,
            &page,
            &files(&[
                "partials/a.html",
                "partials/missing.html",
                "partials/empty.html",
                "partials/b.html",
            ]),
        )
        .await
        .unwrap();

        assert_eq!(
            loaded.html,
            "<section id=\"a\"></section>\n<section id=\"b\"></section>"
        );
        assert_eq!(loaded.loaded, 2);
        assert_eq!(loaded.skipped, 2);
    }

    #[tokio::test]
    async fn test_nothing_found_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let page = SiteSource::Path(dir.path().join("media.html"));
        let client = reqwest::Client::new();
        assert!(load_partials(&client, &page, &files(&["partials/x.html"]))
            .await
            .is_none());
        assert!(load_partials(&client, &page, &[]).await.is_none());
    }

    #[tokio::test]
    async fn test_unreadable_fragment_abandons_batch() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "partials/a.html", "<p>a</p>");
        // A directory where a file is expected is a read error, not "missing".
        std::fs::create_dir_all(dir.path().join("partials/dir.html")).unwrap();

        let page = SiteSource::Path(dir.path().join("media.html"));
        let client = reqwest::Client::new();
        let loaded = load_partials(
            &client,
            &page,
            &files(&["partials/a.html", "partials/dir.html"]),
        )
        .await;
        assert!(loaded.is_none());
    }
}
