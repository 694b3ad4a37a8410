//! MediaEntry: one card of the media list, as read from its `data-*` attributes.

use chrono::NaiveDate;
use regex::Regex;
use serde::Serialize;

/// Format of the `data-date` attribute.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A single media item (article, video, interview, …).
///
/// Entries are built once per loaded page and never change afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MediaEntry {
    pub title: String,
    pub outlet: String,
    pub keywords: String,
    pub date: NaiveDate,
    /// Category from `data-type`. Open-ended; compared by exact equality.
    #[serde(rename = "type")]
    pub kind: String,
    pub embed_url: Option<String>,
    pub detail_url: Option<String>,
    pub thumbnail_url: Option<String>,
}

impl MediaEntry {
    /// Lowercased `title outlet keywords`, the haystack for search queries.
    pub fn search_text(&self) -> String {
        format!("{} {} {}", self.title, self.outlet, self.keywords).to_lowercase()
    }

    /// `query` must already be trimmed and lowercased. Empty matches everything.
    pub fn matches_query(&self, query: &str) -> bool {
        query.is_empty() || self.search_text().contains(query)
    }

    pub fn matches_filter(&self, filter: &str) -> bool {
        filter == crate::selection::ALL_FILTER || self.kind == filter
    }

    /// Only entries with an embed can be expanded in place.
    pub fn is_expandable(&self) -> bool {
        self.embed_url.is_some()
    }

    pub fn date_label(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }
}

/// Epoch date used for missing or malformed `data-date` values.
pub fn epoch_date() -> NaiveDate {
    // chrono's default NaiveDate is 1970-01-01
    NaiveDate::default()
}

/// Parse a `YYYY-MM-DD` attribute, falling back to the epoch.
pub fn parse_date(raw: &str) -> NaiveDate {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).unwrap_or_else(|_| epoch_date())
}

/// Empty or whitespace-only attribute values count as absent.
pub fn non_empty(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Derive a YouTube thumbnail for video cards that ship without one.
///
/// Only `youtube` / `video` entries qualify, and only when the embed URL has
/// the `youtube.com/embed/<id>` shape.
pub fn youtube_thumbnail(kind: &str, embed_url: &str) -> Option<String> {
    if kind != "youtube" && kind != "video" {
        return None;
    }
    let re = Regex::new(r"youtube\.com/embed/([a-zA-Z0-9_-]+)").ok()?;
    let id = re.captures(embed_url)?.get(1)?.as_str();
    Some(format!("https://img.youtube.com/vi/{}/hqdefault.jpg", id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(title: &str, outlet: &str, keywords: &str) -> MediaEntry {
        MediaEntry {
            title: title.to_string(),
            outlet: outlet.to_string(),
            keywords: keywords.to_string(),
            date: epoch_date(),
            kind: "article".to_string(),
            embed_url: None,
            detail_url: None,
            thumbnail_url: None,
        }
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2024-03-09"),
            NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
        );
        assert_eq!(parse_date(""), NaiveDate::from_ymd_opt(1970, 1, 1).unwrap());
        assert_eq!(parse_date("March 2024"), epoch_date());
        assert_eq!(parse_date("2024-13-40"), epoch_date());
    }

    #[test]
    fn test_search_spans_title_outlet_keywords() {
        let e = entry("Quantum Dots", "Science Daily", "nanomaterials, Photonics");
        assert!(e.matches_query("quantum"));
        assert!(e.matches_query("daily"));
        assert!(e.matches_query("photonics"));
        assert!(e.matches_query(""));
        assert!(!e.matches_query("workshop"));
    }

    #[test]
    fn test_filter_all_passes_everything() {
        let e = entry("a", "b", "c");
        assert!(e.matches_filter("all"));
        assert!(e.matches_filter("article"));
        assert!(!e.matches_filter("video"));
        assert!(!e.matches_filter("Article"));
    }

    #[test]
    fn test_youtube_thumbnail() {
        assert_eq!(
            youtube_thumbnail("youtube", "https://www.youtube.com/embed/dQw4w9WgXcQ?rel=0"),
            Some("https://img.youtube.com/vi/dQw4w9WgXcQ/hqdefault.jpg".to_string())
        );
        assert_eq!(
            youtube_thumbnail("article", "https://www.youtube.com/embed/dQw4w9WgXcQ"),
            None
        );
        assert_eq!(youtube_thumbnail("video", "https://vimeo.com/1234"), None);
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty("  "), None);
        assert_eq!(non_empty(" x "), Some("x".to_string()));
    }
}
