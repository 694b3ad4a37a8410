//! SelectionState: the user's current chip, search text, sort mode and page.
//!
//! Fields are private: every change goes through a transition method so the
//! page always resets to 1 when the result set changes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Chip value that disables type filtering.
pub const ALL_FILTER: &str = "all";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortMode {
    #[default]
    DateDesc,
    DateAsc,
    TitleAsc,
}

impl SortMode {
    pub const ALL: [SortMode; 3] = [SortMode::DateDesc, SortMode::DateAsc, SortMode::TitleAsc];

    /// Value used by the `#mediaSort` options and the config file.
    pub fn value(self) -> &'static str {
        match self {
            Self::DateDesc => "date_desc",
            Self::DateAsc => "date_asc",
            Self::TitleAsc => "title_asc",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::DateDesc => "newest first",
            Self::DateAsc => "oldest first",
            Self::TitleAsc => "title a→z",
        }
    }

    pub fn from_value(value: &str) -> Option<Self> {
        match value.trim() {
            "date_desc" => Some(Self::DateDesc),
            "date_asc" => Some(Self::DateAsc),
            "title_asc" => Some(Self::TitleAsc),
            _ => None,
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

impl FromStr for SortMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_value(s).ok_or_else(|| {
            format!(
                "unknown sort mode `{}` (expected date_desc, date_asc or title_asc)",
                s
            )
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionState {
    active_filter: String,
    search_query: String,
    sort_mode: SortMode,
    current_page: usize,
}

impl SelectionState {
    pub fn new(sort_mode: SortMode) -> Self {
        Self {
            active_filter: ALL_FILTER.to_string(),
            search_query: String::new(),
            sort_mode,
            current_page: 1,
        }
    }

    pub fn active_filter(&self) -> &str {
        &self.active_filter
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn sort_mode(&self) -> SortMode {
        self.sort_mode
    }

    /// Raw requested page. May be out of range until the next pipeline run clamps it.
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// An empty chip value means "all".
    pub fn set_filter(&mut self, filter: &str) {
        self.active_filter = if filter.is_empty() {
            ALL_FILTER.to_string()
        } else {
            filter.to_string()
        };
        self.current_page = 1;
    }

    /// Stores the query trimmed and lowercased.
    pub fn set_query(&mut self, raw: &str) {
        self.search_query = raw.trim().to_lowercase();
        self.current_page = 1;
    }

    pub fn set_sort(&mut self, mode: SortMode) {
        self.sort_mode = mode;
        self.current_page = 1;
    }

    /// Page clicks keep the other selections.
    pub fn set_page(&mut self, page: usize) {
        self.current_page = page;
    }

    pub fn step_page(&mut self, forward: bool) {
        self.current_page = if forward {
            self.current_page.saturating_add(1)
        } else {
            self.current_page.saturating_sub(1)
        };
    }

    /// Write back the page the pipeline actually rendered.
    pub(crate) fn store_clamped_page(&mut self, page: usize) {
        self.current_page = page;
    }
}

impl Default for SelectionState {
    fn default() -> Self {
        Self::new(SortMode::default())
    }
}
