//! AppState: shared read-only data passed to all components during render/event.
//!
//! Only the App event loop writes to it.

use labsite_core::news::NewsLink;
use labsite_core::MediaController;

use crate::widgets::status_bar::InputMode;

pub struct AppState {
    pub media: MediaController,
    /// `<title>` of the loaded page.
    pub page_title: Option<String>,
    /// Where the page was loaded from, for the header.
    pub source: String,
    /// Entry under the media-list cursor (store index).
    pub hovered: Option<usize>,
    /// Links from the overlay partials, empty until they load.
    pub news: Vec<NewsLink>,
    pub input_mode: InputMode,
    /// Tail of the log file, refreshed periodically by App.
    pub log_lines: Vec<String>,
}

impl AppState {
    pub fn new(media: MediaController, page_title: Option<String>, source: String) -> Self {
        Self {
            media,
            page_title,
            source,
            hovered: None,
            news: Vec::new(),
            input_mode: InputMode::Normal,
            log_lines: Vec::new(),
        }
    }
}
