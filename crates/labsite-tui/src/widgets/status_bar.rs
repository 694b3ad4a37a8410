//! Title line at the top and keybinding footer at the bottom.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app_state::AppState;
use crate::theme::{
    C_ACCENT, C_MODE_FILTER, C_MODE_NORMAL, C_MUTED, C_PRIMARY, C_SECONDARY, C_SEPARATOR,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputMode {
    Normal,
    Search,
}

impl InputMode {
    pub fn label(self) -> &'static str {
        match self {
            Self::Normal => "MEDIA",
            Self::Search => "SEARCH",
        }
    }

    pub fn color(self) -> ratatui::style::Color {
        match self {
            Self::Normal => C_MODE_NORMAL,
            Self::Search => C_MODE_FILTER,
        }
    }
}

/// `● page title  · source · 12 entries · sort: newest first`
pub fn draw_title_bar(frame: &mut Frame, area: Rect, state: &AppState) {
    let title = state.page_title.as_deref().unwrap_or("media");
    let media = &state.media;
    let sort = if media.controls().has_sort() {
        media.selection().sort_mode().label()
    } else {
        "document order"
    };

    let line = Line::from(vec![
        Span::styled("● ", Style::default().fg(C_ACCENT)),
        Span::styled(
            title.to_string(),
            Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
        ),
        Span::styled("  · ", Style::default().fg(C_MUTED)),
        Span::styled(state.source.clone(), Style::default().fg(C_SECONDARY)),
        Span::styled(" · ", Style::default().fg(C_MUTED)),
        Span::styled(
            format!("{} entries", media.entries().len()),
            Style::default().fg(C_SECONDARY),
        ),
        Span::styled(" · ", Style::default().fg(C_MUTED)),
        Span::styled(format!("sort: {}", sort), Style::default().fg(C_SECONDARY)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

pub fn draw_separator(frame: &mut Frame, area: Rect) {
    let line = Line::from(Span::styled(
        "─".repeat(area.width as usize),
        Style::default().fg(C_SEPARATOR),
    ));
    frame.render_widget(Paragraph::new(line), area);
}

pub fn draw_keys_bar(frame: &mut Frame, area: Rect, mode: InputMode) {
    let keys = match mode {
        InputMode::Normal => {
            " ↑↓/jk select  Enter open  e embed  / search  s/S sort  [ ] page  ←→ chips/pages  y copy  Tab/1-4 panes  L log  ? help  q quit"
        }
        InputMode::Search => " type to search  Up/Down move  Enter keep  Esc clear+close  Tab next pane",
    };

    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", mode.label()),
            Style::default().fg(mode.color()).add_modifier(Modifier::BOLD),
        ),
        Span::styled(keys, Style::default().fg(C_MUTED)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
