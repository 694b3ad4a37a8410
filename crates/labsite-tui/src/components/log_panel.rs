//! LogPanel: tail of the log file.
//!
//! One summary line when collapsed; a scrollable pane when expanded.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    theme::{C_MUTED, C_SECONDARY, C_TOAST_ERROR, C_TOAST_WARNING},
    widgets::pane_chrome::pane_chrome,
};

/// Rows of the expanded panel, borders included.
pub const EXPANDED_HEIGHT: u16 = 10;

pub struct LogPanel {
    pub expanded: bool,
    scroll: usize,
    /// Stick to the newest line until the user scrolls up.
    follow: bool,
}

impl LogPanel {
    pub fn new() -> Self {
        Self {
            expanded: false,
            scroll: 0,
            follow: true,
        }
    }

    pub fn height(&self) -> u16 {
        if self.expanded {
            EXPANDED_HEIGHT
        } else {
            1
        }
    }

    fn scroll_up(&mut self, n: usize) {
        self.scroll = self.scroll.saturating_sub(n);
        self.follow = false;
    }

    fn scroll_down(&mut self, n: usize, state: &AppState) {
        let max = state.log_lines.len().saturating_sub(1);
        self.scroll = (self.scroll + n).min(max);
    }
}

impl Component for LogPanel {
    fn id(&self) -> ComponentId {
        ComponentId::LogPanel
    }

    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release || !self.expanded {
            return vec![];
        }
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.scroll_up(1),
            KeyCode::Down | KeyCode::Char('j') => self.scroll_down(1, state),
            KeyCode::PageUp => self.scroll_up(8),
            KeyCode::PageDown => self.scroll_down(8, state),
            KeyCode::Home | KeyCode::Char('g') => self.scroll_up(usize::MAX),
            KeyCode::End | KeyCode::Char('G') => self.follow = true,
            _ => {}
        }
        vec![]
    }

    fn handle_mouse(&mut self, event: MouseEvent, _area: Rect, state: &AppState) -> Vec<Action> {
        if !self.expanded {
            return vec![];
        }
        match event.kind {
            MouseEventKind::ScrollUp => self.scroll_up(1),
            MouseEventKind::ScrollDown => self.scroll_down(1, state),
            _ => {}
        }
        vec![]
    }

    fn on_action(&mut self, action: &Action, _state: &AppState) -> Vec<Action> {
        if matches!(action, Action::ToggleLogs) {
            self.expanded = !self.expanded;
            if self.expanded {
                self.follow = true;
            }
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        if area.height == 0 {
            return;
        }

        if !self.expanded || area.height <= 2 {
            let last = state
                .log_lines
                .last()
                .map(|l| compact_log_line(l))
                .unwrap_or_else(|| "(no log)".to_string());
            frame.render_widget(
                Paragraph::new(Line::from(vec![
                    Span::styled(" log ", Style::default().fg(C_MUTED)),
                    Span::styled(last.clone(), level_style(&last)),
                ])),
                area,
            );
            return;
        }

        let block = pane_chrome("log", None, focused, None);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let height = inner.height as usize;
        let max_scroll = state.log_lines.len().saturating_sub(height);
        if self.follow || self.scroll > max_scroll {
            self.scroll = max_scroll;
        }
        if self.scroll == max_scroll {
            self.follow = true;
        }

        if state.log_lines.is_empty() {
            frame.render_widget(
                Paragraph::new(Span::styled("  no log entries yet", Style::default().fg(C_MUTED))),
                inner,
            );
            return;
        }

        let lines: Vec<Line> = state
            .log_lines
            .iter()
            .skip(self.scroll)
            .take(height)
            .map(|raw| {
                let line = compact_log_line(raw);
                let style = level_style(&line);
                Line::from(vec![Span::raw(" "), Span::styled(line, style)])
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), inner);
    }
}

/// Colour by level, found among the leading tokens of a compacted line.
fn level_style(line: &str) -> Style {
    let mut level = line.split_whitespace().take(3);
    match level.find(|t| matches!(*t, "ERROR" | "WARN")) {
        Some("ERROR") => Style::default().fg(C_TOAST_ERROR),
        Some(_) => Style::default().fg(C_TOAST_WARNING),
        None => Style::default().fg(C_SECONDARY),
    }
}

// ── Log line formatting ───────────────────────────────────────────────────────

/// `2026-10-19T08:15:02.123Z  INFO labsite::app: msg` → `08:15:02 INFO msg`
/// (local time; date included when it is not today).
pub fn compact_log_line(raw: &str) -> String {
    let mut rest = raw.trim();
    let mut head: Vec<String> = Vec::new();

    if let Some((tok, rem)) = split_first_token(rest) {
        if let Some(ts) = compact_timestamp(tok) {
            head.push(ts);
            rest = rem.trim_start();
        }
    }

    if let Some((tok, rem)) = split_first_token(rest) {
        if matches!(tok, "TRACE" | "DEBUG" | "INFO" | "WARN" | "ERROR") {
            head.push(tok.to_string());
            rest = rem.trim_start();
        }
    }

    // module path, e.g. "labsite_core::partials: "
    if let Some((target, msg)) = rest.split_once(": ") {
        if !target.is_empty()
            && target.len() <= 48
            && target
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | ':'))
        {
            rest = msg.trim_start();
        }
    }

    match (head.is_empty(), rest.is_empty()) {
        (true, _) => rest.to_string(),
        (false, true) => head.join(" "),
        (false, false) => format!("{} {}", head.join(" "), rest),
    }
}

fn compact_timestamp(token: &str) -> Option<String> {
    let dt = chrono::DateTime::parse_from_rfc3339(token).ok()?;
    let local = dt.with_timezone(&chrono::Local);
    let fmt = if local.date_naive() == chrono::Local::now().date_naive() {
        "%H:%M:%S"
    } else {
        "%m-%d %H:%M"
    };
    Some(local.format(fmt).to_string())
}

fn split_first_token(s: &str) -> Option<(&str, &str)> {
    let mut parts = s.splitn(2, char::is_whitespace);
    let first = parts.next()?.trim();
    if first.is_empty() {
        return None;
    }
    Some((first, parts.next().unwrap_or("")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compact_strips_target() {
        let line = compact_log_line("INFO labsite_core::partials: [partials] loaded 2 fragment(s), skipped 6");
        assert_eq!(line, "INFO [partials] loaded 2 fragment(s), skipped 6");
    }

    #[test]
    fn test_compact_keeps_unstructured_text() {
        assert_eq!(compact_log_line("  plain message  "), "plain message");
        // a colon inside the message is not a target
        assert_eq!(
            compact_log_line("WARN failed to open https://x.example: refused"),
            "WARN failed to open https://x.example: refused"
        );
    }

    #[test]
    fn test_compact_timestamp_is_shortened() {
        let line = compact_log_line("2024-01-02T03:04:05.678Z DEBUG labsite::app: apply_action: Quit");
        assert!(line.ends_with("DEBUG apply_action: Quit"), "{}", line);
        assert!(!line.contains("2024-01-02T"));
    }

    #[test]
    fn test_toggle_and_scroll() {
        let mut state = crate::components::test_support::state_with_page(false);
        state.log_lines = (0..20).map(|i| format!("line {}", i)).collect();
        let mut panel = LogPanel::new();
        assert_eq!(panel.height(), 1);
        panel.on_action(&Action::ToggleLogs, &state);
        assert_eq!(panel.height(), EXPANDED_HEIGHT);

        let key = |c| KeyEvent::new(c, ratatui::crossterm::event::KeyModifiers::NONE);
        panel.handle_key(key(KeyCode::Char('g')), &state);
        assert_eq!(panel.scroll, 0);
        assert!(!panel.follow);
        panel.handle_key(key(KeyCode::Char('j')), &state);
        assert_eq!(panel.scroll, 1);
        panel.handle_key(key(KeyCode::Char('G')), &state);
        assert!(panel.follow);
    }
}
