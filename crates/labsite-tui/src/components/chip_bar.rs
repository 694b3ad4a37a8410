//! ChipBar component: the type filter chips above the media list.

use ratatui::crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    theme::{C_CHIP_ACTIVE, C_FILTER_FG, C_MUTED, C_SECONDARY},
    widgets::pane_chrome::pane_chrome,
};

pub struct ChipBar {
    cursor: usize,
    /// Column ranges of the drawn chips, for mouse hit-testing.
    hits: Vec<(u16, u16, usize)>,
}

impl ChipBar {
    pub fn new() -> Self {
        Self {
            cursor: 0,
            hits: Vec::new(),
        }
    }

    fn chips<'a>(&self, state: &'a AppState) -> &'a [String] {
        &state.media.controls().filters
    }

    fn sync_cursor(&mut self, state: &AppState) {
        let active = state.media.selection().active_filter();
        if let Some(pos) = self.chips(state).iter().position(|c| c == active) {
            self.cursor = pos;
        }
    }

    fn select_at_cursor(&self, state: &AppState) -> Vec<Action> {
        match self.chips(state).get(self.cursor) {
            Some(chip) => vec![Action::SelectFilter(chip.clone())],
            None => vec![],
        }
    }
}

impl Component for ChipBar {
    fn id(&self) -> ComponentId {
        ComponentId::ChipBar
    }

    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        let count = self.chips(state).len();
        if count == 0 {
            return vec![];
        }
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.cursor = (self.cursor + 1).min(count - 1);
            }
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = count - 1,
            KeyCode::Enter | KeyCode::Char(' ') => return self.select_at_cursor(state),
            _ => {}
        }
        vec![]
    }

    fn handle_mouse(&mut self, event: MouseEvent, _area: Rect, state: &AppState) -> Vec<Action> {
        if event.kind != MouseEventKind::Down(MouseButton::Left) {
            return vec![];
        }
        let hit = self
            .hits
            .iter()
            .find(|(start, end, _)| event.column >= *start && event.column < *end)
            .map(|&(_, _, idx)| idx);
        match hit {
            Some(idx) => {
                self.cursor = idx;
                self.select_at_cursor(state)
            }
            None => vec![],
        }
    }

    fn on_action(&mut self, action: &Action, state: &AppState) -> Vec<Action> {
        if matches!(action, Action::ViewChanged) {
            self.sync_cursor(state);
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        let block = pane_chrome("filter", Some('1'), focused, None);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        self.hits.clear();

        let chips = self.chips(state);
        if chips.is_empty() {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    " this page has no filter chips",
                    Style::default().fg(C_MUTED),
                )),
                inner,
            );
            return;
        }

        let active = state.media.selection().active_filter();
        let mut x = inner.x + 1;
        let mut spans = vec![Span::raw(" ")];
        for (i, chip) in chips.iter().enumerate() {
            let is_active = chip == active;
            let label = if is_active {
                format!("[{}]", chip)
            } else {
                format!(" {} ", chip)
            };
            let mut style = if is_active {
                Style::default()
                    .fg(C_CHIP_ACTIVE)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(C_SECONDARY)
            };
            if focused && i == self.cursor {
                style = style.add_modifier(Modifier::UNDERLINED);
            }
            let width = label.width() as u16;
            self.hits.push((x, x + width, i));
            x += width + 1;
            spans.push(Span::styled(label, style));
            spans.push(Span::raw(" "));
        }

        let query = state.media.selection().search_query();
        if !query.is_empty() {
            spans.push(Span::styled("  search: ", Style::default().fg(C_MUTED)));
            spans.push(Span::styled(
                format!("\"{}\"", query),
                Style::default().fg(C_FILTER_FG),
            ));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), inner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::test_support::state_with_page;
    use ratatui::crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_cursor_moves_and_selects() {
        let state = state_with_page(true);
        let mut bar = ChipBar::new();
        assert!(bar.handle_key(key(KeyCode::Left), &state).is_empty());
        bar.handle_key(key(KeyCode::Right), &state);
        assert_eq!(
            bar.handle_key(key(KeyCode::Enter), &state),
            vec![Action::SelectFilter("news".to_string())]
        );
        bar.handle_key(key(KeyCode::End), &state);
        bar.handle_key(key(KeyCode::Right), &state);
        assert_eq!(
            bar.handle_key(key(KeyCode::Char(' ')), &state),
            vec![Action::SelectFilter("youtube".to_string())]
        );
    }

    #[test]
    fn test_cursor_follows_active_chip() {
        let mut state = state_with_page(true);
        let mut bar = ChipBar::new();
        assert!(state.media.select_filter("youtube"));
        bar.on_action(&Action::ViewChanged, &state);
        assert_eq!(bar.cursor, 2);
    }
}
