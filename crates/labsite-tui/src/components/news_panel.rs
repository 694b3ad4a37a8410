//! NewsPanel component: external news links found in the overlay partials.

use ratatui::crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    theme::{style_default, style_selected, style_selected_focused, C_LINK, C_MUTED},
    widgets::pane_chrome::pane_chrome,
};

pub struct NewsPanel {
    selected: usize,
    list_state: ListState,
}

impl NewsPanel {
    pub fn new() -> Self {
        Self {
            selected: 0,
            list_state: ListState::default(),
        }
    }

    fn selected_url<'a>(&self, state: &'a AppState) -> Option<&'a str> {
        state.news.get(self.selected).map(|n| n.url.as_str())
    }
}

impl Component for NewsPanel {
    fn id(&self) -> ComponentId {
        ComponentId::NewsPanel
    }

    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        let last = state.news.len().saturating_sub(1);
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.selected = self.selected.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => self.selected = (self.selected + 1).min(last),
            KeyCode::Home | KeyCode::Char('g') => self.selected = 0,
            KeyCode::End | KeyCode::Char('G') => self.selected = last,
            KeyCode::Enter => {
                if let Some(url) = self.selected_url(state) {
                    return vec![Action::OpenUrl(url.to_string())];
                }
            }
            KeyCode::Char('y') => {
                if let Some(url) = self.selected_url(state) {
                    return vec![Action::CopyToClipboard(url.to_string())];
                }
            }
            _ => {}
        }
        vec![]
    }

    fn handle_mouse(&mut self, event: MouseEvent, area: Rect, state: &AppState) -> Vec<Action> {
        let last = state.news.len().saturating_sub(1);
        match event.kind {
            MouseEventKind::ScrollUp => self.selected = self.selected.saturating_sub(1),
            MouseEventKind::ScrollDown => self.selected = (self.selected + 1).min(last),
            MouseEventKind::Down(MouseButton::Left) => {
                let row = event.row.saturating_sub(area.y + 1) as usize + self.list_state.offset();
                if row < state.news.len() {
                    self.selected = row;
                    if let Some(url) = self.selected_url(state) {
                        return vec![Action::OpenUrl(url.to_string())];
                    }
                }
            }
            _ => {}
        }
        vec![]
    }

    fn on_action(&mut self, _action: &Action, state: &AppState) -> Vec<Action> {
        self.selected = self.selected.min(state.news.len().saturating_sub(1));
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        let block = pane_chrome("news", Some('4'), focused, None);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if state.news.is_empty() {
            frame.render_widget(
                Paragraph::new(Span::styled(" no news links", Style::default().fg(C_MUTED))),
                inner,
            );
            return;
        }

        let items: Vec<ListItem> = state
            .news
            .iter()
            .enumerate()
            .map(|(i, link)| {
                let title_style = match (i == self.selected, focused) {
                    (true, true) => style_selected_focused(),
                    (true, false) => style_selected(),
                    _ => style_default(),
                };
                ListItem::new(vec![
                    Line::from(Span::styled(format!(" {}", link.title), title_style)),
                    Line::from(Span::styled(
                        format!("   {}", link.url),
                        Style::default().fg(C_LINK),
                    )),
                ])
            })
            .collect();
        self.list_state.select(Some(self.selected));
        frame.render_stateful_widget(List::new(items), inner, &mut self.list_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::test_support::state_with_page;
    use labsite_core::news::NewsLink;
    use ratatui::crossterm::event::KeyModifiers;

    #[test]
    fn test_enter_opens_selected_link() {
        let mut state = state_with_page(true);
        state.news = vec![
            NewsLink {
                title: "A".into(),
                url: "https://news.example.org/a".into(),
            },
            NewsLink {
                title: "B".into(),
                url: "https://news.example.org/b".into(),
            },
        ];
        let mut panel = NewsPanel::new();
        let key = |c| KeyEvent::new(c, KeyModifiers::NONE);
        panel.handle_key(key(KeyCode::Down), &state);
        panel.handle_key(key(KeyCode::Down), &state);
        assert_eq!(
            panel.handle_key(key(KeyCode::Enter), &state),
            vec![Action::OpenUrl("https://news.example.org/b".into())]
        );

        state.news.truncate(1);
        panel.on_action(&Action::Noop, &state);
        assert_eq!(
            panel.handle_key(key(KeyCode::Char('y')), &state),
            vec![Action::CopyToClipboard("https://news.example.org/a".into())]
        );
    }
}
