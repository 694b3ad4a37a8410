//! Pager component: prev/next buttons, compact page numbers and the page
//! indicator.

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

use labsite_core::pagination::{PageItem, PageLayout};

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    theme::{style_disabled, style_secondary, C_MUTED, C_PAGE_ACTIVE},
    widgets::pane_chrome::pane_chrome,
};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Target {
    Prev,
    Next,
    Page(usize),
}

pub struct Pager {
    hits: Vec<(u16, u16, Target)>,
}

impl Pager {
    pub fn new() -> Self {
        Self { hits: Vec::new() }
    }

    /// Spans for one layout, with the column span each clickable part covers.
    fn layout_spans(layout: &PageLayout, x0: u16) -> (Vec<Span<'static>>, Vec<(u16, u16, Target)>) {
        let mut spans = Vec::new();
        let mut hits = Vec::new();
        let mut x = x0;
        let mut push = |text: String, style: Style, target: Option<Target>| {
            let w = text.width() as u16;
            if let Some(t) = target {
                hits.push((x, x + w, t));
            }
            x += w;
            spans.push(Span::styled(text, style));
        };

        let button = |disabled: bool| {
            if disabled {
                style_disabled()
            } else {
                style_secondary().add_modifier(Modifier::BOLD)
            }
        };

        push(" ‹ prev ".to_string(), button(layout.prev_disabled), Some(Target::Prev));
        for item in &layout.items {
            match *item {
                PageItem::Page { number, active } => {
                    let (text, style) = if active {
                        (
                            format!("[{}]", number),
                            Style::default()
                                .fg(C_PAGE_ACTIVE)
                                .add_modifier(Modifier::BOLD),
                        )
                    } else {
                        (format!(" {} ", number), style_secondary())
                    };
                    push(text, style, Some(Target::Page(number)));
                }
                PageItem::Ellipsis => push(" … ".to_string(), Style::default().fg(C_MUTED), None),
            }
        }
        push(" next › ".to_string(), button(layout.next_disabled), Some(Target::Next));
        push(
            format!("   page {}", layout.indicator()),
            Style::default().fg(C_MUTED),
            None,
        );
        (spans, hits)
    }

    fn target_action(target: Target) -> Action {
        match target {
            Target::Prev => Action::PrevPage,
            Target::Next => Action::NextPage,
            Target::Page(n) => Action::GotoPage(n),
        }
    }
}

impl Component for Pager {
    fn id(&self) -> ComponentId {
        ComponentId::Pager
    }

    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        let Some(layout) = state.media.layout() else {
            return vec![];
        };
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => vec![Action::PrevPage],
            KeyCode::Right | KeyCode::Char('l') => vec![Action::NextPage],
            KeyCode::Home | KeyCode::Char('g') => vec![Action::GotoPage(1)],
            KeyCode::End | KeyCode::Char('G') => vec![Action::GotoPage(layout.page_count)],
            _ => vec![],
        }
    }

    fn handle_mouse(&mut self, event: MouseEvent, _area: Rect, _state: &AppState) -> Vec<Action> {
        if event.kind != MouseEventKind::Down(MouseButton::Left) {
            return vec![];
        }
        self.hits
            .iter()
            .find(|(start, end, _)| event.column >= *start && event.column < *end)
            .map(|&(_, _, t)| vec![Self::target_action(t)])
            .unwrap_or_default()
    }

    fn on_action(&mut self, _action: &Action, _state: &AppState) -> Vec<Action> {
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        let block = pane_chrome("pages", Some('3'), focused, None);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        match state.media.layout() {
            Some(layout) => {
                let (spans, hits) = Self::layout_spans(layout, inner.x);
                self.hits = hits;
                frame.render_widget(Paragraph::new(Line::from(spans)), inner);
            }
            None => {
                self.hits.clear();
                let msg = format!(
                    " no pager on this page: showing all {} matches",
                    state.media.view().match_count()
                );
                frame.render_widget(
                    Paragraph::new(Span::styled(msg, Style::default().fg(C_MUTED))),
                    inner,
                );
            }
        }
    }
}
