//! MediaList component: the visible entries of the current page, with the
//! search bar at the bottom.

use std::time::Instant;

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

use labsite_core::MediaEntry;

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    theme::{
        style_default, style_muted, style_selected, style_selected_focused,
        C_DATE, C_EMBED, C_KIND, C_MUTED, C_OUTLET, C_SECONDARY,
    },
    widgets::{
        filter_input::{FilterAction, FilterInput},
        pane_chrome::{pane_chrome, Badge},
    },
};

const DOUBLE_CLICK_MS: u128 = 400;

pub struct MediaList {
    /// Row in the visible entries.
    selected: usize,
    search_input: FilterInput,
    list_state: ListState,
    /// Heights of the rendered rows, for mouse hit-testing.
    row_heights: Vec<u16>,
    last_click: Option<(usize, Instant)>,
}

impl MediaList {
    pub fn new() -> Self {
        Self {
            selected: 0,
            search_input: FilterInput::new("title, outlet, keywords…"),
            list_state: ListState::default(),
            row_heights: Vec::new(),
            last_click: None,
        }
    }

    pub fn is_searching(&self) -> bool {
        self.search_input.is_active()
    }

    /// Store index of the entry under the cursor.
    pub fn selected_entry(&self, state: &AppState) -> Option<usize> {
        state
            .media
            .visible_entries()
            .get(self.selected)
            .map(|&(idx, _)| idx)
    }

    fn hover(&self, state: &AppState) -> Vec<Action> {
        vec![Action::HoverEntry(self.selected_entry(state))]
    }

    fn select_up(&mut self, n: usize) {
        self.selected = self.selected.saturating_sub(n);
    }

    fn select_down(&mut self, n: usize, len: usize) {
        self.selected = (self.selected + n).min(len.saturating_sub(1));
    }

    /// Map a row inside the list area to an entry row, honoring the scroll offset.
    fn row_at(&self, rel_row: u16) -> Option<usize> {
        let mut y = 0u16;
        for (row, height) in self.row_heights.iter().enumerate().skip(self.list_state.offset()) {
            if rel_row < y + height {
                return Some(row);
            }
            y += height;
        }
        None
    }

    fn render_row<'a>(
        entry: &'a MediaEntry,
        expanded: bool,
        is_selected: bool,
        focused: bool,
    ) -> ListItem<'a> {
        let marker = if expanded {
            "▾ "
        } else if entry.is_expandable() {
            "▸ "
        } else {
            "  "
        };
        let title_style = if is_selected && focused {
            style_selected_focused()
        } else if is_selected {
            style_selected()
        } else {
            style_default()
        };

        let title = if entry.title.is_empty() {
            Span::styled("(untitled)", style_muted())
        } else {
            Span::styled(entry.title.as_str(), title_style)
        };
        let mut lines = vec![Line::from(vec![
            Span::styled(marker, Style::default().fg(C_EMBED)),
            title,
        ])];

        let mut meta = vec![
            Span::raw("  "),
            Span::styled(entry.date_label(), Style::default().fg(C_DATE)),
        ];
        if !entry.outlet.is_empty() {
            meta.push(Span::styled(" · ", style_muted()));
            meta.push(Span::styled(entry.outlet.as_str(), Style::default().fg(C_OUTLET)));
        }
        if !entry.kind.is_empty() {
            meta.push(Span::styled(" · ", style_muted()));
            meta.push(Span::styled(entry.kind.as_str(), Style::default().fg(C_KIND)));
        }
        lines.push(Line::from(meta));

        if expanded {
            if let Some(embed) = &entry.embed_url {
                lines.push(Line::from(vec![
                    Span::styled("  embed ", style_muted()),
                    Span::styled(embed.as_str(), Style::default().fg(C_EMBED)),
                ]));
            }
        }

        let item = ListItem::new(lines);
        if is_selected {
            item.style(style_selected())
        } else {
            item
        }
    }
}

impl Component for MediaList {
    fn id(&self) -> ComponentId {
        ComponentId::MediaList
    }

    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        let len = state.media.visible_count();

        if self.search_input.is_active() {
            match key.code {
                KeyCode::Up => {
                    self.select_up(1);
                    return self.hover(state);
                }
                KeyCode::Down => {
                    self.select_down(1, len);
                    return self.hover(state);
                }
                _ => {}
            }
            return match self.search_input.handle_key(key) {
                FilterAction::Changed(q) => vec![Action::Search(q)],
                FilterAction::Confirmed => vec![Action::CloseFilter],
                FilterAction::Cancelled => vec![Action::CloseFilter],
            };
        }

        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.select_up(1);
                return self.hover(state);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.select_down(1, len);
                return self.hover(state);
            }
            KeyCode::PageUp => {
                self.select_up(5);
                return self.hover(state);
            }
            KeyCode::PageDown => {
                self.select_down(5, len);
                return self.hover(state);
            }
            KeyCode::Home | KeyCode::Char('g') => {
                self.selected = 0;
                return self.hover(state);
            }
            KeyCode::End | KeyCode::Char('G') => {
                self.selected = len.saturating_sub(1);
                return self.hover(state);
            }
            KeyCode::Enter => {
                if let Some(idx) = self.selected_entry(state) {
                    return vec![Action::Activate(idx)];
                }
            }
            KeyCode::Char('e') => {
                if let Some(idx) = self.selected_entry(state) {
                    return vec![Action::ToggleEmbed(idx)];
                }
            }
            KeyCode::Char('/') => return vec![Action::OpenFilter],
            KeyCode::Char('y') => {
                let url = self
                    .selected_entry(state)
                    .and_then(|idx| state.media.entry(idx))
                    .and_then(|e| e.detail_url.as_ref().or(e.embed_url.as_ref()));
                if let Some(url) = url {
                    return vec![Action::CopyToClipboard(url.clone())];
                }
            }
            _ => {}
        }
        vec![]
    }

    fn handle_mouse(&mut self, event: MouseEvent, area: Rect, state: &AppState) -> Vec<Action> {
        let len = state.media.visible_count();
        match event.kind {
            MouseEventKind::ScrollUp => {
                self.select_up(1);
                self.hover(state)
            }
            MouseEventKind::ScrollDown => {
                self.select_down(1, len);
                self.hover(state)
            }
            MouseEventKind::Down(MouseButton::Left) => {
                // +1 for the top border
                let Some(row) = self.row_at(event.row.saturating_sub(area.y + 1)) else {
                    return vec![];
                };
                let is_double = self
                    .last_click
                    .is_some_and(|(r, t)| r == row && t.elapsed().as_millis() < DOUBLE_CLICK_MS);
                self.selected = row;
                if is_double {
                    self.last_click = None;
                    if let Some(idx) = self.selected_entry(state) {
                        return vec![Action::Activate(idx)];
                    }
                }
                self.last_click = Some((row, Instant::now()));
                self.hover(state)
            }
            _ => vec![],
        }
    }

    fn on_action(&mut self, action: &Action, state: &AppState) -> Vec<Action> {
        match action {
            Action::ViewChanged => {
                // Keep the cursor on the same entry when it survived the re-render.
                let keep = state
                    .hovered
                    .and_then(|h| state.media.visible_entries().iter().position(|&(i, _)| i == h));
                self.selected = keep.unwrap_or(0);
                self.hover(state)
            }
            Action::OpenFilter => {
                if state.media.controls().search {
                    self.search_input.set_value(state.media.selection().search_query());
                    self.search_input.activate();
                }
                vec![]
            }
            Action::CloseFilter => {
                self.search_input.deactivate();
                vec![]
            }
            _ => vec![],
        }
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        let media = &state.media;
        let badge_text = format!("{} / {}", media.view().match_count(), media.entries().len());
        let block = pane_chrome(
            "media",
            Some('2'),
            focused,
            Some(Badge {
                text: &badge_text,
                color: C_SECONDARY,
            }),
        );
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let search_h = u16::from(self.search_input.is_active());
        let list_area = Rect {
            height: inner.height.saturating_sub(search_h),
            ..inner
        };

        let visible = media.visible_entries();
        if visible.is_empty() {
            let msg = if media.entries().is_empty() {
                "  this page has no media entries".to_string()
            } else if media.selection().search_query().is_empty() {
                format!("  no \"{}\" entries", media.selection().active_filter())
            } else {
                format!("  nothing matches \"{}\"", media.selection().search_query())
            };
            frame.render_widget(
                Paragraph::new(Span::styled(msg, Style::default().fg(C_MUTED))),
                list_area,
            );
            self.row_heights.clear();
        } else {
            self.selected = self.selected.min(visible.len() - 1);
            let expanded = media.expanded();
            let items: Vec<ListItem> = visible
                .iter()
                .enumerate()
                .map(|(row, &(idx, entry))| {
                    Self::render_row(entry, expanded == Some(idx), row == self.selected, focused)
                })
                .collect();
            self.row_heights = items.iter().map(|i| i.height() as u16).collect();

            let list = List::new(items).highlight_style(Style::default());
            self.list_state.select(Some(self.selected));
            frame.render_stateful_widget(list, list_area, &mut self.list_state);
        }

        if self.search_input.is_active() {
            let search_area = Rect {
                y: inner.y + inner.height.saturating_sub(1),
                height: 1,
                ..inner
            };
            self.search_input.draw(frame, search_area);
        }
    }
}
