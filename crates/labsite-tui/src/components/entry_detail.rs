//! EntryDetail panel: every field of the entry under the media-list cursor.
//! Display only, never focused.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use labsite_core::MediaEntry;

use crate::{
    app_state::AppState,
    theme::{C_DATE, C_EMBED, C_KIND, C_LINK, C_MUTED, C_OUTLET, C_PRIMARY, C_SECONDARY},
    widgets::pane_chrome::{pane_chrome, Badge},
};

pub struct EntryDetail;

impl EntryDetail {
    pub fn new() -> Self {
        Self
    }

    pub fn draw(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let entry = state
            .hovered
            .and_then(|idx| state.media.entry(idx).map(|e| (idx, e)));
        let expanded = entry.is_some_and(|(idx, _)| state.media.expanded() == Some(idx));

        let badge = expanded.then_some(Badge {
            text: "EMBED",
            color: C_EMBED,
        });
        let block = pane_chrome("details", None, false, badge);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let lines = match entry {
            Some((_, entry)) => detail_lines(entry, expanded),
            None => vec![Line::from(Span::styled(
                " nothing selected",
                Style::default().fg(C_MUTED),
            ))],
        };
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
    }
}

fn field<'a>(label: &'a str, value: Span<'a>) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!(" {:<9}", label), Style::default().fg(C_MUTED)),
        value,
    ])
}

fn detail_lines(entry: &MediaEntry, expanded: bool) -> Vec<Line<'_>> {
    let mut lines = vec![
        Line::from(Span::styled(
            format!(" {}", entry.title),
            Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        field("date", Span::styled(entry.date_label(), Style::default().fg(C_DATE))),
        field("outlet", Span::styled(entry.outlet.as_str(), Style::default().fg(C_OUTLET))),
        field("type", Span::styled(entry.kind.as_str(), Style::default().fg(C_KIND))),
    ];
    if !entry.keywords.is_empty() {
        lines.push(field(
            "keywords",
            Span::styled(entry.keywords.as_str(), Style::default().fg(C_SECONDARY)),
        ));
    }
    if let Some(url) = &entry.detail_url {
        lines.push(field("link", Span::styled(url.as_str(), Style::default().fg(C_LINK))));
    }
    if let Some(url) = &entry.thumbnail_url {
        lines.push(field("thumb", Span::styled(url.as_str(), Style::default().fg(C_SECONDARY))));
    }
    if let Some(url) = &entry.embed_url {
        let style = if expanded {
            Style::default().fg(C_EMBED).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(C_SECONDARY)
        };
        lines.push(field("embed", Span::styled(url.as_str(), style)));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            if expanded {
                " e: close embed"
            } else {
                " e: open embed"
            },
            Style::default().fg(C_MUTED),
        )));
    }
    lines
}
