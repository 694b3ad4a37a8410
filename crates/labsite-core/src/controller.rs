//! MediaController: owns the selection and re-runs the pipeline after every
//! interaction.
//!
//! Each handler mirrors one control of the media page. A handler whose
//! control is missing from the page (or disabled, for prev/next) returns
//! `false` and leaves the state untouched.

use serde::Serialize;
use tracing::debug;

use crate::media::MediaEntry;
use crate::pagination::{PageLayout, DEFAULT_NEIGHBOR_RADIUS};
use crate::pipeline::{compute_view, ViewResult, DEFAULT_PAGE_SIZE};
use crate::render::CardVisibility;
use crate::selection::{SelectionState, SortMode};
use crate::store::{CardStore, PageControls};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerOptions {
    pub page_size: usize,
    pub neighbor_radius: usize,
    /// Override of the page's own pager detection.
    pub paginate: Option<bool>,
    pub initial_sort: SortMode,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            neighbor_radius: DEFAULT_NEIGHBOR_RADIUS,
            paginate: None,
            initial_sort: SortMode::default(),
        }
    }
}

pub struct MediaController {
    store: CardStore,
    controls: PageControls,
    selection: SelectionState,
    visibility: CardVisibility,
    view: ViewResult,
    layout: Option<PageLayout>,
    paginated: bool,
    page_size: usize,
    neighbor_radius: usize,
}

impl MediaController {
    /// Build the controller and run the initial pipeline pass.
    pub fn new(store: CardStore, controls: PageControls, options: ControllerOptions) -> Self {
        let paginated = options.paginate.unwrap_or(controls.pagination);
        let mut initial_sort = options.initial_sort;
        if controls.has_sort() && !controls.sort_modes.contains(&initial_sort) {
            initial_sort = controls.sort_modes[0];
        }
        let len = store.len();
        let mut controller = Self {
            store,
            controls,
            selection: SelectionState::new(initial_sort),
            visibility: CardVisibility::new(len),
            view: ViewResult {
                ordered: Vec::new(),
                page_count: 1,
                page: 1,
                visible: Vec::new(),
            },
            layout: None,
            paginated,
            page_size: options.page_size.max(1),
            neighbor_radius: options.neighbor_radius,
        };
        controller.apply();
        controller
    }

    /// Full re-run: pipeline, visibility, pager.
    pub fn apply(&mut self) {
        self.view = compute_view(self.store.entries(), &self.selection, self.page_size);
        self.selection.store_clamped_page(self.view.page);
        self.visibility.apply(&self.view, self.paginated);
        self.layout = self.paginated.then(|| {
            PageLayout::new(self.view.page_count, self.view.page, self.neighbor_radius)
        });
        debug!(
            filter = self.selection.active_filter(),
            query = self.selection.search_query(),
            sort = %self.selection.sort_mode(),
            page = self.view.page,
            pages = self.view.page_count,
            matches = self.view.match_count(),
            "media view recomputed"
        );
    }

    // ── Interaction handlers ─────────────────────────────────────────────────

    /// Chip click. Unknown chips are ignored.
    pub fn select_filter(&mut self, filter: &str) -> bool {
        if !self.controls.has_filter(filter) {
            return false;
        }
        self.selection.set_filter(filter);
        self.apply();
        true
    }

    /// Search input. Every keystroke re-runs the pipeline.
    pub fn search(&mut self, raw: &str) -> bool {
        if !self.controls.search {
            return false;
        }
        self.selection.set_query(raw);
        self.apply();
        true
    }

    pub fn sort(&mut self, mode: SortMode) -> bool {
        if !self.controls.sort_modes.contains(&mode) {
            return false;
        }
        self.selection.set_sort(mode);
        self.apply();
        true
    }

    /// Step through the offered sort modes.
    pub fn cycle_sort(&mut self, forward: bool) -> bool {
        let modes = &self.controls.sort_modes;
        if modes.is_empty() {
            return false;
        }
        let pos = modes
            .iter()
            .position(|&m| m == self.selection.sort_mode())
            .unwrap_or(0);
        let next = if forward {
            (pos + 1) % modes.len()
        } else {
            (pos + modes.len() - 1) % modes.len()
        };
        let mode = modes[next];
        self.sort(mode)
    }

    /// Page-number click.
    pub fn goto_page(&mut self, page: usize) -> bool {
        if !self.paginated {
            return false;
        }
        self.selection.set_page(page);
        self.apply();
        true
    }

    pub fn prev_page(&mut self) -> bool {
        let enabled = self.layout.as_ref().is_some_and(|l| !l.prev_disabled);
        if enabled {
            self.selection.step_page(false);
            self.apply();
        }
        enabled
    }

    pub fn next_page(&mut self) -> bool {
        let enabled = self.layout.as_ref().is_some_and(|l| !l.next_disabled);
        if enabled {
            self.selection.step_page(true);
            self.apply();
        }
        enabled
    }

    /// Toggle an entry's embed. `None` when the entry has no embed or is hidden.
    pub fn toggle_embed(&mut self, idx: usize) -> Option<bool> {
        let entry = self.store.get(idx)?;
        if !entry.is_expandable() || !self.visibility.is_visible(idx) {
            return None;
        }
        Some(self.visibility.toggle_expand(idx))
    }

    /// Activating a visible entry outside its toggle yields its external link.
    pub fn activate(&self, idx: usize) -> Option<&str> {
        if !self.visibility.is_visible(idx) {
            return None;
        }
        self.store.get(idx)?.detail_url.as_deref()
    }

    // ── Read access ──────────────────────────────────────────────────────────

    pub fn entries(&self) -> &[MediaEntry] {
        self.store.entries()
    }

    pub fn entry(&self, idx: usize) -> Option<&MediaEntry> {
        self.store.get(idx)
    }

    pub fn controls(&self) -> &PageControls {
        &self.controls
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn view(&self) -> &ViewResult {
        &self.view
    }

    pub fn layout(&self) -> Option<&PageLayout> {
        self.layout.as_ref()
    }

    pub fn is_paginated(&self) -> bool {
        self.paginated
    }

    pub fn expanded(&self) -> Option<usize> {
        self.visibility.expanded()
    }

    pub fn visible_count(&self) -> usize {
        self.visibility.visible_count()
    }

    /// Visible entries in display order, with their store index.
    pub fn visible_entries(&self) -> Vec<(usize, &MediaEntry)> {
        self.visibility
            .display_order()
            .iter()
            .filter_map(|&i| self.store.get(i).map(|e| (i, e)))
            .collect()
    }

    /// Serializable snapshot of the current view.
    pub fn snapshot(&self) -> ViewSnapshot<'_> {
        ViewSnapshot {
            filter: self.selection.active_filter(),
            query: self.selection.search_query(),
            sort: self.selection.sort_mode(),
            page: self.view.page,
            page_count: self.view.page_count,
            match_count: self.view.match_count(),
            total: self.store.len(),
            pagination: self.layout.as_ref(),
            entries: self
                .visible_entries()
                .into_iter()
                .map(|(_, e)| e)
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ViewSnapshot<'a> {
    pub filter: &'a str,
    pub query: &'a str,
    pub sort: SortMode,
    pub page: usize,
    pub page_count: usize,
    pub match_count: usize,
    pub total: usize,
    pub pagination: Option<&'a PageLayout>,
    pub entries: Vec<&'a MediaEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::parse_date;

    fn entry(i: usize, kind: &str) -> MediaEntry {
        MediaEntry {
            title: format!("Entry {:02}", i),
            outlet: "Outlet".to_string(),
            keywords: if i % 2 == 0 { "even".into() } else { "odd".into() },
            date: parse_date(&format!("2022-01-{:02}", i)),
            kind: kind.to_string(),
            embed_url: (kind == "youtube").then(|| format!("https://www.youtube.com/embed/v{}", i)),
            detail_url: (kind != "youtube").then(|| format!("https://example.org/{}", i)),
            thumbnail_url: None,
        }
    }

    fn controller(controls: PageControls) -> MediaController {
        let entries = (1..=12)
            .map(|i| entry(i, if i <= 4 { "youtube" } else { "news" }))
            .collect();
        MediaController::new(CardStore::new(entries), controls, ControllerOptions::default())
    }

    fn full() -> MediaController {
        controller(PageControls::full(vec![
            "all".into(),
            "news".into(),
            "youtube".into(),
        ]))
    }

    #[test]
    fn test_initial_view() {
        let c = full();
        assert_eq!(c.view().page_count, 3);
        assert_eq!(c.visible_entries().len(), 5);
        assert_eq!(c.visible_entries()[0].1.title, "Entry 12");
        let layout = c.layout().unwrap();
        assert!(layout.prev_disabled);
        assert!(!layout.next_disabled);
    }

    #[test]
    fn test_prev_next_respect_disabled_state() {
        let mut c = full();
        assert!(!c.prev_page());
        assert!(c.next_page());
        assert!(c.next_page());
        assert_eq!(c.view().page, 3);
        assert!(!c.next_page());
        assert_eq!(c.visible_entries().len(), 2);
        assert!(c.prev_page());
        assert_eq!(c.view().page, 2);
    }

    #[test]
    fn test_interactions_reset_page() {
        let mut c = full();
        c.goto_page(3);
        assert!(c.select_filter("news"));
        assert_eq!(c.view().page, 1);

        c.goto_page(2);
        assert!(c.search("EVEN"));
        assert_eq!(c.selection().current_page(), 1);

        c.goto_page(2);
        assert!(c.sort(SortMode::TitleAsc));
        assert_eq!(c.view().page, 1);
        assert_eq!(c.visible_entries()[0].1.title, "Entry 06");
    }

    #[test]
    fn test_goto_page_clamps() {
        let mut c = full();
        c.goto_page(40);
        assert_eq!(c.view().page, 3);
        assert_eq!(c.selection().current_page(), 3);
    }

    #[test]
    fn test_unmatched_search_disables_both_pager_buttons() {
        let mut c = full();
        c.search("workshop");
        assert!(c.visible_entries().is_empty());
        assert_eq!(c.view().page_count, 1);
        let layout = c.layout().unwrap();
        assert!(layout.prev_disabled);
        assert!(layout.next_disabled);
    }

    #[test]
    fn test_missing_controls_are_noops() {
        let mut c = controller(PageControls {
            filters: Vec::new(),
            search: false,
            sort_modes: Vec::new(),
            pagination: false,
        });
        assert!(!c.select_filter("news"));
        assert!(!c.search("odd"));
        assert!(!c.sort(SortMode::TitleAsc));
        assert!(!c.cycle_sort(true));
        assert!(!c.goto_page(2));
        assert!(!c.next_page());
        assert!(c.layout().is_none());
        // No pager: every match is shown.
        assert_eq!(c.visible_entries().len(), 12);
    }

    #[test]
    fn test_embed_toggle_collapses_on_rerender() {
        let mut c = full();
        c.select_filter("youtube");
        let (idx, _) = c.visible_entries()[0];
        assert_eq!(c.toggle_embed(idx), Some(true));
        assert_eq!(c.expanded(), Some(idx));

        c.search("entry");
        assert_eq!(c.expanded(), None);

        c.select_filter("news");
        let (news_idx, _) = c.visible_entries()[0];
        assert_eq!(c.toggle_embed(news_idx), None);
    }

    #[test]
    fn test_activate_opens_only_visible_links() {
        let mut c = full();
        c.select_filter("news");
        let (idx, e) = c.visible_entries()[0];
        let url = e.detail_url.clone();
        assert_eq!(c.activate(idx), url.as_deref());

        // Entry 01 is on no visible page of the news filter.
        assert_eq!(c.activate(0), None);
    }

    #[test]
    fn test_cycle_sort() {
        let mut c = full();
        assert!(c.cycle_sort(true));
        assert_eq!(c.selection().sort_mode(), SortMode::DateAsc);
        assert!(c.cycle_sort(false));
        assert!(c.cycle_sort(false));
        assert_eq!(c.selection().sort_mode(), SortMode::TitleAsc);
    }

    #[test]
    fn test_initial_sort_falls_back_to_offered_mode() {
        let mut controls = PageControls::full(vec!["all".into()]);
        controls.sort_modes = vec![SortMode::TitleAsc];
        let c = MediaController::new(
            CardStore::new(vec![entry(1, "news"), entry(2, "news")]),
            controls,
            ControllerOptions::default(),
        );
        assert_eq!(c.selection().sort_mode(), SortMode::TitleAsc);
    }
}
