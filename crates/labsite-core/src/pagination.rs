//! Compact page-button layout: `1 … 4 [5] 6 … 12`.

use std::collections::BTreeSet;

use serde::Serialize;

/// Neighbours shown on each side of the current page.
pub const DEFAULT_NEIGHBOR_RADIUS: usize = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PageItem {
    Page { number: usize, active: bool },
    Ellipsis,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageLayout {
    pub items: Vec<PageItem>,
    pub page: usize,
    pub page_count: usize,
    pub prev_disabled: bool,
    pub next_disabled: bool,
}

impl PageLayout {
    /// `page` must already be clamped into `[1, page_count]`.
    pub fn new(page_count: usize, page: usize, radius: usize) -> Self {
        let page_count = page_count.max(1);
        let page = page.clamp(1, page_count);

        let mut pages = BTreeSet::from([1, page_count]);
        let lo = page.saturating_sub(radius).max(1);
        let hi = page.saturating_add(radius).min(page_count);
        pages.extend(lo..=hi);

        let mut items = Vec::with_capacity(pages.len() * 2);
        let mut prev = 0usize;
        for p in pages {
            if prev != 0 && p - prev > 1 {
                items.push(PageItem::Ellipsis);
            }
            items.push(PageItem::Page {
                number: p,
                active: p == page,
            });
            prev = p;
        }

        Self {
            items,
            page,
            page_count,
            prev_disabled: page <= 1,
            next_disabled: page >= page_count,
        }
    }

    /// Page numbers present in the layout, in order.
    pub fn page_numbers(&self) -> impl Iterator<Item = usize> + '_ {
        self.items.iter().filter_map(|item| match item {
            PageItem::Page { number, .. } => Some(*number),
            PageItem::Ellipsis => None,
        })
    }

    /// Text of the page indicator, e.g. `2 / 7`.
    pub fn indicator(&self) -> String {
        format!("{} / {}", self.page, self.page_count)
    }
}
