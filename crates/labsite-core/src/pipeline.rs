//! Filter/sort/paginate pipeline.
//!
//! `compute_view` is pure: the same entries and selection always give the
//! same `ViewResult`. Results hold indices into the entry slice so callers
//! can keep borrowing the Card Store.

use feruca::Collator;
use serde::Serialize;

use crate::media::MediaEntry;
use crate::selection::{SelectionState, SortMode};

pub const DEFAULT_PAGE_SIZE: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewResult {
    /// Every matching entry in sort order.
    pub ordered: Vec<usize>,
    pub page_count: usize,
    /// Requested page clamped into `[1, page_count]`.
    pub page: usize,
    /// The entries on `page`.
    pub visible: Vec<usize>,
}

impl ViewResult {
    pub fn match_count(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }
}

/// Natural-order indices sorted by `mode`. The sort is stable, so ties keep
/// document order.
pub fn sort_indices(entries: &[MediaEntry], mode: SortMode) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..entries.len()).collect();
    match mode {
        SortMode::DateDesc => indices.sort_by(|&a, &b| entries[b].date.cmp(&entries[a].date)),
        SortMode::DateAsc => indices.sort_by(|&a, &b| entries[a].date.cmp(&entries[b].date)),
        SortMode::TitleAsc => {
            // Lowercased titles, collated with the Unicode Collation
            // Algorithm (CLDR root), so accented letters sort with their base.
            let keys: Vec<String> = entries.iter().map(|e| e.title.to_lowercase()).collect();
            let mut collator = Collator::default();
            indices.sort_by(|&a, &b| collator.collate(keys[a].as_str(), keys[b].as_str()));
        }
    }
    indices
}

/// Keep the sorted indices whose entry passes both the chip and the query.
pub fn filter_sorted(
    entries: &[MediaEntry],
    sorted: &[usize],
    selection: &SelectionState,
) -> Vec<usize> {
    let filter = selection.active_filter();
    let query = selection.search_query();
    sorted
        .iter()
        .copied()
        .filter(|&i| {
            let entry = &entries[i];
            entry.matches_filter(filter) && entry.matches_query(query)
        })
        .collect()
}

/// `ceil(count / page_size)`, never below 1.
pub fn page_count(count: usize, page_size: usize) -> usize {
    let size = page_size.max(1);
    count.div_ceil(size).max(1)
}

pub fn clamp_page(page: usize, page_count: usize) -> usize {
    page.clamp(1, page_count.max(1))
}

pub fn compute_view(
    entries: &[MediaEntry],
    selection: &SelectionState,
    page_size: usize,
) -> ViewResult {
    let size = page_size.max(1);
    let sorted = sort_indices(entries, selection.sort_mode());
    let ordered = filter_sorted(entries, &sorted, selection);

    let page_count = page_count(ordered.len(), size);
    let page = clamp_page(selection.current_page(), page_count);

    let start = ((page - 1) * size).min(ordered.len());
    let end = (start + size).min(ordered.len());
    let visible = ordered[start..end].to_vec();

    ViewResult {
        ordered,
        page_count,
        page,
        visible,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::parse_date;

    fn entry(title: &str, date: &str, kind: &str) -> MediaEntry {
        MediaEntry {
            title: title.to_string(),
            outlet: "Campus News".to_string(),
            keywords: String::new(),
            date: parse_date(date),
            kind: kind.to_string(),
            embed_url: None,
            detail_url: None,
            thumbnail_url: None,
        }
    }

    /// Twelve entries, one per month of 2023, in document order Jan..Dec.
    fn twelve() -> Vec<MediaEntry> {
        (1..=12)
            .map(|m| {
                let kind = if m % 3 == 0 { "video" } else { "article" };
                entry(&format!("Story {:02}", m), &format!("2023-{:02}-15", m), kind)
            })
            .collect()
    }

    fn titles(entries: &[MediaEntry], idx: &[usize]) -> Vec<String> {
        idx.iter().map(|&i| entries[i].title.clone()).collect()
    }

    #[test]
    fn test_twelve_entries_three_pages() {
        let entries = twelve();
        let mut sel = SelectionState::default();

        let view = compute_view(&entries, &sel, 5);
        assert_eq!(view.page_count, 3);
        assert_eq!(view.page, 1);
        assert_eq!(
            titles(&entries, &view.visible),
            vec!["Story 12", "Story 11", "Story 10", "Story 09", "Story 08"]
        );

        sel.set_page(3);
        let view = compute_view(&entries, &sel, 5);
        assert_eq!(view.page, 3);
        assert_eq!(titles(&entries, &view.visible), vec!["Story 02", "Story 01"]);
    }

    #[test]
    fn test_all_and_empty_query_keep_every_entry() {
        let entries = twelve();
        for mode in SortMode::ALL {
            let sel = SelectionState::new(mode);
            let view = compute_view(&entries, &sel, 5);
            assert_eq!(view.match_count(), entries.len());
        }
    }

    #[test]
    fn test_no_matches_is_one_empty_page() {
        let entries = twelve();
        let mut sel = SelectionState::default();
        sel.set_query("workshop");
        let view = compute_view(&entries, &sel, 5);
        assert!(view.is_empty());
        assert!(view.visible.is_empty());
        assert_eq!(view.page_count, 1);
        assert_eq!(view.page, 1);

        let view = compute_view(&[], &SelectionState::default(), 5);
        assert_eq!(view.page_count, 1);
        assert!(view.visible.is_empty());
    }

    #[test]
    fn test_page_is_clamped() {
        let entries = twelve();
        let mut sel = SelectionState::default();
        sel.set_page(99);
        assert_eq!(compute_view(&entries, &sel, 5).page, 3);
        sel.set_page(0);
        assert_eq!(compute_view(&entries, &sel, 5).page, 1);

        // A filter change after paging never leaves the page out of range.
        sel.set_page(3);
        sel.set_filter("video");
        let view = compute_view(&entries, &sel, 5);
        assert_eq!(view.page_count, 1);
        assert_eq!(view.page, 1);
        assert_eq!(view.visible.len(), 4);
    }

    #[test]
    fn test_sort_is_stable() {
        let entries = vec![
            entry("b", "2024-01-01", "article"),
            entry("a", "2024-01-01", "article"),
            entry("c", "2023-01-01", "article"),
            entry("B", "2024-01-01", "article"),
        ];
        assert_eq!(sort_indices(&entries, SortMode::DateDesc), vec![0, 1, 3, 2]);
        assert_eq!(sort_indices(&entries, SortMode::DateAsc), vec![2, 0, 1, 3]);
        // "b" and "B" tie under case-insensitive ordering.
        assert_eq!(sort_indices(&entries, SortMode::TitleAsc), vec![1, 0, 3, 2]);
    }

    #[test]
    fn test_title_sort_is_case_insensitive() {
        let entries = vec![
            entry("zebra finch", "2024-05-01", "article"),
            entry("Apple lab", "2020-01-01", "article"),
            entry("mango", "2022-01-01", "article"),
        ];
        let mut sel = SelectionState::default();
        sel.set_page(2);
        sel.set_sort(SortMode::TitleAsc);
        assert_eq!(sel.current_page(), 1);
        let view = compute_view(&entries, &sel, 5);
        assert_eq!(
            titles(&entries, &view.ordered),
            vec!["Apple lab", "mango", "zebra finch"]
        );
    }

    #[test]
    fn test_title_sort_collates_accented_letters() {
        let entries = vec![
            entry("fig", "2024-01-01", "article"),
            entry("Élan", "2024-01-01", "article"),
            entry("beta", "2024-01-01", "article"),
            entry("Ångström", "2024-01-01", "article"),
        ];
        let idx = sort_indices(&entries, SortMode::TitleAsc);
        assert_eq!(titles(&entries, &idx), vec!["Ångström", "beta", "Élan", "fig"]);
    }

    #[test]
    fn test_filter_and_query_combine() {
        let mut entries = twelve();
        entries[2].keywords = "Robotics, outreach".to_string(); // Story 03, video
        entries[4].keywords = "robotics".to_string(); // Story 05, article

        let mut sel = SelectionState::default();
        sel.set_query("ROBOTICS");
        let view = compute_view(&entries, &sel, 5);
        assert_eq!(titles(&entries, &view.ordered), vec!["Story 05", "Story 03"]);
        for (i, e) in entries.iter().enumerate() {
            assert_eq!(view.ordered.contains(&i), e.search_text().contains("robotics"));
        }

        sel.set_filter("video");
        let view = compute_view(&entries, &sel, 5);
        assert_eq!(titles(&entries, &view.ordered), vec!["Story 03"]);
    }

    #[test]
    fn test_page_count() {
        assert_eq!(page_count(0, 5), 1);
        assert_eq!(page_count(5, 5), 1);
        assert_eq!(page_count(6, 5), 2);
        assert_eq!(page_count(3, 0), 3);
    }
}
