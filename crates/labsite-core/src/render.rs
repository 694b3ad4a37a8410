//! Render/visibility layer: which cards are shown, in which order, and
//! which one (if any) has its embed expanded.

use crate::pipeline::ViewResult;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardVisibility {
    visible: Vec<bool>,
    display_order: Vec<usize>,
    expanded: Option<usize>,
}

impl CardVisibility {
    /// Everything hidden until the first `apply`.
    pub fn new(len: usize) -> Self {
        Self {
            visible: vec![false; len],
            display_order: Vec::new(),
            expanded: None,
        }
    }

    /// Show exactly the page slice (or every match when the page has no
    /// pager) and collapse any open embed.
    pub fn apply(&mut self, view: &ViewResult, paginated: bool) {
        self.visible.iter_mut().for_each(|v| *v = false);
        let shown = if paginated { &view.visible } else { &view.ordered };
        for &i in shown {
            if let Some(v) = self.visible.get_mut(i) {
                *v = true;
            }
        }
        self.display_order = shown.clone();
        self.collapse_all();
    }

    pub fn is_visible(&self, idx: usize) -> bool {
        self.visible.get(idx).copied().unwrap_or(false)
    }

    /// Visible entry indices in on-screen order.
    pub fn display_order(&self) -> &[usize] {
        &self.display_order
    }

    pub fn visible_count(&self) -> usize {
        self.display_order.len()
    }

    pub fn expanded(&self) -> Option<usize> {
        self.expanded
    }

    pub fn collapse_all(&mut self) {
        self.expanded = None;
    }

    /// Toggle an entry's embed: everything collapses first, then the entry
    /// opens unless it was the one already open. Returns the new open state.
    pub fn toggle_expand(&mut self, idx: usize) -> bool {
        let was_open = self.expanded == Some(idx);
        self.collapse_all();
        if !was_open && self.is_visible(idx) {
            self.expanded = Some(idx);
        }
        self.expanded == Some(idx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(ordered: Vec<usize>, visible: Vec<usize>) -> ViewResult {
        ViewResult {
            ordered,
            page_count: 2,
            page: 1,
            visible,
        }
    }

    #[test]
    fn test_apply_shows_only_slice() {
        let mut vis = CardVisibility::new(6);
        vis.apply(&view(vec![4, 2, 0, 5], vec![4, 2]), true);
        assert_eq!(vis.display_order(), &[4, 2]);
        for i in 0..6 {
            assert_eq!(vis.is_visible(i), i == 4 || i == 2);
        }
    }

    #[test]
    fn test_apply_without_pager_shows_all_matches() {
        let mut vis = CardVisibility::new(6);
        vis.apply(&view(vec![4, 2, 0, 5], vec![4, 2]), false);
        assert_eq!(vis.display_order(), &[4, 2, 0, 5]);
        assert!(!vis.is_visible(1));
        assert!(!vis.is_visible(3));
    }

    #[test]
    fn test_rerender_collapses_expanded() {
        let mut vis = CardVisibility::new(3);
        vis.apply(&view(vec![0, 1], vec![0, 1]), true);
        assert!(vis.toggle_expand(1));
        assert_eq!(vis.expanded(), Some(1));
        vis.apply(&view(vec![0, 1], vec![0, 1]), true);
        assert_eq!(vis.expanded(), None);
    }

    #[test]
    fn test_toggle_switches_and_closes() {
        let mut vis = CardVisibility::new(3);
        vis.apply(&view(vec![0, 1, 2], vec![0, 1, 2]), true);
        assert!(vis.toggle_expand(0));
        assert!(vis.toggle_expand(2));
        assert_eq!(vis.expanded(), Some(2));
        assert!(!vis.toggle_expand(2));
        assert_eq!(vis.expanded(), None);
    }

    #[test]
    fn test_hidden_entry_cannot_expand() {
        let mut vis = CardVisibility::new(3);
        vis.apply(&view(vec![0], vec![0]), true);
        assert!(!vis.toggle_expand(2));
        assert_eq!(vis.expanded(), None);
    }
}
