//! Pager model: which page buttons are shown and which moves are allowed

/// Most numbered buttons shown before the window collapses with ellipses.
pub const MAX_VISIBLE_PAGES: u32 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page { number: u32, current: bool },
    Ellipsis,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pager {
    pub current: u32,
    pub total: u32,
}

impl Pager {
    pub fn new(current: u32, total: u32) -> Self {
        let total = total.max(1);
        Self {
            current: current.clamp(1, total),
            total,
        }
    }

    /// A single page needs no pager at all.
    pub fn is_visible(&self) -> bool {
        self.total > 1
    }

    pub fn can_go_previous(&self) -> bool {
        self.current > 1
    }

    pub fn can_go_next(&self) -> bool {
        self.current < self.total
    }

    pub fn contains(&self, page: u32) -> bool {
        (1..=self.total).contains(&page)
    }

    pub fn previous(&self) -> Option<u32> {
        self.can_go_previous().then(|| self.current - 1)
    }

    pub fn next(&self) -> Option<u32> {
        self.can_go_next().then(|| self.current + 1)
    }

    /// First and last pages are always present; neighbours of the current page
    /// fill the middle, with an ellipsis wherever pages are skipped.
    pub fn items(&self) -> Vec<PageItem> {
        let page = |number| PageItem::Page {
            number,
            current: number == self.current,
        };

        if self.total <= MAX_VISIBLE_PAGES {
            return (1..=self.total).map(page).collect();
        }

        let mut items = vec![page(1)];
        if self.current > 3 {
            items.push(PageItem::Ellipsis);
        }

        let start = self.current.saturating_sub(1).max(2);
        let end = (self.current + 1).min(self.total - 1);
        items.extend((start..=end).map(page));

        if self.current + 2 < self.total {
            items.push(PageItem::Ellipsis);
        }
        items.push(page(self.total));
        items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(items: &[PageItem]) -> Vec<Option<u32>> {
        items
            .iter()
            .map(|item| match item {
                PageItem::Page { number, .. } => Some(*number),
                PageItem::Ellipsis => None,
            })
            .collect()
    }

    #[test]
    fn test_boundaries_disable_moves() {
        let first = Pager::new(1, 5);
        assert!(!first.can_go_previous());
        assert_eq!(first.previous(), None);
        assert_eq!(first.next(), Some(2));

        let last = Pager::new(5, 5);
        assert!(!last.can_go_next());
        assert_eq!(last.next(), None);
        assert_eq!(last.previous(), Some(4));
    }

    #[test]
    fn test_single_page_is_hidden() {
        let pager = Pager::new(1, 0);
        assert_eq!(pager.total, 1);
        assert!(!pager.is_visible());
        assert!(!pager.can_go_previous());
        assert!(!pager.can_go_next());
    }

    #[test]
    fn test_small_totals_show_every_page() {
        let pager = Pager::new(3, 7);
        assert_eq!(
            numbers(&pager.items()),
            (1..=7).map(Some).collect::<Vec<_>>()
        );
        assert!(pager.items().contains(&PageItem::Page { number: 3, current: true }));
    }

    #[test]
    fn test_large_totals_collapse_around_current() {
        assert_eq!(
            numbers(&Pager::new(1, 20).items()),
            vec![Some(1), Some(2), None, Some(20)]
        );
        assert_eq!(
            numbers(&Pager::new(10, 20).items()),
            vec![Some(1), None, Some(9), Some(10), Some(11), None, Some(20)]
        );
        assert_eq!(
            numbers(&Pager::new(20, 20).items()),
            vec![Some(1), None, Some(19), Some(20)]
        );
        assert_eq!(
            numbers(&Pager::new(3, 20).items()),
            vec![Some(1), Some(2), Some(3), Some(4), None, Some(20)]
        );
    }

    #[test]
    fn test_out_of_range_pages_are_not_contained() {
        let pager = Pager::new(2, 4);
        assert!(!pager.contains(0));
        assert!(pager.contains(4));
        assert!(!pager.contains(5));
    }
}
