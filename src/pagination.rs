//! Page-number window math for the browse grid.

/// One slot in the rendered pagination bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page(u32),
    Ellipsis,
}

/// A further page exists while the pages seen so far cover less than the
/// reported total.
pub fn has_next_page(page: u32, limit: u32, total: u32) -> bool {
    page * limit < total
}

pub fn total_pages(total: u32, limit: u32) -> u32 {
    if limit == 0 {
        return 0;
    }
    total.div_ceil(limit)
}

/// Compressed page window. Up to 7 pages render in full; past that the bar
/// shows the edges plus a block around the current page:
/// current in the first 4 pages keeps `1..=5`, current in the last 4 keeps
/// the final five, anything between centers a three-page block.
pub fn page_window(total: u32, current: u32) -> Vec<PageItem> {
    use PageItem::{Ellipsis, Page};

    if total <= 7 {
        return (1..=total).map(Page).collect();
    }

    if current <= 4 {
        let mut items: Vec<PageItem> = (1..=5).map(Page).collect();
        items.push(Ellipsis);
        items.push(Page(total));
        return items;
    }

    if current >= total - 3 {
        let mut items = vec![Page(1), Ellipsis];
        items.extend((total - 4..=total).map(Page));
        return items;
    }

    vec![
        Page(1),
        Ellipsis,
        Page(current - 1),
        Page(current),
        Page(current + 1),
        Ellipsis,
        Page(total),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use PageItem::{Ellipsis, Page};

    #[test]
    fn window_near_start() {
        assert_eq!(
            page_window(10, 1),
            vec![Page(1), Page(2), Page(3), Page(4), Page(5), Ellipsis, Page(10)]
        );
        assert_eq!(
            page_window(10, 4),
            vec![Page(1), Page(2), Page(3), Page(4), Page(5), Ellipsis, Page(10)]
        );
    }

    #[test]
    fn window_near_end() {
        assert_eq!(
            page_window(10, 10),
            vec![Page(1), Ellipsis, Page(6), Page(7), Page(8), Page(9), Page(10)]
        );
        assert_eq!(
            page_window(10, 7),
            vec![Page(1), Ellipsis, Page(6), Page(7), Page(8), Page(9), Page(10)]
        );
    }

    #[test]
    fn window_centers_on_middle_pages() {
        assert_eq!(
            page_window(10, 5),
            vec![Page(1), Ellipsis, Page(4), Page(5), Page(6), Ellipsis, Page(10)]
        );
    }

    #[test]
    fn small_totals_render_without_ellipsis() {
        assert_eq!(
            page_window(5, 3),
            vec![Page(1), Page(2), Page(3), Page(4), Page(5)]
        );
        assert_eq!(
            page_window(7, 7),
            vec![Page(1), Page(2), Page(3), Page(4), Page(5), Page(6), Page(7)]
        );
        assert_eq!(page_window(1, 1), vec![Page(1)]);
        assert!(page_window(0, 1).is_empty());
    }

    #[test]
    fn next_page_exists_while_total_uncovered() {
        assert!(has_next_page(1, 20, 45));
        assert!(has_next_page(2, 20, 45));
        assert!(!has_next_page(3, 20, 45));
        assert!(!has_next_page(1, 20, 20));
        assert!(!has_next_page(1, 20, 0));
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(45, 20), 3);
        assert_eq!(total_pages(40, 20), 2);
        assert_eq!(total_pages(0, 20), 0);
        assert_eq!(total_pages(5, 0), 0);
    }
}
