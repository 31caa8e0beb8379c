//! Page arithmetic.

/// 1-based inclusive window of visible records.
///
/// When there are no records `high` is `low - 1` and the window is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub low: usize,
    pub high: usize,
}

impl PageWindow {
    /// Number of records inside the window.
    pub fn len(&self) -> usize {
        (self.high + 1).saturating_sub(self.low)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the 0-based record `index` is inside the window.
    pub fn contains_index(&self, index: usize) -> bool {
        index + 1 >= self.low && index < self.high
    }
}

/// `ceil(total / per_page)`; zero when `per_page` is zero.
pub fn total_pages(total_records: usize, per_page: usize) -> usize {
    if per_page == 0 {
        return 0;
    }
    total_records.div_ceil(per_page)
}

/// Clamp `page` into `[1, pages]`, or 1 when there are no pages.
pub fn clamp_page(page: usize, pages: usize) -> usize {
    if pages == 0 {
        return 1;
    }
    page.clamp(1, pages)
}

/// Visible window for `page` given `per_page` and `total_records`.
pub fn page_window(page: usize, per_page: usize, total_records: usize) -> PageWindow {
    let page = page.max(1);
    let low = per_page * (page - 1) + 1;
    let high = (per_page * page).min(total_records);
    PageWindow {
        low,
        high: high.max(low - 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(25, 10), 3);
        assert_eq!(total_pages(30, 10), 3);
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(42, 0), 0);
    }

    #[test]
    fn test_clamp_page() {
        assert_eq!(clamp_page(0, 3), 1);
        assert_eq!(clamp_page(7, 3), 3);
        assert_eq!(clamp_page(2, 3), 2);
        assert_eq!(clamp_page(5, 0), 1);
    }

    #[test]
    fn test_window_formula() {
        for total in [0usize, 1, 9, 10, 25, 101] {
            for per_page in [1usize, 10, 25] {
                for page in 1..=total_pages(total, per_page).max(1) {
                    let window = page_window(page, per_page, total);
                    assert_eq!(window.low, per_page * (page - 1) + 1);
                    if total > 0 {
                        assert_eq!(window.high, (per_page * page).min(total));
                        assert_eq!(window.len(), window.high - window.low + 1);
                    } else {
                        assert!(window.is_empty());
                    }
                }
            }
        }
    }

    #[test]
    fn test_last_page_window() {
        let window = page_window(3, 10, 25);
        assert_eq!((window.low, window.high), (21, 25));
        assert_eq!(window.len(), 5);
        assert!(window.contains_index(20));
        assert!(window.contains_index(24));
        assert!(!window.contains_index(19));
    }
}
