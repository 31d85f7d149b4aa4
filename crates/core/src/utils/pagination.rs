//! Lenient page-number resolution for listing endpoints.
//!
//! A requested page that is missing or not an integer resolves to the first
//! page; one that falls outside `1..=num_pages` resolves to the last page.
//! An empty listing still has a single, empty page.

use std::num::IntErrorKind;

use serde::Serialize;

/// The slice of a listing selected by a resolved page number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub number: i64,
    pub num_pages: i64,
    pub count: i64,
    pub per_page: i64,
}

impl PageWindow {
    pub fn resolve(requested: Option<&str>, count: i64, per_page: i64) -> Self {
        let per_page = per_page.max(1);
        let count = count.max(0);
        let num_pages = if count == 0 {
            1
        } else {
            (count + per_page - 1) / per_page
        };

        let number = match requested.and_then(parse_page_number) {
            None => 1,
            Some(n) if n < 1 || n > num_pages => num_pages,
            Some(n) => n,
        };

        Self {
            number,
            num_pages,
            count,
            per_page,
        }
    }

    pub fn offset(&self) -> i64 {
        (self.number - 1) * self.per_page
    }

    pub fn limit(&self) -> i64 {
        self.per_page
    }

    pub fn into_page<T>(self, items: Vec<T>) -> Page<T> {
        Page {
            items,
            number: self.number,
            num_pages: self.num_pages,
            count: self.count,
            has_next: self.number < self.num_pages,
            has_previous: self.number > 1,
        }
    }
}

/// Integers too large for `i64` saturate so they still count as out of range.
fn parse_page_number(raw: &str) -> Option<i64> {
    match raw.trim().parse::<i64>() {
        Ok(n) => Some(n),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => Some(i64::MAX),
            IntErrorKind::NegOverflow => Some(i64::MIN),
            _ => None,
        },
    }
}

/// One page of a listing plus the navigation data a client needs.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub number: i64,
    pub num_pages: i64,
    pub count: i64,
    pub has_next: bool,
    pub has_previous: bool,
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            number: self.number,
            num_pages: self.num_pages,
            count: self.count,
            has_next: self.has_next,
            has_previous: self.has_previous,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_page_is_first() {
        let w = PageWindow::resolve(None, 10, 4);
        assert_eq!(w.number, 1);
        assert_eq!(w.num_pages, 3);
        assert_eq!(w.offset(), 0);
    }

    #[test]
    fn test_non_numeric_page_is_first() {
        assert_eq!(PageWindow::resolve(Some("abc"), 10, 4).number, 1);
        assert_eq!(PageWindow::resolve(Some("2.5"), 10, 4).number, 1);
        assert_eq!(PageWindow::resolve(Some(""), 10, 4).number, 1);
    }

    #[test]
    fn test_out_of_range_page_is_last() {
        assert_eq!(PageWindow::resolve(Some("99"), 10, 4).number, 3);
        assert_eq!(PageWindow::resolve(Some("0"), 10, 4).number, 3);
        assert_eq!(PageWindow::resolve(Some("-1"), 10, 4).number, 3);
        assert_eq!(
            PageWindow::resolve(Some("99999999999999999999"), 10, 4).number,
            3
        );
        assert_eq!(
            PageWindow::resolve(Some("-99999999999999999999"), 10, 4).number,
            3
        );
        assert_eq!(
            PageWindow::resolve(Some("+99999999999999999999"), 10, 4).number,
            3
        );
    }

    #[test]
    fn test_whitespace_is_trimmed() {
        let w = PageWindow::resolve(Some(" 2 "), 10, 4);
        assert_eq!(w.number, 2);
        assert_eq!(w.offset(), 4);
    }

    #[test]
    fn test_empty_listing_has_one_page() {
        let w = PageWindow::resolve(Some("5"), 0, 4);
        assert_eq!(w.number, 1);
        assert_eq!(w.num_pages, 1);
        let page: Page<i32> = w.into_page(vec![]);
        assert!(!page.has_next);
        assert!(!page.has_previous);
    }

    #[test]
    fn test_exact_multiple_page_count() {
        assert_eq!(PageWindow::resolve(None, 8, 4).num_pages, 2);
        assert_eq!(PageWindow::resolve(None, 9, 4).num_pages, 3);
    }

    #[test]
    fn test_navigation_flags() {
        let page = PageWindow::resolve(Some("2"), 10, 4).into_page(vec![5, 6, 7, 8]);
        assert!(page.has_next);
        assert!(page.has_previous);

        let last = PageWindow::resolve(Some("3"), 10, 4).into_page(vec![9, 10]);
        assert!(!last.has_next);
        assert!(last.has_previous);
    }

    #[test]
    fn test_map_keeps_navigation() {
        let page = PageWindow::resolve(Some("1"), 5, 4)
            .into_page(vec![1, 2, 3, 4])
            .map(|n| n * 10);
        assert_eq!(page.items, vec![10, 20, 30, 40]);
        assert_eq!(page.num_pages, 2);
        assert!(page.has_next);
    }
}
