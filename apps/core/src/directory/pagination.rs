use std::num::NonZeroUsize;
use std::ops::Range;

pub const DEFAULT_PAGE_SIZE: usize = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSize(NonZeroUsize);

impl PageSize {
    pub const fn new(size: NonZeroUsize) -> Self {
        Self(size)
    }

    /// `None` for zero.
    pub fn try_from_usize(size: usize) -> Option<Self> {
        NonZeroUsize::new(size).map(Self)
    }

    pub const fn get(self) -> usize {
        self.0.get()
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::try_from_usize(DEFAULT_PAGE_SIZE).unwrap_or(Self(NonZeroUsize::MIN))
    }
}

pub const fn page_count(total: usize, size: PageSize) -> usize {
    total.div_ceil(size.get())
}

/// Page buttons `1..=page_count`; empty when there is nothing to show.
pub fn page_numbers(total: usize, size: PageSize) -> Vec<usize> {
    (1..=page_count(total, size)).collect()
}

/// Index range `[(page - 1) * size, page * size)` clipped to `total`.
pub fn page_bounds(page: usize, size: PageSize, total: usize) -> Range<usize> {
    let end = page.saturating_mul(size.get());
    let start = end.saturating_sub(size.get());
    start.min(total)..end.min(total)
}

pub fn page_slice<T>(items: &[T], page: usize, size: PageSize) -> &[T] {
    &items[page_bounds(page, size, items.len())]
}

/// Reads a page number the way the address bar is parsed: leading digits
/// win, anything unparseable (or below 1) means page 1.
pub fn parse_page(raw: Option<&str>) -> usize {
    let Some(raw) = raw else {
        return 1;
    };

    let digits: String = raw
        .trim_start()
        .trim_start_matches('+')
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();

    match digits.parse::<usize>() {
        Ok(page) if page >= 1 => page,
        _ => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(n: usize) -> PageSize {
        PageSize::try_from_usize(n).unwrap()
    }

    #[test]
    fn default_size_is_fifteen() {
        assert_eq!(PageSize::default().get(), 15);
        assert!(PageSize::try_from_usize(0).is_none());
    }

    #[test]
    fn button_count_is_ceiling_of_total_over_size() {
        for total in 0..50 {
            for n in 1..8 {
                let expected = (total + n - 1) / n;
                assert_eq!(page_numbers(total, size(n)).len(), expected);
            }
        }
        assert!(page_numbers(0, size(15)).is_empty());
        assert_eq!(page_numbers(31, size(15)), vec![1, 2, 3]);
    }

    #[test]
    fn slice_covers_the_requested_page() {
        let items: Vec<usize> = (0..23).collect();
        assert_eq!(page_slice(&items, 1, size(10)), &items[0..10]);
        assert_eq!(page_slice(&items, 2, size(10)), &items[10..20]);
        assert_eq!(page_slice(&items, 3, size(10)), &items[20..23]);
    }

    #[test]
    fn out_of_range_page_is_empty() {
        let items: Vec<usize> = (0..5).collect();
        assert!(page_slice(&items, 4, size(10)).is_empty());
        assert!(page_slice(&items, usize::MAX, size(10)).is_empty());
    }

    #[test]
    fn page_parsing_falls_back_to_one() {
        assert_eq!(parse_page(None), 1);
        assert_eq!(parse_page(Some("")), 1);
        assert_eq!(parse_page(Some("abc")), 1);
        assert_eq!(parse_page(Some("0")), 1);
        assert_eq!(parse_page(Some("-3")), 1);
        assert_eq!(parse_page(Some("4")), 4);
        assert_eq!(parse_page(Some("2abc")), 2);
        assert_eq!(parse_page(Some(" 7")), 7);
    }
}
