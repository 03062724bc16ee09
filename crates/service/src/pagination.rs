//! Pagination utilities for service layer
//!
//! Zero-based page slicing over an already filtered and sorted result set.

/// Items per page when no other size is configured.
pub const PAGE_SIZE: usize = 5;

/// Number of pages needed for `total` items; zero for an empty set.
pub fn max_page(total: usize, page_size: usize) -> usize {
    let per_page = page_size.max(1);
    total.div_ceil(per_page)
}

/// `[start, end)` item range of a zero-based page.
pub fn page_bounds(page_idx: usize, page_size: usize) -> (usize, usize) {
    let per_page = page_size.max(1);
    let start = page_idx.saturating_mul(per_page);
    (start, start.saturating_add(per_page))
}

/// Keep only the items of page `page_idx`. Out-of-range pages come back empty.
pub fn paginate<T>(items: Vec<T>, page_idx: usize, page_size: usize) -> Vec<T> {
    let (start, end) = page_bounds(page_idx, page_size);
    items.into_iter().skip(start).take(end - start).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_page_rounds_up() {
        assert_eq!(max_page(0, PAGE_SIZE), 0);
        assert_eq!(max_page(5, PAGE_SIZE), 1);
        assert_eq!(max_page(7, PAGE_SIZE), 2);
        assert_eq!(max_page(10, PAGE_SIZE), 2);
    }

    #[test]
    fn zero_page_size_is_clamped() {
        assert_eq!(max_page(3, 0), 3);
        assert_eq!(page_bounds(2, 0), (2, 3));
    }

    #[test]
    fn paginate_second_page_of_seven() {
        let items: Vec<u32> = (0..7).collect();
        assert_eq!(paginate(items, 1, PAGE_SIZE), vec![5, 6]);
    }

    #[test]
    fn out_of_range_page_is_empty() {
        let items: Vec<u32> = (0..7).collect();
        assert!(paginate(items, 9, PAGE_SIZE).is_empty());
        assert!(paginate(vec![1u8], usize::MAX, PAGE_SIZE).is_empty());
    }
}
