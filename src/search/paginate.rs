// Stateless page-window arithmetic over the filtered result sequence.

/// The contiguous slice `[(page-1)*page_size, page*page_size)` clamped to the
/// sequence bounds. Pages are 1-based; any out-of-range page yields an empty
/// slice rather than panicking.
pub fn page_window<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    if page == 0 || page_size == 0 {
        return &[];
    }
    let start = (page - 1).saturating_mul(page_size);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

/// `ceil(count / page_size)`; an empty sequence has zero pages.
pub fn total_pages(count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    count.div_ceil(page_size)
}

/// Whether a navigation request to `page` is accepted. Out-of-range requests
/// are a silent no-op for the caller, not a clamp.
pub fn accepts_page(page: usize, total_pages: usize) -> bool {
    page >= 1 && page <= total_pages
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn windows_partition_the_sequence() {
        let items: Vec<u32> = (0..37).collect();
        let size = 10;
        let total = total_pages(items.len(), size);
        assert_eq!(total, 4);

        let mut reassembled = Vec::new();
        for page in 1..=total {
            reassembled.extend_from_slice(page_window(&items, page, size));
        }
        assert_eq!(reassembled, items);
        assert!(page_window(&items, total + 1, size).is_empty());
    }

    #[test]
    fn twenty_items_have_no_third_page() {
        let items: Vec<u32> = (0..20).collect();
        assert!(page_window(&items, 3, 10).is_empty());
        assert_eq!(total_pages(items.len(), 10), 2);
        assert!(!accepts_page(3, 2));
        assert!(accepts_page(2, 2));
    }

    #[test]
    fn window_is_pure_and_repeatable() {
        let items: Vec<u32> = (0..25).collect();
        let first = page_window(&items, 2, 10).to_vec();
        let second = page_window(&items, 2, 10).to_vec();
        assert_eq!(first, second);
        assert_eq!(first, (10..20).collect::<Vec<u32>>());
    }

    #[test]
    fn zero_count_has_zero_pages() {
        assert_eq!(total_pages(0, 10), 0);
        assert!(!accepts_page(1, 0));
        let empty: Vec<u32> = Vec::new();
        assert!(page_window(&empty, 1, 10).is_empty());
    }

    #[test]
    fn page_zero_is_rejected_everywhere() {
        let items: Vec<u32> = (0..5).collect();
        assert!(page_window(&items, 0, 10).is_empty());
        assert!(!accepts_page(0, 1));
    }

    #[test]
    fn partial_last_page_is_short() {
        let items: Vec<u32> = (0..23).collect();
        assert_eq!(page_window(&items, 3, 10), &[20, 21, 22]);
    }
}
