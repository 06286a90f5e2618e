/// Newest `cap` entries of `items`, order preserved.
pub fn sliding_window<T>(items: &[T], cap: usize) -> &[T] {
    if items.len() > cap {
        &items[items.len() - cap..]
    } else {
        items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_sequence_untouched() {
        let items = [1, 2, 3];
        assert_eq!(sliding_window(&items, 5), &[1, 2, 3]);
        assert_eq!(sliding_window(&items, 3), &[1, 2, 3]);
    }

    #[test]
    fn test_keeps_newest_entries() {
        let items: Vec<usize> = (0..25).collect();
        let window = sliding_window(&items, 20);
        assert_eq!(window.len(), 20);
        assert_eq!(window.first(), Some(&5));
        assert_eq!(window.last(), Some(&24));
    }

    #[test]
    fn test_zero_cap() {
        let items = [1, 2];
        assert!(sliding_window(&items, 0).is_empty());
    }
}
