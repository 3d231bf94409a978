//! Wrapping cursor arithmetic shared by the highlight cursor and the focus ring.
//!
//! A cursor is `Option<usize>`: `None` means "nothing highlighted".
//! Every function returns either `None` or an index `< len`.

/// Step forward, wrapping from the last index to 0. `None` lands on 0.
pub fn wrap_next(current: Option<usize>, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    match current {
        None => Some(0),
        Some(i) => Some((i.min(len - 1) + 1) % len),
    }
}

/// Step backward, wrapping from 0 to the last index. `None` lands on the last index.
pub fn wrap_prev(current: Option<usize>, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    match current {
        None => Some(len - 1),
        Some(i) => Some((i.min(len - 1) + len - 1) % len),
    }
}

/// Re-check a cursor after the list it points into changed length.
/// A still-valid index is kept; an out-of-range one falls back to 0 (or `None`
/// when the list is empty).
pub fn revalidate(current: Option<usize>, len: usize) -> Option<usize> {
    match current {
        Some(i) if i < len => Some(i),
        Some(_) if len > 0 => Some(0),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_wraps() {
        assert_eq!(wrap_next(None, 3), Some(0));
        assert_eq!(wrap_next(Some(0), 3), Some(1));
        assert_eq!(wrap_next(Some(2), 3), Some(0));
        assert_eq!(wrap_next(Some(0), 1), Some(0));
    }

    #[test]
    fn test_prev_wraps() {
        assert_eq!(wrap_prev(None, 3), Some(2));
        assert_eq!(wrap_prev(Some(0), 3), Some(2));
        assert_eq!(wrap_prev(Some(2), 3), Some(1));
    }

    #[test]
    fn test_empty_list_has_no_cursor() {
        assert_eq!(wrap_next(None, 0), None);
        assert_eq!(wrap_prev(Some(4), 0), None);
        assert_eq!(revalidate(Some(4), 0), None);
    }

    #[test]
    fn test_stale_index_never_escapes_bounds() {
        // cursor left over from a longer list
        assert_eq!(wrap_next(Some(9), 3), Some(0));
        assert_eq!(wrap_prev(Some(9), 3), Some(1));
        assert_eq!(revalidate(Some(9), 3), Some(0));
        assert_eq!(revalidate(Some(1), 3), Some(1));
        assert_eq!(revalidate(None, 3), None);
    }
}
