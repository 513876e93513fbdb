/// First row to draw so that `selected_index` stays inside a window of
/// `max_visible_rows`
pub const fn scroll_offset(
    total_rows: usize,
    max_visible_rows: usize,
    selected_index: usize,
) -> usize {
    if total_rows <= max_visible_rows || selected_index < max_visible_rows {
        return 0;
    }

    selected_index + 1 - max_visible_rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_lists_never_scroll() {
        assert_eq!(scroll_offset(10, 20, 9), 0);
    }

    #[test]
    fn selection_below_the_window_pulls_it_down() {
        assert_eq!(scroll_offset(40, 10, 9), 0);
        assert_eq!(scroll_offset(40, 10, 10), 1);
        assert_eq!(scroll_offset(40, 10, 39), 30);
    }

    #[test]
    fn zero_height_window_tracks_the_selection() {
        assert_eq!(scroll_offset(5, 0, 3), 4);
    }
}
