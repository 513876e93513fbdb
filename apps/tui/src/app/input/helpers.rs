/// Moves a list cursor one step, wrapping at both ends
pub const fn wrap_step(index: usize, len: usize, forward: bool) -> usize {
    if len == 0 {
        return 0;
    }

    if forward {
        (index + 1) % len
    } else if index == 0 {
        len - 1
    } else {
        index - 1
    }
}

/// Moves a list cursor by `step` rows, stopping at the ends
pub const fn page_step(index: usize, len: usize, step: usize, forward: bool) -> usize {
    if len == 0 {
        return 0;
    }

    if forward {
        let next = index + step;
        if next >= len {
            len - 1
        } else {
            next
        }
    } else {
        index.saturating_sub(step)
    }
}
