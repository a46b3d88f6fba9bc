//! Head/tail row-budget sampling shared by datasets and profiles.

/// Keep at most `budget` items: the first half of the budget from the start
/// and the remainder from the end, preserving order.
///
/// With an odd budget the head gets the extra slot.
pub fn head_tail<T: Clone>(items: &[T], budget: usize) -> Vec<T> {
    if items.len() <= budget {
        return items.to_vec();
    }

    let tail = budget / 2;
    let head = budget - tail;

    let mut kept = Vec::with_capacity(budget);
    kept.extend_from_slice(&items[..head]);
    kept.extend_from_slice(&items[items.len() - tail..]);
    kept
}
