//! Drag-to-reorder primitive shared by the exercise list and the session timeline.
//!
//! A completed drag is a `(from, to)` pair. The element at `from` is spliced out
//! and re-inserted at `to`, where `to` indexes the list *after* the removal. With
//! that reading every index in `[0, len)` is a valid target and moving an element
//! and then moving it back with the indices swapped restores the original order.

use crate::error::{CompositionError, Result};

/// Moves one element of `items` from `from` to `to` in place.
///
/// Fails with [`CompositionError::IndexOutOfRange`] when either index is outside
/// `[0, len)`; the list is not touched in that case.
pub fn move_item<T>(items: &mut Vec<T>, from: usize, to: usize) -> Result<()> {
    let len = items.len();
    if from >= len {
        return Err(CompositionError::out_of_range(from, len));
    }
    if to >= len {
        return Err(CompositionError::out_of_range(to, len));
    }

    if from != to {
        let item = items.remove(from);
        items.insert(to, item);
    }
    Ok(())
}

/// Non-mutating variant of [`move_item`]: returns the reordered copy.
pub fn moved<T: Clone>(items: &[T], from: usize, to: usize) -> Result<Vec<T>> {
    let mut out = items.to_vec();
    move_item(&mut out, from, to)?;
    Ok(out)
}
