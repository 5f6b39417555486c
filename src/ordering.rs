//! Pure sequence primitives used for list and card reordering.
//!
//! Both helpers work on a copy of their input and never mutate the caller's
//! sequence. Indices are validated up front: an out-of-range index is a
//! caller bug, reported as [`OrderingError::IndexOutOfRange`] before any work
//! is done.

use thiserror::Error;

/// Precondition violations raised by the ordering primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum OrderingError {
    /// An index fell outside the valid range of the named sequence.
    #[error("index {index} is out of range for {sequence} sequence of length {len}")]
    IndexOutOfRange {
        /// Which sequence the index addressed (`"source"` or `"destination"`).
        sequence: &'static str,
        /// Offending index.
        index: usize,
        /// Length of the sequence at the time of the call.
        len: usize,
    },
}

/// Removes the element at `from` and reinserts it at `to`.
///
/// All other elements keep their relative order. When `from == to` the
/// returned sequence equals the input.
///
/// # Errors
///
/// Returns [`OrderingError::IndexOutOfRange`] unless both `from` and `to`
/// are smaller than the sequence length.
pub fn move_within<T: Clone>(
    sequence: &[T],
    from: usize,
    to: usize,
) -> Result<Vec<T>, OrderingError> {
    let len = sequence.len();
    ensure_index("source", from, len, len)?;
    ensure_index("destination", to, len, len)?;

    let mut reordered = sequence.to_vec();
    if from != to {
        let item = reordered.remove(from);
        reordered.insert(to, item);
    }
    Ok(reordered)
}

/// Removes the element at `from` in `source` and inserts it at `to` in
/// `dest`.
///
/// # Errors
///
/// Returns [`OrderingError::IndexOutOfRange`] when `from` is not a valid
/// position in `source` or `to` is greater than the length of `dest`.
pub fn transfer_between<T: Clone>(
    source: &[T],
    dest: &[T],
    from: usize,
    to: usize,
) -> Result<(Vec<T>, Vec<T>), OrderingError> {
    ensure_index("source", from, source.len(), source.len())?;
    ensure_index("destination", to, dest.len() + 1, dest.len())?;

    let mut new_source = source.to_vec();
    let mut new_dest = dest.to_vec();
    let item = new_source.remove(from);
    new_dest.insert(to, item);
    Ok((new_source, new_dest))
}

/// Checks `index < bound`, reporting `len` as the sequence length on failure.
const fn ensure_index(
    sequence: &'static str,
    index: usize,
    bound: usize,
    len: usize,
) -> Result<(), OrderingError> {
    if index < bound {
        Ok(())
    } else {
        Err(OrderingError::IndexOutOfRange {
            sequence,
            index,
            len,
        })
    }
}
