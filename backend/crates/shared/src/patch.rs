//! Sparse Updates
//!
//! `PUT` bodies carry `Option<T>` per field: `None` keeps the stored value,
//! `Some` overwrites it. [`Sparse`] is implemented by those patch types so
//! the merge rule is written once.

/// Overwrite `slot` when `value` is present. Returns whether it changed.
#[inline]
pub fn assign<T>(slot: &mut T, value: Option<T>) -> bool {
    match value {
        Some(value) => {
            *slot = value;
            true
        }
        None => false,
    }
}

/// A partial update for `T`
pub trait Sparse<T> {
    /// Apply the present fields to `target`, leaving the rest untouched
    fn merge_into(self, target: &mut T);
}
