//! Filtering traits.

/// immutable, pure filter (2 successive equal inputs -> 2 equal outputs).
///
/// `detect` returns `true` for items that should be kept.
/// The default filter keeps everything.
pub trait Filter<T>: Default {
    fn detect(&self, item: T) -> bool;
}
