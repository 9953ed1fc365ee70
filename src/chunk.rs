//! Splitting of token lists into multicall-sized batches.

use std::num::NonZeroUsize;

/// Splits `items` into consecutive groups of at most `size` elements.
///
/// Order is preserved and only the last group may be shorter. An empty input yields no groups.
pub fn chunk<T: Clone>(items: &[T], size: NonZeroUsize) -> Vec<Vec<T>> {
    items.chunks(size.get()).map(<[T]>::to_vec).collect()
}
