//! Positional argument cursor.
//!
//! Every directive, named or not, takes the next argument from the same
//! cursor. A field name labels the argument it consumes; it never selects
//! one.

/// Cursor over the ordered argument list of one call.
///
/// # Invariant
///
/// `index <= args.len()`. The cursor only moves forward and the argument
/// slice is never modified.
#[derive(Debug)]
pub struct ArgState<'v, V> {
    args: &'v [V],
    index: usize,
}

impl<'v, V> ArgState<'v, V> {
    pub fn new(args: &'v [V]) -> Self {
        Self { args, index: 0 }
    }

    /// Position of the next unconsumed argument.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Number of arguments consumed so far.
    #[inline]
    pub fn consumed(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.index >= self.args.len()
    }

    /// Arguments not consumed so far, starting at [`index`](Self::index).
    #[inline]
    pub fn rest(&self) -> &'v [V] {
        &self.args[self.index..]
    }
}

impl<'v, V> Iterator for ArgState<'v, V> {
    type Item = (usize, &'v V);

    /// Take the next unconsumed argument with its position.
    ///
    /// Returns `None` once every argument has been consumed; the caller
    /// renders a missing-argument marker in that case.
    fn next(&mut self) -> Option<Self::Item> {
        let value = self.args.get(self.index)?;
        let index = self.index;
        self.index += 1;
        Some((index, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.args.len() - self.index;
        (left, Some(left))
    }
}

impl<V> ExactSizeIterator for ArgState<'_, V> {}

impl<V> std::iter::FusedIterator for ArgState<'_, V> {}

// Derived Clone would require `V: Clone`.
impl<V> Clone for ArgState<'_, V> {
    fn clone(&self) -> Self {
        Self {
            args: self.args,
            index: self.index,
        }
    }
}
