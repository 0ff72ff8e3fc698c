//! Payloads for range insertion.
//!
//! A [`Source`] is classified once, at the call boundary, into an [`Extent`]: either its
//! element count is known up front, so the target can reserve for it, or it is not.

use std::ops::Range;

use crate::alloc::Allocator;
use crate::cursor::{Counted, CountedIter, Cursor, CursorPair, Iter};

/// How much a source will yield.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Extent {
    /// Exactly this many elements.
    Known(usize),
    /// Unknown until the source is drained.
    Unknown,
}

/// Elements to be inserted into a container.
pub trait Source {
    /// Element type.
    type Item;
    /// Iterator the elements are drained through.
    type IntoIter: Iterator<Item = Self::Item>;

    /// Number of elements, if known without draining.
    fn extent(&self) -> Extent;

    /// Drain the source.
    fn into_elements(self) -> Self::IntoIter;
}

// Initializer lists.
impl<T, const N: usize> Source for [T; N] {
    type Item = T;
    type IntoIter = std::array::IntoIter<T, N>;

    fn extent(&self) -> Extent {
        Extent::Known(N)
    }
    fn into_elements(self) -> Self::IntoIter {
        self.into_iter()
    }
}

impl<'a, T: Clone, const N: usize> Source for &'a [T; N] {
    type Item = T;
    type IntoIter = std::iter::Cloned<std::slice::Iter<'a, T>>;

    fn extent(&self) -> Extent {
        Extent::Known(N)
    }
    fn into_elements(self) -> Self::IntoIter {
        self.iter().cloned()
    }
}

impl<'a, T: Clone> Source for &'a [T] {
    type Item = T;
    type IntoIter = std::iter::Cloned<std::slice::Iter<'a, T>>;

    fn extent(&self) -> Extent {
        Extent::Known(self.len())
    }
    fn into_elements(self) -> Self::IntoIter {
        self.iter().cloned()
    }
}

impl<T> Source for std::vec::Vec<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn extent(&self) -> Extent {
        Extent::Known(self.len())
    }
    fn into_elements(self) -> Self::IntoIter {
        self.into_iter()
    }
}

impl<T, A: Allocator> Source for crate::vec::Vec<T, A> {
    type Item = T;
    type IntoIter = crate::vec::IntoIter<T, A>;

    fn extent(&self) -> Extent {
        Extent::Known(self.len())
    }
    fn into_elements(self) -> Self::IntoIter {
        self.into_iter()
    }
}

/// Ranges such as `0..3` or `-5i64..5`.
///
/// `Range<u64>` and `Range<i64>` are not [`ExactSizeIterator`]s, so the length is taken from
/// `size_hint`, which std ranges report exactly whenever the length fits in a `usize`. A range
/// too long for that, such as `0..u128::MAX`, has an unknown extent and is inserted like an
/// [`Uncounted`] source. Other iterators over such ranges (`map`, `step_by`) can be wrapped in
/// [`Exact`] when they are exact size, or in [`Uncounted`] otherwise.
impl<T> Source for Range<T>
where
    Range<T>: Iterator,
{
    type Item = <Range<T> as Iterator>::Item;
    type IntoIter = Range<T>;

    fn extent(&self) -> Extent {
        match self.size_hint() {
            (n, Some(m)) if n == m => Extent::Known(n),
            _ => Extent::Unknown,
        }
    }
    fn into_elements(self) -> Self::IntoIter {
        self
    }
}

/// Elements between two cursors are copied out. The count is only known up front when the
/// cursors are random access.
impl<'a, T, C> Source for CursorPair<C>
where
    T: Clone + 'a,
    C: Cursor<Item = &'a T>,
{
    type Item = T;
    type IntoIter = std::iter::Cloned<Iter<C>>;

    fn extent(&self) -> Extent {
        if C::RANDOM_ACCESS {
            Extent::Known(self.len())
        } else {
            Extent::Unknown
        }
    }
    fn into_elements(self) -> Self::IntoIter {
        self.into_iter().cloned()
    }
}

impl<'a, T, C> Source for Counted<C>
where
    T: Clone + 'a,
    C: Cursor<Item = &'a T>,
{
    type Item = T;
    type IntoIter = std::iter::Cloned<CountedIter<C>>;

    fn extent(&self) -> Extent {
        Extent::Known(self.count())
    }
    fn into_elements(self) -> Self::IntoIter {
        self.into_iter().cloned()
    }
}

/// Iterator whose length is known, such as a mapped slice iterator.
#[derive(Clone, Debug)]
pub struct Exact<I>(pub I);

impl<I: ExactSizeIterator> Source for Exact<I> {
    type Item = I::Item;
    type IntoIter = I;

    fn extent(&self) -> Extent {
        Extent::Known(self.0.len())
    }
    fn into_elements(self) -> I {
        self.0
    }
}

/// Iterator of unknown length, inserted without reserving first.
#[derive(Clone, Debug)]
pub struct Uncounted<I>(pub I);

impl<I: Iterator> Source for Uncounted<I> {
    type Item = I::Item;
    type IntoIter = I;

    fn extent(&self) -> Extent {
        Extent::Unknown
    }
    fn into_elements(self) -> I {
        self.0
    }
}

/// `count` clones of one value.
#[derive(Clone, Debug)]
pub struct Copies<T> {
    value: T,
    count: usize,
}

impl<T: Clone> Copies<T> {
    /// `count` clones of `value`.
    pub fn new(value: T, count: usize) -> Self {
        Self { value, count }
    }
}

impl<T: Clone> Iterator for Copies<T> {
    type Item = T;
    fn next(&mut self) -> Option<T> {
        if self.count == 0 {
            None
        } else {
            self.count -= 1;
            Some(self.value.clone())
        }
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.count, Some(self.count))
    }
}

impl<T: Clone> ExactSizeIterator for Copies<T> {}

impl<T: Clone> Source for Copies<T> {
    type Item = T;
    type IntoIter = Self;

    fn extent(&self) -> Extent {
        Extent::Known(self.count)
    }
    fn into_elements(self) -> Self {
        self
    }
}
