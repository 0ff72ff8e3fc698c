use std::{collections::VecDeque, fmt, ops::Range, ptr};

/// A position in a sequence.
///
/// Every cursor can be read and stepped forward. Cursors that can jump in O(1) set
/// [`Cursor::RANDOM_ACCESS`] and override [`Cursor::advance`] and [`Cursor::distance_to`],
/// the defaults of which walk one element at a time.
///
/// Two cursors are only meaningfully compared if they belong to the same sequence.
pub trait Cursor: Clone + PartialEq {
    /// What reading the cursor yields, usually a reference to the element.
    type Item;

    /// `true` if `advance` and `distance_to` are O(1).
    const RANDOM_ACCESS: bool = false;

    /// Element at the cursor.
    ///
    /// # Panics
    ///
    /// May panic if the cursor is at the end of its sequence.
    fn read(&self) -> Self::Item;

    /// Move to the next element.
    fn step(&mut self);

    /// Move forward by `n` elements.
    fn advance(&mut self, n: usize) {
        for _ in 0..n {
            self.step();
        }
    }

    /// Number of steps from `self` to `last`, which must be reachable from `self`.
    fn distance_to(&self, last: &Self) -> usize {
        let mut c = self.clone();
        let mut n = 0;
        while c != *last {
            c.step();
            n += 1;
        }
        n
    }

    /// The cursor `n` elements further on.
    #[must_use]
    fn next_by(mut self, n: usize) -> Self
    where
        Self: Sized,
    {
        self.advance(n);
        self
    }
}

/// Random access cursor into a slice.
pub struct SliceCursor<'a, T> {
    slice: &'a [T],
    index: usize,
}

impl<'a, T> SliceCursor<'a, T> {
    /// Cursor at the first element of `slice`.
    pub fn begin(slice: &'a [T]) -> Self {
        Self::at(slice, 0)
    }

    /// Cursor one past the last element of `slice`.
    pub fn end(slice: &'a [T]) -> Self {
        Self::at(slice, slice.len())
    }

    /// Cursor at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index > slice.len()`.
    pub fn at(slice: &'a [T], index: usize) -> Self {
        assert!(index <= slice.len());
        Self { slice, index }
    }

    /// Offset of the cursor from the start of its slice.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The whole slice the cursor points into.
    pub fn slice(&self) -> &'a [T] {
        self.slice
    }
}

impl<T> Clone for SliceCursor<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for SliceCursor<'_, T> {}

impl<T> PartialEq for SliceCursor<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.slice, other.slice) && self.index == other.index
    }
}

impl<T> fmt::Debug for SliceCursor<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("SliceCursor").field(&self.index).finish()
    }
}

impl<'a, T> Cursor for SliceCursor<'a, T> {
    type Item = &'a T;
    const RANDOM_ACCESS: bool = true;

    #[inline]
    fn read(&self) -> &'a T {
        &self.slice[self.index]
    }

    #[inline]
    fn step(&mut self) {
        self.index += 1;
    }

    #[inline]
    fn advance(&mut self, n: usize) {
        self.index += n;
    }

    #[inline]
    fn distance_to(&self, last: &Self) -> usize {
        debug_assert!(last.index >= self.index);
        last.index - self.index
    }
}

/// Random access cursor into a [`VecDeque`].
pub struct DequeCursor<'a, T> {
    deque: &'a VecDeque<T>,
    index: usize,
}

impl<'a, T> DequeCursor<'a, T> {
    /// Cursor at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index > deque.len()`.
    pub fn at(deque: &'a VecDeque<T>, index: usize) -> Self {
        assert!(index <= deque.len());
        Self { deque, index }
    }

    /// Offset of the cursor from the front of the deque.
    pub fn index(&self) -> usize {
        self.index
    }
}

impl<T> Clone for DequeCursor<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for DequeCursor<'_, T> {}

impl<T> PartialEq for DequeCursor<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.deque, other.deque) && self.index == other.index
    }
}

impl<T> fmt::Debug for DequeCursor<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("DequeCursor").field(&self.index).finish()
    }
}

impl<'a, T> Cursor for DequeCursor<'a, T> {
    type Item = &'a T;
    const RANDOM_ACCESS: bool = true;

    fn read(&self) -> &'a T {
        &self.deque[self.index]
    }

    fn step(&mut self) {
        self.index += 1;
    }

    fn advance(&mut self, n: usize) {
        self.index += n;
    }

    fn distance_to(&self, last: &Self) -> usize {
        debug_assert!(last.index >= self.index);
        last.index - self.index
    }
}

/// Forward-only cursor over any cloneable iterator.
///
/// Cursors are equal when they are the same number of steps from the start, so only cursors
/// made from the same iterator should be compared.
pub struct IterCursor<I: Iterator> {
    rest: I,
    head: Option<I::Item>,
    index: usize,
}

impl<I: Iterator> IterCursor<I> {
    /// Cursor at the first item of `iter`.
    pub fn new(iter: I) -> Self {
        let mut rest = iter;
        let head = rest.next();
        Self {
            rest,
            head,
            index: 0,
        }
    }

    /// End cursor of a sequence of `len` items. `iter` is never read.
    pub fn exhausted(iter: I, len: usize) -> Self {
        Self {
            rest: iter,
            head: None,
            index: len,
        }
    }

    /// Number of steps taken from the start.
    pub fn index(&self) -> usize {
        self.index
    }
}

impl<I> Clone for IterCursor<I>
where
    I: Iterator + Clone,
    I::Item: Clone,
{
    fn clone(&self) -> Self {
        Self {
            rest: self.rest.clone(),
            head: self.head.clone(),
            index: self.index,
        }
    }
}

impl<I: Iterator> PartialEq for IterCursor<I> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl<I: Iterator> fmt::Debug for IterCursor<I> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("IterCursor").field(&self.index).finish()
    }
}

impl<I> Cursor for IterCursor<I>
where
    I: Iterator + Clone,
    I::Item: Clone,
{
    type Item = I::Item;

    fn read(&self) -> I::Item {
        match &self.head {
            Some(item) => item.clone(),
            None => panic!("cursor read past the end of its sequence"),
        }
    }

    fn step(&mut self) {
        self.head = self.rest.next();
        self.index += 1;
    }
}

/// Hides the random access capability of a cursor, so algorithms take their incremental path.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Forward<C>(pub C);

impl<C: Cursor> Cursor for Forward<C> {
    type Item = C::Item;

    fn read(&self) -> C::Item {
        self.0.read()
    }

    fn step(&mut self) {
        self.0.step();
    }
}

/// Half-open sequence `[begin, end)` given by two cursors.
///
/// A pair is never changed once built; algorithms hand back new pairs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CursorPair<C> {
    begin: C,
    end: C,
}

impl<C: Cursor> CursorPair<C> {
    /// Pair from `begin` to `end`, `end` must be reachable from `begin`.
    pub fn new(begin: C, end: C) -> Self {
        Self { begin, end }
    }

    /// Empty pair positioned at `at`.
    pub fn empty_at(at: C) -> Self {
        Self {
            begin: at.clone(),
            end: at,
        }
    }

    /// First cursor.
    pub fn begin(&self) -> &C {
        &self.begin
    }

    /// Limit cursor.
    pub fn end(&self) -> &C {
        &self.end
    }

    /// Split into `(begin, end)`.
    pub fn into_parts(self) -> (C, C) {
        (self.begin, self.end)
    }

    /// Number of elements, O(1) for random access cursors.
    pub fn len(&self) -> usize {
        self.begin.distance_to(&self.end)
    }

    /// `true` if the pair holds no elements.
    pub fn is_empty(&self) -> bool {
        self.begin == self.end
    }

    /// Same elements, as a begin cursor and a count.
    pub fn counted(self) -> Counted<C> {
        let count = self.len();
        Counted::new(self.begin, count)
    }

    /// Iterator over the elements.
    pub fn iter(&self) -> Iter<C> {
        Iter {
            pos: self.begin.clone(),
            end: self.end.clone(),
        }
    }
}

impl<'a, T> CursorPair<SliceCursor<'a, T>> {
    /// Index range of the pair within its slice.
    pub fn indices(&self) -> Range<usize> {
        self.begin.index..self.end.index
    }

    /// The elements as a sub-slice.
    pub fn as_slice(&self) -> &'a [T] {
        &self.begin.slice[self.indices()]
    }
}

impl<C: Cursor> IntoIterator for CursorPair<C> {
    type Item = C::Item;
    type IntoIter = Iter<C>;
    fn into_iter(self) -> Self::IntoIter {
        Iter {
            pos: self.begin,
            end: self.end,
        }
    }
}

/// Iterator over a [`CursorPair`].
#[derive(Clone, Debug)]
pub struct Iter<C> {
    pos: C,
    end: C,
}

impl<C: Cursor> Iterator for Iter<C> {
    type Item = C::Item;
    fn next(&mut self) -> Option<C::Item> {
        if self.pos == self.end {
            None
        } else {
            let item = self.pos.read();
            self.pos.step();
            Some(item)
        }
    }
}

/// Half-open sequence given by a begin cursor and a count of elements.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Counted<C> {
    begin: C,
    count: usize,
}

impl<C: Cursor> Counted<C> {
    /// `count` elements starting at `begin`.
    pub fn new(begin: C, count: usize) -> Self {
        Self { begin, count }
    }

    /// First cursor.
    pub fn begin(&self) -> &C {
        &self.begin
    }

    /// Number of elements.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Same elements as a cursor pair. Walks `count` steps unless the cursor is random access.
    pub fn into_pair(self) -> CursorPair<C> {
        let end = self.begin.clone().next_by(self.count);
        CursorPair::new(self.begin, end)
    }
}

impl<C: Cursor> IntoIterator for Counted<C> {
    type Item = C::Item;
    type IntoIter = CountedIter<C>;
    fn into_iter(self) -> Self::IntoIter {
        CountedIter {
            pos: self.begin,
            left: self.count,
        }
    }
}

/// Iterator over a [`Counted`] sequence.
#[derive(Clone, Debug)]
pub struct CountedIter<C> {
    pos: C,
    left: usize,
}

impl<C: Cursor> Iterator for CountedIter<C> {
    type Item = C::Item;
    fn next(&mut self) -> Option<C::Item> {
        if self.left == 0 {
            None
        } else {
            let item = self.pos.read();
            self.left -= 1;
            if self.left != 0 {
                self.pos.step();
            }
            Some(item)
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.left, Some(self.left))
    }
}

impl<C: Cursor> ExactSizeIterator for CountedIter<C> {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::LinkedList;

    #[test]
    fn slice_cursor_moves() {
        let v = [10, 20, 30, 40];
        let b = SliceCursor::begin(&v);
        let e = SliceCursor::end(&v);
        assert_eq!(b.distance_to(&e), 4);
        assert_eq!(*b.next_by(2).read(), 30);
        let p = CursorPair::new(b, e);
        assert_eq!(p.len(), 4);
        assert_eq!(p.iter().copied().collect::<std::vec::Vec<_>>(), v);
    }

    #[test]
    fn forward_walks_same_distance() {
        let v = [1, 2, 3, 4, 5];
        let b = Forward(SliceCursor::begin(&v));
        let e = Forward(SliceCursor::end(&v));
        assert!(!<Forward<SliceCursor<i32>> as Cursor>::RANDOM_ACCESS);
        assert_eq!(b.distance_to(&e), 5);
        assert_eq!(*b.next_by(4).read(), 5);
    }

    #[test]
    fn iter_cursor_over_list() {
        let list: LinkedList<i32> = (0..6).collect();
        let b = IterCursor::new(list.iter());
        let e = IterCursor::exhausted(list.iter(), list.len());
        assert_eq!(b.distance_to(&e), 6);
        let mid = b.clone().next_by(3);
        assert_eq!(*mid.read(), 3);
        assert_eq!(mid.index(), 3);
        let all: std::vec::Vec<i32> = CursorPair::new(b, e).into_iter().copied().collect();
        assert_eq!(all, [0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn counted_and_pair_agree() {
        let v = [3, 1, 4, 1, 5, 9, 2, 6];
        let c = Counted::new(SliceCursor::at(&v, 2), 4);
        let p = c.into_pair();
        assert_eq!(p.indices(), 2..6);
        assert_eq!(p.as_slice(), &[4, 1, 5, 9]);
        assert_eq!(p.counted(), c);
        assert_eq!(c.into_iter().len(), 4);
    }

    #[test]
    fn cursors_of_different_slices_differ() {
        let a = [1, 2];
        let b = [1, 2];
        assert_ne!(SliceCursor::begin(&a), SliceCursor::begin(&b));
        assert!(CursorPair::empty_at(SliceCursor::end(&a)).is_empty());
    }
}
