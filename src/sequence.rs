use std::collections::{btree_set, linked_list, BTreeSet, LinkedList, VecDeque};

use crate::alloc::Allocator;
use crate::cursor::{Counted, Cursor, CursorPair, DequeCursor, IterCursor, SliceCursor};

/// Something that can hand out a pair of cursors over its elements.
///
/// Implemented for shared references to containers, so the cursors borrow the container.
pub trait Sequence {
    /// Cursor type of the sequence.
    type Cursor: Cursor;

    /// `true` if [`Sequence::size`] is O(1).
    const SIZED: bool = false;

    /// Cursor at the first element.
    fn begin(&self) -> Self::Cursor;

    /// Cursor one past the last element.
    fn end(&self) -> Self::Cursor;

    /// Number of elements. Walks the sequence unless the sequence is [`Sequence::SIZED`].
    fn size(&self) -> usize {
        self.begin().distance_to(&self.end())
    }

    /// The whole sequence as a cursor pair.
    fn cursors(&self) -> CursorPair<Self::Cursor> {
        CursorPair::new(self.begin(), self.end())
    }
}

impl<'a, T> Sequence for &'a [T] {
    type Cursor = SliceCursor<'a, T>;
    const SIZED: bool = true;

    fn begin(&self) -> Self::Cursor {
        SliceCursor::begin(*self)
    }
    fn end(&self) -> Self::Cursor {
        SliceCursor::end(*self)
    }
    fn size(&self) -> usize {
        self.len()
    }
}

impl<'a, T, const N: usize> Sequence for &'a [T; N] {
    type Cursor = SliceCursor<'a, T>;
    const SIZED: bool = true;

    fn begin(&self) -> Self::Cursor {
        SliceCursor::begin(*self)
    }
    fn end(&self) -> Self::Cursor {
        SliceCursor::end(*self)
    }
    fn size(&self) -> usize {
        N
    }
}

impl<'a, T> Sequence for &'a std::vec::Vec<T> {
    type Cursor = SliceCursor<'a, T>;
    const SIZED: bool = true;

    fn begin(&self) -> Self::Cursor {
        SliceCursor::begin(*self)
    }
    fn end(&self) -> Self::Cursor {
        SliceCursor::end(*self)
    }
    fn size(&self) -> usize {
        self.len()
    }
}

impl<'a, T, A: Allocator> Sequence for &'a crate::vec::Vec<T, A> {
    type Cursor = SliceCursor<'a, T>;
    const SIZED: bool = true;

    fn begin(&self) -> Self::Cursor {
        SliceCursor::begin(*self)
    }
    fn end(&self) -> Self::Cursor {
        SliceCursor::end(*self)
    }
    fn size(&self) -> usize {
        self.len()
    }
}

impl<'a, T> Sequence for &'a VecDeque<T> {
    type Cursor = DequeCursor<'a, T>;
    const SIZED: bool = true;

    fn begin(&self) -> Self::Cursor {
        DequeCursor::at(*self, 0)
    }
    fn end(&self) -> Self::Cursor {
        DequeCursor::at(*self, self.len())
    }
    fn size(&self) -> usize {
        self.len()
    }
}

// Node based: O(1) size, but no jumps.
impl<'a, T> Sequence for &'a LinkedList<T> {
    type Cursor = IterCursor<linked_list::Iter<'a, T>>;
    const SIZED: bool = true;

    fn begin(&self) -> Self::Cursor {
        IterCursor::new(self.iter())
    }
    fn end(&self) -> Self::Cursor {
        IterCursor::exhausted(self.iter(), self.len())
    }
    fn size(&self) -> usize {
        self.len()
    }
}

impl<'a, T> Sequence for &'a BTreeSet<T> {
    type Cursor = IterCursor<btree_set::Iter<'a, T>>;
    const SIZED: bool = true;

    fn begin(&self) -> Self::Cursor {
        IterCursor::new(self.iter())
    }
    fn end(&self) -> Self::Cursor {
        IterCursor::exhausted(self.iter(), self.len())
    }
    fn size(&self) -> usize {
        self.len()
    }
}

impl<C: Cursor> Sequence for CursorPair<C> {
    type Cursor = C;
    const SIZED: bool = C::RANDOM_ACCESS;

    fn begin(&self) -> C {
        CursorPair::begin(self).clone()
    }
    fn end(&self) -> C {
        CursorPair::end(self).clone()
    }
}

impl<C: Cursor> Sequence for Counted<C> {
    type Cursor = C;
    const SIZED: bool = true;

    fn begin(&self) -> C {
        Counted::begin(self).clone()
    }
    fn end(&self) -> C {
        Counted::begin(self).clone().next_by(self.count())
    }
    fn size(&self) -> usize {
        self.count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::caps::supports_o1_size;
    use crate::cursor::Forward;

    #[test]
    fn sizes() {
        let v = vec![1, 2, 3];
        let d: VecDeque<i32> = (0..4).collect();
        let l: LinkedList<i32> = (0..5).collect();
        let s: BTreeSet<i32> = (0..6).collect();
        assert_eq!((&v).size(), 3);
        assert_eq!((&d).size(), 4);
        assert_eq!((&l).size(), 5);
        assert_eq!((&s).size(), 6);
        assert_eq!((&l).cursors().len(), 5);
    }

    #[test]
    fn pair_sized_only_when_random_access() {
        assert!(supports_o1_size::<CursorPair<SliceCursor<i32>>>());
        assert!(!supports_o1_size::<CursorPair<Forward<SliceCursor<i32>>>>());
        assert!(supports_o1_size::<Counted<Forward<SliceCursor<i32>>>>());
        let v = [5, 6, 7, 8];
        let p = CursorPair::new(Forward(SliceCursor::begin(&v)), Forward(SliceCursor::end(&v)));
        assert_eq!(Sequence::size(&p), 4);
    }
}
