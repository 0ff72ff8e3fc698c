//! Insertion into containers, dispatched on what the container and the payload can do.
//!
//! A single value goes straight to the container. A range whose length is known up front is
//! inserted into a random access, reservable container after the growth planner has made room
//! for all of it with at most one reservation. Every other range is handed to the container's
//! own multi-element insert.
//!
//! ```
//! use pseq::{action, vec::Vec};
//! let mut v: Vec<i32> = Vec::new();
//! action::insert(&mut v, 42).unwrap();
//! action::insert_range(&mut v, 1, [1, 2, 3]).unwrap();
//! assert_eq!(&v[..], &[42, 1, 2, 3]);
//! ```

use tracing::trace;

use crate::caps;
use crate::container::{Insert, SequenceContainer};
use crate::cursor::{Cursor, CursorPair};
use crate::growth::{self, Geometric, GrowthPolicy};
use crate::source::{Copies, Extent, Source};
use crate::Error;

/// Insert `value` wherever `target` puts single values: at the end of a sequence, in order in
/// a set.
pub fn insert<C>(target: &mut C, value: C::Value) -> Result<C::Output, Error>
where
    C: Insert + ?Sized,
{
    target.insert_value(value)
}

/// Insert `value` before `index`. Returns `index`.
pub fn insert_at<C>(target: &mut C, index: usize, value: C::Value) -> Result<usize, Error>
where
    C: SequenceContainer + ?Sized,
{
    target.insert_at(index, value)
}

/// Insert the elements of `source`, in order, before `index`, growing with [`Geometric`].
/// Returns the index of the first inserted element.
pub fn insert_range<C, S>(target: &mut C, index: usize, source: S) -> Result<usize, Error>
where
    C: SequenceContainer + ?Sized,
    S: Source<Item = C::Value>,
{
    insert_range_with(target, index, source, &Geometric)
}

/// [`insert_range`] with the growth decided by `policy`.
pub fn insert_range_with<C, S, P>(
    target: &mut C,
    index: usize,
    source: S,
    policy: &P,
) -> Result<usize, Error>
where
    C: SequenceContainer + ?Sized,
    S: Source<Item = C::Value>,
    P: GrowthPolicy + ?Sized,
{
    let index = match source.extent() {
        Extent::Known(n) if caps::plans_growth::<C>() => {
            trace!(index, additional = n, "planned range insertion");
            growth::reserve_for_insert(target, index, n, policy)?
        }
        Extent::Known(n) => {
            trace!(index, additional = n, "sized range insertion");
            growth::check_fits(target.growth_state(), n)?;
            index
        }
        Extent::Unknown => {
            trace!(index, "unsized range insertion");
            index
        }
    };
    target.insert_iter_at(index, source.into_elements())
}

/// Insert the elements between `first` and `last` before `index`.
pub fn insert_between<C, Cu>(
    target: &mut C,
    index: usize,
    first: Cu,
    last: Cu,
) -> Result<usize, Error>
where
    C: SequenceContainer + ?Sized,
    Cu: Cursor,
    CursorPair<Cu>: Source<Item = C::Value>,
{
    insert_range(target, index, CursorPair::new(first, last))
}

/// Insert `count` clones of `value` before `index`.
pub fn insert_copies<C>(
    target: &mut C,
    index: usize,
    count: usize,
    value: C::Value,
) -> Result<usize, Error>
where
    C: SequenceContainer + ?Sized,
    C::Value: Clone,
{
    insert_range(target, index, Copies::new(value, count))
}

/// Insert every element of `source` as a single value, stopping at the first failure.
pub fn insert_all<C, S>(target: &mut C, source: S) -> Result<(), Error>
where
    C: Insert + ?Sized,
    S: Source<Item = C::Value>,
{
    for value in source.into_elements() {
        target.insert_value(value)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::{Forward, SliceCursor};
    use crate::flat_set::FlatSet;
    use crate::source::Uncounted;
    use arrayvec::ArrayVec;
    use std::collections::{LinkedList, VecDeque};

    #[test]
    fn sized_insert_into_full_array_vec_changes_nothing() {
        let mut a: ArrayVec<u8, 4> = ArrayVec::new();
        insert_range(&mut a, 0, [1, 2, 3]).unwrap();
        match insert_range(&mut a, 1, [7, 8]) {
            Err(Error::CapacityExceeded {
                size: 3,
                additional: 2,
                max_size: 4,
            }) => {}
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(&a[..], &[1, 2, 3]);
    }

    #[test]
    fn unsized_insert_into_array_vec_stops_when_full() {
        let mut a: ArrayVec<u8, 4> = ArrayVec::new();
        insert_range(&mut a, 0, [1, 2]).unwrap();
        let r = insert_range(&mut a, 0, Uncounted([7, 8, 9].into_iter()));
        assert!(matches!(r, Err(Error::CapacityExceeded { .. })));
        assert_eq!(&a[..], &[7, 8, 1, 2]);
    }

    #[test]
    fn between_cursors() {
        let src = [5, 6, 7, 8];
        let mut l: LinkedList<i32> = [0, 1].into_iter().collect();
        let (first, last) = (SliceCursor::at(&src, 1), SliceCursor::at(&src, 3));
        assert_eq!(insert_between(&mut l, 1, first, last).unwrap(), 1);
        assert!(l.iter().eq([0, 6, 7, 1].iter()));

        let mut d: VecDeque<i32> = VecDeque::new();
        let (first, last) = (SliceCursor::begin(&src), SliceCursor::end(&src));
        insert_between(&mut d, 0, Forward(first), Forward(last)).unwrap();
        assert!(d.iter().eq(src.iter()));
    }

    #[test]
    fn copies_and_single_values() {
        let mut v: Vec<char> = vec!['a', 'b'];
        assert_eq!(insert_copies(&mut v, 1, 3, 'x').unwrap(), 1);
        assert_eq!(insert_at(&mut v, 0, '<').unwrap(), 0);
        assert_eq!(insert(&mut v, '>').unwrap(), 6);
        assert_eq!(v.iter().collect::<String>(), "<axxxb>");
        assert!(matches!(
            insert_copies(&mut v, 9, 1, 'y'),
            Err(Error::PreconditionViolated(_))
        ));
    }

    #[test]
    fn insert_all_into_set() {
        let mut s = FlatSet::new();
        insert_all(&mut s, [3, 1, 3, 2]).unwrap();
        assert_eq!(s.as_slice(), &[1, 2, 3]);
        assert_eq!(insert(&mut s, 0).unwrap(), (0, true));
    }

    #[test]
    fn policy_decides_reservation() {
        let mut v: crate::vec::Vec<u32> = crate::vec::Vec::new();
        insert_range_with(&mut v, 0, [1, 2, 3], &crate::growth::Doubling).unwrap();
        assert_eq!(v.capacity(), 4);
        insert_range_with(&mut v, 3, 0..2, &crate::growth::Doubling).unwrap();
        assert_eq!(v.capacity(), 8);
        assert_eq!(&v[..], &[1, 2, 3, 0, 1]);
    }
}
