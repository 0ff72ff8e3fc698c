//! Binary search over sorted sequences.
//!
//! Every function takes a key, an ordering `comp` that must be a strict weak order, and a
//! projection `proj` applied to each element before it is compared. Plain variants use
//! [`less`] and [`identity`]. A sequence is sorted when no projected element is ordered
//! before the one preceding it.
//!
//! The count driven functions (`*_n`) do the work. The others measure the count first, which
//! is O(1) for random access cursors and sized sequences and a walk otherwise.
//!
//! ```
//! use pseq::{cursor::SliceCursor, search};
//! let v = [1, 2, 2, 2, 5, 8];
//! let r = search::equal_range(SliceCursor::begin(&v), SliceCursor::end(&v), &2);
//! assert_eq!(r.indices(), 1..4);
//! ```

use std::borrow::Borrow;

use crate::cursor::{Cursor, CursorPair};
use crate::sequence::Sequence;
use crate::Error;

/// `a < b`, the default ordering.
#[inline]
pub fn less<K: PartialOrd + ?Sized>(a: &K, b: &K) -> bool {
    a < b
}

/// Returns its argument, the default projection.
#[inline]
pub fn identity<T>(t: T) -> T {
    t
}

/// First position in `[first, first + count)` whose element is not ordered before `key`.
pub fn lower_bound_n_by<C, K, V, R, P>(
    mut first: C,
    mut count: usize,
    key: &K,
    mut comp: R,
    mut proj: P,
) -> C
where
    C: Cursor,
    K: ?Sized,
    V: Borrow<K>,
    R: FnMut(&K, &K) -> bool,
    P: FnMut(C::Item) -> V,
{
    while count > 0 {
        let half = count / 2;
        let middle = first.clone().next_by(half);
        let projected = proj(middle.read());
        let pv: &K = projected.borrow();
        if comp(pv, key) {
            first = middle;
            first.step();
            count -= half + 1;
        } else {
            count = half;
        }
    }
    first
}

/// First position in `[first, first + count)` whose element is ordered after `key`.
pub fn upper_bound_n_by<C, K, V, R, P>(
    mut first: C,
    mut count: usize,
    key: &K,
    mut comp: R,
    mut proj: P,
) -> C
where
    C: Cursor,
    K: ?Sized,
    V: Borrow<K>,
    R: FnMut(&K, &K) -> bool,
    P: FnMut(C::Item) -> V,
{
    while count > 0 {
        let half = count / 2;
        let middle = first.clone().next_by(half);
        let projected = proj(middle.read());
        let pv: &K = projected.borrow();
        if comp(key, pv) {
            count = half;
        } else {
            first = middle;
            first.step();
            count -= half + 1;
        }
    }
    first
}

/// Maximal sub-range of `[first, first + count)` whose elements are equivalent to `key`.
///
/// Narrows down to the first equivalent element, then finds the lower bound to its left and
/// the upper bound to its right, each within the part of the range still undecided. If no
/// element is equivalent, the result is empty and positioned where `key` would be inserted.
pub fn equal_range_n_by<C, K, V, R, P>(
    mut first: C,
    mut dist: usize,
    key: &K,
    mut comp: R,
    mut proj: P,
) -> CursorPair<C>
where
    C: Cursor,
    K: ?Sized,
    V: Borrow<K>,
    R: FnMut(&K, &K) -> bool,
    P: FnMut(C::Item) -> V,
{
    while dist > 0 {
        let half = dist / 2;
        let middle = first.clone().next_by(half);
        let projected = proj(middle.read());
        let pv: &K = projected.borrow();
        if comp(pv, key) {
            first = middle;
            first.step();
            dist -= half + 1;
        } else if comp(key, pv) {
            dist = half;
        } else {
            let mut after = middle;
            after.step();
            let lo = lower_bound_n_by(first, half, key, &mut comp, &mut proj);
            let hi = upper_bound_n_by(after, dist - (half + 1), key, &mut comp, &mut proj);
            return CursorPair::new(lo, hi);
        }
    }
    CursorPair::empty_at(first)
}

/// [`equal_range_n_by`] with [`less`] and [`identity`].
pub fn equal_range_n<C, K>(first: C, count: usize, key: &K) -> CursorPair<C>
where
    C: Cursor,
    C::Item: Borrow<K>,
    K: PartialOrd + ?Sized,
{
    equal_range_n_by(first, count, key, less, identity)
}

/// [`lower_bound_n_by`] with [`less`] and [`identity`].
pub fn lower_bound_n<C, K>(first: C, count: usize, key: &K) -> C
where
    C: Cursor,
    C::Item: Borrow<K>,
    K: PartialOrd + ?Sized,
{
    lower_bound_n_by(first, count, key, less, identity)
}

/// [`upper_bound_n_by`] with [`less`] and [`identity`].
pub fn upper_bound_n<C, K>(first: C, count: usize, key: &K) -> C
where
    C: Cursor,
    C::Item: Borrow<K>,
    K: PartialOrd + ?Sized,
{
    upper_bound_n_by(first, count, key, less, identity)
}

/// Maximal sub-range of `[first, last)` whose elements are equivalent to `key`.
pub fn equal_range_by<C, K, V, R, P>(first: C, last: C, key: &K, comp: R, proj: P) -> CursorPair<C>
where
    C: Cursor,
    K: ?Sized,
    V: Borrow<K>,
    R: FnMut(&K, &K) -> bool,
    P: FnMut(C::Item) -> V,
{
    let count = first.distance_to(&last);
    equal_range_n_by(first, count, key, comp, proj)
}

/// [`equal_range_by`] with [`less`] and [`identity`].
pub fn equal_range<C, K>(first: C, last: C, key: &K) -> CursorPair<C>
where
    C: Cursor,
    C::Item: Borrow<K>,
    K: PartialOrd + ?Sized,
{
    equal_range_by(first, last, key, less, identity)
}

/// Lower bound of `key` in `[first, last)`.
pub fn lower_bound_by<C, K, V, R, P>(first: C, last: C, key: &K, comp: R, proj: P) -> C
where
    C: Cursor,
    K: ?Sized,
    V: Borrow<K>,
    R: FnMut(&K, &K) -> bool,
    P: FnMut(C::Item) -> V,
{
    let count = first.distance_to(&last);
    lower_bound_n_by(first, count, key, comp, proj)
}

/// Upper bound of `key` in `[first, last)`.
pub fn upper_bound_by<C, K, V, R, P>(first: C, last: C, key: &K, comp: R, proj: P) -> C
where
    C: Cursor,
    K: ?Sized,
    V: Borrow<K>,
    R: FnMut(&K, &K) -> bool,
    P: FnMut(C::Item) -> V,
{
    let count = first.distance_to(&last);
    upper_bound_n_by(first, count, key, comp, proj)
}

/// Equal range over a whole sequence, counted with [`Sequence::size`].
pub fn equal_range_in_by<S, K, V, R, P>(seq: S, key: &K, comp: R, proj: P) -> CursorPair<S::Cursor>
where
    S: Sequence,
    K: ?Sized,
    V: Borrow<K>,
    R: FnMut(&K, &K) -> bool,
    P: FnMut(<S::Cursor as Cursor>::Item) -> V,
{
    let count = seq.size();
    equal_range_n_by(seq.begin(), count, key, comp, proj)
}

/// [`equal_range_in_by`] with [`less`] and [`identity`].
///
/// ```
/// use std::collections::LinkedList;
/// use pseq::search::equal_range_in;
/// let list: LinkedList<i32> = [1, 3, 3, 7].into_iter().collect();
/// assert_eq!(equal_range_in(&list, &3).len(), 2);
/// ```
pub fn equal_range_in<S, K>(seq: S, key: &K) -> CursorPair<S::Cursor>
where
    S: Sequence,
    <S::Cursor as Cursor>::Item: Borrow<K>,
    K: PartialOrd + ?Sized,
{
    equal_range_in_by(seq, key, less, identity)
}

/// [`equal_range_by`], after checking in O(n) that `comp` is irreflexive on `key` and that
/// `[first, last)` is sorted. Reports [`Error::PreconditionViolated`] instead of searching
/// when either check fails.
pub fn equal_range_checked<C, K, V, R, P>(
    first: C,
    last: C,
    key: &K,
    mut comp: R,
    mut proj: P,
) -> Result<CursorPair<C>, Error>
where
    C: Cursor,
    K: ?Sized,
    V: Borrow<K>,
    R: FnMut(&K, &K) -> bool,
    P: FnMut(C::Item) -> V,
{
    if comp(key, key) {
        return Err(Error::PreconditionViolated("ordering is not irreflexive"));
    }
    let mut items = CursorPair::new(first.clone(), last.clone()).into_iter();
    if let Some(head) = items.next() {
        let mut prev = proj(head);
        for item in items {
            let cur = proj(item);
            let (c, p): (&K, &K) = (cur.borrow(), prev.borrow());
            if comp(c, p) {
                return Err(Error::PreconditionViolated("sequence is not sorted"));
            }
            prev = cur;
        }
    }
    Ok(equal_range_by(first, last, key, comp, proj))
}
