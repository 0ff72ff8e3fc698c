//! Targets of the insertion operations.
//!
//! [`SequenceContainer`] is a container addressed by index, which is what the dispatcher in
//! [`crate::action`] inserts into. [`Insert`] is the single-value insertion every target
//! supports, including associative ones such as [`crate::flat_set::FlatSet`].

use std::collections::{BTreeSet, LinkedList, VecDeque};
use std::mem;

use arrayvec::ArrayVec;

use crate::alloc::Allocator;
use crate::growth::GrowthState;
use crate::Error;

/// Single-value insertion, wherever the container puts the value.
pub trait Insert {
    /// Element type.
    type Value;
    /// What an insertion reports: an index for sequences, `(index, inserted)` for unique sets.
    type Output;

    /// Insert `value`.
    fn insert_value(&mut self, value: Self::Value) -> Result<Self::Output, Error>;
}

/// Container whose positions are indices from its start.
///
/// The associated constants are its entries in the capability oracle ([`crate::caps`]).
/// Containers that can reserve override [`SequenceContainer::capacity`] and
/// [`SequenceContainer::reserve_total`]; for the rest the capacity is the maximum size and
/// reservation does nothing.
pub trait SequenceContainer {
    /// Element type.
    type Value;

    /// `true` if elements are reached by index in O(1).
    const RANDOM_ACCESS: bool;

    /// `true` if the container can reserve capacity ahead of an insertion.
    const RESERVABLE: bool = false;

    /// Number of elements.
    fn len(&self) -> usize;

    /// `true` if there are no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Largest number of elements the container can hold.
    fn max_size(&self) -> usize;

    /// Number of elements that fit without reallocating.
    fn capacity(&self) -> usize {
        self.max_size()
    }

    /// Grow the capacity to at least `capacity` elements.
    fn reserve_total(&mut self, capacity: usize) -> Result<(), Error> {
        let _ = capacity;
        Ok(())
    }

    /// Size, capacity and maximum size together.
    fn growth_state(&self) -> GrowthState {
        GrowthState {
            size: self.len(),
            capacity: self.capacity(),
            max_size: self.max_size(),
        }
    }

    /// Insert `value` before `index`, returning `index`.
    fn insert_at(&mut self, index: usize, value: Self::Value) -> Result<usize, Error>;

    /// Insert the items of `iter`, in order, before `index`. Returns the index of the first
    /// inserted item, which is `index`.
    fn insert_iter_at<I>(&mut self, index: usize, iter: I) -> Result<usize, Error>
    where
        I: Iterator<Item = Self::Value>;
}

impl<C: SequenceContainer> Insert for C {
    type Value = C::Value;
    type Output = usize;

    fn insert_value(&mut self, value: C::Value) -> Result<usize, Error> {
        let end = self.len();
        self.insert_at(end, value)
    }
}

fn check_index(index: usize, len: usize) -> Result<(), Error> {
    if index > len {
        Err(Error::PreconditionViolated("insertion index is past the end"))
    } else {
        Ok(())
    }
}

fn max_elements<T>() -> usize {
    match mem::size_of::<T>() {
        0 => usize::MAX,
        n => isize::MAX as usize / n,
    }
}

/// Appends the items of `iter` to `target` with `push` until one fails, then rotates whatever
/// was appended into place at `index`. Items after a failure are left in `iter`.
fn append_and_rotate<C, I, E>(
    target: &mut C,
    index: usize,
    iter: &mut I,
    mut push: impl FnMut(&mut C, I::Item) -> Result<(), E>,
    contiguous: fn(&mut C) -> &mut [I::Item],
) -> Result<usize, E>
where
    I: Iterator,
{
    let old_len = contiguous(target).len();
    let mut result = Ok(index);
    for value in iter {
        if let Err(e) = push(target, value) {
            result = Err(e);
            break;
        }
    }
    contiguous(target)[index..].rotate_left(old_len - index);
    result
}

impl<T, A: Allocator> SequenceContainer for crate::vec::Vec<T, A> {
    type Value = T;
    const RANDOM_ACCESS: bool = true;
    const RESERVABLE: bool = true;

    fn len(&self) -> usize {
        crate::vec::Vec::len(self)
    }
    fn max_size(&self) -> usize {
        crate::vec::Vec::max_size(self)
    }
    fn capacity(&self) -> usize {
        crate::vec::Vec::capacity(self)
    }
    fn reserve_total(&mut self, capacity: usize) -> Result<(), Error> {
        let additional = capacity.saturating_sub(crate::vec::Vec::len(self));
        Ok(self.try_reserve_exact(additional)?)
    }
    fn insert_at(&mut self, index: usize, value: T) -> Result<usize, Error> {
        check_index(index, crate::vec::Vec::len(self))?;
        self.try_insert(index, value)?;
        Ok(index)
    }
    fn insert_iter_at<I>(&mut self, index: usize, iter: I) -> Result<usize, Error>
    where
        I: Iterator<Item = T>,
    {
        check_index(index, crate::vec::Vec::len(self))?;
        Ok(self.try_insert_iter(index, iter)?)
    }
}

impl<T> SequenceContainer for std::vec::Vec<T> {
    type Value = T;
    const RANDOM_ACCESS: bool = true;
    const RESERVABLE: bool = true;

    fn len(&self) -> usize {
        std::vec::Vec::len(self)
    }
    fn max_size(&self) -> usize {
        max_elements::<T>()
    }
    fn capacity(&self) -> usize {
        std::vec::Vec::capacity(self)
    }
    fn reserve_total(&mut self, capacity: usize) -> Result<(), Error> {
        let additional = capacity.saturating_sub(std::vec::Vec::len(self));
        Ok(self.try_reserve_exact(additional)?)
    }
    fn insert_at(&mut self, index: usize, value: T) -> Result<usize, Error> {
        check_index(index, std::vec::Vec::len(self))?;
        self.try_reserve(1)?;
        self.insert(index, value);
        Ok(index)
    }
    fn insert_iter_at<I>(&mut self, index: usize, mut iter: I) -> Result<usize, Error>
    where
        I: Iterator<Item = T>,
    {
        check_index(index, std::vec::Vec::len(self))?;
        append_and_rotate(
            self,
            index,
            &mut iter,
            |v: &mut Self, value: T| -> Result<(), Error> {
                v.try_reserve(1)?;
                v.push(value);
                Ok(())
            },
            std::vec::Vec::as_mut_slice,
        )
    }
}

impl<T> SequenceContainer for VecDeque<T> {
    type Value = T;
    const RANDOM_ACCESS: bool = true;
    const RESERVABLE: bool = true;

    fn len(&self) -> usize {
        VecDeque::len(self)
    }
    fn max_size(&self) -> usize {
        max_elements::<T>()
    }
    fn capacity(&self) -> usize {
        VecDeque::capacity(self)
    }
    fn reserve_total(&mut self, capacity: usize) -> Result<(), Error> {
        let additional = capacity.saturating_sub(VecDeque::len(self));
        Ok(self.try_reserve_exact(additional)?)
    }
    fn insert_at(&mut self, index: usize, value: T) -> Result<usize, Error> {
        check_index(index, VecDeque::len(self))?;
        self.try_reserve(1)?;
        self.insert(index, value);
        Ok(index)
    }
    fn insert_iter_at<I>(&mut self, index: usize, mut iter: I) -> Result<usize, Error>
    where
        I: Iterator<Item = T>,
    {
        check_index(index, VecDeque::len(self))?;
        append_and_rotate(
            self,
            index,
            &mut iter,
            |d: &mut Self, value: T| -> Result<(), Error> {
                d.try_reserve(1)?;
                d.push_back(value);
                Ok(())
            },
            VecDeque::make_contiguous,
        )
    }
}

impl<T> SequenceContainer for LinkedList<T> {
    type Value = T;
    const RANDOM_ACCESS: bool = false;

    fn len(&self) -> usize {
        LinkedList::len(self)
    }
    fn max_size(&self) -> usize {
        usize::MAX
    }
    fn insert_at(&mut self, index: usize, value: T) -> Result<usize, Error> {
        check_index(index, LinkedList::len(self))?;
        let mut tail = self.split_off(index);
        self.push_back(value);
        self.append(&mut tail);
        Ok(index)
    }
    fn insert_iter_at<I>(&mut self, index: usize, iter: I) -> Result<usize, Error>
    where
        I: Iterator<Item = T>,
    {
        check_index(index, LinkedList::len(self))?;
        let mut tail = self.split_off(index);
        self.extend(iter);
        self.append(&mut tail);
        Ok(index)
    }
}

// Fixed capacity: random access, never reserves, fails once full.
impl<T, const CAP: usize> SequenceContainer for ArrayVec<T, CAP> {
    type Value = T;
    const RANDOM_ACCESS: bool = true;

    fn len(&self) -> usize {
        ArrayVec::len(self)
    }
    fn max_size(&self) -> usize {
        CAP
    }
    fn insert_at(&mut self, index: usize, value: T) -> Result<usize, Error> {
        let size = ArrayVec::len(self);
        check_index(index, size)?;
        self.try_insert(index, value)
            .map_err(|_| Error::CapacityExceeded {
                size,
                additional: 1,
                max_size: CAP,
            })?;
        Ok(index)
    }
    fn insert_iter_at<I>(&mut self, index: usize, mut iter: I) -> Result<usize, Error>
    where
        I: Iterator<Item = T>,
    {
        let size = ArrayVec::len(self);
        check_index(index, size)?;
        append_and_rotate(
            self,
            index,
            &mut iter,
            |a: &mut Self, value: T| a.try_push(value),
            ArrayVec::as_mut_slice,
        )
        .map_err(|_| {
            // Taken so far, the one that did not fit, and the rest of the request.
            let additional = ArrayVec::len(self) - size + 1 + iter.count();
            Error::CapacityExceeded {
                size,
                additional,
                max_size: CAP,
            }
        })
    }
}

impl<T: Ord> Insert for BTreeSet<T> {
    type Value = T;
    type Output = bool;

    fn insert_value(&mut self, value: T) -> Result<bool, Error> {
        Ok(self.insert(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn splice_twice<C>(mut c: C) -> C
    where
        C: SequenceContainer<Value = i32>,
    {
        assert_eq!(c.insert_iter_at(0, [1, 2, 3].into_iter()).unwrap(), 0);
        assert_eq!(c.insert_iter_at(1, [7, 8].into_iter()).unwrap(), 1);
        assert_eq!(c.insert_at(5, 9).unwrap(), 5);
        assert_eq!(c.insert_value(10).unwrap(), 6);
        assert!(matches!(
            c.insert_at(99, 0),
            Err(Error::PreconditionViolated(_))
        ));
        c
    }

    #[test]
    fn every_container_splices_alike() {
        let expect = [1, 7, 8, 2, 3, 9, 10];
        assert_eq!(splice_twice(std::vec::Vec::new()), expect);
        assert_eq!(&splice_twice(crate::vec::Vec::new())[..], &expect[..]);
        assert!(splice_twice(VecDeque::new()).iter().eq(expect.iter()));
        assert!(splice_twice(LinkedList::new()).iter().eq(expect.iter()));
        assert_eq!(&splice_twice(ArrayVec::<i32, 8>::new())[..], &expect[..]);
    }

    #[test]
    fn full_array_vec_keeps_partial_insert_in_place() {
        let mut a: ArrayVec<i32, 4> = ArrayVec::new();
        a.insert_iter_at(0, [1, 2].into_iter()).unwrap();
        let r = a.insert_iter_at(1, [5, 6, 7, 8].into_iter());
        assert!(matches!(
            r,
            Err(Error::CapacityExceeded {
                size: 2,
                additional: 4,
                max_size: 4
            })
        ));
        assert_eq!(&a[..], &[1, 5, 6, 2]);
        assert!(matches!(
            a.insert_at(0, 0),
            Err(Error::CapacityExceeded { size: 4, .. })
        ));
    }

    #[test]
    fn reservable_state() {
        let mut v: std::vec::Vec<u32> = std::vec::Vec::new();
        v.reserve_total(10).unwrap();
        let s = v.growth_state();
        assert_eq!(s.size, 0);
        assert!(s.capacity >= 10);
        assert_eq!(s.max_size, isize::MAX as usize / 4);
        let l: LinkedList<u32> = LinkedList::new();
        assert_eq!(l.capacity(), usize::MAX);
    }

    #[test]
    fn failed_append_still_rotates_into_place() {
        let mut d: VecDeque<i32> = [1, 2, 3].into_iter().collect();
        let mut items = [7, 8, 9, 10].into_iter();
        let r = append_and_rotate(
            &mut d,
            1,
            &mut items,
            |d: &mut VecDeque<i32>, value: i32| {
                if value == 9 {
                    return Err(Error::PreconditionViolated("full"));
                }
                d.push_back(value);
                Ok(())
            },
            VecDeque::make_contiguous,
        );
        assert!(matches!(r, Err(Error::PreconditionViolated("full"))));
        assert!(d.iter().eq([1, 7, 8, 2, 3].iter()));
        assert_eq!(items.next(), Some(10));

        let mut v = vec![1, 2];
        let push = |v: &mut std::vec::Vec<i32>, x: i32| -> Result<(), Error> {
            v.push(x);
            Ok(())
        };
        let r = append_and_rotate(
            &mut v,
            0,
            &mut [5, 6].into_iter(),
            push,
            std::vec::Vec::as_mut_slice,
        );
        assert_eq!(r.unwrap(), 0);
        assert_eq!(v, [5, 6, 1, 2]);
    }

    #[test]
    fn sized_inserts_reserve_geometrically() {
        let big: std::vec::Vec<u32> = (0..1024).collect();
        let bigger: std::vec::Vec<u32> = (0..2048).collect();

        let mut v: std::vec::Vec<u32> = std::vec::Vec::new();
        crate::action::insert_range(&mut v, 0, &big[..]).unwrap();
        assert_eq!(v.capacity(), 1024);
        crate::action::insert_range(&mut v, 42, &bigger[..]).unwrap();
        assert_eq!(v.capacity(), 3072);
        crate::action::insert_range(&mut v, 0, [7]).unwrap();
        assert_eq!(v.capacity(), 4608);
        assert_eq!((v[0], v[43], v[43 + 2048]), (7, 0, 42));

        let mut d: VecDeque<u32> = VecDeque::new();
        crate::action::insert_range(&mut d, 0, &big[..]).unwrap();
        assert_eq!(d.capacity(), 1024);
        crate::action::insert_range(&mut d, 42, &bigger[..]).unwrap();
        assert_eq!(d.capacity(), 3072);
        crate::action::insert_range(&mut d, 0, [7]).unwrap();
        assert_eq!(d.capacity(), 4608);
        assert_eq!((d[0], d[43], d[43 + 2048]), (7, 0, 42));
    }

    #[test]
    fn btree_set_reports_success_flag() {
        let mut s = BTreeSet::new();
        assert!(s.insert_value(3).unwrap());
        assert!(!s.insert_value(3).unwrap());
    }
}
