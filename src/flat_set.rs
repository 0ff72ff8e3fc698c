//! A set kept as a sorted [`Vec`] of unique elements.
//!
//! Lookups and insertion points are found with [`crate::search::equal_range_in`], so a
//! membership test and the position of a new element come from the same search.

use std::borrow::Borrow;
use std::fmt;

use crate::container::Insert;
use crate::search::{equal_range_in, equal_range_in_by, less};
use crate::vec::Vec;
use crate::{Error, TryReserveError};

/// Sorted set of unique values, stored contiguously.
///
/// # Example
///
/// ```
/// use pseq::flat_set::FlatSet;
/// let mut s: FlatSet<i32> = (0..10).map(|i| i / 2 * 2).collect();
/// assert_eq!(s.as_slice(), &[0, 2, 4, 6, 8]);
/// assert_eq!(s.insert(10), (5, true));
/// assert_eq!(s.insert(4), (2, false));
/// ```
#[derive(Clone)]
pub struct FlatSet<T> {
    elems: Vec<T>,
}

impl<T> Default for FlatSet<T> {
    fn default() -> Self {
        Self { elems: Vec::new() }
    }
}

impl<T: Ord> FlatSet<T> {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.elems.len()
    }

    /// `true` if the set holds no elements.
    pub fn is_empty(&self) -> bool {
        self.elems.is_empty()
    }

    /// Elements in ascending order.
    pub fn as_slice(&self) -> &[T] {
        &self.elems
    }

    /// Iterate in ascending order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.elems.iter()
    }

    /// Index of the element equal to `value`, or where it would be inserted.
    pub fn position<Q>(&self, value: &Q) -> Result<usize, usize>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let r = equal_range_in_by(&self.elems[..], value, less, borrowed::<T, Q>);
        let range = r.indices();
        if range.is_empty() {
            Err(range.start)
        } else {
            Ok(range.start)
        }
    }

    /// `true` if an element equal to `value` is present.
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.position(value).is_ok()
    }

    /// Reference to the element equal to `value`.
    pub fn get<Q>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.position(value).ok().map(|i| &self.elems[i])
    }

    /// Insert `value` unless an equal element is present.
    ///
    /// Returns the index of the element equal to `value` and whether it was inserted.
    pub fn insert(&mut self, value: T) -> (usize, bool) {
        let r = equal_range_in(&self.elems, &value).indices();
        if r.is_empty() {
            self.elems.insert(r.start, value);
            (r.start, true)
        } else {
            (r.start, false)
        }
    }

    /// Like [`FlatSet::insert`], but reports allocation failure.
    pub fn try_insert(&mut self, value: T) -> Result<(usize, bool), TryReserveError> {
        let r = equal_range_in(&self.elems, &value).indices();
        if r.is_empty() {
            self.elems.try_insert(r.start, value)?;
            Ok((r.start, true))
        } else {
            Ok((r.start, false))
        }
    }

    /// Remove the element equal to `value`, returning it.
    pub fn remove<Q>(&mut self, value: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        match self.position(value) {
            Ok(i) => Some(self.elems.remove(i)),
            Err(_) => None,
        }
    }
}

fn borrowed<T: Borrow<Q>, Q: ?Sized>(t: &T) -> &Q {
    t.borrow()
}

impl<T: Ord> Insert for FlatSet<T> {
    type Value = T;
    type Output = (usize, bool);

    fn insert_value(&mut self, value: T) -> Result<(usize, bool), Error> {
        Ok(self.try_insert(value)?)
    }
}

impl<T: Ord> FromIterator<T> for FlatSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut s = FlatSet::new();
        for e in iter {
            s.insert(e);
        }
        s
    }
}

impl<T: Ord> Extend<T> for FlatSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for e in iter {
            self.insert(e);
        }
    }
}

impl<'a, T> IntoIterator for &'a FlatSet<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.elems.iter()
    }
}

impl<T: PartialEq> PartialEq for FlatSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.elems == other.elems
    }
}

impl<T: Eq> Eq for FlatSet<T> {}

impl<T: fmt::Debug> fmt::Debug for FlatSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.elems.iter()).finish()
    }
}

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[cfg(feature = "serde")]
impl<T: Serialize> Serialize for FlatSet<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.elems.serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de, T: Deserialize<'de> + Ord> Deserialize<'de> for FlatSet<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Input is not trusted to be sorted or unique.
        let elems: Vec<T> = Vec::deserialize(deserializer)?;
        Ok(elems.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_reports_position_and_flag() {
        let mut s = FlatSet::new();
        assert_eq!(s.insert(5), (0, true));
        assert_eq!(s.insert(1), (0, true));
        assert_eq!(s.insert(3), (1, true));
        assert_eq!(s.insert(3), (1, false));
        assert_eq!(s.insert(9), (3, true));
        assert_eq!(s.as_slice(), &[1, 3, 5, 9]);
    }

    #[test]
    fn lookup_by_borrowed_key() {
        let s: FlatSet<String> = ["pear", "apple", "fig", "apple"]
            .iter()
            .map(|x| x.to_string())
            .collect();
        assert_eq!(s.len(), 3);
        assert!(s.contains("fig"));
        assert!(!s.contains("kiwi"));
        assert_eq!(s.position("kiwi"), Err(2));
        assert_eq!(s.get("pear").map(|x| x.as_str()), Some("pear"));
    }

    #[test]
    fn remove_and_insert_value() {
        let mut s: FlatSet<u8> = [4, 2, 8].into_iter().collect();
        assert_eq!(s.remove(&2), Some(2));
        assert_eq!(s.remove(&2), None);
        assert_eq!(s.insert_value(6).unwrap(), (1, true));
        assert_eq!(s.insert_value(6).unwrap(), (1, false));
        assert_eq!(format!("{:?}", s), "{4, 6, 8}");
    }
}
