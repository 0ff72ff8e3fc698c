use crate::alloc::{Allocator, Global};
use crate::growth::{self, Geometric, GrowthState};
use crate::{TryReserveError, TryReserveErrorKind};

use std::{
    alloc::Layout,
    cmp, fmt,
    iter::FusedIterator,
    mem,
    ops::{Deref, DerefMut},
    ptr,
    ptr::NonNull,
    slice,
};

/// In debug mode or feature unsafe-optim not enabled, same as assert! otherwise does nothing.
#[cfg(any(debug_assertions, not(feature = "unsafe-optim")))]
macro_rules! safe_assert {
    ( $cond: expr ) => {
        assert!($cond)
    };
}

/// In debug mode or feature unsafe-optim not enabled, same as assert! otherwise does nothing.
#[cfg(all(not(debug_assertions), feature = "unsafe-optim"))]
macro_rules! safe_assert {
    ( $cond: expr ) => {
        if !$cond {
            unsafe { std::hint::unreachable_unchecked() }
        }
    };
}

/// A vector that grows as elements are pushed onto it similar to [`std::vec::Vec`].
///
/// Capacity grows through [`crate::growth`] with the [`Geometric`] policy, and every
/// growing method has a `try_` form that reports allocation failure instead of panicking.
pub struct Vec<T, A: Allocator = Global> {
    len: usize,
    resvd: usize,
    p: NonNull<T>,
    alloc: A,
}

impl<T> Vec<T> {
    /// Create a new Vec.
    ///
    /// # Example
    ///
    /// ```
    /// use pseq::vec::Vec;
    /// let mut v = Vec::new();
    /// v.push("England");
    /// v.push("France");
    /// assert!( v.len() == 2 );
    /// for s in &v { println!("s={}",s); }
    /// ```
    #[must_use]
    pub const fn new() -> Vec<T> {
        Self::new_in(Global)
    }

    /// Constructs a new, empty `Vec<T>` with at least the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Vec<T> {
        Self::with_capacity_in(capacity, Global)
    }
}

/// # Basic methods.
impl<T, A: Allocator> Vec<T, A> {
    /// Returns the number of elements.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the vector contains no elements.
    ///
    /// # Example
    ///
    /// ```
    /// use pseq::vec::Vec;
    /// let mut v = Vec::new();
    /// assert!(v.is_empty());
    ///
    /// v.push(1);
    /// assert!(!v.is_empty());
    /// ```
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Largest number of elements the vector can hold.
    pub const fn max_size(&self) -> usize {
        match mem::size_of::<T>() {
            0 => usize::MAX,
            n => isize::MAX as usize / n,
        }
    }

    /// Push a value onto the end of the vec.
    pub fn push(&mut self, value: T) {
        if let Err(e) = self.try_push(value) {
            reserve_failed(e);
        }
    }

    /// Push a value onto the end of the vec, or report why there was no room for it.
    pub fn try_push(&mut self, value: T) -> Result<(), TryReserveError> {
        if self.resvd == self.len {
            self.try_grow(1)?;
        }
        unsafe {
            self.set(self.len, value);
        }
        self.len += 1;
        Ok(())
    }

    /// Pop a value from the end of the vec.
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            None
        } else {
            self.len -= 1;
            unsafe { Some(self.get(self.len)) }
        }
    }

    /// Insert value at index, after moving elements up to make a space.
    /// # Panics
    ///
    /// Panics if `index` > len(), or if the vector cannot grow.
    ///
    pub fn insert(&mut self, index: usize, value: T) {
        if let Err(e) = self.try_insert(index, value) {
            reserve_failed(e);
        }
    }

    /// Insert value at index, or report why there was no room for it.
    /// # Panics
    ///
    /// Panics if `index` > len().
    pub fn try_insert(&mut self, index: usize, value: T) -> Result<(), TryReserveError> {
        safe_assert!(index <= self.len);
        if self.resvd == self.len {
            self.try_grow(1)?;
        }
        unsafe {
            if index < self.len {
                ptr::copy(self.ixp(index), self.ixp(index + 1), self.len - index);
            }
            self.set(index, value);
        }
        self.len += 1;
        Ok(())
    }

    /// Insert the items of `iter` at `index`, in order. Returns `index`.
    /// # Panics
    ///
    /// Panics if `index` > len(), or if the vector cannot grow.
    pub fn insert_iter<I>(&mut self, index: usize, iter: I) -> usize
    where
        I: IntoIterator<Item = T>,
    {
        match self.try_insert_iter(index, iter) {
            Ok(index) => index,
            Err(e) => reserve_failed(e),
        }
    }

    /// Insert the items of `iter` at `index`, in order. Returns `index`.
    ///
    /// If the vector cannot grow part way through, the items taken so far stay in place at
    /// `index` and the error is returned.
    /// # Panics
    ///
    /// Panics if `index` > len().
    pub fn try_insert_iter<I>(&mut self, index: usize, iter: I) -> Result<usize, TryReserveError>
    where
        I: IntoIterator<Item = T>,
    {
        safe_assert!(index <= self.len);
        let old_len = self.len;
        let mut result = Ok(index);
        for value in iter {
            if let Err(e) = self.try_push(value) {
                result = Err(e);
                break;
            }
        }
        self[index..].rotate_left(old_len - index);
        result
    }

    /// Remove the value at index, elements are moved down to fill the space.
    /// # Panics
    ///
    /// Panics if `index` >= len().
    ///
    pub fn remove(&mut self, index: usize) -> T {
        safe_assert!(index < self.len);
        unsafe {
            let result = self.get(index);
            ptr::copy(self.ixp(index + 1), self.ixp(index), self.len() - index - 1);
            self.len -= 1;
            result
        }
    }

    /// Clears the vector, removing all values.
    ///
    /// This method has no effect on the allocated capacity of the vector.
    ///
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Shortens the vector, keeping the first `len` elements and dropping
    /// the rest.
    ///
    /// If `len` is greater or equal to the vector's current length, this has
    /// no effect.
    pub fn truncate(&mut self, len: usize) {
        while self.len > len {
            self.pop();
        }
    }

    // ##########################################################################
    // Private methods ##########################################################
    // ##########################################################################

    /// Get pointer to ith element.
    /// # Safety
    ///
    /// ix must be <= alloc.
    #[inline]
    unsafe fn ixp(&self, i: usize) -> *mut T {
        unsafe { self.p.as_ptr().add(i) }
    }

    /// Get ith value.
    /// # Safety
    ///
    /// i must be < alloc, and the element must have been set (Written).
    #[inline]
    unsafe fn get(&mut self, i: usize) -> T {
        unsafe { ptr::read(self.ixp(i)) }
    }

    /// Set ith value.
    /// # Safety
    ///
    /// i must be < alloc, and the element must be unset.
    #[inline]
    unsafe fn set(&mut self, i: usize, elem: T) {
        unsafe {
            ptr::write(self.ixp(i), elem);
        }
    }

    fn growth_state(&self) -> GrowthState {
        GrowthState {
            size: self.len,
            capacity: self.resvd,
            max_size: self.max_size(),
        }
    }

    /// Make room for `additional` more elements, growing geometrically.
    fn try_grow(&mut self, additional: usize) -> Result<(), TryReserveError> {
        match growth::plan(self.growth_state(), additional, &Geometric) {
            Ok(Some(na)) => self.try_set_capacity(na),
            Ok(None) => Ok(()),
            Err(_) => Err(TryReserveErrorKind::CapacityOverflow.into()),
        }
    }

    /// Set the allocation. This must be at least the current length.
    fn try_set_capacity(&mut self, na: usize) -> Result<(), TryReserveError> {
        safe_assert!(na >= self.len);
        if na == self.resvd {
            return Ok(());
        }
        if mem::size_of::<T>() == 0 {
            self.resvd = na;
            return Ok(());
        }
        if na == 0 {
            unsafe { self.free() };
            return Ok(());
        }
        let new_layout =
            Layout::array::<T>(na).map_err(|_| TryReserveErrorKind::CapacityOverflow)?;
        let new_ptr = unsafe {
            if self.resvd == 0 {
                self.alloc.allocate(new_layout)
            } else {
                // The current layout was valid when it was allocated.
                let old_layout = Layout::array::<T>(self.resvd)
                    .map_err(|_| TryReserveErrorKind::CapacityOverflow)?;
                let old_ptr = self.p.cast::<u8>();
                if new_layout.size() > old_layout.size() {
                    self.alloc.grow(old_ptr, old_layout, new_layout)
                } else {
                    self.alloc.shrink(old_ptr, old_layout, new_layout)
                }
            }
        }
        .map_err(|_| TryReserveErrorKind::AllocError { layout: new_layout })?;
        self.p = new_ptr.cast::<T>();
        self.resvd = na;
        Ok(())
    }

    /// Release the allocation.
    /// # Safety
    ///
    /// All elements must already have been dropped or moved out.
    unsafe fn free(&mut self) {
        if self.resvd != 0 && mem::size_of::<T>() != 0 {
            if let Ok(layout) = Layout::array::<T>(self.resvd) {
                self.alloc.deallocate(self.p.cast::<u8>(), layout);
            }
        }
        self.p = NonNull::dangling();
        self.resvd = 0;
    }
}

#[cold]
fn reserve_failed(e: TryReserveError) -> ! {
    match e.kind() {
        TryReserveErrorKind::AllocError { layout } => std::alloc::handle_alloc_error(layout),
        TryReserveErrorKind::CapacityOverflow => panic!("capacity overflow"),
    }
}

/// # Allocation methods.
/// These are used to adjust the vector capacity and allocator.
impl<T, A: Allocator> Vec<T, A> {
    /// Create a new Vec in specified allocator.
    #[must_use]
    pub const fn new_in(alloc: A) -> Vec<T, A> {
        Self {
            len: 0,
            resvd: 0,
            alloc,
            p: NonNull::dangling(),
        }
    }

    /// Returns a reference to the underlying allocator.
    pub fn allocator(&self) -> &A {
        &self.alloc
    }

    /// Returns the current capacity.
    pub const fn capacity(&self) -> usize {
        self.resvd
    }

    /// Constructs a new, empty `Vec<T, A>` with at least the specified capacity
    /// with the provided allocator.
    pub fn with_capacity_in(capacity: usize, alloc: A) -> Self {
        let mut v = Self::new_in(alloc);
        v.reserve_exact(capacity);
        v
    }

    /// Reserves capacity for at least `additional` more elements to be inserted
    /// in the given `Vec<T>`. Grows geometrically, so repeated calls are amortized.
    pub fn reserve(&mut self, additional: usize) {
        if let Err(e) = self.try_reserve(additional) {
            reserve_failed(e);
        }
    }

    /// Reserves minimum capacity for at least `additional` more elements to be inserted
    /// in the given `Vec<T>`.
    pub fn reserve_exact(&mut self, additional: usize) {
        if let Err(e) = self.try_reserve_exact(additional) {
            reserve_failed(e);
        }
    }

    /// Like [`Vec::reserve`], but reports failure.
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), TryReserveError> {
        self.try_grow(additional)
    }

    /// Like [`Vec::reserve_exact`], but reports failure.
    pub fn try_reserve_exact(&mut self, additional: usize) -> Result<(), TryReserveError> {
        let capacity = self
            .len
            .checked_add(additional)
            .filter(|&c| c <= self.max_size())
            .ok_or(TryReserveErrorKind::CapacityOverflow)?;
        if capacity > self.resvd {
            self.try_set_capacity(capacity)?;
        }
        Ok(())
    }

    /// Trim excess storage allocation.
    pub fn shrink_to_fit(&mut self) {
        self.shrink_to(self.len);
    }

    /// Trim excess capacity to specified value.
    pub fn shrink_to(&mut self, capacity: usize) {
        if self.resvd > capacity {
            // Shrinking only fails if the allocator does; keeping the larger block is fine.
            let _ = self.try_set_capacity(cmp::max(self.len, capacity));
        }
    }
}

unsafe impl<T: Send> Send for Vec<T> {}
unsafe impl<T: Sync> Sync for Vec<T> {}

impl<T, A: Allocator> Deref for Vec<T, A> {
    type Target = [T];
    fn deref(&self) -> &[T] {
        unsafe { std::slice::from_raw_parts(self.p.as_ptr(), self.len) }
    }
}

impl<T, A: Allocator> DerefMut for Vec<T, A> {
    fn deref_mut(&mut self) -> &mut [T] {
        unsafe { std::slice::from_raw_parts_mut(self.p.as_ptr(), self.len) }
    }
}

impl<'a, T: 'a, A: Allocator> IntoIterator for &'a Vec<T, A> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T: 'a, A: Allocator> IntoIterator for &'a mut Vec<T, A> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T, A: Allocator> IntoIterator for Vec<T, A> {
    type Item = T;
    type IntoIter = IntoIter<T, A>;
    fn into_iter(self) -> Self::IntoIter {
        IntoIter { start: 0, v: self }
    }
}

impl<T, A: Allocator> Drop for Vec<T, A> {
    fn drop(&mut self) {
        self.clear();
        unsafe { self.free() };
    }
}

impl<T> Default for Vec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for Vec<T> {
    fn clone(&self) -> Self {
        let mut v = Vec::with_capacity(self.len);
        for e in self.iter() {
            v.push(e.clone());
        }
        v
    }
}

impl<T: PartialEq, A: Allocator> PartialEq for Vec<T, A> {
    fn eq(&self, other: &Self) -> bool {
        **self == **other
    }
}

impl<T: Eq, A: Allocator> Eq for Vec<T, A> {}

impl<T, A: Allocator> fmt::Debug for Vec<T, A>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(&**self, f)
    }
}

impl<T, A: Allocator> Extend<T> for Vec<T, A> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let len = self.len;
        self.insert_iter(len, iter);
    }
}

impl<T> FromIterator<T> for Vec<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut v = Vec::with_capacity(iter.size_hint().0);
        v.extend(iter);
        v
    }
}

/// Consuming iterator for [`Vec`].
#[derive(Debug)]
pub struct IntoIter<T, A: Allocator = Global> {
    start: usize,
    v: Vec<T, A>,
}

impl<T, A: Allocator> Iterator for IntoIter<T, A> {
    type Item = T;
    fn next(&mut self) -> Option<T> {
        if self.start == self.v.len() {
            self.start = 0;
            self.v.len = 0;
            None
        } else {
            let ix = self.start;
            self.start += 1;
            Some(unsafe { self.v.get(ix) })
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.v.len() - self.start;
        (n, Some(n))
    }
}

impl<T, A: Allocator> ExactSizeIterator for IntoIter<T, A> {}

impl<T, A: Allocator> DoubleEndedIterator for IntoIter<T, A> {
    fn next_back(&mut self) -> Option<T> {
        if self.start == self.v.len() {
            self.start = 0;
            self.v.len = 0;
            None
        } else {
            self.v.len -= 1;
            Some(unsafe { self.v.get(self.v.len()) })
        }
    }
}

impl<T, A: Allocator> FusedIterator for IntoIter<T, A> {}

impl<T, A: Allocator> Drop for IntoIter<T, A> {
    fn drop(&mut self) {
        while self.next().is_some() {}
    }
}

impl<T: Clone> From<&[T]> for Vec<T> {
    /// Allocates a `Vec<T>` and fills it by cloning `s`'s items.
    fn from(s: &[T]) -> Vec<T> {
        s.iter().cloned().collect()
    }
}

#[cfg(feature = "serde")]
use serde::{
    de::{SeqAccess, Visitor},
    ser::SerializeSeq,
    Deserialize, Deserializer, Serialize, Serializer,
};

#[cfg(feature = "serde")]
impl<T: Serialize, A: Allocator> Serialize for Vec<T, A> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for e in self.iter() {
            seq.serialize_element(e)?;
        }
        seq.end()
    }
}

#[cfg(feature = "serde")]
struct VecVisitor<T> {
    marker: std::marker::PhantomData<fn() -> Vec<T>>,
}

#[cfg(feature = "serde")]
impl<'de, T: Deserialize<'de>> Visitor<'de> for VecVisitor<T> {
    type Value = Vec<T>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a sequence")
    }

    fn visit_seq<S>(self, mut access: S) -> Result<Self::Value, S::Error>
    where
        S: SeqAccess<'de>,
    {
        // Untrusted size hints are capped.
        let mut v = Vec::with_capacity(access.size_hint().unwrap_or(0).min(4096));
        while let Some(e) = access.next_element()? {
            v.push(e);
        }
        Ok(v)
    }
}

#[cfg(feature = "serde")]
impl<'de, T: Deserialize<'de>> Deserialize<'de> for Vec<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_seq(VecVisitor {
            marker: std::marker::PhantomData,
        })
    }
}

#[test]
fn test() {
    let mut v = Vec::new();
    v.push(99);
    v.push(314);
    println!("v={:?}", &v);
    assert!(v[0] == 99);
    assert!(v[1] == 314);
    assert!(v.len() == 2);
    v[1] = 316;
    assert!(v[1] == 316);
    for x in &mut v {
        *x += 1;
    }
    assert_eq!(v.remove(0), 100);
    assert_eq!(v.pop(), Some(317));
    assert_eq!(v.pop(), None);
}

#[test]
fn push_grows_by_half() {
    let mut v = Vec::new();
    let mut caps = std::vec::Vec::new();
    for i in 0..20 {
        v.push(i);
        if caps.last() != Some(&v.capacity()) {
            caps.push(v.capacity());
        }
    }
    assert_eq!(caps, [1, 2, 3, 4, 6, 9, 13, 19, 28]);
}

#[test]
fn insert_iter_splices() {
    let mut v: Vec<i32> = Vec::from(&[0, 1, 2, 42][..]);
    assert_eq!(v.insert_iter(3, [9, 8, 7]), 3);
    assert_eq!(&v[..], &[0, 1, 2, 9, 8, 7, 42]);
    v.extend(0..2);
    assert_eq!(&v[..], &[0, 1, 2, 9, 8, 7, 42, 0, 1]);
    let w = v.clone();
    assert_eq!(v, w);
    let back: std::vec::Vec<i32> = w.into_iter().rev().collect();
    assert_eq!(back, [1, 0, 42, 7, 8, 9, 2, 1, 0]);
}

#[test]
fn reserve_exact_and_shrink() {
    let mut v: Vec<u8> = Vec::with_capacity(10);
    assert_eq!(v.capacity(), 10);
    v.push(1);
    v.reserve_exact(20);
    assert_eq!(v.capacity(), 21);
    v.shrink_to_fit();
    assert_eq!(v.capacity(), 1);
    assert!(matches!(
        v.try_reserve_exact(usize::MAX).map_err(|e| e.kind()),
        Err(TryReserveErrorKind::CapacityOverflow)
    ));
}

#[test]
fn budget_failure_keeps_contents() {
    use crate::alloc::Budget;
    let mut v: Vec<u32, Budget> = Vec::new_in(Budget::new(16));
    v.try_reserve_exact(4).unwrap();
    assert_eq!(v.allocator().remaining(), 0);
    for i in 0..4 {
        v.try_push(i).unwrap();
    }
    assert!(matches!(
        v.try_push(4).map_err(|e| e.kind()),
        Err(TryReserveErrorKind::AllocError { .. })
    ));
    assert_eq!(&v[..], &[0, 1, 2, 3]);
    drop(v);
}

#[test]
fn vectors_share_one_budget() {
    use crate::alloc::Budget;
    let budget = Budget::new(64);
    let mut a: Vec<u32, &Budget> = Vec::new_in(&budget);
    let mut b: Vec<u32, &Budget> = Vec::new_in(&budget);
    a.try_reserve_exact(8).unwrap();
    crate::action::insert_range(&mut b, 0, 0..8u32).unwrap();
    assert_eq!(b.capacity(), 8);
    assert_eq!(budget.remaining(), 0);
    assert!(a.try_reserve_exact(9).is_err());
    assert!(crate::action::insert_range(&mut b, 8, [8]).is_err());
    assert_eq!(a.capacity(), 8);
    assert_eq!(&b[..], &[0, 1, 2, 3, 4, 5, 6, 7]);
    drop(a);
    assert_eq!(budget.remaining(), 32);
    drop(b);
    assert_eq!(budget.remaining(), 64);
}

#[test]
fn zero_sized_elements() {
    let mut v = Vec::new();
    for _ in 0..1000 {
        v.push(());
    }
    assert_eq!(v.len(), 1000);
    assert_eq!(v.max_size(), usize::MAX);
}
