use std::alloc::Layout;
use std::cell::Cell;
use std::error::Error;
use std::fmt;
use std::ptr;
use std::ptr::NonNull;

/// The `AllocError` error indicates an allocation failure
/// that may be due to resource exhaustion or to
/// something wrong when combining the given input arguments with this
/// allocator.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct AllocError;

impl Error for AllocError {}

impl fmt::Display for AllocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("memory allocation failed")
    }
}

/// Memory allocation used by [`crate::vec::Vec`].
///
/// # Safety
///
/// Memory returned by `allocate` or `grow` must stay valid, and must not be handed out again,
/// until it is passed to `deallocate`, `grow` or `shrink`.
pub unsafe trait Allocator {
    /// Attempts to allocate a block of memory.
    fn allocate(&self, layout: Layout) -> Result<NonNull<[u8]>, AllocError>;

    /// Deallocates the memory referenced by `ptr`.
    /// # Safety
    ///
    /// `ptr` must have been returned by this allocator with the given `layout`.
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout);

    /// Attempts to extend the memory block. On failure the old block is left untouched.
    /// # Safety
    ///
    /// `ptr` must have been returned by this allocator with `old_layout`, and
    /// `new_layout.size()` must be at least `old_layout.size()`.
    unsafe fn grow(
        &self,
        ptr: NonNull<u8>,
        old_layout: Layout,
        new_layout: Layout,
    ) -> Result<NonNull<[u8]>, AllocError> {
        debug_assert!(
            new_layout.size() >= old_layout.size(),
            "`new_layout.size()` must be greater than or equal to `old_layout.size()`"
        );

        let new_ptr = self.allocate(new_layout)?;
        ptr::copy_nonoverlapping(
            ptr.as_ptr(),
            new_ptr.as_ptr().cast::<u8>(),
            old_layout.size(),
        );
        self.deallocate(ptr, old_layout);
        Ok(new_ptr)
    }

    /// Attempts to shrink the memory block.
    /// # Safety
    ///
    /// `ptr` must have been returned by this allocator with `old_layout`, and
    /// `new_layout.size()` must not exceed `old_layout.size()`.
    unsafe fn shrink(
        &self,
        ptr: NonNull<u8>,
        old_layout: Layout,
        new_layout: Layout,
    ) -> Result<NonNull<[u8]>, AllocError> {
        debug_assert!(
            new_layout.size() <= old_layout.size(),
            "`new_layout.size()` must be smaller than or equal to `old_layout.size()`"
        );

        let new_ptr = self.allocate(new_layout)?;
        ptr::copy_nonoverlapping(
            ptr.as_ptr(),
            new_ptr.as_ptr().cast::<u8>(),
            new_layout.size(),
        );
        self.deallocate(ptr, old_layout);
        Ok(new_ptr)
    }
}

unsafe impl<A> Allocator for &A
where
    A: Allocator + ?Sized,
{
    #[inline]
    fn allocate(&self, layout: Layout) -> Result<NonNull<[u8]>, AllocError> {
        (**self).allocate(layout)
    }

    #[inline]
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        // SAFETY: the safety contract must be upheld by the caller
        unsafe { (**self).deallocate(ptr, layout) }
    }

    #[inline]
    unsafe fn grow(
        &self,
        ptr: NonNull<u8>,
        old_layout: Layout,
        new_layout: Layout,
    ) -> Result<NonNull<[u8]>, AllocError> {
        // SAFETY: the safety contract must be upheld by the caller
        unsafe { (**self).grow(ptr, old_layout, new_layout) }
    }

    #[inline]
    unsafe fn shrink(
        &self,
        ptr: NonNull<u8>,
        old_layout: Layout,
        new_layout: Layout,
    ) -> Result<NonNull<[u8]>, AllocError> {
        // SAFETY: the safety contract must be upheld by the caller
        unsafe { (**self).shrink(ptr, old_layout, new_layout) }
    }
}

/// Default implementation of Allocator.
#[derive(Clone, Copy, Debug, Default)]
pub struct Global;

unsafe impl Allocator for Global {
    fn allocate(&self, layout: Layout) -> Result<NonNull<[u8]>, AllocError> {
        match layout.size() {
            0 => Ok(NonNull::slice_from_raw_parts(NonNull::dangling(), 0)),
            size => unsafe {
                let raw_ptr = std::alloc::alloc(layout);
                let ptr = NonNull::new(raw_ptr).ok_or(AllocError)?;
                Ok(NonNull::slice_from_raw_parts(ptr, size))
            },
        }
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        if layout.size() != 0 {
            std::alloc::dealloc(ptr.as_ptr(), layout);
        }
    }
}

/// Allocator that refuses any request which would take the bytes it has handed out
/// past a fixed budget.
///
/// Useful for exercising the allocation failure paths of containers. Several containers can
/// draw on one budget through `&Budget`, since a reference to an allocator is an allocator.
///
/// # Example
///
/// ```
/// use pseq::{alloc::Budget, vec::Vec};
/// let mut v: Vec<u64, Budget> = Vec::new_in(Budget::new(64));
/// assert!(v.try_reserve_exact(8).is_ok());
/// assert!(v.try_reserve_exact(9).is_err());
///
/// let shared = Budget::new(64);
/// let mut a: Vec<u64, &Budget> = Vec::new_in(&shared);
/// let mut b: Vec<u64, &Budget> = Vec::new_in(&shared);
/// assert!(a.try_reserve_exact(4).is_ok());
/// assert!(b.try_reserve_exact(5).is_err());
/// assert_eq!(shared.remaining(), 32);
/// ```
pub struct Budget<A: Allocator = Global> {
    remaining: Cell<usize>,
    inner: A,
}

impl Budget {
    /// Budget of `bytes` on top of the global allocator.
    pub fn new(bytes: usize) -> Self {
        Self::new_in(bytes, Global)
    }
}

impl<A: Allocator> Budget<A> {
    /// Budget of `bytes` on top of `inner`.
    pub fn new_in(bytes: usize, inner: A) -> Self {
        Self {
            remaining: Cell::new(bytes),
            inner,
        }
    }

    /// Bytes that can still be allocated.
    pub fn remaining(&self) -> usize {
        self.remaining.get()
    }

    fn take(&self, bytes: usize) -> Result<(), AllocError> {
        let left = self.remaining.get().checked_sub(bytes).ok_or(AllocError)?;
        self.remaining.set(left);
        Ok(())
    }

    fn give_back(&self, bytes: usize) {
        self.remaining.set(self.remaining.get() + bytes);
    }
}

unsafe impl<A: Allocator> Allocator for Budget<A> {
    fn allocate(&self, layout: Layout) -> Result<NonNull<[u8]>, AllocError> {
        self.take(layout.size())?;
        self.inner.allocate(layout).map_err(|e| {
            self.give_back(layout.size());
            e
        })
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        self.inner.deallocate(ptr, layout);
        self.give_back(layout.size());
    }
}
