#![deny(missing_docs)]

//! Sequence algorithms over cursors, in particular [`search::equal_range`] and growth-planned
//! range insertion ([`action::insert_range`]) into containers such as [`vec::Vec`],
//! [`std::vec::Vec`], [`std::collections::VecDeque`], [`std::collections::LinkedList`],
//! [`arrayvec::ArrayVec`] and [`flat_set::FlatSet`].
//!
//! Which algorithm runs is decided by what the cursors, sequences and containers can do
//! (see [`caps`]), at compile time.

//!# Features
//!
//! This crate supports the following cargo features:
//! - `serde` : enables serialisation of [`vec::Vec`] and [`flat_set::FlatSet`] via serde crate.
//! - `unsafe-optim` : Enable unsafe optimisations in release mode.
//! - `cap` : Count memory allocated by tests.

pub mod action;

/// Memory allocation.
pub mod alloc;

pub mod caps;

pub mod container;

/// Cursors, cursor pairs and counted ranges.
pub mod cursor;

pub mod flat_set;

pub mod growth;

pub mod search;

/// Sequences: anything that hands out a pair of cursors.
pub mod sequence;

pub mod source;

/// [`vec::Vec`] similar to [`std::vec::Vec`], growing through [`growth`].
pub mod vec;

mod error;
pub use error::{Error, TryReserveError, TryReserveErrorKind};

// Tests.

#[cfg(all(test, not(miri), feature = "cap"))]
#[global_allocator]
static ALLOCATOR: cap::Cap<std::alloc::System> =
    cap::Cap::new(std::alloc::System, usize::MAX);

#[cfg(test)]
fn print_memory() {
    #[cfg(all(test, not(miri), feature = "cap"))]
    println!("Memory allocated: {} bytes", ALLOCATOR.allocated());
}

/* mimalloc cannot be used with miri */
#[cfg(all(test, not(miri), not(feature = "cap")))]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[cfg(test)]
mod mytests;
