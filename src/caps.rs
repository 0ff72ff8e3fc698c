//! Compile-time capability queries.
//!
//! Each answer is an associated constant of the relevant trait, so a branch on it is resolved
//! when the generic code is instantiated and costs nothing at run time.

use crate::container::SequenceContainer;
use crate::cursor::Cursor;
use crate::sequence::Sequence;

/// Can cursors of type `C` jump and measure distances in O(1)?
pub const fn supports_random_access<C: Cursor>() -> bool {
    C::RANDOM_ACCESS
}

/// Can sequences of type `S` report their size in O(1)?
pub const fn supports_o1_size<S: Sequence>() -> bool {
    S::SIZED
}

/// Can containers of type `T` reserve capacity ahead of an insertion?
pub const fn supports_reservation<T: SequenceContainer + ?Sized>() -> bool {
    T::RESERVABLE
}

/// Does an insertion of known size into `T` go through the growth planner?
pub const fn plans_growth<T: SequenceContainer + ?Sized>() -> bool {
    T::RANDOM_ACCESS && T::RESERVABLE
}
