//! Capacity planning for insertions into growable containers.
//!
//! The planner reads a container's [`GrowthState`], decides whether the insertion fits, and if
//! not asks the container for exactly one reservation, sized by a [`GrowthPolicy`].
//!
//! ```
//! use pseq::growth::{plan, Geometric, GrowthState};
//! let state = GrowthState { size: 10, capacity: 10, max_size: 1000 };
//! assert_eq!(plan(state, 1, &Geometric).unwrap(), Some(15));
//! assert_eq!(plan(state, 20, &Geometric).unwrap(), Some(30));
//! ```

use tracing::{debug, trace};

use crate::container::SequenceContainer;
use crate::Error;

/// Size bookkeeping of a container, as observed just before an insertion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GrowthState {
    /// Number of elements held.
    pub size: usize,
    /// Number of elements that fit without reallocating.
    pub capacity: usize,
    /// Largest number of elements the container can hold.
    pub max_size: usize,
}

/// Decides the new capacity when a container has to grow.
pub trait GrowthPolicy {
    /// Capacity to reserve when `old_capacity` cannot hold `new_size` elements.
    ///
    /// Called only with `old_capacity < new_size <= max_size`. The planner clamps the answer
    /// to `new_size..=max_size`.
    fn grow(&self, old_capacity: usize, new_size: usize, max_size: usize) -> usize;
}

/// Grow by half the old capacity, or straight to `max_size` once past two thirds of it.
#[derive(Clone, Copy, Debug, Default)]
pub struct Geometric;

impl GrowthPolicy for Geometric {
    fn grow(&self, old_capacity: usize, new_size: usize, max_size: usize) -> usize {
        // old + old / 2 cannot overflow below this point.
        if old_capacity <= max_size / 3 * 2 {
            (old_capacity + old_capacity / 2).max(new_size)
        } else {
            max_size
        }
    }
}

/// Double the capacity, starting from 4.
#[derive(Clone, Copy, Debug, Default)]
pub struct Doubling;

impl GrowthPolicy for Doubling {
    fn grow(&self, old_capacity: usize, new_size: usize, max_size: usize) -> usize {
        let doubled = if old_capacity == 0 {
            4
        } else {
            old_capacity.saturating_mul(2)
        };
        doubled.min(max_size).max(new_size)
    }
}

/// Fail with [`Error::CapacityExceeded`] unless `additional` more elements fit under `max_size`.
/// Returns the size after the insertion.
pub fn check_fits(state: GrowthState, additional: usize) -> Result<usize, Error> {
    match state.size.checked_add(additional) {
        Some(new_size) if new_size <= state.max_size => Ok(new_size),
        _ => {
            debug!(
                size = state.size,
                additional,
                max_size = state.max_size,
                "insertion exceeds maximum size"
            );
            Err(Error::CapacityExceeded {
                size: state.size,
                additional,
                max_size: state.max_size,
            })
        }
    }
}

/// Capacity to reserve before inserting `additional` elements, or `None` if they already fit.
pub fn plan<P>(state: GrowthState, additional: usize, policy: &P) -> Result<Option<usize>, Error>
where
    P: GrowthPolicy + ?Sized,
{
    let new_size = check_fits(state, additional)?;
    if state.capacity >= new_size {
        return Ok(None);
    }
    let capacity = policy
        .grow(state.capacity, new_size, state.max_size)
        .clamp(new_size, state.max_size);
    Ok(Some(capacity))
}

/// Make room in `target` for `additional` elements about to be inserted at `index`.
///
/// Issues at most one reservation. Returns the insertion index, recomputed from the start of
/// the target after any reallocation.
pub fn reserve_for_insert<C, P>(
    target: &mut C,
    index: usize,
    additional: usize,
    policy: &P,
) -> Result<usize, Error>
where
    C: SequenceContainer + ?Sized,
    P: GrowthPolicy + ?Sized,
{
    let state = target.growth_state();
    if index > state.size {
        return Err(Error::PreconditionViolated("insertion index is past the end"));
    }
    // Offset from the start: the only form of position that survives a reallocation.
    let offset = index;
    if let Some(capacity) = plan(state, additional, policy)? {
        trace!(
            old_capacity = state.capacity,
            capacity,
            additional,
            "reserving before insertion"
        );
        target.reserve_total(capacity)?;
    }
    Ok(offset)
}
