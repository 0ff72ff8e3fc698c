use thiserror::Error;

/// Errors reported by insertion and checked search operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The insertion would take the target past its maximum size.
    #[error("cannot insert {additional} elements into a container of size {size}: maximum size is {max_size}")]
    CapacityExceeded {
        /// Size of the target before the insertion.
        size: usize,
        /// Number of elements the insertion asked for.
        additional: usize,
        /// Largest size the target can represent.
        max_size: usize,
    },

    /// A caller-supplied argument broke the operation's contract (for example an unsorted input
    /// or an ordering that is not irreflexive).
    #[error("precondition violated: {0}")]
    PreconditionViolated(&'static str),

    /// Allocation failure from a [`crate::vec::Vec`], passed through as is.
    #[error(transparent)]
    Reserve(#[from] TryReserveError),

    /// Allocation failure from a std collection, passed through as is.
    #[error(transparent)]
    StdReserve(#[from] std::collections::TryReserveError),
}

/// The error type for `try_reserve` methods.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct TryReserveError {
    pub(crate) kind: TryReserveErrorKind,
}

impl TryReserveError {
    /// Details about the allocation that caused the error
    #[must_use]
    pub fn kind(&self) -> TryReserveErrorKind {
        self.kind.clone()
    }
}

impl From<TryReserveErrorKind> for TryReserveError {
    fn from(kind: TryReserveErrorKind) -> Self {
        Self { kind }
    }
}

/// Details of the allocation that caused a `TryReserveError`
#[derive(Debug, Clone, Error)]
pub enum TryReserveErrorKind {
    /// Error due to the computed capacity exceeding the collection's maximum
    /// (usually `isize::MAX` bytes).
    #[error("memory allocation failed because the computed capacity exceeded the collection's maximum")]
    CapacityOverflow,

    /// The memory allocator returned an error
    #[error("memory allocation of {} bytes failed", .layout.size())]
    AllocError {
        /// The layout of allocation request that failed
        layout: std::alloc::Layout,
    },
}
