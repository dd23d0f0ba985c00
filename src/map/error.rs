//! Error types for the map engines.
//!
//! Buffer growth in [`ArrayMap`](crate::map::ArrayMap) reserves memory
//! through the standard library's fallible allocation API, so running out of
//! memory surfaces as a [`MapError`] value instead of an abort.

use std::collections::TryReserveError;

/// Represents errors that can occur while operating on a map.
///
/// # Examples
///
/// ```rust
/// use ordmaps::map::{ArrayMap, MapError, ValueOwnership};
///
/// // A reservation the allocator cannot possibly satisfy.
/// let result: Result<ArrayMap<u8>, MapError> =
///     ArrayMap::with_capacity(usize::MAX, ValueOwnership::Owned);
/// assert!(matches!(result, Err(MapError::AllocationFailed(_))));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapError {
    /// The allocator could not provide the requested buffer space.
    AllocationFailed(TryReserveError),
}

impl std::fmt::Display for MapError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AllocationFailed(cause) => {
                write!(formatter, "map buffer allocation failed: {cause}")
            }
        }
    }
}

impl std::error::Error for MapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::AllocationFailed(cause) => Some(cause),
        }
    }
}

impl From<TryReserveError> for MapError {
    fn from(cause: TryReserveError) -> Self {
        Self::AllocationFailed(cause)
    }
}
