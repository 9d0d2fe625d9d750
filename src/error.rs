//! Error types for construction and insertion.
//!
//! Absence is never an error: `get`/`delete` report it through `Option`.

use std::collections::TryReserveError;
use thiserror::Error;

/// Rejected construction arguments.
#[derive(Error, Debug)]
pub enum CapacityError {
    /// A signed capacity below zero was supplied.
    #[error("capacity must not be negative (got {0})")]
    Negative(i64),

    /// The bucket count for this capacity does not fit in `usize`.
    #[error("capacity {0} is too large to round up to a power of two")]
    TooLarge(usize),

    /// The bucket array could not be allocated.
    #[error("failed to allocate bucket array: {0}")]
    Allocation(#[from] TryReserveError),
}

/// Why an insert of a new key was refused. Overrides of existing keys
/// never fail.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertError {
    #[error("map has no buckets (uninitialized or zero capacity)")]
    Uninitialized,

    #[error("map is full ({capacity} of {capacity} keys)")]
    CapacityExhausted { capacity: usize },
}

/// Failures of the interactive shell. Map-level conditions (full, not
/// found) are reported to the user, not returned here.
#[derive(Error, Debug)]
pub enum ShellError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not create map: {0}")]
    Capacity(#[from] CapacityError),
}
