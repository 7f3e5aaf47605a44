// Tue Apr 14 2026 - Alex

use crate::layout::LayoutError;
use crate::memory::MemoryError;
use thiserror::Error;

/// Failures surfaced while interpreting a capture. Discrimination failures
/// and bounds violations are checkable preconditions and always reported
/// before the offending read; an undetected layout mismatch against the
/// target build can only be caught by the validation module's golden
/// comparison, not here.
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Kind mismatch: expected {expected}, found {found}")]
    KindMismatch { expected: &'static str, found: String },
    #[error("Invalid {family} discriminator value {value}")]
    InvalidDiscriminator { family: &'static str, value: u64 },
    #[error("Index {index} out of bounds for array of length {length}")]
    BoundsViolation { index: usize, length: usize },
    #[error("Address {0:#x} is not representable in compressed form")]
    Unrepresentable(u64),
    #[error("Null pointer where a {0} was required")]
    NullPointer(&'static str),
    #[error("{0} not configured for this image")]
    Unconfigured(&'static str),
    #[error("Negative length {0} in array record")]
    NegativeLength(i32),
    #[error(transparent)]
    Memory(#[from] MemoryError),
    #[error(transparent)]
    Layout(#[from] LayoutError),
}

pub type Result<T> = std::result::Result<T, ModelError>;
