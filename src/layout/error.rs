// Tue Apr 14 2026 - Alex

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("Unknown type: {0}")]
    UnknownType(String),
    #[error("Unknown field: {0}::{1}")]
    UnknownField(String, String),
    #[error("Duplicate field: {0}::{1}")]
    DuplicateField(String, String),
    #[error("Base layout {base} was built for a different pointer width than {derived}")]
    WidthMismatch { base: String, derived: String },
}
