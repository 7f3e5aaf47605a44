// Mon Apr 13 2026 - Alex

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MemoryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Address {0:#x} is not mapped in this capture")]
    Unmapped(u64),
    #[error("Read of {len} bytes at {addr:#x} crosses the end of its region")]
    OutOfBounds { addr: u64, len: usize },
    #[error("Short read at {addr:#x}: wanted {wanted}, got {got}")]
    ShortRead { addr: u64, wanted: usize, got: usize },
    #[error("Address {0:#x} is not aligned to {1}")]
    Misaligned(u64, usize),
    #[error("Region not found: {0}")]
    RegionNotFound(String),
    #[error("String at {0:#x} is not valid UTF-8")]
    InvalidString(u64),
    #[error("Address arithmetic overflow at {0:#x}")]
    AddressOverflow(u64),
}
