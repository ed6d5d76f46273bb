#![doc = include_str!("../README.md")]
#![deny(missing_docs)]
#![forbid(unsafe_code)]

mod base;
mod level;

mod error;
pub use error::Error;

mod options;
pub use options::Options;

/// A skiplist map guarded by a single reader/writer lock.
pub mod sync;

/// A skiplist map without internal locking, for single-threaded embedding.
pub mod unsync;

pub use rand;

/// The smallest maximum level a skiplist can be configured with.
pub const MIN_LEVEL: u8 = 1;

/// The largest maximum level a skiplist can be configured with.
pub const MAX_LEVEL: u8 = 64;

/// The maximum level used when none is configured.
pub const DEFAULT_MAX_LEVEL: u8 = 17;

/// The promotion probability used when none is configured.
pub const DEFAULT_PROBABILITY: f64 = 0.5;

#[cfg(test)]
mod tests;
