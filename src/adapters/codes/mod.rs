//! Session code sources.
//!
//! - `RandomCodeSource` - Production source backed by the thread-local RNG
//! - `FixedCodeSource` - Scripted sequence for tests and demos

mod fixed;
mod random;

pub use fixed::FixedCodeSource;
pub use random::RandomCodeSource;
