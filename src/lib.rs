//! Maker - coalescing client for a remote container build service
//!
//! Returns a container for `(remote, sha)` from a two-tier cache, triggers
//! the build service on a miss, and waits on the shared cache when an
//! identical build is already running elsewhere.

pub mod build;
pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod key;
pub mod make;
pub mod options;
pub mod ui;

pub use error::{MakerError, MakerResult};
pub use key::CacheKey;
pub use make::Maker;
pub use options::{ExtendOptions, MakeOptions, SetOptions};
