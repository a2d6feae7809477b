//! Terminal output helpers for the CLI
//!
//! Fancy output (spinners, colors) only on an interactive terminal; plain
//! otherwise so results can be piped.

mod context;
mod progress;

pub use context::UiContext;
pub use progress::TaskSpinner;
