//! CLI command implementations

pub mod cache;
pub mod config;
pub mod key;
pub mod make;

pub use cache::{del, extend, get, set};
pub use config::execute as config;
pub use key::execute as key;
pub use make::execute as make;

use crate::error::MakerResult;
use serde::Serialize;

/// Print a value as pretty JSON on stdout
fn print_json<T: Serialize>(value: &T) -> MakerResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
