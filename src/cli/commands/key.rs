//! Key command - print the cache key and hash

use super::print_json;
use crate::cli::args::KeyArgs;
use crate::error::MakerResult;
use crate::key::CacheKey;

/// Execute the key command
///
/// Needs no cache or build service connection.
pub fn execute(args: KeyArgs) -> MakerResult<()> {
    let key = CacheKey::derive(&args.remote, &args.sha, args.single_use)?;
    print_json(&key)
}
