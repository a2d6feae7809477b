//! Cache commands - direct access to cached results

use super::print_json;
use crate::cli::args::{ExtendArgs, HashArgs, SetArgs};
use crate::config::Config;
use crate::error::{MakerError, MakerResult};
use crate::options::{ExtendOptions, SetOptions};
use crate::Maker;
use serde_json::Value;
use std::time::Duration;
use tokio::fs;
use tracing::info;

/// Print a cached result, or `null` on a miss
pub async fn get(args: HashArgs, config: &Config) -> MakerResult<()> {
    let maker = Maker::connect(config).await?;
    let result = maker.get(&args.hash).await?;
    print_json(&result)
}

/// Cache a result from a JSON file
pub async fn set(args: SetArgs, config: &Config) -> MakerResult<()> {
    let content = fs::read_to_string(&args.file)
        .await
        .map_err(|e| MakerError::io(format!("reading {}", args.file.display()), e))?;
    let result: Value = serde_json::from_str(&content)?;

    let maker = Maker::connect(config).await?;
    let options = SetOptions {
        ttl: args.ttl_secs.map(Duration::from_secs),
    };
    maker.set(&result, options).await?;

    info!("Cached {}", args.file.display());
    Ok(())
}

/// Delete a cached result
pub async fn del(args: HashArgs, config: &Config) -> MakerResult<()> {
    let maker = Maker::connect(config).await?;
    maker.del(&args.hash).await?;
    info!("Deleted {}", args.hash);
    Ok(())
}

/// Extend the shared tier lifetime of a result
pub async fn extend(args: ExtendArgs, config: &Config) -> MakerResult<()> {
    let maker = Maker::connect(config).await?;
    let options = ExtendOptions {
        ttl: Duration::from_secs(args.ttl_secs),
    };

    if maker.extend(&args.hash, options).await? {
        info!("Extended {} by {}s", args.hash, args.ttl_secs);
        Ok(())
    } else {
        Err(MakerError::InvalidInput(format!(
            "no cached result for {}",
            args.hash
        )))
    }
}
