//! CLI argument definitions using clap derive

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Maker - coalescing client for the container build service
///
/// Returns a cached container for a (remote, sha) pair, or triggers the
/// build service and waits for the result.
#[derive(Parser, Debug)]
#[command(name = "maker")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "MAKER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Build service base URL (overrides build.url)
    #[arg(long, global = true, env = "MAKER_BUILD_URL")]
    pub build_url: Option<String>,

    /// Shared cache URL (overrides cache.redis_url)
    #[arg(long, global = true, env = "MAKER_REDIS_URL")]
    pub redis_url: Option<String>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Get or build the container for a remote and sha
    Make(MakeArgs),

    /// Print the cache key and hash for a remote and sha
    Key(KeyArgs),

    /// Read a cached result by hash
    Get(HashArgs),

    /// Cache a result read from a JSON file (keyed by its "hash" field)
    Set(SetArgs),

    /// Delete a cached result from both tiers
    Del(HashArgs),

    /// Extend the shared cache lifetime of a result
    Extend(ExtendArgs),

    /// Show or initialize configuration
    Config(ConfigArgs),
}

/// Arguments for the make command
#[derive(Parser, Debug)]
pub struct MakeArgs {
    /// Source location, e.g. git://host/repo
    pub remote: String,

    /// Content version
    pub sha: String,

    /// Read an inline payload from this file (makes the request single-use)
    #[arg(long)]
    pub blob_file: Option<PathBuf>,

    /// File name for the inline payload
    #[arg(long)]
    pub filename: Option<String>,

    /// Token forwarded to the build service
    #[arg(long)]
    pub token: Option<String>,

    /// Authorization header value for the build service
    #[arg(long, env = "MAKER_BEARER", hide_env_values = true)]
    pub bearer: Option<String>,

    /// Cache hint for the build service
    #[arg(long)]
    pub cache: Option<bool>,

    /// Ask the build service to follow build logs
    #[arg(long)]
    pub tailf: bool,

    /// How long to wait for an in-progress build (overrides make.timeout_ms)
    #[arg(long)]
    pub timeout_ms: Option<u64>,
}

/// Arguments for the key command
#[derive(Parser, Debug)]
pub struct KeyArgs {
    /// Source location
    pub remote: String,

    /// Content version
    pub sha: String,

    /// Derive a unique single-use key
    #[arg(long)]
    pub single_use: bool,
}

/// A cache hash argument
#[derive(Parser, Debug)]
pub struct HashArgs {
    /// Cache hash
    pub hash: String,
}

/// Arguments for the set command
#[derive(Parser, Debug)]
pub struct SetArgs {
    /// JSON file holding the result
    pub file: PathBuf,

    /// Shared tier TTL in seconds
    #[arg(long)]
    pub ttl_secs: Option<u64>,
}

/// Arguments for the extend command
#[derive(Parser, Debug)]
pub struct ExtendArgs {
    /// Cache hash
    pub hash: String,

    /// New TTL in seconds
    #[arg(long)]
    pub ttl_secs: u64,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Write a default configuration file
    Init {
        /// Overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}
