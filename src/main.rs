//! Maker CLI entry point that dispatches to subcommands.

use clap::Parser;
use console::style;
use maker::cli::{Cli, Commands};
use maker::config::{Config, ConfigManager};
use maker::error::MakerResult;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> MakerResult<()> {
    let cli = Cli::parse();

    let config_manager = match cli.config {
        Some(ref path) => ConfigManager::with_path(path.clone()),
        None => ConfigManager::new(),
    };
    let mut config = config_manager.load().await?;

    init_logging(cli.verbose, &config);
    debug!("Loaded configuration from {}", config_manager.path().display());

    apply_overrides(&mut config, &cli);

    match cli.command {
        Commands::Make(args) => maker::cli::commands::make(args, &config).await,
        Commands::Key(args) => maker::cli::commands::key(args),
        Commands::Get(args) => maker::cli::commands::get(args, &config).await,
        Commands::Set(args) => maker::cli::commands::set(args, &config).await,
        Commands::Del(args) => maker::cli::commands::del(args, &config).await,
        Commands::Extend(args) => maker::cli::commands::extend(args, &config).await,
        Commands::Config(args) => {
            maker::cli::commands::config(args, &config, &config_manager).await
        }
    }
}

/// 0 = warn, 1 = info, 2+ = debug
fn init_logging(verbose: u8, config: &Config) {
    let filter = match verbose {
        0 => EnvFilter::new("maker=warn"),
        1 => EnvFilter::new("maker=info"),
        _ => EnvFilter::new("maker=debug"),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    if config.general.log_format == "json" {
        builder.json().init();
    } else {
        builder.without_time().init();
    }
}

fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(ref url) = cli.build_url {
        config.build.url = url.clone();
    }
    if let Some(ref url) = cli.redis_url {
        config.cache.redis_url = url.clone();
    }
}
