//! Make command - get or build a container

use super::print_json;
use crate::cli::args::MakeArgs;
use crate::config::Config;
use crate::error::{MakerError, MakerResult};
use crate::options::MakeOptions;
use crate::ui::{TaskSpinner, UiContext};
use crate::Maker;
use std::time::Duration;
use tokio::fs;

/// Execute the make command
pub async fn execute(args: MakeArgs, config: &Config) -> MakerResult<()> {
    let options = make_options(&args, config).await?;
    let maker = Maker::connect(config).await?;

    let ctx = UiContext::detect();
    let spinner = TaskSpinner::start(&ctx, &format!("Making {}#{}", args.remote, args.sha));

    match maker.make(&args.remote, &args.sha, options).await {
        Ok(result) => {
            spinner.stop("Container ready");
            print_json(&result)
        }
        Err(e) => {
            spinner.stop_error("Make failed");
            Err(e)
        }
    }
}

async fn make_options(args: &MakeArgs, config: &Config) -> MakerResult<MakeOptions> {
    let blob = match &args.blob_file {
        Some(path) => Some(
            fs::read_to_string(path)
                .await
                .map_err(|e| MakerError::io(format!("reading blob {}", path.display()), e))?,
        ),
        None => None,
    };

    Ok(MakeOptions {
        blob,
        filename: args.filename.clone(),
        token: args.token.clone(),
        bearer: args.bearer.clone(),
        cache: args.cache,
        tailf: args.tailf.then_some(true),
        timeout: Duration::from_millis(args.timeout_ms.unwrap_or(config.make.timeout_ms)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn args() -> MakeArgs {
        MakeArgs {
            remote: "git://repo".to_string(),
            sha: "abc123".to_string(),
            blob_file: None,
            filename: None,
            token: None,
            bearer: None,
            cache: None,
            tailf: false,
            timeout_ms: None,
        }
    }

    #[tokio::test]
    async fn timeout_defaults_to_config() {
        let mut config = Config::default();
        config.make.timeout_ms = 7_000;

        let options = make_options(&args(), &config).await.unwrap();
        assert_eq!(options.timeout, Duration::from_millis(7_000));
        assert!(!options.is_single_use());
        assert_eq!(options.tailf, None);
    }

    #[tokio::test]
    async fn blob_file_makes_single_use() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("Dockerfile");
        std::fs::write(&path, "FROM scratch\n").unwrap();

        let mut args = args();
        args.blob_file = Some(path);
        args.timeout_ms = Some(1_000);

        let options = make_options(&args, &Config::default()).await.unwrap();
        assert_eq!(options.blob.as_deref(), Some("FROM scratch\n"));
        assert!(options.is_single_use());
        assert_eq!(options.timeout, Duration::from_millis(1_000));
    }

    #[tokio::test]
    async fn missing_blob_file_is_io_error() {
        let mut args = args();
        args.blob_file = Some(PathBuf::from("/nonexistent/blob"));

        let err = make_options(&args, &Config::default()).await.unwrap_err();
        assert!(matches!(err, MakerError::Io { .. }));
    }
}
