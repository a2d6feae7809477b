//! Integration tests for Maker

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use tempfile::TempDir;

    fn maker(config_dir: &TempDir) -> Command {
        let mut cmd = cargo_bin_cmd!("maker");
        cmd.arg("--config")
            .arg(config_dir.path().join("config.toml"))
            .env_remove("MAKER_BUILD_URL")
            .env_remove("MAKER_REDIS_URL");
        cmd
    }

    #[test]
    fn help_displays() {
        let temp = TempDir::new().unwrap();
        maker(&temp)
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("coalescing client"));
    }

    #[test]
    fn version_displays() {
        let temp = TempDir::new().unwrap();
        maker(&temp)
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("maker"));
    }

    #[test]
    fn key_is_stable() {
        let temp = TempDir::new().unwrap();
        let first = maker(&temp)
            .args(["key", "git://repo", "abc123"])
            .assert()
            .success()
            .stdout(predicate::str::contains("\"key\": \"git://repo#abc123\""))
            .get_output()
            .stdout
            .clone();
        let second = maker(&temp)
            .args(["key", "git://repo", "abc123"])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();

        assert_eq!(first, second);
    }

    #[test]
    fn single_use_key_is_unique() {
        let temp = TempDir::new().unwrap();
        let first = maker(&temp)
            .args(["key", "git://repo", "abc123", "--single-use"])
            .assert()
            .success()
            .stdout(predicate::str::contains("git://repo#abc123+"))
            .get_output()
            .stdout
            .clone();
        let second = maker(&temp)
            .args(["key", "git://repo", "abc123", "--single-use"])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();

        assert_ne!(first, second);
    }

    #[test]
    fn key_rejects_empty_remote() {
        let temp = TempDir::new().unwrap();
        maker(&temp)
            .args(["key", "", "abc123"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("remote must not be empty"));
    }

    #[test]
    fn config_path() {
        let temp = TempDir::new().unwrap();
        maker(&temp)
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("config.toml"));
    }

    #[test]
    fn config_init_then_show() {
        let temp = TempDir::new().unwrap();
        maker(&temp).args(["config", "init"]).assert().success();
        assert!(temp.path().join("config.toml").exists());

        maker(&temp)
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[make]"))
            .stdout(predicate::str::contains("timeout_ms = 20000"));
    }

    #[test]
    fn invalid_config_fails() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("config.toml"), "[make\n").unwrap();
        maker(&temp)
            .args(["config", "show"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid configuration"));
    }

    #[test]
    fn zero_poll_interval_fails() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("config.toml"),
            "[make]\npoll_interval_ms = 0\n",
        )
        .unwrap();
        maker(&temp)
            .args(["config", "show"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("poll_interval_ms"));
    }
}
