/// End-to-end tests for the CLI
///
/// These runs never reach the Go toolchain: each one stops at argument
/// parsing, path validation or manifest loading.
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

// Exit code tests for CLI
mod exit_code_tests {
    use super::*;

    /// Exit code 0: --help should return success
    #[test]
    fn test_exit_code_help() {
        cargo_bin_cmd!("depcomply")
            .arg("--help")
            .assert()
            .code(0)
            .stdout(predicate::str::contains("report"))
            .stdout(predicate::str::contains("save"))
            .stdout(predicate::str::contains("check"));
    }

    /// Exit code 0: --version should return success
    #[test]
    fn test_exit_code_version() {
        cargo_bin_cmd!("depcomply")
            .arg("--version")
            .assert()
            .code(0)
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }

    /// Exit code 2: Invalid arguments
    #[test]
    fn test_exit_code_invalid_argument() {
        cargo_bin_cmd!("depcomply")
            .args(["report", "--invalid-option"])
            .assert()
            .code(2);
    }

    /// Exit code 2: Missing subcommand
    #[test]
    fn test_exit_code_missing_subcommand() {
        cargo_bin_cmd!("depcomply").assert().code(2);
    }

    /// Exit code 2: save without --save-path
    #[test]
    fn test_exit_code_save_without_destination() {
        cargo_bin_cmd!("depcomply")
            .args(["save", "licenses.csv"])
            .assert()
            .code(2);
    }

    /// Exit code 3: Application error - non-existent project path
    #[test]
    fn test_exit_code_application_error_nonexistent_path() {
        cargo_bin_cmd!("depcomply")
            .args(["report", "-p", "/nonexistent/path/that/does/not/exist"])
            .assert()
            .code(3)
            .stderr(predicate::str::contains("Directory does not exist"));
    }

    /// Exit code 3: Application error - path is a file, not a directory
    #[test]
    fn test_exit_code_application_error_file_not_directory() {
        cargo_bin_cmd!("depcomply")
            .args(["check", "-p", "Cargo.toml"])
            .assert()
            .code(3)
            .stderr(predicate::str::contains("Not a directory"));
    }
}

mod save_tests {
    use super::*;

    #[test]
    fn test_save_missing_manifest() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("out");

        cargo_bin_cmd!("depcomply")
            .args([
                "save",
                dir.path().join("missing.csv").to_str().unwrap(),
                "--save-path",
                out.to_str().unwrap(),
                "-p",
                dir.path().to_str().unwrap(),
            ])
            .assert()
            .code(3)
            .stderr(predicate::str::contains("Failed to read file"));

        assert!(!out.exists());
    }

    #[test]
    fn test_save_malformed_manifest() {
        let dir = TempDir::new().unwrap();
        let manifest = dir.path().join("licenses.csv");
        fs::write(
            &manifest,
            "example.com/a, Unknown, MIT\nexample.com/b only-two-fields\n",
        )
        .unwrap();
        let out = dir.path().join("out");

        cargo_bin_cmd!("depcomply")
            .args([
                "save",
                manifest.to_str().unwrap(),
                "--save-path",
                out.to_str().unwrap(),
                "-p",
                dir.path().to_str().unwrap(),
            ])
            .assert()
            .code(3)
            .stderr(predicate::str::contains("Failed to parse manifest line 2"));

        assert!(!out.exists());
    }
}
