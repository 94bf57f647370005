//! Test configuration helpers: a config file pointing every host at a mock
//! server, and a CLI runner capturing both output streams

use std::path::PathBuf;
use tempfile::TempDir;
use tidytuesday::Config;
use wiremock::MockServer;

/// Captured result of one CLI invocation
#[derive(Debug)]
pub struct CliOutput {
    /// Process exit code
    pub code: i32,
    /// Everything written to stdout
    pub stdout: String,
    /// Everything written to stderr
    pub stderr: String,
}

/// A config file on disk whose hosts all point at `server`
///
/// The returned `TempDir` must be kept alive for the file to exist.
pub fn config_file(server: &MockServer) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tidytuesday.json");
    let config = Config::with_base_url(server.uri());
    std::fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();
    (dir, path)
}

/// Run the CLI with `args` (without the binary name)
pub async fn run_cli(args: &[&str]) -> CliOutput {
    let mut argv = vec!["tidytuesday".to_string()];
    argv.extend(args.iter().map(|a| a.to_string()));

    let mut out = Vec::new();
    let mut err = Vec::new();
    let code = tidytuesday::cli::run(argv, &mut out, &mut err).await;

    CliOutput {
        code,
        stdout: String::from_utf8(out).unwrap(),
        stderr: String::from_utf8(err).unwrap(),
    }
}

/// Run the CLI against a mock server via `--config`
pub async fn run_cli_against(server: &MockServer, args: &[&str]) -> CliOutput {
    let (_dir, path) = config_file(server);
    let path = path.to_string_lossy().to_string();

    let mut full = vec!["--config", path.as_str()];
    full.extend_from_slice(args);
    run_cli(&full).await
}
