use std::path::Path;
use std::process::{Command, Output};

/// Run the CLI binary with an isolated config directory.
pub fn run_cli(args: &[&str], config_dir: &Path) -> Output {
    cli_command(args, config_dir)
        .output()
        .expect("Failed to execute CLI")
}

/// Run the CLI against a mock API host.
pub fn run_cli_with_api(args: &[&str], config_dir: &Path, base_url: &str) -> Output {
    let mut cmd = cli_command(args, config_dir);
    cmd.env("SNOO_BASE_URL", base_url);
    cmd.output().expect("Failed to execute CLI")
}

/// Run the CLI and expect success.
pub fn run_cli_success(args: &[&str], config_dir: &Path) -> String {
    let output = run_cli(args, config_dir);
    assert_success(args, &output);
    String::from_utf8_lossy(&output.stdout).to_string()
}

pub fn assert_success(args: &[&str], output: &Output) {
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
    }
}

fn cli_command(args: &[&str], config_dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_snoo"));
    cmd.args(args);
    cmd.env("SNOO_CONFIG_DIR", config_dir);
    cmd.env_remove("SNOO_BASE_URL");
    cmd.env_remove("SNOO_ACCESS_TOKEN");
    cmd.env_remove("RUST_LOG");
    cmd.env("NO_COLOR", "1");
    cmd
}
