use std::process::{Output, Stdio};

use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::error::{StoreError, StoreResult};

/// Run a command that reads its stdin from a byte slice and capture
/// its output. Fails if the command returns a non-zero exit code.
///
/// The child is killed if the returned future is dropped, so a caller
/// timing out does not leave a request running in the background.
pub async fn run_with_stdin(program: &str, args: &[&str], stdin_data: &[u8]) -> StoreResult<String> {
    let mut child = command(program, args)
        .stdin(Stdio::piped())
        .spawn()
        .map_err(|e| spawn_error(program, e))?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(stdin_data).await?;
    }

    let output = child.wait_with_output().await?;
    finish(program, args, &output)
}

/// Check if a command exists on PATH.
pub async fn command_exists(program: &str) -> bool {
    Command::new("which")
        .arg(program)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await
        .is_ok_and(|s| s.success())
}

fn command(program: &str, args: &[&str]) -> Command {
    let mut cmd = Command::new(program);
    cmd.args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);
    cmd
}

fn finish(program: &str, args: &[&str], output: &Output) -> StoreResult<String> {
    if output.status.success() {
        return Ok(String::from_utf8_lossy(&output.stdout).trim().to_string());
    }
    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    Err(StoreError::transport(format!(
        "command failed: {} ({}): {stderr}",
        format_command(program, args),
        output.status
    )))
}

fn spawn_error(program: &str, e: std::io::Error) -> StoreError {
    if e.kind() == std::io::ErrorKind::NotFound {
        StoreError::transport(format!("command not found: {program}"))
    } else {
        StoreError::Io(e)
    }
}

fn format_command(program: &str, args: &[&str]) -> String {
    let mut parts = vec![program.to_string()];
    parts.extend(args.iter().map(|a| (*a).to_string()));
    parts.join(" ")
}
