use std::{path::PathBuf, process::Stdio, time::Duration};

use anyhow::Context;
use serde::Serialize;
use tokio::process::Command;

#[derive(Debug, Clone, Serialize)]
pub struct CommandResult {
    pub code: i32,
    pub out: String,
    pub err: String,
}

/// Run one external command with piped output and a hard timeout. The
/// command string is split with shell word rules but no shell is involved:
/// no pipes, no redirects, no expansion.
pub async fn run_cmd(
    dir: PathBuf,
    cmd: String,
    timeout: Duration,
) -> anyhow::Result<CommandResult> {
    let parts = shell_words::split(&cmd).with_context(|| format!("Unparseable command: {cmd}"))?;
    let Some((program, args)) = parts.split_first() else {
        anyhow::bail!("Empty command");
    };

    tracing::debug!(command = %cmd, dir = %dir.display(), "Running command");

    // Spawn the command as a child process
    let child = Command::new(program)
        .args(args)
        .current_dir(&dir)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true) // Ensure process is killed when dropped
        .spawn()
        .with_context(|| format!("Failed to spawn: {cmd}"))?;

    // Try to get output with timeout
    let output = tokio::time::timeout(timeout, async {
        let output = child.wait_with_output().await?;
        Ok::<_, std::io::Error>(output)
    })
    .await
    .with_context(|| format!("Command timed out after {}s: {cmd}", timeout.as_secs()))??;

    let code = output.status.code().unwrap_or(1);
    let out = String::from_utf8_lossy(&output.stdout).to_string();
    let err = String::from_utf8_lossy(&output.stderr).to_string();

    Ok(CommandResult { code, out, err })
}
