use std::io::Write;
use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result};
use serde::Serialize;

/// Writes `value` as a single compact JSON line.
pub fn write_json_line<W: Write, T: Serialize>(writer: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer(&mut *writer, value).context("failed to serialize json")?;
    writer
        .write_all(b"\n")
        .context("failed to finalize json output")?;
    writer.flush().context("failed to flush json output")?;
    Ok(())
}

pub fn write_json_pretty<W: Write, T: Serialize>(writer: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, value).context("failed to serialize json")?;
    writer
        .write_all(b"\n")
        .context("failed to finalize json output")?;
    writer.flush().context("failed to flush json output")?;
    Ok(())
}

/// First non-empty line printed by `program args`, from stdout or stderr.
/// `None` when the program cannot be spawned.
pub fn command_version_optional(program: &Path, args: &[&str]) -> Option<String> {
    let output = Command::new(program).args(args).output().ok()?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    let source = if stdout.trim().is_empty() {
        stderr.trim()
    } else {
        stdout.trim()
    };

    Some(
        source
            .lines()
            .next()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .unwrap_or("unknown")
            .to_string(),
    )
}
