use std::io::ErrorKind;
use std::path::Path;
use std::process::{Output, Stdio};

use tokio::process::Command;
use tracing::debug;

use crate::error::{FetchError, FetchResult};

/// Number of trailing stderr lines kept in a `ToolFailed` error.
const STDERR_TAIL_LINES: usize = 5;

/// Display name of an executable setting (`/opt/venv/bin/scdl` -> `scdl`).
pub fn tool_name(program: &Path) -> String {
    program
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| program.display().to_string())
}

/// Run an external tool to completion and capture its output.
///
/// A missing executable maps to `ToolNotFound`, a non-zero exit to
/// `ToolFailed` carrying the tail of stderr.
pub async fn run_tool(program: &Path, args: &[String]) -> FetchResult<Output> {
    let tool = tool_name(program);
    debug!("Running {} {}", program.display(), args.join(" "));

    let output = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .output()
        .await
        .map_err(|e| match e.kind() {
            ErrorKind::NotFound => FetchError::ToolNotFound { tool: tool.clone() },
            _ => FetchError::Io(e),
        })?;

    if !output.status.success() {
        let status = match output.status.code() {
            Some(code) => format!("exit code {}", code),
            None => "no exit code (terminated by signal)".to_string(),
        };
        return Err(FetchError::ToolFailed {
            tool,
            status,
            stderr: stderr_tail(&output.stderr),
        });
    }

    Ok(output)
}

fn stderr_tail(stderr: &[u8]) -> String {
    let text = String::from_utf8_lossy(stderr);
    let lines: Vec<&str> = text.lines().filter(|line| !line.trim().is_empty()).collect();
    let start = lines.len().saturating_sub(STDERR_TAIL_LINES);
    lines[start..].join("\n")
}

/// Executable shell script standing in for an external tool in tests.
#[cfg(all(test, unix))]
pub(crate) fn write_script(dir: &Path, name: &str, body: &str) -> std::path::PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}
