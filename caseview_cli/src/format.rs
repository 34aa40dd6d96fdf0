//! Pretty-printing of generated code through `rustfmt`.
//!
//! Generated code is token text (`SheetView < 'store >`). When `rustfmt` is on
//! the path the output goes through it; otherwise the token text is kept.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

/// Edition `rustfmt` parses the generated code as.
const EDITION: &str = "2024";

/// Formats `source` with the `rustfmt` found on the path, falling back to
/// `source` itself when there is none or it rejects the input.
pub fn format_source(source: &str) -> String {
    let Ok(rustfmt) = which::which("rustfmt") else {
        tracing::debug!("rustfmt not found on path, writing generated code unformatted");
        return source.to_owned();
    };
    match run_rustfmt(&rustfmt, source) {
        Ok(formatted) => formatted,
        Err(e) => {
            tracing::warn!("rustfmt failed, writing generated code unformatted: {e}");
            source.to_owned()
        }
    }
}

fn run_rustfmt(rustfmt: &Path, source: &str) -> Result<String, Box<dyn std::error::Error>> {
    let mut cmd = Command::new(rustfmt);
    cmd.args(["--edition", EDITION, "--emit", "stdout"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    tracing::debug!("running {:?}", cmd);
    let mut child = cmd.spawn()?;
    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(source.as_bytes())?;
    }
    let output = child.wait_with_output()?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        tracing::error!("rustfmt stderr: {stderr}");
        return Err(format!("rustfmt exited with {}", output.status).into());
    }
    Ok(String::from_utf8(output.stdout)?)
}
