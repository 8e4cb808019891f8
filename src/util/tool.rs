use anyhow::Result;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::VboxError;

pub const TOOL_NAME: &str = "VBoxManage";
pub const TOOL_ENV: &str = "VBOXCTL_VBOXMANAGE";

/// Resolve the VBoxManage executable.
/// Priority: CLI override > environment variable > PATH search
pub fn resolve(cli: Option<&Path>) -> Result<PathBuf, VboxError> {
    if let Some(p) = cli {
        return if p.exists() {
            Ok(p.to_path_buf())
        } else {
            Err(VboxError::ToolMissing(format!("no file at {}", p.display())))
        };
    }
    if let Some(envp) = std::env::var_os(TOOL_ENV) {
        return Ok(PathBuf::from(envp));
    }
    which::which(TOOL_NAME)
        .map_err(|e| VboxError::ToolMissing(format!("{TOOL_NAME} is not on PATH: {e}")))
}

/// First line of `--version`, failing if the binary can't run or exits non-zero.
pub fn version(bin: &Path) -> Result<String, VboxError> {
    let out = Command::new(bin)
        .arg("--version")
        .output()
        .map_err(|e| VboxError::ToolMissing(format!("cannot execute {}: {e}", bin.display())))?;
    if !out.status.success() {
        let stderr = String::from_utf8_lossy(&out.stderr).trim().to_string();
        return Err(VboxError::ToolBroken {
            path: bin.to_path_buf(),
            detail: if stderr.is_empty() {
                format!("--version exited with {}", out.status)
            } else {
                stderr
            },
        });
    }
    let s = String::from_utf8_lossy(&out.stdout);
    Ok(s.lines().next().unwrap_or_default().trim().to_string())
}

/// Startup check run once before any VM subcommand.
pub fn probe(cli: Option<&Path>) -> Result<PathBuf, VboxError> {
    let bin = resolve(cli)?;
    let v = version(&bin)?;
    log::debug!("using {} ({v})", bin.display());
    Ok(bin)
}
