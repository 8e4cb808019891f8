//! The seam between subcommand logic and the `VBoxManage` process.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use std::time::Instant;

use crate::error::VboxError;

/// Longest stderr tail carried into an error message.
const MAX_STDERR_BYTES: usize = 1024;

/// Executes `VBoxManage` subcommands. Implementations must treat a non-zero
/// exit as an error.
pub trait Runner {
    /// Run with stdout passed straight through to the terminal.
    fn run(&self, args: &[&str]) -> Result<()>;

    /// Run and hand back stdout.
    fn capture(&self, args: &[&str]) -> Result<String>;
}

/// The real thing.
#[derive(Debug, Clone)]
pub struct VBoxManage {
    bin: PathBuf,
}

impl VBoxManage {
    pub fn new(bin: impl Into<PathBuf>) -> Self {
        Self { bin: bin.into() }
    }

    pub fn bin(&self) -> &Path {
        &self.bin
    }

    fn render(&self, args: &[&str]) -> String {
        let mut s = self.bin.display().to_string();
        for a in args {
            s.push(' ');
            s.push_str(a);
        }
        s
    }

    fn exec(&self, args: &[&str], stdout: Stdio) -> Result<Output> {
        let rendered = self.render(args);
        log::debug!("exec: {rendered}");
        let started = Instant::now();
        let out = Command::new(&self.bin)
            .args(args)
            .stdin(Stdio::null())
            .stdout(stdout)
            .stderr(Stdio::piped())
            .output()
            .with_context(|| format!("failed to spawn {rendered}"))?;
        log::debug!(
            "{rendered} exited with {} after {}",
            out.status,
            humantime::format_duration(started.elapsed())
        );
        if !out.status.success() {
            return Err(VboxError::Invocation {
                command: rendered,
                status: out.status.to_string(),
                stderr: stderr_tail(&out.stderr),
            }
            .into());
        }
        Ok(out)
    }
}

impl Runner for VBoxManage {
    fn run(&self, args: &[&str]) -> Result<()> {
        let out = self.exec(args, Stdio::inherit())?;
        // Some subcommands (startvm, controlvm) report progress on stderr.
        let err = String::from_utf8_lossy(&out.stderr);
        if !err.trim().is_empty() {
            eprint!("{err}");
        }
        Ok(())
    }

    fn capture(&self, args: &[&str]) -> Result<String> {
        let out = self.exec(args, Stdio::piped())?;
        Ok(String::from_utf8_lossy(&out.stdout).into_owned())
    }
}

/// Keep only the trailing bytes so pathological output stays readable.
fn stderr_tail(buf: &[u8]) -> String {
    let start = buf.len().saturating_sub(MAX_STDERR_BYTES);
    String::from_utf8_lossy(&buf[start..]).into_owned()
}
