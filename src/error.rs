//! Error taxonomy for everything that can go wrong around `VBoxManage`.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VboxError {
    /// Binary could not be located or spawned.
    #[error("VBoxManage not found ({0}); install VirtualBox, pass --vboxmanage or set VBOXCTL_VBOXMANAGE")]
    ToolMissing(String),

    /// Binary exists but `--version` did not succeed.
    #[error("VBoxManage at {path} is not working: {detail}")]
    ToolBroken { path: PathBuf, detail: String },

    #[error("disk size must be at least {min} MB (got {size} MB)")]
    DiskTooSmall { size: u64, min: u64 },

    #[error("installation media {0} does not exist")]
    MediaNotFound(PathBuf),

    #[error("`{command}` failed with {status}{}", fmt_stderr(.stderr))]
    Invocation {
        command: String,
        status: String,
        stderr: String,
    },
}

fn fmt_stderr(stderr: &str) -> String {
    let s = stderr.trim();
    if s.is_empty() {
        String::new()
    } else {
        format!(": {s}")
    }
}
