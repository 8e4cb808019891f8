//! `vboxctl syscheck`: where VBoxManage lives, its version, and host capacity.

use anyhow::Result;
use clap::Args;
use fs_err as fs;
use std::path::{Path, PathBuf};
use sysinfo::System;

use crate::util::tool;

#[derive(Args, Debug)]
pub struct CmdSyscheck {
    /// Write the report here instead of stdout
    #[arg(long)]
    pub out: Option<PathBuf>,
}

impl CmdSyscheck {
    pub fn run(self, vboxmanage: Option<&Path>) -> Result<()> {
        let obj = report(vboxmanage);
        if let Some(path) = self.out {
            serde_json::to_writer_pretty(fs::File::create(path)?, &obj)?;
        } else {
            println!("{}", serde_json::to_string_pretty(&obj)?);
        }
        Ok(())
    }
}

/// Never fails: problems with VBoxManage end up in the report itself.
pub fn report(vboxmanage: Option<&Path>) -> serde_json::Value {
    let mut s = System::new_all();
    s.refresh_all();

    let executable = match tool::resolve(vboxmanage) {
        Ok(bin) => {
            let version = tool::version(&bin).unwrap_or_else(|e| format!("error: {e}"));
            serde_json::json!({ "path": bin, "version": version })
        }
        Err(e) => serde_json::json!({ "path": null, "version": format!("error: {e}") }),
    };

    serde_json::json!({
        "vboxctl_version": env!("CARGO_PKG_VERSION"),
        "cpus": s.cpus().len(),
        "total_memory_mb": s.total_memory() / 1024 / 1024,
        "vboxmanage": executable,
    })
}
