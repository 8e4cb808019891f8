//! CLI definition and top-level dispatch.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::subcommands::{
    clone::CmdClone, create::CmdCreate, delete::CmdDelete, info::CmdInfo, list::CmdList,
    start::CmdStart, stop::CmdStop, syscheck::CmdSyscheck,
};
use crate::util::runner::VBoxManage;
use crate::util::tool;

#[derive(Parser, Debug)]
#[command(
    name = "vboxctl",
    version,
    about = "VirtualBox virtual machine manager (wraps VBoxManage)"
)]
pub struct Cli {
    /// Explicit VBoxManage binary (else $VBOXCTL_VBOXMANAGE, else PATH)
    #[arg(long, global = true, value_name = "PATH")]
    pub vboxmanage: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new VM with a fresh disk, optional install ISO and network
    Create(CmdCreate),

    /// Start a VM
    Start(CmdStart),

    /// Stop a VM (ACPI shutdown, or power off with --force)
    Stop(CmdStop),

    /// Unregister a VM and delete its files
    Delete(CmdDelete),

    /// List registered VMs
    List(CmdList),

    /// Show details of one VM
    Info(CmdInfo),

    /// Clone an existing VM under a new name
    Clone(CmdClone),

    /// Check that VBoxManage is usable and report host capacity
    Syscheck(CmdSyscheck),
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let bin_override = self.vboxmanage;
        // Every VM subcommand needs a working VBoxManage before it starts.
        let connect = || -> Result<VBoxManage> {
            let vbm = VBoxManage::new(tool::probe(bin_override.as_deref())?);
            log::debug!("VBoxManage: {}", vbm.bin().display());
            Ok(vbm)
        };

        match self.cmd {
            Commands::Create(cmd) => cmd.run(&connect()?),
            Commands::Start(cmd) => cmd.run(&connect()?),
            Commands::Stop(cmd) => cmd.run(&connect()?),
            Commands::Delete(cmd) => cmd.run(&connect()?),
            Commands::List(cmd) => cmd.run(&connect()?),
            Commands::Info(cmd) => cmd.run(&connect()?),
            Commands::Clone(cmd) => cmd.run(&connect()?),
            Commands::Syscheck(cmd) => cmd.run(bin_override.as_deref()),
        }
    }
}
