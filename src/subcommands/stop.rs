//! `vboxctl stop`

use anyhow::Result;
use clap::Args;

use crate::util::runner::Runner;

#[derive(Args, Debug)]
pub struct CmdStop {
    #[arg(long)]
    pub name: String,
    /// Power off immediately instead of sending an ACPI shutdown
    #[arg(long)]
    pub force: bool,
}

impl CmdStop {
    pub fn run(self, vbm: &dyn Runner) -> Result<()> {
        let action = if self.force {
            "poweroff"
        } else {
            "acpipowerbutton"
        };
        log::info!("Stopping VM {} ({action})", self.name);
        vbm.run(&["controlvm", self.name.as_str(), action])?;
        println!("VM {} stopped.", self.name);
        Ok(())
    }
}
