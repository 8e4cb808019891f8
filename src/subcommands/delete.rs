//! `vboxctl delete`: unregister a VM and remove its files.

use anyhow::Result;
use clap::Args;

use crate::util::runner::Runner;

#[derive(Args, Debug)]
pub struct CmdDelete {
    #[arg(long)]
    pub name: String,
}

impl CmdDelete {
    pub fn run(self, vbm: &dyn Runner) -> Result<()> {
        log::info!("Deleting VM {}", self.name);
        vbm.run(&["unregistervm", self.name.as_str(), "--delete"])?;
        println!("VM {} deleted.", self.name);
        Ok(())
    }
}
