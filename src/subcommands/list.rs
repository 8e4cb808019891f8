//! `vboxctl list`

use anyhow::Result;
use clap::Args;

use crate::util::runner::Runner;

#[derive(Args, Debug)]
pub struct CmdList {
    /// Also show the VMs that are currently running
    #[arg(long)]
    pub details: bool,
}

impl CmdList {
    pub fn run(self, vbm: &dyn Runner) -> Result<()> {
        let vms = vbm.capture(&["list", "vms"])?;
        println!("Registered VMs:");
        println!("{vms}");

        if self.details {
            println!("\nRunning VMs:");
            vbm.run(&["list", "runningvms"])?;
        }
        Ok(())
    }
}
