//! `vboxctl clone`

use anyhow::Result;
use clap::Args;

use crate::util::runner::Runner;

#[derive(Args, Debug)]
pub struct CmdClone {
    /// VM to copy
    #[arg(long)]
    pub original: String,
    /// Name for the copy
    #[arg(long)]
    pub new_name: String,
}

impl CmdClone {
    pub fn run(self, vbm: &dyn Runner) -> Result<()> {
        log::info!("Cloning VM {} to {}", self.original, self.new_name);
        vbm.run(&[
            "clonevm",
            self.original.as_str(),
            "--name",
            self.new_name.as_str(),
            "--register",
        ])?;
        println!("VM {} created from {}.", self.new_name, self.original);
        Ok(())
    }
}
