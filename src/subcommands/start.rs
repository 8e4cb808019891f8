//! `vboxctl start`

use anyhow::Result;
use clap::Args;

use crate::util::runner::Runner;

#[derive(Args, Debug)]
pub struct CmdStart {
    #[arg(long)]
    pub name: String,
    /// Start without opening a VM window
    #[arg(long)]
    pub headless: bool,
}

impl CmdStart {
    pub fn run(self, vbm: &dyn Runner) -> Result<()> {
        start_vm(vbm, &self.name, self.headless)
    }
}

pub fn start_vm(vbm: &dyn Runner, name: &str, headless: bool) -> Result<()> {
    let mode = if headless { "headless" } else { "gui" };
    log::info!("Starting VM {name}");
    vbm.run(&["startvm", name, "--type", mode])?;
    println!("VM {name} started in {mode} mode.");
    Ok(())
}
