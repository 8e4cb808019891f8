//! `vboxctl info`: raw `showvminfo` text, or the machine-readable dump as JSON.

use anyhow::{Context, Result};
use clap::Args;

use crate::io::machinereadable;
use crate::model::OutputFormat;
use crate::util::runner::Runner;

#[derive(Args, Debug)]
pub struct CmdInfo {
    #[arg(long)]
    pub name: String,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

impl CmdInfo {
    pub fn run(self, vbm: &dyn Runner) -> Result<()> {
        let res = match self.format {
            OutputFormat::Json => info_json(vbm, &self.name).map(|js| println!("{js}")),
            OutputFormat::Text => info_text(vbm, &self.name),
        };
        res.with_context(|| format!("VM {} does not exist or is not accessible", self.name))
    }
}

/// Pretty JSON object built from `showvminfo --machinereadable`.
pub fn info_json(vbm: &dyn Runner, name: &str) -> Result<String> {
    let dump = vbm.capture(&["showvminfo", name, "--machinereadable"])?;
    let info = machinereadable::parse(&dump);
    log::debug!("{} keys in machine-readable dump of {name}", info.len());
    Ok(serde_json::to_string_pretty(&info)?)
}

fn info_text(vbm: &dyn Runner, name: &str) -> Result<()> {
    println!("\n=== VM {name} ===\n");
    println!("General:");
    vbm.run(&["showvminfo", name])?;

    println!("\nNetwork:");
    vbm.run(&["showvminfo", name, "--details", "--networking"])?;

    println!("\nStorage:");
    vbm.run(&["showvminfo", name, "--storage"])?;
    Ok(())
}
