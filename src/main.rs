//! vboxctl: VirtualBox VM management on top of VBoxManage.
//! Entry point only; see `cli` and `subcommands/*`.

use anyhow::Result;
use vboxctl::cli::Cli;

fn main() -> Result<()> {
    // Initialize env_logger with a default filter of "vboxctl=info"
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("vboxctl=info"))
        .format_timestamp_millis()
        .init();
    let cli = <Cli as clap::Parser>::parse();
    cli.run()
}
