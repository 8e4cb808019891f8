pub mod cli;
pub mod error;
pub mod model;

pub mod io {
    pub mod machinereadable;
}

pub mod util {
    pub mod runner;
    pub mod tool;
}

pub mod subcommands {
    pub mod clone;
    pub mod create;
    pub mod delete;
    pub mod info;
    pub mod list;
    pub mod start;
    pub mod stop;
    pub mod syscheck;
}
