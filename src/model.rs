use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Smallest disk we are willing to ask VirtualBox for, in MB.
pub const MIN_DISK_MB: u64 = 1000;

/// Storage controller names used for the system disk and install media.
pub const SATA_CONTROLLER: &str = "SATA";
pub const IDE_CONTROLLER: &str = "IDE";

pub const DEFAULT_BRIDGE_ADAPTER: &str = "eth0";
pub const DEFAULT_HOSTONLY_ADAPTER: &str = "vboxnet0";

/// Disk image formats understood by `VBoxManage createmedium`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[value(rename_all = "UPPER")]
pub enum DiskFormat {
    #[default]
    Vdi,
    Vhd,
    Vmdk,
}

impl DiskFormat {
    /// Value passed to `--format`.
    pub fn as_vbox(self) -> &'static str {
        match self {
            DiskFormat::Vdi => "VDI",
            DiskFormat::Vhd => "VHD",
            DiskFormat::Vmdk => "VMDK",
        }
    }

    pub fn extension(self) -> String {
        self.as_vbox().to_lowercase()
    }
}

impl fmt::Display for DiskFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_vbox())
    }
}

/// First NIC attachment mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NetworkMode {
    #[default]
    Nat,
    Bridged,
    HostOnly,
    None,
}

impl NetworkMode {
    /// Case-insensitive; anything unrecognized disables the adapter.
    pub fn from_str_lossy(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "nat" => NetworkMode::Nat,
            "bridged" => NetworkMode::Bridged,
            "hostonly" => NetworkMode::HostOnly,
            _ => NetworkMode::None,
        }
    }
}

/// Host-side adapter names for the bridged and host-only modes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostAdapters {
    pub bridged: String,
    pub hostonly: String,
}

impl Default for HostAdapters {
    fn default() -> Self {
        Self {
            bridged: DEFAULT_BRIDGE_ADAPTER.to_string(),
            hostonly: DEFAULT_HOSTONLY_ADAPTER.to_string(),
        }
    }
}

/// Output format for `info`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Everything needed to build a VM from scratch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VmSpec {
    pub name: String,
    pub os_type: String,
    pub ram_mb: u32,
    pub cpus: u32,
    pub disk_size_mb: u64,
    pub disk_format: DiskFormat,
    pub iso: Option<PathBuf>,
    pub start: bool,
    pub network: NetworkMode,
    pub adapters: HostAdapters,
}

impl VmSpec {
    /// `<name>_disk.<ext>`, relative to VirtualBox's working directory.
    pub fn disk_file(&self) -> String {
        format!("{}_disk.{}", self.name, self.disk_format.extension())
    }
}
