//! `vboxctl create`: register, size, wire up storage and network for a new VM.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use crate::error::VboxError;
use crate::model::{
    DiskFormat, HostAdapters, NetworkMode, VmSpec, DEFAULT_BRIDGE_ADAPTER,
    DEFAULT_HOSTONLY_ADAPTER, IDE_CONTROLLER, MIN_DISK_MB, SATA_CONTROLLER,
};
use crate::subcommands::start;
use crate::util::runner::Runner;

#[derive(Args, Debug)]
pub struct CmdCreate {
    #[arg(long, help = "VM name")]
    pub name: String,
    #[arg(long, help = "Guest OS type (e.g. Linux_64, Windows10_64)")]
    pub os_type: String,
    #[arg(long, help = "Memory in MB")]
    pub ram: u32,
    #[arg(long, help = "Number of virtual CPUs")]
    pub cpus: u32,
    #[arg(long, help = "Disk size in MB (at least 1000)")]
    pub disk_size: u64,
    #[arg(long, value_enum, ignore_case = true, default_value_t = DiskFormat::Vdi)]
    pub disk_type: DiskFormat,
    #[arg(long, value_name = "PATH", help = "Installation ISO to attach as a DVD")]
    pub iso: Option<PathBuf>,
    #[arg(long, help = "Start the VM once it is created")]
    pub start: bool,
    #[arg(
        long,
        default_value = "nat",
        help = "Network mode: nat, bridged, hostonly or none"
    )]
    pub network: String,
    #[arg(long, default_value = DEFAULT_BRIDGE_ADAPTER)]
    pub bridge_adapter: String,
    #[arg(long, default_value = DEFAULT_HOSTONLY_ADAPTER)]
    pub hostonly_adapter: String,
}

impl CmdCreate {
    pub fn spec(self) -> VmSpec {
        VmSpec {
            name: self.name,
            os_type: self.os_type,
            ram_mb: self.ram,
            cpus: self.cpus,
            disk_size_mb: self.disk_size,
            disk_format: self.disk_type,
            iso: self.iso,
            start: self.start,
            network: NetworkMode::from_str_lossy(&self.network),
            adapters: HostAdapters {
                bridged: self.bridge_adapter,
                hostonly: self.hostonly_adapter,
            },
        }
    }

    pub fn run(self, vbm: &dyn Runner) -> Result<()> {
        let spec = self.spec();
        create_vm(vbm, &spec)?;
        println!("VM {} created.", spec.name);
        if spec.start {
            start::start_vm(vbm, &spec.name, false)?;
        }
        Ok(())
    }
}

/// Run the creation sequence. Stops at the first failure and leaves whatever
/// was already done in place.
pub fn create_vm(vbm: &dyn Runner, spec: &VmSpec) -> Result<()> {
    let (done, res) = attempt(vbm, spec);
    if let Some(msg) = partial_state_warning(&spec.name, &done, &res) {
        log::warn!("{msg}");
    }
    res
}

/// Validate, then run the steps; returns the steps that completed alongside
/// the outcome.
fn attempt(vbm: &dyn Runner, spec: &VmSpec) -> (Vec<&'static str>, Result<()>) {
    let mut done = Vec::new();
    if spec.disk_size_mb < MIN_DISK_MB {
        let err = VboxError::DiskTooSmall {
            size: spec.disk_size_mb,
            min: MIN_DISK_MB,
        };
        return (done, Err(err.into()));
    }
    log::info!("Creating VM {}", spec.name);
    if let Ok(req) = serde_json::to_string(spec) {
        log::debug!("request: {req}");
    }
    let res = run_steps(vbm, spec, &mut done)
        .with_context(|| format!("creating VM {}", spec.name));
    (done, res)
}

/// Text for the warning logged when a failure leaves the VM half built.
pub fn partial_state_warning(vm: &str, done: &[&str], res: &Result<()>) -> Option<String> {
    if res.is_ok() || done.is_empty() {
        return None;
    }
    Some(format!(
        "VM {vm} left partially configured; completed steps: {}",
        done.join(", ")
    ))
}

fn run_steps(vbm: &dyn Runner, spec: &VmSpec, done: &mut Vec<&'static str>) -> Result<()> {
    let name = spec.name.as_str();

    vbm.run(&[
        "createvm",
        "--name",
        name,
        "--ostype",
        spec.os_type.as_str(),
        "--register",
    ])?;
    done.push("register");

    vbm.run(&["modifyvm", name, "--memory", spec.ram_mb.to_string().as_str()])?;
    done.push("memory");
    vbm.run(&["modifyvm", name, "--cpus", spec.cpus.to_string().as_str()])?;
    done.push("cpus");

    let disk = spec.disk_file();
    log::info!("Creating {} MB {} disk {disk}", spec.disk_size_mb, spec.disk_format);
    vbm.run(&[
        "createmedium",
        "disk",
        "--filename",
        disk.as_str(),
        "--size",
        spec.disk_size_mb.to_string().as_str(),
        "--format",
        spec.disk_format.as_vbox(),
    ])?;
    done.push("disk");

    vbm.run(&[
        "storagectl",
        name,
        "--name",
        SATA_CONTROLLER,
        "--add",
        "sata",
        "--controller",
        "IntelAhci",
    ])?;
    done.push("sata controller");
    vbm.run(&[
        "storageattach",
        name,
        "--storagectl",
        SATA_CONTROLLER,
        "--port",
        "0",
        "--device",
        "0",
        "--type",
        "hdd",
        "--medium",
        disk.as_str(),
    ])?;
    done.push("attach disk");

    if let Some(iso) = &spec.iso {
        if !iso.exists() {
            return Err(VboxError::MediaNotFound(iso.clone()).into());
        }
        let medium = iso.to_string_lossy().into_owned();
        vbm.run(&["storagectl", name, "--name", IDE_CONTROLLER, "--add", "ide"])?;
        done.push("ide controller");
        vbm.run(&[
            "storageattach",
            name,
            "--storagectl",
            IDE_CONTROLLER,
            "--port",
            "0",
            "--device",
            "0",
            "--type",
            "dvddrive",
            "--medium",
            medium.as_str(),
        ])?;
        done.push("attach iso");
    }

    configure_network(vbm, name, spec.network, &spec.adapters)?;
    done.push("network");
    Ok(())
}

/// Argument list for `modifyvm` that puts NIC 1 in `mode`.
pub fn network_args<'a>(
    vm: &'a str,
    mode: NetworkMode,
    adapters: &'a HostAdapters,
) -> Vec<&'a str> {
    let mut args = vec!["modifyvm", vm, "--nic1"];
    match mode {
        NetworkMode::Nat => args.push("nat"),
        NetworkMode::Bridged => {
            args.extend(["bridged", "--bridgeadapter1", adapters.bridged.as_str()])
        }
        NetworkMode::HostOnly => {
            args.extend(["hostonly", "--hostonlyadapter1", adapters.hostonly.as_str()])
        }
        NetworkMode::None => args.push("none"),
    }
    args
}

pub fn configure_network(
    vbm: &dyn Runner,
    vm: &str,
    mode: NetworkMode,
    adapters: &HostAdapters,
) -> Result<()> {
    log::debug!("configuring nic1 of {vm} as {mode:?}");
    vbm.run(&network_args(vm, mode, adapters))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::runner::testing::FakeRunner;

    fn spec(disk: u64, iso: Option<PathBuf>) -> VmSpec {
        VmSpec {
            name: "TestVM".into(),
            os_type: "Linux_64".into(),
            ram_mb: 1024,
            cpus: 2,
            disk_size_mb: disk,
            disk_format: DiskFormat::Vdi,
            iso,
            start: false,
            network: NetworkMode::Nat,
            adapters: HostAdapters::default(),
        }
    }

    #[test]
    fn small_disk_is_rejected_before_any_call() {
        for size in [0, 1, 500, 999] {
            let fake = FakeRunner::new();
            let err = create_vm(&fake, &spec(size, None)).unwrap_err();
            assert!(err.to_string().contains("at least 1000 MB"));
            assert!(fake.calls().is_empty(), "size {size} issued calls");
        }
    }

    #[test]
    fn full_sequence_without_iso() {
        let fake = FakeRunner::new();
        create_vm(&fake, &spec(8000, None)).unwrap();
        assert_eq!(
            fake.lines(),
            vec![
                "createvm --name TestVM --ostype Linux_64 --register",
                "modifyvm TestVM --memory 1024",
                "modifyvm TestVM --cpus 2",
                "createmedium disk --filename TestVM_disk.vdi --size 8000 --format VDI",
                "storagectl TestVM --name SATA --add sata --controller IntelAhci",
                "storageattach TestVM --storagectl SATA --port 0 --device 0 --type hdd --medium TestVM_disk.vdi",
                "modifyvm TestVM --nic1 nat",
            ]
        );
    }

    #[test]
    fn missing_iso_stops_before_media_attach() {
        let fake = FakeRunner::new();
        let err = create_vm(&fake, &spec(8000, Some("/nonexistent.iso".into()))).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<VboxError>(),
            Some(VboxError::MediaNotFound(_))
        ));
        let lines = fake.lines();
        assert_eq!(lines.len(), 6);
        assert!(lines[5].starts_with("storageattach TestVM --storagectl SATA"));
        assert!(!lines.iter().any(|l| l.contains("IDE") || l.contains("dvddrive")));
    }

    #[test]
    fn existing_iso_is_attached_as_dvd() {
        let dir = tempfile::tempdir().unwrap();
        let iso = dir.path().join("install.iso");
        std::fs::write(&iso, b"iso").unwrap();

        let fake = FakeRunner::new();
        create_vm(&fake, &spec(8000, Some(iso.clone()))).unwrap();
        let lines = fake.lines();
        assert_eq!(lines[6], "storagectl TestVM --name IDE --add ide");
        assert_eq!(
            lines[7],
            format!(
                "storageattach TestVM --storagectl IDE --port 0 --device 0 --type dvddrive --medium {}",
                iso.display()
            )
        );
        assert_eq!(lines[8], "modifyvm TestVM --nic1 nat");
    }

    #[test]
    fn failing_step_aborts_the_rest() {
        let fake = FakeRunner::new().failing_on(&["createmedium"]);
        let err = create_vm(&fake, &spec(8000, None)).unwrap_err();
        assert!(err.to_string().contains("creating VM TestVM"));
        assert!(matches!(
            err.downcast_ref::<VboxError>(),
            Some(VboxError::Invocation { .. })
        ));
        assert_eq!(fake.calls().len(), 4);
    }

    fn steps_done(fake: &FakeRunner, spec: &VmSpec) -> (Vec<&'static str>, Option<String>) {
        let (done, res) = attempt(fake, spec);
        assert!(res.is_err());
        let warning = partial_state_warning(&spec.name, &done, &res);
        (done, warning)
    }

    #[test]
    fn disk_rejection_reports_no_partial_state() {
        let fake = FakeRunner::new();
        let (done, warning) = steps_done(&fake, &spec(500, None));
        assert!(done.is_empty());
        assert!(warning.is_none());
    }

    #[test]
    fn disk_creation_failure_reports_vm_settings() {
        let fake = FakeRunner::new().failing_on(&["createmedium"]);
        let (done, warning) = steps_done(&fake, &spec(8000, None));
        assert_eq!(done, vec!["register", "memory", "cpus"]);
        assert_eq!(
            warning.unwrap(),
            "VM TestVM left partially configured; completed steps: register, memory, cpus"
        );
    }

    #[test]
    fn disk_attach_failure_reports_sata_controller() {
        let fake = FakeRunner::new().failing_on(&["storageattach"]);
        let (done, warning) = steps_done(&fake, &spec(8000, None));
        assert!(fake
            .lines()
            .contains(&"storagectl TestVM --name SATA --add sata --controller IntelAhci".to_string()));
        assert_eq!(done, vec!["register", "memory", "cpus", "disk", "sata controller"]);
        assert!(warning.unwrap().ends_with("disk, sata controller"));
    }

    #[test]
    fn dvd_attach_failure_reports_ide_controller() {
        let dir = tempfile::tempdir().unwrap();
        let iso = dir.path().join("install.iso");
        std::fs::write(&iso, b"iso").unwrap();

        let fake = FakeRunner::new().failing_on(&["storageattach", "TestVM", "--storagectl", "IDE"]);
        let (done, _) = steps_done(&fake, &spec(8000, Some(iso)));
        assert_eq!(done.last(), Some(&"ide controller"));
        assert!(!done.contains(&"attach iso"));
    }

    #[test]
    fn missing_iso_reports_attached_disk() {
        let fake = FakeRunner::new();
        let (done, warning) = steps_done(&fake, &spec(8000, Some("/nonexistent.iso".into())));
        assert_eq!(
            done,
            vec!["register", "memory", "cpus", "disk", "sata controller", "attach disk"]
        );
        assert!(warning.unwrap().contains("attach disk"));
    }

    #[test]
    fn success_reports_nothing() {
        let fake = FakeRunner::new();
        let (done, res) = attempt(&fake, &spec(8000, None));
        assert!(res.is_ok());
        assert_eq!(done.last(), Some(&"network"));
        assert!(partial_state_warning("TestVM", &done, &res).is_none());
    }

    #[test]
    fn network_modes_map_to_adapter_args() {
        let a = HostAdapters::default();
        let join = |m| network_args("vm", m, &a).join(" ");
        assert_eq!(join(NetworkMode::Nat), "modifyvm vm --nic1 nat");
        assert_eq!(
            join(NetworkMode::Bridged),
            "modifyvm vm --nic1 bridged --bridgeadapter1 eth0"
        );
        assert_eq!(
            join(NetworkMode::HostOnly),
            "modifyvm vm --nic1 hostonly --hostonlyadapter1 vboxnet0"
        );
        assert_eq!(join(NetworkMode::None), "modifyvm vm --nic1 none");
        assert_eq!(
            join(NetworkMode::from_str_lossy("token-ring")),
            "modifyvm vm --nic1 none"
        );
    }

    #[test]
    fn start_flag_runs_startvm_in_gui_mode() {
        let fake = FakeRunner::new();
        let cmd = CmdCreate {
            name: "TestVM".into(),
            os_type: "Linux_64".into(),
            ram: 1024,
            cpus: 2,
            disk_size: 8000,
            disk_type: DiskFormat::Vhd,
            iso: None,
            start: true,
            network: "bridged".into(),
            bridge_adapter: "en0".into(),
            hostonly_adapter: DEFAULT_HOSTONLY_ADAPTER.into(),
        };
        cmd.run(&fake).unwrap();
        let lines = fake.lines();
        assert!(lines.contains(&"modifyvm TestVM --nic1 bridged --bridgeadapter1 en0".to_string()));
        assert!(lines.contains(
            &"createmedium disk --filename TestVM_disk.vhd --size 8000 --format VHD".to_string()
        ));
        assert_eq!(lines.last().unwrap(), "startvm TestVM --type gui");
    }
}
