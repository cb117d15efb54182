//! Host facts collection.
//!
//! Facts are read from the host on every call:
//! - hostname crate for the host name
//! - sysinfo crate for kernel version and logical CPUs
//! - compile-time constants for OS family and architecture

use serde::Serialize;
use sysinfo::{CpuRefreshKind, RefreshKind, System};
use thiserror::Error;

/// Compiler version captured by the build script.
pub const RUNTIME_VERSION: &str = env!("DEVOPS_INFO_RUSTC_VERSION");

/// Errors reading host facts.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("failed to read hostname: {0}")]
    Hostname(#[from] std::io::Error),
}

/// Host and platform identity at the time of the call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SystemFacts {
    pub hostname: String,
    pub platform: String,
    pub platform_version: String,
    pub architecture: String,
    pub cpu_count: usize,
    pub runtime_version: String,
}

/// Source of host facts.
pub trait HostSource: Send + Sync {
    fn collect(&self) -> Result<SystemFacts, HostError>;
}

/// Reads facts from the machine the service runs on.
#[derive(Debug, Default, Clone, Copy)]
pub struct LiveHost;

impl HostSource for LiveHost {
    fn collect(&self) -> Result<SystemFacts, HostError> {
        let hostname = hostname::get()?.to_string_lossy().into_owned();

        let sys = System::new_with_specifics(RefreshKind::new().with_cpu(CpuRefreshKind::new()));

        Ok(SystemFacts {
            hostname,
            platform: platform_name(std::env::consts::OS).to_string(),
            platform_version: System::kernel_version().unwrap_or_else(|| "unknown".to_string()),
            architecture: std::env::consts::ARCH.to_string(),
            cpu_count: sys.cpus().len(),
            runtime_version: RUNTIME_VERSION.to_string(),
        })
    }
}

/// Map a Rust target OS to the conventional kernel family name.
fn platform_name(os: &str) -> &str {
    match os {
        "linux" => "Linux",
        "macos" => "Darwin",
        "windows" => "Windows",
        "freebsd" => "FreeBSD",
        "openbsd" => "OpenBSD",
        "netbsd" => "NetBSD",
        other => other,
    }
}
