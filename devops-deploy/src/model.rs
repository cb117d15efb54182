//! Resource types of the deployment stack.
//!
//! Resources reference each other by name. Ports are kept as `u32` so an
//! out-of-range value in a loaded file reaches validation instead of failing
//! deserialisation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Metadata key carrying `user:public-key` for SSH access.
pub const SSH_KEYS_METADATA: &str = "ssh-keys";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stack {
    /// Port the info service listens on inside the VM.
    pub service_port: u32,
    pub network: Network,
    pub subnet: Subnet,
    pub security_group: SecurityGroup,
    pub instance: ComputeInstance,
    #[serde(default)]
    pub exports: Vec<Export>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Network {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subnet {
    pub name: String,
    pub zone: String,
    pub network: String,
    pub v4_cidr_blocks: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityGroup {
    pub name: String,
    pub network: String,
    #[serde(default)]
    pub ingress: Vec<SecurityRule>,
    #[serde(default)]
    pub egress: Vec<SecurityRule>,
}

/// Security rule protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RuleProtocol {
    Tcp,
    Udp,
    Icmp,
    Any,
}

impl RuleProtocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleProtocol::Tcp => "TCP",
            RuleProtocol::Udp => "UDP",
            RuleProtocol::Icmp => "ICMP",
            RuleProtocol::Any => "ANY",
        }
    }

    /// Whether the protocol carries port numbers.
    pub fn has_ports(&self) -> bool {
        matches!(self, RuleProtocol::Tcp | RuleProtocol::Udp)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityRule {
    pub protocol: RuleProtocol,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_port: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_port: Option<u32>,
    pub v4_cidr_blocks: Vec<String>,
    #[serde(default)]
    pub description: String,
}

impl SecurityRule {
    /// TCP rule for a single port.
    pub fn tcp(port: u32, cidr: &str, description: &str) -> Self {
        Self {
            protocol: RuleProtocol::Tcp,
            from_port: Some(port),
            to_port: Some(port),
            v4_cidr_blocks: vec![cidr.to_string()],
            description: description.to_string(),
        }
    }

    /// Rule matching every protocol and port.
    pub fn any(cidr: &str, description: &str) -> Self {
        Self {
            protocol: RuleProtocol::Any,
            from_port: None,
            to_port: None,
            v4_cidr_blocks: vec![cidr.to_string()],
            description: description.to_string(),
        }
    }

    /// Whether TCP traffic to `port` matches this rule. A port-carrying rule
    /// without bounds covers all ports.
    pub fn covers_tcp_port(&self, port: u32) -> bool {
        match self.protocol {
            RuleProtocol::Any => true,
            RuleProtocol::Tcp => match (self.from_port, self.to_port) {
                (Some(from), Some(to)) => from <= port && port <= to,
                (None, None) => true,
                _ => false,
            },
            RuleProtocol::Udp | RuleProtocol::Icmp => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComputeInstance {
    pub name: String,
    pub platform_id: String,
    pub resources: InstanceResources,
    pub boot_disk: BootDisk,
    pub network_interfaces: Vec<NetworkInterface>,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceResources {
    pub cores: u32,
    pub memory_gb: u32,
    /// Guaranteed share of each core, in percent.
    pub core_fraction: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BootDisk {
    pub image_family: String,
    pub size_gb: u32,
    pub disk_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkInterface {
    pub subnet: String,
    pub nat: bool,
    #[serde(default)]
    pub security_groups: Vec<String>,
}

/// Named output of the stack, e.g. the VM's public address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Export {
    pub name: String,
    pub source: String,
}
