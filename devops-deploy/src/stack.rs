use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

use crate::model::{
    BootDisk, ComputeInstance, Export, InstanceResources, Network, NetworkInterface,
    SSH_KEYS_METADATA, SecurityGroup, SecurityRule, Stack, Subnet,
};

pub const DEFAULT_ADMIN_CIDR: &str = "151.243.28.100/32";
pub const DEFAULT_SSH_USER: &str = "ubuntu";
pub const DEFAULT_SERVICE_PORT: u32 = 5000;

pub const SUBNET_CIDR: &str = "10.0.1.0/24";
pub const ANYWHERE: &str = "0.0.0.0/0";

const NETWORK_NAME: &str = "devops-network";
const SUBNET_NAME: &str = "devops-subnet";
const SECURITY_GROUP_NAME: &str = "devops-sg";
const INSTANCE_NAME: &str = "devops-vm";

/// Errors loading a stack file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read stack file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse stack file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Inputs that vary between deployments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackParams {
    pub zone: String,
    /// Only source allowed to reach SSH.
    pub admin_cidr: String,
    pub ssh_user: String,
    pub ssh_public_key: String,
    pub service_port: u32,
}

impl StackParams {
    pub fn new(zone: impl Into<String>, ssh_public_key: impl Into<String>) -> Self {
        Self {
            zone: zone.into(),
            admin_cidr: DEFAULT_ADMIN_CIDR.to_string(),
            ssh_user: DEFAULT_SSH_USER.to_string(),
            ssh_public_key: ssh_public_key.into().trim().to_string(),
            service_port: DEFAULT_SERVICE_PORT,
        }
    }
}

/// Build the stack the info service is deployed with.
pub fn default_stack(params: &StackParams) -> Stack {
    let network = Network {
        name: NETWORK_NAME.to_string(),
    };

    let subnet = Subnet {
        name: SUBNET_NAME.to_string(),
        zone: params.zone.clone(),
        network: network.name.clone(),
        v4_cidr_blocks: vec![SUBNET_CIDR.to_string()],
    };

    let security_group = SecurityGroup {
        name: SECURITY_GROUP_NAME.to_string(),
        network: network.name.clone(),
        ingress: vec![
            SecurityRule::tcp(22, &params.admin_cidr, "SSH"),
            SecurityRule::tcp(80, ANYWHERE, "HTTP"),
            SecurityRule::tcp(
                params.service_port,
                ANYWHERE,
                &format!("App port {}", params.service_port),
            ),
        ],
        egress: vec![SecurityRule::any(ANYWHERE, "Allow all outbound")],
    };

    let mut metadata = BTreeMap::new();
    metadata.insert(
        SSH_KEYS_METADATA.to_string(),
        format!("{}:{}", params.ssh_user, params.ssh_public_key),
    );

    let instance = ComputeInstance {
        name: INSTANCE_NAME.to_string(),
        platform_id: "standard-v2".to_string(),
        resources: InstanceResources {
            cores: 2,
            memory_gb: 1,
            core_fraction: 20,
        },
        boot_disk: BootDisk {
            image_family: "ubuntu-2204-lts".to_string(),
            size_gb: 10,
            disk_type: "network-hdd".to_string(),
        },
        network_interfaces: vec![NetworkInterface {
            subnet: subnet.name.clone(),
            nat: true,
            security_groups: vec![security_group.name.clone()],
        }],
        metadata,
    };

    let exports = vec![Export {
        name: "public_ip".to_string(),
        source: format!("{}.network_interfaces[0].nat_ip_address", instance.name),
    }];

    Stack {
        service_port: params.service_port,
        network,
        subnet,
        security_group,
        instance,
        exports,
    }
}

/// Load a stack previously rendered as JSON.
pub fn load_stack(path: &Path) -> Result<Stack, LoadError> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
