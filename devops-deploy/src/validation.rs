//! Validation of a deployment stack before it is handed to the cloud.

use ipnet::Ipv4Net;
use thiserror::Error;

use crate::model::{ComputeInstance, SSH_KEYS_METADATA, SecurityRule, Stack};

const SSH_PORT: u32 = 22;
const MAX_PORT: u32 = 65535;
const CORE_FRACTIONS: [u32; 4] = [5, 20, 50, 100];

/// Validation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} name is required")]
    NameRequired(&'static str),

    #[error("Subnet zone is required")]
    ZoneRequired,

    #[error("{kind} '{name}' does not exist")]
    UnknownReference { kind: &'static str, name: String },

    #[error("At least one CIDR block is required ({0})")]
    CidrRequired(String),

    #[error("Invalid CIDR: {0}")]
    InvalidCidr(String),

    #[error("Port out of range: {0} (must be 1-65535)")]
    PortOutOfRange(u32),

    #[error("Invalid port range: start ({0}) > end ({1})")]
    InvalidPortRange(u32, u32),

    #[error("Port range needs both bounds ({0})")]
    IncompletePortRange(String),

    #[error("Ports not allowed for protocol {0}")]
    PortsNotAllowedForProtocol(String),

    #[error("SSH must not be open to the world (rule '{0}')")]
    SshOpenToWorld(String),

    #[error("Service port {0} is not reachable over TCP from 0.0.0.0/0")]
    ServicePortUnreachable(u32),

    #[error("Instance needs at least one core")]
    NoCores,

    #[error("Instance needs memory")]
    NoMemory,

    #[error("Invalid core fraction: {0} (must be one of 5, 20, 50, 100)")]
    InvalidCoreFraction(u32),

    #[error("Boot image family is required")]
    ImageFamilyRequired,

    #[error("Boot disk size must be positive")]
    InvalidDiskSize,

    #[error("Instance needs at least one network interface")]
    NoNetworkInterface,

    #[error("SSH public key metadata is required (format user:key)")]
    SshKeyRequired,
}

pub type Result<T> = std::result::Result<T, ValidationError>;

/// Validate resource names, references, rules and the instance shape.
pub fn validate(stack: &Stack) -> Result<()> {
    require_name("Network", &stack.network.name)?;
    require_name("Subnet", &stack.subnet.name)?;
    require_name("Security group", &stack.security_group.name)?;
    require_name("Instance", &stack.instance.name)?;

    if stack.subnet.zone.trim().is_empty() {
        return Err(ValidationError::ZoneRequired);
    }
    require_reference("Network", &stack.subnet.network, &stack.network.name)?;
    parse_cidrs(&stack.subnet.name, &stack.subnet.v4_cidr_blocks)?;

    let sg = &stack.security_group;
    require_reference("Network", &sg.network, &stack.network.name)?;
    for rule in sg.ingress.iter().chain(sg.egress.iter()) {
        validate_rule(rule)?;
    }

    for rule in &sg.ingress {
        if rule.covers_tcp_port(SSH_PORT) && open_to_world(rule)? {
            return Err(ValidationError::SshOpenToWorld(rule.description.clone()));
        }
    }

    validate_port(stack.service_port)?;
    let mut reachable = false;
    for rule in &sg.ingress {
        if rule.covers_tcp_port(stack.service_port) && open_to_world(rule)? {
            reachable = true;
            break;
        }
    }
    if !reachable {
        return Err(ValidationError::ServicePortUnreachable(stack.service_port));
    }

    validate_instance(&stack.instance, stack)
}

fn require_name(kind: &'static str, name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(ValidationError::NameRequired(kind));
    }
    Ok(())
}

fn require_reference(kind: &'static str, reference: &str, existing: &str) -> Result<()> {
    if reference != existing {
        return Err(ValidationError::UnknownReference {
            kind,
            name: reference.to_string(),
        });
    }
    Ok(())
}

fn parse_cidrs(owner: &str, blocks: &[String]) -> Result<Vec<Ipv4Net>> {
    if blocks.is_empty() {
        return Err(ValidationError::CidrRequired(owner.to_string()));
    }
    blocks
        .iter()
        .map(|b| {
            b.parse::<Ipv4Net>()
                .map_err(|_| ValidationError::InvalidCidr(b.clone()))
        })
        .collect()
}

fn validate_port(port: u32) -> Result<()> {
    if port == 0 || port > MAX_PORT {
        return Err(ValidationError::PortOutOfRange(port));
    }
    Ok(())
}

/// Validate a single security rule.
pub fn validate_rule(rule: &SecurityRule) -> Result<()> {
    parse_cidrs(&rule.description, &rule.v4_cidr_blocks)?;

    match (rule.from_port, rule.to_port) {
        (None, None) => Ok(()),
        _ if !rule.protocol.has_ports() => Err(ValidationError::PortsNotAllowedForProtocol(
            rule.protocol.as_str().to_string(),
        )),
        (Some(from), Some(to)) => {
            validate_port(from)?;
            validate_port(to)?;
            if from > to {
                return Err(ValidationError::InvalidPortRange(from, to));
            }
            Ok(())
        }
        _ => Err(ValidationError::IncompletePortRange(rule.description.clone())),
    }
}

/// Whether any of the rule's CIDR blocks is a /0.
fn open_to_world(rule: &SecurityRule) -> Result<bool> {
    let nets = parse_cidrs(&rule.description, &rule.v4_cidr_blocks)?;
    Ok(nets.iter().any(|n| n.prefix_len() == 0))
}

fn validate_instance(instance: &ComputeInstance, stack: &Stack) -> Result<()> {
    let resources = &instance.resources;
    if resources.cores == 0 {
        return Err(ValidationError::NoCores);
    }
    if resources.memory_gb == 0 {
        return Err(ValidationError::NoMemory);
    }
    if !CORE_FRACTIONS.contains(&resources.core_fraction) {
        return Err(ValidationError::InvalidCoreFraction(resources.core_fraction));
    }

    if instance.boot_disk.image_family.trim().is_empty() {
        return Err(ValidationError::ImageFamilyRequired);
    }
    if instance.boot_disk.size_gb == 0 {
        return Err(ValidationError::InvalidDiskSize);
    }

    if instance.network_interfaces.is_empty() {
        return Err(ValidationError::NoNetworkInterface);
    }
    for nic in &instance.network_interfaces {
        require_reference("Subnet", &nic.subnet, &stack.subnet.name)?;
        for sg in &nic.security_groups {
            require_reference("Security group", sg, &stack.security_group.name)?;
        }
    }

    let has_key = instance
        .metadata
        .get(SSH_KEYS_METADATA)
        .and_then(|v| v.split_once(':'))
        .is_some_and(|(user, key)| !user.trim().is_empty() && !key.trim().is_empty());
    if !has_key {
        return Err(ValidationError::SshKeyRequired);
    }

    Ok(())
}
