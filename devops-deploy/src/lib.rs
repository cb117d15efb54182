//! Declarative description of the cloud resources hosting the info service.
//!
//! The stack is one network, one subnet, one security group and one VM. It is
//! versioned independently of the service; the only contract between the two
//! is that the service port is reachable through the security group.

pub mod model;
pub mod stack;
pub mod validation;

pub use model::{
    BootDisk, ComputeInstance, Export, InstanceResources, Network, NetworkInterface,
    RuleProtocol, SecurityGroup, SecurityRule, Stack, Subnet,
};
pub use stack::{LoadError, StackParams, default_stack, load_stack};
pub use validation::{ValidationError, validate};
