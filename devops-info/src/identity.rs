use serde::Serialize;

/// Static identity of the running service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ServiceIdentity {
    pub name: &'static str,
    pub version: &'static str,
    pub description: &'static str,
    pub framework: &'static str,
}

pub const SERVICE: ServiceIdentity = ServiceIdentity {
    name: "devops-info-service",
    version: env!("CARGO_PKG_VERSION"),
    description: "DevOps course info service",
    framework: "Axum",
};
