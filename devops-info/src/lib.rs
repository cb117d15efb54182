pub mod config;
pub mod identity;
pub mod info;
pub mod rest;
pub mod system;
pub mod uptime;

pub use config::Config;
pub use identity::{SERVICE, ServiceIdentity};
pub use rest::{AppState, create_router};
pub use system::{HostError, HostSource, LiveHost, SystemFacts};
pub use uptime::{StartInstant, Uptime};
