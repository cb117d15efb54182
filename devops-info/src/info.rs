//! Response aggregation for the info and health endpoints.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::identity::{SERVICE, ServiceIdentity};
use crate::system::{HostError, HostSource, SystemFacts};
use crate::uptime::StartInstant;

/// Caller details echoed back by the info endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestContext {
    pub client_ip: Option<String>,
    pub user_agent: Option<String>,
    pub method: String,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuntimeInfo {
    pub uptime_seconds: u64,
    pub uptime_human: String,
    pub current_time: String,
    pub timezone: &'static str,
}

/// A route advertised in the info response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EndpointInfo {
    pub path: &'static str,
    pub method: &'static str,
    pub description: &'static str,
}

pub const ENDPOINTS: &[EndpointInfo] = &[
    EndpointInfo {
        path: "/",
        method: "GET",
        description: "Service information",
    },
    EndpointInfo {
        path: "/health",
        method: "GET",
        description: "Health check",
    },
];

/// Body of `GET /`.
#[derive(Debug, Clone, Serialize)]
pub struct InfoResponse {
    pub service: ServiceIdentity,
    pub system: SystemFacts,
    pub runtime: RuntimeInfo,
    pub request: RequestContext,
    pub endpoints: &'static [EndpointInfo],
}

/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
    pub uptime_seconds: u64,
}

/// ISO-8601 UTC timestamp with microseconds and an explicit `+00:00` offset.
pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, false)
}

/// Compose service identity, host facts, uptime and caller context.
pub fn build_info(
    started: &StartInstant,
    host: &dyn HostSource,
    request: RequestContext,
) -> Result<InfoResponse, HostError> {
    let uptime = started.uptime();
    let system = host.collect()?;

    Ok(InfoResponse {
        service: SERVICE,
        system,
        runtime: RuntimeInfo {
            uptime_seconds: uptime.seconds,
            uptime_human: uptime.human,
            current_time: iso_timestamp(Utc::now()),
            timezone: "UTC",
        },
        request,
        endpoints: ENDPOINTS,
    })
}

pub fn build_health(started: &StartInstant) -> HealthResponse {
    HealthResponse {
        status: "healthy",
        timestamp: iso_timestamp(Utc::now()),
        uptime_seconds: started.uptime().seconds,
    }
}
