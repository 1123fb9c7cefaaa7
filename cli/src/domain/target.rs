//! Wire types for load-balancer targets and port rules.

use serde::{Deserialize, Serialize};

use crate::domain::port_mapping::PortMapping;

/// One service-link entry bound to a load balancer.
///
/// Fetched fresh on every reconciliation, mutated in memory, and written
/// back as a full replacement — the client never caches these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Target {
    pub service_id: String,
    pub ports: Vec<PortMapping>,
    /// Remote lifecycle state; absent on entries the client creates itself.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<TargetState>,
}

impl Target {
    /// New single-mapping target, as created on first add for a service.
    #[must_use]
    pub fn new(service_id: impl Into<String>, mapping: PortMapping) -> Self {
        Self {
            service_id: service_id.into(),
            ports: vec![mapping],
            state: None,
        }
    }

    /// Stale remote artifact: must be dropped from the working set before
    /// any mutation is computed.
    #[must_use]
    pub fn is_removed(&self) -> bool {
        self.state == Some(TargetState::Removed)
    }
}

/// Remote lifecycle state of a target entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetState {
    Active,
    Removed,
    #[serde(other)]
    Other,
}

/// A load balancer's own declared container port binding.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortRule {
    pub source_port: u16,
    #[serde(default)]
    pub target_port: Option<u16>,
    pub protocol: String,
    #[serde(default)]
    pub service_id: Option<String>,
}

impl PortRule {
    /// Whether this rule is the `"<port>:<port>/tcp"` binding, i.e. the LB
    /// container itself publishes `port`. Decides the addressing mode for
    /// new mappings on that port.
    #[must_use]
    pub fn publishes(&self, port: u16) -> bool {
        self.protocol.eq_ignore_ascii_case("tcp")
            && self.source_port == port
            && self.target_port.unwrap_or(self.source_port) == port
    }
}

/// One entry of a host's `publicEndpoints` list.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicEndpoint {
    pub port: u16,
    #[serde(default)]
    pub service_id: Option<String>,
    #[serde(default)]
    pub ip_address: Option<String>,
}
