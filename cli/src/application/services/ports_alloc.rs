//! Free-port discovery over a set of existing reservations.

use crate::domain::{AllocError, PortRule, PublicEndpoint};

/// A port already bound on the inspected resource, and who holds it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortReservation {
    pub port: u16,
    pub owner: Option<String>,
}

/// Find a free port in the inclusive range `[start, end]`.
///
/// Reservations held by `preferred_owner` are reused: the first one found
/// inside the range is returned as-is, taking priority over allocating a
/// fresh port. Every other reservation removes its port from the candidate
/// set; the answer is the smallest port left.
///
/// Without a `preferred_owner` there is no reuse path at all — ownerless
/// reservations still consume their ports.
///
/// # Errors
///
/// [`AllocError::NoAvailablePort`] when the range is exhausted.
pub fn find_free_port(
    start: u16,
    end: u16,
    reservations: &[PortReservation],
    preferred_owner: Option<&str>,
) -> Result<u16, AllocError> {
    let mut candidates: Vec<u16> = (start..=end).collect();
    for reservation in reservations {
        if reservation.port < start || reservation.port > end {
            continue;
        }
        if let (Some(owner), Some(preferred)) = (reservation.owner.as_deref(), preferred_owner) {
            if owner == preferred {
                return Ok(reservation.port);
            }
        }
        candidates.retain(|&p| p != reservation.port);
    }
    candidates.first().copied().ok_or(AllocError::NoAvailablePort)
}

/// Reservations taken by a load balancer's own tcp port rules.
#[must_use]
pub fn lb_reservations(rules: &[PortRule]) -> Vec<PortReservation> {
    rules
        .iter()
        .filter(|rule| rule.protocol.eq_ignore_ascii_case("tcp"))
        .map(|rule| PortReservation {
            port: rule.source_port,
            owner: rule.service_id.clone(),
        })
        .collect()
}

/// Reservations taken by a host's public endpoints.
#[must_use]
pub fn host_reservations(endpoints: &[PublicEndpoint]) -> Vec<PortReservation> {
    endpoints
        .iter()
        .map(|endpoint| PortReservation {
            port: endpoint.port,
            owner: endpoint.service_id.clone(),
        })
        .collect()
}
