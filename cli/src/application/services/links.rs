//! Target reconciler — the read-modify-write engine for load-balancer
//! service links.
//!
//! Every operation fetches the target list fresh, mutates it in memory,
//! writes the whole list back (`setservicelinks` has replace semantics,
//! not patch), then triggers the `update` action so routing takes effect.
//!
//! The platform offers no lock or version token on the target list, so two
//! concurrent invocations (or an invocation racing the platform's own
//! reconciliation) can silently lose one party's update. That hazard is
//! inherent to the remote API and is deliberately not papered over here.

use anyhow::{Context, Result};
use serde_json::{Value, json};

use crate::application::ports::ApiTransport;
use crate::application::services::ports_alloc::{self, PortReservation};
use crate::domain::{ApiConfig, PortMapping, PortRule, Target, TargetState};

/// Result of an add reconciliation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    /// The mapping was appended (or a new target created) and applied.
    Added(PortMapping),
    /// The route is already bound for this service; nothing was written.
    AlreadyExists { service_id: String },
}

/// Result of a remove reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// Number of mappings removed, duplicates included.
    Removed { mappings: usize },
    /// No mapping matched the route.
    NotFound,
}

/// Add a routing rule for `service_id`.
///
/// The addressing mode depends on the load balancer's own port rules: when
/// the LB container publishes `external` itself (`"ext:ext/tcp"`), the bare
/// `"ext=int"` form is used; otherwise `"host:ext=int"`.
///
/// Idempotent-with-notice: if any existing mapping already serves the route
/// (same host+external, case-insensitive on host, or in bare mode a bare
/// mapping with the same internal port), nothing is written.
///
/// # Errors
///
/// Fails on transport errors, a missing load-balancer id, or unparseable
/// remote state. If the list replacement succeeds but the apply action
/// fails, the platform is left with an accepted-but-unapplied
/// configuration; this surfaces as the apply error and is not retried.
pub fn add_target(
    api: &impl ApiTransport,
    config: &ApiConfig,
    service_id: &str,
    host: &str,
    external: u16,
    internal: u16,
) -> Result<AddOutcome> {
    let lb_id = config.load_balancer_id()?;
    let mut targets = load_balancer_targets(api, lb_id)?;
    let rules = load_balancer_port_rules(api, lb_id)?;

    let bare_mode = rules.iter().any(|rule| rule.publishes(external));
    let mapping = if bare_mode {
        PortMapping::Bare { external, internal }
    } else {
        PortMapping::HostQualified {
            host: host.to_string(),
            external,
            internal,
        }
    };

    let duplicate = targets
        .iter()
        .filter(|target| target.service_id == service_id)
        .flat_map(|target| &target.ports)
        .any(|existing| match existing {
            PortMapping::HostQualified {
                host: own,
                external: ext,
                ..
            } => *ext == external && own.eq_ignore_ascii_case(host),
            PortMapping::Bare { internal: int, .. } => bare_mode && *int == internal,
        });
    if duplicate {
        return Ok(AddOutcome::AlreadyExists {
            service_id: service_id.to_string(),
        });
    }

    let mut appended = false;
    for target in targets
        .iter_mut()
        .filter(|target| target.service_id == service_id)
    {
        target.ports.push(mapping.clone());
        appended = true;
    }
    if !appended {
        targets.push(Target::new(service_id, mapping.clone()));
    }

    replace_targets(api, lb_id, &targets)?;
    apply(api, lb_id)?;
    Ok(AddOutcome::Added(mapping))
}

/// Remove the routing rule `host:external` (or bare `external`) for
/// `service_id`.
///
/// The scan covers ALL targets for the service and removes EVERY matching
/// mapping — the platform is known to create duplicate target entries for
/// one route, and a single call must clean them all up. Targets whose port
/// list empties out are dropped entirely.
///
/// The write-back and apply run even when nothing matched, so stale
/// `removed`-state entries get purged either way.
///
/// # Errors
///
/// Same failure modes as [`add_target`].
pub fn remove_target(
    api: &impl ApiTransport,
    config: &ApiConfig,
    service_id: &str,
    host: &str,
    external: u16,
) -> Result<RemoveOutcome> {
    let lb_id = config.load_balancer_id()?;
    let mut targets = load_balancer_targets(api, lb_id)?;

    let mut removed = 0usize;
    targets.retain_mut(|target| {
        if target.service_id != service_id {
            return true;
        }
        let before = target.ports.len();
        target
            .ports
            .retain(|mapping| !mapping.serves_route(host, external));
        removed += before - target.ports.len();
        !target.ports.is_empty()
    });

    replace_targets(api, lb_id, &targets)?;
    apply(api, lb_id)?;

    Ok(if removed == 0 {
        RemoveOutcome::NotFound
    } else {
        RemoveOutcome::Removed { mappings: removed }
    })
}

/// External port of the service's first bound mapping, if any.
///
/// # Errors
///
/// Fails on transport errors or a missing load-balancer id.
pub fn service_port(
    api: &impl ApiTransport,
    config: &ApiConfig,
    service_id: &str,
) -> Result<Option<u16>> {
    let targets = load_balancer_targets(api, config.load_balancer_id()?)?;
    Ok(targets
        .iter()
        .find(|target| target.service_id == service_id)
        .and_then(|target| target.ports.first())
        .map(PortMapping::external))
}

/// First free port in `[start, end]` judged against the load balancer's own
/// tcp port rules.
///
/// # Errors
///
/// Fails on transport errors or when the range is exhausted.
pub fn available_lb_port(
    api: &impl ApiTransport,
    config: &ApiConfig,
    start: u16,
    end: u16,
    preferred_owner: Option<&str>,
) -> Result<u16> {
    let rules = load_balancer_port_rules(api, config.load_balancer_id()?)?;
    let reservations: Vec<PortReservation> = ports_alloc::lb_reservations(&rules);
    Ok(ports_alloc::find_free_port(
        start,
        end,
        &reservations,
        preferred_owner,
    )?)
}

// ── Remote list access ────────────────────────────────────────────────────────

/// Fetch the live target list bound to the load balancer.
///
/// The consume-map listing covers the whole project, so it is narrowed to
/// services the LB actually consumes; entries without ports are skipped and
/// `removed`-state entries are dropped up front (stale remote artifacts,
/// not live bindings).
pub fn load_balancer_targets(api: &impl ApiTransport, lb_id: &str) -> Result<Vec<Target>> {
    let consumed = api.get(&format!("v1/loadbalancerservices/{lb_id}/consumedservices"))?;
    let consumed_ids: Vec<&str> = data_items(&consumed)
        .filter_map(|svc| svc.get("id").and_then(Value::as_str))
        .collect();

    let maps = api.get("v1/serviceconsumemaps?limit=-1")?;
    let mut targets = Vec::new();
    for item in data_items(&maps) {
        let Some(service_id) = item.get("consumedServiceId").and_then(Value::as_str) else {
            continue;
        };
        if !consumed_ids.contains(&service_id) {
            continue;
        }
        let Some(ports) = item.get("ports").filter(|p| !p.is_null()) else {
            continue;
        };
        let target = Target {
            service_id: service_id.to_string(),
            ports: serde_json::from_value(ports.clone())
                .with_context(|| format!("unparseable port list on target {service_id}"))?,
            state: item
                .get("state")
                .filter(|s| !s.is_null())
                .map(|s| serde_json::from_value::<TargetState>(s.clone()))
                .transpose()
                .context("unparseable target state")?,
        };
        if target.is_removed() {
            continue;
        }
        targets.push(target);
    }
    Ok(targets)
}

/// The load balancer's own declared port rules.
pub fn load_balancer_port_rules(api: &impl ApiTransport, lb_id: &str) -> Result<Vec<PortRule>> {
    let body = api.get(&format!("v1/loadbalancerservices/{lb_id}"))?;
    let Some(rules) = body.pointer("/lbConfig/portRules").filter(|r| !r.is_null()) else {
        return Ok(Vec::new());
    };
    serde_json::from_value(rules.clone()).context("unparseable load balancer port rules")
}

/// Replace the full service-link list (replace semantics, not patch).
fn replace_targets(api: &impl ApiTransport, lb_id: &str, targets: &[Target]) -> Result<()> {
    api.post(
        &format!("v1/loadbalancerservices/{lb_id}?action=setservicelinks"),
        &json!({ "serviceLinks": targets }),
    )?;
    Ok(())
}

/// Trigger the apply action so the replaced list takes effect.
fn apply(api: &impl ApiTransport, lb_id: &str) -> Result<()> {
    api.post(
        &format!("v1/loadbalancerservices/{lb_id}?action=update"),
        &json!({}),
    )?;
    Ok(())
}

fn data_items(body: &Value) -> impl Iterator<Item = &Value> {
    body.get("data")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
        .iter()
}
