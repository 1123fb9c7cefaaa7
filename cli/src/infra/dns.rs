//! DNS registrar client for type-A records.
//!
//! Thin collaborator around a registrar HTTP API (`dns/list`, `dns/add`,
//! `dns/del`) authenticated by a token header. The registrar reports
//! application errors inside 2xx responses via a `success` field;
//! `record_exists` on add and `no_such_record` on delete are tolerated so
//! the commands stay idempotent.

use anyhow::{Context, Result, bail};
use serde_json::Value;

/// Registrar connection parameters.
#[derive(Debug, Clone)]
pub struct DnsConfig {
    /// API base URL, e.g. `https://dns.example.com/api2/admin`.
    pub base_url: String,
    /// Value of the `PddToken` auth header.
    pub token: String,
}

/// Outcome of a record mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DnsOutcome {
    Changed,
    /// The record was already in the requested state.
    NoOp,
}

pub struct DnsClient {
    agent: ureq::Agent,
    config: DnsConfig,
}

impl DnsClient {
    #[must_use]
    pub fn new(config: DnsConfig) -> Self {
        Self {
            agent: ureq::Agent::new(),
            config: DnsConfig {
                base_url: config.base_url.trim_end_matches('/').to_string(),
                ..config
            },
        }
    }

    /// Add a type-A record pointing `fqdn` at `ip`.
    ///
    /// # Errors
    ///
    /// Fails on transport errors or any registrar error other than
    /// `record_exists`.
    pub fn add_record(&self, fqdn: &str, ip: &str, ttl: u32) -> Result<DnsOutcome> {
        let (domain, subdomain) = split_fqdn(fqdn)?;
        let ttl = ttl.to_string();
        let body = self.post(
            "dns/add",
            &[
                ("domain", domain),
                ("type", "A"),
                ("subdomain", subdomain),
                ("ttl", &ttl),
                ("content", ip),
            ],
        )?;
        match registrar_error(&body) {
            None => Ok(DnsOutcome::Changed),
            Some("record_exists") => Ok(DnsOutcome::NoOp),
            Some(err) => bail!("Failed to add record {fqdn}: {err}"),
        }
    }

    /// Remove the type-A record for `fqdn`. A record that does not exist is
    /// a no-op, not an error.
    ///
    /// # Errors
    ///
    /// Fails on transport errors or any registrar error other than
    /// `no_such_record`.
    pub fn remove_record(&self, fqdn: &str) -> Result<DnsOutcome> {
        let (domain, _) = split_fqdn(fqdn)?;
        let Some(record_id) = self.record_id(domain, fqdn)? else {
            return Ok(DnsOutcome::NoOp);
        };
        let body = self.post("dns/del", &[("domain", domain), ("record_id", &record_id)])?;
        match registrar_error(&body) {
            None => Ok(DnsOutcome::Changed),
            Some("no_such_record") => Ok(DnsOutcome::NoOp),
            Some(err) => bail!("Failed to remove record {fqdn}: {err}"),
        }
    }

    fn record_id(&self, domain: &str, fqdn: &str) -> Result<Option<String>> {
        let response = self
            .agent
            .get(&format!("{}/dns/list", self.config.base_url))
            .set("PddToken", &self.config.token)
            .query("domain", domain)
            .call()
            .with_context(|| format!("failed to list records for {domain}"))?;
        let body: Value = response
            .into_json()
            .context("registrar list response is not valid JSON")?;
        if let Some(err) = registrar_error(&body) {
            bail!("Failed to list records for {domain}: {err}");
        }
        let records = body.get("records").and_then(Value::as_array);
        for record in records.into_iter().flatten() {
            if record.get("fqdn").and_then(Value::as_str) == Some(fqdn) {
                return Ok(record
                    .get("record_id")
                    .map(|id| match id {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    }));
            }
        }
        Ok(None)
    }

    fn post(&self, path: &str, params: &[(&str, &str)]) -> Result<Value> {
        let mut request = self
            .agent
            .post(&format!("{}/{path}", self.config.base_url))
            .set("PddToken", &self.config.token);
        for (key, value) in params {
            request = request.query(key, value);
        }
        let response = request
            .call()
            .with_context(|| format!("registrar request {path} failed"))?;
        response
            .into_json()
            .context("registrar response is not valid JSON")
    }
}

/// The registrar's in-band error, if the response carries one.
fn registrar_error(body: &Value) -> Option<&str> {
    if body.get("success").and_then(Value::as_str) == Some("error") {
        return Some(body.get("error").and_then(Value::as_str).unwrap_or("unknown"));
    }
    None
}

/// Split an fqdn into the registrable domain (last two labels) and the
/// subdomain part (everything before them).
fn split_fqdn(fqdn: &str) -> Result<(&str, &str)> {
    let labels: Vec<&str> = fqdn.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|l| l.is_empty()) {
        bail!("invalid fqdn '{fqdn}'");
    }
    let split = fqdn
        .len()
        .saturating_sub(labels[labels.len() - 2].len() + labels[labels.len() - 1].len() + 1);
    let domain = &fqdn[split..];
    let subdomain = &fqdn[..split.saturating_sub(1).min(fqdn.len())];
    Ok((domain, subdomain))
}
