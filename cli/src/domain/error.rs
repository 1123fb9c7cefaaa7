//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use thiserror::Error;

// ── API errors ────────────────────────────────────────────────────────────────

/// Errors raised by the platform API transport.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Non-2xx response. The message is the raw response body, verbatim.
    #[error("{body}")]
    Status { status: u16, body: String },

    /// Request never produced a response (connect failure, bad URL, ...).
    #[error("request to {url} failed: {reason}")]
    Transport { url: String, reason: String },
}

// ── Lookup errors ─────────────────────────────────────────────────────────────

/// Errors raised when resolving names to platform identifiers.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("No such stack {0}")]
    StackNotFound(String),

    #[error("No such service {0}")]
    ServiceNotFound(String),

    #[error("No instances for service {0}")]
    NoInstances(String),

    #[error("There is no public endpoints on host {0}")]
    NoPublicEndpoints(String),
}

// ── Locator errors ────────────────────────────────────────────────────────────

/// Errors raised when parsing a `service.stack.domain` locator.
#[derive(Debug, Error)]
pub enum LocatorError {
    #[error("invalid service locator '{0}': expected <service>.<stack>[.<domain>]")]
    Invalid(String),
}

// ── Port mapping errors ───────────────────────────────────────────────────────

/// Errors raised when parsing a `host:ext=int` / `ext=int` mapping string.
#[derive(Debug, Error)]
pub enum MappingParseError {
    #[error("invalid port mapping '{0}': expected <host>:<ext>=<int> or <ext>=<int>")]
    Malformed(String),

    #[error("invalid port number in mapping '{0}'")]
    BadPort(String),
}

// ── Allocation errors ─────────────────────────────────────────────────────────

/// Errors raised by the free-port scan.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AllocError {
    #[error("There is no available ports")]
    NoAvailablePort,
}

// ── Wait errors ───────────────────────────────────────────────────────────────

/// Errors raised by the state waiter.
#[derive(Debug, Error)]
pub enum WaitError {
    #[error(
        "Timeout while waiting for {what} to reach '{expected}'. Current state is: {last_observed}"
    )]
    Timeout {
        what: String,
        expected: String,
        last_observed: String,
    },
}

// ── Merge errors ──────────────────────────────────────────────────────────────

/// Errors raised by the deep JSON merge used for load-balancer updates.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MergeError {
    /// Two scalars disagree at the dotted key path.
    #[error("Conflict at {path}")]
    Conflict { path: String },
}
