//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain` — never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::time::{Duration, Instant};

use anyhow::Result;
use serde_json::Value;

/// Blocking JSON transport to the orchestration platform.
///
/// Paths are relative to the configured base URL (e.g.
/// `v1/environments?limit=-1`). A non-2xx response surfaces as
/// [`crate::domain::ApiError::Status`] carrying the raw body.
pub trait ApiTransport {
    /// GET `path`.
    fn get(&self, path: &str) -> Result<Value>;
    /// POST `body` to `path`.
    fn post(&self, path: &str, body: &Value) -> Result<Value>;
    /// PUT `body` to `path`.
    fn put(&self, path: &str, body: &Value) -> Result<Value>;
}

/// Time source for the state waiter. Injectable so tests can run the
/// polling loop without real sleeps.
pub trait Clock {
    fn now(&self) -> Instant;
    fn sleep(&self, duration: Duration);
}

/// Progress events emitted by long-running lifecycle flows.
///
/// Implemented by the presentation layer so application services never
/// print directly.
pub trait ProgressReporter {
    /// An intermediate step has started.
    fn step(&self, message: &str);
    /// A step (or the whole flow) completed.
    fn success(&self, message: &str);
}
