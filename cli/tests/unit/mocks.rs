//! Shared mock infrastructure for unit tests.
//!
//! Provides a canned [`ApiTransport`] implementation, a fake clock, and a
//! silent progress reporter so each test file doesn't have to re-define
//! the same boilerplate.

#![allow(clippy::expect_used)]
#![allow(dead_code)] // not every test file uses every helper

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::time::{Duration, Instant};

use anyhow::Result;
use serde_json::Value;

use linkctl_cli::application::ports::{ApiTransport, Clock, ProgressReporter};
use linkctl_cli::domain::{ApiConfig, ApiError, WaitTimeouts};

// ── Config fixture ────────────────────────────────────────────────────────────

pub const LB_ID: &str = "1s100";
pub const PROJECT_ID: &str = "1a5";

pub fn test_config() -> ApiConfig {
    ApiConfig {
        base_url: "http://rancher.test".to_string(),
        access_key: "key".to_string(),
        secret_key: "secret".to_string(),
        project_id: Some(PROJECT_ID.to_string()),
        load_balancer_id: Some(LB_ID.to_string()),
        timeouts: WaitTimeouts::default(),
    }
}

// ── Mock transport ────────────────────────────────────────────────────────────

#[derive(Clone)]
enum Reply {
    Ok(Value),
    Err { status: u16, body: String },
}

struct Route {
    method: &'static str,
    path: String,
    replies: VecDeque<Reply>,
}

/// One request the code under test issued.
#[derive(Debug, Clone)]
pub struct Request {
    pub method: String,
    pub path: String,
    pub body: Option<Value>,
}

/// Canned transport: routes are registered up front; any unregistered
/// request fails the test. All requests are recorded for assertions.
pub struct MockApi {
    routes: RefCell<Vec<Route>>,
    pub requests: RefCell<Vec<Request>>,
}

impl MockApi {
    pub fn new() -> Self {
        Self {
            routes: RefCell::new(Vec::new()),
            requests: RefCell::new(Vec::new()),
        }
    }

    /// Register a route answering with `response` on every call.
    #[must_use]
    pub fn on(self, method: &'static str, path: &str, response: Value) -> Self {
        self.push(method, path, VecDeque::from([Reply::Ok(response)]));
        self
    }

    /// Register a route answering with each value in turn; the last one
    /// repeats once the sequence is exhausted.
    #[must_use]
    pub fn on_seq(self, method: &'static str, path: &str, responses: Vec<Value>) -> Self {
        self.push(method, path, responses.into_iter().map(Reply::Ok).collect());
        self
    }

    /// Register a route answering with a non-2xx API error.
    #[must_use]
    pub fn on_error(self, method: &'static str, path: &str, status: u16, body: &str) -> Self {
        self.push(
            method,
            path,
            VecDeque::from([Reply::Err {
                status,
                body: body.to_string(),
            }]),
        );
        self
    }

    fn push(&self, method: &'static str, path: &str, replies: VecDeque<Reply>) {
        self.routes.borrow_mut().push(Route {
            method,
            path: path.to_string(),
            replies,
        });
    }

    fn respond(&self, method: &str, path: &str, body: Option<&Value>) -> Result<Value> {
        self.requests.borrow_mut().push(Request {
            method: method.to_string(),
            path: path.to_string(),
            body: body.cloned(),
        });
        let mut routes = self.routes.borrow_mut();
        let route = routes
            .iter_mut()
            .find(|r| r.method == method && r.path == path)
            .unwrap_or_else(|| panic!("unexpected request: {method} {path}"));
        let reply = if route.replies.len() > 1 {
            route.replies.pop_front().expect("non-empty")
        } else {
            route.replies.front().cloned().expect("route without replies")
        };
        match reply {
            Reply::Ok(value) => Ok(value),
            Reply::Err { status, body } => Err(ApiError::Status { status, body }.into()),
        }
    }

    /// Bodies of all POSTs to `path`, in order.
    pub fn posts_to(&self, path: &str) -> Vec<Value> {
        self.requests
            .borrow()
            .iter()
            .filter(|r| r.method == "POST" && r.path == path)
            .filter_map(|r| r.body.clone())
            .collect()
    }

    /// Number of requests issued with the given method.
    pub fn count_method(&self, method: &str) -> usize {
        self.requests
            .borrow()
            .iter()
            .filter(|r| r.method == method)
            .count()
    }
}

impl ApiTransport for MockApi {
    fn get(&self, path: &str) -> Result<Value> {
        self.respond("GET", path, None)
    }

    fn post(&self, path: &str, body: &Value) -> Result<Value> {
        self.respond("POST", path, Some(body))
    }

    fn put(&self, path: &str, body: &Value) -> Result<Value> {
        self.respond("PUT", path, Some(body))
    }
}

// ── Fake clock ────────────────────────────────────────────────────────────────

/// Deterministic clock: `sleep` advances virtual time instantly.
pub struct FakeClock {
    base: Instant,
    offset: Cell<Duration>,
}

impl FakeClock {
    pub fn new() -> Self {
        Self {
            base: Instant::now(),
            offset: Cell::new(Duration::ZERO),
        }
    }

    /// Virtual time slept so far.
    pub fn elapsed(&self) -> Duration {
        self.offset.get()
    }
}

impl Clock for FakeClock {
    fn now(&self) -> Instant {
        self.base + self.offset.get()
    }

    fn sleep(&self, duration: Duration) {
        self.offset.set(self.offset.get() + duration);
    }
}

// ── Silent reporter ───────────────────────────────────────────────────────────

pub struct NullReporter;

impl ProgressReporter for NullReporter {
    fn step(&self, _: &str) {}
    fn success(&self, _: &str) {}
}
