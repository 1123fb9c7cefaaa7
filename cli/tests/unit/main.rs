//! Unit tests for the linkctl CLI.
//!
//! These tests use canned transports and a fake clock; they run fast and
//! touch no network.

mod locate_service;
mod mocks;
mod services_service;
mod waiter;
