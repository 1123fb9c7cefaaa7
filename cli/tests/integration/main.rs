//! Integration tests for the linkctl binary surface.

mod cli_tests;
