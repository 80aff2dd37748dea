//! Integration tests for Profile-Lens
//!
//! Fetch tests drive the real HTTP strategy against wiremock servers; pipeline
//! tests run the service end to end with stub strategies and on-disk storage.

mod common;
mod fetch_tests;
mod pipeline_tests;
