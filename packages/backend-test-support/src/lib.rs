//! Test support for the drafter backend.
//!
//! Shared by unit tests (via dev-dependency) and the integration test
//! binaries: logging bootstrap, proptest configuration, unique channel and
//! player identifiers, and problem-details assertions. Nothing here depends
//! on the backend crate itself.

pub mod logging;
pub mod problem_details;
pub mod proptest_config;
pub mod unique_helpers;
