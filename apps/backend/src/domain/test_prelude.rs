//! Shared imports for domain property tests.

pub use drafter_test_support::proptest_config::proptest_config;
