//! Unique identifiers for test isolation.
//!
//! Channel ids produced here satisfy the backend's channel grammar
//! (`[A-Za-z0-9_-]{1,64}`), so they double as snapshot file names.

use ulid::Ulid;

/// A channel id that will not collide with any other test run.
///
/// ```
/// use drafter_test_support::unique_helpers::unique_channel;
///
/// let a = unique_channel("lobby");
/// let b = unique_channel("lobby");
/// assert_ne!(a, b);
/// assert!(a.starts_with("lobby-"));
/// ```
pub fn unique_channel(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}

/// Player ids `"{prefix}-1" ..= "{prefix}-{count}"` in join order.
pub fn player_names(prefix: &str, count: usize) -> Vec<String> {
    (1..=count).map(|n| format!("{prefix}-{n}")).collect()
}
