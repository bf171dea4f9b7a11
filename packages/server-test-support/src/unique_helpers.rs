//! Test helpers for generating unique test data
//!
//! This module provides utilities to help generate unique test data using
//! random UUIDs to ensure test isolation and avoid conflicts between runs.

use uuid::Uuid;

/// Generate a unique string with the given prefix
///
/// # Arguments
/// * `prefix` - The prefix to use for the unique string
///
/// # Returns
/// A unique string in the format `{prefix}-{uuid}`
///
/// # Examples
/// ```
/// use server_test_support::unique_helpers::unique_str;
///
/// let id1 = unique_str("player");
/// let id2 = unique_str("player");
/// assert_ne!(id1, id2);
/// assert!(id1.starts_with("player-"));
/// ```
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4())
}

/// Generate a unique display name with the given prefix
///
/// # Examples
/// ```
/// use server_test_support::unique_helpers::unique_name;
///
/// let name = unique_name("seat");
/// assert!(name.starts_with("seat-"));
/// ```
pub fn unique_name(prefix: &str) -> String {
    unique_str(prefix)
}
