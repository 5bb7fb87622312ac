//! In-memory authoritative store and index helpers.

/// Helper index aliases.
pub mod indices;
/// Ordered, id-indexed game store with title uniqueness.
pub mod store;
