//! Tabular metadata: rows, records and the collection loader.

/// CSV loading, name synthesis and backside linking.
pub mod loader;
/// Row and record types.
pub mod record;
