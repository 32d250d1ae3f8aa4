//! Layer compositing: positioned RGBA images flattened in stack order.

/// Pixel-level paint operations.
pub mod composite;
/// Layer and layer-stack types.
pub mod layer;
