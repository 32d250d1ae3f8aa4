//! Image IO: PNG decode/encode and the per-run asset store.

/// PNG decode and encode helpers.
pub mod decode;
/// Overlay cache and card image resolution.
pub mod store;
