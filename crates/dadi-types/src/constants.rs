//! System-wide constants for the device auction registry.

/// Width of a resource handle in bytes.
pub const RESOURCE_ID_LEN: usize = 32;

/// Longest label that fits in a resource handle (one byte stays zero).
pub const MAX_LABEL_LEN: usize = RESOURCE_ID_LEN - 1;

/// Domain separator prepended before hashing a device name.
pub const RESOURCE_NAME_DOMAIN: &[u8] = b"dadi:resource:v1:";

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Registry name.
pub const REGISTRY_NAME: &str = "DADIAuction";
