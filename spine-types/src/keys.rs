//! Dictionary keys shared with persisted records and server payloads.

/// Resource type key in an identifier dictionary.
pub const TYPE: &str = "type";
/// Resource id key in an identifier dictionary.
pub const ID: &str = "id";

/// Relationship self link.
pub const SELF_URL: &str = "selfURL";
/// Relationship related-resource link.
pub const RELATED_URL: &str = "relatedURL";
/// Relationship linkage (list of identifier dictionaries).
pub const DATA: &str = "data";
