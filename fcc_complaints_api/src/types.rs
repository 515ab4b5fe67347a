//! Response types for SODA resource queries.

/// A single row returned by a resource endpoint.
///
/// The dataset schema is not modelled here; callers get the JSON object as
/// the server sent it.
pub type Record = serde_json::Map<String, serde_json::Value>;
