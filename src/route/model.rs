use schemars::JsonSchema;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

/// A single identifier taken from the path.
///
/// Kept as a string so that a malformed id can be reported the same way
/// as an unknown one.
#[derive(Debug, Deserialize, Validate, JsonSchema)]
pub struct IdInput {
	pub id: String,
}

/// Parses a document identifier, returning [`None`] if it is malformed.
pub fn object_id(raw: &str) -> Option<Uuid> {
	Uuid::try_parse(raw).ok()
}
