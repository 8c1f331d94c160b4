use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Structured response contract for the generation service. Exactly two
/// required string fields; anything extra fails both the schema and the
/// deserialization.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct RenameSuggestion {
    #[schemars(description = "New filename without extension")]
    pub new_filename: String,
    #[schemars(description = "Reason for the suggested filename")]
    pub reason: String,
}

pub fn response_schema() -> schemars::Schema {
    schemars::schema_for!(RenameSuggestion)
}
