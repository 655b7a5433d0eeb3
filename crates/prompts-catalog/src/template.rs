use serde::{Deserialize, Serialize};

/// A reusable prompt with its metadata.
///
/// Every field defaults to empty when absent from a data file so that
/// missing required fields surface as [`crate::LoadError::MissingField`]
/// with the offending record index, rather than as an opaque parse error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub tips: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}
