use crate::domain::LookupId;
use serde::{Deserialize, Serialize};

/// A generic reference-data record as returned by the portal backend.
///
/// Time slots and plan types share this shape but come from different
/// endpoints and are transformed differently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupRow {
    pub id: LookupId,
    #[serde(rename = "type", default)]
    pub kind: String,
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub is_active: bool,
}

/// Lookup endpoints answer either with a bare array or with a `data` envelope.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum LookupPayload {
    Rows(Vec<LookupRow>),
    Envelope { data: Vec<LookupRow> },
}

impl LookupPayload {
    #[must_use]
    pub fn into_rows(self) -> Vec<LookupRow> {
        match self {
            Self::Rows(rows) | Self::Envelope { data: rows } => rows,
        }
    }
}
