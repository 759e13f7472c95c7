//! Domain primitives shared by the lookup models, client and services.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a reference-data row as assigned by the portal backend.
///
/// Wrapping the raw integer keeps plan-type ids from being mixed up with
/// other numeric fields (class ids, student ids) in calling code.
///
/// # Examples
///
/// ```rust
/// use portal_lookup::domain::LookupId;
///
/// let id = LookupId::new(7);
/// assert_eq!(id.value(), 7);
/// assert_eq!(id.to_string(), "7");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct LookupId(i64);

impl LookupId {
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for LookupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<LookupId> for i64 {
    fn from(id: LookupId) -> Self {
        id.0
    }
}

impl From<i64> for LookupId {
    fn from(id: i64) -> Self {
        Self::new(id)
    }
}

impl Serialize for LookupId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_i64(self.0)
    }
}

impl<'de> Deserialize<'de> for LookupId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let id = i64::deserialize(deserializer)?;
        Ok(Self::new(id))
    }
}

/// The reference datasets served by the backend lookup endpoints.
///
/// Each domain has its own endpoint and its own cache entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookupDomain {
    TimeSlots,
    PlanTypes,
}

impl LookupDomain {
    /// Stable label used in log fields, metric labels and error messages.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::TimeSlots => "time_slots",
            Self::PlanTypes => "plan_types",
        }
    }
}

impl fmt::Display for LookupDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
