use crate::domain::LookupId;
use crate::models::lookup::LookupRow;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanType {
    pub id: LookupId,
    pub code: String,
    pub name: String,
    pub is_active: bool,
}

impl From<&LookupRow> for PlanType {
    fn from(row: &LookupRow) -> Self {
        Self {
            id: row.id,
            code: row.code.clone(),
            name: row.name.clone(),
            is_active: row.is_active,
        }
    }
}

#[must_use]
pub fn transform_plan_types(rows: &[LookupRow]) -> Vec<PlanType> {
    rows.iter()
        .filter(|row| row.is_active)
        .map(PlanType::from)
        .collect()
}

/// Payment plans as the enrolment and payment screens name them.
///
/// Each plan resolves to a plan-type lookup code; the id behind that code is
/// owned by the backend and looked up at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PaymentPlan {
    #[default]
    OneTime,
    Monthly,
    Installment,
}

impl PaymentPlan {
    /// Maps a semantic plan string such as `one_time` to a plan.
    ///
    /// Unrecognized input falls back to [`PaymentPlan::OneTime`].
    #[must_use]
    pub fn parse(value: &str) -> Self {
        let normalized = value.trim().to_lowercase().replace('-', "_");
        match normalized.as_str() {
            "one_time" => Self::OneTime,
            "monthly" => Self::Monthly,
            "installment" => Self::Installment,
            _ => Self::default(),
        }
    }

    /// Lookup code of the plan-type row backing this plan.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::OneTime => "OneTime",
            Self::Monthly => "Monthly",
            Self::Installment => "Installment",
        }
    }
}

impl fmt::Display for PaymentPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
