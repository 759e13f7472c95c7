pub mod lookup;
pub mod plan_type;
pub mod time_slot;

pub use lookup::{LookupPayload, LookupRow};
pub use plan_type::{PaymentPlan, PlanType};
pub use time_slot::TimeSlot;
