use crate::clients::LookupSource;
use crate::clock::Clock;
use crate::domain::{LookupDomain, LookupId};
use crate::error::LookupError;
use crate::models::plan_type::{PaymentPlan, PlanType, transform_plan_types};
use crate::services::cache::LookupCache;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

/// Cached access to payment plan types.
pub struct PlanTypeService {
    source: Arc<dyn LookupSource>,
    cache: LookupCache<PlanType>,
}

impl PlanTypeService {
    #[must_use]
    pub fn new(source: Arc<dyn LookupSource>, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            source,
            cache: LookupCache::new(LookupDomain::PlanTypes, ttl, clock),
        }
    }

    /// All active plan types, served from cache while the snapshot is fresh.
    pub async fn get_all(&self) -> Result<Arc<Vec<PlanType>>, LookupError> {
        self.cache
            .get_or_fetch(self.source.as_ref(), |rows| Ok(transform_plan_types(rows)))
            .await
    }

    /// Id of the first active plan type whose code matches exactly.
    pub async fn get_id_by_code(&self, code: &str) -> Result<Option<LookupId>, LookupError> {
        let plans = self.get_all().await?;
        Ok(plans
            .iter()
            .find(|plan| plan.is_active && plan.code == code)
            .map(|plan| plan.id))
    }

    /// Resolves a payment plan to its plan-type id.
    ///
    /// A plan whose code has no active row is a reference-data problem and
    /// is reported as [`LookupError::MissingMapping`].
    pub async fn get_payment_plan_id(&self, plan: PaymentPlan) -> Result<LookupId, LookupError> {
        let code = plan.code();
        match self.get_id_by_code(code).await? {
            Some(id) => Ok(id),
            None => {
                warn!(code, "No active plan type for payment plan");
                Err(LookupError::MissingMapping {
                    code: code.to_string(),
                })
            }
        }
    }

    /// Resolves a semantic plan string such as `one_time`.
    /// Unknown strings resolve through the `OneTime` code.
    pub async fn get_plan_type_id(&self, plan: &str) -> Result<LookupId, LookupError> {
        self.get_payment_plan_id(PaymentPlan::parse(plan)).await
    }

    pub async fn clear_cache(&self) {
        self.cache.clear().await;
    }
}
