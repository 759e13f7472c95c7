pub mod cache;
pub use cache::LookupCache;

pub mod plan_types;
pub use plan_types::PlanTypeService;

pub mod time_slots;
pub use time_slots::TimeSlotService;

#[cfg(test)]
pub(crate) mod test_support;

use crate::clients::{LookupSource, PortalClient};
use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::error::LookupError;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// The lookup services the portal screens share.
///
/// Both services read through the same source and clock but keep
/// independent cache entries.
#[derive(Clone)]
pub struct LookupServices {
    pub time_slots: Arc<TimeSlotService>,
    pub plan_types: Arc<PlanTypeService>,
}

impl LookupServices {
    #[must_use]
    pub fn new(source: Arc<dyn LookupSource>, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            time_slots: Arc::new(TimeSlotService::new(
                Arc::clone(&source),
                ttl,
                Arc::clone(&clock),
            )),
            plan_types: Arc::new(PlanTypeService::new(source, ttl, clock)),
        }
    }

    /// Builds the services against the configured portal backend.
    pub fn from_config(config: &Config) -> Result<Self, LookupError> {
        let client = PortalClient::from_config(&config.api)?;
        info!(
            base_url = %config.api.base_url,
            ttl_seconds = config.cache.ttl_seconds,
            "Lookup services initialized"
        );
        Ok(Self::new(
            Arc::new(client),
            config.cache.ttl(),
            Arc::new(SystemClock),
        ))
    }

    /// Loads both domains, e.g. before the first schedule render.
    pub async fn warm_up(&self) -> Result<(), LookupError> {
        futures::future::try_join(self.time_slots.get_all(), self.plan_types.get_all()).await?;
        Ok(())
    }

    pub async fn clear_all(&self) {
        self.time_slots.clear_cache().await;
        self.plan_types.clear_cache().await;
    }
}
