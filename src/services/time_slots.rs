use crate::clients::LookupSource;
use crate::clock::Clock;
use crate::domain::LookupDomain;
use crate::error::LookupError;
use crate::models::time_slot::{TimeSlot, transform_time_slots};
use crate::services::cache::LookupCache;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// Cached access to the class time slots used by the schedule grid.
pub struct TimeSlotService {
    source: Arc<dyn LookupSource>,
    cache: LookupCache<TimeSlot>,
}

impl TimeSlotService {
    #[must_use]
    pub fn new(source: Arc<dyn LookupSource>, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            source,
            cache: LookupCache::new(LookupDomain::TimeSlots, ttl, clock),
        }
    }

    /// All active time slots, served from cache while the snapshot is fresh.
    pub async fn get_all(&self) -> Result<Arc<Vec<TimeSlot>>, LookupError> {
        self.cache
            .get_or_fetch(self.source.as_ref(), transform_time_slots)
            .await
    }

    /// Time slots keyed by code. A duplicated code keeps the last slot.
    pub async fn get_as_map(&self) -> Result<HashMap<String, TimeSlot>, LookupError> {
        let slots = self.get_all().await?;
        Ok(slots
            .iter()
            .map(|slot| (slot.code().to_string(), slot.clone()))
            .collect())
    }

    pub async fn clear_cache(&self) {
        self.cache.clear().await;
    }
}
