//! In-memory data store
//!
//! The tracker holds its working set for the lifetime of the process; the
//! seed catalog is re-imported at startup and crops live as long as the
//! server does. Tables are id-keyed maps behind async locks. Cloning the
//! store is cheap and every clone shares the same data, so services hold a
//! `Store` the way they would hold a connection pool.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use shared::models::{Crop, DailyLog, HarvestRecord, Seed, User};

/// Process-lifetime data store shared across handlers
#[derive(Clone, Default)]
pub struct Store {
    inner: Arc<Tables>,
}

#[derive(Default)]
struct Tables {
    seeds: RwLock<HashMap<Uuid, Seed>>,
    crops: RwLock<HashMap<Uuid, Crop>>,
    logs: RwLock<HashMap<Uuid, DailyLog>>,
    harvests: RwLock<HashMap<Uuid, HarvestRecord>>,
    users: RwLock<HashMap<Uuid, User>>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Seeds
    // ------------------------------------------------------------------

    pub async fn upsert_seed(&self, seed: Seed) {
        self.inner.seeds.write().await.insert(seed.id, seed);
    }

    pub async fn seed_by_id(&self, id: Uuid) -> Option<Seed> {
        self.inner.seeds.read().await.get(&id).cloned()
    }

    pub async fn seed_by_slug(&self, slug: &str) -> Option<Seed> {
        self.inner
            .seeds
            .read()
            .await
            .values()
            .find(|seed| seed.seed_type == slug)
            .cloned()
    }

    /// All seeds, ordered by display name
    pub async fn list_seeds(&self) -> Vec<Seed> {
        let mut seeds: Vec<Seed> = self.inner.seeds.read().await.values().cloned().collect();
        seeds.sort_by(|a, b| a.name.cmp(&b.name));
        seeds
    }

    pub async fn seed_count(&self) -> usize {
        self.inner.seeds.read().await.len()
    }

    // ------------------------------------------------------------------
    // Crops
    // ------------------------------------------------------------------

    pub async fn insert_crop(&self, crop: Crop) {
        self.inner.crops.write().await.insert(crop.id, crop);
    }

    pub async fn crop_by_id(&self, id: Uuid) -> Option<Crop> {
        self.inner.crops.read().await.get(&id).cloned()
    }

    /// All crops, newest first
    pub async fn list_crops(&self) -> Vec<Crop> {
        let mut crops: Vec<Crop> = self.inner.crops.read().await.values().cloned().collect();
        crops.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        crops
    }

    /// Apply a mutation to a crop under the write lock
    pub async fn update_crop<F>(&self, id: Uuid, apply: F) -> Option<Crop>
    where
        F: FnOnce(&mut Crop),
    {
        let mut crops = self.inner.crops.write().await;
        let crop = crops.get_mut(&id)?;
        apply(crop);
        Some(crop.clone())
    }

    pub async fn remove_crop(&self, id: Uuid) -> Option<Crop> {
        self.inner.crops.write().await.remove(&id)
    }

    // ------------------------------------------------------------------
    // Daily logs
    // ------------------------------------------------------------------

    /// Insert a log only if its day is still free for the crop
    ///
    /// Returns false without inserting when a log for that day already
    /// exists; the check and insert share one write lock.
    pub async fn try_insert_day_log(&self, log: DailyLog) -> bool {
        let mut logs = self.inner.logs.write().await;
        let taken = logs
            .values()
            .any(|existing| existing.crop_id == log.crop_id && existing.day_number == log.day_number);
        if taken {
            return false;
        }
        logs.insert(log.id, log);
        true
    }

    /// Find or create the log for one day of a crop, then mutate it
    ///
    /// Runs under a single write lock so two merges for the same day cannot
    /// race into duplicate logs.
    pub async fn upsert_day_log<F>(&self, crop_id: Uuid, day_number: u32, apply: F) -> DailyLog
    where
        F: FnOnce(&mut DailyLog),
    {
        let mut logs = self.inner.logs.write().await;

        if let Some(log) = logs
            .values_mut()
            .find(|log| log.crop_id == crop_id && log.day_number == day_number)
        {
            apply(log);
            return log.clone();
        }

        let mut log = DailyLog::empty(crop_id, day_number);
        apply(&mut log);
        logs.insert(log.id, log.clone());
        log
    }

    pub async fn log_for_day(&self, crop_id: Uuid, day_number: u32) -> Option<DailyLog> {
        self.inner
            .logs
            .read()
            .await
            .values()
            .find(|log| log.crop_id == crop_id && log.day_number == day_number)
            .cloned()
    }

    /// Logs for a crop, ordered by day number
    pub async fn logs_for_crop(&self, crop_id: Uuid) -> Vec<DailyLog> {
        let mut logs: Vec<DailyLog> = self
            .inner
            .logs
            .read()
            .await
            .values()
            .filter(|log| log.crop_id == crop_id)
            .cloned()
            .collect();
        logs.sort_by_key(|log| log.day_number);
        logs
    }

    pub async fn remove_logs_for_crop(&self, crop_id: Uuid) {
        self.inner
            .logs
            .write()
            .await
            .retain(|_, log| log.crop_id != crop_id);
    }

    // ------------------------------------------------------------------
    // Harvests
    // ------------------------------------------------------------------

    pub async fn insert_harvest(&self, harvest: HarvestRecord) {
        self.inner.harvests.write().await.insert(harvest.id, harvest);
    }

    pub async fn harvest_for_crop(&self, crop_id: Uuid) -> Option<HarvestRecord> {
        self.inner
            .harvests
            .read()
            .await
            .values()
            .find(|harvest| harvest.crop_id == crop_id)
            .cloned()
    }

    pub async fn list_harvests(&self) -> Vec<HarvestRecord> {
        self.inner.harvests.read().await.values().cloned().collect()
    }

    pub async fn remove_harvest_for_crop(&self, crop_id: Uuid) {
        self.inner
            .harvests
            .write()
            .await
            .retain(|_, harvest| harvest.crop_id != crop_id);
    }

    // ------------------------------------------------------------------
    // Users
    // ------------------------------------------------------------------

    pub async fn upsert_user(&self, user: User) {
        self.inner.users.write().await.insert(user.id, user);
    }

    pub async fn user_by_username(&self, username: &str) -> Option<User> {
        self.inner
            .users
            .read()
            .await
            .values()
            .find(|user| user.username == username)
            .cloned()
    }

    /// The account that owns everything in single-user mode
    pub async fn primary_user(&self) -> Option<User> {
        self.inner
            .users
            .read()
            .await
            .values()
            .min_by_key(|user| user.created_at)
            .cloned()
    }

    pub async fn update_user<F>(&self, id: Uuid, apply: F) -> Option<User>
    where
        F: FnOnce(&mut User),
    {
        let mut users = self.inner.users.write().await;
        let user = users.get_mut(&id)?;
        apply(user);
        Some(user.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn seed_named(name: &str) -> Seed {
        serde_json::from_value(serde_json::json!({
            "id": Uuid::new_v4(),
            "seed_type": shared::validation::seed_slug(name),
            "name": name,
            "ideal_temperature_celsius": 22.0,
            "ideal_humidity_percent": 50.0,
            "temperature_tolerance": 3.0,
            "humidity_tolerance": 10.0,
            "created_at": Utc::now(),
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_clones_share_data() {
        let store = Store::new();
        let clone = store.clone();
        clone.upsert_seed(seed_named("Pea")).await;
        assert_eq!(store.seed_count().await, 1);
    }

    #[tokio::test]
    async fn test_list_seeds_sorted_by_name() {
        let store = Store::new();
        store.upsert_seed(seed_named("Radish")).await;
        store.upsert_seed(seed_named("Broccoli")).await;
        store.upsert_seed(seed_named("Pea")).await;

        let names: Vec<String> = store
            .list_seeds()
            .await
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["Broccoli", "Pea", "Radish"]);
    }

    #[tokio::test]
    async fn test_try_insert_day_log_blocks_duplicate_days() {
        let store = Store::new();
        let crop_id = Uuid::new_v4();

        assert!(store.try_insert_day_log(DailyLog::empty(crop_id, 2)).await);
        assert!(!store.try_insert_day_log(DailyLog::empty(crop_id, 2)).await);
        assert_eq!(store.logs_for_crop(crop_id).await.len(), 1);

        // The same day on another crop is unrelated
        assert!(store
            .try_insert_day_log(DailyLog::empty(Uuid::new_v4(), 2))
            .await);
    }

    #[tokio::test]
    async fn test_upsert_day_log_creates_then_merges() {
        let store = Store::new();
        let crop_id = Uuid::new_v4();

        let created = store
            .upsert_day_log(crop_id, 1, |log| log.temperature_celsius = Some(21.0))
            .await;
        let merged = store
            .upsert_day_log(crop_id, 1, |log| log.humidity_percent = Some(55.0))
            .await;

        assert_eq!(created.id, merged.id);
        assert_eq!(merged.temperature_celsius, Some(21.0));
        assert_eq!(merged.humidity_percent, Some(55.0));
        assert_eq!(store.logs_for_crop(crop_id).await.len(), 1);
    }
}
