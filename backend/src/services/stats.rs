//! Dashboard statistics service

use serde::Serialize;

use shared::models::CropStatus;

use crate::error::AppResult;
use crate::store::Store;

/// Stats service aggregating crops and harvests for the dashboard
#[derive(Clone)]
pub struct StatsService {
    store: Store,
}

/// Dashboard summary numbers
#[derive(Debug, Clone, Serialize)]
pub struct DashboardStats {
    pub total_crops: usize,
    pub active_crops: usize,
    pub harvested_crops: usize,
    pub failed_crops: usize,
    pub total_harvested_grams: f64,
    /// Mean prediction accuracy over completed harvests, absent until the first one
    pub average_accuracy_percent: Option<f64>,
    pub catalog_size: usize,
}

impl StatsService {
    /// Create a new StatsService instance
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Aggregate dashboard statistics over all crops and harvests
    pub async fn dashboard(&self) -> AppResult<DashboardStats> {
        let crops = self.store.list_crops().await;
        let harvests = self.store.list_harvests().await;

        let active_crops = crops
            .iter()
            .filter(|c| c.status == CropStatus::Active)
            .count();
        let harvested_crops = crops
            .iter()
            .filter(|c| c.status == CropStatus::Harvested)
            .count();
        let failed_crops = crops
            .iter()
            .filter(|c| c.status == CropStatus::Failed)
            .count();

        let total_harvested_grams = harvests.iter().map(|h| h.actual_weight_grams).sum();
        let average_accuracy_percent = if harvests.is_empty() {
            None
        } else {
            let total: f64 = harvests.iter().map(|h| h.accuracy_percent).sum();
            Some(total / harvests.len() as f64)
        };

        Ok(DashboardStats {
            total_crops: crops.len(),
            active_crops,
            harvested_crops,
            failed_crops,
            total_harvested_grams,
            average_accuracy_percent,
            catalog_size: self.store.seed_count().await,
        })
    }
}
