//! Harvest service for weighing out trays and closing crops

use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use shared::models::{predict_yield, CropStatus, HarvestRecord};
use shared::validation::validate_weight_grams;

use super::crop::CropService;
use crate::error::{AppError, AppResult};
use crate::store::Store;

/// Harvest service for recording final yields
#[derive(Clone)]
pub struct HarvestService {
    store: Store,
}

/// Input for recording a harvest
#[derive(Debug, Deserialize)]
pub struct RecordHarvestInput {
    pub actual_weight_grams: f64,
    pub notes: Option<String>,
}

impl HarvestService {
    /// Create a new HarvestService instance
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Record the harvest for an active crop and close it out
    ///
    /// The predicted weight is the latest prediction stored on a daily
    /// log, falling back to running the yield model over the logs. The
    /// accuracy comparing prediction to scale weight is frozen into the
    /// record at harvest time.
    pub async fn record_harvest(
        &self,
        crop_id: Uuid,
        input: RecordHarvestInput,
    ) -> AppResult<HarvestRecord> {
        validate_weight_grams(input.actual_weight_grams).map_err(|msg| AppError::Validation {
            field: "actual_weight_grams".to_string(),
            message: msg.to_string(),
        })?;

        let (crop, seed, plan) = CropService::new(self.store.clone())
            .plan_for_crop(crop_id)
            .await?;
        if crop.status != CropStatus::Active {
            return Err(AppError::InvalidStateTransition(format!(
                "Crop is already {}",
                crop.status
            )));
        }

        let logs = self.store.logs_for_crop(crop_id).await;
        let predicted = logs
            .iter()
            .rev()
            .find_map(|log| log.predicted_yield_grams)
            .unwrap_or_else(|| predict_yield(&seed, &plan, &logs).predicted_yield_grams);

        let now = Utc::now();
        let record = HarvestRecord {
            id: Uuid::new_v4(),
            crop_id,
            actual_weight_grams: input.actual_weight_grams,
            predicted_weight_grams: predicted,
            accuracy_percent: HarvestRecord::accuracy_for(input.actual_weight_grams, predicted),
            notes: input.notes,
            harvested_at: now,
        };
        self.store.insert_harvest(record.clone()).await;
        self.store
            .update_crop(crop_id, |c| {
                c.status = CropStatus::Harvested;
                c.harvested_at = Some(now);
            })
            .await
            .ok_or_else(|| AppError::NotFound("Crop".to_string()))?;

        Ok(record)
    }

    /// Get the harvest record for a crop
    pub async fn get_harvest(&self, crop_id: Uuid) -> AppResult<HarvestRecord> {
        self.store
            .crop_by_id(crop_id)
            .await
            .ok_or_else(|| AppError::NotFound("Crop".to_string()))?;
        self.store
            .harvest_for_crop(crop_id)
            .await
            .ok_or_else(|| AppError::NotFound("Harvest".to_string()))
    }
}
