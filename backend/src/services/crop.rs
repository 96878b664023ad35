//! Crop lifecycle service from sowing through harvest or failure

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shared::models::{
    Crop, CropStatus, CustomSettings, DailyLog, NotificationSettings, Seed, DEFAULT_TRAY_SIZE,
};
use shared::schedule::{GrowthPlan, Phase, ScheduleEntry};
use shared::validation::{
    validate_blackout_override, validate_soak_override, validate_time_of_day, validate_tray_size,
    validate_watering_frequency,
};

use crate::error::{AppError, AppResult};
use crate::store::Store;

/// Crop service for managing grow cycles
#[derive(Clone)]
pub struct CropService {
    store: Store,
}

/// Input for starting a new crop
#[derive(Debug, Deserialize)]
pub struct CreateCropInput {
    pub seed_id: Uuid,
    /// Defaults to now, may be backdated for trays started earlier
    pub start_datetime: Option<DateTime<Utc>>,
    pub tray_size: Option<String>,
    pub custom_settings: Option<CustomSettings>,
    pub notification_settings: Option<NotificationSettings>,
}

/// Crop with its seed and daily logs for the detail view
#[derive(Debug, Clone, Serialize)]
pub struct CropDetail {
    pub crop: Crop,
    pub seed: Seed,
    pub logs: Vec<DailyLog>,
}

/// Where a crop stands in its grow cycle right now
#[derive(Debug, Clone, Serialize)]
pub struct CropStatusView {
    pub crop_id: Uuid,
    pub status: CropStatus,
    pub current_day: u32,
    pub phase: Phase,
    pub progress_percent: u8,
    pub growth_days: u32,
}

impl CropService {
    /// Create a new CropService instance
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Start a new crop from a catalog seed
    pub async fn create_crop(&self, user_id: Uuid, input: CreateCropInput) -> AppResult<Crop> {
        let seed = self
            .store
            .seed_by_id(input.seed_id)
            .await
            .ok_or_else(|| AppError::NotFound("Seed".to_string()))?;

        let tray_size = input
            .tray_size
            .unwrap_or_else(|| DEFAULT_TRAY_SIZE.to_string());
        validate_tray_size(&tray_size).map_err(|msg| AppError::Validation {
            field: "tray_size".to_string(),
            message: msg.to_string(),
        })?;

        if let Some(settings) = &input.custom_settings {
            validate_custom_settings(settings)?;
        }
        if let Some(settings) = &input.notification_settings {
            for time in &settings.times {
                validate_time_of_day(time).map_err(|msg| AppError::Validation {
                    field: "notification_settings.times".to_string(),
                    message: msg.to_string(),
                })?;
            }
        }

        let crop = Crop {
            id: Uuid::new_v4(),
            user_id,
            seed_id: seed.id,
            start_datetime: input.start_datetime.unwrap_or_else(Utc::now),
            harvested_at: None,
            tray_size,
            status: CropStatus::Active,
            custom_settings: input.custom_settings,
            notification_settings: input.notification_settings,
            created_at: Utc::now(),
        };
        self.store.insert_crop(crop.clone()).await;

        Ok(crop)
    }

    /// Get all crops, optionally filtered by status
    pub async fn list_crops(&self, status: Option<CropStatus>) -> AppResult<Vec<Crop>> {
        let crops = self.store.list_crops().await;
        Ok(match status {
            Some(wanted) => crops.into_iter().filter(|c| c.status == wanted).collect(),
            None => crops,
        })
    }

    /// Get a crop with its seed and logs
    pub async fn get_crop(&self, crop_id: Uuid) -> AppResult<CropDetail> {
        let (crop, seed, _) = self.plan_for_crop(crop_id).await?;
        let logs = self.store.logs_for_crop(crop_id).await;
        Ok(CropDetail { crop, seed, logs })
    }

    /// Delete a crop along with its logs and harvest record
    pub async fn delete_crop(&self, crop_id: Uuid) -> AppResult<()> {
        self.store
            .remove_crop(crop_id)
            .await
            .ok_or_else(|| AppError::NotFound("Crop".to_string()))?;
        self.store.remove_logs_for_crop(crop_id).await;
        self.store.remove_harvest_for_crop(crop_id).await;
        Ok(())
    }

    /// Mark an active crop as failed
    pub async fn mark_failed(&self, crop_id: Uuid) -> AppResult<Crop> {
        let crop = self.require_crop(crop_id).await?;
        if crop.status.is_terminal() {
            return Err(AppError::InvalidStateTransition(format!(
                "Crop is already {}",
                crop.status
            )));
        }
        self.store
            .update_crop(crop_id, |c| c.status = CropStatus::Failed)
            .await
            .ok_or_else(|| AppError::NotFound("Crop".to_string()))
    }

    /// Full day-by-day schedule for a crop
    pub async fn schedule_for_crop(&self, crop_id: Uuid) -> AppResult<Vec<ScheduleEntry>> {
        let (_, _, plan) = self.plan_for_crop(crop_id).await?;
        Ok(plan.schedule())
    }

    /// Current day, phase, and progress for a crop
    pub async fn status_for_crop(&self, crop_id: Uuid) -> AppResult<CropStatusView> {
        let (crop, _, plan) = self.plan_for_crop(crop_id).await?;
        let now = Utc::now();
        let growth = plan.status_at(&crop.start_datetime, &now);
        Ok(CropStatusView {
            crop_id: crop.id,
            status: crop.status,
            current_day: growth.current_day,
            phase: growth.phase,
            progress_percent: growth.progress_percent,
            growth_days: plan.growth_days,
        })
    }

    /// Resolve a crop together with its seed and normalized growth plan
    pub async fn plan_for_crop(&self, crop_id: Uuid) -> AppResult<(Crop, Seed, GrowthPlan)> {
        let crop = self.require_crop(crop_id).await?;
        let seed = self
            .store
            .seed_by_id(crop.seed_id)
            .await
            .ok_or_else(|| AppError::NotFound("Seed".to_string()))?;
        let plan = GrowthPlan::for_crop(&seed, crop.custom_settings.as_ref());
        Ok((crop, seed, plan))
    }

    async fn require_crop(&self, crop_id: Uuid) -> AppResult<Crop> {
        self.store
            .crop_by_id(crop_id)
            .await
            .ok_or_else(|| AppError::NotFound("Crop".to_string()))
    }
}

fn validate_custom_settings(settings: &CustomSettings) -> AppResult<()> {
    if let Some(hours) = settings.soak_hours {
        validate_soak_override(hours).map_err(|msg| AppError::Validation {
            field: "custom_settings.soak_hours".to_string(),
            message: msg.to_string(),
        })?;
    }
    if let Some(days) = settings.blackout_days {
        validate_blackout_override(days).map_err(|msg| AppError::Validation {
            field: "custom_settings.blackout_days".to_string(),
            message: msg.to_string(),
        })?;
    }
    if let Some(frequency) = settings.watering_frequency {
        validate_watering_frequency(frequency).map_err(|msg| AppError::Validation {
            field: "custom_settings.watering_frequency".to_string(),
            message: msg.to_string(),
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::SeedService;
    use chrono::Duration;

    const TEST_CATALOG: &str = "\
name,difficulty,soaking,blackout_days,harvest_days,avg_yield_grams,ideal_temperature,ideal_humidity
Sunflower,easy,Soak for 8-12 hours,2-3,8-12,600,22.5,50
Radish,easy,No soaking required,3,6-8,450,20,50
";

    async fn seeded_store() -> (Store, Seed) {
        let store = Store::new();
        SeedService::new(store.clone())
            .import_catalog_from_reader(TEST_CATALOG.as_bytes())
            .await
            .unwrap();
        let seed = store.seed_by_slug("sunflower").await.unwrap();
        (store, seed)
    }

    fn input_for(seed_id: Uuid) -> CreateCropInput {
        CreateCropInput {
            seed_id,
            start_datetime: None,
            tray_size: None,
            custom_settings: None,
            notification_settings: None,
        }
    }

    #[tokio::test]
    async fn test_create_crop_uses_defaults() {
        let (store, seed) = seeded_store().await;
        let service = CropService::new(store.clone());

        let crop = service
            .create_crop(Uuid::new_v4(), input_for(seed.id))
            .await
            .unwrap();
        assert_eq!(crop.status, CropStatus::Active);
        assert_eq!(crop.tray_size, DEFAULT_TRAY_SIZE);
        assert_eq!(crop.seed_id, seed.id);
        assert!(crop.harvested_at.is_none());
        assert!(store.crop_by_id(crop.id).await.is_some());
    }

    #[tokio::test]
    async fn test_create_crop_rejects_unknown_seed() {
        let (store, _) = seeded_store().await;
        let service = CropService::new(store);

        let err = service
            .create_crop(Uuid::new_v4(), input_for(Uuid::new_v4()))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_create_crop_rejects_blank_tray_size() {
        let (store, seed) = seeded_store().await;
        let service = CropService::new(store);

        let mut input = input_for(seed.id);
        input.tray_size = Some("   ".to_string());
        let err = service.create_crop(Uuid::new_v4(), input).await.unwrap_err();
        assert!(matches!(err, AppError::Validation { field, .. } if field == "tray_size"));
    }

    #[tokio::test]
    async fn test_create_crop_rejects_out_of_range_soak() {
        let (store, seed) = seeded_store().await;
        let service = CropService::new(store);

        let mut input = input_for(seed.id);
        input.custom_settings = Some(CustomSettings {
            soak_hours: Some(80.0),
            ..CustomSettings::default()
        });
        let err = service.create_crop(Uuid::new_v4(), input).await.unwrap_err();
        assert!(
            matches!(err, AppError::Validation { field, .. } if field == "custom_settings.soak_hours")
        );
    }

    #[tokio::test]
    async fn test_create_crop_rejects_bad_reminder_time() {
        let (store, seed) = seeded_store().await;
        let service = CropService::new(store);

        let mut input = input_for(seed.id);
        input.notification_settings = Some(NotificationSettings {
            enabled: true,
            times: vec!["8:00".to_string()],
        });
        let err = service.create_crop(Uuid::new_v4(), input).await.unwrap_err();
        assert!(
            matches!(err, AppError::Validation { field, .. } if field == "notification_settings.times")
        );
    }

    #[tokio::test]
    async fn test_list_crops_filters_by_status() {
        let (store, seed) = seeded_store().await;
        let service = CropService::new(store);
        let user_id = Uuid::new_v4();

        let first = service.create_crop(user_id, input_for(seed.id)).await.unwrap();
        service.create_crop(user_id, input_for(seed.id)).await.unwrap();
        service.mark_failed(first.id).await.unwrap();

        assert_eq!(service.list_crops(None).await.unwrap().len(), 2);
        let active = service.list_crops(Some(CropStatus::Active)).await.unwrap();
        assert_eq!(active.len(), 1);
        let failed = service.list_crops(Some(CropStatus::Failed)).await.unwrap();
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].id, first.id);
    }

    #[tokio::test]
    async fn test_mark_failed_is_final() {
        let (store, seed) = seeded_store().await;
        let service = CropService::new(store);

        let crop = service
            .create_crop(Uuid::new_v4(), input_for(seed.id))
            .await
            .unwrap();
        let failed = service.mark_failed(crop.id).await.unwrap();
        assert_eq!(failed.status, CropStatus::Failed);

        let err = service.mark_failed(crop.id).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidStateTransition(_)));
    }

    #[tokio::test]
    async fn test_delete_crop_removes_logs() {
        let (store, seed) = seeded_store().await;
        let service = CropService::new(store.clone());

        let crop = service
            .create_crop(Uuid::new_v4(), input_for(seed.id))
            .await
            .unwrap();
        store.upsert_day_log(crop.id, 1, |log| log.watered = true).await;

        service.delete_crop(crop.id).await.unwrap();
        assert!(store.crop_by_id(crop.id).await.is_none());
        assert!(store.logs_for_crop(crop.id).await.is_empty());

        let err = service.delete_crop(crop.id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_schedule_and_status_follow_plan() {
        let (store, seed) = seeded_store().await;
        let service = CropService::new(store);

        let mut input = input_for(seed.id);
        input.start_datetime = Some(Utc::now() - Duration::days(4));
        let crop = service.create_crop(Uuid::new_v4(), input).await.unwrap();

        let schedule = service.schedule_for_crop(crop.id).await.unwrap();
        assert_eq!(schedule.len(), 11);

        let status = service.status_for_crop(crop.id).await.unwrap();
        assert_eq!(status.current_day, 5);
        assert_eq!(status.phase, Phase::Light);
        assert_eq!(status.progress_percent, 50);
        assert_eq!(status.growth_days, 10);
    }

    #[tokio::test]
    async fn test_custom_settings_reshape_plan() {
        let (store, seed) = seeded_store().await;
        let service = CropService::new(store);

        let mut input = input_for(seed.id);
        input.custom_settings = Some(CustomSettings {
            soak_hours: Some(0.0),
            blackout_days: Some(5.0),
            watering_frequency: Some(2),
        });
        let crop = service.create_crop(Uuid::new_v4(), input).await.unwrap();

        let (_, _, plan) = service.plan_for_crop(crop.id).await.unwrap();
        assert_eq!(plan.blackout_days, 5);
        assert_eq!(plan.soak_hours, 0.0);
        assert_eq!(plan.phase_for_day(5), Phase::Blackout);
    }
}
