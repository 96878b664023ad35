//! Daily logging service for watering, care actions, and readings

use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use shared::models::{CropStatus, DailyLog};
use shared::schedule::current_day_for;
use shared::validation::{
    validate_action_name, validate_humidity, validate_log_day, validate_temperature,
    validate_weight_grams,
};

use super::crop::CropService;
use crate::error::{AppError, AppResult};
use crate::store::Store;

/// Log service for per-day care records
#[derive(Clone)]
pub struct LogService {
    store: Store,
}

/// Input for recording a single action against today
#[derive(Debug, Deserialize)]
pub struct RecordActionInput {
    pub action: String,
    pub temperature_celsius: Option<f64>,
    pub humidity_percent: Option<f64>,
    pub notes: Option<String>,
}

/// Input for creating a complete log for an explicit day
#[derive(Debug, Deserialize)]
pub struct CreateLogInput {
    pub day_number: u32,
    #[serde(default)]
    pub watered: bool,
    #[serde(default)]
    pub actions_recorded: Vec<String>,
    pub temperature_celsius: Option<f64>,
    pub humidity_percent: Option<f64>,
    pub photo_url: Option<String>,
    pub notes: Option<String>,
    pub predicted_yield_grams: Option<f64>,
}

impl LogService {
    /// Create a new LogService instance
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Record an action for today, merging into the day's existing log
    ///
    /// The day number is computed from the crop's start time, so two
    /// quick taps on the same day update one log instead of creating two.
    pub async fn record_action(&self, crop_id: Uuid, input: RecordActionInput) -> AppResult<DailyLog> {
        validate_action_name(&input.action).map_err(|msg| AppError::Validation {
            field: "action".to_string(),
            message: msg.to_string(),
        })?;
        validate_readings(input.temperature_celsius, input.humidity_percent)?;

        let (crop, _, plan) = CropService::new(self.store.clone())
            .plan_for_crop(crop_id)
            .await?;
        require_active(crop.status)?;

        let now = Utc::now();
        let day = current_day_for(&crop.start_datetime, &now, plan.growth_days);
        if day == 0 {
            return Err(AppError::ValidationError(
                "Crop has not started yet, actions can be logged from day 1".to_string(),
            ));
        }

        let log = self
            .store
            .upsert_day_log(crop_id, day, |log| {
                log.apply_action(&input.action);
                log.apply_observation(
                    input.temperature_celsius,
                    input.humidity_percent,
                    input.notes.as_deref(),
                );
            })
            .await;
        Ok(log)
    }

    /// Create a full log for an explicit day of the cycle
    pub async fn create_log(&self, crop_id: Uuid, input: CreateLogInput) -> AppResult<DailyLog> {
        let (crop, _, plan) = CropService::new(self.store.clone())
            .plan_for_crop(crop_id)
            .await?;
        require_active(crop.status)?;

        validate_log_day(input.day_number, plan.growth_days).map_err(|msg| {
            AppError::Validation {
                field: "day_number".to_string(),
                message: msg.to_string(),
            }
        })?;
        for action in &input.actions_recorded {
            validate_action_name(action).map_err(|msg| AppError::Validation {
                field: "actions_recorded".to_string(),
                message: msg.to_string(),
            })?;
        }
        validate_readings(input.temperature_celsius, input.humidity_percent)?;
        if let Some(predicted) = input.predicted_yield_grams {
            validate_weight_grams(predicted).map_err(|msg| AppError::Validation {
                field: "predicted_yield_grams".to_string(),
                message: msg.to_string(),
            })?;
        }

        let mut log = DailyLog::empty(crop_id, input.day_number);
        for action in &input.actions_recorded {
            log.apply_action(action);
        }
        log.watered = log.watered || input.watered;
        log.temperature_celsius = input.temperature_celsius;
        log.humidity_percent = input.humidity_percent;
        log.photo_url = input.photo_url;
        log.notes = input.notes;
        log.predicted_yield_grams = input.predicted_yield_grams;

        if !self.store.try_insert_day_log(log.clone()).await {
            return Err(AppError::Conflict {
                resource: "daily_log".to_string(),
                message: format!(
                    "A log for day {} already exists, record actions to update it",
                    input.day_number
                ),
            });
        }
        Ok(log)
    }

    /// Get all logs for a crop, ordered by day
    pub async fn list_logs(&self, crop_id: Uuid) -> AppResult<Vec<DailyLog>> {
        self.store
            .crop_by_id(crop_id)
            .await
            .ok_or_else(|| AppError::NotFound("Crop".to_string()))?;
        Ok(self.store.logs_for_crop(crop_id).await)
    }
}

fn require_active(status: CropStatus) -> AppResult<()> {
    if status != CropStatus::Active {
        return Err(AppError::InvalidStateTransition(format!(
            "Cannot log care for a {} crop",
            status
        )));
    }
    Ok(())
}

fn validate_readings(temperature: Option<f64>, humidity: Option<f64>) -> AppResult<()> {
    if let Some(celsius) = temperature {
        validate_temperature(celsius).map_err(|msg| AppError::Validation {
            field: "temperature_celsius".to_string(),
            message: msg.to_string(),
        })?;
    }
    if let Some(percent) = humidity {
        validate_humidity(percent).map_err(|msg| AppError::Validation {
            field: "humidity_percent".to_string(),
            message: msg.to_string(),
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::crop::CreateCropInput;
    use crate::services::SeedService;
    use chrono::{DateTime, Duration, Utc};
    use shared::models::Crop;

    const TEST_CATALOG: &str = "\
name,difficulty,soaking,blackout_days,harvest_days,avg_yield_grams,ideal_temperature,ideal_humidity
Sunflower,easy,Soak for 8-12 hours,2-3,8-12,600,22.5,50
";

    /// Store with a sunflower crop started four days ago, currently on day 5
    async fn store_with_crop() -> (Store, Crop) {
        store_with_crop_started(Utc::now() - Duration::days(4)).await
    }

    async fn store_with_crop_started(start: DateTime<Utc>) -> (Store, Crop) {
        let store = Store::new();
        SeedService::new(store.clone())
            .import_catalog_from_reader(TEST_CATALOG.as_bytes())
            .await
            .unwrap();
        let seed = store.seed_by_slug("sunflower").await.unwrap();
        let crop = CropService::new(store.clone())
            .create_crop(
                Uuid::new_v4(),
                CreateCropInput {
                    seed_id: seed.id,
                    start_datetime: Some(start),
                    tray_size: None,
                    custom_settings: None,
                    notification_settings: None,
                },
            )
            .await
            .unwrap();
        (store, crop)
    }

    fn action_input(action: &str) -> RecordActionInput {
        RecordActionInput {
            action: action.to_string(),
            temperature_celsius: None,
            humidity_percent: None,
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_record_action_creates_todays_log() {
        let (store, crop) = store_with_crop().await;
        let service = LogService::new(store);

        let mut input = action_input("water_morning");
        input.temperature_celsius = Some(21.0);
        let log = service.record_action(crop.id, input).await.unwrap();

        assert_eq!(log.day_number, 5);
        assert!(log.watered);
        assert_eq!(log.temperature_celsius, Some(21.0));
        assert_eq!(log.actions_recorded, vec!["water_morning"]);
    }

    #[tokio::test]
    async fn test_record_action_merges_into_same_day() {
        let (store, crop) = store_with_crop().await;
        let service = LogService::new(store);

        service
            .record_action(crop.id, action_input("water_morning"))
            .await
            .unwrap();
        let mut second = action_input("check_mold");
        second.humidity_percent = Some(55.0);
        let log = service.record_action(crop.id, second).await.unwrap();

        assert_eq!(log.actions_recorded.len(), 2);
        assert!(log.watered);
        assert_eq!(log.humidity_percent, Some(55.0));
        assert_eq!(service.list_logs(crop.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_record_action_rejects_unstarted_crop() {
        let (store, crop) = store_with_crop_started(Utc::now() + Duration::days(2)).await;
        let service = LogService::new(store);

        let err = service
            .record_action(crop.id, action_input("water_morning"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_record_action_rejects_bad_name() {
        let (store, crop) = store_with_crop().await;
        let service = LogService::new(store);

        let err = service
            .record_action(crop.id, action_input("Water Morning"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation { field, .. } if field == "action"));
    }

    #[tokio::test]
    async fn test_record_action_rejects_terminal_crop() {
        let (store, crop) = store_with_crop().await;
        CropService::new(store.clone())
            .mark_failed(crop.id)
            .await
            .unwrap();
        let service = LogService::new(store);

        let err = service
            .record_action(crop.id, action_input("water_morning"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidStateTransition(_)));
    }

    fn log_input(day_number: u32) -> CreateLogInput {
        CreateLogInput {
            day_number,
            watered: false,
            actions_recorded: Vec::new(),
            temperature_celsius: None,
            humidity_percent: None,
            photo_url: None,
            notes: None,
            predicted_yield_grams: None,
        }
    }

    #[tokio::test]
    async fn test_create_log_rejects_duplicate_day() {
        let (store, crop) = store_with_crop().await;
        let service = LogService::new(store);

        service.create_log(crop.id, log_input(2)).await.unwrap();
        let err = service.create_log(crop.id, log_input(2)).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict { resource, .. } if resource == "daily_log"));
    }

    #[tokio::test]
    async fn test_create_log_rejects_day_outside_cycle() {
        let (store, crop) = store_with_crop().await;
        let service = LogService::new(store);

        let err = service.create_log(crop.id, log_input(0)).await.unwrap_err();
        assert!(matches!(err, AppError::Validation { field, .. } if field == "day_number"));

        let err = service.create_log(crop.id, log_input(11)).await.unwrap_err();
        assert!(matches!(err, AppError::Validation { field, .. } if field == "day_number"));
    }

    #[tokio::test]
    async fn test_create_log_watering_action_sets_flag() {
        let (store, crop) = store_with_crop().await;
        let service = LogService::new(store);

        let mut input = log_input(3);
        input.actions_recorded = vec!["water_evening".to_string()];
        let log = service.create_log(crop.id, input).await.unwrap();
        assert!(log.watered);
    }

    #[tokio::test]
    async fn test_list_logs_sorted_by_day() {
        let (store, crop) = store_with_crop().await;
        let service = LogService::new(store);

        service.create_log(crop.id, log_input(3)).await.unwrap();
        service.create_log(crop.id, log_input(1)).await.unwrap();

        let logs = service.list_logs(crop.id).await.unwrap();
        let days: Vec<u32> = logs.iter().map(|l| l.day_number).collect();
        assert_eq!(days, vec![1, 3]);

        let err = service.list_logs(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
