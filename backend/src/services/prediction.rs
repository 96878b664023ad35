//! Yield prediction service

use uuid::Uuid;

use shared::models::{predict_yield, GrowthFeatures, YieldPrediction};

use super::crop::CropService;
use crate::error::AppResult;
use crate::store::Store;

/// Prediction service running the yield model over a crop's logs
#[derive(Clone)]
pub struct PredictionService {
    store: Store,
}

impl PredictionService {
    /// Create a new PredictionService instance
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Predict the final yield for a crop from its logs so far
    pub async fn predict_for_crop(&self, crop_id: Uuid) -> AppResult<YieldPrediction> {
        let (_, seed, plan) = CropService::new(self.store.clone())
            .plan_for_crop(crop_id)
            .await?;
        let logs = self.store.logs_for_crop(crop_id).await;
        Ok(predict_yield(&seed, &plan, &logs))
    }

    /// Summarize the growing conditions recorded for a crop
    pub async fn conditions_for_crop(&self, crop_id: Uuid) -> AppResult<GrowthFeatures> {
        let (_, seed, _) = CropService::new(self.store.clone())
            .plan_for_crop(crop_id)
            .await?;
        let logs = self.store.logs_for_crop(crop_id).await;
        Ok(GrowthFeatures::from_logs(
            &logs,
            seed.ideal_temperature_celsius,
            seed.ideal_humidity_percent,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::crop::CreateCropInput;
    use crate::services::SeedService;
    use shared::models::Crop;

    const TEST_CATALOG: &str = "\
name,difficulty,soaking,blackout_days,harvest_days,avg_yield_grams,ideal_temperature,ideal_humidity
Sunflower,easy,Soak for 8-12 hours,2-3,8-12,600,22.5,50
";

    async fn store_with_crop() -> (Store, Crop) {
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
                    start_datetime: None,
                    tray_size: None,
                    custom_settings: None,
                    notification_settings: None,
                },
            )
            .await
            .unwrap();
        (store, crop)
    }

    #[tokio::test]
    async fn test_predict_without_logs_returns_base_yield() {
        let (store, crop) = store_with_crop().await;
        let prediction = PredictionService::new(store)
            .predict_for_crop(crop.id)
            .await
            .unwrap();
        assert_eq!(prediction.predicted_yield_grams, 600.0);
        assert_eq!(prediction.yield_efficiency, 1.0);
    }

    #[tokio::test]
    async fn test_prediction_drops_after_missed_watering() {
        let (store, crop) = store_with_crop().await;
        store.upsert_day_log(crop.id, 5, |log| log.watered = false).await;

        let prediction = PredictionService::new(store)
            .predict_for_crop(crop.id)
            .await
            .unwrap();
        assert!(prediction.predicted_yield_grams < 600.0);
        assert!(prediction
            .suggestions
            .iter()
            .any(|s| s.title == "Missed Watering!"));
    }

    #[tokio::test]
    async fn test_conditions_summarize_logged_readings() {
        let (store, crop) = store_with_crop().await;
        store
            .upsert_day_log(crop.id, 1, |log| {
                log.watered = true;
                log.temperature_celsius = Some(20.0);
                log.humidity_percent = Some(40.0);
            })
            .await;
        store
            .upsert_day_log(crop.id, 2, |log| {
                log.watered = true;
                log.temperature_celsius = Some(24.0);
                log.humidity_percent = Some(60.0);
            })
            .await;

        let features = PredictionService::new(store)
            .conditions_for_crop(crop.id)
            .await
            .unwrap();
        assert_eq!(features.avg_temperature_celsius, 22.0);
        assert_eq!(features.avg_humidity_percent, 50.0);
        assert_eq!(features.watering_consistency, 1.0);
        assert_eq!(features.missed_watering_days, 0);
        assert_eq!(features.max_temperature_celsius, Some(24.0));
        assert_eq!(features.min_temperature_celsius, Some(20.0));
    }

    #[tokio::test]
    async fn test_prediction_for_unknown_crop() {
        let store = Store::new();
        let err = PredictionService::new(store)
            .predict_for_crop(Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, crate::error::AppError::NotFound(_)));
    }
}
