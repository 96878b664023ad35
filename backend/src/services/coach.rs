//! Growth coach service for daily AI guidance with canned fallbacks

use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use shared::schedule::Phase;

use super::crop::CropService;
use crate::config::CoachConfig;
use crate::error::AppResult;
use crate::external::growth_coach::{CoachLogSummary, CoachRequest, GrowthCoachClient};
use crate::store::Store;

/// How many recent logs to include in the coach context
const RECENT_LOG_COUNT: usize = 3;

/// Coach service producing a daily tip for a crop
#[derive(Clone)]
pub struct CoachService {
    store: Store,
    coach_client: Option<GrowthCoachClient>,
}

/// A coaching tip with its origin
#[derive(Debug, Clone, Serialize)]
pub struct CoachTip {
    pub message: String,
    pub source: CoachSource,
}

/// Where a tip came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CoachSource {
    Coach,
    Fallback,
}

impl CoachService {
    /// Create a new CoachService instance without a coach client
    pub fn new(store: Store) -> Self {
        Self {
            store,
            coach_client: None,
        }
    }

    /// Create a CoachService, attaching the coach client when configured
    pub fn from_config(store: Store, config: &CoachConfig) -> Self {
        Self {
            coach_client: GrowthCoachClient::from_config(config),
            store,
        }
    }

    /// Daily guidance for a crop
    ///
    /// Falls back to a canned phase tip when the coach is not configured
    /// or unreachable, so the endpoint never fails on coach outages.
    pub async fn daily_tip(&self, crop_id: Uuid) -> AppResult<CoachTip> {
        let (crop, seed, plan) = CropService::new(self.store.clone())
            .plan_for_crop(crop_id)
            .await?;
        let now = Utc::now();
        let status = plan.status_at(&crop.start_datetime, &now);

        let Some(client) = self.coach_client.as_ref() else {
            return Ok(CoachTip {
                message: fallback_tip(status.phase).to_string(),
                source: CoachSource::Fallback,
            });
        };

        let logs = self.store.logs_for_crop(crop_id).await;
        let recent_logs = logs
            .iter()
            .rev()
            .take(RECENT_LOG_COUNT)
            .map(|log| CoachLogSummary {
                day_number: log.day_number,
                watered: log.watered,
                temperature_celsius: log.temperature_celsius,
                humidity_percent: log.humidity_percent,
            })
            .collect();
        let request = CoachRequest {
            seed_name: seed.name,
            current_day: status.current_day,
            growth_days: plan.growth_days,
            phase: status.phase.label().to_string(),
            ideal_temperature_celsius: seed.ideal_temperature_celsius,
            ideal_humidity_percent: seed.ideal_humidity_percent,
            recent_logs,
        };

        match client.suggest(&request).await {
            Ok(message) => Ok(CoachTip {
                message,
                source: CoachSource::Coach,
            }),
            Err(e) => {
                tracing::warn!("Growth coach request failed: {}", e);
                Ok(CoachTip {
                    message: fallback_tip(status.phase).to_string(),
                    source: CoachSource::Fallback,
                })
            }
        }
    }
}

fn fallback_tip(phase: Phase) -> &'static str {
    match phase {
        Phase::Prep => {
            "Rinse your seeds and check the soak time for this variety. \
             Spread them evenly on a well moistened medium."
        }
        Phase::Blackout => {
            "Keep the tray covered and dark. Mist once or twice a day so the \
             medium stays moist but never soggy."
        }
        Phase::Light => {
            "Give the tray 12 to 16 hours of light and water from the bottom \
             to keep the leaves dry. Watch for even, upright growth."
        }
        Phase::Harvest => {
            "Harvest with sharp scissors just above the medium, ideally in the \
             morning. Rinse, dry well, and refrigerate what you do not eat."
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::crop::CreateCropInput;
    use crate::services::SeedService;

    #[test]
    fn test_fallback_tips_cover_every_phase() {
        for phase in [Phase::Prep, Phase::Blackout, Phase::Light, Phase::Harvest] {
            assert!(!fallback_tip(phase).is_empty());
        }
    }

    #[tokio::test]
    async fn test_daily_tip_without_client_falls_back() {
        let store = Store::new();
        SeedService::new(store.clone())
            .import_catalog_from_reader(
                "name,harvest_days,blackout_days\nSunflower,8-12,2-3\n".as_bytes(),
            )
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

        let tip = CoachService::new(store).daily_tip(crop.id).await.unwrap();
        assert_eq!(tip.source, CoachSource::Fallback);
        assert!(!tip.message.is_empty());
    }
}
