//! Seed catalog service for importing and browsing varieties

use std::io::Read;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shared::models::Seed;
use shared::validation::{parse_range_avg, parse_soak_hours, seed_slug};

use crate::error::{AppError, AppResult};
use crate::store::Store;

/// Fallbacks for catalog rows that omit growing condition data
const DEFAULT_AVG_YIELD_GRAMS: f64 = 500.0;
const DEFAULT_IDEAL_TEMPERATURE: f64 = 22.0;
const DEFAULT_IDEAL_HUMIDITY: f64 = 50.0;
const DEFAULT_TEMPERATURE_TOLERANCE: f64 = 3.0;
const DEFAULT_HUMIDITY_TOLERANCE: f64 = 10.0;

/// Seed catalog service backed by the CSV dataset
#[derive(Clone)]
pub struct SeedService {
    store: Store,
}

/// Outcome of a catalog import
#[derive(Debug, Clone, Serialize)]
pub struct CatalogImportSummary {
    pub imported: usize,
    pub updated: usize,
}

/// One row of the seed dataset CSV
///
/// Every column is read as text because the dataset mixes plain numbers
/// with ranges like "8-12" and prose like "Soak for 8-12 hours".
#[derive(Debug, Deserialize)]
struct SeedCsvRow {
    name: String,
    #[serde(default)]
    latin_name: String,
    #[serde(default)]
    difficulty: String,
    #[serde(default)]
    seed_count_per_gram: String,
    #[serde(default)]
    sow_density_grams: String,
    #[serde(default)]
    soaking: String,
    #[serde(default)]
    blackout_days: String,
    #[serde(default)]
    germination_days: String,
    #[serde(default)]
    harvest_days: String,
    #[serde(default)]
    watering: String,
    #[serde(default)]
    avg_yield_grams: String,
    #[serde(default)]
    ideal_temperature: String,
    #[serde(default)]
    ideal_humidity: String,
    #[serde(default)]
    temperature_tolerance: String,
    #[serde(default)]
    humidity_tolerance: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    taste_profile: String,
    #[serde(default)]
    nutrition: String,
    #[serde(default)]
    care_instructions: String,
    #[serde(default)]
    source_url: String,
}

impl SeedCsvRow {
    fn into_seed(self, id: Uuid, slug: String, created_at: DateTime<Utc>) -> Seed {
        Seed {
            id,
            seed_type: slug,
            name: self.name.trim().to_string(),
            latin_name: none_if_empty(&self.latin_name),
            difficulty: self.difficulty.parse().ok(),
            seed_count_per_gram: parse_range_avg(&self.seed_count_per_gram),
            sow_density_grams: parse_range_avg(&self.sow_density_grams),
            soaking_duration_hours: parse_soak_hours(&self.soaking),
            blackout_time_days: parse_range_avg(&self.blackout_days),
            germination_days: parse_range_avg(&self.germination_days),
            harvest_days: parse_range_avg(&self.harvest_days),
            soaking_requirements: none_if_empty(&self.soaking),
            watering_requirements: none_if_empty(&self.watering),
            avg_yield_grams: Some(
                parse_range_avg(&self.avg_yield_grams).unwrap_or(DEFAULT_AVG_YIELD_GRAMS),
            ),
            ideal_temperature_celsius: parse_range_avg(&self.ideal_temperature)
                .unwrap_or(DEFAULT_IDEAL_TEMPERATURE),
            ideal_humidity_percent: parse_range_avg(&self.ideal_humidity)
                .unwrap_or(DEFAULT_IDEAL_HUMIDITY),
            temperature_tolerance: parse_range_avg(&self.temperature_tolerance)
                .unwrap_or(DEFAULT_TEMPERATURE_TOLERANCE),
            humidity_tolerance: parse_range_avg(&self.humidity_tolerance)
                .unwrap_or(DEFAULT_HUMIDITY_TOLERANCE),
            description: none_if_empty(&self.description),
            taste_profile: none_if_empty(&self.taste_profile),
            nutrition: none_if_empty(&self.nutrition),
            care_instructions: none_if_empty(&self.care_instructions),
            source_url: none_if_empty(&self.source_url),
            created_at,
        }
    }
}

impl SeedService {
    /// Create a new SeedService instance
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Import the seed catalog from the CSV dataset on disk
    pub async fn import_catalog(&self, path: &str) -> AppResult<CatalogImportSummary> {
        let file = std::fs::File::open(path).map_err(|e| {
            AppError::Configuration(format!("Cannot open seed dataset {}: {}", path, e))
        })?;
        self.import_catalog_from_reader(file).await
    }

    /// Import catalog rows from any CSV source, upserting by slug
    ///
    /// Re-importing the same dataset updates rows in place instead of
    /// creating duplicates, so the import can run on every startup.
    pub async fn import_catalog_from_reader<R: Read>(
        &self,
        reader: R,
    ) -> AppResult<CatalogImportSummary> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut imported = 0;
        let mut updated = 0;

        for result in csv_reader.deserialize::<SeedCsvRow>() {
            let row = result.map_err(|e| {
                AppError::Configuration(format!("Invalid seed dataset row: {}", e))
            })?;
            let slug = seed_slug(&row.name);
            if slug.is_empty() {
                tracing::warn!("Skipping seed dataset row without a name");
                continue;
            }

            let existing = self.store.seed_by_slug(&slug).await;
            let id = existing.as_ref().map(|s| s.id).unwrap_or_else(Uuid::new_v4);
            let created_at = existing
                .as_ref()
                .map(|s| s.created_at)
                .unwrap_or_else(Utc::now);

            self.store.upsert_seed(row.into_seed(id, slug, created_at)).await;
            if existing.is_some() {
                updated += 1;
            } else {
                imported += 1;
            }
        }

        Ok(CatalogImportSummary { imported, updated })
    }

    /// Get all seeds in the catalog, sorted by name
    pub async fn list_seeds(&self) -> AppResult<Vec<Seed>> {
        Ok(self.store.list_seeds().await)
    }

    /// Get a single seed by ID
    pub async fn get_seed(&self, seed_id: Uuid) -> AppResult<Seed> {
        self.store
            .seed_by_id(seed_id)
            .await
            .ok_or_else(|| AppError::NotFound("Seed".to_string()))
    }
}

fn none_if_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
