//! Seed documents: the built-in ClickFix catalog plus loading of YAML/JSON seed files.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use clickfix_core::{Job, JobStatus, Worker};
use clickfix_store::{Catalog, Marketplace, MarketplaceConfig};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;

pub const CRATE_NAME: &str = "clickfix-seed";

pub const BUILTIN_SEED_YAML: &str = include_str!("../../../fixtures/seed/marketplace.yaml");

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SeedError {
    #[error("duplicate worker id {0}")]
    DuplicateWorker(String),
    #[error("duplicate job id {0}")]
    DuplicateJob(String),
    #[error("job {job_id} references unknown worker {worker_id}")]
    UnknownWorker { job_id: String, worker_id: String },
    #[error("job {job_id} has unparseable date {value:?}")]
    InvalidDate { job_id: String, value: String },
    #[error("unsupported seed file extension for {0}")]
    UnsupportedFormat(String),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedDocument {
    #[serde(default)]
    pub workers: Vec<Worker>,
    /// Newest first, matching ledger order.
    #[serde(default)]
    pub jobs: Vec<SeedJob>,
}

/// Job as written in a seed file. Snapshot fields left out are copied from the worker.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedJob {
    pub id: String,
    pub customer_id: String,
    pub worker_id: String,
    #[serde(default)]
    pub worker_name: Option<String>,
    #[serde(default)]
    pub service: Option<String>,
    pub description: String,
    pub status: JobStatus,
    pub date: String,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub attached_media: Vec<String>,
}

impl SeedDocument {
    pub fn into_parts(self) -> Result<(Catalog, Vec<Job>), SeedError> {
        let mut worker_ids = HashSet::new();
        for worker in &self.workers {
            if !worker_ids.insert(worker.id.as_str()) {
                return Err(SeedError::DuplicateWorker(worker.id.clone()));
            }
        }

        let catalog = Catalog::new(self.workers.clone());
        let mut job_ids = HashSet::new();
        let mut jobs = Vec::with_capacity(self.jobs.len());
        for seed in self.jobs {
            if !job_ids.insert(seed.id.clone()) {
                return Err(SeedError::DuplicateJob(seed.id));
            }
            let Some(worker) = catalog.find_by_id(&seed.worker_id) else {
                return Err(SeedError::UnknownWorker {
                    job_id: seed.id,
                    worker_id: seed.worker_id,
                });
            };
            let Some(created_at) = parse_seed_date(&seed.date) else {
                return Err(SeedError::InvalidDate {
                    job_id: seed.id,
                    value: seed.date,
                });
            };
            jobs.push(Job {
                worker_name: seed.worker_name.unwrap_or_else(|| worker.name.clone()),
                service: seed.service.unwrap_or_else(|| worker.category.clone()),
                price: seed.price.unwrap_or(worker.hourly_rate),
                id: seed.id,
                customer_id: seed.customer_id,
                worker_id: seed.worker_id,
                description: seed.description,
                status: seed.status,
                created_at,
                attached_media: seed.attached_media,
            });
        }

        Ok((catalog, jobs))
    }
}

/// RFC 3339 timestamp, or a bare `YYYY-MM-DD` read as midnight UTC.
pub fn parse_seed_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

pub fn builtin_seed() -> Result<SeedDocument> {
    serde_yaml::from_str(BUILTIN_SEED_YAML).context("parsing built-in seed")
}

/// Loads a seed file; the format follows the extension (`.yaml`, `.yml`, `.json`).
pub fn load_seed(path: impl AsRef<Path>) -> Result<SeedDocument> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "yaml" | "yml" => read_seed_file(path, |data| {
            serde_yaml::from_str(data).map_err(anyhow::Error::from)
        }),
        "json" => read_seed_file(path, |data| {
            serde_json::from_str(data).map_err(anyhow::Error::from)
        }),
        _ => Err(SeedError::UnsupportedFormat(path.display().to_string()).into()),
    }
}

fn read_seed_file<T: DeserializeOwned>(
    path: &Path,
    parse: impl FnOnce(&str) -> Result<T>,
) -> Result<T> {
    let data = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    parse(&data).with_context(|| format!("parsing {}", path.display()))
}

/// Builds a marketplace from the configured seed file, or the built-in seed.
pub fn marketplace_from_config(config: &MarketplaceConfig) -> Result<Marketplace> {
    let document = match &config.seed_path {
        Some(path) => load_seed(path)?,
        None => builtin_seed()?,
    };
    let (catalog, jobs) = document.into_parts().context("validating seed data")?;
    Ok(Marketplace::from_config(catalog, jobs, config))
}
