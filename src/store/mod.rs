//! Baseline persistence.
//!
//! The capture/compare core never touches storage; callers load a
//! `Baseline` through a `BaselineStore` and hand its element map over.

pub mod file_store;
pub mod memory_store;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DriftResult;
use crate::snapshot::baseline::Baseline;

pub use file_store::FileBaselineStore;
pub use memory_store::MemoryBaselineStore;

/// Listing entry; everything but the html and element map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaselineInfo {
    pub id: String,
    pub name: String,
    pub url: String,
    pub timestamp: DateTime<Utc>,
    pub element_count: usize,
}

impl From<&Baseline> for BaselineInfo {
    fn from(b: &Baseline) -> Self {
        Self {
            id: b.id.clone(),
            name: b.name.clone(),
            url: b.source_url.clone(),
            timestamp: b.captured_at,
            element_count: b.elements.len(),
        }
    }
}

/// Owner of named baselines. Single writer assumed.
pub trait BaselineStore {
    fn save(&self, baseline: &Baseline) -> DriftResult<()>;

    /// Fails with `BaselineNotFound` for unknown ids.
    fn load(&self, id: &str) -> DriftResult<Baseline>;

    /// Sorted oldest first, ties by id.
    fn list(&self) -> DriftResult<Vec<BaselineInfo>>;

    fn delete(&self, id: &str) -> DriftResult<()>;
}

pub(crate) fn sort_infos(infos: &mut [BaselineInfo]) {
    infos.sort_by(|a, b| a.timestamp.cmp(&b.timestamp).then_with(|| a.id.cmp(&b.id)));
}
