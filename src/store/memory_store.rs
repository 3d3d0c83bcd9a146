use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::{DriftError, DriftResult};
use crate::snapshot::baseline::Baseline;
use crate::store::{BaselineInfo, BaselineStore, sort_infos};

/// In-memory store for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryBaselineStore {
    baselines: Mutex<HashMap<String, Baseline>>,
}

impl MemoryBaselineStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn with<T>(&self, f: impl FnOnce(&mut HashMap<String, Baseline>) -> T) -> T {
        let mut guard = match self.baselines.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        f(&mut guard)
    }
}

impl BaselineStore for MemoryBaselineStore {
    fn save(&self, baseline: &Baseline) -> DriftResult<()> {
        self.with(|map| map.insert(baseline.id.clone(), baseline.clone()));
        Ok(())
    }

    fn load(&self, id: &str) -> DriftResult<Baseline> {
        self.with(|map| map.get(id).cloned())
            .ok_or_else(|| DriftError::BaselineNotFound { id: id.to_string() })
    }

    fn list(&self) -> DriftResult<Vec<BaselineInfo>> {
        let mut infos: Vec<BaselineInfo> = self.with(|map| map.values().map(BaselineInfo::from).collect());
        sort_infos(&mut infos);
        Ok(infos)
    }

    fn delete(&self, id: &str) -> DriftResult<()> {
        self.with(|map| map.remove(id))
            .map(|_| ())
            .ok_or_else(|| DriftError::BaselineNotFound { id: id.to_string() })
    }
}
