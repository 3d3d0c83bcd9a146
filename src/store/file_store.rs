use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use tracing::{info, warn};

use crate::error::{DriftError, DriftResult};
use crate::snapshot::baseline::Baseline;
use crate::store::{BaselineInfo, BaselineStore, sort_infos};

/// Stores each baseline as `<dir>/<id>.json`.
#[derive(Debug, Clone)]
pub struct FileBaselineStore {
    dir: PathBuf,
}

impl FileBaselineStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, id: &str) -> DriftResult<PathBuf> {
        let valid = !id.is_empty()
            && id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(DriftError::InvalidBaseline(format!("unsafe baseline id '{}'", id)));
        }
        Ok(self.dir.join(format!("{}.json", id)))
    }
}

impl BaselineStore for FileBaselineStore {
    fn save(&self, baseline: &Baseline) -> DriftResult<()> {
        let path = self.path_for(&baseline.id)?;
        fs::create_dir_all(&self.dir).map_err(|e| DriftError::io(&self.dir, e))?;

        let json = baseline.to_json()?;
        fs::write(&path, json).map_err(|e| DriftError::io(&path, e))?;

        info!(id = %baseline.id, name = %baseline.name, elements = baseline.elements.len(), "saved baseline");
        Ok(())
    }

    fn load(&self, id: &str) -> DriftResult<Baseline> {
        let path = self.path_for(id)?;
        let json = match fs::read_to_string(&path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(DriftError::BaselineNotFound { id: id.to_string() });
            }
            Err(e) => return Err(DriftError::io(&path, e)),
        };

        let baseline = Baseline::from_json(&json)?;
        info!(id = %baseline.id, elements = baseline.elements.len(), "loaded baseline");
        Ok(baseline)
    }

    fn list(&self) -> DriftResult<Vec<BaselineInfo>> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(DriftError::io(&self.dir, e)),
        };

        let mut infos = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| DriftError::io(&self.dir, e))?.path();
            if path.extension().is_none_or(|ext| ext != "json") {
                continue;
            }

            let json = fs::read_to_string(&path).map_err(|e| DriftError::io(&path, e))?;
            match Baseline::from_json(&json) {
                Ok(baseline) => infos.push(BaselineInfo::from(&baseline)),
                Err(e) => warn!(path = %path.display(), error = %e, "skipping unreadable baseline"),
            }
        }

        sort_infos(&mut infos);
        Ok(infos)
    }

    fn delete(&self, id: &str) -> DriftResult<()> {
        let path = self.path_for(id)?;
        match fs::remove_file(&path) {
            Ok(()) => {
                info!(id = %id, "deleted baseline");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(DriftError::BaselineNotFound { id: id.to_string() })
            }
            Err(e) => Err(DriftError::io(&path, e)),
        }
    }
}
