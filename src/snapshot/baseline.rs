use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::CompareOptions;
use crate::dom::parser::ParseMode;
use crate::error::{DriftError, DriftResult};
use crate::fingerprint::identity::IdentityKind;
use crate::snapshot::snapshot_model::ElementMap;

/// A named, immutable capture of a document's element structure.
///
/// Re-capturing produces a new `Baseline` with a fresh id; stored baselines
/// are never edited in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Baseline {
    pub id: String,
    pub name: String,

    #[serde(rename = "url", default)]
    pub source_url: String,

    #[serde(rename = "timestamp")]
    pub captured_at: DateTime<Utc>,

    #[serde(rename = "html", default)]
    pub raw_html: String,

    #[serde(rename = "elementMap", default)]
    pub elements: ElementMap,

    /// How `raw_html` was parsed into `elements`
    #[serde(rename = "parseMode", default)]
    pub parse_mode: ParseMode,

    /// Key strategy `elements` was captured with
    #[serde(default)]
    pub identity: IdentityKind,
}

impl Baseline {
    pub fn new(name: &str, source_url: &str, raw_html: &str, elements: ElementMap) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            source_url: source_url.to_string(),
            captured_at: Utc::now(),
            raw_html: raw_html.to_string(),
            elements,
            parse_mode: ParseMode::default(),
            identity: IdentityKind::default(),
        }
    }

    /// Record the options `elements` was captured with.
    pub fn captured_with(mut self, options: &CompareOptions) -> Self {
        self.parse_mode = options.mode;
        self.identity = options.identity;
        self
    }

    /// Options that reproduce this baseline's keys for a fresh document.
    pub fn options(&self) -> CompareOptions {
        CompareOptions {
            mode: self.parse_mode,
            identity: self.identity,
        }
    }

    pub fn to_json(&self) -> DriftResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| DriftError::json(format!("serialize baseline {}", self.id), e))
    }

    pub fn from_json(json: &str) -> DriftResult<Self> {
        let baseline: Baseline =
            serde_json::from_str(json).map_err(|e| DriftError::json("parse baseline", e))?;

        if baseline.id.trim().is_empty() {
            return Err(DriftError::InvalidBaseline("empty id".into()));
        }

        Ok(baseline)
    }
}
