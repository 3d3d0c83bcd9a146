use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Identity string used to match "the same" element across two documents.
pub type ElementKey = String;

/// Captured state of one element. Immutable once built by the fingerprinter.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ElementSnapshot {
    pub tag_name: String,
    pub attributes: BTreeMap<String, String>,
    pub text: String,
    pub xpath: String,
    pub css_selector: String,
    pub locators: Vec<String>,
}

impl ElementSnapshot {
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    pub fn id(&self) -> Option<&str> {
        self.attribute("id")
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attributes
            .get("class")
            .into_iter()
            .flat_map(|c| c.split_whitespace())
    }
}

// ============================================================================
// ElementMap: key -> snapshot, in document order
// ============================================================================

/// Element snapshots keyed by `ElementKey`, iterated in insertion order.
///
/// Serializes as a plain JSON object so stored baselines stay readable by
/// non-Rust tooling.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementMap {
    entries: Vec<(ElementKey, ElementSnapshot)>,
    index: HashMap<ElementKey, usize>,
}

impl ElementMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace. A replaced entry keeps its original position.
    pub fn insert(&mut self, key: ElementKey, snapshot: ElementSnapshot) -> Option<ElementSnapshot> {
        match self.index.get(&key) {
            Some(&pos) => Some(std::mem::replace(&mut self.entries[pos].1, snapshot)),
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, snapshot));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&ElementSnapshot> {
        self.index.get(key).map(|&pos| &self.entries[pos].1)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ElementSnapshot)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &ElementSnapshot> {
        self.entries.iter().map(|(_, v)| v)
    }
}

impl FromIterator<(ElementKey, ElementSnapshot)> for ElementMap {
    fn from_iter<I: IntoIterator<Item = (ElementKey, ElementSnapshot)>>(iter: I) -> Self {
        let mut map = ElementMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl Serialize for ElementMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ElementMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ElementMapVisitor;

        impl<'de> Visitor<'de> for ElementMapVisitor {
            type Value = ElementMap;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object mapping element keys to element snapshots")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<ElementMap, A::Error> {
                let mut map = ElementMap::new();
                while let Some((key, value)) = access.next_entry::<ElementKey, ElementSnapshot>()? {
                    map.insert(key, value);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(ElementMapVisitor)
    }
}
