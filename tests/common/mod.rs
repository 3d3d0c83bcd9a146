#![allow(dead_code)]

pub mod pages;

use dom_drift::{
    CompareOptions, capture_elements,
    snapshot::snapshot_model::ElementMap,
};

pub fn fragment_map(html: &str) -> ElementMap {
    capture_elements(html, &CompareOptions::fragment())
}

pub fn document_map(html: &str) -> ElementMap {
    capture_elements(html, &CompareOptions::default())
}
