use std::thread;

use crate::{
    compare::{comparator::compare, compare_model::Comparison},
    dom::parser::{ParseMode, parse_html},
    fingerprint::{fingerprinter::fingerprint_with, identity::IdentityKind},
    snapshot::{baseline::Baseline, snapshot_model::ElementMap},
};

pub mod cli;
pub mod compare;
pub mod diff;
pub mod dom;
pub mod error;
pub mod fingerprint;
pub mod locator;
pub mod report;
pub mod snapshot;
pub mod store;

/// How raw HTML is parsed and keyed before comparison.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompareOptions {
    pub mode: ParseMode,
    pub identity: IdentityKind,
}

impl CompareOptions {
    pub fn fragment() -> Self {
        Self {
            mode: ParseMode::Fragment,
            ..Default::default()
        }
    }

    pub fn with_identity(mut self, identity: IdentityKind) -> Self {
        self.identity = identity;
        self
    }
}

/// Parse and fingerprint one HTML document.
pub fn capture_elements(html: &str, options: &CompareOptions) -> ElementMap {
    let doc = parse_html(html, options.mode);
    fingerprint_with(&doc, options.identity.strategy().as_ref())
}

/// Capture a new baseline with a fresh id and timestamp. The options are
/// recorded on it so later comparisons key elements the same way.
pub fn capture_baseline(name: &str, url: &str, html: &str, options: &CompareOptions) -> Baseline {
    Baseline::new(name, url, html, capture_elements(html, options)).captured_with(options)
}

/// Fingerprint both documents (in parallel) and compare them.
pub fn compare_html(baseline_html: &str, current_html: &str, options: &CompareOptions) -> Comparison {
    let (baseline, current) = capture_pair(baseline_html, current_html, options);
    compare(&baseline, &current)
}

/// Compare a stored baseline against freshly captured HTML, parsed and keyed
/// with the options the baseline was captured with.
pub fn compare_with_baseline(baseline: &Baseline, current_html: &str) -> Comparison {
    let current = capture_elements(current_html, &baseline.options());
    compare(&baseline.elements, &current)
}

/// Fingerprint two documents on separate threads. Each side reads only its
/// own input, so there is no ordering between them.
pub fn capture_pair(
    baseline_html: &str,
    current_html: &str,
    options: &CompareOptions,
) -> (ElementMap, ElementMap) {
    thread::scope(|s| {
        let baseline = s.spawn(|| capture_elements(baseline_html, options));
        let current = capture_elements(current_html, options);

        match baseline.join() {
            Ok(baseline) => (baseline, current),
            Err(panic) => std::panic::resume_unwind(panic),
        }
    })
}
