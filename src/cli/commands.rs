use std::path::Path;

use tracing::warn;

use crate::cli::config::{
    AppConfig, OutputFormat, resolve_compare_options, resolve_identity, resolve_parse_mode, resolve_store_dir,
};
use crate::compare::comparator::compare;
use crate::diff::line_diff::{diff_text, render_unified};
use crate::dom::parser::ParseMode;
use crate::error::{DriftError, DriftResult};
use crate::locator::advisor::{LocatorAdvisor, LocatorRecommendation};
use crate::locator::candidates::{ClassIndex, candidates};
use crate::report::console::{format_candidates, format_console_report};
use crate::store::{BaselineStore, FileBaselineStore};
use crate::{CompareOptions, capture_baseline, capture_elements};

// ============================================================================
// capture / list / delete subcommands
// ============================================================================

pub fn cmd_capture(
    config: &AppConfig,
    store_dir: Option<&str>,
    name: &str,
    html_path: &str,
    url: &str,
    mode: Option<ParseMode>,
    identity: Option<&str>,
) -> DriftResult<String> {
    let html = read_html(html_path)?;
    let options = CompareOptions {
        mode: resolve_parse_mode(mode, config),
        identity: resolve_identity(identity, config),
    };

    let baseline = capture_baseline(name, url, &html, &options);
    open_store(config, store_dir).save(&baseline)?;

    println!(
        "Captured baseline {} ({} elements) as {}",
        baseline.name,
        baseline.elements.len(),
        baseline.id
    );
    Ok(baseline.id)
}

pub fn cmd_list(config: &AppConfig, store_dir: Option<&str>) -> DriftResult<()> {
    let infos = open_store(config, store_dir).list()?;

    if infos.is_empty() {
        println!("No baselines stored.");
        return Ok(());
    }

    for info in &infos {
        println!(
            "{}  {}  {}  {} elements  {}",
            info.id,
            info.timestamp.to_rfc3339(),
            info.name,
            info.element_count,
            info.url
        );
    }
    Ok(())
}

pub fn cmd_delete(config: &AppConfig, store_dir: Option<&str>, id: &str) -> DriftResult<()> {
    open_store(config, store_dir).delete(id)?;
    println!("Deleted baseline {}", id);
    Ok(())
}

// ============================================================================
// compare subcommand
// ============================================================================

/// Compare an HTML file against a stored baseline. Unless overridden, the
/// file is parsed and keyed the way the baseline was captured.
#[allow(clippy::too_many_arguments)]
pub fn cmd_compare(
    config: &AppConfig,
    store_dir: Option<&str>,
    baseline_id: &str,
    html_path: &str,
    format: OutputFormat,
    mode: Option<ParseMode>,
    identity: Option<&str>,
    output: Option<&str>,
) -> DriftResult<()> {
    let baseline = open_store(config, store_dir).load(baseline_id)?;
    let html = read_html(html_path)?;

    let recorded = baseline.options();
    let options = resolve_compare_options(mode, identity, recorded);
    if options != recorded {
        warn!(
            baseline = %baseline.id,
            recorded_mode = ?recorded.mode,
            recorded_identity = ?recorded.identity,
            mode = ?options.mode,
            identity = ?options.identity,
            "comparing with options that differ from the baseline capture; keys may not line up"
        );
    }

    let current = capture_elements(&html, &options);
    let comparison = compare(&baseline.elements, &current);
    let recommendations: Vec<LocatorRecommendation> =
        LocatorAdvisor::new(&baseline.elements, &current).advise_all(&comparison);

    let content = match format {
        OutputFormat::Json => {
            let report = serde_json::json!({
                "baseline": baseline.id,
                "summary": comparison.summary,
                "differences": comparison.differences,
                "recommendations": recommendations,
            });
            serde_json::to_string_pretty(&report).map_err(|e| DriftError::json("comparison report", e))? + "\n"
        }
        OutputFormat::Console => format_console_report(&baseline.name, &comparison, &recommendations),
    };

    write_output(output, &content)
}

// ============================================================================
// locators / diff subcommands
// ============================================================================

pub fn cmd_locators(
    config: &AppConfig,
    html_path: &str,
    key: Option<&str>,
    mode: Option<ParseMode>,
    output: Option<&str>,
) -> DriftResult<()> {
    let html = read_html(html_path)?;
    let options = CompareOptions {
        mode: resolve_parse_mode(mode, config),
        identity: config.compare.identity,
    };

    let elements = capture_elements(&html, &options);
    let classes = ClassIndex::from_elements(&elements);

    let mut content = String::new();
    for (element_key, snapshot) in elements.iter() {
        if key.is_some_and(|k| k != element_key) {
            continue;
        }
        let ranked = candidates(snapshot, |c| classes.is_unique(c));
        content.push_str(&format_candidates(element_key, &ranked));
    }

    write_output(output, &content)
}

pub fn cmd_diff(
    config: &AppConfig,
    store_dir: Option<&str>,
    baseline_id: &str,
    html_path: &str,
    output: Option<&str>,
) -> DriftResult<()> {
    let baseline = open_store(config, store_dir).load(baseline_id)?;
    let html = read_html(html_path)?;

    write_output(output, &render_unified(&diff_text(&baseline.raw_html, &html)))
}

// ============================================================================
// Helpers
// ============================================================================

fn open_store(config: &AppConfig, store_dir: Option<&str>) -> FileBaselineStore {
    FileBaselineStore::new(resolve_store_dir(store_dir, config))
}

fn read_html(path: &str) -> DriftResult<String> {
    std::fs::read_to_string(path).map_err(|e| DriftError::io(path, e))
}

fn write_output(output: Option<&str>, content: &str) -> DriftResult<()> {
    match output {
        Some(path) => std::fs::write(Path::new(path), content).map_err(|e| DriftError::io(path, e)),
        None => {
            print!("{}", content);
            Ok(())
        }
    }
}
