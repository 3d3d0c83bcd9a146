use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::CompareOptions;
use crate::dom::parser::ParseMode;
use crate::error::{DriftError, DriftResult};
use crate::fingerprint::identity::IdentityKind;

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "dom-drift",
    version,
    about = "Capture HTML baselines, diff page structure, and rank stable locators"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config file (default: dom-drift.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Baseline directory (overrides config)
    #[arg(long, global = true)]
    pub store: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,
}

/// Parse-mode override shared by the commands that read HTML.
///
/// Neither flag set means "use the baseline's or config's mode".
#[derive(Args, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseArgs {
    /// Parse HTML as a body fragment
    #[arg(long, conflicts_with = "document")]
    pub fragment: bool,

    /// Parse HTML as a full document
    #[arg(long)]
    pub document: bool,
}

impl ParseArgs {
    pub fn mode(&self) -> Option<ParseMode> {
        match (self.fragment, self.document) {
            (true, _) => Some(ParseMode::Fragment),
            (false, true) => Some(ParseMode::Document),
            (false, false) => None,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Console,
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fingerprint an HTML file and store it as a new baseline
    Capture {
        /// Baseline name
        #[arg(long)]
        name: String,

        /// HTML file to capture
        #[arg(long)]
        html: String,

        /// Source URL recorded with the baseline
        #[arg(long, default_value = "")]
        url: String,

        #[command(flatten)]
        parse: ParseArgs,

        /// Identity strategy: attribute, positional, content
        #[arg(long)]
        identity: Option<String>,
    },

    /// List stored baselines
    List,

    /// Delete a stored baseline
    Delete {
        #[arg(long)]
        id: String,
    },

    /// Compare an HTML file against a stored baseline
    Compare {
        /// Baseline id
        #[arg(long)]
        baseline: String,

        /// Current HTML file
        #[arg(long)]
        html: String,

        /// Output format
        #[arg(long, value_enum, default_value = "console")]
        format: OutputFormat,

        /// Overrides the parse mode recorded on the baseline
        #[command(flatten)]
        parse: ParseArgs,

        /// Overrides the identity strategy recorded on the baseline
        #[arg(long)]
        identity: Option<String>,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Rank locator candidates for the elements of an HTML file
    Locators {
        /// HTML file
        #[arg(long)]
        html: String,

        /// Only show this element key
        #[arg(long)]
        key: Option<String>,

        #[command(flatten)]
        parse: ParseArgs,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Line diff between a baseline's raw HTML and an HTML file
    Diff {
        /// Baseline id
        #[arg(long)]
        baseline: String,

        /// Current HTML file
        #[arg(long)]
        html: String,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<String>,
    },
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `dom-drift.yaml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub compare: CompareConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_store_dir")]
    pub dir: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            dir: default_store_dir(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompareConfig {
    #[serde(default)]
    pub identity: IdentityKind,

    #[serde(default)]
    pub fragment: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

// Serde default helpers
fn default_store_dir() -> String { ".dom-drift/baselines".to_string() }
fn default_log_level() -> String { "warn".to_string() }

// ============================================================================
// Config File Loading
// ============================================================================

/// Parse config YAML. Missing sections take their defaults.
pub fn parse_config(content: &str, source: &str) -> DriftResult<AppConfig> {
    serde_yaml::from_str(content).map_err(|e| DriftError::Yaml {
        context: source.to_string(),
        source: e,
    })
}

/// Load config from a YAML file. Returns defaults if file is missing or malformed.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or("dom-drift.yaml");
    match std::fs::read_to_string(config_path) {
        Ok(content) => parse_config(&content, config_path).unwrap_or_else(|e| {
            warn!(error = %e, "malformed config, using defaults");
            AppConfig::default()
        }),
        Err(_) => AppConfig::default(),
    }
}

// ============================================================================
// Resolution (CLI > config > defaults)
// ============================================================================

pub fn resolve_store_dir(cli_store: Option<&str>, config: &AppConfig) -> PathBuf {
    PathBuf::from(cli_store.unwrap_or(&config.store.dir))
}

pub fn resolve_parse_mode(cli_mode: Option<ParseMode>, config: &AppConfig) -> ParseMode {
    cli_mode.unwrap_or(if config.compare.fragment {
        ParseMode::Fragment
    } else {
        ParseMode::Document
    })
}

/// Unknown names fall back to the configured strategy.
pub fn resolve_identity(cli_identity: Option<&str>, config: &AppConfig) -> IdentityKind {
    match cli_identity {
        Some(name) => IdentityKind::from_name(name).unwrap_or_else(|| {
            warn!(identity = name, "unknown identity strategy, using config value");
            config.compare.identity
        }),
        None => config.compare.identity,
    }
}

/// Options for comparing against a stored baseline: CLI overrides, else
/// whatever the baseline was captured with.
pub fn resolve_compare_options(
    cli_mode: Option<ParseMode>,
    cli_identity: Option<&str>,
    recorded: CompareOptions,
) -> CompareOptions {
    let identity = match cli_identity {
        Some(name) => IdentityKind::from_name(name).unwrap_or_else(|| {
            warn!(identity = name, "unknown identity strategy, using baseline value");
            recorded.identity
        }),
        None => recorded.identity,
    };

    CompareOptions {
        mode: cli_mode.unwrap_or(recorded.mode),
        identity,
    }
}

/// Log filter from `-v` count, else the configured level.
pub fn resolve_log_level(verbose: u8, config: &AppConfig) -> String {
    match verbose {
        0 => config.log.level.clone(),
        1 => "info".to_string(),
        2 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}
