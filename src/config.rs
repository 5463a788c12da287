//! Configuration loaded from `.asklytics.toml`.
//!
//! All fields have defaults; a missing or unparsable config file degrades
//! to the defaults with a warning rather than failing the run.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use crate::urgency::UrgencyConfig;

/// Output-related defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default report format when the CLI flag is omitted
    pub default_format: Option<String>,
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AsklyticsConfig {
    /// Urgency classification thresholds
    #[serde(default)]
    pub urgency: UrgencyConfig,

    /// Lower edges of the response-time histogram buckets, in hours,
    /// ascending, starting at 0. The last bucket is open-ended.
    #[serde(default = "default_bucket_edges")]
    pub histogram_bucket_edges_hours: Vec<f64>,

    /// Pricing-status tags that exclude a question from pending counts.
    /// Open set; extend it here as the marketplace grows new states.
    #[serde(default = "default_exclusion_tags")]
    pub pending_exclusion_tags: Vec<String>,

    /// Expert-level SLA hours used only for questions without a snapshot
    #[serde(default)]
    pub fallback_sla_hours: Option<f64>,

    #[serde(default)]
    pub output: OutputConfig,
}

fn default_bucket_edges() -> Vec<f64> {
    vec![0.0, 12.0, 24.0, 48.0, 60.0, 72.0]
}

fn default_exclusion_tags() -> Vec<String> {
    vec!["offer_pending".to_string(), "offer_declined".to_string()]
}

impl Default for AsklyticsConfig {
    fn default() -> Self {
        Self {
            urgency: UrgencyConfig::default(),
            histogram_bucket_edges_hours: default_bucket_edges(),
            pending_exclusion_tags: default_exclusion_tags(),
            fallback_sla_hours: None,
            output: OutputConfig::default(),
        }
    }
}

impl AsklyticsConfig {
    /// Validate bucket edges: ascending, first edge 0. Returns an error
    /// message describing the first violation.
    pub fn validate(&self) -> Result<(), String> {
        let edges = &self.histogram_bucket_edges_hours;
        if edges.is_empty() {
            return Err("histogram_bucket_edges_hours must not be empty".to_string());
        }
        if edges[0] != 0.0 {
            return Err("histogram_bucket_edges_hours must start at 0".to_string());
        }
        if edges.windows(2).any(|w| w[1] <= w[0]) {
            return Err("histogram_bucket_edges_hours must be strictly ascending".to_string());
        }
        if self.urgency.urgent_threshold_hours >= self.urgency.normal_threshold_hours {
            return Err(
                "urgent_threshold_hours must be below normal_threshold_hours".to_string(),
            );
        }
        Ok(())
    }
}

/// Cache the configuration
static CONFIG: OnceLock<AsklyticsConfig> = OnceLock::new();

fn read_config_file(path: &Path) -> Result<String, std::io::Error> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

fn parse_and_validate_config(contents: &str) -> Result<AsklyticsConfig, String> {
    let config = toml::from_str::<AsklyticsConfig>(contents)
        .map_err(|e| format!("Failed to parse .asklytics.toml: {}", e))?;

    if let Err(e) = config.validate() {
        return Err(format!("Invalid .asklytics.toml: {}", e));
    }

    Ok(config)
}

fn try_load_config_from_path(config_path: &Path) -> Option<AsklyticsConfig> {
    let contents = match read_config_file(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            if e.kind() != std::io::ErrorKind::NotFound {
                log::warn!(
                    "Failed to read config file {}: {}",
                    config_path.display(),
                    e
                );
            }
            return None;
        }
    };

    match parse_and_validate_config(&contents) {
        Ok(config) => {
            log::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            eprintln!("Warning: {}. Using defaults.", e);
            None
        }
    }
}

fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Load configuration by searching the current directory and its ancestors
/// for `.asklytics.toml`.
pub fn load_config() -> AsklyticsConfig {
    const MAX_TRAVERSAL_DEPTH: usize = 10;

    let current = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            log::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            return AsklyticsConfig::default();
        }
    };

    directory_ancestors(current, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(".asklytics.toml"))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_default()
}

/// Get the cached configuration
pub fn get_config() -> &'static AsklyticsConfig {
    CONFIG.get_or_init(load_config)
}

/// Default config file contents written by `asklytics init`
pub fn default_config_toml() -> String {
    let defaults = AsklyticsConfig::default();
    format!(
        r#"# asklytics configuration

# Lower edges of the response-time histogram buckets (hours)
histogram_bucket_edges_hours = [0.0, 12.0, 24.0, 48.0, 60.0, 72.0]

# Pricing-status tags excluded from pending counts
pending_exclusion_tags = ["offer_pending", "offer_declined"]

# Expert-level SLA fallback for questions without a snapshot
# fallback_sla_hours = 48.0

[urgency]
# Remaining time below which a countdown shows as urgent
urgent_threshold_hours = {urgent:?}
# Remaining time below which a countdown shows as due soon
normal_threshold_hours = {normal:?}
# Remaining-time window for the dashboard urgent count
aggregate_urgent_window_hours = {window:?}

[output]
# default_format = "terminal"
"#,
        urgent = defaults.urgency.urgent_threshold_hours,
        normal = defaults.urgency.normal_threshold_hours,
        window = defaults.urgency.aggregate_urgent_window_hours,
    )
}
