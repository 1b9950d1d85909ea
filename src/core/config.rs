//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.sensei/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::PathBuf;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct SenseiConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub progress: ProgressConfig,
}

#[derive(Debug, Default, Deserialize)]
pub struct GeneralConfig {
    /// Course to open on launch when none is given on the CLI.
    pub default_course: Option<String>,
    /// Require a passing quiz score before advancing past a quiz step.
    pub require_quiz_pass: Option<bool>,
    /// Passing score as a whole percentage.
    pub pass_threshold: Option<u8>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ProgressConfig {
    pub enabled: Option<bool>,
    /// Override the progress directory (default `~/.sensei/progress`).
    pub dir: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_PASS_THRESHOLD: u8 = 70;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub default_course: Option<String>,
    pub require_quiz_pass: bool,
    pub pass_threshold: u8,
    pub progress_enabled: bool,
    pub progress_dir: Option<PathBuf>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.sensei/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".sensei").join("config.toml"))
}

/// Load config from `~/.sensei/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `SenseiConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<SenseiConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(SenseiConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(SenseiConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: SenseiConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &PathBuf) {
    let default_content = r#"# Sensei Configuration
# All settings are optional — defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# default_course = "linear-regression"
# require_quiz_pass = false    # Gate "next" behind a passing quiz score
# pass_threshold = 70          # Passing score, percent

# [progress]
# enabled = true
# dir = "/somewhere/else"      # Default: ~/.sensei/progress
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars
/// → CLI. `cli_course` is the `--course` flag; `cli_no_progress` disables
/// persistence for this run.
pub fn resolve(
    config: &SenseiConfig,
    cli_course: Option<&str>,
    cli_no_progress: bool,
) -> ResolvedConfig {
    // Course: CLI → env → config (None = start on the course picker)
    let default_course = cli_course
        .map(|s| s.to_string())
        .or_else(|| std::env::var("SENSEI_COURSE").ok())
        .or_else(|| config.general.default_course.clone());

    // Progress dir: env → config
    let progress_dir = std::env::var("SENSEI_PROGRESS_DIR")
        .ok()
        .or_else(|| config.progress.dir.clone())
        .map(PathBuf::from);

    let mut pass_threshold = config
        .general
        .pass_threshold
        .unwrap_or(DEFAULT_PASS_THRESHOLD);
    if pass_threshold > 100 {
        warn!("pass_threshold {} clamped to 100", pass_threshold);
        pass_threshold = 100;
    }

    ResolvedConfig {
        default_course,
        require_quiz_pass: config.general.require_quiz_pass.unwrap_or(false),
        pass_threshold,
        progress_enabled: !cli_no_progress && config.progress.enabled.unwrap_or(true),
        progress_dir,
    }
}
