//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.vocab/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::core::audio::CommandSpec;
use crate::core::entry::{DEFAULT_TAG, normalize_tag};
use crate::core::filter::TagFilter;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct VocabConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub quiz: QuizConfig,
    #[serde(default)]
    pub audio: AudioConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub data_dir: Option<String>,
    pub default_tag: Option<String>,
    pub initial_filter: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct QuizConfig {
    pub time_limit_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct AudioConfig {
    pub speak_words: Option<bool>,
    pub speech_command: Option<String>,
    pub correct_sound: Option<String>,
    pub incorrect_sound: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_TIME_LIMIT_SECS: u64 = 180;
pub const DEFAULT_SPEECH_COMMAND: &str = "espeak-ng";

// ============================================================================
// CLI overrides
// ============================================================================

/// Settings given on the command line. `None` = not specified.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub time_limit_secs: Option<u64>,
    pub tag: Option<String>,
    pub data_dir: Option<PathBuf>,
    pub mute: bool,
}

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub data_dir: PathBuf,
    /// `None` = untimed quizzes.
    pub time_limit: Option<Duration>,
    pub default_tag: String,
    pub initial_filter: TagFilter,
    pub speak_words: bool,
    pub speech_command: Option<CommandSpec>,
    pub correct_sound: Option<CommandSpec>,
    pub incorrect_sound: Option<CommandSpec>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.vocab/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".vocab").join("config.toml"))
}

/// Load config from `~/.vocab/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `VocabConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<VocabConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(VocabConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(VocabConfig::default());
    }

    load_config_from(&path)
}

/// Load config from an explicit path.
pub fn load_config_from(path: &Path) -> Result<VocabConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: VocabConfig = toml::from_str(&contents)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Vocab Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# data_dir = "/home/me/.vocab"       # Or set VOCAB_DATA_DIR
# default_tag = "General"            # Tag for new words
# initial_filter = "All"             # Tag the quiz starts filtered to

# [quiz]
# time_limit_secs = 180              # 0 = untimed. Or set VOCAB_TIME_LIMIT

# [audio]
# speak_words = true
# speech_command = "espeak-ng -v en" # Word is appended. Or set VOCAB_SPEECH_COMMAND
# correct_sound = "paplay /usr/share/sounds/freedesktop/stereo/complete.oga"
# incorrect_sound = "paplay /usr/share/sounds/freedesktop/stereo/dialog-error.oga"
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &VocabConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

/// Same as [`resolve`], reading environment variables through `env`.
pub fn resolve_with_env(
    config: &VocabConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    // Data dir: CLI → env → config → ~/.vocab → ./.vocab
    let data_dir = cli
        .data_dir
        .clone()
        .or_else(|| env("VOCAB_DATA_DIR").map(PathBuf::from))
        .or_else(|| config.general.data_dir.as_ref().map(PathBuf::from))
        .or_else(|| crate::core::storage::default_data_dir().ok())
        .unwrap_or_else(|| PathBuf::from(".vocab"));

    // Time limit: CLI → env → config → default; 0 disables the timer
    let time_limit_secs = cli
        .time_limit_secs
        .or_else(|| {
            env("VOCAB_TIME_LIMIT").and_then(|v| match v.trim().parse() {
                Ok(secs) => Some(secs),
                Err(_) => {
                    warn!("Ignoring non-numeric VOCAB_TIME_LIMIT={:?}", v);
                    None
                }
            })
        })
        .or(config.quiz.time_limit_secs)
        .unwrap_or(DEFAULT_TIME_LIMIT_SECS);
    let time_limit = (time_limit_secs > 0).then(|| Duration::from_secs(time_limit_secs));

    // Speech command: env → config → default
    let speech_command = env("VOCAB_SPEECH_COMMAND")
        .or_else(|| config.audio.speech_command.clone())
        .unwrap_or_else(|| DEFAULT_SPEECH_COMMAND.to_string());

    let default_tag = config
        .general
        .default_tag
        .as_deref()
        .map(normalize_tag)
        .unwrap_or_else(|| DEFAULT_TAG.to_string());

    let initial_filter = match cli.tag.as_deref() {
        Some(tag) => TagFilter::from_label(Some(tag)),
        None => TagFilter::from_label(config.general.initial_filter.as_deref()),
    };

    let speak_words = !cli.mute && config.audio.speak_words.unwrap_or(true);
    let sounds_on = !cli.mute;

    ResolvedConfig {
        data_dir,
        time_limit,
        default_tag,
        initial_filter,
        speak_words,
        speech_command: CommandSpec::parse(&speech_command),
        correct_sound: config
            .audio
            .correct_sound
            .as_deref()
            .filter(|_| sounds_on)
            .and_then(CommandSpec::parse),
        incorrect_sound: config
            .audio
            .incorrect_sound
            .as_deref()
            .filter(|_| sounds_on)
            .and_then(CommandSpec::parse),
    }
}
