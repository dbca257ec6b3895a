//! XML configuration support.
//! - Loads settings from config.xml (quick_xml).
//! - Missing file means "use defaults"; unknown fields are a hard error so
//!   misconfigurations surface early.
//!
//! Example:
//! <config>
//!   <scratch_dir>/var/tmp/scratch</scratch_dir>
//!   <prefix>engine_test.</prefix>
//!   <random_len>8</random_len>
//!   <max_attempts>500</max_attempts>
//!   <log_level>info</log_level>
//!   <log_file>/var/log/scratch_pair.log</log_file>
//! </config>

use anyhow::{bail, Context, Result};
use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::paths::default_config_path;
use super::types::{Config, LogLevel};

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Default, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlConfig {
    scratch_dir: Option<String>,
    prefix: Option<String>,
    #[serde(default, deserialize_with = "de_trimmed_opt")]
    random_len: Option<usize>,
    #[serde(default, deserialize_with = "de_trimmed_opt")]
    max_attempts: Option<u32>,
    log_level: Option<String>,
    log_file: Option<String>,
}

// Custom deserializer that trims surrounding whitespace before parsing a number.
fn de_trimmed_opt<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    match opt.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s.parse::<T>().map(Some).map_err(serde::de::Error::custom),
    }
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Overlay settings from the XML file at `path` onto `cfg`.
/// Returns Ok(false) if the file does not exist.
pub fn apply_config_file(cfg: &mut Config, path: &Path) -> Result<bool> {
    if !path.exists() {
        debug!(path = %path.display(), "No config file; using defaults");
        return Ok(false);
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("read config '{}'", path.display()))?;
    let parsed: XmlConfig = from_xml_str(&content)
        .with_context(|| format!("parse config '{}'", path.display()))?;

    if let Some(dir) = non_empty(parsed.scratch_dir) {
        cfg.scratch_dir = PathBuf::from(dir);
    }
    if let Some(prefix) = non_empty(parsed.prefix) {
        cfg.prefix = prefix;
    }
    if let Some(n) = parsed.random_len {
        cfg.random_len = n;
    }
    if let Some(n) = parsed.max_attempts {
        cfg.max_attempts = n;
    }
    if let Some(lvl) = non_empty(parsed.log_level) {
        match LogLevel::parse(&lvl) {
            Some(l) => cfg.log_level = l,
            None => bail!("invalid log_level '{}' in {}", lvl, path.display()),
        }
    }
    if let Some(lf) = non_empty(parsed.log_file) {
        cfg.log_file = Some(PathBuf::from(lf));
    }
    debug!(path = %path.display(), "Loaded config file");
    Ok(true)
}

/// Defaults overlaid with the config file at the default location (if any).
pub fn load_config() -> Result<Config> {
    let mut cfg = Config::default();
    if let Some(path) = default_config_path() {
        apply_config_file(&mut cfg, &path)?;
    }
    Ok(cfg)
}
