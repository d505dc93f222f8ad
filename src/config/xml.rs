//! XML configuration support.
//! - Loads settings from config.xml (quick_xml).
//! - Creates a template if missing (unless EDMV_CONFIG is set).
//!
//! Notes:
//! - This module only reads/writes the config file; flag merging with the
//!   CLI happens in `app`.
//! - An empty element (e.g. `<editor></editor>`) counts as unset.

use anyhow::{Context, Result};
use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

use super::paths::{default_config_path, path_has_symlink_ancestor};
use super::types::{Config, LogLevel};
use super::{DEFAULT_DIFF_TOOL, DEFAULT_EDITOR};

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename = "config")]
struct XmlConfig {
    #[serde(rename = "editor")]
    editor: Option<String>,
    #[serde(rename = "diff_tool")]
    diff_tool: Option<String>,
    #[serde(rename = "log_level")]
    log_level: Option<String>,
}

fn non_empty(s: Option<&str>) -> Option<String> {
    s.map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

// Map XmlConfig -> Config; unset fields keep their defaults.
fn xml_to_config(parsed: XmlConfig) -> Config {
    let mut cfg = Config::default();

    cfg.editor = non_empty(parsed.editor.as_deref());
    if let Some(tool) = non_empty(parsed.diff_tool.as_deref()) {
        cfg.diff_tool = tool;
    }
    if let Some(s) = parsed.log_level.as_deref()
        && let Some(level) = LogLevel::parse(s.trim())
    {
        cfg.log_level = level;
    }

    cfg
}

/// Load a Config from a specific XML file path (quick_xml).
pub fn load_config_from_xml_path(path: &Path) -> Result<Config> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read config xml '{}'", path.display()))?;
    let parsed: XmlConfig = from_xml_str(&contents)
        .with_context(|| format!("parse config xml '{}'", path.display()))?;
    Ok(xml_to_config(parsed))
}

/// Load the effective Config:
/// - EDMV_CONFIG (explicit) wins; a broken file there is a warning, not a fatal.
/// - Otherwise the per-platform default path; a template is created there on
///   first run (best-effort) and defaults are used.
pub fn load_or_default() -> Config {
    if let Some(p) = env::var_os("EDMV_CONFIG") {
        let path = PathBuf::from(p);
        return match load_config_from_xml_path(&path) {
            Ok(cfg) => {
                debug!("Loaded config from EDMV_CONFIG: {}", path.display());
                cfg
            }
            Err(e) => {
                warn!("Ignoring EDMV_CONFIG ({}): {e:#}", path.display());
                Config::default()
            }
        };
    }

    let Some(path) = default_config_path() else {
        return Config::default();
    };
    if !path.exists() {
        if let Err(e) = create_template_config(&path) {
            debug!("Could not create template config at {}: {e:#}", path.display());
        }
        return Config::default();
    }

    match load_config_from_xml_path(&path) {
        Ok(cfg) => cfg,
        Err(e) => {
            warn!("Ignoring unreadable config {}: {e:#}", path.display());
            Config::default()
        }
    }
}

/// Create the default template config file and parent directory.
/// Refuses to write through symlinked ancestors; tightens permissions on Unix.
pub fn create_template_config(path: &Path) -> Result<()> {
    if path_has_symlink_ancestor(path)? {
        return Err(anyhow::anyhow!(
            "Refusing to create config: ancestor of {} is a symlink",
            path.display()
        ));
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
        #[cfg(unix)]
        {
            let _ = fs::set_permissions(parent, fs::Permissions::from_mode(0o700));
        }
    }

    let content = format!(
        "<!--\n  edmv configuration (XML)\n\n  Fields:\n    editor     -> editor command used instead of the built-in {DEFAULT_EDITOR} invocation\n                  (leave empty to keep the default; -c on the command line wins)\n    diff_tool  -> external tool launched by -m (old and new listing as arguments)\n    log_level  -> quiet | normal | info | debug\n\n  Notes:\n    - CLI flags override XML values.\n-->\n<config>\n  <editor></editor>\n  <diff_tool>{DEFAULT_DIFF_TOOL}</diff_tool>\n  <log_level>normal</log_level>\n</config>\n"
    );

    fs::write(path, content)?;
    #[cfg(unix)]
    {
        let _ = fs::set_permissions(path, fs::Permissions::from_mode(0o600));
    }

    info!("Created template config at {}", path.display());
    Ok(())
}
