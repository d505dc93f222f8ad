//! Config module (modularized).
//! Provides configuration types, default paths and XML loading.
//! Re-exports keep call sites short.

pub mod paths;
pub mod types;
pub mod xml;

pub use paths::{default_config_path, path_has_symlink_ancestor};
pub use types::{Config, LogLevel};
pub use xml::{create_template_config, load_config_from_xml_path, load_or_default};

/// Defaults shared across submodules.
pub const DEFAULT_EDITOR: &str = "vim";
pub const DEFAULT_DIFF_TOOL: &str = "meld";
