// SPDX-License-Identifier: MIT

//! Runtime configuration from environment variables
//!
//! CLI flags override these values in `main`.

use std::path::PathBuf;

use crate::error::ObiError;

pub const DIALOG_DIR_VAR: &str = "OBI_DIALOG_DIR";
pub const PORT_VAR: &str = "OBI_GRAPH_PORT";
pub const PRETTY_VAR: &str = "OBI_GRAPH_PRETTY";

const DEFAULT_DIALOG_DIR: &str = "dialogs";
const DEFAULT_PORT: u16 = 5007;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory the server lists and loads dialogs from
    pub dialog_dir: PathBuf,
    pub port: u16,
    /// Pretty-print graph JSON on the CLI
    pub pretty: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dialog_dir: PathBuf::from(DEFAULT_DIALOG_DIR),
            port: DEFAULT_PORT,
            pretty: false,
        }
    }
}

impl Config {
    /// Read configuration from the process environment
    pub fn from_env() -> Result<Self, ObiError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`, falling back to defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ObiError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(dir) = lookup(DIALOG_DIR_VAR).filter(|d| !d.is_empty()) {
            config.dialog_dir = PathBuf::from(dir);
        }

        if let Some(port) = lookup(PORT_VAR) {
            config.port = port.trim().parse().map_err(|e| {
                ObiError::config(format!("{} must be a port number: {}", PORT_VAR, e))
            })?;
        }

        if let Some(pretty) = lookup(PRETTY_VAR) {
            config.pretty = matches!(pretty.trim().to_lowercase().as_str(), "1" | "true" | "yes");
        }

        Ok(config)
    }
}
