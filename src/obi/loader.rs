// SPDX-License-Identifier: MIT

//! Dialog loader - reads OBI documents from disk
//!
//! `.dialog` and `.json` files are parsed as JSON, `.yaml`/`.yml` as YAML.

use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::error::ObiError;

const JSON_EXTENSIONS: [&str; 2] = ["dialog", "json"];
const YAML_EXTENSIONS: [&str; 2] = ["yaml", "yml"];

/// A dialog file found in a dialog directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DialogEntry {
    /// File stem, used to address the dialog
    pub id: String,
    pub file: String,
}

/// Loads dialog documents from files and directories
#[derive(Debug, Clone, Copy, Default)]
pub struct DialogLoader;

impl DialogLoader {
    pub fn new() -> Self {
        Self
    }

    /// Load a dialog document, picking the parser from the file extension
    pub fn load_dialog<P: AsRef<Path>>(&self, path: P) -> Result<Value, ObiError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let doc = match extension(path) {
            Some(ext) if JSON_EXTENSIONS.iter().any(|e| *e == ext) => {
                Self::parse_json(&content)?
            }
            Some(ext) if YAML_EXTENSIONS.iter().any(|e| *e == ext) => {
                Self::parse_yaml(&content)?
            }
            _ => return Err(ObiError::UnsupportedFormat(path.display().to_string())),
        };
        log::info!("Loaded dialog from {}", path.display());
        Ok(doc)
    }

    pub fn parse_json(content: &str) -> Result<Value, ObiError> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn parse_yaml(content: &str) -> Result<Value, ObiError> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Dialog files directly inside `dir`, sorted by id
    pub fn list_dialogs<P: AsRef<Path>>(&self, dir: P) -> Result<Vec<DialogEntry>, ObiError> {
        let mut dialogs = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if !is_dialog_file(&path) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                dialogs.push(DialogEntry {
                    id: stem.to_string(),
                    file: path.to_string_lossy().into_owned(),
                });
            }
        }
        dialogs.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(dialogs)
    }

    /// Path of the dialog with id `id` in `dir`
    ///
    /// `id` must be a plain file stem; anything that would resolve outside
    /// `dir` is reported as not found.
    pub fn find_dialog<P: AsRef<Path>>(&self, dir: P, id: &str) -> Result<PathBuf, ObiError> {
        if !is_plain_id(id) {
            return Err(ObiError::DialogNotFound(id.to_string()));
        }
        let dir = dir.as_ref();
        JSON_EXTENSIONS
            .iter()
            .chain(YAML_EXTENSIONS.iter())
            .map(|ext| dir.join(format!("{}.{}", id, ext)))
            .find(|path| path.is_file())
            .ok_or_else(|| ObiError::DialogNotFound(id.to_string()))
    }
}

/// Exactly one normal path component: no separators, `..`, roots or prefixes
fn is_plain_id(id: &str) -> bool {
    if id.contains(['/', '\\']) {
        return false;
    }
    let mut components = Path::new(id).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|ext| ext.to_str())
}

fn is_dialog_file(path: &Path) -> bool {
    path.is_file()
        && extension(path).is_some_and(|ext| {
            JSON_EXTENSIONS
                .iter()
                .chain(YAML_EXTENSIONS.iter())
                .any(|e| *e == ext)
        })
}
