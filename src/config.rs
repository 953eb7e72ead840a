//! Build configuration: which entry file to expand, where to write the
//! bundle and what to title the page. Loaded from an optional `bundle.json`
//! manifest; CLI flags override individual fields.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{BundleError, Result};

/// Manifest looked up in the working directory by [`BuildConfig::discover`].
pub const MANIFEST_FILE: &str = "bundle.json";

pub const DEFAULT_ENTRY: &str = "scripts/main.js";
pub const DEFAULT_OUTPUT: &str = "demo.html";
pub const DEFAULT_TITLE: &str = "WebGL 2 Demo";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Entry file; the only file allowed to use `@insert`.
    pub entry: PathBuf,
    /// Bundle written by `build`.
    pub output: PathBuf,
    /// Page `<title>`.
    pub title: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            entry: PathBuf::from(DEFAULT_ENTRY),
            output: PathBuf::from(DEFAULT_OUTPUT),
            title: DEFAULT_TITLE.to_string(),
        }
    }
}

impl BuildConfig {
    /// Load a JSON manifest. Missing fields keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| BundleError::config(path, e.to_string()))?;
        Self::from_json(&text).map_err(|e| BundleError::config(path, e.to_string()))
    }

    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// Load `bundle.json` from `dir` when it exists, otherwise defaults.
    pub fn discover(dir: &Path) -> Result<Self> {
        let manifest = dir.join(MANIFEST_FILE);
        if manifest.is_file() {
            tracing::debug!(manifest = %manifest.display(), "loading build manifest");
            Self::load(&manifest)
        } else {
            Ok(Self::default())
        }
    }
}
