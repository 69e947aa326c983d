//! Optional per-preset manifest (`template.yaml`)

use semver::Version;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;

/// Manifest file name at the root of a preset directory
pub const MANIFEST_FILE: &str = "template.yaml";

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("Failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

fn default_required_files() -> Vec<String> {
    vec![
        "package.json".to_string(),
        "src".to_string(),
        "node_modules".to_string(),
    ]
}

/// Preset metadata; every field is optional
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PresetManifest {
    /// Display name of the preset
    #[serde(default)]
    pub name: Option<String>,

    /// What the preset provides
    #[serde(default)]
    pub description: Option<String>,

    /// Minimum CLI version the preset was written for (semver)
    #[serde(default)]
    pub version: Option<String>,

    /// Paths a finished, installed project must contain
    #[serde(default = "default_required_files")]
    pub required_files: Vec<String>,
}

impl Default for PresetManifest {
    fn default() -> Self {
        Self {
            name: None,
            description: None,
            version: None,
            required_files: default_required_files(),
        }
    }
}

impl PresetManifest {
    /// Load the manifest of a preset, falling back to defaults when absent
    pub async fn load(preset_dir: &Path) -> Result<Self, ManifestError> {
        let path = preset_dir.join(MANIFEST_FILE);
        if !fs::try_exists(&path).await.unwrap_or(false) {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .await
            .map_err(|source| ManifestError::Read {
                path: path.clone(),
                source,
            })?;
        serde_yaml::from_str(&content).map_err(|source| ManifestError::Parse { path, source })
    }

    /// Warning text when the running CLI is older than the preset expects
    pub fn version_warning(&self, cli_version: &str, upgrade_command: &str) -> Option<String> {
        let wanted = parse_version(self.version.as_deref()?)?;
        let running = parse_version(cli_version)?;

        (running < wanted).then(|| {
            format!(
                "This template was designed for CLI version {} or newer. \
                 You are running version {}. Consider updating: {}",
                wanted, running, upgrade_command
            )
        })
    }
}

/// Parse a version, tolerating a leading `v`; unparseable versions are skipped
fn parse_version(raw: &str) -> Option<Version> {
    let cleaned = raw.trim().strip_prefix('v').unwrap_or(raw.trim());
    Version::parse(cleaned).ok()
}
