//! Generation pipeline: preset directory to populated project directory

use super::copier::{self, CopyError, DEFAULT_EXCLUDES};
use super::env_file::{self, EnvCopy};
use super::manifest::{ManifestError, PresetManifest};
use super::placeholders::{self, PlaceholderError, Placeholders};
use super::preset::{self, PresetError, PresetResolver};
use crate::config::Context;
use crate::interrupt::GenerationTracker;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("Directory {} is not empty; refusing to overwrite it", path.display())]
    DirectoryNotEmpty { path: PathBuf },

    #[error(transparent)]
    Preset(#[from] PresetError),

    #[error("Template preset '{name}' not found at {}", path.display())]
    PresetNotFound { name: String, path: PathBuf },

    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error("Generation cancelled")]
    Cancelled,

    #[error("Failed to copy template files")]
    Copy(#[source] CopyError),

    #[error(transparent)]
    Placeholder(#[from] PlaceholderError),

    #[error("Failed to prepare {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<CopyError> for GenerateError {
    fn from(err: CopyError) -> Self {
        match err {
            CopyError::Cancelled => GenerateError::Cancelled,
            other => GenerateError::Copy(other),
        }
    }
}

/// Inputs for one generation run
#[derive(Debug, Clone, Copy)]
pub struct GenerateRequest<'a> {
    pub context: &'a Context,
    pub target_dir: &'a Path,
}

/// A fully populated target directory
#[derive(Debug, Clone)]
pub struct Generated {
    pub preset: String,
    pub preset_dir: PathBuf,
    pub files_created: usize,
    pub files_substituted: usize,
    pub env_file: EnvCopy,
    pub manifest: PresetManifest,
}

/// Copies presets into place under interrupt tracking
///
/// An `Err` from [`Generator::generate`] leaves whatever was written in place;
/// only an interrupt removes the target (see [`crate::interrupt`]).
#[derive(Debug)]
pub struct Generator<'t> {
    resolver: PresetResolver,
    tracker: &'t GenerationTracker,
}

impl<'t> Generator<'t> {
    pub fn new(resolver: PresetResolver, tracker: &'t GenerationTracker) -> Self {
        Self { resolver, tracker }
    }

    pub fn resolver(&self) -> &PresetResolver {
        &self.resolver
    }

    pub async fn generate(&self, request: &GenerateRequest<'_>) -> Result<Generated, GenerateError> {
        let target = request.target_dir;

        // Checked before tracking starts so an interrupt can never remove user data
        let empty = copier::is_dir_empty(target)
            .await
            .map_err(|source| GenerateError::Io {
                path: target.to_path_buf(),
                source,
            })?;
        if !empty {
            return Err(GenerateError::DirectoryNotEmpty {
                path: target.to_path_buf(),
            });
        }

        let name = preset::preset_name(request.context);
        let preset_dir = self.resolver.resolve_name(&name)?;
        if !preset_dir.is_dir() {
            return Err(GenerateError::PresetNotFound {
                name,
                path: preset_dir,
            });
        }
        let manifest = PresetManifest::load(&preset_dir).await?;

        tracing::info!(preset = %name, target = %target.display(), "generating project");
        let _guard = self.tracker.begin(target);

        let files = copier::copy_dir(&preset_dir, target, DEFAULT_EXCLUDES, || {
            self.tracker.write_permit()
        })
        .await?;

        let placeholders = Placeholders::from_context(request.context);
        let files_substituted = {
            let _permit = self.tracker.write_permit().ok_or(GenerateError::Cancelled)?;
            placeholders::substitute_files(target, &files, &placeholders).await?
        };

        let env_file = {
            let _permit = self.tracker.write_permit().ok_or(GenerateError::Cancelled)?;
            env_file::copy_env_file(target)
                .await
                .map_err(|source| GenerateError::Io {
                    path: target.join(env_file::ENV_FILE),
                    source,
                })?
        };

        Ok(Generated {
            preset: name,
            preset_dir,
            files_created: files.len(),
            files_substituted,
            env_file,
            manifest,
        })
    }
}
