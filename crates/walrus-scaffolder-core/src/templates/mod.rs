//! Preset resolution, copying and substitution
//!
//! This module provides:
//! - Preset naming from a context and safe resolution under a template root
//! - Optional per-preset `template.yaml` manifests
//! - Recursive copying with housekeeping exclusions
//! - Placeholder substitution and `.env` materialisation
//! - The [`Generator`] that runs all of the above under interrupt tracking

pub mod copier;
pub mod env_file;
pub mod generator;
pub mod manifest;
pub mod placeholders;
pub mod preset;

pub use copier::{copy_dir, is_dir_empty, CopyError, DEFAULT_EXCLUDES};
pub use env_file::{copy_env_file, EnvCopy};
pub use generator::{GenerateError, GenerateRequest, Generated, Generator};
pub use manifest::{ManifestError, PresetManifest};
pub use placeholders::{PlaceholderError, Placeholders};
pub use preset::{feature_tokens, preset_name, PresetError, PresetResolver};
