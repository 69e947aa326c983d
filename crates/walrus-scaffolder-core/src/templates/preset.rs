//! Preset naming and resolution against the template root
//!
//! A preset identifier is `{framework}-{sdk}-{useCase}` followed by the
//! active feature tokens in alphabetical order, e.g.
//! `react-mysten-gallery-enoki-tailwind`.

use crate::config::Context;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

const SEPARATOR: &str = "-";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PresetError {
    #[error("Invalid template path: {path} is outside templates root {root}")]
    OutsideRoot { path: PathBuf, root: PathBuf },
}

/// Optional feature tokens enabled in a context, sorted
pub fn feature_tokens(context: &Context) -> Vec<&'static str> {
    let mut tokens = Vec::new();
    if context.analytics() {
        tokens.push("analytics");
    }
    if context.use_zk_login() {
        tokens.push("enoki");
    }
    if context.tailwind() {
        tokens.push("tailwind");
    }
    tokens.sort_unstable();
    tokens
}

/// Derive the preset identifier for a context
pub fn preset_name(context: &Context) -> String {
    let mut parts = vec![
        context.framework().as_str(),
        context.sdk().as_str(),
        context.use_case().as_str(),
    ];
    parts.extend(feature_tokens(context));
    parts.join(SEPARATOR)
}

/// Maps contexts to preset directories under a fixed template root
#[derive(Debug, Clone)]
pub struct PresetResolver {
    root: PathBuf,
}

impl PresetResolver {
    /// Relative roots are anchored at the current working directory
    pub fn new(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        let absolute = if root.is_absolute() {
            root.to_path_buf()
        } else {
            std::env::current_dir()
                .unwrap_or_else(|_| PathBuf::from("/"))
                .join(root)
        };
        Self {
            root: normalize(&absolute),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute path of the preset directory for `context`
    pub fn resolve(&self, context: &Context) -> Result<PathBuf, PresetError> {
        self.resolve_name(&preset_name(context))
    }

    /// Join a preset identifier to the root, refusing anything that escapes it
    pub fn resolve_name(&self, preset: &str) -> Result<PathBuf, PresetError> {
        let candidate = normalize(&self.root.join(preset));
        if candidate == self.root || !candidate.starts_with(&self.root) {
            return Err(PresetError::OutsideRoot {
                path: candidate,
                root: self.root.clone(),
            });
        }
        Ok(candidate)
    }
}

/// Lexically resolve `.` and `..` without touching the filesystem
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
