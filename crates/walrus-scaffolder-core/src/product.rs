//! Product configuration trait for CLI binaries
//!
//! The scaffolding engine is product-agnostic; a binary implements this trait
//! to supply its identity, template location and user-facing text.

use crate::config::{Context, PackageManager};
use std::path::{Path, PathBuf};

/// Configuration trait for scaffolder products
///
/// Each product implements this trait to define:
/// - Product identity (name, display name)
/// - Where presets live
/// - The deploy-setup script shipped inside generated projects
/// - Post-setup instructions
pub trait ProductConfig: Clone + Send + Sync + 'static {
    /// Internal product name (used for the CLI command)
    fn name(&self) -> &'static str;

    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// URL for product documentation
    fn docs_url(&self) -> &'static str;

    /// Template root used when no `--template-dir` is given
    fn default_template_root(&self) -> PathBuf;

    /// Deploy-setup script, relative to the generated project root
    fn deploy_script(&self) -> &'static Path {
        Path::new("scripts/setup-walrus-deploy.sh")
    }

    /// Command that reruns deploy setup later
    fn deploy_retry_command(&self, package_manager: PackageManager) -> String {
        package_manager.run_command("setup-walrus-deploy")
    }

    /// Generate the "next steps" instructions after project creation
    fn next_steps(&self, context: &Context, installed: bool) -> Vec<String>;

    /// CLI description shown in help text
    fn cli_description(&self) -> &'static str;

    /// Upgrade/install command shown in version warnings
    fn upgrade_command(&self) -> &'static str;
}
