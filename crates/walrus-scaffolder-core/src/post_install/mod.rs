//! Best-effort steps run after files are generated
//!
//! Installation, structural validation and deploy setup each report their own
//! failures through the [`Frontend`] and never stop the remaining steps. Only
//! an error outside those modeled outcomes marks the run as failed.

pub mod deploy;
pub mod install;
pub mod process;
pub mod validate;

pub use deploy::{DeployOutcome, DeploySetup};
pub use install::InstallOutcome;
pub use process::{CommandSpec, ProcessRunner, RunStatus, SystemRunner};
pub use validate::ProjectCheck;

use crate::config::Context;
use anyhow::Result;
use std::path::Path;

/// User-facing side of post-install: messages and the one confirmation
pub trait Frontend: Send + Sync {
    /// Whether the session is attached to a terminal
    fn is_interactive(&self) -> bool;
    fn info(&self, message: &str);
    fn warn(&self, message: &str);
    fn success(&self, message: &str);
    /// A cancelled prompt answers `Ok(false)`
    fn confirm(&self, message: &str, default: bool) -> Result<bool>;
}

#[derive(Debug, Clone, Copy)]
pub struct PostInstallRequest<'a> {
    pub context: &'a Context,
    pub project_path: &'a Path,
    pub skip_install: bool,
    pub skip_validation: bool,
    /// Paths an installed project must contain
    pub required_files: &'a [String],
}

#[derive(Debug)]
pub struct PostInstallResult {
    pub success: bool,
    pub installed: bool,
    pub validated: bool,
    pub error: Option<anyhow::Error>,
}

pub struct PostInstaller<'a> {
    runner: &'a dyn ProcessRunner,
    frontend: &'a dyn Frontend,
    deploy: DeploySetup<'a>,
}

impl<'a> PostInstaller<'a> {
    pub fn new(runner: &'a dyn ProcessRunner, frontend: &'a dyn Frontend, deploy: DeploySetup<'a>) -> Self {
        Self {
            runner,
            frontend,
            deploy,
        }
    }

    pub async fn run(&self, request: &PostInstallRequest<'_>) -> PostInstallResult {
        let mut result = PostInstallResult {
            success: true,
            installed: false,
            validated: false,
            error: None,
        };

        if let Err(e) = self.run_steps(request, &mut result).await {
            tracing::debug!(error = ?e, "post-install aborted");
            result.success = false;
            result.error = Some(e);
        }
        result
    }

    async fn run_steps(&self, request: &PostInstallRequest<'_>, result: &mut PostInstallResult) -> Result<()> {
        let project_path = request.project_path;
        anyhow::ensure!(
            project_path.is_dir(),
            "Project directory {} does not exist",
            project_path.display()
        );

        if !request.skip_install {
            let outcome = install::install_dependencies(
                self.runner,
                self.frontend,
                project_path,
                request.context.project_name(),
                request.context.package_manager(),
            )
            .await;
            result.installed = outcome.is_installed();
        }

        if !request.skip_validation && result.installed {
            let check = validate::validate_project(project_path, request.required_files).await;
            result.validated = check.valid;
            if !check.valid {
                self.frontend.warn("Project validation failed:");
                for error in &check.errors {
                    self.frontend.warn(&format!("  - {}", error));
                }
            }
        }

        if result.installed {
            let outcome = deploy::setup_deploy(self.runner, self.frontend, project_path, self.deploy).await;
            tracing::debug!(?outcome, "deploy setup finished");
        }

        Ok(())
    }
}
