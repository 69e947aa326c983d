//! Dependency installation

use super::process::{CommandSpec, ProcessRunner};
use super::Frontend;
use crate::config::PackageManager;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    Installed,
    Failed { reason: String },
}

impl InstallOutcome {
    pub fn is_installed(&self) -> bool {
        matches!(self, InstallOutcome::Installed)
    }
}

/// Run `<pm> install` in the project; failures become manual-recovery hints
pub async fn install_dependencies(
    runner: &dyn ProcessRunner,
    frontend: &dyn Frontend,
    project_path: &Path,
    project_name: &str,
    package_manager: PackageManager,
) -> InstallOutcome {
    frontend.info(&format!("Installing dependencies with {}...", package_manager));

    let command = CommandSpec::new(package_manager.as_str(), project_path).arg("install");
    let outcome = match runner.run(&command).await {
        Ok(status) if status.success() => InstallOutcome::Installed,
        Ok(status) => InstallOutcome::Failed {
            reason: match status.code {
                Some(code) => format!("{} exited with code {}", command.display(), code),
                None => format!("{} was terminated", command.display()),
            },
        },
        Err(e) => InstallOutcome::Failed {
            reason: format!("could not run {}: {}", package_manager, e),
        },
    };

    match &outcome {
        InstallOutcome::Installed => frontend.success("Dependencies installed"),
        InstallOutcome::Failed { reason } => {
            tracing::warn!(%reason, "dependency installation failed");
            frontend.warn("Dependency installation failed, but project was created");
            frontend.info(&format!(
                "You can install manually by running:\n   cd {}\n   {}",
                project_name,
                package_manager.install_command()
            ));
        }
    }

    outcome
}
