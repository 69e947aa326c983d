//! Optional Walrus Sites deployment setup

use super::process::{CommandSpec, ProcessRunner};
use super::Frontend;
use std::path::Path;

pub const DEPLOY_PROMPT: &str = "Setup Walrus Sites deployment? (testnet)";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployOutcome {
    /// Session is not attached to a terminal
    NotOffered,
    Declined,
    ScriptMissing,
    Completed,
    /// The script ran and exited non-zero
    Failed { code: Option<i32> },
    /// The prompt or the script could not be run
    Skipped { reason: String },
}

/// Where the setup script lives and how to rerun it later
#[derive(Debug, Clone, Copy)]
pub struct DeploySetup<'a> {
    /// Relative to the project root
    pub script: &'a Path,
    pub retry_command: &'a str,
}

/// Offer to run the deploy setup script; never fails the surrounding run
pub async fn setup_deploy(
    runner: &dyn ProcessRunner,
    frontend: &dyn Frontend,
    project_path: &Path,
    setup: DeploySetup<'_>,
) -> DeployOutcome {
    if !frontend.is_interactive() {
        return DeployOutcome::NotOffered;
    }

    let accepted = match frontend.confirm(DEPLOY_PROMPT, false) {
        Ok(accepted) => accepted,
        Err(e) => return skipped(frontend, e.to_string()),
    };
    if !accepted {
        frontend.info(&format!(
            "You can setup later by running: {}",
            setup.retry_command
        ));
        return DeployOutcome::Declined;
    }

    let script = project_path.join(setup.script);
    if !script.is_file() {
        frontend.warn(&format!("{} not found in project", setup.script.display()));
        return DeployOutcome::ScriptMissing;
    }
    make_executable(&script);

    frontend.info("Running Walrus deployment setup...");
    let command = CommandSpec::new("bash", project_path)
        .arg(script.to_string_lossy())
        .arg(project_path.to_string_lossy())
        .inherit_output();

    match runner.run(&command).await {
        Ok(status) if status.success() => {
            frontend.success("Walrus deployment setup complete!");
            DeployOutcome::Completed
        }
        Ok(status) => {
            let code = status
                .code
                .map_or_else(|| "signal".to_string(), |c| c.to_string());
            frontend.warn(&format!(
                "Setup exited with code {}. You can retry with: {}",
                code, setup.retry_command
            ));
            DeployOutcome::Failed { code: status.code }
        }
        Err(e) => skipped(frontend, e.to_string()),
    }
}

fn skipped(frontend: &dyn Frontend, reason: String) -> DeployOutcome {
    frontend.warn(&format!(
        "Walrus deployment setup skipped due to error: {}",
        reason
    ));
    DeployOutcome::Skipped { reason }
}

#[cfg(unix)]
fn make_executable(script: &Path) {
    use std::os::unix::fs::PermissionsExt;
    if let Err(e) = std::fs::set_permissions(script, std::fs::Permissions::from_mode(0o755)) {
        tracing::debug!(error = %e, script = %script.display(), "chmod failed");
    }
}

#[cfg(not(unix))]
fn make_executable(_script: &Path) {}
