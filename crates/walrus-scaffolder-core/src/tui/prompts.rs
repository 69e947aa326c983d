//! Charm-style CLI prompts using cliclack

use super::frontend::CliFrontend;
use crate::compat::{self, Incompatibility, Validation};
use crate::config::{self, Answer, Context, PartialConfig, Prompt, PromptPlan, RawValue};
use crate::interrupt::GenerationTracker;
use crate::post_install::{DeploySetup, PostInstallRequest, PostInstaller, SystemRunner};
use crate::product::ProductConfig;
use crate::templates::{GenerateError, GenerateRequest, Generated, Generator, PresetResolver};
use anyhow::Result;
use std::io;
use std::path::PathBuf;

/// CLI arguments for the create command
#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    pub project_name: Option<String>,
    pub sdk: Option<String>,
    pub framework: Option<String>,
    pub use_case: Option<String>,
    pub package_manager: Option<String>,

    /// Feature flags; `false` means "not given" and leaves the prompt open
    pub analytics: bool,
    pub tailwind: bool,
    pub zk_login: bool,

    pub skip_install: bool,
    pub skip_validation: bool,

    /// Local directory to use for presets instead of the product default
    pub template_dir: Option<PathBuf>,

    /// Whether prompts may be shown
    pub interactive: bool,
}

impl CreateArgs {
    /// The explicitly supplied part of the configuration
    pub fn explicit(&self) -> PartialConfig {
        let flag = |set: bool| set.then_some(RawValue::Bool(true));
        PartialConfig {
            project_name: self.project_name.clone(),
            sdk: self.sdk.clone(),
            framework: self.framework.clone(),
            use_case: self.use_case.clone(),
            package_manager: self.package_manager.clone(),
            analytics: flag(self.analytics),
            tailwind: flag(self.tailwind),
            use_zk_login: flag(self.zk_login),
        }
    }
}

/// How a run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Created,
    /// The user cancelled a prompt
    Cancelled,
    /// The configuration is a disallowed combination
    Rejected(Incompatibility),
    /// Generation failed; the error has already been shown
    Failed,
}

impl RunOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, RunOutcome::Rejected(_) | RunOutcome::Failed)
    }
}

/// Run the CLI with interactive prompts
pub async fn run<C: ProductConfig>(config: &C, args: CreateArgs, cli_version: &str) -> Result<RunOutcome> {
    cliclack::intro(format!("Welcome to {}", config.display_name()))?;

    // Step 1: Collect answers for everything not given on the command line
    let explicit = args.explicit();
    let answers = if args.interactive {
        match ask(explicit.clone())? {
            Some(answers) => answers,
            None => {
                cliclack::outro_cancel("Operation cancelled.")?;
                return Ok(RunOutcome::Cancelled);
            }
        }
    } else {
        PartialConfig::default()
    };

    // Step 2: Build and validate the context
    let context = config::build_context(&explicit, &answers)?;
    if let Validation::Invalid(incompatibility) = compat::validate(&context) {
        cliclack::log::error(&incompatibility.error)?;
        cliclack::log::info(format!("Suggestion: {}", incompatibility.suggestion))?;
        cliclack::outro_cancel("Invalid configuration")?;
        return Ok(RunOutcome::Rejected(incompatibility));
    }
    cliclack::log::success("Configuration valid")?;
    print_summary(&context)?;

    // Step 3: Generate
    let template_root = args
        .template_dir
        .clone()
        .unwrap_or_else(|| config.default_template_root());
    let generated = match generate(&context, template_root, cli_version, config).await? {
        Ok(generated) => generated,
        Err(outcome) => return Ok(outcome),
    };

    // Step 4: Post-install
    let frontend = CliFrontend::new(args.interactive);
    let retry_command = config.deploy_retry_command(context.package_manager());
    let installer = PostInstaller::new(
        &SystemRunner,
        &frontend,
        DeploySetup {
            script: config.deploy_script(),
            retry_command: &retry_command,
        },
    );
    let result = installer
        .run(&PostInstallRequest {
            context: &context,
            project_path: context.project_path(),
            skip_install: args.skip_install,
            skip_validation: args.skip_validation,
            required_files: &generated.manifest.required_files,
        })
        .await;
    if !result.success {
        cliclack::log::warning("Post-install tasks completed with warnings")?;
        if let Some(error) = &result.error {
            cliclack::log::warning(error.to_string())?;
        }
    }

    // Step 5: Show next steps
    print_next_steps(config, &context, result.installed)?;

    Ok(RunOutcome::Created)
}

/// Walk the prompt plan; `None` when the user cancels
fn ask(explicit: PartialConfig) -> Result<Option<PartialConfig>> {
    let mut plan = PromptPlan::new(explicit);

    while let Some(prompt) = plan.next_prompt() {
        let field = prompt.field();
        match interact(&prompt) {
            Ok(answer) => plan.record(field, answer),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => return Ok(None),
            Err(e) => return Err(e.into()),
        }
    }

    Ok(Some(plan.into_answers()))
}

fn interact(prompt: &Prompt) -> io::Result<Answer> {
    match prompt {
        Prompt::Text { message, default, .. } => {
            let value: String = cliclack::input(*message)
                .placeholder(default)
                .default_input(default)
                .validate(|input: &String| config::validate_project_name(input))
                .interact()?;
            Ok(Answer::Text(value))
        }
        Prompt::Select {
            message, choices, ..
        } => {
            let mut select = cliclack::select(*message);
            for choice in choices {
                select = select.item(choice.value, &choice.label, choice.hint);
            }
            let value: &str = select.interact()?;
            Ok(Answer::Text(value.to_string()))
        }
        Prompt::Confirm {
            message, default, ..
        } => {
            let value = cliclack::confirm(*message).initial_value(*default).interact()?;
            Ok(Answer::Flag(value))
        }
    }
}

fn print_summary(context: &Context) -> Result<()> {
    let mut lines = vec![
        format!("Project: {}", context.project_name()),
        format!("SDK: {}", context.sdk().package_name()),
        format!("Framework: {}", context.framework().label()),
        format!("Use case: {}", context.use_case().label()),
        format!("Package manager: {}", context.package_manager()),
    ];
    let features = crate::templates::feature_tokens(context);
    if !features.is_empty() {
        lines.push(format!("Features: {}", features.join(", ")));
    }
    cliclack::log::info(lines.join("\n"))?;
    Ok(())
}

/// How a run ends when generation does not produce a project
fn stopped_outcome(error: &GenerateError) -> RunOutcome {
    match error {
        GenerateError::Cancelled => RunOutcome::Cancelled,
        _ => RunOutcome::Failed,
    }
}

/// `Err` carries the outcome once the failure has been reported
async fn generate<C: ProductConfig>(
    context: &Context,
    template_root: PathBuf,
    cli_version: &str,
    config: &C,
) -> Result<std::result::Result<Generated, RunOutcome>> {
    let generator = Generator::new(PresetResolver::new(template_root), GenerationTracker::global());

    let spinner = cliclack::spinner();
    spinner.start("Generating your Walrus application...");

    let result = generator
        .generate(&GenerateRequest {
            context,
            target_dir: context.project_path(),
        })
        .await;

    let generated = match result {
        Ok(generated) => generated,
        Err(e) => {
            let outcome = stopped_outcome(&e);
            if outcome == RunOutcome::Cancelled {
                spinner.cancel("Generation cancelled");
            } else {
                spinner.error("Project generation failed");
                cliclack::log::error(format!("{:#}", anyhow::Error::from(e)))?;
                cliclack::outro_cancel("Nothing else was changed")?;
            }
            return Ok(Err(outcome));
        }
    };

    spinner.stop(format!(
        "Created {} files in {}",
        generated.files_created,
        context.project_path().display()
    ));
    tracing::debug!(preset = %generated.preset, substituted = generated.files_substituted, "generation finished");

    if let Some(warning) = generated
        .manifest
        .version_warning(cli_version, config.upgrade_command())
    {
        cliclack::log::warning(format!("Version warning: {}", warning))?;
    }

    Ok(Ok(generated))
}

fn print_next_steps<C: ProductConfig>(config: &C, context: &Context, installed: bool) -> Result<()> {
    let steps = config.next_steps(context, installed);

    println!();
    println!("  Next steps");
    println!();

    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }

    cliclack::outro(format!("Docs: {}", config.docs_url()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_leaves_unset_flags_open() {
        let args = CreateArgs {
            project_name: Some("my-app".into()),
            sdk: Some("mysten".into()),
            tailwind: true,
            ..Default::default()
        };
        let explicit = args.explicit();
        assert_eq!(explicit.project_name.as_deref(), Some("my-app"));
        assert_eq!(explicit.sdk.as_deref(), Some("mysten"));
        assert_eq!(explicit.framework, None);
        assert_eq!(explicit.tailwind, Some(RawValue::Bool(true)));
        assert_eq!(explicit.analytics, None);
        assert_eq!(explicit.use_zk_login, None);
    }

    #[test]
    fn test_failure_outcomes() {
        assert!(!RunOutcome::Created.is_failure());
        assert!(!RunOutcome::Cancelled.is_failure());
        assert!(RunOutcome::Failed.is_failure());
    }

    #[test]
    fn test_cancelled_generation_is_not_a_failure() {
        let outcome = stopped_outcome(&GenerateError::Cancelled);
        assert_eq!(outcome, RunOutcome::Cancelled);
        assert!(!outcome.is_failure());

        let outcome = stopped_outcome(&GenerateError::PresetNotFound {
            name: "react-mysten-gallery".into(),
            path: PathBuf::from("/templates/react-mysten-gallery"),
        });
        assert_eq!(outcome, RunOutcome::Failed);
        assert!(outcome.is_failure());
    }
}
