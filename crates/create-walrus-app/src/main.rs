//! create-walrus-app - Project scaffolding for Walrus applications

mod logging;

use clap::{ArgAction, Parser};
use colored::Colorize;
use std::io::IsTerminal as _;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use walrus_scaffolder_core::config::Context;
use walrus_scaffolder_core::interrupt::{self, Cleanup};
use walrus_scaffolder_core::{CreateArgs, ProductConfig, RunOutcome};

/// CLI version
pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

const ABOUT: &str = "Interactive CLI for scaffolding Walrus applications";

/// Walrus product configuration
#[derive(Clone)]
pub struct WalrusConfig;

impl ProductConfig for WalrusConfig {
    fn name(&self) -> &'static str {
        "create-walrus-app"
    }

    fn display_name(&self) -> &'static str {
        "Walrus Starter Kit"
    }

    fn docs_url(&self) -> &'static str {
        "https://docs.wal.app"
    }

    /// `templates/` next to the executable, else the workspace copy
    fn default_template_root(&self) -> PathBuf {
        let bundled = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|dir| dir.join("templates")));
        match bundled {
            Some(dir) if dir.is_dir() => dir,
            _ => Path::new(env!("CARGO_MANIFEST_DIR")).join("../../templates"),
        }
    }

    fn cli_description(&self) -> &'static str {
        ABOUT
    }

    fn upgrade_command(&self) -> &'static str {
        "cargo install create-walrus-app --force"
    }

    fn next_steps(&self, context: &Context, installed: bool) -> Vec<String> {
        let pm = context.package_manager();
        let mut steps = vec![format!("cd {}", context.project_name())];

        if !installed {
            steps.push(pm.install_command());
        }
        steps.push(pm.run_command("dev"));
        steps.push(format!(
            "Read the {} docs: {}",
            context.sdk().package_name(),
            context.sdk().docs_url()
        ));

        steps
    }
}

#[derive(Parser, Debug)]
#[command(name = "create-walrus-app")]
#[command(about = ABOUT)]
#[command(version)]
pub struct Args {
    /// Project directory name
    pub project_name: Option<String>,

    /// SDK to use (mysten | tusky | hibernuts)
    #[arg(long)]
    pub sdk: Option<String>,

    /// Framework (react | vue | plain-ts)
    #[arg(long)]
    pub framework: Option<String>,

    /// Use case (simple-upload | gallery | defi-nft)
    #[arg(long = "use-case")]
    pub use_case: Option<String>,

    /// Package manager to use (npm | pnpm | yarn | bun)
    #[arg(short, long = "package-manager")]
    pub package_manager: Option<String>,

    /// Include Blockberry analytics
    #[arg(long)]
    pub analytics: bool,

    /// Include Tailwind CSS
    #[arg(long)]
    pub tailwind: bool,

    /// Enable zkLogin through Enoki (mysten + react only)
    #[arg(long = "zklogin")]
    pub zk_login: bool,

    /// Skip dependency installation
    #[arg(long = "skip-install")]
    pub skip_install: bool,

    /// Skip project validation
    #[arg(long = "skip-validation")]
    pub skip_validation: bool,

    /// No longer used; accepted for older scripts
    #[arg(long = "skip-git", hide = true)]
    pub skip_git: bool,

    /// Local directory to use for presets (for development use)
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,

    /// Increase diagnostic output (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    fn into_create_args(self, interactive: bool) -> CreateArgs {
        CreateArgs {
            project_name: self.project_name,
            sdk: self.sdk,
            framework: self.framework,
            use_case: self.use_case,
            package_manager: self.package_manager,
            analytics: self.analytics,
            tailwind: self.tailwind,
            zk_login: self.zk_login,
            skip_install: self.skip_install,
            skip_validation: self.skip_validation,
            template_dir: self.template_dir,
            interactive,
        }
    }
}

fn report_interrupt(cleanup: &Cleanup) {
    let _ = console::Term::stderr().show_cursor();
    eprintln!();
    eprintln!("{}", "Operation cancelled by user.".yellow());

    match cleanup {
        Cleanup::Nothing => {}
        Cleanup::Removed(path) => {
            eprintln!("Cleaning up partial generation: {}", path.display());
            eprintln!("{}", "Cleanup completed".green());
        }
        Cleanup::Failed { path, error } => {
            eprintln!("{} {}", "Failed to cleanup:".red(), error);
            eprintln!("{} {}", "Please manually delete:".yellow(), path.display());
        }
    }
}

fn exit_code(outcome: &RunOutcome) -> ExitCode {
    if outcome.is_failure() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    let args = Args::parse();
    if let Err(e) = logging::init_logging(args.verbose) {
        eprintln!("{} {}", "Warning:".yellow(), e);
    }

    // Removes a half-written project on Ctrl+C, then exits 0
    if let Err(e) = interrupt::install_handler(report_interrupt) {
        tracing::warn!(error = %e, "could not install Ctrl+C handler");
    }

    if args.skip_git {
        tracing::debug!("--skip-git is deprecated and has no effect");
    }

    let interactive = std::io::stdin().is_terminal();
    let config = WalrusConfig;
    let result = walrus_scaffolder_core::run(&config, args.into_create_args(interactive), CLI_VERSION).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    match result {
        Ok(outcome) => exit_code(&outcome),
        Err(e) => {
            tracing::debug!(error = ?e, "run failed");
            eprintln!("{} Failed to create project: {}", "✗".red(), e);
            ExitCode::FAILURE
        }
    }
}
