//! External process execution for post-install steps

use async_trait::async_trait;
use colored::Colorize;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command as TokioCommand;

/// How a child's stdio is wired
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    /// Lines are read and echoed indented; stderr in yellow
    Streamed,
    /// The child owns the terminal (interactive scripts)
    Inherited,
}

/// A command to run inside a project directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
    pub output: Output,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>, cwd: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: cwd.into(),
            output: Output::Streamed,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn inherit_output(mut self) -> Self {
        self.output = Output::Inherited;
        self
    }

    /// Shell-style rendering for user-facing messages
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Exit status of a finished child
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunStatus {
    /// `None` when the child was terminated by a signal
    pub code: Option<i32>,
}

impl RunStatus {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Runs external commands; `Err` means the command could not be run at all
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    async fn run(&self, command: &CommandSpec) -> std::io::Result<RunStatus>;
}

/// [`ProcessRunner`] backed by `tokio::process`
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

#[async_trait]
impl ProcessRunner for SystemRunner {
    async fn run(&self, command: &CommandSpec) -> std::io::Result<RunStatus> {
        tracing::debug!(command = %command.display(), cwd = %command.cwd.display(), "spawning");

        let mut cmd = TokioCommand::new(&command.program);
        cmd.args(&command.args).current_dir(&command.cwd);

        let status = match command.output {
            Output::Inherited => {
                cmd.stdin(Stdio::inherit())
                    .stdout(Stdio::inherit())
                    .stderr(Stdio::inherit())
                    .status()
                    .await?
            }
            Output::Streamed => {
                let mut child = cmd
                    .stdin(Stdio::null())
                    .stdout(Stdio::piped())
                    .stderr(Stdio::piped())
                    .spawn()?;

                let (Some(stdout), Some(stderr)) = (child.stdout.take(), child.stderr.take()) else {
                    return Err(std::io::Error::other("failed to capture child output"));
                };
                let mut stdout_reader = BufReader::new(stdout).lines();
                let mut stderr_reader = BufReader::new(stderr).lines();
                let mut stdout_open = true;
                let mut stderr_open = true;

                while stdout_open || stderr_open {
                    tokio::select! {
                        line = stdout_reader.next_line(), if stdout_open => match line {
                            Ok(Some(line)) => println!("  {}", line),
                            Ok(None) => stdout_open = false,
                            Err(e) => {
                                tracing::warn!(error = %e, "failed to read child stdout");
                                stdout_open = false;
                            }
                        },
                        line = stderr_reader.next_line(), if stderr_open => match line {
                            Ok(Some(line)) => eprintln!("  {}", line.yellow()),
                            Ok(None) => stderr_open = false,
                            Err(e) => {
                                tracing::warn!(error = %e, "failed to read child stderr");
                                stderr_open = false;
                            }
                        },
                    }
                }

                child.wait().await?
            }
        };

        Ok(RunStatus {
            code: status.code(),
        })
    }
}
