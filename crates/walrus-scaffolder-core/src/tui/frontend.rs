//! cliclack-backed [`Frontend`] for post-install steps

use crate::post_install::Frontend;
use anyhow::Result;
use std::io;

#[derive(Debug, Clone, Copy)]
pub struct CliFrontend {
    interactive: bool,
}

impl CliFrontend {
    pub fn new(interactive: bool) -> Self {
        Self { interactive }
    }
}

fn emit(result: io::Result<()>) {
    if let Err(e) = result {
        tracing::debug!(error = %e, "failed to write to terminal");
    }
}

impl Frontend for CliFrontend {
    fn is_interactive(&self) -> bool {
        self.interactive
    }

    fn info(&self, message: &str) {
        emit(cliclack::log::info(message));
    }

    fn warn(&self, message: &str) {
        emit(cliclack::log::warning(message));
    }

    fn success(&self, message: &str) {
        emit(cliclack::log::success(message));
    }

    fn confirm(&self, message: &str, default: bool) -> Result<bool> {
        match cliclack::confirm(message).initial_value(default).interact() {
            Ok(answer) => Ok(answer),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}
