//! CLI prompts using cliclack (Charm-style inline prompts)
//!
//! This module is optional and only available when the `tui` feature is enabled.

mod frontend;
mod prompts;

pub use frontend::CliFrontend;
pub use prompts::{run, CreateArgs, RunOutcome};
