//! Walrus Scaffolder Core - engine behind `create-walrus-app`
//!
//! Turns a set of configuration answers into a ready-to-run Walrus
//! application directory generated from pre-built presets.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - context resolution, compatibility rules,
//!   preset resolution and generation, post-install steps
//! - **Layer 2: Product Seam** - the `ProductConfig` trait a binary implements
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based TUI prompts module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use walrus_scaffolder_core::{compat, config, templates, GenerationTracker};
//!
//! let context = config::build_context(&explicit, &config::PartialConfig::default())?;
//! if let compat::Validation::Invalid(reason) = compat::validate(&context) {
//!     anyhow::bail!("{}", reason);
//! }
//! let generator = templates::Generator::new(
//!     templates::PresetResolver::new("templates"),
//!     GenerationTracker::global(),
//! );
//! generator
//!     .generate(&templates::GenerateRequest {
//!         context: &context,
//!         target_dir: context.project_path(),
//!     })
//!     .await?;
//! ```

pub mod compat;
pub mod config;
pub mod interrupt;
pub mod post_install;
pub mod product;
pub mod templates;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use compat::{validate, Incompatibility, Validation};
pub use config::{build_context, Context, PartialConfig};
pub use interrupt::{Cleanup, GenerationTracker};
pub use product::ProductConfig;
pub use templates::{GenerateError, Generated, Generator, PresetResolver};

#[cfg(feature = "tui")]
pub use tui::{run, CreateArgs, RunOutcome};
