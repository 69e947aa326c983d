//! Configuration axes, context resolution and prompt planning

pub mod axes;
pub mod context;
pub mod detect;
pub mod prompt_plan;

pub use axes::{Framework, PackageManager, Sdk, UnknownValue, UseCase};
pub use context::{
    build_context, build_context_in, validate_project_name, Context, ContextError, Environment,
    PartialConfig, RawValue,
};
pub use detect::detect_package_manager;
pub use prompt_plan::{Answer, Choice, Prompt, PromptField, PromptPlan};
