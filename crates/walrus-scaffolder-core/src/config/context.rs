//! Merging explicit arguments and prompt answers into a typed [`Context`]

use super::axes::{Framework, PackageManager, Sdk, UnknownValue, UseCase};
use super::detect;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// npm package name length limit
const MAX_PROJECT_NAME_LEN: usize = 214;

/// Input-shape errors raised while building a [`Context`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContextError {
    #[error("Missing required {field}. Must be one of: {allowed}")]
    Missing {
        field: &'static str,
        allowed: String,
    },

    #[error(transparent)]
    Unknown(#[from] UnknownValue),

    #[error("Invalid project name '{name}': {reason}")]
    InvalidProjectName { name: String, reason: String },
}

/// A loosely-typed input value, coerced to the type its field needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawValue {
    Bool(bool),
    Int(i64),
    Text(String),
}

impl RawValue {
    /// `1`/`0`, non-empty/empty strings and literal booleans all coerce
    pub fn is_truthy(&self) -> bool {
        match self {
            RawValue::Bool(b) => *b,
            RawValue::Int(n) => *n != 0,
            RawValue::Text(s) => !s.is_empty(),
        }
    }
}

impl From<bool> for RawValue {
    fn from(value: bool) -> Self {
        RawValue::Bool(value)
    }
}

impl From<i64> for RawValue {
    fn from(value: i64) -> Self {
        RawValue::Int(value)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Text(value)
    }
}

/// One configuration source: command-line arguments or prompt answers
///
/// Axis values stay strings until [`build_context`] checks them, so either
/// source may carry values that turn out to be invalid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialConfig {
    pub project_name: Option<String>,
    pub sdk: Option<String>,
    pub framework: Option<String>,
    pub use_case: Option<String>,
    pub package_manager: Option<String>,
    pub analytics: Option<RawValue>,
    pub tailwind: Option<RawValue>,
    pub use_zk_login: Option<RawValue>,
}

impl PartialConfig {
    /// Field-by-field overlay: values present in `self` win over `fallback`
    pub fn merged_over(&self, fallback: &PartialConfig) -> PartialConfig {
        fn pick<T: Clone>(primary: &Option<T>, fallback: &Option<T>) -> Option<T> {
            primary.clone().or_else(|| fallback.clone())
        }

        PartialConfig {
            project_name: pick(&non_empty(&self.project_name), &fallback.project_name),
            sdk: pick(&non_empty(&self.sdk), &fallback.sdk),
            framework: pick(&non_empty(&self.framework), &fallback.framework),
            use_case: pick(&non_empty(&self.use_case), &fallback.use_case),
            package_manager: pick(&non_empty(&self.package_manager), &fallback.package_manager),
            analytics: pick(&self.analytics, &fallback.analytics),
            tailwind: pick(&self.tailwind, &fallback.tailwind),
            use_zk_login: pick(&self.use_zk_login, &fallback.use_zk_login),
        }
    }
}

/// Empty strings count as "not supplied"
fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|s| !s.is_empty()).cloned()
}

/// Ambient inputs to context construction
#[derive(Debug, Clone)]
pub struct Environment {
    /// Directory the project is created in
    pub cwd: PathBuf,
    /// Signature of the invoking package manager, if any
    pub user_agent: Option<String>,
}

impl Environment {
    /// Capture the working directory and package-manager signature of this process
    pub fn capture() -> std::io::Result<Self> {
        Ok(Self {
            cwd: std::env::current_dir()?,
            user_agent: detect::user_agent_from_env(),
        })
    }
}

/// Fully-resolved configuration for one generation run
///
/// Construction only guarantees type validity. Compatibility between axes is
/// checked separately by [`crate::compat::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Context {
    project_name: String,
    project_path: PathBuf,
    sdk: Sdk,
    framework: Framework,
    use_case: UseCase,
    analytics: bool,
    tailwind: bool,
    use_zk_login: bool,
    package_manager: PackageManager,
}

impl Context {
    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    pub fn project_path(&self) -> &Path {
        &self.project_path
    }

    pub fn sdk(&self) -> Sdk {
        self.sdk
    }

    pub fn framework(&self) -> Framework {
        self.framework
    }

    pub fn use_case(&self) -> UseCase {
        self.use_case
    }

    pub fn analytics(&self) -> bool {
        self.analytics
    }

    pub fn tailwind(&self) -> bool {
        self.tailwind
    }

    pub fn use_zk_login(&self) -> bool {
        self.use_zk_login
    }

    pub fn package_manager(&self) -> PackageManager {
        self.package_manager
    }
}

/// Build a context from the current process environment
pub fn build_context(
    explicit: &PartialConfig,
    interactive: &PartialConfig,
) -> anyhow::Result<Context> {
    let env = Environment::capture()?;
    Ok(build_context_in(explicit, interactive, &env)?)
}

/// Build a context against an explicit [`Environment`]
pub fn build_context_in(
    explicit: &PartialConfig,
    interactive: &PartialConfig,
    env: &Environment,
) -> Result<Context, ContextError> {
    let merged = explicit.merged_over(interactive);

    let project_name = merged.project_name.ok_or(ContextError::Missing {
        field: "project name",
        allowed: "lowercase letters, numbers, and hyphens".to_string(),
    })?;
    validate_project_name(&project_name).map_err(|reason| ContextError::InvalidProjectName {
        name: project_name.clone(),
        reason,
    })?;

    let sdk: Sdk = required(merged.sdk, "SDK", &Sdk::ALL.map(|v| v.as_str()))?.parse()?;
    let framework: Framework = required(
        merged.framework,
        "framework",
        &Framework::ALL.map(|v| v.as_str()),
    )?
    .parse()?;
    let use_case: UseCase = required(
        merged.use_case,
        "use case",
        &UseCase::ALL.map(|v| v.as_str()),
    )?
    .parse()?;

    let package_manager = match merged.package_manager {
        Some(pm) => pm.parse()?,
        None => detect::detect_package_manager(env.user_agent.as_deref()),
    };

    let truthy = |value: &Option<RawValue>| value.as_ref().is_some_and(RawValue::is_truthy);

    tracing::debug!(
        project = %project_name,
        %sdk,
        %framework,
        %use_case,
        %package_manager,
        "context resolved"
    );

    Ok(Context {
        project_path: env.cwd.join(&project_name),
        project_name,
        sdk,
        framework,
        use_case,
        analytics: truthy(&merged.analytics),
        tailwind: truthy(&merged.tailwind),
        use_zk_login: truthy(&merged.use_zk_login),
        package_manager,
    })
}

fn required(
    value: Option<String>,
    field: &'static str,
    allowed: &[&str],
) -> Result<String, ContextError> {
    value.ok_or_else(|| ContextError::Missing {
        field,
        allowed: allowed.join(", "),
    })
}

/// Check a project name against npm package naming rules
///
/// Names are also directory names, so anything that could address a path
/// outside the working directory is rejected.
pub fn validate_project_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("Project name cannot be empty".to_string());
    }
    if name.len() > MAX_PROJECT_NAME_LEN {
        return Err(format!(
            "Project name must be {} characters or less",
            MAX_PROJECT_NAME_LEN
        ));
    }
    if name.contains("..") || name.contains('/') || name.contains('\\') {
        return Err("Project name cannot contain path separators".to_string());
    }
    if Path::new(name).is_absolute() {
        return Err("Project name cannot be an absolute path".to_string());
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(
            "Project name must contain only lowercase letters, numbers, and hyphens".to_string(),
        );
    }
    if name.starts_with('-') || name.ends_with('-') {
        return Err("Project name cannot start or end with a hyphen".to_string());
    }
    Ok(())
}

#[cfg(test)]
impl Context {
    /// A well-typed context that skips project name validation
    pub(crate) fn fixture(sdk: Sdk, framework: Framework, use_case: UseCase) -> Self {
        Self {
            project_name: "test-app".to_string(),
            project_path: PathBuf::from("/path/to/test-app"),
            sdk,
            framework,
            use_case,
            analytics: false,
            tailwind: false,
            use_zk_login: false,
            package_manager: PackageManager::Pnpm,
        }
    }

    pub(crate) fn with_project_name(mut self, name: &str, path: &Path) -> Self {
        self.project_name = name.to_string();
        self.project_path = path.to_path_buf();
        self
    }

    pub(crate) fn with_features(mut self, analytics: bool, tailwind: bool, zk_login: bool) -> Self {
        self.analytics = analytics;
        self.tailwind = tailwind;
        self.use_zk_login = zk_login;
        self
    }
}
