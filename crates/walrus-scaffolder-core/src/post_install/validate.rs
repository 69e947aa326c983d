//! Structural checks on an installed project

use std::path::Path;
use tokio::fs;

/// Result of [`validate_project`]; `errors` is empty exactly when `valid`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectCheck {
    pub valid: bool,
    pub errors: Vec<String>,
}

const PACKAGE_JSON: &str = "package.json";

/// Check that every required path exists and that `package.json` is sane
pub async fn validate_project(project_path: &Path, required: &[String]) -> ProjectCheck {
    let mut errors = Vec::new();

    for entry in required {
        if !fs::try_exists(project_path.join(entry)).await.unwrap_or(false) {
            errors.push(format!("Missing required file: {}", entry));
        }
    }

    let manifest = project_path.join(PACKAGE_JSON);
    if let Ok(content) = fs::read_to_string(&manifest).await {
        if let Some(problem) = package_json_problem(&content) {
            errors.push(problem);
        }
    }

    ProjectCheck {
        valid: errors.is_empty(),
        errors,
    }
}

fn package_json_problem(content: &str) -> Option<String> {
    match serde_json::from_str::<serde_json::Value>(content) {
        Err(e) => Some(format!("package.json is not valid JSON: {}", e)),
        Ok(value) => match value.get("name") {
            Some(serde_json::Value::String(name)) if !name.is_empty() => None,
            _ => Some("package.json has no \"name\" field".to_string()),
        },
    }
}
