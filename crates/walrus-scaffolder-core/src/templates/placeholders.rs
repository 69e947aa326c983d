//! Project-identity placeholder substitution

use crate::config::Context;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use thiserror::Error;
use tokio::fs;

#[derive(Debug, Error)]
pub enum PlaceholderError {
    #[error("Unresolved placeholder {token} in {}", file.display())]
    Unresolved { file: PathBuf, token: String },

    #[error("Failed to rewrite {}", file.display())]
    Io {
        file: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// `{{UPPER_SNAKE}}`; leaves JSX object literals such as `style={{ a: 1 }}` alone
fn token_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\{\{[A-Z][A-Z0-9_]*\}\}").expect("valid placeholder pattern"))
}

/// Token values derived from a context
#[derive(Debug, Clone)]
pub struct Placeholders {
    values: Vec<(&'static str, String)>,
}

impl Placeholders {
    pub fn from_context(context: &Context) -> Self {
        Self {
            values: vec![
                ("{{PROJECT_NAME}}", context.project_name().to_string()),
                ("{{SDK}}", context.sdk().to_string()),
                ("{{FRAMEWORK}}", context.framework().to_string()),
                ("{{USE_CASE}}", context.use_case().to_string()),
                ("{{PACKAGE_MANAGER}}", context.package_manager().to_string()),
            ],
        }
    }

    /// Replace every known token; unknown tokens are left for [`first_unresolved`]
    pub fn apply(&self, text: &str) -> String {
        self.values
            .iter()
            .fold(text.to_string(), |acc, (token, value)| acc.replace(token, value))
    }
}

/// First `{{TOKEN}}` still present in `text`
pub fn first_unresolved(text: &str) -> Option<&str> {
    token_pattern().find(text).map(|m| m.as_str())
}

/// Substitute placeholders in the given files under `root`
///
/// Files that are not valid UTF-8 are treated as binary and left untouched.
/// Returns the number of files rewritten.
pub async fn substitute_files(
    root: &Path,
    files: &[PathBuf],
    placeholders: &Placeholders,
) -> Result<usize, PlaceholderError> {
    let mut rewritten = 0;

    for relative in files {
        let file = root.join(relative);
        let io_err = |source| PlaceholderError::Io {
            file: file.clone(),
            source,
        };

        let bytes = fs::read(&file).await.map_err(io_err)?;
        let Ok(text) = String::from_utf8(bytes) else {
            continue;
        };
        if !text.contains("{{") {
            continue;
        }

        let output = placeholders.apply(&text);
        if let Some(token) = first_unresolved(&output) {
            return Err(PlaceholderError::Unresolved {
                file: relative.clone(),
                token: token.to_string(),
            });
        }
        if output != text {
            fs::write(&file, output).await.map_err(io_err)?;
            rewritten += 1;
        }
    }

    Ok(rewritten)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Framework, Sdk, UseCase};

    fn placeholders() -> Placeholders {
        let context = Context::fixture(Sdk::Mysten, Framework::React, UseCase::SimpleUpload)
            .with_project_name("my-custom-app-name", Path::new("/tmp/my-custom-app-name"));
        Placeholders::from_context(&context)
    }

    #[test]
    fn test_replaces_every_occurrence() {
        let out = placeholders().apply("# {{PROJECT_NAME}}\n\ncd {{PROJECT_NAME}} && {{PACKAGE_MANAGER}} dev");
        assert_eq!(out, "# my-custom-app-name\n\ncd my-custom-app-name && pnpm dev");
        assert!(first_unresolved(&out).is_none());
    }

    #[test]
    fn test_jsx_double_braces_are_not_tokens() {
        let jsx = "<div style={{ color: 'red' }}>{{PROJECT_NAME}}</div>";
        let out = placeholders().apply(jsx);
        assert_eq!(out, "<div style={{ color: 'red' }}>my-custom-app-name</div>");
        assert!(first_unresolved(&out).is_none());
    }

    #[test]
    fn test_detects_unknown_tokens() {
        assert_eq!(first_unresolved("name: {{AUTHOR_NAME}}"), Some("{{AUTHOR_NAME}}"));
        assert_eq!(first_unresolved("{{lowercase}}"), None);
    }

    #[tokio::test]
    async fn test_substitute_files_rewrites_text_only() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("package.json"),
            r#"{ "name": "{{PROJECT_NAME}}", "private": true }"#,
        )
        .unwrap();
        std::fs::write(dir.path().join("README.md"), "# {{PROJECT_NAME}}\nBuilt with {{SDK}}").unwrap();
        std::fs::write(dir.path().join("plain.txt"), "nothing here").unwrap();
        std::fs::write(dir.path().join("logo.bin"), [0xff, 0xfe, b'{', b'{']).unwrap();

        let files: Vec<PathBuf> = ["package.json", "README.md", "plain.txt", "logo.bin"]
            .iter()
            .map(PathBuf::from)
            .collect();
        let count = substitute_files(dir.path(), &files, &placeholders()).await.unwrap();

        assert_eq!(count, 2);
        let pkg = std::fs::read_to_string(dir.path().join("package.json")).unwrap();
        assert!(pkg.contains(r#""name": "my-custom-app-name""#));
        let readme = std::fs::read_to_string(dir.path().join("README.md")).unwrap();
        assert_eq!(readme, "# my-custom-app-name\nBuilt with mysten");
        assert_eq!(
            std::fs::read(dir.path().join("logo.bin")).unwrap(),
            vec![0xff, 0xfe, b'{', b'{']
        );
    }

    #[tokio::test]
    async fn test_substitute_files_fails_on_unknown_token() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("README.md"), "by {{AUTHOR}}").unwrap();
        let err = substitute_files(dir.path(), &[PathBuf::from("README.md")], &placeholders())
            .await
            .unwrap_err();
        match err {
            PlaceholderError::Unresolved { file, token } => {
                assert_eq!(file, PathBuf::from("README.md"));
                assert_eq!(token, "{{AUTHOR}}");
            }
            other => panic!("unexpected error {:?}", other),
        }
    }
}
