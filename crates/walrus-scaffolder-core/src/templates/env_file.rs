//! Local `.env` materialisation from the shipped `.env.example`

use std::path::Path;
use tokio::fs;

pub const ENV_FILE: &str = ".env";
pub const ENV_EXAMPLE_FILE: &str = ".env.example";

/// What [`copy_env_file`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvCopy {
    Created,
    AlreadyExists,
    NoSource,
}

/// Copy `.env.example` to `.env` unless `.env` already exists
pub async fn copy_env_file(dir: &Path) -> std::io::Result<EnvCopy> {
    let example = dir.join(ENV_EXAMPLE_FILE);
    let env = dir.join(ENV_FILE);

    if !fs::try_exists(&example).await? {
        return Ok(EnvCopy::NoSource);
    }
    if fs::try_exists(&env).await? {
        return Ok(EnvCopy::AlreadyExists);
    }

    fs::copy(&example, &env).await?;
    Ok(EnvCopy::Created)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_creates_env_from_example() {
        let dir = tempfile::tempdir().unwrap();
        let content = "VITE_API_KEY=test123\nNODE_ENV=development\n";
        std::fs::write(dir.path().join(ENV_EXAMPLE_FILE), content).unwrap();

        assert_eq!(copy_env_file(dir.path()).await.unwrap(), EnvCopy::Created);
        assert_eq!(
            std::fs::read_to_string(dir.path().join(ENV_FILE)).unwrap(),
            content
        );
    }

    #[tokio::test]
    async fn test_existing_env_is_never_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(ENV_EXAMPLE_FILE), "FOO=bar\n").unwrap();
        std::fs::write(dir.path().join(ENV_FILE), "EXISTING=true\n").unwrap();

        assert_eq!(copy_env_file(dir.path()).await.unwrap(), EnvCopy::AlreadyExists);
        assert_eq!(
            std::fs::read_to_string(dir.path().join(ENV_FILE)).unwrap(),
            "EXISTING=true\n"
        );
    }

    #[tokio::test]
    async fn test_second_call_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(ENV_EXAMPLE_FILE), "FOO=bar\n").unwrap();

        assert_eq!(copy_env_file(dir.path()).await.unwrap(), EnvCopy::Created);
        std::fs::write(dir.path().join(ENV_EXAMPLE_FILE), "FOO=changed\n").unwrap();
        assert_eq!(copy_env_file(dir.path()).await.unwrap(), EnvCopy::AlreadyExists);
        assert_eq!(
            std::fs::read_to_string(dir.path().join(ENV_FILE)).unwrap(),
            "FOO=bar\n"
        );
    }

    #[tokio::test]
    async fn test_missing_example() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(copy_env_file(dir.path()).await.unwrap(), EnvCopy::NoSource);
        assert!(!dir.path().join(ENV_FILE).exists());
    }
}
