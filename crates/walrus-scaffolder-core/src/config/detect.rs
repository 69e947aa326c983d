//! Package manager detection from the invoking tool's signature

use super::axes::PackageManager;

/// Environment variable package managers set on the scripts they spawn
pub const USER_AGENT_ENV: &str = "npm_config_user_agent";

/// Package managers recognised in the user agent, in order of preference
const SIGNATURES: &[(&str, PackageManager)] = &[
    ("pnpm", PackageManager::Pnpm),
    ("yarn", PackageManager::Yarn),
    ("bun", PackageManager::Bun),
];

/// Infer the package manager from a user agent string
///
/// The first entry of the preference list that appears anywhere in the
/// signature wins; npm is the fallback.
pub fn detect_package_manager(user_agent: Option<&str>) -> PackageManager {
    let Some(agent) = user_agent else {
        return PackageManager::Npm;
    };

    for (needle, pm) in SIGNATURES {
        if agent.contains(needle) {
            return *pm;
        }
    }
    PackageManager::Npm
}

/// Read the user agent signature from the process environment
pub fn user_agent_from_env() -> Option<String> {
    std::env::var(USER_AGENT_ENV).ok()
}
