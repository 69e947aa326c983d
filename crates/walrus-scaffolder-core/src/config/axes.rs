//! Closed enumerations for every configuration axis

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A value that is not a member of an axis enumeration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid {field}: {value}. Must be one of: {allowed}")]
pub struct UnknownValue {
    pub field: &'static str,
    pub value: String,
    pub allowed: String,
}

impl UnknownValue {
    fn new(field: &'static str, value: &str, allowed: &[&str]) -> Self {
        Self {
            field,
            value: value.to_string(),
            allowed: allowed.join(", "),
        }
    }
}

/// Walrus storage SDK used by the generated application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Sdk {
    Mysten,
    Tusky,
    Hibernuts,
}

impl Sdk {
    pub const ALL: [Sdk; 3] = [Sdk::Mysten, Sdk::Tusky, Sdk::Hibernuts];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sdk::Mysten => "mysten",
            Sdk::Tusky => "tusky",
            Sdk::Hibernuts => "hibernuts",
        }
    }

    /// Published npm package for this SDK
    pub fn package_name(&self) -> &'static str {
        match self {
            Sdk::Mysten => "@mysten/walrus",
            Sdk::Tusky => "@tusky-io/ts-sdk",
            Sdk::Hibernuts => "@hibernuts/walrus-sdk",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Sdk::Mysten => "Official Mysten Labs SDK (Testnet stable)",
            Sdk::Tusky => "Community TypeScript SDK",
            Sdk::Hibernuts => "Alternative Walrus SDK",
        }
    }

    pub fn docs_url(&self) -> &'static str {
        match self {
            Sdk::Mysten => "https://docs.walrus.site",
            Sdk::Tusky => "https://github.com/tusky-io",
            Sdk::Hibernuts => "https://github.com/hibernuts",
        }
    }
}

impl fmt::Display for Sdk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sdk {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Sdk::ALL
            .into_iter()
            .find(|sdk| sdk.as_str() == s)
            .ok_or_else(|| UnknownValue::new("SDK", s, &Sdk::ALL.map(|v| v.as_str())))
    }
}

/// UI framework of the generated application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Framework {
    React,
    Vue,
    PlainTs,
}

impl Framework {
    pub const ALL: [Framework; 3] = [Framework::React, Framework::Vue, Framework::PlainTs];

    pub fn as_str(&self) -> &'static str {
        match self {
            Framework::React => "react",
            Framework::Vue => "vue",
            Framework::PlainTs => "plain-ts",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Framework::React => "React + Vite",
            Framework::Vue => "Vue + Vite",
            Framework::PlainTs => "Plain TypeScript",
        }
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Framework {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Framework::ALL
            .into_iter()
            .find(|framework| framework.as_str() == s)
            .ok_or_else(|| {
                UnknownValue::new("framework", s, &Framework::ALL.map(|v| v.as_str()))
            })
    }
}

/// Application flow the template implements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum UseCase {
    SimpleUpload,
    Gallery,
    DefiNft,
}

impl UseCase {
    pub const ALL: [UseCase; 3] = [UseCase::SimpleUpload, UseCase::Gallery, UseCase::DefiNft];

    pub fn as_str(&self) -> &'static str {
        match self {
            UseCase::SimpleUpload => "simple-upload",
            UseCase::Gallery => "gallery",
            UseCase::DefiNft => "defi-nft",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            UseCase::SimpleUpload => "Simple Upload (Single file)",
            UseCase::Gallery => "File Gallery (Multiple files)",
            UseCase::DefiNft => "DeFi/NFT Metadata",
        }
    }
}

impl fmt::Display for UseCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UseCase {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UseCase::ALL
            .into_iter()
            .find(|use_case| use_case.as_str() == s)
            .ok_or_else(|| UnknownValue::new("use case", s, &UseCase::ALL.map(|v| v.as_str())))
    }
}

/// Package manager used for the post-install steps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PackageManager {
    Npm,
    Pnpm,
    Yarn,
    Bun,
}

impl PackageManager {
    pub const ALL: [PackageManager; 4] = [
        PackageManager::Npm,
        PackageManager::Pnpm,
        PackageManager::Yarn,
        PackageManager::Bun,
    ];

    /// Name of the executable, also the name it is selected by
    pub fn as_str(&self) -> &'static str {
        match self {
            PackageManager::Npm => "npm",
            PackageManager::Pnpm => "pnpm",
            PackageManager::Yarn => "yarn",
            PackageManager::Bun => "bun",
        }
    }

    /// Command line that installs project dependencies
    pub fn install_command(&self) -> String {
        format!("{} install", self.as_str())
    }

    /// Command line that runs a package.json script
    pub fn run_command(&self, script: &str) -> String {
        format!("{} run {}", self.as_str(), script)
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PackageManager {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PackageManager::ALL
            .into_iter()
            .find(|pm| pm.as_str() == s)
            .ok_or_else(|| {
                UnknownValue::new(
                    "package manager",
                    s,
                    &PackageManager::ALL.map(|v| v.as_str()),
                )
            })
    }
}
