//! Static compatibility table between SDKs, frameworks and use cases

use crate::config::axes::{Framework, Sdk, UseCase};

/// Frameworks and use cases one SDK can be combined with, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatrixRow {
    pub frameworks: &'static [Framework],
    pub use_cases: &'static [UseCase],
}

impl MatrixRow {
    pub fn allows_framework(&self, framework: Framework) -> bool {
        self.frameworks.contains(&framework)
    }

    pub fn allows_use_case(&self, use_case: UseCase) -> bool {
        self.use_cases.contains(&use_case)
    }

    pub fn framework_names(&self) -> String {
        join(self.frameworks.iter().map(Framework::as_str))
    }

    pub fn use_case_names(&self) -> String {
        join(self.use_cases.iter().map(UseCase::as_str))
    }
}

fn join<'a>(names: impl Iterator<Item = &'a str>) -> String {
    names.collect::<Vec<_>>().join(", ")
}

const MYSTEN: MatrixRow = MatrixRow {
    frameworks: &[Framework::React, Framework::Vue, Framework::PlainTs],
    use_cases: &[UseCase::SimpleUpload, UseCase::Gallery, UseCase::DefiNft],
};

// Non-primary SDKs only ship React templates for now
const TUSKY: MatrixRow = MatrixRow {
    frameworks: &[Framework::React],
    use_cases: &[UseCase::SimpleUpload, UseCase::Gallery],
};

const HIBERNUTS: MatrixRow = MatrixRow {
    frameworks: &[Framework::React],
    use_cases: &[UseCase::SimpleUpload],
};

/// Look up the compatibility row for an SDK
pub fn row(sdk: Sdk) -> &'static MatrixRow {
    match sdk {
        Sdk::Mysten => &MYSTEN,
        Sdk::Tusky => &TUSKY,
        Sdk::Hibernuts => &HIBERNUTS,
    }
}
