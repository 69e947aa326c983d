//! Business compatibility rules applied to a resolved [`Context`]

use super::matrix;
use crate::config::axes::{Framework, Sdk, UseCase};
use crate::config::Context;
use std::fmt;

/// Classification of a rejected combination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncompatibilityKind {
    /// The SDK does not support the chosen framework
    Incompatible,
    /// zkLogin was requested outside mysten + react
    ZkLoginRequirement,
    /// The use case needs a UI framework
    RequiresUiFramework,
    /// The use case is planned but not available yet
    Planned,
    /// The SDK does not support the chosen use case
    UnsupportedUseCase,
}

/// A rejected combination with a remediation hint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Incompatibility {
    pub kind: IncompatibilityKind,
    pub error: String,
    pub suggestion: String,
}

impl fmt::Display for Incompatibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.error, self.suggestion)
    }
}

/// Outcome of compatibility validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    Valid,
    Invalid(Incompatibility),
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        matches!(self, Validation::Valid)
    }

    fn reject(
        kind: IncompatibilityKind,
        error: impl Into<String>,
        suggestion: impl Into<String>,
    ) -> Self {
        Validation::Invalid(Incompatibility {
            kind,
            error: error.into(),
            suggestion: suggestion.into(),
        })
    }
}

/// The stable SDK, the only one allowed with every framework
pub const PRIMARY_SDK: Sdk = Sdk::Mysten;

/// The framework every SDK supports and every UI use case needs
pub const UI_FRAMEWORK: Framework = Framework::React;

/// Apply the compatibility rules in order; the first failing rule wins
pub fn validate(context: &Context) -> Validation {
    let sdk = context.sdk();
    let framework = context.framework();
    let use_case = context.use_case();
    let row = matrix::row(sdk);

    if !row.allows_framework(framework) {
        return Validation::reject(
            IncompatibilityKind::Incompatible,
            format!(
                "SDK \"{}\" is incompatible with framework \"{}\".",
                sdk, framework
            ),
            format!("Compatible frameworks for {}: {}", sdk, row.framework_names()),
        );
    }

    if context.use_zk_login() && (sdk != PRIMARY_SDK || framework != UI_FRAMEWORK) {
        return Validation::reject(
            IncompatibilityKind::ZkLoginRequirement,
            format!(
                "zkLogin (Enoki) requires \"{}\" SDK and \"{}\" framework.",
                PRIMARY_SDK, UI_FRAMEWORK
            ),
            format!(
                "Please select \"{}\" SDK and \"{}\" framework to use zkLogin.",
                PRIMARY_SDK, UI_FRAMEWORK
            ),
        );
    }

    if use_case == UseCase::Gallery && framework != UI_FRAMEWORK {
        return Validation::reject(
            IncompatibilityKind::RequiresUiFramework,
            format!(
                "The \"{}\" use case requires a UI framework (currently \"{}\").",
                use_case, UI_FRAMEWORK
            ),
            format!(
                "Please select \"{}\" framework for the {} use case.",
                UI_FRAMEWORK, use_case
            ),
        );
    }

    if use_case == UseCase::DefiNft {
        return Validation::reject(
            IncompatibilityKind::Planned,
            format!("The \"{}\" use case is currently planned.", use_case),
            format!(
                "Please select \"{}\" or \"{}\".",
                UseCase::SimpleUpload,
                UseCase::Gallery
            ),
        );
    }

    if !row.allows_use_case(use_case) {
        return Validation::reject(
            IncompatibilityKind::UnsupportedUseCase,
            format!("SDK \"{}\" does not support use case \"{}\".", sdk, use_case),
            format!("Supported use cases for {}: {}", sdk, row.use_case_names()),
        );
    }

    Validation::Valid
}

/// A single configuration axis, for stability lookups
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Sdk,
    Framework,
    UseCase,
}

/// Whether a single axis value is stable, used for hinting in prompts
pub fn is_stable(axis: Axis, value: &str) -> bool {
    match axis {
        Axis::Sdk => value == PRIMARY_SDK.as_str(),
        Axis::Framework => value == UI_FRAMEWORK.as_str(),
        Axis::UseCase => {
            value == UseCase::SimpleUpload.as_str() || value == UseCase::Gallery.as_str()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(sdk: Sdk, framework: Framework, use_case: UseCase) -> Context {
        Context::fixture(sdk, framework, use_case)
    }

    fn kind(validation: Validation) -> Option<IncompatibilityKind> {
        match validation {
            Validation::Valid => None,
            Validation::Invalid(inc) => Some(inc.kind),
        }
    }

    #[test]
    fn test_primary_react_simple_upload_is_valid() {
        assert!(validate(&ctx(Sdk::Mysten, Framework::React, UseCase::SimpleUpload)).is_valid());
    }

    #[test]
    fn test_gallery_with_tailwind_is_valid() {
        let context = ctx(Sdk::Mysten, Framework::React, UseCase::Gallery)
            .with_features(false, true, false);
        assert!(validate(&context).is_valid());
    }

    #[test]
    fn test_restricted_sdk_sole_combination_is_valid() {
        assert!(validate(&ctx(Sdk::Hibernuts, Framework::React, UseCase::SimpleUpload)).is_valid());
        assert!(validate(&ctx(Sdk::Tusky, Framework::React, UseCase::SimpleUpload)).is_valid());
    }

    #[test]
    fn test_restricted_sdk_with_other_framework_lists_allowed() {
        let result = validate(&ctx(Sdk::Hibernuts, Framework::Vue, UseCase::SimpleUpload));
        match result {
            Validation::Invalid(inc) => {
                assert_eq!(inc.kind, IncompatibilityKind::Incompatible);
                assert!(inc.error.contains("hibernuts"));
                assert!(inc.suggestion.ends_with(": react"));
            }
            Validation::Valid => panic!("expected rejection"),
        }
    }

    #[test]
    fn test_non_primary_sdk_rejects_every_other_framework() {
        for sdk in [Sdk::Tusky, Sdk::Hibernuts] {
            for framework in [Framework::Vue, Framework::PlainTs] {
                for use_case in UseCase::ALL {
                    assert_eq!(
                        kind(validate(&ctx(sdk, framework, use_case))),
                        Some(IncompatibilityKind::Incompatible),
                        "{} + {} + {}",
                        sdk,
                        framework,
                        use_case
                    );
                }
            }
        }
    }

    #[test]
    fn test_zk_login_requires_primary_and_react() {
        let allowed = ctx(Sdk::Mysten, Framework::React, UseCase::SimpleUpload)
            .with_features(false, false, true);
        assert!(validate(&allowed).is_valid());

        let wrong_framework = ctx(Sdk::Mysten, Framework::Vue, UseCase::SimpleUpload)
            .with_features(false, false, true);
        assert_eq!(
            kind(validate(&wrong_framework)),
            Some(IncompatibilityKind::ZkLoginRequirement)
        );

        let wrong_sdk = ctx(Sdk::Tusky, Framework::React, UseCase::SimpleUpload)
            .with_features(false, false, true);
        assert_eq!(
            kind(validate(&wrong_sdk)),
            Some(IncompatibilityKind::ZkLoginRequirement)
        );
    }

    #[test]
    fn test_gallery_requires_ui_framework() {
        for framework in [Framework::Vue, Framework::PlainTs] {
            let result = validate(&ctx(Sdk::Mysten, framework, UseCase::Gallery));
            match result {
                Validation::Invalid(inc) => {
                    assert_eq!(inc.kind, IncompatibilityKind::RequiresUiFramework);
                    assert!(inc.error.contains("requires a UI framework"));
                }
                Validation::Valid => panic!("expected rejection"),
            }
        }
    }

    #[test]
    fn test_defi_nft_is_always_planned() {
        for sdk in Sdk::ALL {
            let result = validate(&ctx(sdk, Framework::React, UseCase::DefiNft));
            match result {
                Validation::Invalid(inc) => {
                    assert_eq!(inc.kind, IncompatibilityKind::Planned);
                    assert!(inc.suggestion.contains("simple-upload"));
                    assert!(inc.suggestion.contains("gallery"));
                }
                Validation::Valid => panic!("expected rejection for {}", sdk),
            }
        }
        assert_eq!(
            kind(validate(&ctx(Sdk::Mysten, Framework::PlainTs, UseCase::DefiNft))),
            Some(IncompatibilityKind::Planned)
        );
    }

    #[test]
    fn test_matrix_use_case_row_is_enforced() {
        assert_eq!(
            kind(validate(&ctx(Sdk::Hibernuts, Framework::React, UseCase::Gallery))),
            Some(IncompatibilityKind::UnsupportedUseCase)
        );
        assert!(validate(&ctx(Sdk::Tusky, Framework::React, UseCase::Gallery)).is_valid());
    }

    #[test]
    fn test_rule_order_framework_before_use_case() {
        // vue + gallery under a restricted SDK reports the framework first
        assert_eq!(
            kind(validate(&ctx(Sdk::Tusky, Framework::Vue, UseCase::Gallery))),
            Some(IncompatibilityKind::Incompatible)
        );
    }

    #[test]
    fn test_is_stable_table() {
        assert!(is_stable(Axis::Sdk, "mysten"));
        assert!(!is_stable(Axis::Sdk, "tusky"));
        assert!(is_stable(Axis::Framework, "react"));
        assert!(!is_stable(Axis::Framework, "vue"));
        assert!(is_stable(Axis::UseCase, "simple-upload"));
        assert!(is_stable(Axis::UseCase, "gallery"));
        assert!(!is_stable(Axis::UseCase, "defi-nft"));
        assert!(!is_stable(Axis::UseCase, "unknown"));
    }

    #[test]
    fn test_is_stable_agrees_with_validator() {
        // Each axis value combined with the stable values of the other axes
        for sdk in Sdk::ALL {
            let accepted = validate(&ctx(sdk, Framework::React, UseCase::SimpleUpload)).is_valid();
            if is_stable(Axis::Sdk, sdk.as_str()) {
                assert!(accepted, "stable sdk {} must be accepted", sdk);
            }
        }
        for framework in Framework::ALL {
            let accepted =
                validate(&ctx(Sdk::Mysten, framework, UseCase::SimpleUpload)).is_valid();
            if is_stable(Axis::Framework, framework.as_str()) {
                assert!(accepted, "stable framework {} must be accepted", framework);
            }
        }
        for use_case in UseCase::ALL {
            let accepted = validate(&ctx(Sdk::Mysten, Framework::React, use_case)).is_valid();
            assert_eq!(
                accepted,
                is_stable(Axis::UseCase, use_case.as_str()),
                "use case {}",
                use_case
            );
        }
    }
}
