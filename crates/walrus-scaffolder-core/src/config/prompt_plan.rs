//! Decision table for interactive questions
//!
//! Questions are asked in a fixed order. A question is skipped when its field
//! is already resolved (by an argument or an earlier answer) or when its
//! precondition on earlier fields does not hold. Choice lists are derived from
//! the compatibility matrix row of the SDK resolved so far.

use super::axes::{Framework, Sdk, UseCase};
use super::context::{PartialConfig, RawValue};
use crate::compat::{self, Axis};

pub const DEFAULT_PROJECT_NAME: &str = "my-walrus-app";

/// Fields that can be gathered interactively, in asking order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptField {
    ProjectName,
    Sdk,
    Framework,
    UseCase,
    ZkLogin,
    Analytics,
    Tailwind,
}

impl PromptField {
    pub const ORDER: [PromptField; 7] = [
        PromptField::ProjectName,
        PromptField::Sdk,
        PromptField::Framework,
        PromptField::UseCase,
        PromptField::ZkLogin,
        PromptField::Analytics,
        PromptField::Tailwind,
    ];
}

/// One selectable option
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub value: &'static str,
    pub label: String,
    pub hint: &'static str,
}

/// A question to put to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompt {
    Text {
        field: PromptField,
        message: &'static str,
        default: &'static str,
    },
    Select {
        field: PromptField,
        message: &'static str,
        choices: Vec<Choice>,
    },
    Confirm {
        field: PromptField,
        message: &'static str,
        default: bool,
    },
}

impl Prompt {
    pub fn field(&self) -> PromptField {
        match self {
            Prompt::Text { field, .. } | Prompt::Select { field, .. } | Prompt::Confirm { field, .. } => {
                *field
            }
        }
    }
}

/// A user's reply to a [`Prompt`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Text(String),
    Flag(bool),
}

/// Walks [`PromptField::ORDER`] once, yielding only the questions still needed
#[derive(Debug, Clone)]
pub struct PromptPlan {
    explicit: PartialConfig,
    answers: PartialConfig,
    cursor: usize,
}

impl PromptPlan {
    pub fn new(explicit: PartialConfig) -> Self {
        Self {
            explicit,
            answers: PartialConfig::default(),
            cursor: 0,
        }
    }

    /// Next question to ask, or `None` once every field has been evaluated
    pub fn next_prompt(&mut self) -> Option<Prompt> {
        while let Some(field) = PromptField::ORDER.get(self.cursor).copied() {
            self.cursor += 1;
            let resolved = self.explicit.merged_over(&self.answers);
            if is_resolved(field, &resolved) || !applies(field, &resolved) {
                continue;
            }
            return Some(build_prompt(field, &resolved));
        }
        None
    }

    /// Store the answer to a question returned by [`PromptPlan::next_prompt`]
    pub fn record(&mut self, field: PromptField, answer: Answer) {
        let answers = &mut self.answers;
        match (field, answer) {
            (PromptField::ProjectName, Answer::Text(v)) => answers.project_name = Some(v),
            (PromptField::Sdk, Answer::Text(v)) => answers.sdk = Some(v),
            (PromptField::Framework, Answer::Text(v)) => answers.framework = Some(v),
            (PromptField::UseCase, Answer::Text(v)) => answers.use_case = Some(v),
            (PromptField::ZkLogin, Answer::Flag(b)) => answers.use_zk_login = Some(b.into()),
            (PromptField::Analytics, Answer::Flag(b)) => answers.analytics = Some(b.into()),
            (PromptField::Tailwind, Answer::Flag(b)) => answers.tailwind = Some(b.into()),
            (field, answer) => {
                tracing::warn!(?field, ?answer, "answer type does not match prompt, ignored");
            }
        }
    }

    /// The interactively gathered source, without the explicit values
    pub fn into_answers(self) -> PartialConfig {
        self.answers
    }
}

fn is_resolved(field: PromptField, config: &PartialConfig) -> bool {
    let flag = |v: &Option<RawValue>| v.is_some();
    match field {
        PromptField::ProjectName => config.project_name.is_some(),
        PromptField::Sdk => config.sdk.is_some(),
        PromptField::Framework => config.framework.is_some(),
        PromptField::UseCase => config.use_case.is_some(),
        PromptField::ZkLogin => flag(&config.use_zk_login),
        PromptField::Analytics => flag(&config.analytics),
        PromptField::Tailwind => flag(&config.tailwind),
    }
}

fn resolved_sdk(config: &PartialConfig) -> Option<Sdk> {
    config.sdk.as_deref().and_then(|s| s.parse().ok())
}

fn resolved_framework(config: &PartialConfig) -> Option<Framework> {
    config.framework.as_deref().and_then(|s| s.parse().ok())
}

/// Preconditions on earlier fields
fn applies(field: PromptField, config: &PartialConfig) -> bool {
    match field {
        PromptField::ZkLogin => {
            resolved_sdk(config) == Some(compat::PRIMARY_SDK)
                && resolved_framework(config) == Some(compat::UI_FRAMEWORK)
        }
        _ => true,
    }
}

fn build_prompt(field: PromptField, config: &PartialConfig) -> Prompt {
    match field {
        PromptField::ProjectName => Prompt::Text {
            field,
            message: "Project name:",
            default: DEFAULT_PROJECT_NAME,
        },
        PromptField::Sdk => Prompt::Select {
            field,
            message: "Choose Walrus SDK:",
            choices: Sdk::ALL
                .iter()
                .map(|sdk| Choice {
                    value: sdk.as_str(),
                    label: format!("{} - {}", sdk.package_name(), sdk.description()),
                    hint: stability_hint(Axis::Sdk, sdk.as_str()),
                })
                .collect(),
        },
        PromptField::Framework => {
            let frameworks: &[Framework] = match resolved_sdk(config) {
                Some(sdk) => compat::row(sdk).frameworks,
                None => &Framework::ALL,
            };
            Prompt::Select {
                field,
                message: "Choose framework:",
                choices: frameworks
                    .iter()
                    .map(|f| Choice {
                        value: f.as_str(),
                        label: f.label().to_string(),
                        hint: stability_hint(Axis::Framework, f.as_str()),
                    })
                    .collect(),
            }
        }
        PromptField::UseCase => {
            let use_cases: &[UseCase] = match resolved_sdk(config) {
                Some(sdk) => compat::row(sdk).use_cases,
                None => &UseCase::ALL,
            };
            Prompt::Select {
                field,
                message: "Choose use case:",
                choices: use_cases
                    .iter()
                    .map(|u| Choice {
                        value: u.as_str(),
                        label: u.label().to_string(),
                        hint: stability_hint(Axis::UseCase, u.as_str()),
                    })
                    .collect(),
            }
        }
        PromptField::ZkLogin => Prompt::Confirm {
            field,
            message: "Use zkLogin (Enoki) authentication?",
            default: false,
        },
        PromptField::Analytics => Prompt::Confirm {
            field,
            message: "Include Blockberry analytics?",
            default: false,
        },
        PromptField::Tailwind => Prompt::Confirm {
            field,
            message: "Include Tailwind CSS?",
            default: true,
        },
    }
}

fn stability_hint(axis: Axis, value: &str) -> &'static str {
    if compat::is_stable(axis, value) {
        ""
    } else if axis == Axis::UseCase {
        "planned"
    } else {
        "experimental"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(plan: &mut PromptPlan) -> Vec<PromptField> {
        let mut fields = Vec::new();
        while let Some(prompt) = plan.next_prompt() {
            fields.push(prompt.field());
        }
        fields
    }

    #[test]
    fn test_asks_everything_when_nothing_given() {
        let mut plan = PromptPlan::new(PartialConfig::default());
        let mut asked = Vec::new();

        while let Some(prompt) = plan.next_prompt() {
            asked.push(prompt.field());
            let answer = match prompt.field() {
                PromptField::ProjectName => Answer::Text("demo".into()),
                PromptField::Sdk => Answer::Text("mysten".into()),
                PromptField::Framework => Answer::Text("react".into()),
                PromptField::UseCase => Answer::Text("gallery".into()),
                _ => Answer::Flag(true),
            };
            plan.record(prompt.field(), answer);
        }

        assert_eq!(asked, PromptField::ORDER.to_vec());
        let answers = plan.into_answers();
        assert_eq!(answers.use_case.as_deref(), Some("gallery"));
        assert_eq!(answers.tailwind, Some(RawValue::Bool(true)));
    }

    #[test]
    fn test_skips_fields_supplied_as_arguments() {
        let explicit = PartialConfig {
            project_name: Some("given".into()),
            sdk: Some("mysten".into()),
            tailwind: Some(false.into()),
            ..Default::default()
        };
        let mut plan = PromptPlan::new(explicit);
        let first = plan.next_prompt().unwrap();
        assert_eq!(first.field(), PromptField::Framework);
    }

    #[test]
    fn test_framework_choices_follow_sdk_row() {
        let explicit = PartialConfig {
            project_name: Some("given".into()),
            sdk: Some("hibernuts".into()),
            ..Default::default()
        };
        let mut plan = PromptPlan::new(explicit);

        match plan.next_prompt().unwrap() {
            Prompt::Select { field, choices, .. } => {
                assert_eq!(field, PromptField::Framework);
                let values: Vec<_> = choices.iter().map(|c| c.value).collect();
                assert_eq!(values, vec!["react"]);
            }
            other => panic!("unexpected prompt {:?}", other),
        }
        plan.record(PromptField::Framework, Answer::Text("react".into()));

        match plan.next_prompt().unwrap() {
            Prompt::Select { choices, .. } => {
                let values: Vec<_> = choices.iter().map(|c| c.value).collect();
                assert_eq!(values, vec!["simple-upload"]);
            }
            other => panic!("unexpected prompt {:?}", other),
        }
    }

    #[test]
    fn test_zk_login_only_offered_for_primary_react() {
        let explicit = PartialConfig {
            project_name: Some("given".into()),
            sdk: Some("tusky".into()),
            framework: Some("react".into()),
            use_case: Some("simple-upload".into()),
            ..Default::default()
        };
        let fields = drain(&mut PromptPlan::new(explicit));
        assert_eq!(fields, vec![PromptField::Analytics, PromptField::Tailwind]);

        let explicit = PartialConfig {
            project_name: Some("given".into()),
            sdk: Some("mysten".into()),
            framework: Some("react".into()),
            use_case: Some("simple-upload".into()),
            ..Default::default()
        };
        let fields = drain(&mut PromptPlan::new(explicit));
        assert_eq!(
            fields,
            vec![PromptField::ZkLogin, PromptField::Analytics, PromptField::Tailwind]
        );
    }

    #[test]
    fn test_each_field_evaluated_once() {
        let mut plan = PromptPlan::new(PartialConfig::default());
        let first = plan.next_prompt().unwrap();
        assert_eq!(first.field(), PromptField::ProjectName);
        // Leaving a question unanswered does not make it come back
        let second = plan.next_prompt().unwrap();
        assert_eq!(second.field(), PromptField::Sdk);
    }

    #[test]
    fn test_hints_mark_unstable_values() {
        let explicit = PartialConfig {
            project_name: Some("given".into()),
            ..Default::default()
        };
        let mut plan = PromptPlan::new(explicit);
        match plan.next_prompt().unwrap() {
            Prompt::Select { choices, .. } => {
                assert_eq!(choices[0].hint, "");
                assert_eq!(choices[1].hint, "experimental");
            }
            other => panic!("unexpected prompt {:?}", other),
        }
    }
}
