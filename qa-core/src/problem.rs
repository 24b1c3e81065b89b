//! Problem: a single question posed to the user, its answer form and (optional) answer.
//!
//! Answers and defaults are JSON-shaped values: a string for input/select/password forms,
//! a list of strings for multi-select and a bool for confirm.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{QaError, Result};
use crate::matcher::{DefaultMatcher, ProblemMatcher};

/// Answer form of a problem. Serialized with the variant name (e.g. `MultiSelect`).
///
/// Records stored without a form read back as `Input`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SolutionFormType {
    Select,
    MultiSelect,
    #[default]
    Input,
    MultiLineInput,
    Confirm,
    Password,
}

impl SolutionFormType {
    pub fn is_password(self) -> bool {
        matches!(self, SolutionFormType::Password)
    }
}

/// A question with identity, description, answer form and optional resolution.
///
/// `answer` absent means unresolved. Only resolved problems (solutions) are cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Problem {
    pub id: String,
    #[serde(rename = "type", default)]
    pub form: SolutionFormType,
    #[serde(rename = "description", default)]
    pub desc: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hints: Vec<String>,
    /// Choices for select / multi-select forms.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<Value>,
}

impl Problem {
    fn with_form(id: impl Into<String>, desc: impl Into<String>, form: SolutionFormType) -> Self {
        Self {
            id: id.into(),
            form,
            desc: desc.into(),
            hints: Vec::new(),
            options: Vec::new(),
            default: None,
            answer: None,
        }
    }

    /// Single-line free text question.
    pub fn input(id: impl Into<String>, desc: impl Into<String>) -> Self {
        Self::with_form(id, desc, SolutionFormType::Input)
    }

    pub fn multiline_input(id: impl Into<String>, desc: impl Into<String>) -> Self {
        Self::with_form(id, desc, SolutionFormType::MultiLineInput)
    }

    /// Pick exactly one of `options`.
    pub fn select(id: impl Into<String>, desc: impl Into<String>, options: Vec<String>) -> Self {
        Self {
            options,
            ..Self::with_form(id, desc, SolutionFormType::Select)
        }
    }

    /// Pick any subset of `options`.
    pub fn multi_select(
        id: impl Into<String>,
        desc: impl Into<String>,
        options: Vec<String>,
    ) -> Self {
        Self {
            options,
            ..Self::with_form(id, desc, SolutionFormType::MultiSelect)
        }
    }

    /// Yes / no question.
    pub fn confirm(id: impl Into<String>, desc: impl Into<String>) -> Self {
        Self::with_form(id, desc, SolutionFormType::Confirm)
    }

    /// Secret input. Cached only when the cache allows password persistence.
    pub fn password(id: impl Into<String>, desc: impl Into<String>) -> Self {
        Self::with_form(id, desc, SolutionFormType::Password)
    }

    pub fn with_hints(mut self, hints: Vec<String>) -> Self {
        self.hints = hints;
        self
    }

    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn is_resolved(&self) -> bool {
        self.answer.is_some()
    }

    /// Validates `answer` against the form and stores it.
    pub fn set_answer(&mut self, answer: impl Into<Value>) -> Result<()> {
        let answer = answer.into();
        self.validate_answer(&answer)?;
        self.answer = Some(answer);
        Ok(())
    }

    /// Checks that `answer` has the shape the form expects. Options are only enforced when the
    /// problem lists some.
    pub fn validate_answer(&self, answer: &Value) -> Result<()> {
        match self.form {
            SolutionFormType::Select => {
                let choice = answer
                    .as_str()
                    .ok_or_else(|| self.invalid("expected a string"))?;
                self.check_option(choice)
            }
            SolutionFormType::MultiSelect => {
                let choices = answer
                    .as_array()
                    .ok_or_else(|| self.invalid("expected a list of strings"))?;
                for choice in choices {
                    let choice = choice
                        .as_str()
                        .ok_or_else(|| self.invalid("expected a list of strings"))?;
                    self.check_option(choice)?;
                }
                Ok(())
            }
            SolutionFormType::Input
            | SolutionFormType::MultiLineInput
            | SolutionFormType::Password => {
                if answer.is_string() {
                    Ok(())
                } else {
                    Err(self.invalid("expected a string"))
                }
            }
            SolutionFormType::Confirm => {
                if answer.is_boolean() {
                    Ok(())
                } else {
                    Err(self.invalid("expected a bool"))
                }
            }
        }
    }

    fn check_option(&self, choice: &str) -> Result<()> {
        if self.options.is_empty() || self.options.iter().any(|o| o == choice) {
            Ok(())
        } else {
            Err(self.invalid(&format!("{} is not one of {:?}", choice, self.options)))
        }
    }

    fn invalid(&self, reason: &str) -> QaError {
        QaError::InvalidAnswer {
            id: self.id.clone(),
            reason: reason.to_string(),
        }
    }

    fn resolved_answer(&self) -> Result<&Value> {
        self.answer
            .as_ref()
            .ok_or_else(|| QaError::Unresolved(self.id.clone()))
    }

    pub fn answer_as_string(&self) -> Result<String> {
        self.resolved_answer()?
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| QaError::AnswerType {
                id: self.id.clone(),
                expected: "string",
            })
    }

    pub fn answer_as_strings(&self) -> Result<Vec<String>> {
        let err = || QaError::AnswerType {
            id: self.id.clone(),
            expected: "list of strings",
        };
        self.resolved_answer()?
            .as_array()
            .ok_or_else(err)?
            .iter()
            .map(|v| v.as_str().map(str::to_string).ok_or_else(err))
            .collect()
    }

    pub fn answer_as_bool(&self) -> Result<bool> {
        self.resolved_answer()?
            .as_bool()
            .ok_or_else(|| QaError::AnswerType {
                id: self.id.clone(),
                expected: "bool",
            })
    }

    /// Whether `self` and `other` denote the same question under [`DefaultMatcher`].
    pub fn matches(&self, other: &Problem) -> bool {
        DefaultMatcher.matches(self, other)
    }
}
