// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Content checks that gate individual transitions.
//!
//! Unlike transition validation, requirement validation accumulates every
//! failure so callers can present a complete list of fixes.

use crate::error::DomainError;
use crate::transitions::StateTransition;
use crate::types::{PdrData, is_blank};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The outcome of a validation pass.
///
/// `is_valid` is true exactly when `errors` is empty. The fields are
/// private so the two cannot disagree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    is_valid: bool,
    errors: Vec<String>,
}

impl ValidationResult {
    /// A passing result.
    #[must_use]
    pub const fn valid() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
        }
    }

    /// Builds a result from collected error messages.
    #[must_use]
    pub fn from_errors(errors: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }

    /// Returns true if no errors were collected.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.is_valid
    }

    /// Returns the collected error messages.
    #[must_use]
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Consumes the result, returning the error messages.
    #[must_use]
    pub fn into_errors(self) -> Vec<String> {
        self.errors
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::valid()
    }
}

/// A named content check a transition may require.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValidationField {
    /// At least one goal, each with a title and description.
    #[serde(rename = "goals")]
    Goals,
    /// At least one behavior, each with a description.
    #[serde(rename = "behaviors")]
    Behaviors,
    /// CEO feedback recorded on at least one behavior.
    #[serde(rename = "ceoFields")]
    CeoFields,
}

impl ValidationField {
    /// Returns the wire name of the field.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Goals => "goals",
            Self::Behaviors => "behaviors",
            Self::CeoFields => "ceoFields",
        }
    }
}

impl FromStr for ValidationField {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "goals" => Ok(Self::Goals),
            "behaviors" => Ok(Self::Behaviors),
            "ceoFields" => Ok(Self::CeoFields),
            _ => Err(DomainError::InvalidValidationField(s.to_string())),
        }
    }
}

impl std::fmt::Display for ValidationField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

fn check_goals(data: &PdrData, errors: &mut Vec<String>) {
    if data.goals.is_empty() {
        errors.push(String::from("At least one goal is required"));
        return;
    }

    let missing_titles: usize = data
        .goals
        .iter()
        .filter(|goal| is_blank(Some(&goal.title)))
        .count();
    if missing_titles > 0 {
        errors.push(format!("{missing_titles} goal(s) missing a title"));
    }

    let missing_descriptions: usize = data
        .goals
        .iter()
        .filter(|goal| is_blank(Some(&goal.description)))
        .count();
    if missing_descriptions > 0 {
        errors.push(format!("{missing_descriptions} goal(s) missing a description"));
    }
}

// Self-assessment is not checked here.
fn check_behaviors(data: &PdrData, errors: &mut Vec<String>) {
    if data.behaviors.is_empty() {
        errors.push(String::from("At least one behavior is required"));
        return;
    }

    let missing_descriptions: usize = data
        .behaviors
        .iter()
        .filter(|behavior| is_blank(Some(&behavior.description)))
        .count();
    if missing_descriptions > 0 {
        errors.push(format!(
            "{missing_descriptions} behavior(s) missing a description"
        ));
    }
}

fn check_ceo_fields(data: &PdrData, errors: &mut Vec<String>) {
    let has_feedback: bool = data
        .behaviors
        .iter()
        .any(|behavior| !is_blank(behavior.ceo_comments.as_deref()));
    if !has_feedback {
        errors.push(String::from(
            "CEO comments are required on at least one behavior",
        ));
    }
}

fn check_field(data: &PdrData, field: ValidationField, errors: &mut Vec<String>) {
    match field {
        ValidationField::Goals => check_goals(data, errors),
        ValidationField::Behaviors => check_behaviors(data, errors),
        ValidationField::CeoFields => check_ceo_fields(data, errors),
    }
}

/// Checks PDR content against the requirements of a transition.
///
/// Transitions that do not require validation always pass.
///
/// # Arguments
///
/// * `data` - The in-flight PDR content
/// * `transition` - The transition being attempted
#[must_use]
pub fn validate_transition_requirements(
    data: &PdrData,
    transition: &StateTransition,
) -> ValidationResult {
    if !transition.requires_validation {
        return ValidationResult::valid();
    }

    let mut errors: Vec<String> = Vec::new();
    for field in transition.validation_fields {
        check_field(data, *field, &mut errors);
    }
    ValidationResult::from_errors(errors)
}

/// Checks PDR content against requirements named by string.
///
/// Unrecognized names are reported as errors rather than skipped, and are
/// accumulated with the failures of the recognized fields.
#[must_use]
pub fn validate_named_requirements(data: &PdrData, field_names: &[&str]) -> ValidationResult {
    let mut errors: Vec<String> = Vec::new();
    for name in field_names {
        match name.parse::<ValidationField>() {
            Ok(field) => check_field(data, field, &mut errors),
            Err(err) => errors.push(err.to_string()),
        }
    }
    ValidationResult::from_errors(errors)
}

/// Longest accepted free-text field, in characters.
pub const MAX_TEXT_LENGTH: usize = 2000;

fn check_length(label: &str, index: usize, text: Option<&str>) -> Result<(), DomainError> {
    match text {
        Some(text) if text.chars().count() > MAX_TEXT_LENGTH => {
            Err(DomainError::InvalidContent(format!(
                "{label} {index} exceeds {MAX_TEXT_LENGTH} characters"
            )))
        }
        _ => Ok(()),
    }
}

/// Checks that every free-text field fits within [`MAX_TEXT_LENGTH`].
///
/// # Errors
///
/// Returns `DomainError::InvalidContent` naming the first oversized field.
pub fn validate_content_limits(data: &PdrData) -> Result<(), DomainError> {
    for (index, goal) in data.goals.iter().enumerate() {
        check_length("goal title", index, Some(&goal.title))?;
        check_length("goal description", index, Some(&goal.description))?;
        check_length("goal comments", index, goal.ceo_comments.as_deref())?;
    }
    for (index, behavior) in data.behaviors.iter().enumerate() {
        check_length("behavior description", index, Some(&behavior.description))?;
        check_length(
            "behavior self-assessment",
            index,
            behavior.self_assessment.as_deref(),
        )?;
        check_length("behavior comments", index, behavior.ceo_comments.as_deref())?;
    }
    Ok(())
}
