//! Input validation for planning requests.
//!
//! Checks structural integrity of the skill list, time parameters, and
//! resource catalog before planning. Detects:
//! - Duplicate skill names (case-insensitive)
//! - Out-of-range focus, confidence, weeks, and hours
//! - Unusable catalog rows
//! - A learning-day pattern with no active days
//!
//! All problems are collected and reported together rather than failing
//! on the first one.

use std::collections::HashSet;

use crate::models::PlanRequest;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two skills share the same name (ignoring case).
    DuplicateSkill,
    /// A numeric field is outside its documented range.
    OutOfRange,
    /// A catalog row cannot be scheduled or scored.
    InvalidCatalogEntry,
    /// The learning-day pattern has no active days.
    NoActiveDays,
}

impl ValidationError {
    /// Creates an error with a category and message.
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a planning request.
///
/// Checks:
/// 1. No duplicate skill names (case-insensitive)
/// 2. Focus weights are non-negative, confidence is within `[0, 1]`
/// 3. `total_weeks` and `weekly_hours` are positive
/// 4. Catalog rows have positive duration, non-negative price, and
///    quality within `[0, 1]`
/// 5. At least one learning day is active
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_request(request: &PlanRequest) -> ValidationResult {
    let mut errors = Vec::new();

    let mut seen = HashSet::new();
    for skill in &request.skills {
        if !seen.insert(skill.key()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateSkill,
                format!("Duplicate skill name: {}", skill.name),
            ));
        }
        if skill.focus < 0.0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::OutOfRange,
                format!("Skill '{}' has negative focus {}", skill.name, skill.focus),
            ));
        }
        if !(0.0..=1.0).contains(&skill.confidence) {
            errors.push(ValidationError::new(
                ValidationErrorKind::OutOfRange,
                format!(
                    "Skill '{}' has confidence {} outside [0, 1]",
                    skill.name, skill.confidence
                ),
            ));
        }
    }

    if request.total_weeks == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::OutOfRange,
            "total_weeks must be at least 1",
        ));
    }
    if request.weekly_hours <= 0.0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::OutOfRange,
            format!("weekly_hours must be positive, got {}", request.weekly_hours),
        ));
    }

    for resource in &request.catalog {
        if resource.duration_hours <= 0.0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidCatalogEntry,
                format!(
                    "Resource '{}' has non-positive duration {}",
                    resource.title, resource.duration_hours
                ),
            ));
        }
        if resource.price < 0.0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidCatalogEntry,
                format!(
                    "Resource '{}' has negative price {}",
                    resource.title, resource.price
                ),
            ));
        }
        if !(0.0..=1.0).contains(&resource.quality) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidCatalogEntry,
                format!(
                    "Resource '{}' has quality {} outside [0, 1]",
                    resource.title, resource.quality
                ),
            ));
        }
    }

    if request.learning_days.active_count() == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::NoActiveDays,
            "No learning days are active",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
