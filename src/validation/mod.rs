//! Regulatory compliance validation for evaluation records.
//!
//! Validation is total: it never fails and never panics, it only reports.
//! Every rule produces zero or more [`ValidationError`] findings, each tagged
//! with a severity and, where one exists, the governing regulation reference.
//! Errors block submission; warnings flag items a reviewer should confirm.

mod content;
mod rules;

pub use content::check_prohibited_content;
pub use rules::{
    validate_date_format, validate_dodid, validate_duty_description, validate_fitness,
    validate_military_email, validate_period, validate_personnel, validate_profile_limits,
    validate_rating_chain, validate_senior_rater, validate_uic,
};

use crate::record::EvaluationRecord;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How severe a finding is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Blocks submission
    Error,
    /// Needs reviewer attention but does not block
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// A single compliance finding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Dotted path of the offending field, e.g. `rated_personnel.dodid`
    pub field: String,
    /// Human-readable description of the problem
    pub message: String,
    /// Finding severity
    pub severity: Severity,
    /// Governing regulation reference, when one applies
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

impl ValidationError {
    /// A finding without a regulation reference.
    pub fn new(field: impl Into<String>, message: impl Into<String>, severity: Severity) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            severity,
            reference: None,
        }
    }

    /// Attach the governing regulation reference.
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }
}

/// Outcome of validating a record: findings split by severity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// True exactly when `errors` is empty
    pub is_valid: bool,
    /// Blocking findings
    pub errors: Vec<ValidationError>,
    /// Non-blocking findings
    pub warnings: Vec<ValidationError>,
}

impl ValidationResult {
    /// Route a finding into the matching bucket and refresh `is_valid`.
    pub fn add_finding(&mut self, finding: ValidationError) {
        match finding.severity {
            Severity::Error => self.errors.push(finding),
            Severity::Warning => self.warnings.push(finding),
        }
        self.is_valid = self.errors.is_empty();
    }

    /// Route a batch of findings.
    pub fn add_findings(&mut self, findings: Vec<ValidationError>) {
        for finding in findings {
            self.add_finding(finding);
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Validate a complete evaluation record against DA Pam 623-3.
///
/// Mandatory sections (personnel, period, reason, rating chain, duty
/// description) produce a single error apiece when absent. Fitness and the
/// senior rater assessment are validated only when present. Narrative text
/// (rater and senior rater comments, enhanced bullets) is scanned for
/// prohibited content.
pub fn validate_evaluation(record: &EvaluationRecord) -> ValidationResult {
    let mut result = ValidationResult {
        is_valid: true,
        ..Default::default()
    };

    match &record.rated_personnel {
        Some(personnel) => result.add_findings(rules::validate_personnel(personnel)),
        None => result.add_finding(ValidationError::new(
            "rated_personnel",
            "Rated personnel information is required",
            Severity::Error,
        )),
    }

    match &record.period_covered {
        Some(period) => result.add_findings(rules::validate_period(period)),
        None => result.add_finding(ValidationError::new(
            "period_covered",
            "Period covered is required",
            Severity::Error,
        )),
    }

    let has_reason = record
        .reason_for_submission
        .as_ref()
        .is_some_and(|r| !r.code.trim().is_empty());
    if !has_reason {
        result.add_finding(
            ValidationError::new(
                "reason_for_submission",
                "Reason for submission is required",
                Severity::Error,
            )
            .with_reference("DA Pam 623-3, Part I, Block i"),
        );
    }

    match &record.rating_chain {
        Some(chain) => result.add_findings(rules::validate_rating_chain(
            chain,
            record.evaluation_type,
            record.rank_level,
        )),
        None => result.add_finding(ValidationError::new(
            "rating_chain",
            "Rating chain is required",
            Severity::Error,
        )),
    }

    match &record.duty_description {
        Some(duty) => result.add_findings(rules::validate_duty_description(duty)),
        None => result.add_finding(ValidationError::new(
            "duty_description",
            "Duty description is required",
            Severity::Error,
        )),
    }

    if let (Some(fitness), Some(period)) = (&record.fitness, &record.period_covered) {
        result.add_findings(rules::validate_fitness(fitness, period));
    }

    if let Some(assessment) = &record.senior_rater_assessment {
        result.add_findings(rules::validate_senior_rater(
            assessment,
            record.evaluation_type,
            record.rank_level,
        ));
    }

    if let Some(comments) = &record.rater_comments {
        result.add_findings(content::check_prohibited_content(comments, "rater_comments"));
    }
    if let Some(comments) = &record.senior_rater_comments {
        result.add_findings(content::check_prohibited_content(
            comments,
            "senior_rater_comments",
        ));
    }
    for (i, bullet) in record.bullets.iter().enumerate() {
        result.add_findings(content::check_prohibited_content(
            &bullet.enhanced,
            &format!("bullets[{}].enhanced", i),
        ));
    }

    debug!(
        "validated {} record: {} errors, {} warnings",
        record.evaluation_type,
        result.errors.len(),
        result.warnings.len()
    );

    result
}
