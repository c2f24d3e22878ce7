//! Army evaluation report (NCOER/OER) toolkit.
//!
//! Validates evaluation records against DA Pam 623-3 business rules and
//! exports them in the three formats the submission workflow needs: EES
//! paste-ready text, paginated PDF, and editable DOCX.
//!
//! # Example
//!
//! ```
//! use mileval::record::{EvaluationRecord, EvaluationType, RankLevel};
//! use mileval::validation::validate_evaluation;
//!
//! let record = EvaluationRecord::empty(EvaluationType::Ncoer, RankLevel::E5);
//! let result = validate_evaluation(&record);
//! assert!(!result.is_valid); // mandatory sections are missing
//!
//! let text = mileval::export::generate_ees_text(&record);
//! assert!(text.contains("DA FORM 2166-9-1"));
//! ```

pub mod dates;
pub mod error;
pub mod export;
pub mod record;
pub mod tables;
pub mod validation;

pub use error::{Error, Result};
pub use record::EvaluationRecord;
pub use validation::{validate_evaluation, ValidationResult};

/// Library version from Cargo.toml.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
