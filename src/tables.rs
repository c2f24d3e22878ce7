//! Regulatory lookup tables.
//!
//! All tables are initialized once and read-only thereafter. Codes and
//! descriptions follow DA Pam 623-3 (Tables 2-24 and 2-25).

use crate::record::{EvaluationType, RankLevel};
use lazy_static::lazy_static;
use std::collections::HashMap;

/// A submission reason code with its description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReasonCode {
    /// Two-digit code
    pub code: &'static str,
    /// Description as printed on the form
    pub description: &'static str,
}

/// A nonrated time code with its description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NonratedCode {
    /// Single-letter code
    pub code: &'static str,
    /// Description
    pub description: &'static str,
}

const REASON_CODE_LIST: [ReasonCode; 7] = [
    ReasonCode { code: "01", description: "Annual" },
    ReasonCode { code: "02", description: "Change of Rater" },
    ReasonCode { code: "03", description: "Complete the Record" },
    ReasonCode { code: "04", description: "Relief for Cause" },
    ReasonCode { code: "05", description: "60 Day Rater Option" },
    ReasonCode { code: "06", description: "60 Day Senior Rater Option" },
    ReasonCode {
        code: "07",
        description: "Temporary Duty, Special Duty, or Compassionate Reassignment",
    },
];

/// Nonrated time codes per DA Pam 623-3 Table 2-25.
pub const NONRATED_CODES: [NonratedCode; 10] = [
    NonratedCode { code: "A", description: "Absent Without Leave (AWOL)" },
    NonratedCode { code: "B", description: "In Confinement" },
    NonratedCode { code: "C", description: "Hospitalized" },
    NonratedCode { code: "D", description: "Detailed" },
    NonratedCode { code: "E", description: "Extended TDY" },
    NonratedCode { code: "F", description: "In School" },
    NonratedCode { code: "G", description: "Leave" },
    NonratedCode { code: "H", description: "Non-rated time prior to this report" },
    NonratedCode { code: "J", description: "Other" },
    NonratedCode { code: "K", description: "Commander directed non-rated time" },
];

lazy_static! {
    /// Reason for Submission codes per DA Pam 623-3 Table 2-24, keyed by
    /// evaluation type. The two types currently share the same code set but
    /// are keyed separately because the regulation maintains them per form.
    pub static ref REASON_CODES: HashMap<EvaluationType, Vec<ReasonCode>> = {
        let mut m = HashMap::new();
        m.insert(EvaluationType::Oer, REASON_CODE_LIST.to_vec());
        m.insert(EvaluationType::Ncoer, REASON_CODE_LIST.to_vec());
        m
    };

    /// School recommendations appropriate to each rank level.
    pub static ref SCHOOL_RECOMMENDATIONS: HashMap<RankLevel, Vec<&'static str>> = {
        let mut m = HashMap::new();
        m.insert(RankLevel::E5, vec!["BLC", "ALC"]);
        m.insert(
            RankLevel::E6E8,
            vec!["ALC", "SLC", "MLC", "Master Gunner", "Battle Staff"],
        );
        m.insert(RankLevel::E9, vec!["SLC", "SGM Academy", "MLC"]);
        m.insert(
            RankLevel::O1O3,
            vec!["CCC", "Ranger", "Airborne", "Air Assault", "Pathfinder"],
        );
        m.insert(
            RankLevel::O4O5,
            vec!["ILE", "ILE Resident", "CGSC", "SAMS", "Joint School"],
        );
        m.insert(
            RankLevel::O6,
            vec!["SSC", "War College", "JAWS", "Joint PME II", "Defense Strategy Course"],
        );
        m
    };
}

/// Form number for a (type, rank level) pair. Every combination maps to
/// exactly one form.
pub fn form_number(evaluation_type: EvaluationType, rank_level: RankLevel) -> &'static str {
    match evaluation_type {
        EvaluationType::Oer => match rank_level {
            RankLevel::O1O3 => "DA FORM 67-10-1",
            RankLevel::O4O5 => "DA FORM 67-10-2",
            RankLevel::O6 => "DA FORM 67-10-3",
            _ => "DA FORM 67-10-1",
        },
        EvaluationType::Ncoer => match rank_level {
            RankLevel::E5 => "DA FORM 2166-9-1",
            RankLevel::E6E8 => "DA FORM 2166-9-2",
            RankLevel::E9 => "DA FORM 2166-9-3",
            _ => "DA FORM 2166-9-1",
        },
    }
}

/// Report title shown under the form number.
pub fn evaluation_title(evaluation_type: EvaluationType) -> &'static str {
    match evaluation_type {
        EvaluationType::Oer => "OFFICER EVALUATION REPORT",
        EvaluationType::Ncoer => "NCO EVALUATION REPORT",
    }
}

/// Maximum percentage of a senior rater's profile that may carry a
/// Most Qualified check. OER: 49%. NCOER: 21% for SGT, 24% otherwise.
pub fn most_qualified_ceiling(evaluation_type: EvaluationType, rank_level: RankLevel) -> f64 {
    match evaluation_type {
        EvaluationType::Oer => 49.0,
        EvaluationType::Ncoer => {
            if rank_level == RankLevel::E5 {
                21.0
            } else {
                24.0
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_pair_has_a_form_number() {
        let ranks = [
            RankLevel::E5,
            RankLevel::E6E8,
            RankLevel::E9,
            RankLevel::O1O3,
            RankLevel::O4O5,
            RankLevel::O6,
        ];
        for ty in [EvaluationType::Ncoer, EvaluationType::Oer] {
            for rank in ranks {
                assert!(form_number(ty, rank).starts_with("DA FORM"));
            }
        }
    }

    #[test]
    fn test_form_number_selection() {
        assert_eq!(form_number(EvaluationType::Oer, RankLevel::O4O5), "DA FORM 67-10-2");
        assert_eq!(form_number(EvaluationType::Ncoer, RankLevel::E9), "DA FORM 2166-9-3");
        // Cross-type rank falls back to the junior form
        assert_eq!(form_number(EvaluationType::Ncoer, RankLevel::O6), "DA FORM 2166-9-1");
    }

    #[test]
    fn test_most_qualified_ceilings() {
        assert_eq!(most_qualified_ceiling(EvaluationType::Oer, RankLevel::O1O3), 49.0);
        assert_eq!(most_qualified_ceiling(EvaluationType::Ncoer, RankLevel::E5), 21.0);
        assert_eq!(most_qualified_ceiling(EvaluationType::Ncoer, RankLevel::E6E8), 24.0);
    }

    #[test]
    fn test_reason_codes_cover_both_types() {
        assert_eq!(REASON_CODES[&EvaluationType::Oer].len(), 7);
        assert_eq!(REASON_CODES[&EvaluationType::Ncoer][3].description, "Relief for Cause");
    }

    #[test]
    fn test_school_recommendations_per_rank() {
        assert!(SCHOOL_RECOMMENDATIONS[&RankLevel::E5].contains(&"BLC"));
        assert!(SCHOOL_RECOMMENDATIONS[&RankLevel::O6].contains(&"War College"));
    }
}
