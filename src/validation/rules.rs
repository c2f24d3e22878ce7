//! Per-section validation rules.
//!
//! Each rule is a pure function from a record section to findings. Field
//! checks and regulation references follow DA Pam 623-3; severities match
//! how EES treats the same conditions (hard rejects vs reviewer flags).

use super::{Severity, ValidationError};
use crate::dates;
use crate::record::{
    AcftStatus, DutyDescription, EvaluationType, FitnessData, PeriodCovered, PotentialRating,
    RankLevel, RatedPersonnel, RatingChain, SeniorRaterAssessment,
};
use crate::tables::most_qualified_ceiling;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref MILITARY_EMAIL: Regex =
        Regex::new(r"(?i)^[^\s@]+@[^\s@]+\.(gov|mil)$").unwrap();
}

/// DODID must be exactly 10 digits once separators are stripped.
pub fn validate_dodid(dodid: &str) -> Option<ValidationError> {
    let reference = "DA Pam 623-3, Part I, Block b";
    if dodid.is_empty() {
        return Some(
            ValidationError::new("rated_personnel.dodid", "DODID is required", Severity::Error)
                .with_reference(reference),
        );
    }

    let digits = dodid.chars().filter(|c| c.is_ascii_digit()).count();
    if digits != 10 {
        return Some(
            ValidationError::new(
                "rated_personnel.dodid",
                "DODID must be exactly 10 digits",
                Severity::Error,
            )
            .with_reference(reference),
        );
    }

    None
}

/// UIC must be exactly 6 alphanumeric characters, case-insensitive.
pub fn validate_uic(uic: &str) -> Option<ValidationError> {
    let reference = "DA Pam 623-3, Part I, Block h";
    if uic.is_empty() {
        return Some(
            ValidationError::new("rated_personnel.uic", "UIC is required", Severity::Error)
                .with_reference(reference),
        );
    }

    let alnum = uic
        .to_uppercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .count();
    if alnum != 6 {
        return Some(
            ValidationError::new(
                "rated_personnel.uic",
                "UIC must be exactly 6 alphanumeric characters",
                Severity::Error,
            )
            .with_reference(reference),
        );
    }

    None
}

/// Email must end in .gov or .mil. Missing is an error; a well-formed
/// address on the wrong domain only warns, since some rating chains hold
/// contractor addresses.
pub fn validate_military_email(email: &str, field: &str) -> Option<ValidationError> {
    if email.is_empty() {
        return Some(ValidationError::new(field, "Email is required", Severity::Error));
    }

    if !MILITARY_EMAIL.is_match(email) {
        return Some(
            ValidationError::new(
                field,
                "Email must be a .gov or .mil address",
                Severity::Warning,
            )
            .with_reference("AR 623-3"),
        );
    }

    None
}

/// Dates must be 8 digits and calendar-valid.
pub fn validate_date_format(date: &str, field: &str) -> Option<ValidationError> {
    if date.is_empty() {
        return Some(ValidationError::new(field, "Date is required", Severity::Error));
    }

    if date.len() != 8 || !date.bytes().all(|b| b.is_ascii_digit()) {
        return Some(ValidationError::new(
            field,
            "Date must be in YYYYMMDD format",
            Severity::Error,
        ));
    }

    if dates::parse_yyyymmdd(date).is_none() {
        return Some(ValidationError::new(field, "Invalid date", Severity::Error));
    }

    None
}

/// Part I rated personnel checks.
pub fn validate_personnel(personnel: &RatedPersonnel) -> Vec<ValidationError> {
    let mut findings = Vec::new();

    if personnel.name.trim().is_empty() {
        findings.push(
            ValidationError::new(
                "rated_personnel.name",
                "Name is required (Last, First MI)",
                Severity::Error,
            )
            .with_reference("DA Pam 623-3, Part I, Block a"),
        );
    }

    if let Some(finding) = validate_dodid(&personnel.dodid) {
        findings.push(finding);
    }

    if personnel.rank.trim().is_empty() {
        findings.push(
            ValidationError::new("rated_personnel.rank", "Rank is required", Severity::Error)
                .with_reference("DA Pam 623-3, Part I, Block c"),
        );
    }

    if validate_date_format(&personnel.date_of_rank, "rated_personnel.date_of_rank").is_some() {
        findings.push(
            ValidationError::new(
                "rated_personnel.date_of_rank",
                "Date of Rank is required (YYYYMMDD)",
                Severity::Error,
            )
            .with_reference("DA Pam 623-3, Part I, Block d"),
        );
    }

    if personnel.pmos_aoc.trim().is_empty() {
        findings.push(
            ValidationError::new(
                "rated_personnel.pmos_aoc",
                "PMOS/AOC is required",
                Severity::Error,
            )
            .with_reference("DA Pam 623-3, Part I, Block d/e"),
        );
    }

    if personnel.unit_org_station.trim().is_empty() {
        findings.push(
            ValidationError::new(
                "rated_personnel.unit_org_station",
                "Unit/Organization/Station is required",
                Severity::Error,
            )
            .with_reference("DA Pam 623-3, Part I, Block g"),
        );
    }

    if let Some(finding) = validate_uic(&personnel.uic) {
        findings.push(finding);
    }

    if let Some(finding) = validate_military_email(&personnel.email, "rated_personnel.email") {
        findings.push(finding);
    }

    findings
}

/// Part I period checks: valid dates, thru after from, 12-month flag.
pub fn validate_period(period: &PeriodCovered) -> Vec<ValidationError> {
    let mut findings = Vec::new();

    let from_bad = validate_date_format(&period.from_date, "period_covered.from_date");
    let thru_bad = validate_date_format(&period.thru_date, "period_covered.thru_date");
    let dates_ok = from_bad.is_none() && thru_bad.is_none();
    findings.extend(from_bad);
    findings.extend(thru_bad);

    if dates_ok {
        let months = dates::rated_months(&period.from_date, &period.thru_date);

        if months > 12 {
            findings.push(
                ValidationError::new(
                    "period_covered",
                    format!(
                        "Rated period exceeds 12 months ({months} months). Extended rating periods require justification."
                    ),
                    Severity::Warning,
                )
                .with_reference("DA Pam 623-3, Part I, Block j"),
            );
        }

        if months < 0 {
            findings.push(
                ValidationError::new(
                    "period_covered",
                    "Thru date must be after From date",
                    Severity::Error,
                )
                .with_reference("DA Pam 623-3, Part I, Block j"),
            );
        }
    }

    findings
}

/// Part II rating chain checks.
pub fn validate_rating_chain(
    chain: &RatingChain,
    evaluation_type: EvaluationType,
    rank_level: RankLevel,
) -> Vec<ValidationError> {
    let mut findings = Vec::new();

    if chain.rater.name.trim().is_empty() {
        findings.push(
            ValidationError::new(
                "rating_chain.rater.name",
                "Rater name is required",
                Severity::Error,
            )
            .with_reference("DA Pam 623-3, Part II"),
        );
    }
    if chain.rater.rank.trim().is_empty() {
        findings.push(ValidationError::new(
            "rating_chain.rater.rank",
            "Rater rank is required",
            Severity::Error,
        ));
    }
    if chain.rater.position.trim().is_empty() {
        findings.push(ValidationError::new(
            "rating_chain.rater.position",
            "Rater duty assignment is required",
            Severity::Error,
        ));
    }
    if let Some(finding) = validate_military_email(&chain.rater.email, "rating_chain.rater.email") {
        findings.push(finding);
    }

    if chain.senior_rater.name.trim().is_empty() {
        findings.push(
            ValidationError::new(
                "rating_chain.senior_rater.name",
                "Senior Rater name is required",
                Severity::Error,
            )
            .with_reference("DA Pam 623-3, Part II"),
        );
    }
    if chain.senior_rater.rank.trim().is_empty() {
        findings.push(ValidationError::new(
            "rating_chain.senior_rater.rank",
            "Senior Rater rank is required",
            Severity::Error,
        ));
    }
    if let Some(finding) =
        validate_military_email(&chain.senior_rater.email, "rating_chain.senior_rater.email")
    {
        findings.push(finding);
    }

    // Field grade OERs frequently route through an intermediate rater;
    // whether one is required is a unit policy call, so only flag it.
    let field_grade = matches!(rank_level, RankLevel::O4O5 | RankLevel::O6);
    if evaluation_type == EvaluationType::Oer
        && field_grade
        && chain.intermediate_rater.is_none()
    {
        findings.push(
            ValidationError::new(
                "rating_chain.intermediate_rater",
                "Consider whether an Intermediate Rater is required for Field Grade OER",
                Severity::Warning,
            )
            .with_reference("DA Pam 623-3, Part II"),
        );
    }

    findings
}

/// Part III duty description checks.
pub fn validate_duty_description(duty: &DutyDescription) -> Vec<ValidationError> {
    let mut findings = Vec::new();

    if duty.principal_duty_title.trim().is_empty() {
        findings.push(
            ValidationError::new(
                "duty_description.principal_duty_title",
                "Principal Duty Title is required",
                Severity::Error,
            )
            .with_reference("DA Pam 623-3, Part III, Block a"),
        );
    }

    if duty.significant_duties.trim().is_empty() {
        findings.push(
            ValidationError::new(
                "duty_description.significant_duties",
                "Significant Duties and Responsibilities are required",
                Severity::Error,
            )
            .with_reference("DA Pam 623-3, Part III, Block c"),
        );
    }

    if duty.counseling_dates.initial.is_empty() {
        findings.push(
            ValidationError::new(
                "duty_description.counseling_dates.initial",
                "Initial counseling date is required",
                Severity::Warning,
            )
            .with_reference("DA Pam 623-3, Part III, Block e"),
        );
    } else if let Some(finding) = validate_date_format(
        &duty.counseling_dates.initial,
        "duty_description.counseling_dates.initial",
    ) {
        findings.push(finding);
    }

    findings
}

/// Part IV fitness checks. The ACFT date must fall inside the rated period.
pub fn validate_fitness(fitness: &FitnessData, period: &PeriodCovered) -> Vec<ValidationError> {
    let mut findings = Vec::new();

    if let Some(acft_date) = &fitness.acft_date {
        if !period.from_date.is_empty()
            && !period.thru_date.is_empty()
            && !dates::is_within_period(acft_date, &period.from_date, &period.thru_date)
        {
            findings.push(
                ValidationError::new(
                    "fitness.acft_date",
                    "ACFT date must fall within the rating period",
                    Severity::Warning,
                )
                .with_reference("DA Pam 623-3, Part IV"),
            );
        }
    }

    if fitness.acft_status == AcftStatus::Fail {
        findings.push(
            ValidationError::new(
                "fitness.acft_status",
                "Comments are required for Failed ACFT",
                Severity::Warning,
            )
            .with_reference("DA Pam 623-3, Part IV"),
        );
    }

    if !fitness.within_standard && fitness.body_fat_required != Some(true) {
        findings.push(
            ValidationError::new(
                "fitness.body_fat_required",
                "DA 5500/5501 (Body Fat Worksheet) may be required when not within HT/WT standard",
                Severity::Warning,
            )
            .with_reference("AR 600-9"),
        );
    }

    findings
}

/// Part V/VI senior rater assessment checks: the four required narrative
/// elements, the full narrative, future assignments, and the profile ceiling.
pub fn validate_senior_rater(
    assessment: &SeniorRaterAssessment,
    evaluation_type: EvaluationType,
    rank_level: RankLevel,
) -> Vec<ValidationError> {
    let mut findings = Vec::new();
    let reference = "DA Pam 623-3, Part V/VI";

    if assessment.potential_rating.is_none() {
        findings.push(
            ValidationError::new(
                "senior_rater_assessment.potential_rating",
                "Senior Rater potential rating is required",
                Severity::Error,
            )
            .with_reference(reference),
        );
    }

    if assessment.enumeration.trim().is_empty() {
        findings.push(
            ValidationError::new(
                "senior_rater_assessment.enumeration",
                "Enumeration is required (e.g., \"#1 of 16; top 5%\")",
                Severity::Error,
            )
            .with_reference(reference),
        );
    }

    if assessment.promotion.trim().is_empty() {
        findings.push(
            ValidationError::new(
                "senior_rater_assessment.promotion",
                "Promotion recommendation is required",
                Severity::Error,
            )
            .with_reference(reference),
        );
    }

    if assessment.school_recommendation.trim().is_empty() {
        findings.push(
            ValidationError::new(
                "senior_rater_assessment.school_recommendation",
                format!("School recommendation is required for {rank_level}"),
                Severity::Error,
            )
            .with_reference(reference),
        );
    }

    if assessment.potential_next_assignment.trim().is_empty() {
        findings.push(
            ValidationError::new(
                "senior_rater_assessment.potential_next_assignment",
                "Potential/Next Assignment recommendation is required",
                Severity::Error,
            )
            .with_reference(reference),
        );
    }

    if assessment.comments.trim().is_empty() {
        findings.push(
            ValidationError::new(
                "senior_rater_assessment.comments",
                "Senior Rater narrative comments are required",
                Severity::Error,
            )
            .with_reference(reference),
        );
    }

    let filled = assessment
        .successive_assignments
        .iter()
        .filter(|a| !a.trim().is_empty())
        .count();

    match evaluation_type {
        EvaluationType::Oer => {
            if filled < 3 {
                findings.push(
                    ValidationError::new(
                        "senior_rater_assessment.successive_assignments",
                        "OER requires 3 future successive assignments",
                        Severity::Warning,
                    )
                    .with_reference("DA Pam 623-3, Part V/VI, Block d"),
                );
            }
        },
        EvaluationType::Ncoer => {
            if filled < 2 {
                findings.push(
                    ValidationError::new(
                        "senior_rater_assessment.successive_assignments",
                        "NCOER requires 2 successive assignments",
                        Severity::Warning,
                    )
                    .with_reference("DA Pam 623-3, Part V, Block c"),
                );
            }
            let has_broadening = assessment
                .broadening_assignment
                .as_ref()
                .is_some_and(|b| !b.trim().is_empty());
            if !has_broadening {
                findings.push(
                    ValidationError::new(
                        "senior_rater_assessment.broadening_assignment",
                        "NCOER requires 1 broadening assignment",
                        Severity::Warning,
                    )
                    .with_reference("DA Pam 623-3, Part V, Block c"),
                );
            }
        },
    }

    if let Some(rating) = assessment.potential_rating {
        if let Some(finding) = validate_profile_limits(
            rating,
            assessment.num_senior_rated,
            assessment.num_most_qualified,
            evaluation_type,
            rank_level,
        ) {
            findings.push(finding);
        }
    }

    findings
}

/// Most Qualified profile ceiling check. Applies only to a Most Qualified
/// check with a non-empty profile; OER allows 49%, NCOER 21% for SGT and
/// 24% otherwise.
pub fn validate_profile_limits(
    rating: PotentialRating,
    num_senior_rated: u32,
    num_most_qualified: u32,
    evaluation_type: EvaluationType,
    rank_level: RankLevel,
) -> Option<ValidationError> {
    if rating != PotentialRating::MostQualified || num_senior_rated < 1 {
        return None;
    }

    let percentage = (num_most_qualified as f64 / num_senior_rated as f64) * 100.0;
    let ceiling = most_qualified_ceiling(evaluation_type, rank_level);

    if percentage > ceiling {
        let part = match evaluation_type {
            EvaluationType::Oer => "Part VI",
            EvaluationType::Ncoer => "Part V",
        };
        return Some(
            ValidationError::new(
                "senior_rater_assessment.potential_rating",
                format!(
                    "\"Most Qualified\" is limited to {ceiling}%. Current rate: {percentage:.1}% ({num_most_qualified} of {num_senior_rated})"
                ),
                Severity::Warning,
            )
            .with_reference(format!("DA Pam 623-3, {part}")),
        );
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{CounselingDates, RatingOfficial};

    fn official(name: &str, email: &str) -> RatingOfficial {
        RatingOfficial {
            name: name.to_string(),
            rank: "LTC".to_string(),
            position: "Battalion Commander".to_string(),
            email: email.to_string(),
            dodid: None,
            pmos_branch: None,
            organization: None,
        }
    }

    #[test]
    fn test_dodid_accepts_separators() {
        assert!(validate_dodid("1234567890").is_none());
        assert!(validate_dodid("123-456-7890").is_none());
        assert!(validate_dodid("123456789").is_some());
        assert!(validate_dodid("").is_some());
    }

    #[test]
    fn test_uic_case_insensitive() {
        assert!(validate_uic("w123aa").is_none());
        assert!(validate_uic("W123AA").is_none());
        assert!(validate_uic("W123").is_some());
    }

    #[test]
    fn test_email_severity_split() {
        // Missing entirely is a hard error
        let missing = validate_military_email("", "f").unwrap();
        assert_eq!(missing.severity, Severity::Error);

        // Present but wrong domain only warns
        let wrong = validate_military_email("jane.doe@example.com", "f").unwrap();
        assert_eq!(wrong.severity, Severity::Warning);

        assert!(validate_military_email("jane.doe@army.mil", "f").is_none());
        assert!(validate_military_email("JANE.DOE@ARMY.MIL", "f").is_none());
        assert!(validate_military_email("a b@army.mil", "f").is_some());
    }

    #[test]
    fn test_date_format_rejects_impossible_dates() {
        assert!(validate_date_format("20240115", "f").is_none());
        let bad = validate_date_format("20240231", "f").unwrap();
        assert_eq!(bad.message, "Invalid date");
        let malformed = validate_date_format("2024-01-15", "f").unwrap();
        assert!(malformed.message.contains("YYYYMMDD"));
    }

    #[test]
    fn test_period_backwards_is_error_long_is_warning() {
        let backwards = PeriodCovered {
            from_date: "20240601".into(),
            thru_date: "20240101".into(),
            rated_months: 0,
            nonrated_codes: None,
        };
        let findings = validate_period(&backwards);
        assert!(findings
            .iter()
            .any(|f| f.severity == Severity::Error && f.message.contains("after From")));

        let long = PeriodCovered {
            from_date: "20230101".into(),
            thru_date: "20250101".into(),
            rated_months: 24,
            nonrated_codes: None,
        };
        let findings = validate_period(&long);
        assert!(findings
            .iter()
            .any(|f| f.severity == Severity::Warning && f.message.contains("exceeds 12 months")));
    }

    #[test]
    fn test_field_grade_oer_flags_missing_intermediate_rater() {
        let chain = RatingChain {
            rater: official("Smith, John A", "john.smith@army.mil"),
            senior_rater: official("Jones, Mary B", "mary.jones@army.mil"),
            intermediate_rater: None,
            supplementary_reviewer: None,
        };

        let findings = validate_rating_chain(&chain, EvaluationType::Oer, RankLevel::O4O5);
        assert!(findings
            .iter()
            .any(|f| f.field == "rating_chain.intermediate_rater"));

        // Company grade OER and NCOERs never get the flag
        let findings = validate_rating_chain(&chain, EvaluationType::Oer, RankLevel::O1O3);
        assert!(findings.is_empty());
        let findings = validate_rating_chain(&chain, EvaluationType::Ncoer, RankLevel::E9);
        assert!(findings.is_empty());
    }

    #[test]
    fn test_duty_description_missing_counseling_warns() {
        let duty = DutyDescription {
            principal_duty_title: "Squad Leader".into(),
            significant_duties: "Leads a 9-Soldier rifle squad".into(),
            duty_mosc: None,
            areas_of_emphasis: None,
            appointed_duties: None,
            counseling_dates: CounselingDates::default(),
        };
        let findings = validate_duty_description(&duty);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Warning);
    }

    #[test]
    fn test_fitness_acft_date_outside_period() {
        let period = PeriodCovered {
            from_date: "20240101".into(),
            thru_date: "20241231".into(),
            rated_months: 12,
            nonrated_codes: None,
        };
        let fitness = FitnessData {
            acft_status: AcftStatus::Pass,
            acft_date: Some("20230601".into()),
            height: None,
            weight: None,
            within_standard: true,
            body_fat_required: None,
            profile_info: None,
        };
        let findings = validate_fitness(&fitness, &period);
        assert!(findings.iter().any(|f| f.field == "fitness.acft_date"));
    }

    #[test]
    fn test_fitness_fail_and_htwt_flags() {
        let period = PeriodCovered {
            from_date: "20240101".into(),
            thru_date: "20241231".into(),
            rated_months: 12,
            nonrated_codes: None,
        };
        let fitness = FitnessData {
            acft_status: AcftStatus::Fail,
            acft_date: None,
            height: Some("70".into()),
            weight: Some("220".into()),
            within_standard: false,
            body_fat_required: None,
            profile_info: None,
        };
        let findings = validate_fitness(&fitness, &period);
        assert!(findings.iter().any(|f| f.message.contains("Failed ACFT")));
        assert!(findings.iter().any(|f| f.field == "fitness.body_fat_required"));
    }

    #[test]
    fn test_profile_ceiling_ncoer_sgt_vs_oer() {
        // 5 of 10 = 50%: over every ceiling
        let finding = validate_profile_limits(
            PotentialRating::MostQualified,
            10,
            5,
            EvaluationType::Ncoer,
            RankLevel::E5,
        )
        .unwrap();
        assert!(finding.message.contains("21%"));
        assert!(finding.message.contains("50.0%"));

        // Under the 49% OER ceiling
        assert!(validate_profile_limits(
            PotentialRating::MostQualified,
            10,
            4,
            EvaluationType::Oer,
            RankLevel::O1O3,
        )
        .is_none());
    }

    #[test]
    fn test_profile_ceiling_skips_empty_profile_and_lower_ratings() {
        assert!(validate_profile_limits(
            PotentialRating::MostQualified,
            0,
            0,
            EvaluationType::Ncoer,
            RankLevel::E5,
        )
        .is_none());
        assert!(validate_profile_limits(
            PotentialRating::HighlyQualified,
            10,
            9,
            EvaluationType::Oer,
            RankLevel::O1O3,
        )
        .is_none());
    }

    #[test]
    fn test_senior_rater_requires_four_elements() {
        let assessment = SeniorRaterAssessment {
            potential_rating: Some(PotentialRating::HighlyQualified),
            enumeration: String::new(),
            promotion: String::new(),
            school_recommendation: String::new(),
            potential_next_assignment: String::new(),
            comments: String::new(),
            successive_assignments: vec![],
            broadening_assignment: None,
            num_senior_rated: 0,
            num_most_qualified: 0,
        };
        let findings = validate_senior_rater(&assessment, EvaluationType::Ncoer, RankLevel::E6E8);
        let errors: Vec<&str> = findings
            .iter()
            .filter(|f| f.severity == Severity::Error)
            .map(|f| f.field.as_str())
            .collect();
        assert!(errors.contains(&"senior_rater_assessment.enumeration"));
        assert!(errors.contains(&"senior_rater_assessment.promotion"));
        assert!(errors.contains(&"senior_rater_assessment.school_recommendation"));
        assert!(errors.contains(&"senior_rater_assessment.potential_next_assignment"));
        assert!(errors.contains(&"senior_rater_assessment.comments"));

        // NCOER assignment counts warn, never block
        let warnings: Vec<&str> = findings
            .iter()
            .filter(|f| f.severity == Severity::Warning)
            .map(|f| f.field.as_str())
            .collect();
        assert!(warnings.contains(&"senior_rater_assessment.successive_assignments"));
        assert!(warnings.contains(&"senior_rater_assessment.broadening_assignment"));
    }

    #[test]
    fn test_oer_needs_three_successive_assignments() {
        let assessment = SeniorRaterAssessment {
            potential_rating: Some(PotentialRating::Qualified),
            enumeration: "#2 of 12".into(),
            promotion: "Promote".into(),
            school_recommendation: "ILE".into(),
            potential_next_assignment: "BN XO".into(),
            comments: "Top performer".into(),
            successive_assignments: vec!["BN XO".into(), "BDE S3".into()],
            broadening_assignment: None,
            num_senior_rated: 0,
            num_most_qualified: 0,
        };
        let findings = validate_senior_rater(&assessment, EvaluationType::Oer, RankLevel::O4O5);
        assert!(findings
            .iter()
            .any(|f| f.message.contains("3 future successive assignments")));
    }
}
