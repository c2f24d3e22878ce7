//! Integration tests for the compliance validation engine.

use mileval::dates::{generate_counseling_dates, rated_months};
use mileval::record::{
    AcftStatus, BulletCategory, CategorizedBullet, Component, CounselingDates, DutyDescription,
    EvaluationRecord, EvaluationType, FitnessData, PeriodCovered, PotentialRating, RankLevel,
    RatedPersonnel, RatingChain, RatingOfficial, ReasonForSubmission, SeniorRaterAssessment,
    StatusCode,
};
use mileval::validation::{check_prohibited_content, validate_evaluation, Severity};
use proptest::prelude::*;

fn official(name: &str) -> RatingOfficial {
    RatingOfficial {
        name: name.to_string(),
        rank: "MSG".to_string(),
        position: "First Sergeant".to_string(),
        email: "first.last@army.mil".to_string(),
        dodid: Some("1112223334".to_string()),
        pmos_branch: Some("11Z".to_string()),
        organization: Some("B Co, 1-502 IN".to_string()),
    }
}

/// A record that passes validation cleanly apart from assignment-count
/// warnings, used as the baseline the tests perturb.
fn complete_record() -> EvaluationRecord {
    EvaluationRecord {
        evaluation_type: EvaluationType::Ncoer,
        rank_level: RankLevel::E5,
        duty_title: "Team Leader".to_string(),
        rated_personnel: Some(RatedPersonnel {
            name: "Snuffy, Joe B".to_string(),
            dodid: "1234567890".to_string(),
            rank: "SGT".to_string(),
            date_of_rank: "20220601".to_string(),
            pmos_aoc: "11B".to_string(),
            branch: None,
            component: Component::Ra,
            status_code: StatusCode::Ad,
            unit_org_station: "B Co, 1-502 IN, Fort Campbell, KY".to_string(),
            uic: "WABCAA".to_string(),
            email: "joe.b.snuffy@army.mil".to_string(),
        }),
        period_covered: Some(PeriodCovered {
            from_date: "20240101".to_string(),
            thru_date: "20241231".to_string(),
            rated_months: 12,
            nonrated_codes: None,
        }),
        reason_for_submission: Some(ReasonForSubmission {
            code: "01".to_string(),
            description: "Annual".to_string(),
        }),
        rating_chain: Some(RatingChain {
            rater: official("Platoon, Sergeant A"),
            senior_rater: official("Sergeant, First B"),
            intermediate_rater: None,
            supplementary_reviewer: None,
        }),
        duty_description: Some(DutyDescription {
            principal_duty_title: "Team Leader".to_string(),
            significant_duties: "Leads a 4-Soldier fire team in all operations".to_string(),
            duty_mosc: Some("11B2O".to_string()),
            areas_of_emphasis: None,
            appointed_duties: None,
            counseling_dates: CounselingDates {
                initial: "20240115".to_string(),
                quarterly: vec!["20240401".to_string(), "20240701".to_string()],
            },
        }),
        fitness: Some(FitnessData {
            acft_status: AcftStatus::Pass,
            acft_date: Some("20240615".to_string()),
            height: Some("70".to_string()),
            weight: Some("180".to_string()),
            within_standard: true,
            body_fat_required: None,
            profile_info: None,
        }),
        senior_rater_assessment: Some(SeniorRaterAssessment {
            potential_rating: Some(PotentialRating::HighlyQualified),
            enumeration: "#2 of 8".to_string(),
            promotion: "Promote to SSG now".to_string(),
            school_recommendation: "ALC".to_string(),
            potential_next_assignment: "Squad Leader".to_string(),
            comments: "Top NCO in the company".to_string(),
            successive_assignments: vec!["Squad Leader".to_string(), "Drill Sergeant".to_string()],
            broadening_assignment: Some("Recruiter".to_string()),
            num_senior_rated: 8,
            num_most_qualified: 1,
        }),
        bullets: vec![CategorizedBullet {
            category: BulletCategory::Achieves,
            original: "led range".to_string(),
            enhanced: "planned and executed 4 range densities; qualified 120 Soldiers".to_string(),
            confidence: 0.92,
        }],
        rater_comments: Some("Ranked 2 of 8 sergeants rated".to_string()),
        senior_rater_comments: Some("Unlimited potential; promote ahead of peers".to_string()),
    }
}

#[test]
fn complete_record_is_valid() {
    let result = validate_evaluation(&complete_record());
    assert!(result.is_valid, "unexpected errors: {:?}", result.errors);
}

#[test]
fn missing_sections_each_produce_one_error() {
    let record = EvaluationRecord::empty(EvaluationType::Oer, RankLevel::O1O3);
    let result = validate_evaluation(&record);
    assert!(!result.is_valid);
    assert_eq!(result.errors.len(), 5);
}

#[test]
fn bad_dodid_blocks_submission() {
    let mut record = complete_record();
    record.rated_personnel.as_mut().unwrap().dodid = "12345".to_string();
    let result = validate_evaluation(&record);
    assert!(result
        .errors
        .iter()
        .any(|e| e.field == "rated_personnel.dodid"));
}

#[test]
fn civilian_email_warns_but_does_not_block() {
    let mut record = complete_record();
    record.rated_personnel.as_mut().unwrap().email = "joe@gmail.com".to_string();
    let result = validate_evaluation(&record);
    assert!(result.is_valid);
    assert!(result
        .warnings
        .iter()
        .any(|w| w.field == "rated_personnel.email"));
}

#[test]
fn most_qualified_ceiling_ncoer_sgt_warns_but_oer_does_not() {
    // 5 of 10 = 50%: over the 21% SGT ceiling, under the 49% OER ceiling
    let mut record = complete_record();
    {
        let sra = record.senior_rater_assessment.as_mut().unwrap();
        sra.potential_rating = Some(PotentialRating::MostQualified);
        sra.num_senior_rated = 10;
        sra.num_most_qualified = 5;
    }
    let result = validate_evaluation(&record);
    assert!(result
        .warnings
        .iter()
        .any(|w| w.message.contains("limited to 21%")));

    record.evaluation_type = EvaluationType::Oer;
    record.rank_level = RankLevel::O1O3;
    let result = validate_evaluation(&record);
    assert!(!result
        .warnings
        .iter()
        .any(|w| w.message.contains("Most Qualified")));
}

#[test]
fn prohibited_scan_flags_pronouns_and_predictive_language() {
    let findings =
        check_prohibited_content("I led my team and it will improve readiness", "narrative");
    assert!(findings.len() >= 3, "got {findings:?}");
    let messages: Vec<&str> = findings.iter().map(|f| f.message.as_str()).collect();
    assert!(messages.iter().any(|m| m.contains("\"I\"")));
    assert!(messages.iter().any(|m| m.contains("\"my\"")));
    assert!(messages.iter().any(|m| m.contains("predictive")));
    assert!(findings.iter().all(|f| f.severity == Severity::Warning));
}

#[test]
fn narrative_scan_covers_comments_and_bullets() {
    let mut record = complete_record();
    record.rater_comments = Some("my best NCO".to_string());
    record.bullets[0].enhanced = "will lead the platoon".to_string();
    let result = validate_evaluation(&record);
    assert!(result.warnings.iter().any(|w| w.field == "rater_comments"));
    assert!(result
        .warnings
        .iter()
        .any(|w| w.field == "bullets[0].enhanced"));
}

#[test]
fn counseling_schedule_full_year() {
    let sched = generate_counseling_dates("20240101", 12);
    assert_eq!(sched.initial, "20240115");
    assert_eq!(
        sched.quarterly,
        vec!["20240401", "20240701", "20241001", "20250101"]
    );
}

#[test]
fn counseling_schedule_nine_month_period_drops_final_date() {
    let sched = generate_counseling_dates("20240101", 9);
    assert_eq!(sched.quarterly, vec!["20240401", "20240701"]);
}

#[test]
fn rated_months_full_year_is_twelve() {
    assert_eq!(rated_months("20240101", "20250101"), 12);
}

proptest! {
    #[test]
    fn rated_months_is_antisymmetric(
        y1 in 2000i32..2030,
        m1 in 1u32..=12,
        d1 in 1u32..=28,
        y2 in 2000i32..2030,
        m2 in 1u32..=12,
        d2 in 1u32..=28,
    ) {
        let a = format!("{y1:04}{m1:02}{d1:02}");
        let b = format!("{y2:04}{m2:02}{d2:02}");
        prop_assert_eq!(rated_months(&a, &b), -rated_months(&b, &a));
    }

    #[test]
    fn validation_never_panics_on_arbitrary_strings(
        name in ".*",
        email in ".*",
        date in ".*",
    ) {
        let mut record = complete_record();
        {
            let rp = record.rated_personnel.as_mut().unwrap();
            rp.name = name;
            rp.email = email;
            rp.date_of_rank = date;
        }
        let result = validate_evaluation(&record);
        prop_assert_eq!(result.is_valid, result.errors.is_empty());
    }
}
