//! The evaluation record data model.
//!
//! A single [`EvaluationRecord`] is the input to both the validation engine
//! and all three exporters. The surrounding application builds the record
//! incrementally; once it reaches this crate it is treated as an immutable
//! value. Sections that the workflow may not have filled in yet are
//! `Option`s so the validator can report their absence as a finding instead
//! of refusing to construct the record.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which regulated report this record produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EvaluationType {
    /// Non-Commissioned Officer Evaluation Report
    #[serde(rename = "NCOER")]
    Ncoer,
    /// Officer Evaluation Report
    #[serde(rename = "OER")]
    Oer,
}

impl fmt::Display for EvaluationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvaluationType::Ncoer => write!(f, "NCOER"),
            EvaluationType::Oer => write!(f, "OER"),
        }
    }
}

/// Rank band of the rated Soldier. Selects the specific form number and
/// rank-dependent sub-rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RankLevel {
    /// SGT
    #[serde(rename = "E5")]
    E5,
    /// SSG through MSG/1SG
    #[serde(rename = "E6-E8")]
    E6E8,
    /// SGM/CSM
    #[serde(rename = "E9")]
    E9,
    /// Company grade officers
    #[serde(rename = "O1-O3")]
    O1O3,
    /// Field grade officers
    #[serde(rename = "O4-O5")]
    O4O5,
    /// Colonel
    #[serde(rename = "O6")]
    O6,
}

impl fmt::Display for RankLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RankLevel::E5 => "E5",
            RankLevel::E6E8 => "E6-E8",
            RankLevel::E9 => "E9",
            RankLevel::O1O3 => "O1-O3",
            RankLevel::O4O5 => "O4-O5",
            RankLevel::O6 => "O6",
        };
        write!(f, "{}", s)
    }
}

/// Army component of the rated Soldier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Component {
    /// Regular Army
    #[serde(rename = "RA")]
    Ra,
    /// Army Reserve
    #[serde(rename = "USAR")]
    Usar,
    /// Army National Guard
    #[serde(rename = "ARNG")]
    Arng,
}

/// Duty status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StatusCode {
    /// Active duty
    Ad,
    /// Active Guard Reserve
    Agr,
    /// Troop program unit
    Tpu,
    /// Individual mobilization augmentee
    Ima,
    /// Individual ready reserve
    Irr,
    /// Mobilized
    Mob,
}

/// Performance attribute categories, in the fixed NCOER/OER display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BulletCategory {
    /// Army Values, discipline, SHARP/EO
    Character,
    /// Military bearing, fitness, resilience
    Presence,
    /// Mental agility, judgment, expertise
    Intellect,
    /// Leading others, building trust
    Leads,
    /// Developing self and subordinates
    Develops,
    /// Mission accomplishment
    Achieves,
}

impl BulletCategory {
    /// The fixed display/export order for all renderers.
    pub const ORDER: [BulletCategory; 6] = [
        BulletCategory::Character,
        BulletCategory::Presence,
        BulletCategory::Intellect,
        BulletCategory::Leads,
        BulletCategory::Develops,
        BulletCategory::Achieves,
    ];

    /// Display name for headers.
    pub fn as_str(&self) -> &'static str {
        match self {
            BulletCategory::Character => "Character",
            BulletCategory::Presence => "Presence",
            BulletCategory::Intellect => "Intellect",
            BulletCategory::Leads => "Leads",
            BulletCategory::Develops => "Develops",
            BulletCategory::Achieves => "Achieves",
        }
    }
}

impl fmt::Display for BulletCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// ACFT result recorded on the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AcftStatus {
    /// Passed the ACFT
    Pass,
    /// Failed the ACFT (comments required)
    Fail,
    /// On a medical profile
    Profile,
    /// Exempt from testing
    Exempt,
}

/// Senior rater potential box check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PotentialRating {
    /// Top tier, limited by the senior rater profile ceiling
    #[serde(rename = "MOST QUALIFIED")]
    MostQualified,
    /// Second tier
    #[serde(rename = "HIGHLY QUALIFIED")]
    HighlyQualified,
    /// Third tier
    #[serde(rename = "QUALIFIED")]
    Qualified,
    /// Bottom tier
    #[serde(rename = "NOT QUALIFIED")]
    NotQualified,
}

impl PotentialRating {
    /// Display name as it appears on the form.
    pub fn as_str(&self) -> &'static str {
        match self {
            PotentialRating::MostQualified => "MOST QUALIFIED",
            PotentialRating::HighlyQualified => "HIGHLY QUALIFIED",
            PotentialRating::Qualified => "QUALIFIED",
            PotentialRating::NotQualified => "NOT QUALIFIED",
        }
    }
}

/// Part I administrative data for the rated Soldier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatedPersonnel {
    /// Last, First MI
    pub name: String,
    /// 10-digit DOD ID (no SSN)
    pub dodid: String,
    /// Rank abbreviation (e.g. "SSG", "CPT")
    pub rank: String,
    /// Date of rank, YYYYMMDD
    pub date_of_rank: String,
    /// PMOS for NCOs, AOC for officers
    pub pmos_aoc: String,
    /// Branch, officers only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    /// Army component
    pub component: Component,
    /// Duty status
    pub status_code: StatusCode,
    /// Full unit/organization/station string
    pub unit_org_station: String,
    /// 6-character alphanumeric unit identification code
    pub uic: String,
    /// .gov or .mil address
    pub email: String,
}

/// Part I rating period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodCovered {
    /// Start of the rated period, YYYYMMDD
    pub from_date: String,
    /// End of the rated period, YYYYMMDD
    pub thru_date: String,
    /// Months in the period, derived from the dates (see [`crate::dates::rated_months`])
    pub rated_months: i64,
    /// Nonrated time codes per DA Pam 623-3 Table 2-25
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nonrated_codes: Option<Vec<String>>,
}

/// Part I reason for submission, drawn from the per-type code table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReasonForSubmission {
    /// Code per DA Pam 623-3 Table 2-24
    pub code: String,
    /// Human-readable description
    pub description: String,
}

/// One official in the rating chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingOfficial {
    /// Last, First MI
    pub name: String,
    /// Rank abbreviation
    pub rank: String,
    /// Duty assignment / position title
    pub position: String,
    /// .gov or .mil address
    pub email: String,
    /// 10-digit DOD ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dodid: Option<String>,
    /// PMOS for NCOs, Branch/AOC for officers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pmos_branch: Option<String>,
    /// Organization
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
}

/// Part II rating chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingChain {
    /// First-line evaluator
    pub rater: RatingOfficial,
    /// Senior rater (profile owner)
    pub senior_rater: RatingOfficial,
    /// Intermediate rater, some OERs only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intermediate_rater: Option<RatingOfficial>,
    /// Supplementary reviewer, required when the senior rater is not Army
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplementary_reviewer: Option<RatingOfficial>,
}

/// Counseling dates recorded in Part III.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CounselingDates {
    /// Initial counseling, YYYYMMDD
    pub initial: String,
    /// Later quarterly counselings, YYYYMMDD each
    #[serde(default)]
    pub quarterly: Vec<String>,
}

/// Part III duty description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DutyDescription {
    /// Principal duty title
    pub principal_duty_title: String,
    /// Significant duties and responsibilities (free text)
    pub significant_duties: String,
    /// Duty MOSC, NCOERs only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duty_mosc: Option<String>,
    /// Areas of emphasis, NCOERs only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub areas_of_emphasis: Option<String>,
    /// Appointed duties (UPL, SHARP, CFL, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appointed_duties: Option<String>,
    /// Counseling dates
    #[serde(default)]
    pub counseling_dates: CounselingDates,
}

/// Part IV physical fitness data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitnessData {
    /// ACFT result
    pub acft_status: AcftStatus,
    /// ACFT date, YYYYMMDD; must fall within the rated period
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acft_date: Option<String>,
    /// Height in inches
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
    /// Weight in pounds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,
    /// Within height/weight standard
    pub within_standard: bool,
    /// DA 5500/5501 body fat worksheet on file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_fat_required: Option<bool>,
    /// Profile narrative, if on profile
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_info: Option<String>,
}

/// Part V/VI senior rater assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeniorRaterAssessment {
    /// Potential box check
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub potential_rating: Option<PotentialRating>,
    /// e.g. "#1 of 16; top 5%"
    #[serde(default)]
    pub enumeration: String,
    /// e.g. "Promote immediately"
    #[serde(default)]
    pub promotion: String,
    /// e.g. "ILE resident", "SLC"
    #[serde(default)]
    pub school_recommendation: String,
    /// e.g. "Company Command", "BN staff"
    #[serde(default)]
    pub potential_next_assignment: String,
    /// Full narrative combining all elements
    #[serde(default)]
    pub comments: String,
    /// Future successive assignments (OER needs 3, NCOER 2)
    #[serde(default)]
    pub successive_assignments: Vec<String>,
    /// Broadening assignment, NCOER only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub broadening_assignment: Option<String>,
    /// "I currently senior rate N in this grade"
    #[serde(default)]
    pub num_senior_rated: u32,
    /// How many of those carry a Most Qualified check
    #[serde(default)]
    pub num_most_qualified: u32,
}

/// One categorized accomplishment statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorizedBullet {
    /// Attribute category
    pub category: BulletCategory,
    /// Text as the user wrote it
    pub original: String,
    /// Text after narrative enhancement
    pub enhanced: String,
    /// Categorization confidence in [0, 1]
    pub confidence: f64,
}

/// A complete evaluation record, the single input to validation and all
/// three exporters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRecord {
    /// Report type
    pub evaluation_type: EvaluationType,
    /// Rank band of the rated Soldier
    pub rank_level: RankLevel,
    /// Duty title shown in the header block
    #[serde(default)]
    pub duty_title: String,
    /// Part I administrative data
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rated_personnel: Option<RatedPersonnel>,
    /// Part I rating period
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period_covered: Option<PeriodCovered>,
    /// Part I reason for submission
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason_for_submission: Option<ReasonForSubmission>,
    /// Part II rating chain
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating_chain: Option<RatingChain>,
    /// Part III duty description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duty_description: Option<DutyDescription>,
    /// Part IV fitness data
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fitness: Option<FitnessData>,
    /// Part V/VI senior rater assessment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub senior_rater_assessment: Option<SeniorRaterAssessment>,
    /// Categorized accomplishment bullets
    #[serde(default)]
    pub bullets: Vec<CategorizedBullet>,
    /// Rater narrative
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rater_comments: Option<String>,
    /// Senior rater narrative
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub senior_rater_comments: Option<String>,
}

impl EvaluationRecord {
    /// A minimal record with every optional section absent. Exporters must
    /// still produce non-empty output for this shape.
    pub fn empty(evaluation_type: EvaluationType, rank_level: RankLevel) -> Self {
        Self {
            evaluation_type,
            rank_level,
            duty_title: String::new(),
            rated_personnel: None,
            period_covered: None,
            reason_for_submission: None,
            rating_chain: None,
            duty_description: None,
            fitness: None,
            senior_rater_assessment: None,
            bullets: Vec::new(),
            rater_comments: None,
            senior_rater_comments: None,
        }
    }

    /// Bullets in a given category, in record order.
    pub fn bullets_in(&self, category: BulletCategory) -> impl Iterator<Item = &CategorizedBullet> {
        self.bullets.iter().filter(move |b| b.category == category)
    }
}
