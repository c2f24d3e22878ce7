//! EES plain-text export.
//!
//! The Evaluation Entry System accepts pasted text with hard per-block
//! character ceilings, so everything here is single-line text with explicit
//! truncation. Two renditions exist: the full export with part headers for
//! record keeping, and a compact one holding just the narrative blocks for
//! direct pasting.

use crate::record::{BulletCategory, CategorizedBullet, EvaluationRecord};
use crate::tables::form_number;
use indexmap::IndexMap;
use lazy_static::lazy_static;
use log::info;
use regex::Regex;

/// EES ceiling for one performance bullet.
pub const BULLET_MAX_CHARS: usize = 350;
/// EES ceiling for the rater narrative block.
pub const RATER_COMMENTS_MAX_CHARS: usize = 2000;
/// EES ceiling for the senior rater narrative block.
pub const SR_COMMENTS_MAX_CHARS: usize = 2000;
/// EES ceiling for the duty description block.
pub const DUTY_DESCRIPTION_MAX_CHARS: usize = 500;

const NOT_ENTERED: &str = "[NOT ENTERED]";

lazy_static! {
    static ref LINE_BREAKS: Regex = Regex::new(r"[\r\n]+").unwrap();
}

/// Truncate to `max_chars`, counting characters, replacing the tail with
/// a three-character ellipsis. Output is exactly `max_chars` long when
/// truncation happens, so re-formatting already-formatted text is a no-op.
fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let head: String = text.chars().take(max_chars - 3).collect();
    format!("{head}...")
}

/// Format one bullet: collapse line breaks to spaces, trim, truncate.
pub fn format_bullet(bullet: &str, max_chars: usize) -> String {
    let cleaned = LINE_BREAKS.replace_all(bullet, " ");
    truncate_with_ellipsis(cleaned.trim(), max_chars)
}

/// Format a narrative comment block: collapse all runs of whitespace to a
/// single space, then truncate.
pub fn format_comments(comments: &str, max_chars: usize) -> String {
    let cleaned = comments.split_whitespace().collect::<Vec<_>>().join(" ");
    truncate_with_ellipsis(&cleaned, max_chars)
}

/// Bullets grouped by category in display order, each as a `- ` line under
/// an optional `CATEGORY:` header. Categories with no bullets are omitted.
pub fn format_bullets(bullets: &[CategorizedBullet], include_headers: bool) -> String {
    let mut grouped: IndexMap<BulletCategory, Vec<String>> = BulletCategory::ORDER
        .iter()
        .map(|c| (*c, Vec::new()))
        .collect();

    for bullet in bullets {
        grouped
            .entry(bullet.category)
            .or_default()
            .push(format_bullet(&bullet.enhanced, BULLET_MAX_CHARS));
    }

    let mut lines: Vec<String> = Vec::new();
    for (category, formatted) in &grouped {
        if formatted.is_empty() {
            continue;
        }
        if include_headers {
            lines.push(format!("{}:", category.as_str().to_uppercase()));
        }
        for bullet in formatted {
            lines.push(format!("- {bullet}"));
        }
        lines.push(String::new());
    }

    lines.join("\n").trim().to_string()
}

fn or_placeholder(value: &str) -> &str {
    if value.trim().is_empty() {
        NOT_ENTERED
    } else {
        value
    }
}

fn or_date_placeholder(value: &str) -> &str {
    if value.trim().is_empty() {
        "[DATE]"
    } else {
        value
    }
}

/// The full EES export: header, Parts I and III summaries, rater and senior
/// rater blocks, footer. Sections the record lacks are skipped; the Part IV
/// and Part V headers and the footer always appear, so even an empty record
/// yields recognizable output.
pub fn generate_ees_text(record: &EvaluationRecord) -> String {
    let mut sections: Vec<String> = Vec::new();
    let form = form_number(record.evaluation_type, record.rank_level);

    sections.push(format!("=== {form} - EES Export ==="));
    sections.push(String::new());

    if let Some(personnel) = &record.rated_personnel {
        sections.push("--- PART I - ADMINISTRATIVE DATA ---".to_string());
        sections.push(format!("Name: {}", or_placeholder(&personnel.name)));
        let rank = if personnel.rank.trim().is_empty() {
            record.rank_level.to_string()
        } else {
            personnel.rank.clone()
        };
        sections.push(format!("Rank: {rank}"));
        sections.push(format!("DODID: {}", or_placeholder(&personnel.dodid)));
        sections.push(format!("Unit: {}", or_placeholder(&personnel.unit_org_station)));
        sections.push(format!("UIC: {}", or_placeholder(&personnel.uic)));

        if let Some(period) = &record.period_covered {
            sections.push(format!(
                "Period: {} - {}",
                or_date_placeholder(&period.from_date),
                or_date_placeholder(&period.thru_date)
            ));
            sections.push(format!("Rated Months: {}", period.rated_months));
        }

        if let Some(reason) = &record.reason_for_submission {
            sections.push(format!("Reason: {} - {}", reason.code, reason.description));
        }

        sections.push(String::new());
    }

    if let Some(duty) = &record.duty_description {
        sections.push("--- PART III - DUTY DESCRIPTION ---".to_string());
        sections.push(format!(
            "Principal Duty Title: {}",
            or_placeholder(&duty.principal_duty_title)
        ));

        if !duty.significant_duties.trim().is_empty() {
            sections.push(String::new());
            sections.push("Significant Duties and Responsibilities:".to_string());
            sections.push(format_bullet(
                &duty.significant_duties,
                DUTY_DESCRIPTION_MAX_CHARS,
            ));
        }

        if let Some(areas) = duty.areas_of_emphasis.as_deref().filter(|a| !a.is_empty()) {
            sections.push(String::new());
            sections.push(format!("Areas of Emphasis: {areas}"));
        }

        if let Some(appointed) = duty.appointed_duties.as_deref().filter(|a| !a.is_empty()) {
            sections.push(format!("Appointed Duties: {appointed}"));
        }

        sections.push(String::new());
    }

    sections.push("--- PART IV - RATER ASSESSMENT ---".to_string());
    sections.push(String::new());

    if !record.bullets.is_empty() {
        sections.push("Performance Bullets:".to_string());
        sections.push(String::new());
        sections.push(format_bullets(&record.bullets, true));
        sections.push(String::new());
    }

    if let Some(comments) = record.rater_comments.as_deref().filter(|c| !c.is_empty()) {
        sections.push("Rater Comments:".to_string());
        sections.push(format_comments(comments, RATER_COMMENTS_MAX_CHARS));
        sections.push(String::new());
    }

    sections.push("--- PART V - SENIOR RATER ASSESSMENT ---".to_string());
    sections.push(String::new());

    if let Some(comments) = record
        .senior_rater_comments
        .as_deref()
        .filter(|c| !c.is_empty())
    {
        sections.push("Senior Rater Comments:".to_string());
        sections.push(format_comments(comments, SR_COMMENTS_MAX_CHARS));
        sections.push(String::new());
    }

    sections.push("=== END OF EVALUATION ===".to_string());

    info!("generated EES text export for {form}");
    sections.join("\n")
}

/// Compact rendition: bullets and comments only, no part headers.
pub fn generate_compact_ees_text(record: &EvaluationRecord) -> String {
    let mut sections: Vec<String> = Vec::new();

    for category in BulletCategory::ORDER {
        let in_category: Vec<&CategorizedBullet> = record.bullets_in(category).collect();
        if in_category.is_empty() {
            continue;
        }
        sections.push(format!("{}:", category.as_str()));
        for bullet in in_category {
            sections.push(format_bullet(&bullet.enhanced, BULLET_MAX_CHARS));
        }
        sections.push(String::new());
    }

    if let Some(comments) = record.rater_comments.as_deref().filter(|c| !c.is_empty()) {
        sections.push("RATER COMMENTS:".to_string());
        sections.push(format_comments(comments, RATER_COMMENTS_MAX_CHARS));
        sections.push(String::new());
    }

    if let Some(comments) = record
        .senior_rater_comments
        .as_deref()
        .filter(|c| !c.is_empty())
    {
        sections.push("SENIOR RATER COMMENTS:".to_string());
        sections.push(format_comments(comments, SR_COMMENTS_MAX_CHARS));
    }

    sections.join("\n").trim().to_string()
}

/// Character usage of one bullet category against its EES allowance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryBudget {
    pub category: BulletCategory,
    /// Characters used across the category's bullets (pre-truncation)
    pub count: usize,
    /// Allowance: one bullet ceiling per bullet, or one ceiling when empty
    pub limit: usize,
}

/// Character usage report across all EES-limited blocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterBudget {
    pub bullet_counts: Vec<CategoryBudget>,
    pub rater_count: usize,
    pub rater_limit: usize,
    pub sr_count: usize,
    pub sr_limit: usize,
}

/// Count characters against the same ceilings the formatters enforce.
pub fn character_budget(record: &EvaluationRecord) -> CharacterBudget {
    let bullet_counts = BulletCategory::ORDER
        .iter()
        .map(|&category| {
            let in_category: Vec<&CategorizedBullet> = record.bullets_in(category).collect();
            let count = in_category
                .iter()
                .map(|b| b.enhanced.chars().count())
                .sum();
            let limit = if in_category.is_empty() {
                BULLET_MAX_CHARS
            } else {
                BULLET_MAX_CHARS * in_category.len()
            };
            CategoryBudget { category, count, limit }
        })
        .collect();

    CharacterBudget {
        bullet_counts,
        rater_count: record
            .rater_comments
            .as_deref()
            .map_or(0, |c| c.chars().count()),
        rater_limit: RATER_COMMENTS_MAX_CHARS,
        sr_count: record
            .senior_rater_comments
            .as_deref()
            .map_or(0, |c| c.chars().count()),
        sr_limit: SR_COMMENTS_MAX_CHARS,
    }
}
