//! Structured DOCX rendering of an evaluation record.
//!
//! The record is first lowered to an ordered tree of styled blocks, then
//! packaged into a Word archive by [`package`]. The block tree mirrors the
//! PDF renderer's section order and field selection exactly; both expose
//! `section_labels()` and the test suite holds them equal.

pub mod package;

pub use package::generate_docx;

use crate::record::{BulletCategory, EvaluationRecord, RatingOfficial};
use crate::tables::{evaluation_title, form_number};

const NAVY: &str = "000080";
const CATEGORY_BLUE: &str = "333399";
const MUTED: &str = "666666";
const FOOTER_GRAY: &str = "888888";
const RULE_GRAY: &str = "CCCCCC";

const SECTION_LABELS: [&str; 5] = [
    "PART I - ADMINISTRATIVE DATA",
    "PART II - RATING CHAIN",
    "PART III - DUTY DESCRIPTION",
    "PART IV - RATER ASSESSMENT",
    "PART V - SENIOR RATER ASSESSMENT",
];

/// The ordered part headers this renderer emits for every record.
pub fn section_labels() -> Vec<&'static str> {
    SECTION_LABELS.to_vec()
}

/// One styled paragraph in the document tree. Sizes are in half-points,
/// indents in twentieths of a point, colors as RRGGBB hex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocBlock {
    /// Centered title-block line
    Title {
        text: String,
        size: u32,
        bold: bool,
        color: Option<&'static str>,
    },
    /// Bold navy section header
    Heading(String),
    /// Bold label run followed by a plain value run
    FieldRow { label: String, value: String },
    /// Bold inline sub-header, optionally colored
    Label {
        text: String,
        size: u32,
        color: Option<&'static str>,
    },
    /// Indented `- ` bullet line
    Bullet(String),
    /// Indented body paragraph
    Body(String),
    /// Italic muted placeholder for an absent section
    Placeholder(String),
    /// Centered italic footer line
    Footer { text: String, color: &'static str },
}

fn field(label: &str, value: &str) -> DocBlock {
    DocBlock::FieldRow {
        label: label.to_string(),
        value: if value.is_empty() {
            "[NOT ENTERED]".to_string()
        } else {
            value.to_string()
        },
    }
}

fn push_official(blocks: &mut Vec<DocBlock>, label: &str, official: &RatingOfficial) {
    let name = if official.name.is_empty() { "N/A" } else { official.name.as_str() };
    blocks.push(field(
        &format!("{label} Name"),
        &format!("{name}, {}", official.rank),
    ));
    if let Some(dodid) = &official.dodid {
        blocks.push(field("  DODID", dodid));
    }
    if let Some(pmos) = &official.pmos_branch {
        blocks.push(field("  PMOSC/Branch", pmos));
    }
    let position = if official.position.is_empty() { "N/A" } else { official.position.as_str() };
    blocks.push(field("  Duty Assignment", position));
    if let Some(org) = &official.organization {
        blocks.push(field("  Organization", org));
    }
    if !official.email.is_empty() {
        blocks.push(field("  Email", &official.email));
    }
}

/// Lower the record to its ordered block tree.
pub fn build_document(record: &EvaluationRecord) -> Vec<DocBlock> {
    let mut blocks: Vec<DocBlock> = Vec::new();

    // Title block
    blocks.push(DocBlock::Title {
        text: form_number(record.evaluation_type, record.rank_level).to_string(),
        size: 32,
        bold: true,
        color: Some(NAVY),
    });
    blocks.push(DocBlock::Title {
        text: evaluation_title(record.evaluation_type).to_string(),
        size: 28,
        bold: true,
        color: None,
    });
    let duty_title = if record.duty_title.is_empty() { "N/A" } else { record.duty_title.as_str() };
    blocks.push(DocBlock::Title {
        text: format!("Duty Title: {duty_title}"),
        size: 22,
        bold: false,
        color: None,
    });
    let generated = chrono::Local::now().format("%d %b %Y").to_string();
    blocks.push(DocBlock::Title {
        text: format!("Generated: {generated}"),
        size: 18,
        bold: false,
        color: Some(MUTED),
    });

    // Part I
    blocks.push(DocBlock::Heading(SECTION_LABELS[0].to_string()));
    match &record.rated_personnel {
        Some(rp) => {
            blocks.push(field("Name", &rp.name));
            let rank = if rp.rank.is_empty() {
                record.rank_level.to_string()
            } else {
                rp.rank.clone()
            };
            blocks.push(field("Rank", &rank));
            blocks.push(field("DODID", &rp.dodid));
            blocks.push(field("Unit", &rp.unit_org_station));
            blocks.push(field("UIC", &rp.uic));
            if let Some(branch) = &rp.branch {
                blocks.push(field("Branch", branch));
            }
            if !rp.email.is_empty() {
                blocks.push(field("Email", &rp.email));
            }
        },
        None => blocks.push(DocBlock::Placeholder("Administrative data not entered".to_string())),
    }

    if let Some(pc) = &record.period_covered {
        let from = if pc.from_date.is_empty() { "[DATE]" } else { pc.from_date.as_str() };
        let thru = if pc.thru_date.is_empty() { "[DATE]" } else { pc.thru_date.as_str() };
        blocks.push(field(
            "Period Covered",
            &format!("{from} - {thru} ({} months)", pc.rated_months),
        ));
    }
    if let Some(reason) = &record.reason_for_submission {
        blocks.push(field(
            "Reason",
            &format!("{} - {}", reason.code, reason.description),
        ));
    }

    // Part II
    blocks.push(DocBlock::Heading(SECTION_LABELS[1].to_string()));
    match &record.rating_chain {
        Some(chain) => {
            push_official(&mut blocks, "Rater", &chain.rater);
            push_official(&mut blocks, "Senior Rater", &chain.senior_rater);
            if let Some(ir) = &chain.intermediate_rater {
                let name = if ir.name.is_empty() { "N/A" } else { ir.name.as_str() };
                blocks.push(field("Intermediate Rater", name));
            }
            if let Some(sr) = &chain.supplementary_reviewer {
                let name = if sr.name.is_empty() { "N/A" } else { sr.name.as_str() };
                blocks.push(field("Supplementary Reviewer", name));
            }
        },
        None => blocks.push(DocBlock::Placeholder("Rating chain not entered".to_string())),
    }

    // Part III
    blocks.push(DocBlock::Heading(SECTION_LABELS[2].to_string()));
    match &record.duty_description {
        Some(dd) => {
            let title = if !dd.principal_duty_title.is_empty() {
                &dd.principal_duty_title
            } else {
                &record.duty_title
            };
            blocks.push(field("Principal Duty Title", title));

            if !dd.significant_duties.is_empty() {
                blocks.push(DocBlock::Label {
                    text: "Significant Duties and Responsibilities:".to_string(),
                    size: 20,
                    color: None,
                });
                blocks.push(DocBlock::Body(dd.significant_duties.clone()));
            }
            if let Some(areas) = dd.areas_of_emphasis.as_deref().filter(|a| !a.is_empty()) {
                blocks.push(DocBlock::Label {
                    text: "Areas of Emphasis:".to_string(),
                    size: 20,
                    color: None,
                });
                blocks.push(DocBlock::Body(areas.to_string()));
            }
            if let Some(appointed) = dd.appointed_duties.as_deref().filter(|a| !a.is_empty()) {
                blocks.push(field("Appointed Duties", appointed));
            }
        },
        None => blocks.push(DocBlock::Placeholder("Duty description not entered".to_string())),
    }

    // Part IV
    blocks.push(DocBlock::Heading(SECTION_LABELS[3].to_string()));
    if record.bullets.is_empty() && record.rater_comments.is_none() {
        blocks.push(DocBlock::Placeholder("Rater assessment not entered".to_string()));
    }
    if !record.bullets.is_empty() {
        blocks.push(DocBlock::Label {
            text: "Performance Bullets:".to_string(),
            size: 22,
            color: None,
        });
        for category in BulletCategory::ORDER {
            let in_category: Vec<_> = record.bullets_in(category).collect();
            if in_category.is_empty() {
                continue;
            }
            blocks.push(DocBlock::Label {
                text: category.as_str().to_uppercase(),
                size: 20,
                color: Some(CATEGORY_BLUE),
            });
            for bullet in in_category {
                blocks.push(DocBlock::Bullet(bullet.enhanced.clone()));
            }
        }
    }
    if let Some(comments) = record.rater_comments.as_deref().filter(|c| !c.is_empty()) {
        blocks.push(DocBlock::Label {
            text: "Rater Comments:".to_string(),
            size: 22,
            color: None,
        });
        blocks.push(DocBlock::Body(comments.to_string()));
    }

    // Part V
    blocks.push(DocBlock::Heading(SECTION_LABELS[4].to_string()));
    if record.senior_rater_assessment.is_none() && record.senior_rater_comments.is_none() {
        blocks.push(DocBlock::Placeholder(
            "Senior rater assessment not entered".to_string(),
        ));
    }
    if let Some(sra) = &record.senior_rater_assessment {
        if let Some(rating) = sra.potential_rating {
            blocks.push(field("Potential", rating.as_str()));
        }
        for (label, value) in [
            ("Enumeration", &sra.enumeration),
            ("Promotion", &sra.promotion),
            ("School Recommendation", &sra.school_recommendation),
            ("Next Assignment", &sra.potential_next_assignment),
        ] {
            if !value.is_empty() {
                blocks.push(field(label, value));
            }
        }
    }
    if let Some(comments) = record
        .senior_rater_comments
        .as_deref()
        .filter(|c| !c.is_empty())
    {
        blocks.push(DocBlock::Label {
            text: "Senior Rater Comments:".to_string(),
            size: 22,
            color: None,
        });
        blocks.push(DocBlock::Body(comments.to_string()));
    }

    // Footer
    blocks.push(DocBlock::Footer {
        text: "\u{2500}".repeat(80),
        color: RULE_GRAY,
    });
    blocks.push(DocBlock::Footer {
        text: "Generated by MilEval - Made for Soldiers by Soldiers".to_string(),
        color: FOOTER_GRAY,
    });

    blocks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{CategorizedBullet, EvaluationType, RankLevel};

    fn headings(blocks: &[DocBlock]) -> Vec<&str> {
        blocks
            .iter()
            .filter_map(|b| match b {
                DocBlock::Heading(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_empty_record_emits_all_headings_with_placeholders() {
        let record = EvaluationRecord::empty(EvaluationType::Ncoer, RankLevel::E5);
        let blocks = build_document(&record);
        assert_eq!(headings(&blocks), SECTION_LABELS.to_vec());
        let placeholders = blocks
            .iter()
            .filter(|b| matches!(b, DocBlock::Placeholder(_)))
            .count();
        assert_eq!(placeholders, 5);
    }

    #[test]
    fn test_section_order_matches_pdf_renderer() {
        assert_eq!(section_labels(), crate::export::pdf::section_labels());
    }

    #[test]
    fn test_bullets_grouped_by_category() {
        let mut record = EvaluationRecord::empty(EvaluationType::Oer, RankLevel::O1O3);
        record.bullets.push(CategorizedBullet {
            category: BulletCategory::Achieves,
            original: "x".into(),
            enhanced: "completed 14 missions".into(),
            confidence: 0.8,
        });
        record.bullets.push(CategorizedBullet {
            category: BulletCategory::Character,
            original: "y".into(),
            enhanced: "enforced SHARP standards".into(),
            confidence: 0.9,
        });
        let blocks = build_document(&record);

        let char_pos = blocks
            .iter()
            .position(|b| matches!(b, DocBlock::Label { text, .. } if text == "CHARACTER"))
            .unwrap();
        let achieves_pos = blocks
            .iter()
            .position(|b| matches!(b, DocBlock::Label { text, .. } if text == "ACHIEVES"))
            .unwrap();
        assert!(char_pos < achieves_pos);
        assert!(matches!(&blocks[char_pos + 1], DocBlock::Bullet(t) if t == "enforced SHARP standards"));
    }

    #[test]
    fn test_field_rows_use_placeholder_for_empty_values() {
        let block = field("Name", "");
        assert!(matches!(block, DocBlock::FieldRow { value, .. } if value == "[NOT ENTERED]"));
    }

    #[test]
    fn test_title_block_carries_form_number_first() {
        let record = EvaluationRecord::empty(EvaluationType::Ncoer, RankLevel::E9);
        let blocks = build_document(&record);
        assert!(
            matches!(&blocks[0], DocBlock::Title { text, bold: true, .. } if text == "DA FORM 2166-9-3")
        );
    }
}
