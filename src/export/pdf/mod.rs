//! Paginated PDF rendering of an evaluation record.
//!
//! Letter-sized pages built with a manual vertical cursor. Every multi-line
//! block reserves its height through [`PageCursor::ensure_space`] before
//! drawing, which starts a fresh page when the block would cross the bottom
//! margin. All five part headers are always drawn; absent data renders a
//! muted placeholder underneath, so page structure is stable regardless of
//! record completeness.

pub mod fonts;
pub mod writer;

use crate::error::Result;
use crate::record::{BulletCategory, EvaluationRecord, RatingOfficial};
use crate::tables::{evaluation_title, form_number};
use fonts::{wrap_text, Font};
use log::info;
use writer::{Color, DrawOp, Page};

pub const PAGE_WIDTH: f32 = 612.0;
pub const PAGE_HEIGHT: f32 = 792.0;
pub const MARGIN: f32 = 50.0;
pub const LINE_HEIGHT: f32 = 14.0;
pub const SECTION_SPACING: f32 = 20.0;

const HEADER_BLUE: Color = Color { r: 0.0, g: 0.0, b: 0.5 };
const CATEGORY_BLUE: Color = Color { r: 0.2, g: 0.2, b: 0.6 };
const MUTED_GRAY: Color = Color { r: 0.5, g: 0.5, b: 0.5 };
const RULE_GRAY: Color = Color { r: 0.7, g: 0.7, b: 0.7 };
const FOOTER_GRAY: Color = Color { r: 0.8, g: 0.8, b: 0.8 };
const DATE_GRAY: Color = Color { r: 0.4, g: 0.4, b: 0.4 };

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

/// Vertical cursor threaded through all draw helpers. Owns the page list;
/// `ensure_space` is the only way a new page starts.
struct PageCursor {
    pages: Vec<Page>,
    y: f32,
}

impl PageCursor {
    fn new() -> Self {
        Self {
            pages: vec![Page::new(PAGE_WIDTH, PAGE_HEIGHT)],
            y: PAGE_HEIGHT - MARGIN,
        }
    }

    /// Start a new page when `needed` points would cross the bottom margin.
    fn ensure_space(&mut self, needed: f32) {
        if self.y - needed < MARGIN {
            self.pages.push(Page::new(PAGE_WIDTH, PAGE_HEIGHT));
            self.y = PAGE_HEIGHT - MARGIN;
        }
    }

    /// Draw one text run at the cursor without advancing it.
    fn text_at(&mut self, text: &str, x: f32, font: Font, size: f32, color: Color) {
        let y = self.y;
        self.current().ops.push(DrawOp::Text {
            x,
            y,
            size,
            font,
            color,
            text: text.to_string(),
        });
    }

    /// Draw one line of text and advance the cursor.
    fn text_line(&mut self, text: &str, x: f32, font: Font, size: f32, color: Color) {
        self.text_at(text, x, font, size, color);
        self.y -= LINE_HEIGHT;
    }

    /// Word-wrapped paragraph; each emitted line re-checks page space.
    fn wrapped_text(&mut self, text: &str, x: f32, max_width: f32, font: Font, size: f32) {
        for line in wrap_text(text, font, size, max_width) {
            self.ensure_space(LINE_HEIGHT);
            self.text_line(&line, x, font, size, Color::BLACK);
        }
    }

    /// Full-width horizontal rule at the cursor.
    fn rule(&mut self, width: f32, color: Color) {
        let y = self.y;
        self.current().ops.push(DrawOp::Line {
            x1: MARGIN,
            y1: y,
            x2: PAGE_WIDTH - MARGIN,
            y2: y,
            width,
            color,
        });
    }

    /// Bold blue section header with its trailing gap.
    fn section_header(&mut self, label: &str) {
        self.ensure_space(LINE_HEIGHT * 3.0);
        self.text_at(label, MARGIN, Font::HelveticaBold, 12.0, HEADER_BLUE);
        self.y -= LINE_HEIGHT + 5.0;
    }

    /// Muted placeholder line for an absent section.
    fn placeholder(&mut self, text: &str) {
        self.text_line(text, MARGIN, Font::Helvetica, 10.0, MUTED_GRAY);
    }

    fn current(&mut self) -> &mut Page {
        self.pages.last_mut().unwrap()
    }
}

fn draw_official(cursor: &mut PageCursor, label: &str, official: &RatingOfficial) {
    let name = if official.name.is_empty() { "N/A" } else { official.name.as_str() };
    cursor.ensure_space(LINE_HEIGHT * 3.0);
    cursor.text_line(
        &format!("{label}: {name}, {}", official.rank),
        MARGIN,
        Font::Helvetica,
        10.0,
        Color::BLACK,
    );
    if let Some(dodid) = &official.dodid {
        cursor.ensure_space(LINE_HEIGHT);
        cursor.text_line(&format!("  DODID: {dodid}"), MARGIN, Font::Helvetica, 9.0, Color::BLACK);
    }
    if let Some(pmos) = &official.pmos_branch {
        cursor.ensure_space(LINE_HEIGHT);
        cursor.text_line(
            &format!("  PMOSC/Branch: {pmos}"),
            MARGIN,
            Font::Helvetica,
            9.0,
            Color::BLACK,
        );
    }
    cursor.ensure_space(LINE_HEIGHT);
    let position = if official.position.is_empty() { "N/A" } else { official.position.as_str() };
    cursor.text_line(
        &format!("  Duty Assignment: {position}"),
        MARGIN,
        Font::Helvetica,
        9.0,
        Color::BLACK,
    );
    if let Some(org) = &official.organization {
        cursor.ensure_space(LINE_HEIGHT);
        cursor.text_line(
            &format!("  Organization: {org}"),
            MARGIN,
            Font::Helvetica,
            9.0,
            Color::BLACK,
        );
    }
    if !official.email.is_empty() {
        cursor.ensure_space(LINE_HEIGHT);
        cursor.text_line(
            &format!("  Email: {}", official.email),
            MARGIN,
            Font::Helvetica,
            9.0,
            Color::BLACK,
        );
    }
}

/// Render the record to PDF bytes.
pub fn generate_pdf(record: &EvaluationRecord) -> Result<Vec<u8>> {
    let mut cursor = PageCursor::new();
    let form = form_number(record.evaluation_type, record.rank_level);

    // Title block
    cursor.text_at(form, MARGIN, Font::HelveticaBold, 16.0, HEADER_BLUE);
    cursor.y -= LINE_HEIGHT + 5.0;
    cursor.text_line(
        evaluation_title(record.evaluation_type),
        MARGIN,
        Font::HelveticaBold,
        14.0,
        Color::BLACK,
    );
    let duty_title = if record.duty_title.is_empty() { "N/A" } else { record.duty_title.as_str() };
    cursor.text_line(
        &format!("Duty Title: {duty_title}"),
        MARGIN,
        Font::Helvetica,
        11.0,
        Color::BLACK,
    );
    let generated = chrono::Local::now().format("%d %b %Y").to_string();
    cursor.text_at(
        &format!("Generated: {generated}"),
        MARGIN,
        Font::Helvetica,
        10.0,
        DATE_GRAY,
    );
    cursor.y -= SECTION_SPACING;
    cursor.rule(1.0, RULE_GRAY);
    cursor.y -= SECTION_SPACING;

    // Part I
    cursor.section_header(SECTION_LABELS[0]);
    match &record.rated_personnel {
        Some(rp) => {
            let name = if rp.name.is_empty() { "[NOT ENTERED]" } else { rp.name.as_str() };
            cursor.text_at(&format!("Name: {name}"), MARGIN, Font::Helvetica, 10.0, Color::BLACK);
            let rank = if rp.rank.is_empty() {
                record.rank_level.to_string()
            } else {
                rp.rank.clone()
            };
            cursor.text_line(
                &format!("Rank: {rank}"),
                MARGIN + 250.0,
                Font::Helvetica,
                10.0,
                Color::BLACK,
            );

            let dodid = if rp.dodid.is_empty() { "[NOT ENTERED]" } else { rp.dodid.as_str() };
            cursor.text_at(&format!("DODID: {dodid}"), MARGIN, Font::Helvetica, 10.0, Color::BLACK);
            if let Some(branch) = &rp.branch {
                cursor.text_at(
                    &format!("Branch: {branch}"),
                    MARGIN + 250.0,
                    Font::Helvetica,
                    10.0,
                    Color::BLACK,
                );
            }
            cursor.y -= LINE_HEIGHT;

            let unit = if rp.unit_org_station.is_empty() { "[NOT ENTERED]" } else { rp.unit_org_station.as_str() };
            cursor.text_at(&format!("Unit: {unit}"), MARGIN, Font::Helvetica, 10.0, Color::BLACK);
            let uic = if rp.uic.is_empty() { "[NOT ENTERED]" } else { rp.uic.as_str() };
            cursor.text_line(
                &format!("UIC: {uic}"),
                MARGIN + 350.0,
                Font::Helvetica,
                10.0,
                Color::BLACK,
            );

            if !rp.email.is_empty() {
                cursor.text_line(
                    &format!("Email: {}", rp.email),
                    MARGIN,
                    Font::Helvetica,
                    10.0,
                    Color::BLACK,
                );
            }
        },
        None => cursor.placeholder("Administrative data not entered"),
    }

    if let Some(period) = &record.period_covered {
        cursor.y -= 5.0;
        let from = if period.from_date.is_empty() { "[DATE]" } else { period.from_date.as_str() };
        let thru = if period.thru_date.is_empty() { "[DATE]" } else { period.thru_date.as_str() };
        cursor.text_line(
            &format!("Period: {from} - {thru} ({} months)", period.rated_months),
            MARGIN,
            Font::Helvetica,
            10.0,
            Color::BLACK,
        );
    }

    if let Some(reason) = &record.reason_for_submission {
        cursor.text_line(
            &format!("Reason: {} - {}", reason.code, reason.description),
            MARGIN,
            Font::Helvetica,
            10.0,
            Color::BLACK,
        );
    }
    cursor.y -= SECTION_SPACING / 2.0;

    // Part II
    cursor.section_header(SECTION_LABELS[1]);
    match &record.rating_chain {
        Some(chain) => {
            draw_official(&mut cursor, "Rater", &chain.rater);
            cursor.y -= 5.0;
            draw_official(&mut cursor, "Senior Rater", &chain.senior_rater);
            if let Some(ir) = &chain.intermediate_rater {
                cursor.y -= 5.0;
                draw_official(&mut cursor, "Intermediate Rater", ir);
            }
            if let Some(sr) = &chain.supplementary_reviewer {
                cursor.ensure_space(LINE_HEIGHT);
                let name = if sr.name.is_empty() { "N/A" } else { sr.name.as_str() };
                cursor.text_line(
                    &format!("Supplementary Reviewer: {name}"),
                    MARGIN,
                    Font::Helvetica,
                    10.0,
                    Color::BLACK,
                );
            }
        },
        None => cursor.placeholder("Rating chain not entered"),
    }
    cursor.y -= SECTION_SPACING / 2.0;

    // Part III
    cursor.section_header(SECTION_LABELS[2]);
    match &record.duty_description {
        Some(duty) => {
            let title = if !duty.principal_duty_title.is_empty() {
                duty.principal_duty_title.as_str()
            } else if !record.duty_title.is_empty() {
                record.duty_title.as_str()
            } else {
                "N/A"
            };
            cursor.text_line(
                &format!("Principal Duty Title: {title}"),
                MARGIN,
                Font::Helvetica,
                10.0,
                Color::BLACK,
            );

            if !duty.significant_duties.is_empty() {
                cursor.y -= 5.0;
                cursor.text_line(
                    "Significant Duties:",
                    MARGIN,
                    Font::HelveticaBold,
                    10.0,
                    Color::BLACK,
                );
                cursor.wrapped_text(
                    &duty.significant_duties,
                    MARGIN + 10.0,
                    PAGE_WIDTH - 2.0 * MARGIN - 10.0,
                    Font::Helvetica,
                    9.0,
                );
            }

            if let Some(areas) = duty.areas_of_emphasis.as_deref().filter(|a| !a.is_empty()) {
                cursor.y -= 5.0;
                cursor.text_line(
                    "Areas of Emphasis:",
                    MARGIN,
                    Font::HelveticaBold,
                    10.0,
                    Color::BLACK,
                );
                cursor.wrapped_text(
                    areas,
                    MARGIN + 10.0,
                    PAGE_WIDTH - 2.0 * MARGIN - 10.0,
                    Font::Helvetica,
                    9.0,
                );
            }
        },
        None => cursor.placeholder("Duty description not entered"),
    }
    cursor.y -= SECTION_SPACING / 2.0;

    // Part IV
    cursor.ensure_space(LINE_HEIGHT * 3.0);
    cursor.rule(1.0, RULE_GRAY);
    cursor.y -= SECTION_SPACING;
    cursor.section_header(SECTION_LABELS[3]);

    if record.bullets.is_empty() && record.rater_comments.is_none() {
        cursor.placeholder("Rater assessment not entered");
    }

    if !record.bullets.is_empty() {
        cursor.text_at("Performance Bullets:", MARGIN, Font::HelveticaBold, 11.0, Color::BLACK);
        cursor.y -= LINE_HEIGHT + 5.0;

        for category in BulletCategory::ORDER {
            let in_category: Vec<_> = record.bullets_in(category).collect();
            if in_category.is_empty() {
                continue;
            }
            cursor.ensure_space(LINE_HEIGHT * (in_category.len() as f32 + 2.0));
            cursor.text_line(
                &category.as_str().to_uppercase(),
                MARGIN,
                Font::HelveticaBold,
                10.0,
                CATEGORY_BLUE,
            );
            for bullet in in_category {
                cursor.wrapped_text(
                    &format!("- {}", bullet.enhanced),
                    MARGIN + 10.0,
                    PAGE_WIDTH - 2.0 * MARGIN - 20.0,
                    Font::Helvetica,
                    9.0,
                );
                cursor.y -= 2.0;
            }
            cursor.y -= 5.0;
        }
    }

    if let Some(comments) = record.rater_comments.as_deref().filter(|c| !c.is_empty()) {
        cursor.ensure_space(LINE_HEIGHT * 3.0);
        cursor.y -= 10.0;
        cursor.text_line("Rater Comments:", MARGIN, Font::HelveticaBold, 11.0, Color::BLACK);
        cursor.wrapped_text(
            comments,
            MARGIN + 10.0,
            PAGE_WIDTH - 2.0 * MARGIN - 10.0,
            Font::Helvetica,
            9.0,
        );
    }

    // Part V
    cursor.ensure_space(LINE_HEIGHT * 3.0);
    cursor.y -= SECTION_SPACING;
    cursor.rule(1.0, RULE_GRAY);
    cursor.y -= SECTION_SPACING;
    cursor.section_header(SECTION_LABELS[4]);

    if record.senior_rater_assessment.is_none() && record.senior_rater_comments.is_none() {
        cursor.placeholder("Senior rater assessment not entered");
    }

    if let Some(sra) = &record.senior_rater_assessment {
        if let Some(rating) = sra.potential_rating {
            cursor.text_line(
                &format!("Potential: {}", rating.as_str()),
                MARGIN,
                Font::Helvetica,
                10.0,
                Color::BLACK,
            );
        }
        for (label, value) in [
            ("Enumeration", &sra.enumeration),
            ("Promotion", &sra.promotion),
            ("School", &sra.school_recommendation),
            ("Next Assignment", &sra.potential_next_assignment),
        ] {
            if !value.is_empty() {
                cursor.ensure_space(LINE_HEIGHT);
                cursor.text_line(
                    &format!("{label}: {value}"),
                    MARGIN,
                    Font::Helvetica,
                    10.0,
                    Color::BLACK,
                );
            }
        }
    }

    if let Some(comments) = record
        .senior_rater_comments
        .as_deref()
        .filter(|c| !c.is_empty())
    {
        cursor.ensure_space(LINE_HEIGHT * 3.0);
        cursor.y -= 10.0;
        cursor.text_line(
            "Senior Rater Comments:",
            MARGIN,
            Font::HelveticaBold,
            11.0,
            Color::BLACK,
        );
        cursor.wrapped_text(
            comments,
            MARGIN + 10.0,
            PAGE_WIDTH - 2.0 * MARGIN - 10.0,
            Font::Helvetica,
            9.0,
        );
    }

    // Footer
    cursor.ensure_space(LINE_HEIGHT * 3.0);
    cursor.y -= SECTION_SPACING * 2.0;
    cursor.rule(0.5, FOOTER_GRAY);
    cursor.y -= LINE_HEIGHT;
    cursor.text_at(
        "Generated by MilEval - Made for Soldiers by Soldiers",
        MARGIN,
        Font::Helvetica,
        8.0,
        MUTED_GRAY,
    );

    let num_pages = cursor.pages.len();
    let bytes = writer::write_document(&cursor.pages, &[Font::Helvetica, Font::HelveticaBold])?;
    info!("generated {form} PDF export: {num_pages} pages");
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{CategorizedBullet, EvaluationType, RankLevel};

    #[test]
    fn test_empty_record_renders_all_sections() {
        let record = EvaluationRecord::empty(EvaluationType::Ncoer, RankLevel::E5);
        let bytes = generate_pdf(&record).unwrap();
        let text = String::from_utf8_lossy(&bytes);
        for label in section_labels() {
            assert!(text.contains(label), "missing {label}");
        }
        assert!(text.contains("Administrative data not entered"));
        assert!(text.contains("Rating chain not entered"));
    }

    #[test]
    fn test_long_narrative_spills_to_new_page() {
        let mut record = EvaluationRecord::empty(EvaluationType::Oer, RankLevel::O1O3);
        let long = "accomplished the mission under sustained pressure ".repeat(80);
        record.rater_comments = Some(long);
        let bytes = generate_pdf(&record).unwrap();
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("/Count 2"));
    }

    #[test]
    fn test_bullets_render_under_uppercase_category() {
        let mut record = EvaluationRecord::empty(EvaluationType::Ncoer, RankLevel::E6E8);
        record.bullets.push(CategorizedBullet {
            category: BulletCategory::Intellect,
            original: "x".into(),
            enhanced: "mastered the new fire control system in 30 days".into(),
            confidence: 0.9,
        });
        let bytes = generate_pdf(&record).unwrap();
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("INTELLECT"));
        assert!(text.contains("- mastered the new fire control system"));
    }

    #[test]
    fn test_header_carries_form_number() {
        let record = EvaluationRecord::empty(EvaluationType::Oer, RankLevel::O6);
        let bytes = generate_pdf(&record).unwrap();
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("DA FORM 67-10-3"));
        assert!(text.contains("OFFICER EVALUATION REPORT"));
    }
}
