//! Prohibited-content scanning for narrative text.
//!
//! Evaluation narratives may not use personal pronouns, predictive language,
//! or references to protected personal matters. All findings here are
//! warnings since context can make a flagged word legitimate (a duty title
//! containing "Family Readiness", for example) and a human reviewer makes
//! the final call.

use super::{Severity, ValidationError};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // "I" must stay case-sensitive: lowercase "i" inside ordinary words is
    // not the pronoun, and narratives are sentence-cased.
    static ref PRONOUN_I: Regex = Regex::new(r"\bI\b").unwrap();
    static ref PRONOUN_ME: Regex = Regex::new(r"(?i)\bme\b").unwrap();
    static ref PRONOUN_MY: Regex = Regex::new(r"(?i)\bmy\b").unwrap();
    static ref PRONOUN_MINE: Regex = Regex::new(r"(?i)\bmine\b").unwrap();
    static ref PRONOUN_MYSELF: Regex = Regex::new(r"(?i)\bmyself\b").unwrap();
    static ref PREDICTIVE_WILL: Regex = Regex::new(r"(?i)\bwill\b").unwrap();
    static ref SENSITIVE_FAMILY: Regex = Regex::new(r"(?i)\bfamily\b").unwrap();
    static ref SENSITIVE_MEDICAL: Regex = Regex::new(r"(?i)\bmedical\b").unwrap();
    static ref SENSITIVE_DIAGNOSIS: Regex = Regex::new(r"(?i)\bdiagnos").unwrap();
    static ref SENSITIVE_RELIGION: Regex = Regex::new(r"(?i)\breligion\b").unwrap();
}

/// Scan narrative text for prohibited words and phrases. One finding per
/// rule that matches, regardless of how many times it matches.
pub fn check_prohibited_content(text: &str, field: &str) -> Vec<ValidationError> {
    let mut findings = Vec::new();

    let pronouns: [(&Regex, &str); 5] = [
        (&PRONOUN_I, "I"),
        (&PRONOUN_ME, "me"),
        (&PRONOUN_MY, "my"),
        (&PRONOUN_MINE, "mine"),
        (&PRONOUN_MYSELF, "myself"),
    ];
    for (pattern, word) in pronouns {
        if pattern.is_match(text) {
            findings.push(
                ValidationError::new(
                    field,
                    format!(
                        "Personal pronoun \"{word}\" should not be used in evaluation narratives"
                    ),
                    Severity::Warning,
                )
                .with_reference("DA Pam 623-3"),
            );
        }
    }

    if PREDICTIVE_WILL.is_match(text) {
        findings.push(
            ValidationError::new(
                field,
                "Avoid predictive language (\"will\") - use past tense to describe accomplishments",
                Severity::Warning,
            )
            .with_reference("DA Pam 623-3"),
        );
    }

    let sensitive: [(&Regex, &str); 4] = [
        (&SENSITIVE_FAMILY, "Avoid mentioning family matters"),
        (&SENSITIVE_MEDICAL, "Avoid mentioning medical conditions"),
        (&SENSITIVE_DIAGNOSIS, "Avoid mentioning diagnoses"),
        (&SENSITIVE_RELIGION, "Avoid mentioning religion"),
    ];
    for (pattern, message) in sensitive {
        if pattern.is_match(text) {
            findings.push(
                ValidationError::new(field, message, Severity::Warning)
                    .with_reference("AR 623-3"),
            );
        }
    }

    findings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pronoun_i_is_case_sensitive() {
        assert_eq!(check_prohibited_content("I led the team", "f").len(), 1);
        // lowercase standalone "i" is not the pronoun rule's concern
        assert!(check_prohibited_content("section i of the report", "f").is_empty());
        // "I" inside a word never matches
        assert!(check_prohibited_content("Increased readiness", "f").is_empty());
    }

    #[test]
    fn test_other_pronouns_are_case_insensitive() {
        assert_eq!(check_prohibited_content("MY squad", "f").len(), 1);
        assert_eq!(check_prohibited_content("gave it to Me", "f").len(), 1);
    }

    #[test]
    fn test_predictive_will() {
        let findings = check_prohibited_content("Soldier will excel", "f");
        assert!(findings.iter().any(|f| f.message.contains("predictive")));
    }

    #[test]
    fn test_sensitive_topics() {
        let findings =
            check_prohibited_content("overcame medical issues and family hardship", "f");
        assert!(findings.iter().any(|f| f.message.contains("medical")));
        assert!(findings.iter().any(|f| f.message.contains("family")));
    }

    #[test]
    fn test_diagnosis_prefix_match() {
        assert_eq!(check_prohibited_content("after a diagnosis", "f").len(), 1);
        assert_eq!(check_prohibited_content("was diagnosed with", "f").len(), 1);
    }

    #[test]
    fn test_one_finding_per_rule() {
        // "my" appears twice but yields a single finding
        let findings = check_prohibited_content("my team and my mission", "f");
        assert_eq!(findings.len(), 1);
    }

    #[test]
    fn test_clean_narrative() {
        let findings = check_prohibited_content(
            "Trained 40 Soldiers; achieved 95% qualification rate during the rated period",
            "f",
        );
        assert!(findings.is_empty());
    }

    #[test]
    fn test_all_findings_are_warnings() {
        let findings = check_prohibited_content("I will describe my family", "f");
        assert!(findings.len() >= 3);
        assert!(findings.iter().all(|f| f.severity == Severity::Warning));
    }
}
