//! Base-14 font metrics and text measurement.
//!
//! Width tables come from the Adobe AFM files for Helvetica and
//! Helvetica-Bold, in 1/1000 em units. Only WinAnsi-reachable ASCII is
//! tabulated; anything else measures at the average lowercase width so
//! wrapping stays conservative rather than overflowing the margin.

/// The two standard fonts the renderer embeds by reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Font {
    Helvetica,
    HelveticaBold,
}

impl Font {
    /// PostScript base font name used in the font dictionary.
    pub fn base_name(&self) -> &'static str {
        match self {
            Font::Helvetica => "Helvetica",
            Font::HelveticaBold => "Helvetica-Bold",
        }
    }

    /// Resource name under the page's /Font dictionary.
    pub fn resource_name(&self) -> &'static str {
        match self {
            Font::Helvetica => "F1",
            Font::HelveticaBold => "F2",
        }
    }

    /// Glyph width of `c` in 1/1000 em.
    pub fn char_width(&self, c: char) -> u32 {
        match self {
            Font::Helvetica => helvetica_width(c),
            Font::HelveticaBold => helvetica_bold_width(c),
        }
    }

    /// Measured width of `text` at `size` points.
    pub fn text_width(&self, text: &str, size: f32) -> f32 {
        let units: u32 = text.chars().map(|c| self.char_width(c)).sum();
        units as f32 * size / 1000.0
    }
}

fn helvetica_width(c: char) -> u32 {
    match c {
        ' ' => 278,
        '!' => 278,
        '"' => 355,
        '#' => 556,
        '$' => 556,
        '%' => 889,
        '&' => 667,
        '\'' => 191,
        '(' | ')' => 333,
        '*' => 389,
        '+' => 584,
        ',' => 278,
        '-' => 333,
        '.' => 278,
        '/' => 278,
        '0'..='9' => 556,
        ':' | ';' => 278,
        '<' | '=' | '>' => 584,
        '?' => 556,
        '@' => 1015,
        'A' => 667,
        'B' => 667,
        'C' => 722,
        'D' => 722,
        'E' => 667,
        'F' => 611,
        'G' => 778,
        'H' => 722,
        'I' => 278,
        'J' => 500,
        'K' => 667,
        'L' => 556,
        'M' => 833,
        'N' => 722,
        'O' => 778,
        'P' => 667,
        'Q' => 778,
        'R' => 722,
        'S' => 667,
        'T' => 611,
        'U' => 722,
        'V' => 667,
        'W' => 944,
        'X' => 667,
        'Y' => 667,
        'Z' => 611,
        '[' | ']' => 278,
        '\\' => 278,
        '^' => 469,
        '_' => 556,
        '`' => 333,
        'a' => 556,
        'b' => 556,
        'c' => 500,
        'd' => 556,
        'e' => 556,
        'f' => 278,
        'g' => 556,
        'h' => 556,
        'i' => 222,
        'j' => 222,
        'k' => 500,
        'l' => 222,
        'm' => 833,
        'n' => 556,
        'o' => 556,
        'p' => 556,
        'q' => 556,
        'r' => 333,
        's' => 500,
        't' => 278,
        'u' => 556,
        'v' => 500,
        'w' => 722,
        'x' => 500,
        'y' => 500,
        'z' => 500,
        '{' | '}' => 334,
        '|' => 260,
        '~' => 584,
        _ => 556,
    }
}

fn helvetica_bold_width(c: char) -> u32 {
    match c {
        ' ' => 278,
        '!' => 333,
        '"' => 474,
        '#' => 556,
        '$' => 556,
        '%' => 889,
        '&' => 722,
        '\'' => 238,
        '(' | ')' => 333,
        '*' => 389,
        '+' => 584,
        ',' => 278,
        '-' => 333,
        '.' => 278,
        '/' => 278,
        '0'..='9' => 556,
        ':' | ';' => 333,
        '<' | '=' | '>' => 584,
        '?' => 611,
        '@' => 975,
        'A' => 722,
        'B' => 722,
        'C' => 722,
        'D' => 722,
        'E' => 667,
        'F' => 611,
        'G' => 778,
        'H' => 722,
        'I' => 278,
        'J' => 556,
        'K' => 722,
        'L' => 611,
        'M' => 833,
        'N' => 722,
        'O' => 778,
        'P' => 667,
        'Q' => 778,
        'R' => 722,
        'S' => 667,
        'T' => 611,
        'U' => 722,
        'V' => 667,
        'W' => 944,
        'X' => 667,
        'Y' => 667,
        'Z' => 611,
        '[' | ']' => 333,
        '\\' => 278,
        '^' => 584,
        '_' => 556,
        '`' => 333,
        'a' => 556,
        'b' => 611,
        'c' => 556,
        'd' => 611,
        'e' => 556,
        'f' => 333,
        'g' => 611,
        'h' => 611,
        'i' => 278,
        'j' => 278,
        'k' => 556,
        'l' => 278,
        'm' => 889,
        'n' => 611,
        'o' => 611,
        'p' => 611,
        'q' => 611,
        'r' => 389,
        's' => 556,
        't' => 333,
        'u' => 611,
        'v' => 556,
        'w' => 778,
        'x' => 556,
        'y' => 556,
        'z' => 500,
        '{' | '}' => 389,
        '|' => 280,
        '~' => 584,
        _ => 556,
    }
}

/// Greedy word wrap: append words while the measured line fits, flush on
/// overflow, and always flush the final line. Single words wider than
/// `max_width` get a line of their own rather than being split.
pub fn wrap_text(text: &str, font: Font, size: f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split(' ') {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };

        if font.text_width(&candidate, size) > max_width && !current.is_empty() {
            lines.push(current);
            current = word.to_string();
        } else {
            current = candidate;
        }
    }

    lines.push(current);
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_widths() {
        // "Hi" in Helvetica: H=722, i=222
        let width = Font::Helvetica.text_width("Hi", 10.0);
        assert!((width - 9.44).abs() < 0.001);
        // Bold runs wider
        assert!(
            Font::HelveticaBold.text_width("abc", 10.0) > Font::Helvetica.text_width("abc", 10.0)
        );
    }

    #[test]
    fn test_unknown_char_has_fallback_width() {
        assert_eq!(Font::Helvetica.char_width('\u{00e9}'), 556);
    }

    #[test]
    fn test_wrap_respects_max_width() {
        let text = "the quick brown fox jumps over the lazy dog near the riverbank";
        let lines = wrap_text(text, Font::Helvetica, 9.0, 100.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(Font::Helvetica.text_width(line, 9.0) <= 100.0 + f32::EPSILON);
        }
        // Nothing lost in the wrap
        assert_eq!(lines.join(" "), text);
    }

    #[test]
    fn test_wrap_flushes_last_line() {
        let lines = wrap_text("single", Font::Helvetica, 9.0, 500.0);
        assert_eq!(lines, vec!["single"]);
    }

    #[test]
    fn test_wrap_empty_text_yields_one_empty_line() {
        let lines = wrap_text("", Font::Helvetica, 9.0, 100.0);
        assert_eq!(lines, vec![""]);
    }

    #[test]
    fn test_oversized_word_gets_own_line() {
        let lines = wrap_text("a Supercalifragilistic b", Font::Helvetica, 12.0, 40.0);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "Supercalifragilistic");
    }
}
