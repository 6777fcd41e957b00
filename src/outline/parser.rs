//! Indentation-sensitive outline parser.
//!
//! The first line of a document is its title. Every following line is
//! `<indent><numbering?><title>(<Xh><Ym><Zs><+|->)`, where the parenthesized
//! duration and all of its parts are optional. Indentation builds the
//! hierarchy: deeper lines are children of the line above, equal lines are
//! siblings, shallower lines close groups until a matching level is found.

use regex::{Captures, Regex};
use std::sync::LazyLock;

use super::error::ParseError;
use super::section::Section;

static LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\s*)(?:\w+\.)?\s*([^(]*)\(?(\d*h)?(\d*m)?(\d*s)?([+-])?\)?$").unwrap()
});

/// A parsed document: its title and the timed sections in document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Outline {
    pub title: String,
    pub sections: Vec<Section>,
}

impl Outline {
    /// Sum of all planned durations.
    pub fn total_seconds(&self) -> u64 {
        self.sections.iter().map(|s| s.seconds).sum()
    }
}

/// An entry of the ancestor chain while parsing.
struct Frame {
    prefix: String,
    qualified_name: String,
    indentation: usize,
}

impl Frame {
    fn new(section: &Section, indentation: usize) -> Self {
        Self {
            prefix: section.prefix.clone(),
            qualified_name: section.qualified_name(),
            indentation,
        }
    }
}

/// Parse a whole document. Fails on the first bad line.
pub fn parse_outline(text: &str) -> Result<Outline, ParseError> {
    let mut lines = text.lines();
    let title = lines.next().unwrap_or_default().to_string();

    let mut sections = Vec::new();
    let mut stack: Vec<Frame> = Vec::new();

    for line in lines {
        if line.trim().is_empty() {
            continue;
        }

        let (mut section, indentation) = parse_line(line)?;

        let Some(top) = stack.last() else {
            stack.push(Frame::new(&section, indentation));
            sections.push(section);
            continue;
        };

        if indentation > top.indentation {
            section.prefix = top.qualified_name.clone();
            stack.push(Frame::new(&section, indentation));
        } else {
            while stack
                .last()
                .is_some_and(|frame| frame.indentation > indentation)
            {
                stack.pop();
            }
            // Shallower than every open group: the line starts a new top level.
            match stack.pop() {
                Some(sibling) => section.prefix = sibling.prefix,
                None => section.prefix.clear(),
            }
            stack.push(Frame::new(&section, indentation));
        }

        // The first section is kept even without a duration; later
        // zero-duration lines only group their children.
        if section.seconds != 0 || sections.is_empty() {
            sections.push(section);
        } else {
            tracing::trace!(group = %section.qualified_name(), "header line");
        }
    }

    tracing::debug!(title = %title, sections = sections.len(), "parsed outline");

    Ok(Outline { title, sections })
}

/// Parse a duration expression such as `1h30m`, `45s+` or `(2m-)`.
///
/// Returns `(seconds, plus, minus)`. An empty expression is zero seconds.
pub fn parse_duration(expr: &str) -> Result<(u64, bool, bool), ParseError> {
    let wrapped = format!("({})", expr.trim().trim_start_matches('(').trim_end_matches(')'));
    match parse_line(&wrapped) {
        Ok((section, _)) if section.title.is_empty() => {
            Ok((section.seconds, section.plus, section.minus))
        }
        _ => Err(ParseError::BadDuration(expr.to_string())),
    }
}

fn parse_line(line: &str) -> Result<(Section, usize), ParseError> {
    let caps = LINE_RE
        .captures(line)
        .ok_or_else(|| ParseError::MalformedLine(line.to_string()))?;

    let indentation = caps.get(1).map_or(0, |m| m.as_str().chars().count());
    let title = caps.get(2).map_or("", |m| m.as_str()).trim_end();

    let mut seconds: u64 = 0;
    for (group, unit) in [(3, 3600), (4, 60), (5, 1)] {
        let part = component(&caps, group, line)?;
        seconds = part
            .checked_mul(unit)
            .and_then(|part| seconds.checked_add(part))
            .ok_or_else(|| ParseError::BadDuration(line.to_string()))?;
    }

    let marker = caps.get(6).map(|m| m.as_str());

    let section = Section {
        plus: marker == Some("+"),
        minus: marker == Some("-"),
        ..Section::new(title, seconds)
    };

    Ok((section, indentation))
}

/// Numeric value of an `h`/`m`/`s` component, 0 when absent.
fn component(caps: &Captures, group: usize, line: &str) -> Result<u64, ParseError> {
    let Some(m) = caps.get(group) else {
        return Ok(0);
    };
    let digits = &m.as_str()[..m.as_str().len() - 1];
    digits
        .parse::<u64>()
        .map_err(|_| ParseError::BadDuration(line.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const MORNING: &str = "Morning Routine
Wake up (5m)
Breakfast
  Coffee (3m)
  Toast (2m+)
Commute (15m-)
";

    fn names(outline: &Outline) -> Vec<String> {
        outline.sections.iter().map(|s| s.qualified_name()).collect()
    }

    #[test]
    fn test_parse_duration_components() {
        for h in [None, Some(0u64), Some(2)] {
            for m in [None, Some(0u64), Some(7), Some(90)] {
                for s in [None, Some(0u64), Some(5), Some(61)] {
                    let mut expr = String::new();
                    if let Some(h) = h {
                        expr.push_str(&format!("{}h", h));
                    }
                    if let Some(m) = m {
                        expr.push_str(&format!("{}m", m));
                    }
                    if let Some(s) = s {
                        expr.push_str(&format!("{}s", s));
                    }
                    let expected =
                        h.unwrap_or(0) * 3600 + m.unwrap_or(0) * 60 + s.unwrap_or(0);
                    let (seconds, _, _) = parse_duration(&expr).unwrap();
                    assert_eq!(seconds, expected, "expr {:?}", expr);
                }
            }
        }
    }

    #[test]
    fn test_parse_duration_hours_use_3600() {
        assert_eq!(parse_duration("1h").unwrap(), (3600, false, false));
        assert_eq!(parse_duration("(1h30m)").unwrap(), (5400, false, false));
    }

    #[test]
    fn test_parse_duration_markers() {
        assert_eq!(parse_duration("2m+").unwrap(), (120, true, false));
        assert_eq!(parse_duration("10s-").unwrap(), (10, false, true));
    }

    #[test]
    fn test_parse_duration_missing_digits() {
        assert!(matches!(
            parse_duration("m"),
            Err(ParseError::BadDuration(_))
        ));
    }

    #[test]
    fn test_parse_duration_error_quotes_input() {
        assert_eq!(
            parse_duration("1h x"),
            Err(ParseError::BadDuration("1h x".to_string()))
        );
        assert_eq!(
            parse_duration("m"),
            Err(ParseError::BadDuration("m".to_string()))
        );
        assert_eq!(
            parse_duration("5 minutes"),
            Err(ParseError::BadDuration("5 minutes".to_string()))
        );
    }

    #[test]
    fn test_parse_example_document() {
        let outline = parse_outline(MORNING).unwrap();
        assert_eq!(outline.title, "Morning Routine");
        assert_eq!(
            names(&outline),
            vec!["Wake up", "Breakfast >> Coffee", "Breakfast >> Toast", "Commute"]
        );
        let seconds: Vec<u64> = outline.sections.iter().map(|s| s.seconds).collect();
        assert_eq!(seconds, vec![300, 180, 120, 900]);
        assert_eq!(outline.total_seconds(), 1500);

        let toast = &outline.sections[2];
        assert!(toast.plus);
        assert!(!toast.minus);
        let commute = &outline.sections[3];
        assert!(!commute.plus);
        assert!(commute.minus);
    }

    #[test]
    fn test_title_is_verbatim() {
        let outline = parse_outline("  ((( Not a section line \nA (1s)").unwrap();
        assert_eq!(outline.title, "  ((( Not a section line ");
    }

    #[test]
    fn test_title_is_right_trimmed() {
        let outline = parse_outline("T\nSpaced out    (1m)\n").unwrap();
        assert_eq!(outline.sections[0].title, "Spaced out");
    }

    #[test]
    fn test_numbering_is_ignored() {
        let outline = parse_outline("T\n1. Intro (1m)\n  a. Detail (30s)\n").unwrap();
        assert_eq!(names(&outline), vec!["Intro", "Intro >> Detail"]);
    }

    #[test]
    fn test_indentation_hierarchy() {
        let text = "Doc
A (1s)
B (1s)
  C (1s)
  D (1s)
    E (1s)
  F (1s)
G (1s)
";
        let outline = parse_outline(text).unwrap();
        assert_eq!(
            names(&outline),
            vec![
                "A",
                "B",
                "B >> C",
                "B >> D",
                "B >> D >> E",
                "B >> F",
                "G",
            ]
        );
    }

    #[test]
    fn test_zero_duration_groups_are_prefix_sources() {
        let text = "Doc
Intro (1m)
Part one
  Chapter
    Scene (2m)
  Aside (1m)
";
        let outline = parse_outline(text).unwrap();
        assert_eq!(
            names(&outline),
            vec!["Intro", "Part one >> Chapter >> Scene", "Part one >> Aside"]
        );
    }

    #[test]
    fn test_first_section_kept_without_duration() {
        let outline = parse_outline("Doc\nHeader\n  Child (1m)\nEmpty\n").unwrap();
        assert_eq!(names(&outline), vec!["Header", "Header >> Child"]);
        assert_eq!(outline.sections[0].seconds, 0);
    }

    #[test]
    fn test_only_first_line_without_duration() {
        let outline = parse_outline("Doc\nLonely\n").unwrap();
        assert_eq!(outline.sections.len(), 1);
        assert_eq!(outline.sections[0].title, "Lonely");
    }

    #[test]
    fn test_shallower_than_every_group() {
        let outline = parse_outline("Doc\n    Deep (1m)\n  Shallow (1m)\n").unwrap();
        assert_eq!(names(&outline), vec!["Deep", "Shallow"]);
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let outline = parse_outline("Doc\nGroup\n  A (1m)\n\n  B (1m)\n").unwrap();
        assert_eq!(names(&outline), vec!["Group", "Group >> A", "Group >> B"]);
    }

    #[test]
    fn test_malformed_line_aborts() {
        let err = parse_outline("Doc\nA (1m)\nnot a valid % line(((\nB (1m)\n").unwrap_err();
        assert_eq!(
            err,
            ParseError::MalformedLine("not a valid % line(((".to_string())
        );
    }

    #[test]
    fn test_unknown_unit_is_malformed() {
        let err = parse_outline("Doc\nA (5x)\n").unwrap_err();
        assert!(matches!(err, ParseError::MalformedLine(_)));
    }

    #[test]
    fn test_bad_duration_aborts() {
        let err = parse_outline("Doc\nA (1m)\nB (hm)\n").unwrap_err();
        assert_eq!(err, ParseError::BadDuration("B (hm)".to_string()));
    }

    #[test]
    fn test_overflowing_duration() {
        let err = parse_outline("Doc\nA (99999999999999999999h)\n").unwrap_err();
        assert!(matches!(err, ParseError::BadDuration(_)));
    }

    #[test]
    fn test_both_markers_rejected() {
        let err = parse_outline("Doc\nA (1m+-)\n").unwrap_err();
        assert!(matches!(err, ParseError::MalformedLine(_)));
    }

    #[test]
    fn test_empty_document() {
        let outline = parse_outline("").unwrap();
        assert_eq!(outline, Outline::default());
    }
}
