//! Final textual report printed after a session.

use crate::outline::Section;
use std::fmt;

/// Fill the post-hoc bookkeeping fields.
///
/// `weight` is each section's share of the planned total. When any actual time
/// was tracked, `recommended_seconds` spreads the actual total by weight.
pub fn annotate(sections: &mut [Section]) {
    let planned: u64 = sections.iter().map(|s| s.seconds).sum();
    if planned == 0 {
        return;
    }

    let tracked = sections.iter().any(|s| s.actual_seconds.is_some());
    let actual: u64 = sections.iter().filter_map(|s| s.actual_seconds).sum();

    for section in sections.iter_mut() {
        let weight = section.seconds as f64 / planned as f64;
        section.weight = Some(weight);
        if tracked {
            section.recommended_seconds = Some((weight * actual as f64).round() as u64);
        }
    }
}

/// The final report: the document title, then one entry per section.
pub struct Report<'a> {
    pub title: &'a str,
    pub sections: &'a [Section],
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;

        for section in self.sections {
            writeln!(f, "{}", section)?;
            if let Some(actual) = section.actual_seconds {
                writeln!(f, "-> actual seconds ({}s)", actual)?;
            }
            if let (Some(recommended), Some(weight)) =
                (section.recommended_seconds, section.weight)
            {
                writeln!(f, "-> recommended seconds ({}s)", recommended)?;
                writeln!(f, "-> weight ({:.2})", weight)?;
            }
        }

        Ok(())
    }
}

/// Render the report to a string.
pub fn render(title: &str, sections: &[Section]) -> String {
    Report { title, sections }.to_string()
}
