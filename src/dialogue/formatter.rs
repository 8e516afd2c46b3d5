//! Curriculum rendering.

use std::fmt::Write as _;

use crate::knowledge::{CourseEntry, Curriculum};

/// Render a regime's curriculum as text.
///
/// A header line naming the career and regime, then one line per semester
/// with its course names joined by commas. Entries without a name are
/// skipped.
#[must_use]
pub fn format_curriculum(curriculum: &Curriculum, career_name: &str, regime_name: &str) -> String {
    let mut text = format!("El plan de estudios de {career_name} ({regime_name}) es:\n");
    for (semester, courses) in curriculum {
        let names: Vec<&str> = courses.iter().filter_map(CourseEntry::name).collect();
        let _ = writeln!(text, "{semester}: {}.", names.join(", "));
    }
    text
}
