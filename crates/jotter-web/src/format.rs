//! Display helpers for note metadata.

use std::fmt::Display;

use chrono::{DateTime, TimeZone};

/// Subheader shown on each note card.
pub fn updated_label<Tz>(updated_at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    format!("Updated {}", updated_at.format("%Y-%m-%d %H:%M"))
}

/// Confirmation prompt for deleting a note.
pub fn delete_prompt(title: &str) -> String {
    format!("Delete \u{201c}{title}\u{201d}? This cannot be undone.")
}
