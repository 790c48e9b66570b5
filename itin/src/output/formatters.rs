//! Output formatter implementations.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::event::Event;
use crate::trip::Trip;
use crate::{Error, Result};

/// Row-oriented view of a domain object for tabular output.
///
/// Implementations decide which fields appear in list output and how each
/// is rendered; the same rows feed both the table and CSV writers.
pub trait Tabular {
    /// Column names, in output order.
    fn headers() -> &'static [&'static str];

    /// A single row, aligned with [`Self::headers`].
    fn row(&self) -> Vec<String>;
}

/// Renders an optional timestamp as `HH:MM`, or `-` when unset.
fn format_time(time: Option<NaiveDateTime>) -> String {
    time.map_or_else(|| "-".to_string(), |t| t.format("%H:%M").to_string())
}

/// Renders a text field, substituting `-` for the empty string.
fn format_text(text: &str) -> String {
    if text.is_empty() {
        "-".to_string()
    } else {
        text.to_string()
    }
}

impl Tabular for Trip {
    fn headers() -> &'static [&'static str] {
        &["id", "name", "destination", "start", "end"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.destination.clone(),
            self.dates.start().to_string(),
            self.dates.end().to_string(),
        ]
    }
}

impl Tabular for Event {
    fn headers() -> &'static [&'static str] {
        &[
            "id", "date", "start", "end", "category", "title", "location", "pinned",
        ]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.event_date.to_string(),
            format_time(self.start_time),
            format_time(self.end_time),
            self.category.as_str().to_string(),
            self.title.clone(),
            format_text(&self.location),
            if self.pinned { "yes" } else { "no" }.to_string(),
        ]
    }
}

/// Formats items as a tab-separated table with an uppercase header line.
///
/// # Examples
///
/// ```
/// use itin::output::format_table;
/// use itin::Trip;
///
/// let trips: Vec<Trip> = Vec::new();
/// let table = format_table(&trips);
/// assert!(table.starts_with("ID\tNAME"));
/// ```
#[must_use]
pub fn format_table<T: Tabular>(items: &[T]) -> String {
    let mut lines = Vec::with_capacity(items.len() + 1);

    let header_line = T::headers()
        .iter()
        .map(|s| s.to_uppercase())
        .collect::<Vec<_>>()
        .join("\t");
    lines.push(header_line);

    for item in items {
        lines.push(item.row().join("\t"));
    }

    lines.join("\n")
}

/// Formats a serializable value as pretty-printed JSON.
///
/// # Errors
///
/// Returns a validation error if serialization fails.
pub fn format_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| Error::Validation {
        field: "json_output".to_string(),
        message: format!("failed to serialize to JSON: {e}"),
    })
}

/// Formats a serializable value as YAML.
///
/// # Errors
///
/// Returns a serialization error if encoding fails.
pub fn format_yaml<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_yaml::to_string(value)?)
}
