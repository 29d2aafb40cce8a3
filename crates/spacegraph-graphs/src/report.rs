//! Plain-text APOD detail report

use spacegraph_common::{ApodEntry, Result};
use std::io::Write;

/// Heading label for the interval at `index`, falling back to `interval N` (1-based)
pub fn interval_label(labels: &[String], index: usize) -> String {
    labels
        .get(index)
        .cloned()
        .unwrap_or_else(|| format!("interval {}", index + 1))
}

/// Write every APOD entry grouped by interval.
///
/// Each interval gets an `APOD for <label>:` heading, then each entry prints
/// title, date, URL and explanation in that order followed by a blank line.
pub fn render_detail<W: Write>(
    writer: &mut W,
    intervals: &[Vec<ApodEntry>],
    labels: &[String],
) -> Result<()> {
    for (index, entries) in intervals.iter().enumerate() {
        writeln!(writer, "APOD for {}:", interval_label(labels, index))?;
        for entry in entries {
            writeln!(writer, "Title: {}", entry.title)?;
            writeln!(writer, "Date: {}", entry.date)?;
            writeln!(writer, "URL: {}", entry.url)?;
            writeln!(writer, "Explanation: {}", entry.explanation)?;
            writeln!(writer)?;
        }
    }
    writer.flush()?;
    Ok(())
}
