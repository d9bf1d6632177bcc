//! Catalog listing command.

use crate::catalog::CatalogScanner;
use crate::config::LecternConfig;
use chrono::{Local, TimeZone};
use console::style;

/// Prints the local catalog, newest recording first.
pub async fn handle_list() -> anyhow::Result<()> {
    let config = LecternConfig::load()?;
    let recordings_dir = config.recordings_dir()?;

    let records = CatalogScanner::new(&recordings_dir).scan();
    if records.is_empty() {
        println!("No recordings in {}", recordings_dir.display());
        return Ok(());
    }

    for record in &records {
        let recorded = Local
            .timestamp_millis_opt(record.timestamp_millis)
            .single()
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "unknown".to_string());
        println!(
            "{}  {}  {}  {}",
            style(&record.title).bold(),
            recorded,
            format_duration(record.duration_millis),
            style(record.file_name.as_str()).dim(),
        );
    }
    println!();
    println!("{} recording(s)", records.len());
    Ok(())
}

/// Renders a millisecond duration as `mm:ss`, or `h:mm:ss` past an hour.
fn format_duration(millis: u64) -> String {
    let total_secs = millis / 1000;
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes:02}:{seconds:02}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn durations_render_compactly() {
        assert_eq!(format_duration(0), "00:00");
        assert_eq!(format_duration(185_000), "03:05");
        assert_eq!(format_duration(3_600_000), "1:00:00");
    }
}
