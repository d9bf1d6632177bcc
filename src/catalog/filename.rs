//! Canonical recording filename convention.
//!
//! Audio files are named `Recording_<yyyy-MM-dd_HH-mm-ss>.<ext>`. The codec
//! parses that pattern back into a timestamp, formats new names from a
//! timestamp, and derives the humanized fallback title used when no usable
//! sidecar metadata exists.

use chrono::{Local, NaiveDateTime, TimeZone};
use regex::Regex;
use std::sync::OnceLock;

/// File extensions recognized as recordings, lower-case.
pub const SUPPORTED_EXTENSIONS: [&str; 6] = ["m4a", "mp3", "wav", "aac", "ogg", "flac"];

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Parsed components of a recording file name.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedName {
    /// Timestamp encoded in the name, when it follows the convention
    pub timestamp_millis: Option<i64>,
    /// File name without the extension
    pub base_name: String,
    /// Lower-cased extension
    pub extension: String,
}

fn timestamp_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^Recording_(\d{4}-\d{2}-\d{2}_\d{2}-\d{2}-\d{2})$")
            .expect("recording name pattern is valid")
    })
}

/// Parses a recording file name.
///
/// Returns `None` when the extension is not a supported audio format; such
/// files are not part of the catalog at all. A supported file whose base name
/// does not follow the timestamp convention still parses, with
/// `timestamp_millis: None`.
pub fn parse(file_name: &str) -> Option<ParsedName> {
    let (base_name, extension) = file_name.rsplit_once('.')?;
    if base_name.is_empty() {
        return None;
    }
    let extension = extension.to_ascii_lowercase();
    if !SUPPORTED_EXTENSIONS.contains(&extension.as_str()) {
        return None;
    }

    let timestamp_millis = timestamp_pattern()
        .captures(base_name)
        .and_then(|captures| parse_timestamp(&captures[1]));

    Some(ParsedName {
        timestamp_millis,
        base_name: base_name.to_string(),
        extension,
    })
}

/// Formats a file name from a timestamp, the inverse of [`parse`]. Used when
/// synthesizing metadata for recordings that predate the sidecar format.
pub fn format(timestamp_millis: i64, extension: &str) -> String {
    match Local.timestamp_millis_opt(timestamp_millis).single() {
        Some(local) => format!("Recording_{}.{extension}", local.format(TIMESTAMP_FORMAT)),
        None => format!("Recording_{timestamp_millis}.{extension}"),
    }
}

/// Interprets a `yyyy-MM-dd_HH-mm-ss` string as local time.
fn parse_timestamp(raw: &str) -> Option<i64> {
    let naive = NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT).ok()?;
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|local| local.timestamp_millis())
}

/// Derives the human-facing title used when no sidecar title is available.
///
/// A name following the timestamp convention renders as
/// `yyyy-MM-dd HH mm ss`; anything else is the base name with the
/// `Recording_` prefix stripped and underscores replaced by spaces.
pub fn humanized_title(parsed: &ParsedName) -> String {
    if let Some(millis) = parsed.timestamp_millis {
        if let Some(local) = Local.timestamp_millis_opt(millis).single() {
            return local.format("%Y-%m-%d %H %M %S").to_string();
        }
    }
    parsed
        .base_name
        .strip_prefix("Recording_")
        .unwrap_or(&parsed.base_name)
        .replace('_', " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn local_millis(raw: &str) -> i64 {
        let naive = NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT).unwrap();
        Local
            .from_local_datetime(&naive)
            .earliest()
            .unwrap()
            .timestamp_millis()
    }

    #[test]
    fn parses_canonical_name() {
        let parsed = parse("Recording_2024-05-01_09-30-00.m4a").unwrap();
        assert_eq!(parsed.base_name, "Recording_2024-05-01_09-30-00");
        assert_eq!(parsed.extension, "m4a");
        assert_eq!(
            parsed.timestamp_millis,
            Some(local_millis("2024-05-01_09-30-00"))
        );
    }

    #[test]
    fn extension_matching_is_case_insensitive() {
        let parsed = parse("Recording_2024-05-01_09-30-00.M4A").unwrap();
        assert_eq!(parsed.extension, "m4a");
    }

    #[test]
    fn unsupported_extensions_are_excluded() {
        assert!(parse("Recording_2024-05-01_09-30-00.txt").is_none());
        assert!(parse("Recording_2024-05-01_09-30-00.json").is_none());
        assert!(parse("no_extension").is_none());
    }

    #[test]
    fn non_canonical_base_name_parses_without_timestamp() {
        let parsed = parse("Recording_guest_lecture.mp3").unwrap();
        assert_eq!(parsed.timestamp_millis, None);
        assert_eq!(parsed.base_name, "Recording_guest_lecture");
    }

    #[test]
    fn format_round_trips_through_parse() {
        let millis = local_millis("2023-11-12_18-05-43");
        let name = format(millis, "ogg");
        assert_eq!(name, "Recording_2023-11-12_18-05-43.ogg");
        let parsed = parse(&name).unwrap();
        assert_eq!(parsed.timestamp_millis, Some(millis));
    }

    #[test]
    fn humanized_title_renders_timestamp() {
        let parsed = parse("Recording_2024-05-01_09-30-00.m4a").unwrap();
        assert_eq!(humanized_title(&parsed), "2024-05-01 09 30 00");
    }

    #[test]
    fn humanized_title_strips_prefix_and_underscores() {
        let parsed = parse("Recording_guest_lecture.mp3").unwrap();
        assert_eq!(humanized_title(&parsed), "guest lecture");
    }
}
