//! CSV ingestion
//!
//! Turns exported voice-note rows into [`VoiceEntry`] values. Malformed optional
//! fields are coerced to defaults (with a warning) so a single bad cell never
//! aborts the load. Only structural problems (missing file, broken CSV) are errors.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use csv::StringRecord;
use tracing::{debug, warn};

use crate::config::IngestConfig;
use crate::entry::VoiceEntry;
use crate::error::{Result, VoiceIdeasError};

/// Column names in lookup order: canonical name first, then its alias
const ID_COLUMNS: &[&str] = &["id"];
const USER_ID_COLUMNS: &[&str] = &["user_id"];
const TRANSCRIPT_COLUMNS: &[&str] = &["transcript", "text"];
const TAGS_COLUMNS: &[&str] = &["tags"];
const EMOTION_SCORE_COLUMNS: &[&str] = &["emotion_score", "emotion"];
const CREATED_AT_COLUMNS: &[&str] = &["created_at", "timestamp"];

/// Header positions of the known columns. Unknown columns are never looked at.
#[derive(Debug, Default, Clone, Copy)]
struct Columns {
    id: Option<usize>,
    user_id: Option<usize>,
    transcript: Option<usize>,
    tags: Option<usize>,
    emotion_score: Option<usize>,
    created_at: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> Self {
        let find = |names: &[&str]| {
            names
                .iter()
                .find_map(|name| headers.iter().position(|h| h == *name))
        };

        Self {
            id: find(ID_COLUMNS),
            user_id: find(USER_ID_COLUMNS),
            transcript: find(TRANSCRIPT_COLUMNS),
            tags: find(TAGS_COLUMNS),
            emotion_score: find(EMOTION_SCORE_COLUMNS),
            created_at: find(CREATED_AT_COLUMNS),
        }
    }

    fn read(&self, record: &StringRecord) -> RawRow {
        let field = |index: Option<usize>| {
            index
                .and_then(|i| record.get(i))
                .map(|value| value.to_string())
        };

        RawRow {
            id: field(self.id),
            user_id: field(self.user_id),
            transcript: field(self.transcript),
            tags: field(self.tags),
            emotion_score: field(self.emotion_score),
            created_at: field(self.created_at),
        }
    }
}

/// One CSV row before coercion. Every column is optional.
#[derive(Debug, Default)]
struct RawRow {
    id: Option<String>,
    user_id: Option<String>,
    transcript: Option<String>,
    tags: Option<String>,
    emotion_score: Option<String>,
    created_at: Option<String>,
}

/// Loads voice entries from CSV
#[derive(Debug, Clone, Default)]
pub struct EntryLoader {
    config: IngestConfig,
}

impl EntryLoader {
    pub fn new(config: IngestConfig) -> Self {
        Self { config }
    }

    /// Load entries from a CSV file
    pub fn load_path(&self, path: &Path) -> Result<Vec<VoiceEntry>> {
        if !path.exists() {
            return Err(VoiceIdeasError::InputNotFound {
                path: path.to_path_buf(),
            });
        }

        let file = File::open(path)?;
        let entries = self.load_reader(file)?;
        debug!(path = %path.display(), count = entries.len(), "loaded voice entries");
        Ok(entries)
    }

    /// Load entries from any reader (file, stdin, in-memory)
    pub fn load_reader<R: Read>(&self, reader: R) -> Result<Vec<VoiceEntry>> {
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(self.config.delimiter_byte())
            .flexible(true)
            .trim(csv::Trim::Headers)
            .from_reader(reader);

        let columns = Columns::from_headers(rdr.headers()?);
        debug!(?columns, "resolved CSV columns");

        let mut entries = Vec::new();
        for (index, result) in rdr.records().enumerate() {
            let record = result?;
            entries.push(self.coerce(columns.read(&record), index + 1));
        }

        Ok(entries)
    }

    fn coerce(&self, row: RawRow, row_number: usize) -> VoiceEntry {
        let id = non_blank(row.id).unwrap_or_else(|| format!("entry-{}", row_number));
        let user_id = non_blank(row.user_id).unwrap_or_else(|| self.config.default_user.clone());

        let tags = row
            .tags
            .as_deref()
            .map(|raw| parse_tag_list(raw, &self.config.tag_separator))
            .unwrap_or_default();

        let emotion_score = non_blank(row.emotion_score).and_then(|raw| {
            let parsed = parse_score(&raw);
            if parsed.is_none() {
                warn!(row = row_number, value = %raw, "ignoring malformed emotion_score");
            }
            parsed
        });

        let created_at = non_blank(row.created_at).and_then(|raw| {
            let parsed = parse_timestamp(&raw);
            if parsed.is_none() {
                warn!(row = row_number, value = %raw, "ignoring malformed created_at");
            }
            parsed
        });

        VoiceEntry {
            id,
            user_id,
            transcript: row.transcript.unwrap_or_default(),
            tags,
            emotion_score,
            created_at,
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse a JSON-like (`["a", "b"]`) or separator-delimited tag list
pub fn parse_tag_list(value: &str, separator: &str) -> Vec<String> {
    let trimmed = value.trim();

    if trimmed.starts_with('[') && trimmed.ends_with(']') {
        if let Ok(items) = serde_json::from_str::<Vec<String>>(trimmed) {
            return items
                .into_iter()
                .map(|item| item.trim().to_string())
                .filter(|item| !item.is_empty())
                .collect();
        }
        // Lenient form (`[a, 'b']`): items are comma separated
        return split_items(&trimmed[1..trimmed.len() - 1], ",");
    }

    split_items(trimmed, separator)
}

fn split_items(value: &str, separator: &str) -> Vec<String> {
    if value.trim().is_empty() {
        return Vec::new();
    }
    // str::split("") would yield single characters
    if separator.is_empty() {
        return vec![value.trim().to_string()];
    }

    value
        .split(separator)
        .map(|s| s.trim().trim_matches('"').trim_matches('\'').trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn parse_score(value: &str) -> Option<f64> {
    value.parse::<f64>().ok().filter(|s| s.is_finite())
}

/// RFC 3339, `YYYY-MM-DD HH:MM:SS` or `YYYY-MM-DD`, all read as UTC
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use std::io::Write;

    fn load(csv: &str) -> Vec<VoiceEntry> {
        EntryLoader::default().load_reader(csv.as_bytes()).unwrap()
    }

    #[test]
    fn test_parse_tag_list_comma() {
        assert_eq!(parse_tag_list("work, important", ","), vec!["work", "important"]);
    }

    #[test]
    fn test_parse_tag_list_json() {
        assert_eq!(
            parse_tag_list(r#"["work", "personal"]"#, ";"),
            vec!["work", "personal"]
        );
    }

    #[test]
    fn test_parse_tag_list_custom_separator_keeps_duplicates() {
        assert_eq!(parse_tag_list("a;b;;a", ";"), vec!["a", "b", "a"]);
    }

    #[test]
    fn test_parse_tag_list_json_keeps_embedded_commas() {
        assert_eq!(
            parse_tag_list(r#"["a,b", "c"]"#, ","),
            vec!["a,b", "c"]
        );
    }

    #[test]
    fn test_parse_tag_list_lenient_brackets() {
        assert_eq!(parse_tag_list("[work, 'home']", ";"), vec!["work", "home"]);
    }

    #[test]
    fn test_parse_tag_list_empty_separator_keeps_whole_value() {
        assert_eq!(parse_tag_list("work", ""), vec!["work"]);
    }

    #[test]
    fn test_parse_tag_list_empty() {
        assert!(parse_tag_list("[]", ",").is_empty());
        assert!(parse_tag_list("   ", ",").is_empty());
    }

    #[test]
    fn test_parse_timestamp_formats() {
        let rfc = parse_timestamp("2024-03-01T10:30:00+02:00").unwrap();
        assert_eq!(rfc.hour(), 8);

        let plain = parse_timestamp("2024-03-01 10:30:00").unwrap();
        assert_eq!(plain.hour(), 10);

        let date = parse_timestamp("2024-03-01").unwrap();
        assert_eq!(date.day(), 1);
        assert_eq!(date.hour(), 0);

        assert!(parse_timestamp("yesterday").is_none());
    }

    #[test]
    fn test_load_full_row() {
        let entries = load(
            "id,user_id,transcript,tags,emotion_score,created_at\n\
             7,alice,What if we moved?,\"work,important\",0.5,2024-03-01\n",
        );
        assert_eq!(entries.len(), 1);
        let entry = &entries[0];
        assert_eq!(entry.id, "7");
        assert_eq!(entry.user_id, "alice");
        assert_eq!(entry.transcript, "What if we moved?");
        assert_eq!(entry.tags, vec!["work", "important"]);
        assert_eq!(entry.emotion_score, Some(0.5));
        assert!(entry.created_at.is_some());
    }

    #[test]
    fn test_load_defaults_identity_fields() {
        let entries = load("transcript,tags\nfirst,\nsecond,x\n");
        assert_eq!(entries[0].id, "entry-1");
        assert_eq!(entries[1].id, "entry-2");
        assert_eq!(entries[0].user_id, "anonymous");
        assert!(entries[0].tags.is_empty());
        assert_eq!(entries[1].tags, vec!["x"]);
    }

    #[test]
    fn test_load_malformed_optionals_degrade() {
        let entries = load(
            "transcript,emotion_score,created_at\n\
             a,not-a-number,someday\n\
             b,NaN,\n\
             c,-0.4,2024-01-02 03:04:05\n",
        );
        assert_eq!(entries.len(), 3);
        assert!(entries[0].emotion_score.is_none());
        assert!(entries[0].created_at.is_none());
        assert!(entries[1].emotion_score.is_none());
        assert_eq!(entries[2].emotion_score, Some(-0.4));
        assert!(entries[2].created_at.is_some());
    }

    #[test]
    fn test_load_aliases_and_unknown_columns() {
        let entries = load("text,emotion,device\ngoing to run,0.9,phone\n");
        assert_eq!(entries[0].transcript, "going to run");
        assert_eq!(entries[0].emotion_score, Some(0.9));
    }

    #[test]
    fn test_load_prefers_canonical_column_over_alias() {
        let entries = load(
            "text,transcript,emotion,emotion_score,timestamp,created_at\n\
             alias text,canonical text,0.1,0.9,someday,2024-03-01\n",
        );
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].transcript, "canonical text");
        assert_eq!(entries[0].emotion_score, Some(0.9));
        assert!(entries[0].created_at.is_some());
    }

    #[test]
    fn test_load_ragged_rows() {
        let entries = load("id,transcript,tags\n1,short row\n2,full,a\n");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].transcript, "short row");
        assert!(entries[0].tags.is_empty());
        assert_eq!(entries[1].tags, vec!["a"]);
    }

    #[test]
    fn test_load_missing_transcript_column() {
        let entries = load("id,tags\n1,a\n");
        assert_eq!(entries[0].transcript, "");
        assert_eq!(entries[0].tags, vec!["a"]);
    }

    #[test]
    fn test_load_custom_delimiter_and_separator() {
        let config = IngestConfig {
            delimiter: ';',
            tag_separator: "|".to_string(),
            default_user: "me".to_string(),
        };
        let entries = EntryLoader::new(config)
            .load_reader("transcript;tags\nhello;a|b\n".as_bytes())
            .unwrap();
        assert_eq!(entries[0].tags, vec!["a", "b"]);
        assert_eq!(entries[0].user_id, "me");
    }

    #[test]
    fn test_load_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "transcript,tags").unwrap();
        writeln!(file, "plan to swim,health").unwrap();

        let entries = EntryLoader::default().load_path(file.path()).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].tags, vec!["health"]);
    }

    #[test]
    fn test_load_path_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = EntryLoader::default()
            .load_path(&dir.path().join("missing.csv"))
            .unwrap_err();
        assert!(matches!(err, VoiceIdeasError::InputNotFound { .. }));
    }
}
