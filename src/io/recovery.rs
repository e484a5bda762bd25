use std::fmt;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tempfile::NamedTempFile;

/// File name of the recovery log, created next to the task file.
pub const RECOVERY_LOG_NAME: &str = ".tasklist-recovery.log";

/// Header written at the top of a new recovery log.
const FILE_HEADER: &str = "\
<!-- tasklist recovery log: append-only error recovery data
     Lines that could not be loaded and lists that could not be saved
     end up here. View with: tl recovery
     Safe to delete once you have what you need. -->

---
";

// ---------------------------------------------------------------------------
// Data types
// ---------------------------------------------------------------------------

/// Category of a recovery entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryCategory {
    /// Lines skipped while loading the task file
    Parser,
    /// A save that failed; the body holds the unsaved file content
    Write,
}

impl fmt::Display for RecoveryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecoveryCategory::Parser => write!(f, "parser"),
            RecoveryCategory::Write => write!(f, "write"),
        }
    }
}

impl RecoveryCategory {
    pub fn parse_category(s: &str) -> Option<Self> {
        match s {
            "parser" => Some(RecoveryCategory::Parser),
            "write" => Some(RecoveryCategory::Write),
            _ => None,
        }
    }
}

/// A single entry in the recovery log.
#[derive(Debug, Clone)]
pub struct RecoveryEntry {
    pub timestamp: DateTime<Utc>,
    pub category: RecoveryCategory,
    pub description: String,
    pub fields: Vec<(String, String)>,
    pub body: String,
}

/// Return the path to the recovery log in `dir`.
pub fn recovery_log_path(dir: &Path) -> PathBuf {
    dir.join(RECOVERY_LOG_NAME)
}

// ---------------------------------------------------------------------------
// Atomic file write
// ---------------------------------------------------------------------------

/// Write `content` to `path` atomically using a temp file + rename.
/// On failure the previous file content is left untouched.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Entry formatting
// ---------------------------------------------------------------------------

impl RecoveryEntry {
    /// Build an entry stamped with the current time.
    pub fn now(
        category: RecoveryCategory,
        description: impl Into<String>,
        fields: Vec<(String, String)>,
        body: impl Into<String>,
    ) -> Self {
        RecoveryEntry {
            timestamp: Utc::now(),
            category,
            description: description.into(),
            fields,
            body: body.into(),
        }
    }

    /// Format this entry as a markdown block for the recovery log.
    fn to_markdown(&self) -> String {
        let mut out = String::new();

        out.push_str(&format!(
            "## {} | {}: {}\n",
            self.timestamp
                .to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
            self.category,
            self.description,
        ));
        out.push('\n');

        for (key, value) in &self.fields {
            out.push_str(&format!("{}: {}\n", key, value));
        }

        if !self.body.is_empty() {
            let fence = body_fence(&self.body);
            out.push('\n');
            out.push_str(&fence);
            out.push_str("text\n");
            out.push_str(&self.body);
            if !self.body.ends_with('\n') {
                out.push('\n');
            }
            out.push_str(&fence);
            out.push('\n');
        }

        out.push('\n');
        out.push_str("---\n");
        out
    }

    /// Serialize to JSON value for `tl recovery --json`.
    pub fn to_json(&self) -> serde_json::Value {
        let fields: serde_json::Map<String, serde_json::Value> = self
            .fields
            .iter()
            .map(|(k, v)| (k.clone(), serde_json::Value::String(v.clone())))
            .collect();

        serde_json::json!({
            "timestamp": self.timestamp.to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
            "category": self.category.to_string(),
            "description": self.description,
            "fields": fields,
            "body": self.body,
        })
    }

    /// Human-readable form used by `tl recovery`.
    pub fn to_display_markdown(&self) -> String {
        self.to_markdown()
    }
}

/// Code fence for `body`: backticks, longer than any run inside the body
/// and at least three.
fn body_fence(body: &str) -> String {
    let mut longest = 0;
    let mut run = 0;
    for c in body.chars() {
        if c == '`' {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 0;
        }
    }
    "`".repeat((longest + 1).max(3))
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

/// Append a recovery entry to the log. Errors are swallowed and printed to stderr.
/// Not for use while the terminal UI is active; see `try_log_recovery`.
pub fn log_recovery(dir: &Path, entry: RecoveryEntry) {
    if let Err(e) = try_log_recovery(dir, entry) {
        eprintln!("warning: could not write to recovery log: {}", e);
    }
}

/// Append a recovery entry to the log, returning any I/O error to the caller.
pub fn try_log_recovery(dir: &Path, entry: RecoveryEntry) -> io::Result<()> {
    let path = recovery_log_path(dir);
    let needs_header = std::fs::metadata(&path).map_or(true, |m| m.len() == 0);

    let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
    if needs_header {
        file.write_all(FILE_HEADER.as_bytes())?;
    }
    file.write_all(entry.to_markdown().as_bytes())?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Reading entries
// ---------------------------------------------------------------------------

/// Read recovery entries from the log, most recent first.
pub fn read_recovery_entries(dir: &Path, limit: Option<usize>) -> Vec<RecoveryEntry> {
    let content = match std::fs::read_to_string(recovery_log_path(dir)) {
        Ok(c) => c,
        Err(_) => return Vec::new(),
    };

    let mut entries = parse_entries(&content);
    if let Some(n) = limit {
        let skip = entries.len().saturating_sub(n);
        entries.drain(..skip);
    }
    entries.reverse();
    entries
}

/// Parse all entries from the log content, oldest first.
fn parse_entries(content: &str) -> Vec<RecoveryEntry> {
    let mut entries = Vec::new();
    let mut lines = content.lines();

    while let Some(line) = lines.next() {
        let Some(header) = line.strip_prefix("## ") else {
            continue;
        };
        let Some((timestamp, category, description)) = parse_entry_header(header) else {
            continue;
        };

        let mut fields = Vec::new();
        let mut body = String::new();
        let mut fence: Option<&str> = None;

        for line in lines.by_ref() {
            if let Some(open) = fence {
                if line == open {
                    fence = None;
                } else {
                    if !body.is_empty() {
                        body.push('\n');
                    }
                    body.push_str(line);
                }
                continue;
            }
            if line == "---" {
                break;
            }
            if line.starts_with("```") {
                let ticks = line.len() - line.trim_start_matches('`').len();
                fence = Some(&line[..ticks]);
                continue;
            }
            if let Some((key, value)) = line.trim().split_once(": ") {
                fields.push((key.to_string(), value.to_string()));
            }
        }

        entries.push(RecoveryEntry {
            timestamp,
            category,
            description,
            fields,
            body,
        });
    }

    entries
}

/// Parse an entry header: `<timestamp> | <category>: <description>`
fn parse_entry_header(header: &str) -> Option<(DateTime<Utc>, RecoveryCategory, String)> {
    let (timestamp_str, rest) = header.split_once(" | ")?;
    let timestamp = DateTime::parse_from_rfc3339(timestamp_str)
        .ok()?
        .with_timezone(&Utc);
    let (category_str, description) = rest.split_once(": ")?;
    let category = RecoveryCategory::parse_category(category_str)?;
    Some((timestamp, category, description.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn make_entry(category: RecoveryCategory, desc: &str, body: &str) -> RecoveryEntry {
        RecoveryEntry::now(
            category,
            desc,
            vec![("Source".to_string(), "tasks.txt".to_string())],
            body,
        )
    }

    #[test]
    fn test_entry_formatting() {
        let entry = make_entry(RecoveryCategory::Parser, "dropped lines", "bad line");
        let md = entry.to_markdown();
        assert!(md.starts_with("## "));
        assert!(md.contains("parser: dropped lines"));
        assert!(md.contains("Source: tasks.txt"));
        assert!(md.contains("```text\nbad line\n```"));
        assert!(md.ends_with("---\n"));
    }

    #[test]
    fn test_log_and_read() {
        let tmp = TempDir::new().unwrap();
        log_recovery(tmp.path(), make_entry(RecoveryCategory::Parser, "first", "a"));
        log_recovery(tmp.path(), make_entry(RecoveryCategory::Write, "second", "b\nc"));

        let content = std::fs::read_to_string(recovery_log_path(tmp.path())).unwrap();
        assert!(content.starts_with("<!-- tasklist recovery log"));
        assert_eq!(content.matches("<!--").count(), 1);

        let entries = read_recovery_entries(tmp.path(), None);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].description, "second");
        assert_eq!(entries[0].category, RecoveryCategory::Write);
        assert_eq!(entries[0].body, "b\nc");
        assert_eq!(entries[1].description, "first");
        assert_eq!(
            entries[1].fields,
            vec![("Source".to_string(), "tasks.txt".to_string())]
        );
    }

    #[test]
    fn test_body_with_code_fence_lines() {
        let tmp = TempDir::new().unwrap();
        let body = "```\nnot a field: x\n````\nlast";
        log_recovery(tmp.path(), make_entry(RecoveryCategory::Parser, "fences", body));
        log_recovery(tmp.path(), make_entry(RecoveryCategory::Parser, "next", "y"));

        let content = std::fs::read_to_string(recovery_log_path(tmp.path())).unwrap();
        assert!(content.contains("`````text\n"));

        let entries = read_recovery_entries(tmp.path(), None);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].body, body);
        assert_eq!(
            entries[1].fields,
            vec![("Source".to_string(), "tasks.txt".to_string())]
        );
        assert_eq!(entries[0].description, "next");
    }

    #[test]
    fn test_body_fence_length() {
        assert_eq!(body_fence("plain"), "```");
        assert_eq!(body_fence("a ``` b"), "````");
        assert_eq!(body_fence("``x`````"), "``````");
    }

    #[test]
    fn test_try_log_recovery_reports_errors() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("missing");
        let entry = make_entry(RecoveryCategory::Write, "save failed", "a,False");
        assert!(try_log_recovery(&missing, entry).is_err());
    }

    #[test]
    fn test_read_with_limit() {
        let tmp = TempDir::new().unwrap();
        for i in 0..4 {
            log_recovery(
                tmp.path(),
                make_entry(RecoveryCategory::Parser, &format!("entry{}", i), "x"),
            );
        }
        let entries = read_recovery_entries(tmp.path(), Some(2));
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].description, "entry3");
        assert_eq!(entries[1].description, "entry2");
    }

    #[test]
    fn test_read_missing_log() {
        let tmp = TempDir::new().unwrap();
        assert!(read_recovery_entries(tmp.path(), None).is_empty());
    }

    #[test]
    fn test_atomic_write_replaces_content() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("tasks.txt");
        atomic_write(&path, b"old,False\n").unwrap();
        atomic_write(&path, b"new,True\n").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new,True\n");
    }

    #[test]
    fn test_atomic_write_missing_dir_fails() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nope").join("tasks.txt");
        assert!(atomic_write(&path, b"x,False\n").is_err());
    }

    #[test]
    fn test_to_json() {
        let entry = make_entry(RecoveryCategory::Write, "save failed", "a,False");
        let json = entry.to_json();
        assert_eq!(json["category"], "write");
        assert_eq!(json["description"], "save failed");
        assert_eq!(json["fields"]["Source"], "tasks.txt");
        assert_eq!(json["body"], "a,False");
    }
}
