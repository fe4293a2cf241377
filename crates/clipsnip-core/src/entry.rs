use crate::error::{Result, SnippetError};
use crate::snippet::{SnippetDefinition, SnippetStore};
use chrono::{DateTime, Local};

/// Rendering used for default titles and descriptions.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// What the caller knows about a snippet before the body is captured.
/// `prefix` is expected to be non-empty; the CLI enforces that.
#[derive(Debug, Clone)]
pub struct NewEntry {
    pub language: String,
    pub prefix: String,
    pub title: Option<String>,
    pub description: Option<String>,
}

/// A one-entry store ready to merge into `language`'s store.
#[derive(Debug, Clone)]
pub struct BuiltEntry {
    pub language: String,
    pub name: String,
    pub store: SnippetStore,
}

/// Build an entry from captured text, stamping missing metadata with the
/// current local time.
pub fn build(entry: NewEntry, captured: &str) -> Result<BuiltEntry> {
    build_at(entry, captured, Local::now())
}

/// Same as [`build`] with an explicit clock.
pub fn build_at(entry: NewEntry, captured: &str, now: DateTime<Local>) -> Result<BuiltEntry> {
    if captured.trim().is_empty() {
        return Err(SnippetError::CaptureEmpty);
    }
    debug_assert!(!entry.prefix.is_empty(), "prefix is validated by the caller");

    let stamp = now.format(TIMESTAMP_FORMAT).to_string();
    let body = captured.lines().map(str::to_string).collect();
    let name = entry.title.unwrap_or_else(|| stamp.clone());
    let description = entry.description.unwrap_or(stamp);

    let definition = SnippetDefinition::new(entry.prefix, body, Some(description));
    Ok(BuiltEntry {
        language: entry.language,
        store: SnippetStore::single(name.clone(), definition),
        name,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn request(title: Option<&str>, description: Option<&str>) -> NewEntry {
        NewEntry {
            language: "javascript".into(),
            prefix: "cl2".into(),
            title: title.map(Into::into),
            description: description.map(Into::into),
        }
    }

    fn fixed_now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap()
    }

    #[test]
    fn test_blank_capture_rejected() {
        for blank in ["", "   ", "\n\t\n"] {
            let err = build_at(request(None, None), blank, fixed_now()).unwrap_err();
            assert!(matches!(err, SnippetError::CaptureEmpty));
        }
    }

    #[test]
    fn test_defaults_from_timestamp() {
        let built = build_at(request(None, None), "x", fixed_now()).unwrap();
        assert_eq!(built.name, "2024-03-09 14:05:07");
        let def = built.store.get(&built.name).unwrap();
        assert_eq!(def.description.as_deref(), Some("2024-03-09 14:05:07"));
    }

    #[test]
    fn test_defaults_with_real_clock() {
        let built = build(request(None, None), "x").unwrap();
        assert!(!built.name.is_empty());
        let def = built.store.get(&built.name).unwrap();
        assert_eq!(def.description.as_deref(), Some(built.name.as_str()));
    }

    #[test]
    fn test_explicit_metadata() {
        let built = build_at(
            request(Some("double log"), Some("logs twice")),
            "console.log(1)\nconsole.log(2)",
            fixed_now(),
        )
        .unwrap();
        assert_eq!(built.language, "javascript");
        assert_eq!(built.store.len(), 1);
        let def = built.store.get("double log").unwrap();
        assert_eq!(def.prefix, "cl2");
        assert_eq!(def.body, ["console.log(1)", "console.log(2)"]);
        assert_eq!(def.description.as_deref(), Some("logs twice"));
    }

    #[test]
    fn test_body_keeps_lines_and_indentation() {
        let built = build_at(
            request(Some("t"), None),
            "if x {\r\n\ty();\r\n\r\n}",
            fixed_now(),
        )
        .unwrap();
        let def = built.store.get("t").unwrap();
        assert_eq!(def.body, ["if x {", "\ty();", "", "}"]);
    }
}
