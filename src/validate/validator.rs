//! Field validation and coercion.
//!
//! Raw command-line strings are checked against the active table's
//! schema and coerced to typed JSON values. Nothing here touches
//! state: a value that fails validation is never staged.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::{Number, Value};
use url::Url;

use crate::schema::{vocab, FieldKind, TableConfig};

use super::error::{ValidationError, ValidationResult};

/// How many vocabulary entries an error hint shows before truncating.
const VOCAB_HINT_MAX: usize = 12;

/// Permissive fallback for URL-ish input that `Url::parse` rejects
/// (bare hosts like `example.com/page`).
fn url_fallback_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(https?://)?[A-Za-z0-9][A-Za-z0-9.-]*\.[A-Za-z]{2,}(/\S*)?$")
            .unwrap_or_else(|e| panic!("invalid url fallback pattern: {e}"))
    })
}

/// Validate a raw string against a field of the given table and coerce
/// it to a typed value.
pub fn validate_field(
    config: &TableConfig,
    field: &str,
    raw: &str,
) -> ValidationResult<Value> {
    let def = config
        .field(field)
        .ok_or_else(|| ValidationError::UnknownField {
            table: config.display_name,
            field: field.to_string(),
            valid: config.field_list(),
        })?;

    let raw = strip_quotes(raw.trim());
    if raw.is_empty() {
        return Err(ValidationError::EmptyValue {
            field: field.to_string(),
        });
    }

    match def.kind {
        FieldKind::Text => Ok(Value::String(raw.to_string())),
        FieldKind::Enum(allowed) => validate_enum(field, raw, allowed),
        FieldKind::Gpa => validate_gpa(field, raw),
        FieldKind::Year => validate_year(field, raw),
        FieldKind::Url => validate_url(field, raw),
        FieldKind::GithubUrl => validate_github_url(field, raw),
        FieldKind::Date => validate_date(field, raw),
        FieldKind::VocabList(vocabulary) => validate_vocab_list(field, raw, vocabulary),
        FieldKind::TextList => Ok(Value::Array(
            parse_list(raw).into_iter().map(Value::String).collect(),
        )),
        FieldKind::ImageList => Err(ValidationError::ImageFieldDirectAssign {
            field: field.to_string(),
        }),
    }
}

/// Strip a single layer of matching surrounding quotes.
pub fn strip_quotes(raw: &str) -> &str {
    let bytes = raw.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if first == last && (first == b'"' || first == b'\'') {
            return &raw[1..raw.len() - 1];
        }
    }
    raw
}

fn validate_enum(field: &str, raw: &str, allowed: &[&str]) -> ValidationResult<Value> {
    if allowed.contains(&raw) {
        Ok(Value::String(raw.to_string()))
    } else {
        // The full legal list, never truncated: enum sets are small.
        Err(ValidationError::NotInEnum {
            field: field.to_string(),
            value: raw.to_string(),
            allowed: allowed.join(", "),
        })
    }
}

fn validate_gpa(field: &str, raw: &str) -> ValidationResult<Value> {
    let gpa: f64 = raw.parse().map_err(|_| ValidationError::NotNumeric {
        field: field.to_string(),
        value: raw.to_string(),
    })?;
    if !(0.0..=4.0).contains(&gpa) {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            value: raw.to_string(),
            min: "0.0".to_string(),
            max: "4.0".to_string(),
        });
    }
    let number = Number::from_f64(gpa).ok_or_else(|| ValidationError::NotNumeric {
        field: field.to_string(),
        value: raw.to_string(),
    })?;
    Ok(Value::Number(number))
}

fn validate_year(field: &str, raw: &str) -> ValidationResult<Value> {
    let year: i64 = raw.parse().map_err(|_| ValidationError::NotNumeric {
        field: field.to_string(),
        value: raw.to_string(),
    })?;
    if !(1900..=2100).contains(&year) {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            value: raw.to_string(),
            min: "1900".to_string(),
            max: "2100".to_string(),
        });
    }
    Ok(Value::Number(year.into()))
}

fn validate_url(field: &str, raw: &str) -> ValidationResult<Value> {
    if Url::parse(raw).is_ok() || url_fallback_re().is_match(raw) {
        Ok(Value::String(raw.to_string()))
    } else {
        Err(ValidationError::InvalidUrl {
            field: field.to_string(),
            value: raw.to_string(),
        })
    }
}

fn validate_github_url(field: &str, raw: &str) -> ValidationResult<Value> {
    let err = || ValidationError::InvalidGithubUrl {
        field: field.to_string(),
        value: raw.to_string(),
    };

    // Bare `github.com/owner/repo` is accepted by normalizing the scheme.
    let candidate = if raw.contains("://") {
        raw.to_string()
    } else {
        format!("https://{}", raw)
    };

    let url = Url::parse(&candidate).map_err(|_| err())?;
    match url.host_str() {
        Some("github.com") | Some("www.github.com") => {}
        _ => return Err(err()),
    }
    let segments: Vec<&str> = url
        .path_segments()
        .map(|s| s.filter(|p| !p.is_empty()).collect())
        .unwrap_or_default();
    if segments.len() < 2 {
        return Err(err());
    }
    Ok(Value::String(raw.to_string()))
}

fn validate_date(field: &str, raw: &str) -> ValidationResult<Value> {
    chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
        ValidationError::InvalidDate {
            field: field.to_string(),
            value: raw.to_string(),
        }
    })?;
    Ok(Value::String(raw.to_string()))
}

fn validate_vocab_list(
    field: &str,
    raw: &str,
    vocabulary: &[&str],
) -> ValidationResult<Value> {
    let entries = parse_list(raw);
    let invalid: Vec<&String> = entries
        .iter()
        .filter(|e| !vocabulary.contains(&e.as_str()))
        .collect();

    // All-or-nothing: one unknown entry aborts the whole assignment.
    if !invalid.is_empty() {
        return Err(ValidationError::UnknownVocabEntries {
            field: field.to_string(),
            invalid: invalid
                .iter()
                .map(|e| e.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            hint: vocab::vocab_hint(vocabulary, VOCAB_HINT_MAX),
        });
    }

    Ok(Value::Array(entries.into_iter().map(Value::String).collect()))
}

/// Parse list input: a bracketed JSON-like array, a comma-separated
/// run, or a single bare value. Elements are trimmed and unquoted.
pub fn parse_list(raw: &str) -> Vec<String> {
    let inner = if raw.starts_with('[') && raw.ends_with(']') {
        if let Ok(Value::Array(items)) = serde_json::from_str::<Value>(raw) {
            return items
                .iter()
                .map(|v| match v {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect();
        }
        &raw[1..raw.len() - 1]
    } else {
        raw
    };

    inner
        .split(',')
        .map(|e| strip_quotes(e.trim()).to_string())
        .filter(|e| !e.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{EDUCATION, PROJECTS, USERS, WORK};
    use serde_json::json;

    #[test]
    fn test_unknown_field() {
        let err = validate_field(&PROJECTS, "nope", "x").unwrap_err();
        match err {
            ValidationError::UnknownField { valid, .. } => {
                assert!(valid.contains("name"));
                assert!(valid.contains("techStack"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_text_strips_one_quote_layer() {
        assert_eq!(
            validate_field(&PROJECTS, "name", "\"Portfolio Site\"").unwrap(),
            json!("Portfolio Site")
        );
        // Only one layer comes off.
        assert_eq!(
            validate_field(&PROJECTS, "name", "\"'quoted'\"").unwrap(),
            json!("'quoted'")
        );
    }

    #[test]
    fn test_enum_exact_match_case_sensitive() {
        assert_eq!(
            validate_field(&EDUCATION, "type", "bachelors").unwrap(),
            json!("bachelors")
        );
        let err = validate_field(&EDUCATION, "type", "Bachelors").unwrap_err();
        let message = err.to_string();
        for value in vocab::EDUCATION_TYPES {
            assert!(message.contains(value), "message missing {value}");
        }
    }

    #[test]
    fn test_gpa_range() {
        assert_eq!(validate_field(&EDUCATION, "gpa", "3.8").unwrap(), json!(3.8));
        assert!(matches!(
            validate_field(&EDUCATION, "gpa", "4.5"),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert!(matches!(
            validate_field(&EDUCATION, "gpa", "high"),
            Err(ValidationError::NotNumeric { .. })
        ));
    }

    #[test]
    fn test_year_range() {
        assert_eq!(
            validate_field(&EDUCATION, "startYear", "2020").unwrap(),
            json!(2020)
        );
        assert!(matches!(
            validate_field(&EDUCATION, "endYear", "1850"),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_url_absolute_and_fallback() {
        assert!(validate_field(&USERS, "website", "https://example.com").is_ok());
        // Bare host accepted via the fallback pattern.
        assert!(validate_field(&USERS, "website", "example.com/about").is_ok());
        assert!(matches!(
            validate_field(&USERS, "website", "not a url"),
            Err(ValidationError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_github_url_requires_owner_repo() {
        assert!(validate_field(&PROJECTS, "githubUrl", "https://github.com/rust-lang/rust").is_ok());
        assert!(validate_field(&PROJECTS, "githubUrl", "github.com/rust-lang/rust").is_ok());
        assert!(matches!(
            validate_field(&PROJECTS, "githubUrl", "https://github.com/rust-lang"),
            Err(ValidationError::InvalidGithubUrl { .. })
        ));
        assert!(matches!(
            validate_field(&PROJECTS, "githubUrl", "https://gitlab.com/a/b"),
            Err(ValidationError::InvalidGithubUrl { .. })
        ));
    }

    #[test]
    fn test_date_format() {
        assert_eq!(
            validate_field(&WORK, "startDate", "2023-04-01").unwrap(),
            json!("2023-04-01")
        );
        assert!(matches!(
            validate_field(&WORK, "startDate", "04/01/2023"),
            Err(ValidationError::InvalidDate { .. })
        ));
        assert!(matches!(
            validate_field(&WORK, "startDate", "2023-13-40"),
            Err(ValidationError::InvalidDate { .. })
        ));
    }

    #[test]
    fn test_tech_stack_all_or_nothing() {
        assert_eq!(
            validate_field(&PROJECTS, "techStack", "React,TypeScript").unwrap(),
            json!(["React", "TypeScript"])
        );
        let err = validate_field(&PROJECTS, "techStack", "React,FoertranX,Cobol99").unwrap_err();
        match err {
            ValidationError::UnknownVocabEntries { invalid, hint, .. } => {
                assert!(invalid.contains("FoertranX"));
                assert!(invalid.contains("Cobol99"));
                assert!(!invalid.contains("React"));
                assert!(hint.contains("more)"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_text_list_forms() {
        assert_eq!(parse_list("one"), vec!["one"]);
        assert_eq!(parse_list("a, b , c"), vec!["a", "b", "c"]);
        assert_eq!(parse_list(r#"["x", "y"]"#), vec!["x", "y"]);
        // Bracketed but not valid JSON falls back to comma splitting.
        assert_eq!(parse_list("[shipped features, wrote docs]"), vec![
            "shipped features",
            "wrote docs"
        ]);
    }

    #[test]
    fn test_images_not_directly_assignable() {
        assert!(matches!(
            validate_field(&PROJECTS, "images", "http://x.com/a.png"),
            Err(ValidationError::ImageFieldDirectAssign { .. })
        ));
    }

    #[test]
    fn test_empty_value_rejected() {
        assert!(matches!(
            validate_field(&PROJECTS, "name", "  "),
            Err(ValidationError::EmptyValue { .. })
        ));
    }
}
