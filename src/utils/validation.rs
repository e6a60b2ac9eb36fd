//! Boundary input validation
//!
//! Deny-list checks applied to strings crossing the UI boundary before
//! they reach query builders, the filesystem, or an external opener.

use once_cell::sync::Lazy;
use regex::Regex;

/// Kind of input being validated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// Free text destined for a SQL query builder
    Sql,
    /// A relative filesystem path
    Path,
    /// A URL to be opened externally
    Url,
    /// General free text rendered back to the UI
    General,
}

static SQL_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"(?i)\b(DROP|DELETE|INSERT|UPDATE|CREATE|ALTER|EXEC|EXECUTE)\b").unwrap(),
        Regex::new(r"(--|/\*|\*/)").unwrap(),
        Regex::new(r"(?i)\bUNION\b.*\bSELECT\b").unwrap(),
        Regex::new(r"(?i)\bOR\b.*=.*").unwrap(),
    ]
});

static PATH_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"\.\.").unwrap(),
        Regex::new(r#"[<>:"|?*]"#).unwrap(),
        Regex::new(r"^[a-zA-Z]:\\").unwrap(),
        Regex::new(r"^/").unwrap(),
    ]
});

static GENERAL_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"(?is)<script\b.*?</script>").unwrap(),
        Regex::new(r"(?is)<iframe\b.*?</iframe>").unwrap(),
        Regex::new(r"(?i)javascript:").unwrap(),
        Regex::new(r"(?i)on\w+\s*=").unwrap(),
    ]
});

/// Check an input string against the deny-list for its kind
///
/// Returns true when the input is acceptable.
pub fn validate_input(input: &str, kind: InputKind) -> bool {
    match kind {
        InputKind::Sql => !SQL_PATTERNS.iter().any(|p| p.is_match(input)),
        InputKind::Path => !PATH_PATTERNS.iter().any(|p| p.is_match(input)),
        InputKind::Url => match url::Url::parse(input) {
            Ok(parsed) => matches!(parsed.scheme(), "http" | "https" | "file"),
            Err(_) => false,
        },
        InputKind::General => !GENERAL_PATTERNS.iter().any(|p| p.is_match(input)),
    }
}
