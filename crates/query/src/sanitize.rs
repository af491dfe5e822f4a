//! Fragment checks applied before anything is concatenated into a query.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::compiler::Aggregate;

/// Constructs that disqualify a filter or aggregate fragment.
///
/// This is a denylist: it rejects the obvious multi-statement, DDL and comment
/// tricks but does not understand SQL.
static DANGEROUS_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)\b(DROP|DELETE|UPDATE|INSERT|ALTER|CREATE|TRUNCATE)\b",
        r";\s*\w",
        r"--",
        r"/\*",
        r"(?i)\bEXEC\b",
        r"(?i)\bSP_\w+",
        r"\\",
        r"\x00",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("static sanitizer pattern"))
    .collect()
});

static ORDER_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\A[A-Za-z0-9_.,\s]+(?:\s+(?i:ASC|DESC))?\z").expect("static order pattern")
});

static AGGREGATE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\A\s*(count|sum|average|avg|minimum|min|maximum|max)\s*(?:\(\s*([^()]*?)\s*\))?\s*\z")
        .expect("static aggregate pattern")
});

static COLUMN_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\A[A-Za-z_][A-Za-z0-9_]*(?:\.[A-Za-z_][A-Za-z0-9_]*)?\z")
        .expect("static column pattern")
});

/// Whether a free-text filter or aggregate fragment passes the denylist.
pub fn is_safe_fragment(text: &str) -> bool {
    !DANGEROUS_PATTERNS.iter().any(|pattern| pattern.is_match(text))
}

/// Normalize an ordering fragment, or `None` when it does not match
/// `col[, col…] [ASC|DESC]`.
///
/// A `None` means "omit ordering", not a request failure.
pub fn sanitize_order(text: &str) -> Option<String> {
    if !ORDER_PATTERN.is_match(text) {
        return None;
    }
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_string())
}

/// Parse an aggregate statement such as `count`, `sum(price)` or
/// `maximum(:created_at)` into a closed [`Aggregate`].
pub fn parse_aggregate(text: &str) -> Option<Aggregate> {
    let caps = AGGREGATE_PATTERN.captures(text)?;
    let function = caps.get(1)?.as_str().to_ascii_lowercase();
    let column = match caps.get(2).map(|m| m.as_str()) {
        None | Some("") => None,
        Some("*") if function == "count" => None,
        Some(raw) => Some(normalize_column(raw)?),
    };

    match (function.as_str(), column) {
        ("count", None) => Some(Aggregate::Count),
        ("count", Some(col)) => Some(Aggregate::CountColumn(col)),
        ("sum", Some(col)) => Some(Aggregate::Sum(col)),
        ("average" | "avg", Some(col)) => Some(Aggregate::Average(col)),
        ("minimum" | "min", Some(col)) => Some(Aggregate::Minimum(col)),
        ("maximum" | "max", Some(col)) => Some(Aggregate::Maximum(col)),
        _ => None,
    }
}

/// Accepts `name`, `:name`, `"name"`, `'name'` and `table.name`.
fn normalize_column(raw: &str) -> Option<String> {
    let unquoted = raw
        .strip_prefix(':')
        .or_else(|| raw.strip_prefix('"').and_then(|s| s.strip_suffix('"')))
        .or_else(|| raw.strip_prefix('\'').and_then(|s| s.strip_suffix('\'')))
        .unwrap_or(raw);
    COLUMN_PATTERN
        .is_match(unquoted)
        .then(|| unquoted.to_string())
}
