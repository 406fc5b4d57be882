//! # Stored Name Derivation
//!
//! Stored names have the shape `<millis>_<sanitized>`, where the sanitized
//! segment only contains `[A-Za-z0-9._-]` and never contains `..`.

use std::sync::OnceLock;

use regex::Regex;

static UNSAFE_CHARS: OnceLock<Regex> = OnceLock::new();

fn unsafe_chars() -> &'static Regex {
    UNSAFE_CHARS.get_or_init(|| Regex::new(r"[^A-Za-z0-9._-]").expect("valid regex literal"))
}

/// Replace every character outside `[A-Za-z0-9._-]` with `_`.
///
/// Dot runs are broken up afterwards (`..` becomes `_.`) so a stored name
/// can always be fetched back past the traversal check. The last dot of a
/// run is kept, so the extension survives.
pub fn sanitize_name(declared: &str) -> String {
    let mut sanitized = unsafe_chars().replace_all(declared, "_").into_owned();
    while sanitized.contains("..") {
        sanitized = sanitized.replace("..", "_.");
    }
    sanitized
}

/// Compose the stored name for an upload taken at `timestamp_ms`
pub fn stored_name(timestamp_ms: i64, declared: &str) -> String {
    format!("{}_{}", timestamp_ms, sanitize_name(declared))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_keeps_safe_characters() {
        assert_eq!(sanitize_name("report-2024_v1.pdf"), "report-2024_v1.pdf");
    }

    #[test]
    fn test_sanitize_replaces_spaces_and_brackets() {
        assert_eq!(sanitize_name("My Report (v2).pdf"), "My_Report__v2_.pdf");
    }

    #[test]
    fn test_sanitize_separators() {
        assert_eq!(sanitize_name("a/b\\c.pdf"), "a_b_c.pdf");
    }

    #[test]
    fn test_sanitize_non_ascii() {
        assert_eq!(sanitize_name("résumé.pdf"), "r_sum_.pdf");
    }

    #[test]
    fn test_sanitize_breaks_dot_runs() {
        assert_eq!(sanitize_name("../../etc/passwd"), "_.__.__etc_passwd");
        assert_eq!(sanitize_name("...."), "_._.");
        assert!(!sanitize_name("a...pdf").contains(".."));
    }

    #[test]
    fn test_sanitize_keeps_extension_after_dot_run() {
        assert_eq!(sanitize_name("draft..pdf"), "draft_.pdf");
        assert_eq!(sanitize_name("a...pdf"), "a__.pdf");
        assert_eq!(sanitize_name("..pdf"), "_.pdf");
    }

    #[test]
    fn test_stored_name() {
        assert_eq!(
            stored_name(1_700_000_000_000, "My Report (v2).pdf"),
            "1700000000000_My_Report__v2_.pdf"
        );
    }
}
