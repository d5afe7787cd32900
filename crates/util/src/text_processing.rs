//! # Text Processing Utilities
//!
//! Redaction of credentials embedded in generated WLST scripts and tool
//! payloads, plus small helpers for trimming interpreter output.

use once_cell::sync::Lazy;
use regex::Regex;

/// Redacts values that look like secrets in a string.
///
/// Covers the credential positions that appear in WLST scripts
/// (`connect('user', 'secret', 'url')`, `setPassword('secret')`) as well as
/// `KEY=value` assignments and JSON entries whose key names a password.
///
/// # Example
/// ```rust
/// use wlst_util::text_processing::redact_sensitive;
///
/// let redacted = redact_sensitive("connect('weblogic', 'welcome1', 't3://localhost:7001')");
/// assert_eq!(redacted, "connect('weblogic', '[REDACTED]', 't3://localhost:7001')");
/// ```
pub fn redact_sensitive(input: &str) -> String {
    redact_sensitive_with(input, "[REDACTED]")
}

/// Redacts sensitive-looking values, using a custom replacement token.
pub fn redact_sensitive_with(input: &str, replacement: &str) -> String {
    let mut redacted = input.to_string();

    for pattern in get_redact_patterns().iter() {
        redacted = pattern
            .replace_all(&redacted, |captures: &regex::Captures| {
                let prefix = captures.get(1).map(|m| m.as_str()).unwrap_or("");
                let suffix = captures.get(3).map(|m| m.as_str()).unwrap_or("");
                format!("{}{}{}", prefix, replacement, suffix)
            })
            .to_string();
    }

    redacted
}

/// Replaces every occurrence of a known secret value.
///
/// Pattern-based redaction cannot catch a password echoed back in free text
/// (for example inside an exception message), so callers that know the
/// secret mask it directly as well. Empty secrets leave the input untouched.
pub fn mask_literal(input: &str, secret: &str, replacement: &str) -> String {
    if secret.is_empty() {
        return input.to_string();
    }
    input.replace(secret, replacement)
}

/// Returns the last `count` non-empty lines of `text`, joined with newlines.
pub fn tail_lines(text: &str, count: usize) -> String {
    let lines: Vec<&str> = text.lines().filter(|line| !line.trim().is_empty()).collect();
    let start = lines.len().saturating_sub(count);
    lines[start..].join("\n")
}

/// Returns compiled regex patterns for detecting sensitive information.
///
/// Every pattern captures `(prefix)(secret)(suffix)` so the replacement keeps
/// the surrounding syntax intact.
pub fn get_redact_patterns() -> &'static Vec<Regex> {
    static REDACT_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(build_redact_patterns);

    &REDACT_PATTERNS
}

fn build_redact_patterns() -> Vec<Regex> {
    vec![
        // connect('user', 'password', 'url')
        Regex::new(r"(connect\(\s*'(?:[^'\\]|\\.)*'\s*,\s*')((?:[^'\\]|\\.)*)(')").expect("connect pattern should compile"),
        // cmo.setPassword('...') / setPasswordEncrypted('...')
        Regex::new(r"(?i)(setPassword(?:Encrypted)?\(\s*')((?:[^'\\]|\\.)*)(')").expect("setPassword pattern should compile"),
        // dbPassword = '...' assignments in generated scripts
        Regex::new(r"(?i)(\b[A-Za-z_]*password\s*=\s*')((?:[^'\\]|\\.)*)(')").expect("assignment pattern should compile"),
        // "password": "..." and "db_password": "..."
        Regex::new(r#"(?i)("[A-Za-z_]*password"\s*:\s*")((?:[^"\\]|\\.)*)(")"#).expect("json password pattern should compile"),
        // WLST_PASSWORD=... style assignments
        Regex::new(r"(?i)(\b[A-Z0-9_]*(?:PASSWORD|SECRET|TOKEN)=)([^\s]+)()").expect("env password pattern should compile"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redacts_connect_password_argument() {
        let input = "    connect('weblogic', 'welcome1', 't3://localhost:7001')";
        assert_eq!(redact_sensitive(input), "    connect('weblogic', '[REDACTED]', 't3://localhost:7001')");
    }

    #[test]
    fn redacts_escaped_quotes_inside_password() {
        let input = r"connect('weblogic', 'it\'s-secret', 't3://host:7001')";
        assert_eq!(redact_sensitive(input), "connect('weblogic', '[REDACTED]', 't3://host:7001')");
    }

    #[test]
    fn redacts_datasource_password_setter() {
        let input = "cmo.setPassword('dbsecret')";
        assert_eq!(redact_sensitive(input), "cmo.setPassword('[REDACTED]')");
    }

    #[test]
    fn redacts_script_password_assignments() {
        let input = "dbUser = 'orders'\ndbPassword = 'tiger'";
        assert_eq!(redact_sensitive(input), "dbUser = 'orders'\ndbPassword = '[REDACTED]'");
    }

    #[test]
    fn redacts_json_password_entries() {
        let input = r#"{"username": "weblogic", "password": "welcome1", "db_password": "tiger"}"#;
        let expected = r#"{"username": "weblogic", "password": "[REDACTED]", "db_password": "[REDACTED]"}"#;
        assert_eq!(redact_sensitive(input), expected);
    }

    #[test]
    fn redacts_env_style_assignments() {
        assert_eq!(redact_sensitive("WLST_PASSWORD=welcome1 rest"), "WLST_PASSWORD=[REDACTED] rest");
        assert_eq!(redact_sensitive("WLST_TIMEOUT=120"), "WLST_TIMEOUT=120");
    }

    #[test]
    fn mask_literal_ignores_empty_secret() {
        assert_eq!(mask_literal("abc", "", "***"), "abc");
        assert_eq!(mask_literal("login failed for welcome1", "welcome1", "***"), "login failed for ***");
    }

    #[test]
    fn tail_lines_skips_blank_lines() {
        let text = "one\n\ntwo\nthree\n\n";
        assert_eq!(tail_lines(text, 2), "two\nthree");
        assert_eq!(tail_lines(text, 10), "one\ntwo\nthree");
        assert_eq!(tail_lines("", 3), "");
    }
}
