//! Logging helpers for channel payloads

/// Maximum length of text to log (to prevent sensitive data exposure)
pub const MAX_LOG_TEXT_LENGTH: usize = 50;

/// Patterns that indicate potentially sensitive content
pub const SENSITIVE_PATTERNS: &[&str] = &[
    "password",
    "passwd",
    "secret",
    "token",
    "api_key",
    "apikey",
    "api-key",
    "bearer",
    "authorization",
    "credential",
    "private",
    "-----begin",
];

/// Mask potentially sensitive text for logging
///
/// Redacts text containing sensitive patterns and truncates long messages
/// on a character boundary.
///
/// # Examples
/// ```
/// use wabridge_channels::util::mask_for_logging;
///
/// assert!(mask_for_logging("my password is secret123").contains("REDACTED"));
/// assert_eq!(mask_for_logging("Hola"), "Hola");
/// ```
#[must_use]
pub fn mask_for_logging(text: &str) -> String {
    let lower = text.to_lowercase();

    if SENSITIVE_PATTERNS.iter().any(|p| lower.contains(p)) {
        return "[REDACTED - potentially sensitive content]".to_string();
    }

    match text.char_indices().nth(MAX_LOG_TEXT_LENGTH) {
        Some((cut, _)) => format!("{}...[truncated]", &text[..cut]),
        None => text.to_string(),
    }
}
