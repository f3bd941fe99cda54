// SPDX-License-Identifier: MPL-2.0
//! Message sanitization and warning/error type definitions.
//!
//! This module provides:
//! - Type enums for categorizing warnings and errors
//! - Message sanitization to keep credentials and local paths out of logs

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

// =============================================================================
// Warning and Error Type Enums
// =============================================================================

/// Categories of warnings that can occur in a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningType {
    /// The offers API could not be reached or answered with an error.
    NetworkError,
    /// Authored or configured data was malformed and a default was used.
    ConfigurationIssue,
    /// The offers API answered without usable terms.
    MissingContent,
    Other,
}

/// Categories of errors that can occur in a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// A DOM measurement or style write failed.
    SurfaceError,
    /// The offers payload could not be decoded.
    PayloadError,
    Other,
}

// =============================================================================
// Message Sanitization
// =============================================================================

/// Query parameters carrying credentials.
static CREDENTIAL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(api_key|access_token|client_secret)=[^&\s]*")
        .expect("credential regex should compile")
});

/// Local file paths (config files, temp dirs).
static PATH_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r#"("#,
        r#"/home/[^\s"'()\[\]]+"#,
        r#"|/Users/[^\s"'()\[\]]+"#,
        r#"|/tmp/[^\s"'()\[\]]+"#,
        r#"|~/[^\s"'()\[\]]+"#,
        r#"|[A-Za-z]:\\[^\s"'()\[\]]+"#,
        r#")"#,
    ))
    .expect("path regex should compile")
});

/// Sanitizes a message before it is stored or logged.
///
/// Credential query values become `<redacted>` and local paths become
/// `<path>`, keeping the rest of the message intact.
///
/// # Examples
///
/// ```
/// use cc_blocks::diagnostics::sanitize_message;
///
/// let msg = "GET https://aos.adobe.io/offers/X?locale=de_DE&api_key=secret";
/// assert_eq!(
///     sanitize_message(msg),
///     "GET https://aos.adobe.io/offers/X?locale=de_DE&api_key=<redacted>"
/// );
///
/// let msg = "cannot read /home/user/.config/CcBlocks/site.toml";
/// assert_eq!(sanitize_message(msg), "cannot read <path>");
/// ```
#[must_use]
pub fn sanitize_message(message: &str) -> String {
    let redacted = CREDENTIAL_PATTERN.replace_all(message, "$1=<redacted>");
    PATH_PATTERN.replace_all(&redacted, "<path>").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warning_type_serializes_to_snake_case() {
        assert_eq!(
            serde_json::to_string(&WarningType::NetworkError).unwrap(),
            "\"network_error\""
        );
        assert_eq!(
            serde_json::to_string(&WarningType::MissingContent).unwrap(),
            "\"missing_content\""
        );
    }

    #[test]
    fn error_type_serializes_to_snake_case() {
        assert_eq!(
            serde_json::to_string(&ErrorType::SurfaceError).unwrap(),
            "\"surface_error\""
        );
        assert_eq!(
            serde_json::from_str::<ErrorType>("\"payload_error\"").unwrap(),
            ErrorType::PayloadError
        );
    }

    #[test]
    fn redacts_every_credential_parameter() {
        let msg = "?api_key=abc&service_providers=PROMO_TERMS&ACCESS_TOKEN=xyz";
        assert_eq!(
            sanitize_message(msg),
            "?api_key=<redacted>&service_providers=PROMO_TERMS&ACCESS_TOKEN=<redacted>"
        );
    }

    #[test]
    fn plain_messages_are_unchanged() {
        assert_eq!(sanitize_message("Reel height is zero"), "Reel height is zero");
    }

    #[test]
    fn windows_paths_are_masked() {
        assert_eq!(
            sanitize_message(r"open C:\Users\me\site.toml failed"),
            "open <path> failed"
        );
    }
}
