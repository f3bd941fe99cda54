// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Config(String),
    Network(String),
    Payload(String),
    Surface(SurfaceError),
}

/// Failures reported by a host surface (the DOM side of a block).
///
/// These never escape a block instance: the caller logs them and the
/// instance stops animating.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceError {
    /// The element needed for the operation is gone (removed from the page).
    Detached,

    /// Layout could not be measured.
    Measurement(String),

    /// A style or attribute write was rejected.
    Render(String),
}

impl SurfaceError {
    /// Short category used as the diagnostic tag suffix.
    pub fn category(&self) -> &'static str {
        match self {
            SurfaceError::Detached => "detached",
            SurfaceError::Measurement(_) => "measurement",
            SurfaceError::Render(_) => "render",
        }
    }
}

impl fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SurfaceError::Detached => write!(f, "Element is no longer attached"),
            SurfaceError::Measurement(msg) => write!(f, "Measurement failed: {}", msg),
            SurfaceError::Render(msg) => write!(f, "Render failed: {}", msg),
        }
    }
}

impl std::error::Error for SurfaceError {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Network(e) => write!(f, "Network Error: {}", e),
            Error::Payload(e) => write!(f, "Payload Error: {}", e),
            Error::Surface(e) => write!(f, "Surface Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<SurfaceError> for Error {
    fn from(err: SurfaceError) -> Self {
        Error::Surface(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Network(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Payload(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_io_error() {
        let err = Error::Io("disk failure".to_string());
        assert_eq!(format!("{}", err), "I/O Error: disk failure");
    }

    #[test]
    fn from_io_error_produces_io_variant() {
        let io_error = std::io::Error::other("boom");
        let err: Error = io_error.into();
        match err {
            Error::Io(message) => assert!(message.contains("boom")),
            _ => panic!("expected Io variant"),
        }
    }

    #[test]
    fn config_error_formats_properly() {
        let err = Error::Config("bad field".into());
        assert_eq!(format!("{}", err), "Config Error: bad field");
    }

    #[test]
    fn json_error_becomes_payload_variant() {
        let parse_err = serde_json::from_str::<Vec<u8>>("{not json").unwrap_err();
        let err: Error = parse_err.into();
        assert!(matches!(err, Error::Payload(_)));
    }

    #[test]
    fn surface_error_wraps_and_displays() {
        let err: Error = SurfaceError::Measurement("zero box".into()).into();
        assert_eq!(
            format!("{}", err),
            "Surface Error: Measurement failed: zero box"
        );
    }

    #[test]
    fn surface_error_categories() {
        assert_eq!(SurfaceError::Detached.category(), "detached");
        assert_eq!(SurfaceError::Render("x".into()).category(), "render");
    }
}
