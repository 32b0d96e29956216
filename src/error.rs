//! Error types shared by the countdown components.
//!
//! Every error here has a local fallback: the widget substitutes the default
//! template for [`CountdownError::InvalidFormat`], applies its
//! [`StartPolicy`](crate::ticker::StartPolicy) for
//! [`CountdownError::NonPositiveDuration`], and draws text without a background
//! for [`CountdownError::MissingResource`]. The library functions still return
//! them so callers can react explicitly.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CountdownError>;

/// Errors produced while parsing templates, starting countdowns or resolving
/// background resources.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CountdownError {
    /// The time template is empty or malformed.
    #[error("invalid time format {template:?}: {reason}")]
    InvalidFormat {
        /// The offending template.
        template: String,
        /// What is wrong with it.
        reason: String,
    },

    /// A countdown was started with zero or negative milliseconds.
    #[error("countdown duration must be positive, got {millis}ms")]
    NonPositiveDuration {
        /// The rejected duration.
        millis: i64,
    },

    /// A named background resource is not registered with the surface.
    #[error("background resource not found: {name}")]
    MissingResource {
        /// Name of the unresolved resource.
        name: String,
    },

    /// A style configuration file could not be parsed.
    #[cfg(feature = "config")]
    #[error("invalid style configuration: {0}")]
    Config(String),
}

impl CountdownError {
    pub(crate) fn invalid_format(template: &str, reason: impl Into<String>) -> Self {
        Self::InvalidFormat {
            template: template.to_string(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CountdownError::invalid_format("", "template is empty");
        assert_eq!(
            err.to_string(),
            "invalid time format \"\": template is empty"
        );

        let err = CountdownError::NonPositiveDuration { millis: -1 };
        assert_eq!(err.to_string(), "countdown duration must be positive, got -1ms");

        let err = CountdownError::MissingResource {
            name: "digit-card".to_string(),
        };
        assert_eq!(err.to_string(), "background resource not found: digit-card");
    }
}
