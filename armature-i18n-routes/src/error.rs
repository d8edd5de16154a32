//! Error types for localized route expansion

use armature_i18n::I18nError;
use thiserror::Error;

/// Errors raised while expanding or building routes.
///
/// Expansion has no recoverable errors of its own: everything here comes
/// from a collaborator (descriptor, routing engine, bundle loading,
/// configuration) and is propagated unchanged.
#[derive(Debug, Error)]
pub enum RoutesError {
    /// The routing engine rejected a URL pattern
    #[error("Invalid route pattern `{pattern}`: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// A route was built without a handler
    #[error("Route `{0}` has no handler")]
    MissingHandler(String),

    /// A controller or method descriptor is malformed
    #[error("Invalid descriptor: {0}")]
    InvalidDescriptor(String),

    /// Configuration could not be read
    #[error("Configuration error: {0}")]
    Config(String),

    /// Locale or bundle error
    #[error(transparent)]
    I18n(#[from] I18nError),
}

impl RoutesError {
    pub(crate) fn invalid_pattern(pattern: &str, reason: impl Into<String>) -> Self {
        RoutesError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: reason.into(),
        }
    }
}
