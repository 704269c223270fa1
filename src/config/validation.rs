//! Configuration validation.
//!
//! Semantic checks on top of what serde already guarantees. Pure function:
//! `RelayConfig → Result<(), Vec<ValidationError>>`, returning all
//! problems rather than stopping at the first.

use thiserror::Error;

use crate::config::schema::RelayConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address must not be empty")]
    EmptyBindAddress,

    #[error("listener.request_timeout_secs must be greater than zero")]
    ZeroRequestTimeout,

    #[error("escape.namespace must not be empty")]
    EmptyNamespace,

    #[error("escape.namespace must end with '/'")]
    UnterminatedNamespace,

    #[error("escape.marker must not be empty")]
    EmptyMarker,

    #[error("escape.marker must not contain '/' or '%': {0:?}")]
    ReservedMarkerChar(String),

    #[error("escape.api_markers must contain at least one entry")]
    NoApiMarkers,

    #[error("escape.api_markers entries must not be empty")]
    EmptyApiMarker,
}

/// Validate a configuration, collecting every error.
pub fn validate_config(config: &RelayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.is_empty() {
        errors.push(ValidationError::EmptyBindAddress);
    }
    if config.listener.request_timeout_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }

    let escape = &config.escape;
    if escape.namespace.is_empty() {
        errors.push(ValidationError::EmptyNamespace);
    } else if !escape.namespace.ends_with('/') {
        errors.push(ValidationError::UnterminatedNamespace);
    }

    if escape.marker.is_empty() {
        errors.push(ValidationError::EmptyMarker);
    } else if escape.marker.contains('/') || escape.marker.contains('%') {
        // Separators and encoding escapes inside the marker are themselves
        // subject to intermediary normalization.
        errors.push(ValidationError::ReservedMarkerChar(escape.marker.clone()));
    }

    if escape.api_markers.is_empty() {
        errors.push(ValidationError::NoApiMarkers);
    } else if escape.api_markers.iter().any(|m| m.is_empty()) {
        errors.push(ValidationError::EmptyApiMarker);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::RelayConfig;

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&RelayConfig::default()).is_ok());
    }

    #[test]
    fn slash_in_marker_is_rejected() {
        let mut config = RelayConfig::default();
        config.escape.marker = "__SLASH/__".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::ReservedMarkerChar("__SLASH/__".to_string())]
        );
    }

    #[test]
    fn percent_in_marker_is_rejected() {
        let mut config = RelayConfig::default();
        config.escape.marker = "%SLASH%".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn namespace_without_trailing_separator_is_rejected() {
        let mut config = RelayConfig::default();
        config.escape.namespace = "workflows".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.contains(&ValidationError::UnterminatedNamespace));
    }

    #[test]
    fn all_errors_are_collected() {
        let mut config = RelayConfig::default();
        config.listener.bind_address.clear();
        config.listener.request_timeout_secs = 0;
        config.escape.namespace.clear();
        config.escape.marker.clear();
        config.escape.api_markers.clear();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 5);
    }
}
