use crate::roles::ColorRole;
use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while deriving palettes, colorizing the template and
/// rewriting the packaging manifest.
///
/// Every variant is fatal for a generator run. Nothing in the engine retries
/// or falls back to a partially generated document.
///
/// # Error Categories
///
/// ## Color Errors
/// - [`InvalidHexColor`] - a configured or template color is not `#rrggbb`
/// - [`UnresolvedRole`] - a template role has no value for a variant
/// - [`InvalidPattern`] - a source color produced an unusable pattern
///
/// ## Document Errors
/// - [`TemplateParse`] - the colorized template is not JSON even after repair
/// - [`NotAnObject`] - a theme or manifest root is not a JSON object
/// - [`MissingManifestField`] - the manifest lacks a nested object we rewrite
/// - [`Serialize`] - a document could not be written back to JSON
///
/// ## I/O Errors
/// - [`ManifestIo`] - reading or writing the manifest file failed
/// - [`ManifestParse`] - the manifest file is not strict JSON
///
/// [`InvalidHexColor`]: EngineError::InvalidHexColor
/// [`UnresolvedRole`]: EngineError::UnresolvedRole
/// [`InvalidPattern`]: EngineError::InvalidPattern
/// [`TemplateParse`]: EngineError::TemplateParse
/// [`NotAnObject`]: EngineError::NotAnObject
/// [`MissingManifestField`]: EngineError::MissingManifestField
/// [`Serialize`]: EngineError::Serialize
/// [`ManifestIo`]: EngineError::ManifestIo
/// [`ManifestParse`]: EngineError::ManifestParse
#[derive(Debug, Error)]
pub enum EngineError {
    /// A color string could not be parsed as six hex digits.
    #[error("Invalid hex color '{value}': {reason}")]
    InvalidHexColor { value: String, reason: String },

    /// An authored role had no value in the variant palette.
    #[error("No value for role '{role}' in the variant palette")]
    UnresolvedRole { role: ColorRole },

    /// The substitution pattern built from a source color did not compile.
    #[error("Invalid substitution pattern for {color}: {source}")]
    InvalidPattern {
        color: String,
        source: regex::Error,
    },

    /// The template still failed strict JSON parsing after comment removal,
    /// trailing-comma removal and the consecutive-comma repair pass.
    #[error("Template for '{label}' is not valid JSON after cleanup: {source}")]
    TemplateParse {
        label: String,
        source: serde_json::Error,
    },

    #[error("{document} root is not a JSON object")]
    NotAnObject { document: String },

    /// A manifest field that is expected to already exist (for example
    /// `repository` when rewriting `repository.url`) is absent or has the
    /// wrong shape.
    #[error("Manifest field '{field}' is missing or is not an object")]
    MissingManifestField { field: String },

    #[error("Failed to serialize {document}: {source}")]
    Serialize {
        document: String,
        source: serde_json::Error,
    },

    #[error("Manifest {path} is not valid JSON: {source}")]
    ManifestParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Manifest I/O failed for {path}: {source}")]
    ManifestIo {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl EngineError {
    pub fn invalid_hex(value: &str, reason: &str) -> Self {
        EngineError::InvalidHexColor {
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Result type alias for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unresolved_role_names_the_role() {
        let error = EngineError::UnresolvedRole {
            role: ColorRole::AccentPrimary,
        };
        assert_eq!(
            error.to_string(),
            format!("No value for role '{}' in the variant palette", ColorRole::AccentPrimary)
        );
    }

    #[test]
    fn test_invalid_pattern_keeps_regex_source() {
        let source = regex::Regex::new("(").unwrap_err();
        let error = EngineError::InvalidPattern {
            color: "#122236".to_string(),
            source,
        };
        assert!(
            error
                .to_string()
                .starts_with("Invalid substitution pattern for #122236: ")
        );
        assert!(std::error::Error::source(&error).is_some());
    }

    #[test]
    fn test_invalid_hex_helper() {
        let error = EngineError::invalid_hex("#12", "expected 6 hex digits");
        assert_eq!(error.to_string(), "Invalid hex color '#12': expected 6 hex digits");
    }
}
