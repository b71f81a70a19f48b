use crate::validation::Validator;
use engine::color::Rgb;

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("No variants configured")]
    NoVariants,
    #[error("{field} must not be empty")]
    EmptyField { field: String },
    #[error("Invalid color for {variant}.{role}: '{value}' ({reason})")]
    InvalidColor {
        variant: String,
        role: String,
        value: String,
        reason: String,
    },
    #[error("Invalid variant name '{name}': {reason}")]
    InvalidVariantName { name: String, reason: String },
    #[error("Variants '{first}' and '{second}' both generate {file_name}")]
    DuplicateFileName {
        file_name: String,
        first: String,
        second: String,
    },
    #[error("Invalid lightness.{field}: {configured} (min: 0, max: 100)")]
    LightnessOutOfRange { field: String, configured: f64 },
}

impl ConfigValidationError {
    pub fn user_message(&self) -> String {
        match self {
            ConfigValidationError::NoVariants => "No variants configured!\n\n\
                Add at least one [[variants]] table to config.default.toml."
                .to_string(),
            ConfigValidationError::EmptyField { field } => {
                format!(
                    "Missing value for {field}!\n\n\
                    Please set {field} in config.default.toml."
                )
            }
            ConfigValidationError::InvalidColor {
                variant,
                role,
                value,
                reason,
            } => {
                format!(
                    "Invalid color in variant '{variant}'!\n\n\
                    Role: {role}\n\
                    Configured value: {value}\n\
                    Reason: {reason}\n\n\
                    Colors must be six hex digits, optionally prefixed with '#'."
                )
            }
            ConfigValidationError::InvalidVariantName { name, reason } => {
                format!(
                    "Invalid variant name: '{name}'\n\n\
                    Reason: {reason}\n\n\
                    Please use letters, digits and spaces only."
                )
            }
            ConfigValidationError::DuplicateFileName {
                file_name,
                first,
                second,
            } => {
                format!(
                    "Variant names collide!\n\n\
                    '{first}' and '{second}' would both be written to {file_name}.\n\n\
                    Please rename one of them."
                )
            }
            ConfigValidationError::LightnessOutOfRange { field, configured } => {
                format!(
                    "Lightness target out of range!\n\n\
                    Your configured value: {configured}\n\
                    Valid range: 0 - 100\n\n\
                    Please update lightness.{field} in config.default.toml."
                )
            }
        }
    }
}

/// Validator for `#rrggbb` colors
pub struct HexColorValidator;

impl Validator<str> for HexColorValidator {
    type Error = String;

    fn validate(&self, input: &str) -> Result<(), Self::Error> {
        Rgb::from_hex(input).map(|_| ()).map_err(|e| e.to_string())
    }
}

/// Validator for variant display names
pub struct VariantNameValidator;

impl Validator<str> for VariantNameValidator {
    type Error = ConfigValidationError;

    fn validate(&self, input: &str) -> Result<(), Self::Error> {
        let invalid = |reason: &str| ConfigValidationError::InvalidVariantName {
            name: input.to_string(),
            reason: reason.to_string(),
        };

        if input.trim().is_empty() {
            return Err(invalid("Name cannot be empty"));
        }

        if input.len() > 40 {
            return Err(invalid("Name too long (max 40 characters)"));
        }

        // The name ends up in a file name
        if !input.chars().all(|c| c.is_alphanumeric() || c == ' ') {
            return Err(invalid(
                "Name contains invalid characters (only letters, digits and spaces allowed)",
            ));
        }

        Ok(())
    }
}

/// Validator for lightness targets in percent
pub struct LightnessValidator;

impl Validator<f64> for LightnessValidator {
    type Error = String;

    fn validate(&self, input: &f64) -> Result<(), Self::Error> {
        if (0.0..=100.0).contains(input) {
            Ok(())
        } else {
            Err(format!("{input} is outside 0 - 100"))
        }
    }
}
