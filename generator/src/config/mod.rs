use crate::error::{AppError, AppResult};
use crate::validation::Validator;
use engine::manifest::ManifestMetadata;
use engine::{LightnessTargets, PaletteRegistry, Variant};
use serde::Deserialize;
use std::collections::HashMap;

pub mod defaults;
pub mod validation;

pub use validation::ConfigValidationError;
use validation::{HexColorValidator, LightnessValidator, VariantNameValidator};

/// Immutable generator configuration.
///
/// Built once from the embedded `config.default.toml` and handed to the
/// pipeline explicitly. Nothing is read from the environment.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratorConfig {
    extension: ExtensionConfig,
    #[serde(default)]
    lightness: LightnessTargets,
    #[serde(default)]
    layout: LayoutConfig,
    #[serde(default)]
    logging: LoggingConfig,
    #[serde(default)]
    variants: PaletteRegistry,
}

impl GeneratorConfig {
    /// Parse and validate the configuration embedded in the binary.
    pub fn load_default() -> AppResult<Self> {
        Self::from_toml_str(defaults::DEFAULT_CONFIG)
    }

    /// Parse and validate a configuration document.
    pub fn from_toml_str(content: &str) -> AppResult<Self> {
        let config: GeneratorConfig = toml::from_str(content)
            .map_err(|e| AppError::Config(format!("Failed to parse configuration: {e}")))?;

        config.validate().map_err(AppError::InvalidConfig)?;
        log::debug!(
            "Loaded configuration for '{}' with {} variant(s)",
            config.extension.display_name,
            config.variants.len()
        );
        Ok(config)
    }

    /// Check every value, collecting all problems instead of stopping at the
    /// first one.
    pub fn validate(&self) -> Result<(), Vec<ConfigValidationError>> {
        let mut errors = Vec::new();

        for (field, value) in [
            ("extension.name", &self.extension.name),
            ("extension.display_name", &self.extension.display_name),
            ("extension.publisher", &self.extension.publisher),
            ("extension.repository_url", &self.extension.repository_url),
        ] {
            if value.trim().is_empty() {
                errors.push(ConfigValidationError::EmptyField {
                    field: field.to_string(),
                });
            }
        }

        for (field, value) in [
            ("deep", self.lightness.deep),
            ("editor", self.lightness.editor),
            ("mid", self.lightness.mid),
        ] {
            if LightnessValidator.validate(&value).is_err() {
                errors.push(ConfigValidationError::LightnessOutOfRange {
                    field: field.to_string(),
                    configured: value,
                });
            }
        }

        if self.variants.is_empty() {
            errors.push(ConfigValidationError::NoVariants);
        }

        let mut file_names: HashMap<String, &str> = HashMap::new();
        for variant in self.variants.iter() {
            if let Err(e) = VariantNameValidator.validate(&variant.name) {
                errors.push(e);
                continue;
            }

            validate_variant_colors(variant, &mut errors);

            let file_name = self.layout.file_name(variant);
            if let Some(first) = file_names.get(&file_name) {
                errors.push(ConfigValidationError::DuplicateFileName {
                    file_name: file_name.clone(),
                    first: first.to_string(),
                    second: variant.name.clone(),
                });
            } else {
                file_names.insert(file_name, &variant.name);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    pub fn extension(&self) -> &ExtensionConfig {
        &self.extension
    }

    pub fn lightness(&self) -> &LightnessTargets {
        &self.lightness
    }

    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    pub fn logging(&self) -> &LoggingConfig {
        &self.logging
    }

    pub fn variants(&self) -> &PaletteRegistry {
        &self.variants
    }

    /// Display label of a variant, e.g. `Color Sea Orange`.
    pub fn theme_label(&self, variant: &Variant) -> String {
        format!("{} {}", self.extension.display_name, variant.name)
    }

    pub fn manifest_metadata(&self) -> ManifestMetadata {
        ManifestMetadata {
            name: self.extension.name.clone(),
            display_name: self.extension.display_name.clone(),
            publisher: self.extension.publisher.clone(),
            description: self.extension.description.clone(),
            repository_url: self.extension.repository_url.clone(),
        }
    }
}

fn validate_variant_colors(variant: &Variant, errors: &mut Vec<ConfigValidationError>) {
    let authored = variant
        .palette
        .authored()
        .map(|(role, hex)| (role.key(), hex));
    let accent = variant
        .light_accent
        .as_deref()
        .map(|hex| ("light_accent", hex));

    for (role, hex) in authored.chain(accent) {
        if let Err(reason) = HexColorValidator.validate(hex) {
            errors.push(ConfigValidationError::InvalidColor {
                variant: variant.name.clone(),
                role: role.to_string(),
                value: hex.to_string(),
                reason,
            });
        }
    }
}

/// Packaging metadata written into the manifest
#[derive(Debug, Clone, Deserialize)]
pub struct ExtensionConfig {
    pub name: String,
    pub display_name: String,
    pub publisher: String,
    #[serde(default)]
    pub description: String,
    pub repository_url: String,
}

/// Where the template, outputs and manifest live, relative to the project root
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LayoutConfig {
    template: Option<String>,
    output_dir: Option<String>,
    manifest: Option<String>,
    file_prefix: Option<String>,
    legacy_dirs: Option<Vec<String>>,
}

impl LayoutConfig {
    pub fn template(&self) -> &str {
        self.template
            .as_deref()
            .unwrap_or("themes/rubysea-color-theme.json")
    }

    pub fn output_dir(&self) -> &str {
        self.output_dir.as_deref().unwrap_or("themes")
    }

    pub fn manifest(&self) -> &str {
        self.manifest.as_deref().unwrap_or("package.json")
    }

    pub fn file_prefix(&self) -> &str {
        self.file_prefix.as_deref().unwrap_or("color-sea-")
    }

    pub fn legacy_dirs(&self) -> &[String] {
        self.legacy_dirs.as_deref().unwrap_or(&[])
    }

    /// Output file name of a variant: prefix, lowercased name without spaces.
    pub fn file_name(&self, variant: &Variant) -> String {
        format!("{}{}.json", self.file_prefix(), variant.slug())
    }

    /// Whether `file_name` looks like a generated theme file.
    pub fn is_generated_file_name(&self, file_name: &str) -> bool {
        file_name.starts_with(self.file_prefix()) && file_name.ends_with(".json")
    }

    /// Manifest-relative path of a generated file, always `/`-separated.
    pub fn manifest_path(&self, file_name: &str) -> String {
        format!("./{}/{}", self.output_dir().trim_end_matches('/'), file_name)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingConfig {
    level: Option<String>,
    file: Option<String>,
}

impl LoggingConfig {
    pub fn level(&self) -> &str {
        self.level.as_deref().unwrap_or("warn")
    }

    pub fn file(&self) -> Option<&str> {
        self.file.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use claims::{assert_err, assert_matches, assert_ok};

    const MINIMAL: &str = r##"
[extension]
name = "test-sea"
display_name = "Test Sea"
publisher = "tester"
repository_url = "https://example.com/test-sea"

[[variants]]
name = "Teal"
bg_deep = "#0B0F14"
bg_editor = "#141A23"
bg_mid = "#212833"
fg_muted = "#6C757D"
accent_primary = "#D62828"
accent_secondary = "#FFC300"
accent_tertiary = "#3A86FF"
accent_quaternary = "#8ECAE6"
accent_operator = "#FCA311"
error = "#C1121F"
"##;

    #[test]
    fn test_default_config_loads() {
        let config = assert_ok!(GeneratorConfig::load_default());

        assert_eq!(config.extension().name, "color-sea");
        assert_eq!(config.extension().display_name, "Color Sea");
        assert_eq!(config.extension().publisher, "danilodanese");
        assert_eq!(*config.lightness(), LightnessTargets::default());
        assert_eq!(config.layout().legacy_dirs(), ["dark", "light"]);

        let names: Vec<_> = config.variants().iter().map(|v| v.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Orange", "Red", "Yellow", "Purple", "Green", "Blue", "Gray"]
        );
        assert_eq!(config.variants().light_accent("Gray"), Some("#E5E5E5"));
    }

    #[test]
    fn test_layout_defaults_apply() {
        let config = assert_ok!(GeneratorConfig::from_toml_str(MINIMAL));
        let layout = config.layout();

        assert_eq!(layout.template(), "themes/rubysea-color-theme.json");
        assert_eq!(layout.output_dir(), "themes");
        assert_eq!(layout.manifest(), "package.json");
        assert_eq!(layout.file_prefix(), "color-sea-");
        assert!(layout.legacy_dirs().is_empty());
        assert_eq!(config.logging().level(), "warn");
        assert_eq!(config.logging().file(), None);
        assert_eq!(config.variants().light_accent("Teal"), None);
    }

    #[test]
    fn test_naming_rules() {
        let config = assert_ok!(GeneratorConfig::from_toml_str(MINIMAL));
        let mut variant = config.variants().get("Teal").unwrap().clone();
        variant.name = "Deep Teal".to_string();

        assert_eq!(config.theme_label(&variant), "Test Sea Deep Teal");
        assert_eq!(config.layout().file_name(&variant), "color-sea-deepteal.json");
        assert_eq!(
            config.layout().manifest_path("color-sea-deepteal.json"),
            "./themes/color-sea-deepteal.json"
        );
        assert!(config.layout().is_generated_file_name("color-sea-deepteal.json"));
        assert!(!config.layout().is_generated_file_name("rubysea-color-theme.json"));
        assert!(!config.layout().is_generated_file_name("color-sea-notes.txt"));
    }

    #[test]
    fn test_manifest_metadata() {
        let config = assert_ok!(GeneratorConfig::load_default());
        let metadata = config.manifest_metadata();

        assert_eq!(metadata.name, "color-sea");
        assert_eq!(
            metadata.homepage(),
            "https://github.com/danilodanese/color-sea/blob/main/README.md"
        );
        assert_eq!(
            metadata.bugs_url(),
            "https://github.com/danilodanese/color-sea/issues"
        );
    }

    #[test]
    fn test_invalid_color_is_reported() {
        let content = MINIMAL.replace("#141A23", "#141A2");
        let err = assert_err!(GeneratorConfig::from_toml_str(&content));

        assert_matches!(
            err,
            AppError::InvalidConfig(ref errors)
                if matches!(&errors[..], [ConfigValidationError::InvalidColor { role, .. }] if role == "bg_editor")
        );
    }

    #[test]
    fn test_duplicate_file_names_are_reported() {
        let second = MINIMAL
            .split("[[variants]]")
            .nth(1)
            .unwrap()
            .replace("\"Teal\"", "\"TE AL\"");
        let content = format!("{MINIMAL}\n[[variants]]{second}");
        let err = assert_err!(GeneratorConfig::from_toml_str(&content));

        assert_matches!(
            err,
            AppError::InvalidConfig(ref errors)
                if errors.iter().any(|e| matches!(e, ConfigValidationError::DuplicateFileName { .. }))
        );
    }

    #[test]
    fn test_collects_multiple_errors() {
        let content = MINIMAL
            .replace("publisher = \"tester\"", "publisher = \"\"")
            .replace("name = \"Teal\"", "name = \"Te/al\"")
            + "\n[lightness]\ndeep = 120\neditor = 12\nmid = 14\n";
        let err = assert_err!(GeneratorConfig::from_toml_str(&content));

        let AppError::InvalidConfig(errors) = err else {
            panic!("expected validation errors");
        };
        assert_eq!(errors.len(), 3);
        assert!(errors.contains(&ConfigValidationError::EmptyField {
            field: "extension.publisher".to_string()
        }));
        assert!(errors.iter().any(|e| matches!(
            e,
            ConfigValidationError::LightnessOutOfRange { field, .. } if field == "deep"
        )));
        assert!(errors.iter().any(|e| matches!(
            e,
            ConfigValidationError::InvalidVariantName { .. }
        )));
    }

    #[test]
    fn test_no_variants_is_reported() {
        let content = MINIMAL.split("[[variants]]").next().unwrap().to_string();
        let err = assert_err!(GeneratorConfig::from_toml_str(&content));
        assert_matches!(
            err,
            AppError::InvalidConfig(ref errors) if errors == &vec![ConfigValidationError::NoVariants]
        );
    }

    #[test]
    fn test_malformed_toml_is_a_config_error() {
        let err = assert_err!(GeneratorConfig::from_toml_str("[extension\nname = "));
        assert_matches!(err, AppError::Config(_));
    }
}
