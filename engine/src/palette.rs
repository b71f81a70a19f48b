use crate::roles::ColorRole;
use serde::{Deserialize, Serialize};

/// Authored colors for one variant.
///
/// Only the ten roles a designer picks by hand live here. Foreground main,
/// foreground bright, shadow and dim ANSI are always derived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub bg_deep: String,
    pub bg_editor: String,
    pub bg_mid: String,
    pub fg_muted: String,
    pub accent_primary: String,
    pub accent_secondary: String,
    pub accent_tertiary: String,
    pub accent_quaternary: String,
    pub accent_operator: String,
    pub error: String,
}

impl Palette {
    /// Authored color for `role`, `None` for derived roles.
    pub fn get(&self, role: ColorRole) -> Option<&str> {
        let hex = match role {
            ColorRole::DeepBackground => &self.bg_deep,
            ColorRole::EditorBackground => &self.bg_editor,
            ColorRole::MidBackground => &self.bg_mid,
            ColorRole::ForegroundMuted => &self.fg_muted,
            ColorRole::AccentPrimary => &self.accent_primary,
            ColorRole::AccentSecondary => &self.accent_secondary,
            ColorRole::AccentTertiary => &self.accent_tertiary,
            ColorRole::AccentQuaternary => &self.accent_quaternary,
            ColorRole::AccentOperator => &self.accent_operator,
            ColorRole::Error => &self.error,
            ColorRole::ForegroundMain
            | ColorRole::ForegroundBright
            | ColorRole::Shadow
            | ColorRole::AnsiDim => return None,
        };
        Some(hex.as_str())
    }

    /// Every authored role with its color, in role order.
    pub fn authored(&self) -> impl Iterator<Item = (ColorRole, &str)> + '_ {
        ColorRole::ALL
            .into_iter()
            .filter_map(move |role| self.get(role).map(|hex| (role, hex)))
    }
}

/// Lightness every variant's backgrounds are normalized to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LightnessTargets {
    /// Sidebar and panels
    pub deep: f64,
    /// Main editor surface
    pub editor: f64,
    /// Selections
    pub mid: f64,
}

impl Default for LightnessTargets {
    fn default() -> Self {
        Self {
            deep: 10.0,
            editor: 12.0,
            mid: 14.0,
        }
    }
}

/// One named variant: its palette plus the optional light accent used for
/// the bracket-match and find/selection highlight keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    pub name: String,
    #[serde(flatten)]
    pub palette: Palette,
    #[serde(default)]
    pub light_accent: Option<String>,
}

impl Variant {
    /// Lowercased name with spaces removed, used to build file names.
    pub fn slug(&self) -> String {
        self.name
            .chars()
            .filter(|c| !c.is_whitespace())
            .flat_map(char::to_lowercase)
            .collect()
    }
}

/// Ordered set of variants to generate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaletteRegistry {
    variants: Vec<Variant>,
}

impl PaletteRegistry {
    pub fn new(variants: Vec<Variant>) -> Self {
        Self { variants }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Variant> {
        self.variants.iter()
    }

    pub fn get(&self, name: &str) -> Option<&Variant> {
        self.variants.iter().find(|v| v.name == name)
    }

    pub fn light_accent(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(|v| v.light_accent.as_deref())
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::orange;
    use super::*;

    #[test]
    fn test_authored_roles_exclude_derived() {
        let variant = orange();
        let authored: Vec<_> = variant.palette.authored().collect();
        assert_eq!(authored.len(), 10);
        assert!(authored.iter().all(|(role, _)| !role.is_derived()));
        assert_eq!(variant.palette.get(ColorRole::Shadow), None);
        assert_eq!(
            variant.palette.get(ColorRole::EditorBackground),
            Some("#582F0E")
        );
    }

    #[test]
    fn test_slug() {
        let mut variant = orange();
        assert_eq!(variant.slug(), "orange");
        variant.name = "Deep Ocean".to_string();
        assert_eq!(variant.slug(), "deepocean");
    }

    #[test]
    fn test_registry_lookup() {
        let mut plain = orange();
        plain.name = "Plain".to_string();
        plain.light_accent = None;
        let registry = PaletteRegistry::new(vec![orange(), plain]);

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.light_accent("Orange"), Some("#FFE6D5"));
        assert_eq!(registry.light_accent("Plain"), None);
        assert!(registry.get("Missing").is_none());
        let names: Vec<_> = registry.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["Orange", "Plain"]);
    }

    #[test]
    fn test_variant_deserializes_flat_table() {
        let json = r##"{
            "name": "Gray",
            "bg_deep": "#0B0F14", "bg_editor": "#141A23", "bg_mid": "#212833",
            "fg_muted": "#6C757D", "accent_primary": "#D62828",
            "accent_secondary": "#FFC300", "accent_tertiary": "#3A86FF",
            "accent_quaternary": "#8ECAE6", "accent_operator": "#FCA311",
            "error": "#C1121F"
        }"##;
        let variant: Variant = serde_json::from_str(json).unwrap();
        assert_eq!(variant.name, "Gray");
        assert_eq!(variant.palette.accent_operator, "#FCA311");
        assert_eq!(variant.light_accent, None);
    }
}
