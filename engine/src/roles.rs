use std::fmt;

/// The fourteen symbolic color purposes a theme template is built from.
///
/// Ten roles are authored per variant (see [`crate::palette::Palette`]);
/// the remaining four are derived from the resolved backgrounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorRole {
    DeepBackground,
    EditorBackground,
    MidBackground,
    ForegroundMuted,
    ForegroundMain,
    ForegroundBright,
    AccentPrimary,
    AccentSecondary,
    AccentTertiary,
    AccentQuaternary,
    AccentOperator,
    Error,
    Shadow,
    AnsiDim,
}

impl ColorRole {
    pub const ALL: [ColorRole; 14] = [
        ColorRole::DeepBackground,
        ColorRole::EditorBackground,
        ColorRole::MidBackground,
        ColorRole::ForegroundMuted,
        ColorRole::ForegroundMain,
        ColorRole::ForegroundBright,
        ColorRole::AccentPrimary,
        ColorRole::AccentSecondary,
        ColorRole::AccentTertiary,
        ColorRole::AccentQuaternary,
        ColorRole::AccentOperator,
        ColorRole::Error,
        ColorRole::Shadow,
        ColorRole::AnsiDim,
    ];

    /// Whether the role is computed rather than supplied by a palette.
    pub fn is_derived(self) -> bool {
        matches!(
            self,
            ColorRole::ForegroundMain
                | ColorRole::ForegroundBright
                | ColorRole::Shadow
                | ColorRole::AnsiDim
        )
    }

    pub fn key(self) -> &'static str {
        match self {
            ColorRole::DeepBackground => "bg_deep",
            ColorRole::EditorBackground => "bg_editor",
            ColorRole::MidBackground => "bg_mid",
            ColorRole::ForegroundMuted => "fg_muted",
            ColorRole::ForegroundMain => "fg_main",
            ColorRole::ForegroundBright => "fg_bright",
            ColorRole::AccentPrimary => "accent_primary",
            ColorRole::AccentSecondary => "accent_secondary",
            ColorRole::AccentTertiary => "accent_tertiary",
            ColorRole::AccentQuaternary => "accent_quaternary",
            ColorRole::AccentOperator => "accent_operator",
            ColorRole::Error => "error",
            ColorRole::Shadow => "shadow",
            ColorRole::AnsiDim => "ansi_dim",
        }
    }
}

impl fmt::Display for ColorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Role to literal color mapping for a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceColorMap {
    entries: &'static [(ColorRole, &'static str)],
}

impl SourceColorMap {
    pub const fn new(entries: &'static [(ColorRole, &'static str)]) -> Self {
        Self { entries }
    }

    pub fn get(&self, role: ColorRole) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(r, _)| *r == role)
            .map(|(_, hex)| *hex)
    }

    pub fn entries(&self) -> &'static [(ColorRole, &'static str)] {
        self.entries
    }
}

/// The colors baked into the Ruby Sea template every variant is derived from.
pub const RUBY_SEA_SOURCE: SourceColorMap = SourceColorMap::new(&[
    (ColorRole::DeepBackground, "#0e1b2a"),
    (ColorRole::EditorBackground, "#122236"),
    (ColorRole::MidBackground, "#214b78"),
    (ColorRole::ForegroundMuted, "#6592b3"),
    (ColorRole::ForegroundMain, "#a2aabc"),
    (ColorRole::ForegroundBright, "#c5d3e0"),
    (ColorRole::AccentPrimary, "#ff4c5a"),
    (ColorRole::AccentSecondary, "#ffd580"),
    (ColorRole::AccentTertiary, "#3da5f6"),
    (ColorRole::AccentQuaternary, "#62c6ff"),
    (ColorRole::AccentOperator, "#ff6b57"),
    (ColorRole::Error, "#ff2d3b"),
    (ColorRole::Shadow, "#00030F"),
    (ColorRole::AnsiDim, "#444a5e"),
]);
