use crate::color::{
    derive_ansi_dim, derive_foreground_bright, derive_foreground_main, derive_shadow,
    set_lightness,
};
use crate::errors::{EngineError, EngineResult};
use crate::palette::{LightnessTargets, Palette};
use crate::roles::{ColorRole, SourceColorMap};
use regex::{Captures, Regex};

/// One template color and the value it becomes in a variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedColor {
    pub role: ColorRole,
    pub source: String,
    pub target: String,
}

/// Source color to variant color mapping, total over the source map's roles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedColorMap {
    entries: Vec<ResolvedColor>,
}

impl ResolvedColorMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the target for `source`.
    pub fn insert(&mut self, role: ColorRole, source: &str, target: &str) {
        let target = target.to_string();
        match self
            .entries
            .iter_mut()
            .find(|e| e.source.eq_ignore_ascii_case(source))
        {
            Some(existing) => {
                existing.role = role;
                existing.target = target;
            }
            None => self.entries.push(ResolvedColor {
                role,
                source: source.to_string(),
                target,
            }),
        }
    }

    pub fn target_for(&self, source: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.source.eq_ignore_ascii_case(source))
            .map(|e| e.target.as_str())
    }

    #[cfg(test)]
    pub(crate) fn target_for_role(&self, role: ColorRole) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.role == role)
            .map(|e| e.target.as_str())
    }

    pub fn entries(&self) -> &[ResolvedColor] {
        &self.entries
    }

    /// Entries ordered longest source first. Ties keep insertion order.
    pub fn by_longest_source(&self) -> Vec<&ResolvedColor> {
        let mut ordered: Vec<&ResolvedColor> = self.entries.iter().collect();
        ordered.sort_by(|a, b| b.source.len().cmp(&a.source.len()));
        ordered
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Resolve every role of `source` to its value for `palette`.
///
/// Backgrounds are normalized to the fixed lightness targets, the muted
/// foreground, accents and error are copied verbatim, and the remaining four
/// roles are derived from the normalized backgrounds.
pub fn build_resolved_color_map(
    source: &SourceColorMap,
    palette: &Palette,
    targets: &LightnessTargets,
) -> EngineResult<ResolvedColorMap> {
    let bg_deep = set_lightness(&palette.bg_deep, targets.deep)?;
    let bg_editor = set_lightness(&palette.bg_editor, targets.editor)?;
    let bg_mid = set_lightness(&palette.bg_mid, targets.mid)?;

    let mut map = ResolvedColorMap::new();
    for &(role, source_hex) in source.entries() {
        let target = match role {
            ColorRole::DeepBackground => bg_deep.clone(),
            ColorRole::EditorBackground => bg_editor.clone(),
            ColorRole::MidBackground => bg_mid.clone(),
            ColorRole::ForegroundMain => derive_foreground_main(&bg_editor)?,
            ColorRole::ForegroundBright => derive_foreground_bright(&bg_editor)?,
            ColorRole::Shadow => derive_shadow(&bg_deep)?,
            ColorRole::AnsiDim => derive_ansi_dim(&bg_editor)?,
            authored => palette
                .get(authored)
                .map(str::to_string)
                .ok_or(EngineError::UnresolvedRole { role: authored })?,
        };
        map.insert(role, source_hex, &target);
    }

    Ok(map)
}

/// Replace every template occurrence of each source color with its target.
///
/// A match is the source hex (any case) plus an optional alpha suffix of up
/// to two hex digits, followed by a quote, whitespace, comma or closing
/// brace. The target and the captured suffix are emitted lowercase and the
/// terminator is kept. Sources are processed longest first, so a source that
/// is a prefix of another one cannot eat the longer one's occurrences.
pub fn apply_color_map(template: &str, map: &ResolvedColorMap) -> EngineResult<String> {
    let mut result = template.to_string();

    for entry in map.by_longest_source() {
        let pattern = format!(
            r#"(?i){}([0-9a-f]{{0,2}})(["\s,}}])"#,
            regex::escape(&entry.source.to_lowercase())
        );
        let re = Regex::new(&pattern).map_err(|source| EngineError::InvalidPattern {
            color: entry.source.clone(),
            source,
        })?;

        let occurrences = re.find_iter(&result).count();
        if occurrences == 0 {
            log::warn!(
                "Template has no occurrence of {} ({}); role left unchanged",
                entry.source,
                entry.role
            );
            continue;
        }

        let target = entry.target.to_lowercase();
        result = re
            .replace_all(&result, |caps: &Captures| {
                format!("{}{}{}", target, caps[1].to_lowercase(), &caps[2])
            })
            .into_owned();

        log::debug!(
            "Replaced {} occurrence(s) of {} ({}) with {}",
            occurrences,
            entry.source,
            entry.role,
            target
        );
    }

    Ok(result)
}
