use crate::colorizer::{apply_color_map, build_resolved_color_map};
use crate::errors::{EngineError, EngineResult};
use crate::palette::{LightnessTargets, Palette};
use crate::roles::SourceColorMap;
use regex::Regex;
use serde_json::{Map, Value};
use std::sync::LazyLock;

/// Editor theme kind written into every generated document.
pub const THEME_TYPE: &str = "dark";

/// Alpha suffixes appended to the light accent. These are literal bytes
/// (`0x20`, `0x70`, `0x15`), not recomputed percentages.
pub const BRACKET_MATCH_BACKGROUND_ALPHA: &str = "20";
pub const BRACKET_MATCH_BORDER_ALPHA: &str = "70";
pub const SELECTION_HIGHLIGHT_ALPHA: &str = "15";

static TRAILING_COMMA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",\s*([}\]])").expect("trailing comma pattern is valid"));

static CONSECUTIVE_COMMAS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",\s*,").expect("consecutive comma pattern is valid"));

/// Turn "JSON with comments" into strict JSON text.
///
/// `//` line comments are dropped (a `//` inside a string literal is kept)
/// and trailing commas before `}` or `]` are removed.
pub fn clean_relaxed_json(text: &str) -> String {
    let without_comments = strip_line_comments(text);
    TRAILING_COMMA
        .replace_all(&without_comments, "$1")
        .into_owned()
}

/// Secondary repair pass: collapse `,<ws>,` into a single comma.
pub fn collapse_consecutive_commas(text: &str) -> String {
    CONSECUTIVE_COMMAS.replace_all(text, ",").into_owned()
}

fn strip_line_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    let mut in_string = false;
    let mut escaped = false;

    while let Some(c) = chars.next() {
        if in_string {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        match c {
            '"' => {
                in_string = true;
                out.push(c);
            }
            '/' if chars.peek() == Some(&'/') => {
                // Drop everything up to, but not including, the newline.
                while chars.peek().is_some_and(|&next| next != '\n') {
                    chars.next();
                }
            }
            _ => out.push(c),
        }
    }

    out
}

/// Builds one variant's theme document from the shared template.
#[derive(Debug, Clone, Copy)]
pub struct ThemeAssembler {
    source: SourceColorMap,
    targets: LightnessTargets,
}

impl ThemeAssembler {
    pub fn new(source: SourceColorMap, targets: LightnessTargets) -> Self {
        Self { source, targets }
    }

    /// Colorize, clean and parse the template, then stamp metadata and the
    /// optional light-accent highlight keys.
    pub fn assemble(
        &self,
        template: &str,
        label: &str,
        palette: &Palette,
        light_accent: Option<&str>,
    ) -> EngineResult<Value> {
        let color_map = build_resolved_color_map(&self.source, palette, &self.targets)?;
        let colorized = apply_color_map(template, &color_map)?;
        let mut document = parse_cleaned(&colorized, label)?;

        let root = document
            .as_object_mut()
            .ok_or_else(|| EngineError::NotAnObject {
                document: format!("Theme '{label}'"),
            })?;
        root.insert("name".to_string(), Value::String(label.to_string()));
        root.insert("type".to_string(), Value::String(THEME_TYPE.to_string()));

        if let Some(accent) = light_accent {
            apply_light_accent(root, accent);
        }

        Ok(document)
    }

    /// [`assemble`](Self::assemble) serialized with two-space indentation and
    /// a trailing newline.
    pub fn generate(
        &self,
        template: &str,
        label: &str,
        palette: &Palette,
        light_accent: Option<&str>,
    ) -> EngineResult<String> {
        let document = self.assemble(template, label, palette, light_accent)?;
        to_pretty_json(&document, &format!("theme '{label}'"))
    }
}

fn parse_cleaned(colorized: &str, label: &str) -> EngineResult<Value> {
    let cleaned = clean_relaxed_json(colorized);
    match serde_json::from_str(&cleaned) {
        Ok(value) => Ok(value),
        Err(first) => {
            log::debug!("Theme '{label}' needs comma repair: {first}");
            let repaired = collapse_consecutive_commas(&cleaned);
            serde_json::from_str(&repaired).map_err(|source| EngineError::TemplateParse {
                label: label.to_string(),
                source,
            })
        }
    }
}

fn apply_light_accent(root: &mut Map<String, Value>, accent: &str) {
    let accent = accent.to_lowercase();

    let colors = root
        .entry("colors")
        .or_insert_with(|| Value::Object(Map::new()));
    if !colors.is_object() {
        log::warn!("Theme 'colors' is not an object; replacing it to apply the light accent");
        *colors = Value::Object(Map::new());
    }

    if let Value::Object(colors) = colors {
        colors.insert(
            "editorBracketMatch.background".to_string(),
            Value::String(format!("{accent}{BRACKET_MATCH_BACKGROUND_ALPHA}")),
        );
        colors.insert(
            "editor.findMatchBorder".to_string(),
            Value::String(accent.clone()),
        );
        colors.insert(
            "editorBracketMatch.border".to_string(),
            Value::String(format!("{accent}{BRACKET_MATCH_BORDER_ALPHA}")),
        );
        colors.insert(
            "editor.selectionHighlightBackground".to_string(),
            Value::String(format!("{accent}{SELECTION_HIGHLIGHT_ALPHA}")),
        );
    }
}

/// Serialize with two-space indentation, preserving key order, plus a
/// trailing newline.
pub fn to_pretty_json(value: &Value, document: &str) -> EngineResult<String> {
    let mut out = serde_json::to_string_pretty(value).map_err(|source| EngineError::Serialize {
        document: document.to_string(),
        source,
    })?;
    out.push('\n');
    Ok(out)
}
