use crate::assembler::to_pretty_json;
use crate::errors::{EngineError, EngineResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// UI theme marker for every contributed variant.
pub const UI_THEME_DARK: &str = "vs-dark";

/// One entry of the manifest's `contributes.themes` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeContribution {
    pub label: String,
    #[serde(rename = "uiTheme")]
    pub ui_theme: String,
    pub path: String,
}

impl ThemeContribution {
    pub fn dark(label: &str, path: &str) -> Self {
        Self {
            label: label.to_string(),
            ui_theme: UI_THEME_DARK.to_string(),
            path: path.to_string(),
        }
    }
}

/// Top-level manifest fields owned by the generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestMetadata {
    pub name: String,
    pub display_name: String,
    pub publisher: String,
    pub description: String,
    pub repository_url: String,
}

impl ManifestMetadata {
    pub fn homepage(&self) -> String {
        format!("{}/blob/main/README.md", self.repository_url)
    }

    pub fn bugs_url(&self) -> String {
        format!("{}/issues", self.repository_url)
    }
}

/// Rewrite the generator-owned fields of `manifest` in place.
///
/// `repository`, `bugs` and `contributes` must already be objects. They are
/// checked before anything is written, so a failed update leaves the
/// document untouched. Every other field is preserved as is.
pub fn apply_manifest_update(
    manifest: &mut Value,
    metadata: &ManifestMetadata,
    themes: &[ThemeContribution],
) -> EngineResult<()> {
    let root = manifest
        .as_object_mut()
        .ok_or_else(|| EngineError::NotAnObject {
            document: "Manifest".to_string(),
        })?;

    for field in ["repository", "bugs", "contributes"] {
        if !root.get(field).is_some_and(Value::is_object) {
            return Err(EngineError::MissingManifestField {
                field: field.to_string(),
            });
        }
    }

    let themes = serde_json::to_value(themes).map_err(|source| EngineError::Serialize {
        document: "theme contributions".to_string(),
        source,
    })?;

    root.insert("name".to_string(), Value::from(metadata.name.as_str()));
    root.insert(
        "displayName".to_string(),
        Value::from(metadata.display_name.as_str()),
    );
    root.insert(
        "publisher".to_string(),
        Value::from(metadata.publisher.as_str()),
    );
    root.insert(
        "description".to_string(),
        Value::from(metadata.description.as_str()),
    );

    set_nested(root, "repository", "url", Value::from(metadata.repository_url.as_str()));
    root.insert("homepage".to_string(), Value::from(metadata.homepage()));
    set_nested(root, "bugs", "url", Value::from(metadata.bugs_url()));
    set_nested(root, "contributes", "themes", themes);

    Ok(())
}

fn set_nested(root: &mut serde_json::Map<String, Value>, object: &str, key: &str, value: Value) {
    if let Some(Value::Object(inner)) = root.get_mut(object) {
        inner.insert(key.to_string(), value);
    }
}

pub fn read_manifest(path: &Path) -> EngineResult<Value> {
    let content = fs::read_to_string(path).map_err(|source| EngineError::ManifestIo {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| EngineError::ManifestParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Write `manifest` with two-space indentation and a trailing newline.
pub fn write_manifest(path: &Path, manifest: &Value) -> EngineResult<()> {
    let content = to_pretty_json(manifest, "manifest")?;
    fs::write(path, content).map_err(|source| EngineError::ManifestIo {
        path: path.to_path_buf(),
        source,
    })
}
