//! # Generation Pipeline
//!
//! Runs one full regeneration of the theme package:
//!
//! 1. **Read** the template and the manifest. Either missing is fatal before
//!    anything on disk changes.
//! 2. **Generate** every variant in memory. A malformed template aborts the
//!    run with no output written.
//! 3. **Clean** the legacy output directories and every previously generated
//!    file in the output directory. The template is never removed.
//! 4. **Write** one file per variant.
//! 5. **Update** the manifest with the new theme list.
//!
//! Running it twice with the same configuration produces byte-identical
//! files.

use crate::config::GeneratorConfig;
use crate::error::{AppError, AppResult};
use engine::manifest::{ThemeContribution, apply_manifest_update, read_manifest, write_manifest};
use engine::{RUBY_SEA_SOURCE, SourceColorMap, ThemeAssembler};
use std::fs;
use std::path::{Path, PathBuf};

/// One generated variant, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedTheme {
    pub label: String,
    pub file_name: String,
    pub contents: String,
}

/// What a run did, for progress output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub manifest_name: String,
    pub display_name: String,
    pub publisher: String,
    pub removed_legacy_dirs: Vec<PathBuf>,
    pub removed_stale_files: Vec<PathBuf>,
    pub written: Vec<PathBuf>,
    pub themes: Vec<ThemeContribution>,
}

pub struct Pipeline<'a> {
    config: &'a GeneratorConfig,
    root: PathBuf,
    assembler: ThemeAssembler,
}

impl<'a> Pipeline<'a> {
    /// Pipeline over the Ruby Sea template rooted at `root`.
    pub fn new(config: &'a GeneratorConfig, root: impl Into<PathBuf>) -> Self {
        Self::with_source(config, root, RUBY_SEA_SOURCE)
    }

    pub fn with_source(
        config: &'a GeneratorConfig,
        root: impl Into<PathBuf>,
        source: SourceColorMap,
    ) -> Self {
        Self {
            config,
            root: root.into(),
            assembler: ThemeAssembler::new(source, *config.lightness()),
        }
    }

    pub fn template_path(&self) -> PathBuf {
        self.root.join(self.config.layout().template())
    }

    pub fn output_dir(&self) -> PathBuf {
        self.root.join(self.config.layout().output_dir())
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.root.join(self.config.layout().manifest())
    }

    pub fn run(&self) -> AppResult<RunSummary> {
        let template_path = self.template_path();
        log::info!("Reading source template: {}", template_path.display());
        let template = fs::read_to_string(&template_path).map_err(|source| AppError::ReadFile {
            path: template_path.clone(),
            source,
        })?;

        let manifest_path = self.manifest_path();
        let mut manifest = read_manifest(&manifest_path)?;

        let generated = self.generate_all(&template)?;

        let mut summary = RunSummary {
            manifest_name: self.config.extension().name.clone(),
            display_name: self.config.extension().display_name.clone(),
            publisher: self.config.extension().publisher.clone(),
            ..RunSummary::default()
        };

        let output_dir = self.output_dir();
        fs::create_dir_all(&output_dir).map_err(|source| AppError::CreateDir {
            path: output_dir.clone(),
            source,
        })?;
        summary.removed_legacy_dirs = self.remove_legacy_dirs()?;
        summary.removed_stale_files = self.remove_stale_outputs(&template_path)?;

        for theme in &generated {
            let path = output_dir.join(&theme.file_name);
            fs::write(&path, &theme.contents).map_err(|source| AppError::WriteFile {
                path: path.clone(),
                source,
            })?;
            log::info!("Wrote {} to {}", theme.label, path.display());

            summary.themes.push(ThemeContribution::dark(
                &theme.label,
                &self.config.layout().manifest_path(&theme.file_name),
            ));
            summary.written.push(path);
        }

        apply_manifest_update(
            &mut manifest,
            &self.config.manifest_metadata(),
            &summary.themes,
        )?;
        write_manifest(&manifest_path, &manifest)?;
        log::info!(
            "Updated {} with {} theme(s)",
            manifest_path.display(),
            summary.themes.len()
        );

        Ok(summary)
    }

    /// Generate every configured variant from `template` without touching
    /// the file system.
    pub fn generate_all(&self, template: &str) -> AppResult<Vec<GeneratedTheme>> {
        self.config
            .variants()
            .iter()
            .map(|variant| -> AppResult<GeneratedTheme> {
                let label = self.config.theme_label(variant);
                log::debug!("Generating {label}");
                let light_accent = self.config.variants().light_accent(&variant.name);
                let contents =
                    self.assembler
                        .generate(template, &label, &variant.palette, light_accent)?;
                Ok(GeneratedTheme {
                    file_name: self.config.layout().file_name(variant),
                    label,
                    contents,
                })
            })
            .collect()
    }

    fn remove_legacy_dirs(&self) -> AppResult<Vec<PathBuf>> {
        let mut removed = Vec::new();
        for dir in self.config.layout().legacy_dirs() {
            let path = self.root.join(dir);
            if path.is_dir() {
                fs::remove_dir_all(&path).map_err(|source| AppError::RemovePath {
                    path: path.clone(),
                    source,
                })?;
                log::info!("Removed legacy directory {}", path.display());
                removed.push(path);
            }
        }
        Ok(removed)
    }

    fn remove_stale_outputs(&self, template_path: &Path) -> AppResult<Vec<PathBuf>> {
        let output_dir = self.output_dir();
        let entries = fs::read_dir(&output_dir).map_err(|source| AppError::ListDir {
            path: output_dir.clone(),
            source,
        })?;

        let mut removed = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| AppError::ListDir {
                path: output_dir.clone(),
                source,
            })?;
            let path = entry.path();
            let is_generated = path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| self.config.layout().is_generated_file_name(n));

            if !is_generated || !path.is_file() || path == template_path {
                continue;
            }

            fs::remove_file(&path).map_err(|source| AppError::RemovePath {
                path: path.clone(),
                source,
            })?;
            log::debug!("Removed stale output {}", path.display());
            removed.push(path);
        }

        removed.sort();
        Ok(removed)
    }
}
