//! # Color Sea Engine
//!
//! Palette derivation and template colorization for the Color Sea family of
//! editor color themes. Every variant is produced from one template document
//! by replacing a fixed set of source colors with per-variant values.
//!
//! ## Modules
//!
//! - [`color`] - Hex/RGB/HSL conversion and derived-role formulas
//! - [`roles`] - The fourteen color roles and the template's source colors
//! - [`palette`] - Authored palettes, light accents and the variant registry
//! - [`colorizer`] - Resolved color maps and text substitution
//! - [`assembler`] - Relaxed JSON cleanup and theme document assembly
//! - [`manifest`] - Packaging manifest rewrite
//! - [`errors`] - Engine error types

pub mod assembler;
pub mod color;
pub mod colorizer;
pub mod errors;
pub mod manifest;
pub mod palette;
pub mod roles;

pub use assembler::ThemeAssembler;
pub use errors::{EngineError, EngineResult};
pub use palette::{LightnessTargets, Palette, PaletteRegistry, Variant};
pub use roles::{ColorRole, RUBY_SEA_SOURCE, SourceColorMap};
