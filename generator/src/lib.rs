//! # Color Sea Generator
//!
//! Regenerates the Color Sea theme package: one editor color theme per
//! configured variant, all derived from the Ruby Sea template, plus the
//! packaging manifest that lists them.
//!
//! ## Modules
//!
//! - [`config`] - Embedded configuration and its validation
//! - [`error`] - Application error types
//! - [`logger`] - Logging configuration
//! - [`pipeline`] - Read, generate, clean, write and manifest update
//! - [`validation`] - Shared validator trait

pub mod config;
pub mod error;
pub mod logger;
pub mod pipeline;
pub mod validation;

pub use error::{AppError, AppResult};
pub use validation::Validator;
