//! Shared types, error model, and configuration for the example catalog.
//!
//! This crate is the foundation depended on by all other crates.
//! It provides:
//! - [`CatalogError`] — the unified error type
//! - Domain types ([`ExampleRecord`], [`Facets`], [`Catalog`])
//! - Run diagnostics ([`Diagnostics`], [`DiagnosticKind`])
//! - Configuration ([`AppConfig`], [`GenerateConfig`], config loading)

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, CONFIG_FILE_NAME, CategoriesConfig, DEFAULT_PLACEHOLDER, GenerateConfig,
    LayoutConfig, default_config_toml, init_config, load_config, load_config_from,
};
pub use diagnostics::{Diagnostic, DiagnosticKind, Diagnostics};
pub use error::{CatalogError, Result};
pub use types::{
    Catalog, DIFFICULTY_KEY, ENVIRONMENTS_KEY, ExampleDefaults, ExampleRecord, Facets, TAGS_KEY,
    TIME_REQUIRED_KEY, TOOLS_KEY, scalar_text,
};
