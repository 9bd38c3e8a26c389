//! Configuration for the example catalog generator.
//!
//! The defaults reproduce the reference deployment: eight fixed categories
//! under `examples/`. An optional `examplecatalog.toml` in the working
//! directory (or a path given on the command line) overrides them.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, Result};

/// Default configuration file name, looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "examplecatalog.toml";

/// Marker replaced with generated content in each category listing.
pub const DEFAULT_PLACEHOLDER: &str =
    "<!-- This section will be automatically populated by the index generation script -->";

// ---------------------------------------------------------------------------
// Config structs (matching examplecatalog.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// File and directory names.
    #[serde(default)]
    pub layout: LayoutConfig,

    /// Ordered category names.
    #[serde(default)]
    pub categories: CategoriesConfig,
}

/// `[layout]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Examples root, relative to the working directory.
    #[serde(default = "default_root")]
    pub root: String,

    /// Description document inside each example directory.
    #[serde(default = "default_readme_file")]
    pub readme_file: String,

    /// Optional structured metadata inside each example directory.
    #[serde(default = "default_metadata_file")]
    pub metadata_file: String,

    /// Listing document inside each category directory.
    #[serde(default = "default_listing_file")]
    pub listing_file: String,

    /// Main listing document inside the examples root.
    #[serde(default = "default_listing_file")]
    pub main_listing_file: String,

    /// Catalog document inside the examples root.
    #[serde(default = "default_catalog_file")]
    pub catalog_file: String,

    /// Literal marker replaced in each category listing.
    #[serde(default = "default_placeholder")]
    pub placeholder: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            readme_file: default_readme_file(),
            metadata_file: default_metadata_file(),
            listing_file: default_listing_file(),
            main_listing_file: default_listing_file(),
            catalog_file: default_catalog_file(),
            placeholder: default_placeholder(),
        }
    }
}

fn default_root() -> String {
    "examples".into()
}
fn default_readme_file() -> String {
    "README.md".into()
}
fn default_metadata_file() -> String {
    "metadata.yaml".into()
}
fn default_listing_file() -> String {
    "index.md".into()
}
fn default_catalog_file() -> String {
    "examples.json".into()
}
fn default_placeholder() -> String {
    DEFAULT_PLACEHOLDER.into()
}

/// `[categories]` section: two groups, processed in order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoriesConfig {
    /// Problem-domain categories.
    #[serde(default = "default_problem_domain")]
    pub problem_domain: Vec<String>,

    /// Workflow-stage categories.
    #[serde(default = "default_workflow_stage")]
    pub workflow_stage: Vec<String>,
}

impl Default for CategoriesConfig {
    fn default() -> Self {
        Self {
            problem_domain: default_problem_domain(),
            workflow_stage: default_workflow_stage(),
        }
    }
}

impl CategoriesConfig {
    /// All categories: problem-domain first, then workflow-stage.
    pub fn ordered(&self) -> Vec<String> {
        self.problem_domain
            .iter()
            .chain(&self.workflow_stage)
            .cloned()
            .collect()
    }
}

fn default_problem_domain() -> Vec<String> {
    [
        "performance-issues",
        "error-detection",
        "security-incidents",
        "resource-optimization",
    ]
    .map(String::from)
    .to_vec()
}
fn default_workflow_stage() -> Vec<String> {
    [
        "incident-detection",
        "root-cause-analysis",
        "remediation",
        "end-to-end",
    ]
    .map(String::from)
    .to_vec()
}

// ---------------------------------------------------------------------------
// Generate config (runtime, merged from config + CLI flags)
// ---------------------------------------------------------------------------

/// Immutable runtime configuration handed to the generation pipeline.
#[derive(Debug, Clone)]
pub struct GenerateConfig {
    /// Examples root directory.
    pub root: PathBuf,
    pub readme_file: String,
    pub metadata_file: String,
    pub listing_file: String,
    pub main_listing_file: String,
    pub catalog_file: String,
    pub placeholder: String,
    /// Ordered category names.
    pub categories: Vec<String>,
}

impl From<&AppConfig> for GenerateConfig {
    fn from(config: &AppConfig) -> Self {
        let layout = &config.layout;
        Self {
            root: PathBuf::from(&layout.root),
            readme_file: layout.readme_file.clone(),
            metadata_file: layout.metadata_file.clone(),
            listing_file: layout.listing_file.clone(),
            main_listing_file: layout.main_listing_file.clone(),
            catalog_file: layout.catalog_file.clone(),
            placeholder: layout.placeholder.clone(),
            categories: config.categories.ordered(),
        }
    }
}

impl GenerateConfig {
    /// Replace the examples root (e.g. from `--root`).
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    pub fn category_dir(&self, category: &str) -> PathBuf {
        self.root.join(category)
    }

    pub fn listing_path(&self, category: &str) -> PathBuf {
        self.category_dir(category).join(&self.listing_file)
    }

    pub fn main_listing_path(&self) -> PathBuf {
        self.root.join(&self.main_listing_file)
    }

    pub fn catalog_path(&self) -> PathBuf {
        self.root.join(&self.catalog_file)
    }

    /// Reject configurations the pipeline cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.categories.is_empty() {
            return Err(CatalogError::validation("no categories configured"));
        }
        if self.placeholder.is_empty() {
            return Err(CatalogError::validation("placeholder marker is empty"));
        }
        for (i, category) in self.categories.iter().enumerate() {
            if category.is_empty() || category.contains(['/', '\\']) {
                return Err(CatalogError::validation(format!(
                    "invalid category name: {category:?}"
                )));
            }
            if self.categories[..i].contains(category) {
                return Err(CatalogError::validation(format!(
                    "duplicate category: {category}"
                )));
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Load config from an explicit path, or from `examplecatalog.toml` in the
/// working directory. Returns defaults if neither exists.
pub fn load_config(explicit: Option<&Path>) -> Result<AppConfig> {
    if let Some(path) = explicit {
        return load_config_from(path);
    }

    let path = Path::new(CONFIG_FILE_NAME);
    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| CatalogError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| CatalogError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Render the default configuration as TOML.
pub fn default_config_toml() -> Result<String> {
    toml::to_string_pretty(&AppConfig::default()).map_err(|e| CatalogError::config(e.to_string()))
}

/// Write a default config file. Refuses to overwrite an existing file.
pub fn init_config(path: &Path) -> Result<()> {
    if path.exists() {
        return Err(CatalogError::config(format!(
            "{} already exists",
            path.display()
        )));
    }

    let content = default_config_toml()?;
    std::fs::write(path, content).map_err(|e| CatalogError::io(path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(())
}
