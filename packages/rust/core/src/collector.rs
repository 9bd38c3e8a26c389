//! Walks one category directory and builds an [`ExampleRecord`] per example.

use std::path::Path;

use tracing::{debug, info, instrument};

use examplecatalog_markdown::{extract_description, extract_title};
use examplecatalog_shared::{
    CatalogError, DiagnosticKind, Diagnostics, ExampleDefaults, ExampleRecord, GenerateConfig,
    Result,
};

use crate::metadata::load_metadata;

/// Collect every example in `category`.
///
/// A missing category directory is a diagnostic and yields no examples.
/// Sub-directories are visited in name order; hidden ones (leading `.`) and
/// plain files are skipped. Examples without a README are skipped with a
/// diagnostic. Directory read failures are fatal.
#[instrument(skip(config, diagnostics))]
pub fn collect_category(
    config: &GenerateConfig,
    category: &str,
    diagnostics: &mut Diagnostics,
) -> Result<Vec<ExampleRecord>> {
    let category_dir = config.category_dir(category);

    if !category_dir.exists() {
        diagnostics.push(
            DiagnosticKind::MissingCategoryDir,
            &category_dir,
            "category directory not found",
        );
        return Ok(Vec::new());
    }

    let mut examples = Vec::new();
    for name in example_dir_names(&category_dir)? {
        let example_dir = category_dir.join(&name);
        if let Some(example) = collect_example(config, category, &name, &example_dir, diagnostics)?
        {
            examples.push(example);
        }
    }

    info!(count = examples.len(), "collected category");
    Ok(examples)
}

/// Names of the non-hidden sub-directories of `dir`, sorted.
fn example_dir_names(dir: &Path) -> Result<Vec<String>> {
    let entries = std::fs::read_dir(dir).map_err(|e| CatalogError::io(dir, e))?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| CatalogError::io(dir, e))?;
        let file_type = entry
            .file_type()
            .map_err(|e| CatalogError::io(entry.path(), e))?;

        let name = entry.file_name().to_string_lossy().into_owned();
        if !file_type.is_dir() || name.starts_with('.') {
            continue;
        }
        names.push(name);
    }

    names.sort();
    Ok(names)
}

/// Build the record for one example directory, or `None` if it has no README.
fn collect_example(
    config: &GenerateConfig,
    category: &str,
    name: &str,
    example_dir: &Path,
    diagnostics: &mut Diagnostics,
) -> Result<Option<ExampleRecord>> {
    let readme_path = example_dir.join(&config.readme_file);

    if !readme_path.exists() {
        diagnostics.push(
            DiagnosticKind::MissingDescription,
            example_dir,
            format!("{} not found for example", config.readme_file),
        );
        return Ok(None);
    }

    // Invalid UTF-8 is decoded lossily; one badly encoded README must not fail the run.
    let bytes = std::fs::read(&readme_path).map_err(|e| CatalogError::io(&readme_path, e))?;
    let readme = String::from_utf8_lossy(&bytes);

    let defaults = ExampleDefaults {
        id: name.to_string(),
        title: extract_title(&readme).unwrap_or_else(|| name.to_string()),
        description: extract_description(&readme),
        category: category.to_string(),
        path: format!("{category}/{name}"),
        url: format!("./{category}/{name}/{}", config.readme_file),
    };

    let metadata = load_metadata(&example_dir.join(&config.metadata_file), diagnostics);
    let example = ExampleRecord::from_parts(defaults, metadata);

    debug!(id = %example.id, title = %example.title, "collected example");
    Ok(Some(example))
}
