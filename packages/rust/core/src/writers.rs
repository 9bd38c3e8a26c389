//! Writers for the category listings, the main listing, and the catalog.

use std::path::Path;

use tracing::{debug, info, instrument};

use examplecatalog_markdown::{
    render_category_section, splice_placeholder, stamp_last_updated, update_category_count,
};
use examplecatalog_shared::{
    Catalog, CatalogError, DiagnosticKind, Diagnostics, ExampleRecord, GenerateConfig, Result,
};

use crate::crossref::add_cross_references;
use crate::facets::extract_facets;

/// Replace the placeholder in `category`'s listing with its example section.
///
/// A missing listing is a diagnostic and nothing is written. A listing
/// without the placeholder is written back unchanged, also with a
/// diagnostic.
#[instrument(skip(config, examples, diagnostics), fields(examples = examples.len()))]
pub fn update_category_listing(
    config: &GenerateConfig,
    category: &str,
    examples: &[ExampleRecord],
    diagnostics: &mut Diagnostics,
) -> Result<()> {
    let path = config.listing_path(category);

    if !path.exists() {
        diagnostics.push(
            DiagnosticKind::MissingCategoryListing,
            &path,
            "listing file not found for category",
        );
        return Ok(());
    }

    let content = read_text(&path)?;
    let section = render_category_section(examples, &config.readme_file);
    let splice = splice_placeholder(&content, &config.placeholder, &section);

    if !splice.marker_found {
        diagnostics.push(
            DiagnosticKind::MissingPlaceholder,
            &path,
            "placeholder marker not found, listing left unchanged",
        );
    }

    write_text(&path, &splice.content)?;
    info!(path = %path.display(), "updated category listing");
    Ok(())
}

/// Rewrite per-category counts and the `Last updated:` stamp in the main
/// listing. Returns `false` (with a diagnostic) when the listing is absent.
#[instrument(skip_all)]
pub fn update_main_listing(
    config: &GenerateConfig,
    category_counts: &[(String, usize)],
    timestamp: &str,
    diagnostics: &mut Diagnostics,
) -> Result<bool> {
    let path = config.main_listing_path();

    if !path.exists() {
        diagnostics.push(
            DiagnosticKind::MissingMainListing,
            &path,
            "main listing file not found",
        );
        return Ok(false);
    }

    let mut content = read_text(&path)?;

    for category in &config.categories {
        let count = category_counts
            .iter()
            .find(|(name, _)| name == category)
            .map_or(0, |(_, count)| *count);

        match update_category_count(&content, category, count)? {
            Some(updated) => content = updated,
            None => diagnostics.push(
                DiagnosticKind::MissingCategoryHeading,
                &path,
                format!("no heading found for category {category}"),
            ),
        }
    }

    content = stamp_last_updated(&content, timestamp);

    write_text(&path, &content)?;
    info!(path = %path.display(), "updated main listing");
    Ok(true)
}

/// Cross-reference `examples`, extract facets, and write the catalog.
#[instrument(skip_all, fields(examples = examples.len()))]
pub fn write_catalog(
    config: &GenerateConfig,
    examples: &[ExampleRecord],
    timestamp: &str,
) -> Result<Catalog> {
    let examples = add_cross_references(examples);
    let filters = extract_facets(&examples);

    let catalog = Catalog {
        examples,
        filters,
        last_updated: timestamp.to_string(),
    };

    let path = config.catalog_path();
    write_json(&path, &catalog)?;
    info!(path = %path.display(), "wrote catalog");

    Ok(catalog)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| CatalogError::io(path, e))
}

fn write_text(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content).map_err(|e| CatalogError::io(path, e))
}

/// Write a pretty-printed JSON file via a temp file and rename.
fn write_json<T: serde::Serialize>(path: &Path, data: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| CatalogError::Serialize(format!("JSON serialization failed: {e}")))?;

    let file_name = path
        .file_name()
        .ok_or_else(|| CatalogError::validation(format!("not a file path: {}", path.display())))?;
    let temp = path.with_file_name(format!(".{}.tmp", file_name.to_string_lossy()));

    std::fs::write(&temp, json).map_err(|e| CatalogError::io(&temp, e))?;
    std::fs::rename(&temp, path).map_err(|e| CatalogError::io(path, e))?;

    debug!(path = %path.display(), "wrote JSON file");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use examplecatalog_shared::{AppConfig, DEFAULT_PLACEHOLDER, ExampleDefaults};
    use serde_json::{Map, json};

    fn temp_root() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("ec-writers-test-{}", uuid::Uuid::now_v7()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn config(root: &Path) -> GenerateConfig {
        GenerateConfig::from(&AppConfig::default()).with_root(root)
    }

    fn record(category: &str, id: &str, tags: &[&str]) -> ExampleRecord {
        let defaults = ExampleDefaults {
            id: id.into(),
            title: format!("{id} title"),
            description: format!("{id} description"),
            category: category.into(),
            path: format!("{category}/{id}"),
            url: format!("./{category}/{id}/README.md"),
        };
        let mut meta = Map::new();
        meta.insert("categories".into(), json!(tags));
        ExampleRecord::from_parts(defaults, meta)
    }

    #[test]
    fn category_listing_placeholder_replaced() {
        let root = temp_root();
        let path = root.join("remediation/index.md");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, format!("# Remediation\n\n{DEFAULT_PLACEHOLDER}\n\nFooter\n"))
            .unwrap();

        let mut diags = Diagnostics::new();
        let examples = vec![record("remediation", "restart", &["k8s"])];
        update_category_listing(&config(&root), "remediation", &examples, &mut diags).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("# Remediation\n\n### [restart title](./restart/README.md)"));
        assert!(content.contains("Tags: `k8s`"));
        assert!(content.ends_with("\n\nFooter\n"));
        assert!(!content.contains(DEFAULT_PLACEHOLDER));
        assert!(diags.is_empty());
    }

    #[test]
    fn category_listing_without_marker_left_unchanged() {
        let root = temp_root();
        let path = root.join("remediation/index.md");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "# Remediation\n\nAlready generated.\n").unwrap();

        let mut diags = Diagnostics::new();
        update_category_listing(&config(&root), "remediation", &[], &mut diags).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "# Remediation\n\nAlready generated.\n");
        assert_eq!(diags.count(DiagnosticKind::MissingPlaceholder), 1);
    }

    #[test]
    fn missing_category_listing_not_created() {
        let root = temp_root();
        let mut diags = Diagnostics::new();
        update_category_listing(&config(&root), "remediation", &[], &mut diags).unwrap();
        assert!(!root.join("remediation/index.md").exists());
        assert_eq!(diags.count(DiagnosticKind::MissingCategoryListing), 1);
    }

    #[test]
    fn main_listing_counts_and_stamp() {
        let root = temp_root();
        let cfg = config(&root);
        let path = cfg.main_listing_path();
        std::fs::write(
            &path,
            "# Examples\n\n### [Performance Issues](./performance-issues/index.md)\n\n\
             ### [Remediation](./remediation/index.md) (9)\n\nLast updated: never\n",
        )
        .unwrap();

        let counts = vec![
            ("performance-issues".to_string(), 2),
            ("remediation".to_string(), 0),
        ];
        let mut diags = Diagnostics::new();
        let updated =
            update_main_listing(&cfg, &counts, "2026-10-18T08:00:00.000Z", &mut diags).unwrap();
        assert!(updated);

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("### [Performance Issues](./performance-issues/index.md) (2)\n"));
        assert!(content.contains("### [Remediation](./remediation/index.md) (0)\n"));
        assert!(content.contains("Last updated: 2026-10-18T08:00:00.000Z"));
        // The six other default categories have no heading.
        assert_eq!(diags.count(DiagnosticKind::MissingCategoryHeading), 6);
    }

    #[test]
    fn main_listing_absent_is_skipped() {
        let root = temp_root();
        let mut diags = Diagnostics::new();
        let updated = update_main_listing(&config(&root), &[], "ts", &mut diags).unwrap();
        assert!(!updated);
        assert!(!root.join("index.md").exists());
        assert_eq!(diags.count(DiagnosticKind::MissingMainListing), 1);
    }

    #[test]
    fn catalog_written_with_cross_references() {
        let root = temp_root();
        let cfg = config(&root);
        let examples = vec![
            record("performance-issues", "slow-query", &["database"]),
            record("root-cause-analysis", "lock-wait", &["database"]),
        ];

        let catalog = write_catalog(&cfg, &examples, "2026-10-18T08:00:00.000Z").unwrap();
        assert_eq!(catalog.examples[0].related_examples, vec!["root-cause-analysis/lock-wait"]);
        assert_eq!(catalog.filters.categories, vec!["database"]);

        let raw = std::fs::read_to_string(cfg.catalog_path()).unwrap();
        let parsed: Catalog = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed.examples.len(), 2);
        assert_eq!(parsed.last_updated, "2026-10-18T08:00:00.000Z");
        assert!(!root.join(".examples.json.tmp").exists());
    }
}
