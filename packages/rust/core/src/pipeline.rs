//! End-to-end `generate` pipeline: collect → category listings → main listing → catalog.

use std::path::PathBuf;

use chrono::{DateTime, SecondsFormat, Utc};
use tracing::{info, instrument};

use examplecatalog_shared::{Catalog, Diagnostic, Diagnostics, GenerateConfig, Result};

use crate::collector::collect_category;
use crate::writers;

/// Result of a generation run.
#[derive(Debug)]
pub struct GenerateReport {
    /// Total number of examples across all categories.
    pub total: usize,
    /// Example count per category, in configured order.
    pub category_counts: Vec<(String, usize)>,
    /// Every recoverable anomaly met during the run.
    pub diagnostics: Vec<Diagnostic>,
    /// Whether the main listing existed and was rewritten.
    pub main_listing_updated: bool,
    /// Where the catalog was written.
    pub catalog_path: PathBuf,
    /// The catalog as written.
    pub catalog: Catalog,
}

/// Progress callback for reporting pipeline status.
pub trait ProgressReporter {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called after a category has been collected and its listing updated.
    fn category_done(&self, category: &str, count: usize);
    /// Called when the pipeline completes.
    fn done(&self, report: &GenerateReport);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn category_done(&self, _category: &str, _count: usize) {}
    fn done(&self, _report: &GenerateReport) {}
}

/// Format a run timestamp as RFC 3339 with milliseconds and a `Z` suffix.
pub fn format_timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Run the full generation pipeline.
///
/// Categories are processed in configured order; each category's listing is
/// updated right after it is collected. Then the main listing and the
/// catalog are written. Only I/O failures abort the run; everything else
/// ends up in [`GenerateReport::diagnostics`].
#[instrument(skip_all, fields(root = %config.root.display(), categories = config.categories.len()))]
pub fn generate(
    config: &GenerateConfig,
    now: DateTime<Utc>,
    progress: &dyn ProgressReporter,
) -> Result<GenerateReport> {
    config.validate()?;

    let timestamp = format_timestamp(now);
    let mut diagnostics = Diagnostics::new();
    let mut all_examples = Vec::new();
    let mut category_counts = Vec::with_capacity(config.categories.len());

    info!("generating example index");

    for category in &config.categories {
        progress.phase(&format!("Collecting {category}"));

        let examples = collect_category(config, category, &mut diagnostics)?;
        category_counts.push((category.clone(), examples.len()));
        writers::update_category_listing(config, category, &examples, &mut diagnostics)?;

        progress.category_done(category, examples.len());
        all_examples.extend(examples);
    }

    progress.phase("Updating main index");
    let main_listing_updated =
        writers::update_main_listing(config, &category_counts, &timestamp, &mut diagnostics)?;

    progress.phase("Writing catalog");
    let catalog = writers::write_catalog(config, &all_examples, &timestamp)?;

    let report = GenerateReport {
        total: all_examples.len(),
        category_counts,
        diagnostics: diagnostics.into_vec(),
        main_listing_updated,
        catalog_path: config.catalog_path(),
        catalog,
    };

    info!(
        total = report.total,
        diagnostics = report.diagnostics.len(),
        "index generation complete"
    );
    progress.done(&report);

    Ok(report)
}
