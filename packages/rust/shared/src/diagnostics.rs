//! Recoverable anomalies collected during a generation run.
//!
//! Every example- or category-level problem is recorded here and logged,
//! and the run carries on. Tests assert on the collected entries.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::warn;

/// What kind of recoverable anomaly occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagnosticKind {
    /// A configured category has no directory under the examples root.
    MissingCategoryDir,
    /// An example directory has no README; the example is skipped.
    MissingDescription,
    /// The metadata file could not be read or parsed; empty metadata is used.
    MalformedMetadata,
    /// A category has no listing document; its update is skipped.
    MissingCategoryListing,
    /// A listing document has no placeholder marker; it is left unchanged.
    MissingPlaceholder,
    /// The main listing document is absent; its update is skipped.
    MissingMainListing,
    /// The main listing has no heading for a category; no count written.
    MissingCategoryHeading,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::MissingCategoryDir => "missing-category-dir",
            Self::MissingDescription => "missing-description",
            Self::MalformedMetadata => "malformed-metadata",
            Self::MissingCategoryListing => "missing-category-listing",
            Self::MissingPlaceholder => "missing-placeholder",
            Self::MissingMainListing => "missing-main-listing",
            Self::MissingCategoryHeading => "missing-category-heading",
        };
        f.write_str(name)
    }
}

/// A single recorded anomaly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// File or directory the anomaly refers to.
    pub path: PathBuf,
    pub message: String,
}

/// Append-only collector for [`Diagnostic`]s.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an anomaly and emit it as a warning.
    pub fn push(&mut self, kind: DiagnosticKind, path: &Path, message: impl Into<String>) {
        let message = message.into();
        warn!(%kind, path = %path.display(), "{message}");
        self.entries.push(Diagnostic {
            kind,
            path: path.to_path_buf(),
            message,
        });
    }

    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    /// Number of entries of the given kind.
    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.entries.iter().filter(|d| d.kind == kind).count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_count_by_kind() {
        let mut diags = Diagnostics::new();
        assert!(diags.is_empty());

        diags.push(
            DiagnosticKind::MissingDescription,
            Path::new("examples/a/b"),
            "README.md not found",
        );
        diags.push(
            DiagnosticKind::MissingDescription,
            Path::new("examples/a/c"),
            "README.md not found",
        );
        diags.push(
            DiagnosticKind::MissingMainListing,
            Path::new("examples/index.md"),
            "main index not found",
        );

        assert_eq!(diags.len(), 3);
        assert_eq!(diags.count(DiagnosticKind::MissingDescription), 2);
        assert_eq!(diags.count(DiagnosticKind::MalformedMetadata), 0);
        assert_eq!(diags.entries()[2].path, PathBuf::from("examples/index.md"));
    }

    #[test]
    fn kind_display_matches_serde_name() {
        let kind = DiagnosticKind::MissingCategoryHeading;
        let json = serde_json::to_string(&kind).expect("serialize");
        assert_eq!(json, format!("\"{kind}\""));
    }
}
