//! Markdown text handling for the example catalog.
//!
//! Extracts titles and descriptions from example READMEs, and rewrites the
//! generated regions of the hand-authored listing documents. Everything here
//! is a pure `&str -> String` function; file I/O lives in the core crate.

mod listing;

use std::sync::LazyLock;

use regex::Regex;

pub use listing::{render_category_section, stamp_last_updated, update_category_count};

/// Sentence written into a category listing that has no examples.
pub const EMPTY_CATEGORY_TEXT: &str = "No examples available in this category yet.";

// ---------------------------------------------------------------------------
// Extraction
// ---------------------------------------------------------------------------

/// Return the text of the first level-1 heading (`# Title`), trimmed.
///
/// `None` when no line is an H1 or the heading text is blank; callers fall
/// back to the example's directory name.
pub fn extract_title(markdown: &str) -> Option<String> {
    static H1_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"^#\s+(.+)$").expect("valid regex"));

    markdown
        .lines()
        .find_map(|line| H1_RE.captures(line))
        .map(|c| c[1].trim().to_string())
        .filter(|title| !title.is_empty())
}

/// Return the first non-blank, non-heading line after the first `# ` line.
///
/// Returns an empty string when there is no title or nothing follows it.
pub fn extract_description(markdown: &str) -> String {
    let mut found_title = false;

    for line in markdown.lines() {
        if !found_title {
            found_title = line.starts_with("# ");
            continue;
        }

        if !line.trim().is_empty() && !line.starts_with('#') {
            return line.trim().to_string();
        }
    }

    String::new()
}

// ---------------------------------------------------------------------------
// Placeholder substitution
// ---------------------------------------------------------------------------

/// Outcome of [`splice_placeholder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Splice {
    /// The resulting document (unchanged if the marker was absent).
    pub content: String,
    /// Whether the marker was found and replaced.
    pub marker_found: bool,
}

/// Replace the first literal occurrence of `marker` with `replacement`.
///
/// The rest of the document is preserved byte-for-byte.
pub fn splice_placeholder(document: &str, marker: &str, replacement: &str) -> Splice {
    if marker.is_empty() || !document.contains(marker) {
        return Splice {
            content: document.to_string(),
            marker_found: false,
        };
    }

    Splice {
        content: document.replacen(marker, replacement, 1),
        marker_found: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_title_first_h1() {
        let md = "Intro line\n## Not this\n#   Slow Query Diagnosis  \n# Second";
        assert_eq!(extract_title(md).as_deref(), Some("Slow Query Diagnosis"));
    }

    #[test]
    fn extract_title_ignores_deeper_headings() {
        assert_eq!(extract_title("## Sub\n### Deeper\nplain text"), None);
        assert_eq!(extract_title(""), None);
    }

    #[test]
    fn extract_title_blank_heading_is_not_found() {
        assert_eq!(extract_title("#   \nbody"), None);
    }

    #[test]
    fn extract_title_handles_crlf() {
        assert_eq!(
            extract_title("# Windows Title\r\n\r\nBody\r\n").as_deref(),
            Some("Windows Title")
        );
    }

    #[test]
    fn extract_description_first_paragraph_line() {
        let md = "# Slow Query Diagnosis\n\nThis example demonstrates detecting a slow query.\n";
        assert_eq!(
            extract_description(md),
            "This example demonstrates detecting a slow query."
        );
    }

    #[test]
    fn extract_description_skips_headings_and_blanks() {
        let md = "preamble\n# Title\n\n## Overview\n   \n  First real line.  \nSecond line";
        assert_eq!(extract_description(md), "First real line.");
    }

    #[test]
    fn extract_description_empty_when_nothing_follows() {
        assert_eq!(extract_description("# Title\n\n## Only headings\n"), "");
        assert_eq!(extract_description("no title here\nat all"), "");
    }

    #[test]
    fn splice_replaces_first_marker_only() {
        let doc = "Intro\n<!-- m -->\nOutro\n<!-- m -->\n";
        let splice = splice_placeholder(doc, "<!-- m -->", "GENERATED");
        assert!(splice.marker_found);
        assert_eq!(splice.content, "Intro\nGENERATED\nOutro\n<!-- m -->\n");
    }

    #[test]
    fn splice_missing_marker_returns_document_unchanged() {
        let doc = "# Listing\n\nHand-written text.\n";
        let splice = splice_placeholder(doc, "<!-- m -->", "GENERATED");
        assert!(!splice.marker_found);
        assert_eq!(splice.content, doc);
    }

    #[test]
    fn splice_empty_marker_is_not_found() {
        let splice = splice_placeholder("abc", "", "x");
        assert!(!splice.marker_found);
        assert_eq!(splice.content, "abc");
    }
}
