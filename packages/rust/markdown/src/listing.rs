//! Generated content for the hand-authored listing documents.
//!
//! Category listings get a rendered example section; the main listing gets
//! per-category counts and a `Last updated:` stamp.

use std::fmt::Write as _;
use std::sync::LazyLock;

use regex::{Captures, NoExpand, Regex, RegexBuilder};
use tracing::debug;

use examplecatalog_shared::{CatalogError, ExampleRecord, Result};

use crate::EMPTY_CATEGORY_TEXT;

// ---------------------------------------------------------------------------
// Category listing
// ---------------------------------------------------------------------------

/// Render the example section inserted into a category listing.
///
/// Each example gets a linked `###` heading, its description, and optional
/// `Tags`, `Environments`, `Difficulty` and `Time Required` lines. Output
/// depends only on the records, so repeated runs produce identical text.
pub fn render_category_section(examples: &[ExampleRecord], readme_file: &str) -> String {
    if examples.is_empty() {
        return EMPTY_CATEGORY_TEXT.to_string();
    }

    let mut section = String::new();
    for example in examples {
        // Writing to a String cannot fail.
        let _ = write!(
            section,
            "### [{}](./{}/{readme_file})\n\n{}\n\n",
            example.title, example.id, example.description
        );

        let tags = example.tags();
        if !tags.is_empty() {
            let _ = write!(section, "Tags: {}\n\n", code_list(&tags));
        }

        let environments = example.environments();
        if !environments.is_empty() {
            let _ = write!(section, "Environments: {}\n\n", code_list(&environments));
        }

        if let Some(difficulty) = example.difficulty() {
            let _ = write!(section, "Difficulty: {difficulty}\n\n");
        }

        if let Some(time) = example.time_required() {
            let _ = write!(section, "Time Required: {time}\n\n");
        }
    }

    section
}

/// `` `a`, `b` ``
fn code_list(values: &[String]) -> String {
    values
        .iter()
        .map(|v| format!("`{v}`"))
        .collect::<Vec<_>>()
        .join(", ")
}

// ---------------------------------------------------------------------------
// Main listing
// ---------------------------------------------------------------------------

/// Rewrite the count on the first heading that links to `category`.
///
/// The heading is matched case-insensitively with hyphens in the category
/// name standing for a hyphen or a space, so `[Performance Issues](...)`
/// matches `performance-issues`. An existing `(N)` suffix is replaced,
/// otherwise one is appended. Returns `None` when no heading matches.
pub fn update_category_count(
    document: &str,
    category: &str,
    count: usize,
) -> Result<Option<String>> {
    let re = category_heading_regex(category)?;

    if !re.is_match(document) {
        debug!(category, "no heading for category");
        return Ok(None);
    }

    let updated = re.replacen(document, 1, |caps: &Captures| {
        format!("{} ({count}){}", &caps[1], &caps[2])
    });

    Ok(Some(updated.into_owned()))
}

fn category_heading_regex(category: &str) -> Result<Regex> {
    let name = category
        .split('-')
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"[-\t ]");

    let pattern =
        format!(r"^(#{{1,6}}[\t ]+\[{name}[^\]\r\n]*\][^\r\n]*?)(?:[\t ]*\(\d+\))?[\t ]*(\r?)$");

    RegexBuilder::new(&pattern)
        .case_insensitive(true)
        .multi_line(true)
        .build()
        .map_err(|e| CatalogError::Pattern(format!("heading pattern for {category}: {e}")))
}

/// Replace the first `Last updated:` value, or append a separator and a new
/// stamp line at the end of the document.
pub fn stamp_last_updated(document: &str, timestamp: &str) -> String {
    static LAST_UPDATED_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"Last updated: [^\r\n]*").expect("valid regex"));

    let line = format!("Last updated: {timestamp}");

    if LAST_UPDATED_RE.is_match(document) {
        LAST_UPDATED_RE
            .replacen(document, 1, NoExpand(&line))
            .into_owned()
    } else {
        format!("{document}\n\n---\n\n{line}")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
