//! Related-example cross-references based on shared tags.

use std::collections::{HashMap, HashSet};

use tracing::{debug, instrument};

use examplecatalog_shared::ExampleRecord;

/// Maximum number of related examples kept per record.
pub const MAX_RELATED: usize = 5;

/// Return copies of `examples` with `related_examples` filled in.
///
/// For each record, every other record sharing at least one tag is listed as
/// `category/id`, in first-seen order (walking the record's own tags, then
/// each tag's records in input order), de-duplicated, capped at
/// [`MAX_RELATED`]. A record never lists itself.
#[instrument(skip_all, fields(examples = examples.len()))]
pub fn add_cross_references(examples: &[ExampleRecord]) -> Vec<ExampleRecord> {
    let tags: Vec<Vec<String>> = examples.iter().map(ExampleRecord::tags).collect();
    let keys: Vec<String> = examples.iter().map(ExampleRecord::key).collect();

    let mut tag_index: HashMap<&str, Vec<usize>> = HashMap::new();
    for (i, record_tags) in tags.iter().enumerate() {
        for tag in record_tags {
            tag_index.entry(tag.as_str()).or_default().push(i);
        }
    }
    debug!(tags = tag_index.len(), "built tag index");

    examples
        .iter()
        .enumerate()
        .map(|(i, example)| {
            let mut seen: HashSet<&str> = HashSet::new();
            let mut related = Vec::new();

            for tag in &tags[i] {
                for &j in tag_index.get(tag.as_str()).into_iter().flatten() {
                    let key = keys[j].as_str();
                    if key != keys[i] && seen.insert(key) {
                        related.push(key.to_string());
                    }
                }
            }
            related.truncate(MAX_RELATED);

            ExampleRecord {
                related_examples: related,
                ..example.clone()
            }
        })
        .collect()
}
