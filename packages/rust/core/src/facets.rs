//! Filter facets for the catalog.

use std::collections::BTreeSet;

use examplecatalog_shared::{ExampleRecord, Facets};

/// Collect the distinct tag, environment, difficulty and tool values across
/// all examples, each sorted ascending.
pub fn extract_facets(examples: &[ExampleRecord]) -> Facets {
    let mut categories = BTreeSet::new();
    let mut environments = BTreeSet::new();
    let mut difficulties = BTreeSet::new();
    let mut tools = BTreeSet::new();

    for example in examples {
        categories.extend(example.tags());
        environments.extend(example.environments());
        difficulties.extend(example.difficulty());
        tools.extend(example.tools());
    }

    Facets {
        categories: categories.into_iter().collect(),
        environments: environments.into_iter().collect(),
        difficulties: difficulties.into_iter().collect(),
        tools: tools.into_iter().collect(),
    }
}
