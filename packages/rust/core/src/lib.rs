//! Core pipeline and domain logic for the example catalog.
//!
//! This crate ties together example collection, cross-referencing, facet
//! extraction, and the listing/catalog writers into the `generate` run.

pub mod collector;
pub mod crossref;
pub mod facets;
pub mod metadata;
pub mod pipeline;
pub mod writers;
