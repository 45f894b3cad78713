//! Precedence merge of explicit configuration over classified properties
//!
//! Explicit configuration (parameters such as `bootstrapProperties` or
//! `jvmOptions`) always wins over values classified from `liberty.*`
//! properties. Merging is shallow: properties override per key, JVM
//! options are opaque strings and are concatenated.

use std::collections::BTreeMap;

/// Final key/value entries of a properties artifact.
///
/// A `None` value marks a key that was declared without a value; it is
/// written as empty and reported by the writer.
pub type PropertyEntries = BTreeMap<String, Option<String>>;

/// Merge explicit properties over classified ones.
///
/// Returns `None` when there is nothing to materialize: no explicit map
/// was supplied and no property was classified. An explicit but empty map
/// still yields `Some`, producing a header-only file.
pub fn merge_properties(
    explicit: Option<&PropertyEntries>,
    classified: &BTreeMap<String, String>,
) -> Option<PropertyEntries> {
    if classified.is_empty() {
        return explicit.cloned();
    }

    let mut merged: PropertyEntries = classified
        .iter()
        .map(|(key, value)| (key.clone(), Some(value.clone())))
        .collect();
    if let Some(explicit) = explicit {
        merged.extend(explicit.iter().map(|(k, v)| (k.clone(), v.clone())));
    }
    Some(merged)
}

/// Concatenate classified JVM options followed by explicit ones.
///
/// Same precedence as [`merge_properties`], expressed as order: the
/// runtime applies later options over earlier ones. No deduplication.
pub fn merge_jvm_options(explicit: Option<&[String]>, classified: &[String]) -> Option<Vec<String>> {
    if classified.is_empty() {
        return explicit.map(<[String]>::to_vec);
    }

    let mut merged = classified.to_vec();
    if let Some(explicit) = explicit {
        merged.extend_from_slice(explicit);
    }
    Some(merged)
}
