use std::collections::HashSet;

use crate::attributes::model::Attribute;

/// Drop attributes whose [`identity`](Attribute::identity) was already seen.
///
/// Keeps the first occurrence and preserves relative order. Same trait with a different value is
/// not a duplicate.
pub fn dedupe(attrs: Vec<Attribute>) -> Vec<Attribute> {
    let mut seen = HashSet::with_capacity(attrs.len());
    attrs
        .into_iter()
        .filter(|a| seen.insert(a.identity()))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/attributes/dedupe.rs"]
mod tests;
