//! Final ordering of an item's attributes.
//!
//! Without a configured trait order, attributes sort by trait type (simple attributes use the
//! empty string and therefore come first). With one, every trait type the item produced must be
//! listed in it; ordering then follows the list. Validation and sorting are separate steps.

use std::collections::HashMap;

use crate::attributes::model::Attribute;

/// Ordering failure for one item.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum OrderError {
    /// Some produced trait types are not listed in the configured trait order.
    #[error("trait order does not cover trait types: {}", missing.join(", "))]
    IncompleteCoverage {
        /// Uncovered trait types, in first-seen order.
        missing: Vec<String>,
    },
}

/// A configured trait sequence with O(1) position lookup.
///
/// If a trait is listed twice, its first position wins.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TraitOrder {
    traits: Vec<String>,
    positions: HashMap<String, usize>,
}

impl TraitOrder {
    /// Build from the configured sequence.
    pub fn new(traits: Vec<String>) -> Self {
        let mut positions = HashMap::with_capacity(traits.len());
        for (i, t) in traits.iter().enumerate() {
            positions.entry(t.clone()).or_insert(i);
        }
        Self { traits, positions }
    }

    /// Position of `trait_type`, if listed.
    pub fn position(&self, trait_type: &str) -> Option<usize> {
        self.positions.get(trait_type).copied()
    }

    /// The sequence as configured.
    pub fn traits(&self) -> &[String] {
        &self.traits
    }
}

impl<S: Into<String>> FromIterator<S> for TraitOrder {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}

/// Check that every trait type in `attrs` is listed in `order`.
///
/// Simple attributes have no trait type and are exempt.
pub fn validate_coverage(attrs: &[Attribute], order: &TraitOrder) -> Result<(), OrderError> {
    let mut missing: Vec<String> = Vec::new();
    for t in attrs.iter().filter_map(Attribute::trait_type) {
        if order.position(t).is_none() && !missing.iter().any(|m| m == t) {
            missing.push(t.to_string());
        }
    }
    if missing.is_empty() {
        Ok(())
    } else {
        Err(OrderError::IncompleteCoverage { missing })
    }
}

/// Stable sort by position in `order`; simple attributes go first.
///
/// Call [`validate_coverage`] first; unlisted trait types sort last.
pub fn sort_by_trait_order(mut attrs: Vec<Attribute>, order: &TraitOrder) -> Vec<Attribute> {
    attrs.sort_by_key(|a| match a.trait_type() {
        None => 0,
        Some(t) => order.position(t).map_or(usize::MAX, |p| p + 1),
    });
    attrs
}

/// Stable ascending sort by trait type, with `""` for simple attributes.
pub fn sort_alphabetically(mut attrs: Vec<Attribute>) -> Vec<Attribute> {
    attrs.sort_by(|a, b| a.trait_type().unwrap_or("").cmp(b.trait_type().unwrap_or("")));
    attrs
}

/// Order an item's attributes, validating coverage when a trait order is configured.
pub fn order(
    attrs: Vec<Attribute>,
    trait_order: Option<&TraitOrder>,
) -> Result<Vec<Attribute>, OrderError> {
    match trait_order {
        None => Ok(sort_alphabetically(attrs)),
        Some(o) => {
            validate_coverage(&attrs, o)?;
            Ok(sort_by_trait_order(attrs, o))
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/attributes/order.rs"]
mod tests;
