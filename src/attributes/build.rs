use crate::attributes::model::Attribute;
use crate::rules::matcher::LayerSelection;
use crate::rules::set::AttributeRuleSet;

/// Evaluate every rule against an item's layer selections.
///
/// Output follows rule-set iteration order (simple rules first, then each label category in
/// declaration order). Rules that match nothing contribute nothing. The result may contain
/// duplicates; see [`dedupe`](crate::dedupe).
pub fn build(item: &[LayerSelection], rules: &AttributeRuleSet) -> Vec<Attribute> {
    let mut out = Vec::new();
    for rule in rules.iter() {
        if rule.fires(item) {
            tracing::debug!(attribute = ?rule.attribute(), "rule fired");
            out.push(rule.attribute().clone());
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/attributes/build.rs"]
mod tests;
