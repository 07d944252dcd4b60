use crate::attributes::model::{Attribute, AttributeKind, NumericValue};
use crate::foundation::error::{TraitsmithError, TraitsmithResult};
use crate::rules::matcher::{Condition, LayerSelection};

/// One configured rule: the attribute it grants and the conditions that activate it.
///
/// Conditions are OR-ed: the rule fires when any condition is satisfied by any layer selection
/// of the item.
#[derive(Clone, Debug)]
pub struct AttributeRule {
    attribute: Attribute,
    conditions: Vec<Condition>,
}

impl AttributeRule {
    /// Create a rule. At least one condition is required.
    pub fn new(attribute: Attribute, conditions: Vec<Condition>) -> TraitsmithResult<Self> {
        if conditions.is_empty() {
            return Err(TraitsmithError::config(format!(
                "rule for {} must have at least one condition",
                describe(&attribute)
            )));
        }
        Ok(Self {
            attribute,
            conditions,
        })
    }

    /// Attribute emitted when the rule fires.
    pub fn attribute(&self) -> &Attribute {
        &self.attribute
    }

    /// Activation conditions.
    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// `true` when any condition is satisfied by any selection in `item`.
    pub fn fires(&self, item: &[LayerSelection]) -> bool {
        self.conditions
            .iter()
            .any(|c| item.iter().any(|sel| c.is_satisfied_by(sel)))
    }
}

fn describe(attribute: &Attribute) -> String {
    match attribute.trait_type() {
        Some(t) => format!("trait '{t}'"),
        None => "simple attribute".to_string(),
    }
}

/// Rule category, in evaluation order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RuleCategory {
    /// `texts`
    Simple,
    /// `textLabels`
    TextLabel,
    /// `dateLabels`
    DateLabel,
    /// `intLabels`
    IntLabel,
    /// `floatLabels`
    FloatLabel,
    /// `rankedNumbers`
    RankedNumber,
    /// `boostNumbers`
    BoostNumber,
    /// `boostPercentages`
    BoostPercentage,
}

impl RuleCategory {
    /// All categories in evaluation order.
    pub const ALL: [RuleCategory; 8] = [
        RuleCategory::Simple,
        RuleCategory::TextLabel,
        RuleCategory::DateLabel,
        RuleCategory::IntLabel,
        RuleCategory::FloatLabel,
        RuleCategory::RankedNumber,
        RuleCategory::BoostNumber,
        RuleCategory::BoostPercentage,
    ];

    /// Configuration key of the category.
    pub fn config_key(self) -> &'static str {
        match self {
            Self::Simple => "texts",
            Self::TextLabel => "textLabels",
            Self::DateLabel => "dateLabels",
            Self::IntLabel => "intLabels",
            Self::FloatLabel => "floatLabels",
            Self::RankedNumber => "rankedNumbers",
            Self::BoostNumber => "boostNumbers",
            Self::BoostPercentage => "boostPercentages",
        }
    }

    fn of(attribute: &Attribute) -> Self {
        match attribute.kind() {
            AttributeKind::Simple => Self::Simple,
            AttributeKind::StringLabel => Self::TextLabel,
            AttributeKind::DateLabel => Self::DateLabel,
            AttributeKind::NumberLabel => match attribute {
                Attribute::NumberLabel {
                    value: NumericValue::Float(_),
                    ..
                } => Self::FloatLabel,
                _ => Self::IntLabel,
            },
            AttributeKind::RankedNumber => Self::RankedNumber,
            AttributeKind::BoostNumber => Self::BoostNumber,
            AttributeKind::BoostPercentage => Self::BoostPercentage,
        }
    }
}

/// All configured rules, bucketed by category.
///
/// Iteration visits categories in [`RuleCategory::ALL`] order and rules within a category in
/// insertion order, regardless of the order in which categories were filled.
#[derive(Clone, Debug, Default)]
pub struct AttributeRuleSet {
    buckets: [Vec<AttributeRule>; 8],
}

impl AttributeRuleSet {
    /// Empty rule set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rule to the bucket of its attribute's category.
    pub fn push(&mut self, rule: AttributeRule) {
        let category = RuleCategory::of(rule.attribute());
        self.buckets[category as usize].push(rule);
    }

    /// Rules of one category.
    pub fn category(&self, category: RuleCategory) -> &[AttributeRule] {
        &self.buckets[category as usize]
    }

    /// Every rule in evaluation order.
    pub fn iter(&self) -> impl Iterator<Item = &AttributeRule> {
        self.buckets.iter().flatten()
    }

    /// Total number of rules.
    pub fn len(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    /// `true` when no rules are configured.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FromIterator<AttributeRule> for AttributeRuleSet {
    fn from_iter<I: IntoIterator<Item = AttributeRule>>(iter: I) -> Self {
        let mut set = Self::new();
        for rule in iter {
            set.push(rule);
        }
        set
    }
}

#[cfg(test)]
#[path = "../../tests/unit/rules/set.rs"]
mod tests;
