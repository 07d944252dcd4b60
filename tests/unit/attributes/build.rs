use super::*;
use crate::attributes::model::NumericValue;
use crate::rules::matcher::Condition;
use crate::rules::set::AttributeRule;
use chrono::{TimeZone, Utc};
use regex::Regex;

fn rule(attribute: Attribute, layer: &str, pattern: &str) -> AttributeRule {
    AttributeRule::new(
        attribute,
        vec![Condition::new(layer, Regex::new(pattern).unwrap())],
    )
    .unwrap()
}

#[test]
fn simple_rule_on_matching_background() {
    let rules: AttributeRuleSet = [rule(Attribute::simple("Gold"), "background", "gold")]
        .into_iter()
        .collect();
    let attrs = build(&[LayerSelection::new("background", "gold")], &rules);
    assert_eq!(attrs, vec![Attribute::simple("Gold")]);
}

#[test]
fn date_rule_emits_date_label() {
    let minted = Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap();
    let rules: AttributeRuleSet = [rule(
        Attribute::DateLabel {
            trait_type: "Minted".to_string(),
            value: minted,
        },
        "set",
        "genesis",
    )]
    .into_iter()
    .collect();
    let attrs = build(&[LayerSelection::new("set", "genesis")], &rules);
    assert_eq!(attrs.len(), 1);
    assert_eq!(attrs[0].trait_type(), Some("Minted"));
}

#[test]
fn numeric_tags_are_kept_per_rule() {
    let rules: AttributeRuleSet = [
        rule(Attribute::number_label("Level", 3i64), "Body", "."),
        rule(Attribute::number_label("Power", 1.5), "Body", "."),
    ]
    .into_iter()
    .collect();
    let attrs = build(&[LayerSelection::new("Body", "robot")], &rules);
    assert!(matches!(
        attrs[0],
        Attribute::NumberLabel {
            value: NumericValue::Int(3),
            ..
        }
    ));
    assert!(matches!(
        attrs[1],
        Attribute::NumberLabel {
            value: NumericValue::Float(_),
            ..
        }
    ));
}

#[test]
fn unmatched_rules_contribute_nothing() {
    let rules: AttributeRuleSet = [rule(Attribute::simple("Gold"), "background", "gold")]
        .into_iter()
        .collect();
    assert!(build(&[LayerSelection::new("background", "silver")], &rules).is_empty());
    assert!(build(&[], &rules).is_empty());
    assert!(build(&[LayerSelection::new("x", "y")], &AttributeRuleSet::new()).is_empty());
}

#[test]
fn same_attribute_from_two_layers_is_emitted_twice_before_dedupe() {
    let rules: AttributeRuleSet = [
        rule(Attribute::string_label("Rarity", "Common"), "Shirt", "plain"),
        rule(Attribute::string_label("Rarity", "Common"), "Pants", "jeans"),
    ]
    .into_iter()
    .collect();
    let item = [
        LayerSelection::new("Shirt", "plain_white"),
        LayerSelection::new("Pants", "jeans_blue"),
    ];
    assert_eq!(build(&item, &rules).len(), 2);
}
