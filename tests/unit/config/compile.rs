use super::*;
use crate::rules::matcher::LayerSelection;

fn config(metadata: &str) -> TraitsmithResult<CompiledConfig> {
    let json = format!(
        r#"{{ "metadata": {{
            "imageUrlFormat": "https://x.test/%d.png",
            "defaultNameFormat": "Item #%d",
            "defaultDescriptionFormat": "Item %d",
            {metadata}
        }} }}"#
    );
    AssetConfig::from_json_str(&json)?.compile()
}

#[test]
fn compiles_every_rule_category() {
    let cfg = config(
        r#""texts": [{ "value": "Gold", "conditions": [{ "layer": "Background", "name": "gold" }] }],
           "textLabels": [{ "trait": "Rarity", "value": "Common", "conditions": [{ "layer": "Body", "name": "." }] }],
           "dateLabels": [{ "trait": "Minted", "value": "2021-01-01", "conditions": [{ "layer": "Set", "name": "genesis" }] }],
           "intLabels": [{ "trait": "Level", "value": 3, "conditions": [{ "layer": "Body", "name": "." }] }],
           "floatLabels": [{ "trait": "Power", "value": 2, "conditions": [{ "layer": "Body", "name": "." }] }],
           "rankedNumbers": [{ "trait": "Generation", "value": 1, "conditions": [{ "layer": "Body", "name": "." }] }],
           "boostNumbers": [{ "trait": "Stamina", "value": 10, "max": 100, "conditions": [{ "layer": "Body", "name": "." }] }],
           "boostPercentages": [{ "trait": "Speed", "value": 5.5, "conditions": [{ "layer": "Body", "name": "." }] }]"#,
    )
    .unwrap();

    assert_eq!(cfg.rules().len(), 8);
    for category in RuleCategory::ALL {
        assert_eq!(cfg.rules().category(category).len(), 1, "{category:?}");
    }
    let power = cfg.rules().category(RuleCategory::FloatLabel)[0].attribute();
    assert_eq!(power, &Attribute::number_label("Power", 2.0));
    assert!(cfg.trait_order().is_none());
    assert!(cfg.document().external_url.is_none());
    assert_eq!(cfg.document().background_color.as_str(), "ffffff");
}

#[test]
fn omitted_name_compiles_to_never_matching_condition() {
    let cfg = config(
        r#""texts": [{ "value": "Ghost", "conditions": [{ "layer": "Background" }] }]"#,
    )
    .unwrap();
    let rule = &cfg.rules().category(RuleCategory::Simple)[0];
    assert!(!rule.fires(&[LayerSelection::new("Background", "anything")]));
}

#[test]
fn invalid_regex_names_its_location() {
    let err = config(
        r#""textLabels": [
             { "trait": "A", "value": "a", "conditions": [{ "layer": "L", "name": "ok" }] },
             { "trait": "B", "value": "b", "conditions": [{ "layer": "L", "name": "(unclosed" }] }
           ]"#,
    )
    .unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("metadata.textLabels[1]"), "{msg}");
    assert!(msg.contains("(unclosed"), "{msg}");
}

#[test]
fn empty_condition_list_is_rejected() {
    let err = config(r#""texts": [{ "value": "Gold", "conditions": [] }]"#).unwrap_err();
    assert!(err.to_string().contains("metadata.texts[0]"));
}

#[test]
fn bad_required_templates_and_colors_are_rejected() {
    let err = AssetConfig::from_json_str(
        r#"{ "metadata": { "imageUrlFormat": "https://x.test/%s.png",
             "defaultNameFormat": "n", "defaultDescriptionFormat": "d" } }"#,
    )
    .unwrap()
    .compile()
    .unwrap_err();
    assert!(err.to_string().contains("imageUrlFormat"));

    let err = config(r##""backgroundColor": "#000000""##).unwrap_err();
    assert!(err.to_string().contains("backgroundColor"));
}

#[test]
fn oversized_template_width_fails_compilation() {
    let err = AssetConfig::from_json_str(
        r#"{ "metadata": { "imageUrlFormat": "https://x.test/%d.png",
             "defaultNameFormat": "Item %99999999999999999999999d",
             "defaultDescriptionFormat": "d" } }"#,
    )
    .unwrap()
    .compile()
    .unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("defaultNameFormat"), "{msg}");
    assert!(msg.contains("width above"), "{msg}");
}

#[test]
fn bad_external_template_is_dropped_not_fatal() {
    let cfg = config(r#""externalUrlFormat": "https://x.test/%@""#).unwrap();
    assert!(cfg.document().external_url.is_none());

    let cfg = config(r#""externalUrlFormat": "https://x.test/%d", "backgroundColor": "000000""#)
        .unwrap();
    assert_eq!(
        cfg.document().external_url.as_ref().map(|t| t.format(4)),
        Some("https://x.test/4".to_string())
    );
    assert_eq!(cfg.document().background_color.as_str(), "000000");
}

#[test]
fn trait_order_is_carried_over() {
    let cfg = config(r#""order": { "trait": ["Background", "Body"] }"#).unwrap();
    let order = cfg.trait_order().unwrap();
    assert_eq!(order.position("Body"), Some(1));

    let cfg = config(r#""order": {}"#).unwrap();
    assert!(cfg.trait_order().is_none());
}
