use super::*;

#[test]
fn plain_decimal_is_substituted() {
    let t = SerialTemplate::parse("Item #%d").unwrap();
    assert_eq!(t.format(7), "Item #7");
    assert_eq!(t.source(), "Item #%d");
}

#[test]
fn width_and_flags_follow_printf() {
    assert_eq!(SerialTemplate::parse("%04d").unwrap().format(42), "0042");
    assert_eq!(SerialTemplate::parse("[%4d]").unwrap().format(42), "[  42]");
    assert_eq!(SerialTemplate::parse("[%-4d]").unwrap().format(42), "[42  ]");
    assert_eq!(SerialTemplate::parse("%lu/%lld").unwrap().format(3), "3/3");
    assert_eq!(SerialTemplate::parse("%02d").unwrap().format(12345), "12345");
}

#[test]
fn percent_escape_and_literal_only_templates() {
    assert_eq!(SerialTemplate::parse("100%% #%i").unwrap().format(1), "100% #1");
    assert_eq!(SerialTemplate::parse("static").unwrap().format(9), "static");
    assert_eq!(SerialTemplate::parse("").unwrap().format(9), "");
}

#[test]
fn every_conversion_receives_the_serial() {
    let t = SerialTemplate::parse("ipfs://cid/%d/%d.json").unwrap();
    assert_eq!(t.format(5), "ipfs://cid/5/5.json");
}

#[test]
fn non_integer_conversions_are_rejected() {
    let err = SerialTemplate::parse("name %@").unwrap_err();
    assert_eq!(
        err,
        TemplateError::Unsupported {
            template: "name %@".to_string(),
            conversion: '@',
            offset: 5,
        }
    );
    assert!(matches!(
        SerialTemplate::parse("%s").unwrap_err(),
        TemplateError::Unsupported { conversion: 's', .. }
    ));
}

#[test]
fn trailing_percent_is_dangling() {
    assert!(matches!(
        SerialTemplate::parse("broken %0").unwrap_err(),
        TemplateError::Dangling { offset: 7, .. }
    ));
}

#[test]
fn oversized_width_is_rejected_at_parse_time() {
    let err = SerialTemplate::parse("Item %99999999999999999999999d").unwrap_err();
    assert_eq!(
        err,
        TemplateError::WidthTooLarge {
            template: "Item %99999999999999999999999d".to_string(),
            offset: 5,
        }
    );
    assert!(matches!(
        SerialTemplate::parse("%065536d").unwrap_err(),
        TemplateError::WidthTooLarge { offset: 0, .. }
    ));

    let widest = SerialTemplate::parse(&format!("%{MAX_TEMPLATE_WIDTH}d")).unwrap();
    assert_eq!(widest.format(1).len(), MAX_TEMPLATE_WIDTH);
}
