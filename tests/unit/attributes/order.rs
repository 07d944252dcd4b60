use super::*;

fn traits(attrs: &[Attribute]) -> Vec<Option<&str>> {
    attrs.iter().map(Attribute::trait_type).collect()
}

#[test]
fn no_order_sorts_alphabetically_with_simple_first() {
    let attrs = vec![
        Attribute::string_label("Zebra", "z"),
        Attribute::simple("plain"),
        Attribute::string_label("Apple", "a"),
    ];
    let out = order(attrs, None).unwrap();
    assert_eq!(traits(&out), [None, Some("Apple"), Some("Zebra")]);
}

#[test]
fn alphabetical_sort_is_stable() {
    let attrs = vec![
        Attribute::string_label("Hat", "second"),
        Attribute::string_label("Body", "x"),
        Attribute::string_label("Hat", "first"),
    ];
    let out = sort_alphabetically(attrs);
    assert_eq!(
        out,
        vec![
            Attribute::string_label("Body", "x"),
            Attribute::string_label("Hat", "second"),
            Attribute::string_label("Hat", "first"),
        ]
    );
}

#[test]
fn incomplete_coverage_fails_with_missing_traits() {
    let order_list: TraitOrder = ["Background", "Body"].into_iter().collect();
    let attrs = vec![
        Attribute::string_label("Body", "robot"),
        Attribute::string_label("Hat", "cap"),
        Attribute::number_label("Hat", 1i64),
    ];
    assert_eq!(
        order(attrs, Some(&order_list)).unwrap_err(),
        OrderError::IncompleteCoverage {
            missing: vec!["Hat".to_string()]
        }
    );
}

#[test]
fn covered_traits_follow_configured_order_stably() {
    let order_list: TraitOrder = ["Background", "Body", "Hat"].into_iter().collect();
    let attrs = vec![
        Attribute::string_label("Hat", "cap"),
        Attribute::string_label("Body", "robot"),
        Attribute::simple("Shiny"),
        Attribute::number_label("Body", 2i64),
        Attribute::string_label("Background", "gold"),
    ];
    let out = order(attrs, Some(&order_list)).unwrap();
    assert_eq!(
        out,
        vec![
            Attribute::simple("Shiny"),
            Attribute::string_label("Background", "gold"),
            Attribute::string_label("Body", "robot"),
            Attribute::number_label("Body", 2i64),
            Attribute::string_label("Hat", "cap"),
        ]
    );
}

#[test]
fn simple_attributes_are_exempt_from_coverage() {
    let empty = TraitOrder::new(vec![]);
    let attrs = vec![Attribute::simple("a"), Attribute::simple("b")];
    assert_eq!(order(attrs.clone(), Some(&empty)).unwrap(), attrs);
}

#[test]
fn coverage_fails_iff_a_trait_is_unlisted() {
    let order_list: TraitOrder = ["A", "B"].into_iter().collect();
    let pool = ["A", "B", "C"];
    for mask in 0u8..8 {
        let attrs: Vec<_> = pool
            .iter()
            .enumerate()
            .filter(|(i, _)| mask & (1 << i) != 0)
            .map(|(_, t)| Attribute::string_label(*t, "v"))
            .collect();
        let has_unlisted = mask & 0b100 != 0;
        assert_eq!(
            validate_coverage(&attrs, &order_list).is_err(),
            has_unlisted,
            "mask {mask:03b}"
        );
    }
}

#[test]
fn duplicate_entries_use_first_position() {
    let order_list: TraitOrder = ["B", "A", "B"].into_iter().collect();
    assert_eq!(order_list.position("B"), Some(0));
    assert_eq!(order_list.position("A"), Some(1));
    assert_eq!(order_list.traits().len(), 3);
}

#[test]
fn unvalidated_unknown_traits_sort_last() {
    let order_list: TraitOrder = ["A"].into_iter().collect();
    let out = sort_by_trait_order(
        vec![
            Attribute::string_label("Z", "z"),
            Attribute::string_label("A", "a"),
        ],
        &order_list,
    );
    assert_eq!(traits(&out), [Some("A"), Some("Z")]);
}
