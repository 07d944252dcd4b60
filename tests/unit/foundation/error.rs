use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        TraitsmithError::config("x")
            .to_string()
            .contains("config error:")
    );
    assert!(TraitsmithError::io("x").to_string().contains("io error:"));
    assert!(
        TraitsmithError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = TraitsmithError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn item_failures_are_distinguished_from_setup_failures() {
    let order = TraitsmithError::from(OrderError::IncompleteCoverage {
        missing: vec!["Hat".to_string()],
    });
    assert!(order.is_item_failure());
    assert!(order.to_string().contains("Hat"));

    let assembly = TraitsmithError::from(AssemblyError::InvalidImageUrl {
        url: "not a url".to_string(),
        reason: "relative URL without a base".to_string(),
    });
    assert!(assembly.is_item_failure());

    assert!(!TraitsmithError::config("bad regex").is_item_failure());
}
