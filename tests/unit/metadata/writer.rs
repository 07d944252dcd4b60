use super::*;
use crate::attributes::model::Attribute;
use crate::foundation::template::SerialTemplate;
use crate::metadata::document::{BackgroundColor, DocumentTemplate, assemble};

fn doc(serial: u64) -> MetadataDocument {
    let t = DocumentTemplate {
        image_url: SerialTemplate::parse("https://x.test/%d.png").unwrap(),
        name: SerialTemplate::parse("#%d").unwrap(),
        description: SerialTemplate::parse("d").unwrap(),
        external_url: None,
        background_color: BackgroundColor::default(),
    };
    assemble(serial, &t, vec![Attribute::simple("Gold")]).unwrap()
}

#[test]
fn writes_pretty_json_named_by_serial() {
    let tmp = tempfile::tempdir().unwrap();
    let writer = MetadataWriter::new(tmp.path().join("out")).unwrap();
    let path = writer.write(12, &doc(12)).unwrap();

    assert_eq!(path, writer.dir().join("12.json"));
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("\n  \"image\": \"https://x.test/12.png\""), "{text}");
    let back: MetadataDocument = serde_json::from_str(&text).unwrap();
    assert_eq!(back, doc(12));
}

#[test]
fn discard_removes_existing_and_ignores_missing() {
    let tmp = tempfile::tempdir().unwrap();
    let writer = MetadataWriter::new(tmp.path()).unwrap();
    writer.write(1, &doc(1)).unwrap();
    assert!(writer.path_for(1).exists());

    writer.discard(1).unwrap();
    assert!(!writer.path_for(1).exists());
    writer.discard(1).unwrap();
}

#[test]
fn create_failure_is_reported_as_io() {
    let tmp = tempfile::tempdir().unwrap();
    let writer = MetadataWriter::new(tmp.path()).unwrap();
    std::fs::create_dir(writer.path_for(5)).unwrap();

    let err = writer.write(5, &doc(5)).unwrap_err();
    assert!(matches!(err, TraitsmithError::Io(_)), "{err}");
}

#[test]
fn pending_file_is_removed_unless_kept() {
    let tmp = tempfile::tempdir().unwrap();
    let dropped = tmp.path().join("dropped.json");
    let kept = tmp.path().join("kept.json");
    std::fs::write(&dropped, "{}").unwrap();
    std::fs::write(&kept, "{}").unwrap();

    drop(PendingFile(Some(dropped.clone())));
    assert_eq!(PendingFile(Some(kept.clone())).keep(), kept);

    assert!(!dropped.exists());
    assert!(kept.exists());
}
