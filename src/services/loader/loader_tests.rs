use super::*;
use crate::model::FieldType;
use std::io::Write;

#[test]
fn bundled_layout_decodes_every_entry() {
    let descriptors = read_descriptors(&SchemaSource::Bundled).unwrap();
    assert!(!descriptors.is_empty());
    assert!(descriptors
        .iter()
        .any(|d| d.field_type == FieldType::FilePicker));
    assert!(descriptors.iter().all(|d| d.id_matches_type()));
}

#[test]
fn file_source_reads_layout() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("layout.json");
    let mut f = std::fs::File::create(&path).unwrap();
    write!(
        f,
        r#"[
            {{"uuid":"form_field-1","type":"form_field","args":{{"hint":"Name"}}}},
            {{"uuid":"checkbox-1","type":"checkbox","args":{{"label":"Agree"}},"options":null}}
        ]"#
    )
    .unwrap();
    let descriptors = read_descriptors(&SchemaSource::File(path)).unwrap();
    assert_eq!(descriptors.len(), 2);
    assert_eq!(descriptors[1].arg("label"), Some("Agree"));
}

#[test]
fn one_bad_entry_fails_the_whole_list() {
    let text = r#"[
        {"uuid":"text-1","type":"text","args":{"text":"ok"}},
        {"uuid":"slider-1","type":"slider","args":{"min":0}}
    ]"#;
    let err = decode_descriptors(text).unwrap_err();
    assert!(matches!(err, SchemaError::Decode(_)));
}

#[test]
fn missing_file_is_a_read_error() {
    let err = read_descriptors(&SchemaSource::File("/no/such/layout.json".into())).unwrap_err();
    assert!(matches!(err, SchemaError::Read { .. }));
}

#[test]
fn resolve_prefers_command_then_path() {
    let base = std::path::Path::new("/etc/forms");
    let mut cfg = AppConfig::default();
    assert_eq!(resolve_source(&cfg, Some(base)), SchemaSource::Bundled);
    cfg.schema_path = Some("layout.json".into());
    assert_eq!(
        resolve_source(&cfg, Some(base)),
        SchemaSource::File(base.join("layout.json"))
    );
    cfg.schema_cmd = Some("cat layout.json".into());
    assert_eq!(
        resolve_source(&cfg, Some(base)),
        SchemaSource::Command("cat layout.json".into())
    );
}

#[cfg(unix)]
#[test]
fn command_source_decodes_stdout() {
    let source = SchemaSource::Command(
        r#"printf '[{"uuid":"toggle-1","type":"toggle","args":{"label":"On"}}]'"#.into(),
    );
    let descriptors = read_descriptors(&source).unwrap();
    assert_eq!(descriptors.len(), 1);
    assert_eq!(descriptors[0].field_type, FieldType::Toggle);
}
