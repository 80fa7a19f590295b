//! ZIP bundle tests (requires the `zip` feature)

mod common;

use common::{FakeEditor, TestFixture};
use serde_json::json;
use std::fs::File;
use std::io::{Read, Write};
use vscode_sync::bundle::{self, BUNDLE_ENTRY_NAME, SETTINGS_ENTRY_NAME};
use vscode_sync::{BundleFormat, BundleMetadata, ConfigBundle, Error, ImportOptions, Os};
use zip::ZipArchive;
use zip::write::SimpleFileOptions;

#[test]
fn test_export_zip_then_import_on_other_machine() {
    let source = TestFixture::new();
    source.write_settings(r#"{"editor.fontSize": 14}"#);
    let exporter = source.engine(FakeEditor::new(&["pub.ext1", "pub.ext2"]));

    let out = source.path("out.zip");
    let export = exporter.export(&out).unwrap();
    assert_eq!(export.format, BundleFormat::Zip);

    let target = TestFixture::new();
    let original = r#"{"editor.fontSize": 12}"#;
    target.write_settings(original);
    let importer = target.engine(FakeEditor::new(&[]));

    let report = importer.import(&out, &ImportOptions::all()).unwrap();

    let backup = report.backup_record().expect("backup taken");
    assert_eq!(std::fs::read_to_string(&backup.path).unwrap(), original);
    assert_eq!(target.read_settings(), json!({"editor.fontSize": 14}));
    assert_eq!(importer.editor().attempts(), vec!["pub.ext1", "pub.ext2"]);
    assert!(report.is_success());
}

#[test]
fn test_zip_contains_canonical_entry_and_raw_settings() {
    let fixture = TestFixture::new();
    let raw = "{\n  \"editor.fontSize\": 14\n}\n";
    fixture.write_settings(raw);
    let engine = fixture.engine(FakeEditor::new(&["a.b"]));

    let out = fixture.path("setup.zip");
    engine.export(&out).unwrap();

    let mut archive = ZipArchive::new(File::open(&out).unwrap()).unwrap();
    assert_eq!(archive.len(), 2);

    let mut document = String::new();
    archive
        .by_name(BUNDLE_ENTRY_NAME)
        .unwrap()
        .read_to_string(&mut document)
        .unwrap();
    let document: serde_json::Value = serde_json::from_str(&document).unwrap();
    assert_eq!(document["extensions"], json!(["a.b"]));

    let mut copy = String::new();
    archive
        .by_name(SETTINGS_ENTRY_NAME)
        .unwrap()
        .read_to_string(&mut copy)
        .unwrap();
    assert_eq!(copy, raw);
}

#[test]
fn test_zip_roundtrip_preserves_values() {
    let fixture = TestFixture::new();
    let settings = json!({
        "editor.fontSize": 14,
        "editor.lineHeight": 1.5,
        "editor.rulers": [80, 120],
        "files.exclude": {"**/.git": true, "**/node_modules": true},
        "terminal.integrated.fontFamily": "Fira Code",
        "workbench.startupEditor": null
    });
    let bundle = ConfigBundle::new(
        BundleMetadata::fresh(Os::Linux),
        ["z.last", "a.first"],
        settings.as_object().unwrap().clone(),
    );

    let path = fixture.path("roundtrip.zip");
    bundle::encode(&bundle, &path, BundleFormat::Zip).unwrap();
    assert_eq!(bundle::decode(&path).unwrap(), bundle);

    // Same document as JSON decodes to the same bundle
    let json_path = fixture.path("roundtrip.json");
    bundle::encode(&bundle, &json_path, BundleFormat::Json).unwrap();
    assert_eq!(bundle::decode(&json_path).unwrap(), bundle);
}

#[test]
fn test_zip_detected_by_signature() {
    let fixture = TestFixture::new();
    let bundle = ConfigBundle::new(BundleMetadata::default(), ["a.b"], Default::default());

    let path = fixture.path("bundle.bin");
    bundle::encode(&bundle, &path, BundleFormat::Zip).unwrap();
    assert_eq!(bundle::decode(&path).unwrap().extensions, vec!["a.b"]);
}

#[test]
fn test_import_zip_missing_entry_touches_nothing() {
    let fixture = TestFixture::new();
    fixture.write_settings(r#"{"editor.fontSize": 12}"#);

    let path = fixture.path("foreign.zip");
    let mut zip = zip::ZipWriter::new(File::create(&path).unwrap());
    zip.start_file("vscode_sync_export.json", SimpleFileOptions::default())
        .unwrap();
    zip.write_all(br#"{"extensions": ["a.b"]}"#).unwrap();
    zip.finish().unwrap();

    let engine = fixture.engine(FakeEditor::new(&[]));
    let err = engine.import(&path, &ImportOptions::all()).unwrap_err();

    assert!(matches!(err, Error::MissingEntry { .. }));
    assert!(err.is_decode_error());
    assert!(engine.editor().attempts().is_empty());
    assert_eq!(fixture.read_settings_raw(), r#"{"editor.fontSize": 12}"#);
}

#[test]
fn test_zip_with_malformed_document() {
    let fixture = TestFixture::new();
    let path = fixture.path("broken.zip");
    let mut zip = zip::ZipWriter::new(File::create(&path).unwrap());
    zip.start_file(BUNDLE_ENTRY_NAME, SimpleFileOptions::default())
        .unwrap();
    zip.write_all(b"not a json").unwrap();
    zip.finish().unwrap();

    assert!(matches!(
        bundle::decode(&path).unwrap_err(),
        Error::MalformedJson { .. }
    ));
}
