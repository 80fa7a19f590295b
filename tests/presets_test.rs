//! Preset catalog integration tests

mod common;

use common::{FakeEditor, TestFixture};
use serde_json::json;
use std::collections::HashSet;
use vscode_sync::{Error, ImportOptions, Preset, PresetCatalog};

#[test]
fn test_builtin_precedence_over_user_document() {
    let fixture = TestFixture::new();
    let catalog = fixture.catalog();
    std::fs::create_dir_all(catalog.presets_dir()).unwrap();
    std::fs::write(
        catalog.presets_dir().join("frontend.json"),
        r#"{"name": "My Frontend", "extensions": ["only.mine"]}"#,
    )
    .unwrap();

    let resolved = catalog.resolve("frontend").unwrap();
    assert_eq!(resolved.name, "Frontend Development");
    assert!(!resolved.extensions.contains(&"only.mine".to_string()));

    // Listed once
    let names = catalog.list();
    assert_eq!(names.iter().filter(|n| *n == "frontend").count(), 1);
}

#[test]
fn test_every_builtin_resolves_without_duplicates() {
    let fixture = TestFixture::new();
    let catalog = fixture.catalog();

    for name in ["frontend", "backend", "fullstack", "data-science", "mobile"] {
        assert!(PresetCatalog::is_builtin(name));
        let bundle = catalog.resolve(name).unwrap().to_bundle();
        let unique: HashSet<_> = bundle.extensions.iter().collect();
        assert_eq!(unique.len(), bundle.extensions.len(), "{name}");
        assert!(!bundle.settings.is_empty());
    }
}

#[test]
fn test_user_preset_lifecycle() {
    let fixture = TestFixture::new();
    let catalog = fixture.catalog();

    let preset = Preset::new("Rust Work")
        .with_description("Everything for Rust")
        .with_extensions(["rust-lang.rust-analyzer", "tamasfe.even-better-toml"])
        .with_settings(
            json!({"rust-analyzer.check.command": "clippy"})
                .as_object()
                .unwrap()
                .clone(),
        );

    catalog.save("rust-work", &preset).unwrap();
    assert!(catalog.list().contains(&"rust-work".to_string()));
    assert_eq!(catalog.user_presets(), vec!["rust-work"]);

    let resolved = catalog.resolve("rust-work").unwrap();
    assert_eq!(resolved.description, "Everything for Rust");
    assert!(resolved.created_at.is_some());

    assert!(catalog.delete("rust-work").unwrap());
    assert!(matches!(
        catalog.resolve("rust-work").unwrap_err(),
        Error::PresetNotFound(_)
    ));
}

#[test]
fn test_delete_builtin_and_missing_return_false() {
    let fixture = TestFixture::new();
    let catalog = fixture.catalog();

    assert!(!catalog.delete("mobile").unwrap());
    assert!(!catalog.delete("never-saved").unwrap());
    assert!(catalog.resolve("mobile").is_ok());
}

#[test]
fn test_preset_with_duplicates_applies_once() {
    let fixture = TestFixture::new();
    let catalog = fixture.catalog();
    catalog
        .save(
            "dupes",
            &Preset::new("Dupes").with_extensions(["x.a", "x.b", "x.a", "x.b", "x.c"]),
        )
        .unwrap();

    let engine = fixture.engine(FakeEditor::new(&[]));
    let bundle = catalog.resolve("dupes").unwrap().to_bundle();
    engine
        .apply(&bundle, &ImportOptions::all().settings(false))
        .unwrap();

    assert_eq!(engine.editor().attempts(), vec!["x.a", "x.b", "x.c"]);
}

#[test]
fn test_create_from_current() {
    let fixture = TestFixture::new();
    fixture.write_settings(r#"{"editor.fontSize": 13}"#);
    let engine = fixture.engine(FakeEditor::new(&["pub.one", "pub.two"]));
    let catalog = fixture.catalog();

    let preset = catalog
        .create_from_current("snapshot", "Taken from this machine", &engine)
        .unwrap();
    assert_eq!(preset.dev_type, "custom");
    assert_eq!(preset.extensions, vec!["pub.one", "pub.two"]);

    let stored = catalog.resolve("snapshot").unwrap();
    assert_eq!(stored.settings["editor.fontSize"], json!(13));
    assert_eq!(stored, preset);
}

#[test]
fn test_create_from_current_under_builtin_name_fails() {
    let fixture = TestFixture::new();
    let engine = fixture.engine(FakeEditor::new(&[]));

    let err = fixture
        .catalog()
        .create_from_current("backend", "", &engine)
        .unwrap_err();
    assert!(matches!(err, Error::BuiltinPreset(_)));
}
