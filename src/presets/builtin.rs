//! Built-in preset definitions
//!
//! These are process-lifetime constants. They always win over a user preset
//! of the same name and can never be saved over or deleted.

use super::Preset;
use crate::settings::SettingsMap;
use serde_json::{Value, json};
use std::collections::BTreeMap;
use std::sync::LazyLock;

static BUILTIN_PRESETS: LazyLock<BTreeMap<&'static str, Preset>> = LazyLock::new(|| {
    BTreeMap::from([
        ("frontend", frontend()),
        ("backend", backend()),
        ("fullstack", fullstack()),
        ("data-science", data_science()),
        ("mobile", mobile()),
    ])
});

/// Look up a built-in preset by catalog key
pub fn get(name: &str) -> Option<&'static Preset> {
    BUILTIN_PRESETS.get(name)
}

/// Whether `name` is reserved by a built-in preset
pub fn contains(name: &str) -> bool {
    BUILTIN_PRESETS.contains_key(name)
}

/// Catalog keys of every built-in preset, sorted
pub fn names() -> impl Iterator<Item = &'static str> {
    BUILTIN_PRESETS.keys().copied()
}

fn object(value: Value) -> SettingsMap {
    match value {
        Value::Object(map) => map,
        _ => SettingsMap::new(),
    }
}

fn preset(
    name: &str,
    description: &str,
    dev_type: &str,
    languages: &[&str],
    extensions: &[&str],
    settings: Value,
) -> Preset {
    Preset {
        name: name.to_string(),
        description: description.to_string(),
        dev_type: dev_type.to_string(),
        languages: languages.iter().map(|s| s.to_string()).collect(),
        extensions: extensions.iter().map(|s| s.to_string()).collect(),
        settings: object(settings),
        created_at: None,
    }
}

fn frontend() -> Preset {
    preset(
        "Frontend Development",
        "Extensions for modern frontend development",
        "frontend",
        &["javascript", "typescript", "css", "html"],
        &[
            "ms-vscode.vscode-typescript-next",
            "esbenp.prettier-vscode",
            "bradlc.vscode-tailwindcss",
            "ms-vscode.vscode-eslint",
            "formulahendry.auto-rename-tag",
            "christian-kohler.npm-intellisense",
            "ms-vscode.vscode-css-peek",
            "ritwick.reactjs-code-snippets",
            "ms-vscode.vscode-json",
            "ms-vscode.vscode-html-css-support",
        ],
        json!({
            "editor.formatOnSave": true,
            "editor.codeActionsOnSave": {"source.fixAll.eslint": true},
            "prettier.semi": true,
            "prettier.singleQuote": true,
            "emmet.includeLanguages": {
                "javascript": "javascriptreact",
                "typescript": "typescriptreact"
            }
        }),
    )
}

fn backend() -> Preset {
    preset(
        "Backend Development",
        "Extensions for server-side development",
        "backend",
        &["python", "javascript", "go", "rust"],
        &[
            "ms-python.python",
            "ms-python.vscode-pylance",
            "ms-vscode.vscode-docker",
            "ms-vscode.vscode-restclient",
            "humao.rest-client",
            "ms-vscode.vscode-json",
            "redhat.vscode-yaml",
            "ms-vscode.powershell",
            "golang.go",
            "rust-lang.rust-analyzer",
        ],
        json!({
            "python.defaultInterpreterPath": "python3",
            "python.linting.enabled": true,
            "python.linting.pylintEnabled": true,
            "python.formatting.provider": "black",
            "editor.formatOnSave": true,
            "files.associations": {
                "*.env": "dotenv",
                "Dockerfile*": "dockerfile"
            }
        }),
    )
}

fn fullstack() -> Preset {
    preset(
        "Full-Stack Development",
        "Complete setup for full-stack development",
        "fullstack",
        &["javascript", "typescript", "python", "html", "css"],
        &[
            "ms-vscode.vscode-typescript-next",
            "esbenp.prettier-vscode",
            "ms-python.python",
            "ms-python.vscode-pylance",
            "bradlc.vscode-tailwindcss",
            "ms-vscode.vscode-eslint",
            "ms-vscode.vscode-docker",
            "ms-vscode.vscode-restclient",
            "formulahendry.auto-rename-tag",
            "christian-kohler.npm-intellisense",
            "ms-vscode.vscode-json",
            "redhat.vscode-yaml",
            "ritwick.reactjs-code-snippets",
        ],
        json!({
            "editor.formatOnSave": true,
            "editor.codeActionsOnSave": {"source.fixAll.eslint": true},
            "python.defaultInterpreterPath": "python3",
            "python.formatting.provider": "black",
            "prettier.semi": true,
            "prettier.singleQuote": true,
            "emmet.includeLanguages": {
                "javascript": "javascriptreact",
                "typescript": "typescriptreact"
            }
        }),
    )
}

fn data_science() -> Preset {
    preset(
        "Data Science",
        "Extensions for data science and machine learning",
        "data-science",
        &["python", "r", "sql", "jupyter"],
        &[
            "ms-python.python",
            "ms-python.vscode-pylance",
            "ms-toolsai.jupyter",
            "ms-toolsai.jupyter-keymap",
            "ms-toolsai.jupyter-renderers",
            "ms-toolsai.vscode-jupyter-cell-tags",
            "ms-toolsai.vscode-jupyter-slideshow",
            "ikuyadeu.r",
            "ms-mssql.mssql",
            "ms-vscode.vscode-json",
            "redhat.vscode-yaml",
        ],
        json!({
            "python.defaultInterpreterPath": "python3",
            "python.formatting.provider": "black",
            "jupyter.askForKernelRestart": false,
            "jupyter.interactiveWindowMode": "perFile",
            "python.dataScience.askForKernelRestart": false,
            "python.dataScience.sendSelectionToInteractiveWindow": true,
            "editor.formatOnSave": true
        }),
    )
}

fn mobile() -> Preset {
    preset(
        "Mobile Development",
        "Extensions for mobile app development",
        "mobile",
        &["dart", "kotlin", "swift", "javascript"],
        &[
            "dart-code.dart-code",
            "dart-code.flutter",
            "ms-vscode.vscode-react-native",
            "ms-vscode.vscode-typescript-next",
            "mathiasfrohlich.kotlin",
            "swift.swift-lang",
            "ms-vscode.vscode-json",
            "redhat.vscode-yaml",
        ],
        json!({
            "dart.flutterSdkPath": "",
            "dart.checkForSdkUpdates": true,
            "dart.openDevTools": "flutter",
            "editor.formatOnSave": true,
            "editor.rulers": [80, 120],
            "files.associations": {"*.dart": "dart"}
        }),
    )
}
