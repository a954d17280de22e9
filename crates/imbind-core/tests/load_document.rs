use imbind_core::{BindingConfig, IrDocument, TypeDescription};
use pretty_assertions::assert_eq;
use std::fs;

const SAMPLE: &str = r#"{
    "defines": [
        { "name": "IMGUI_VERSION", "content": "\"1.90.1\"" }
    ],
    "enums": [
        {
            "name": "ImGuiWindowFlags_",
            "elements": [
                { "name": "ImGuiWindowFlags_None", "value_expression": "0" },
                { "name": "ImGuiWindowFlags_NoTitleBar", "value_expression": "1<<0",
                  "comments": { "attached": "// Disable title-bar" } }
            ],
            "comments": { "preceding": ["// Flags for ImGui::Begin()"] }
        }
    ],
    "structs": [
        {
            "name": "ImVec2",
            "fields": [
                { "name": "x", "type": { "declaration": "float", "description": { "kind": "Builtin", "builtin_type": "float" } } }
            ]
        }
    ],
    "functions": [],
    "typedefs": [
        { "name": "ImGuiID", "type": { "declaration": "unsigned int", "description": { "kind": "Builtin", "builtin_type": "unsigned_int" } } }
    ]
}"#;

#[test]
fn test_load_document_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("c_imgui.json");
    fs::write(&path, SAMPLE).unwrap();

    let doc = IrDocument::from_file(&path).unwrap();

    assert_eq!(doc.defines.len(), 1);
    assert_eq!(doc.enums[0].elements.len(), 2);
    assert_eq!(
        doc.enums[0].elements[1].comments.attached.as_deref(),
        Some("// Disable title-bar")
    );
    assert_eq!(
        doc.enums[0].comments.preceding,
        vec!["// Flags for ImGui::Begin()".to_string()]
    );
    assert_eq!(
        doc.structs[0].fields[0].ty.description,
        TypeDescription::builtin("float")
    );
    assert!(doc.functions.is_empty());
    assert_eq!(doc.typedefs[0].name, "ImGuiID");
}

#[test]
fn test_load_document_missing_file() {
    let result = IrDocument::from_file("/nonexistent/c_imgui.json");
    assert!(matches!(result, Err(imbind_core::BindError::Io(_))));
}

#[test]
fn test_load_document_malformed_json() {
    let result = IrDocument::from_json("{ \"enums\": 3 }");
    assert!(matches!(result, Err(imbind_core::BindError::Json(_))));
}

#[test]
fn test_load_config_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("overrides.json");
    fs::write(&path, r#"{ "library": "cimgui", "function_skip": [] }"#).unwrap();

    let config = BindingConfig::from_file(&path).unwrap();

    assert_eq!(config.library, "cimgui");
    assert!(config.function_skip.is_empty());
    assert_eq!(config.package, "imgui");
}
