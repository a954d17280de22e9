use imbind_core::{BindingConfig, IrDocument};
use imbind_emit::generate;
use pretty_assertions::assert_eq;

const DOCUMENT: &str = r#"{
    "defines": [
        { "name": "IMGUI_VERSION", "content": "\"1.90.1\"" },
        { "name": "IMGUI_VERSION_NUM", "content": "19010" },
        { "name": "IMGUI_CHECKVERSION", "content": "ImGui_DebugCheckVersionAndDataLayout()" }
    ],
    "enums": [
        {
            "name": "Widget_Flags_",
            "elements": [
                { "name": "Widget_Flags_None", "value_expression": "0" },
                { "name": "Widget_Flags_A", "value_expression": "1<<0" },
                { "name": "Widget_Flags_B", "value_expression": "1<<1" },
                { "name": "Widget_Flags_All", "value_expression": "Widget_Flags_A | Widget_Flags_B" }
            ]
        },
        {
            "name": "ImGuiDir",
            "comments": { "preceding": ["// A cardinal direction"] },
            "elements": [
                { "name": "ImGuiDir_None", "value_expression": "-1" },
                { "name": "ImGuiDir_Left", "value_expression": "0" },
                { "name": "ImGuiDir_Right", "value_expression": "1" },
                { "name": "ImGuiDir_COUNT" }
            ]
        }
    ],
    "structs": [
        {
            "name": "ImGuiStyle",
            "fields": [
                {
                    "name": "Alpha",
                    "type": { "declaration": "float", "description": { "kind": "Builtin", "builtin_type": "float" } },
                    "comments": { "attached": "// Global alpha" }
                },
                {
                    "name": "Weights",
                    "type": {
                        "declaration": "float Weights[4]",
                        "description": {
                            "kind": "Array",
                            "bounds": "4",
                            "inner_type": { "kind": "Builtin", "builtin_type": "float" }
                        }
                    }
                }
            ]
        },
        {
            "name": "ImVec2",
            "fields": [
                { "name": "x", "type": { "declaration": "float", "description": { "kind": "Builtin", "builtin_type": "float" } } }
            ]
        }
    ],
    "functions": [
        {
            "name": "Lib_DoThing",
            "return_type": { "declaration": "void", "description": { "kind": "Builtin", "builtin_type": "void" } },
            "arguments": [
                { "name": "count", "type": { "declaration": "int", "description": { "kind": "Builtin", "builtin_type": "int" } } },
                { "name": "...", "is_varargs": true }
            ]
        },
        {
            "name": "ImGui_SetWeights",
            "return_type": { "declaration": "void", "description": { "kind": "Builtin", "builtin_type": "void" } },
            "arguments": [
                {
                    "name": "weights",
                    "type": {
                        "declaration": "float weights[4]",
                        "description": {
                            "kind": "Array",
                            "bounds": "4",
                            "inner_type": { "kind": "Builtin", "builtin_type": "float" }
                        }
                    }
                }
            ]
        }
    ],
    "typedefs": [
        {
            "name": "ImGuiID",
            "type": { "declaration": "ImU32", "description": { "kind": "User", "name": "ImU32" } }
        }
    ]
}"#;

fn config() -> BindingConfig {
    let mut config = BindingConfig::default();
    config.function_prefixes.push("Lib_".to_string());
    config
}

fn render(config: &BindingConfig) -> String {
    let document = IrDocument::from_json(DOCUMENT).unwrap();
    generate(&document, config).unwrap()
}

#[test]
fn test_sections_in_fixed_order() {
    let out = render(&config());
    let positions: Vec<usize> = ["// DEFINES", "// ENUMS", "// STRUCTS", "// FUNCTIONS", "// TYPEDEFS"]
        .iter()
        .map(|title| out.find(title).unwrap())
        .collect();

    let mut sorted = positions.clone();
    sorted.sort_unstable();
    assert_eq!(positions, sorted);
    assert!(out.ends_with("ID :: u32\n\nWchar :: Wchar16\n"));
}

#[test]
fn test_defines_filtered() {
    let out = render(&config());
    assert!(out.contains("VERSION     :: \"1.90.1\"\nVERSION_NUM :: 19010\n"));
    assert!(!out.contains("CHECKVERSION :: ImGui"));
}

#[test]
fn test_widget_flags() {
    let out = render(&config());
    assert!(out.contains("Widget_Flag :: enum c.int {\n\tA = 0,\n\tB = 1,\n}\n"));
    assert!(out.contains("Widget_Flags :: bit_set[Widget_Flag; c.int]\n"));
    assert!(out.contains("Widget_Flags_None :: Widget_Flags{}\n"));
    assert!(out.contains("Widget_Flags_All  :: Widget_Flags{.A,.B}\n"));
}

#[test]
fn test_plain_enum_keeps_every_member() {
    let out = render(&config());
    let start = out.find("Dir :: enum c.int {").unwrap();
    let body = &out[start..];
    let body = &body[..body.find("\n}\n").unwrap()];

    let members = body.lines().skip(1).filter(|line| !line.trim_start().starts_with("//")).count();
    assert_eq!(members, 4);
    assert!(out.contains("// A cardinal direction\nDir :: enum c.int {"));
}

#[test]
fn test_array_bound_in_field_and_argument() {
    let out = render(&config());
    assert!(out.contains("\tWeights: [4]f32,\n"));
    assert!(out.contains("SetWeights :: proc(weights: ^[4]f32)"));
    assert!(out.contains("\tAlpha:   f32,    // Global alpha\n"));
}

#[test]
fn test_struct_override_and_varargs() {
    let out = render(&config());
    assert!(out.contains("\nVec2 :: [2]f32\n"));
    assert!(out.contains("@(link_name=\"Lib_DoThing\")      DoThing    :: proc(count: c.int, #c_vararg args: ..any) ---"));
}

#[test]
fn test_unresolvable_bound_degrades() {
    let json = DOCUMENT.replace("\"bounds\": \"4\"", "\"bounds\": \"IM_SOMETHING*2\"");
    let document = IrDocument::from_json(&json).unwrap();
    let out = generate(&document, &config()).unwrap();

    assert!(out.contains("\tWeights: []f32,\n"));
    assert!(out.contains("SetWeights :: proc(weights: [^]f32)"));
}

#[test]
fn test_unresolvable_bound_strict_fails() {
    let json = DOCUMENT.replace("\"bounds\": \"4\"", "\"bounds\": \"IM_SOMETHING*2\"");
    let document = IrDocument::from_json(&json).unwrap();
    let err = generate(&document, &config().with_strict_bounds(true)).unwrap_err();

    assert!(err.to_string().contains("IM_SOMETHING*2"));
}

#[test]
fn test_output_is_deterministic() {
    let sequential = config();
    let parallel = config().with_parallel(true);

    let first = render(&sequential);
    assert_eq!(first, render(&sequential));
    assert_eq!(first, render(&parallel));
}
