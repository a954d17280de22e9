use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::target::{LinkTarget, TargetArch, TargetOs};
use crate::Result;

/// Every override table the generator consults, passed explicitly into the emitters.
///
/// `Default` carries the Dear ImGui tables. A JSON file only needs the fields it changes; the
/// rest fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BindingConfig {
    pub package: String,
    pub imports: Vec<String>,
    /// Written verbatim after the imports.
    pub preamble: String,
    /// Hand-written declarations appended after the typedefs.
    pub trailer: Vec<String>,

    pub branding_prefixes: Vec<String>,
    /// Container prefix -> target namespace, e.g. `ImVector_` -> `Vector`.
    pub namespaced_prefixes: IndexMap<String, String>,
    pub define_prefixes: Vec<String>,
    pub function_prefixes: Vec<String>,
    /// Prefix marking an enum literal inside an array bound (`ImGuiKey_COUNT`).
    pub enum_literal_prefix: String,
    pub reserved_identifiers: Vec<String>,
    pub identifier_overrides: IndexMap<String, String>,

    pub type_aliases: IndexMap<String, String>,
    pub pointer_aliases: IndexMap<String, String>,
    pub bounds_overrides: IndexMap<String, String>,
    pub va_list_type: String,
    /// Integer type backing every emitted enumeration and bit set.
    pub enum_backing_type: String,

    pub flags_suffix: String,
    pub enums_as_constants: Vec<String>,
    pub enums_skip: Vec<String>,
    /// Group -> first member whose declared value the target cannot express.
    pub enum_stop_after: IndexMap<String, String>,

    pub struct_overrides: IndexMap<String, String>,
    pub define_allow: Vec<String>,
    pub typedef_allow: Vec<String>,
    pub function_skip: Vec<String>,

    pub library: String,
    pub link_targets: Vec<LinkTarget>,
    pub backends: Vec<String>,
    pub wanted_backends: Vec<String>,

    /// Treat an unresolvable array bound as fatal instead of dropping it.
    pub strict_bounds: bool,
    /// Render enum groups on the rayon pool. Output is identical either way.
    pub parallel: bool,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn table(pairs: &[(&str, &str)]) -> IndexMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

const IM_DRAWLIST_TEX_LINES_WIDTH_MAX: i64 = 63;
const IM_UNICODE_CODEPOINT_MAX: i64 = 0xFFFF;

impl Default for BindingConfig {
    fn default() -> Self {
        let tex_lines = (IM_DRAWLIST_TEX_LINES_WIDTH_MAX + 1).to_string();
        let codepoint_pages = ((IM_UNICODE_CODEPOINT_MAX + 1) / 4096 / 8).to_string();

        Self {
            package: "imgui".to_string(),
            imports: strings(&["core:c"]),
            preamble: [
                "CHECKVERSION :: proc() {",
                "\tDebugCheckVersionAndDataLayout(VERSION, size_of(IO), size_of(Style), size_of(Vec2), size_of(Vec4), size_of(DrawVert), size_of(DrawIdx))",
                "}",
            ]
            .join("\n"),
            trailer: strings(&["Wchar :: Wchar16"]),

            branding_prefixes: strings(&["ImGui", "Im"]),
            namespaced_prefixes: table(&[("ImVector_", "Vector"), ("ImGuiStorage_", "Storage")]),
            define_prefixes: strings(&["IMGUI_", "IM_"]),
            function_prefixes: strings(&["ImGui_", "ImGui", "Im"]),
            enum_literal_prefix: "ImGui".to_string(),
            reserved_identifiers: strings(&["in", "c"]),
            // A field may not share its name with a type used in the same struct.
            identifier_overrides: table(&[("ID", "_ID")]),

            type_aliases: table(&[
                ("float", "f32"),
                ("double", "f64"),
                ("long_long", "c.longlong"),
                ("unsigned_long_long", "c.ulonglong"),
                ("int", "c.int"),
                ("unsigned_int", "c.uint"),
                ("short", "c.short"),
                ("unsigned_short", "c.ushort"),
                ("char", "c.char"),
                ("unsigned_char", "c.uchar"),
                ("ImS8", "i8"),
                ("ImU8", "u8"),
                ("ImS16", "i16"),
                ("ImU16", "u16"),
                ("ImS32", "i32"),
                ("ImU32", "u32"),
                ("ImS64", "i64"),
                ("ImU64", "u64"),
                ("size_t", "c.size_t"),
                ("va_list", "libc.va_list"),
            ]),
            pointer_aliases: table(&[("char", "cstring"), ("void", "rawptr")]),
            bounds_overrides: table(&[
                ("ImGuiKey_KeysData_SIZE", "Key.COUNT"),
                ("32+1", "33"),
                ("IM_DRAWLIST_TEX_LINES_WIDTH_MAX+1", tex_lines.as_str()),
                ("(IM_UNICODE_CODEPOINT_MAX +1)/4096/8", codepoint_pages.as_str()),
            ]),
            va_list_type: "va_list".to_string(),
            enum_backing_type: "c.int".to_string(),

            flags_suffix: "Flags".to_string(),
            enums_as_constants: strings(&[
                // Low bits carry a mouse button index.
                "ImGuiPopupFlags_",
                "ImGuiTableFlags_",
                "ImDrawFlags_",
                "ImGuiHoveredFlags_",
                // Defines no flag of its own.
                "ImDrawCornerFlags_",
            ]),
            enums_skip: strings(&["ImGuiModFlags_"]),
            enum_stop_after: table(&[("ImGuiKey", "ImGuiKey_NamedKey_BEGIN")]),

            struct_overrides: table(&[("ImVec2", "Vec2 :: [2]f32"), ("ImVec4", "Vec4 :: [4]f32")]),
            define_allow: strings(&["IMGUI_VERSION", "IMGUI_VERSION_NUM"]),
            typedef_allow: strings(&[
                "ImWchar16",
                "ImWchar32",
                "DrawIdx",
                "ImDrawIdx",
                "ImTextureID",
                "ImGuiID",
                "ImGuiKeyChord",
                "ImDrawCallback",
                "ImGuiSizeCallback",
                "ImGuiInputTextCallback",
                "ImGuiMemAllocFunc",
                "ImGuiMemFreeFunc",
            ]),
            // ImStr is never declared; GetKeyIndex depends on IMGUI_DISABLE_OBSOLETE_KEYIO.
            function_skip: strings(&["ImStr_FromCharStr", "GetKeyIndex"]),

            library: "imgui".to_string(),
            link_targets: vec![
                LinkTarget::new(TargetOs::Windows, TargetArch::X64),
                LinkTarget::new(TargetOs::Linux, TargetArch::X64),
                LinkTarget::new(TargetOs::Darwin, TargetArch::X64),
                LinkTarget::new(TargetOs::Darwin, TargetArch::Arm64),
            ],
            backends: strings(&[
                "allegro5",
                "android",
                "dx9",
                "dx10",
                "dx11",
                "dx12",
                "glfw",
                "glut",
                "metal",
                "opengl2",
                "opengl3",
                "osx",
                "sdl2",
                "sdl3",
                "sdlrenderer2",
                "sdlrenderer3",
                "vulkan",
                "wgpu",
                "win32",
            ]),
            wanted_backends: strings(&[
                "vulkan",
                "sdl2",
                "opengl3",
                "sdlrenderer2",
                "glfw",
                "dx11",
                "dx12",
                "win32",
                "osx",
                "metal",
            ]),

            strict_bounds: false,
            parallel: false,
        }
    }
}

impl BindingConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn with_strict_bounds(mut self, strict: bool) -> Self {
        self.strict_bounds = strict;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}
