/*! Generate Odin bindings from a dear_bindings description.
 *
 * Single import for the whole pipeline: load the JSON description, pick or load a
 * `BindingConfig`, and render the binding file or the backend manifest.
 */

pub use imbind_core as core;
pub use imbind_emit as emit;
pub use imbind_transform as transform;

pub use imbind_core::{BindError, BindingConfig, IrDocument, LinkTarget, TargetArch, TargetOs};

pub use imbind_emit::{emit_backend_manifest, generate, BindingEmitter, Emitter};

pub use imbind_transform::{classify, EnumClass, Translator};

use std::path::Path;

/// Loads `input` and renders it with `config`.
pub fn generate_from_file(input: impl AsRef<Path>, config: &BindingConfig) -> anyhow::Result<String> {
    let document = IrDocument::from_file(input)?;
    generate(&document, config)
}
