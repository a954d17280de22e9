/*! Write Odin source for a translated C API.
 *
 * Each category of declaration has its own emitter, and all of them lay out their rows through
 * `AlignedRows` so declarations and trailing comments line up in columns. `BindingEmitter` runs
 * them in a fixed order to produce one deterministic file; `BackendManifest` writes the small
 * helper file listing the compiled-in backends.
 */

pub mod aligned;
pub mod backends;
pub mod binding_emitter;
pub mod defines;
pub mod emitter;
pub mod enums;
pub mod functions;
pub mod structs;
pub mod typedefs;

pub use aligned::{column_widths, AlignedRows};
pub use backends::{emit_backend_manifest, BackendManifest};
pub use binding_emitter::{generate, BindingEmitter};
pub use defines::DefineEmitter;
pub use emitter::{EmitContext, EmitHelper, EmitResult, Emittable, Emitter};
pub use enums::EnumEmitter;
pub use functions::FunctionEmitter;
pub use structs::StructEmitter;
pub use typedefs::TypedefEmitter;
