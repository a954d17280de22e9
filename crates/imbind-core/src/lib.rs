/*! Data model and configuration for turning a parsed C API description into Odin bindings.
 *
 * dear_bindings reads the Dear ImGui headers and writes a JSON description of every define, enum,
 * struct, function and typedef. This crate deserialises that description and holds the override
 * tables that steer translation, so every later stage works on plain, read-only data.
 */

pub mod config;
pub mod ir;
pub mod target;

pub use config::BindingConfig;
pub use ir::{
    ArgumentDef, Comments, Define, EnumElement, EnumGroup, FieldDef, FunctionDef, IrDocument,
    StructDef, TypeDescription, TypeDetails, TypeInfo, TypedefDef,
};
pub use target::{LinkTarget, TargetArch, TargetOs};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BindError {
    #[error("Unhandled type kind \"{kind}\" in `{declaration}`")]
    UnhandledTypeKind { kind: String, declaration: String },
    #[error("Unsupported type details in `{0}`")]
    UnsupportedTypeDetails(String),
    #[error("Argument `{0}` has no type")]
    MissingArgumentType(String),
    #[error("Couldn't resolve array bounds \"{0}\"")]
    UnresolvedBound(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BindError>;
