use std::io::Write;

use crate::aligned::AlignedRows;
use crate::emitter::{EmitContext, EmitHelper, EmitResult, Emittable};

/// Helper source telling users which renderer/platform backends were compiled into the library.
#[derive(Debug, Clone)]
pub struct BackendManifest<'a> {
    pub package: &'a str,
    pub backends: &'a [String],
    pub wanted: &'a [String],
}

impl<'a> BackendManifest<'a> {
    pub fn new(package: &'a str, backends: &'a [String], wanted: &'a [String]) -> Self {
        Self {
            package,
            backends,
            wanted,
        }
    }

    pub fn is_enabled(&self, backend: &str) -> bool {
        self.wanted.iter().any(|wanted| wanted == backend)
    }
}

impl Emittable for BackendManifest<'_> {
    fn emit<W: Write>(&self, writer: &mut W, context: &mut EmitContext) -> EmitResult {
        EmitHelper::write_line(writer, context, &format!("package {}", self.package))?;
        EmitHelper::write_line(writer, context, "")?;
        EmitHelper::write_line(
            writer,
            context,
            "// This is a generated helper file which you can use to know which",
        )?;
        EmitHelper::write_line(
            writer,
            context,
            "// implementations have been compiled into the bindings.",
        )?;
        EmitHelper::write_line(writer, context, "")?;

        let mut rows = AlignedRows::new();
        for backend in self.backends {
            rows.push([
                format!("BACKEND_{}_ENABLED", backend.to_uppercase()),
                format!(" :: {}", self.is_enabled(backend)),
            ]);
        }
        rows.write(writer, context)
    }
}

/// Renders the manifest for `package`.
pub fn emit_backend_manifest(
    package: &str,
    backends: &[String],
    wanted: &[String],
) -> anyhow::Result<String> {
    BackendManifest::new(package, backends, wanted).to_formatted_string()
}
