use imbind_core::{BindingConfig, IrDocument};
use imbind_transform::Translator;
use std::io::Write;
use tracing::info;

use crate::defines::DefineEmitter;
use crate::emitter::{EmitContext, EmitHelper, EmitResult, Emitter};
use crate::enums::EnumEmitter;
use crate::functions::FunctionEmitter;
use crate::structs::StructEmitter;
use crate::typedefs::TypedefEmitter;

/// Writes a complete binding file: header, then defines, enums, structs, functions and
/// typedefs in that order, then the trailer.
pub struct BindingEmitter<'a> {
    config: &'a BindingConfig,
    translator: Translator<'a>,
}

impl<'a> BindingEmitter<'a> {
    pub fn new(config: &'a BindingConfig) -> Self {
        Self {
            config,
            translator: Translator::new(config),
        }
    }

    fn write_header<W: Write>(&self, writer: &mut W, context: &EmitContext) -> EmitResult {
        EmitHelper::write_line(writer, context, &format!("package {}", self.config.package))?;
        EmitHelper::write_line(writer, context, "")?;
        for import in &self.config.imports {
            EmitHelper::write_line(writer, context, &format!("import \"{}\"", import))?;
        }
        if !self.config.preamble.is_empty() {
            EmitHelper::write_line(writer, context, "")?;
            for line in self.config.preamble.lines() {
                EmitHelper::write_line(writer, context, line)?;
            }
        }
        Ok(())
    }
}

impl Emitter for BindingEmitter<'_> {
    type Item = IrDocument;

    fn emit<W: Write>(
        &self,
        document: &IrDocument,
        writer: &mut W,
        context: &mut EmitContext,
    ) -> EmitResult {
        self.write_header(writer, context)?;

        info!(count = document.defines.len(), "Emitting defines");
        DefineEmitter::new(self.translator).emit(&document.defines, writer, context)?;

        info!(count = document.enums.len(), parallel = self.config.parallel, "Emitting enums");
        EnumEmitter::new(self.translator).emit(&document.enums, writer, context)?;

        info!(count = document.structs.len(), "Emitting structs");
        StructEmitter::new(self.translator).emit(&document.structs, writer, context)?;

        info!(count = document.functions.len(), "Emitting functions");
        FunctionEmitter::new(self.translator).emit(&document.functions, writer, context)?;

        info!(count = document.typedefs.len(), "Emitting typedefs");
        TypedefEmitter::new(self.translator).emit(&document.typedefs, writer, context)?;

        if !self.config.trailer.is_empty() {
            EmitHelper::write_line(writer, context, "")?;
            for line in &self.config.trailer {
                EmitHelper::write_line(writer, context, line)?;
            }
        }
        Ok(())
    }
}

/// Renders `document` into memory. Nothing is returned unless every section succeeded.
pub fn generate(document: &IrDocument, config: &BindingConfig) -> anyhow::Result<String> {
    BindingEmitter::new(config).emit_to_string(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_document_layout() {
        let mut config = BindingConfig::default();
        config.preamble = String::new();
        config.link_targets.truncate(1);

        let out = generate(&IrDocument::default(), &config).unwrap();
        let sections: Vec<&str> = out
            .lines()
            .filter(|line| line.starts_with("// ") && line.chars().skip(3).all(|c| c.is_ascii_uppercase()))
            .collect();

        assert!(out.starts_with("package imgui\n\nimport \"core:c\"\n\n"));
        assert_eq!(
            sections,
            vec!["// DEFINES", "// ENUMS", "// STRUCTS", "// FUNCTIONS", "// TYPEDEFS"]
        );
        assert!(out.ends_with("\nWchar :: Wchar16\n"));
    }

    #[test]
    fn test_header_with_preamble() {
        let config = BindingConfig::default();
        let mut buffer = Vec::new();

        BindingEmitter::new(&config)
            .write_header(&mut buffer, &EmitContext::new())
            .unwrap();
        let header = String::from_utf8(buffer).unwrap();

        assert!(header.starts_with("package imgui\n\nimport \"core:c\"\n\nCHECKVERSION :: proc() {\n"));
        assert!(header.ends_with("}\n"));
    }
}
