use imbind_core::StructDef;
use imbind_transform::Translator;
use std::io::Write;
use tracing::debug;

use crate::aligned::AlignedRows;
use crate::emitter::{EmitContext, EmitHelper, EmitResult, Emitter};

pub struct StructEmitter<'a> {
    translator: Translator<'a>,
}

impl<'a> StructEmitter<'a> {
    pub fn new(translator: Translator<'a>) -> Self {
        Self { translator }
    }

    pub fn emit_struct<W: Write>(
        &self,
        def: &StructDef,
        writer: &mut W,
        context: &mut EmitContext,
    ) -> EmitResult {
        if let Some(replacement) = self.translator.config.struct_overrides.get(&def.name) {
            debug!(name = %def.name, "Using struct override");
            return EmitHelper::write_line(writer, context, replacement);
        }

        let names = self.translator.names;
        let mut rows = AlignedRows::new();
        for field in &def.fields {
            let ty = self.translator.types.resolve(&field.ty, false)?;
            rows.push_with_comments(
                [format!("{}: ", names.identifier(&field.name)), format!("{},", ty)],
                &field.comments,
            );
        }

        let header = format!("{} :: struct", names.strip_branding(&def.name));
        EmitHelper::write_block(writer, context, &header, &def.comments, |w, ctx| {
            rows.write(w, ctx)
        })?;
        EmitHelper::write_line(writer, context, "")
    }
}

impl Emitter for StructEmitter<'_> {
    type Item = [StructDef];

    fn emit<W: Write>(
        &self,
        structs: &[StructDef],
        writer: &mut W,
        context: &mut EmitContext,
    ) -> EmitResult {
        EmitHelper::write_section(writer, context, "Structs")?;

        for def in structs {
            self.emit_struct(def, writer, context)?;
        }
        Ok(())
    }
}
