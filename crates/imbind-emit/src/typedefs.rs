use imbind_core::TypedefDef;
use imbind_transform::Translator;
use std::io::Write;

use crate::aligned::AlignedRows;
use crate::emitter::{EmitContext, EmitHelper, EmitResult, Emitter};

pub struct TypedefEmitter<'a> {
    translator: Translator<'a>,
}

impl<'a> TypedefEmitter<'a> {
    pub fn new(translator: Translator<'a>) -> Self {
        Self { translator }
    }
}

impl Emitter for TypedefEmitter<'_> {
    type Item = [TypedefDef];

    fn emit<W: Write>(
        &self,
        typedefs: &[TypedefDef],
        writer: &mut W,
        context: &mut EmitContext,
    ) -> EmitResult {
        EmitHelper::write_section(writer, context, "Typedefs")?;

        let config = self.translator.config;
        let mut rows = AlignedRows::new();
        for typedef in typedefs
            .iter()
            .filter(|typedef| config.typedef_allow.contains(&typedef.name))
        {
            let ty = self.translator.types.resolve(&typedef.ty, false)?;
            rows.push_with_comments(
                [
                    self.translator.names.strip_branding(&typedef.name),
                    format!(" :: {}", ty),
                ],
                &typedef.comments,
            );
        }

        rows.write(writer, context)
    }
}
