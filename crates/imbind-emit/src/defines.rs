use imbind_core::Define;
use imbind_transform::Translator;
use std::io::Write;
use tracing::debug;

use crate::aligned::AlignedRows;
use crate::emitter::{EmitContext, EmitHelper, EmitResult, Emitter};

/// Allow-listed preprocessor constants as `NAME :: content`.
pub struct DefineEmitter<'a> {
    translator: Translator<'a>,
}

impl<'a> DefineEmitter<'a> {
    pub fn new(translator: Translator<'a>) -> Self {
        Self { translator }
    }
}

impl Emitter for DefineEmitter<'_> {
    type Item = [Define];

    fn emit<W: Write>(
        &self,
        defines: &[Define],
        writer: &mut W,
        context: &mut EmitContext,
    ) -> EmitResult {
        EmitHelper::write_section(writer, context, "Defines")?;

        let config = self.translator.config;
        let mut rows = AlignedRows::new();

        for define in defines {
            if !config.define_allow.contains(&define.name) {
                debug!(define = %define.name, "Skipping define");
                continue;
            }

            let name = self.translator.names.strip_define_prefix(&define.name);
            rows.push_with_comments(
                [name.to_string(), format!(" :: {}", define.content)],
                &define.comments,
            );
        }

        rows.write(writer, context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use imbind_core::{BindingConfig, Comments};
    use pretty_assertions::assert_eq;

    fn define(name: &str, content: &str) -> Define {
        Define {
            name: name.to_string(),
            content: content.to_string(),
            comments: Comments::default(),
        }
    }

    #[test]
    fn test_only_allowed_defines() {
        let config = BindingConfig::default();
        let emitter = DefineEmitter::new(Translator::new(&config));
        let defines = vec![
            define("IMGUI_VERSION", "\"1.90.1\""),
            define("IMGUI_API", ""),
            define("IMGUI_VERSION_NUM", "19010"),
        ];

        let out = emitter.emit_to_string(&defines).unwrap();
        assert!(out.ends_with("VERSION     :: \"1.90.1\"\nVERSION_NUM :: 19010\n"));
        assert!(!out.contains("API"));
    }
}
