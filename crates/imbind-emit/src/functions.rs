use imbind_core::{FunctionDef, LinkTarget, TargetOs};
use imbind_transform::Translator;
use indexmap::IndexMap;
use std::io::Write;
use tracing::debug;

use crate::aligned::AlignedRows;
use crate::emitter::{EmitContext, EmitHelper, EmitResult, Emitter};

/// The foreign import selection plus one `foreign lib` block holding every function.
pub struct FunctionEmitter<'a> {
    translator: Translator<'a>,
}

impl<'a> FunctionEmitter<'a> {
    pub fn new(translator: Translator<'a>) -> Self {
        Self { translator }
    }

    /// `when ODIN_OS == ...` chain choosing the archive for the build platform. Several
    /// architectures for one OS get a nested `ODIN_ARCH` selection.
    pub fn foreign_imports(&self) -> AlignedRows {
        let config = self.translator.config;
        let mut by_os: IndexMap<TargetOs, Vec<LinkTarget>> = IndexMap::new();
        for target in &config.link_targets {
            by_os.entry(target.os).or_default().push(*target);
        }

        let import = |target: &LinkTarget| {
            format!(
                "foreign import lib \"{}\"",
                target.artifact_name(&config.library)
            )
        };

        let mut rows = AlignedRows::new();
        let mut block_open = false;

        for (idx, (os, targets)) in by_os.iter().enumerate() {
            let keyword = match (idx, block_open) {
                (0, _) => "when ",
                (_, true) => "} else when ",
                (_, false) => "else when ",
            };
            let condition = format!("ODIN_OS == .{}", os.odin_name());

            match targets.as_slice() {
                [single] => {
                    rows.push([keyword.to_string(), condition, format!(" do {}", import(single))]);
                    block_open = false;
                }
                several => {
                    // Block openers stay out of the `do` column.
                    rows.delimiter(format!("{}{} {{", keyword, condition));

                    let mut nested = Vec::new();
                    for (arch_idx, target) in several.iter().enumerate() {
                        if arch_idx + 1 == several.len() {
                            nested.push(format!("else {{ {} }}", import(target)));
                        } else {
                            let prefix = if arch_idx == 0 { "" } else { "else " };
                            nested.push(format!(
                                "{}when ODIN_ARCH == .{} {{ {} }}",
                                prefix,
                                target.arch.odin_name(),
                                import(target)
                            ));
                        }
                    }
                    rows.delimiter(format!("\t{}", nested.join(" ")));
                    block_open = true;
                }
            }
        }

        if block_open {
            rows.delimiter("}");
        }
        rows
    }

    fn is_skipped(&self, function: &FunctionDef, exposed: &str) -> bool {
        let skip = &self.translator.config.function_skip;
        skip.iter().any(|name| name == &function.name || name == exposed)
    }

    /// A `va_list` cannot be built from Odin; such functions always have a `...` counterpart.
    fn uses_va_list(&self, function: &FunctionDef) -> bool {
        function
            .arguments
            .last()
            .filter(|arg| !arg.is_varargs)
            .and_then(|arg| arg.ty.as_ref())
            .is_some_and(|ty| self.translator.types.is_va_list(ty))
    }

    /// Components of one declaration inside the `foreign lib` block, or `None` when skipped.
    pub fn declaration(&self, function: &FunctionDef) -> anyhow::Result<Option<Vec<String>>> {
        let exposed = self.translator.names.strip_function_prefix(&function.name);
        if self.is_skipped(function, exposed) {
            debug!(function = %function.name, "Skipping function");
            return Ok(None);
        }

        let signature =
            self.translator
                .types
                .procedure(&function.return_type, &function.arguments, false)?;
        let disabled = if self.uses_va_list(function) {
            debug!(function = %function.name, "Disabling va_list function");
            "// "
        } else {
            ""
        };

        Ok(Some(vec![
            format!("{}@(link_name=\"{}\") ", disabled, function.name),
            exposed.to_string(),
            format!(" :: {}", signature),
            " ---".to_string(),
        ]))
    }
}

impl Emitter for FunctionEmitter<'_> {
    type Item = [FunctionDef];

    fn emit<W: Write>(
        &self,
        functions: &[FunctionDef],
        writer: &mut W,
        context: &mut EmitContext,
    ) -> EmitResult {
        EmitHelper::write_section(writer, context, "Functions")?;
        EmitHelper::write_line(writer, context, "")?;
        self.foreign_imports().write(writer, context)?;
        EmitHelper::write_line(writer, context, "")?;

        let mut rows = AlignedRows::new();
        for function in functions {
            if let Some(components) = self.declaration(function)? {
                rows.push_with_comments(components, &function.comments);
            }
        }

        EmitHelper::write_line(writer, context, "@(default_calling_convention=\"c\")")?;
        EmitHelper::write_block(writer, context, "foreign lib", &Default::default(), |w, ctx| {
            rows.write(w, ctx)
        })
    }
}
