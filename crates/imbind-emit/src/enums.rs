/*! Enum groups in their three target shapes.
 *
 * Flags groups become a backing enumeration of bit positions, a `bit_set` over it and one
 * constant per original element. Groups whose values mix an index with flag bits become a
 * `distinct` integer with plain constants. Everything else is an ordinary enumeration.
 */

use imbind_core::EnumGroup;
use imbind_transform::{
    classify, plain_value, split_operands, BackingMember, EnumClass, EnumNaming, FlagValue,
    FlagsLayout, Translator,
};
use rayon::prelude::*;
use std::io::Write;
use tracing::{debug, warn};

use crate::aligned::AlignedRows;
use crate::emitter::{EmitContext, EmitHelper, EmitResult, Emitter};

const STOP_NOTICE: [&str; 2] = [
    "// Some of the next enum values are self referential, which currently causes issues",
    "// Members from here on are kept for their ordinal positions only.",
];

pub struct EnumEmitter<'a> {
    translator: Translator<'a>,
}

impl<'a> EnumEmitter<'a> {
    pub fn new(translator: Translator<'a>) -> Self {
        Self { translator }
    }

    /// Renders one group into its own buffer, starting from a copy of `context`.
    pub fn render_group(&self, group: &EnumGroup, context: &EmitContext) -> anyhow::Result<Vec<u8>> {
        let mut buffer = Vec::new();
        let mut context = context.clone();
        self.emit_group(group, &mut buffer, &mut context)?;
        Ok(buffer)
    }

    pub fn emit_group<W: Write>(
        &self,
        group: &EnumGroup,
        writer: &mut W,
        context: &mut EmitContext,
    ) -> EmitResult {
        let config = self.translator.config;
        let naming = EnumNaming::new(&group.name, config);

        match classify(group, config) {
            EnumClass::Skip => {
                debug!(group = %group.name, "Skipping enum group");
                Ok(())
            }
            EnumClass::Flags => self.emit_flags(group, &naming, writer, context),
            EnumClass::Constants => self.emit_constants(group, &naming, writer, context),
            EnumClass::Plain { stop_after } => {
                self.emit_plain(group, &naming, stop_after.as_deref(), writer, context)
            }
        }
    }

    fn emit_flags<W: Write>(
        &self,
        group: &EnumGroup,
        naming: &EnumNaming,
        writer: &mut W,
        context: &mut EmitContext,
    ) -> EmitResult {
        let config = self.translator.config;
        let backing_type = &config.enum_backing_type;
        let name = &naming.name;
        let flag_name = naming.flag_name();
        let layout = FlagsLayout::analyze(group, naming, config);

        let header = format!("{} :: enum {}", flag_name, backing_type);
        EmitHelper::write_block(writer, context, &header, &group.comments, |w, ctx| {
            let mut rows = AlignedRows::new();
            for (element, backing) in &layout.backing {
                match backing {
                    BackingMember::Bit { member, bit } => {
                        rows.push_with_comments(
                            [member.clone(), format!(" = {},", bit)],
                            &element.comments,
                        );
                    }
                    BackingMember::Irregular { member, value } => {
                        rows.push_with_comments(
                            [
                                format!("// {}", member),
                                format!(" = {},", value),
                                " // value is not a single bit".to_string(),
                            ],
                            &element.comments,
                        );
                    }
                }
            }
            rows.write(w, ctx)
        })?;
        EmitHelper::write_line(
            writer,
            context,
            &format!("{} :: bit_set[{}; {}]", name, flag_name, backing_type),
        )?;
        EmitHelper::write_line(writer, context, "")?;

        let mut rows = AlignedRows::new();
        for constant in &layout.constants {
            let constant_name = format!("{}_{}", name, constant.member);
            let comments = &constant.element.comments;

            match &constant.value {
                FlagValue::Empty => {
                    rows.push_with_comments([constant_name, format!(" :: {}{{}}", name)], comments);
                }
                FlagValue::Set(members) => {
                    let set = members
                        .iter()
                        .map(|member| format!(".{}", member))
                        .collect::<Vec<_>>()
                        .join(",");
                    rows.push_with_comments(
                        [constant_name, format!(" :: {}{{{}}}", name, set)],
                        comments,
                    );
                }
                FlagValue::Literal(expr) => {
                    rows.push_with_comments(
                        [
                            constant_name,
                            format!(" :: {}({})", backing_type, expr),
                            format!(" // Meant to be of type {}", name),
                        ],
                        comments,
                    );
                }
                FlagValue::Unresolved(expr) => {
                    rows.push_with_comments(
                        [
                            format!("// {}", constant_name),
                            format!(" :: {}", expr),
                            " // couldn't resolve flag combination".to_string(),
                        ],
                        comments,
                    );
                }
            }
        }
        rows.write(writer, context)?;
        EmitHelper::write_line(writer, context, "")
    }

    fn emit_constants<W: Write>(
        &self,
        group: &EnumGroup,
        naming: &EnumNaming,
        writer: &mut W,
        context: &mut EmitContext,
    ) -> EmitResult {
        let names = self.translator.names;
        let name = &naming.name;

        EmitHelper::write_line_with_comments(
            writer,
            context,
            &format!(
                "{} :: distinct {}",
                name, self.translator.config.enum_backing_type
            ),
            &group.comments,
        )?;

        let mut rows = AlignedRows::new();
        for element in &group.elements {
            let constant_name = format!("{}_{}", name, naming.member(&element.name));
            let expr = element.value_expression.as_deref().map(str::trim);

            match expr {
                Some(expr) if self.translator.constants.evaluate(expr).is_some() => {
                    rows.push_with_comments(
                        [constant_name, format!(" :: {}({})", name, expr)],
                        &element.comments,
                    );
                }
                Some(expr) if !split_operands(expr).is_empty() => {
                    let operands = split_operands(expr)
                        .into_iter()
                        .map(|operand| names.strip_branding(operand))
                        .collect::<Vec<_>>()
                        .join(" | ");
                    rows.push_with_comments(
                        [constant_name, format!(" :: {}({})", name, operands)],
                        &element.comments,
                    );
                }
                _ => {
                    warn!(group = %group.name, element = %element.name, "Enum constant has no value");
                    rows.push_with_comments(
                        [
                            format!("// {}", constant_name),
                            " :: ?".to_string(),
                            " // missing value".to_string(),
                        ],
                        &element.comments,
                    );
                }
            }
        }
        rows.write(writer, context)?;
        EmitHelper::write_line(writer, context, "")
    }

    fn emit_plain<W: Write>(
        &self,
        group: &EnumGroup,
        naming: &EnumNaming,
        stop_after: Option<&str>,
        writer: &mut W,
        context: &mut EmitContext,
    ) -> EmitResult {
        let names = self.translator.names;
        let header = format!(
            "{} :: enum {}",
            naming.name, self.translator.config.enum_backing_type
        );

        // Plain members are not column-aligned.
        EmitHelper::write_block(writer, context, &header, &group.comments, |w, ctx| {
            let mut disabled = "";

            for element in &group.elements {
                if stop_after == Some(element.name.as_str()) {
                    for line in STOP_NOTICE {
                        EmitHelper::write_line(w, ctx, line)?;
                    }
                    disabled = "// ";
                }

                let member = names.make_identifier_valid(naming.member(&element.name));
                let line = match element.value_expression.as_deref().map(str::trim) {
                    Some(expr) if !expr.is_empty() => match plain_value(expr, naming) {
                        Some(value) => format!("{}{} = {},", disabled, member, value),
                        None => {
                            warn!(
                                group = %group.name,
                                element = %element.name,
                                expr,
                                "Enum value does not reference this group"
                            );
                            format!("// {} = {}, // not expressible in this enum", member, expr)
                        }
                    },
                    _ => format!("{}{},", disabled, member),
                };
                EmitHelper::write_line_with_comments(w, ctx, &line, &element.comments)?;
            }
            Ok(())
        })?;
        EmitHelper::write_line(writer, context, "")
    }
}

impl Emitter for EnumEmitter<'_> {
    type Item = [EnumGroup];

    fn emit<W: Write>(
        &self,
        groups: &[EnumGroup],
        writer: &mut W,
        context: &mut EmitContext,
    ) -> EmitResult {
        EmitHelper::write_section(writer, context, "Enums")?;

        if self.translator.config.parallel {
            let shared = context.clone();
            let rendered = groups
                .par_iter()
                .map(|group| self.render_group(group, &shared))
                .collect::<anyhow::Result<Vec<_>>>()?;

            for buffer in rendered {
                writer.write_all(&buffer)?;
            }
            return Ok(());
        }

        for group in groups {
            self.emit_group(group, writer, context)?;
        }
        Ok(())
    }
}
