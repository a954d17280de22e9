/*! Column-aligned output.
 *
 * Rows are lists of text components. Between delimiter lines, every column is padded to the
 * widest component in that column so declarations and trailing comments line up. Delimiters
 * (comment lines, blank lines) are written as-is and restart alignment, so unrelated blocks never
 * influence each other's layout. Nothing here knows about the target language.
 */

use imbind_core::Comments;
use std::io::Write;

use crate::emitter::{EmitContext, EmitHelper, EmitResult};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Row {
    Delimiter(String),
    Components(Vec<String>),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlignedRows {
    rows: Vec<Row>,
}

impl AlignedRows {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn delimiter(&mut self, line: impl Into<String>) {
        self.rows.push(Row::Delimiter(line.into()));
    }

    pub fn push<I, S>(&mut self, components: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows
            .push(Row::Components(components.into_iter().map(Into::into).collect()));
    }

    /// Preceding comments become delimiters; the attached comment becomes a final component.
    pub fn push_with_comments<I, S>(&mut self, components: I, comments: &Comments)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for preceding in &comments.preceding {
            self.delimiter(preceding.clone());
        }

        let mut components: Vec<String> = components.into_iter().map(Into::into).collect();
        if let Some(attached) = &comments.attached {
            components.push(format!(" {}", attached));
        }
        self.rows.push(Row::Components(components));
    }

    pub fn write<W: Write>(&self, writer: &mut W, context: &EmitContext) -> EmitResult {
        let mut run: Vec<&[String]> = Vec::new();

        for row in &self.rows {
            match row {
                Row::Components(components) => run.push(components),
                Row::Delimiter(line) => {
                    write_run(writer, context, &run)?;
                    run.clear();
                    EmitHelper::write_line(writer, context, line)?;
                }
            }
        }

        write_run(writer, context, &run)
    }

    pub fn to_string_with(&self, context: &EmitContext) -> anyhow::Result<String> {
        let mut buffer = Vec::new();
        self.write(&mut buffer, context)?;
        Ok(String::from_utf8(buffer)?)
    }
}

fn width(text: &str) -> usize {
    text.chars().count()
}

/// Widest component per column across the run.
pub fn column_widths(run: &[&[String]]) -> Vec<usize> {
    let mut widths: Vec<usize> = Vec::new();
    for components in run {
        for (idx, component) in components.iter().enumerate() {
            if idx >= widths.len() {
                widths.push(0);
            }
            widths[idx] = widths[idx].max(width(component));
        }
    }
    widths
}

fn write_run<W: Write>(writer: &mut W, context: &EmitContext, run: &[&[String]]) -> EmitResult {
    let widths = column_widths(run);
    let indent = context.get_indent();

    for components in run {
        let mut line = indent.clone();
        for (idx, component) in components.iter().enumerate() {
            line.push_str(component);
            // The last component is never padded.
            if idx + 1 < components.len() {
                let padding = widths[idx] - width(component);
                line.extend(std::iter::repeat(' ').take(padding));
            }
        }
        writeln!(writer, "{}", line)?;
    }
    Ok(())
}
