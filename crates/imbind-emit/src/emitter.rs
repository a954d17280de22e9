use anyhow::Result;
use imbind_core::Comments;
use std::io::Write;

pub type EmitResult = Result<()>;

const SECTION_RULE: &str = "////////////////////////////////////////////////////////////";

#[derive(Debug, Clone)]
pub struct EmitContext {
    pub indent_level: usize,
    pub indent_chars: String,
}

impl EmitContext {
    pub fn new() -> Self {
        Self {
            indent_level: 0,
            indent_chars: "\t".to_string(),
        }
    }

    pub fn indent(&mut self) {
        self.indent_level += 1;
    }

    pub fn dedent(&mut self) {
        if self.indent_level > 0 {
            self.indent_level -= 1;
        }
    }

    pub fn get_indent(&self) -> String {
        self.indent_chars.repeat(self.indent_level)
    }

    pub fn nested(&self) -> Self {
        let mut ctx = self.clone();
        ctx.indent();
        ctx
    }
}

impl Default for EmitContext {
    fn default() -> Self {
        Self::new()
    }
}

pub trait Emitter {
    type Item: ?Sized;

    fn emit<W: Write>(
        &self,
        item: &Self::Item,
        writer: &mut W,
        context: &mut EmitContext,
    ) -> EmitResult;

    fn emit_to_string(&self, item: &Self::Item) -> Result<String> {
        let mut buffer = Vec::new();
        let mut context = EmitContext::new();
        self.emit(item, &mut buffer, &mut context)?;
        Ok(String::from_utf8(buffer)?)
    }
}

pub trait Emittable {
    fn emit<W: Write>(&self, writer: &mut W, context: &mut EmitContext) -> EmitResult;

    fn to_formatted_string(&self) -> Result<String> {
        let mut buffer = Vec::new();
        let mut context = EmitContext::new();
        self.emit(&mut buffer, &mut context)?;
        Ok(String::from_utf8(buffer)?)
    }
}

pub struct EmitHelper;

impl EmitHelper {
    /// Blank lines carry no indentation.
    pub fn write_line<W: Write>(writer: &mut W, context: &EmitContext, text: &str) -> EmitResult {
        if text.is_empty() {
            writeln!(writer)?;
        } else {
            writeln!(writer, "{}{}", context.get_indent(), text)?;
        }
        Ok(())
    }

    pub fn write_section<W: Write>(
        writer: &mut W,
        context: &EmitContext,
        title: &str,
    ) -> EmitResult {
        writeln!(writer)?;
        Self::write_line(writer, context, SECTION_RULE)?;
        Self::write_line(writer, context, &format!("// {}", title.to_uppercase()))?;
        Self::write_line(writer, context, SECTION_RULE)?;
        writeln!(writer)?;
        Ok(())
    }

    /// Preceding comment lines, then `text` with the attached comment appended.
    pub fn write_line_with_comments<W: Write>(
        writer: &mut W,
        context: &EmitContext,
        text: &str,
        comments: &Comments,
    ) -> EmitResult {
        for preceding in &comments.preceding {
            Self::write_line(writer, context, preceding)?;
        }
        match &comments.attached {
            Some(attached) => Self::write_line(writer, context, &format!("{} {}", text, attached)),
            None => Self::write_line(writer, context, text),
        }
    }

    pub fn write_block<W: Write, F>(
        writer: &mut W,
        context: &mut EmitContext,
        header: &str,
        comments: &Comments,
        body: F,
    ) -> EmitResult
    where
        F: FnOnce(&mut W, &mut EmitContext) -> EmitResult,
    {
        Self::write_line_with_comments(writer, context, &format!("{} {{", header), comments)?;
        context.indent();
        body(writer, context)?;
        context.dedent();
        Self::write_line(writer, context, "}")?;
        Ok(())
    }
}
