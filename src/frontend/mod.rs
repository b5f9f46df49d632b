use std::path::PathBuf;

pub mod ast;
pub mod lexer;
pub mod parser;

#[derive(Debug)]
pub struct SourceFile {
    pub contents: String,
    pub origin: SourceFileOrigin,
}

impl SourceFile {
    pub fn from_memory(contents: impl Into<String>) -> Self {
        Self {
            contents: contents.into(),
            origin: SourceFileOrigin::Memory,
        }
    }

    /// Returns the text of a 1-based line, without its line terminator
    pub fn line(&self, line_number: usize) -> Option<&str> {
        self.contents
            .lines()
            .nth(line_number.checked_sub(1)?)
    }

    /// Renders a line with a caret under the given 1-based column
    pub fn highlight(&self, line_number: usize, column: usize) -> Option<String> {
        let text = self.line(line_number)?;
        let gutter = line_number.to_string();

        Some(format!(
            "{gutter} | {text}\n{} | {}^",
            " ".repeat(gutter.len()),
            " ".repeat(column.saturating_sub(1))
        ))
    }
}

#[derive(Debug)]
pub enum SourceFileOrigin {
    Memory,
    File(PathBuf),
}

impl core::fmt::Display for SourceFileOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceFileOrigin::Memory => f.write_str("<memory>"),
            SourceFileOrigin::File(path) => f.write_fmt(format_args!("{}", path.display())),
        }
    }
}
