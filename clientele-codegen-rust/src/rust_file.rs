//! Structured Rust source files: imports, then body items.

use clientele_codegen::builder::{CodeBuilder, CodeFragment, Indent, Renderable};

/// A Rust use statement.
#[derive(Debug, Clone)]
pub struct Use {
    module: String,
    symbols: Vec<String>,
}

impl Use {
    pub fn new(module: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            symbols: Vec::new(),
        }
    }

    pub fn symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbols.push(symbol.into());
        self
    }

    pub fn symbols(mut self, symbols: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.symbols.extend(symbols.into_iter().map(Into::into));
        self
    }

    /// Whether the import points into the current crate.
    fn is_local(&self) -> bool {
        ["crate", "super", "self"]
            .iter()
            .any(|root| self.module == *root || self.module.starts_with(&format!("{}::", root)))
    }

    fn format(&self) -> String {
        match self.symbols.as_slice() {
            [] => format!("use {};", self.module),
            [single] => format!("use {}::{};", self.module, single),
            many => format!("use {}::{{{}}};", self.module, many.join(", ")),
        }
    }
}

impl Renderable for Use {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        vec![CodeFragment::Line(self.format())]
    }
}

/// A structured representation of a Rust file.
///
/// External imports come first, then crate-local ones, separated by a blank
/// line; body items follow, one blank line apart.
///
/// ```ignore
/// let code = RustFile::new()
///     .use_stmt(Use::new("clap").symbol("Args"))
///     .add(command_struct)
///     .add(command_impl)
///     .render_with_header(GENERATED_HEADER);
/// ```
#[derive(Default)]
pub struct RustFile {
    uses: Vec<Use>,
    body: Vec<Vec<CodeFragment>>,
}

impl RustFile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn use_stmt(mut self, use_stmt: Use) -> Self {
        self.uses.push(use_stmt);
        self
    }

    /// Add a use statement only when `condition` holds.
    pub fn use_stmt_if(self, condition: bool, use_stmt: Use) -> Self {
        if condition { self.use_stmt(use_stmt) } else { self }
    }

    /// Add a body element (any Renderable).
    #[allow(clippy::should_implement_trait)]
    pub fn add<R: Renderable>(mut self, node: R) -> Self {
        self.body.push(node.to_fragments());
        self
    }

    pub fn render(&self) -> String {
        let mut builder = CodeBuilder::new(Indent::RUST);

        let (local, external): (Vec<&Use>, Vec<&Use>) =
            self.uses.iter().partition(|u| u.is_local());
        for use_stmt in &external {
            builder.emit(*use_stmt);
        }
        if !external.is_empty() && !local.is_empty() {
            builder.push_blank();
        }
        for use_stmt in &local {
            builder.emit(*use_stmt);
        }

        if !self.uses.is_empty() && !self.body.is_empty() {
            builder.push_blank();
        }

        for (i, fragments) in self.body.iter().enumerate() {
            if i > 0 {
                builder.push_blank();
            }
            for fragment in fragments {
                builder.apply_fragment(fragment.clone());
            }
        }

        builder.build()
    }

    /// Render with a header comment on the first line.
    pub fn render_with_header(&self, header: &str) -> String {
        let content = self.render();
        if content.is_empty() {
            format!("{}\n", header)
        } else {
            format!("{}\n\n{}", header, content)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.uses.is_empty() && self.body.is_empty()
    }
}

/// Raw source text as a body element, one line per line.
#[derive(Debug, Clone)]
pub struct RawCode(String);

impl RawCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn lines(lines: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self(
            lines
                .into_iter()
                .map(Into::into)
                .collect::<Vec<_>>()
                .join("\n"),
        )
    }
}

impl Renderable for RawCode {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        self.0
            .lines()
            .map(|line| {
                if line.is_empty() {
                    CodeFragment::Blank
                } else {
                    CodeFragment::Line(line.to_string())
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file() {
        let file = RustFile::new();
        assert!(file.is_empty());
        assert_eq!(file.render(), "");
        assert_eq!(file.render_with_header("// header"), "// header\n");
    }

    #[test]
    fn test_use_forms() {
        let render = |u: Use| CodeBuilder::rust().emit_node(&u).build();
        assert_eq!(render(Use::new("serde::Serialize")), "use serde::Serialize;\n");
        assert_eq!(render(Use::new("clap").symbol("Args")), "use clap::Args;\n");
        assert_eq!(
            render(Use::new("clap").symbols(["Parser", "Subcommand"])),
            "use clap::{Parser, Subcommand};\n"
        );
    }

    #[test]
    fn test_local_uses_grouped_last() {
        let file = RustFile::new()
            .use_stmt(Use::new("super::base").symbol("GlobalArgs"))
            .use_stmt(Use::new("clap").symbol("Parser"))
            .use_stmt_if(false, Use::new("serde").symbol("Serialize"))
            .add(RawCode::new("pub struct Cli;"));
        assert_eq!(
            file.render(),
            "use clap::Parser;\n\nuse super::base::GlobalArgs;\n\npub struct Cli;\n"
        );
    }

    #[test]
    fn test_blank_lines_between_body() {
        let file = RustFile::new()
            .add(RawCode::new("struct Foo;"))
            .add(RawCode::new("struct Bar;"));
        assert_eq!(file.render(), "struct Foo;\n\nstruct Bar;\n");
    }

    #[test]
    fn test_raw_code_keeps_blank_lines() {
        let file = RustFile::new().add(RawCode::lines(["pub mod base;", "", "pub use base::*;"]));
        assert_eq!(file.render(), "pub mod base;\n\npub use base::*;\n");
    }

    #[test]
    fn test_render_with_header() {
        let file = RustFile::new()
            .use_stmt(Use::new("clap").symbol("Args"))
            .add(RawCode::new("pub struct Cmd;"));
        let code = file.render_with_header("// Generated by clientele. Do not edit.");
        assert!(code.starts_with("// Generated by clientele. Do not edit.\n\nuse clap::Args;"));
    }
}
