//! Rust-specific renderer for language-agnostic expressions.
//!
//! This module implements the [`Renderer`] trait for Rust, translating
//! [`Value`], [`BuilderSpec`] and [`Statement`] into the body of a generated
//! command's `run` method. Flag reads become fields of `self`.

use clientele_codegen::builder::{
    BuilderSpec, Constructor, RenderOptions, Renderer, Statement, Terminal, Value,
};
use clientele_ir::CollectionKind;

/// Rust language renderer.
///
/// # Examples
///
/// ```
/// use clientele_codegen::builder::{BuilderSpec, Constructor, Renderer, RenderOptions, Value};
/// use clientele_codegen_rust::RustRenderer;
///
/// let spec = BuilderSpec::with_constructor(Constructor::static_method("Movie", "builder"))
///     .call_arg("title", Value::flag("title"))
///     .terminal_method("build");
///
/// let code = RustRenderer.render_builder(&spec, &RenderOptions::inline());
/// assert_eq!(code, "Movie::builder().title(self.title).build()");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct RustRenderer;

impl RustRenderer {
    pub fn new() -> Self {
        Self
    }

    fn render_args(&self, args: &[Value], opts: &RenderOptions) -> String {
        args.iter()
            .map(|a| self.render_value(a, opts))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Render a whole statement list, one statement per entry.
    pub fn render_statements(&self, statements: &[Statement]) -> Vec<String> {
        let opts = RenderOptions::default();
        statements
            .iter()
            .map(|s| self.render_statement(s, &opts))
            .collect()
    }
}

impl Renderer for RustRenderer {
    fn render_value(&self, value: &Value, opts: &RenderOptions) -> String {
        match value {
            Value::String(v) => format!("{:?}", v),
            Value::Ident(v) => v.clone(),
            Value::Flag(name) => format!("self.{}", name),
            Value::Some(inner) => format!("Some({})", self.render_value(inner, opts)),
            Value::Borrow(inner) => format!("&{}", self.render_value(inner, opts)),
            Value::Try(inner) => format!("{}?", self.render_value(inner, opts)),
            Value::MethodCall {
                receiver,
                method,
                args,
            } => format!(
                "{}.{}({})",
                self.render_value(receiver, opts),
                self.transform_method_name(method),
                self.render_args(args, opts)
            ),
            Value::Call { function, args } => {
                format!("{}({})", function, self.render_args(args, opts))
            }
            Value::Collection { kind, items } => {
                let items = self.render_args(items, opts);
                match kind {
                    CollectionKind::List => format!("vec![{}]", items),
                    CollectionKind::Set | CollectionKind::Map => {
                        format!("[{}].into_iter().collect()", items)
                    }
                }
            }
            Value::Require { value, flag } => format!(
                "{}.ok_or_else(|| eyre::eyre!(\"missing required flag --{}\"))?",
                self.render_value(value, opts),
                flag
            ),
            Value::Positional {
                source,
                index,
                name,
                target,
            } => {
                let element = format!(
                    "{}.get({}).ok_or_else(|| eyre::eyre!(\"missing argument <{}>\"))?",
                    self.render_value(source, opts),
                    index,
                    name
                );
                if target == "String" {
                    format!("{}.clone()", element)
                } else {
                    format!("{}.parse::<{}>()?", element, target)
                }
            }
            Value::Builder(spec) => self.render_builder(spec, opts),
        }
    }

    fn render_builder(&self, spec: &BuilderSpec, opts: &RenderOptions) -> String {
        let mut result = self.render_constructor(&spec.constructor);

        if spec.calls.is_empty() {
            result.push_str(&self.render_terminal(&spec.terminal));
            return result;
        }

        if opts.inline {
            for call in &spec.calls {
                let name = self.transform_method_name(&call.name);
                result.push_str(&format!(".{}({})", name, self.render_args(&call.args, opts)));
            }
        } else {
            // Continuation lines sit one level deeper than the chain's first line.
            let continuation = opts.nested();
            let indent = continuation.indent_str();
            for call in &spec.calls {
                let name = self.transform_method_name(&call.name);
                result.push_str(&format!(
                    "\n{}.{}({})",
                    indent,
                    name,
                    self.render_args(&call.args, &continuation)
                ));
            }
            if spec.terminal.method.is_some() {
                result.push('\n');
                result.push_str(&indent);
            }
        }

        result.push_str(&self.render_terminal(&spec.terminal));
        result
    }

    fn render_constructor(&self, ctor: &Constructor) -> String {
        match ctor {
            Constructor::StaticMethod {
                type_path,
                method,
                args,
            } => format!(
                "{}::{}({})",
                type_path,
                method,
                self.render_args(args, &RenderOptions::inline())
            ),
        }
    }

    fn render_terminal(&self, terminal: &Terminal) -> String {
        let mut result = String::new();

        if let Some(method) = &terminal.method {
            result.push_str(&format!(".{}()", method));
        }

        if terminal.is_try {
            result.push('?');
        }

        result
    }

    fn render_statement(&self, statement: &Statement, opts: &RenderOptions) -> String {
        match statement {
            Statement::Let {
                name,
                value,
                mutable,
            } => {
                let mutability = if *mutable { "mut " } else { "" };
                format!(
                    "let {}{} = {};",
                    mutability,
                    name,
                    self.render_value(value, opts)
                )
            }
            Statement::Expr(value) => format!("{};", self.render_value(value, opts)),
        }
    }
}
