//! Language-agnostic expression fragments.
//!
//! Generated statements are composed from these values instead of being
//! spliced together as text; a [`Renderer`] turns them into source once,
//! at the end of generation.
//!
//! ```ignore
//! use clientele_codegen::builder::{BuilderSpec, Constructor, Value};
//!
//! let movie = BuilderSpec::with_constructor(Constructor::static_method(
//!     "movie_client::model::Movie",
//!     "builder",
//! ))
//! .call_arg("title", Value::flag("title"))
//! .terminal_method("build");
//!
//! // Rust: movie_client::model::Movie::builder()
//! //           .title(self.title)
//! //           .build()
//! ```

use std::fmt;

use clientele_ir::CollectionKind;

/// A semantic value, rendered per target language.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// String literal (quoted on render).
    String(String),
    /// Raw identifier or path (not quoted).
    Ident(String),
    /// A field of the command's parsed arguments (`self.title` in Rust).
    Flag(String),
    /// An optional value known to be present (`Some(x)`).
    Some(Box<Value>),
    /// A borrow of the value (`&x`).
    Borrow(Box<Value>),
    /// Error propagation (`x?`).
    Try(Box<Value>),
    /// A method call on a receiver: `receiver.method(args)`.
    MethodCall {
        receiver: Box<Value>,
        method: String,
        args: Vec<Value>,
    },
    /// A free function call: `function(args)`.
    Call { function: String, args: Vec<Value> },
    /// A collection literal of the given family.
    Collection {
        kind: CollectionKind,
        items: Vec<Value>,
    },
    /// An optional value that must be present; missing means a usage error
    /// naming `flag`.
    Require { value: Box<Value>, flag: String },
    /// Element `index` of a positional list, parsed into `target`.
    Positional {
        source: Box<Value>,
        index: usize,
        name: String,
        target: String,
    },
    Builder(Box<BuilderSpec>),
}

impl Value {
    pub fn string(v: impl Into<String>) -> Self {
        Self::String(v.into())
    }

    pub fn ident(v: impl Into<String>) -> Self {
        Self::Ident(v.into())
    }

    pub fn flag(name: impl Into<String>) -> Self {
        Self::Flag(name.into())
    }

    pub fn some(self) -> Self {
        Self::Some(Box::new(self))
    }

    pub fn borrow(self) -> Self {
        Self::Borrow(Box::new(self))
    }

    pub fn try_(self) -> Self {
        Self::Try(Box::new(self))
    }

    /// `self.method()`
    pub fn method(self, method: impl Into<String>) -> Self {
        self.method_args(method, Vec::new())
    }

    /// `self.method(args)`
    pub fn method_args(self, method: impl Into<String>, args: Vec<Value>) -> Self {
        Self::MethodCall {
            receiver: Box::new(self),
            method: method.into(),
            args,
        }
    }

    /// `self.clone()`
    pub fn cloned(self) -> Self {
        self.method("clone")
    }

    /// `self.into_iter().collect()`
    pub fn collected(self) -> Self {
        self.method("into_iter").method("collect")
    }

    pub fn call(function: impl Into<String>, args: Vec<Value>) -> Self {
        Self::Call {
            function: function.into(),
            args,
        }
    }

    pub fn collection(kind: CollectionKind, items: Vec<Value>) -> Self {
        Self::Collection { kind, items }
    }

    pub fn require(self, flag: impl Into<String>) -> Self {
        Self::Require {
            value: Box::new(self),
            flag: flag.into(),
        }
    }

    pub fn builder(spec: BuilderSpec) -> Self {
        Self::Builder(Box::new(spec))
    }

    /// Whether this value reads the named flag anywhere inside it.
    pub fn reads_flag(&self, name: &str) -> bool {
        match self {
            Value::Flag(f) => f == name,
            Value::Some(v) | Value::Borrow(v) | Value::Try(v) => v.reads_flag(name),
            Value::Require { value, .. } => value.reads_flag(name),
            Value::MethodCall { receiver, args, .. } => {
                receiver.reads_flag(name) || args.iter().any(|a| a.reads_flag(name))
            }
            Value::Call { args, .. } | Value::Collection { items: args, .. } => {
                args.iter().any(|a| a.reads_flag(name))
            }
            Value::Positional { source, .. } => source.reads_flag(name),
            Value::Builder(spec) => spec
                .calls
                .iter()
                .flat_map(|c| c.args.iter())
                .any(|a| a.reads_flag(name)),
            Value::String(_) | Value::Ident(_) => false,
        }
    }
}

/// How a builder chain's base expression is constructed.
#[derive(Debug, Clone, PartialEq)]
pub enum Constructor {
    /// `Type::method(args)`
    StaticMethod {
        type_path: String,
        method: String,
        args: Vec<Value>,
    },
}

impl Constructor {
    pub fn static_method(type_path: impl Into<String>, method: impl Into<String>) -> Self {
        Self::StaticMethod {
            type_path: type_path.into(),
            method: method.into(),
            args: Vec::new(),
        }
    }

    pub fn static_method_args(
        type_path: impl Into<String>,
        method: impl Into<String>,
        args: Vec<Value>,
    ) -> Self {
        Self::StaticMethod {
            type_path: type_path.into(),
            method: method.into(),
            args,
        }
    }
}

/// A method call in a builder chain.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodCall {
    /// Method name in snake_case.
    pub name: String,
    pub args: Vec<Value>,
}

impl MethodCall {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, value: Value) -> Self {
        self.args.push(value);
        self
    }

    pub fn args(mut self, values: impl IntoIterator<Item = Value>) -> Self {
        self.args.extend(values);
        self
    }
}

/// Terminal operation of a builder chain.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Terminal {
    pub is_try: bool,
    /// Final method call, e.g. `build`.
    pub method: Option<String>,
}

impl Terminal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn try_(mut self) -> Self {
        self.is_try = true;
        self
    }

    pub fn method(mut self, name: impl Into<String>) -> Self {
        self.method = Some(name.into());
        self
    }
}

/// A method chain: base construction, calls in order, then a terminal.
#[derive(Debug, Clone, PartialEq)]
pub struct BuilderSpec {
    pub constructor: Constructor,
    pub calls: Vec<MethodCall>,
    pub terminal: Terminal,
}

impl BuilderSpec {
    pub fn with_constructor(constructor: Constructor) -> Self {
        Self {
            constructor,
            calls: Vec::new(),
            terminal: Terminal::default(),
        }
    }

    pub fn call(mut self, name: impl Into<String>) -> Self {
        self.calls.push(MethodCall::new(name));
        self
    }

    pub fn call_arg(mut self, name: impl Into<String>, value: Value) -> Self {
        self.calls.push(MethodCall::new(name).arg(value));
        self
    }

    pub fn call_args(
        mut self,
        name: impl Into<String>,
        values: impl IntoIterator<Item = Value>,
    ) -> Self {
        self.calls.push(MethodCall::new(name).args(values));
        self
    }

    pub fn push_call(&mut self, call: MethodCall) {
        self.calls.push(call);
    }

    /// Add a call only when the value is present.
    pub fn call_opt(self, name: impl Into<String>, value: Option<Value>) -> Self {
        match value {
            Some(v) => self.call_arg(name, v),
            None => self,
        }
    }

    pub fn try_(mut self) -> Self {
        self.terminal.is_try = true;
        self
    }

    pub fn terminal_method(mut self, name: impl Into<String>) -> Self {
        self.terminal.method = Some(name.into());
        self
    }
}

/// Formatting options for rendering.
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    /// Base indentation level of continuation lines.
    pub indent: usize,
    pub indent_size: usize,
    /// Render chains on one line.
    pub inline: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            indent: 0,
            indent_size: 4,
            inline: false,
        }
    }
}

impl RenderOptions {
    pub fn inline() -> Self {
        Self {
            inline: true,
            ..Default::default()
        }
    }

    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    pub fn indent_str(&self) -> String {
        " ".repeat(self.indent * self.indent_size)
    }

    /// Options one level deeper.
    pub fn nested(&self) -> Self {
        Self {
            indent: self.indent + 1,
            ..*self
        }
    }
}

/// Renders expression fragments for one target language.
pub trait Renderer {
    fn render_value(&self, value: &Value, opts: &RenderOptions) -> String;

    fn render_builder(&self, spec: &BuilderSpec, opts: &RenderOptions) -> String;

    fn render_constructor(&self, ctor: &Constructor) -> String;

    fn render_terminal(&self, terminal: &Terminal) -> String;

    fn render_statement(&self, statement: &super::Statement, opts: &RenderOptions) -> String;

    /// Transform a method name to the target convention (snake_case by default).
    fn transform_method_name(&self, name: &str) -> String {
        name.to_string()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(v) => write!(f, "\"{}\"", v),
            Value::Ident(v) => write!(f, "{}", v),
            Value::Flag(v) => write!(f, "<{}>", v),
            Value::Some(v) => write!(f, "some({})", v),
            Value::Borrow(v) => write!(f, "&{}", v),
            Value::Try(v) => write!(f, "{}?", v),
            Value::MethodCall {
                receiver, method, ..
            } => write!(f, "{}.{}(..)", receiver, method),
            Value::Call { function, .. } => write!(f, "{}(..)", function),
            Value::Collection { items, .. } => write!(f, "<collection of {}>", items.len()),
            Value::Require { value, .. } => write!(f, "required({})", value),
            Value::Positional { name, index, .. } => write!(f, "<{} at {}>", name, index),
            Value::Builder(_) => write!(f, "<builder>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_helpers() {
        assert_eq!(Value::flag("title").some(), Value::Some(Box::new(Value::flag("title"))));
        assert_eq!(
            Value::flag("tags").collected(),
            Value::MethodCall {
                receiver: Box::new(Value::MethodCall {
                    receiver: Box::new(Value::flag("tags")),
                    method: "into_iter".to_string(),
                    args: Vec::new(),
                }),
                method: "collect".to_string(),
                args: Vec::new(),
            }
        );
    }

    #[test]
    fn test_reads_flag() {
        let spec = BuilderSpec::with_constructor(Constructor::static_method("Movie", "builder"))
            .call_arg("title", Value::flag("title"))
            .call_arg("year", Value::flag("year").some());
        let value = Value::builder(spec);
        assert!(value.reads_flag("title"));
        assert!(value.reads_flag("year"));
        assert!(!value.reads_flag("rating"));
    }

    #[test]
    fn test_builder_spec() {
        let spec = BuilderSpec::with_constructor(Constructor::static_method("Options", "builder"))
            .call_opt("present", Some(Value::flag("present")))
            .call_opt("missing", None)
            .call("verbose")
            .try_()
            .terminal_method("build");

        assert_eq!(spec.calls.len(), 2);
        assert_eq!(spec.calls[1].name, "verbose");
        assert!(spec.terminal.is_try);
        assert_eq!(spec.terminal.method.as_deref(), Some("build"));
    }

    #[test]
    fn test_render_options_nesting() {
        let opts = RenderOptions::default().with_indent(1);
        assert_eq!(opts.indent_str(), "    ");
        assert_eq!(opts.nested().indent_str(), "        ");
        assert!(RenderOptions::inline().inline);
    }
}
