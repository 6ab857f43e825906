//! Rust function and match-expression builders.

use clientele_codegen::builder::{CodeBuilder, CodeFragment, Renderable};

/// A parameter in a Rust function.
///
/// An empty type renders the name alone, for receivers such as `self`.
#[derive(Debug, Clone)]
pub struct Param {
    pub name: String,
    pub ty: String,
}

impl Param {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
        }
    }

    /// `self` by value.
    pub fn receiver() -> Self {
        Self::new("self", "")
    }

    fn render(&self) -> String {
        if self.ty.is_empty() {
            self.name.clone()
        } else {
            format!("{}: {}", self.name, self.ty)
        }
    }
}

/// Builder for Rust functions.
#[derive(Debug, Clone)]
pub struct Fn {
    name: String,
    doc: Option<String>,
    attrs: Vec<String>,
    is_public: bool,
    params: Vec<Param>,
    return_type: Option<String>,
    body: Vec<CodeFragment>,
}

impl Fn {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            attrs: Vec::new(),
            is_public: true,
            params: Vec::new(),
            return_type: None,
            body: Vec::new(),
        }
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn attr(mut self, attr: impl Into<String>) -> Self {
        self.attrs.push(attr.into());
        self
    }

    pub fn private(mut self) -> Self {
        self.is_public = false;
        self
    }

    pub fn param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    pub fn returns(mut self, ty: impl Into<String>) -> Self {
        self.return_type = Some(ty.into());
        self
    }

    /// Add a line (or a multi-line expression) to the body.
    pub fn body_line(mut self, line: impl Into<String>) -> Self {
        self.body.push(CodeFragment::Line(line.into()));
        self
    }

    pub fn body_lines(mut self, lines: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.body
            .extend(lines.into_iter().map(|l| CodeFragment::Line(l.into())));
        self
    }

    /// Use a match expression as the body.
    pub fn body_match(mut self, match_expr: &Match) -> Self {
        self.body.extend(match_expr.to_fragments());
        self
    }

    fn signature(&self) -> String {
        let vis = if self.is_public { "pub " } else { "" };
        let params = self
            .params
            .iter()
            .map(Param::render)
            .collect::<Vec<_>>()
            .join(", ");

        match &self.return_type {
            Some(ret) => format!("{}fn {}({}) -> {} {{", vis, self.name, params, ret),
            None => format!("{}fn {}({}) {{", vis, self.name, params),
        }
    }

    /// Build the function as a string.
    pub fn build(&self) -> String {
        CodeBuilder::rust().emit_node(self).build()
    }
}

impl Renderable for Fn {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments = Vec::new();

        if let Some(doc) = &self.doc {
            fragments.push(CodeFragment::RustDoc(doc.clone()));
        }
        for attr in &self.attrs {
            fragments.push(CodeFragment::Line(format!("#[{}]", attr)));
        }
        fragments.push(CodeFragment::Block {
            header: self.signature(),
            body: self.body.clone(),
            close: Some("}".to_string()),
        });

        fragments
    }
}

/// One arm of a match expression.
#[derive(Debug, Clone)]
pub struct Arm {
    pattern: String,
    body: String,
}

impl Arm {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            body: "{}".to_string(),
        }
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }
}

/// A match expression.
#[derive(Debug, Clone)]
pub struct Match {
    scrutinee: String,
    arms: Vec<Arm>,
}

impl Match {
    pub fn new(scrutinee: impl Into<String>) -> Self {
        Self {
            scrutinee: scrutinee.into(),
            arms: Vec::new(),
        }
    }

    pub fn arm(mut self, arm: Arm) -> Self {
        self.arms.push(arm);
        self
    }
}

impl Renderable for Match {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        vec![CodeFragment::Block {
            header: format!("match {} {{", self.scrutinee),
            body: self
                .arms
                .iter()
                .map(|arm| CodeFragment::Line(format!("{} => {},", arm.pattern, arm.body)))
                .collect(),
            close: Some("}".to_string()),
        }]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_fn() {
        let f = Fn::new("run").build();
        assert_eq!(f, "pub fn run() {\n}\n");
    }

    #[test]
    fn test_fn_with_params() {
        let f = Fn::new("run")
            .private()
            .param(Param::receiver())
            .param(Param::new("config", "movie_client::ClientConfiguration"))
            .returns("eyre::Result<()>")
            .body_line("Ok(())")
            .build();
        assert_eq!(
            f,
            "fn run(self, config: movie_client::ClientConfiguration) -> eyre::Result<()> {\n    Ok(())\n}\n"
        );
    }

    #[test]
    fn test_fn_body_multiline_expression() {
        let f = Fn::new("client")
            .body_lines(["let client = Client::new()\n    .movies();", "Ok(())"])
            .build();
        assert!(f.contains("    let client = Client::new()\n        .movies();\n    Ok(())\n"));
    }

    #[test]
    fn test_fn_with_doc_and_attr() {
        let f = Fn::new("run")
            .doc("Execute the command")
            .attr("allow(unused_mut)")
            .build();
        assert!(f.starts_with("/// Execute the command\n#[allow(unused_mut)]\npub fn run() {"));
    }

    #[test]
    fn test_match_body() {
        let m = Match::new("self.command")
            .arm(Arm::new("Commands::Movies(group)").body("group.dispatch(self.global)"))
            .arm(Arm::new("Commands::Reviews(group)").body("group.dispatch(self.global)"));
        let f = Fn::new("dispatch")
            .param(Param::receiver())
            .returns("eyre::Result<()>")
            .body_match(&m)
            .build();
        assert!(f.contains(
            "    match self.command {\n        Commands::Movies(group) => group.dispatch(self.global),\n"
        ));
        assert!(f.ends_with("    }\n}\n"));
    }
}
