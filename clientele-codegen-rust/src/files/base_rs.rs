//! The shared base command every generated command runs through.
//!
//! `GlobalArgs` carries the connection and credential flags. Before a
//! command body runs, `GlobalArgs::execute` loads the per-user settings
//! store, lets supplied flags overwrite stored values, fills absent flags
//! from the store, and writes it back. A settings failure is reported as a
//! warning and the command still runs.

use std::path::{Path, PathBuf};

use clientele_codegen::builder::{BuilderSpec, Constructor, RenderOptions, Renderer, Value};
use clientele_core::{FileRules, GeneratedFile};
use clientele_ir::AuthMode;

use super::GENERATED_HEADER;
use crate::{ArgAttr, ClapAttr, Field, Fn, Impl, Param, RawCode, RustFile, RustRenderer, Struct, Use};

/// A global flag and the settings key it is persisted under.
struct GlobalFlag {
    name: &'static str,
    short: char,
    doc: &'static str,
    /// Switches are plain `bool` and never persisted.
    switch: bool,
    setting: Option<&'static str>,
    encoded: bool,
}

impl GlobalFlag {
    const fn value(name: &'static str, short: char, doc: &'static str, key: &'static str) -> Self {
        Self {
            name,
            short,
            doc,
            switch: false,
            setting: Some(key),
            encoded: false,
        }
    }

    const fn switch(name: &'static str, short: char, doc: &'static str) -> Self {
        Self {
            name,
            short,
            doc,
            switch: true,
            setting: None,
            encoded: false,
        }
    }

    const fn encoded(self) -> Self {
        Self {
            encoded: true,
            ..self
        }
    }

    fn field(&self) -> Field {
        let ty = if self.switch { "bool" } else { "Option<String>" };
        Field::new(self.name, ty)
            .doc(self.doc)
            .clap_attr(ClapAttr::arg(
                ArgAttr::new().short(self.short).long().global(),
            ))
    }

    /// Encoded flags keep their decode outcome in `<name>_merged` so the
    /// store is saved before a failure is reported.
    fn merge_line(&self) -> Option<String> {
        let key = self.setting?;
        Some(if self.encoded {
            format!(
                "let {}_merged = settings.merge_encoded({:?}, &mut self.{});",
                self.name, key, self.name
            )
        } else {
            format!("settings.merge({:?}, &mut self.{});", key, self.name)
        })
    }
}

static URL: GlobalFlag = GlobalFlag::value("url", 'l', "Base URL of the API", "general.url");
static VERBOSE: GlobalFlag =
    GlobalFlag::switch("verbose", 'v', "Print request and response details");
static USERNAME: GlobalFlag = GlobalFlag::value(
    "username",
    'u',
    "User name for basic authentication",
    "basic.username",
);
static PASSWORD: GlobalFlag = GlobalFlag::value(
    "password",
    'p',
    "Password for basic authentication",
    "basic.password",
)
.encoded();
static KEY_ID: GlobalFlag = GlobalFlag::value(
    "key_id",
    'k',
    "Identifier of the signing key",
    "signature.key-id",
);
static KEY_LOCATION: GlobalFlag = GlobalFlag::value(
    "key_location",
    'n',
    "Location of the signing key",
    "signature.key-location",
);
static SIGNATURE_DETAILS: GlobalFlag = GlobalFlag::switch(
    "signature_details",
    's',
    "Print the details of each request signature",
);

/// The `<namespace>/base.rs` file.
pub struct BaseRs {
    pub namespace: String,
    /// Command-line name; names the settings directory.
    pub cli_name: String,
    /// Client crate as written in Rust paths.
    pub crate_ident: String,
    pub auth: AuthMode,
}

impl BaseRs {
    pub fn new(
        namespace: impl Into<String>,
        cli_name: impl Into<String>,
        crate_ident: impl Into<String>,
        auth: AuthMode,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            cli_name: cli_name.into(),
            crate_ident: crate_ident.into(),
            auth,
        }
    }

    fn flags(&self) -> Vec<&'static GlobalFlag> {
        let mut flags = vec![&URL, &VERBOSE];
        match self.auth {
            AuthMode::None => {}
            AuthMode::Basic => flags.extend([&USERNAME, &PASSWORD]),
            AuthMode::Signature => flags.extend([&KEY_ID, &KEY_LOCATION, &SIGNATURE_DETAILS]),
        }
        flags
    }

    fn client_type(&self, name: &str) -> String {
        format!("{}::{}", self.crate_ident, name)
    }

    fn build_global_args(&self) -> Struct {
        Struct::new("GlobalArgs")
            .doc("Flags accepted by every command.")
            .derive("Args")
            .derive("Debug")
            .derive("Clone")
            .fields(self.flags().into_iter().map(GlobalFlag::field))
    }

    fn build_command_trait(&self) -> RawCode {
        RawCode::lines([
            "/// A generated command: its parsed flags and the client call they feed.".to_string(),
            "pub trait ClientCommand {".to_string(),
            format!(
                "    fn run(self, config: {}) -> eyre::Result<()>;",
                self.client_type("ClientConfiguration")
            ),
            "}".to_string(),
        ])
    }

    /// Auth sub-configuration chain and the flags it needs present.
    fn auth_configuration(&self) -> Option<(&'static str, [&'static str; 2], BuilderSpec)> {
        let spec = |name: &str, prefix: &str| {
            BuilderSpec::with_constructor(Constructor::static_method(
                self.client_type(name),
                "builder",
            ))
            .call_arg("header", Value::string("Authorization"))
            .call_arg("prefix", Value::string(prefix))
        };

        match self.auth {
            AuthMode::None => None,
            AuthMode::Basic => Some((
                "basic",
                ["username", "password"],
                spec("BasicConfiguration", "Basic")
                    .call_arg("username", Value::ident("username"))
                    .call_arg("password", Value::ident("password"))
                    .terminal_method("build"),
            )),
            AuthMode::Signature => Some((
                "signature",
                ["key_id", "key_location"],
                spec("SignatureConfiguration", "Signature")
                    .call_arg("key_id", Value::ident("key_id"))
                    .call_arg("key_location", Value::ident("key_location"))
                    .call_arg("signature_details", Value::ident("self.signature_details"))
                    .terminal_method("build"),
            )),
        }
    }

    fn build_configuration_fn(&self) -> Fn {
        let renderer = RustRenderer;
        let opts = RenderOptions::default();

        let base = BuilderSpec::with_constructor(Constructor::static_method(
            self.client_type("ClientConfiguration"),
            "builder",
        ))
        .call_arg("url", Value::ident("self.url").cloned())
        .call_arg("verbose", Value::ident("self.verbose"));

        let mut body = Vec::new();
        match self.auth_configuration() {
            None => {
                body.push(renderer.render_builder(&base.terminal_method("build"), &opts));
            }
            Some((method, [first, second], auth)) => {
                body.push(format!("let builder = {};", renderer.render_builder(&base, &opts)));
                body.push(format!(
                    "let builder = match (self.{first}.clone(), self.{second}.clone()) {{\n    (Some({first}), Some({second})) => builder.{method}(\n        {chain},\n    ),\n    _ => builder,\n}};",
                    first = first,
                    second = second,
                    method = method,
                    chain = renderer.render_builder(&auth, &opts.with_indent(2)),
                ));
                body.push("builder.build()".to_string());
            }
        }

        Fn::new("configuration")
            .private()
            .param(Param::new("&self", ""))
            .returns(self.client_type("ClientConfiguration"))
            .body_lines(body)
    }

    fn build_impl(&self) -> Impl {
        let execute = Fn::new("execute")
            .doc("Reconcile flags with the stored settings, then run `command`.")
            .param(Param::new("mut self", ""))
            .param(Param::new("command", "impl ClientCommand"))
            .returns("eyre::Result<()>")
            .body_lines([
                "if let Err(err) = self.merge_settings() {",
                "    eprintln!(\"warning: could not manage settings: {}\", err);",
                "}",
                "command.run(self.configuration())",
            ]);

        let flags = self.flags();
        let merged: Vec<_> = flags
            .iter()
            .filter(|flag| flag.encoded)
            .map(|flag| format!("{}_merged", flag.name))
            .collect();
        let merge = Fn::new("merge_settings")
            .private()
            .param(Param::new("&mut self", ""))
            .returns("clientele_runtime::Result<()>")
            .body_line(format!(
                "let mut settings = Settings::load_or_create({:?})?;",
                self.cli_name
            ))
            .body_lines(flags.iter().filter_map(|flag| flag.merge_line()));
        let merge = match merged.split_first() {
            None => merge.body_line("settings.save()"),
            Some((first, rest)) => merge.body_line("settings.save()?;").body_line(
                rest.iter()
                    .fold(first.clone(), |acc, next| format!("{}.and({})", acc, next)),
            ),
        };

        Impl::new("GlobalArgs")
            .method(execute)
            .method(merge)
            .method(self.build_configuration_fn())
    }

    fn build_print_result(&self) -> Fn {
        Fn::new("print_result<T: Serialize>")
            .doc("Print an operation result as pretty JSON unless it is null.")
            .param(Param::new("result", "&T"))
            .returns("eyre::Result<()>")
            .body_lines([
                "let value = serde_json::to_value(result)?;",
                "if !value.is_null() {",
                "    println!(\"{}\", serde_json::to_string_pretty(&value)?);",
                "}",
                "Ok(())",
            ])
    }
}

impl GeneratedFile for BaseRs {
    fn path(&self, base: &Path) -> PathBuf {
        base.join("src").join(&self.namespace).join("base.rs")
    }

    fn rules(&self) -> FileRules {
        FileRules::always_overwrite().with_header(GENERATED_HEADER)
    }

    fn render(&self) -> String {
        RustFile::new()
            .use_stmt(super::uses::clap_args())
            .use_stmt(Use::new("clientele_runtime").symbol("Settings"))
            .use_stmt(Use::new("serde").symbol("Serialize"))
            .add(self.build_global_args())
            .add(self.build_command_trait())
            .add(self.build_impl())
            .add(self.build_print_result())
            .render_with_header(GENERATED_HEADER)
    }
}
