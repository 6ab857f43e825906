use std::path::{Path, PathBuf};

use clientele_codegen::synthesize::{GeneratedCommand, PRINT_RESULT};
use clientele_core::{FileRules, GeneratedFile};

use super::{GENERATED_HEADER, uses};
use crate::{ClapAttr, Field, Fn, Impl, Param, RustFile, RustRenderer, RustTypeMapper, Struct};

/// One `<group>_<operation>.rs` command module.
pub struct CommandRs<'a> {
    pub namespace: String,
    pub crate_ident: String,
    pub command: &'a GeneratedCommand,
}

impl<'a> CommandRs<'a> {
    pub fn new(
        namespace: impl Into<String>,
        crate_ident: impl Into<String>,
        command: &'a GeneratedCommand,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            crate_ident: crate_ident.into(),
            command,
        }
    }

    fn build_struct(&self) -> Struct {
        let mapper = RustTypeMapper;
        let fields = self.command.flags.iter().map(|flag| {
            Field::new(&flag.variable, mapper.flag_type(flag))
                .doc_opt(flag.description.as_deref())
                .clap_attr(ClapAttr::arg(mapper.arg_attr(flag)))
        });

        Struct::new(&self.command.command_name)
            .doc_opt(self.command.description.as_deref())
            .derive("Args")
            .derive("Debug")
            .fields(fields)
    }

    fn build_impl(&self) -> Impl {
        let renderer = RustRenderer;
        let run = Fn::new("run")
            .private()
            .param(Param::receiver())
            .param(Param::new(
                "config",
                format!("{}::ClientConfiguration", self.crate_ident),
            ))
            .returns("eyre::Result<()>")
            .body_lines(renderer.render_statements(&self.command.statements))
            .body_lines(renderer.render_statements(&self.command.result_handling))
            .body_line("Ok(())");

        Impl::new(&self.command.command_name)
            .for_trait("ClientCommand")
            .method(run)
    }
}

impl GeneratedFile for CommandRs<'_> {
    fn path(&self, base: &Path) -> PathBuf {
        base.join("src")
            .join(&self.namespace)
            .join("commands")
            .join(format!("{}.rs", self.command.module_name))
    }

    fn rules(&self) -> FileRules {
        FileRules::always_overwrite().with_header(GENERATED_HEADER)
    }

    fn render(&self) -> String {
        let base_symbols: &[&str] = if self.command.prints_result() {
            &["ClientCommand", PRINT_RESULT]
        } else {
            &["ClientCommand"]
        };

        RustFile::new()
            .use_stmt(uses::clap_args())
            .use_stmt(uses::base(&self.namespace, base_symbols))
            .add(self.build_struct())
            .add(self.build_impl())
            .render_with_header(GENERATED_HEADER)
    }
}

#[cfg(test)]
mod tests {
    use clientele_codegen::{pipeline::Pipeline, testing::movies_catalog};

    use super::*;

    fn render(operation: &str) -> String {
        let ctx = Pipeline::new().run(movies_catalog()).unwrap();
        let command = ctx
            .commands
            .iter()
            .find(|c| c.operation == operation)
            .unwrap();
        CommandRs::new("generated", "movie_client", command).render()
    }

    #[test]
    fn test_void_command() {
        let code = render("delete_movie");
        assert!(code.starts_with("// Generated by clientele. Do not edit.\n\nuse clap::Args;\n\nuse crate::generated::base::ClientCommand;\n"));
        assert!(code.contains("/// Remove a movie\n#[derive(Args, Debug)]\npub struct MoviesDeleteMovieCmd {"));
        assert!(code.contains("    #[arg(value_name = \"MOVIE_ID\")]\n    pub movie_id: String,"));
        assert!(code.contains(
            "impl ClientCommand for MoviesDeleteMovieCmd {\n    fn run(self, config: movie_client::ClientConfiguration) -> eyre::Result<()> {\n        movie_client::MovieClient::new(config)\n            .movies()\n            .delete_movie(self.movie_id)?;\n        Ok(())\n    }\n}"
        ));
        assert!(!code.contains("print_result"));
    }

    #[test]
    fn test_result_is_printed() {
        let code = render("get_movie");
        assert!(code.contains("use crate::generated::base::{ClientCommand, print_result};"));
        assert!(code.contains("let result = movie_client::MovieClient::new(config)"));
        assert!(code.contains("        print_result(&result)?;\n        Ok(())"));
    }

    #[test]
    fn test_options_follow_parameter_order() {
        let code = render("add_movie");
        let title = code.find("pub title: String,").unwrap();
        let director = code.find("pub director: Option<String>,").unwrap();
        assert!(title < director);
        assert!(code.contains("    /// Movie title\n    #[arg(long)]\n    pub title: String,"));
    }

    #[test]
    fn test_path() {
        let ctx = Pipeline::new().run(movies_catalog()).unwrap();
        let file = CommandRs::new("generated", "movie_client", &ctx.commands[0]);
        assert_eq!(
            file.path(Path::new(".")),
            Path::new(".").join("src/generated/commands/movies_add_movie.rs")
        );
    }
}
