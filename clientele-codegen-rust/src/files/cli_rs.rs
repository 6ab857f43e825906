//! The CLI entry point: the root parser, one subcommand enum per resource
//! group, dispatch, and the top-level error wrapper.

use std::path::{Path, PathBuf};

use clientele_core::{FileRules, GeneratedFile, Version, to_pascal_case};

use super::{GENERATED_HEADER, uses};
use crate::{Arm, ClapAttr, Enum, Field, Fn, Impl, Match, Param, RawCode, RustFile, Struct, Use, Variant};

/// A command as registered under its group.
#[derive(Debug, Clone)]
pub struct CommandInfo {
    /// Registration id (`add-movie`).
    pub id: String,
    /// Command type (`MoviesAddMovieCmd`).
    pub type_name: String,
    pub description: Option<String>,
}

/// A resource group and its commands, in registration order.
#[derive(Debug, Clone)]
pub struct GroupInfo {
    /// Group name (`Movies`).
    pub name: String,
    /// Registration id (`movies`).
    pub id: String,
    pub description: Option<String>,
    pub commands: Vec<CommandInfo>,
}

impl GroupInfo {
    fn pascal(&self) -> String {
        to_pascal_case(&self.name)
    }

    fn args_type(&self) -> String {
        format!("{}Group", self.pascal())
    }

    fn commands_type(&self) -> String {
        format!("{}Commands", self.pascal())
    }

    fn variant(command: &CommandInfo) -> String {
        to_pascal_case(&command.id)
    }
}

/// The `<namespace>/cli.rs` file.
pub struct CliRs {
    pub namespace: String,
    pub name: String,
    pub version: Version,
    pub description: Option<String>,
    pub groups: Vec<GroupInfo>,
}

impl CliRs {
    pub fn new(
        namespace: impl Into<String>,
        name: impl Into<String>,
        version: Version,
        description: Option<String>,
        groups: Vec<GroupInfo>,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            version,
            description,
            groups,
        }
    }

    fn build_cli_struct(&self) -> Struct {
        Struct::new("Cli")
            .derive("Parser")
            .derive("Debug")
            .clap_attr(ClapAttr::command_name(&self.name))
            .clap_attr(ClapAttr::command_version(self.version.to_string()))
            .clap_attr_if(
                self.description.is_some(),
                ClapAttr::command_about(self.description.as_deref().unwrap_or_default()),
            )
            .clap_attr(ClapAttr::ArgRequiredElseHelp)
            .field(Field::new("global", "GlobalArgs").clap_attr(ClapAttr::Flatten))
            .field(Field::new("command", "Commands").clap_attr(ClapAttr::Subcommand))
    }

    fn build_commands_enum(&self) -> Enum {
        self.groups.iter().fold(
            Enum::new("Commands").derive("Subcommand").derive("Debug"),
            |e, group| {
                e.variant(
                    Variant::new(group.pascal())
                        .doc_opt(group.description.as_deref())
                        .clap_attr(ClapAttr::command_name(&group.id))
                        .tuple(group.args_type()),
                )
            },
        )
    }

    fn build_dispatch_impl(&self) -> Impl {
        let match_expr = self.groups.iter().fold(Match::new("self.command"), |m, group| {
            m.arm(
                Arm::new(format!("Commands::{}(group)", group.pascal()))
                    .body("group.dispatch(self.global)"),
            )
        });

        Impl::new("Cli").method(
            Fn::new("dispatch")
                .param(Param::receiver())
                .returns("eyre::Result<()>")
                .body_match(&match_expr),
        )
    }

    /// The group's args struct, its subcommand enum, and its dispatch.
    fn build_group(&self, group: &GroupInfo) -> (Struct, Enum, Impl) {
        let args = Struct::new(group.args_type())
            .derive("Args")
            .derive("Debug")
            .clap_attr(ClapAttr::ArgRequiredElseHelp)
            .field(Field::new("command", group.commands_type()).clap_attr(ClapAttr::Subcommand));

        let commands = group.commands.iter().fold(
            Enum::new(group.commands_type())
                .derive("Subcommand")
                .derive("Debug"),
            |e, command| {
                e.variant(
                    Variant::new(GroupInfo::variant(command))
                        .doc_opt(command.description.as_deref())
                        .clap_attr(ClapAttr::command_name(&command.id))
                        .tuple(&command.type_name),
                )
            },
        );

        let match_expr = group.commands.iter().fold(Match::new("self.command"), |m, command| {
            m.arm(
                Arm::new(format!(
                    "{}::{}(command)",
                    group.commands_type(),
                    GroupInfo::variant(command)
                ))
                .body("global.execute(command)"),
            )
        });

        let dispatch = Impl::new(group.args_type()).method(
            Fn::new("dispatch")
                .param(Param::receiver())
                .param(Param::new("global", "GlobalArgs"))
                .returns("eyre::Result<()>")
                .body_match(&match_expr),
        );

        (args, commands, dispatch)
    }

    fn build_run(&self) -> Fn {
        Fn::new("run")
            .doc("Parse the command line and run the selected command.\n\nHelp and version requests print normally; any other failure prints\n`ERROR` followed by the message.")
            .body_lines([
                "let cli = match Cli::try_parse() {",
                "    Ok(cli) => cli,",
                "    Err(err) => match err.kind() {",
                "        ErrorKind::DisplayHelp",
                "        | ErrorKind::DisplayVersion",
                "        | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => err.exit(),",
                "        _ => return report(err),",
                "    },",
                "};",
                "if let Err(err) = cli.dispatch() {",
                "    report(err);",
                "}",
            ])
    }

    fn build_report(&self) -> RawCode {
        RawCode::lines([
            "fn report(err: impl std::fmt::Display) {",
            "    println!(\"ERROR\");",
            "    println!(\"{}\", err);",
            "}",
        ])
    }
}

impl GeneratedFile for CliRs {
    fn path(&self, base: &Path) -> PathBuf {
        base.join("src").join(&self.namespace).join("cli.rs")
    }

    fn rules(&self) -> FileRules {
        FileRules::always_overwrite().with_header(GENERATED_HEADER)
    }

    fn render(&self) -> String {
        let file = RustFile::new()
            .use_stmt(uses::clap_parser_subcommand())
            .use_stmt(Use::new("clap::error").symbol("ErrorKind"))
            .use_stmt(uses::base(&self.namespace, &["GlobalArgs"]))
            .use_stmt(Use::new(format!("crate::{}::commands", self.namespace)).symbol("*"))
            .add(self.build_cli_struct())
            .add(self.build_commands_enum())
            .add(self.build_dispatch_impl());

        self.groups
            .iter()
            .fold(file, |file, group| {
                let (args, commands, dispatch) = self.build_group(group);
                file.add(args).add(commands).add(dispatch)
            })
            .add(self.build_run())
            .add(self.build_report())
            .render_with_header(GENERATED_HEADER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli() -> CliRs {
        let command = |id: &str, type_name: &str| CommandInfo {
            id: id.to_string(),
            type_name: type_name.to_string(),
            description: None,
        };
        CliRs::new(
            "generated",
            "movies",
            Version::new(0, 1, 0),
            Some("Movies API".to_string()),
            vec![
                GroupInfo {
                    name: "Movies".into(),
                    id: "movies".into(),
                    description: Some("Manage movies".into()),
                    commands: vec![
                        command("add-movie", "MoviesAddMovieCmd"),
                        command("delete-movie", "MoviesDeleteMovieCmd"),
                    ],
                },
                GroupInfo {
                    name: "Reviews".into(),
                    id: "reviews".into(),
                    description: None,
                    commands: vec![command("add-review", "ReviewsAddReviewCmd")],
                },
            ],
        )
    }

    #[test]
    fn test_root_parser() {
        let code = cli().render();
        assert!(code.contains(
            "#[derive(Parser, Debug)]\n#[command(name = \"movies\")]\n#[command(version = \"0.1.0\")]\n#[command(about = \"Movies API\")]\n#[command(arg_required_else_help = true)]\npub struct Cli {"
        ));
        assert!(code.contains("    #[command(flatten)]\n    pub global: GlobalArgs,"));
        assert!(code.contains("    #[command(subcommand)]\n    pub command: Commands,"));
    }

    #[test]
    fn test_groups_in_registration_order() {
        let code = cli().render();
        let movies = code.find("Movies(MoviesGroup),").unwrap();
        let reviews = code.find("Reviews(ReviewsGroup),").unwrap();
        assert!(movies < reviews);
        assert!(code.contains("    /// Manage movies\n    #[command(name = \"movies\")]\n    Movies(MoviesGroup),"));
        assert!(code.contains("Commands::Movies(group) => group.dispatch(self.global),"));
    }

    #[test]
    fn test_group_commands() {
        let code = cli().render();
        assert!(code.contains(
            "#[derive(Args, Debug)]\n#[command(arg_required_else_help = true)]\npub struct MoviesGroup {\n    #[command(subcommand)]\n    pub command: MoviesCommands,\n}"
        ));
        let add = code.find("AddMovie(MoviesAddMovieCmd),").unwrap();
        let delete = code.find("DeleteMovie(MoviesDeleteMovieCmd),").unwrap();
        assert!(add < delete);
        assert!(code.contains("    #[command(name = \"add-movie\")]\n    AddMovie(MoviesAddMovieCmd),"));
        assert!(code.contains(
            "    pub fn dispatch(self, global: GlobalArgs) -> eyre::Result<()> {\n        match self.command {\n            MoviesCommands::AddMovie(command) => global.execute(command),"
        ));
    }

    #[test]
    fn test_errors_are_reported() {
        let code = cli().render();
        assert!(code.contains("ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => err.exit(),"));
        assert!(code.contains("    println!(\"ERROR\");\n    println!(\"{}\", err);"));
        assert!(!code.contains("eprintln!"));
        assert!(code.contains("use crate::generated::commands::*;"));
    }
}
