use std::path::Path;

use clientele_codegen::{
    language::{GenerateResult, LanguageCodegen, PreviewFile},
    naming::group_id,
    pipeline::CompilationContext,
};
use clientele_core::{GeneratedFile, WriteResult};
use eyre::Result;

use crate::files::{
    BaseRs, CargoToml, CliRs, CommandInfo, CommandRs, CommandsMod, Dependency, GeneratedMod,
    GroupInfo, MainRs,
};

/// Version of the settings runtime generated CLIs depend on.
const RUNTIME_VERSION: &str = "0.3.0";

/// Rust code generator that produces a clap-based CLI crate.
pub struct Generator<'a> {
    ctx: &'a CompilationContext,
}

impl LanguageCodegen for Generator<'_> {
    fn language(&self) -> &'static str {
        "rust"
    }

    fn file_extension(&self) -> &'static str {
        "rs"
    }

    fn preview(&self) -> Vec<PreviewFile> {
        self.files()
            .iter()
            .map(|file| PreviewFile {
                path: relative_path(file.as_ref()),
                content: file.render(),
            })
            .collect()
    }

    fn generate(&self, output_dir: &Path) -> Result<GenerateResult> {
        let mut result = GenerateResult::default();

        for file in self.files() {
            let path = relative_path(file.as_ref());
            match file.write(output_dir)? {
                WriteResult::Written => {
                    tracing::debug!(path = %path, "wrote file");
                    result.written.push(path);
                }
                WriteResult::Skipped => {
                    tracing::debug!(path = %path, "kept existing file");
                    result.skipped.push(path);
                }
            }
        }

        tracing::info!(
            written = result.written.len(),
            skipped = result.skipped.len(),
            "generated rust cli"
        );
        Ok(result)
    }
}

impl<'a> Generator<'a> {
    pub fn new(ctx: &'a CompilationContext) -> Self {
        Self { ctx }
    }

    /// Every file of the generated crate, in write order.
    fn files(&self) -> Vec<Box<dyn GeneratedFile + 'a>> {
        let catalog = &self.ctx.catalog;
        let namespace = catalog.cli.namespace.as_str();

        let mut files: Vec<Box<dyn GeneratedFile + 'a>> = vec![
            Box::new(
                CargoToml::new(&catalog.cli.name)
                    .with_version(catalog.cli.version.clone())
                    .with_dependencies(self.dependencies()),
            ),
            Box::new(MainRs::new(namespace)),
            Box::new(GeneratedMod::new(namespace)),
            Box::new(BaseRs::new(
                namespace,
                &catalog.cli.name,
                catalog.client.crate_ident(),
                catalog.cli.auth,
            )),
            Box::new(CliRs::new(
                namespace,
                &catalog.cli.name,
                catalog.cli.version.clone(),
                catalog.cli.description.clone(),
                self.groups(),
            )),
            Box::new(CommandsMod::new(
                namespace,
                self.ctx
                    .commands
                    .iter()
                    .map(|c| c.module_name.clone())
                    .collect(),
            )),
        ];

        files.extend(self.ctx.commands.iter().map(|command| {
            Box::new(CommandRs::new(
                namespace,
                catalog.client.crate_ident(),
                command,
            )) as Box<dyn GeneratedFile + 'a>
        }));

        files
    }

    fn dependencies(&self) -> Vec<Dependency> {
        let client = &self.ctx.catalog.client;
        let client_dependency = match (&client.path, &client.version) {
            (Some(path), _) => Dependency::path(&client.crate_name, path),
            (None, Some(version)) => Dependency::version(&client.crate_name, version),
            (None, None) => Dependency::version(&client.crate_name, "*"),
        };

        let mut dependencies = vec![
            Dependency::features("clap", "4", ["derive"]),
            Dependency::version("clientele-runtime", RUNTIME_VERSION),
            Dependency::version("eyre", "0.6"),
            Dependency::features("serde", "1", ["derive"]),
            Dependency::version("serde_json", "1"),
            client_dependency,
        ];
        dependencies.extend(
            self.ctx
                .catalog
                .external_crates()
                .into_iter()
                .map(|(name, version)| Dependency::version(name, version)),
        );
        dependencies
    }

    /// Registry groups with their commands, in registration order.
    fn groups(&self) -> Vec<GroupInfo> {
        let catalog = &self.ctx.catalog;

        self.ctx
            .registry
            .groups()
            .map(|(group, _)| GroupInfo {
                name: group.to_string(),
                id: group_id(group),
                description: catalog
                    .resources
                    .iter()
                    .find(|r| catalog.group_name(r) == group)
                    .and_then(|r| r.description.clone()),
                commands: self
                    .ctx
                    .group_commands(group)
                    .map(|command| CommandInfo {
                        id: command.command_id.clone(),
                        type_name: command.command_name.clone(),
                        description: command.description.clone(),
                    })
                    .collect(),
            })
            .collect()
    }
}

fn relative_path(file: &dyn GeneratedFile) -> String {
    file.path(Path::new(""))
        .to_string_lossy()
        .replace('\\', "/")
}
