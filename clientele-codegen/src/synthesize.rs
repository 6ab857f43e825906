//! Command synthesis: one client operation to one generated command.

use std::rc::Rc;

use clientele_core::to_snake_case;
use clientele_ir::{
    CollectionKind, OperationDescriptor, ParameterDescriptor, TypeDescriptor, TypeKind,
};

use crate::{
    builder::{BuilderSpec, Constructor, Statement, Value},
    flatten::{FlagConflict, FlagSet, FlattenedFlag, element_prefix, flatten_leaves},
    naming::{
        ARGUMENTS_VARIABLE, command_id, command_module, command_struct_name, flag_variable,
        local_variable,
    },
    reconstruct::Reconstructor,
};

/// Local the operation's return value is bound to.
pub const RESULT_LOCAL: &str = "result";

/// Local holding the client configuration built by the base command.
pub const CONFIG_LOCAL: &str = "config";

/// Function the generated base module exposes for printing results.
pub const PRINT_RESULT: &str = "print_result";

/// One synthesized command.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedCommand {
    /// Type name (`MoviesAddMovieCmd`).
    pub command_name: String,
    /// Registration id (`add-movie`).
    pub command_id: String,
    /// Module the command is written to (`movies_add_movie`).
    pub module_name: String,
    pub resource_group: String,
    pub operation: String,
    pub description: Option<String>,
    /// Positionals first, then options in parameter order.
    pub flags: Vec<FlattenedFlag>,
    /// Statements building call arguments.
    pub statements: Vec<Statement>,
    /// The client call, ending in `?`.
    pub invocation: Value,
    /// Statements running the invocation and handling its result.
    pub result_handling: Vec<Statement>,
}

impl GeneratedCommand {
    pub fn positionals(&self) -> impl Iterator<Item = &FlattenedFlag> {
        self.flags.iter().filter(|f| f.is_positional())
    }

    pub fn options(&self) -> impl Iterator<Item = &FlattenedFlag> {
        self.flags.iter().filter(|f| !f.is_positional())
    }

    /// Whether the operation's result is printed.
    pub fn prints_result(&self) -> bool {
        self.result_handling.len() > 1
    }
}

/// A synthesized command plus the flag collisions met along the way.
#[derive(Debug, Clone)]
pub struct Synthesis {
    pub command: GeneratedCommand,
    pub conflicts: Vec<FlagConflict>,
}

/// Synthesizes commands that call into one client type.
pub struct CommandSynthesizer {
    client_path: String,
}

impl CommandSynthesizer {
    /// `client_path` is the client entry type, constructed with `new(config)`.
    pub fn new(client_path: impl Into<String>) -> Self {
        Self {
            client_path: client_path.into(),
        }
    }

    pub fn synthesize(&self, operation: &OperationDescriptor) -> Synthesis {
        let path_params: Vec<&ParameterDescriptor> = operation
            .parameters
            .iter()
            .filter(|p| p.is_path_identifier)
            .collect();
        let multiple_paths = path_params.len() > 1;

        let flags = collect_flags(operation, &path_params);
        let reconstructor = Reconstructor::new(operation.kind, &flags);

        let mut statements = Vec::new();
        let mut args = Vec::with_capacity(operation.parameters.len());
        for param in &operation.parameters {
            let value = if param.is_path_identifier && multiple_paths {
                let index = path_params
                    .iter()
                    .position(|p| p.name == param.name)
                    .unwrap_or_default();
                let local = local_variable(&param.name);
                statements.push(Statement::let_(
                    &local,
                    Value::Positional {
                        source: Box::new(Value::flag(ARGUMENTS_VARIABLE)),
                        index,
                        name: param.name.clone(),
                        target: param.ty.qualified_name.clone(),
                    },
                ));
                optional_param(param, Value::ident(local))
            } else {
                self.argument(param, &reconstructor, &mut statements, operation)
            };
            args.push(value);
        }

        let invocation = Value::builder(
            BuilderSpec::with_constructor(Constructor::static_method_args(
                &self.client_path,
                "new",
                vec![Value::ident(CONFIG_LOCAL)],
            ))
            .call(&operation.accessor)
            .call_args(to_snake_case(&operation.name), args)
            .try_(),
        );

        let result_handling = if operation.is_void() {
            vec![Statement::expr(invocation.clone())]
        } else {
            vec![
                Statement::let_(RESULT_LOCAL, invocation.clone()),
                Statement::expr(
                    Value::call(PRINT_RESULT, vec![Value::ident(RESULT_LOCAL).borrow()]).try_(),
                ),
            ]
        };

        let conflicts = flags.conflicts().to_vec();
        let command = GeneratedCommand {
            command_name: command_struct_name(&operation.resource_group, &operation.name),
            command_id: command_id(&operation.name),
            module_name: command_module(&operation.resource_group, &operation.name),
            resource_group: operation.resource_group.clone(),
            operation: operation.name.clone(),
            description: operation.description.clone(),
            flags: flags.into_flags(),
            statements,
            invocation,
            result_handling,
        };

        Synthesis { command, conflicts }
    }

    fn argument(
        &self,
        param: &ParameterDescriptor,
        reconstructor: &Reconstructor<'_>,
        statements: &mut Vec<Statement>,
        operation: &OperationDescriptor,
    ) -> Value {
        match param.ty.kind {
            TypeKind::Scalar | TypeKind::Enum | TypeKind::ScalarCollection => reconstructor
                .read_flag(&flag_variable("", &param.name), &param.ty, !param.required),
            TypeKind::Composite => {
                let local = local_variable(&param.name);
                statements.extend(reconstructor.emit_construction(&param.ty, "", &local));
                optional_param(param, Value::ident(local))
            }
            TypeKind::CompositeCollection => {
                let local = local_variable(&param.name);
                let element = param.ty.element_or_self();
                statements.extend(reconstructor.emit_construction(
                    &element,
                    &element_prefix(&element),
                    &local,
                ));
                tracing::debug!(
                    operation = %operation.name,
                    parameter = %param.name,
                    "collection of composites collapsed to a single element"
                );
                let kind = param.ty.collection.unwrap_or(CollectionKind::List);
                Value::collection(kind, vec![Value::ident(local)])
            }
        }
    }
}

fn optional_param(param: &ParameterDescriptor, value: Value) -> Value {
    if param.required { value } else { value.some() }
}

/// Positionals first, then every option leaf in parameter order.
fn collect_flags(operation: &OperationDescriptor, path_params: &[&ParameterDescriptor]) -> FlagSet {
    let mut flags = FlagSet::new();

    match path_params {
        [] => {}
        [single] => {
            flags.insert(FlattenedFlag::positional(
                flag_variable("", &single.name),
                single.ty.clone(),
            ));
        }
        many => {
            let names: Vec<&str> = many.iter().map(|p| p.name.as_str()).collect();
            let strings = Rc::new(TypeDescriptor::collection(
                CollectionKind::List,
                "Vec",
                Rc::new(TypeDescriptor::scalar("String")),
            ));
            flags.insert(
                FlattenedFlag::positional(ARGUMENTS_VARIABLE, strings)
                    .with_description(Some(format!("Values for {}", names.join(", ")))),
            );
        }
    }

    for param in operation.parameters.iter().filter(|p| !p.is_path_identifier) {
        match param.ty.kind {
            TypeKind::Scalar | TypeKind::Enum | TypeKind::ScalarCollection => {
                flags.insert(FlattenedFlag::option(
                    flag_variable("", &param.name),
                    param.ty.clone(),
                    param.required,
                    vec![param.name.clone()],
                ));
            }
            TypeKind::Composite => {
                for leaf in flatten_leaves(&param.ty, "", operation.kind) {
                    flags.insert(leaf);
                }
            }
            TypeKind::CompositeCollection => {
                let element = param.ty.element_or_self();
                for leaf in flatten_leaves(&element, &element_prefix(&element), operation.kind) {
                    flags.insert(leaf);
                }
            }
        }
    }

    flags
}
