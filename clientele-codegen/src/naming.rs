//! Names of generated flags, locals, modules and command types.
//!
//! Flattening and reconstruction both derive variable names through
//! [`flag_variable`], so a flag and the statement reading it always agree.

use clientele_core::{to_kebab_case, to_pascal_case, to_snake_case};

/// Argument ids already taken by the base command and by clap itself.
pub const RESERVED_FLAGS: &[&str] = &[
    "help",
    "version",
    "url",
    "verbose",
    "username",
    "password",
    "key_id",
    "key_location",
    "signature_details",
    "arguments",
];

/// Locals bound by every generated command body.
const RESERVED_LOCALS: &[&str] = &["config", "result"];

/// Field of the positional multi-value argument.
pub const ARGUMENTS_VARIABLE: &str = "arguments";

/// Variable holding a flattened flag: `director` + `name` -> `director_name`.
///
/// Names that collide with a global flag get an `_arg` suffix.
pub fn flag_variable(prefix: &str, name: &str) -> String {
    let variable = if prefix.is_empty() {
        to_snake_case(name)
    } else {
        format!("{}_{}", to_snake_case(prefix), to_snake_case(name))
    };
    if RESERVED_FLAGS.contains(&variable.as_str()) {
        format!("{}_arg", variable)
    } else {
        variable
    }
}

/// Long flag for a variable (`director_name` -> `director-name`).
pub fn flag_name(variable: &str) -> String {
    to_kebab_case(variable)
}

/// Local bound to a reconstructed parameter.
pub fn local_variable(name: &str) -> String {
    let local = to_snake_case(name);
    if RESERVED_LOCALS.contains(&local.as_str()) {
        format!("{}_value", local)
    } else {
        local
    }
}

/// Local for a nested setter-style object (`movie` + `director` -> `movie_director`).
pub fn nested_local(parent: &str, field: &str) -> String {
    format!("{}_{}", parent, to_snake_case(field))
}

/// Builder method for a field.
pub fn builder_method(field: &str) -> String {
    to_snake_case(field)
}

/// Setter method for a field.
pub fn setter_method(field: &str) -> String {
    format!("set_{}", to_snake_case(field))
}

/// Command type: `Movies` + `add_movie` -> `MoviesAddMovieCmd`.
pub fn command_struct_name(group: &str, operation: &str) -> String {
    format!("{}{}Cmd", to_pascal_case(group), to_pascal_case(operation))
}

/// Identifier the command is registered under (`add-movie`).
pub fn command_id(operation: &str) -> String {
    to_kebab_case(operation)
}

/// Identifier of a resource group's subcommand (`movies`).
pub fn group_id(group: &str) -> String {
    to_kebab_case(group)
}

/// Module holding one command (`movies_add_movie`).
pub fn command_module(group: &str, operation: &str) -> String {
    format!("{}_{}", to_snake_case(group), to_snake_case(operation))
}
