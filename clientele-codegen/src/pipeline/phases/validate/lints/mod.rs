//! Built-in lints for catalog validation.

mod duplicate_operation;
mod empty_description;
mod operation_naming;

pub use duplicate_operation::DuplicateOperationLint;
pub use empty_description::EmptyDescriptionLint;
pub use operation_naming::OperationNamingLint;
