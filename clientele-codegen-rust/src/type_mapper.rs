//! Rust types and clap attributes for flattened flags.

use clientele_codegen::flatten::FlattenedFlag;
use clientele_ir::{TypeDescriptor, TypeKind};

use crate::ast::ArgAttr;

/// Maps flags to the field type and `#[arg]` options of a command struct.
#[derive(Debug, Clone, Copy, Default)]
pub struct RustTypeMapper;

impl RustTypeMapper {
    /// Rust spelling of a scalar-like type.
    pub fn map_type(&self, ty: &TypeDescriptor) -> String {
        match ty.kind {
            TypeKind::ScalarCollection => {
                let element = ty
                    .element
                    .as_ref()
                    .map(|e| self.map_type(e))
                    .unwrap_or_else(|| "String".to_string());
                format!("Vec<{}>", element)
            }
            _ => ty.qualified_name.clone(),
        }
    }

    /// Field type on the command struct.
    ///
    /// Switches and repeated flags are never wrapped: absence is `false` or
    /// an empty list.
    pub fn flag_type(&self, flag: &FlattenedFlag) -> String {
        let ty = self.map_type(&flag.source_type);
        if flag.is_optional_value() {
            format!("Option<{}>", ty)
        } else {
            ty
        }
    }

    /// `#[arg(...)]` options for a flag.
    pub fn arg_attr(&self, flag: &FlattenedFlag) -> ArgAttr {
        let mut attr = ArgAttr::new();
        let is_list = flag.source_type.kind == TypeKind::ScalarCollection;

        if flag.is_positional() {
            if is_list {
                attr = attr.required().min_values(1);
            }
            attr = attr.value_name(flag.variable.to_uppercase());
        } else {
            attr = attr.long();
            if is_list && flag.required {
                attr = attr.required();
            }
        }

        match &flag.enum_identity {
            Some(identity) => attr.value_name(identity),
            None => attr,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use clientele_ir::{CollectionKind, PrimitiveType};

    use super::*;

    fn string() -> Rc<TypeDescriptor> {
        Rc::new(TypeDescriptor::scalar("String"))
    }

    fn list_of(element: Rc<TypeDescriptor>) -> Rc<TypeDescriptor> {
        Rc::new(TypeDescriptor::collection(CollectionKind::List, "Vec", element))
    }

    #[test]
    fn test_required_and_optional_scalars() {
        let m = RustTypeMapper;
        let title = FlattenedFlag::option("title", string(), true, vec!["title".into()]);
        let year = FlattenedFlag::option(
            "year",
            Rc::new(TypeDescriptor::primitive(PrimitiveType::I32)),
            false,
            vec!["year".into()],
        );
        assert_eq!(m.flag_type(&title), "String");
        assert_eq!(m.flag_type(&year), "Option<i32>");
        assert_eq!(m.arg_attr(&title).to_string(), "arg(long)");
    }

    #[test]
    fn test_bool_is_a_switch() {
        let spoiler = FlattenedFlag::option(
            "spoiler",
            Rc::new(TypeDescriptor::primitive(PrimitiveType::Bool)),
            false,
            vec!["spoiler".into()],
        );
        assert_eq!(RustTypeMapper.flag_type(&spoiler), "bool");
    }

    #[test]
    fn test_scalar_collection_is_repeated() {
        let m = RustTypeMapper;
        let set = Rc::new(TypeDescriptor::collection(
            CollectionKind::Set,
            "std::collections::BTreeSet",
            string(),
        ));
        let tags = FlattenedFlag::option("tags", set, false, vec!["tags".into()]);
        assert_eq!(m.flag_type(&tags), "Vec<String>");
        assert_eq!(m.arg_attr(&tags).to_string(), "arg(long)");

        let required = FlattenedFlag::option("ids", list_of(string()), true, vec!["ids".into()]);
        assert_eq!(m.arg_attr(&required).to_string(), "arg(long, required = true)");
    }

    #[test]
    fn test_enum_records_identity() {
        let genre = FlattenedFlag::option(
            "genre",
            Rc::new(TypeDescriptor::enumeration("movie_client::model::Genre")),
            false,
            vec!["genre".into()],
        );
        assert_eq!(
            RustTypeMapper.flag_type(&genre),
            "Option<movie_client::model::Genre>"
        );
        assert_eq!(
            RustTypeMapper.arg_attr(&genre).to_string(),
            "arg(long, value_name = \"movie_client::model::Genre\")"
        );
    }

    #[test]
    fn test_positionals() {
        let m = RustTypeMapper;
        let id = FlattenedFlag::positional("movie_id", string());
        assert_eq!(m.flag_type(&id), "String");
        assert_eq!(m.arg_attr(&id).to_string(), "arg(value_name = \"MOVIE_ID\")");

        let arguments = FlattenedFlag::positional("arguments", list_of(string()));
        assert_eq!(m.flag_type(&arguments), "Vec<String>");
        assert_eq!(
            m.arg_attr(&arguments).to_string(),
            "arg(required = true, num_args = 1.., value_name = \"ARGUMENTS\")"
        );
    }
}
