//! Reconstruction: statements that rebuild composites from flag values.
//!
//! This is the mirror of [`crate::flatten`]: the same filtered traversal,
//! producing a builder chain (`Type::builder().field(v)...build()`) or a
//! default-then-setters sequence per composite, as the type declares.

use clientele_ir::{
    CollectionKind, ConstructionStyle, FieldDescriptor, OperationKind, TypeDescriptor, TypeKind,
};

use crate::{
    builder::{BuilderSpec, Constructor, Statement, Value},
    flatten::{FlagSet, element_prefix, has_participants, participation},
    naming::{builder_method, flag_variable, nested_local, setter_method},
};

/// Emits reconstruction statements against the flags of one command.
pub struct Reconstructor<'a> {
    kind: OperationKind,
    flags: &'a FlagSet,
}

impl<'a> Reconstructor<'a> {
    pub fn new(kind: OperationKind, flags: &'a FlagSet) -> Self {
        Self { kind, flags }
    }

    /// Statements that leave `composite`, rebuilt from flags, bound to `local`.
    pub fn emit_construction(
        &self,
        composite: &TypeDescriptor,
        prefix: &str,
        local: &str,
    ) -> Vec<Statement> {
        let (mut statements, value) = self.construct(composite, prefix, local);
        if composite.construction == ConstructionStyle::Builder {
            statements.push(Statement::let_(local, value));
        }
        statements
    }

    /// Read a flag as a value of type `ty`.
    ///
    /// The surviving flag may come from a different leaf than the one being
    /// rebuilt, so optionality is adapted here: a required flag feeding an
    /// optional slot is wrapped in `Some`, an optional flag feeding a
    /// required slot becomes a usage error when absent.
    pub fn read_flag(&self, variable: &str, ty: &TypeDescriptor, optional: bool) -> Value {
        let mut value = Value::flag(variable);
        let Some(flag) = self.flags.get(variable) else {
            return value;
        };
        if self.flags.uses(variable) > 1 && flag.source_type.primitive.is_none() {
            value = value.cloned();
        }

        match ty.kind {
            TypeKind::ScalarCollection => match ty.collection {
                Some(kind) if !kind.is_list() => value.collected(),
                _ => value,
            },
            _ if ty.is_bool() => value,
            _ => match (flag.is_optional_value(), optional) {
                (false, true) => value.some(),
                (true, false) => value.require(&flag.flag_name),
                _ => value,
            },
        }
    }

    fn construct(
        &self,
        composite: &TypeDescriptor,
        prefix: &str,
        local: &str,
    ) -> (Vec<Statement>, Value) {
        let target = composite.construction_target(self.kind);
        let mut statements = Vec::new();

        match composite.construction {
            ConstructionStyle::Builder => {
                let mut spec =
                    BuilderSpec::with_constructor(Constructor::static_method(target, "builder"));
                for field in &composite.fields {
                    if let Some(value) = self.field_value(field, prefix, local, &mut statements) {
                        spec = spec.call_arg(builder_method(&field.name), value);
                    }
                }
                (statements, Value::builder(spec.terminal_method("build")))
            }
            ConstructionStyle::Setter => {
                statements.push(Statement::let_mut(
                    local,
                    Value::call(format!("{}::default", target), Vec::new()),
                ));
                for field in &composite.fields {
                    if let Some(value) = self.field_value(field, prefix, local, &mut statements) {
                        statements.push(Statement::expr(
                            Value::ident(local).method_args(setter_method(&field.name), vec![value]),
                        ));
                    }
                }
                (statements, Value::ident(local))
            }
        }
    }

    fn field_value(
        &self,
        field: &FieldDescriptor,
        prefix: &str,
        local: &str,
        statements: &mut Vec<Statement>,
    ) -> Option<Value> {
        participation(field, self.kind)?;

        match field.ty.kind {
            TypeKind::Scalar | TypeKind::Enum | TypeKind::ScalarCollection => Some(self.read_flag(
                &flag_variable(prefix, &field.name),
                &field.ty,
                !field.is_required,
            )),
            TypeKind::Composite => {
                if !has_participants(&field.ty, self.kind) {
                    return None;
                }
                let (nested, value) =
                    self.construct(&field.ty, &field.name, &nested_local(local, &field.name));
                statements.extend(nested);
                Some(value)
            }
            TypeKind::CompositeCollection => {
                let element = field
                    .ty
                    .element
                    .as_ref()
                    .filter(|element| has_participants(element, self.kind))?;
                let (nested, value) = self.construct(
                    element,
                    &element_prefix(element),
                    &nested_local(local, &field.name),
                );
                statements.extend(nested);
                let kind = field.ty.collection.unwrap_or(CollectionKind::List);
                Some(Value::collection(kind, vec![value]))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use clientele_ir::{MutationVariants, PrimitiveType};

    use super::*;
    use crate::{
        builder::MethodCall,
        flatten::{
            FlattenedFlag, flatten_leaves,
            tests::{composite, field, movie, string},
        },
    };

    fn flags_for(model: &TypeDescriptor, kind: OperationKind) -> FlagSet {
        let mut flags = FlagSet::new();
        for leaf in flatten_leaves(model, "", kind) {
            flags.insert(leaf);
        }
        flags
    }

    fn builder_calls(statement: &Statement) -> &[MethodCall] {
        match statement.value() {
            Value::Builder(spec) => &spec.calls,
            other => panic!("expected a builder, got {:?}", other),
        }
    }

    #[test]
    fn test_builder_chain_mirrors_flags() {
        let movie = movie();
        let flags = flags_for(&movie, OperationKind::Create);
        let statements =
            Reconstructor::new(OperationKind::Create, &flags).emit_construction(&movie, "", "movie");

        assert_eq!(statements.len(), 1);
        assert_eq!(statements[0].binding(), Some("movie"));

        let Value::Builder(spec) = statements[0].value() else {
            panic!("expected a builder");
        };
        assert_eq!(
            spec.constructor,
            Constructor::static_method("movie_client::model::Movie", "builder")
        );
        assert_eq!(spec.terminal.method.as_deref(), Some("build"));

        // Every flattened flag is read by exactly the field it came from.
        let calls = builder_calls(&statements[0]);
        let flattened = flags.clone().into_flags();
        assert_eq!(calls.len(), flattened.len());
        for (call, flag) in calls.iter().zip(&flattened) {
            assert_eq!(call.name, flag.declaration_path.join("_"));
            assert!(call.args[0].reads_flag(&flag.variable));
        }
        assert_eq!(calls[0].args, [Value::flag("title")]);
        assert_eq!(calls[1].args, [Value::flag("director")]);
    }

    #[test]
    fn test_update_identifier_is_wrapped() {
        let movie = movie();
        let flags = flags_for(&movie, OperationKind::Update);
        let statements =
            Reconstructor::new(OperationKind::Update, &flags).emit_construction(&movie, "", "movie");

        let calls = builder_calls(&statements[0]);
        assert_eq!(calls[0].name, "id");
        assert_eq!(calls[0].args, [Value::flag("id").some()]);
    }

    #[test]
    fn test_setter_style() {
        let required_title = FieldDescriptor {
            is_required: true,
            ..field("title", string())
        };
        let review = composite(
            "Review",
            ConstructionStyle::Setter,
            vec![required_title, field("body", string())],
        );
        let flags = flags_for(&review, OperationKind::Create);
        let statements = Reconstructor::new(OperationKind::Create, &flags)
            .emit_construction(&review, "", "review");

        assert_eq!(
            statements,
            vec![
                Statement::let_mut(
                    "review",
                    Value::call("movie_client::model::Review::default", Vec::new())
                ),
                Statement::expr(
                    Value::ident("review").method_args("set_title", vec![Value::flag("title")])
                ),
                Statement::expr(
                    Value::ident("review").method_args("set_body", vec![Value::flag("body")])
                ),
            ]
        );
    }

    #[test]
    fn test_nested_setter_local_named_by_path() {
        let person = composite(
            "Person",
            ConstructionStyle::Setter,
            vec![field("name", string())],
        );
        let model = composite(
            "Movie",
            ConstructionStyle::Setter,
            vec![field("director", person)],
        );
        let flags = flags_for(&model, OperationKind::Create);
        let statements =
            Reconstructor::new(OperationKind::Create, &flags).emit_construction(&model, "", "movie");

        let bindings: Vec<_> = statements.iter().filter_map(|s| s.binding()).collect();
        assert_eq!(bindings, ["movie", "movie_director"]);
        assert_eq!(
            statements.last(),
            Some(&Statement::expr(Value::ident("movie").method_args(
                "set_director",
                vec![Value::ident("movie_director")]
            )))
        );
        assert!(statements[2].value().reads_flag("director_name"));
    }

    #[test]
    fn test_nested_builder_is_inlined() {
        let person = composite(
            "Person",
            ConstructionStyle::Builder,
            vec![field("name", string())],
        );
        let model = composite(
            "Movie",
            ConstructionStyle::Builder,
            vec![field("director", person)],
        );
        let flags = flags_for(&model, OperationKind::Create);
        let statements =
            Reconstructor::new(OperationKind::Create, &flags).emit_construction(&model, "", "movie");

        assert_eq!(statements.len(), 1);
        let calls = builder_calls(&statements[0]);
        assert_eq!(calls[0].name, "director");
        assert!(matches!(calls[0].args[0], Value::Builder(_)));
        assert!(calls[0].args[0].reads_flag("director_name"));
    }

    #[test]
    fn test_composite_collection_is_single_element() {
        let person = composite("Person", ConstructionStyle::Builder, vec![field("name", string())]);
        let cast = Rc::new(TypeDescriptor::collection(CollectionKind::List, "Vec", person));
        let model = composite("Movie", ConstructionStyle::Builder, vec![field("cast", cast)]);
        let flags = flags_for(&model, OperationKind::Create);
        let statements =
            Reconstructor::new(OperationKind::Create, &flags).emit_construction(&model, "", "movie");

        let calls = builder_calls(&statements[0]);
        match &calls[0].args[0] {
            Value::Collection { kind, items } => {
                assert_eq!(*kind, CollectionKind::List);
                assert_eq!(items.len(), 1);
                assert!(items[0].reads_flag("person_name"));
            }
            other => panic!("expected a collection, got {:?}", other),
        }
    }

    #[test]
    fn test_shared_flag_is_cloned() {
        let person = composite("Person", ConstructionStyle::Builder, vec![field("name", string())]);
        let list = Rc::new(TypeDescriptor::collection(CollectionKind::List, "Vec", person));
        let model = composite(
            "Movie",
            ConstructionStyle::Builder,
            vec![field("cast", list.clone()), field("crew", list)],
        );
        let flags = flags_for(&model, OperationKind::Create);
        assert_eq!(flags.len(), 1);
        assert_eq!(flags.uses("person_name"), 2);

        let statements =
            Reconstructor::new(OperationKind::Create, &flags).emit_construction(&model, "", "movie");
        let calls = builder_calls(&statements[0]);
        let Value::Collection { items, .. } = &calls[1].args[0] else {
            panic!("expected a collection");
        };
        let Value::Builder(inner) = &items[0] else {
            panic!("expected a builder");
        };
        assert_eq!(inner.calls[0].args, [Value::flag("person_name").cloned()]);
    }

    #[test]
    fn test_optional_flag_feeding_required_field() {
        let mut flags = FlagSet::new();
        flags.insert(FlattenedFlag::option("title", string(), false, vec!["title".into()]));
        let title = FieldDescriptor {
            is_required: true,
            ..field("title", string())
        };
        let model = composite("Movie", ConstructionStyle::Builder, vec![title]);
        for leaf in flatten_leaves(&model, "", OperationKind::Create) {
            flags.insert(leaf);
        }

        let statements =
            Reconstructor::new(OperationKind::Create, &flags).emit_construction(&model, "", "movie");
        let calls = builder_calls(&statements[0]);
        assert_eq!(
            calls[0].args,
            [Value::flag("title").cloned().require("title")]
        );
    }

    #[test]
    fn test_collections_and_switches() {
        let tags = Rc::new(TypeDescriptor::collection(
            CollectionKind::Set,
            "std::collections::BTreeSet",
            string(),
        ));
        let adult = Rc::new(TypeDescriptor::primitive(PrimitiveType::Bool));
        let model = composite(
            "Movie",
            ConstructionStyle::Builder,
            vec![field("tags", tags), field("adult", adult)],
        );
        let flags = flags_for(&model, OperationKind::Create);
        let statements =
            Reconstructor::new(OperationKind::Create, &flags).emit_construction(&model, "", "movie");

        let calls = builder_calls(&statements[0]);
        assert_eq!(calls[0].args, [Value::flag("tags").collected()]);
        assert_eq!(calls[1].args, [Value::flag("adult")]);
    }

    #[test]
    fn test_mutation_variant_target() {
        let model = Rc::new(TypeDescriptor::composite(
            "movie_client::model::MovieModel",
            ConstructionStyle::Setter,
            vec![FieldDescriptor {
                construction: ConstructionStyle::Setter,
                ..field("title", string())
            }],
            Some(MutationVariants {
                create: "movie_client::model::CreateMovie".to_string(),
                update: "movie_client::model::UpdateMovie".to_string(),
            }),
        ));
        let flags = flags_for(&model, OperationKind::Update);
        let statements =
            Reconstructor::new(OperationKind::Update, &flags).emit_construction(&model, "", "movie");
        assert_eq!(
            statements[0],
            Statement::let_mut(
                "movie",
                Value::call("movie_client::model::UpdateMovie::default", Vec::new())
            )
        );
    }
}
