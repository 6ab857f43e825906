//! Field flattening: composite types to ordered leaf flags.
//!
//! A composite is walked in declaration order. Scalar-like fields become
//! one flag each; composite fields recurse with the field name as the new
//! prefix; collections of composites recurse into their element with the
//! element's type name as the prefix, describing the one related object
//! that reconstruction later wraps in a single-element collection.

use std::{collections::HashMap, rc::Rc};

use clientele_core::to_snake_case;
use clientele_ir::{FieldDescriptor, OperationKind, TypeDescriptor, TypeKind};
use indexmap::IndexMap;

use crate::naming::{flag_name, flag_variable};

/// Where a flag is bound on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// `--flag-name <value>`
    Option,
    /// A bare positional argument.
    Positional,
}

/// One leaf flag of a generated command.
#[derive(Debug, Clone, PartialEq)]
pub struct FlattenedFlag {
    /// Field name on the command struct (`director_name`).
    pub variable: String,
    /// Dash-cased long flag (`director-name`).
    pub flag_name: String,
    /// Always scalar-like.
    pub source_type: Rc<TypeDescriptor>,
    pub required: bool,
    /// Field names from the composite root to this leaf.
    pub declaration_path: Vec<String>,
    pub placement: Placement,
    /// Qualified enum path, for enums and collections of enums.
    pub enum_identity: Option<String>,
    pub description: Option<String>,
}

impl FlattenedFlag {
    /// A named option for a scalar-like value.
    pub fn option(
        variable: impl Into<String>,
        source_type: Rc<TypeDescriptor>,
        required: bool,
        declaration_path: Vec<String>,
    ) -> Self {
        let variable = variable.into();
        let enum_identity = enum_identity(&source_type);
        Self {
            flag_name: flag_name(&variable),
            variable,
            source_type,
            required,
            declaration_path,
            placement: Placement::Option,
            enum_identity,
            description: None,
        }
    }

    /// A required positional argument.
    pub fn positional(variable: impl Into<String>, source_type: Rc<TypeDescriptor>) -> Self {
        Self {
            placement: Placement::Positional,
            ..Self::option(variable, source_type, true, Vec::new())
        }
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    pub fn is_positional(&self) -> bool {
        self.placement == Placement::Positional
    }

    /// Whether the command field holding this flag is an `Option`.
    pub fn is_optional_value(&self) -> bool {
        !self.required
            && self.source_type.kind != TypeKind::ScalarCollection
            && !self.source_type.is_bool()
    }
}

fn enum_identity(ty: &TypeDescriptor) -> Option<String> {
    match ty.kind {
        TypeKind::Enum => Some(ty.qualified_name.clone()),
        TypeKind::ScalarCollection => ty
            .element
            .as_ref()
            .filter(|e| e.kind == TypeKind::Enum)
            .map(|e| e.qualified_name.clone()),
        _ => None,
    }
}

/// Whether a field takes part in an operation, and if so whether it is required.
///
/// Static fields never do. Identifiers are skipped for creates and forced
/// required for updates, whatever their allow-list says.
pub fn participation(field: &FieldDescriptor, kind: OperationKind) -> Option<bool> {
    if field.is_static {
        return None;
    }
    if field.is_identifier {
        return match kind {
            OperationKind::Create => None,
            OperationKind::Update => Some(true),
        };
    }
    field.allows(kind).then_some(field.is_required)
}

/// Whether any leaf of `composite` survives filtering for `kind`.
pub fn has_participants(composite: &TypeDescriptor, kind: OperationKind) -> bool {
    composite.fields.iter().any(|field| {
        participation(field, kind).is_some()
            && match field.ty.kind {
                TypeKind::Scalar | TypeKind::Enum | TypeKind::ScalarCollection => true,
                TypeKind::Composite => has_participants(&field.ty, kind),
                TypeKind::CompositeCollection => field
                    .ty
                    .element
                    .as_ref()
                    .is_some_and(|element| has_participants(element, kind)),
            }
    })
}

/// Prefix used for the element of a collection of composites (`Person` -> `person`).
pub fn element_prefix(element: &TypeDescriptor) -> String {
    to_snake_case(element.simple_name())
}

/// Every leaf of `composite` in traversal order, duplicates included.
pub fn flatten_leaves(
    composite: &TypeDescriptor,
    prefix: &str,
    kind: OperationKind,
) -> Vec<FlattenedFlag> {
    let mut leaves = Vec::new();
    collect(composite, prefix, kind, &mut Vec::new(), &mut leaves);
    leaves
}

/// Flatten `composite` into ordered flags; the first of any same-named flags wins.
pub fn flatten(composite: &TypeDescriptor, prefix: &str, kind: OperationKind) -> Vec<FlattenedFlag> {
    let mut flags = FlagSet::new();
    for leaf in flatten_leaves(composite, prefix, kind) {
        flags.insert(leaf);
    }
    flags.into_flags()
}

fn collect(
    composite: &TypeDescriptor,
    prefix: &str,
    kind: OperationKind,
    path: &mut Vec<String>,
    out: &mut Vec<FlattenedFlag>,
) {
    for field in &composite.fields {
        let Some(required) = participation(field, kind) else {
            continue;
        };
        path.push(field.name.clone());
        match field.ty.kind {
            TypeKind::Scalar | TypeKind::Enum | TypeKind::ScalarCollection => {
                out.push(
                    FlattenedFlag::option(
                        flag_variable(prefix, &field.name),
                        field.ty.clone(),
                        required,
                        path.clone(),
                    )
                    .with_description(field.description.clone()),
                );
            }
            TypeKind::Composite => {
                if has_participants(&field.ty, kind) {
                    collect(&field.ty, &field.name, kind, path, out);
                }
            }
            TypeKind::CompositeCollection => {
                if let Some(element) = &field.ty.element
                    && has_participants(element, kind)
                {
                    collect(element, &element_prefix(element), kind, path, out);
                }
            }
        }
        path.pop();
    }
}

/// Two leaves that flattened to the same variable with different types.
#[derive(Debug, Clone, PartialEq)]
pub struct FlagConflict {
    pub variable: String,
    pub kept: Vec<String>,
    pub dropped: Vec<String>,
}

/// The flags of one command, deduplicated by variable (first wins).
///
/// Every leaf offered is counted, kept or not, so reconstruction knows
/// which variables are read more than once.
#[derive(Debug, Clone, Default)]
pub struct FlagSet {
    flags: IndexMap<String, FlattenedFlag>,
    uses: HashMap<String, usize>,
    conflicts: Vec<FlagConflict>,
}

impl FlagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a flag; returns false if one with the same variable already exists.
    pub fn insert(&mut self, flag: FlattenedFlag) -> bool {
        *self.uses.entry(flag.variable.clone()).or_default() += 1;
        match self.flags.get(&flag.variable) {
            Some(kept) => {
                if kept.source_type.qualified_name != flag.source_type.qualified_name {
                    self.conflicts.push(FlagConflict {
                        variable: flag.variable.clone(),
                        kept: kept.declaration_path.clone(),
                        dropped: flag.declaration_path,
                    });
                }
                false
            }
            None => {
                self.flags.insert(flag.variable.clone(), flag);
                true
            }
        }
    }

    pub fn get(&self, variable: &str) -> Option<&FlattenedFlag> {
        self.flags.get(variable)
    }

    /// How many leaves read this variable.
    pub fn uses(&self, variable: &str) -> usize {
        self.uses.get(variable).copied().unwrap_or(0)
    }

    pub fn conflicts(&self) -> &[FlagConflict] {
        &self.conflicts
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    pub fn into_flags(self) -> Vec<FlattenedFlag> {
        self.flags.into_values().collect()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use clientele_ir::{CollectionKind, ConstructionStyle, PrimitiveType};

    use super::*;

    pub(crate) fn field(name: &str, ty: Rc<TypeDescriptor>) -> FieldDescriptor {
        FieldDescriptor {
            name: name.to_string(),
            ty,
            is_static: false,
            is_identifier: false,
            is_required: false,
            allowed_operations: Vec::new(),
            construction: ConstructionStyle::Builder,
            description: None,
        }
    }

    pub(crate) fn string() -> Rc<TypeDescriptor> {
        Rc::new(TypeDescriptor::scalar("String"))
    }

    pub(crate) fn composite(
        name: &str,
        construction: ConstructionStyle,
        fields: Vec<FieldDescriptor>,
    ) -> Rc<TypeDescriptor> {
        let fields = fields
            .into_iter()
            .map(|f| FieldDescriptor { construction, ..f })
            .collect();
        Rc::new(TypeDescriptor::composite(
            format!("movie_client::model::{}", name),
            construction,
            fields,
            None,
        ))
    }

    /// The movie model used across engine tests: scalar fields, an
    /// update-only identifier, and builder construction.
    pub(crate) fn movie() -> Rc<TypeDescriptor> {
        let genre = Rc::new(TypeDescriptor::enumeration("movie_client::model::Genre"));
        let id = FieldDescriptor {
            is_identifier: true,
            allowed_operations: vec![OperationKind::Update],
            ..field("id", string())
        };
        let title = FieldDescriptor {
            is_required: true,
            ..field("title", string())
        };
        composite(
            "Movie",
            ConstructionStyle::Builder,
            vec![
                id,
                title,
                field("director", string()),
                field("genre", genre),
                field("year", Rc::new(TypeDescriptor::primitive(PrimitiveType::I32))),
                field("rating", Rc::new(TypeDescriptor::primitive(PrimitiveType::F64))),
            ],
        )
    }

    fn names(flags: &[FlattenedFlag]) -> Vec<&str> {
        flags.iter().map(|f| f.flag_name.as_str()).collect()
    }

    #[test]
    fn test_flatten_scalar_fields_in_order() {
        let flags = flatten(&movie(), "", OperationKind::Create);
        assert_eq!(names(&flags), ["title", "director", "genre", "year", "rating"]);
        assert!(flags[0].required);
        assert!(!flags[1].required);
        assert_eq!(
            flags[2].enum_identity.as_deref(),
            Some("movie_client::model::Genre")
        );
        assert_eq!(flags[3].declaration_path, ["year"]);
    }

    #[test]
    fn test_flatten_is_deterministic() {
        let movie = movie();
        for kind in [OperationKind::Create, OperationKind::Update] {
            assert_eq!(flatten(&movie, "", kind), flatten(&movie, "", kind));
        }
    }

    #[test]
    fn test_identifier_policy() {
        let movie = movie();

        let create = flatten(&movie, "", OperationKind::Create);
        assert!(create.iter().all(|f| f.variable != "id"));

        let update = flatten(&movie, "", OperationKind::Update);
        let id = update.iter().find(|f| f.variable == "id").unwrap();
        assert!(id.required);
        assert_eq!(id.placement, Placement::Option);
    }

    #[test]
    fn test_identifier_required_under_update_despite_allow_list() {
        let id = FieldDescriptor {
            is_identifier: true,
            allowed_operations: vec![OperationKind::Create],
            ..field("id", string())
        };
        let model = composite("Tag", ConstructionStyle::Setter, vec![id]);
        let flags = flatten(&model, "", OperationKind::Update);
        assert_eq!(names(&flags), ["id"]);
        assert!(flags[0].required);
    }

    #[test]
    fn test_allow_list_and_static_fields() {
        let created_at = FieldDescriptor {
            allowed_operations: vec![OperationKind::Create],
            ..field("created_at", string())
        };
        let kind = FieldDescriptor {
            is_static: true,
            ..field("kind", string())
        };
        let model = composite(
            "Review",
            ConstructionStyle::Setter,
            vec![created_at, kind, field("body", string())],
        );

        assert_eq!(
            names(&flatten(&model, "", OperationKind::Create)),
            ["created-at", "body"]
        );
        assert_eq!(names(&flatten(&model, "", OperationKind::Update)), ["body"]);
    }

    #[test]
    fn test_nested_composite_uses_field_name_prefix() {
        let person = composite(
            "Person",
            ConstructionStyle::Builder,
            vec![field("name", string()), field("birthYear", string())],
        );
        let model = composite(
            "Movie",
            ConstructionStyle::Builder,
            vec![field("title", string()), field("director", person)],
        );

        let flags = flatten(&model, "", OperationKind::Create);
        assert_eq!(names(&flags), ["title", "director-name", "director-birth-year"]);
        assert_eq!(flags[1].declaration_path, ["director", "name"]);
    }

    #[test]
    fn test_only_immediate_field_name_is_carried() {
        let address = composite("Address", ConstructionStyle::Setter, vec![field("city", string())]);
        let person = composite(
            "Person",
            ConstructionStyle::Setter,
            vec![field("address", address)],
        );
        let model = composite("Movie", ConstructionStyle::Setter, vec![field("director", person)]);

        let flags = flatten(&model, "", OperationKind::Create);
        assert_eq!(names(&flags), ["address-city"]);
        assert_eq!(flags[0].declaration_path, ["director", "address", "city"]);
    }

    #[test]
    fn test_composite_collection_uses_element_prefix() {
        let person = composite("Person", ConstructionStyle::Builder, vec![field("name", string())]);
        let cast = Rc::new(TypeDescriptor::collection(CollectionKind::List, "Vec", person));
        let model = composite("Movie", ConstructionStyle::Builder, vec![field("cast", cast)]);

        let flags = flatten(&model, "", OperationKind::Create);
        assert_eq!(names(&flags), ["person-name"]);
        assert_eq!(flags[0].declaration_path, ["cast", "name"]);
    }

    #[test]
    fn test_duplicate_flags_first_wins() {
        let person = composite("Person", ConstructionStyle::Builder, vec![field("name", string())]);
        let list = |p: &Rc<TypeDescriptor>| {
            Rc::new(TypeDescriptor::collection(CollectionKind::List, "Vec", p.clone()))
        };
        let required_name = FieldDescriptor {
            is_required: true,
            ..field("name", string())
        };
        let crew_member = composite("Person", ConstructionStyle::Builder, vec![required_name]);
        let model = composite(
            "Movie",
            ConstructionStyle::Builder,
            vec![field("cast", list(&person)), field("crew", list(&crew_member))],
        );

        let leaves = flatten_leaves(&model, "", OperationKind::Create);
        assert_eq!(leaves.len(), 2);

        let flags = flatten(&model, "", OperationKind::Create);
        assert_eq!(names(&flags), ["person-name"]);
        assert_eq!(flags[0].declaration_path, ["cast", "name"]);
        assert!(!flags[0].required);
    }

    #[test]
    fn test_empty_sub_object_emits_nothing() {
        let audit = FieldDescriptor {
            is_static: true,
            ..field("source", string())
        };
        let meta = composite("Meta", ConstructionStyle::Setter, vec![audit]);
        let model = composite(
            "Movie",
            ConstructionStyle::Setter,
            vec![field("title", string()), field("meta", meta.clone())],
        );

        assert!(!has_participants(&meta, OperationKind::Create));
        assert_eq!(names(&flatten(&model, "", OperationKind::Create)), ["title"]);
    }

    #[test]
    fn test_flag_set_tracks_uses_and_conflicts() {
        let mut set = FlagSet::new();
        assert!(set.insert(FlattenedFlag::option("title", string(), true, vec!["title".into()])));
        assert!(!set.insert(FlattenedFlag::option("title", string(), false, vec!["alt".into()])));
        let year = Rc::new(TypeDescriptor::primitive(PrimitiveType::I32));
        assert!(!set.insert(FlattenedFlag::option("title", year, false, vec!["other".into()])));

        assert_eq!(set.len(), 1);
        assert_eq!(set.uses("title"), 3);
        assert_eq!(set.uses("missing"), 0);
        assert_eq!(set.conflicts().len(), 1);
        assert_eq!(set.conflicts()[0].dropped, ["other"]);
        assert!(set.get("title").unwrap().required);
    }

    #[test]
    fn test_optional_value_shape() {
        let flag = FlattenedFlag::option("title", string(), false, Vec::new());
        assert!(flag.is_optional_value());

        let switch = Rc::new(TypeDescriptor::primitive(PrimitiveType::Bool));
        assert!(!FlattenedFlag::option("adult", switch, false, Vec::new()).is_optional_value());

        let tags = Rc::new(TypeDescriptor::collection(CollectionKind::Set, "BTreeSet", string()));
        assert!(!FlattenedFlag::option("tags", tags, false, Vec::new()).is_optional_value());

        let positional = FlattenedFlag::positional("id", string());
        assert!(positional.is_positional());
        assert!(!positional.is_optional_value());
    }
}
