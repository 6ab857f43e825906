//! Classified descriptors shared by the flattening and emission passes.
//!
//! Descriptors are produced once by the type classifier and are immutable
//! afterwards. Nested types are shared through [`Rc`], so the same `Movie`
//! descriptor is reused by every field and parameter that mentions it.

use std::rc::Rc;

use crate::{
    CollectionKind, ConstructionStyle, MutationVariants, OperationKind, PrimitiveType, TypeExpr,
};

/// Classification outcome for a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// Primitive, string, or string-constructible.
    Scalar,
    /// An enumeration; flag-compatible like a scalar.
    Enum,
    /// A single-parameter collection of scalars or enums.
    ScalarCollection,
    /// A structured type with fields.
    Composite,
    /// A collection of composites, expanded as one related object.
    CompositeCollection,
}

impl TypeKind {
    /// Whether a value of this kind becomes exactly one flag.
    pub fn is_scalar_like(&self) -> bool {
        matches!(self, Self::Scalar | Self::Enum | Self::ScalarCollection)
    }
}

/// A resolved, classified type.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDescriptor {
    pub kind: TypeKind,
    /// Fully qualified Rust type, including type arguments (`Vec<String>`).
    pub qualified_name: String,
    /// Set for primitive scalars.
    pub primitive: Option<PrimitiveType>,
    /// Set for collections.
    pub collection: Option<CollectionKind>,
    /// Element type of a collection.
    pub element: Option<Rc<TypeDescriptor>>,
    /// Fields of a composite, in declaration order.
    pub fields: Vec<FieldDescriptor>,
    /// Construction contract of a composite.
    pub construction: ConstructionStyle,
    /// Per-mutation request types of a composite.
    pub variants: Option<MutationVariants>,
}

impl TypeDescriptor {
    fn base(kind: TypeKind, qualified_name: impl Into<String>) -> Self {
        Self {
            kind,
            qualified_name: qualified_name.into(),
            primitive: None,
            collection: None,
            element: None,
            fields: Vec::new(),
            construction: ConstructionStyle::default(),
            variants: None,
        }
    }

    /// A primitive scalar.
    pub fn primitive(primitive: PrimitiveType) -> Self {
        Self {
            primitive: Some(primitive),
            ..Self::base(TypeKind::Scalar, primitive.rust_name())
        }
    }

    /// A non-primitive scalar (`String`, or a string-constructible path).
    pub fn scalar(qualified_name: impl Into<String>) -> Self {
        Self::base(TypeKind::Scalar, qualified_name)
    }

    /// An enumeration.
    pub fn enumeration(qualified_name: impl Into<String>) -> Self {
        Self::base(TypeKind::Enum, qualified_name)
    }

    /// A collection of `element`; the kind follows the element's kind.
    pub fn collection(
        collection: CollectionKind,
        container: &str,
        element: Rc<TypeDescriptor>,
    ) -> Self {
        let kind = if element.kind == TypeKind::Composite {
            TypeKind::CompositeCollection
        } else {
            TypeKind::ScalarCollection
        };
        Self {
            collection: Some(collection),
            element: Some(element.clone()),
            ..Self::base(kind, format!("{}<{}>", container, element.qualified_name))
        }
    }

    /// A composite with the given fields.
    pub fn composite(
        qualified_name: impl Into<String>,
        construction: ConstructionStyle,
        fields: Vec<FieldDescriptor>,
        variants: Option<MutationVariants>,
    ) -> Self {
        Self {
            construction,
            fields,
            variants,
            ..Self::base(TypeKind::Composite, qualified_name)
        }
    }

    /// Last path segment without type arguments (`movie_client::model::Actor` -> `Actor`).
    pub fn simple_name(&self) -> &str {
        let base = self
            .qualified_name
            .split('<')
            .next()
            .unwrap_or(&self.qualified_name);
        base.rsplit("::").next().unwrap_or(base)
    }

    pub fn is_bool(&self) -> bool {
        self.primitive == Some(PrimitiveType::Bool)
    }

    /// The element descriptor of a collection, or the type itself.
    pub fn element_or_self(self: &Rc<Self>) -> Rc<TypeDescriptor> {
        self.element.clone().unwrap_or_else(|| self.clone())
    }

    /// The type to construct for a given mutation, honouring request variants.
    pub fn construction_target(&self, kind: OperationKind) -> &str {
        match (&self.variants, kind) {
            (Some(v), OperationKind::Create) => &v.create,
            (Some(v), OperationKind::Update) => &v.update,
            (None, _) => &self.qualified_name,
        }
    }
}

/// One declared field of a composite type.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    pub name: String,
    pub ty: Rc<TypeDescriptor>,
    pub is_static: bool,
    pub is_identifier: bool,
    pub is_required: bool,
    /// Empty means the field takes part in every operation.
    pub allowed_operations: Vec<OperationKind>,
    /// Inherited from the owning composite.
    pub construction: ConstructionStyle,
    pub description: Option<String>,
}

impl FieldDescriptor {
    /// Whether the allow-list admits `kind`.
    pub fn allows(&self, kind: OperationKind) -> bool {
        self.allowed_operations.is_empty() || self.allowed_operations.contains(&kind)
    }
}

/// One classified operation parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterDescriptor {
    pub name: String,
    pub ty: Rc<TypeDescriptor>,
    pub is_path_identifier: bool,
    pub required: bool,
}

/// One classified client operation.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationDescriptor {
    pub name: String,
    pub resource_group: String,
    /// Client accessor returning the group's sub-client.
    pub accessor: String,
    pub kind: OperationKind,
    pub description: Option<String>,
    pub parameters: Vec<ParameterDescriptor>,
    /// `None` for operations that return nothing.
    pub return_type: Option<TypeExpr>,
}

impl OperationDescriptor {
    pub fn is_void(&self) -> bool {
        self.return_type.is_none()
    }
}
