//! Type classification: declared type expressions to [`TypeDescriptor`]s.
//!
//! Rules are applied in order: primitives and strings are scalars, enums
//! are tagged enums, string-constructible types are scalars, single-parameter
//! collections follow their element, and declared models are composites.
//! Anything else is a gap: the caller drops the offending field or operation
//! and keeps going.

use std::{
    collections::{HashMap, HashSet},
    rc::Rc,
};

use clientele_ir::{
    CollectionKind, FieldDescriptor, ModelDecl, MutationVariants, ResolvedType, TypeDescriptor,
    TypeExpr, TypeKind, TypeResolver,
};
use thiserror::Error;

/// Why a type could not be classified.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifyError {
    #[error("type '{name}' could not be resolved")]
    Unresolved { name: String },

    #[error("array type '{ty}' has no flag representation")]
    Array { ty: String },

    #[error("'{ty}' takes {expected} type parameter(s), found {found}")]
    CollectionArity {
        ty: String,
        expected: usize,
        found: usize,
    },

    #[error("nested collection '{ty}' has no flag representation")]
    NestedCollection { ty: String },

    #[error("map type '{ty}' has two type parameters and cannot be expressed as flags")]
    Map { ty: String },

    #[error("type '{ty}' does not take type parameters")]
    UnexpectedArguments { ty: String },

    #[error("'{name}' refers to itself")]
    Recursive { name: String },
}

/// A field that was dropped while classifying a composite.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifyGap {
    /// Catalog location, e.g. `models.Movie.fields.poster`.
    pub location: String,
    pub error: ClassifyError,
}

/// Classifies type expressions against a resolver.
///
/// Descriptors are cached per expression so every mention of `Movie`
/// shares one [`Rc<TypeDescriptor>`]. Field-level failures inside a
/// composite do not fail the composite; they are collected as
/// [`ClassifyGap`]s.
///
/// A descriptor whose walk was cut short at a reference back to an
/// enclosing composite is not cached, so a model classifies the same
/// whichever model is asked for first.
pub struct TypeClassifier<'a, R: TypeResolver + ?Sized> {
    resolver: &'a R,
    cache: HashMap<String, Rc<TypeDescriptor>>,
    in_progress: HashSet<String>,
    /// Composites still in progress that a nested walk refused to re-enter.
    open_cuts: Vec<String>,
    gaps: Vec<ClassifyGap>,
}

impl<'a, R: TypeResolver + ?Sized> TypeClassifier<'a, R> {
    pub fn new(resolver: &'a R) -> Self {
        Self {
            resolver,
            cache: HashMap::new(),
            in_progress: HashSet::new(),
            open_cuts: Vec::new(),
            gaps: Vec::new(),
        }
    }

    /// Classify a type expression.
    pub fn classify(&mut self, expr: &TypeExpr) -> Result<Rc<TypeDescriptor>, ClassifyError> {
        let key = expr.to_string();
        if let Some(cached) = self.cache.get(&key) {
            return Ok(cached.clone());
        }
        let open_cuts = self.open_cuts.len();
        let descriptor = Rc::new(self.classify_uncached(expr)?);
        if self.open_cuts.len() == open_cuts {
            self.cache.insert(key, descriptor.clone());
        }
        Ok(descriptor)
    }

    /// Gaps recorded since the last call.
    pub fn take_gaps(&mut self) -> Vec<ClassifyGap> {
        std::mem::take(&mut self.gaps)
    }

    fn classify_uncached(&mut self, expr: &TypeExpr) -> Result<TypeDescriptor, ClassifyError> {
        let (name, args) = match expr {
            TypeExpr::Array(_) => {
                return Err(ClassifyError::Array {
                    ty: expr.to_string(),
                });
            }
            TypeExpr::Named { name, args } => (name, args),
        };

        let resolver = self.resolver;
        let resolved = resolver
            .resolve(name)
            .ok_or_else(|| ClassifyError::Unresolved { name: name.clone() })?;

        match resolved {
            ResolvedType::Collection { kind, container } => {
                self.classify_collection(expr, kind, container, args)
            }
            _ if !args.is_empty() => Err(ClassifyError::UnexpectedArguments {
                ty: expr.to_string(),
            }),
            ResolvedType::Primitive(primitive) => Ok(TypeDescriptor::primitive(primitive)),
            ResolvedType::String => Ok(TypeDescriptor::scalar("String")),
            ResolvedType::Enum { path } => Ok(TypeDescriptor::enumeration(path)),
            ResolvedType::StringConstructible { path } => Ok(TypeDescriptor::scalar(path)),
            ResolvedType::Composite {
                path,
                model,
                variants,
            } => self.classify_composite(path, model, variants),
        }
    }

    fn classify_collection(
        &mut self,
        expr: &TypeExpr,
        kind: CollectionKind,
        container: &str,
        args: &[TypeExpr],
    ) -> Result<TypeDescriptor, ClassifyError> {
        if kind == CollectionKind::Map {
            return Err(ClassifyError::Map {
                ty: expr.to_string(),
            });
        }
        let [arg] = args else {
            return Err(ClassifyError::CollectionArity {
                ty: expr.to_string(),
                expected: 1,
                found: args.len(),
            });
        };

        let element = self.classify(arg)?;
        match element.kind {
            TypeKind::Scalar | TypeKind::Enum | TypeKind::Composite => {
                Ok(TypeDescriptor::collection(kind, container, element))
            }
            TypeKind::ScalarCollection | TypeKind::CompositeCollection => {
                Err(ClassifyError::NestedCollection {
                    ty: expr.to_string(),
                })
            }
        }
    }

    fn classify_composite(
        &mut self,
        path: &str,
        model: &ModelDecl,
        variants: Option<&MutationVariants>,
    ) -> Result<TypeDescriptor, ClassifyError> {
        if !self.in_progress.insert(path.to_string()) {
            self.open_cuts.push(path.to_string());
            return Err(ClassifyError::Recursive {
                name: model.name.clone(),
            });
        }

        let mut fields = Vec::with_capacity(model.fields.len());
        for field in &model.fields {
            match self.classify(&field.ty) {
                Ok(ty) => fields.push(FieldDescriptor {
                    name: field.name.clone(),
                    ty,
                    is_static: field.is_static,
                    is_identifier: field.identifier,
                    is_required: field.required,
                    allowed_operations: field.operations.clone(),
                    construction: model.construction,
                    description: field.description.clone(),
                }),
                Err(error) => self.gaps.push(ClassifyGap {
                    location: format!("models.{}.fields.{}", model.name, field.name),
                    error,
                }),
            }
        }

        self.in_progress.remove(path);
        self.open_cuts.retain(|cut| cut != path);
        Ok(TypeDescriptor::composite(
            path,
            model.construction,
            fields,
            variants.cloned(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use clientele_catalog::Catalog;
    use clientele_ir::{ConstructionStyle, PrimitiveType};

    use super::*;

    const CATALOG: &str = r#"
[cli]
name = "movies"

[client]
crate = "movie_client"

[[enums]]
name = "Genre"

[[scalars]]
name = "Url"
path = "url::Url"

[[models]]
name = "Person"
construction = "builder"

[[models.fields]]
name = "name"
type = "string"

[[models]]
name = "Movie"
construction = "builder"

[[models.fields]]
name = "title"
type = "string"
required = true

[[models.fields]]
name = "genre"
type = "Genre"

[[models.fields]]
name = "director"
type = "Person"

[[models.fields]]
name = "cast"
type = "list<Person>"

[[models.fields]]
name = "poster"
type = "[u8]"

[[models.fields]]
name = "sequel"
type = "Movie"

[[models.fields]]
name = "tags"
type = "set<string>"

[[resources]]
name = "MoviesClient"

[[resources.operations]]
name = "list_movies"
"#;

    fn catalog() -> Catalog {
        CATALOG.parse().unwrap()
    }

    fn expr(s: &str) -> TypeExpr {
        s.parse().unwrap()
    }

    #[test]
    fn test_scalar_rules() {
        let catalog = catalog();
        let mut classifier = TypeClassifier::new(&catalog);

        let int = classifier.classify(&expr("int")).unwrap();
        assert_eq!(int.kind, TypeKind::Scalar);
        assert_eq!(int.primitive, Some(PrimitiveType::I64));

        let string = classifier.classify(&expr("string")).unwrap();
        assert_eq!(string.qualified_name, "String");

        let genre = classifier.classify(&expr("Genre")).unwrap();
        assert_eq!(genre.kind, TypeKind::Enum);
        assert_eq!(genre.qualified_name, "movie_client::model::Genre");

        let url = classifier.classify(&expr("Url")).unwrap();
        assert_eq!(url.kind, TypeKind::Scalar);
        assert_eq!(url.qualified_name, "url::Url");
    }

    #[test]
    fn test_collection_rules() {
        let catalog = catalog();
        let mut classifier = TypeClassifier::new(&catalog);

        let tags = classifier.classify(&expr("list<Genre>")).unwrap();
        assert_eq!(tags.kind, TypeKind::ScalarCollection);
        assert_eq!(tags.qualified_name, "Vec<movie_client::model::Genre>");

        let people = classifier.classify(&expr("list<Person>")).unwrap();
        assert_eq!(people.kind, TypeKind::CompositeCollection);

        assert!(matches!(
            classifier.classify(&expr("map<string, string>")),
            Err(ClassifyError::Map { .. })
        ));
        assert!(matches!(
            classifier.classify(&expr("list<list<string>>")),
            Err(ClassifyError::NestedCollection { .. })
        ));
        assert!(matches!(
            classifier.classify(&expr("list")),
            Err(ClassifyError::CollectionArity { found: 0, .. })
        ));
    }

    #[test]
    fn test_failures() {
        let catalog = catalog();
        let mut classifier = TypeClassifier::new(&catalog);

        assert!(matches!(
            classifier.classify(&expr("Unknown")),
            Err(ClassifyError::Unresolved { .. })
        ));
        assert!(matches!(
            classifier.classify(&expr("[u8]")),
            Err(ClassifyError::Array { .. })
        ));
        assert!(matches!(
            classifier.classify(&expr("Genre<string>")),
            Err(ClassifyError::UnexpectedArguments { .. })
        ));
    }

    #[test]
    fn test_composite_drops_gaps() {
        let catalog = catalog();
        let mut classifier = TypeClassifier::new(&catalog);

        let movie = classifier.classify(&expr("Movie")).unwrap();
        assert_eq!(movie.kind, TypeKind::Composite);
        assert_eq!(movie.construction, ConstructionStyle::Builder);

        let names: Vec<_> = movie.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["title", "genre", "director", "cast", "tags"]);
        assert!(movie.fields[0].is_required);

        let gaps = classifier.take_gaps();
        assert_eq!(gaps.len(), 2);
        assert_eq!(gaps[0].location, "models.Movie.fields.poster");
        assert!(matches!(gaps[0].error, ClassifyError::Array { .. }));
        assert!(matches!(gaps[1].error, ClassifyError::Recursive { .. }));
        assert!(classifier.take_gaps().is_empty());
    }

    #[test]
    fn test_descriptors_are_shared() {
        let catalog = catalog();
        let mut classifier = TypeClassifier::new(&catalog);

        let movie = classifier.classify(&expr("Movie")).unwrap();
        let person = classifier.classify(&expr("Person")).unwrap();
        assert!(Rc::ptr_eq(&movie.fields[2].ty, &person));
        assert!(Rc::ptr_eq(
            movie.fields[3].ty.element.as_ref().unwrap(),
            &person
        ));
    }

    const MUTUAL: &str = r#"
[cli]
name = "movies"

[client]
crate = "movie_client"

[[models]]
name = "Studio"
construction = "builder"

[[models.fields]]
name = "flagship"
type = "Movie"

[[models.fields]]
name = "name"
type = "string"

[[models]]
name = "Movie"
construction = "builder"

[[models.fields]]
name = "studio"
type = "Studio"

[[models.fields]]
name = "title"
type = "string"

[[resources]]
name = "MoviesClient"

[[resources.operations]]
name = "list_movies"
"#;

    fn field_names(descriptor: &TypeDescriptor) -> Vec<&str> {
        descriptor.fields.iter().map(|f| f.name.as_str()).collect()
    }

    #[test]
    fn test_mutual_recursion_is_order_independent() {
        let catalog: Catalog = MUTUAL.parse().unwrap();

        let mut classifier = TypeClassifier::new(&catalog);
        let studio = classifier.classify(&expr("Studio")).unwrap();
        let movie = classifier.classify(&expr("Movie")).unwrap();
        assert_eq!(field_names(&studio), ["flagship", "name"]);
        assert_eq!(field_names(&studio.fields[0].ty), ["title"]);
        assert_eq!(field_names(&movie), ["studio", "title"]);
        assert!(Rc::ptr_eq(&movie.fields[0].ty, &studio));

        let mut classifier = TypeClassifier::new(&catalog);
        let movie = classifier.classify(&expr("Movie")).unwrap();
        let studio = classifier.classify(&expr("Studio")).unwrap();
        assert_eq!(field_names(&movie), ["studio", "title"]);
        assert_eq!(field_names(&studio), ["flagship", "name"]);
    }
}
