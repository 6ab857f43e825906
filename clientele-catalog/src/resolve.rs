//! Name resolution: the catalog as a [`TypeResolver`].

use std::collections::HashMap;

use clientele_ir::{CollectionKind, MutationVariants, PrimitiveType, ResolvedType, TypeResolver};

use crate::Catalog;

const PATH_BUF: &str = "std::path::PathBuf";

#[derive(Debug, Clone)]
enum Declared {
    Enum,
    Scalar,
    Model {
        index: usize,
        variants: Option<MutationVariants>,
    },
}

#[derive(Debug, Clone)]
struct Entry {
    declared: Declared,
    path: String,
}

/// Declared types keyed by both their catalog name and their full path.
#[derive(Debug, Clone, Default)]
pub(crate) struct TypeIndex {
    entries: HashMap<String, Entry>,
}

impl TypeIndex {
    fn insert(&mut self, name: &str, entry: Entry) {
        self.entries.insert(entry.path.clone(), entry.clone());
        self.entries.insert(name.to_string(), entry);
    }
}

impl Catalog {
    /// Index every declared type. Called once after parsing.
    pub(crate) fn build_index(&mut self) {
        let model_path = self.client.model_path();
        let qualify = |name: &str, path: &Option<String>| {
            path.clone()
                .unwrap_or_else(|| format!("{}::{}", model_path, name))
        };

        let mut index = TypeIndex::default();
        for decl in &self.enums {
            index.insert(
                &decl.name,
                Entry {
                    declared: Declared::Enum,
                    path: qualify(&decl.name, &decl.path),
                },
            );
        }
        for decl in &self.scalars {
            index.insert(
                &decl.name,
                Entry {
                    declared: Declared::Scalar,
                    path: qualify(&decl.name, &decl.path),
                },
            );
        }
        for (i, decl) in self.models.iter().enumerate() {
            let path = qualify(&decl.name, &decl.path);
            let variants = mutation_variants(&path, &self.client.model_suffix);
            index.insert(
                &decl.name,
                Entry {
                    declared: Declared::Model { index: i, variants },
                    path,
                },
            );
        }
        self.index = index;
    }
}

/// `movie_client::model::MovieModel` is sent as `CreateMovie` / `UpdateMovie`
/// from the same module.
fn mutation_variants(path: &str, suffix: &str) -> Option<MutationVariants> {
    if suffix.is_empty() {
        return None;
    }
    let (module, name) = match path.rsplit_once("::") {
        Some((module, name)) => (Some(module), name),
        None => (None, path),
    };
    let base = name.strip_suffix(suffix).filter(|b| !b.is_empty())?;
    let qualify = |prefix: &str| match module {
        Some(module) => format!("{}::{}{}", module, prefix, base),
        None => format!("{}{}", prefix, base),
    };
    Some(MutationVariants {
        create: qualify("Create"),
        update: qualify("Update"),
    })
}

impl TypeResolver for Catalog {
    fn resolve(&self, name: &str) -> Option<ResolvedType<'_>> {
        if let Some(primitive) = PrimitiveType::from_name(name) {
            return Some(ResolvedType::Primitive(primitive));
        }
        match name {
            "string" | "String" | "str" | "std::string::String" => {
                return Some(ResolvedType::String);
            }
            "path" | "PathBuf" | PATH_BUF => {
                return Some(ResolvedType::StringConstructible { path: PATH_BUF });
            }
            _ => {}
        }
        if let Some((kind, container)) = CollectionKind::from_name(name) {
            return Some(ResolvedType::Collection { kind, container });
        }

        let entry = self.index.entries.get(name)?;
        Some(match &entry.declared {
            Declared::Enum => ResolvedType::Enum { path: &entry.path },
            Declared::Scalar => ResolvedType::StringConstructible { path: &entry.path },
            Declared::Model { index, variants } => ResolvedType::Composite {
                path: &entry.path,
                model: self.models.get(*index)?,
                variants: variants.as_ref(),
            },
        })
    }
}
