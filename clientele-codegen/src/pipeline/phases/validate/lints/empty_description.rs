//! Lint for operations without a description.

use clientele_catalog::Catalog;

use super::super::Lint;
use crate::pipeline::Diagnostic;

/// Lint that warns about operations missing descriptions; their commands
/// get no help text.
pub struct EmptyDescriptionLint;

impl Lint for EmptyDescriptionLint {
    fn name(&self) -> &'static str {
        "empty-description"
    }

    fn description(&self) -> &'static str {
        "Warn about operations whose commands would have no help text"
    }

    fn check(&self, catalog: &Catalog, diagnostics: &mut Vec<Diagnostic>) {
        for resource in &catalog.resources {
            let group = catalog.group_name(resource);
            for operation in &resource.operations {
                let missing = operation
                    .description
                    .as_deref()
                    .is_none_or(|d| d.trim().is_empty());
                if missing {
                    diagnostics.push(
                        Diagnostic::warning(
                            "validate",
                            format!("operation '{}' has no description", operation.name),
                        )
                        .at(format!("resources.{}.{}", group, operation.name)),
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_and_blank_descriptions() {
        let catalog: Catalog = r#"
[cli]
name = "movies"

[client]
crate = "movie_client"

[[resources]]
name = "MoviesClient"

[[resources.operations]]
name = "add_movie"
description = "Add a movie"

[[resources.operations]]
name = "list_movies"

[[resources.operations]]
name = "delete_movie"
description = "  "
"#
        .parse()
        .unwrap();

        let mut diagnostics = Vec::new();
        EmptyDescriptionLint.check(&catalog, &mut diagnostics);

        let locations: Vec<_> = diagnostics
            .iter()
            .filter_map(|d| d.location.as_deref())
            .collect();
        assert_eq!(
            locations,
            ["resources.Movies.list_movies", "resources.Movies.delete_movie"]
        );
        assert!(diagnostics.iter().all(|d| d.severity.is_warning()));
    }
}
