//! Lint for operations and groups that would generate the same command.

use std::collections::HashMap;

use clientele_catalog::Catalog;

use super::super::Lint;
use crate::{
    naming::{command_id, group_id},
    pipeline::Diagnostic,
};

/// Lint that errors when two resources map to one command group, or two
/// operations of a group map to one command id.
pub struct DuplicateOperationLint;

impl Lint for DuplicateOperationLint {
    fn name(&self) -> &'static str {
        "duplicate-operation"
    }

    fn description(&self) -> &'static str {
        "Detect resources and operations that collide after case conversion"
    }

    fn check(&self, catalog: &Catalog, diagnostics: &mut Vec<Diagnostic>) {
        let mut groups: HashMap<String, String> = HashMap::new();

        for resource in &catalog.resources {
            let group = catalog.group_name(resource);
            if let Some(first) = groups.get(&group_id(&group)) {
                diagnostics.push(
                    Diagnostic::error(
                        "validate",
                        format!(
                            "resource '{}' maps to group '{}' (conflicts with '{}')",
                            resource.name, group, first
                        ),
                    )
                    .at(format!("resources.{}", group)),
                );
            } else {
                groups.insert(group_id(&group), resource.name.clone());
            }

            let mut seen: HashMap<String, &str> = HashMap::new();
            for operation in &resource.operations {
                let id = command_id(&operation.name);
                if let Some(first) = seen.get(&id) {
                    diagnostics.push(
                        Diagnostic::error(
                            "validate",
                            format!(
                                "duplicate operation '{}' (conflicts with '{}')",
                                operation.name, first
                            ),
                        )
                        .at(format!("resources.{}.{}", group, operation.name)),
                    );
                } else {
                    seen.insert(id, &operation.name);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(src: &str) -> Vec<Diagnostic> {
        let catalog: Catalog = src.parse().unwrap();
        let mut diagnostics = Vec::new();
        DuplicateOperationLint.check(&catalog, &mut diagnostics);
        diagnostics
    }

    #[test]
    fn test_no_duplicates() {
        let diagnostics = check(
            r#"
[cli]
name = "movies"

[client]
crate = "movie_client"

[[resources]]
name = "MoviesClient"

[[resources.operations]]
name = "add_movie"

[[resources]]
name = "ReviewsClient"

[[resources.operations]]
name = "add_movie"
"#,
        );

        // Same operation in different groups is fine.
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_operations_colliding_after_case_conversion() {
        let diagnostics = check(
            r#"
[cli]
name = "movies"

[client]
crate = "movie_client"

[[resources]]
name = "MoviesClient"

[[resources.operations]]
name = "add_movie"

[[resources.operations]]
name = "addMovie"
"#,
        );

        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].severity.is_error());
        assert!(diagnostics[0].message.contains("'addMovie'"));
    }

    #[test]
    fn test_groups_colliding() {
        let diagnostics = check(
            r#"
[cli]
name = "movies"

[client]
crate = "movie_client"

[[resources]]
name = "MovieReviewsClient"

[[resources.operations]]
name = "add_review"

[[resources]]
name = "Movie_ReviewsClient"

[[resources.operations]]
name = "list_reviews"
"#,
        );

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics[0].location.as_deref(),
            Some("resources.Movie_Reviews")
        );
    }
}
