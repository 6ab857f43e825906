//! Lint for operation naming conventions.

use clientele_catalog::Catalog;

use super::super::Lint;
use crate::pipeline::Diagnostic;

/// Lint that warns about operation names that aren't snake_case.
///
/// Operations name client methods, so `add_movie` is expected. Other
/// spellings still work, since command ids and modules are derived by case
/// conversion, but the generated call would not match a Rust client.
pub struct OperationNamingLint;

impl Lint for OperationNamingLint {
    fn name(&self) -> &'static str {
        "operation-naming"
    }

    fn description(&self) -> &'static str {
        "Check operation names follow snake_case conventions"
    }

    fn check(&self, catalog: &Catalog, diagnostics: &mut Vec<Diagnostic>) {
        for resource in &catalog.resources {
            let group = catalog.group_name(resource);
            for operation in &resource.operations {
                if !is_snake_case(&operation.name) {
                    diagnostics.push(
                        Diagnostic::warning(
                            "validate",
                            format!(
                                "operation '{}' should use snake_case (e.g., 'add_movie' not 'addMovie')",
                                operation.name
                            ),
                        )
                        .at(format!("resources.{}.{}", group, operation.name)),
                    );
                }
            }
        }
    }
}

fn is_snake_case(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_lowercase() => {}
        _ => return false,
    }
    let mut prev_underscore = false;
    for c in chars {
        if c == '_' {
            if prev_underscore {
                return false;
            }
            prev_underscore = true;
        } else if c.is_ascii_lowercase() || c.is_ascii_digit() {
            prev_underscore = false;
        } else {
            return false;
        }
    }
    !prev_underscore
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_snake_case() {
        assert!(is_snake_case("add_movie"));
        assert!(is_snake_case("list"));
        assert!(is_snake_case("get_v2_movie"));

        assert!(!is_snake_case(""));
        assert!(!is_snake_case("addMovie"));
        assert!(!is_snake_case("AddMovie"));
        assert!(!is_snake_case("add-movie"));
        assert!(!is_snake_case("add__movie"));
        assert!(!is_snake_case("add_"));
        assert!(!is_snake_case("_add"));
    }

    #[test]
    fn test_camel_case_operation_warns() {
        let catalog: Catalog = r#"
[cli]
name = "movies"

[client]
crate = "movie_client"

[[resources]]
name = "MoviesClient"

[[resources.operations]]
name = "addMovie"

[[resources.operations]]
name = "list_movies"
"#
        .parse()
        .unwrap();

        let mut diagnostics = Vec::new();
        OperationNamingLint.check(&catalog, &mut diagnostics);

        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].severity.is_warning());
        assert_eq!(
            diagnostics[0].location.as_deref(),
            Some("resources.Movies.addMovie")
        );
    }
}
