//! Catalog parsing from files and strings.

use std::{collections::HashSet, path::Path, str::FromStr};

use miette::SourceSpan;

use crate::{
    Catalog, Error, Result,
    error::SourceContext,
    validate::{ParseContext, find_table_span},
};

/// Default catalog file name.
pub const CATALOG_FILE: &str = "clientele.toml";

impl FromStr for Catalog {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_catalog(s, CATALOG_FILE)
    }
}

impl Catalog {
    /// Parse a catalog file from the given path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        parse_catalog(&content, &path.display().to_string())
    }

    /// Parse a catalog from a string with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        parse_catalog(content, filename)
    }
}

fn parse_catalog(content: &str, filename: &str) -> Result<Catalog> {
    let source_ctx = SourceContext::new(content, filename);
    let mut catalog: Catalog = toml::from_str(content).map_err(|e| source_ctx.parse_error(e))?;
    validate_catalog(&catalog, content, filename)?;
    catalog.build_index();
    Ok(catalog)
}

/// Structural checks: every failure here aborts generation.
fn validate_catalog(catalog: &Catalog, src: &str, filename: &str) -> Result<()> {
    let ctx = ParseContext::new(src, filename);
    let source = ctx.source_context();

    if catalog.client.crate_name.trim().is_empty() {
        return Err(source.missing_client_error(find_table_span(src, "client")));
    }
    if catalog.resources.is_empty() {
        return Err(source.no_resources_error());
    }

    ctx.validate_name(&catalog.cli.namespace, "namespace")?;
    ctx.validate_type_name(&catalog.client.name, "client")?;

    let mut seen = HashSet::new();
    let type_names = catalog
        .enums
        .iter()
        .map(|e| (e.name.as_str(), "enum"))
        .chain(catalog.scalars.iter().map(|s| (s.name.as_str(), "scalar")))
        .chain(catalog.models.iter().map(|m| (m.name.as_str(), "model")));
    for (name, kind) in type_names {
        ctx.validate_type_name(name, kind)?;
        if !seen.insert(name) {
            let (first, second) = duplicate_spans(src, name);
            return Err(source.duplicate_type_error(name, first, second));
        }
    }

    for model in &catalog.models {
        let model_ctx = ctx.push(&model.name);
        for field in &model.fields {
            model_ctx.validate_name(&field.name, "field")?;
        }
    }

    let mut groups = HashSet::new();
    for resource in &catalog.resources {
        ctx.validate_type_name(&resource.name, "resource")?;
        if resource.operations.is_empty() {
            return Err(
                source.empty_resource_error(&resource.name, ctx.find_span(&resource.name))
            );
        }
        let group = catalog.group_name(resource);
        if !groups.insert(group.clone()) {
            return Err(source.validation_error(
                format!(
                    "resource '{}' maps to group '{}', which is already taken",
                    resource.name, group
                ),
                ctx.find_span(&resource.name),
            ));
        }
        if let Some(accessor) = &resource.accessor {
            ctx.push(&resource.name).validate_name(accessor, "accessor")?;
        }

        let resource_ctx = ctx.push(&resource.name);
        for operation in &resource.operations {
            resource_ctx.validate_name(&operation.name, "operation")?;
            let op_ctx = resource_ctx.push(&operation.name);
            for param in &operation.params {
                op_ctx.validate_name(&param.name, "parameter")?;
            }
        }
    }

    Ok(())
}

/// Spans of the first two `name = "..."` occurrences of a duplicated name.
fn duplicate_spans(src: &str, name: &str) -> (Option<SourceSpan>, Option<SourceSpan>) {
    let pattern = format!("name = \"{}\"", name);
    let mut positions = src
        .match_indices(&pattern)
        .map(|(pos, _)| SourceSpan::from((pos + 8, name.len())));
    (positions.next(), positions.next())
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
[cli]
name = "movies"

[client]
crate = "movie_client"

[[resources]]
name = "MoviesClient"

[[resources.operations]]
name = "list_movies"
returns = "list<string>"
"#;

    fn parse(content: &str) -> Result<Catalog> {
        content.parse()
    }

    #[test]
    fn test_parse_minimal() {
        let catalog = parse(MINIMAL).unwrap();
        assert_eq!(catalog.cli.name, "movies");
        assert_eq!(catalog.client.crate_name, "movie_client");
        assert_eq!(catalog.resources.len(), 1);
        assert_eq!(catalog.resources[0].operations[0].name, "list_movies");
    }

    #[test]
    fn test_missing_client_crate() {
        let content = MINIMAL.replace("crate = \"movie_client\"", "");
        let err = parse(&content).unwrap_err();
        assert!(matches!(*err, Error::MissingClient { .. }));
        assert_eq!(err.to_string(), "client crate was not found");
    }

    #[test]
    fn test_errors_name_the_source() {
        let content = MINIMAL.replace("crate = \"movie_client\"", "");
        let err = Catalog::from_str_with_filename(&content, "api/clientele.toml").unwrap_err();
        let Error::MissingClient { src, .. } = *err else {
            panic!("expected a missing client error");
        };
        assert_eq!(src.name(), "api/clientele.toml");
    }

    #[test]
    fn test_no_resources() {
        let err = parse("[cli]\nname = \"movies\"\n\n[client]\ncrate = \"c\"\n").unwrap_err();
        assert!(matches!(*err, Error::NoResources { .. }));
    }

    #[test]
    fn test_resource_without_operations() {
        let content = r#"
[cli]
name = "movies"

[client]
crate = "movie_client"

[[resources]]
name = "MoviesClient"
"#;
        let err = parse(content).unwrap_err();
        assert!(err.to_string().contains("declares no operations"));
    }

    #[test]
    fn test_duplicate_type_names() {
        let content = format!(
            "{}\n[[enums]]\nname = \"Genre\"\n\n[[models]]\nname = \"Genre\"\n",
            MINIMAL
        );
        let err = parse(&content).unwrap_err();
        match *err {
            Error::DuplicateType {
                first_span,
                second_span,
                ..
            } => {
                assert!(first_span.is_some());
                assert!(second_span.is_some());
            }
            other => panic!("expected duplicate type error, got {:?}", other),
        }
    }

    #[test]
    fn test_keyword_field_rejected() {
        let content = format!(
            "{}\n[[models]]\nname = \"Movie\"\n\n[[models.fields]]\nname = \"type\"\ntype = \"string\"\n",
            MINIMAL
        );
        let err = parse(&content).unwrap_err();
        assert!(err.to_string().contains("reserved keyword"));
    }

    #[test]
    fn test_invalid_auth_mode() {
        let content = MINIMAL.replace("name = \"movies\"", "name = \"movies\"\nauth = \"oauth\"");
        let err = parse(&content).unwrap_err();
        assert!(matches!(*err, Error::Parse { .. }));
    }

    #[test]
    fn test_invalid_type_expression() {
        let content = MINIMAL.replace("list<string>", "list<string");
        assert!(matches!(*parse(&content).unwrap_err(), Error::Parse { .. }));
    }

    #[test]
    fn test_groups_must_be_distinct() {
        let content = format!(
            "{}\n[[resources]]\nname = \"Movies\"\n\n[[resources.operations]]\nname = \"get_movie\"\n",
            MINIMAL
        );
        let err = parse(&content).unwrap_err();
        assert!(err.to_string().contains("already taken"));
    }

    #[test]
    fn test_from_file_missing() {
        let err = Catalog::from_file("/nonexistent/clientele.toml").unwrap_err();
        assert!(matches!(*err, Error::Io { .. }));
    }
}
