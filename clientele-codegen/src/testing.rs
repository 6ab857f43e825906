//! Shared fixtures for engine and backend tests.
//!
//! Only available during tests or with the `testing` feature.

use clientele_catalog::Catalog;

/// A catalog touching every classification outcome: builder and setter
/// models, request variants, enums, string-constructible scalars, single
/// and multiple path identifiers, a collection of composites, a void
/// operation, and one operation that cannot be classified.
pub const MOVIES_CATALOG: &str = r#"
[cli]
name = "movies"
version = "0.1.0"
description = "Movies API"
auth = "basic"

[client]
crate = "movie_client"
version = "0.1"
name = "MovieClient"
resource_suffix = "Resource"

[[enums]]
name = "Genre"
variants = ["Drama", "Comedy"]

[[scalars]]
name = "Url"
path = "url::Url"
version = "2"

[[models]]
name = "Person"
construction = "builder"

[[models.fields]]
name = "name"
type = "string"
required = true

[[models.fields]]
name = "birth_year"
type = "i32"

[[models]]
name = "Movie"
construction = "builder"

[[models.fields]]
name = "id"
type = "string"
identifier = true
operations = ["update"]

[[models.fields]]
name = "title"
type = "string"
required = true
description = "Movie title"

[[models.fields]]
name = "director"
type = "string"

[[models.fields]]
name = "genre"
type = "Genre"

[[models.fields]]
name = "year"
type = "i32"

[[models.fields]]
name = "rating"
type = "f64"

[[models]]
name = "ReviewModel"
construction = "setter"

[[models.fields]]
name = "id"
type = "string"
identifier = true

[[models.fields]]
name = "body"
type = "string"
required = true

[[models.fields]]
name = "score"
type = "i32"

[[models.fields]]
name = "spoiler"
type = "bool"

[[models.fields]]
name = "author"
type = "Person"

[[models.fields]]
name = "tags"
type = "set<string>"

[[models.fields]]
name = "source"
type = "Url"

[[models.fields]]
name = "poster"
type = "[u8]"

[[models.fields]]
name = "created_at"
type = "string"
static = true

[[resources]]
name = "MoviesResourceClient"
description = "Manage movies"

[[resources.operations]]
name = "add_movie"
returns = "Movie"
description = "Add a movie"

[[resources.operations.params]]
name = "movie"
type = "Movie"

[[resources.operations]]
name = "get_movie"
returns = "Movie"
description = "Fetch one movie"

[[resources.operations.params]]
name = "movie_id"
type = "string"
path = true

[[resources.operations]]
name = "update_movie"
returns = "Movie"
description = "Change a movie"

[[resources.operations.params]]
name = "movie_id"
type = "string"
path = true

[[resources.operations.params]]
name = "movie"
type = "Movie"

[[resources.operations]]
name = "delete_movie"
description = "Remove a movie"

[[resources.operations.params]]
name = "movie_id"
type = "string"
path = true

[[resources.operations]]
name = "list_movies"
returns = "list<Movie>"
description = "List movies"

[[resources.operations.params]]
name = "genre"
type = "Genre"
required = false

[[resources.operations.params]]
name = "tags"
type = "list<string>"
required = false

[[resources]]
name = "ReviewsResourceClient"
description = "Manage reviews"

[[resources.operations]]
name = "add_review"
returns = "ReviewModel"
description = "Review an episode"

[[resources.operations.params]]
name = "movie_id"
type = "string"
path = true

[[resources.operations.params]]
name = "part"
type = "i64"
path = true

[[resources.operations.params]]
name = "review"
type = "ReviewModel"

[[resources.operations]]
name = "add_credits"
returns = "Movie"
description = "Credit people on a movie"

[[resources.operations.params]]
name = "movie_id"
type = "string"
path = true

[[resources.operations.params]]
name = "cast"
type = "list<Person>"

[[resources.operations]]
name = "search_reviews"
returns = "list<ReviewModel>"
description = "Search reviews"

[[resources.operations.params]]
name = "filters"
type = "map<string, string>"
"#;

/// Parse [`MOVIES_CATALOG`].
pub fn movies_catalog() -> Catalog {
    MOVIES_CATALOG
        .parse()
        .expect("fixture catalog should parse")
}
