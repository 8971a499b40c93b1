//! Parsers for catalog and interaction payloads.
//!
//! Catalog records come from heterogeneous sources, so individual fields are
//! parsed best-effort by small pure functions:
//! - genres may be a JSON array, JSON-array text, or `,`/`|` delimited text
//! - years may be a raw number or any text containing a 4-digit run
//! - ids may be numbers or numeric strings
//!
//! A field that can't be parsed degrades (empty genres, no year, skipped
//! record) instead of failing the load. Only a payload with the wrong overall
//! shape is an error.

use crate::error::{DataLoadError, Result};
use crate::types::*;
use serde::Deserialize;
use serde_json::Value;

// =============================================================================
// Field parsers
// =============================================================================

/// Parse a genre field of unknown shape.
///
/// Examples:
///   `["Action", "Drama"]`       -> ["Action", "Drama"]
///   `"[\"Action\", \"Drama\"]"` -> ["Action", "Drama"]
///   `"Action|Drama, Comedy"`    -> ["Action", "Drama", "Comedy"]
///   `null` / `""`               -> []
pub fn parse_genres(value: &Value) -> Vec<String> {
    match value {
        Value::Null => Vec::new(),
        Value::Array(items) => items.iter().map(value_to_text).collect(),
        Value::String(raw) => parse_genre_list(raw),
        other => vec![value_to_text(other)],
    }
}

/// Parse genres from raw text: JSON array text first, then `,`/`|` delimiters
pub fn parse_genre_list(raw: &str) -> Vec<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Vec::new();
    }

    if let Ok(Value::Array(items)) = serde_json::from_str::<Value>(raw) {
        return items.iter().map(value_to_text).collect();
    }

    raw.split([',', '|'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Extract a release year from a number or a date-like string.
///
/// Examples:
///   `1999`           -> Some(1999)
///   `"1999-03-31"`   -> Some(1999)
///   `"March 2010"`   -> Some(2010)
///   `"0042"` / `500` -> None (outside [1800, 3000])
pub fn extract_year(value: &Value) -> Option<u16> {
    match value {
        Value::Null | Value::Bool(_) => None,
        Value::Number(n) => {
            let year = n
                .as_i64()
                .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))?;
            year_in_range(year)
        }
        Value::String(text) => year_from_text(text),
        other => year_from_text(&other.to_string()),
    }
}

fn year_from_text(text: &str) -> Option<u16> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    let digits = first_four_digit_run(text)?;
    year_in_range(digits.parse().ok()?)
}

/// Leftmost window of four consecutive ASCII digits
fn first_four_digit_run(text: &str) -> Option<&str> {
    let bytes = text.as_bytes();
    if bytes.len() < 4 {
        return None;
    }
    (0..=bytes.len() - 4)
        .find(|&i| bytes[i..i + 4].iter().all(u8::is_ascii_digit))
        .map(|i| &text[i..i + 4])
}

fn year_in_range(year: i64) -> Option<u16> {
    if (MIN_RELEASE_YEAR as i64..=MAX_RELEASE_YEAR as i64).contains(&year) {
        Some(year as u16)
    } else {
        None
    }
}

/// Parse an id from a number (truncated) or a numeric string
fn parse_id(value: &Value) -> Option<MovieId> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| {
                n.as_f64()
                    .filter(|f| f.is_finite() && *f >= 0.0)
                    .map(|f| f.trunc() as u64)
            })
            .and_then(|id| MovieId::try_from(id).ok()),
        Value::String(s) => s.trim().parse().ok(),
        Value::Bool(b) => Some(*b as MovieId),
        _ => None,
    }
}

fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Null, empty strings, `false` and zero count as missing
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// First present value among several alias keys
fn first_present<'a>(record: &'a serde_json::Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| record.get(*key))
        .find(|value| is_present(value))
}

// =============================================================================
// Catalog
// =============================================================================

/// Parse a catalog payload: a list of movie objects, or `{ "movies": [...] }`.
///
/// Records that aren't objects, or whose id is missing or unparseable, are
/// skipped.
pub fn parse_catalog(content: &str, file: &str) -> Result<Catalog> {
    let payload: Value = serde_json::from_str(content).map_err(|source| DataLoadError::JsonError {
        file: file.to_string(),
        source,
    })?;

    let records = match &payload {
        Value::Object(map) => map.get("movies").unwrap_or(&payload),
        other => other,
    };
    let records = records.as_array().ok_or_else(|| DataLoadError::InvalidPayload {
        file: file.to_string(),
        reason: "expected a list of movies or an object with a `movies` list".to_string(),
    })?;

    let mut catalog = Catalog::new();
    let mut skipped = 0usize;
    for record in records {
        match parse_movie_record(record) {
            Some(movie) => catalog.insert(movie),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        tracing::debug!("Skipped {} catalog records without a usable id in {}", skipped, file);
    }
    Ok(catalog)
}

fn parse_movie_record(record: &Value) -> Option<Movie> {
    let record = record.as_object()?;
    let id = parse_id(record.get("id")?)?;

    let title = first_present(record, &["title", "original_title"])
        .map(value_to_text)
        .unwrap_or_default();
    let description = first_present(record, &["description", "overview"])
        .map(value_to_text)
        .unwrap_or_default();
    let genres = record.get("genres").map(parse_genres).unwrap_or_default();
    let release_year = first_present(
        record,
        &["releaseYear", "release_year", "releaseDate", "release_date"],
    )
    .and_then(extract_year);

    Some(Movie {
        id,
        title,
        description,
        genres,
        release_year,
    })
}

// =============================================================================
// Interactions
// =============================================================================

#[derive(Debug, Default, Deserialize)]
struct InteractionPayload {
    #[serde(default, alias = "review", alias = "Reviews", alias = "Review")]
    reviews: Vec<ReviewRecord>,
    #[serde(default, alias = "favorite", alias = "Favorites", alias = "Favorite")]
    favorites: Vec<LinkRecord>,
    #[serde(default, alias = "watchlists", alias = "Watchlist", alias = "Watchlists")]
    watchlist: Vec<LinkRecord>,
}

#[derive(Debug, Deserialize)]
struct ReviewRecord {
    #[serde(rename = "userId", alias = "user_id")]
    user_id: UserId,
    #[serde(rename = "movieId", alias = "movie_id")]
    movie_id: MovieId,
    rating: f64,
}

#[derive(Debug, Deserialize)]
struct LinkRecord {
    #[serde(rename = "userId", alias = "user_id")]
    user_id: UserId,
    #[serde(rename = "movieId", alias = "movie_id")]
    movie_id: MovieId,
}

/// Parse an interaction payload into weighted records.
///
/// Format: `{ "reviews": [...], "favorites": [...], "watchlist": [...] }`,
/// every collection optional. Records come out reviews first, then
/// favorites, then watchlist entries.
pub fn parse_interactions(content: &str, file: &str) -> Result<Vec<Interaction>> {
    let payload: InteractionPayload =
        serde_json::from_str(content).map_err(|source| DataLoadError::JsonError {
            file: file.to_string(),
            source,
        })?;

    let reviews = payload
        .reviews
        .iter()
        .map(|r| Interaction::from_rating(r.user_id, r.movie_id, r.rating));
    let favorites = payload
        .favorites
        .iter()
        .map(|f| Interaction::favorite(f.user_id, f.movie_id));
    let watchlist = payload
        .watchlist
        .iter()
        .map(|w| Interaction::watchlist(w.user_id, w.movie_id));

    Ok(reviews.chain(favorites).chain(watchlist).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_genres_shapes() {
        assert_eq!(parse_genres(&json!(["Action", "Drama"])), vec!["Action", "Drama"]);
        assert_eq!(parse_genres(&json!("[\"Action\", \"Drama\"]")), vec!["Action", "Drama"]);
        assert_eq!(
            parse_genres(&json!("Action|Drama, Comedy")),
            vec!["Action", "Drama", "Comedy"]
        );
        assert!(parse_genres(&json!(null)).is_empty());
        assert!(parse_genres(&json!("   ")).is_empty());
        assert_eq!(parse_genres(&json!(7)), vec!["7"]);
    }

    #[test]
    fn test_parse_genre_list_drops_empty_segments() {
        assert_eq!(parse_genre_list("action,, |drama|"), vec!["action", "drama"]);
    }

    #[test]
    fn test_extract_year() {
        assert_eq!(extract_year(&json!(1999)), Some(1999));
        assert_eq!(extract_year(&json!(2001.9)), Some(2001));
        assert_eq!(extract_year(&json!("1999-03-31")), Some(1999));
        assert_eq!(extract_year(&json!("Released March 2010")), Some(2010));
        assert_eq!(extract_year(&json!("0042-01-01")), None);
        assert_eq!(extract_year(&json!(500)), None);
        assert_eq!(extract_year(&json!(3001)), None);
        assert_eq!(extract_year(&json!("unknown")), None);
        assert_eq!(extract_year(&json!("")), None);
        assert_eq!(extract_year(&json!(null)), None);
    }

    #[test]
    fn test_parse_catalog_accepts_list_and_wrapped_forms() {
        let list = r#"[{"id": 1, "title": "Alien"}]"#;
        let wrapped = r#"{"movies": [{"id": "2", "title": "Aliens"}]}"#;

        let catalog = parse_catalog(list, "list.json").unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get(1).unwrap().title, "Alien");

        let catalog = parse_catalog(wrapped, "wrapped.json").unwrap();
        assert_eq!(catalog.get(2).unwrap().title, "Aliens");
    }

    #[test]
    fn test_parse_catalog_field_fallbacks() {
        let content = r#"[
            {"id": 10, "original_title": "Solaris", "overview": "A planet that thinks",
             "genres": "Drama|Sci-Fi", "release_date": "1972-03-20"},
            {"id": 11, "title": "", "original_title": "Stalker", "releaseYear": 0,
             "release_year": 1979}
        ]"#;
        let catalog = parse_catalog(content, "movies.json").unwrap();

        let solaris = catalog.get(10).unwrap();
        assert_eq!(solaris.title, "Solaris");
        assert_eq!(solaris.description, "A planet that thinks");
        assert_eq!(solaris.genres, vec!["Drama", "Sci-Fi"]);
        assert_eq!(solaris.release_year, Some(1972));

        let stalker = catalog.get(11).unwrap();
        assert_eq!(stalker.title, "Stalker");
        assert_eq!(stalker.description, "");
        assert!(stalker.genres.is_empty());
        assert_eq!(stalker.release_year, Some(1979));
    }

    #[test]
    fn test_parse_catalog_skips_unusable_records() {
        let content = r#"[{"id": 1}, "junk", {"title": "no id"}, {"id": "abc"}, {"id": 2.0}]"#;
        let catalog = parse_catalog(content, "movies.json").unwrap();
        assert_eq!(catalog.movie_ids(), vec![1, 2]);
    }

    #[test]
    fn test_parse_catalog_duplicate_id_keeps_first_position() {
        let content = r#"[{"id": 1, "title": "Old"}, {"id": 2}, {"id": 1, "title": "New"}]"#;
        let catalog = parse_catalog(content, "movies.json").unwrap();
        assert_eq!(catalog.movie_ids(), vec![1, 2]);
        assert_eq!(catalog.get(1).unwrap().title, "New");
    }

    #[test]
    fn test_parse_catalog_rejects_wrong_shape() {
        let err = parse_catalog(r#"{"films": []}"#, "movies.json").unwrap_err();
        assert!(matches!(err, DataLoadError::InvalidPayload { .. }));

        let err = parse_catalog("not json", "movies.json").unwrap_err();
        assert!(matches!(err, DataLoadError::JsonError { .. }));
    }

    #[test]
    fn test_parse_interactions_weights() {
        let content = r#"{
            "reviews": [{"userId": 1, "movieId": 10, "rating": 4.0},
                        {"user_id": 1, "movie_id": 11, "rating": 7.5}],
            "favorites": [{"userId": 2, "movieId": 10}],
            "watchlist": [{"userId": 2, "movieId": 12}]
        }"#;
        let interactions = parse_interactions(content, "interactions.json").unwrap();

        assert_eq!(interactions.len(), 4);
        assert!((interactions[0].score - 0.8).abs() < 1e-12);
        assert_eq!(interactions[1].score, 1.0);
        assert_eq!(interactions[2], Interaction::new(2, 10, 1.0));
        assert_eq!(interactions[3], Interaction::new(2, 12, 0.4));
    }

    #[test]
    fn test_parse_interactions_missing_collections() {
        let interactions = parse_interactions(r#"{"Favorites": [{"userId": 3, "movieId": 1}]}"#, "i.json").unwrap();
        assert_eq!(interactions, vec![Interaction::favorite(3, 1)]);
    }
}
