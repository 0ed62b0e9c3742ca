//! Movie corpus loading.
//!
//! The corpus is a CSV file with the columns `movie_id`, `title` and `tags`,
//! plus optional display columns. `overview`, `genres`, `cast` and `crew`
//! hold stringified list literals such as `['Action', 'Science Fiction']`,
//! which are decoded here once by [`parse_list_literal`].

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::models::{MovieId, MovieRecord};

#[derive(Debug, Deserialize)]
struct CorpusRow {
    movie_id: u64,
    title: String,
    tags: String,
    #[serde(default)]
    overview: String,
    #[serde(default)]
    genres: String,
    #[serde(default)]
    cast: String,
    #[serde(default)]
    crew: String,
    #[serde(default)]
    popularity: Option<f64>,
}

/// Loads the corpus from a CSV file
pub fn load_corpus<P: AsRef<Path>>(path: P) -> AppResult<Vec<MovieRecord>> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).map_err(|e| {
        AppError::Corpus(format!("Failed to open {}: {}", path.display(), e))
    })?;

    let movies = read_corpus(file)?;

    tracing::info!(
        path = %path.display(),
        movies = movies.len(),
        "Corpus loaded"
    );

    Ok(movies)
}

/// Reads corpus rows from any CSV source, preserving row order
pub fn read_corpus<R: Read>(source: R) -> AppResult<Vec<MovieRecord>> {
    let mut reader = csv::Reader::from_reader(source);
    let mut movies = Vec::new();

    for (idx, result) in reader.deserialize::<CorpusRow>().enumerate() {
        let record_no = idx + 1;
        let row = result
            .map_err(|e| AppError::Corpus(format!("Failed to read record {}: {}", record_no, e)))?;

        let list = |column: &str, value: &str| {
            parse_list_literal(value).map_err(|e| {
                AppError::Corpus(format!(
                    "Record {} ({}), column '{}': {}",
                    record_no, row.title, column, e
                ))
            })
        };

        let overview = list("overview", &row.overview)?;
        let genres = list("genres", &row.genres)?;
        let cast = list("cast", &row.cast)?;
        let crew = list("crew", &row.crew)?;

        let popularity = row.popularity.unwrap_or(0.0);
        if !popularity.is_finite() {
            return Err(AppError::Corpus(format!(
                "Record {} ({}), column 'popularity': not a finite number: {}",
                record_no, row.title, popularity
            )));
        }

        movies.push(MovieRecord {
            movie_id: MovieId(row.movie_id),
            title: row.title,
            tags: row.tags,
            overview,
            genres,
            cast,
            crew,
            popularity,
        });
    }

    Ok(movies)
}

/// Decodes a list literal of quoted strings
///
/// Accepts single- or double-quoted items with backslash escapes and an
/// optional trailing comma. A value that does not start with `[` is taken as
/// a single item; a blank value is an empty list.
pub fn parse_list_literal(value: &str) -> Result<Vec<String>, String> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(Vec::new());
    }
    if !value.starts_with('[') {
        return Ok(vec![value.to_string()]);
    }
    if !value.ends_with(']') {
        return Err("list literal is missing closing ']'".to_string());
    }

    let inner = &value[1..value.len() - 1];
    let mut items = Vec::new();
    let mut chars = inner.chars().peekable();

    loop {
        while chars.peek().is_some_and(|c| c.is_whitespace()) {
            chars.next();
        }

        let quote = match chars.next() {
            None => break,
            Some(q @ ('\'' | '"')) => q,
            Some(c) => return Err(format!("expected quoted item, found '{}'", c)),
        };

        let mut item = String::new();
        let mut closed = false;
        while let Some(c) = chars.next() {
            match c {
                '\\' => match chars.next() {
                    Some('n') => item.push('\n'),
                    Some('t') => item.push('\t'),
                    Some(escaped) => item.push(escaped),
                    None => return Err("dangling escape at end of list".to_string()),
                },
                c if c == quote => {
                    closed = true;
                    break;
                }
                c => item.push(c),
            }
        }
        if !closed {
            return Err("unterminated string in list literal".to_string());
        }
        items.push(item);

        while chars.peek().is_some_and(|c| c.is_whitespace()) {
            chars.next();
        }
        match chars.next() {
            None => break,
            Some(',') => continue,
            Some(c) => return Err(format!("expected ',' between items, found '{}'", c)),
        }
    }

    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
movie_id,title,overview,genres,cast,crew,tags,popularity
19995,Avatar,\"['In', 'the', '22nd', 'century']\",\"['Action', 'Science Fiction']\",\"['Sam Worthington', 'Zoe Saldana']\",['James Cameron'],in the 22nd century action sciencefiction,150.43
285,Pirates of the Caribbean: At World's End,\"[\"\"Captain\"\", \"\"Barbossa\"\"]\",['Adventure'],['Johnny Depp'],['Gore Verbinski'],captain barbossa adventure,139.08
";

    #[test]
    fn test_read_corpus_preserves_order_and_fields() {
        let movies = read_corpus(SAMPLE.as_bytes()).unwrap();

        assert_eq!(movies.len(), 2);
        assert_eq!(movies[0].movie_id, MovieId(19995));
        assert_eq!(movies[0].title, "Avatar");
        assert_eq!(movies[0].genres, vec!["Action", "Science Fiction"]);
        assert_eq!(movies[0].cast, vec!["Sam Worthington", "Zoe Saldana"]);
        assert_eq!(movies[0].crew, vec!["James Cameron"]);
        assert_eq!(movies[0].overview.join(" "), "In the 22nd century");
        assert_eq!(movies[0].popularity, 150.43);
        assert_eq!(movies[1].overview, vec!["Captain", "Barbossa"]);
    }

    #[test]
    fn test_read_corpus_minimal_columns() {
        let csv = "movie_id,title,tags\n1,A,space war robot\n2,B,romance drama\n";
        let movies = read_corpus(csv.as_bytes()).unwrap();

        assert_eq!(movies.len(), 2);
        assert!(movies[0].genres.is_empty());
        assert_eq!(movies[1].popularity, 0.0);
    }

    #[test]
    fn test_read_corpus_bad_movie_id() {
        let csv = "movie_id,title,tags\nabc,A,space\n";
        let err = read_corpus(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, AppError::Corpus(_)));
    }

    #[test]
    fn test_read_corpus_malformed_list_names_column() {
        let csv = "movie_id,title,tags,genres\n1,A,space,\"['Action\"\n";
        let err = read_corpus(csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("genres"));
    }

    #[test]
    fn test_read_corpus_rejects_non_finite_popularity() {
        for value in ["NaN", "inf", "-inf"] {
            let csv = format!("movie_id,title,tags,popularity\n1,A,space,{}\n", value);
            let err = read_corpus(csv.as_bytes()).unwrap_err();
            assert!(matches!(err, AppError::Corpus(_)));
            assert!(err.to_string().contains("popularity"));
        }
    }

    #[test]
    fn test_load_corpus_missing_file() {
        let err = load_corpus("/nonexistent/movies.csv").unwrap_err();
        assert!(err.to_string().contains("Failed to open"));
    }

    #[test]
    fn test_parse_list_literal_quotes_and_escapes() {
        let items = parse_list_literal(r#"['Ocean\'s Eleven', "it's", 'a, b']"#).unwrap();
        assert_eq!(items, vec!["Ocean's Eleven", "it's", "a, b"]);
    }

    #[test]
    fn test_parse_list_literal_empty_and_trailing_comma() {
        assert!(parse_list_literal("[]").unwrap().is_empty());
        assert!(parse_list_literal("  ").unwrap().is_empty());
        assert_eq!(parse_list_literal("['x',]").unwrap(), vec!["x"]);
    }

    #[test]
    fn test_parse_list_literal_plain_value() {
        assert_eq!(parse_list_literal("Drama").unwrap(), vec!["Drama"]);
    }

    #[test]
    fn test_parse_list_literal_rejects_code() {
        assert!(parse_list_literal("[__import__('os')]").is_err());
        assert!(parse_list_literal("['a' 'b']").is_err());
        assert!(parse_list_literal("['a'").is_err());
    }
}
