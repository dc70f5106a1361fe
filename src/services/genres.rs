use serde_json::Value;
use std::collections::HashMap;

use crate::error::{AppError, AppResult};

/// Per-request genre frequency count
///
/// Genres keep the order they were first seen in, so ties resolve to the
/// genre that appeared first.
#[derive(Debug, Default)]
pub struct GenreHistogram {
    counts: Vec<(String, usize)>,
    index: HashMap<String, usize>,
}

impl GenreHistogram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts every string in each record's `genres` array
    pub fn from_records(records: &[Value]) -> Self {
        let mut histogram = Self::new();
        for genre in records
            .iter()
            .filter_map(|record| record.get("genres").and_then(Value::as_array))
            .flatten()
            .filter_map(Value::as_str)
        {
            histogram.record(genre);
        }
        histogram
    }

    pub fn record(&mut self, genre: &str) {
        match self.index.get(genre) {
            Some(&slot) => self.counts[slot].1 += 1,
            None => {
                self.index.insert(genre.to_string(), self.counts.len());
                self.counts.push((genre.to_string(), 1));
            }
        }
    }

    pub fn count(&self, genre: &str) -> usize {
        self.index
            .get(genre)
            .map(|&slot| self.counts[slot].1)
            .unwrap_or(0)
    }

    /// First genre, in insertion order, holding the highest count
    pub fn dominant(&self) -> Option<&str> {
        // max_by_key keeps the last maximum, so scan from the back
        self.counts
            .iter()
            .rev()
            .max_by_key(|(_, count)| *count)
            .map(|(genre, _)| genre.as_str())
    }
}

/// Most frequent genre across a library snapshot
pub fn dominant_genre(records: &[Value]) -> AppResult<String> {
    let histogram = GenreHistogram::from_records(records);
    let genre = histogram.dominant().ok_or(AppError::EmptyInput)?;

    tracing::debug!(
        genre = %genre,
        count = histogram.count(genre),
        records = records.len(),
        "Dominant genre computed"
    );

    Ok(genre.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_highest_count_wins() {
        let records = vec![
            json!({"genres": ["Action", "Drama"]}),
            json!({"genres": ["Action"]}),
        ];
        assert_eq!(dominant_genre(&records).unwrap(), "Action");
    }

    #[test]
    fn test_counts_across_records() {
        let records = vec![
            json!({"genres": ["Comedy"]}),
            json!({"genres": ["Horror", "Comedy"]}),
            json!({"genres": ["Horror"]}),
            json!({"genres": ["Horror"]}),
        ];
        let histogram = GenreHistogram::from_records(&records);
        assert_eq!(histogram.count("Horror"), 3);
        assert_eq!(histogram.count("Comedy"), 2);
        assert_eq!(histogram.count("Western"), 0);
        assert_eq!(histogram.dominant(), Some("Horror"));
    }

    #[test]
    fn test_tie_goes_to_first_genre_seen() {
        // Drama reaches 2 first, but Action was seen first
        let records = vec![
            json!({"genres": ["Action", "Drama"]}),
            json!({"genres": ["Drama"]}),
            json!({"genres": ["Action"]}),
        ];
        assert_eq!(dominant_genre(&records).unwrap(), "Action");
    }

    #[test]
    fn test_later_genre_wins_only_with_strictly_more() {
        let records = vec![
            json!({"genres": ["Comedy"]}),
            json!({"genres": ["Horror"]}),
            json!({"genres": ["Horror"]}),
        ];
        assert_eq!(dominant_genre(&records).unwrap(), "Horror");
    }

    #[test]
    fn test_tie_is_deterministic() {
        let records = vec![json!({"genres": ["Thriller", "Mystery", "Crime"]})];
        for _ in 0..10 {
            assert_eq!(dominant_genre(&records).unwrap(), "Thriller");
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(dominant_genre(&[]), Err(AppError::EmptyInput)));
    }

    #[test]
    fn test_records_without_genres() {
        let records = vec![json!({"title": "Alien"}), json!({"genres": []})];
        assert!(matches!(dominant_genre(&records), Err(AppError::EmptyInput)));
    }

    #[test]
    fn test_non_string_genres_are_skipped() {
        let records = vec![json!({"genres": [12, null, "Animation"]})];
        assert_eq!(dominant_genre(&records).unwrap(), "Animation");
    }
}
