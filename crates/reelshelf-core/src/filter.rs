//! Client-side search over the cached collection.

use reelshelf_protocol::Movie;

/// Normalize raw search input: trimmed and lower-cased.
pub fn normalize_term(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Whether `movie` matches an already-normalized, non-empty term.
///
/// Only title and genre are searched; the year never matches.
pub fn matches(movie: &Movie, term: &str) -> bool {
    movie.title.to_lowercase().contains(term) || movie.genre.to_lowercase().contains(term)
}

/// Records of `movies` matching `raw_term`, in cache order.
///
/// An empty (or whitespace-only) term selects every record.
pub fn filter<'a>(movies: &'a [Movie], raw_term: &str) -> Vec<&'a Movie> {
    let term = normalize_term(raw_term);
    if term.is_empty() {
        return movies.iter().collect();
    }
    movies.iter().filter(|movie| matches(movie, &term)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use reelshelf_test_utils::{dune_pair, movie};

    fn titles(movies: &[&Movie]) -> Vec<String> {
        movies.iter().map(|movie| movie.title.clone()).collect()
    }

    #[test]
    fn empty_term_returns_full_cache() {
        let cache = dune_pair();
        assert_eq!(filter(&cache, "").len(), 2);
        assert_eq!(filter(&cache, "   ").len(), 2);
    }

    #[test]
    fn matches_title_substring_case_insensitively() {
        let cache = dune_pair();
        assert_eq!(titles(&filter(&cache, "dun")), vec!["Dune", "Duna"]);
        assert_eq!(titles(&filter(&cache, "DUNE")), vec!["Dune"]);
    }

    #[test]
    fn year_is_not_searched() {
        let cache = dune_pair();
        assert!(filter(&cache, "1984").is_empty());
    }

    #[test]
    fn matches_genre() {
        let cache = vec![
            movie(1, "Alien", 1979, "Horror"),
            movie(2, "Arrival", 2016, "Sci-Fi"),
            movie(3, "Heat", 1995, ""),
        ];
        assert_eq!(titles(&filter(&cache, "sci")), vec!["Arrival"]);
        assert_eq!(titles(&filter(&cache, " horror ")), vec!["Alien"]);
    }

    #[test]
    fn result_is_exactly_the_matching_subset() {
        let cache = vec![
            movie(1, "The Thing", 1982, "Horror"),
            movie(2, "Thief", 1981, "Crime"),
            movie(3, "Heat", 1995, "Crime"),
            movie(4, "Paths of Glory", 1957, "War"),
        ];
        for term in ["th", "crime", "e", "x", "HEAT", "of g"] {
            let normalized = normalize_term(term);
            let expected: Vec<&Movie> = cache
                .iter()
                .filter(|movie| {
                    movie.title.to_lowercase().contains(&normalized)
                        || movie.genre.to_lowercase().contains(&normalized)
                })
                .collect();
            assert_eq!(filter(&cache, term), expected, "term {term:?}");
        }
    }
}
