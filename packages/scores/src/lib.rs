//! Text scores bundled into the binary at build time.
//!
//! Every `*.txt` file under `library/` is embedded. A score's name is its
//! path below `library/` without the extension, e.g. `folk/frere-jacques`.

include!(concat!(env!("OUT_DIR"), "/scores.rs"));

/// Most results [`search`] returns
pub const MAX_SEARCH_RESULTS: usize = 10;

/// A score with its name and content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Score {
    pub name: String,
    pub content: String,
}

impl Score {
    fn from_entry(&(name, content): &(&str, &str)) -> Self {
        Score {
            name: name.to_string(),
            content: content.to_string(),
        }
    }
}

/// Get all embedded scores
pub fn get_all_scores() -> Vec<Score> {
    SCORES.iter().map(Score::from_entry).collect()
}

/// Get a score by name
pub fn get_score(name: &str) -> Option<Score> {
    SCORES
        .iter()
        .find(|(n, _)| *n == name)
        .map(Score::from_entry)
}

/// List all score names
pub fn list_scores() -> Vec<&'static str> {
    SCORES.iter().map(|(name, _)| *name).collect()
}

/// Scores whose name contains `query`, ignoring case
pub fn search(query: &str) -> Vec<Score> {
    let query = query.to_lowercase();
    SCORES
        .iter()
        .filter(|(name, _)| name.to_lowercase().contains(&query))
        .take(MAX_SEARCH_RESULTS)
        .map(Score::from_entry)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_is_embedded() {
        let names = list_scores();
        assert!(names.contains(&"classical/ode-to-joy"));
        assert!(names.contains(&"folk/twinkle-twinkle"));
        assert_eq!(get_all_scores().len(), names.len());
    }

    #[test]
    fn test_names_are_sorted() {
        let names = list_scores();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }

    #[test]
    fn test_get_score() {
        let score = get_score("classical/ode-to-joy").unwrap();
        assert!(score.content.contains('\n'));
        assert!(score.content.starts_with("[04]"));
        assert!(get_score("ode-to-joy").is_none());
    }

    #[test]
    fn test_search_ignores_case() {
        let hits = search("TWINKLE");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "folk/twinkle-twinkle");
        assert_eq!(search("folk/").len(), 2);
        assert!(search("nocturne").is_empty());
    }

    #[test]
    fn test_search_is_capped() {
        assert!(search("").len() <= MAX_SEARCH_RESULTS);
        assert_eq!(search("").len(), list_scores().len().min(MAX_SEARCH_RESULTS));
    }
}
