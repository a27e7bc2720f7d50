use regex::{Regex, RegexBuilder};

use crate::core::candidate::Candidate;

pub type MatchFn = Box<dyn Fn(&str, &str) -> bool>;

/// Decides whether a candidate label survives the current query. The query
/// reaches the matcher verbatim except for leading/trailing whitespace, and
/// is always matched literally: regex metacharacters in user input have no
/// special meaning.
pub enum Matcher {
    /// Case-insensitive substring test (default).
    Contains,
    /// Case-insensitive test anchored at the start of the label.
    StartsWith,
    Custom(MatchFn),
}

impl Matcher {
    pub fn matches(&self, label: &str, query: &str) -> bool {
        match self {
            Self::Contains => {
                literal_pattern(query, false).is_some_and(|pattern| pattern.is_match(label))
            }
            Self::StartsWith => {
                literal_pattern(query, true).is_some_and(|pattern| pattern.is_match(label))
            }
            Self::Custom(matches) => matches(label, query),
        }
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::Contains
    }
}

/// One filter pass over a candidate sequence, preserving source order.
/// The built-in matchers compile the query pattern once for the whole pass.
pub fn filter(matcher: &Matcher, candidates: &[Candidate], query: &str) -> Vec<Candidate> {
    match matcher {
        Matcher::Contains | Matcher::StartsWith => {
            let anchored = matches!(matcher, Matcher::StartsWith);
            let Some(pattern) = literal_pattern(query, anchored) else {
                return Vec::new();
            };
            candidates
                .iter()
                .filter(|candidate| pattern.is_match(candidate.label()))
                .cloned()
                .collect()
        }
        Matcher::Custom(matches) => candidates
            .iter()
            .filter(|candidate| matches(candidate.label(), query))
            .cloned()
            .collect(),
    }
}

/// Case-insensitive pattern matching the trimmed query literally.
pub(crate) fn literal_pattern(query: &str, anchored: bool) -> Option<Regex> {
    let mut escaped = regex::escape(query.trim());
    if anchored {
        escaped.insert(0, '^');
    }
    RegexBuilder::new(&escaped).case_insensitive(true).build().ok()
}

#[cfg(test)]
mod tests {
    use super::{Matcher, filter};
    use crate::core::candidate::Candidate;

    fn labels(items: &[&str]) -> Vec<Candidate> {
        items.iter().map(|label| Candidate::plain(*label)).collect()
    }

    #[test]
    fn contains_is_case_insensitive() {
        let matcher = Matcher::Contains;
        assert!(matcher.matches("Pineapple", "APP"));
        assert!(matcher.matches("apple", "ppl"));
        assert!(!matcher.matches("banana", "app"));
    }

    #[test]
    fn contains_trims_the_query() {
        assert!(Matcher::Contains.matches("apple", "  app  "));
    }

    #[test]
    fn metacharacters_in_the_query_match_literally() {
        let matcher = Matcher::Contains;
        assert!(matcher.matches("c++ primer", "c++"));
        assert!(matcher.matches("a.b(c)", ".b(c)"));
        assert!(!matcher.matches("axb", "a.b"));
    }

    #[test]
    fn starts_with_is_anchored() {
        let matcher = Matcher::StartsWith;
        assert!(matcher.matches("Apple", "app"));
        assert!(!matcher.matches("pineapple", "app"));
    }

    #[test]
    fn filter_keeps_source_order() {
        let candidates = labels(&["grape", "apple", "pineapple"]);
        let survivors = filter(&Matcher::Contains, &candidates, "ap");
        let survivors: Vec<&str> = survivors.iter().map(Candidate::label).collect();
        assert_eq!(survivors, ["grape", "apple", "pineapple"]);
    }

    #[test]
    fn custom_matcher_is_consulted_per_candidate() {
        let matcher = Matcher::Custom(Box::new(|label, query| label.len() == query.len()));
        let survivors = filter(&matcher, &labels(&["fig", "apple", "kiwi"]), "abc");
        assert_eq!(survivors, labels(&["fig"]));
    }
}
