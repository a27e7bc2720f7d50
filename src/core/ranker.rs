use std::cmp::Ordering;

use crate::core::candidate::Candidate;

pub type CompareFn = Box<dyn Fn(&str, &str) -> Ordering>;

/// Total order over matched candidate labels, consumed by a stable sort.
pub enum Ranker {
    /// Shorter label first, then lexicographic (default). Identical labels
    /// compare equal, so the stable sort keeps their source order.
    ByLength,
    Custom(CompareFn),
}

impl Ranker {
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        match self {
            Self::ByLength => a
                .chars()
                .count()
                .cmp(&b.chars().count())
                .then_with(|| a.cmp(b)),
            Self::Custom(compare) => compare(a, b),
        }
    }
}

impl Default for Ranker {
    fn default() -> Self {
        Self::ByLength
    }
}

/// Stable sort, so equal-rank candidates keep their source order.
pub fn sort(ranker: &Ranker, candidates: &mut [Candidate]) {
    candidates.sort_by(|a, b| ranker.compare(a.label(), b.label()));
}

#[cfg(test)]
mod tests {
    use std::cmp::Ordering;

    use super::{Ranker, sort};
    use crate::core::candidate::Candidate;

    fn labels(items: &[&str]) -> Vec<Candidate> {
        items.iter().map(|label| Candidate::plain(*label)).collect()
    }

    fn sorted(items: &[&str]) -> Vec<String> {
        let mut candidates = labels(items);
        sort(&Ranker::ByLength, &mut candidates);
        candidates
            .iter()
            .map(|candidate| candidate.label().to_string())
            .collect()
    }

    #[test]
    fn shorter_labels_rank_first() {
        assert_eq!(sorted(&["kiwi", "fig", "apple"]), ["fig", "kiwi", "apple"]);
    }

    #[test]
    fn equal_length_falls_back_to_lexicographic() {
        assert_eq!(sorted(&["pear", "date", "plum"]), ["date", "pear", "plum"]);
    }

    #[test]
    fn identical_labels_compare_equal() {
        assert_eq!(Ranker::ByLength.compare("apple", "apple"), Ordering::Equal);
    }

    #[test]
    fn identical_labels_keep_source_order() {
        let mut candidates = vec![
            Candidate::with_id("1", "apple"),
            Candidate::with_id("2", "apple"),
        ];
        sort(&Ranker::ByLength, &mut candidates);
        assert_eq!(candidates[0].id(), Some("1"));
        assert_eq!(candidates[1].id(), Some("2"));
    }

    #[test]
    fn custom_ranker_replaces_the_default_order() {
        let reversed = Ranker::Custom(Box::new(|a, b| b.cmp(a)));
        let mut candidates = labels(&["a", "c", "b"]);
        sort(&reversed, &mut candidates);
        let order: Vec<&str> = candidates.iter().map(Candidate::label).collect();
        assert_eq!(order, ["c", "b", "a"]);
    }

    #[test]
    fn length_counts_chars_not_bytes() {
        assert_eq!(Ranker::ByLength.compare("éé", "abc"), Ordering::Less);
    }
}
