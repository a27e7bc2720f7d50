use serde::{Deserialize, Serialize};

/// One suggestion eligible for display: either a bare label, or a label
/// carrying a stable id that is written alongside the text on commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Candidate {
    Plain(String),
    WithId { id: String, label: String },
}

impl Candidate {
    pub fn plain(label: impl Into<String>) -> Self {
        Self::Plain(label.into())
    }

    pub fn with_id(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::WithId {
            id: id.into(),
            label: label.into(),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Plain(label) => label,
            Self::WithId { label, .. } => label,
        }
    }

    pub fn id(&self) -> Option<&str> {
        match self {
            Self::Plain(_) => None,
            Self::WithId { id, .. } => Some(id.as_str()),
        }
    }

    pub fn shape(&self) -> CandidateShape {
        match self {
            Self::Plain(_) => CandidateShape::Plain,
            Self::WithId { .. } => CandidateShape::WithId,
        }
    }
}

/// Shape of a source list, decided once from its first element. Source lists
/// are homogeneous; the shape picks the default commit behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateShape {
    Plain,
    WithId,
}

#[cfg(test)]
mod tests {
    use super::{Candidate, CandidateShape};

    #[test]
    fn plain_candidate_has_no_id() {
        let candidate = Candidate::plain("apple");
        assert_eq!(candidate.label(), "apple");
        assert_eq!(candidate.id(), None);
        assert_eq!(candidate.shape(), CandidateShape::Plain);
    }

    #[test]
    fn structured_candidate_exposes_both_parts() {
        let candidate = Candidate::with_id("42", "apple");
        assert_eq!(candidate.label(), "apple");
        assert_eq!(candidate.id(), Some("42"));
        assert_eq!(candidate.shape(), CandidateShape::WithId);
    }

    #[test]
    fn deserializes_bare_strings_and_maps() {
        let plain: Candidate = serde_yaml::from_str("apple").expect("bare string");
        assert_eq!(plain, Candidate::plain("apple"));

        let structured: Candidate =
            serde_yaml::from_str("{ id: \"42\", label: apple }").expect("id/label map");
        assert_eq!(structured, Candidate::with_id("42", "apple"));
    }
}
