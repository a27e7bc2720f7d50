use indexmap::IndexMap;

use crate::core::candidate::{Candidate, CandidateShape};
use crate::core::error::ConfigError;

/// Resolves an external list reference into visible labels, the equivalent of
/// reading the text content of a host-held collection.
pub trait ListResolver {
    fn resolve(&self, reference: &str) -> Option<Vec<String>>;
}

/// Ordered in-memory lists keyed by reference name. Used by tests and the
/// demo; hosts with native collections implement [`ListResolver`] directly.
#[derive(Debug, Clone, Default)]
pub struct StaticLists {
    lists: IndexMap<String, Vec<String>>,
}

impl StaticLists {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, reference: impl Into<String>, labels: Vec<String>) {
        self.lists.insert(reference.into(), labels);
    }

    pub fn with(mut self, reference: impl Into<String>, labels: Vec<String>) -> Self {
        self.insert(reference, labels);
        self
    }
}

impl ListResolver for StaticLists {
    fn resolve(&self, reference: &str) -> Option<Vec<String>> {
        self.lists.get(reference).cloned()
    }
}

/// Resolver for engines without external lists; every reference is absent.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLists;

impl ListResolver for NoLists {
    fn resolve(&self, _reference: &str) -> Option<Vec<String>> {
        None
    }
}

/// Where candidates come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListSource {
    /// An explicit ordered candidate sequence.
    Items(Vec<Candidate>),
    /// A comma-delimited string; elements are trimmed, empties dropped.
    Delimited(String),
    /// A reference resolved through a [`ListResolver`].
    Reference(String),
}

impl ListSource {
    pub fn labels<I, T>(labels: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self::Items(labels.into_iter().map(Candidate::plain).collect())
    }
}

/// Normalizes the configured source into an ordered candidate sequence.
/// Derivation is lazy: the cache rebuilds on the next access after the
/// source is reassigned.
pub struct CandidateStore {
    source: ListSource,
    cached: Vec<Candidate>,
    dirty: bool,
}

impl CandidateStore {
    pub fn new(source: ListSource) -> Self {
        Self {
            source,
            cached: Vec::new(),
            dirty: true,
        }
    }

    pub fn set_source(&mut self, source: ListSource) {
        self.source = source;
        self.dirty = true;
    }

    pub fn source(&self) -> &ListSource {
        &self.source
    }

    /// Current candidates, rebuilding the cache if the source changed.
    /// An unresolvable reference degrades to an empty sequence.
    pub fn candidates(&mut self, resolver: &dyn ListResolver) -> &[Candidate] {
        if self.dirty {
            self.cached = derive(&self.source, resolver).unwrap_or_default();
            self.dirty = false;
        }
        self.cached.as_slice()
    }

    /// Shape of the current list, decided from its first element.
    pub fn shape(&mut self, resolver: &dyn ListResolver) -> Option<CandidateShape> {
        self.candidates(resolver).first().map(Candidate::shape)
    }
}

/// Derive the candidate sequence for `source`.
pub fn derive(
    source: &ListSource,
    resolver: &dyn ListResolver,
) -> Result<Vec<Candidate>, ConfigError> {
    match source {
        ListSource::Items(items) => Ok(items.clone()),
        ListSource::Delimited(raw) => Ok(raw
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(Candidate::plain)
            .collect()),
        ListSource::Reference(reference) => resolver
            .resolve(reference)
            .map(|labels| labels.into_iter().map(Candidate::plain).collect())
            .ok_or_else(|| ConfigError::UnresolvedList {
                reference: reference.clone(),
            }),
    }
}
