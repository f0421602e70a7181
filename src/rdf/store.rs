//! RDF triple store implementation
//!
//! This module provides an in-memory, insertion-ordered triple set. It is the
//! graph sink the converter appends to; nodes are implicit in the triples.

use super::types::{RdfPredicate, RdfSubject, Triple};
use indexmap::{IndexMap, IndexSet};

/// Append-only destination for triples
///
/// Inserting a triple that is already present is not an error; the sink
/// has set semantics and reports whether anything changed.
pub trait TripleSink {
    /// Insert a triple, returning `true` when it was not already present
    fn insert(&mut self, triple: Triple) -> bool;
}

/// RDF triple store
///
/// Triples are kept in first-insertion order, which makes serialized output
/// reproducible for a deterministic producer.
#[derive(Clone, Debug, Default)]
pub struct RdfStore {
    /// All triples (primary storage)
    triples: IndexSet<Triple>,
}

impl RdfStore {
    /// Create a new empty RDF store
    pub fn new() -> Self {
        Self {
            triples: IndexSet::new(),
        }
    }

    /// Check if a triple exists in the store
    pub fn contains(&self, triple: &Triple) -> bool {
        self.triples.contains(triple)
    }

    /// Get the total number of triples
    pub fn len(&self) -> usize {
        self.triples.len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    /// Get triples with a specific subject
    pub fn get_triples_with_subject(&self, subject: &RdfSubject) -> Vec<Triple> {
        self.triples
            .iter()
            .filter(|triple| &triple.subject == subject)
            .cloned()
            .collect()
    }

    /// Get triples with a specific predicate
    pub fn get_triples_with_predicate(&self, predicate: &RdfPredicate) -> Vec<Triple> {
        self.triples
            .iter()
            .filter(|triple| &triple.predicate == predicate)
            .cloned()
            .collect()
    }

    /// Get an iterator over all triples in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Triple> {
        self.triples.iter()
    }

    /// Get all subjects in order of first appearance
    pub fn subjects(&self) -> Vec<RdfSubject> {
        self.triples
            .iter()
            .map(|t| t.subject.clone())
            .collect::<IndexSet<_>>()
            .into_iter()
            .collect()
    }

    /// Triples reordered so each subject's triples are contiguous
    ///
    /// Subjects appear in order of first appearance; within a subject the
    /// insertion order is kept.
    pub fn grouped_by_subject(&self) -> Vec<&Triple> {
        let mut groups: IndexMap<&RdfSubject, Vec<&Triple>> = IndexMap::new();
        for triple in &self.triples {
            groups.entry(&triple.subject).or_default().push(triple);
        }
        groups.into_values().flatten().collect()
    }
}

impl TripleSink for RdfStore {
    fn insert(&mut self, triple: Triple) -> bool {
        self.triples.insert(triple)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rdf::types::{BlankNode, Literal, NamedNode};

    fn name_triple(subject: &str, name: &str) -> Triple {
        let subject = NamedNode::new(format!("http://purl.org/xpo/{}", subject)).unwrap();
        let predicate = RdfPredicate::new("http://purl.org/xpo/name").unwrap();
        Triple::new(
            subject.into(),
            predicate,
            Literal::new_simple_literal(name).into(),
        )
    }

    #[test]
    fn test_insert_and_query() {
        let mut store = RdfStore::new();
        let triple = name_triple("E1", "Attack");

        assert!(store.insert(triple.clone()));
        assert_eq!(store.len(), 1);
        assert!(store.contains(&triple));
    }

    #[test]
    fn test_duplicate_insert_is_absorbed() {
        let mut store = RdfStore::new();
        let triple = name_triple("E1", "Attack");

        assert!(store.insert(triple.clone()));
        assert!(!store.insert(triple.clone()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_query_by_subject_and_predicate() {
        let mut store = RdfStore::new();
        store.insert(name_triple("E1", "Attack"));
        store.insert(name_triple("E1", "Assault"));
        store.insert(name_triple("E2", "Meet"));

        let e1 = NamedNode::new("http://purl.org/xpo/E1").unwrap();
        assert_eq!(store.get_triples_with_subject(&e1.into()).len(), 2);

        let name = RdfPredicate::new("http://purl.org/xpo/name").unwrap();
        assert_eq!(store.get_triples_with_predicate(&name).len(), 3);
    }

    #[test]
    fn test_grouped_by_subject_keeps_first_appearance() {
        let mut store = RdfStore::new();
        let blank = BlankNode::new("OVERLAY_1").unwrap();
        let overlay = RdfPredicate::new("http://purl.org/xpo/overlay").unwrap();
        let parent_name = RdfPredicate::new("http://purl.org/xpo/overlay_parent_name").unwrap();
        let e1 = NamedNode::new("http://purl.org/xpo/E1").unwrap();

        store.insert(name_triple("E1", "Attack"));
        store.insert(Triple::new(e1.clone().into(), overlay, blank.clone().into()));
        store.insert(Triple::new(
            blank.clone().into(),
            parent_name,
            Literal::new_simple_literal("Conflict").into(),
        ));
        store.insert(name_triple("E2", "Meet"));
        store.insert(name_triple("E1", "Assault"));

        let grouped = store.grouped_by_subject();
        let subjects: Vec<String> = grouped.iter().map(|t| t.subject.to_string()).collect();
        assert_eq!(
            subjects,
            vec![
                "<http://purl.org/xpo/E1>",
                "<http://purl.org/xpo/E1>",
                "<http://purl.org/xpo/E1>",
                "_:OVERLAY_1",
                "<http://purl.org/xpo/E2>",
            ]
        );
        assert_eq!(store.subjects().len(), 3);
    }
}
