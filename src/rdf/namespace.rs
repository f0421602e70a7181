//! RDF namespace and prefix management
//!
//! This module handles namespace prefixes for compact IRI notation and the
//! `@prefix` header of Turtle output.

use super::types::{NamedNode, RdfPredicate, RdfResult};
use indexmap::IndexMap;

pub const RDF_NS: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
pub const RDFS_NS: &str = "http://www.w3.org/2000/01/rdf-schema#";
pub const OWL_NS: &str = "http://www.w3.org/2002/07/owl#";

/// Namespace (prefix → IRI mapping)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace {
    /// Prefix
    pub prefix: String,
    /// IRI
    pub iri: String,
}

impl Namespace {
    /// Create a new namespace
    pub fn new(prefix: impl Into<String>, iri: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            iri: iri.into(),
        }
    }

    /// Named node for `local` in this namespace
    pub fn term(&self, local: &str) -> RdfResult<NamedNode> {
        NamedNode::new(format!("{}{}", self.iri, local))
    }

    /// Predicate for `local` in this namespace
    pub fn predicate(&self, local: &str) -> RdfResult<RdfPredicate> {
        self.term(local).map(RdfPredicate::from)
    }
}

/// Namespace manager
///
/// Prefixes keep their registration order so the Turtle header is stable
/// from run to run.
#[derive(Debug, Clone)]
pub struct NamespaceManager {
    /// Prefix → IRI mappings
    prefixes: IndexMap<String, String>,
}

impl NamespaceManager {
    /// Create a namespace manager with the RDF/RDFS/OWL prefixes
    pub fn new() -> Self {
        let mut mgr = Self {
            prefixes: IndexMap::new(),
        };

        mgr.add_prefix("owl", OWL_NS);
        mgr.add_prefix("rdf", RDF_NS);
        mgr.add_prefix("rdfs", RDFS_NS);

        mgr
    }

    /// Add a prefix, replacing any earlier binding of the same prefix
    pub fn add_prefix(&mut self, prefix: impl Into<String>, iri: impl Into<String>) {
        self.prefixes.insert(prefix.into(), iri.into());
    }

    /// Add a namespace
    pub fn bind(&mut self, namespace: &Namespace) {
        self.add_prefix(namespace.prefix.clone(), namespace.iri.clone());
    }

    /// Compact an IRI using the longest matching namespace
    ///
    /// Returns `None` when no namespace matches or when the remainder is not
    /// a plain Turtle local name, in which case the IRI must be written whole.
    pub fn compact(&self, iri: &str) -> Option<String> {
        let (prefix, ns) = self
            .prefixes
            .iter()
            .filter(|(_, ns)| iri.starts_with(ns.as_str()))
            .max_by_key(|(_, ns)| ns.len())?;
        let local = &iri[ns.len()..];
        is_local_name(local).then(|| format!("{}:{}", prefix, local))
    }

    /// Get all registered prefixes in registration order
    pub fn prefixes(&self) -> Vec<Namespace> {
        self.prefixes
            .iter()
            .map(|(prefix, iri)| Namespace::new(prefix.clone(), iri.clone()))
            .collect()
    }
}

/// Conservative subset of Turtle `PN_LOCAL`: ASCII letters, digits, `_` and
/// `-`, not starting with `-`
fn is_local_name(local: &str) -> bool {
    !local.is_empty()
        && !local.starts_with('-')
        && local
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

impl Default for NamespaceManager {
    fn default() -> Self {
        Self::new()
    }
}
