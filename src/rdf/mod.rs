//! RDF support for the XPO converter
//!
//! This module implements the graph side of the conversion:
//! - RDF triples (subject-predicate-object) over oxrdf primitives
//! - An insertion-ordered in-memory triple store acting as the graph sink
//! - Namespace prefixes for Turtle output
//! - N-Triples and Turtle serialization and parsing
//!
//! # Example
//!
//! ```rust
//! use xpo_rdf::rdf::{RdfStore, Triple, NamedNode, Literal, RdfPredicate, TripleSink};
//!
//! let mut store = RdfStore::new();
//!
//! let subject = NamedNode::new("http://purl.org/xpo/DWD_EVE_1").unwrap();
//! let predicate = RdfPredicate::new("http://purl.org/xpo/name").unwrap();
//! let object = Literal::new_simple_literal("Attack");
//!
//! let triple = Triple::new(subject.clone().into(), predicate, object.into());
//! assert!(store.insert(triple.clone()));
//!
//! let results = store.get_triples_with_subject(&subject.into());
//! assert_eq!(results.len(), 1);
//! ```

mod namespace;
mod serialization;
mod store;
mod types;

pub use types::{
    BlankNode, Literal, NamedNode, RdfError, RdfObject, RdfPredicate, RdfResult, RdfSubject,
    Triple,
};

pub use store::{RdfStore, TripleSink};

pub use namespace::{Namespace, NamespaceManager, OWL_NS, RDFS_NS, RDF_NS};

pub use serialization::{
    NTriplesParserWrapper, NTriplesSerializerWrapper, ParseError, ParseResult, RdfFormat,
    RdfParser, RdfSerializer, SerializeError, SerializeResult, TurtleParserWrapper,
    TurtleSerializerWrapper,
};
