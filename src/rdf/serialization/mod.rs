//! RDF serialization formats
//!
//! Supports:
//! - N-Triples (NT), one triple per line in store order
//! - Turtle (TTL), grouped by subject with a `@prefix` header and prefixed names
//!
//! Parsing and N-Triples output go through `rio_turtle`; this module converts
//! between the store's owned terms and rio's borrowed model.

mod ntriples;
mod turtle;

pub use ntriples::{NTriplesParserWrapper, NTriplesSerializerWrapper};
pub use turtle::{TurtleParserWrapper, TurtleSerializerWrapper};

use super::types::XSD_STRING;
use super::{BlankNode, Literal, NamedNode, NamespaceManager, RdfObject, RdfPredicate, RdfStore, RdfSubject, Triple};
use rio_api::model;
use rio_api::parser::TriplesParser;
use rio_turtle::TurtleError;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

/// RDF serialization format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RdfFormat {
    /// Turtle format (.ttl)
    Turtle,
    /// N-Triples format (.nt)
    NTriples,
}

impl RdfFormat {
    /// Conventional file extension
    pub fn extension(&self) -> &'static str {
        match self {
            RdfFormat::Turtle => "ttl",
            RdfFormat::NTriples => "nt",
        }
    }

}

/// Parse errors
#[derive(Error, Debug)]
pub enum ParseError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),
}

pub type ParseResult<T> = Result<T, ParseError>;

/// Serialization errors
#[derive(Error, Debug)]
pub enum SerializeError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),
}

pub type SerializeResult<T> = Result<T, SerializeError>;

/// RDF parser
pub struct RdfParser;

impl RdfParser {
    /// Parse RDF data from a string
    pub fn parse(input: &str, format: RdfFormat) -> ParseResult<Vec<Triple>> {
        match format {
            RdfFormat::Turtle => TurtleParserWrapper::parse(input),
            RdfFormat::NTriples => NTriplesParserWrapper::parse(input),
        }
    }

    /// Parse RDF data from a file
    pub fn parse_file(path: &Path, format: RdfFormat) -> ParseResult<Vec<Triple>> {
        let input = std::fs::read_to_string(path)?;
        Self::parse(&input, format)
    }
}

/// RDF serializer
pub struct RdfSerializer;

impl RdfSerializer {
    /// Serialize an RDF store to a string
    pub fn serialize_store(
        store: &RdfStore,
        format: RdfFormat,
        namespaces: &NamespaceManager,
    ) -> SerializeResult<String> {
        let output = Self::write_store(store, format, namespaces, Vec::new())?;
        String::from_utf8(output).map_err(|e| SerializeError::Serialize(e.to_string()))
    }

    /// Serialize an RDF store into a writer, handing the writer back
    pub fn write_store<W: Write>(
        store: &RdfStore,
        format: RdfFormat,
        namespaces: &NamespaceManager,
        write: W,
    ) -> SerializeResult<W> {
        match format {
            RdfFormat::NTriples => {
                let triples: Vec<&Triple> = store.iter().collect();
                NTriplesSerializerWrapper::write(&triples, write)
            }
            RdfFormat::Turtle => {
                TurtleSerializerWrapper::write(&store.grouped_by_subject(), namespaces, write)
            }
        }
    }
}

/// Borrow a stored triple as a rio triple
pub(crate) fn to_rio(triple: &Triple) -> model::Triple<'_> {
    let subject = match &triple.subject {
        RdfSubject::NamedNode(n) => model::Subject::NamedNode(model::NamedNode { iri: n.as_str() }),
        RdfSubject::BlankNode(b) => model::Subject::BlankNode(model::BlankNode { id: b.as_str() }),
    };

    let predicate = model::NamedNode {
        iri: triple.predicate.as_str(),
    };

    let object = match &triple.object {
        RdfObject::NamedNode(n) => model::Term::NamedNode(model::NamedNode { iri: n.as_str() }),
        RdfObject::BlankNode(b) => model::Term::BlankNode(model::BlankNode { id: b.as_str() }),
        RdfObject::Literal(l) => {
            let literal = match l.language() {
                Some(language) => model::Literal::LanguageTaggedString {
                    value: l.value(),
                    language,
                },
                None if l.datatype_iri() == XSD_STRING => model::Literal::Simple { value: l.value() },
                None => model::Literal::Typed {
                    value: l.value(),
                    datatype: model::NamedNode {
                        iri: l.datatype_iri(),
                    },
                },
            };
            model::Term::Literal(literal)
        }
    };

    model::Triple {
        subject,
        predicate,
        object,
    }
}

/// Drain a rio parser into owned triples
pub(crate) fn collect_triples<P>(mut parser: P) -> ParseResult<Vec<Triple>>
where
    P: TriplesParser<Error = TurtleError>,
{
    let mut triples = Vec::new();

    let res: Result<(), TurtleError> = parser.parse_all(&mut |t| {
        let triple = from_rio(t)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        triples.push(triple);
        Ok(())
    });

    match res {
        Ok(_) => Ok(triples),
        Err(e) => Err(ParseError::Parse(e.to_string())),
    }
}

fn from_rio(t: model::Triple<'_>) -> ParseResult<Triple> {
    Ok(Triple::new(
        convert_subject(t.subject)?,
        convert_predicate(t.predicate)?,
        convert_object(t.object)?,
    ))
}

fn convert_subject(s: model::Subject<'_>) -> ParseResult<RdfSubject> {
    match s {
        model::Subject::NamedNode(n) => Ok(RdfSubject::NamedNode(
            NamedNode::new(n.iri).map_err(|e| ParseError::Parse(e.to_string()))?,
        )),
        model::Subject::BlankNode(b) => Ok(RdfSubject::BlankNode(
            BlankNode::new(b.id).map_err(|e| ParseError::Parse(e.to_string()))?,
        )),
        _ => Err(ParseError::Parse("Unsupported subject type".to_string())),
    }
}

fn convert_predicate(p: model::NamedNode<'_>) -> ParseResult<RdfPredicate> {
    RdfPredicate::new(p.iri).map_err(|e| ParseError::Parse(e.to_string()))
}

fn convert_object(o: model::Term<'_>) -> ParseResult<RdfObject> {
    match o {
        model::Term::NamedNode(n) => Ok(RdfObject::NamedNode(
            NamedNode::new(n.iri).map_err(|e| ParseError::Parse(e.to_string()))?,
        )),
        model::Term::BlankNode(b) => Ok(RdfObject::BlankNode(
            BlankNode::new(b.id).map_err(|e| ParseError::Parse(e.to_string()))?,
        )),
        model::Term::Literal(l) => match l {
            model::Literal::Simple { value } => {
                Ok(RdfObject::Literal(Literal::new_simple_literal(value)))
            }
            model::Literal::LanguageTaggedString { value, language } => Ok(RdfObject::Literal(
                Literal::new_language_tagged_literal(value, language)
                    .map_err(|e| ParseError::Parse(e.to_string()))?,
            )),
            model::Literal::Typed { value, datatype } => {
                let dt = NamedNode::new(datatype.iri).map_err(|e| ParseError::Parse(e.to_string()))?;
                Ok(RdfObject::Literal(Literal::new_typed_literal(value, dt)))
            }
        },
        _ => Err(ParseError::Parse("Unsupported object type".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rdf::TripleSink;
    use std::collections::HashSet;

    fn sample_store() -> RdfStore {
        let mut store = RdfStore::new();
        let e1 = NamedNode::new("http://purl.org/xpo/E1").unwrap();
        let overlay = BlankNode::new("OVERLAY_1").unwrap();

        store.insert(Triple::new(
            e1.clone().into(),
            RdfPredicate::new("http://purl.org/xpo/name").unwrap(),
            Literal::new_simple_literal("Attack \"armed\"\nline two").into(),
        ));
        store.insert(Triple::new(
            e1.into(),
            RdfPredicate::new("http://purl.org/xpo/overlay").unwrap(),
            overlay.clone().into(),
        ));
        store.insert(Triple::new(
            overlay.into(),
            RdfPredicate::new("http://purl.org/xpo/overlay_parent").unwrap(),
            NamedNode::new("http://www.wikidata.org/wiki/Q123").unwrap().into(),
        ));
        store
    }

    #[test]
    fn test_format_extensions() {
        assert_eq!(RdfFormat::Turtle.extension(), "ttl");
        assert_eq!(RdfFormat::NTriples.extension(), "nt");
    }

    #[test]
    fn test_both_formats_hold_the_same_graph() {
        let store = sample_store();
        let namespaces = NamespaceManager::new();

        let nt = RdfSerializer::serialize_store(&store, RdfFormat::NTriples, &namespaces).unwrap();
        let ttl = RdfSerializer::serialize_store(&store, RdfFormat::Turtle, &namespaces).unwrap();

        let from_nt: HashSet<Triple> = RdfParser::parse(&nt, RdfFormat::NTriples).unwrap().into_iter().collect();
        let from_ttl: HashSet<Triple> = RdfParser::parse(&ttl, RdfFormat::Turtle).unwrap().into_iter().collect();
        let original: HashSet<Triple> = store.iter().cloned().collect();

        assert_eq!(from_nt, original);
        assert_eq!(from_ttl, original);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(RdfParser::parse("<http://a> <http://b>", RdfFormat::NTriples).is_err());
    }

    #[test]
    fn test_write_store_hands_writer_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.nt");
        let store = sample_store();

        let file = std::fs::File::create(&path).unwrap();
        let mut file = RdfSerializer::write_store(&store, RdfFormat::NTriples, &NamespaceManager::new(), file).unwrap();
        file.flush().unwrap();

        let parsed = RdfParser::parse_file(&path, RdfFormat::NTriples).unwrap();
        assert_eq!(parsed.len(), 3);
    }

    #[test]
    fn test_turtle_uses_bound_prefixes() {
        let store = sample_store();
        let mut namespaces = NamespaceManager::new();
        namespaces.add_prefix("xpo", "http://purl.org/xpo/");
        namespaces.add_prefix("wd", "http://www.wikidata.org/wiki/");

        let ttl = RdfSerializer::serialize_store(&store, RdfFormat::Turtle, &namespaces).unwrap();
        assert!(ttl.contains("xpo:E1"));
        assert!(ttl.contains("xpo:overlay_parent wd:Q123"));
        assert!(!ttl.contains("<http://purl.org/xpo/E1>"));

        let reparsed: HashSet<Triple> = RdfParser::parse(&ttl, RdfFormat::Turtle).unwrap().into_iter().collect();
        let expected: HashSet<Triple> = store.iter().cloned().collect();
        assert_eq!(reparsed, expected);
    }
}
