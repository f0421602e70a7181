//! Turtle format implementation

use super::{collect_triples, ParseResult, SerializeResult};
use crate::rdf::{NamedNode, NamespaceManager, RdfObject, RdfSubject, Triple};
use rio_turtle::TurtleParser;
use std::io::{BufReader, Cursor, Write};

/// Turtle parser
pub struct TurtleParserWrapper;

impl TurtleParserWrapper {
    /// Parse Turtle string to Triples
    pub fn parse(input: &str) -> ParseResult<Vec<Triple>> {
        let cursor = Cursor::new(input);
        let reader = BufReader::new(cursor);
        collect_triples(TurtleParser::new(reader, None))
    }
}

/// Turtle serializer
pub struct TurtleSerializerWrapper;

impl TurtleSerializerWrapper {
    /// Write a `@prefix` header followed by the triples
    ///
    /// Consecutive triples sharing a subject are folded into one
    /// `;`-separated block, so callers pass triples grouped by subject.
    /// IRIs under a bound namespace are written as prefixed names.
    pub fn write<W: Write>(
        triples: &[&Triple],
        namespaces: &NamespaceManager,
        mut write: W,
    ) -> SerializeResult<W> {
        for ns in namespaces.prefixes() {
            writeln!(write, "@prefix {}: <{}> .", ns.prefix, ns.iri)?;
        }

        let mut current: Option<&RdfSubject> = None;
        for triple in triples {
            let predicate = iri_term(triple.predicate.as_str(), namespaces);
            let object = object_term(&triple.object, namespaces);

            if current == Some(&triple.subject) {
                write!(write, " ;\n    {} {}", predicate, object)?;
            } else {
                if current.is_some() {
                    writeln!(write, " .")?;
                }
                let subject = subject_term(&triple.subject, namespaces);
                write!(write, "\n{}\n    {} {}", subject, predicate, object)?;
                current = Some(&triple.subject);
            }
        }
        if current.is_some() {
            writeln!(write, " .")?;
        }

        Ok(write)
    }
}

fn iri_term(iri: &str, namespaces: &NamespaceManager) -> String {
    namespaces
        .compact(iri)
        .unwrap_or_else(|| format!("<{}>", iri))
}

fn named_term(node: &NamedNode, namespaces: &NamespaceManager) -> String {
    iri_term(node.as_str(), namespaces)
}

fn subject_term(subject: &RdfSubject, namespaces: &NamespaceManager) -> String {
    match subject {
        RdfSubject::NamedNode(n) => named_term(n, namespaces),
        RdfSubject::BlankNode(b) => b.to_string(),
    }
}

/// Literals keep their N-Triples form, which is valid Turtle
fn object_term(object: &RdfObject, namespaces: &NamespaceManager) -> String {
    match object {
        RdfObject::NamedNode(n) => named_term(n, namespaces),
        RdfObject::BlankNode(b) => b.to_string(),
        RdfObject::Literal(l) => l.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(triples: &[Triple], namespaces: &NamespaceManager) -> String {
        let refs: Vec<&Triple> = triples.iter().collect();
        String::from_utf8(TurtleSerializerWrapper::write(&refs, namespaces, Vec::new()).unwrap()).unwrap()
    }

    #[test]
    fn test_turtle_roundtrip() {
        let input = r#"<http://purl.org/xpo/E1> <http://purl.org/xpo/name> "Attack" ."#;
        let triples = TurtleParserWrapper::parse(input).unwrap();
        assert_eq!(triples.len(), 1);

        let output = render(&triples, &NamespaceManager::new());
        assert!(output.starts_with("@prefix owl: <http://www.w3.org/2002/07/owl#> ."));
        assert!(output.contains("<http://purl.org/xpo/E1>"));

        let reparsed = TurtleParserWrapper::parse(&output).unwrap();
        assert_eq!(reparsed, triples);
    }

    #[test]
    fn test_turtle_groups_subject_once() {
        let input = "<http://purl.org/xpo/E1> <http://purl.org/xpo/name> \"Attack\" .\n\
                     <http://purl.org/xpo/E1> <http://purl.org/xpo/comment> \"violent\" .\n";
        let triples = TurtleParserWrapper::parse(input).unwrap();
        let output = render(&triples, &NamespaceManager::new());

        assert_eq!(output.matches("<http://purl.org/xpo/E1>").count(), 1);
        assert_eq!(TurtleParserWrapper::parse(&output).unwrap().len(), 2);
    }

    #[test]
    fn test_turtle_prefixed_names() {
        let input = "<http://purl.org/xpo/DWD_EVE_1> <http://purl.org/xpo/overlay> _:OVERLAY_1 .\n\
                     _:OVERLAY_1 <http://purl.org/xpo/overlay_parent> <http://www.wikidata.org/wiki/Q123> .\n\
                     _:OVERLAY_1 <http://purl.org/xpo/similarity_type> <http://purl.org/xpo/a.b> .\n";
        let triples = TurtleParserWrapper::parse(input).unwrap();
        let mut namespaces = NamespaceManager::new();
        namespaces.add_prefix("xpo", "http://purl.org/xpo/");
        namespaces.add_prefix("wd", "http://www.wikidata.org/wiki/");

        let output = render(&triples, &namespaces);
        assert!(output.contains("\nxpo:DWD_EVE_1\n    xpo:overlay _:OVERLAY_1 .\n"));
        assert!(output.contains("xpo:overlay_parent wd:Q123 ;"));
        assert!(output.contains("<http://purl.org/xpo/a.b>"));

        assert_eq!(TurtleParserWrapper::parse(&output).unwrap(), triples);
    }

    #[test]
    fn test_turtle_escapes_literals() {
        let input = r#"<http://purl.org/xpo/E1> <http://purl.org/xpo/comment> "say \"hi\"\nbye" ."#;
        let triples = TurtleParserWrapper::parse(input).unwrap();
        let output = render(&triples, &NamespaceManager::new());

        assert_eq!(TurtleParserWrapper::parse(&output).unwrap(), triples);
    }
}
