//! N-Triples format implementation

use super::{collect_triples, to_rio, ParseResult, SerializeResult};
use crate::rdf::Triple;
use rio_api::formatter::TriplesFormatter;
use rio_turtle::{NTriplesFormatter, NTriplesParser};
use std::io::{Cursor, Write};

/// N-Triples parser
pub struct NTriplesParserWrapper;

impl NTriplesParserWrapper {
    /// Parse an N-Triples string to Triples
    pub fn parse(input: &str) -> ParseResult<Vec<Triple>> {
        collect_triples(NTriplesParser::new(Cursor::new(input)))
    }
}

/// N-Triples serializer
pub struct NTriplesSerializerWrapper;

impl NTriplesSerializerWrapper {
    /// Write Triples as N-Triples, one per line, in the given order
    pub fn write<W: Write>(triples: &[&Triple], write: W) -> SerializeResult<W> {
        let mut formatter = NTriplesFormatter::new(write);
        for triple in triples {
            formatter.format(&to_rio(triple))?;
        }
        Ok(formatter.finish()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ntriples_roundtrip() {
        let input = "<http://purl.org/xpo/E1> <http://purl.org/xpo/overlay> _:OVERLAY_1 .\n\
                     _:OVERLAY_1 <http://purl.org/xpo/overlay_parent_name> \"Conflict\" .\n";
        let triples = NTriplesParserWrapper::parse(input).unwrap();
        assert_eq!(triples.len(), 2);
        assert!(triples[0].object.is_blank_node());

        let refs: Vec<&Triple> = triples.iter().collect();
        let output = String::from_utf8(NTriplesSerializerWrapper::write(&refs, Vec::new()).unwrap()).unwrap();
        assert_eq!(output.lines().count(), 2);
        assert!(output.contains("_:OVERLAY_1 <http://purl.org/xpo/overlay_parent_name> \"Conflict\" ."));
    }
}
