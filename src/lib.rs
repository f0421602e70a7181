//! XPO to RDF converter
//!
//! Converts the JSON export of the XPO knowledge graph (events, entities,
//! relations and temporal relations) into an RDF graph and writes it as
//! Turtle and N-Triples.
//!
//! # Layout
//!
//! - [`xpo`]: the export model, the field vocabulary and the record flattener
//! - [`rdf`]: triples, the in-memory store, namespaces and serialization
//! - [`convert`]: the load → flatten → write pipeline
//!
//! ## Example Usage
//!
//! ```rust
//! use xpo_rdf::{Converter, ConverterConfig, RdfStore, SequentialIdGenerator, XpoDocument};
//!
//! let doc = XpoDocument::from_json(r#"{
//!     "events": {"DWD_EVE_1": {"name": "Attack",
//!                              "overlay_parents": [{"wd_node": "Q123", "name": "Conflict"}]}},
//!     "entities": {}, "relations": {}, "temporal_relations": {}
//! }"#).unwrap();
//!
//! let converter = Converter::new(ConverterConfig::default()).unwrap();
//! let mut store = RdfStore::new();
//! let summary = converter.convert_document(&doc, &mut store, &mut SequentialIdGenerator::new());
//!
//! assert_eq!(summary.records(), 1);
//! assert_eq!(store.len(), 4);
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod convert;
pub mod error;
pub mod rdf;
pub mod xpo;

// Re-export main types for convenience
pub use config::{ConverterConfig, DEFAULT_INPUT_PATH, DEFAULT_NTRIPLES_PATH, DEFAULT_TURTLE_PATH};
pub use convert::{ConversionSummary, Converter};
pub use error::{ConvertError, ConvertResult};

pub use rdf::{
    BlankNode, Literal, NamedNode, NamespaceManager, RdfFormat, RdfObject, RdfParser,
    RdfPredicate, RdfSerializer, RdfStore, RdfSubject, Triple, TripleSink,
};

pub use xpo::{
    Category, CategoryReport, Diagnostic, DiagnosticKind, FlattenOptions, IdGenerator,
    LdcArgumentMode, RecordFlattener, SequentialIdGenerator, ShortIdGenerator, SyntheticRole,
    XpoDocument, XpoTerms,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert_eq!(version(), "1.0.0");
    }
}
