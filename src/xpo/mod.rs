//! XPO export model and the record flattener
//!
//! The export is a JSON document with four collections of records (events,
//! entities, relations, temporal relations). [`RecordFlattener`] turns each
//! record into RDF edges; nested records become synthetic blank nodes.

mod diagnostics;
mod document;
mod flatten;
mod ids;
mod vocabulary;

pub use diagnostics::{Diagnostic, DiagnosticKind};
pub use document::{Category, Records, XpoDocument};
pub use flatten::{CategoryReport, FlattenOptions, LdcArgumentMode, RecordFlattener};
pub use ids::{
    IdGenerator, SequentialIdGenerator, ShortIdGenerator, SyntheticRole, SHORT_ID_ALPHABET,
    SHORT_ID_LEN,
};
pub use vocabulary::{
    field, predicate, FieldRole, LdcArgumentField, LdcTypeField, XpoTerms, DWD_NS, LITERAL_FIELDS,
    WD_NS, XPO_NS,
};
