//! XPO field vocabulary and IRI construction
//!
//! Field names in the export come from a closed, known set. Each name maps
//! to a [`FieldRole`]; the variant order is the order fields of one record
//! are processed in.

use crate::rdf::{Namespace, NamedNode, NamespaceManager, RdfPredicate, RdfResult};

/// Ontology namespace for subject nodes and predicates
pub const XPO_NS: &str = "http://purl.org/xpo/";
/// Alternate ontology namespace, bound in the output only
pub const DWD_NS: &str = "http://purl.org/dwd/";
/// Wikidata entity namespace for external references
pub const WD_NS: &str = "http://www.wikidata.org/wiki/";

/// Top-level fields with a plain string value
pub const LITERAL_FIELDS: [&str; 10] = [
    "type",
    "comment",
    "curated_by",
    "description",
    "wd_node",
    "name",
    "wd_description",
    "template",
    "template_curation",
    "pb_roleset",
];

pub mod field {
    pub const OVERLAY_PARENTS: &str = "overlay_parents";
    pub const SIMILAR_NODES: &str = "similar_nodes";
    pub const LDC_TYPES: &str = "ldc_types";
    pub const ARGUMENTS: &str = "arguments";
    pub const RELATED_QNODES: &str = "related_qnodes";

    pub const WD_NODE: &str = "wd_node";
    pub const NAME: &str = "name";
    pub const SHORT_NAME: &str = "short_name";
    pub const SIMILARITY_TYPE: &str = "similarity_type";
    pub const CONSTRAINTS: &str = "constraints";

    pub const LDC_CODE: &str = "ldc_code";
    pub const OTHER_PB_ROLESETS: &str = "other_pb_rolesets";
    pub const LDC_ARGUMENTS: &str = "ldc_arguments";
    pub const LDC_NAME: &str = "ldc_name";
    pub const LDC_ARGUMENT_OUTPUT_VALUE: &str = "ldc_argument_output_value";
    pub const DWD_ARG_NAME: &str = "dwd_arg_name";
    pub const LDC_CONSTRAINTS: &str = "ldc_constraints";
}

pub mod predicate {
    pub const OVERLAY: &str = "overlay";
    pub const OVERLAY_PARENT: &str = "overlay_parent";
    pub const OVERLAY_PARENT_NAME: &str = "overlay_parent_name";
    pub const SIMILAR_NODE: &str = "similarNode";
    pub const SIMILARITY_TYPE: &str = "similarity_type";
    pub const WD_NODE: &str = "wd_node";
    pub const NAME: &str = "name";
    pub const SHORT_NAME: &str = "short_name";
    pub const LDC_TYPE: &str = "ldc_type";
    pub const LDC_CODE: &str = "ldc_code";
    pub const OTHER_PB_ROLESET: &str = "other_pb_roleset";
    pub const LDC_ARGUMENT: &str = "ldc_argument";
    pub const LDC_CONSTRAINT: &str = "ldc_constraint";
    pub const ARGUMENT: &str = "argument";
    pub const CONSTRAINT: &str = "constraint";
    pub const RELATED_QNODE: &str = "related_qnode";
}

/// How a top-level record field is turned into edges
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldRole {
    /// Plain string value, one literal edge
    Literal,
    /// `overlay_parents`: list of `{wd_node, name}`
    OverlayParents,
    /// `similar_nodes`: list of `{wd_node, name, similarity_type}`
    SimilarNodes,
    /// `ldc_types`: list of nested LDC type descriptors
    LdcTypes,
    /// `arguments`: list of `{name, short_name, constraints}`
    Arguments,
    /// `related_qnodes`: list of `{wd_node, name}`
    RelatedQnodes,
    /// Anything else; emitted as literals with a notice
    Unrecognized,
}

impl FieldRole {
    pub fn classify(name: &str) -> Self {
        match name {
            field::OVERLAY_PARENTS => FieldRole::OverlayParents,
            field::SIMILAR_NODES => FieldRole::SimilarNodes,
            field::LDC_TYPES => FieldRole::LdcTypes,
            field::ARGUMENTS => FieldRole::Arguments,
            field::RELATED_QNODES => FieldRole::RelatedQnodes,
            other if LITERAL_FIELDS.contains(&other) => FieldRole::Literal,
            _ => FieldRole::Unrecognized,
        }
    }
}

/// Sub-fields of one `ldc_types` entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LdcTypeField {
    Name,
    LdcCode,
    OtherPbRolesets,
    LdcArguments,
    Unrecognized,
}

impl LdcTypeField {
    pub fn classify(name: &str) -> Self {
        match name {
            field::NAME => LdcTypeField::Name,
            field::LDC_CODE => LdcTypeField::LdcCode,
            field::OTHER_PB_ROLESETS => LdcTypeField::OtherPbRolesets,
            field::LDC_ARGUMENTS => LdcTypeField::LdcArguments,
            _ => LdcTypeField::Unrecognized,
        }
    }
}

/// Keys of one `ldc_arguments` entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LdcArgumentField {
    /// `ldc_name`, `ldc_argument_output_value` or `dwd_arg_name`
    Leaf,
    /// `ldc_constraints`: list of entity type codes
    Constraints,
    Other,
}

impl LdcArgumentField {
    pub fn classify(name: &str) -> Self {
        match name {
            field::LDC_NAME | field::LDC_ARGUMENT_OUTPUT_VALUE | field::DWD_ARG_NAME => {
                LdcArgumentField::Leaf
            }
            field::LDC_CONSTRAINTS => LdcArgumentField::Constraints,
            _ => LdcArgumentField::Other,
        }
    }
}

/// IRI factory for the converted graph
#[derive(Debug, Clone)]
pub struct XpoTerms {
    ontology: Namespace,
    wikidata: Namespace,
}

impl XpoTerms {
    /// Build terms over the given namespaces, rejecting IRIs oxrdf won't accept
    pub fn new(ontology_iri: &str, wikidata_iri: &str) -> RdfResult<Self> {
        NamedNode::new(ontology_iri)?;
        NamedNode::new(wikidata_iri)?;
        Ok(Self {
            ontology: Namespace::new("xpo", ontology_iri),
            wikidata: Namespace::new("wd", wikidata_iri),
        })
    }

    /// Subject node for a top-level record key
    pub fn node(&self, key: &str) -> RdfResult<NamedNode> {
        self.ontology.term(key)
    }

    /// Predicate named after a field
    pub fn predicate(&self, name: &str) -> RdfResult<RdfPredicate> {
        self.ontology.predicate(name)
    }

    /// Reference into the ontology namespace (e.g. a similarity type)
    pub fn ontology_ref(&self, local: &str) -> RdfResult<NamedNode> {
        self.ontology.term(local)
    }

    /// External Wikidata reference such as `Q123`
    pub fn wikidata(&self, qnode: &str) -> RdfResult<NamedNode> {
        self.wikidata.term(qnode)
    }

    /// Prefixes bound in serialized output
    pub fn namespace_manager(&self) -> NamespaceManager {
        let mut mgr = NamespaceManager::new();
        mgr.add_prefix("dwd", DWD_NS);
        mgr.bind(&self.ontology);
        mgr.bind(&self.wikidata);
        mgr
    }
}

impl Default for XpoTerms {
    fn default() -> Self {
        Self {
            ontology: Namespace::new("xpo", XPO_NS),
            wikidata: Namespace::new("wd", WD_NS),
        }
    }
}
