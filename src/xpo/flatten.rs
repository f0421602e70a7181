//! Record flattening
//!
//! Walks the records of one category and writes their edges into a
//! [`TripleSink`]. Each top-level field is dispatched on its [`FieldRole`];
//! nested records without a key of their own get a synthetic blank node
//! whose only incoming edge comes from the parent.
//!
//! Malformed values never abort the run. They are recorded as
//! [`Diagnostic`]s and only the offending field (or list element) is skipped.

use super::diagnostics::{preview, Diagnostic, DiagnosticKind};
use super::document::{Category, Records};
use super::ids::{IdGenerator, SyntheticRole};
use super::vocabulary::{field, predicate, FieldRole, LdcArgumentField, LdcTypeField, XpoTerms};
use crate::rdf::{BlankNode, Literal, NamedNode, RdfObject, RdfSubject, Triple, TripleSink};
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

/// Treatment of the entries under `ldc_types[].ldc_arguments`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LdcArgumentMode {
    /// Legacy output: every leaf value is written
    /// as `ldc_code` and `ldc_constraints` produces no edges.
    #[default]
    Compatible,
    /// Write each leaf under its own name and one `ldc_constraint` edge per
    /// listed constraint; unknown keys are reported.
    Corrected,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FlattenOptions {
    pub ldc_argument_mode: LdcArgumentMode,
    /// Cap on records converted per category
    pub record_limit: Option<usize>,
}

/// Outcome of flattening one category
#[derive(Debug, Clone)]
pub struct CategoryReport {
    pub category: Category,
    /// Records converted (skipped ones excluded)
    pub records: usize,
    /// Records dropped because they were not objects or had an unusable key
    pub skipped: usize,
    /// Triples newly added to the sink
    pub triples: usize,
    pub diagnostics: Vec<Diagnostic>,
}

impl CategoryReport {
    fn new(category: Category) -> Self {
        Self {
            category,
            records: 0,
            skipped: 0,
            triples: 0,
            diagnostics: Vec::new(),
        }
    }
}

/// Record being flattened, for diagnostics
#[derive(Clone, Copy)]
struct Scope<'r> {
    category: Category,
    node: &'r str,
}

pub struct RecordFlattener<'a, S: TripleSink, G: IdGenerator> {
    terms: &'a XpoTerms,
    options: FlattenOptions,
    sink: &'a mut S,
    ids: &'a mut G,
    diagnostics: Vec<Diagnostic>,
    inserted: usize,
}

impl<'a, S: TripleSink, G: IdGenerator> RecordFlattener<'a, S, G> {
    pub fn new(terms: &'a XpoTerms, options: FlattenOptions, sink: &'a mut S, ids: &'a mut G) -> Self {
        Self {
            terms,
            options,
            sink,
            ids,
            diagnostics: Vec::new(),
            inserted: 0,
        }
    }

    /// Flatten every record of a category, in document order
    pub fn flatten_category(&mut self, category: Category, records: &Records) -> CategoryReport {
        let mut report = CategoryReport::new(category);
        let limit = self.options.record_limit.unwrap_or(usize::MAX);

        for (key, record) in records.iter().take(limit) {
            if self.flatten_record(category, key, record) {
                report.records += 1;
            } else {
                report.skipped += 1;
            }
        }

        report.triples = std::mem::take(&mut self.inserted);
        report.diagnostics = std::mem::take(&mut self.diagnostics);

        info!(
            "Found {} {} records ({} triples, {} diagnostics)",
            report.records,
            category,
            report.triples,
            report.diagnostics.len()
        );
        report
    }

    /// Flatten one record; false when the record had to be skipped entirely
    fn flatten_record(&mut self, category: Category, key: &str, record: &Value) -> bool {
        let scope = Scope { category, node: key };

        let Some(fields) = record.as_object() else {
            self.report(
                scope,
                DiagnosticKind::UnexpectedShape,
                "",
                format!("record is not an object: {}", preview(record)),
            );
            return false;
        };

        let subject: RdfSubject = match self.terms.node(key) {
            Ok(node) => node.into(),
            Err(e) => {
                self.report(scope, DiagnosticKind::InvalidIdentifier, "", e.to_string());
                return false;
            }
        };

        debug!("Flattening {} {} ({} fields)", category, key, fields.len());

        let mut ordered: Vec<(FieldRole, &String, &Value)> = fields
            .iter()
            .map(|(name, value)| (FieldRole::classify(name), name, value))
            .collect();
        ordered.sort_by_key(|(role, _, _)| *role);

        for (role, name, value) in ordered {
            match role {
                FieldRole::Literal => self.literal_edge(&subject, name, value, name, scope),
                FieldRole::OverlayParents => self.overlay_parents(&subject, value, scope),
                FieldRole::SimilarNodes => self.similar_nodes(&subject, value, scope),
                FieldRole::LdcTypes => self.ldc_types(&subject, value, scope),
                FieldRole::Arguments => self.arguments(&subject, value, scope),
                FieldRole::RelatedQnodes => self.related_qnodes(&subject, value, scope),
                FieldRole::Unrecognized => self.unrecognized(&subject, name, value, scope),
            }
        }

        true
    }

    fn overlay_parents(&mut self, subject: &RdfSubject, value: &Value, scope: Scope<'_>) {
        let path = field::OVERLAY_PARENTS;
        let Some(items) = self.expect_list(value, path, scope) else {
            return;
        };

        for item in items {
            let Some(entry) = self.expect_record(item, path, scope) else {
                continue;
            };
            let wd_node = self.required_str(entry, field::WD_NODE, path, scope);
            let name = self.required_str(entry, field::NAME, path, scope);
            let (Some(wd_node), Some(name)) = (wd_node, name) else {
                continue;
            };
            let Some(parent) = self.wikidata_ref(wd_node, path, scope) else {
                continue;
            };
            let Some(node) = self.synthetic(subject, predicate::OVERLAY, SyntheticRole::Overlay, scope) else {
                continue;
            };

            self.emit(&node, predicate::OVERLAY_PARENT, parent, scope);
            self.emit(&node, predicate::OVERLAY_PARENT_NAME, Literal::new_simple_literal(name), scope);
        }
    }

    fn similar_nodes(&mut self, subject: &RdfSubject, value: &Value, scope: Scope<'_>) {
        let path = field::SIMILAR_NODES;
        let Some(items) = self.expect_list(value, path, scope) else {
            return;
        };

        for item in items {
            let Some(entry) = self.expect_record(item, path, scope) else {
                continue;
            };
            let wd_node = self.required_str(entry, field::WD_NODE, path, scope);
            let name = self.required_str(entry, field::NAME, path, scope);
            let similarity = self.required_str(entry, field::SIMILARITY_TYPE, path, scope);
            let (Some(wd_node), Some(name), Some(similarity)) = (wd_node, name, similarity) else {
                continue;
            };
            let Some(target) = self.wikidata_ref(wd_node, path, scope) else {
                continue;
            };
            let similarity = match self.terms.ontology_ref(similarity) {
                Ok(node) => node,
                Err(e) => {
                    self.report(scope, DiagnosticKind::InvalidIdentifier, path, e.to_string());
                    continue;
                }
            };
            let Some(node) = self.synthetic(subject, predicate::SIMILAR_NODE, SyntheticRole::Similar, scope) else {
                continue;
            };

            self.emit(&node, predicate::WD_NODE, target, scope);
            self.emit(&node, predicate::NAME, Literal::new_simple_literal(name), scope);
            self.emit(&node, predicate::SIMILARITY_TYPE, similarity, scope);
        }
    }

    fn ldc_types(&mut self, subject: &RdfSubject, value: &Value, scope: Scope<'_>) {
        let path = field::LDC_TYPES;
        let Some(items) = self.expect_list(value, path, scope) else {
            return;
        };

        for item in items {
            let Some(entry) = self.expect_record(item, path, scope) else {
                continue;
            };
            let Some(node) = self.synthetic(subject, predicate::LDC_TYPE, SyntheticRole::LdcType, scope) else {
                continue;
            };

            for (name, sub_value) in entry {
                let sub_path = format!("{}.{}", path, name);
                match LdcTypeField::classify(name) {
                    LdcTypeField::Name => {
                        self.literal_edge(&node, predicate::NAME, sub_value, &sub_path, scope)
                    }
                    LdcTypeField::LdcCode => {
                        self.literal_edge(&node, predicate::LDC_CODE, sub_value, &sub_path, scope)
                    }
                    LdcTypeField::OtherPbRolesets => {
                        let Some(rolesets) = self.expect_list(sub_value, &sub_path, scope) else {
                            continue;
                        };
                        for roleset in rolesets {
                            self.literal_edge(&node, predicate::OTHER_PB_ROLESET, roleset, &sub_path, scope);
                        }
                    }
                    LdcTypeField::LdcArguments => self.ldc_arguments(&node, sub_value, &sub_path, scope),
                    LdcTypeField::Unrecognized => self.report(
                        scope,
                        DiagnosticKind::UnrecognizedSubField,
                        &sub_path,
                        format!("skipped value {}", preview(sub_value)),
                    ),
                }
            }
        }
    }

    fn ldc_arguments(&mut self, type_node: &RdfSubject, value: &Value, path: &str, scope: Scope<'_>) {
        let Some(items) = self.expect_list(value, path, scope) else {
            return;
        };
        let mode = self.options.ldc_argument_mode;

        for item in items {
            let Some(entry) = self.expect_record(item, path, scope) else {
                continue;
            };
            let Some(node) = self.synthetic(type_node, predicate::LDC_ARGUMENT, SyntheticRole::LdcArgument, scope) else {
                continue;
            };

            for (name, arg_value) in entry {
                let arg_path = format!("{}.{}", path, name);
                match (LdcArgumentField::classify(name), mode) {
                    (LdcArgumentField::Leaf, LdcArgumentMode::Compatible) => {
                        self.literal_edge(&node, predicate::LDC_CODE, arg_value, &arg_path, scope)
                    }
                    (LdcArgumentField::Leaf, LdcArgumentMode::Corrected) => {
                        self.literal_edge(&node, name, arg_value, &arg_path, scope)
                    }
                    (LdcArgumentField::Constraints, LdcArgumentMode::Corrected) => {
                        let Some(constraints) = self.expect_list(arg_value, &arg_path, scope) else {
                            continue;
                        };
                        for constraint in constraints {
                            self.literal_edge(&node, predicate::LDC_CONSTRAINT, constraint, &arg_path, scope);
                        }
                    }
                    (LdcArgumentField::Other, LdcArgumentMode::Corrected) => self.report(
                        scope,
                        DiagnosticKind::UnrecognizedSubField,
                        &arg_path,
                        format!("skipped value {}", preview(arg_value)),
                    ),
                    (_, LdcArgumentMode::Compatible) => {}
                }
            }
        }
    }

    fn arguments(&mut self, subject: &RdfSubject, value: &Value, scope: Scope<'_>) {
        let path = field::ARGUMENTS;
        let Some(items) = self.expect_list(value, path, scope) else {
            return;
        };
        let constraints_path = format!("{}.{}", path, field::CONSTRAINTS);

        for item in items {
            let Some(entry) = self.expect_record(item, path, scope) else {
                continue;
            };
            let Some(node) = self.synthetic(subject, predicate::ARGUMENT, SyntheticRole::Argument, scope) else {
                continue;
            };

            if let Some(name) = entry.get(field::NAME) {
                self.literal_edge(&node, predicate::NAME, name, path, scope);
            }
            if let Some(short_name) = entry.get(field::SHORT_NAME) {
                self.literal_edge(&node, predicate::SHORT_NAME, short_name, path, scope);
            }

            let Some(constraints) = entry.get(field::CONSTRAINTS) else {
                continue;
            };
            let Some(constraints) = self.expect_list(constraints, &constraints_path, scope) else {
                continue;
            };

            for constraint in constraints {
                let Some(c) = self.expect_record(constraint, &constraints_path, scope) else {
                    continue;
                };
                let name = self.required_str(c, field::NAME, &constraints_path, scope);
                let wd_node = self.required_str(c, field::WD_NODE, &constraints_path, scope);
                let (Some(name), Some(wd_node)) = (name, wd_node) else {
                    continue;
                };
                let Some(target) = self.wikidata_ref(wd_node, &constraints_path, scope) else {
                    continue;
                };
                let Some(constraint_node) =
                    self.synthetic(&node, predicate::CONSTRAINT, SyntheticRole::Constraint, scope)
                else {
                    continue;
                };

                self.emit(&constraint_node, predicate::NAME, Literal::new_simple_literal(name), scope);
                self.emit(&constraint_node, predicate::WD_NODE, target, scope);
            }
        }
    }

    fn related_qnodes(&mut self, subject: &RdfSubject, value: &Value, scope: Scope<'_>) {
        let path = field::RELATED_QNODES;
        let Some(items) = self.expect_list(value, path, scope) else {
            return;
        };

        for item in items {
            let Some(entry) = self.expect_record(item, path, scope) else {
                continue;
            };
            let wd_node = self.required_str(entry, field::WD_NODE, path, scope);
            let name = self.required_str(entry, field::NAME, path, scope);
            let (Some(wd_node), Some(name)) = (wd_node, name) else {
                continue;
            };
            let Some(target) = self.wikidata_ref(wd_node, path, scope) else {
                continue;
            };
            let Some(node) =
                self.synthetic(subject, predicate::RELATED_QNODE, SyntheticRole::RelatedQnode, scope)
            else {
                continue;
            };

            self.emit(&node, predicate::WD_NODE, target, scope);
            self.emit(&node, predicate::NAME, Literal::new_simple_literal(name), scope);
        }
    }

    /// Fields outside the vocabulary: one literal per list item, or one for a scalar
    fn unrecognized(&mut self, subject: &RdfSubject, name: &str, value: &Value, scope: Scope<'_>) {
        match value {
            Value::Array(items) => {
                self.report(
                    scope,
                    DiagnosticKind::UnrecognizedField,
                    name,
                    format!("list of {} value(s) emitted as literals", items.len()),
                );
                for item in items {
                    self.fallback_edge(subject, name, item, scope);
                }
            }
            other => {
                self.report(
                    scope,
                    DiagnosticKind::UnrecognizedField,
                    name,
                    format!("value {} emitted as a literal", preview(other)),
                );
                self.fallback_edge(subject, name, other, scope);
            }
        }
    }

    fn fallback_edge(&mut self, subject: &RdfSubject, name: &str, value: &Value, scope: Scope<'_>) {
        let text = match value {
            Value::Null => {
                self.report(scope, DiagnosticKind::UnexpectedShape, name, "null value".to_string());
                return;
            }
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        self.emit(subject, name, Literal::new_simple_literal(text), scope);
    }

    /// Literal edge for a scalar value; anything else is reported and skipped
    fn literal_edge(
        &mut self,
        subject: &RdfSubject,
        predicate_name: &str,
        value: &Value,
        path: &str,
        scope: Scope<'_>,
    ) {
        match scalar_text(value) {
            Some(text) => self.emit(subject, predicate_name, Literal::new_simple_literal(text), scope),
            None => self.report(
                scope,
                DiagnosticKind::UnexpectedShape,
                path,
                format!("expected a scalar, got {}", preview(value)),
            ),
        }
    }

    /// Create a synthetic node and link it from `parent`
    fn synthetic(
        &mut self,
        parent: &RdfSubject,
        link: &str,
        role: SyntheticRole,
        scope: Scope<'_>,
    ) -> Option<RdfSubject> {
        let label = self.ids.next_label(role);
        match BlankNode::new(&label) {
            Ok(node) => {
                self.emit(parent, link, node.clone(), scope);
                Some(node.into())
            }
            Err(e) => {
                self.report(scope, DiagnosticKind::InvalidIdentifier, link, e.to_string());
                None
            }
        }
    }

    fn emit(
        &mut self,
        subject: &RdfSubject,
        predicate_name: &str,
        object: impl Into<RdfObject>,
        scope: Scope<'_>,
    ) {
        match self.terms.predicate(predicate_name) {
            Ok(predicate) => {
                if self.sink.insert(Triple::new(subject.clone(), predicate, object.into())) {
                    self.inserted += 1;
                }
            }
            Err(e) => self.report(scope, DiagnosticKind::InvalidIdentifier, predicate_name, e.to_string()),
        }
    }

    fn wikidata_ref(&mut self, qnode: &str, path: &str, scope: Scope<'_>) -> Option<NamedNode> {
        match self.terms.wikidata(qnode) {
            Ok(node) => Some(node),
            Err(e) => {
                self.report(scope, DiagnosticKind::InvalidIdentifier, path, e.to_string());
                None
            }
        }
    }

    fn expect_list<'v>(&mut self, value: &'v Value, path: &str, scope: Scope<'_>) -> Option<&'v Vec<Value>> {
        match value {
            Value::Array(items) => Some(items),
            other => {
                self.report(
                    scope,
                    DiagnosticKind::UnexpectedShape,
                    path,
                    format!("expected a list, got {}", preview(other)),
                );
                None
            }
        }
    }

    fn expect_record<'v>(
        &mut self,
        value: &'v Value,
        path: &str,
        scope: Scope<'_>,
    ) -> Option<&'v Map<String, Value>> {
        match value {
            Value::Object(entry) => Some(entry),
            other => {
                self.report(
                    scope,
                    DiagnosticKind::UnexpectedShape,
                    path,
                    format!("expected a record, got {}", preview(other)),
                );
                None
            }
        }
    }

    fn required_str<'v>(
        &mut self,
        entry: &'v Map<String, Value>,
        key: &str,
        path: &str,
        scope: Scope<'_>,
    ) -> Option<&'v str> {
        match entry.get(key) {
            Some(Value::String(s)) => Some(s.as_str()),
            Some(other) => {
                self.report(
                    scope,
                    DiagnosticKind::UnexpectedShape,
                    path,
                    format!("'{}' should be a string, got {}", key, preview(other)),
                );
                None
            }
            None => {
                self.report(scope, DiagnosticKind::MissingField, path, format!("no '{}' key", key));
                None
            }
        }
    }

    fn report(&mut self, scope: Scope<'_>, kind: DiagnosticKind, path: &str, detail: String) {
        let diagnostic = Diagnostic {
            kind,
            category: scope.category,
            node: scope.node.to_string(),
            field: path.to_string(),
            detail,
        };
        if kind.is_notice() {
            info!("{}", diagnostic);
        } else {
            warn!("{}", diagnostic);
        }
        self.diagnostics.push(diagnostic);
    }
}

/// Text of a string, number or boolean
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
