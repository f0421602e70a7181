//! The XPO JSON export
//!
//! Four top-level collections, each mapping a node key to a record. Key
//! order is kept as it appears in the file.

use crate::error::{ConvertError, ConvertResult};
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use std::path::Path;
use tracing::info;

/// Node key → record; records stay untyped so unknown shapes can be reported
pub type Records = IndexMap<String, Value>;

/// One of the four record collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Event,
    Entity,
    Relation,
    TemporalRelation,
}

impl Category {
    /// Processing order
    pub const ALL: [Category; 4] = [
        Category::Event,
        Category::Entity,
        Category::Relation,
        Category::TemporalRelation,
    ];

    /// Top-level key in the document
    pub fn key(&self) -> &'static str {
        match self {
            Category::Event => "events",
            Category::Entity => "entities",
            Category::Relation => "relations",
            Category::TemporalRelation => "temporal_relations",
        }
    }

    /// Singular name used in log lines
    pub fn label(&self) -> &'static str {
        match self {
            Category::Event => "event",
            Category::Entity => "entity",
            Category::Relation => "relation",
            Category::TemporalRelation => "temporal_relation",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Parsed XPO document
#[derive(Debug, Clone, Default, Deserialize)]
pub struct XpoDocument {
    /// Release of the export, e.g. "5.4.7"
    #[serde(default)]
    pub version: Option<Value>,
    pub events: Records,
    pub entities: Records,
    pub relations: Records,
    pub temporal_relations: Records,
}

impl XpoDocument {
    /// Parse a document from JSON text
    pub fn from_json(input: &str) -> ConvertResult<Self> {
        serde_json::from_str(input).map_err(ConvertError::InvalidDocument)
    }

    /// Read and parse a document from disk
    pub fn load(path: &Path) -> ConvertResult<Self> {
        let input = std::fs::read_to_string(path).map_err(|source| ConvertError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let doc = Self::from_json(&input)?;

        info!(
            "Loaded XPO document {:?} (version {}): {} events, {} entities, {} relations, {} temporal relations",
            path,
            doc.version_string(),
            doc.events.len(),
            doc.entities.len(),
            doc.relations.len(),
            doc.temporal_relations.len()
        );

        Ok(doc)
    }

    /// Records of one category
    pub fn records(&self, category: Category) -> &Records {
        match category {
            Category::Event => &self.events,
            Category::Entity => &self.entities,
            Category::Relation => &self.relations,
            Category::TemporalRelation => &self.temporal_relations,
        }
    }

    /// Version as display text, "unknown" when absent
    pub fn version_string(&self) -> String {
        match &self.version {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => "unknown".to_string(),
        }
    }
}
