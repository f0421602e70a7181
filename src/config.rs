//! Converter configuration
//!
//! There is no configuration file or environment lookup: the binary always
//! runs with [`ConverterConfig::default`]. The builder methods exist so
//! tests and library callers can point the converter elsewhere.

use crate::xpo::{FlattenOptions, LdcArgumentMode, WD_NS, XPO_NS};
use std::path::{Path, PathBuf};

/// XPO JSON export read by the binary
pub const DEFAULT_INPUT_PATH: &str = "xpo.json";
/// Turtle output written by the binary
pub const DEFAULT_TURTLE_PATH: &str = "xpo.ttl";
/// N-Triples output written by the binary
pub const DEFAULT_NTRIPLES_PATH: &str = "xpo.nt";

#[derive(Debug, Clone)]
pub struct ConverterConfig {
    /// Input document
    pub input_path: PathBuf,
    /// Turtle destination
    pub turtle_path: PathBuf,
    /// N-Triples destination
    pub ntriples_path: PathBuf,
    /// Namespace for record nodes and predicates
    pub ontology_namespace: String,
    /// Namespace for external Wikidata references
    pub wikidata_namespace: String,
    /// Cap on records converted per category (None = all)
    pub record_limit: Option<usize>,
    /// See [`LdcArgumentMode`]
    pub ldc_argument_mode: LdcArgumentMode,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            turtle_path: PathBuf::from(DEFAULT_TURTLE_PATH),
            ntriples_path: PathBuf::from(DEFAULT_NTRIPLES_PATH),
            ontology_namespace: XPO_NS.to_string(),
            wikidata_namespace: WD_NS.to_string(),
            record_limit: None,
            ldc_argument_mode: LdcArgumentMode::default(),
        }
    }
}

impl ConverterConfig {
    /// Read `xpo.json` from `dir` and write both outputs next to it
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            input_path: dir.join(DEFAULT_INPUT_PATH),
            turtle_path: dir.join(DEFAULT_TURTLE_PATH),
            ntriples_path: dir.join(DEFAULT_NTRIPLES_PATH),
            ..Self::default()
        }
    }

    pub fn with_input(mut self, path: impl Into<PathBuf>) -> Self {
        self.input_path = path.into();
        self
    }

    pub fn with_outputs(mut self, turtle: impl Into<PathBuf>, ntriples: impl Into<PathBuf>) -> Self {
        self.turtle_path = turtle.into();
        self.ntriples_path = ntriples.into();
        self
    }

    pub fn with_record_limit(mut self, limit: usize) -> Self {
        self.record_limit = Some(limit);
        self
    }

    pub fn with_ldc_argument_mode(mut self, mode: LdcArgumentMode) -> Self {
        self.ldc_argument_mode = mode;
        self
    }

    pub fn with_namespaces(mut self, ontology: impl Into<String>, wikidata: impl Into<String>) -> Self {
        self.ontology_namespace = ontology.into();
        self.wikidata_namespace = wikidata.into();
        self
    }

    /// Options handed to the record flattener
    pub fn flatten_options(&self) -> FlattenOptions {
        FlattenOptions {
            ldc_argument_mode: self.ldc_argument_mode,
            record_limit: self.record_limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths() {
        let config = ConverterConfig::default();
        assert_eq!(config.input_path, PathBuf::from("xpo.json"));
        assert_eq!(config.turtle_path, PathBuf::from("xpo.ttl"));
        assert_eq!(config.ntriples_path, PathBuf::from("xpo.nt"));
        assert_eq!(config.ontology_namespace, "http://purl.org/xpo/");
        assert_eq!(config.record_limit, None);
        assert_eq!(config.ldc_argument_mode, LdcArgumentMode::Compatible);
    }

    #[test]
    fn test_in_dir() {
        let config = ConverterConfig::in_dir("/tmp/run");
        assert_eq!(config.input_path, PathBuf::from("/tmp/run/xpo.json"));
        assert_eq!(config.ntriples_path, PathBuf::from("/tmp/run/xpo.nt"));
    }

    #[test]
    fn test_builders_feed_flatten_options() {
        let options = ConverterConfig::default()
            .with_record_limit(10)
            .with_ldc_argument_mode(LdcArgumentMode::Corrected)
            .flatten_options();
        assert_eq!(options.record_limit, Some(10));
        assert_eq!(options.ldc_argument_mode, LdcArgumentMode::Corrected);
    }
}
