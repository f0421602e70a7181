//! End-to-end conversion: load the export, flatten it, write both formats

use crate::config::ConverterConfig;
use crate::error::{ConvertError, ConvertResult};
use crate::rdf::{NamespaceManager, RdfFormat, RdfSerializer, RdfStore, TripleSink};
use crate::xpo::{
    Category, CategoryReport, Diagnostic, IdGenerator, RecordFlattener, ShortIdGenerator,
    XpoDocument, XpoTerms,
};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// What a conversion produced
#[derive(Debug, Clone)]
pub struct ConversionSummary {
    /// Version string of the input document
    pub version: String,
    /// One report per category, in processing order
    pub categories: Vec<CategoryReport>,
    /// Distinct triples in the output graph
    pub triples: usize,
}

impl ConversionSummary {
    /// Report for one category
    pub fn report(&self, category: Category) -> Option<&CategoryReport> {
        self.categories.iter().find(|r| r.category == category)
    }

    /// Records converted across all categories
    pub fn records(&self) -> usize {
        self.categories.iter().map(|r| r.records).sum()
    }

    /// All diagnostics in processing order
    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.categories.iter().flat_map(|r| r.diagnostics.iter())
    }
}

pub struct Converter {
    config: ConverterConfig,
    terms: XpoTerms,
}

impl Converter {
    /// Create a converter, validating the configured namespaces
    pub fn new(config: ConverterConfig) -> ConvertResult<Self> {
        let terms = XpoTerms::new(&config.ontology_namespace, &config.wikidata_namespace)
            .map_err(|e| ConvertError::InvalidNamespace(e.to_string()))?;
        Ok(Self { config, terms })
    }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// Prefixes written at the top of the Turtle output
    pub fn namespaces(&self) -> NamespaceManager {
        self.terms.namespace_manager()
    }

    /// Flatten all four categories of `doc` into `sink`
    pub fn convert_document<S: TripleSink, G: IdGenerator>(
        &self,
        doc: &XpoDocument,
        sink: &mut S,
        ids: &mut G,
    ) -> ConversionSummary {
        let mut flattener = RecordFlattener::new(&self.terms, self.config.flatten_options(), sink, ids);

        let categories: Vec<CategoryReport> = Category::ALL
            .iter()
            .map(|&category| flattener.flatten_category(category, doc.records(category)))
            .collect();

        ConversionSummary {
            version: doc.version_string(),
            triples: categories.iter().map(|r| r.triples).sum(),
            categories,
        }
    }

    /// Load the configured input and build the graph in memory
    pub fn build_graph<G: IdGenerator>(&self, ids: &mut G) -> ConvertResult<(RdfStore, ConversionSummary)> {
        let doc = XpoDocument::load(&self.config.input_path)?;
        let mut store = RdfStore::new();
        let summary = self.convert_document(&doc, &mut store, ids);
        Ok((store, summary))
    }

    /// Write the graph to the configured Turtle and N-Triples destinations
    ///
    /// Both files are staged beside their destinations first. Neither
    /// destination is replaced unless both stages were written.
    pub fn write_outputs(&self, store: &RdfStore) -> ConvertResult<()> {
        let namespaces = self.namespaces();
        let outputs = [
            (self.config.turtle_path.as_path(), RdfFormat::Turtle),
            (self.config.ntriples_path.as_path(), RdfFormat::NTriples),
        ];

        let mut staged = Vec::with_capacity(outputs.len());
        for (path, format) in outputs {
            let bytes = RdfSerializer::write_store(store, format, &namespaces, Vec::new())?;
            staged.push(StagedFile::write(path, &bytes)?);
        }

        for file in staged {
            let path = file.commit()?;
            info!("Wrote {} triples to {:?}", store.len(), path);
        }
        Ok(())
    }

    /// Full conversion with random synthetic node labels
    pub fn run(&self) -> ConvertResult<ConversionSummary> {
        self.run_with(&mut ShortIdGenerator::new())
    }

    /// Full conversion with the given label generator
    pub fn run_with<G: IdGenerator>(&self, ids: &mut G) -> ConvertResult<ConversionSummary> {
        let (store, summary) = self.build_graph(ids)?;
        self.write_outputs(&store)?;

        info!(
            "Converted {} records into {} triples over {} nodes ({} diagnostics)",
            summary.records(),
            store.len(),
            store.subjects().len(),
            summary.diagnostics().count()
        );
        Ok(summary)
    }
}

/// Output written beside its destination; removed on drop unless committed
struct StagedFile {
    part: PathBuf,
    dest: PathBuf,
    committed: bool,
}

impl StagedFile {
    fn write(dest: &Path, bytes: &[u8]) -> ConvertResult<Self> {
        let mut name = dest.as_os_str().to_owned();
        name.push(".part");
        let part = PathBuf::from(name);

        if let Err(source) = fs::write(&part, bytes) {
            let _ = fs::remove_file(&part);
            return Err(ConvertError::Io {
                path: dest.to_path_buf(),
                source,
            });
        }

        Ok(Self {
            part,
            dest: dest.to_path_buf(),
            committed: false,
        })
    }

    /// Move the staged file over its destination
    fn commit(mut self) -> ConvertResult<PathBuf> {
        fs::rename(&self.part, &self.dest).map_err(|source| ConvertError::Io {
            path: self.dest.clone(),
            source,
        })?;
        self.committed = true;
        Ok(self.dest.clone())
    }
}

impl Drop for StagedFile {
    fn drop(&mut self) {
        if !self.committed {
            let _ = fs::remove_file(&self.part);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xpo::SequentialIdGenerator;

    fn sample_doc() -> XpoDocument {
        XpoDocument::from_json(
            r#"{
                "version": "5.4.7",
                "events": {"DWD_EVE_1": {"name": "Attack", "foo": "bar"}},
                "entities": {"DWD_ENT_1": {"name": "Person"}},
                "relations": {},
                "temporal_relations": {"DWD_TMP_1": {"name": "before"}}
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_convert_document_reports_every_category() {
        let converter = Converter::new(ConverterConfig::default()).unwrap();
        let mut store = RdfStore::new();
        let summary = converter.convert_document(&sample_doc(), &mut store, &mut SequentialIdGenerator::new());

        assert_eq!(summary.categories.len(), 4);
        assert_eq!(summary.records(), 3);
        assert_eq!(summary.triples, 4);
        assert_eq!(store.len(), 4);
        assert_eq!(summary.version, "5.4.7");
        assert_eq!(summary.report(Category::Relation).unwrap().records, 0);
        assert_eq!(summary.diagnostics().count(), 1);
    }

    #[test]
    fn test_invalid_namespace() {
        let config = ConverterConfig::default().with_namespaces("not an iri", "http://www.wikidata.org/wiki/");
        assert!(matches!(Converter::new(config), Err(ConvertError::InvalidNamespace(_))));
    }

    #[test]
    fn test_missing_input_is_fatal_and_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let converter = Converter::new(ConverterConfig::in_dir(dir.path())).unwrap();

        let err = converter.run().unwrap_err();
        assert!(matches!(err, ConvertError::Io { .. }));
        assert!(!dir.path().join("xpo.ttl").exists());
        assert!(!dir.path().join("xpo.nt").exists());
    }

    #[test]
    fn test_unwritable_output_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("xpo.json"), r#"{"events":{},"entities":{},"relations":{},"temporal_relations":{}}"#).unwrap();
        let config = ConverterConfig::in_dir(dir.path())
            .with_outputs(dir.path().join("missing/xpo.ttl"), dir.path().join("xpo.nt"));

        let err = Converter::new(config).unwrap().run().unwrap_err();
        match err {
            ConvertError::Io { path, .. } => assert!(path.ends_with("missing/xpo.ttl")),
            other => panic!("unexpected error: {}", other),
        }
    }
    #[test]
    fn test_failed_ntriples_write_leaves_no_turtle() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("xpo.json"), r#"{"events":{"E1":{"name":"Attack"}},"entities":{},"relations":{},"temporal_relations":{}}"#).unwrap();
        let config = ConverterConfig::in_dir(dir.path())
            .with_outputs(dir.path().join("xpo.ttl"), dir.path().join("missing/xpo.nt"));

        let err = Converter::new(config).unwrap().run().unwrap_err();
        match err {
            ConvertError::Io { path, .. } => assert!(path.ends_with("missing/xpo.nt")),
            other => panic!("unexpected error: {}", other),
        }
        assert!(!dir.path().join("xpo.ttl").exists());
        assert!(!dir.path().join("xpo.ttl.part").exists());
    }

    #[test]
    fn test_failed_write_keeps_previous_outputs() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("xpo.json"), r#"{"events":{"E1":{"name":"Attack"}},"entities":{},"relations":{},"temporal_relations":{}}"#).unwrap();
        std::fs::write(dir.path().join("xpo.ttl"), "previous").unwrap();
        let config = ConverterConfig::in_dir(dir.path())
            .with_outputs(dir.path().join("xpo.ttl"), dir.path().join("missing/xpo.nt"));

        assert!(Converter::new(config).unwrap().run().is_err());
        assert_eq!(std::fs::read_to_string(dir.path().join("xpo.ttl")).unwrap(), "previous");
    }

    #[test]
    fn test_successful_write_leaves_no_staging_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("xpo.json"), r#"{"events":{"E1":{"name":"Attack"}},"entities":{},"relations":{},"temporal_relations":{}}"#).unwrap();

        Converter::new(ConverterConfig::in_dir(dir.path())).unwrap().run().unwrap();

        let mut names: Vec<String> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(names, vec!["xpo.json", "xpo.nt", "xpo.ttl"]);
    }
}
