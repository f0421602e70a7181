use anyhow::Context;
use tracing::info;
use xpo_rdf::{Converter, ConverterConfig};

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("xpo-rdf v{}", xpo_rdf::version());

    let config = ConverterConfig::default();
    let input = config.input_path.clone();
    let converter = Converter::new(config)?;

    converter
        .run()
        .with_context(|| format!("failed to convert {:?}", input))?;
    Ok(())
}
