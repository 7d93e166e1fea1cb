use anyhow::Context;
use bluprint_core::{BuildEvaluator, Catalog, EngineConfig};
use serde::Serialize;
use tracing::debug;

use crate::cli::args::{EngineArgs, OutputFormat};

pub fn load_catalog(path: &std::path::Path) -> anyhow::Result<Catalog> {
    let catalog = Catalog::from_file(path)
        .with_context(|| format!("loading catalog {}", path.display()))?;
    debug!(
        path = %path.display(),
        parts = catalog.parts().len(),
        rules = catalog.rules().len(),
        "catalog ready"
    );
    Ok(catalog)
}

pub fn evaluator(args: &EngineArgs) -> anyhow::Result<BuildEvaluator> {
    let config = match &args.config {
        Some(path) => EngineConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => {
            let config = EngineConfig::from_env();
            config.validate()?;
            config
        }
    };
    debug!(
        max_parts = config.max_parts,
        dedupe_aggregate_rules = config.dedupe_aggregate_rules,
        "engine config ready"
    );
    Ok(BuildEvaluator::new(config))
}

/// JSON goes to stdout as one pretty document; text is rendered by `text`.
pub fn emit<T: Serialize>(
    format: OutputFormat,
    value: &T,
    text: impl FnOnce(&T) -> String,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
        OutputFormat::Text => print!("{}", text(value)),
    }
    Ok(())
}
