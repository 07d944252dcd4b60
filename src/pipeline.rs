use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::{
    attributes::build::build,
    attributes::dedupe::dedupe,
    attributes::order::order,
    config::compile::CompiledConfig,
    foundation::error::{TraitsmithError, TraitsmithResult},
    metadata::document::{MetadataDocument, assemble},
    metadata::writer::MetadataWriter,
    rules::matcher::LayerSelection,
};

/// One item handed over by the layer-combination step.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ItemSpec {
    /// Serial number; used in templates and as the output file name.
    pub serial: u64,
    /// Chosen layers, one per category.
    pub layers: Vec<LayerSelection>,
}

impl ItemSpec {
    /// Parse a JSON array of items.
    pub fn batch_from_reader<R: std::io::Read>(r: R) -> TraitsmithResult<Vec<Self>> {
        serde_json::from_reader(r)
            .map_err(|e| TraitsmithError::serde(format!("parse items JSON: {e}")))
    }

    /// Parse a JSON array of items from a file.
    pub fn batch_from_path(path: impl AsRef<Path>) -> TraitsmithResult<Vec<Self>> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            TraitsmithError::io(format!("open items JSON '{}': {e}", path.display()))
        })?;
        Self::batch_from_reader(BufReader::new(f))
    }
}

/// Build, dedupe, order and assemble one item's metadata.
///
/// Pure: no I/O, no shared state. Fails with [`TraitsmithError::Order`] when the configured trait
/// order does not cover the item, or [`TraitsmithError::Assembly`] when the image URL is invalid.
#[tracing::instrument(skip(config, item), fields(serial = item.serial))]
pub fn generate_item(
    config: &CompiledConfig,
    item: &ItemSpec,
) -> TraitsmithResult<MetadataDocument> {
    let attrs = dedupe(build(&item.layers, config.rules()));
    let attrs = order(attrs, config.trait_order())?;
    Ok(assemble(item.serial, config.document(), attrs)?)
}

/// Generate one item and write it as `<serial>.json`.
///
/// When generation fails, any existing file for the serial is removed so a failed item never
/// leaves output behind.
pub fn generate_to_dir(
    config: &CompiledConfig,
    item: &ItemSpec,
    writer: &MetadataWriter,
) -> TraitsmithResult<PathBuf> {
    match generate_item(config, item) {
        Ok(doc) => writer.write(item.serial, &doc),
        Err(e) => {
            writer.discard(item.serial)?;
            Err(e)
        }
    }
}

/// Scheduling controls for [`generate_batch`].
#[derive(Clone, Debug, Default)]
pub struct BatchOptions {
    /// Process items on a rayon pool when `true`.
    pub parallel: bool,
    /// Optional explicit worker thread count.
    pub threads: Option<usize>,
}

/// Result of one item in a batch.
#[derive(Debug)]
pub struct ItemOutcome {
    /// Item serial.
    pub serial: u64,
    /// Written path, or why the item was rejected.
    pub result: TraitsmithResult<PathBuf>,
}

/// Per-item outcomes of a batch, in input order.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// One entry per input item.
    pub outcomes: Vec<ItemOutcome>,
}

impl BatchReport {
    /// Number of items written.
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    /// Number of items rejected.
    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    /// Rejected items with their errors.
    pub fn failures(&self) -> impl Iterator<Item = (u64, &TraitsmithError)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (o.serial, e)))
    }
}

/// Generate and write every item into `dir`.
///
/// Items are independent: one item's failure is recorded in the report and does not stop the
/// others. Only setup problems (duplicate serials, output directory, thread pool) fail the call
/// itself.
#[tracing::instrument(
    skip(config, items, dir, opts),
    fields(items = items.len(), dir = %dir.as_ref().display())
)]
pub fn generate_batch(
    config: &CompiledConfig,
    items: &[ItemSpec],
    dir: impl AsRef<Path>,
    opts: &BatchOptions,
) -> TraitsmithResult<BatchReport> {
    reject_duplicate_serials(items)?;
    let writer = MetadataWriter::new(dir.as_ref())?;

    let run = |item: &ItemSpec| {
        let result = generate_to_dir(config, item, &writer);
        if let Err(e) = &result {
            tracing::warn!(serial = item.serial, error = %e, "item rejected");
        }
        ItemOutcome {
            serial: item.serial,
            result,
        }
    };

    let outcomes: Vec<ItemOutcome> = if opts.parallel {
        let pool = build_thread_pool(opts.threads)?;
        pool.install(|| items.par_iter().map(run).collect())
    } else {
        items.iter().map(run).collect()
    };

    let report = BatchReport { outcomes };
    tracing::info!(
        succeeded = report.succeeded(),
        failed = report.failed(),
        "batch finished"
    );
    Ok(report)
}

/// Every item owns `<serial>.json`, so a serial may appear only once per batch.
fn reject_duplicate_serials(items: &[ItemSpec]) -> TraitsmithResult<()> {
    let mut seen = HashSet::with_capacity(items.len());
    let mut dups: Vec<u64> = Vec::new();
    for item in items {
        if !seen.insert(item.serial) && !dups.contains(&item.serial) {
            dups.push(item.serial);
        }
    }
    if dups.is_empty() {
        return Ok(());
    }
    let list = dups
        .iter()
        .map(u64::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    Err(TraitsmithError::config(format!("batch contains duplicate serials: {list}")))
}

fn build_thread_pool(threads: Option<usize>) -> TraitsmithResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(TraitsmithError::config("batch 'threads' must be >= 1 when set"));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder.build().map_err(|e| {
        TraitsmithError::Other(anyhow::anyhow!("failed to build rayon thread pool: {e}"))
    })
}

#[cfg(test)]
#[path = "../tests/unit/pipeline.rs"]
mod tests;
