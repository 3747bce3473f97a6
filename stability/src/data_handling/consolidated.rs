use std::collections::HashSet;
use std::path::{Path, PathBuf};

use polars::prelude::*;
use tracing::{debug, info};

use crate::data_handling::{
    clean_shard, empty_measurements, filter_by_structures, filter_by_variant, load_manifest,
    DdgStore,
};
use crate::helper_functions::read_csv;
use crate::models::polars_err;

/// Consolidated backend: every shard named by the manifest is read once at
/// startup into a single in-memory table, and queries run as lazy filter
/// predicates against it. Behaviourally identical to [`GeneShardStore`],
/// just a different load strategy.
///
/// [`GeneShardStore`]: crate::data_handling::gene_shards::GeneShardStore
pub struct ConsolidatedStore {
    table: DataFrame,
}

impl ConsolidatedStore {
    pub fn open(manifest_path: &Path) -> PolarsResult<Self> {
        info!(
            "Consolidating ΔΔG shards listed in {}",
            manifest_path.display()
        );
        let shards_by_gene = load_manifest(manifest_path)?;

        let mut paths: Vec<PathBuf> = Vec::new();
        for shard_paths in shards_by_gene.values() {
            for path in shard_paths {
                if !paths.contains(path) {
                    paths.push(path.clone());
                }
            }
        }
        paths.sort();

        let mut table: Option<DataFrame> = None;
        for path in &paths {
            if !path.exists() {
                return Err(polars_err(
                    format!("ΔΔG shard not found: {}", path.display()).into(),
                ));
            }
            debug!("Loading ΔΔG shard {}", path.display());
            let shard = clean_shard(read_csv(path)?)?;
            match table {
                Some(ref mut t) => {
                    t.vstack_mut(&shard)?;
                }
                None => table = Some(shard),
            }
        }

        let table = match table {
            Some(t) => t,
            None => empty_measurements()?,
        };
        info!(
            "Consolidated store holds {} measurements from {} shards",
            table.height(),
            paths.len()
        );
        Ok(Self { table })
    }

    /// Build directly from an in-memory frame. Placeholder rows are cleaned
    /// exactly as they are for on-disk shards.
    pub fn from_frame(df: DataFrame) -> PolarsResult<Self> {
        Ok(Self {
            table: clean_shard(df)?,
        })
    }

    pub fn height(&self) -> usize {
        self.table.height()
    }
}

impl DdgStore for ConsolidatedStore {
    fn measurements(&self, structure_ids: &HashSet<String>) -> PolarsResult<DataFrame> {
        filter_by_structures(self.table.clone(), structure_ids)
    }

    fn variant_measurements(
        &self,
        structure_ids: &HashSet<String>,
        residue: i64,
        mut_from: &str,
        mut_to: &str,
    ) -> PolarsResult<DataFrame> {
        filter_by_variant(
            self.table.clone(),
            structure_ids,
            residue,
            mut_from,
            mut_to,
        )
    }
}
