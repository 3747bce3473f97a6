use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use polars::prelude::*;
use tracing::{debug, info};

use crate::data_handling::gene_index::GeneIndex;
use crate::data_handling::{
    clean_shard, empty_measurements, filter_by_structures, filter_by_variant, load_manifest,
    DdgStore,
};
use crate::helper_functions::read_csv;
use crate::models::polars_err;

/// Per-gene CSV backend: shards are read from disk the first time a query
/// touches them and kept in memory afterwards. The cache mutex also serialises
/// query execution, which is all the locking this read-only data needs.
pub struct GeneShardStore {
    shards_by_structure: HashMap<String, Vec<PathBuf>>,
    cache: Mutex<HashMap<PathBuf, DataFrame>>,
}

impl GeneShardStore {
    /// Resolves the manifest against the gene index so that queries can be
    /// addressed by structure id alone. Every shard file must exist up front;
    /// a missing file is a startup failure, not something to discover
    /// mid-session.
    pub fn open(manifest_path: &Path, index: &GeneIndex) -> PolarsResult<Self> {
        info!("Reading shard manifest from {}", manifest_path.display());
        let shards_by_gene = load_manifest(manifest_path)?;

        for paths in shards_by_gene.values() {
            for path in paths {
                if !path.exists() {
                    return Err(polars_err(
                        format!("ΔΔG shard not found: {}", path.display()).into(),
                    ));
                }
            }
        }

        let mut shards_by_structure: HashMap<String, Vec<PathBuf>> = HashMap::new();
        for (gene, paths) in &shards_by_gene {
            for pdb in index.structures_for_gene(Some(gene)) {
                let entry = shards_by_structure.entry(pdb).or_default();
                for path in paths {
                    if !entry.contains(path) {
                        entry.push(path.clone());
                    }
                }
            }
        }
        debug!(
            "Manifest covers {} genes across {} structures",
            shards_by_gene.len(),
            shards_by_structure.len()
        );

        Ok(Self {
            shards_by_structure,
            cache: Mutex::new(HashMap::new()),
        })
    }

    /// Union of every shard containing any of the requested structures.
    /// Paths are visited in sorted order so identical queries always see the
    /// rows in the same order.
    fn table_for(&self, structure_ids: &HashSet<String>) -> PolarsResult<DataFrame> {
        let mut paths: Vec<&PathBuf> = Vec::new();
        for id in structure_ids {
            if let Some(shards) = self.shards_by_structure.get(id) {
                for path in shards {
                    if !paths.contains(&path) {
                        paths.push(path);
                    }
                }
            }
        }
        paths.sort();

        let mut cache = self
            .cache
            .lock()
            .map_err(|_| polars_err("shard cache poisoned".into()))?;

        let mut table: Option<DataFrame> = None;
        for path in paths {
            if !cache.contains_key(path) {
                debug!("Loading ΔΔG shard {}", path.display());
                let df = clean_shard(read_csv(path)?)?;
                cache.insert(path.clone(), df);
            }
            let shard = &cache[path];
            match table {
                Some(ref mut t) => {
                    t.vstack_mut(shard)?;
                }
                None => table = Some(shard.clone()),
            }
        }

        match table {
            Some(t) => Ok(t),
            None => empty_measurements(),
        }
    }
}

impl DdgStore for GeneShardStore {
    fn measurements(&self, structure_ids: &HashSet<String>) -> PolarsResult<DataFrame> {
        let table = self.table_for(structure_ids)?;
        filter_by_structures(table, structure_ids)
    }

    fn variant_measurements(
        &self,
        structure_ids: &HashSet<String>,
        residue: i64,
        mut_from: &str,
        mut_to: &str,
    ) -> PolarsResult<DataFrame> {
        let table = self.table_for(structure_ids)?;
        filter_by_variant(table, structure_ids, residue, mut_from, mut_to)
    }
}
