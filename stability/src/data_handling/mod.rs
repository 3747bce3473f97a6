use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use polars::df;
use polars::prelude::*;

use crate::helper_functions::read_csv;
use crate::models::{
    COL_DDG, COL_GENE, COL_MUT_FROM, COL_MUT_TO, COL_PDB, COL_RESIDUE, COL_SHARD, SENTINEL_GENE,
    SENTINEL_MUT_FROM, SENTINEL_MUT_TO,
};

pub mod consolidated;
pub mod gene_index;
pub mod gene_shards;

#[cfg(test)]
pub(crate) mod test_fixtures;

/// A queryable source of per-variant stability measurements.
///
/// Both backends answer the same exact-match contract:
/// (pdb ∈ S) ∧ (residue = r) ∧ (from = f) ∧ (to = t). Callers must not
/// depend on which backend is active.
pub trait DdgStore {
    /// All rows whose structure id is in the given set. No implied ordering.
    fn measurements(&self, structure_ids: &HashSet<String>) -> PolarsResult<DataFrame>;

    /// Exact-match filter on structure set, residue and both mutation codes.
    fn variant_measurements(
        &self,
        structure_ids: &HashSet<String>,
        residue: i64,
        mut_from: &str,
        mut_to: &str,
    ) -> PolarsResult<DataFrame>;
}

/// Measurement frame with the shard schema and zero rows.
pub(crate) fn empty_measurements() -> PolarsResult<DataFrame> {
    df![
        COL_PDB => Vec::<String>::new(),
        COL_RESIDUE => Vec::<i64>::new(),
        COL_MUT_FROM => Vec::<String>::new(),
        COL_MUT_TO => Vec::<String>::new(),
        COL_DDG => Vec::<f64>::new(),
    ]
}

fn structure_ids_frame(structure_ids: &HashSet<String>) -> PolarsResult<DataFrame> {
    let mut ids: Vec<String> = structure_ids.iter().cloned().collect();
    ids.sort();
    DataFrame::new(vec![Column::new(COL_PDB.into(), ids)])
}

/// Set-membership on the structure id, as a semi join against the id set.
/// Left row order is preserved, so identical queries return identical frames.
pub(crate) fn filter_by_structures(
    df: DataFrame,
    structure_ids: &HashSet<String>,
) -> PolarsResult<DataFrame> {
    let ids = structure_ids_frame(structure_ids)?;
    df.join(
        &ids,
        [COL_PDB],
        [COL_PDB],
        JoinArgs::from(JoinType::Semi),
        None,
    )
}

pub(crate) fn filter_by_variant(
    df: DataFrame,
    structure_ids: &HashSet<String>,
    residue: i64,
    mut_from: &str,
    mut_to: &str,
) -> PolarsResult<DataFrame> {
    let exact = df
        .lazy()
        .filter(
            col(COL_RESIDUE)
                .eq(lit(residue))
                .and(col(COL_MUT_FROM).eq(lit(mut_from.to_string())))
                .and(col(COL_MUT_TO).eq(lit(mut_to.to_string()))),
        )
        .collect()?;
    filter_by_structures(exact, structure_ids)
}

/// Drop placeholder rows and normalise the residue column. Applied to every
/// shard as it is read, before anything downstream sees it.
pub(crate) fn clean_shard(df: DataFrame) -> PolarsResult<DataFrame> {
    df.lazy()
        .filter(
            col(COL_MUT_FROM)
                .neq(lit(SENTINEL_MUT_FROM))
                .and(col(COL_MUT_TO).neq(lit(SENTINEL_MUT_TO))),
        )
        .with_column(col(COL_RESIDUE).cast(DataType::Int64))
        .collect()
}

/// Load the gene → shard manifest. Shard paths are resolved relative to the
/// manifest's own directory. A gene may map to more than one shard; its
/// measurements are the union over all of them.
pub(crate) fn load_manifest(path: &Path) -> PolarsResult<HashMap<String, Vec<PathBuf>>> {
    let df = read_csv(path)?;
    let genes = df.column(COL_GENE)?.str()?;
    let shards = df.column(COL_SHARD)?.str()?;
    let base = path.parent().unwrap_or_else(|| Path::new("."));

    let mut out: HashMap<String, Vec<PathBuf>> = HashMap::new();
    for i in 0..df.height() {
        if let (Some(gene), Some(shard)) = (genes.get(i), shards.get(i)) {
            if gene == SENTINEL_GENE {
                continue;
            }
            let shard_path = base.join(shard);
            let entry = out.entry(gene.to_string()).or_default();
            if !entry.contains(&shard_path) {
                entry.push(shard_path);
            }
        }
    }
    Ok(out)
}
