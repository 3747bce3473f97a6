use std::collections::{HashMap, HashSet};
use std::path::Path;

use polars::prelude::*;
use tracing::{debug, error, info};

use crate::helper_functions::read_csv;
use crate::models::{COL_GENE, COL_PDB, SENTINEL_GENE};

/// Maps a gene name to the set of structures ("PDB values") solved or
/// predicted for it. Loaded once at startup from the gene → structure table.
pub struct GeneIndex {
    by_gene: HashMap<String, HashSet<String>>,
}

impl GeneIndex {
    pub fn from_csv(path: &Path) -> PolarsResult<Self> {
        info!("Reading gene/structure table from {}", path.display());
        let df = match read_csv(path) {
            Ok(df) => df,
            Err(e) => {
                error!("Failed to read gene/structure table: {}", e);
                return Err(e);
            }
        };
        Self::from_frame(&df)
    }

    pub fn from_frame(df: &DataFrame) -> PolarsResult<Self> {
        let genes = df.column(COL_GENE)?.str()?;
        let pdbs = df.column(COL_PDB)?.str()?;

        let mut by_gene: HashMap<String, HashSet<String>> = HashMap::new();
        for i in 0..df.height() {
            if let (Some(gene), Some(pdb)) = (genes.get(i), pdbs.get(i)) {
                if gene == SENTINEL_GENE {
                    continue;
                }
                by_gene
                    .entry(gene.to_string())
                    .or_default()
                    .insert(pdb.to_string());
            }
        }
        debug!("Indexed {} genes", by_gene.len());
        Ok(Self { by_gene })
    }

    /// Sorted unique gene names for the top-level dropdown.
    pub fn gene_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.by_gene.keys().cloned().collect();
        names.sort();
        names
    }

    /// Empty set for an unset or unknown gene: unselected state is a normal
    /// value here, not an error.
    pub fn structures_for_gene(&self, gene: Option<&str>) -> HashSet<String> {
        gene.and_then(|g| self.by_gene.get(g))
            .cloned()
            .unwrap_or_default()
    }
}
