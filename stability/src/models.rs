use polars::prelude::*;
use serde::{Deserialize, Serialize};

// Column names shared by every ΔΔG shard.
pub const COL_PDB: &str = "pdb";
pub const COL_RESIDUE: &str = "pdb_residual";
pub const COL_MUT_FROM: &str = "mut_from";
pub const COL_MUT_TO: &str = "mut_to";
pub const COL_DDG: &str = "ddg";

// Columns of the auxiliary lookup tables (gene → structure, gene → shard).
pub const COL_GENE: &str = "name_of_gene";
pub const COL_SHARD: &str = "shard_path";

// Placeholder rows some source files carry instead of real data.
pub const SENTINEL_GENE: &str = "gene_name_value";
pub const SENTINEL_MUT_FROM: &str = "mut_from_value";
pub const SENTINEL_MUT_TO: &str = "mut_to_value";

pub fn polars_err(e: Box<dyn std::error::Error>) -> PolarsError {
    PolarsError::ComputeError(format!("{e}").into())
}

/// Addresses the measurements of one substitution on one structure.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VariantKey {
    pub pdb: String,
    pub residue: i64,
    pub mut_from: String,
    pub mut_to: String,
}

/// One predicted ΔΔG value (kcal/mol). Immutable after load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub key: VariantKey,
    pub ddg: f64,
}

/// Everything the dashboard needs to redraw both histograms and the
/// interpretation text after one selection event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregateResult {
    pub gene_distribution: Vec<f64>,
    pub variant_distribution: Vec<f64>,
    pub median: Option<f64>,
    pub percentile: Option<f64>,
}

/// Typed view of a measurement frame. Rows with any null field are skipped.
pub fn measurements_from_frame(df: &DataFrame) -> PolarsResult<Vec<Measurement>> {
    let pdbs = df.column(COL_PDB)?.str()?;
    let residues = df.column(COL_RESIDUE)?.i64()?;
    let froms = df.column(COL_MUT_FROM)?.str()?;
    let tos = df.column(COL_MUT_TO)?.str()?;
    let ddgs = df.column(COL_DDG)?.f64()?;

    let mut out = Vec::with_capacity(df.height());
    for i in 0..df.height() {
        if let (Some(pdb), Some(residue), Some(mut_from), Some(mut_to), Some(ddg)) = (
            pdbs.get(i),
            residues.get(i),
            froms.get(i),
            tos.get(i),
            ddgs.get(i),
        ) {
            out.push(Measurement {
                key: VariantKey {
                    pdb: pdb.to_string(),
                    residue,
                    mut_from: mut_from.to_string(),
                    mut_to: mut_to.to_string(),
                },
                ddg,
            });
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::df;

    #[test]
    fn frame_rows_become_measurements() {
        let df = df![
            COL_PDB => ["1abc", "2xyz"],
            COL_RESIDUE => [293i64, 100],
            COL_MUT_FROM => ["L", "A"],
            COL_MUT_TO => ["P", "V"],
            COL_DDG => [3.1, 0.2],
        ]
        .unwrap();

        let measurements = measurements_from_frame(&df).unwrap();
        assert_eq!(measurements.len(), 2);
        assert_eq!(
            measurements[0],
            Measurement {
                key: VariantKey {
                    pdb: "1abc".to_string(),
                    residue: 293,
                    mut_from: "L".to_string(),
                    mut_to: "P".to_string(),
                },
                ddg: 3.1,
            }
        );
    }
}
