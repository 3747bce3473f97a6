use std::fs;

use polars::df;
use tempfile::TempDir;

use crate::data_handling::gene_index::GeneIndex;
use crate::models::{COL_GENE, COL_PDB};

/// Index matching the on-disk fixtures: NOTCH1 spans two structures, VCP's
/// data is split across two shards, EMPTY has a structure but no measurements.
pub(crate) fn gene_index() -> GeneIndex {
    let df = df![
        COL_GENE => ["NOTCH1", "NOTCH1", "TP53", "VCP", "EMPTY"],
        COL_PDB => ["1abc", "2xyz", "9foo", "5vcp", "0nil"],
    ]
    .unwrap();
    GeneIndex::from_frame(&df).unwrap()
}

/// Writes a manifest and four small shards into a temp directory.
pub(crate) fn fixture_dir() -> TempDir {
    let dir = TempDir::new().unwrap();

    fs::write(
        dir.path().join("gene_shards.csv"),
        "name_of_gene,shard_path\n\
         NOTCH1,ddg_notch1.csv\n\
         TP53,ddg_tp53.csv\n\
         VCP,ddg_vcp_a.csv\n\
         VCP,ddg_vcp_b.csv\n",
    )
    .unwrap();

    fs::write(
        dir.path().join("ddg_notch1.csv"),
        "pdb,pdb_residual,mut_from,mut_to,ddg\n\
         1abc,293,L,P,3.0\n\
         1abc,293,L,P,1.0\n\
         2xyz,293,L,P,2.0\n\
         2xyz,100,A,V,0.2\n\
         1abc,293,L,W,4.0\n\
         1abc,1,mut_from_value,mut_to_value,0.0\n",
    )
    .unwrap();

    fs::write(
        dir.path().join("ddg_tp53.csv"),
        "pdb,pdb_residual,mut_from,mut_to,ddg\n\
         9foo,50,G,W,7.5\n",
    )
    .unwrap();

    fs::write(
        dir.path().join("ddg_vcp_a.csv"),
        "pdb,pdb_residual,mut_from,mut_to,ddg\n\
         5vcp,10,K,R,6.0\n\
         5vcp,10,K,R,5.0\n",
    )
    .unwrap();

    fs::write(
        dir.path().join("ddg_vcp_b.csv"),
        "pdb,pdb_residual,mut_from,mut_to,ddg\n\
         5vcp,20,M,T,8.5\n\
         5vcp,10,K,E,2.2\n",
    )
    .unwrap();

    dir
}
