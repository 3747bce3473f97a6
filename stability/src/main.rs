#![allow(unused)]

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::analysis::aggregate::Aggregator;
use crate::analysis::interpretation::{classify, explain};
use crate::catalog::VariantCatalog;
use crate::data_handling::consolidated::ConsolidatedStore;
use crate::data_handling::gene_index::GeneIndex;
use crate::helper_functions::data_root;
use crate::selection::Selection;

mod analysis;
mod catalog;
mod data_handling;
mod helper_functions;
mod models;
mod selection;

const DEMO_GENE: &str = "NOTCH1";
const DEMO_RESIDUE: i64 = 293;

fn main() -> anyhow::Result<()> {
    // Setup logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting the ΔΔG stability core");

    // Load the lookup tables and the consolidated measurement store. Any
    // missing source file aborts startup here rather than degrading later.
    let data_root = data_root();
    let index = GeneIndex::from_csv(&data_root.join("gene_pdbs.csv"))
        .context("loading gene/structure table")?;
    let store = ConsolidatedStore::open(&data_root.join("gene_shards.csv"))
        .context("consolidating ΔΔG shards")?;

    info!(
        "Loaded {} genes and {} measurements",
        index.gene_names().len(),
        store.height()
    );

    // Worked example: walk the dropdown cascade for NOTCH1 residue 293 the
    // way the dashboard would, then aggregate and interpret.
    let catalog = VariantCatalog::new(&index, &store);
    let aggregator = Aggregator::new(&index, &store);

    let mut selection = Selection::new();
    selection.choose_gene(Some(DEMO_GENE.to_string()));

    let residues = catalog.residues_for_gene(selection.gene())?;
    let residue = if residues.contains(&DEMO_RESIDUE) {
        Some(DEMO_RESIDUE)
    } else {
        residues.first().copied()
    };
    selection.choose_residue(residue);

    let froms = catalog.from_mutations(selection.gene(), selection.residue())?;
    selection.choose_mut_from(froms.first().cloned());

    let tos = catalog.to_mutations(selection.gene(), selection.residue(), selection.mut_from())?;
    selection.choose_mut_to(tos.first().cloned());

    info!(
        "Selection: {} residue {:?} {:?}→{:?}",
        DEMO_GENE,
        selection.residue(),
        selection.mut_from(),
        selection.mut_to()
    );

    let result = aggregator.aggregate(&selection)?;
    let category = classify(result.median);

    info!(
        "{} values for the gene, {} for the variant, median {:?}, percentile {:?}, {:?}",
        result.gene_distribution.len(),
        result.variant_distribution.len(),
        result.median,
        result.percentile,
        category
    );
    if let Some(text) = explain(result.median, result.percentile, category) {
        info!("{text}");
    }

    // The structured result as the dashboard would receive it.
    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}
