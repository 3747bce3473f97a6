use polars::prelude::*;

use crate::data_handling::gene_index::GeneIndex;
use crate::data_handling::DdgStore;
use crate::models::{AggregateResult, COL_DDG};
use crate::selection::Selection;

/// Computes the gene-level distribution, the variant median and its
/// percentile rank for one selection. Holds only read-only views; results
/// are computed fresh on every call.
pub struct Aggregator<'a, S> {
    index: &'a GeneIndex,
    store: &'a S,
}

impl<'a, S: DdgStore> Aggregator<'a, S> {
    pub fn new(index: &'a GeneIndex, store: &'a S) -> Self {
        Self { index, store }
    }

    /// All ΔΔG values across the gene's structures; feeds the background
    /// histogram. Empty for an unset or unknown gene.
    pub fn gene_distribution(&self, gene: Option<&str>) -> PolarsResult<Vec<f64>> {
        let structure_ids = self.index.structures_for_gene(gene);
        if structure_ids.is_empty() {
            return Ok(Vec::new());
        }
        let df = self.store.measurements(&structure_ids)?;
        ddg_values(&df)
    }

    /// ΔΔG values for the exact variant; feeds the variant histogram.
    pub fn variant_distribution(
        &self,
        gene: Option<&str>,
        residue: Option<i64>,
        mut_from: Option<&str>,
        mut_to: Option<&str>,
    ) -> PolarsResult<Vec<f64>> {
        let (residue, mut_from, mut_to) = match (residue, mut_from, mut_to) {
            (Some(r), Some(f), Some(t)) => (r, f, t),
            _ => return Ok(Vec::new()),
        };
        let structure_ids = self.index.structures_for_gene(gene);
        if structure_ids.is_empty() {
            return Ok(Vec::new());
        }
        let df = self
            .store
            .variant_measurements(&structure_ids, residue, mut_from, mut_to)?;
        ddg_values(&df)
    }

    /// Median ΔΔG of the variant. None until the selection is fully
    /// specified, and None when the filtered set is empty; "no data yet"
    /// and "no matching data" both mean there is no median to display.
    pub fn variant_median(
        &self,
        gene: Option<&str>,
        residue: Option<i64>,
        mut_from: Option<&str>,
        mut_to: Option<&str>,
    ) -> PolarsResult<Option<f64>> {
        let values = self.variant_distribution(gene, residue, mut_from, mut_to)?;
        Ok(median_of(&values))
    }

    /// Percentile rank of the variant median within the gene distribution,
    /// counting strictly smaller values only. None whenever the median is
    /// unset or the gene distribution is empty.
    pub fn variant_percentile(
        &self,
        gene: Option<&str>,
        residue: Option<i64>,
        mut_from: Option<&str>,
        mut_to: Option<&str>,
    ) -> PolarsResult<Option<f64>> {
        let median = match self.variant_median(gene, residue, mut_from, mut_to)? {
            Some(m) => m,
            None => return Ok(None),
        };
        let distribution = self.gene_distribution(gene)?;
        Ok(percentile_below(&distribution, median))
    }

    /// One-shot bundle for a selection event: both histograms plus median
    /// and percentile when the selection is fully specified.
    pub fn aggregate(&self, selection: &Selection) -> PolarsResult<AggregateResult> {
        let gene_distribution = self.gene_distribution(selection.gene())?;

        if !selection.is_fully_specified() {
            return Ok(AggregateResult {
                gene_distribution,
                ..AggregateResult::default()
            });
        }

        let variant_distribution = self.variant_distribution(
            selection.gene(),
            selection.residue(),
            selection.mut_from(),
            selection.mut_to(),
        )?;
        let median = median_of(&variant_distribution);
        let percentile = median.and_then(|m| percentile_below(&gene_distribution, m));

        Ok(AggregateResult {
            gene_distribution,
            variant_distribution,
            median,
            percentile,
        })
    }
}

fn ddg_values(df: &DataFrame) -> PolarsResult<Vec<f64>> {
    Ok(df.column(COL_DDG)?.f64()?.into_no_null_iter().collect())
}

/// Median of the values, None for an empty slice.
pub fn median_of(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Fraction of the distribution strictly below `value`, as a percentage.
/// Ties are excluded on purpose; switching to `<=` would shift results
/// wherever the distribution holds duplicate values. None for an empty
/// distribution so that no division by zero can reach the caller as NaN.
pub fn percentile_below(distribution: &[f64], value: f64) -> Option<f64> {
    if distribution.is_empty() {
        return None;
    }
    let below = distribution.iter().filter(|v| **v < value).count();
    Some(below as f64 / distribution.len() as f64 * 100.0)
}
