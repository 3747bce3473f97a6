use polars::prelude::*;
use serde::{Deserialize, Serialize};

use crate::data_handling::gene_index::GeneIndex;
use crate::data_handling::DdgStore;
use crate::models::{COL_MUT_FROM, COL_MUT_TO, COL_RESIDUE};

/// One dropdown option as the dashboard expects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub label: String,
    pub value: String,
}

pub fn to_choices<T: std::fmt::Display>(values: &[T]) -> Vec<Choice> {
    values
        .iter()
        .map(|v| {
            let s = v.to_string();
            Choice {
                label: s.clone(),
                value: s,
            }
        })
        .collect()
}

/// Enumerates the valid options for each dropdown, one cascade level at a
/// time. Every function fails softly: any unset upstream input yields an
/// empty list, never an error. Incomplete selection is the normal state.
pub struct VariantCatalog<'a, S> {
    index: &'a GeneIndex,
    store: &'a S,
}

impl<'a, S: DdgStore> VariantCatalog<'a, S> {
    pub fn new(index: &'a GeneIndex, store: &'a S) -> Self {
        Self { index, store }
    }

    pub fn gene_choices(&self) -> Vec<Choice> {
        to_choices(&self.index.gene_names())
    }

    /// Residue numbers observed for the gene, deduplicated and ascending.
    pub fn residues_for_gene(&self, gene: Option<&str>) -> PolarsResult<Vec<i64>> {
        let structure_ids = self.index.structures_for_gene(gene);
        if structure_ids.is_empty() {
            return Ok(Vec::new());
        }
        let df = self.store.measurements(&structure_ids)?;
        let mut residues: Vec<i64> = df
            .column(COL_RESIDUE)?
            .i64()?
            .into_no_null_iter()
            .collect();
        residues.sort_unstable();
        residues.dedup();
        Ok(residues)
    }

    /// Wild-type codes observed at the residue across the gene's structures.
    pub fn from_mutations(
        &self,
        gene: Option<&str>,
        residue: Option<i64>,
    ) -> PolarsResult<Vec<String>> {
        let (structure_ids, residue) = match (gene, residue) {
            (Some(gene), Some(residue)) => {
                (self.index.structures_for_gene(Some(gene)), residue)
            }
            _ => return Ok(Vec::new()),
        };
        if structure_ids.is_empty() {
            return Ok(Vec::new());
        }
        let df = self
            .store
            .measurements(&structure_ids)?
            .lazy()
            .filter(col(COL_RESIDUE).eq(lit(residue)))
            .collect()?;
        unique_sorted(&df, COL_MUT_FROM)
    }

    /// Substituted codes observed for the given origin residue and from-code.
    pub fn to_mutations(
        &self,
        gene: Option<&str>,
        residue: Option<i64>,
        mut_from: Option<&str>,
    ) -> PolarsResult<Vec<String>> {
        let (structure_ids, residue, mut_from) = match (gene, residue, mut_from) {
            (Some(gene), Some(residue), Some(mut_from)) => {
                (self.index.structures_for_gene(Some(gene)), residue, mut_from)
            }
            _ => return Ok(Vec::new()),
        };
        if structure_ids.is_empty() {
            return Ok(Vec::new());
        }
        let df = self
            .store
            .measurements(&structure_ids)?
            .lazy()
            .filter(
                col(COL_RESIDUE)
                    .eq(lit(residue))
                    .and(col(COL_MUT_FROM).eq(lit(mut_from.to_string()))),
            )
            .collect()?;
        unique_sorted(&df, COL_MUT_TO)
    }
}

fn unique_sorted(df: &DataFrame, column: &str) -> PolarsResult<Vec<String>> {
    let ca = df.column(column)?.str()?;
    let mut values: Vec<String> = ca.into_iter().flatten().map(String::from).collect();
    values.sort();
    values.dedup();
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_handling::consolidated::ConsolidatedStore;
    use crate::data_handling::test_fixtures::{fixture_dir, gene_index};

    fn catalog_fixture() -> (GeneIndex, ConsolidatedStore) {
        let dir = fixture_dir();
        let store = ConsolidatedStore::open(&dir.path().join("gene_shards.csv")).unwrap();
        (gene_index(), store)
    }

    #[test]
    fn residues_are_sorted_and_deduplicated() {
        let (index, store) = catalog_fixture();
        let catalog = VariantCatalog::new(&index, &store);
        assert_eq!(
            catalog.residues_for_gene(Some("NOTCH1")).unwrap(),
            vec![100, 293]
        );
        assert_eq!(catalog.residues_for_gene(Some("VCP")).unwrap(), vec![10, 20]);
    }

    #[test]
    fn cascade_narrows_from_and_to_codes() {
        let (index, store) = catalog_fixture();
        let catalog = VariantCatalog::new(&index, &store);

        let froms = catalog.from_mutations(Some("NOTCH1"), Some(293)).unwrap();
        assert_eq!(froms, vec!["L"]);

        let tos = catalog
            .to_mutations(Some("NOTCH1"), Some(293), Some("L"))
            .unwrap();
        assert_eq!(tos, vec!["P", "W"]);

        let tos = catalog
            .to_mutations(Some("VCP"), Some(10), Some("K"))
            .unwrap();
        assert_eq!(tos, vec!["E", "R"]);
    }

    #[test]
    fn unset_upstream_inputs_give_empty_options() {
        let (index, store) = catalog_fixture();
        let catalog = VariantCatalog::new(&index, &store);

        assert!(catalog.residues_for_gene(None).unwrap().is_empty());
        assert!(catalog.from_mutations(None, Some(293)).unwrap().is_empty());
        assert!(catalog
            .from_mutations(Some("NOTCH1"), None)
            .unwrap()
            .is_empty());
        assert!(catalog
            .to_mutations(Some("NOTCH1"), Some(293), None)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn unknown_gene_behaves_like_no_selection() {
        let (index, store) = catalog_fixture();
        let catalog = VariantCatalog::new(&index, &store);
        assert!(catalog
            .residues_for_gene(Some("NO_SUCH_GENE"))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn gene_choices_carry_label_and_value() {
        let (index, store) = catalog_fixture();
        let catalog = VariantCatalog::new(&index, &store);
        let choices = catalog.gene_choices();
        assert_eq!(choices[0].label, "EMPTY");
        assert_eq!(choices[0].value, "EMPTY");
        assert_eq!(choices.len(), 4);
    }
}
