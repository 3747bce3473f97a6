use serde::{Deserialize, Serialize};

/// How far down the gene → residue → from → to cascade a selection has got.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionStage {
    Unselected,
    GeneChosen,
    ResidueChosen,
    FromChosen,
    FullySpecified,
}

/// One user's dropdown state. The dashboard keeps this in a client-side
/// store, so it round-trips through serde.
///
/// Choosing an upstream field clears every downstream field: the previously
/// chosen options may not exist under the new upstream value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    gene: Option<String>,
    residue: Option<i64>,
    mut_from: Option<String>,
    mut_to: Option<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gene(&self) -> Option<&str> {
        self.gene.as_deref()
    }

    pub fn residue(&self) -> Option<i64> {
        self.residue
    }

    pub fn mut_from(&self) -> Option<&str> {
        self.mut_from.as_deref()
    }

    pub fn mut_to(&self) -> Option<&str> {
        self.mut_to.as_deref()
    }

    pub fn choose_gene(&mut self, gene: Option<String>) {
        self.gene = gene;
        self.residue = None;
        self.mut_from = None;
        self.mut_to = None;
    }

    pub fn choose_residue(&mut self, residue: Option<i64>) {
        self.residue = residue;
        self.mut_from = None;
        self.mut_to = None;
    }

    pub fn choose_mut_from(&mut self, code: Option<String>) {
        self.mut_from = code;
        self.mut_to = None;
    }

    pub fn choose_mut_to(&mut self, code: Option<String>) {
        self.mut_to = code;
    }

    /// A field only counts once everything upstream of it is set.
    pub fn stage(&self) -> SelectionStage {
        if self.gene.is_none() {
            SelectionStage::Unselected
        } else if self.residue.is_none() {
            SelectionStage::GeneChosen
        } else if self.mut_from.is_none() {
            SelectionStage::ResidueChosen
        } else if self.mut_to.is_none() {
            SelectionStage::FromChosen
        } else {
            SelectionStage::FullySpecified
        }
    }

    pub fn is_fully_specified(&self) -> bool {
        self.stage() == SelectionStage::FullySpecified
    }
}
