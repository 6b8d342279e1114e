//! In-memory input tables handed to the classification pipeline.
//! `SampleMatrix` holds raw counts (samples x genes) and `LabelSeries` maps
//! sample identifiers to ground-truth labels.
use std::collections::BTreeSet;

use ndarray::{Array2, ArrayView1};

/// Name given to every series loaded from a labels file.
pub const LABELS_NAME: &str = "labels";

/// Raw counts matrix: rows are samples, columns are gene features.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleMatrix {
    /// Header of the identifier column, if the file named it
    pub index_name: Option<String>,
    pub index: Vec<String>,
    pub columns: Vec<String>,
    pub values: Array2<f64>,
}

impl SampleMatrix {
    /// (samples, features)
    pub fn shape(&self) -> (usize, usize) {
        self.values.dim()
    }

    pub fn n_samples(&self) -> usize {
        self.index.len()
    }

    pub fn n_features(&self) -> usize {
        self.columns.len()
    }

    /// Counts for the first sample with identifier `sample`.
    pub fn row(&self, sample: &str) -> Option<ArrayView1<'_, f64>> {
        let i = self.index.iter().position(|s| s == sample)?;
        Some(self.values.row(i))
    }

    pub fn get(&self, sample: &str, gene: &str) -> Option<f64> {
        let j = self.columns.iter().position(|c| c == gene)?;
        self.row(sample).map(|r| r[j])
    }
}

/// Sample identifier to label mapping, in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelSeries {
    pub name: String,
    pub index: Vec<String>,
    pub values: Vec<String>,
}

impl LabelSeries {
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn get(&self, sample: &str) -> Option<&str> {
        self.index
            .iter()
            .position(|s| s == sample)
            .map(|i| self.values[i].as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.index
            .iter()
            .zip(self.values.iter())
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Distinct labels, sorted.
    pub fn classes(&self) -> Vec<&str> {
        self.values
            .iter()
            .map(String::as_str)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}
