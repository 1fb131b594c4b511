//! Dense row-major feature storage.

use crate::error::{ModelError, Result};
use crate::label::{Label, LabelCounts};

/// Row-major matrix of `f64` features with a fixed width.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    width: usize,
    values: Vec<f64>,
}

impl FeatureMatrix {
    /// Creates an empty matrix whose rows will have `width` features.
    pub fn new(width: usize) -> Self {
        Self {
            width,
            values: Vec::new(),
        }
    }

    pub fn with_capacity(width: usize, rows: usize) -> Self {
        Self {
            width,
            values: Vec::with_capacity(width * rows),
        }
    }

    /// Builds a matrix from rows, checking each row against the first.
    pub fn from_rows<R: AsRef<[f64]>>(width: usize, rows: &[R]) -> Result<Self> {
        let mut matrix = Self::with_capacity(width, rows.len());
        for row in rows {
            matrix.push_row(row.as_ref())?;
        }
        Ok(matrix)
    }

    /// Builds a matrix from parallel columns of equal length.
    pub fn from_columns(columns: &[Vec<f64>]) -> Result<Self> {
        let width = columns.len();
        let height = columns.first().map_or(0, Vec::len);
        let mut matrix = Self::with_capacity(width, height);
        for (idx, column) in columns.iter().enumerate() {
            if column.len() != height {
                return Err(ModelError::ColumnLength {
                    column: idx,
                    expected: height,
                    found: column.len(),
                });
            }
        }
        for row in 0..height {
            for column in columns {
                matrix.values.push(column[row]);
            }
        }
        Ok(matrix)
    }

    pub fn push_row(&mut self, row: &[f64]) -> Result<()> {
        if row.len() != self.width {
            return Err(ModelError::RowWidth {
                row: self.len(),
                expected: self.width,
                found: row.len(),
            });
        }
        self.values.extend_from_slice(row);
        Ok(())
    }

    /// Number of features per row.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        if self.width == 0 {
            0
        } else {
            self.values.len() / self.width
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns row `index`. Panics when out of bounds, like slice indexing.
    pub fn row(&self, index: usize) -> &[f64] {
        let start = index * self.width;
        &self.values[start..start + self.width]
    }

    pub fn get(&self, row: usize, feature: usize) -> f64 {
        self.values[row * self.width + feature]
    }

    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[f64]> + '_ {
        // chunks_exact on a zero width would panic; an empty matrix yields nothing.
        self.values.chunks_exact(self.width.max(1)).take(self.len())
    }

    /// Copies the rows at `indices`, in that order. Indices may repeat.
    pub fn select(&self, indices: &[usize]) -> Self {
        let mut out = Self::with_capacity(self.width, indices.len());
        for &idx in indices {
            out.values.extend_from_slice(self.row(idx));
        }
        out
    }
}

/// Features and labels of historical records, row-aligned.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingSet {
    features: FeatureMatrix,
    labels: Vec<Label>,
}

impl TrainingSet {
    pub fn new(features: FeatureMatrix, labels: Vec<Label>) -> Result<Self> {
        if features.len() != labels.len() {
            return Err(ModelError::LengthMismatch {
                features: features.len(),
                labels: labels.len(),
            });
        }
        Ok(Self { features, labels })
    }

    pub fn features(&self) -> &FeatureMatrix {
        &self.features
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn label_counts(&self) -> LabelCounts {
        LabelCounts::from_labels(&self.labels)
    }

    /// Copies the rows at `indices` into a new set.
    pub fn select(&self, indices: &[usize]) -> Self {
        Self {
            features: self.features.select(indices),
            labels: indices.iter().map(|&idx| self.labels[idx]).collect(),
        }
    }
}
