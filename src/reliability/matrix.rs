use serde::Serialize;
use tracing::debug;

use super::categories::CategoryIndex;
use super::error::{ReliabilityError, ReliabilityResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgreementMatrix {
    index: CategoryIndex,
    counts: Vec<Vec<usize>>,
    total: usize,
}

impl AgreementMatrix {
    pub fn build<A, B>(coder_a: &[A], coder_b: &[B]) -> ReliabilityResult<Self>
    where
        A: AsRef<str>,
        B: AsRef<str>,
    {
        if coder_a.len() != coder_b.len() {
            return Err(ReliabilityError::LengthMismatch {
                left: coder_a.len(),
                right: coder_b.len(),
            });
        }

        let index = CategoryIndex::from_values(
            coder_a
                .iter()
                .map(AsRef::as_ref)
                .chain(coder_b.iter().map(AsRef::as_ref)),
        );
        let size = index.len();
        let mut counts = vec![vec![0_usize; size]; size];

        for (a, b) in coder_a.iter().zip(coder_b) {
            // Both values were inserted into the index above.
            let row = index.index_of(a.as_ref());
            let col = index.index_of(b.as_ref());
            if let (Some(row), Some(col)) = (row, col) {
                counts[row][col] += 1;
            }
        }

        debug!(
            n_items = coder_a.len(),
            n_categories = size,
            "built agreement matrix"
        );

        Ok(Self {
            index,
            counts,
            total: coder_a.len(),
        })
    }

    pub fn index(&self) -> &CategoryIndex {
        &self.index
    }

    pub fn count(&self, row: usize, col: usize) -> usize {
        self.counts
            .get(row)
            .and_then(|cells| cells.get(col))
            .copied()
            .unwrap_or(0)
    }

    pub fn rows(&self) -> &[Vec<usize>] {
        &self.counts
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn agreements(&self) -> usize {
        (0..self.index.len()).map(|i| self.counts[i][i]).sum()
    }

    pub fn row_totals(&self) -> Vec<usize> {
        self.counts.iter().map(|row| row.iter().sum()).collect()
    }

    pub fn column_totals(&self) -> Vec<usize> {
        let mut totals = vec![0_usize; self.index.len()];
        for row in &self.counts {
            for (col, count) in row.iter().enumerate() {
                totals[col] += count;
            }
        }
        totals
    }
}
