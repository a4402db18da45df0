use std::fmt;

use serde::Serialize;
use tracing::debug;

use super::categories::CategoryIndex;
use super::error::{ReliabilityError, ReliabilityResult};
use super::label::LabelSequence;

const ACCEPTABLE_ALPHA_MIN: f64 = 0.667;
const RELIABLE_ALPHA_MIN: f64 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AlphaInterpretation {
    Unreliable,
    Acceptable,
    Reliable,
    NoValidCodings,
}

impl AlphaInterpretation {
    pub fn from_alpha(alpha: f64) -> Self {
        if alpha < ACCEPTABLE_ALPHA_MIN {
            Self::Unreliable
        } else if alpha < RELIABLE_ALPHA_MIN {
            Self::Acceptable
        } else {
            Self::Reliable
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unreliable => "unreliable",
            Self::Acceptable => "acceptable",
            Self::Reliable => "reliable",
            Self::NoValidCodings => "no valid codings",
        }
    }
}

impl fmt::Display for AlphaInterpretation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AlphaResult {
    pub alpha: f64,
    pub observed_disagreement: f64,
    pub expected_disagreement: f64,
    pub interpretation: AlphaInterpretation,
    pub n_items: usize,
    pub n_coders: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CoincidenceMatrix {
    index: CategoryIndex,
    cells: Vec<Vec<f64>>,
}

impl CoincidenceMatrix {
    pub(crate) fn accumulate(codings: &[(&str, &LabelSequence)], n_items: usize) -> Self {
        let index = CategoryIndex::from_values(
            codings
                .iter()
                .flat_map(|(_, sequence)| sequence.iter().filter_map(|label| label.as_category())),
        );
        let size = index.len();
        let mut cells = vec![vec![0.0_f64; size]; size];

        for unit in 0..n_items {
            let values: Vec<usize> = codings
                .iter()
                .filter_map(|(_, sequence)| sequence.get(unit)?.as_category())
                .filter_map(|category| index.index_of(category))
                .collect();

            let m = values.len();
            if m < 2 {
                continue;
            }

            // Every pair (i <= j) of the unit's values, a value paired with
            // itself included.
            let weight = 1.0 / (m - 1) as f64;
            for (offset, &first) in values.iter().enumerate() {
                for &second in &values[offset..] {
                    if first == second {
                        cells[first][second] += weight;
                    } else {
                        cells[first][second] += weight / 2.0;
                        cells[second][first] += weight / 2.0;
                    }
                }
            }
        }

        Self { index, cells }
    }

    pub fn index(&self) -> &CategoryIndex {
        &self.index
    }

    pub fn cell(&self, row: usize, col: usize) -> f64 {
        self.cells
            .get(row)
            .and_then(|cells| cells.get(col))
            .copied()
            .unwrap_or(0.0)
    }

    pub fn total(&self) -> f64 {
        self.cells.iter().flatten().sum()
    }

    pub fn marginals(&self) -> Vec<f64> {
        self.cells.iter().map(|row| row.iter().sum()).collect()
    }
}

// Positions in the sorted category index, not nominal 0/1 distance.
fn squared_distance(i: usize, j: usize) -> f64 {
    let delta = i as f64 - j as f64;
    delta * delta
}

pub fn krippendorffs_alpha(codings: &[LabelSequence]) -> ReliabilityResult<AlphaResult> {
    let names: Vec<String> = (1..=codings.len()).map(|n| format!("coder {n}")).collect();
    let named: Vec<(&str, &LabelSequence)> = names
        .iter()
        .map(String::as_str)
        .zip(codings.iter())
        .collect();
    krippendorffs_alpha_named(&named)
}

pub(crate) fn krippendorffs_alpha_named(
    codings: &[(&str, &LabelSequence)],
) -> ReliabilityResult<AlphaResult> {
    let Some((_, first)) = codings.first() else {
        return Err(ReliabilityError::InsufficientCoders { found: 0 });
    };
    let n_items = first.len();
    let n_coders = codings.len();

    for (name, sequence) in codings {
        if sequence.len() != n_items {
            return Err(ReliabilityError::DimensionMismatch {
                coder: (*name).to_string(),
                expected: n_items,
                found: sequence.len(),
            });
        }
    }

    let coincidence = CoincidenceMatrix::accumulate(codings, n_items);
    let n_c = coincidence.total();
    if n_c == 0.0 {
        debug!(n_items, n_coders, "no unit was coded by two or more coders");
        return Ok(AlphaResult {
            alpha: 0.0,
            observed_disagreement: 1.0,
            expected_disagreement: 1.0,
            interpretation: AlphaInterpretation::NoValidCodings,
            n_items,
            n_coders,
        });
    }

    let size = coincidence.index().len();
    let marginals = coincidence.marginals();

    let mut observed = 0.0_f64;
    let mut expected = 0.0_f64;
    for i in 0..size {
        for j in 0..size {
            if i == j {
                continue;
            }
            let distance = squared_distance(i, j);
            observed += coincidence.cell(i, j) * distance;
            expected += marginals[i] * marginals[j] * distance;
        }
    }

    let observed_disagreement = observed / n_c;
    let pair_mass = n_c * (n_c - 1.0);
    let expected_disagreement = if pair_mass > 0.0 {
        expected / pair_mass
    } else {
        0.0
    };

    let alpha = if expected_disagreement == 0.0 {
        1.0
    } else {
        1.0 - observed_disagreement / expected_disagreement
    };

    debug!(
        n_items,
        n_coders,
        n_categories = size,
        coincidence_mass = n_c,
        observed_disagreement,
        expected_disagreement,
        alpha,
        "computed krippendorff's alpha"
    );

    Ok(AlphaResult {
        alpha,
        observed_disagreement,
        expected_disagreement,
        interpretation: AlphaInterpretation::from_alpha(alpha),
        n_items,
        n_coders,
    })
}
