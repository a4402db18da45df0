use std::fmt;

use serde::Serialize;
use tracing::debug;

use super::error::{ReliabilityError, ReliabilityResult};
use super::matrix::AgreementMatrix;
use super::percent::percent_agreement;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KappaInterpretation {
    Poor,
    Slight,
    Fair,
    Moderate,
    Substantial,
    AlmostPerfect,
}

impl KappaInterpretation {
    pub fn from_kappa(kappa: f64) -> Self {
        if kappa < 0.0 {
            Self::Poor
        } else if kappa < 0.2 {
            Self::Slight
        } else if kappa < 0.4 {
            Self::Fair
        } else if kappa < 0.6 {
            Self::Moderate
        } else if kappa < 0.8 {
            Self::Substantial
        } else {
            Self::AlmostPerfect
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Poor => "poor (less than chance)",
            Self::Slight => "slight",
            Self::Fair => "fair",
            Self::Moderate => "moderate",
            Self::Substantial => "substantial",
            Self::AlmostPerfect => "almost perfect",
        }
    }
}

impl fmt::Display for KappaInterpretation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct KappaResult {
    pub kappa: f64,
    pub observed_agreement: f64,
    pub expected_agreement: f64,
    pub interpretation: KappaInterpretation,
    pub n_items: usize,
}

pub fn cohens_kappa<A, B>(coder_a: &[A], coder_b: &[B]) -> ReliabilityResult<KappaResult>
where
    A: AsRef<str>,
    B: AsRef<str>,
{
    let matrix = AgreementMatrix::build(coder_a, coder_b)?;
    if matrix.total() == 0 {
        return Err(ReliabilityError::EmptyInput);
    }

    let observed_agreement = percent_agreement(coder_a, coder_b)?.ratio;
    let expected_agreement = expected_agreement(&matrix);

    let kappa = if expected_agreement >= 1.0 {
        1.0
    } else {
        (observed_agreement - expected_agreement) / (1.0 - expected_agreement)
    };

    debug!(
        n_items = matrix.total(),
        observed_agreement,
        expected_agreement,
        kappa,
        "computed cohen's kappa"
    );

    Ok(KappaResult {
        kappa,
        observed_agreement,
        expected_agreement,
        interpretation: KappaInterpretation::from_kappa(kappa),
        n_items: matrix.total(),
    })
}

fn expected_agreement(matrix: &AgreementMatrix) -> f64 {
    let n = matrix.total() as f64;
    matrix
        .row_totals()
        .into_iter()
        .zip(matrix.column_totals())
        .map(|(row, col)| (row as f64 / n) * (col as f64 / n))
        .sum()
}
