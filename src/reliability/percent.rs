use serde::Serialize;

use super::error::{ReliabilityError, ReliabilityResult};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PercentAgreementResult {
    pub ratio: f64,
}

impl PercentAgreementResult {
    pub fn as_percent(&self) -> f64 {
        self.ratio * 100.0
    }
}

pub fn percent_agreement<A, B>(
    coder_a: &[A],
    coder_b: &[B],
) -> ReliabilityResult<PercentAgreementResult>
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
    if coder_a.is_empty() {
        return Err(ReliabilityError::EmptyInput);
    }

    let agreements = coder_a
        .iter()
        .zip(coder_b)
        .filter(|&(a, b)| a.as_ref() == b.as_ref())
        .count();

    Ok(PercentAgreementResult {
        ratio: agreements as f64 / coder_a.len() as f64,
    })
}
