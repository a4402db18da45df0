use serde::Serialize;

use super::error::{ReliabilityError, ReliabilityResult};
use super::label::{Label, LabelSequence};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisagreementRecord {
    pub index: usize,
    pub label_a: Label,
    pub label_b: Label,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

pub fn locate_disagreements(
    coder_a: &LabelSequence,
    coder_b: &LabelSequence,
    context: Option<&[String]>,
) -> ReliabilityResult<Vec<DisagreementRecord>> {
    if coder_a.len() != coder_b.len() {
        return Err(ReliabilityError::LengthMismatch {
            left: coder_a.len(),
            right: coder_b.len(),
        });
    }
    if let Some(fragments) = context
        && fragments.len() != coder_a.len()
    {
        return Err(ReliabilityError::LengthMismatch {
            left: coder_a.len(),
            right: fragments.len(),
        });
    }

    let records = coder_a
        .iter()
        .zip(coder_b.iter())
        .enumerate()
        .filter(|(_, (a, b))| a != b)
        .map(|(index, (a, b))| DisagreementRecord {
            index,
            label_a: a.clone(),
            label_b: b.clone(),
            context: context.and_then(|fragments| fragments.get(index).cloned()),
        })
        .collect();

    Ok(records)
}
