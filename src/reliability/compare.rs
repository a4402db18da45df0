use serde::Serialize;
use tracing::{debug, warn};

use super::alpha::{AlphaResult, krippendorffs_alpha_named};
use super::error::{ReliabilityError, ReliabilityResult};
use super::kappa::{KappaResult, cohens_kappa};
use super::label::LabelSequence;
use super::percent::{PercentAgreementResult, percent_agreement};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoderSet {
    coders: Vec<(String, LabelSequence)>,
}

impl CoderSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        name: impl Into<String>,
        labels: LabelSequence,
    ) -> ReliabilityResult<()> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ReliabilityError::InvalidCoderName);
        }
        if self.get(&name).is_some() {
            return Err(ReliabilityError::DuplicateCoder(name));
        }
        self.coders.push((name, labels));
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&LabelSequence> {
        self.coders
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, labels)| labels)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.coders.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &LabelSequence)> {
        self.coders
            .iter()
            .map(|(name, labels)| (name.as_str(), labels))
    }

    pub fn len(&self) -> usize {
        self.coders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coders.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairwiseComparison {
    pub coder_a: String,
    pub coder_b: String,
    pub n_compared: usize,
    pub percent_agreement: Option<PercentAgreementResult>,
    pub kappa: Option<KappaResult>,
}

impl PairwiseComparison {
    fn involves(&self, first: &str, second: &str) -> bool {
        (self.coder_a == first && self.coder_b == second)
            || (self.coder_a == second && self.coder_b == first)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MultiCoderReport {
    pub coder_names: Vec<String>,
    pub n_coders: usize,
    pub n_items: usize,
    pub pairwise: Vec<PairwiseComparison>,
    pub overall_alpha: AlphaResult,
}

impl MultiCoderReport {
    pub fn pair(&self, first: &str, second: &str) -> Option<&PairwiseComparison> {
        self.pairwise
            .iter()
            .find(|comparison| comparison.involves(first, second))
    }
}

pub fn compare_coders(coders: &CoderSet) -> ReliabilityResult<MultiCoderReport> {
    if coders.len() < 2 {
        return Err(ReliabilityError::InsufficientCoders {
            found: coders.len(),
        });
    }

    let named: Vec<(&str, &LabelSequence)> = coders.iter().collect();
    let n_items = named[0].1.len();

    let mut pairwise = Vec::with_capacity(named.len() * (named.len() - 1) / 2);
    for (offset, &(name_a, labels_a)) in named.iter().enumerate() {
        for &(name_b, labels_b) in &named[offset + 1..] {
            pairwise.push(compare_pair(name_a, labels_a, name_b, labels_b)?);
        }
    }

    let overall_alpha = krippendorffs_alpha_named(&named)?;

    debug!(
        n_coders = named.len(),
        n_items,
        n_pairs = pairwise.len(),
        alpha = overall_alpha.alpha,
        "compared coders"
    );

    Ok(MultiCoderReport {
        coder_names: coders.names().map(ToOwned::to_owned).collect(),
        n_coders: named.len(),
        n_items,
        pairwise,
        overall_alpha,
    })
}

fn compare_pair(
    name_a: &str,
    labels_a: &LabelSequence,
    name_b: &str,
    labels_b: &LabelSequence,
) -> ReliabilityResult<PairwiseComparison> {
    let (coded_a, coded_b) = labels_a.jointly_coded(labels_b)?;
    if coded_a.is_empty() {
        warn!(
            coder_a = name_a,
            coder_b = name_b,
            "coders share no coded unit; pairwise statistics omitted"
        );
        return Ok(PairwiseComparison {
            coder_a: name_a.to_string(),
            coder_b: name_b.to_string(),
            n_compared: 0,
            percent_agreement: None,
            kappa: None,
        });
    }
    if coded_a.len() < labels_a.len() {
        warn!(
            coder_a = name_a,
            coder_b = name_b,
            dropped = labels_a.len() - coded_a.len(),
            "skipping units not coded by both coders"
        );
    }

    let percent_agreement = Some(percent_agreement(&coded_a, &coded_b)?);
    let kappa = Some(cohens_kappa(&coded_a, &coded_b)?);

    Ok(PairwiseComparison {
        coder_a: name_a.to_string(),
        coder_b: name_b.to_string(),
        n_compared: coded_a.len(),
        percent_agreement,
        kappa,
    })
}
