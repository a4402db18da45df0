//! Inter-rater reliability engine. Pure computation, no I/O.

mod alpha;
mod categories;
mod compare;
mod disagreement;
mod error;
mod kappa;
mod label;
mod matrix;
mod percent;

pub use alpha::{AlphaInterpretation, AlphaResult, krippendorffs_alpha};
pub use categories::CategoryIndex;
pub use compare::{CoderSet, MultiCoderReport, PairwiseComparison, compare_coders};
pub use disagreement::{DisagreementRecord, locate_disagreements};
pub use error::{ReliabilityError, ReliabilityResult};
pub use kappa::{KappaInterpretation, KappaResult, cohens_kappa};
pub use label::{DEFAULT_MISSING_MARKER, Label, LabelSequence, MissingMarker};
pub use matrix::AgreementMatrix;
pub use percent::{PercentAgreementResult, percent_agreement};
