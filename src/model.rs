use serde::Serialize;

use crate::input::InputSource;
use crate::reliability::{DisagreementRecord, MultiCoderReport};

pub const REPORT_MANIFEST_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize)]
pub struct PairDisagreements {
    pub coder_a: String,
    pub coder_b: String,
    pub total: usize,
    pub records: Vec<DisagreementRecord>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReliabilityReportManifest {
    pub manifest_version: u32,
    pub generated_at: String,
    pub engine_version: String,
    pub missing_marker: Option<String>,
    pub inputs: Vec<InputSource>,
    pub report: MultiCoderReport,
    pub disagreements: Vec<PairDisagreements>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DisagreementListing {
    pub coder_a: String,
    pub coder_b: String,
    pub n_items: usize,
    pub agreements: usize,
    pub disagreements: Vec<DisagreementRecord>,
}
