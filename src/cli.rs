use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use intercoder::input::CoderSpec;
use intercoder::reliability::DEFAULT_MISSING_MARKER;

#[derive(Parser, Debug)]
#[command(
    name = "intercoder",
    version,
    about = "Inter-rater reliability for qualitative coding"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Pairwise agreement, Cohen's Kappa and overall Krippendorff's Alpha.
    Compare(CompareArgs),
    /// Units where two coders assigned different labels.
    Disagreements(DisagreementsArgs),
}

#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Coder label file as NAME=PATH, one label per line. Repeatable.
    #[arg(long = "coder", value_name = "NAME=PATH", conflicts_with = "manifest")]
    pub coders: Vec<CoderSpec>,

    /// JSON manifest with coders, labels and optional contexts.
    #[arg(long = "input", value_name = "PATH")]
    pub manifest: Option<PathBuf>,

    /// Token in label files meaning "not coded".
    #[arg(long, default_value = DEFAULT_MISSING_MARKER)]
    pub missing_marker: String,

    /// Treat every token as a category, including the missing marker.
    #[arg(long, default_value_t = false)]
    pub no_missing_marker: bool,

    /// Context file, one text fragment per coding unit.
    #[arg(long)]
    pub context: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct CompareArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[arg(long, default_value_t = 5)]
    pub max_disagreements: usize,

    #[arg(long)]
    pub report_path: Option<PathBuf>,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct DisagreementsArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Limit printed disagreements; all are listed by default.
    #[arg(long)]
    pub limit: Option<usize>,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}
