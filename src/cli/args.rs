//! Command line argument parsing for the verdict CLI using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::dataset::schema::{
    DEFAULT_LABEL_FIELD, DEFAULT_TEXT_FIELD, DEFAULT_UNLABELED_SENTINEL, DatasetSchema,
};
use crate::ml::naive_bayes::ScoringMode;

/// verdict - Bernoulli Naive Bayes guilt classification for case-outcome narratives
#[derive(Parser, Debug, Clone)]
#[command(name = "verdict")]
#[command(about = "Classify case-outcome narratives as guilty / not guilty")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct VerdictArgs {
    /// Verbosity level (-v normal, -vv info, -vvv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Configuration file (JSON); command-line flags override its values
    #[arg(short, long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl VerdictArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Split a labeled dataset, train, and report held-out accuracy
    Evaluate(EvaluateArgs),

    /// Train on labeled records and label the unlabeled ones
    Predict(PredictArgs),

    /// Build the pruned vocabulary of a dataset and list its terms
    Vocabulary(VocabularyArgs),
}

/// Field names of the dataset.
#[derive(Args, Debug, Clone)]
pub struct FieldArgs {
    /// Field holding the outcome narrative
    #[arg(long, default_value = DEFAULT_TEXT_FIELD)]
    pub text_field: String,

    /// Field holding the 0/1 label
    #[arg(long, default_value = DEFAULT_LABEL_FIELD)]
    pub label_field: String,

    /// Label value marking a record as unlabeled
    #[arg(long, default_value = DEFAULT_UNLABELED_SENTINEL)]
    pub unlabeled_sentinel: String,
}

impl FieldArgs {
    /// Schema descriptor for these field names.
    pub fn schema(&self) -> DatasetSchema {
        DatasetSchema::new(self.text_field.as_str(), self.label_field.as_str())
            .with_sentinel(self.unlabeled_sentinel.as_str())
    }
}

/// Model options shared by the training commands.
#[derive(Args, Debug, Clone)]
pub struct ModelArgs {
    /// Minimum number of documents a term must appear in
    #[arg(long)]
    pub min_doc_freq: Option<usize>,

    /// How class scores are accumulated
    #[arg(long)]
    pub scoring_mode: Option<ScoringModeArg>,
}

/// Arguments for evaluation
#[derive(Parser, Debug, Clone)]
pub struct EvaluateArgs {
    /// Labeled dataset (CSV or JSONL)
    #[arg(value_name = "DATASET")]
    pub dataset: PathBuf,

    #[command(flatten)]
    pub fields: FieldArgs,

    #[command(flatten)]
    pub model: ModelArgs,

    /// Fraction of labeled records used for training
    #[arg(long)]
    pub train_fraction: Option<f64>,

    /// Seed of the train/test shuffle
    #[arg(long)]
    pub seed: Option<u64>,

    /// Include every test prediction in the output
    #[arg(long)]
    pub show_predictions: bool,
}

/// Arguments for prediction
#[derive(Parser, Debug, Clone)]
pub struct PredictArgs {
    /// Dataset whose labeled records train the model (CSV or JSONL)
    #[arg(value_name = "DATASET")]
    pub dataset: PathBuf,

    /// Separate file of records to label; defaults to the unlabeled records of DATASET
    #[arg(short, long, value_name = "UNLABELED_FILE")]
    pub unlabeled: Option<PathBuf>,

    /// Where to write the labeled dataset (format from extension)
    #[arg(short, long, value_name = "OUTPUT_FILE")]
    pub output: PathBuf,

    #[command(flatten)]
    pub fields: FieldArgs,

    #[command(flatten)]
    pub model: ModelArgs,
}

/// Arguments for listing the vocabulary
#[derive(Parser, Debug, Clone)]
pub struct VocabularyArgs {
    /// Dataset (CSV or JSONL)
    #[arg(value_name = "DATASET")]
    pub dataset: PathBuf,

    /// Field holding the outcome narrative
    #[arg(long, default_value = DEFAULT_TEXT_FIELD)]
    pub text_field: String,

    /// Minimum number of documents a term must appear in
    #[arg(long)]
    pub min_doc_freq: Option<usize>,

    /// Show at most this many terms
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,
}

/// Scoring modes available in CLI
#[derive(ValueEnum, Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringModeArg {
    /// Product of probabilities
    Direct,
    /// Sum of log probabilities
    #[value(alias = "log_space")]
    LogSpace,
}

impl From<ScoringModeArg> for ScoringMode {
    fn from(arg: ScoringModeArg) -> Self {
        match arg {
            ScoringModeArg::Direct => ScoringMode::Direct,
            ScoringModeArg::LogSpace => ScoringMode::LogSpace,
        }
    }
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
