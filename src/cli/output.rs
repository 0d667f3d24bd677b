//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::cli::args::{OutputFormat, VerdictArgs};
use crate::error::Result;
use crate::pipeline::types::{EvaluationReport, RecordFailure};

/// Result structure for a prediction run.
#[derive(Debug, Serialize, Deserialize)]
pub struct PredictionSummary {
    pub output_path: String,
    pub predicted: usize,
    pub guilty: usize,
    pub not_guilty: usize,
    pub failures: Vec<RecordFailure>,
    pub training_documents: usize,
    pub training_vocabulary: usize,
    pub test_vocabulary: usize,
}

/// One vocabulary entry.
#[derive(Debug, Serialize, Deserialize)]
pub struct TermEntry {
    pub term: String,
    pub document_frequency: usize,
}

/// Result structure for the vocabulary listing.
#[derive(Debug, Serialize, Deserialize)]
pub struct VocabularyListing {
    pub documents: usize,
    pub min_doc_freq: usize,
    pub vocabulary_size: usize,
    /// Terms by descending document frequency, ties in term order.
    pub terms: Vec<TermEntry>,
}

/// Human-readable rendering of a command result.
pub trait HumanOutput {
    fn print_human(&self, args: &VerdictArgs);
}

/// Output a result in the specified format.
pub fn output_result<T: Serialize + HumanOutput>(
    message: &str,
    result: &T,
    args: &VerdictArgs,
) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => {
            output_human(message, result, args);
            Ok(())
        }
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in human-readable format.
fn output_human<T: HumanOutput>(message: &str, result: &T, args: &VerdictArgs) {
    if args.verbosity() > 0 {
        println!("{message}");
        println!();
    }
    result.print_human(args);
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &VerdictArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

/// Evaluation report plus whether to list each prediction.
#[derive(Debug, Serialize)]
pub struct EvaluationOutput<'a> {
    #[serde(flatten)]
    pub report: &'a EvaluationReport,
    #[serde(skip)]
    pub show_predictions: bool,
}

impl HumanOutput for EvaluationOutput<'_> {
    fn print_human(&self, _args: &VerdictArgs) {
        let report = self.report;
        let confusion = &report.confusion;

        println!("Evaluation:");
        println!("═══════════");
        println!(
            "Training documents: {} ({:.0}% of labeled, seed {})",
            report.training_documents,
            report.train_fraction * 100.0,
            report.seed
        );
        println!("Test documents: {}", report.test_documents);
        if report.excluded_unlabeled > 0 {
            println!("Excluded unlabeled: {}", report.excluded_unlabeled);
        }
        println!("Training vocabulary: {} terms", report.training_vocabulary);
        println!("Test vocabulary: {} terms", report.test_vocabulary);
        println!();
        println!(
            "Accuracy: {:.4} ({}/{})",
            report.accuracy,
            confusion.correct(),
            confusion.total()
        );
        println!("Precision: {}", format_ratio(confusion.precision()));
        println!("Recall: {}", format_ratio(confusion.recall()));
        println!();
        println!("Confusion matrix (rows actual, columns predicted):");
        println!("───────────────");
        println!("             pred 0  pred 1");
        println!(
            "  actual 0  {:>6}  {:>6}",
            confusion.true_negatives, confusion.false_positives
        );
        println!(
            "  actual 1  {:>6}  {:>6}",
            confusion.false_negatives, confusion.true_positives
        );

        if self.show_predictions {
            println!();
            println!("Predictions:");
            println!("────────────");
            for (prediction, actual) in report.predictions.iter().zip(&report.actual) {
                let marker = if prediction.label == *actual { ' ' } else { '*' };
                println!(
                    "{marker} row {:>6}: predicted {} actual {} (score0 {:.3e}, score1 {:.3e})",
                    prediction.row,
                    prediction.label,
                    actual,
                    prediction.scores.not_guilty,
                    prediction.scores.guilty
                );
            }
        }
    }
}

impl HumanOutput for PredictionSummary {
    fn print_human(&self, args: &VerdictArgs) {
        println!("Predictions:");
        println!("════════════");
        println!("Output: {}", self.output_path);
        println!(
            "Predicted: {} ({} guilty, {} not guilty)",
            self.predicted, self.guilty, self.not_guilty
        );
        println!(
            "Training documents: {} ({} terms)",
            self.training_documents, self.training_vocabulary
        );
        println!("Test vocabulary: {} terms", self.test_vocabulary);

        if !self.failures.is_empty() {
            println!();
            println!("Failed records: {}", self.failures.len());
            if args.verbosity() > 0 {
                for failure in &self.failures {
                    println!("  row {}: {}", failure.row, failure.reason);
                }
            }
        }
    }
}

impl HumanOutput for VocabularyListing {
    fn print_human(&self, _args: &VerdictArgs) {
        println!("Vocabulary:");
        println!("═══════════");
        println!(
            "{} terms in at least {} of {} documents",
            self.vocabulary_size, self.min_doc_freq, self.documents
        );
        println!();

        let width = self.terms.iter().map(|t| t.term.len()).max().unwrap_or(0);
        for entry in &self.terms {
            println!("{:<width$}  {}", entry.term, entry.document_frequency);
        }
        if self.terms.len() < self.vocabulary_size {
            println!("... {} more", self.vocabulary_size - self.terms.len());
        }
    }
}

/// Format an optional ratio for display.
fn format_ratio(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.4}"),
        None => "n/a".to_string(),
    }
}
