//! Result types produced by the harness.

use serde::{Deserialize, Serialize};

use crate::ml::naive_bayes::{ClassScores, Label};

/// Predicted label of one dataset row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Row index in the dataset the record came from.
    pub row: usize,
    pub label: Label,
    pub scores: ClassScores,
}

/// A record that could not be classified. The rest of the batch still is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordFailure {
    pub row: usize,
    pub reason: String,
}

/// 2×2 confusion matrix with "guilty" as the positive class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    pub true_positives: usize,
    pub false_positives: usize,
    pub true_negatives: usize,
    pub false_negatives: usize,
}

impl ConfusionMatrix {
    /// Tally one prediction.
    pub fn record(&mut self, actual: Label, predicted: Label) {
        match (actual, predicted) {
            (Label::Guilty, Label::Guilty) => self.true_positives += 1,
            (Label::NotGuilty, Label::Guilty) => self.false_positives += 1,
            (Label::NotGuilty, Label::NotGuilty) => self.true_negatives += 1,
            (Label::Guilty, Label::NotGuilty) => self.false_negatives += 1,
        }
    }

    /// Number of tallied predictions.
    pub fn total(&self) -> usize {
        self.true_positives + self.false_positives + self.true_negatives + self.false_negatives
    }

    /// Correct predictions.
    pub fn correct(&self) -> usize {
        self.true_positives + self.true_negatives
    }

    /// Fraction of correct predictions; 0 when nothing was tallied.
    pub fn accuracy(&self) -> f64 {
        match self.total() {
            0 => 0.0,
            total => self.correct() as f64 / total as f64,
        }
    }

    /// `tp / (tp + fp)`, undefined without positive predictions.
    pub fn precision(&self) -> Option<f64> {
        ratio(self.true_positives, self.true_positives + self.false_positives)
    }

    /// `tp / (tp + fn)`, undefined without positive records.
    pub fn recall(&self) -> Option<f64> {
        ratio(self.true_positives, self.true_positives + self.false_negatives)
    }
}

fn ratio(numerator: usize, denominator: usize) -> Option<f64> {
    (denominator > 0).then(|| numerator as f64 / denominator as f64)
}

/// Outcome of an evaluation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    /// Test-split predictions in split order.
    pub predictions: Vec<Prediction>,
    /// True labels, aligned with `predictions`.
    pub actual: Vec<Label>,
    pub accuracy: f64,
    pub confusion: ConfusionMatrix,
    pub training_documents: usize,
    pub test_documents: usize,
    /// Unlabeled records left out of the split.
    pub excluded_unlabeled: usize,
    pub training_vocabulary: usize,
    pub test_vocabulary: usize,
    pub train_fraction: f64,
    pub seed: u64,
}

/// Outcome of a production run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PredictionReport {
    /// Predictions in row order.
    pub predictions: Vec<Prediction>,
    pub failures: Vec<RecordFailure>,
    pub training_documents: usize,
    pub training_vocabulary: usize,
    pub test_vocabulary: usize,
}

impl PredictionReport {
    /// `(row, label)` pairs, ready for [`Dataset::with_predictions`](crate::dataset::Dataset::with_predictions).
    pub fn labels(&self) -> impl Iterator<Item = (usize, Label)> + '_ {
        self.predictions.iter().map(|p| (p.row, p.label))
    }

    /// Number of guilty predictions.
    pub fn guilty_count(&self) -> usize {
        self.predictions
            .iter()
            .filter(|p| p.label == Label::Guilty)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confusion_matrix() {
        let mut matrix = ConfusionMatrix::default();
        matrix.record(Label::Guilty, Label::Guilty);
        matrix.record(Label::Guilty, Label::NotGuilty);
        matrix.record(Label::NotGuilty, Label::NotGuilty);
        matrix.record(Label::NotGuilty, Label::NotGuilty);

        assert_eq!(matrix.total(), 4);
        assert_eq!(matrix.accuracy(), 0.75);
        assert_eq!(matrix.precision(), Some(1.0));
        assert_eq!(matrix.recall(), Some(0.5));
    }

    #[test]
    fn test_empty_matrix() {
        let matrix = ConfusionMatrix::default();
        assert_eq!(matrix.accuracy(), 0.0);
        assert_eq!(matrix.precision(), None);
    }
}
