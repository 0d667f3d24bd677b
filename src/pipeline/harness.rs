//! Train/test harness.
//!
//! Two modes share one pipeline: evaluation splits a labeled dataset with a
//! seeded shuffle and reports accuracy on the held-out part; production
//! trains on one set and labels another.
//!
//! Scoring always runs over the *training* vocabulary, but a term of a test
//! document only counts as present if it also survives pruning in a
//! vocabulary built independently from the test documents themselves (see
//! [`VocabularyBuilder::build_filter`](crate::ml::naive_bayes::VocabularyBuilder::build_filter)).
//! A training term that is rare on the test side therefore always scores as
//! absent, even in a document that contains it.

use std::borrow::Cow;

use log::{debug, info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::analysis::analyzer::NarrativeAnalyzer;
use crate::dataset::Dataset;
use crate::dataset::schema::DatasetSchema;
use crate::error::{Result, VerdictError};
use crate::ml::naive_bayes::{BernoulliNaiveBayes, Label, Vocabulary};
use crate::pipeline::config::NaiveBayesConfig;
use crate::pipeline::types::{
    ConfusionMatrix, EvaluationReport, Prediction, PredictionReport, RecordFailure,
};

/// Shuffle `0..total` with `seed` and cut it at `round(train_fraction * total)`.
///
/// Rounding is half-to-even. Both sides must end up non-empty.
pub fn split_indices(
    total: usize,
    train_fraction: f64,
    seed: u64,
) -> Result<(Vec<usize>, Vec<usize>)> {
    if !(train_fraction > 0.0 && train_fraction < 1.0) {
        return Err(VerdictError::invalid_config(format!(
            "train_fraction must be strictly between 0 and 1, got {train_fraction}"
        )));
    }

    let cut = (train_fraction * total as f64).round_ties_even() as usize;
    if cut == 0 || cut >= total {
        return Err(VerdictError::invalid_config(format!(
            "train_fraction {train_fraction} over {total} labeled records leaves an empty split"
        )));
    }

    let mut order: Vec<usize> = (0..total).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    order.shuffle(&mut rng);

    let test = order.split_off(cut);
    Ok((order, test))
}

/// Runs the classification pipeline for one configuration and schema.
#[derive(Debug, Clone)]
pub struct Harness {
    config: NaiveBayesConfig,
    schema: DatasetSchema,
    analyzer: NarrativeAnalyzer,
}

impl Harness {
    /// Validate the configuration and build the narrative analyzer.
    pub fn new(config: NaiveBayesConfig, schema: DatasetSchema) -> Result<Self> {
        config.validate()?;
        let analyzer = config.build_analyzer()?;
        Ok(Self {
            config,
            schema,
            analyzer,
        })
    }

    pub fn config(&self) -> &NaiveBayesConfig {
        &self.config
    }

    pub fn schema(&self) -> &DatasetSchema {
        &self.schema
    }

    pub fn analyzer(&self) -> &NarrativeAnalyzer {
        &self.analyzer
    }

    /// Clean every row's narrative. Missing or null text is an empty document.
    pub fn clean_rows(&self, dataset: &Dataset, rows: &[usize]) -> Result<Vec<String>> {
        let raw: Vec<Option<Cow<'_, str>>> = rows
            .iter()
            .map(|&row| dataset.get(row).and_then(|r| self.schema.text_of(r)))
            .collect();
        self.analyzer
            .clean_documents(raw.iter().map(|text| text.as_deref()))
            .collect_all()
    }

    /// Train on cleaned documents.
    ///
    /// Class coverage is checked before the vocabulary is built so a
    /// one-class training set reports [`VerdictError::EmptyClass`].
    pub fn train(&self, cleaned: &[String], labels: &[Label]) -> Result<BernoulliNaiveBayes> {
        for label in Label::ALL {
            if !labels.contains(&label) {
                return Err(VerdictError::EmptyClass {
                    label,
                    training_documents: labels.len(),
                });
            }
        }

        let model = BernoulliNaiveBayes::train(cleaned, labels, self.config.min_doc_freq)?
            .with_scoring_mode(self.config.scoring_mode);
        info!(
            "trained on {} documents; training vocabulary has {} terms",
            cleaned.len(),
            model.vocabulary().len()
        );
        Ok(model)
    }

    /// Test-side presence filter over cleaned documents.
    pub fn build_filter(&self, cleaned: &[String]) -> Result<Vocabulary> {
        let filter = self.config.vocabulary_builder()?.build_filter(cleaned);
        info!(
            "test-side vocabulary has {} terms over {} documents",
            filter.len(),
            cleaned.len()
        );
        Ok(filter)
    }

    /// Evaluation mode: seeded split of the labeled records, train, score the rest.
    ///
    /// Records carrying the unlabeled sentinel have no ground truth and are
    /// left out before shuffling.
    pub fn evaluate(&self, dataset: &Dataset) -> Result<EvaluationReport> {
        let partition = self.schema.partition(dataset)?;
        let labeled = partition.labeled;
        if !partition.unlabeled.is_empty() {
            warn!(
                "excluding {} unlabeled records from evaluation",
                partition.unlabeled.len()
            );
        }

        let (train_positions, test_positions) = split_indices(
            labeled.len(),
            self.config.train_fraction,
            self.config.random_seed,
        )?;
        info!(
            "split {} labeled records into {} training and {} test (seed {})",
            labeled.len(),
            train_positions.len(),
            test_positions.len(),
            self.config.random_seed
        );

        let train_rows: Vec<usize> = train_positions.iter().map(|&i| labeled[i].0).collect();
        let train_labels: Vec<Label> = train_positions.iter().map(|&i| labeled[i].1).collect();
        let test_rows: Vec<usize> = test_positions.iter().map(|&i| labeled[i].0).collect();
        let actual: Vec<Label> = test_positions.iter().map(|&i| labeled[i].1).collect();

        let train_cleaned = self.clean_rows(dataset, &train_rows)?;
        let model = self.train(&train_cleaned, &train_labels)?;

        let test_cleaned = self.clean_rows(dataset, &test_rows)?;
        let filter = self.build_filter(&test_cleaned)?;

        let mut confusion = ConfusionMatrix::default();
        let predictions: Vec<Prediction> = model
            .score_batch(&test_cleaned, &filter)
            .into_iter()
            .zip(&test_rows)
            .zip(&actual)
            .map(|((scores, &row), &truth)| {
                let label = scores.label();
                confusion.record(truth, label);
                Prediction { row, label, scores }
            })
            .collect();

        let accuracy = confusion.accuracy();
        info!(
            "accuracy {:.4} ({} of {} test documents)",
            accuracy,
            confusion.correct(),
            confusion.total()
        );

        Ok(EvaluationReport {
            predictions,
            actual,
            accuracy,
            confusion,
            training_documents: train_rows.len(),
            test_documents: test_rows.len(),
            excluded_unlabeled: partition.unlabeled.len(),
            training_vocabulary: model.vocabulary().len(),
            test_vocabulary: filter.len(),
            train_fraction: self.config.train_fraction,
            seed: self.config.random_seed,
        })
    }

    /// Production mode: train on the labeled records of `train_set`, label
    /// every record of `unlabeled_set`.
    ///
    /// A record of `unlabeled_set` without the text field is reported as a
    /// [`RecordFailure`]; the others are still classified.
    pub fn predict_unlabeled(
        &self,
        train_set: &Dataset,
        unlabeled_set: &Dataset,
    ) -> Result<PredictionReport> {
        let partition = self.schema.partition(train_set)?;
        if !partition.unlabeled.is_empty() {
            warn!(
                "ignoring {} unlabeled records in the training set",
                partition.unlabeled.len()
            );
        }

        let model = self.fit(train_set, &partition.labeled)?;
        let rows: Vec<usize> = (0..unlabeled_set.len()).collect();
        self.predict_rows(&model, unlabeled_set, &rows, partition.labeled.len())
    }

    /// Production mode over one mixed dataset: labeled records train, the
    /// unlabeled ones are predicted. Rows in the report index `dataset`.
    ///
    /// An unlabeled record without the text field becomes a
    /// [`RecordFailure`]; a labeled one fails the run.
    pub fn classify_dataset(&self, dataset: &Dataset) -> Result<PredictionReport> {
        let partition = self.schema.partition(dataset)?;
        let model = self.fit(dataset, &partition.labeled)?;
        self.predict_rows(
            &model,
            dataset,
            &partition.unlabeled,
            partition.labeled.len(),
        )
    }

    fn fit(&self, dataset: &Dataset, labeled: &[(usize, Label)]) -> Result<BernoulliNaiveBayes> {
        let (rows, labels): (Vec<usize>, Vec<Label>) = labeled.iter().copied().unzip();
        let cleaned = self.clean_rows(dataset, &rows)?;
        self.train(&cleaned, &labels)
    }

    fn predict_rows(
        &self,
        model: &BernoulliNaiveBayes,
        dataset: &Dataset,
        rows: &[usize],
        training_documents: usize,
    ) -> Result<PredictionReport> {
        let mut failures = Vec::new();
        let mut present = Vec::with_capacity(rows.len());
        let mut raw = Vec::with_capacity(rows.len());

        for &row in rows {
            match dataset.get(row) {
                Some(record) if record.has_field(&self.schema.text_field) => {
                    present.push(row);
                    raw.push(self.schema.text_of(record));
                }
                _ => failures.push(RecordFailure {
                    row,
                    reason: format!("missing required field '{}'", self.schema.text_field),
                }),
            }
        }

        let mut classified = Vec::with_capacity(present.len());
        let mut cleaned = Vec::with_capacity(present.len());
        let documents = self
            .analyzer
            .clean_documents(raw.iter().map(|text| text.as_deref()));
        for (row, result) in present.into_iter().zip(documents.iter()) {
            match result {
                Ok(text) => {
                    classified.push(row);
                    cleaned.push(text);
                }
                Err(e) => failures.push(RecordFailure {
                    row,
                    reason: e.to_string(),
                }),
            }
        }

        if !failures.is_empty() {
            failures.sort_by_key(|f| f.row);
            warn!("{} records could not be classified", failures.len());
        }

        let filter = self.build_filter(&cleaned)?;
        debug!(
            "classifying {} records against {} test-side terms",
            cleaned.len(),
            filter.len()
        );

        let predictions: Vec<Prediction> = model
            .score_batch(&cleaned, &filter)
            .into_iter()
            .zip(classified)
            .map(|(scores, row)| Prediction {
                row,
                label: scores.label(),
                scores,
            })
            .collect();

        info!(
            "predicted {} records ({} guilty), {} failures",
            predictions.len(),
            predictions
                .iter()
                .filter(|p| p.label == Label::Guilty)
                .count(),
            failures.len()
        );

        Ok(PredictionReport {
            predictions,
            failures,
            training_documents,
            training_vocabulary: model.vocabulary().len(),
            test_vocabulary: filter.len(),
        })
    }
}

/// Evaluate `dataset` with a one-off [`Harness`].
pub fn evaluate(
    dataset: &Dataset,
    schema: &DatasetSchema,
    config: &NaiveBayesConfig,
) -> Result<EvaluationReport> {
    Harness::new(config.clone(), schema.clone())?.evaluate(dataset)
}

/// Train on `train_set` and label `unlabeled_set` with a one-off [`Harness`].
pub fn predict_unlabeled(
    train_set: &Dataset,
    unlabeled_set: &Dataset,
    schema: &DatasetSchema,
    config: &NaiveBayesConfig,
) -> Result<PredictionReport> {
    Harness::new(config.clone(), schema.clone())?.predict_unlabeled(train_set, unlabeled_set)
}
