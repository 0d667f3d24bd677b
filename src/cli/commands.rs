//! Command implementations for the verdict CLI.

use std::time::Instant;

use log::info;

use crate::cli::args::*;
use crate::cli::output::*;
use crate::dataset::Dataset;
use crate::dataset::schema::DatasetSchema;
use crate::error::Result;
use crate::pipeline::config::NaiveBayesConfig;
use crate::pipeline::harness::Harness;

/// Execute a CLI command.
pub fn execute_command(args: VerdictArgs) -> Result<()> {
    match &args.command {
        Command::Evaluate(evaluate_args) => evaluate(evaluate_args, &args),
        Command::Predict(predict_args) => predict(predict_args, &args),
        Command::Vocabulary(vocabulary_args) => vocabulary(vocabulary_args, &args),
    }
}

/// Configuration from `--config` (or defaults), before command-line overrides.
fn load_config(cli_args: &VerdictArgs) -> Result<NaiveBayesConfig> {
    match &cli_args.config {
        Some(path) => {
            info!("loading configuration from {}", path.display());
            NaiveBayesConfig::from_file(path)
        }
        None => Ok(NaiveBayesConfig::default()),
    }
}

fn apply_model_args(config: &mut NaiveBayesConfig, model: &ModelArgs) {
    if let Some(min_doc_freq) = model.min_doc_freq {
        config.min_doc_freq = min_doc_freq;
    }
    if let Some(mode) = model.scoring_mode {
        config.scoring_mode = mode.into();
    }
}

/// Evaluate held-out accuracy.
fn evaluate(args: &EvaluateArgs, cli_args: &VerdictArgs) -> Result<()> {
    let mut config = load_config(cli_args)?;
    apply_model_args(&mut config, &args.model);
    if let Some(train_fraction) = args.train_fraction {
        config.train_fraction = train_fraction;
    }
    if let Some(seed) = args.seed {
        config.random_seed = seed;
    }

    let harness = Harness::new(config, args.fields.schema())?;
    let start_time = Instant::now();
    let dataset = Dataset::read(&args.dataset)?;
    let report = harness.evaluate(&dataset)?;
    info!("evaluation finished in {:?}", start_time.elapsed());

    output_result(
        &format!("Evaluated {}", args.dataset.display()),
        &EvaluationOutput {
            report: &report,
            show_predictions: args.show_predictions,
        },
        cli_args,
    )
}

/// Label unlabeled records and write the augmented dataset.
///
/// Nothing is written unless training and classification succeed.
fn predict(args: &PredictArgs, cli_args: &VerdictArgs) -> Result<()> {
    let mut config = load_config(cli_args)?;
    apply_model_args(&mut config, &args.model);

    let harness = Harness::new(config, args.fields.schema())?;
    let dataset = Dataset::read(&args.dataset)?;

    let (target, report) = match &args.unlabeled {
        Some(path) => {
            let unlabeled = Dataset::read(path)?;
            let report = harness.predict_unlabeled(&dataset, &unlabeled)?;
            (unlabeled, report)
        }
        None => {
            let report = harness.classify_dataset(&dataset)?;
            (dataset, report)
        }
    };

    let output = target.with_predictions(&args.fields.label_field, report.labels())?;
    output.write(&args.output)?;
    info!(
        "wrote {} records to {}",
        output.len(),
        args.output.display()
    );

    let guilty = report.guilty_count();
    let summary = PredictionSummary {
        output_path: args.output.to_string_lossy().to_string(),
        predicted: report.predictions.len(),
        guilty,
        not_guilty: report.predictions.len() - guilty,
        failures: report.failures,
        training_documents: report.training_documents,
        training_vocabulary: report.training_vocabulary,
        test_vocabulary: report.test_vocabulary,
    };

    output_result("Prediction finished", &summary, cli_args)
}

/// List the pruned vocabulary of a dataset's narratives.
fn vocabulary(args: &VocabularyArgs, cli_args: &VerdictArgs) -> Result<()> {
    let mut config = load_config(cli_args)?;
    if let Some(min_doc_freq) = args.min_doc_freq {
        config.min_doc_freq = min_doc_freq;
    }

    let schema = DatasetSchema {
        text_field: args.text_field.clone(),
        ..Default::default()
    };
    let harness = Harness::new(config, schema)?;
    let dataset = Dataset::read(&args.dataset)?;
    harness.schema().check_fields(&dataset, false)?;

    let rows: Vec<usize> = (0..dataset.len()).collect();
    let cleaned = harness.clean_rows(&dataset, &rows)?;
    let (vocabulary, _) = harness.config().vocabulary_builder()?.build(&cleaned)?;

    let mut terms: Vec<TermEntry> = vocabulary
        .iter()
        .map(|(term, document_frequency)| TermEntry {
            term: term.to_string(),
            document_frequency,
        })
        .collect();
    // vocabulary order is lexicographic, so a stable sort keeps ties in term order
    terms.sort_by(|a, b| b.document_frequency.cmp(&a.document_frequency));
    if let Some(limit) = args.limit {
        terms.truncate(limit);
    }

    let listing = VocabularyListing {
        documents: vocabulary.documents(),
        min_doc_freq: vocabulary.min_doc_freq(),
        vocabulary_size: vocabulary.len(),
        terms,
    };

    output_result(
        &format!("Vocabulary of {}", args.dataset.display()),
        &listing,
        cli_args,
    )
}
