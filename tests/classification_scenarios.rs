use std::fs;
use std::path::Path;

use tempfile::TempDir;
use verdict::dataset::field_value::FieldValue;
use verdict::dataset::{Dataset, DatasetSchema};
use verdict::error::{Result, VerdictError};
use verdict::ml::naive_bayes::{BernoulliNaiveBayes, Label, ScoringMode, VocabularyBuilder};
use verdict::pipeline::{Harness, NaiveBayesConfig, evaluate, predict_unlabeled};

const GUILTY: &[&str] = &[
    "Defendant pleaded guilty and was fined $250.",
    "Found guilty at trial; sentenced to probation.",
    "Guilty plea entered, restitution ordered.",
    "Pleaded guilty to a reduced charge, fined.",
    "Convicted by jury, sentenced to 30 days jail.",
];

const NOT_GUILTY: &[&str] = &[
    "All charges were dismissed by the prosecutor.",
    "Case dismissed for lack of evidence.",
    "Acquitted on all counts.",
    "Nolle prosequi entered; charges dropped.",
    "Charges dismissed after diversion was completed.",
];

fn write_csv(dir: &TempDir, name: &str, rows: &[(&str, &str)]) -> std::path::PathBuf {
    let mut content = String::from("case_id,outcome,guilty\n");
    for (i, (text, label)) in rows.iter().enumerate() {
        content.push_str(&format!("C-{i},\"{text}\",{label}\n"));
    }
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn labeled_rows(copies: usize) -> Vec<(&'static str, &'static str)> {
    let mut rows = Vec::new();
    for _ in 0..copies {
        rows.extend(GUILTY.iter().map(|t| (*t, "1")));
        rows.extend(NOT_GUILTY.iter().map(|t| (*t, "0")));
    }
    rows
}

fn config(min_doc_freq: usize) -> NaiveBayesConfig {
    NaiveBayesConfig {
        min_doc_freq,
        ..Default::default()
    }
}

fn read(path: &Path) -> Dataset {
    Dataset::read(path).unwrap()
}

#[test]
fn scenario_guilty_plea_predicts_guilty() -> Result<()> {
    let mut docs = vec!["not guilty contact resolved"; 6];
    docs.extend(vec!["guilty plea entered"; 4]);
    let mut labels = vec![Label::NotGuilty; 6];
    labels.extend(vec![Label::Guilty; 4]);

    let model = BernoulliNaiveBayes::train(&docs, &labels, 1)?;
    for term in ["guilty", "plea", "entered", "resolved", "contact", "not"] {
        assert!(model.vocabulary().contains(term));
    }

    let filter = VocabularyBuilder::new(1)?.build_filter(&["guilty plea"]);
    let scores = model.score("guilty plea", &filter);
    assert!(scores.guilty > scores.not_guilty);
    assert_eq!(scores.label(), Label::Guilty);
    Ok(())
}

#[test]
fn scenario_empty_test_document_is_deterministic() -> Result<()> {
    let docs = ["charges dismissed", "charges dismissed", "pleaded guilty"];
    let labels = [Label::NotGuilty, Label::NotGuilty, Label::Guilty];
    let model = BernoulliNaiveBayes::train(&docs, &labels, 1)?;
    let filter = VocabularyBuilder::new(1)?.build_filter(&[""]);

    let first = model.score("", &filter);
    let second = model.score("", &filter);
    assert_eq!(first, second);
    assert!(first.not_guilty > 0.0 && first.guilty > 0.0);
    Ok(())
}

#[test]
fn scenario_threshold_above_every_frequency() {
    let docs = ["charges dismissed", "pleaded guilty"];
    let labels = [Label::NotGuilty, Label::Guilty];
    let result = BernoulliNaiveBayes::train(&docs, &labels, 3);
    assert!(matches!(
        result,
        Err(VerdictError::EmptyVocabulary {
            min_doc_freq: 3,
            documents: 2
        })
    ));
}

#[test]
fn evaluate_csv_is_deterministic() -> Result<()> {
    let dir = TempDir::new().unwrap();
    let path = write_csv(&dir, "outcomes.csv", &labeled_rows(4));
    let dataset = read(&path);
    let schema = DatasetSchema::default();

    let first = evaluate(&dataset, &schema, &config(1))?;
    let second = evaluate(&dataset, &schema, &config(1))?;

    assert_eq!(first, second);
    assert_eq!(first.training_documents, 24);
    assert_eq!(first.test_documents, 16);
    assert_eq!(first.confusion.total(), 16);
    assert!(first.accuracy >= 0.75, "accuracy {}", first.accuracy);
    Ok(())
}

#[test]
fn evaluate_seed_changes_split() -> Result<()> {
    let dir = TempDir::new().unwrap();
    let dataset = read(&write_csv(&dir, "outcomes.csv", &labeled_rows(4)));
    let schema = DatasetSchema::default();

    let a = evaluate(&dataset, &schema, &config(2))?;
    let b = evaluate(
        &dataset,
        &schema,
        &NaiveBayesConfig {
            random_seed: 7,
            ..config(2)
        },
    )?;

    let rows_a: Vec<usize> = a.predictions.iter().map(|p| p.row).collect();
    let rows_b: Vec<usize> = b.predictions.iter().map(|p| p.row).collect();
    assert_ne!(rows_a, rows_b);
    Ok(())
}

#[test]
fn log_space_scoring_agrees_with_direct() -> Result<()> {
    let dir = TempDir::new().unwrap();
    let dataset = read(&write_csv(&dir, "outcomes.csv", &labeled_rows(4)));
    let schema = DatasetSchema::default();

    let direct = evaluate(&dataset, &schema, &config(2))?;
    let log_space = evaluate(
        &dataset,
        &schema,
        &NaiveBayesConfig {
            scoring_mode: ScoringMode::LogSpace,
            ..config(2)
        },
    )?;

    let labels = |r: &verdict::pipeline::EvaluationReport| {
        r.predictions.iter().map(|p| p.label).collect::<Vec<_>>()
    };
    assert_eq!(labels(&direct), labels(&log_space));
    assert_eq!(direct.accuracy, log_space.accuracy);
    Ok(())
}

#[test]
fn invalid_label_aborts_with_count() {
    let dir = TempDir::new().unwrap();
    let mut rows = labeled_rows(1);
    rows.push(("Continued to next month.", "2"));
    rows.push(("Warrant issued.", "maybe"));
    let dataset = read(&write_csv(&dir, "outcomes.csv", &rows));

    match evaluate(&dataset, &DatasetSchema::default(), &config(1)) {
        Err(VerdictError::InvalidLabel { records, .. }) => assert_eq!(records, 2),
        other => panic!("expected InvalidLabel, got {other:?}"),
    }
}

#[test]
fn missing_label_column_is_malformed() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("outcomes.jsonl");
    fs::write(
        &path,
        "{\"outcome\": \"Charges dismissed\", \"guilty\": 0}\n{\"outcome\": \"Pleaded guilty\"}\n",
    )
    .unwrap();
    let dataset = read(&path);

    match evaluate(&dataset, &DatasetSchema::default(), &config(1)) {
        Err(VerdictError::MalformedRecord { records, detail }) => {
            assert_eq!(records, 1);
            assert!(detail.contains("guilty"));
        }
        other => panic!("expected MalformedRecord, got {other:?}"),
    }
}

#[test]
fn train_fraction_leaving_empty_split_is_rejected() {
    let dir = TempDir::new().unwrap();
    let dataset = read(&write_csv(
        &dir,
        "outcomes.csv",
        &[("Charges dismissed", "0"), ("Pleaded guilty", "1")],
    ));
    let result = evaluate(
        &dataset,
        &DatasetSchema::default(),
        &NaiveBayesConfig {
            min_doc_freq: 1,
            train_fraction: 0.9,
            ..Default::default()
        },
    );
    assert!(matches!(result, Err(VerdictError::InvalidConfig(_))));
}

#[test]
fn predict_unlabeled_file_and_write_back() -> Result<()> {
    let dir = TempDir::new().unwrap();
    let train = read(&write_csv(&dir, "train.csv", &labeled_rows(2)));

    let pending_path = dir.path().join("pending.jsonl");
    fs::write(
        &pending_path,
        concat!(
            "{\"case_id\": \"P-1\", \"outcome\": \"Pleaded guilty, fined $100.\", \"guilty\": \"unknown\"}\n",
            "{\"case_id\": \"P-2\", \"outcome\": \"Charges dismissed by the prosecutor.\", \"guilty\": \"unknown\"}\n",
            "{\"case_id\": \"P-3\", \"guilty\": \"unknown\"}\n",
        ),
    )
    .unwrap();
    let pending = read(&pending_path);

    let report = predict_unlabeled(&train, &pending, &DatasetSchema::default(), &config(1))?;
    assert_eq!(report.predictions.len(), 2);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].row, 2);

    let output_path = dir.path().join("labeled.csv");
    pending
        .with_predictions("guilty", report.labels())?
        .write(&output_path)?;

    let written = read(&output_path);
    assert_eq!(written.len(), 3);
    assert_eq!(
        written.get(0).unwrap().get_field("guilty"),
        Some(&FieldValue::Integer(1))
    );
    assert_eq!(
        written.get(1).unwrap().get_field("guilty"),
        Some(&FieldValue::Integer(0))
    );
    assert_eq!(
        written.get(2).unwrap().get_field("guilty").unwrap().as_text(),
        Some("unknown")
    );
    Ok(())
}

#[test]
fn classify_mixed_dataset() -> Result<()> {
    let dir = TempDir::new().unwrap();
    let mut rows = labeled_rows(2);
    rows.push(("Guilty plea entered; fined.", "unknown"));
    rows.push(("Case dismissed, charges dropped.", ""));
    let dataset = read(&write_csv(&dir, "mixed.csv", &rows));

    let harness = Harness::new(config(1), DatasetSchema::default())?;
    let report = harness.classify_dataset(&dataset)?;

    assert_eq!(report.training_documents, 20);
    assert_eq!(
        report.labels().collect::<Vec<_>>(),
        vec![(20, Label::Guilty), (21, Label::NotGuilty)]
    );
    Ok(())
}

#[test]
fn custom_schema_fields() -> Result<()> {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("custom.csv");
    let mut content = String::from("narrative,verdict\n");
    for _ in 0..3 {
        content.push_str("\"Pleaded guilty, fined\",true\n");
        content.push_str("Charges dismissed,false\n");
    }
    content.push_str("Pleaded guilty,?\n");
    fs::write(&path, content).unwrap();

    let schema = DatasetSchema::new("narrative", "verdict").with_sentinel("?");
    let harness = Harness::new(config(1), schema)?;
    let report = harness.classify_dataset(&read(&path))?;

    assert_eq!(report.labels().collect::<Vec<_>>(), vec![(6, Label::Guilty)]);
    Ok(())
}
