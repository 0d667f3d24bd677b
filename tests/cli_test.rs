use std::fs;

use clap::Parser;
use tempfile::TempDir;
use verdict::cli::{VerdictArgs, execute_command};
use verdict::dataset::Dataset;
use verdict::dataset::field_value::FieldValue;
use verdict::error::{Result, VerdictError};

fn write_training_csv(dir: &TempDir) -> std::path::PathBuf {
    let mut content = String::from("outcome,guilty\n");
    for _ in 0..3 {
        content.push_str("\"Pleaded guilty, fined $200.\",1\n");
        content.push_str("Found guilty at trial,1\n");
        content.push_str("Charges dismissed,0\n");
        content.push_str("Acquitted of all counts,0\n");
    }
    content.push_str("Pleaded guilty at arraignment,unknown\n");
    content.push_str("Charges dismissed by the court,unknown\n");
    let path = dir.path().join("cases.csv");
    fs::write(&path, content).unwrap();
    path
}

fn run(args: &[&str]) -> Result<()> {
    let args = VerdictArgs::try_parse_from(args)
        .map_err(|e| VerdictError::invalid_argument(e.to_string()))?;
    execute_command(args)
}

#[test]
fn predict_writes_labeled_dataset() -> Result<()> {
    let dir = TempDir::new().unwrap();
    let input = write_training_csv(&dir);
    let output = dir.path().join("labeled.jsonl");

    run(&[
        "verdict",
        "-q",
        "predict",
        input.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
        "--min-doc-freq",
        "1",
    ])?;

    let labeled = Dataset::read(&output)?;
    assert_eq!(labeled.len(), 14);
    assert_eq!(
        labeled.get(12).unwrap().get_field("guilty"),
        Some(&FieldValue::Integer(1))
    );
    assert_eq!(
        labeled.get(13).unwrap().get_field("guilty"),
        Some(&FieldValue::Integer(0))
    );
    // labeled rows pass through untouched
    assert_eq!(
        labeled.get(2).unwrap().get_field("guilty"),
        Some(&FieldValue::Integer(0))
    );
    Ok(())
}

#[test]
fn predict_failure_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let input = write_training_csv(&dir);
    let output = dir.path().join("labeled.csv");

    let result = run(&[
        "verdict",
        "-q",
        "predict",
        input.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
        "--min-doc-freq",
        "100",
    ]);

    assert!(matches!(result, Err(VerdictError::EmptyVocabulary { .. })));
    assert!(!output.exists());
}

#[test]
fn evaluate_with_config_file() -> Result<()> {
    let dir = TempDir::new().unwrap();
    let input = write_training_csv(&dir);
    let config = dir.path().join("config.json");
    fs::write(
        &config,
        r#"{"min_doc_freq": 1, "train_fraction": 0.75, "random_seed": 3, "scoring_mode": "log_space"}"#,
    )
    .unwrap();

    run(&[
        "verdict",
        "-q",
        "-f",
        "json",
        "-c",
        config.to_str().unwrap(),
        "evaluate",
        input.to_str().unwrap(),
        "--show-predictions",
    ])
}

#[test]
fn vocabulary_lists_terms() -> Result<()> {
    let dir = TempDir::new().unwrap();
    let input = write_training_csv(&dir);

    run(&[
        "verdict",
        "-q",
        "vocabulary",
        input.to_str().unwrap(),
        "--min-doc-freq",
        "3",
        "-n",
        "5",
    ])
}

#[test]
fn invalid_config_file_is_rejected() {
    let dir = TempDir::new().unwrap();
    let input = write_training_csv(&dir);
    let config = dir.path().join("config.json");
    fs::write(&config, r#"{"train_fraction": 1.5}"#).unwrap();

    let result = run(&[
        "verdict",
        "-c",
        config.to_str().unwrap(),
        "evaluate",
        input.to_str().unwrap(),
    ]);
    assert!(matches!(result, Err(VerdictError::InvalidConfig(_))));
}
