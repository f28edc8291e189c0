//! Command execution tests against dataset files on disk.

mod common;

use pretty_assertions::assert_eq;

use common::{fixtures, TestContext};
use drill_service::{execute, Command};

fn context() -> TestContext {
    let words = fixtures::words_table(&[("the", 6.9), ("house", 5.3), ("zephyr", 4.0)]);
    let lyrics = fixtures::lyrics_table(&[(
        "Bad Bunny",
        "Titi Me Pregunto",
        &fixtures::lyrics(&[("Intro", 3), ("Verso 1", 7)]),
    )]);
    TestContext::new(&words, &lyrics)
}

/// Test the word command prints a word from the table.
#[tokio::test]
async fn test_word_command() {
    let ctx = context();

    let output = execute(&ctx.config, Command::Word).await.unwrap();

    let word = output["word"].as_str().unwrap();
    assert!(["the", "house", "zephyr"].contains(&word));
    assert!(output["fallback"].is_boolean());
}

/// Test the verse command prints the selected lines and their stanza.
#[tokio::test]
async fn test_verse_command() {
    let ctx = context();

    let output = execute(&ctx.config, Command::Verse).await.unwrap();

    assert_eq!(output["artist"], "Bad Bunny");
    assert_eq!(output["title"], "Titi Me Pregunto");
    assert_eq!(output["lines"].as_array().unwrap().len(), 6);
    let start = output["startIndex"].as_u64().unwrap();
    assert!(start <= 1);
    assert_eq!(output["verse"].as_str().unwrap().lines().count(), 7);
}

/// Test the check command uses the glossary when configured.
#[tokio::test]
async fn test_check_command_with_glossary() {
    let ctx = context().with_glossary(&fixtures::glossary_table(&[("house", "casa")]));

    let output = execute(
        &ctx.config,
        Command::Check {
            word: "house".to_string(),
            answer: "Casa".to_string(),
        },
    )
    .await
    .unwrap();

    assert_eq!(output["correct"], true);
    assert_eq!(output["translation"], "casa");
}

/// Test the check command without a glossary is a configuration error.
#[tokio::test]
async fn test_check_command_without_glossary() {
    let ctx = context();

    let err = execute(
        &ctx.config,
        Command::Check {
            word: "house".to_string(),
            answer: "casa".to_string(),
        },
    )
    .await
    .unwrap_err();

    assert_eq!(err.kind(), "config_error");
}

/// Test a missing dataset file is an IO error.
#[tokio::test]
async fn test_missing_dataset() {
    let mut ctx = context();
    ctx.config.lyrics_path = ctx.config.lyrics_path.with_file_name("missing.csv");

    let err = execute(&ctx.config, Command::Verse).await.unwrap_err();

    assert_eq!(err.kind(), "io_error");
}

/// Test verse translation without a language model is a configuration error.
#[tokio::test]
async fn test_translate_verse_command_without_model() {
    let ctx = context();

    let err = execute(
        &ctx.config,
        Command::TranslateVerse {
            artist: "Bad Bunny".to_string(),
            title: "Titi Me Pregunto".to_string(),
            verse: "Verso 1 line 1\nVerso 1 line 2".to_string(),
        },
    )
    .await
    .unwrap_err();

    assert_eq!(err.kind(), "config_error");
    assert!(err.to_string().contains("LANGUAGE_MODEL"));
}

/// Test verse translation rejects a missing artist before reaching the model.
#[tokio::test]
async fn test_translate_verse_command_missing_artist() {
    let ctx = context();

    let err = execute(
        &ctx.config,
        Command::TranslateVerse {
            artist: String::new(),
            title: "Titi Me Pregunto".to_string(),
            verse: "Verso 1 line 1".to_string(),
        },
    )
    .await
    .unwrap_err();

    assert_eq!(err.kind(), "bad_request");
}
