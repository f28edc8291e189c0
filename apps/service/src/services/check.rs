//! Answer grading

use crate::error::{Result, ServiceError};
use crate::models::{CheckRequest, CheckResponse};
use crate::oracle::Translator;

/// Translate the prompt word and grade the user's answer against it.
///
/// Translator failures are returned as-is; they are never retried here.
pub async fn check_answer(
    translator: &dyn Translator,
    request: &CheckRequest,
    source_lang: &str,
    target_lang: &str,
) -> Result<CheckResponse> {
    let word = request
        .word
        .as_deref()
        .filter(|w| !w.trim().is_empty())
        .ok_or_else(|| ServiceError::Input("Missing word".to_string()))?;

    let translation = translator.translate(word, source_lang, target_lang).await?;
    let verdict = drill_core::check_answer(&request.answer, &translation);

    tracing::info!(word, correct = verdict.is_correct, "Checked answer");

    Ok(CheckResponse {
        correct: verdict.is_correct,
        translation: verdict.reference,
    })
}
