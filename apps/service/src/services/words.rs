//! Practice word selection

use std::sync::Arc;
use std::time::Duration;

use drill_core::{Record, WeightedRecord, WeightedSampler};
use rand::Rng;

use crate::db::RecordStore;
use crate::error::{Result, ServiceError};
use crate::models::WordPrompt;

/// Draw a practice word, biased towards frequent words.
///
/// Store access runs on the blocking pool and is abandoned after `timeout`.
/// An abandoned task keeps running until the store returns; the runtime
/// built by [`crate::block_on`] stops waiting for it shortly after shutdown.
pub async fn random_word<R>(
    store: Arc<dyn RecordStore>,
    sampler: WeightedSampler,
    word_column: String,
    timeout: Duration,
    mut rng: R,
) -> Result<WordPrompt>
where
    R: Rng + Send + 'static,
{
    let task = tokio::task::spawn_blocking(move || {
        draw_word(store.as_ref(), &sampler, &word_column, &mut rng)
    });

    match tokio::time::timeout(timeout, task).await {
        Ok(Ok(result)) => result,
        Ok(Err(join_error)) => Err(ServiceError::Store(join_error.to_string())),
        Err(_) => {
            tracing::warn!("Word draw timed out after {:?}", timeout);
            Err(ServiceError::Timeout(timeout))
        }
    }
}

/// Draw a practice word synchronously.
///
/// Rows with an empty word are treated like rejected draws. When every draw
/// is rejected the highest-scoring word is returned instead.
pub fn draw_word<R: Rng + ?Sized>(
    store: &dyn RecordStore,
    sampler: &WeightedSampler,
    word_column: &str,
    rng: &mut R,
) -> Result<WordPrompt> {
    let has_word = |record: &Record| {
        record
            .get(word_column)
            .is_some_and(|word| !word.trim().is_empty())
    };

    let total = store.count()?;
    let selection = sampler.sample(
        total,
        |offset| -> Result<Option<WeightedRecord>> {
            let row = store.fetch_scored(offset)?;
            tracing::debug!(offset, score = ?row.as_ref().map(|r| r.score), "Fetched candidate word");
            Ok(row.filter(|r| has_word(&r.record)))
        },
        || -> Result<Option<Record>> {
            let top = store.fetch_top_by_score(1)?;
            Ok(top.into_iter().next().filter(|r| has_word(r)))
        },
        rng,
    )?;

    let Some(selection) = selection else {
        tracing::warn!("No word found in a collection of {} rows", total);
        return Err(ServiceError::NotFound("No word found".to_string()));
    };

    let fallback = selection.is_fallback();
    if fallback {
        tracing::warn!(
            "All {} draws rejected, using the highest-scoring word",
            sampler.max_attempts()
        );
    }

    let word = selection
        .record()
        .get(word_column)
        .unwrap_or_default()
        .to_string();
    tracing::info!(word = %word, fallback, "Selected practice word");

    Ok(WordPrompt { word, fallback })
}
