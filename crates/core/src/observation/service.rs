//! Run summarization service: the engine's entry point.
//!
//! Storage is injected behind [`ObservationStore`] so the computation
//! core stays unit-testable against in-memory fixtures. The production
//! implementation lives in the db crate.

use async_trait::async_trait;

use crate::error::CoreError;
use crate::types::DbId;

use super::context::{BlockInfo, RunContext, Spot};
use super::dispatch;
use super::summary::{RunSummary, SummaryMetadata};
use super::template_config::TemplateConfig;

/// Storage contract consumed by [`summarize_run`].
#[async_trait]
pub trait ObservationStore: Send + Sync {
    /// Run plus template metadata; `None` when either is missing.
    async fn fetch_run_context(&self, run_id: DbId) -> Result<Option<RunContext>, CoreError>;

    /// All spots for the run, ordered by `(observed_at, id)` ascending.
    /// Deterministic ordering keeps any order-dependent computation
    /// reproducible.
    async fn fetch_spots(&self, run_id: DbId) -> Result<Vec<Spot>, CoreError>;

    async fn fetch_block_info(&self, block_id: DbId) -> Result<Option<BlockInfo>, CoreError>;

    /// Write the summary onto the run, setting the run's end time if
    /// it was not already set.
    async fn persist_summary(&self, run_id: DbId, summary: &RunSummary) -> Result<(), CoreError>;
}

/// Summarize one run and persist the result.
///
/// Fails only when the run (or its template) does not exist or the
/// store itself errors; every data-level problem is recovered inside
/// the pipelines. A zero-spot run still persists its minimal summary.
pub async fn summarize_run<S: ObservationStore + ?Sized>(
    store: &S,
    run_id: DbId,
) -> Result<RunSummary, CoreError> {
    let context = store
        .fetch_run_context(run_id)
        .await?
        .ok_or(CoreError::NotFound { entity: "ObservationRun", id: run_id })?;

    let spots = store.fetch_spots(run_id).await?;

    // A run with no spots skips config parsing and block loading
    // entirely; the minimal summary is still persisted below.
    let mut summary = if spots.is_empty() {
        RunSummary::empty()
    } else {
        let config = TemplateConfig::from_value(context.template_config.as_ref());
        let block = match context.block_id {
            Some(block_id) => store.fetch_block_info(block_id).await?,
            None => None,
        };
        dispatch::summarize(&config, &spots, block.as_ref())
    };
    summary.metadata = Some(SummaryMetadata {
        template_type: context.template_type,
        template_name: context.template_name,
        run_id,
        completed_at: context.ended_at.unwrap_or_else(chrono::Utc::now),
    });

    store.persist_summary(run_id, &summary).await?;
    tracing::info!(
        run_id,
        n_spots = summary.n_spots,
        mode = ?summary.summary_mode,
        "Observation run summarized"
    );
    Ok(summary)
}
