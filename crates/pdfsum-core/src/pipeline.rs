//! The two backend workflows: extract-then-summarize, and evaluate.
//!
//! Both report through an `emit` callback instead of touching the session, so
//! the caller decides where events are applied (inline in tests, over a
//! channel in the TUI).

use crate::CoreError;
use crate::api::SummarizerApi;
use crate::session::{EvaluationTicket, ProcessTicket, SessionEvent};
use crate::types::SummarizeRequest;

/// Run extraction and summarization for one ticket.
///
/// Emits `Extracting`, `Extracted`, `Summarizing`, `Summarized` on success or
/// stops at the first `Failed`; `Finished` is always emitted last.
pub async fn run_process<A, F>(api: &A, ticket: ProcessTicket, mut emit: F)
where
    A: SummarizerApi + ?Sized,
    F: FnMut(SessionEvent),
{
    let generation = ticket.generation;

    if let Err(err) = process_steps(api, &ticket, &mut emit).await {
        tracing::error!(file = %ticket.file.name, error = %err, "processing failed");
        emit(SessionEvent::Failed {
            generation,
            message: err.to_string(),
        });
    }

    emit(SessionEvent::Finished { generation });
}

async fn process_steps<A, F>(api: &A, ticket: &ProcessTicket, emit: &mut F) -> Result<(), CoreError>
where
    A: SummarizerApi + ?Sized,
    F: FnMut(SessionEvent),
{
    let generation = ticket.generation;

    emit(SessionEvent::Extracting { generation });
    let bytes = ticket.file.read().await?;
    tracing::info!(file = %ticket.file.name, bytes = bytes.len(), "uploading for extraction");
    let extracted = api.extract_text(&ticket.file.name, bytes).await?;
    tracing::info!(chars = extracted.text.len(), "text extracted");
    emit(SessionEvent::Extracted {
        generation,
        text: extracted.text.clone(),
    });

    emit(SessionEvent::Summarizing { generation });
    let request = SummarizeRequest {
        text: extracted.text,
        model: ticket.model.clone(),
        max_length: ticket.max_length,
    };
    let response = api.summarize(&request).await?;
    tracing::info!(
        model = %ticket.model,
        runtime_sec = response.runtime_sec,
        tokens = response.tokens_generated,
        "summary received"
    );
    emit(SessionEvent::Summarized {
        generation,
        response,
    });
    Ok(())
}

/// Trigger the backend benchmark run. The response body is ignored.
pub async fn run_evaluation<A, F>(api: &A, ticket: EvaluationTicket, mut emit: F)
where
    A: SummarizerApi + ?Sized,
    F: FnMut(SessionEvent),
{
    tracing::info!(chars = ticket.text.len(), "starting evaluation");
    let outcome = api.evaluate(&ticket.text).await.map_err(|e| e.to_string());
    if outcome.is_ok() {
        tracing::info!("evaluation complete");
    }
    emit(SessionEvent::Evaluated {
        generation: ticket.generation,
        outcome,
    });
}
