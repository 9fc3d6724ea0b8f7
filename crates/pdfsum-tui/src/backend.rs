use std::sync::Arc;

use tokio::sync::mpsc;

use pdfsum_core::SummarizerApi;
use pdfsum_core::charts::fetch_chart;
use pdfsum_core::evaluation::load_rows;
use pdfsum_core::pipeline::{run_evaluation, run_process};

use crate::tui_event::{BackendCommand, BackendEvent};

/// Receive commands until the TUI drops its sender, running each on its own
/// task so a slow summarize never blocks a table or chart fetch.
pub async fn run_listener(
    api: Arc<dyn SummarizerApi>,
    mut cmd_rx: mpsc::UnboundedReceiver<BackendCommand>,
    event_tx: mpsc::UnboundedSender<BackendEvent>,
) {
    while let Some(cmd) = cmd_rx.recv().await {
        dispatch(api.clone(), cmd, event_tx.clone());
    }
    tracing::debug!("backend command channel closed");
}

fn dispatch(
    api: Arc<dyn SummarizerApi>,
    cmd: BackendCommand,
    tx: mpsc::UnboundedSender<BackendEvent>,
) {
    match cmd {
        BackendCommand::Process(ticket) => {
            tokio::spawn(async move {
                run_process(api.as_ref(), ticket, |e| {
                    let _ = tx.send(BackendEvent::Session(e));
                })
                .await;
            });
        }
        BackendCommand::Evaluate(ticket) => {
            tokio::spawn(async move {
                run_evaluation(api.as_ref(), ticket, |e| {
                    let _ = tx.send(BackendEvent::Session(e));
                })
                .await;
            });
        }
        BackendCommand::LoadEvaluationTable { mount } => {
            tokio::spawn(async move {
                let result = load_rows(api.as_ref()).await;
                let _ = tx.send(BackendEvent::TableLoaded { mount, result });
            });
        }
        BackendCommand::LoadCharts { timestamp, urls } => {
            for (index, url) in urls.into_iter().enumerate() {
                let api = api.clone();
                let tx = tx.clone();
                tokio::spawn(async move {
                    let result = fetch_chart(api.as_ref(), &url).await;
                    let _ = tx.send(BackendEvent::ChartLoaded {
                        timestamp,
                        index,
                        result,
                    });
                });
            }
        }
    }
}
