use pdfsum_core::{ApiError, EvaluationRow, EvaluationTicket, ProcessTicket, SessionEvent};

/// Commands sent from the TUI to the backend listener.
#[derive(Debug)]
pub enum BackendCommand {
    /// Extract and summarize the ticket's file.
    Process(ProcessTicket),
    /// Run the benchmark pipeline on the extracted text.
    Evaluate(EvaluationTicket),
    /// Fetch the benchmark table for one mount of the section.
    LoadEvaluationTable { mount: u64 },
    /// Fetch the chart images for one evaluation timestamp.
    LoadCharts { timestamp: i64, urls: Vec<String> },
}

/// Events flowing from backend tasks to the TUI.
#[derive(Debug, Clone)]
pub enum BackendEvent {
    /// Progress of a process or evaluation run.
    Session(SessionEvent),
    TableLoaded {
        mount: u64,
        result: Result<Vec<EvaluationRow>, ApiError>,
    },
    ChartLoaded {
        timestamp: i64,
        index: usize,
        result: Result<Vec<u8>, ApiError>,
    },
}
