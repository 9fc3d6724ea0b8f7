use std::path::PathBuf;
use thiserror::Error;

pub mod api;
pub mod charts;
pub mod evaluation;
pub mod intake;
pub mod mock;
pub mod pipeline;
pub mod session;
pub mod types;

// Re-export for convenience
pub use api::{ApiError, HttpApi, SummarizerApi};
pub use charts::{ChartGallery, ChartImage, ChartState};
pub use evaluation::{DisplayRow, EvaluationTable, TableState, TableView};
pub use intake::SelectedFile;
pub use pipeline::{run_evaluation, run_process};
pub use session::{EvaluationStart, EvaluationTicket, ProcessTicket, RunStats, Session, SessionEvent, StartError};
pub use types::{EvaluationRow, ExtractResponse, SummarizeRequest, SummarizeResponse};

/// Backend host used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

/// Model identifier sent with every summarize request unless overridden.
pub const DEFAULT_MODEL: &str = "llama3.2:1b";

#[derive(Error, Debug)]
pub enum CoreError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{} is not a PDF file", path.display())]
    NotPdf { path: PathBuf },
    #[error("{} is not a file", path.display())]
    NotAFile { path: PathBuf },
    #[error("only one file can be selected at a time ({count} given)")]
    MultipleFiles { count: usize },
    #[error("no file given")]
    NoFile,
}
