//! Root controller state: the selected file, the last run's results and the
//! transient UI flags.
//!
//! All mutation goes through the methods here. Background work is described by
//! tickets handed out by `begin_*`, and reports back through [`SessionEvent`]s
//! tagged with the generation the ticket was issued under. Process runs are
//! tagged with the run generation, which every new run and every file change
//! advances. Evaluations are tagged with the file generation, which only a file
//! change advances, so re-summarizing the same file keeps a running evaluation.
//! Responses under an old tag are dropped instead of overwriting newer state.

use crate::intake::SelectedFile;
use crate::types::SummarizeResponse;

pub const STATUS_EXTRACTING: &str = "Extracting text from PDF...";
pub const STATUS_SUMMARIZING: &str = "Generating summary with Ollama...";
pub const STATUS_DONE: &str = "Done!";
pub const EVALUATION_ALERT: &str = "Failed to run benchmarks. Check the log for details.";

/// Figures reported by the backend for one summarize call.
#[derive(Debug, Clone, PartialEq)]
pub struct RunStats {
    pub runtime_sec: f64,
    pub tokens_generated: u64,
    pub speed_tokens_per_sec: f64,
}

/// Everything a process run needs, captured when it starts.
#[derive(Debug, Clone)]
pub struct ProcessTicket {
    pub generation: u64,
    pub file: SelectedFile,
    pub model: String,
    pub max_length: Option<u32>,
}

/// Everything an evaluation run needs, captured when it starts.
#[derive(Debug, Clone)]
pub struct EvaluationTicket {
    /// File generation at start.
    pub generation: u64,
    pub text: String,
}

/// Why `begin_process` refused to start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartError {
    NoFile,
    Busy,
}

/// Outcome of toggling the benchmark section.
#[derive(Debug, Clone)]
pub enum EvaluationStart {
    /// Benchmarks were visible and are now hidden. No request needed.
    Hidden,
    /// An evaluation is already running.
    Busy,
    /// Run this evaluation, then apply its [`SessionEvent::Evaluated`].
    Started(EvaluationTicket),
}

/// Progress reported by the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    Extracting { generation: u64 },
    Extracted { generation: u64, text: String },
    Summarizing { generation: u64 },
    Summarized { generation: u64, response: SummarizeResponse },
    Failed { generation: u64, message: String },
    /// Always the last event of a process run, success or not.
    Finished { generation: u64 },
    Evaluated { generation: u64, outcome: Result<(), String> },
}

impl SessionEvent {
    pub fn generation(&self) -> u64 {
        match self {
            SessionEvent::Extracting { generation }
            | SessionEvent::Extracted { generation, .. }
            | SessionEvent::Summarizing { generation }
            | SessionEvent::Summarized { generation, .. }
            | SessionEvent::Failed { generation, .. }
            | SessionEvent::Finished { generation }
            | SessionEvent::Evaluated { generation, .. } => *generation,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    pub file: Option<SelectedFile>,
    pub extracted_text: String,
    pub summary: String,
    pub keywords: Vec<String>,
    pub stats: Option<RunStats>,
    pub status: String,
    pub loading: bool,
    pub evaluating: bool,
    pub show_benchmarks: bool,
    /// Cache-busting stamp for chart URLs, in milliseconds. Strictly increases
    /// with every successful evaluation.
    pub eval_timestamp: i64,
    /// Blocking message the UI must show until dismissed.
    pub alert: Option<String>,
    generation: u64,
    file_generation: u64,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            file: None,
            extracted_text: String::new(),
            summary: String::new(),
            keywords: Vec::new(),
            stats: None,
            status: String::new(),
            loading: false,
            evaluating: false,
            show_benchmarks: false,
            eval_timestamp: now_millis(),
            alert: None,
            generation: 0,
            file_generation: 0,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The file changed: every in-flight request is abandoned, so its flags no
    /// longer apply.
    fn abandon_file_work(&mut self) {
        self.generation += 1;
        self.file_generation += 1;
        self.loading = false;
        self.evaluating = false;
    }

    fn reset_results(&mut self) {
        self.summary.clear();
        self.keywords.clear();
        self.stats = None;
    }

    /// Replace the selected file and drop everything derived from the old one.
    pub fn select_file(&mut self, file: SelectedFile) {
        self.abandon_file_work();
        self.file = Some(file);
        self.extracted_text.clear();
        self.reset_results();
        self.status.clear();
        self.show_benchmarks = false;
    }

    /// Back to the initial empty state. The evaluation timestamp survives so it
    /// keeps increasing.
    pub fn clear(&mut self) {
        self.abandon_file_work();
        self.file = None;
        self.extracted_text.clear();
        self.reset_results();
        self.status.clear();
        self.show_benchmarks = false;
        self.alert = None;
    }

    /// Claim the pipeline for the selected file.
    ///
    /// Leaves state untouched when there is no file or a run is in flight.
    pub fn begin_process(
        &mut self,
        model: &str,
        max_length: Option<u32>,
    ) -> Result<ProcessTicket, StartError> {
        if self.loading {
            return Err(StartError::Busy);
        }
        let Some(file) = self.file.clone() else {
            return Err(StartError::NoFile);
        };

        self.generation += 1;
        self.loading = true;
        self.reset_results();

        Ok(ProcessTicket {
            generation: self.generation,
            file,
            model: model.to_string(),
            max_length,
        })
    }

    /// Toggle the benchmark section, starting an evaluation when revealing it.
    pub fn begin_evaluation(&mut self) -> EvaluationStart {
        if self.show_benchmarks {
            self.show_benchmarks = false;
            return EvaluationStart::Hidden;
        }
        if self.evaluating {
            return EvaluationStart::Busy;
        }
        self.evaluating = true;
        EvaluationStart::Started(EvaluationTicket {
            generation: self.file_generation,
            text: self.extracted_text.clone(),
        })
    }

    /// Apply a pipeline event. Returns false if it belongs to an older
    /// generation and was ignored.
    pub fn apply(&mut self, event: SessionEvent) -> bool {
        let current = match event {
            SessionEvent::Evaluated { .. } => self.file_generation,
            _ => self.generation,
        };
        if event.generation() != current {
            tracing::debug!(
                event_generation = event.generation(),
                current,
                "dropping stale session event"
            );
            return false;
        }

        match event {
            SessionEvent::Extracting { .. } => {
                self.status = STATUS_EXTRACTING.to_string();
            }
            SessionEvent::Extracted { text, .. } => {
                self.extracted_text = text;
            }
            SessionEvent::Summarizing { .. } => {
                self.status = STATUS_SUMMARIZING.to_string();
            }
            SessionEvent::Summarized { response, .. } => {
                self.summary = response.summary;
                self.keywords = response.keywords.unwrap_or_default();
                self.stats = Some(RunStats {
                    runtime_sec: response.runtime_sec,
                    tokens_generated: response.tokens_generated,
                    speed_tokens_per_sec: response.speed_tokens_per_sec,
                });
                self.status = STATUS_DONE.to_string();
            }
            SessionEvent::Failed { message, .. } => {
                self.status = format!("Error: {message}");
            }
            SessionEvent::Finished { .. } => {
                self.loading = false;
            }
            SessionEvent::Evaluated { outcome, .. } => {
                self.evaluating = false;
                match outcome {
                    Ok(()) => {
                        self.eval_timestamp = next_timestamp(self.eval_timestamp, now_millis());
                        self.show_benchmarks = true;
                    }
                    Err(message) => {
                        tracing::error!(error = %message, "evaluation failed");
                        self.alert = Some(EVALUATION_ALERT.to_string());
                    }
                }
            }
        }
        true
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }
}

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Wall-clock millis, bumped past `prev` if the clock hasn't moved.
fn next_timestamp(prev: i64, now: i64) -> i64 {
    now.max(prev + 1)
}
