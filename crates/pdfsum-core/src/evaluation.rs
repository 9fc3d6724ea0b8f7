//! Benchmark table: fetched once per mount, displayed with derived formatting.

use crate::api::{ApiError, SummarizerApi};
use crate::types::EvaluationRow;

pub const LOAD_ERROR: &str = "Failed to load evaluation results.";
pub const EMPTY_MESSAGE: &str =
    "No evaluation results found. Run the evaluation pipeline backend script to generate data.";

#[derive(Debug, Clone, PartialEq)]
pub enum TableState {
    Loading,
    Failed(String),
    Loaded(Vec<EvaluationRow>),
}

/// The table as it should be drawn.
#[derive(Debug, Clone, PartialEq)]
pub enum TableView<'a> {
    Spinner,
    Error(&'a str),
    Empty(&'a str),
    Rows(Vec<DisplayRow>),
}

/// One table row, already formatted for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRow {
    pub model: String,
    pub runtime: String,
    pub tokens: String,
    pub memory: String,
    pub rouge1: String,
    pub rougel: String,
    pub bertscore: String,
}

impl DisplayRow {
    pub fn from_row(row: &EvaluationRow) -> Self {
        Self {
            model: row.model.clone(),
            runtime: format!("{:.2}", row.runtime_s),
            tokens: row.tokens.to_string(),
            memory: format!("{:.1}", row.memory_mb),
            rouge1: percent(row.rouge1),
            rougel: percent(row.rougel),
            bertscore: percent(row.bertscore_f1),
        }
    }
}

/// A 0..1 score as a percentage with one decimal, e.g. `0.456` → `"45.6%"`.
pub fn percent(score: f64) -> String {
    format!("{:.1}%", score * 100.0)
}

/// One mounted instance of the table.
///
/// `mount` identifies the instance; a result fetched for another mount is
/// ignored so a quick hide/show can't show the earlier fetch's outcome.
#[derive(Debug, Clone)]
pub struct EvaluationTable {
    pub mount: u64,
    pub state: TableState,
}

impl EvaluationTable {
    pub fn new(mount: u64) -> Self {
        Self {
            mount,
            state: TableState::Loading,
        }
    }

    /// Record the fetch result. Returns false if it was for another mount.
    pub fn apply(&mut self, mount: u64, result: Result<Vec<EvaluationRow>, ApiError>) -> bool {
        if mount != self.mount {
            return false;
        }
        self.state = match result {
            Ok(rows) => TableState::Loaded(rows),
            Err(err) => {
                tracing::error!(error = %err, "failed to load evaluation results");
                TableState::Failed(LOAD_ERROR.to_string())
            }
        };
        true
    }

    pub fn view(&self) -> TableView<'_> {
        match &self.state {
            TableState::Loading => TableView::Spinner,
            TableState::Failed(msg) => TableView::Error(msg),
            TableState::Loaded(rows) if rows.is_empty() => TableView::Empty(EMPTY_MESSAGE),
            TableState::Loaded(rows) => TableView::Rows(rows.iter().map(DisplayRow::from_row).collect()),
        }
    }
}

/// Fetch the rows for a mount.
pub async fn load_rows<A>(api: &A) -> Result<Vec<EvaluationRow>, ApiError>
where
    A: SummarizerApi + ?Sized,
{
    let rows = api.evaluation_results().await?;
    tracing::info!(rows = rows.len(), "evaluation results loaded");
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockApi, MockResponse};

    fn row(model: &str, rouge1: f64) -> EvaluationRow {
        EvaluationRow {
            model: model.to_string(),
            runtime_s: 3.14159,
            tokens: 420,
            memory_mb: 812.44,
            rouge1,
            rouge2: 0.1,
            rougel: 0.3125,
            bertscore_f1: 0.8712,
            summary: String::new(),
        }
    }

    #[test]
    fn new_table_shows_spinner() {
        assert_eq!(EvaluationTable::new(1).view(), TableView::Spinner);
    }

    #[test]
    fn empty_result_shows_empty_message() {
        let mut table = EvaluationTable::new(1);
        assert!(table.apply(1, Ok(vec![])));
        assert_eq!(table.view(), TableView::Empty(EMPTY_MESSAGE));
    }

    #[test]
    fn rows_keep_backend_order_and_format() {
        let mut table = EvaluationTable::new(1);
        table.apply(1, Ok(vec![row("zeta", 0.4567), row("alpha", 0.5)]));

        let TableView::Rows(rows) = table.view() else {
            panic!("expected rows");
        };
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].model, "zeta");
        assert_eq!(rows[1].model, "alpha");
        assert_eq!(rows[0].rouge1, "45.7%");
        assert_eq!(rows[1].rouge1, "50.0%");
        assert_eq!(rows[0].runtime, "3.14");
        assert_eq!(rows[0].memory, "812.4");
        assert_eq!(rows[0].tokens, "420");
        assert_eq!(rows[0].bertscore, "87.1%");
    }

    #[test]
    fn formatting_does_not_mutate_rows() {
        let mut table = EvaluationTable::new(1);
        table.apply(1, Ok(vec![row("m", 0.4567)]));
        let _ = table.view();
        let TableState::Loaded(rows) = &table.state else {
            panic!("expected loaded state");
        };
        assert_eq!(rows[0].rouge1, 0.4567);
    }

    #[test]
    fn failure_shows_fixed_message() {
        let mut table = EvaluationTable::new(1);
        table.apply(1, Err(ApiError::Transport("connection refused".into())));
        assert_eq!(table.view(), TableView::Error(LOAD_ERROR));
    }

    #[test]
    fn result_for_another_mount_is_ignored() {
        let mut table = EvaluationTable::new(2);
        assert!(!table.apply(1, Ok(vec![row("old", 0.1)])));
        assert_eq!(table.view(), TableView::Spinner);
    }

    #[tokio::test]
    async fn load_rows_passes_through_backend_rows() {
        let api = MockApi::new().with_results(MockResponse::Ok(vec![row("m", 0.2)]));
        let rows = load_rows(&api).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(api.results_calls(), 1);
    }
}
