use super::App;
use crate::tui_event::BackendEvent;

impl App {
    /// Process a backend event and update model state.
    pub fn handle_backend_event(&mut self, event: BackendEvent) {
        match event {
            BackendEvent::Session(event) => {
                if self.session.apply(event) {
                    self.sync_benchmarks();
                }
            }
            BackendEvent::TableLoaded { mount, result } => {
                let applied = self
                    .table
                    .as_mut()
                    .is_some_and(|table| table.apply(mount, result));
                if !applied {
                    tracing::debug!(mount, "dropping table result for an old mount");
                }
            }
            BackendEvent::ChartLoaded {
                timestamp,
                index,
                result,
            } => {
                let applied = self
                    .charts
                    .as_mut()
                    .is_some_and(|charts| charts.apply(timestamp, index, result));
                if !applied {
                    tracing::debug!(timestamp, index, "dropping chart for an old timestamp");
                }
            }
        }
    }
}
