//! Build orchestration

use std::path::PathBuf;
use std::time::Instant;

use crate::Result;
use crate::presenter::{BuildRequest, Presenter};

/// Runs one presenter build and reports on it.
///
/// The presenter's returned path is handed back unchanged; errors propagate.
#[derive(Debug, Clone, Copy)]
pub struct BuildOrchestrator<'a> {
    presenter: &'a dyn Presenter,
}

impl<'a> BuildOrchestrator<'a> {
    pub fn new(presenter: &'a dyn Presenter) -> Self {
        Self { presenter }
    }

    pub fn run(&self, request: &BuildRequest<'_>) -> Result<PathBuf> {
        tracing::info!(
            presenter = self.presenter.name(),
            content = %request.content_directory,
            out = ?request.out_directory,
            isolate = request.isolate,
            "Building site"
        );
        let started = Instant::now();

        let result = self.presenter.build(request);
        match &result {
            Ok(out) => tracing::info!(
                out = %out.display(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Build finished"
            ),
            Err(e) => tracing::debug!(presenter = self.presenter.name(), error = %e, "Build failed"),
        }
        result
    }
}
