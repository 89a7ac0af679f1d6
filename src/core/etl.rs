use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

use crate::core::{ClassStatistics, Pipeline};
use crate::utils::error::{GradeError, RecordError, Result};

/// Outcome of one completed run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// `None` when the run was a dry run and nothing was written.
    pub output_path: Option<String>,
    pub students: usize,
    pub skipped: usize,
    pub statistics: ClassStatistics,
    pub diagnostics: Vec<RecordError>,
}

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
    dry_run: bool,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_dry_run(pipeline, false)
    }

    pub fn new_with_dry_run(pipeline: P, dry_run: bool) -> Self {
        Self { pipeline, dry_run }
    }

    /// Runs extract, transform and load in order. A file-level error stops
    /// the run before anything is written.
    pub fn run(&self) -> Result<RunSummary> {
        let started = Instant::now();
        tracing::info!("Starting grade report run");

        let lines = self.pipeline.extract()?;
        tracing::info!("Read {} lines", lines.len());

        let result = self.pipeline.transform(lines)?;
        tracing::info!(
            "Graded {} students, skipped {} lines",
            result.students.len(),
            result.diagnostics.len()
        );

        let output_path = if self.dry_run {
            tracing::info!("Dry run, report not written");
            None
        } else {
            Some(self.pipeline.load(&result)?)
        };

        tracing::debug!("Run finished in {:?}", started.elapsed());

        Ok(RunSummary {
            output_path,
            students: result.students.len(),
            skipped: result.diagnostics.len(),
            statistics: result.statistics,
            diagnostics: result.diagnostics,
        })
    }

    /// Like [`run`](Self::run), but a panic in the pipeline comes back as
    /// [`GradeError::UnexpectedFailure`].
    pub fn run_guarded(&self) -> Result<RunSummary> {
        match panic::catch_unwind(AssertUnwindSafe(|| self.run())) {
            Ok(result) => result,
            Err(payload) => {
                let message = payload
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| payload.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic".to_string());
                Err(GradeError::UnexpectedFailure { message })
            }
        }
    }
}
