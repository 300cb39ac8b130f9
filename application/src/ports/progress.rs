//! Progress notification port
//!
//! Defines the interface for reporting progress during a pipeline run.

/// Stages of one pipeline run, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelinePhase {
    Understanding,
    Generation,
    Validation,
    Scoring,
    Decision,
    Adaptation,
}

impl PipelinePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelinePhase::Understanding => "understanding",
            PipelinePhase::Generation => "generation",
            PipelinePhase::Validation => "validation",
            PipelinePhase::Scoring => "scoring",
            PipelinePhase::Decision => "decision",
            PipelinePhase::Adaptation => "adaptation",
        }
    }
}

impl std::fmt::Display for PipelinePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Callback for progress updates during a pipeline run
///
/// Implementations live outside this crate and can display progress in
/// various ways (console, web UI, etc.)
pub trait ProgressNotifier: Send + Sync {
    /// Called when a phase starts, with the number of tasks it will process
    fn on_phase_start(&self, phase: &PipelinePhase, total_tasks: usize);

    /// Called when a task completes within a phase
    fn on_task_complete(&self, phase: &PipelinePhase, success: bool);

    /// Called when a phase completes
    fn on_phase_complete(&self, phase: &PipelinePhase);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_phase_start(&self, _phase: &PipelinePhase, _total_tasks: usize) {}
    fn on_task_complete(&self, _phase: &PipelinePhase, _success: bool) {}
    fn on_phase_complete(&self, _phase: &PipelinePhase) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_names() {
        assert_eq!(PipelinePhase::Understanding.as_str(), "understanding");
        assert_eq!(PipelinePhase::Adaptation.to_string(), "adaptation");
    }
}
