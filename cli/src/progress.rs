//! Console progress reporting
//!
//! Prints phase transitions to stderr so stdout stays clean for the JSON
//! run report.

use examforge_application::{PipelinePhase, ProgressNotifier};

/// Progress notifier that writes phase updates to stderr
pub struct ConsoleProgress;

impl ConsoleProgress {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ConsoleProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ConsoleProgress {
    fn on_phase_start(&self, phase: &PipelinePhase, total: usize) {
        if total > 1 {
            eprintln!("[{phase}] starting ({total} tasks)");
        } else {
            eprintln!("[{phase}] starting");
        }
    }

    fn on_task_complete(&self, phase: &PipelinePhase, success: bool) {
        if !success {
            eprintln!("[{phase}] task degraded");
        }
    }

    fn on_phase_complete(&self, phase: &PipelinePhase) {
        eprintln!("[{phase}] done");
    }
}
