use vidproc_core::PipelineOrchestrator;

/// Shared application state
pub struct AppState {
    orchestrator: PipelineOrchestrator,
}

impl AppState {
    pub fn new(orchestrator: PipelineOrchestrator) -> Self {
        Self { orchestrator }
    }

    pub fn orchestrator(&self) -> &PipelineOrchestrator {
        &self.orchestrator
    }
}
