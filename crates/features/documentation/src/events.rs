use crate::model::{HealthStatus, RemediationOutcome};

/// Notifications published on the event bus by the documentation service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentationEvent {
    /// A validation run finished and replaced the cached report.
    ValidationCompleted {
        health_score: u8,
        status: HealthStatus,
        orphaned: usize,
        unmapped: usize,
    },
    /// A remediation changed the references of a section.
    ReferencesChanged(RemediationOutcome),
}
