//! Audit trail of documentation activity, fed by the event bus.

use hrhub::features::documentation::DocumentationEvent;
use hrhub_event_bus::{EventBus, EventBusError, EventReceiverExt};
use tokio::task::JoinHandle;
use tracing::info;

/// Subscribes to [`DocumentationEvent`]s and writes one audit record per event.
///
/// The task ends once the bus is shut down.
///
/// # Errors
/// Returns [`EventBusError`] if the subscription cannot be created.
pub(crate) fn spawn_listener(events: &EventBus) -> Result<JoinHandle<usize>, EventBusError> {
    let mut rx = events.subscribe::<DocumentationEvent>()?;

    Ok(tokio::spawn(async move {
        let mut recorded = 0;
        while let Some(event) = rx.recv_event().await {
            record(&event);
            recorded += 1;
        }
        recorded
    }))
}

fn record(event: &DocumentationEvent) {
    match event {
        DocumentationEvent::ValidationCompleted { health_score, status, orphaned, unmapped } => {
            info!(
                target: "audit",
                event = "documentation.validated",
                health_score,
                %status,
                orphaned,
                unmapped,
            );
        },
        DocumentationEvent::ReferencesChanged(outcome) => {
            info!(
                target: "audit",
                event = "documentation.references_changed",
                section_id = %outcome.section_id,
                operation = %outcome.operation,
                before = outcome.before.len(),
                after = outcome.after.len(),
            );
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hrhub::features::documentation::model::HealthStatus;

    #[tokio::test]
    async fn test_listener_drains_until_shutdown() {
        let events = EventBus::new();
        let listener = spawn_listener(&events).unwrap();

        let delivered = events
            .publish(DocumentationEvent::ValidationCompleted {
                health_score: 88,
                status: HealthStatus::Warning,
                orphaned: 1,
                unmapped: 1,
            })
            .unwrap();
        assert_eq!(delivered, 1);

        events.shutdown();
        assert_eq!(listener.await.unwrap(), 1);
    }
}
