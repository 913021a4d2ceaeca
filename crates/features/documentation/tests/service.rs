use hrhub_documentation::model::{
    CodeSet, DocumentationSection, FeatureCode, FeatureDefinition, HealthStatus,
    RemediationOperation, Severity, code_set,
};
use hrhub_documentation::{
    DocumentationError, DocumentationEvent, DocumentationService, DocumentationStore,
    MemoryDocumentationStore, StoreError,
};
use hrhub_domain::config::DocumentationConfig;
use hrhub_event_bus::{EventBus, EventReceiverExt};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Notify;

fn section(id: &str, codes: &[&str], has_content: bool) -> DocumentationSection {
    DocumentationSection {
        id: id.to_owned(),
        section_number: id.to_owned(),
        title: format!("Section {id}"),
        manual_code: "HR".to_owned(),
        referenced_codes: code_set(codes.iter().copied()),
        has_content,
    }
}

fn registry() -> Vec<FeatureDefinition> {
    vec![
        FeatureDefinition::new("F1", "Payroll run", "PAY", true),
        FeatureDefinition::new("F2", "Leave request", "LEAVE", true),
    ]
}

fn codes(codes: &[&str]) -> Vec<FeatureCode> {
    codes.iter().copied().map(FeatureCode::from).collect()
}

/// Memory store whose reads or writes can be switched to fail.
#[derive(Debug, Clone, Default)]
struct FlakyStore {
    inner: MemoryDocumentationStore,
    fail_reads: Arc<AtomicBool>,
    fail_writes: Arc<AtomicBool>,
}

impl FlakyStore {
    fn new(inner: MemoryDocumentationStore) -> Self {
        Self { inner, ..Self::default() }
    }

    fn check(flag: &AtomicBool) -> Result<(), StoreError> {
        if flag.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable { message: "connection reset".into(), context: None });
        }
        Ok(())
    }
}

impl DocumentationStore for FlakyStore {
    async fn list_active_features(&self) -> Result<Vec<FeatureDefinition>, StoreError> {
        Self::check(&self.fail_reads)?;
        self.inner.list_active_features().await
    }

    async fn list_sections_with_references(&self) -> Result<Vec<DocumentationSection>, StoreError> {
        Self::check(&self.fail_reads)?;
        self.inner.list_sections_with_references().await
    }

    async fn list_unmapped_sections(&self) -> Result<Vec<DocumentationSection>, StoreError> {
        Self::check(&self.fail_reads)?;
        self.inner.list_unmapped_sections().await
    }

    async fn update_section_references(
        &self,
        section_id: &str,
        codes: &CodeSet,
    ) -> Result<(), StoreError> {
        Self::check(&self.fail_writes)?;
        self.inner.update_section_references(section_id, codes).await
    }

    async fn fetch_section(&self, section_id: &str) -> Result<DocumentationSection, StoreError> {
        self.inner.fetch_section(section_id).await
    }
}

/// Memory store whose registry read parks until released.
#[derive(Debug, Clone, Default)]
struct GatedStore {
    inner: MemoryDocumentationStore,
    entered: Arc<Notify>,
    release: Arc<Notify>,
}

impl DocumentationStore for GatedStore {
    async fn list_active_features(&self) -> Result<Vec<FeatureDefinition>, StoreError> {
        self.entered.notify_one();
        self.release.notified().await;
        self.inner.list_active_features().await
    }

    async fn list_sections_with_references(&self) -> Result<Vec<DocumentationSection>, StoreError> {
        self.inner.list_sections_with_references().await
    }

    async fn list_unmapped_sections(&self) -> Result<Vec<DocumentationSection>, StoreError> {
        self.inner.list_unmapped_sections().await
    }

    async fn update_section_references(
        &self,
        section_id: &str,
        codes: &CodeSet,
    ) -> Result<(), StoreError> {
        self.inner.update_section_references(section_id, codes).await
    }

    async fn fetch_section(&self, section_id: &str) -> Result<DocumentationSection, StoreError> {
        self.inner.fetch_section(section_id).await
    }
}

#[tokio::test]
async fn orphaned_and_unmapped_sections_score_88() {
    let store = MemoryDocumentationStore::with_data(
        registry(),
        vec![section("1", &["F1", "F3"], true), section("2", &[], false)],
    );
    let service = DocumentationService::new(store, DocumentationConfig::default());

    let report = service.validate_documentation().await.unwrap();

    assert_eq!(report.total_sections, 1);
    assert_eq!(report.valid_mappings_count, 0);
    assert_eq!(report.orphaned.len(), 1);
    assert_eq!(report.orphaned[0].section_id, "1");
    assert_eq!(report.orphaned[0].orphaned_codes, code_set(["F3"]));
    assert_eq!(report.orphaned[0].valid_codes, code_set(["F1"]));
    assert_eq!(report.orphaned[0].severity, Severity::Warning);
    assert_eq!(report.unmapped.len(), 1);
    assert_eq!(report.unmapped[0].section_id, "2");
    assert_eq!(report.summary.health_score, 88);
    assert_eq!(report.summary.status, HealthStatus::Warning);
}

#[tokio::test]
async fn critical_section_does_not_force_critical_status() {
    let store =
        MemoryDocumentationStore::with_data(registry(), vec![section("1", &["F3", "F4"], true)]);
    let service = DocumentationService::new(store, DocumentationConfig::default());

    let report = service.validate_documentation().await.unwrap();
    assert_eq!(report.orphaned[0].severity, Severity::Critical);
    assert_eq!(report.summary.health_score, 90);
    assert_eq!(report.summary.status, HealthStatus::Warning);

    let health = service.get_documentation_health().await.unwrap();
    assert_eq!(health.health_score, 90);
    assert_eq!(health.status, HealthStatus::Warning);
    assert_eq!(health.orphaned_count, 1);
}

#[tokio::test]
async fn fetch_failure_keeps_cached_report() {
    let store = FlakyStore::new(MemoryDocumentationStore::with_data(
        registry(),
        vec![section("1", &["F1"], true)],
    ));
    let service = DocumentationService::new(store.clone(), DocumentationConfig::default());

    let report = service.validate_documentation().await.unwrap();
    store.fail_reads.store(true, Ordering::SeqCst);

    let err = service.validate_documentation().await.unwrap_err();
    assert!(matches!(err, DocumentationError::Fetch { .. }));
    assert_eq!(err.kind(), "fetch_error");

    let err = service.calculate_manual_coverage().await.unwrap_err();
    assert!(matches!(err, DocumentationError::Fetch { .. }));

    let cached = service.last_report().expect("report cached");
    assert_eq!(cached.report, report);
    assert!(!cached.stale);
}

#[tokio::test]
async fn write_failure_marks_report_stale() {
    let store = FlakyStore::new(MemoryDocumentationStore::with_data(
        registry(),
        vec![section("1", &["F1", "F3"], true)],
    ));
    let service = DocumentationService::new(store.clone(), DocumentationConfig::default());
    service.validate_documentation().await.unwrap();

    store.fail_writes.store(true, Ordering::SeqCst);
    let err = service.remove_orphaned_codes("1", codes(&["F3"])).await.unwrap_err();

    match &err {
        DocumentationError::Persistence { section_id, operation, .. } => {
            assert_eq!(section_id, "1");
            assert_eq!(*operation, RemediationOperation::RemoveOrphanedCodes);
        },
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(service.last_report().unwrap().stale);
    assert_eq!(store.inner.section("1").unwrap().referenced_codes, code_set(["F1", "F3"]));
}

#[tokio::test]
async fn remediation_fixes_the_next_validation() {
    let store =
        MemoryDocumentationStore::with_data(registry(), vec![section("1", &["F1", "F3"], true)]);
    let service = DocumentationService::new(store, DocumentationConfig::default());

    let before = service.validate_documentation().await.unwrap();
    assert_eq!(before.orphaned.len(), 1);

    let outcome = service.remove_orphaned_codes("1", codes(&["F3"])).await.unwrap();
    assert!(outcome.changed);
    assert_eq!(outcome.after, code_set(["F1"]));
    assert!(service.last_report().unwrap().stale);

    let after = service.validate_documentation().await.unwrap();
    assert!(after.orphaned.is_empty());
    assert_eq!(after.valid_mappings_count, 1);
    assert_eq!(after.summary.health_score, 100);
    assert_eq!(after.summary.status, HealthStatus::Healthy);
    assert!(!service.last_report().unwrap().stale);
}

#[tokio::test]
async fn unchanged_remediation_keeps_report_fresh() {
    let store = MemoryDocumentationStore::with_data(registry(), vec![section("1", &["F1"], true)]);
    let service = DocumentationService::new(store, DocumentationConfig::default());
    service.validate_documentation().await.unwrap();

    let outcome = service.link_features_to_section("1", codes(&["F1"])).await.unwrap();
    assert!(!outcome.changed);
    assert!(!service.last_report().unwrap().stale);

    let outcome = service.link_features_to_section("1", Vec::new()).await.unwrap();
    assert!(!outcome.changed);
}

#[tokio::test]
async fn invalid_input_is_rejected_before_the_store() {
    let store = MemoryDocumentationStore::with_data(registry(), vec![section("1", &[], true)]);
    let service = DocumentationService::new(store, DocumentationConfig::default());

    let err = service.link_features_to_section("  ", codes(&["F1"])).await.unwrap_err();
    assert!(matches!(err, DocumentationError::Validation { .. }));

    let err = service.link_features_to_section("1", codes(&["F1", " "])).await.unwrap_err();
    assert!(matches!(err, DocumentationError::Validation { .. }));

    let err = service.remove_orphaned_codes("missing", codes(&["F1"])).await.unwrap_err();
    assert!(matches!(err, DocumentationError::SectionNotFound { .. }));
    assert_eq!(err.kind(), "section_not_found");
}

#[tokio::test]
async fn concurrent_links_on_one_section_are_not_lost() {
    let store = MemoryDocumentationStore::with_data(registry(), vec![section("1", &[], true)]);
    let service = Arc::new(DocumentationService::new(store.clone(), DocumentationConfig::default()));

    let tasks: Vec<_> = (0..16)
        .map(|i| {
            let service = Arc::clone(&service);
            tokio::spawn(async move {
                service.link_features_to_section("1", [FeatureCode::new(format!("F{i}"))]).await
            })
        })
        .collect();
    for task in tasks {
        task.await.unwrap().unwrap();
    }

    assert_eq!(store.section("1").unwrap().referenced_codes.len(), 16);
}

#[tokio::test]
async fn events_are_published_for_validation_and_changes() {
    let bus = EventBus::new();
    let mut rx = bus.subscribe::<DocumentationEvent>().unwrap();

    let store =
        MemoryDocumentationStore::with_data(registry(), vec![section("1", &["F1", "F3"], true)]);
    let service =
        DocumentationService::new(store, DocumentationConfig::default()).with_events(bus.clone());

    service.validate_documentation().await.unwrap();
    let event = rx.recv_event().await.unwrap();
    assert_eq!(
        *event,
        DocumentationEvent::ValidationCompleted {
            health_score: 90,
            status: HealthStatus::Warning,
            orphaned: 1,
            unmapped: 0,
        }
    );

    let outcome = service.remove_orphaned_codes("1", codes(&["F3"])).await.unwrap();
    let event = rx.recv_event().await.unwrap();
    assert_eq!(*event, DocumentationEvent::ReferencesChanged(outcome));

    service.remove_orphaned_codes("1", codes(&["F3"])).await.unwrap();
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn coverage_counts_only_sections_with_content() {
    let store = MemoryDocumentationStore::with_data(
        registry(),
        vec![section("1", &["F1"], true), section("2", &["F2"], false)],
    );
    let service = DocumentationService::new(store, DocumentationConfig::default());

    let report = service.calculate_manual_coverage().await.unwrap();
    assert_eq!(report.total_features, 2);
    assert_eq!(report.documented_features, 1);
    assert_eq!(report.coverage_percent, 50);
    assert_eq!(report.undocumented_features[0].code.as_str(), "F2");
    assert_eq!(report.undocumented_features[0].suggested_section, "LEAVE: new section");
}

#[tokio::test]
async fn blank_orphans_reported_by_validation_can_be_removed() {
    let store = MemoryDocumentationStore::with_data(
        vec![FeatureDefinition::new("F1", "Payroll run", "PAY", true)],
        vec![section("1", &["F1", ""], true)],
    );
    let service = DocumentationService::new(store.clone(), DocumentationConfig::default());

    let report = service.validate_documentation().await.unwrap();
    let orphans = report.orphaned[0].orphaned_codes.clone();
    assert_eq!(orphans, code_set([""]));

    let outcome = service.remove_orphaned_codes("1", orphans).await.unwrap();
    assert!(outcome.changed);
    assert_eq!(outcome.after, code_set(["F1"]));
    assert_eq!(store.section("1").unwrap().referenced_codes, code_set(["F1"]));

    let report = service.validate_documentation().await.unwrap();
    assert!(report.orphaned.is_empty());
}

#[tokio::test]
async fn validation_overlapping_a_change_is_cached_as_stale() {
    let store = GatedStore {
        inner: MemoryDocumentationStore::with_data(registry(), vec![section("1", &["F1", "F3"], true)]),
        ..GatedStore::default()
    };
    let service = Arc::new(DocumentationService::new(store.clone(), DocumentationConfig::default()));

    let validation = tokio::spawn({
        let service = Arc::clone(&service);
        async move { service.validate_documentation().await }
    });
    store.entered.notified().await;

    let outcome = service.remove_orphaned_codes("1", codes(&["F3"])).await.unwrap();
    assert!(outcome.changed);
    store.release.notify_one();

    let report = validation.await.unwrap().unwrap();
    assert_eq!(report.orphaned.len(), 1);
    assert!(service.last_report().unwrap().stale);

    service.validate_documentation().await.unwrap();
    assert!(!service.last_report().unwrap().stale);
}
