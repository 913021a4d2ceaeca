use crate::coverage::{CoverageOptions, coverage};
use crate::error::DocumentationError;
use crate::events::DocumentationEvent;
use crate::model::{
    CachedReport, CodeSet, CoverageReport, FeatureCode, HealthAssessment, RemediationOutcome,
    ValidationReport,
};
use crate::reader::read_snapshot;
use crate::remediation::{self, SectionLocks};
use crate::scorer::score_report;
use crate::store::DocumentationStore;
use crate::validator::{orphaned_codes, validate};
use hrhub_domain::config::DocumentationConfig;
use hrhub_event_bus::EventBus;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info, instrument, warn};

/// Entry point of the slice: validation, health, coverage and remediation over one store.
///
/// Keeps the last validation report. A remediation that changes a section, or fails while
/// writing, marks that report stale; only the next validation replaces it. A validation whose
/// snapshot was read before such a remediation is cached as stale too.
#[derive(Debug)]
pub struct DocumentationService<S> {
    store: S,
    config: DocumentationConfig,
    coverage: CoverageOptions,
    events: Option<EventBus>,
    cache: RwLock<Option<CachedReport>>,
    /// Bumped by every remediation that invalidates the cache.
    generation: AtomicU64,
    locks: SectionLocks,
}

impl<S: DocumentationStore> DocumentationService<S> {
    pub fn new(store: S, config: DocumentationConfig) -> Self {
        Self {
            store,
            coverage: CoverageOptions::from(&config),
            config,
            events: None,
            cache: RwLock::new(None),
            generation: AtomicU64::new(0),
            locks: SectionLocks::new(),
        }
    }

    /// Publishes [`DocumentationEvent`]s on `events`.
    #[must_use]
    pub fn with_events(mut self, events: EventBus) -> Self {
        self.events = Some(events);
        self
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    pub const fn config(&self) -> &DocumentationConfig {
        &self.config
    }

    /// Validates the corpus against the registry and caches the report.
    ///
    /// # Errors
    /// Returns [`DocumentationError::Fetch`] if the snapshot cannot be read; the cached report is
    /// left untouched.
    #[instrument(skip(self))]
    pub async fn validate_documentation(&self) -> Result<ValidationReport, DocumentationError> {
        let generation = self.generation.load(Ordering::Acquire);
        let snapshot = read_snapshot(&self.store).await.inspect_err(|err| {
            warn!(error = %err, "Documentation validation aborted");
        })?;

        let report = validate(&snapshot.features, &snapshot.sections, &self.config.health);
        info!(
            sections = report.total_sections,
            valid = report.valid_mappings_count,
            orphaned = report.summary.orphaned_count,
            unmapped = report.summary.unmapped_count,
            orphaned_codes = orphaned_codes(&report).len(),
            score = report.summary.health_score,
            status = %report.summary.status,
            "Documentation validated"
        );

        {
            let mut cache = self.cache.write();
            let stale = self.generation.load(Ordering::Acquire) != generation;
            if stale {
                debug!("Sections changed while validating; caching the report as stale");
            }
            *cache = Some(CachedReport { report: report.clone(), stale });
        }

        self.publish(DocumentationEvent::ValidationCompleted {
            health_score: report.summary.health_score,
            status: report.summary.status,
            orphaned: report.summary.orphaned_count,
            unmapped: report.summary.unmapped_count,
        });

        Ok(report)
    }

    /// Computes which active features are documented by a section with content.
    ///
    /// # Errors
    /// Returns [`DocumentationError::Fetch`] if the snapshot cannot be read.
    #[instrument(skip(self))]
    pub async fn calculate_manual_coverage(&self) -> Result<CoverageReport, DocumentationError> {
        let snapshot = read_snapshot(&self.store).await.inspect_err(|err| {
            warn!(error = %err, "Coverage calculation aborted");
        })?;

        let report = coverage(&snapshot.features, &snapshot.sections, &self.coverage);
        info!(
            features = report.total_features,
            documented = report.documented_features,
            percent = report.coverage_percent,
            "Manual coverage calculated"
        );
        Ok(report)
    }

    /// Runs a fresh validation and returns its score and status.
    ///
    /// # Errors
    /// Returns [`DocumentationError::Fetch`] if the snapshot cannot be read.
    pub async fn get_documentation_health(&self) -> Result<HealthAssessment, DocumentationError> {
        let report = self.validate_documentation().await?;
        Ok(score_report(&report, &self.config.health))
    }

    /// The report of the last successful validation, if any.
    #[must_use]
    pub fn last_report(&self) -> Option<CachedReport> {
        self.cache.read().clone()
    }

    /// Removes `codes` from the references of `section_id`.
    ///
    /// Codes are not checked at all, so any orphan reported by a validation, blank ones included,
    /// can be removed.
    ///
    /// # Errors
    /// [`DocumentationError::Validation`] for a blank id,
    /// [`DocumentationError::SectionNotFound`] for an unknown section and
    /// [`DocumentationError::Persistence`] when the read or write fails.
    pub async fn remove_orphaned_codes<I>(
        &self,
        section_id: &str,
        codes: I,
    ) -> Result<RemediationOutcome, DocumentationError>
    where
        I: IntoIterator<Item = FeatureCode>,
    {
        let codes: CodeSet = codes.into_iter().collect();
        let section_id = checked_section_id(section_id)?;

        let _guard = self.locks.acquire(section_id).await;
        let result = remediation::remove_orphaned_codes(&self.store, section_id, &codes).await;
        self.settle(result)
    }

    /// Adds `codes` to the references of `section_id`. Codes are not checked against the registry.
    ///
    /// # Errors
    /// [`DocumentationError::Validation`] for a blank id or code,
    /// [`DocumentationError::SectionNotFound`] for an unknown section and
    /// [`DocumentationError::Persistence`] when the read or write fails.
    pub async fn link_features_to_section<I>(
        &self,
        section_id: &str,
        codes: I,
    ) -> Result<RemediationOutcome, DocumentationError>
    where
        I: IntoIterator<Item = FeatureCode>,
    {
        let codes = checked_codes(codes)?;
        let section_id = checked_section_id(section_id)?;

        let _guard = self.locks.acquire(section_id).await;
        let result = remediation::link_features_to_section(&self.store, section_id, &codes).await;
        self.settle(result)
    }

    fn settle(
        &self,
        result: Result<RemediationOutcome, DocumentationError>,
    ) -> Result<RemediationOutcome, DocumentationError> {
        match &result {
            Ok(outcome) if outcome.changed => {
                self.mark_stale();
                self.publish(DocumentationEvent::ReferencesChanged(outcome.clone()));
            },
            Err(err @ DocumentationError::Persistence { .. }) => {
                self.mark_stale();
                warn!(error = %err, "Remediation failed");
            },
            _ => {},
        }
        result
    }

    fn mark_stale(&self) {
        let mut cache = self.cache.write();
        self.generation.fetch_add(1, Ordering::AcqRel);
        if let Some(cached) = cache.as_mut() {
            cached.stale = true;
        }
    }

    fn publish(&self, event: DocumentationEvent) {
        if let Some(events) = &self.events
            && let Err(err) = events.publish(event)
        {
            warn!(error = %err, "Failed to publish documentation event");
        }
    }
}

fn checked_section_id(section_id: &str) -> Result<&str, DocumentationError> {
    let trimmed = section_id.trim();
    if trimmed.is_empty() {
        return Err(DocumentationError::Validation {
            message: "Section id cannot be empty".into(),
            context: None,
        });
    }
    Ok(trimmed)
}

fn checked_codes<I>(codes: I) -> Result<CodeSet, DocumentationError>
where
    I: IntoIterator<Item = FeatureCode>,
{
    let codes: CodeSet = codes.into_iter().collect();
    if codes.iter().any(FeatureCode::is_blank) {
        return Err(DocumentationError::Validation {
            message: "Feature codes cannot be blank".into(),
            context: None,
        });
    }
    Ok(codes)
}
