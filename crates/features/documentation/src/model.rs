//! Data model of the documentation / feature consistency slice.
//!
//! Registry and corpus types are snapshots read from the store; every report type is derived and
//! never persisted.

use hrhub_derive::api_model;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::BTreeSet;
use std::fmt;

/// Stable identifier of an application feature, e.g. `PAYROLL_RUN`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
#[serde(transparent)]
pub struct FeatureCode(String);

impl FeatureCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for empty or whitespace-only codes, which no feature can carry.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for FeatureCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FeatureCode {
    fn from(code: &str) -> Self {
        Self(code.to_owned())
    }
}

impl From<String> for FeatureCode {
    fn from(code: String) -> Self {
        Self(code)
    }
}

impl Borrow<str> for FeatureCode {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// A set of feature codes. Ordered so that every emitted list is deterministic.
pub type CodeSet = BTreeSet<FeatureCode>;

/// Builds a [`CodeSet`] from anything yielding code-like values; duplicates collapse.
pub fn code_set<I, C>(codes: I) -> CodeSet
where
    I: IntoIterator<Item = C>,
    C: Into<FeatureCode>,
{
    codes.into_iter().map(Into::into).collect()
}

/// An entry of the feature registry, the ground truth of the validator.
#[api_model]
#[derive(Clone, PartialEq, Eq)]
pub struct FeatureDefinition {
    pub code: FeatureCode,
    pub name: String,
    pub module_code: String,
    /// Inactive features are treated as if they did not exist.
    pub active: bool,
}

impl FeatureDefinition {
    pub fn new(
        code: impl Into<FeatureCode>,
        name: impl Into<String>,
        module_code: impl Into<String>,
        active: bool,
    ) -> Self {
        Self { code: code.into(), name: name.into(), module_code: module_code.into(), active }
    }
}

/// A section of the user manual and the feature codes it documents.
#[api_model]
#[derive(Clone, PartialEq, Eq)]
pub struct DocumentationSection {
    pub id: String,
    pub section_number: String,
    pub title: String,
    pub manual_code: String,
    pub referenced_codes: CodeSet,
    /// True iff a non-empty body is attached.
    pub has_content: bool,
}

/// Section-level classification of an orphaned section.
#[api_model(rename_all = "lowercase")]
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// No valid code remains on the section.
    Critical,
    Warning,
}

/// Report-level status derived from the health score.
///
/// Independent of [`Severity`]: a report holding a critical section can still be `warning`.
#[api_model(rename_all = "lowercase")]
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum HealthStatus {
    Healthy,
    Warning,
    Critical,
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Healthy => "healthy",
            Self::Warning => "warning",
            Self::Critical => "critical",
        })
    }
}

#[api_model]
#[derive(Clone, PartialEq, Eq)]
pub struct OrphanedSectionReport {
    pub section_id: String,
    pub section_number: String,
    pub title: String,
    pub manual_code: String,
    /// Referenced codes with no matching active feature.
    pub orphaned_codes: CodeSet,
    /// Referenced codes that match an active feature.
    pub valid_codes: CodeSet,
    pub severity: Severity,
}

#[api_model]
#[derive(Clone, PartialEq, Eq)]
pub struct UnmappedSectionReport {
    pub section_id: String,
    pub section_number: String,
    pub title: String,
    pub manual_code: String,
    pub has_content: bool,
}

#[api_model]
#[derive(Clone, PartialEq, Eq)]
pub struct ValidationSummary {
    pub health_score: u8,
    pub status: HealthStatus,
    pub orphaned_count: usize,
    pub unmapped_count: usize,
    /// Unix timestamp (seconds) of the run.
    pub generated_at: i64,
}

/// Result of one validation run.
#[api_model]
#[derive(Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Sections carrying at least one reference.
    pub total_sections: usize,
    /// Sections whose references are all valid.
    pub valid_mappings_count: usize,
    pub orphaned: Vec<OrphanedSectionReport>,
    pub unmapped: Vec<UnmappedSectionReport>,
    pub summary: ValidationSummary,
}

/// Score and status of the documentation health.
#[api_model]
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct HealthAssessment {
    pub health_score: u8,
    pub status: HealthStatus,
    pub orphaned_count: usize,
    pub unmapped_count: usize,
    pub valid_mappings_count: usize,
}

#[api_model]
#[derive(Clone, PartialEq, Eq)]
pub struct UndocumentedFeature {
    pub code: FeatureCode,
    pub name: String,
    pub module_code: String,
    /// Placeholder for the section that should document the feature.
    pub suggested_section: String,
}

#[api_model]
#[derive(Clone, PartialEq, Eq)]
pub struct CoverageReport {
    pub total_sections: usize,
    pub sections_with_content: usize,
    pub total_features: usize,
    pub documented_features: usize,
    /// Rounded share of documented features; 100 for an empty registry.
    pub coverage_percent: u8,
    pub documented_feature_codes: CodeSet,
    /// Number of undocumented features before the display limit applies.
    pub undocumented_count: usize,
    pub undocumented_features: Vec<UndocumentedFeature>,
}

#[api_model(rename_all = "snake_case")]
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum RemediationOperation {
    RemoveOrphanedCodes,
    LinkFeaturesToSection,
}

impl fmt::Display for RemediationOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::RemoveOrphanedCodes => "remove_orphaned_codes",
            Self::LinkFeaturesToSection => "link_features_to_section",
        })
    }
}

/// Effect of a remediation on one section.
#[api_model]
#[derive(Clone, PartialEq, Eq)]
pub struct RemediationOutcome {
    pub section_id: String,
    pub operation: RemediationOperation,
    pub before: CodeSet,
    pub after: CodeSet,
    /// False when the section already had the requested references; nothing was written.
    pub changed: bool,
}

/// Last validation report kept by the service.
#[api_model]
#[derive(Clone, PartialEq, Eq)]
pub struct CachedReport {
    pub report: ValidationReport,
    /// Set once a remediation changed a section after the report was produced.
    pub stale: bool,
}
