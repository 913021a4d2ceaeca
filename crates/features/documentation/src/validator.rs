//! Consistency validator: reconciles corpus references against the feature registry.

use crate::model::{
    CodeSet, DocumentationSection, FeatureDefinition, OrphanedSectionReport,
    Severity, UnmappedSectionReport, ValidationReport, ValidationSummary,
};
use crate::scorer::{ReportCounts, score};
use hrhub_domain::config::HealthPolicy;
use std::collections::BTreeSet;

/// Codes of the active registry entries; inactive features are absent.
#[must_use]
pub fn ground_truth(registry: &[FeatureDefinition]) -> BTreeSet<&str> {
    registry.iter().filter(|f| f.active).map(|f| f.code.as_str()).collect()
}

/// Splits a reference set into `(orphaned, valid)` codes.
#[must_use]
pub fn partition(codes: &CodeSet, ground_truth: &BTreeSet<&str>) -> (CodeSet, CodeSet) {
    let (valid, orphaned): (CodeSet, CodeSet) =
        codes.iter().cloned().partition(|code| ground_truth.contains(code.as_str()));
    (orphaned, valid)
}

/// Classifies every section and scores the result.
///
/// Sections with references are partitioned into orphaned and valid codes. A section with any
/// orphaned code is reported, `critical` when no valid code remains. Sections without references
/// are unmapped and never orphaned. Output lists follow input order.
#[must_use]
pub fn validate(
    registry: &[FeatureDefinition],
    sections: &[DocumentationSection],
    policy: &HealthPolicy,
) -> ValidationReport {
    let truth = ground_truth(registry);

    let mut total_sections = 0;
    let mut valid_mappings_count = 0;
    let mut orphaned = Vec::new();
    let mut unmapped = Vec::new();

    for section in sections {
        if section.referenced_codes.is_empty() {
            unmapped.push(unmapped_report(section));
            continue;
        }

        total_sections += 1;
        let (orphaned_codes, valid_codes) = partition(&section.referenced_codes, &truth);

        if orphaned_codes.is_empty() {
            valid_mappings_count += 1;
        } else {
            orphaned.push(orphaned_report(section, orphaned_codes, valid_codes));
        }
    }

    let assessment = score(
        ReportCounts {
            orphaned: orphaned.len(),
            unmapped: unmapped.len(),
            valid_mappings: valid_mappings_count,
        },
        policy,
    );

    ValidationReport {
        total_sections,
        valid_mappings_count,
        summary: ValidationSummary {
            health_score: assessment.health_score,
            status: assessment.status,
            orphaned_count: orphaned.len(),
            unmapped_count: unmapped.len(),
            generated_at: chrono::Utc::now().timestamp(),
        },
        orphaned,
        unmapped,
    }
}

fn orphaned_report(
    section: &DocumentationSection,
    orphaned_codes: CodeSet,
    valid_codes: CodeSet,
) -> OrphanedSectionReport {
    OrphanedSectionReport {
        section_id: section.id.clone(),
        section_number: section.section_number.clone(),
        title: section.title.clone(),
        manual_code: section.manual_code.clone(),
        severity: if valid_codes.is_empty() { Severity::Critical } else { Severity::Warning },
        orphaned_codes,
        valid_codes,
    }
}

fn unmapped_report(section: &DocumentationSection) -> UnmappedSectionReport {
    UnmappedSectionReport {
        section_id: section.id.clone(),
        section_number: section.section_number.clone(),
        title: section.title.clone(),
        manual_code: section.manual_code.clone(),
        has_content: section.has_content,
    }
}

/// Codes referenced anywhere in the corpus that are missing from the registry.
#[must_use]
pub fn orphaned_codes(report: &ValidationReport) -> CodeSet {
    report.orphaned.iter().flat_map(|s| s.orphaned_codes.iter().cloned()).collect()
}
