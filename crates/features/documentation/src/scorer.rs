//! Health scorer: reduces a validation report to a 0..=100 score and a status.

use crate::model::{HealthAssessment, HealthStatus, ValidationReport};
use hrhub_domain::config::HealthPolicy;

/// The three counts the score depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportCounts {
    pub orphaned: usize,
    pub unmapped: usize,
    pub valid_mappings: usize,
}

impl From<&ValidationReport> for ReportCounts {
    fn from(report: &ValidationReport) -> Self {
        Self {
            orphaned: report.orphaned.len(),
            unmapped: report.unmapped.len(),
            valid_mappings: report.valid_mappings_count,
        }
    }
}

/// Scores the counts under `policy`.
///
/// Penalties and the bonus are capped, the sum is clamped to `0..=100`. Status checks run in
/// order critical, warning, healthy.
#[must_use]
pub fn score(counts: ReportCounts, policy: &HealthPolicy) -> HealthAssessment {
    let orphan_penalty = capped(counts.orphaned, policy.orphan_penalty, policy.orphan_penalty_cap);
    let unmapped_penalty =
        capped(counts.unmapped, policy.unmapped_penalty, policy.unmapped_penalty_cap);
    let valid_bonus = capped(counts.valid_mappings, 1, policy.valid_bonus_cap);

    let raw = 100 - orphan_penalty - unmapped_penalty + valid_bonus;
    let health_score = u8::try_from(raw.clamp(0, 100)).unwrap_or(0);

    HealthAssessment {
        health_score,
        status: status(health_score, counts, policy),
        orphaned_count: counts.orphaned,
        unmapped_count: counts.unmapped,
        valid_mappings_count: counts.valid_mappings,
    }
}

/// Scores an existing report.
#[must_use]
pub fn score_report(report: &ValidationReport, policy: &HealthPolicy) -> HealthAssessment {
    score(ReportCounts::from(report), policy)
}

fn status(score: u8, counts: ReportCounts, policy: &HealthPolicy) -> HealthStatus {
    let score = u32::from(score);

    if score < policy.critical_below || counts.orphaned > policy.critical_orphans_above {
        HealthStatus::Critical
    } else if score < policy.warning_below
        || counts.orphaned > policy.warning_orphans_above
        || counts.unmapped > policy.warning_unmapped_above
    {
        HealthStatus::Warning
    } else {
        HealthStatus::Healthy
    }
}

/// `min(cap, count * weight)` without overflow.
fn capped(count: usize, weight: u32, cap: u32) -> i64 {
    let count = u64::try_from(count).unwrap_or(u64::MAX);
    let total = count.saturating_mul(u64::from(weight)).min(u64::from(cap));
    i64::try_from(total).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(orphaned: usize, unmapped: usize, valid_mappings: usize) -> ReportCounts {
        ReportCounts { orphaned, unmapped, valid_mappings }
    }

    #[test]
    fn test_formula_matches_defaults() {
        let policy = HealthPolicy::default();
        assert_eq!(score(counts(1, 1, 0), &policy).health_score, 88);
        assert_eq!(score(counts(1, 0, 0), &policy).health_score, 90);
        assert_eq!(score(counts(0, 0, 7), &policy).health_score, 100);
        assert_eq!(score(counts(3, 5, 4), &policy).health_score, 100 - 30 - 10 + 4);
    }

    #[test]
    fn test_penalties_and_bonus_are_capped() {
        let policy = HealthPolicy::default();
        // 100 - 50 - 30 + 20
        assert_eq!(score(counts(1_000, 1_000, 1_000), &policy).health_score, 40);
        assert_eq!(score(counts(usize::MAX, usize::MAX, 0), &policy).health_score, 20);
    }

    #[test]
    fn test_critical_is_checked_before_warning() {
        let policy = HealthPolicy::default();
        let assessment = score(counts(6, 0, 20), &policy);
        // 100 - 50 + 20 = 70 would only be a warning by score.
        assert_eq!(assessment.health_score, 70);
        assert_eq!(assessment.status, HealthStatus::Critical);
    }

    #[test]
    fn test_status_thresholds() {
        let policy = HealthPolicy::default();
        assert_eq!(score(counts(0, 0, 1), &policy).status, HealthStatus::Healthy);
        assert_eq!(score(counts(0, 11, 20), &policy).status, HealthStatus::Warning);
        assert_eq!(score(counts(0, 10, 0), &policy).status, HealthStatus::Healthy);
        assert_eq!(score(counts(1, 0, 20), &policy).status, HealthStatus::Warning);
        assert_eq!(score(counts(5, 0, 0), &policy).status, HealthStatus::Critical);
    }

    #[test]
    fn test_policy_is_configurable() {
        let policy = HealthPolicy { orphan_penalty: 1, warning_orphans_above: 3, ..HealthPolicy::default() };
        let assessment = score(counts(2, 0, 0), &policy);
        assert_eq!(assessment.health_score, 98);
        assert_eq!(assessment.status, HealthStatus::Healthy);
    }
}
