//! Coverage calculator: which registry features are documented by a section with content.

use crate::model::{CodeSet, CoverageReport, DocumentationSection, FeatureDefinition, UndocumentedFeature};
use hrhub_domain::config::DocumentationConfig;

/// Display options of the coverage report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverageOptions {
    /// Maximum number of undocumented features listed.
    pub display_limit: usize,
    /// Suggested section for an undocumented feature; `{module}` is replaced by its module code.
    pub suggested_section_template: String,
}

impl Default for CoverageOptions {
    fn default() -> Self {
        Self::from(&DocumentationConfig::default())
    }
}

impl From<&DocumentationConfig> for CoverageOptions {
    fn from(config: &DocumentationConfig) -> Self {
        Self {
            display_limit: config.undocumented_display_limit,
            suggested_section_template: config.suggested_section_template.clone(),
        }
    }
}

impl CoverageOptions {
    fn suggested_section(&self, feature: &FeatureDefinition) -> String {
        self.suggested_section_template.replace("{module}", &feature.module_code)
    }
}

/// Codes referenced by sections that have a body. References without content do not count.
#[must_use]
pub fn documented_codes(sections: &[DocumentationSection]) -> CodeSet {
    sections
        .iter()
        .filter(|section| section.has_content)
        .flat_map(|section| section.referenced_codes.iter().cloned())
        .collect()
}

/// Computes coverage of the active registry entries.
///
/// Undocumented features keep registry order and are truncated to the display limit;
/// `undocumented_count` reports the full number.
#[must_use]
pub fn coverage(
    registry: &[FeatureDefinition],
    sections: &[DocumentationSection],
    options: &CoverageOptions,
) -> CoverageReport {
    let documented = documented_codes(sections);
    let active: Vec<&FeatureDefinition> = registry.iter().filter(|f| f.active).collect();

    let undocumented: Vec<&FeatureDefinition> =
        active.iter().copied().filter(|f| !documented.contains(&f.code)).collect();
    let documented_features = active.len() - undocumented.len();

    CoverageReport {
        total_sections: sections.len(),
        sections_with_content: sections.iter().filter(|s| s.has_content).count(),
        total_features: active.len(),
        documented_features,
        coverage_percent: percent(documented_features, active.len()),
        documented_feature_codes: documented,
        undocumented_count: undocumented.len(),
        undocumented_features: undocumented
            .into_iter()
            .take(options.display_limit)
            .map(|feature| UndocumentedFeature {
                code: feature.code.clone(),
                name: feature.name.clone(),
                module_code: feature.module_code.clone(),
                suggested_section: options.suggested_section(feature),
            })
            .collect(),
    }
}

fn percent(part: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    let rounded = (part * 100 + total / 2) / total;
    u8::try_from(rounded.min(100)).unwrap_or(100)
}
