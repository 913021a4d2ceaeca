use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use hrhub_documentation::coverage::{CoverageOptions, coverage};
use hrhub_documentation::model::{DocumentationSection, FeatureCode, FeatureDefinition};
use hrhub_documentation::validator::validate;
use hrhub_domain::config::HealthPolicy;
use std::hint::black_box;

/// Registry of `features` codes and a corpus where every fifth reference is orphaned and every
/// tenth section is unmapped.
fn corpus(features: usize, sections: usize) -> (Vec<FeatureDefinition>, Vec<DocumentationSection>) {
    let registry = (0..features)
        .map(|i| FeatureDefinition::new(format!("F{i:05}"), format!("Feature {i}"), "HR", true))
        .collect();

    let corpus = (0..sections)
        .map(|i| DocumentationSection {
            id: format!("s{i}"),
            section_number: format!("{}.{}", i / 10, i % 10),
            title: format!("Section {i}"),
            manual_code: "HR".to_owned(),
            referenced_codes: if i % 10 == 0 {
                Default::default()
            } else {
                (0..4)
                    .map(|j| {
                        let n = (i * 4 + j) % features;
                        if (i + j) % 5 == 0 {
                            FeatureCode::new(format!("X{n:05}"))
                        } else {
                            FeatureCode::new(format!("F{n:05}"))
                        }
                    })
                    .collect()
            },
            has_content: i % 3 != 0,
        })
        .collect();

    (registry, corpus)
}

// ============================================================================
// Benchmark: Validation
// ============================================================================

fn bench_validate(c: &mut Criterion) {
    let mut group = c.benchmark_group("validate");
    let policy = HealthPolicy::default();

    for sections in [100, 1_000, 10_000] {
        let (registry, corpus) = corpus(2_000, sections);
        group.throughput(Throughput::Elements(u64::try_from(sections).unwrap_or(u64::MAX)));

        group.bench_with_input(BenchmarkId::from_parameter(sections), &corpus, |b, corpus| {
            b.iter(|| black_box(validate(&registry, corpus, &policy)));
        });
    }

    group.finish();
}

// ============================================================================
// Benchmark: Coverage
// ============================================================================

fn bench_coverage(c: &mut Criterion) {
    let mut group = c.benchmark_group("coverage");
    let options = CoverageOptions::default();

    for features in [500, 5_000] {
        let (registry, corpus) = corpus(features, 2_000);
        group.throughput(Throughput::Elements(u64::try_from(features).unwrap_or(u64::MAX)));

        group.bench_with_input(BenchmarkId::from_parameter(features), &registry, |b, registry| {
            b.iter(|| black_box(coverage(registry, &corpus, &options)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_validate, bench_coverage);
criterion_main!(benches);
