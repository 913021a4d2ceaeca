use hrhub_domain::constants::{FEATURE_TABLE, MIGRATION_TABLE, SECTION_TABLE};

#[test]
fn table_names_match_migration_scripts() {
    assert_eq!(FEATURE_TABLE, "feature");
    assert_eq!(SECTION_TABLE, "doc_section");
    assert_eq!(MIGRATION_TABLE, "migration");
}
