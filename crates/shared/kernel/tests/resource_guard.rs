use hrhub_kernel::security::resource::{ResourceGuard, ResourceGuardError};

#[test]
fn resource_guard_strips_matching_table_prefix() {
    assert_eq!(ResourceGuard::record_key("doc_section:payroll-1", "doc_section").unwrap(), "payroll-1");
    assert_eq!(ResourceGuard::record_key("payroll-1", "doc_section").unwrap(), "payroll-1");
    assert_eq!(ResourceGuard::record_key("  payroll-1 ", "doc_section").unwrap(), "payroll-1");
}

#[test]
fn resource_guard_rejects_foreign_tables() {
    let err = ResourceGuard::record_key("feature:PAY_RUN", "doc_section").unwrap_err();
    assert!(matches!(err, ResourceGuardError::Validation { .. }));
    assert!(err.to_string().contains("ID table mismatch"));
}
