use hrhub_database::Migration;

pub(crate) const SLICE: &str = "documentation";

/// Schema owned by the documentation slice, in application order.
#[must_use]
pub fn migrations() -> Vec<Migration> {
    vec![Migration::new(SLICE, "0001", include_str!("../migrations/0001-documentation.surql"))]
}
