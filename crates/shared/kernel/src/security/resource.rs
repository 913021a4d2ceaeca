use std::borrow::Cow;

#[hrhub_derive::hrhub_error]
pub enum ResourceGuardError {
    #[error("Resource validation error{}: {message}", format_context(.context))]
    Validation { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

/// Validation of client supplied record ids.
#[derive(Debug)]
pub struct ResourceGuard;

impl ResourceGuard {
    /// Validates a record id against a table and returns only its key part.
    ///
    /// Accepts `doc_section:intro` as well as the bare `intro`. Only a leading `<table>:` is
    /// stripped, so a key containing `:` is addressed in full form (`doc_section:ch:1`). Rejects
    /// ids that name another table (`feature:intro` where `doc_section` is expected) and blank
    /// keys.
    ///
    /// # Errors
    /// Returns [`ResourceGuardError::Validation`] on a table mismatch or an empty key.
    pub fn record_key<I, T>(id: I, expected_table: T) -> Result<String, ResourceGuardError>
    where
        I: AsRef<str>,
        T: AsRef<str>,
    {
        let id = id.as_ref().trim();
        let expected = expected_table.as_ref();

        let prefixed = id.strip_prefix(expected).and_then(|rest| rest.strip_prefix(':'));
        let key = match (prefixed, id.split_once(':')) {
            (Some(key), _) => key,
            (None, Some((table, _))) => {
                return Err(ResourceGuardError::Validation {
                    message: format!("Expected '{expected}', got '{table}'").into(),
                    context: Some("ID table mismatch".into()),
                });
            },
            (None, None) => id,
        };

        if key.trim().is_empty() {
            return Err(ResourceGuardError::Validation {
                message: "Record key cannot be empty".into(),
                context: Some(expected.to_owned().into()),
            });
        }

        Ok(key.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_verification() {
        assert_eq!(ResourceGuard::record_key("doc_section:intro", "doc_section").unwrap(), "intro");
        assert_eq!(ResourceGuard::record_key("intro", "doc_section").unwrap(), "intro");
        assert!(ResourceGuard::record_key("feature:intro", "doc_section").is_err());
        assert!(ResourceGuard::record_key("doc_sectionx:intro", "doc_section").is_err());
    }

    #[test]
    fn test_only_the_leading_table_is_stripped() {
        assert_eq!(ResourceGuard::record_key("doc_section:ch:1", "doc_section").unwrap(), "ch:1");
        assert!(ResourceGuard::record_key("ch:1", "doc_section").is_err());
    }

    #[test]
    fn test_blank_keys_are_rejected() {
        assert!(ResourceGuard::record_key("", "doc_section").is_err());
        assert!(ResourceGuard::record_key("   ", "doc_section").is_err());
        assert!(ResourceGuard::record_key("doc_section:", "doc_section").is_err());
    }
}
