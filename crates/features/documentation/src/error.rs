use crate::model::RemediationOperation;
use crate::store::StoreError;
use std::borrow::Cow;

/// A specialized [`DocumentationError`] enum of this crate.
#[hrhub_derive::hrhub_error]
pub enum DocumentationError {
    /// Reading the registry or the corpus failed; no report was produced.
    #[error("Fetch failed{}: {source}", format_context(.context))]
    Fetch {
        #[source]
        source: StoreError,
        context: Option<Cow<'static, str>>,
    },

    /// A remediation read or write failed; the cached report may be stale.
    #[error(
        "Persistence error{}: {operation} on section '{section_id}' failed: {message}",
        format_context(.context)
    )]
    Persistence {
        section_id: String,
        operation: RemediationOperation,
        message: Cow<'static, str>,
        context: Option<Cow<'static, str>>,
    },

    #[error("Section not found{}: {message}", format_context(.context))]
    SectionNotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Rejected input, e.g. a blank section id or feature code.
    #[error("Validation error{}: {message}", format_context(.context))]
    Validation { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal documentation error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl DocumentationError {
    /// Wraps a failed remediation read or write.
    pub(crate) fn persistence(
        section_id: &str,
        operation: RemediationOperation,
        source: &StoreError,
    ) -> Self {
        Self::Persistence {
            section_id: section_id.to_owned(),
            operation,
            message: source.to_string().into(),
            context: None,
        }
    }

    /// Stable machine-readable kind, used as the `error` field of API responses.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Fetch { .. } => "fetch_error",
            Self::Persistence { .. } => "persistence_error",
            Self::SectionNotFound { .. } => "section_not_found",
            Self::Validation { .. } => "validation_error",
            Self::Internal { .. } => "internal_error",
        }
    }
}
