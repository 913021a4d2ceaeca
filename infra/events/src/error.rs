use std::borrow::Cow;

/// Errors that can occur during event bus operations.
#[hrhub_derive::hrhub_error]
pub enum EventBusError {
    /// The registered sender for an event type does not match the type itself.
    #[error("Type mismatch{}: {message}", format_context(.context))]
    TypeMismatch { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Capacity must be greater than zero.
    #[error("Invalid capacity{}: {message}", format_context(.context))]
    InvalidCapacity { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
