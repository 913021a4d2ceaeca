use hrhub_derive::hrhub_error;
use std::borrow::Cow;

#[hrhub_error]
pub enum SyncError {
    #[error("IO error{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Section {section_id} rejected{}: {message}", format_context(.context))]
    Rejected { section_id: String, message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn read() -> Result<(), SyncError> {
    let io: Result<(), std::io::Error> = Err(std::io::Error::other("disk"));
    io.context("Reading section file")
}

fn main() {
    let err = read().unwrap_err();
    assert_eq!(err.to_string(), "IO error (Reading section file): disk");

    let err: SyncError = "boom".into();
    assert!(matches!(err, SyncError::Internal { .. }));

    let rejected: Result<(), SyncError> = Err(SyncError::Rejected {
        section_id: "s1".to_owned(),
        message: "locked".into(),
        context: None,
    });
    let err = rejected.context("link").unwrap_err();
    assert_eq!(err.to_string(), "Section s1 rejected (link): locked");
}
