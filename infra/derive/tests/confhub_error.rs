use confhub_derive::confhub_error;
use std::borrow::Cow;

#[confhub_error]
pub enum SeatError {
    #[error("IO error{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Conference is full{}: {message}", format_context(.context))]
    Full { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn io_failure() -> Result<(), std::io::Error> {
    Err(std::io::Error::other("disk gone"))
}

#[test]
fn ui_expansion_compiles() {
    let t = trybuild::TestCases::new();
    t.pass("tests/ui/confhub_error_pass.rs");
}

#[test]
fn context_is_attached_to_source_errors() {
    let err = io_failure().context("Loading seat map").unwrap_err();
    assert!(matches!(err, SeatError::Io { .. }));
    assert_eq!(err.to_string(), "IO error (Loading seat map): disk gone");
}

#[test]
fn context_overrides_on_own_errors() {
    let result: Result<(), SeatError> =
        Err(SeatError::Full { message: "PyCon".into(), context: None });
    let err = result.context("Registering").unwrap_err();
    assert_eq!(err.to_string(), "Conference is full (Registering): PyCon");
}

#[test]
fn strings_convert_into_internal() {
    let err: SeatError = "unexpected state".into();
    assert!(matches!(err, SeatError::Internal { .. }));

    let err: SeatError = format!("seat {} missing", 4).into();
    assert_eq!(err.to_string(), "Internal error: seat 4 missing");
}

#[test]
fn question_mark_converts_sources() {
    fn load() -> Result<(), SeatError> {
        io_failure()?;
        Ok(())
    }
    assert_eq!(load().unwrap_err().to_string(), "IO error: disk gone");
}
