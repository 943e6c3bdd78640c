use confhub_logger::{Logger, LoggerError};

#[test]
fn second_init_returns_subscriber_error() {
    let _logger = Logger::builder().name("confhub-first").init().expect("first init should succeed");

    let err = Logger::builder().name("confhub-second").init().expect_err("second init should fail");

    assert!(matches!(err, LoggerError::Subscriber { .. }));
}
