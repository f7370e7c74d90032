use orp_telemetry::init_subscriber;

#[test]
fn test_init_subscriber_once() {
    init_subscriber("info").expect("first install succeeds");
    tracing::info!("subscriber installed");
    assert!(init_subscriber("debug").is_err(), "second install must fail");
}
