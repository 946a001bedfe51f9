use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use toolbelt_connections::{AttemptError, ConnectionWaiter, NoopSleeper, OutputSink, WaitError, tcp, wait_for_connection};

fn closed_port_address() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let address = listener.local_addr().expect("local addr").to_string();
    drop(listener);
    address
}

#[test]
fn waits_for_a_listening_socket() {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let address = listener.local_addr().expect("local addr").to_string();

    let waiter = ConnectionWaiter::new("listener", 3).with_sleeper(NoopSleeper);
    let stream = waiter
        .wait_logged(|| tcp::connect(&address, Duration::from_secs(2)))
        .expect("listener accepts connections");

    assert_eq!(stream.peer_addr().expect("peer addr").to_string(), address);
}

#[test]
fn refused_connections_exhaust_the_waiter() {
    let address = closed_port_address();
    let reasons = Arc::new(Mutex::new(Vec::new()));
    let recorded = Arc::clone(&reasons);

    let waiter = ConnectionWaiter::new("closed", 2).with_sleeper(NoopSleeper);
    let mut sink = move |_: &str, error: Option<&AttemptError>| {
        if let Some(error) = error {
            recorded.lock().unwrap().push(error.to_string());
        }
    };
    let error = waiter
        .wait(|| tcp::connect(&address, Duration::from_millis(200)), &mut sink)
        .unwrap_err();

    assert!(matches!(error, WaitError::Exhausted { attempts: 2, .. }));
    let reasons = reasons.lock().unwrap();
    assert_eq!(reasons.len(), 2);
    assert!(reasons[0].starts_with("closed connection error: "), "reason: {}", reasons[0]);
}

#[test]
fn unresolvable_addresses_are_attempt_failures() {
    let waiter = ConnectionWaiter::new("bogus", 1).with_sleeper(NoopSleeper);
    let result = waiter.wait_logged(|| tcp::connect("not-an-address", Duration::from_millis(10)));
    assert!(result.is_err());
}

#[test]
fn one_shot_wait_uses_the_supplied_sink() {
    let mut lines = Vec::new();
    let mut sink = |message: &str, _: Option<&AttemptError>| lines.push(message.to_string());

    let sink: &mut dyn OutputSink = &mut sink;

    let value = wait_for_connection(1, "inline", || Ok::<_, String>("ready"), Some(sink)).expect("first try");

    assert_eq!(value, "ready");
    assert!(lines.is_empty());
}
