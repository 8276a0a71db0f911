//! Resolution failure policy contracts
//!
//! Constraints verified:
//! - `Exit` (the default) terminates the loop with the resolution error
//!   before anything is published
//! - `Retry` reschedules resolution like any other per-cycle failure

mod common;

use common::*;
use pdnsup_core::UpdateAgent;
use pdnsup_core::config::ResolveFailurePolicy;
use std::sync::atomic::Ordering;
use std::time::Duration;

#[tokio::test]
async fn exit_policy_stops_on_resolution_failure() {
    let source = FailingIpSource::new();
    let provider = CountingProvider::new();
    let publishes = provider.call_counter();

    let agent = UpdateAgent::new(
        Box::new(source),
        Box::new(provider),
        test_config(1, ResolveFailurePolicy::Exit),
    )
    .expect("agent construction succeeds");

    // Keep the sender alive; the loop must end on its own
    let (_shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();

    let result = tokio::time::timeout(
        Duration::from_secs(1),
        agent.run_with_shutdown(Some(shutdown_rx)),
    )
    .await
    .expect("loop terminates without waiting out the interval");

    let error = result.expect_err("resolution failure is fatal under Exit");
    assert!(error.is_resolution());
    assert_eq!(publishes.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn retry_policy_keeps_looping() {
    let source = FailingIpSource::new();
    let provider = CountingProvider::new();
    let resolves = source.call_counter();
    let publishes = provider.call_counter();

    let agent = UpdateAgent::new(
        Box::new(source),
        Box::new(provider),
        test_config(1, ResolveFailurePolicy::Retry),
    )
    .expect("agent construction succeeds");

    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();
    let handle = tokio::spawn(async move { agent.run_with_shutdown(Some(shutdown_rx)).await });

    tokio::time::sleep(Duration::from_millis(1300)).await;
    shutdown_tx.send(()).unwrap();
    handle.await.unwrap().unwrap();

    // Two failed resolutions, no publish attempts
    assert_eq!(resolves.load(Ordering::SeqCst), 2);
    assert_eq!(publishes.load(Ordering::SeqCst), 0);
}
