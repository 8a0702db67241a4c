//! End-to-end tests for the dashboard client against a live gateway
//!
//! Binds the real server on an ephemeral port and drives it with
//! `GatewayClient` from a blocking worker, the way the monitor does.

use std::time::Duration;

use passerelle::api::types::{ChatMessage, Role};
use passerelle::api::{create_router, AppState};
use passerelle::client::GatewayClient;
use passerelle::completion::NO_USER_MESSAGE_CONTENT;
use passerelle::error::GatewayError;

async fn spawn_gateway() -> String {
    let state = AppState::demo();
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("test");
    let addr = listener.local_addr().expect("test");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}")
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_poll_and_complete_roundtrip() {
    let base_url = spawn_gateway().await;

    let outcome = tokio::task::spawn_blocking(move || {
        let client = GatewayClient::with_timeout(base_url.as_str(), Duration::from_secs(5))?;

        let health = client.health()?;
        assert_eq!(health.status, "ok");

        let before = client.metrics()?;
        assert_eq!(before.requests_total, 0);

        let completion =
            client.complete(None, vec![ChatMessage::new(Role::User, "hello")])?;
        assert_eq!(completion.object, "chat.completion");
        assert_eq!(completion.choices[0].message.role, Role::Assistant);
        assert!(completion.choices[0].message.content.starts_with("hello"));

        // Exactly the one completion is accounted; the polls are exempt
        let after = client.metrics()?;
        assert_eq!(after.requests_total, 1);
        assert_eq!(after.errors_total, 0);
        Ok::<_, GatewayError>(())
    })
    .await
    .expect("test");

    outcome.expect("test");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_degenerate_request_over_the_wire() {
    let base_url = spawn_gateway().await;

    let content = tokio::task::spawn_blocking(move || {
        let client = GatewayClient::with_timeout(base_url.as_str(), Duration::from_secs(5))?;
        let completion = client.complete(None, vec![])?;
        Ok::<_, GatewayError>(completion.choices[0].message.content.clone())
    })
    .await
    .expect("test")
    .expect("test");

    assert_eq!(content, NO_USER_MESSAGE_CONTENT);
}
