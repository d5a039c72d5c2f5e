#![allow(clippy::unwrap_used)]
// Integration tests for the poller, dispatcher, and cycle engine,
// against a wiremock service.

use std::io::Write;
use std::time::Duration;

use secrecy::SecretString;
use serde_json::json;
use tokio_util::sync::CancellationToken;
use url::Url;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use essmaint_api::transport::TransportConfig;
use essmaint_api::{AccessToken, MaintClient};
use essmaint_core::{dispatch, poller, CoreError, Engine, EngineConfig, Serial};

// ── Helpers ─────────────────────────────────────────────────────────

fn ok_body(data: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "code": 200, "data": data }))
}

async fn mount_login(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/Account/Login"))
        .respond_with(ok_body(json!({ "AccessToken": "tok-123" })))
        .mount(server)
        .await;
}

async fn authed_client(server: &MockServer) -> (MaintClient, AccessToken) {
    mount_login(server).await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = MaintClient::new(base_url, &TransportConfig::default()).unwrap();
    let secret: SecretString = "test-password".to_string().into();
    let token = client.login("operator", &secret).await.unwrap();
    (client, token)
}

fn inventory_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

fn engine_config(server: &MockServer, inventory: &tempfile::NamedTempFile) -> EngineConfig {
    EngineConfig {
        base_url: Url::parse(&server.uri()).unwrap(),
        username: "operator".into(),
        password: SecretString::from("test-password".to_string()),
        inventory_path: inventory.path().to_path_buf(),
        pacing_delay: Duration::ZERO,
        ..EngineConfig::default()
    }
}

fn state_mock(state: &str, response: ResponseTemplate) -> Mock {
    Mock::given(method("POST"))
        .and(path("/ESS/GetSystems"))
        .and(body_partial_json(json!({ "state": state })))
        .respond_with(response)
}

// ── Poller tests ────────────────────────────────────────────────────

#[tokio::test]
async fn poll_tolerates_a_failed_state() {
    let server = MockServer::start().await;
    let (client, token) = authed_client(&server).await;

    state_mock("normal", ok_body(json!([{ "sys_sn": "X" }])))
        .mount(&server)
        .await;
    state_mock("protection", ok_body(json!([{ "sys_sn": "Y" }])))
        .mount(&server)
        .await;
    state_mock("fault", ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let online = poller::poll_online(&client, &token, 1000).await;

    assert_eq!(online.len(), 2);
    assert!(online.contains("X"));
    assert!(online.contains("Y"));
}

#[tokio::test]
async fn poll_tolerates_a_timed_out_state() {
    let server = MockServer::start().await;
    mount_login(&server).await;

    let base_url = Url::parse(&server.uri()).unwrap();
    let transport = TransportConfig {
        timeout: Duration::from_millis(250),
    };
    let client = MaintClient::new(base_url, &transport).unwrap();
    let secret: SecretString = "test-password".to_string().into();
    let token = client.login("operator", &secret).await.unwrap();

    state_mock("normal", ok_body(json!([{ "sys_sn": "X" }])))
        .mount(&server)
        .await;
    state_mock("protection", ok_body(json!([{ "sys_sn": "Y" }])))
        .mount(&server)
        .await;
    // Slower than the request timeout -- this state never answers in time.
    state_mock("fault", ok_body(json!(null)).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;

    let online = poller::poll_online(&client, &token, 1000).await;

    assert_eq!(online.len(), 2);
    assert!(online.contains("X"));
    assert!(online.contains("Y"));
}

#[tokio::test]
async fn poll_deduplicates_across_states() {
    let server = MockServer::start().await;
    let (client, token) = authed_client(&server).await;

    state_mock("normal", ok_body(json!([{ "sys_sn": "X" }, { "sys_sn": "X" }])))
        .mount(&server)
        .await;
    state_mock("protection", ok_body(json!([{ "sys_sn": "X" }])))
        .mount(&server)
        .await;
    state_mock("fault", ok_body(json!(null)))
        .mount(&server)
        .await;

    let online = poller::poll_online(&client, &token, 1000).await;

    assert_eq!(online.len(), 1);
}

#[tokio::test]
async fn poll_with_all_states_failed_is_empty() {
    let server = MockServer::start().await;
    let (client, token) = authed_client(&server).await;

    Mock::given(method("POST"))
        .and(path("/ESS/GetSystems"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let online = poller::poll_online(&client, &token, 1000).await;
    assert!(online.is_empty());
}

// ── Dispatcher tests ────────────────────────────────────────────────

#[tokio::test]
async fn dispatch_isolates_per_serial_failures() {
    let server = MockServer::start().await;
    let (client, token) = authed_client(&server).await;

    Mock::given(method("POST"))
        .and(path("/ESSMainTain/ActualESSCmdModel"))
        .and(body_partial_json(json!({ "sys_sn": "SN-B" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "code": 400 })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/ESSMainTain/ActualESSCmdModel"))
        .respond_with(ok_body(json!(null)))
        .mount(&server)
        .await;

    let work: Vec<Serial> = ["SN-A", "SN-B", "SN-C"].map(Serial::from).to_vec();
    let outcomes = dispatch::dispatch(
        &client,
        &token,
        &work,
        &essmaint_api::CommandSpec::default(),
        Duration::ZERO,
        &CancellationToken::new(),
    )
    .await;

    assert_eq!(outcomes.len(), 3);
    assert_eq!(
        outcomes.iter().map(|o| o.serial.as_str()).collect::<Vec<_>>(),
        vec!["SN-A", "SN-B", "SN-C"]
    );
    assert!(outcomes[0].succeeded());
    assert!(!outcomes[1].succeeded());
    assert!(outcomes[2].succeeded());
}

#[tokio::test]
async fn dispatch_paces_between_consecutive_commands() {
    let server = MockServer::start().await;
    let (client, token) = authed_client(&server).await;

    Mock::given(method("POST"))
        .and(path("/ESSMainTain/ActualESSCmdModel"))
        .respond_with(ok_body(json!(null)))
        .expect(3)
        .mount(&server)
        .await;

    let work: Vec<Serial> = ["SN-A", "SN-B", "SN-C"].map(Serial::from).to_vec();
    let pacing = Duration::from_millis(50);

    let started = std::time::Instant::now();
    let outcomes = dispatch::dispatch(
        &client,
        &token,
        &work,
        &essmaint_api::CommandSpec::default(),
        pacing,
        &CancellationToken::new(),
    )
    .await;

    // 3 attempts, 2 pacing delays.
    assert_eq!(outcomes.len(), 3);
    assert!(
        started.elapsed() >= pacing * 2,
        "expected at least two pacing delays, elapsed {:?}",
        started.elapsed()
    );
}

#[tokio::test]
async fn dispatch_abandons_queue_on_cancellation() {
    let server = MockServer::start().await;
    let (client, token) = authed_client(&server).await;

    Mock::given(method("POST"))
        .and(path("/ESSMainTain/ActualESSCmdModel"))
        .respond_with(ok_body(json!(null)))
        .expect(0)
        .mount(&server)
        .await;

    let cancel = CancellationToken::new();
    cancel.cancel();

    let work: Vec<Serial> = ["SN-A", "SN-B"].map(Serial::from).to_vec();
    let outcomes = dispatch::dispatch(
        &client,
        &token,
        &work,
        &essmaint_api::CommandSpec::default(),
        Duration::from_secs(2),
        &cancel,
    )
    .await;

    assert!(outcomes.is_empty());
}

// ── Engine tests ────────────────────────────────────────────────────

#[tokio::test]
async fn full_cycle_reconciles_and_dispatches() {
    let server = MockServer::start().await;
    mount_login(&server).await;

    state_mock("normal", ok_body(json!([{ "sys_sn": "A" }])))
        .mount(&server)
        .await;
    state_mock("protection", ok_body(json!([{ "sys_sn": "C" }])))
        .mount(&server)
        .await;
    state_mock("fault", ok_body(json!(null)))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/ESSMainTain/ActualESSCmdModel"))
        .and(body_partial_json(json!({ "sys_sn": "A" })))
        .respond_with(ok_body(json!(null)))
        .expect(1)
        .mount(&server)
        .await;

    // "B" is listed twice but offline; the blank line can match nothing.
    let inventory = inventory_file("A\nB\nB\n\n");
    let engine = Engine::new(engine_config(&server, &inventory)).unwrap();

    let report = engine.run_cycle(&CancellationToken::new()).await.unwrap();

    assert_eq!(report.online, 2);
    assert_eq!(report.inventory_entries, 4);
    assert_eq!(report.matched, 1);
    assert_eq!(report.succeeded, 1);
    assert_eq!(report.failed, 0);
}

#[tokio::test]
async fn login_failure_aborts_cycle_before_polling() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/Account/Login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "code": 401 })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/ESS/GetSystems"))
        .respond_with(ok_body(json!(null)))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/ESSMainTain/ActualESSCmdModel"))
        .respond_with(ok_body(json!(null)))
        .expect(0)
        .mount(&server)
        .await;

    let inventory = inventory_file("A\n");
    let engine = Engine::new(engine_config(&server, &inventory)).unwrap();

    let result = engine.run_cycle(&CancellationToken::new()).await;

    assert!(
        matches!(result, Err(CoreError::AuthenticationFailed { .. })),
        "expected AuthenticationFailed, got: {result:?}"
    );
}

#[tokio::test]
async fn unreadable_inventory_fails_the_cycle() {
    let server = MockServer::start().await;
    mount_login(&server).await;

    Mock::given(method("POST"))
        .and(path("/ESS/GetSystems"))
        .respond_with(ok_body(json!(null)))
        .mount(&server)
        .await;

    let inventory = inventory_file("");
    let mut config = engine_config(&server, &inventory);
    config.inventory_path = "/nonexistent/snlist.csv".into();
    let engine = Engine::new(config).unwrap();

    let result = engine.run_cycle(&CancellationToken::new()).await;
    assert!(matches!(result, Err(CoreError::Inventory { .. })));
}

#[tokio::test]
async fn scheduler_runs_first_cycle_immediately_and_stops_on_cancel() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/Account/Login"))
        .respond_with(ok_body(json!({ "AccessToken": "tok-123" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/ESS/GetSystems"))
        .respond_with(ok_body(json!(null)))
        .mount(&server)
        .await;

    let inventory = inventory_file("");
    let engine = Engine::new(engine_config(&server, &inventory)).unwrap();

    let cancel = CancellationToken::new();
    let handle = {
        let engine = engine.clone();
        let cancel = cancel.clone();
        tokio::spawn(async move { engine.run(cancel).await })
    };

    // Give the immediate first cycle time to finish, then shut down.
    tokio::time::sleep(Duration::from_millis(300)).await;
    cancel.cancel();

    tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("scheduler did not stop on cancel")
        .unwrap();
}

#[tokio::test]
async fn cycle_failure_does_not_stop_the_scheduler() {
    let server = MockServer::start().await;

    // Login always fails -- every cycle errors, the loop must keep going.
    Mock::given(method("POST"))
        .and(path("/Account/Login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "code": 401 })))
        .mount(&server)
        .await;

    let inventory = inventory_file("");
    let mut config = engine_config(&server, &inventory);
    config.cycle_period = Duration::from_millis(50);
    let engine = Engine::new(config).unwrap();

    let cancel = CancellationToken::new();
    let handle = {
        let engine = engine.clone();
        let cancel = cancel.clone();
        tokio::spawn(async move { engine.run(cancel).await })
    };

    tokio::time::sleep(Duration::from_millis(300)).await;
    cancel.cancel();
    tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("scheduler did not stop on cancel")
        .unwrap();

    // More than one login attempt proves the loop survived cycle failures.
    let requests = server.received_requests().await.unwrap();
    assert!(
        requests.len() > 1,
        "expected multiple cycles, saw {} requests",
        requests.len()
    );
}
