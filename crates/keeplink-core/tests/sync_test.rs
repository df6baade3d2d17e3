// Coordinator integration tests: full sync cycles, failure policy, and
// command round-trips against a wiremock device.

use pretty_assertions::assert_eq;
use secrecy::SecretString;
use wiremock::matchers::{body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use keeplink_core::{Coordinator, CoreError, SwitchConfig};

const INFO: &str = include_str!("fixtures/info.html");
const PSE_SYSTEM: &str = include_str!("fixtures/pse_system.html");
const PSE_PORT: &str = include_str!("fixtures/pse_port.html");
const PORT_SETTINGS: &str = include_str!("fixtures/port_settings.html");
const PORT_STATS: &str = include_str!("fixtures/port_stats.html");

// ── Helpers ─────────────────────────────────────────────────────────

fn config_for(server: &MockServer) -> SwitchConfig {
    let host = server
        .uri()
        .strip_prefix("http://")
        .expect("mock server uri")
        .to_owned();
    SwitchConfig::new(host, "admin", SecretString::from("admin".to_owned()))
}

fn coordinator_for(server: &MockServer) -> Coordinator {
    Coordinator::new(config_for(server)).expect("coordinator")
}

/// Mount all five read endpoints with the fixture pages.
async fn mount_device(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/info.cgi"))
        .respond_with(ResponseTemplate::new(200).set_body_string(INFO))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/pse_system.cgi"))
        .respond_with(ResponseTemplate::new(200).set_body_string(PSE_SYSTEM))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/pse_port.cgi"))
        .respond_with(ResponseTemplate::new(200).set_body_string(PSE_PORT))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/port.cgi"))
        .and(query_param("page", "stats"))
        .respond_with(ResponseTemplate::new(200).set_body_string(PORT_STATS))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/port.cgi"))
        .respond_with(ResponseTemplate::new(200).set_body_string(PORT_SETTINGS))
        .mount(server)
        .await;
}

// ── Full cycle ──────────────────────────────────────────────────────

#[tokio::test]
async fn full_sync_merges_identity_poe_settings_and_stats() {
    let server = MockServer::start().await;
    mount_device(&server).await;
    let coordinator = coordinator_for(&server);

    coordinator.refresh().await.expect("sync");
    let snapshot = coordinator.snapshot();

    // Identity fields from info.cgi.
    assert_eq!(snapshot.model.as_deref(), Some("KP-9000-6XHML-X2"));
    assert_eq!(snapshot.mac.as_deref(), Some("1C:2A:8B:10:20:30"));
    assert_eq!(snapshot.firmware.as_deref(), Some("V1.9.21"));
    assert_eq!(snapshot.ip_address.as_deref(), Some("192.168.2.1"));
    assert_eq!(snapshot.poe_total_power, Some(26.8));

    // Every port carries all three merged groups.
    assert_eq!(snapshot.ports.len(), 2);
    let p1 = &snapshot.ports[&1];
    let poe = p1.poe.as_ref().expect("poe");
    assert!(poe.enabled);
    assert_eq!(poe.power, 6.5);
    let link = p1.link.as_ref().expect("link");
    assert!(link.admin_state);
    assert_eq!(link.config_speed, "Auto");
    assert_eq!(link.speed, "1000M Full");
    let traffic = p1.traffic.as_ref().expect("traffic");
    assert!(traffic.is_link_up);
    assert_eq!(traffic.tx_packets, 6_000_000_000);
    assert_eq!(traffic.rx_packets, 2_680_059_921);
    assert_eq!(traffic.rx_errors, 3);

    let p2 = &snapshot.ports[&2];
    assert_eq!(p2.poe.as_ref().expect("poe").power, 0.0);
    assert!(!p2.traffic.as_ref().expect("traffic").is_link_up);

    // Identity metadata derives once the MAC is known.
    let identity = coordinator.identity().expect("identity");
    assert_eq!(identity.manufacturer, "Keeplink");
    assert_eq!(identity.model, "KP-9000-6XHML-X2");
    assert_eq!(identity.sw_version, "V1.9.21");

    assert!(coordinator.last_refresh().borrow().is_some());
}

// ── Failure policy ──────────────────────────────────────────────────

#[tokio::test]
async fn auth_redirect_aborts_cycle_and_keeps_prior_snapshot() {
    let server = MockServer::start().await;
    mount_device(&server).await;
    let coordinator = coordinator_for(&server);
    coordinator.refresh().await.expect("first sync");

    // Session "expires": every page now bounces to the login form.
    server.reset().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", "/login.cgi"))
        .mount(&server)
        .await;

    let err = coordinator.refresh().await.unwrap_err();
    assert!(matches!(err, CoreError::AuthenticationFailed { .. }));
    assert!(!err.is_retryable());

    // The previous snapshot stays authoritative.
    let snapshot = coordinator.snapshot();
    assert_eq!(snapshot.model.as_deref(), Some("KP-9000-6XHML-X2"));
    assert_eq!(snapshot.ports.len(), 2);
}

#[tokio::test]
async fn auth_failure_on_first_sync_leaves_snapshot_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", "/login.cgi"))
        .mount(&server)
        .await;
    let coordinator = coordinator_for(&server);

    let err = coordinator.refresh().await.unwrap_err();
    assert!(matches!(err, CoreError::AuthenticationFailed { .. }));
    assert!(coordinator.snapshot().mac.is_none());
    assert!(coordinator.identity().is_none());
}

#[tokio::test]
async fn mid_cycle_failure_is_all_or_nothing() {
    let server = MockServer::start().await;
    mount_device(&server).await;
    let coordinator = coordinator_for(&server);
    coordinator.refresh().await.expect("first sync");

    // info.cgi still works, but the PoE system page starts failing:
    // the half-fetched cycle must not replace the snapshot.
    server.reset().await;
    Mock::given(method("GET"))
        .and(path("/info.cgi"))
        .respond_with(ResponseTemplate::new(200).set_body_string(INFO))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/pse_system.cgi"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = coordinator.refresh().await.unwrap_err();
    assert!(matches!(err, CoreError::CommunicationFailure { .. }));
    assert!(err.is_retryable());

    let snapshot = coordinator.snapshot();
    assert_eq!(snapshot.poe_total_power, Some(26.8));
    assert!(snapshot.ports[&1].traffic.is_some());
}

#[tokio::test]
async fn cycle_timeout_surfaces_as_retryable_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/info.cgi"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(INFO)
                .set_delay(std::time::Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let mut config = config_for(&server);
    config.cycle_timeout_secs = 1;
    let coordinator = Coordinator::new(config).expect("coordinator");

    let err = coordinator.refresh().await.unwrap_err();
    assert!(matches!(err, CoreError::Timeout { timeout_secs: 1 }));
    assert!(err.is_retryable());
    assert!(coordinator.snapshot().mac.is_none());
}

// ── Refresh coalescing ──────────────────────────────────────────────

#[tokio::test]
async fn concurrent_refreshes_coalesce_into_one_cycle() {
    let server = MockServer::start().await;
    mount_device(&server).await;
    let coordinator = coordinator_for(&server);

    // The first caller holds the cycle gate for its whole cycle; the
    // second must reuse that cycle's outcome instead of re-fetching.
    let (a, b) = tokio::join!(coordinator.refresh(), coordinator.refresh());
    a.expect("first refresh");
    b.expect("coalesced refresh");

    let requests = server
        .received_requests()
        .await
        .expect("request recording enabled");
    assert_eq!(requests.len(), 5, "exactly one fetch per endpoint");
}

// ── Background polling ──────────────────────────────────────────────

#[tokio::test]
async fn background_polling_syncs_on_its_interval() {
    let server = MockServer::start().await;
    mount_device(&server).await;

    let mut config = config_for(&server);
    config.poll_interval_secs = 1;
    let coordinator = Coordinator::new(config).expect("coordinator");

    let mut refreshed = coordinator.last_refresh();
    coordinator.start_polling().await;

    // The first poll lands after one interval, not immediately.
    tokio::time::timeout(std::time::Duration::from_secs(5), refreshed.changed())
        .await
        .expect("a poll cycle within the deadline")
        .expect("refresh channel open");
    assert_eq!(
        coordinator.snapshot().model.as_deref(),
        Some("KP-9000-6XHML-X2")
    );

    coordinator.shutdown().await;

    // Shutdown joins the task; no further cycles afterwards.
    let settled = server
        .received_requests()
        .await
        .expect("request recording enabled")
        .len();
    tokio::time::sleep(std::time::Duration::from_millis(1500)).await;
    let after = server
        .received_requests()
        .await
        .expect("request recording enabled")
        .len();
    assert_eq!(after, settled);
}

#[tokio::test]
async fn background_polling_stops_on_auth_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", "/login.cgi"))
        .mount(&server)
        .await;

    let mut config = config_for(&server);
    config.poll_interval_secs = 1;
    let coordinator = Coordinator::new(config).expect("coordinator");
    coordinator.start_polling().await;

    // Long enough for several ticks; the loop must give up after the
    // first rejected cookie instead of hammering the login page.
    tokio::time::sleep(std::time::Duration::from_millis(2500)).await;
    coordinator.shutdown().await;

    let requests = server
        .received_requests()
        .await
        .expect("request recording enabled");
    assert_eq!(requests.len(), 1, "polling must stop after an auth failure");
}

// ── Commands ────────────────────────────────────────────────────────

#[tokio::test]
async fn set_port_settings_completes_payload_from_snapshot() {
    let server = MockServer::start().await;
    mount_device(&server).await;
    let coordinator = coordinator_for(&server);
    coordinator.refresh().await.expect("sync");

    // Port 1's cached config is Auto / flow off / enabled.
    Mock::given(method("POST"))
        .and(path("/port.cgi"))
        .and(body_string_contains("portid=0"))
        .and(body_string_contains("state=1"))
        .and(body_string_contains("speed_duplex=0"))
        .and(body_string_contains("flow=0"))
        .and(body_string_contains("cmd=port"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    coordinator.set_port_settings(1, None, None, None).await;
}

#[tokio::test]
async fn poe_toggle_posts_and_resyncs() {
    let server = MockServer::start().await;
    mount_device(&server).await;
    let coordinator = coordinator_for(&server);

    Mock::given(method("POST"))
        .and(path("/pse_port.cgi"))
        .and(body_string_contains("portid=1"))
        .and(body_string_contains("state=0"))
        .and(body_string_contains("cmd=poe"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    coordinator.set_poe_state(2, false).await;

    // The command triggered a full resync.
    assert_eq!(
        coordinator.snapshot().model.as_deref(),
        Some("KP-9000-6XHML-X2")
    );
}

#[tokio::test]
async fn clear_stats_posts_the_clear_form() {
    let server = MockServer::start().await;
    mount_device(&server).await;
    let coordinator = coordinator_for(&server);

    Mock::given(method("POST"))
        .and(path("/port.cgi"))
        .and(query_param("page", "stats"))
        .and(body_string_contains("submit=+++Clear+++"))
        .and(body_string_contains("cmd=stats"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    coordinator.clear_port_stats().await;
}

#[tokio::test]
async fn reboot_does_not_resync() {
    let server = MockServer::start().await;
    let coordinator = coordinator_for(&server);

    Mock::given(method("POST"))
        .and(path("/reboot.cgi"))
        .and(body_string_contains("cmd=reboot"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    coordinator.reboot().await;

    // No GETs: the device is going offline and a resync would only
    // manufacture a transport failure.
    let requests = server
        .received_requests()
        .await
        .expect("request recording enabled");
    assert_eq!(requests.len(), 1);
}
