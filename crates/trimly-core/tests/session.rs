//! Session lifecycle tests against a mock backend: initial snapshot,
//! graceful degradation, command execution, and the dashboard poll cycle.

#![allow(clippy::unwrap_used)]

use std::time::Duration;

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use trimly_core::stats::revenue_by_barber;
use trimly_core::{Command, SessionConfig, ShopSession, SlotQuery};

fn config_for(server: &MockServer, poll_interval: Duration) -> SessionConfig {
    let mut config =
        SessionConfig::new(Url::parse(&format!("{}/api", server.uri())).unwrap());
    config.poll_interval = poll_interval;
    config
}

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn booking_json(id: i64, barber: &str, date: &str, time: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "barber": barber,
        "service": "cut",
        "date": date,
        "time": time,
        "name": "Mario",
        "surname": "Rossi",
        "email": "mario@example.com",
        "phone": "3331234567",
        "message": "",
        "price": 30.0
    })
}

async fn mount_empty_lists(server: &MockServer) {
    for endpoint in ["/api/barbers", "/api/dayoffs", "/api/bookings"] {
        Mock::given(method("GET"))
            .and(path(endpoint))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(server)
            .await;
    }
}

#[tokio::test]
async fn directory_failure_degrades_to_empty_snapshot() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/barbers"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/dayoffs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/bookings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            booking_json(1, "b1", "2025-03-10", "10:00")
        ])))
        .mount(&server)
        .await;

    let session = ShopSession::new(config_for(&server, Duration::from_secs(5))).unwrap();
    // Connect succeeds despite the failed directory fetch.
    session.connect().await.unwrap();

    assert!(session.store().barbers_snapshot().is_empty());
    assert_eq!(session.store().booking_count(), 1);

    session.shutdown().await;
}

#[tokio::test]
async fn created_booking_round_trips_through_poll_cycle() {
    let server = MockServer::start().await;
    mount_empty_lists(&server).await;

    let stored = booking_json(42, "b1", "2025-03-10", "10:00");
    Mock::given(method("POST"))
        .and(path("/api/bookings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(stored.clone()))
        .mount(&server)
        .await;

    let session = ShopSession::new(config_for(&server, Duration::from_millis(50))).unwrap();
    session.connect().await.unwrap();

    let result = session
        .execute(Command::CreateBooking(trimly_api::NewBooking {
            barber: Some("b1".into()),
            service: "cut".into(),
            date: date("2025-03-10"),
            time: "10:00".into(),
            name: "Mario".into(),
            surname: "Rossi".into(),
            email: "mario@example.com".into(),
            phone: "3331234567".into(),
            message: String::new(),
            price: 30.0,
        }))
        .await
        .unwrap();
    let created = result.into_booking().unwrap();
    assert_eq!(created.id, 42);

    // The store reflects the creation immediately (local patch by id).
    assert_eq!(session.store().booking_count(), 1);

    // Now the backend starts returning the booking from GET /bookings;
    // the poll cycle must converge to it with identical field values.
    server.reset().await;
    Mock::given(method("GET"))
        .and(path("/api/bookings"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!([stored.clone()])),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/dayoffs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    session.start_polling().await;
    tokio::time::sleep(Duration::from_millis(200)).await;

    let snapshot = session.store().bookings_snapshot();
    assert_eq!(snapshot.len(), 1);
    let polled = &snapshot[0];
    assert_eq!(polled.id, 42);
    assert_eq!(polled.barber.as_deref(), Some("b1"));
    assert_eq!(polled.service, "cut");
    assert_eq!(polled.date, date("2025-03-10"));
    assert_eq!(polled.time, "10:00");
    assert_eq!(polled.name, "Mario");

    session.stop_polling().await;
    session.shutdown().await;
}

#[tokio::test]
async fn deleting_a_booking_updates_snapshot_and_stats_without_refetch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/barbers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "id": "b1", "name": "Marco", "roleKey": "team.roles.barber", "img": "" }
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/dayoffs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/bookings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            booking_json(42, "b1", "2025-03-10", "10:00"),
            booking_json(43, "b1", "2025-03-10", "11:00"),
        ])))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/bookings/42"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let session = ShopSession::new(config_for(&server, Duration::from_secs(5))).unwrap();
    session.connect().await.unwrap();
    assert_eq!(session.store().booking_count(), 2);

    session
        .execute(Command::DeleteBooking { id: 42 })
        .await
        .unwrap();

    // List and recomputed stats reflect the removal with no refetch.
    let bookings = session.store().bookings_snapshot();
    assert_eq!(bookings.len(), 1);
    assert_eq!(bookings[0].id, 43);

    let stats = revenue_by_barber(
        &bookings,
        &session.store().barbers_snapshot(),
        date("2025-03-10"),
    );
    assert_eq!(stats.get("b1").unwrap().daily, 30.0);

    session.shutdown().await;
}

#[tokio::test]
async fn reserved_times_extracts_slot_labels() {
    let server = MockServer::start().await;
    mount_empty_lists(&server).await;
    Mock::given(method("GET"))
        .and(path("/api/bookings/reserved"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            booking_json(1, "b1", "2025-03-10", "10:00"),
            booking_json(2, "b1", "2025-03-10", "10:30"),
        ])))
        .mount(&server)
        .await;

    let session = ShopSession::new(config_for(&server, Duration::from_secs(5))).unwrap();
    session.connect().await.unwrap();

    let times = session
        .reserved_times(&SlotQuery::new(date("2025-03-10"), Some("b1".into())))
        .await
        .unwrap();
    assert_eq!(times, ["10:00".to_owned(), "10:30".to_owned()]);

    session.shutdown().await;
}
