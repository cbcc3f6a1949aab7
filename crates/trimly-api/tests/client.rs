//! Wire-level tests for `ShopClient` against a mock backend.

#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use url::Url;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use trimly_api::{
    AdminCredentials, DayOffRange, Error, NewBooking, ShopClient, TransportConfig,
};

fn client_for(server: &MockServer) -> ShopClient {
    let base = Url::parse(&format!("{}/api", server.uri())).unwrap();
    ShopClient::new(base, &TransportConfig::default()).unwrap()
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

#[tokio::test]
async fn list_barbers_decodes_directory() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/barbers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {
                "id": "b1",
                "name": "Marco",
                "roleKey": "team.roles.head_barber",
                "img": "https://img.example/marco.jpg",
                "descriptionIt": "Quindici anni di esperienza.",
                "descriptionEn": "Fifteen years of experience."
            }
        ])))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let barbers = client.list_barbers().await.unwrap();

    assert_eq!(barbers.len(), 1);
    assert_eq!(barbers[0].id, "b1");
    assert_eq!(barbers[0].role_key, "team.roles.head_barber");
    assert_eq!(barbers[0].description_en, "Fifteen years of experience.");
}

#[tokio::test]
async fn reserved_query_carries_exact_pair() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/bookings/reserved"))
        .and(query_param("date", "2025-03-10"))
        .and(query_param("barber", "b1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {
                "id": 7,
                "barber": "b1",
                "service": "cut",
                "date": "2025-03-10",
                "time": "10:00",
                "name": "Mario",
                "surname": "Rossi",
                "email": "mario@example.com",
                "phone": "3331234567",
                "message": "",
                "price": 30.0
            }
        ])))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let reserved = client
        .reserved_bookings(date("2025-03-10"), Some("b1"))
        .await
        .unwrap();

    assert_eq!(reserved.len(), 1);
    assert_eq!(reserved[0].time, "10:00");
}

#[tokio::test]
async fn reserved_query_defaults_to_any_barber() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/bookings/reserved"))
        .and(query_param("barber", "any"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let reserved = client
        .reserved_bookings(date("2025-03-10"), None)
        .await
        .unwrap();
    assert!(reserved.is_empty());
}

#[tokio::test]
async fn create_booking_posts_full_record() {
    let booking = NewBooking {
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
    };

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/bookings"))
        .and(body_json(serde_json::json!({
            "barber": "b1",
            "service": "cut",
            "date": "2025-03-10",
            "time": "10:00",
            "name": "Mario",
            "surname": "Rossi",
            "email": "mario@example.com",
            "phone": "3331234567",
            "message": "",
            "price": 30.0
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": 42,
            "barber": "b1",
            "service": "cut",
            "date": "2025-03-10",
            "time": "10:00",
            "name": "Mario",
            "surname": "Rossi",
            "email": "mario@example.com",
            "phone": "3331234567",
            "message": "",
            "price": 30.0
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let stored = client.create_booking(&booking).await.unwrap();
    assert_eq!(stored.id, 42);
    assert_eq!(stored.barber.as_deref(), Some("b1"));
}

#[tokio::test]
async fn day_off_range_expands_into_records() {
    let range = DayOffRange {
        barber_id: "b1".into(),
        start_date: date("2025-03-10"),
        end_date: date("2025-03-12"),
    };

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/dayoffs"))
        .and(body_json(serde_json::json!({
            "barberId": "b1",
            "startDate": "2025-03-10",
            "endDate": "2025-03-12"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "id": 1, "barberId": "b1", "date": "2025-03-10" },
            { "id": 2, "barberId": "b1", "date": "2025-03-11" },
            { "id": 3, "barberId": "b1", "date": "2025-03-12" }
        ])))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let records = client.create_day_off(&range).await.unwrap();
    assert_eq!(records.len(), 3);
    assert_eq!(records[2].date, date("2025-03-12"));
}

#[tokio::test]
async fn admin_check_returns_bare_boolean() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/bookings/auth"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!(false)))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let valid = client
        .check_admin(&AdminCredentials {
            email: "admin@example.com".into(),
            password: "wrong".into(),
        })
        .await
        .unwrap();
    assert!(!valid);
}

#[tokio::test]
async fn non_success_surfaces_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/bookings"))
        .respond_with(
            ResponseTemplate::new(409).set_body_json(serde_json::json!({
                "error": "slot already taken"
            })),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .create_booking(&NewBooking {
            barber: None,
            service: "cut".into(),
            date: date("2025-03-10"),
            time: "10:00".into(),
            name: "Mario".into(),
            surname: "Rossi".into(),
            email: String::new(),
            phone: String::new(),
            message: String::new(),
            price: 30.0,
        })
        .await
        .unwrap_err();

    match err {
        Error::Api { status, message } => {
            assert_eq!(status, 409);
            assert_eq!(message, "slot already taken");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn unauthorized_maps_to_authentication_error() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/bookings/42"))
        .respond_with(ResponseTemplate::new(401).set_body_string("session expired"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.delete_booking(42).await.unwrap_err();
    assert!(matches!(err, Error::Authentication { .. }));
}
