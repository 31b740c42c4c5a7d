//! Integration tests for the registration HTTP flow.

mod helpers;

use http::StatusCode;

use eventhub_core::types::{EventId, UserId};

#[tokio::test]
async fn test_register_returns_created() {
    let app = helpers::TestApp::new();
    let event = app.create_event(10).await;
    let user = UserId::new();

    let response = app.register(event.id, user).await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["success"], true);
    assert_eq!(response.body["data"]["user_id"], user.to_string());
    assert_eq!(response.body["data"]["event_id"], event.id.to_string());
    assert_eq!(app.available_seats(event.id).await, 9);
}

#[tokio::test]
async fn test_register_unknown_event() {
    let app = helpers::TestApp::new();

    let response = app.register(EventId::new(), UserId::new()).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "EVENT_NOT_FOUND");
}

#[tokio::test]
async fn test_register_twice_is_rejected() {
    let app = helpers::TestApp::new();
    let event = app.create_event(5).await;
    let user = UserId::new();

    assert_eq!(app.register(event.id, user).await.status, StatusCode::CREATED);
    let second = app.register(event.id, user).await;

    assert_eq!(second.status, StatusCode::BAD_REQUEST);
    assert_eq!(second.body["error"], "ALREADY_REGISTERED");
    assert_eq!(app.available_seats(event.id).await, 4);
}

#[tokio::test]
async fn test_two_seat_scenario() {
    let app = helpers::TestApp::new();
    let event = app.create_event(2).await;
    let (a, b, c) = (UserId::new(), UserId::new(), UserId::new());

    assert_eq!(app.register(event.id, a).await.status, StatusCode::CREATED);
    assert_eq!(app.available_seats(event.id).await, 1);
    assert_eq!(app.register(event.id, b).await.status, StatusCode::CREATED);
    assert_eq!(app.available_seats(event.id).await, 0);

    let sold_out = app.register(event.id, c).await;
    assert_eq!(sold_out.status, StatusCode::BAD_REQUEST);
    assert_eq!(sold_out.body["error"], "SOLD_OUT");

    let cancelled = app.cancel(event.id, a).await;
    assert_eq!(cancelled.status, StatusCode::OK);
    assert_eq!(cancelled.body["data"]["message"], "Registration cancelled");
    assert_eq!(app.available_seats(event.id).await, 1);

    assert_eq!(app.register(event.id, c).await.status, StatusCode::CREATED);
    assert_eq!(app.available_seats(event.id).await, 0);
}

#[tokio::test]
async fn test_cancel_without_registration() {
    let app = helpers::TestApp::new();
    let event = app.create_event(3).await;

    let response = app.cancel(event.id, UserId::new()).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "NOT_REGISTERED");
    assert_eq!(app.available_seats(event.id).await, 3);
}

#[tokio::test]
async fn test_double_cancel() {
    let app = helpers::TestApp::new();
    let event = app.create_event(3).await;
    let user = UserId::new();
    app.register(event.id, user).await;

    assert_eq!(app.cancel(event.id, user).await.status, StatusCode::OK);
    let second = app.cancel(event.id, user).await;

    assert_eq!(second.status, StatusCode::NOT_FOUND);
    assert_eq!(app.available_seats(event.id).await, 3);
}

#[tokio::test]
async fn test_my_registrations_include_events_newest_first() {
    let app = helpers::TestApp::new();
    let user = UserId::new();
    let first = app.create_event(10).await;
    let second = app.create_event(20).await;
    app.register(first.id, user).await;
    app.register(second.id, user).await;
    app.register(first.id, UserId::new()).await;

    let response = app.my_registrations(user).await;

    assert_eq!(response.status, StatusCode::OK);
    let items = response.body["data"].as_array().expect("list body");
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["event"]["id"], second.id.to_string());
    assert_eq!(items[0]["event"]["available_seats"], 19);
    assert_eq!(items[1]["event"]["id"], first.id.to_string());
    assert_eq!(items[1]["event"]["available_seats"], 8);
    assert_eq!(items[1]["user_id"], user.to_string());
}

#[tokio::test]
async fn test_my_registrations_empty() {
    let app = helpers::TestApp::new();

    let response = app.my_registrations(UserId::new()).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"], serde_json::json!([]));
}

#[tokio::test]
async fn test_identity_is_required() {
    let app = helpers::TestApp::new();
    let event = app.create_event(1).await;

    let missing = app
        .request("POST", &format!("/api/events/{}/register", event.id), None)
        .await;
    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);

    let malformed = app
        .request_as(
            "POST",
            &format!("/api/events/{}/register", event.id),
            Some("bob"),
        )
        .await;
    assert_eq!(malformed.status, StatusCode::UNAUTHORIZED);
    assert_eq!(app.available_seats(event.id).await, 1);
}

#[tokio::test]
async fn test_get_event_shows_seats() {
    let app = helpers::TestApp::new();
    let event = app.create_event(4).await;
    app.register(event.id, UserId::new()).await;

    let response = app
        .request("GET", &format!("/api/events/{}", event.id), None)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["capacity"], 4);
    assert_eq!(response.body["data"]["available_seats"], 3);

    let missing = app
        .request("GET", &format!("/api/events/{}", EventId::new()), None)
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_health() {
    let app = helpers::TestApp::new();

    let response = app.request("GET", "/api/health", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "ok");
}
