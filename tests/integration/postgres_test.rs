//! PostgreSQL-backed tests of the registration core.
//!
//! Run only when `EVENTHUB_TEST_DATABASE_URL` points at a disposable
//! database; otherwise each test returns immediately.

mod helpers;

use std::sync::Arc;

use futures::future::join_all;
use http::StatusCode;

use eventhub_core::error::{CancelError, RegisterError};
use eventhub_core::types::UserId;
use eventhub_entity::RegistrationState;
use eventhub_service::RequestContext;

macro_rules! postgres_app {
    () => {
        match helpers::TestApp::postgres().await {
            Some(app) => Arc::new(app),
            None => {
                eprintln!("{} not set, skipping", helpers::TEST_DATABASE_URL);
                return;
            }
        }
    };
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_last_seat_goes_to_exactly_one_user() {
    let app = postgres_app!();
    let event = app.create_event(1).await;

    let handles: Vec<_> = (0..50)
        .map(|_| {
            let app = Arc::clone(&app);
            tokio::spawn(async move {
                let ctx = RequestContext::new(UserId::new());
                app.state
                    .registration_service
                    .register(&ctx, event.id)
                    .await
            })
        })
        .collect();

    let mut granted = 0;
    for result in join_all(handles).await {
        match result.expect("task panicked") {
            Ok(_) => granted += 1,
            Err(RegisterError::SoldOut(_)) => {}
            Err(other) => panic!("unexpected outcome: {other}"),
        }
    }

    assert_eq!(granted, 1);
    assert_eq!(app.available_seats(event.id).await, 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_same_user_concurrent_registers() {
    let app = postgres_app!();
    let event = app.create_event(10).await;
    let ctx = RequestContext::new(UserId::new());

    let handles: Vec<_> = (0..20)
        .map(|_| {
            let app = Arc::clone(&app);
            let ctx = ctx.clone();
            tokio::spawn(async move {
                app.state
                    .registration_service
                    .register(&ctx, event.id)
                    .await
            })
        })
        .collect();

    let mut granted = 0;
    for result in join_all(handles).await {
        match result.expect("task panicked") {
            Ok(_) => granted += 1,
            Err(RegisterError::AlreadyRegistered { .. }) => {}
            Err(other) => panic!("unexpected outcome: {other}"),
        }
    }

    assert_eq!(granted, 1);
    assert_eq!(app.available_seats(event.id).await, 9);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_cancel_races_register_for_last_seat() {
    let app = postgres_app!();
    let event = app.create_event(1).await;
    let holder = RequestContext::new(UserId::new());
    let newcomer = RequestContext::new(UserId::new());
    let service = Arc::clone(&app.state.registration_service);
    service.register(&holder, event.id).await.expect("register");

    let cancel = {
        let service = Arc::clone(&service);
        let holder = holder.clone();
        tokio::spawn(async move { service.cancel(&holder, event.id).await })
    };
    let register = {
        let service = Arc::clone(&service);
        let newcomer = newcomer.clone();
        tokio::spawn(async move { service.register(&newcomer, event.id).await })
    };

    cancel.await.expect("task panicked").expect("cancel");
    let registered = register.await.expect("task panicked");

    let available = app.available_seats(event.id).await;
    let newcomer_state = service
        .state(newcomer.user_id, event.id)
        .await
        .expect("state");
    match registered {
        Ok(_) => {
            assert_eq!(available, 0);
            assert_eq!(newcomer_state, RegistrationState::Registered);
        }
        Err(RegisterError::SoldOut(_)) => {
            assert_eq!(available, 1);
            assert_eq!(newcomer_state, RegistrationState::Unregistered);
        }
        Err(other) => panic!("unexpected outcome: {other}"),
    }
}

#[tokio::test]
async fn test_inconsistent_cancel_is_rolled_back() {
    let app = postgres_app!();
    let event = app.create_event(2).await;
    let ctx = RequestContext::new(UserId::new());
    let service = &app.state.registration_service;
    service.register(&ctx, event.id).await.expect("register");

    // Corrupt the ledger so the seat cannot be returned.
    let db = app.db.as_ref().expect("postgres app has a pool");
    sqlx::query("UPDATE events SET available_seats = capacity WHERE id = $1")
        .bind(event.id.into_uuid())
        .execute(db.pool())
        .await
        .expect("update");

    let err = service.cancel(&ctx, event.id).await.unwrap_err();
    assert!(matches!(err, CancelError::Inconsistent { capacity: 2, .. }));
    assert_eq!(
        service.state(ctx.user_id, event.id).await.expect("state"),
        RegistrationState::Registered
    );
    assert_eq!(app.available_seats(event.id).await, 2);
}

#[tokio::test]
async fn test_http_flow_against_postgres() {
    let app = postgres_app!();
    let event = app.create_event(2).await;
    let (a, b, c) = (UserId::new(), UserId::new(), UserId::new());

    assert_eq!(app.register(event.id, a).await.status, StatusCode::CREATED);
    assert_eq!(app.register(event.id, b).await.status, StatusCode::CREATED);
    assert_eq!(app.register(event.id, c).await.body["error"], "SOLD_OUT");
    assert_eq!(app.cancel(event.id, a).await.status, StatusCode::OK);
    assert_eq!(app.cancel(event.id, a).await.body["error"], "NOT_REGISTERED");
    assert_eq!(app.register(event.id, c).await.status, StatusCode::CREATED);

    let mine = app.my_registrations(c).await;
    let items = mine.body["data"].as_array().expect("list body");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["event"]["id"], event.id.to_string());
    assert_eq!(items[0]["event"]["available_seats"], 0);
}
