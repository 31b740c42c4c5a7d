//! Concurrency tests: many simultaneous requests against one event.

mod helpers;

use std::sync::Arc;

use futures::future::join_all;
use http::StatusCode;

use eventhub_core::types::UserId;

async fn statuses<F, Fut>(count: usize, f: F) -> Vec<StatusCode>
where
    F: Fn(usize) -> Fut,
    Fut: std::future::Future<Output = helpers::TestResponse> + Send + 'static,
{
    let handles: Vec<_> = (0..count).map(|i| tokio::spawn(f(i))).collect();
    join_all(handles)
        .await
        .into_iter()
        .map(|r| r.expect("task panicked").status)
        .collect()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_last_seat_goes_to_exactly_one_user() {
    let app = Arc::new(helpers::TestApp::new());
    let event = app.create_event(1).await;

    let results = statuses(100, |_| {
        let app = Arc::clone(&app);
        async move { app.register(event.id, UserId::new()).await }
    })
    .await;

    let created = results.iter().filter(|s| **s == StatusCode::CREATED).count();
    let refused = results
        .iter()
        .filter(|s| **s == StatusCode::BAD_REQUEST)
        .count();
    assert_eq!(created, 1);
    assert_eq!(refused, 99);
    assert_eq!(app.available_seats(event.id).await, 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_seats_never_oversold() {
    let app = Arc::new(helpers::TestApp::new());
    let event = app.create_event(25).await;

    let results = statuses(200, |_| {
        let app = Arc::clone(&app);
        async move { app.register(event.id, UserId::new()).await }
    })
    .await;

    let created = results.iter().filter(|s| **s == StatusCode::CREATED).count();
    assert_eq!(created, 25);
    assert_eq!(app.available_seats(event.id).await, 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_same_user_concurrent_registers() {
    let app = Arc::new(helpers::TestApp::new());
    let event = app.create_event(10).await;
    let user = UserId::new();

    let results = statuses(20, |_| {
        let app = Arc::clone(&app);
        async move { app.register(event.id, user).await }
    })
    .await;

    let created = results.iter().filter(|s| **s == StatusCode::CREATED).count();
    assert_eq!(created, 1);
    assert_eq!(app.available_seats(event.id).await, 9);

    let mine = app.my_registrations(user).await;
    assert_eq!(mine.body["data"].as_array().map(Vec::len), Some(1));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_churn_keeps_ledger_balanced() {
    let app = Arc::new(helpers::TestApp::new());
    let event = app.create_event(5).await;
    let users: Vec<UserId> = (0..20).map(|_| UserId::new()).collect();

    // Every user registers and cancels repeatedly while others compete.
    let results = statuses(users.len(), |i| {
        let app = Arc::clone(&app);
        let user = users[i];
        async move {
            let mut last = app.register(event.id, user).await;
            for _ in 0..5 {
                if last.status == StatusCode::CREATED {
                    app.cancel(event.id, user).await;
                }
                last = app.register(event.id, user).await;
            }
            last
        }
    })
    .await;

    let holders = results.iter().filter(|s| **s == StatusCode::CREATED).count();
    let available = app.available_seats(event.id).await as usize;
    assert!(holders <= 5);
    assert_eq!(available, 5 - holders);
}
