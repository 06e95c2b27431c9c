use std::sync::{Arc, Mutex};

use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;

use plantlink_client::{ApiClient, Assets, Collection, Devices, EntityCounts, SummaryService};
use plantlink_core::{AssetForm, DeviceForm, DeviceId};

/// Serve a router on an ephemeral port and return a client aimed at it.
async fn spawn_backend(router: Router) -> ApiClient {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    ApiClient::new(format!("http://{addr}/api"))
}

#[tokio::test]
async fn fetch_all_normalizes_both_key_casings() {
    let router = Router::new().route(
        "/api/Device",
        get(|| async {
            Json(json!([
                { "DeviceId": 1, "DeviceName": "Pump-01", "Description": "Coolant" },
                { "deviceId": 2, "deviceName": "Valve-02" },
            ]))
        }),
    );
    let client = spawn_backend(router).await;

    let devices = client.fetch_all::<Devices>().await.unwrap();
    assert_eq!(devices.len(), 2);
    assert_eq!(devices[0].id, DeviceId(1));
    assert_eq!(devices[0].name, "Pump-01");
    assert_eq!(devices[0].description.as_deref(), Some("Coolant"));
    assert_eq!(devices[1].id, DeviceId(2));
    assert_eq!(devices[1].description, None);
}

#[tokio::test]
async fn empty_collection_is_the_empty_state_not_an_error() {
    let router = Router::new().route("/api/Device", get(|| async { Json(json!([])) }));
    let client = spawn_backend(router).await;

    let cancel = CancellationToken::new();
    let mut view = Collection::<Devices>::new(client);
    view.fetch_all(&cancel).await;

    assert!(view.items().is_empty());
    assert!(view.error().is_none());
}

#[tokio::test]
async fn failed_fetch_empties_the_view_and_a_retry_recovers() {
    let calls = Arc::new(Mutex::new(0u32));
    let handler = {
        let calls = Arc::clone(&calls);
        move || {
            let calls = Arc::clone(&calls);
            async move {
                let call = {
                    let mut calls = calls.lock().unwrap();
                    *calls += 1;
                    *calls
                };
                if call == 1 {
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Json(json!({ "title": "Database unavailable" })),
                    )
                        .into_response()
                } else {
                    Json(json!([{ "deviceId": 1, "deviceName": "Pump-01" }])).into_response()
                }
            }
        }
    };
    let client = spawn_backend(Router::new().route("/api/Device", get(handler))).await;

    let cancel = CancellationToken::new();
    let mut view = Collection::<Devices>::new(client);

    view.fetch_all(&cancel).await;
    assert!(view.items().is_empty());
    assert_eq!(view.error(), Some("Database unavailable"));

    // manual retry re-invokes the same fetch
    view.fetch_all(&cancel).await;
    assert_eq!(view.items().len(), 1);
    assert!(view.error().is_none());
}

#[tokio::test]
async fn create_posts_the_exact_payload_once() {
    let bodies: Arc<Mutex<Vec<Value>>> = Arc::new(Mutex::new(Vec::new()));
    let handler = {
        let bodies = Arc::clone(&bodies);
        move |Json(body): Json<Value>| {
            let bodies = Arc::clone(&bodies);
            async move {
                bodies.lock().unwrap().push(body);
                StatusCode::CREATED
            }
        }
    };
    let client = spawn_backend(Router::new().route("/api/Asset", post(handler))).await;

    let form = AssetForm {
        name: "Tank A".to_string(),
        device_id: "7".to_string(),
    };
    let draft = form.to_draft().expect("valid form");
    client.create::<Assets>(&draft).await.unwrap();

    let bodies = bodies.lock().unwrap();
    assert_eq!(bodies.len(), 1);
    assert_eq!(bodies[0], json!({ "AssetName": "Tank A", "DeviceId": 7 }));
    assert!(bodies[0]["DeviceId"].is_u64(), "reference must be a number");
}

#[tokio::test]
async fn invalid_form_never_reaches_the_network() {
    let posts = Arc::new(Mutex::new(0u32));
    let handler = {
        let posts = Arc::clone(&posts);
        move |Json(_): Json<Value>| {
            let posts = Arc::clone(&posts);
            async move {
                *posts.lock().unwrap() += 1;
                StatusCode::CREATED
            }
        }
    };
    let client = spawn_backend(Router::new().route("/api/Device", post(handler))).await;

    let form = DeviceForm {
        name: "P".to_string(),
        description: String::new(),
    };
    let Err(errors) = form.to_draft() else {
        panic!("short name must not validate");
    };
    assert_eq!(errors.len(), 1);

    // there is no draft to submit, so the client is never invoked
    drop(client);
    assert_eq!(*posts.lock().unwrap(), 0);
}

#[tokio::test]
async fn delete_removes_exactly_the_matching_row() {
    let deletes: Arc<Mutex<Vec<u64>>> = Arc::new(Mutex::new(Vec::new()));
    let delete_handler = {
        let deletes = Arc::clone(&deletes);
        move |Path(id): Path<u64>| {
            let deletes = Arc::clone(&deletes);
            async move {
                deletes.lock().unwrap().push(id);
                StatusCode::NO_CONTENT
            }
        }
    };
    let router = Router::new()
        .route(
            "/api/Device",
            get(|| async {
                Json(json!([
                    { "deviceId": 1, "deviceName": "Pump-01" },
                    { "deviceId": 2, "deviceName": "Valve-02" },
                ]))
            }),
        )
        .route("/api/Device/{id}", delete(delete_handler));
    let client = spawn_backend(router).await;

    let cancel = CancellationToken::new();
    let mut view = Collection::<Devices>::new(client);
    view.fetch_all(&cancel).await;
    assert_eq!(view.items().len(), 2);

    view.delete(DeviceId(1)).await.unwrap();

    assert_eq!(view.items().len(), 1);
    assert_eq!(view.items()[0].id, DeviceId(2));
    assert_eq!(*deletes.lock().unwrap(), vec![1]);
    assert!(view.deleting().is_none());
}

#[tokio::test]
async fn failed_delete_leaves_the_view_untouched() {
    let router = Router::new()
        .route(
            "/api/Device",
            get(|| async {
                Json(json!([
                    { "deviceId": 1, "deviceName": "Pump-01" },
                    { "deviceId": 2, "deviceName": "Valve-02" },
                ]))
            }),
        )
        .route(
            "/api/Device/{id}",
            delete(|| async {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "message": "Device is in use" })),
                )
            }),
        );
    let client = spawn_backend(router).await;

    let cancel = CancellationToken::new();
    let mut view = Collection::<Devices>::new(client);
    view.fetch_all(&cancel).await;

    let alert = view.delete(DeviceId(1)).await.unwrap_err();
    assert!(alert.contains("Device is in use"), "alert: {alert}");
    assert_eq!(view.items().len(), 2);
    assert!(view.error().is_none());
}

#[tokio::test]
async fn fetch_by_id_with_blank_input_issues_no_request() {
    let gets = Arc::new(Mutex::new(0u32));
    let handler = {
        let gets = Arc::clone(&gets);
        move |Path(_id): Path<u64>| {
            let gets = Arc::clone(&gets);
            async move {
                *gets.lock().unwrap() += 1;
                Json(json!({ "deviceId": 1, "deviceName": "Pump-01" }))
            }
        }
    };
    let client = spawn_backend(Router::new().route("/api/Device/{id}", get(handler))).await;

    let cancel = CancellationToken::new();
    let mut view = Collection::<Devices>::new(client);

    view.fetch_by_id("   ", &cancel).await;
    assert_eq!(view.error(), Some("Please enter a device ID"));

    view.fetch_by_id("abc", &cancel).await;
    assert_eq!(
        view.error(),
        Some("Please enter a valid device ID (positive integer)")
    );

    assert_eq!(*gets.lock().unwrap(), 0);
}

#[tokio::test]
async fn fetch_by_id_renders_a_single_row() {
    let router = Router::new().route(
        "/api/Device/{id}",
        get(|Path(id): Path<u64>| async move {
            Json(json!({ "DeviceId": id, "DeviceName": "Pump-01" }))
        }),
    );
    let client = spawn_backend(router).await;

    let cancel = CancellationToken::new();
    let mut view = Collection::<Devices>::new(client);
    view.fetch_by_id("4", &cancel).await;

    assert_eq!(view.items().len(), 1);
    assert_eq!(view.items()[0].id, DeviceId(4));
    assert!(view.error().is_none());
}

#[tokio::test]
async fn fetch_one_not_found_surfaces_the_backend_title() {
    let router = Router::new().route(
        "/api/Device/{id}",
        get(|| async {
            (
                StatusCode::NOT_FOUND,
                Json(json!({ "title": "Device not found" })),
            )
        }),
    );
    let client = spawn_backend(router).await;

    let error = client.fetch_one::<Devices>(DeviceId(99)).await.unwrap_err();
    assert_eq!(error.to_string(), "Device not found");
}

#[tokio::test]
async fn cancelled_fetch_leaves_the_view_untouched() {
    let calls = Arc::new(Mutex::new(0u32));
    let handler = {
        let calls = Arc::clone(&calls);
        move || {
            let calls = Arc::clone(&calls);
            async move {
                let call = {
                    let mut calls = calls.lock().unwrap();
                    *calls += 1;
                    *calls
                };
                if call == 1 {
                    Json(json!([
                        { "deviceId": 1, "deviceName": "Pump-01" },
                        { "deviceId": 2, "deviceName": "Valve-02" },
                    ]))
                    .into_response()
                } else {
                    StatusCode::INTERNAL_SERVER_ERROR.into_response()
                }
            }
        }
    };
    let client = spawn_backend(Router::new().route("/api/Device", get(handler))).await;

    let mut view = Collection::<Devices>::new(client);
    view.fetch_all(&CancellationToken::new()).await;
    assert_eq!(view.items().len(), 2);

    // navigation-away: the token is already cancelled when the fetch starts
    let cancelled = CancellationToken::new();
    cancelled.cancel();
    view.fetch_all(&cancelled).await;

    assert_eq!(view.items().len(), 2);
    assert!(view.error().is_none());
}

#[tokio::test]
async fn summary_service_publishes_the_three_counts() {
    let router = Router::new()
        .route(
            "/api/Device",
            get(|| async {
                Json(json!([
                    { "deviceId": 1, "deviceName": "Pump-01" },
                    { "deviceId": 2, "deviceName": "Valve-02" },
                ]))
            }),
        )
        .route(
            "/api/Asset",
            get(|| async { Json(json!([{ "assetId": 1, "assetName": "Tank A", "deviceId": 1 }])) }),
        )
        .route(
            "/api/SignalMeasurement",
            get(|| async {
                Json(json!([
                    { "signalId": 1, "signalTag": "Flow", "registerAddress": "HR-1", "assetId": 1 },
                    { "signalId": 2, "signalTag": "Temp", "registerAddress": "HR-2", "assetId": 1 },
                    { "signalId": 3, "signalTag": "Level", "registerAddress": "HR-3", "assetId": 1 },
                ]))
            }),
        );
    let client = spawn_backend(router).await;

    let service = SummaryService::new(client);
    let mut rx = service.subscribe();

    let counts = service.refresh().await.unwrap();
    let expected = EntityCounts {
        devices: 2,
        assets: 1,
        signals: 3,
    };
    assert_eq!(counts, expected);
    assert_eq!(service.current(), expected);

    rx.changed().await.unwrap();
    assert_eq!(*rx.borrow(), expected);
}

#[tokio::test]
async fn summary_refresh_failure_keeps_the_previous_snapshot() {
    let router = Router::new()
        .route("/api/Device", get(|| async { Json(json!([])) }))
        .route("/api/Asset", get(|| async { Json(json!([])) }))
        .route(
            "/api/SignalMeasurement",
            get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        );
    let client = spawn_backend(router).await;

    let service = SummaryService::new(client);
    let before = service.current();

    assert!(service.refresh().await.is_err());
    assert_eq!(service.current(), before);
}
