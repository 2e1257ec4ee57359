use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use mockito::Server;
use serde_json::{Value, json};
use tower::ServiceExt;
use wiotp_device_type::action::CreateDeviceType;
use wiotp_device_type::config::AppConfig;
use wiotp_device_type::platform::PlatformConfig;
use wiotp_device_type::proxy::{ProxyEndpoint, ProxyState};

fn router_for(server: &Server) -> axum::Router {
    let config = AppConfig {
        platform: PlatformConfig {
            endpoint: format!("{}/{{orgId}}/api/v0002", server.url()),
            ..Default::default()
        },
        ..Default::default()
    };
    let action = CreateDeviceType::from_config(&config).unwrap();

    let state = ProxyState::builder()
        .with_config(config.proxy)
        .with_action(action)
        .build();
    ProxyEndpoint::router(state)
}

async fn post_json(router: axum::Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn params() -> Value {
    json!({
        "apiKey": "a-1",
        "authToken": "secret",
        "orgId": "myorg",
        "typeId": "t1",
        "id": "t1",
        "manufacturer": "Acme",
    })
}

#[tokio::test]
async fn init_is_acknowledged() {
    let server = Server::new_async().await;
    let (status, body) = post_json(router_for(&server), "/init", json!({ "value": {} })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "ok": true }));
}

#[tokio::test]
async fn run_relays_created_device_type() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/myorg/api/v0002/device/types")
        .match_header("authorization", "Basic YS0xOnNlY3JldA==")
        .match_body(mockito::Matcher::PartialJson(json!({
            "id": "t1",
            "classId": "Device",
            "deviceInfo": { "manufacturer": "Acme" },
        })))
        .with_status(201)
        .with_body(r#"{"id":"t1"}"#)
        .expect(1)
        .create_async()
        .await;

    let (status, body) = post_json(
        router_for(&server),
        "/run",
        json!({ "value": params(), "activation_id": "abc123" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "id": "t1" }));
    mock.assert_async().await;
}

#[tokio::test]
async fn run_relays_platform_rejection() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/myorg/api/v0002/device/types")
        .with_status(409)
        .with_body(r#"{"message":"exists"}"#)
        .create_async()
        .await;

    let (status, body) =
        post_json(router_for(&server), "/run", json!({ "value": params() })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["error"]["statusCode"], 409);
    assert_eq!(body["error"]["error"], Value::Null);
    assert_eq!(body["error"]["body"], r#"{"message":"exists"}"#);
}

#[tokio::test]
async fn run_reports_missing_params_without_calling_platform() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", mockito::Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let (status, body) = post_json(
        router_for(&server),
        "/run",
        json!({ "value": { "orgId": "myorg" } }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "error": "Missing required parameters: apiKey,authToken,typeId" })
    );
    mock.assert_async().await;
}
