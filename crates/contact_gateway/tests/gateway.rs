use std::time::Duration;

use contact_gateway::{GatewaySettings, ReqwestGateway, SubmitGateway, TransportFailureKind};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn settings_for(endpoint: String) -> GatewaySettings {
    GatewaySettings {
        endpoint,
        ..GatewaySettings::default()
    }
}

fn sample_body() -> serde_json::Value {
    json!({
        "timestamp": "2026-10-17T09:30:00.000Z",
        "name": "Al",
        "email": "a@b.c",
        "newsletter": "No",
    })
}

#[tokio::test]
async fn posts_json_body_once() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/exec"))
        .and(header("content-type", "application/json"))
        .and(body_json(sample_body()))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = ReqwestGateway::new(settings_for(format!("{}/exec", server.uri())));
    gateway.submit(&sample_body()).await.expect("dispatched");
}

#[tokio::test]
async fn server_error_status_still_counts_as_dispatched() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("sheet full"))
        .mount(&server)
        .await;

    let gateway = ReqwestGateway::new(settings_for(format!("{}/exec", server.uri())));
    assert!(gateway.submit(&sample_body()).await.is_ok());
}

#[tokio::test]
async fn slow_endpoint_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(250)))
        .mount(&server)
        .await;

    let settings = GatewaySettings {
        submit_timeout: Duration::from_millis(50),
        ..settings_for(format!("{}/exec", server.uri()))
    };
    let gateway = ReqwestGateway::new(settings);

    let err = gateway.submit(&sample_body()).await.unwrap_err();
    assert_eq!(err.kind, TransportFailureKind::Timeout);
}

#[tokio::test]
async fn unreachable_endpoint_is_network_failure() {
    let server = MockServer::start().await;
    let endpoint = format!("{}/exec", server.uri());
    drop(server);

    let gateway = ReqwestGateway::new(settings_for(endpoint));
    let err = gateway.submit(&sample_body()).await.unwrap_err();
    assert_eq!(err.kind, TransportFailureKind::Network);
}

#[tokio::test]
async fn malformed_endpoint_is_rejected_before_sending() {
    let gateway = ReqwestGateway::new(settings_for("not a url".to_string()));
    let err = gateway.submit(&sample_body()).await.unwrap_err();
    assert_eq!(err.kind, TransportFailureKind::InvalidEndpoint);
}
