//! Integration tests for the HTTP transport against a local mock server.

#![cfg(feature = "cloud")]

use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use tinker_io::hal::CloudTransport;
use tinker_io::{
    BoardIo, Config, DeviceConfig, TinkerBoard, TinkerError, TransportConfig, TransportError,
};

const DEVICE: &str = "0123abcd";
const TOKEN: &str = "s3cr3t";

fn config_for(server: &MockServer) -> Config {
    Config::default()
        .with_device(DeviceConfig::new(DEVICE, TOKEN))
        .with_transport(
            TransportConfig::default()
                .with_api_base(&format!("{}/v1/devices", server.uri()))
                .with_timeout_ms(2_000),
        )
}

async fn board_for(server: &MockServer) -> TinkerBoard<CloudTransport> {
    let config = config_for(server);
    let transport = CloudTransport::new(&config).unwrap();
    TinkerBoard::new(config.device, transport).unwrap()
}

fn envelope(return_value: i32) -> serde_json::Value {
    json!({
        "id": DEVICE,
        "last_app": "",
        "connected": true,
        "return_value": return_value
    })
}

#[tokio::test]
async fn base_url_includes_device() {
    let server = MockServer::start().await;
    let transport = CloudTransport::new(&config_for(&server)).unwrap();
    assert_eq!(
        transport.base_url(),
        format!("{}/v1/devices/{}/", server.uri(), DEVICE)
    );
}

#[tokio::test]
async fn digital_write_posts_json_params() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/v1/devices/{DEVICE}/digitalwrite")))
        .and(query_param("access_token", TOKEN))
        .and(body_json(json!({"params": "D7,HIGH"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(1)))
        .expect(1)
        .mount(&server)
        .await;

    let mut board = board_for(&server).await;
    board.digital_write("D7", "HIGH").unwrap().await.unwrap();
}

#[tokio::test]
async fn analog_write_posts_integer_value() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/v1/devices/{DEVICE}/analogwrite")))
        .and(body_json(json!({"params": "A2,128"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(1)))
        .expect(1)
        .mount(&server)
        .await;

    let mut board = board_for(&server).await;
    board.analog_write("A2", "128").unwrap().await.unwrap();
}

#[tokio::test]
async fn analog_read_returns_value() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/v1/devices/{DEVICE}/analogread")))
        .and(body_json(json!({"params": "A5"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(512)))
        .mount(&server)
        .await;

    let board = board_for(&server).await;
    assert_eq!(board.analog_read_async("A5").unwrap().await.unwrap(), 512);
}

#[tokio::test]
async fn digital_read_returns_value() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/v1/devices/{DEVICE}/digitalread")))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(0)))
        .mount(&server)
        .await;

    let board = board_for(&server).await;
    assert_eq!(board.digital_read_async("D2").unwrap().await.unwrap(), 0);
}

#[tokio::test]
async fn non_success_status_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"error": "Device is offline"})),
        )
        .mount(&server)
        .await;

    let board = board_for(&server).await;
    let err = board.analog_read_async("A0").unwrap().await.unwrap_err();
    match err {
        TinkerError::Transport(TransportError::Status { status, body }) => {
            assert_eq!(status, 400);
            assert!(body.contains("Device is offline"));
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let board = board_for(&server).await;
    let err = board.digital_read_async("D0").unwrap().await.unwrap_err();
    assert!(matches!(
        err,
        TinkerError::Transport(TransportError::Decode(_))
    ));
}

#[tokio::test]
async fn unreachable_host_is_a_network_error() {
    let config = Config::default()
        .with_device(DeviceConfig::new(DEVICE, TOKEN))
        .with_transport(
            TransportConfig::default()
                .with_api_base("http://127.0.0.1:1/v1/devices")
                .with_timeout_ms(2_000),
        );
    let transport = CloudTransport::new(&config).unwrap();
    let mut board = TinkerBoard::new(config.device, transport).unwrap();

    let err = board.digital_write("D0", "HIGH").unwrap().await.unwrap_err();
    match err {
        TinkerError::Transport(TransportError::Network(message)) => {
            // Token must not leak into error messages
            assert!(!message.contains(TOKEN));
        }
        other => panic!("unexpected error {other:?}"),
    }
}
