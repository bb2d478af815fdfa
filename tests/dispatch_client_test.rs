use ambulance_finder::domain::model::DispatchRequest;
use ambulance_finder::domain::ports::Notifier;
use ambulance_finder::{
    Coordinate, Credential, DispatchService, HttpDispatchClient, Locator, LocatorError,
    OutputFormat, ProximityRanker, StaticCatalog,
};
use anyhow::Result;
use httpmock::prelude::*;
use serde_json::json;

const HERE: Coordinate = Coordinate::new(-1.1, 37.01);

#[tokio::test]
async fn test_notify_posts_phone_and_location_with_bearer_token() -> Result<()> {
    let server = MockServer::start_async().await;

    let api_mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/send-location")
                .header("Authorization", "Bearer token-123")
                .json_body(json!({
                    "phone_number": "+254700100101",
                    "location": "https://www.google.com/maps?q=-1.1,37.01"
                }));
            then.status(200).json_body(json!({ "status": "sent" }));
        })
        .await;

    let client = HttpDispatchClient::new(server.url("/api/send-location"))?;
    let receipt = client
        .notify(
            &Credential::bearer("token-123"),
            &DispatchRequest {
                phone_number: "+254700100101".to_string(),
                location: "https://www.google.com/maps?q=-1.1,37.01".to_string(),
            },
        )
        .await?;

    api_mock.assert_async().await;
    assert_eq!(receipt.status, 200);
    assert!(receipt.body.contains("sent"));
    Ok(())
}

#[tokio::test]
async fn test_unauthorized_maps_to_token_expired() -> Result<()> {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/send-location");
            then.status(401);
        })
        .await;

    let client = HttpDispatchClient::new(server.url("/api/send-location"))?;
    let dispatch = DispatchService::new(client);
    let locator = Locator::new(
        ProximityRanker::new(StaticCatalog::builtin()),
        OutputFormat::Table,
    );

    let err = locator
        .notify(&dispatch, &Credential::bearer("expired"), HERE, "jmh-01")
        .await
        .unwrap_err();

    assert!(matches!(err, LocatorError::TokenExpired));
    Ok(())
}

#[tokio::test]
async fn test_server_error_is_dispatch_failure() -> Result<()> {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/send-location");
            then.status(503).body("maintenance");
        })
        .await;

    let client = HttpDispatchClient::new(server.url("/api/send-location"))?;
    let err = client
        .notify(
            &Credential::bearer("token"),
            &DispatchRequest {
                phone_number: "+254700100101".to_string(),
                location: "https://www.google.com/maps?q=0,0".to_string(),
            },
        )
        .await
        .unwrap_err();

    match err {
        LocatorError::DispatchFailed { status, message } => {
            assert_eq!(status, 503);
            assert_eq!(message, "maintenance");
        }
        other => panic!("unexpected error: {:?}", other),
    }
    Ok(())
}

#[tokio::test]
async fn test_locator_notifies_nearby_unit_with_custom_map_link() -> Result<()> {
    let server = MockServer::start_async().await;
    let api_mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/notify").json_body(json!({
                "phone_number": "+254700200201",
                "location": "https://maps.example.com/?q=-1.1,37.01"
            }));
            then.status(201);
        })
        .await;

    let client = HttpDispatchClient::new(server.url("/notify"))?;
    let dispatch = DispatchService::with_map_link_base(client, "https://maps.example.com/?q=");
    let locator = Locator::new(
        ProximityRanker::new(StaticCatalog::builtin()),
        OutputFormat::Json,
    );

    let receipt = locator
        .notify(&dispatch, &Credential::bearer("t"), HERE, "tl5-01")
        .await?;

    api_mock.assert_async().await;
    assert_eq!(receipt.status, 201);
    Ok(())
}

#[tokio::test]
async fn test_unit_outside_radius_is_not_contacted() -> Result<()> {
    let server = MockServer::start_async().await;
    let api_mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/notify");
            then.status(200);
        })
        .await;

    let client = HttpDispatchClient::new(server.url("/notify"))?;
    let dispatch = DispatchService::new(client);
    let locator = Locator::new(
        ProximityRanker::new(StaticCatalog::builtin()),
        OutputFormat::Table,
    );

    // Kenyatta National Hospital 距離約 30 km
    let err = locator
        .notify(&dispatch, &Credential::bearer("t"), HERE, "knh-01")
        .await
        .unwrap_err();

    assert!(matches!(err, LocatorError::UnitNotFound { .. }));
    api_mock.assert_hits_async(0).await;
    Ok(())
}

#[tokio::test]
async fn test_truncated_response_body_is_http_error() -> Result<()> {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    // 宣告 64 位元組但只送出一部分就斷線
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let address = listener.local_addr()?;
    let server = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await?;
        let mut request = vec![0u8; 4096];
        let _ = socket.read(&mut request).await?;
        socket
            .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 64\r\n\r\n{\"status\":")
            .await?;
        socket.shutdown().await
    });

    let client = HttpDispatchClient::new(format!("http://{}/api/send-location", address))?;
    let result = client
        .notify(
            &Credential::bearer("token-123"),
            &DispatchRequest {
                phone_number: "+254700100101".to_string(),
                location: "https://www.google.com/maps?q=-1.1,37.01".to_string(),
            },
        )
        .await;

    assert!(matches!(result, Err(LocatorError::HttpError(_))));
    server.await??;
    Ok(())
}
