//! Gemini editor against a local mock of the generateContent endpoint.
#![cfg(feature = "gemini")]

use prophoto::{
    failure_message, EncodedImage, GeminiEditor, GeminiModel, ImageEditor, Locale, ProPhotoError,
    TransformClient, TransformOptions, TransformationService,
};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const FLASH_PATH: &str = "/models/gemini-2.5-flash-image:generateContent";

fn editor_for(server_uri: &str) -> GeminiEditor {
    GeminiEditor::builder()
        .api_key("test-key")
        .base_url(server_uri)
        .build()
        .unwrap()
}

fn photo() -> EncodedImage {
    EncodedImage::parse("data:image/jpeg;base64,/9j/4AAQSkZJRg==").unwrap()
}

fn image_response(data: &str) -> serde_json::Value {
    json!({
        "candidates": [{
            "content": {
                "role": "model",
                "parts": [
                    {"text": "Here is your headshot."},
                    {"inlineData": {"mimeType": "image/png", "data": data}}
                ]
            },
            "finishReason": "STOP"
        }]
    })
}

#[tokio::test]
async fn sends_image_then_instruction_and_returns_first_image() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(FLASH_PATH))
        .and(header("x-goog-api-key", "test-key"))
        .and(body_partial_json(json!({
            "generationConfig": {"responseModalities": ["IMAGE"]}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(image_response("X")))
        .expect(1)
        .mount(&server)
        .await;

    let editor = editor_for(&server.uri());
    let result = editor.edit(&photo(), "Make it formal").await.unwrap();
    assert_eq!(result.to_data_uri(), "data:image/png;base64,X");

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    let parts = &body["contents"][0]["parts"];
    assert_eq!(parts[0]["inlineData"]["mimeType"], "image/jpeg");
    assert_eq!(parts[0]["inlineData"]["data"], "/9j/4AAQSkZJRg==");
    assert_eq!(parts[1]["text"], "Make it formal");
}

#[tokio::test]
async fn uses_selected_model_in_path() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/gemini-3-pro-image-preview:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(image_response("UHJv")))
        .expect(1)
        .mount(&server)
        .await;

    let editor = GeminiEditor::builder()
        .api_key("test-key")
        .model(GeminiModel::ProImage)
        .base_url(server.uri())
        .build()
        .unwrap();
    let result = editor.edit(&photo(), "x").await.unwrap();
    assert_eq!(result.base64_data(), "UHJv");
}

#[tokio::test]
async fn text_only_response_is_generation_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(FLASH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": {"parts": [{"text": "I can't help with that."}]},
                "finishReason": "STOP"
            }]
        })))
        .mount(&server)
        .await;

    let err = editor_for(&server.uri())
        .edit(&photo(), "x")
        .await
        .unwrap_err();
    assert!(matches!(err, ProPhotoError::GenerationFailed(_)));
}

#[tokio::test]
async fn unauthorized_maps_to_auth() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(FLASH_PATH))
        .respond_with(ResponseTemplate::new(403).set_body_string("API key not valid"))
        .mount(&server)
        .await;

    let err = editor_for(&server.uri())
        .edit(&photo(), "x")
        .await
        .unwrap_err();
    match err {
        ProPhotoError::Auth(message) => assert_eq!(message, "API key not valid"),
        other => panic!("expected Auth, got {other:?}"),
    }
}

#[tokio::test]
async fn quota_rejection_maps_to_rate_limited() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(FLASH_PATH))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("retry-after", "7")
                .set_body_string("Resource has been exhausted"),
        )
        .mount(&server)
        .await;

    let err = editor_for(&server.uri())
        .edit(&photo(), "x")
        .await
        .unwrap_err();
    match err {
        ProPhotoError::RateLimited { retry_after } => {
            assert_eq!(retry_after, Some(std::time::Duration::from_secs(7)))
        }
        other => panic!("expected RateLimited, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_body_maps_to_json_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(FLASH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = editor_for(&server.uri())
        .edit(&photo(), "x")
        .await
        .unwrap_err();
    assert!(matches!(err, ProPhotoError::Json(_)));
}

#[tokio::test]
async fn client_scenario_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(FLASH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(image_response("X")))
        .expect(1)
        .mount(&server)
        .await;

    let service = TransformationService::new(editor_for(&server.uri()));
    let mut client = TransformClient::with_options(TransformOptions::new());
    client.load_image(Some(&[0x89u8, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A][..]));

    let state = client.start_transform(&service).await;
    assert_eq!(
        state.transformed().unwrap().to_data_uri(),
        "data:image/png;base64,X"
    );
    assert!(state.error().is_none());
}

#[tokio::test]
async fn client_scenarios_no_image_and_network_error_look_the_same() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(FLASH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{"content": {"parts": [{"text": "no"}]}}]
        })))
        .mount(&server)
        .await;
    let no_image = TransformationService::new(editor_for(&server.uri()));

    // A port nobody listens on refuses the connection
    let closed_port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let unreachable =
        TransformationService::new(editor_for(&format!("http://127.0.0.1:{closed_port}")));

    let photo: [u8; 10] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 9, 9];

    let mut a = TransformClient::new();
    a.load_image(Some(&photo));
    let after_no_image = a.start_transform(&no_image).await.clone();

    let mut b = TransformClient::new();
    b.load_image(Some(&photo));
    let after_network = b.start_transform(&unreachable).await.clone();

    assert_eq!(after_no_image.error(), Some(failure_message(Locale::En)));
    assert!(after_no_image.transformed().is_none());
    assert_eq!(after_no_image, after_network);
}
