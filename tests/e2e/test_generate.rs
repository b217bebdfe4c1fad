use crate::e2e::helpers;

use helpers::fixtures::{mock_audio_bytes, TEST_API_KEY};
use helpers::{ContextOptions, TestContext};
use hyper::{Method, StatusCode};
use mockito::Matcher;
use pretty_assertions::assert_eq;
use serde_json::json;
use test_context::test_context;
use voxgate_backend::domain::tts::EncodedAudio;

fn expected_provider_body(text: &str, model_id: &str) -> Matcher {
    Matcher::Json(json!({
        "text": text,
        "model_id": model_id,
        "voice_settings": {"stability": 0.5, "similarity_boost": 0.5}
    }))
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_provider_audio_verbatim(ctx: &mut TestContext) {
    let audio = mock_audio_bytes(1024);
    let provider_mock = ctx
        .provider
        .mock("POST", "/v1/text-to-speech/A")
        .match_header("xi-api-key", TEST_API_KEY)
        .match_header("accept", "audio/mpeg")
        .match_body(expected_provider_body("hi", "m1"))
        .with_status(200)
        .with_header("content-type", "audio/mpeg")
        .with_body(audio.clone())
        .expect(1)
        .create_async()
        .await;

    let response = ctx
        .client
        .post(
            "/api/tts",
            &json!({"text": "hi", "voiceId": "A", "modelId": "m1"}),
        )
        .await
        .unwrap();

    response
        .assert_status(StatusCode::OK)
        .assert_header("content-type", "audio/mpeg")
        .assert_header("content-length", "1024");
    assert_eq!(response.body_bytes.len(), 1024);
    assert_eq!(response.body_bytes, audio);

    provider_mock.assert_async().await;
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_base64_envelope_on_generate_voice(ctx: &mut TestContext) {
    let audio = mock_audio_bytes(1024);
    let provider_mock = ctx
        .provider
        .mock("POST", "/v1/text-to-speech/A")
        .match_body(expected_provider_body("hi", "m1"))
        .with_status(200)
        .with_body(audio.clone())
        .expect(1)
        .create_async()
        .await;

    let response = ctx
        .client
        .post(
            "/api/generate-voice",
            &json!({"text": "hi", "voiceId": "A", "modelId": "m1"}),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    let envelope: EncodedAudio = response.json().unwrap();
    assert!(envelope.is_base64_encoded);
    assert_eq!(envelope.content_type, "audio/mpeg");
    assert_eq!(envelope.decode().unwrap(), audio);

    provider_mock.assert_async().await;
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_missing_text_without_calling_provider(ctx: &mut TestContext) {
    let provider_mock = ctx
        .provider
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let response = ctx
        .client
        .post("/api/tts", &json!({"voiceId": "A", "modelId": "m1"}))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("Missing required parameters");
    provider_mock.assert_async().await;
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_empty_or_null_fields(ctx: &mut TestContext) {
    let provider_mock = ctx
        .provider
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let bodies = [
        json!({"text": "", "voiceId": "A", "modelId": "m1"}),
        json!({"text": "hi", "voiceId": "", "modelId": "m1"}),
        json!({"text": "hi", "voiceId": "A", "modelId": null}),
        json!({}),
    ];

    for body in bodies {
        let response = ctx.client.post("/api/generate-voice", &body).await.unwrap();
        response
            .assert_status(StatusCode::BAD_REQUEST)
            .assert_error_message("Missing required parameters");
    }

    provider_mock.assert_async().await;
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_malformed_body(ctx: &mut TestContext) {
    let provider_mock = ctx
        .provider
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    for body in [
        "not json",
        "[1, 2, 3]",
        r#"["hi","A","m1"]"#,
        "[]",
        "[null,null,null]",
        r#"{"text": 42}"#,
        "",
    ] {
        let response = ctx.client.post_raw("/api/tts", body).await.unwrap();
        response
            .assert_status(StatusCode::BAD_REQUEST)
            .assert_error_message("Invalid request body");
    }

    provider_mock.assert_async().await;
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_non_post_methods(ctx: &mut TestContext) {
    let provider_mock = ctx
        .provider
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    for path in ["/api/tts", "/api/generate-voice"] {
        for method in [Method::GET, Method::PUT, Method::DELETE, Method::PATCH] {
            let response = ctx
                .client
                .request(
                    method.clone(),
                    path,
                    Some(br#"{"text":"hi","voiceId":"A","modelId":"m1"}"#.to_vec()),
                    &[("Content-Type", "application/json")],
                )
                .await
                .unwrap();

            response
                .assert_status(StatusCode::METHOD_NOT_ALLOWED)
                .assert_error_message("Method not allowed");
        }
    }

    provider_mock.assert_async().await;
}

#[tokio::test]
async fn it_should_report_missing_credential_as_server_error() {
    let mut ctx = TestContext::without_credential().await;
    let provider_mock = ctx
        .provider
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let response = ctx
        .client
        .post(
            "/api/tts",
            &json!({"text": "hi", "voiceId": "A", "modelId": "m1"}),
        )
        .await
        .unwrap();

    response
        .assert_status(StatusCode::INTERNAL_SERVER_ERROR)
        .assert_error_message("Server configuration error: Missing API key");
    provider_mock.assert_async().await;
}

#[tokio::test]
async fn it_should_validate_parameters_before_credential() {
    let ctx = TestContext::without_credential().await;

    let response = ctx
        .client
        .post("/api/tts", &json!({"voiceId": "A", "modelId": "m1"}))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("Missing required parameters");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_propagate_provider_status_and_detail(ctx: &mut TestContext) {
    let provider_mock = ctx
        .provider
        .mock("POST", "/v1/text-to-speech/A")
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(r#"{"detail": {"status": "invalid_api_key", "message": "Invalid API key"}}"#)
        .expect(1)
        .create_async()
        .await;

    let response = ctx
        .client
        .post(
            "/api/tts",
            &json!({"text": "hi", "voiceId": "A", "modelId": "m1"}),
        )
        .await
        .unwrap();

    response
        .assert_status(StatusCode::UNAUTHORIZED)
        .assert_error_message("Voice generation failed: 401 Unauthorized");
    assert_eq!(response.detail(), Some("Invalid API key"));

    // The server-held key must never reach the client
    let raw = String::from_utf8_lossy(&response.body_bytes);
    assert!(!raw.contains(TEST_API_KEY));

    provider_mock.assert_async().await;
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_use_generic_detail_when_provider_error_is_unparsable(ctx: &mut TestContext) {
    let provider_mock = ctx
        .provider
        .mock("POST", "/v1/text-to-speech/A")
        .with_status(503)
        .with_body("<html>Service Unavailable</html>")
        .expect(1)
        .create_async()
        .await;

    let response = ctx
        .client
        .post(
            "/api/tts",
            &json!({"text": "hi", "voiceId": "A", "modelId": "m1"}),
        )
        .await
        .unwrap();

    response
        .assert_status(StatusCode::SERVICE_UNAVAILABLE)
        .assert_error_message("Voice generation failed: 503 Service Unavailable");
    assert_eq!(response.detail(), Some("Could not parse error response"));

    provider_mock.assert_async().await;
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_empty_provider_audio(ctx: &mut TestContext) {
    let provider_mock = ctx
        .provider
        .mock("POST", "/v1/text-to-speech/A")
        .with_status(200)
        .with_header("content-type", "audio/mpeg")
        .with_body(Vec::<u8>::new())
        .expect(2)
        .create_async()
        .await;

    for path in ["/api/tts", "/api/generate-voice"] {
        let response = ctx
            .client
            .post(path, &json!({"text": "hi", "voiceId": "A", "modelId": "m1"}))
            .await
            .unwrap();

        response
            .assert_status(StatusCode::INTERNAL_SERVER_ERROR)
            .assert_error_message("Received empty audio from synthesis provider");
    }

    provider_mock.assert_async().await;
}

#[tokio::test]
async fn it_should_report_unreachable_provider() {
    let ctx = TestContext::with_options(ContextOptions {
        // Nothing listens on port 1
        provider_base_url: Some("http://127.0.0.1:1".to_string()),
        ..ContextOptions::default()
    })
    .await;

    let response = ctx
        .client
        .post(
            "/api/tts",
            &json!({"text": "hi", "voiceId": "A", "modelId": "m1"}),
        )
        .await
        .unwrap();

    response
        .assert_status(StatusCode::INTERNAL_SERVER_ERROR)
        .assert_error_message("Voice generation failed: provider unreachable");
    assert_eq!(response.detail(), Some("Could not reach synthesis provider"));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_scope_provider_call_to_requested_voice(ctx: &mut TestContext) {
    let other_voice = ctx
        .provider
        .mock("POST", "/v1/text-to-speech/A")
        .expect(0)
        .create_async()
        .await;
    let requested_voice = ctx
        .provider
        .mock("POST", "/v1/text-to-speech/pNInz6obpgDQGcFmaJgB")
        .match_body(expected_provider_body("Hello there", "eleven_turbo_v2"))
        .with_status(200)
        .with_body(mock_audio_bytes(16))
        .expect(1)
        .create_async()
        .await;

    let response = ctx
        .client
        .post(
            "/api/tts",
            &json!({
                "text": "Hello there",
                "voiceId": "pNInz6obpgDQGcFmaJgB",
                "modelId": "eleven_turbo_v2"
            }),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    other_voice.assert_async().await;
    requested_voice.assert_async().await;
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_handle_concurrent_generation_requests(ctx: &mut TestContext) {
    let provider_mock = ctx
        .provider
        .mock("POST", "/v1/text-to-speech/A")
        .with_status(200)
        .with_body(mock_audio_bytes(64))
        .expect(8)
        .create_async()
        .await;

    let requests = (0..8).map(|i| {
        let client = ctx.client.clone();
        async move {
            client
                .post(
                    "/api/tts",
                    &json!({"text": format!("message {i}"), "voiceId": "A", "modelId": "m1"}),
                )
                .await
        }
    });

    let responses = futures::future::join_all(requests).await;

    for response in responses {
        let response = response.unwrap();
        response.assert_status(StatusCode::OK);
        assert_eq!(response.body_bytes.len(), 64);
    }

    provider_mock.assert_async().await;
}
