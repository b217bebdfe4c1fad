use axum::{
    body::{Body, Bytes},
    extract::{rejection::BytesRejection, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    Json,
};
use std::sync::Arc;

use crate::{
    domain::tts::{EncodedAudio, GenerationRequest, TtsService, TtsServiceApi, AUDIO_CONTENT_TYPE},
    error::{AppError, AppResult},
};

pub struct TtsController {
    tts_service: Arc<TtsService>,
}

impl TtsController {
    pub fn new(tts_service: Arc<TtsService>) -> Self {
        Self { tts_service }
    }

    /// POST /api/tts - Convert text to speech, answering with raw audio
    pub async fn generate(
        State(controller): State<Arc<TtsController>>,
        body: Result<Bytes, BytesRejection>,
    ) -> AppResult<(StatusCode, HeaderMap, Body)> {
        let audio_data = controller.generate_audio(read_body(body)?).await?;

        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(AUDIO_CONTENT_TYPE),
        );
        headers.insert(header::CONTENT_LENGTH, HeaderValue::from(audio_data.len()));

        Ok((StatusCode::OK, headers, Body::from(audio_data)))
    }

    /// POST /api/generate-voice - Convert text to speech, answering with base64 audio in JSON
    pub async fn generate_encoded(
        State(controller): State<Arc<TtsController>>,
        body: Result<Bytes, BytesRejection>,
    ) -> AppResult<Json<EncodedAudio>> {
        let audio_data = controller.generate_audio(read_body(body)?).await?;

        Ok(Json(EncodedAudio::from_audio(&audio_data)))
    }

    /// Any other method on the generation routes; answered before the body is read
    pub async fn method_not_allowed() -> AppError {
        AppError::MethodNotAllowed
    }

    async fn generate_audio(&self, body: Bytes) -> AppResult<Vec<u8>> {
        let request = parse_generation_request(&body)?;

        Ok(self.tts_service.generate(request).await?)
    }
}

fn read_body(body: Result<Bytes, BytesRejection>) -> AppResult<Bytes> {
    body.map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge
        } else {
            AppError::MalformedRequest(rejection.body_text())
        }
    })
}

/// Only a JSON object is a request; arrays would otherwise bind positionally
fn parse_generation_request(body: &[u8]) -> AppResult<GenerationRequest> {
    let value: serde_json::Value =
        serde_json::from_slice(body).map_err(|e| AppError::MalformedRequest(e.to_string()))?;

    if !value.is_object() {
        return Err(AppError::MalformedRequest(
            "request body must be a JSON object".to_string(),
        ));
    }

    serde_json::from_value(value).map_err(|e| AppError::MalformedRequest(e.to_string()))
}
