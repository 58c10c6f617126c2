//! OpenAI-compatible image generation client.

use std::time::Duration;

use creative404_types::InspectionResult;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};

use crate::config::ImageGenConfig;
use crate::error::ImageGenError;
use crate::prompt::build_prompt;

/// An image produced by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedImage {
    pub image_url: String,
    /// The prompt the API actually used, when it rewrote ours.
    pub revised_prompt: Option<String>,
}

#[derive(Serialize)]
struct ImageRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    n: u32,
    size: &'a str,
    response_format: &'a str,
}

#[derive(Deserialize)]
struct ImageResponse {
    #[serde(default)]
    data: Vec<ImageData>,
}

#[derive(Deserialize)]
struct ImageData {
    #[serde(default)]
    url: String,
    revised_prompt: Option<String>,
}

/// Client for an `images/generations` endpoint.
///
/// Construction fails with [`ImageGenError::MissingApiKey`] when no key is
/// configured, so a missing key is reported before any network call.
#[derive(Clone)]
pub struct ImageGenClient {
    http: reqwest::Client,
    headers: HeaderMap,
    config: ImageGenConfig,
}

impl ImageGenClient {
    pub fn new(config: ImageGenConfig) -> Result<Self, ImageGenError> {
        let api_key = config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or(ImageGenError::MissingApiKey)?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let mut auth = HeaderValue::from_str(&format!("Bearer {api_key}"))
            .map_err(|_| ImageGenError::InvalidConfig("API key contains invalid characters".into()))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| ImageGenError::Network(e.to_string()))?;

        Ok(Self {
            http,
            headers,
            config,
        })
    }

    /// Generate a 404 illustration themed on `inspection`.
    pub async fn generate(
        &self,
        inspection: &InspectionResult,
    ) -> Result<GeneratedImage, ImageGenError> {
        let prompt = build_prompt(inspection);
        tracing::info!(model = %self.config.model, "Generating 404 image with prompt: {prompt}");

        let request = ImageRequest {
            model: &self.config.model,
            prompt: &prompt,
            n: 1,
            size: &self.config.size,
            response_format: "url",
        };
        let body = serde_json::to_string(&request)
            .map_err(|e| ImageGenError::Decode(format!("failed to serialize request: {e}")))?;

        tracing::debug!("POST {}", self.config.endpoint);
        let response = self
            .http
            .post(&self.config.endpoint)
            .headers(self.headers.clone())
            .body(body)
            .send()
            .await
            .map_err(classify_reqwest)?;

        let status = response.status();
        let text = response.text().await.map_err(classify_reqwest)?;
        if !status.is_success() {
            let err = classify_error(status.as_u16(), &text);
            tracing::error!("Image API error: {err}");
            return Err(err);
        }

        let parsed: ImageResponse =
            serde_json::from_str(&text).map_err(|e| ImageGenError::Decode(e.to_string()))?;
        let first = parsed
            .data
            .into_iter()
            .next()
            .filter(|d| !d.url.trim().is_empty())
            .ok_or(ImageGenError::EmptyResponse)?;

        Ok(GeneratedImage {
            image_url: first.url,
            revised_prompt: first.revised_prompt,
        })
    }
}

fn classify_reqwest(err: reqwest::Error) -> ImageGenError {
    if err.is_timeout() {
        tracing::warn!("Image generation request timed out");
        ImageGenError::Timeout
    } else {
        ImageGenError::Network(err.to_string())
    }
}

/// Turn a non-2xx response into an error, preferring the API's own message.
fn classify_error(status: u16, body: &str) -> ImageGenError {
    #[derive(Deserialize)]
    struct ErrorBody {
        error: Option<ErrorDetail>,
    }
    #[derive(Deserialize)]
    struct ErrorDetail {
        message: Option<String>,
    }

    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .and_then(|e| e.message)
        .unwrap_or_else(|| body.to_string());

    ImageGenError::Api { status, message }
}
