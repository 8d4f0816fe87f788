use std::time::Duration;

use serde::Deserialize;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Errors from the detection endpoint
#[derive(Debug, thiserror::Error)]
pub enum DetectError {
    #[error("detection request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("detection endpoint returned {status}: {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("failed to parse detection response: {0}")]
    InvalidResponse(#[from] serde_json::Error),
}

/// One bounding box reported by the model
#[derive(Debug, Clone, Deserialize)]
pub struct Detection {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub confidence: f32,
    #[serde(default)]
    pub label: String,
}

#[derive(Debug, Deserialize)]
struct DetectResponse {
    #[serde(default)]
    detections: Vec<Detection>,
}

/// Client for a detection-model server
///
/// The wire contract is one POST of the raw image bytes, answered with
/// `{"detections": [{x, y, width, height, confidence, label}, ...]}`.
#[derive(Debug, Clone)]
pub struct DetectorClient {
    endpoint: String,
    client: reqwest::Client,
}

impl DetectorClient {
    pub fn new(endpoint: String) -> Result<Self, DetectError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { endpoint, client })
    }

    pub async fn detect(&self, image_bytes: Vec<u8>) -> Result<Vec<Detection>, DetectError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/octet-stream")
            .body(image_bytes)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DetectError::Api { status, body });
        }

        let body = response.text().await?;
        let parsed: DetectResponse = serde_json::from_str(&body)?;
        Ok(parsed.detections)
    }
}
