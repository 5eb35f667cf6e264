//! Microsoft Computer Vision provider using the Analyze Image API.
//!
//! URL images are sent as a JSON `{"url": ...}` body; byte images are
//! uploaded raw as `application/octet-stream`.

use super::provider::VisionProvider;
use super::types::{AnalysisResult, ImageSource, VisualFeature};
use crate::error::VisionError;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};
use std::time::Instant;

const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";

/// Computer Vision provider.
///
/// Holds only the endpoint and key. Every call builds its own HTTP client, so
/// nothing (connections included) is shared between calls.
pub struct AzureVisionProvider {
    analyze_url: String,
    language: String,
    api_key: String,
}

impl AzureVisionProvider {
    pub fn new(endpoint: &str, api_version: &str, language: &str, api_key: &str) -> Self {
        Self {
            analyze_url: format!(
                "{}/vision/{}/analyze",
                endpoint.trim().trim_end_matches('/'),
                api_version.trim().trim_matches('/')
            ),
            language: language.trim().to_string(),
            api_key: api_key.to_string(),
        }
    }
}

// --- Request types ---

#[derive(Serialize)]
struct UrlBody<'a> {
    url: &'a str,
}

// --- Error envelope ---

#[derive(Deserialize)]
#[serde(untagged)]
enum ErrorBody {
    Wrapped { error: ApiError },
    Flat(ApiError),
}

#[derive(Deserialize)]
struct ApiError {
    code: Option<String>,
    message: Option<String>,
}

/// Turn a non-success response body into (code, message).
///
/// Falls back to the raw body when it isn't one of the known JSON envelopes.
fn parse_error_body(text: &str) -> (Option<String>, String) {
    let api_error = match serde_json::from_str::<ErrorBody>(text) {
        Ok(ErrorBody::Wrapped { error }) | Ok(ErrorBody::Flat(error)) => error,
        Err(_) => return (None, text.trim().to_string()),
    };
    let message = api_error
        .message
        .unwrap_or_else(|| text.trim().to_string());
    (api_error.code, message)
}

#[async_trait]
impl VisionProvider for AzureVisionProvider {
    fn name(&self) -> &str {
        "azure"
    }

    async fn analyze(
        &self,
        image: &ImageSource,
        features: &[VisualFeature],
    ) -> Result<AnalysisResult, VisionError> {
        if image.is_empty() {
            return Err(VisionError::InvalidRequest(format!(
                "image {} must not be empty",
                image.kind()
            )));
        }
        if features.is_empty() {
            return Err(VisionError::InvalidRequest(
                "at least one visual feature must be requested".to_string(),
            ));
        }

        let start = Instant::now();
        let visual_features = VisualFeature::query_list(features);
        tracing::debug!(
            source = image.kind(),
            features = %visual_features,
            "Sending analyze request to {}",
            self.analyze_url
        );

        let client = reqwest::Client::new();
        let request = client
            .post(&self.analyze_url)
            .query(&[
                ("visualFeatures", visual_features.as_str()),
                ("language", self.language.as_str()),
            ])
            .header(SUBSCRIPTION_KEY_HEADER, &self.api_key);

        let request = match image {
            ImageSource::Url(url) => request.json(&UrlBody { url }),
            ImageSource::Bytes(bytes) => request
                .header(CONTENT_TYPE, "application/octet-stream")
                .body(bytes.clone()),
        };

        let resp = request.send().await.map_err(|e| VisionError::Request {
            message: e.to_string(),
        })?;

        let status = resp.status();
        tracing::debug!(
            status = status.as_u16(),
            latency_ms = start.elapsed().as_millis() as u64,
            "Analyze response received"
        );

        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            let (code, message) = parse_error_body(&text);
            return Err(VisionError::Http {
                status: status.as_u16(),
                code,
                message,
            });
        }

        resp.json::<AnalysisResult>()
            .await
            .map_err(|e| VisionError::Parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_bytes, body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const TEST_API_KEY: &str = "test-api-key";

    fn provider_for(server: &MockServer) -> AzureVisionProvider {
        AzureVisionProvider::new(&server.uri(), "v3.2", "en", TEST_API_KEY)
    }

    fn caption_response() -> serde_json::Value {
        json!({
            "description": {
                "tags": ["cat"],
                "captions": [{"text": "a cat lying on a bed", "confidence": 0.91}]
            },
            "tags": [
                {"name": "cat", "confidence": 0.99},
                {"name": "bed", "confidence": 0.82}
            ],
            "requestId": "req-1"
        })
    }

    #[test]
    fn test_analyze_url_joins_endpoint_and_version() {
        let provider = AzureVisionProvider::new(
            "https://westus.api.cognitive.microsoft.com/",
            "v3.2",
            "en",
            "k",
        );
        assert_eq!(
            provider.analyze_url,
            "https://westus.api.cognitive.microsoft.com/vision/v3.2/analyze"
        );
    }

    #[test]
    fn test_new_trims_padded_config_values() {
        let provider = AzureVisionProvider::new(
            "  https://westus.api.cognitive.microsoft.com/ ",
            " v3.2 ",
            " en\n",
            "k",
        );
        assert_eq!(
            provider.analyze_url,
            "https://westus.api.cognitive.microsoft.com/vision/v3.2/analyze"
        );
        assert_eq!(provider.language, "en");
    }

    #[test]
    fn test_parse_error_body_variants() {
        let (code, message) =
            parse_error_body(r#"{"error":{"code":"InvalidImageUrl","message":"bad url"}}"#);
        assert_eq!(code.as_deref(), Some("InvalidImageUrl"));
        assert_eq!(message, "bad url");

        let (code, message) = parse_error_body(r#"{"code":"Unauthorized","message":"no key"}"#);
        assert_eq!(code.as_deref(), Some("Unauthorized"));
        assert_eq!(message, "no key");

        let (code, message) = parse_error_body("Service Unavailable\n");
        assert!(code.is_none());
        assert_eq!(message, "Service Unavailable");
    }

    #[tokio::test]
    async fn test_analyze_url_sends_json_body_and_key() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/vision/v3.2/analyze"))
            .and(query_param("visualFeatures", "Description,Tags"))
            .and(query_param("language", "en"))
            .and(header(SUBSCRIPTION_KEY_HEADER, TEST_API_KEY))
            .and(body_json(json!({"url": "https://example.com/cat.jpg"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(caption_response()))
            .expect(1)
            .mount(&server)
            .await;

        let result = provider_for(&server)
            .analyze(
                &ImageSource::Url("https://example.com/cat.jpg".to_string()),
                &[VisualFeature::Description, VisualFeature::Tags],
            )
            .await
            .unwrap();

        assert_eq!(result.first_caption(), Some("a cat lying on a bed"));
        assert_eq!(result.tag_name(1), Some("bed"));
        assert_eq!(result.request_id.as_deref(), Some("req-1"));
    }

    #[tokio::test]
    async fn test_analyze_bytes_sends_octet_stream() {
        let server = MockServer::start().await;
        let image = vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];
        Mock::given(method("POST"))
            .and(path("/vision/v3.2/analyze"))
            .and(query_param("visualFeatures", "Tags"))
            .and(header("content-type", "application/octet-stream"))
            .and(body_bytes(image.clone()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "tags": [{"name": "dog", "confidence": 0.97}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let result = provider_for(&server)
            .analyze(&ImageSource::Bytes(image), &[VisualFeature::Tags])
            .await
            .unwrap();

        assert!(result.description.is_none());
        assert_eq!(result.tag_name(0), Some("dog"));
    }

    #[tokio::test]
    async fn test_unauthorized_maps_to_http_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "error": {
                    "code": "401",
                    "message": "Access denied due to invalid subscription key."
                }
            })))
            .mount(&server)
            .await;

        let err = provider_for(&server)
            .analyze(
                &ImageSource::Url("https://example.com/cat.jpg".to_string()),
                &[VisualFeature::Tags],
            )
            .await
            .unwrap_err();

        match err {
            VisionError::Http {
                status,
                code,
                message,
            } => {
                assert_eq!(status, 401);
                assert_eq!(code.as_deref(), Some("401"));
                assert!(message.contains("invalid subscription key"));
            }
            other => panic!("Expected Http error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_rate_limit_passes_status_through() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_string("Too Many Requests"))
            .expect(1)
            .mount(&server)
            .await;

        let err = provider_for(&server)
            .analyze(&ImageSource::Bytes(vec![1, 2, 3]), &[VisualFeature::Tags])
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            VisionError::Http { status: 429, code: None, ref message } if message == "Too Many Requests"
        ));
    }

    #[tokio::test]
    async fn test_malformed_success_body_is_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = provider_for(&server)
            .analyze(
                &ImageSource::Url("https://example.com/cat.jpg".to_string()),
                &[VisualFeature::Tags],
            )
            .await
            .unwrap_err();

        assert!(matches!(err, VisionError::Parse(_)));
    }

    #[tokio::test]
    async fn test_empty_image_rejected_before_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(caption_response()))
            .expect(0)
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        let err = provider
            .analyze(&ImageSource::Url(String::new()), &[VisualFeature::Tags])
            .await
            .unwrap_err();
        assert!(matches!(err, VisionError::InvalidRequest(_)));

        let err = provider
            .analyze(&ImageSource::Bytes(Vec::new()), &[VisualFeature::Tags])
            .await
            .unwrap_err();
        assert!(matches!(err, VisionError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn test_padded_endpoint_from_validated_config_reaches_server() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/vision/v3.2/analyze"))
            .respond_with(ResponseTemplate::new(200).set_body_json(caption_response()))
            .expect(1)
            .mount(&server)
            .await;

        let mut config = crate::Config::default();
        config.vision.endpoint = format!(" {} ", server.uri());
        config.vision.api_key = TEST_API_KEY.to_string();
        assert!(config.validate().is_ok());

        let provider = AzureVisionProvider::new(
            &config.vision.endpoint,
            &config.vision.api_version,
            &config.vision.language,
            &config.vision.api_key,
        );
        let result = provider
            .analyze(
                &ImageSource::Url("https://example.com/cat.jpg".to_string()),
                &[VisualFeature::Description, VisualFeature::Tags],
            )
            .await
            .unwrap();
        assert_eq!(result.first_caption(), Some("a cat lying on a bed"));
    }

    #[tokio::test]
    async fn test_no_features_rejected_before_request() {
        let server = MockServer::start().await;
        let err = provider_for(&server)
            .analyze(&ImageSource::Bytes(vec![1]), &[])
            .await
            .unwrap_err();
        assert!(matches!(err, VisionError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_request_error() {
        // Port 1 on loopback has nothing listening.
        let provider = AzureVisionProvider::new("http://127.0.0.1:1", "v3.2", "en", "k");
        let err = provider
            .analyze(
                &ImageSource::Url("https://example.com/cat.jpg".to_string()),
                &[VisualFeature::Tags],
            )
            .await
            .unwrap_err();
        assert!(matches!(err, VisionError::Request { .. }));
    }
}
