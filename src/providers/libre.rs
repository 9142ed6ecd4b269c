use std::time::Duration;
use serde::{Serialize, Deserialize};
use async_trait::async_trait;
use reqwest::Client;
use log::error;

use crate::app_config::EndpointConfig;
use crate::errors::ProviderError;
use super::TranslationProvider;

/// Client for a LibreTranslate-dialect endpoint
///
/// Both the public cloud API and self-hosted instances speak the same
/// contract: POST {q, source, target, format} to the translate route,
/// success is a JSON body carrying `translatedText`.
#[derive(Debug)]
pub struct LibreTranslate {
    /// HTTP client for API requests, carries the per-endpoint timeout
    client: Client,
    /// Short name used in logs
    name: String,
    /// Translate route URL
    url: String,
    /// API key for authentication, when the endpoint requires one
    api_key: Option<String>,
}

/// Translation request body
#[derive(Debug, Serialize)]
pub struct TranslateRequest<'a> {
    /// Text to translate
    pub q: &'a str,
    /// Source language code
    pub source: &'a str,
    /// Target language code
    pub target: &'a str,
    /// Payload format, always "text" for listing fields
    pub format: &'a str,
}

/// Translation response body
#[derive(Debug, Deserialize)]
pub struct TranslateResponse {
    /// The translated text
    #[serde(rename = "translatedText")]
    pub translated_text: String,
}

impl LibreTranslate {
    /// Create a new client from an endpoint descriptor
    pub fn new(endpoint: &EndpointConfig) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(endpoint.timeout_secs))
                .build()
                .unwrap_or_default(),
            name: endpoint.name.clone(),
            url: endpoint.url.clone(),
            api_key: endpoint.api_key.clone().filter(|k| !k.is_empty()),
        }
    }

    /// URL of the languages route, derived from the translate route
    fn languages_url(&self) -> String {
        let base = self.url.trim_end_matches('/');
        let base = base.strip_suffix("/translate").unwrap_or(base);
        format!("{}/languages", base)
    }
}

#[async_trait]
impl TranslationProvider for LibreTranslate {
    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, ProviderError> {
        let body = TranslateRequest {
            q: text,
            source,
            target,
            format: "text",
        };

        let mut request = self.client.post(&self.url).json(&body);
        if let Some(api_key) = &self.api_key {
            request = request.header("X-LibreTranslate-API-Key", api_key);
        }

        // A timeout surfaces here as a send error, same path as any other
        // network failure
        let response = request
            .send()
            .await
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("{} endpoint error ({}): {}", self.name, status, error_text);
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: error_text,
            });
        }

        let translate_response = response
            .json::<TranslateResponse>()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        Ok(translate_response.translated_text)
    }

    async fn healthcheck(&self) -> Result<(), ProviderError> {
        let response = self
            .client
            .get(self.languages_url())
            .send()
            .await
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: format!("healthcheck failed for {}", self.name),
            });
        }

        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
