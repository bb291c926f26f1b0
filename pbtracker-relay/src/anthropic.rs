use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{error, warn};

use crate::config::ClaudeSection;
use crate::error::RelayError;

/// One-shot chat completion against the provider. Object-safe so the HTTP
/// layer can be exercised with a stub in tests.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    async fn complete(&self, system: &str, user_message: &str) -> Result<String, RelayError>;
}

/// Anthropic messages-API client. Stateless; one outbound request per call,
/// no retry, bounded by the configured timeout.
pub struct AnthropicClient {
    http: reqwest::Client,
    cfg: ClaudeSection,
    api_key: String,
}

impl AnthropicClient {
    pub fn new(cfg: ClaudeSection, api_key: String) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()?;
        Ok(Self { http, cfg, api_key })
    }
}

#[async_trait]
impl ChatProvider for AnthropicClient {
    async fn complete(&self, system: &str, user_message: &str) -> Result<String, RelayError> {
        #[derive(Serialize)]
        struct Msg<'a> {
            role: &'a str,
            content: &'a str,
        }

        #[derive(Serialize)]
        struct Req<'a> {
            model: &'a str,
            max_tokens: u32,
            temperature: f32,
            system: &'a str,
            messages: Vec<Msg<'a>>,
        }

        #[derive(Deserialize)]
        struct Resp {
            content: Vec<ContentBlock>,
        }

        #[derive(Deserialize)]
        struct ContentBlock {
            #[serde(rename = "type")]
            t: String,
            text: Option<String>,
        }

        let body = Req {
            model: &self.cfg.model,
            max_tokens: self.cfg.max_tokens,
            temperature: self.cfg.temperature,
            system,
            messages: vec![Msg {
                role: "user",
                content: user_message,
            }],
        };

        let mut headers = HeaderMap::new();
        headers.insert(
            "x-api-key",
            HeaderValue::from_str(&self.api_key).map_err(|e| RelayError::Upstream {
                detail: format!("api key header: {e}"),
            })?,
        );
        headers.insert("anthropic-version", HeaderValue::from_static("2023-06-01"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let resp = self
            .http
            .post(format!("{}/v1/messages", self.cfg.base_url))
            .headers(headers)
            .json(&body)
            .send()
            .await
            .map_err(map_send_error)?;

        let status = resp.status();
        if !status.is_success() {
            let detail = resp.text().await.unwrap_or_default();
            return Err(match status.as_u16() {
                401 => {
                    error!(%status, %detail, "provider rejected credentials");
                    RelayError::UpstreamAuth
                }
                429 => {
                    warn!("provider rate limited");
                    RelayError::RateLimited
                }
                _ => {
                    error!(%status, %detail, "provider call failed");
                    RelayError::Upstream {
                        detail: format!("{status}: {detail}"),
                    }
                }
            });
        }

        let out: Resp = resp.json().await.map_err(|e| RelayError::Upstream {
            detail: format!("parse provider response: {e}"),
        })?;

        // reply is the first text block; anything else is an empty reply
        let text = out
            .content
            .first()
            .filter(|b| b.t == "text")
            .and_then(|b| b.text.clone())
            .unwrap_or_default();
        Ok(text.trim().to_string())
    }
}

fn map_send_error(e: reqwest::Error) -> RelayError {
    if e.is_timeout() {
        warn!("provider call exceeded deadline");
        RelayError::Timeout
    } else {
        error!(error = %e, "provider call failed to send");
        RelayError::Upstream {
            detail: e.to_string(),
        }
    }
}
