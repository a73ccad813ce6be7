//! Remote NER backend (JSON over HTTP).

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::engine::NerEngine;
use crate::error::NerError;
use crate::EntitySpan;

#[derive(Serialize)]
struct ExtractRequest<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct ExtractResponse {
    entities: Vec<EntitySpan>,
}

/// NER engine backed by a remote model service.
///
/// POSTs `{"text": <line>}` to the configured endpoint and expects
/// `{"entities": [{"label", "text", "start", "end"}, ..]}` back.
pub struct HttpNerEngine {
    client: reqwest::blocking::Client,
    endpoint: String,
}

impl HttpNerEngine {
    pub fn new(endpoint: &str, timeout_secs: u64) -> Result<Self, NerError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| NerError::Config(format!("failed to build http client: {}", e)))?;

        log::info!("[Ner] http backend at {}", endpoint);

        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
        })
    }
}

impl NerEngine for HttpNerEngine {
    fn extract_entities(&mut self, line_text: &str) -> Result<Vec<EntitySpan>, NerError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&ExtractRequest { text: line_text })
            .send()
            .map_err(|e| NerError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(NerError::Backend(format!(
                "endpoint returned {}: {}",
                status, body
            )));
        }

        let parsed: ExtractResponse = response
            .json()
            .map_err(|e| NerError::Backend(format!("malformed span payload: {}", e)))?;

        log::debug!(
            "[Ner] {} span(s) for line of {} chars",
            parsed.entities.len(),
            line_text.chars().count()
        );

        Ok(parsed.entities)
    }
}
