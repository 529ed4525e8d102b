use crate::error::{FamtreeError, Result};
use futures_util::StreamExt;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Request body for the /api/generate endpoint
#[derive(Serialize)]
struct GenerateRequest {
    model: String,
    prompt: String,
}

/// One newline-delimited JSON chunk of the streamed response
#[derive(Deserialize)]
struct GenerateChunk {
    #[serde(default)]
    response: String,
    #[serde(default)]
    done: bool,
}

/// Client for a local Ollama-style text generation service.
///
/// The service streams its reply as newline-delimited JSON chunks, each
/// carrying a text fragment; the full reply is the concatenation of the
/// fragments.
pub struct OllamaClient {
    client: Client,
    base_url: String,
    model: String,
}

impl OllamaClient {
    /// Create a new generation client.
    ///
    /// # Panics
    ///
    /// Panics if HTTP client cannot be created (should not happen in normal
    /// operation)
    pub fn new(base_url: String, model: String, timeout_secs: u64) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
        }
    }

    /// Send `prompt` to the generation service and collect the streamed reply.
    ///
    /// Each text fragment is passed to `on_fragment` as it arrives (for live
    /// display); the returned string is the trimmed concatenation of all
    /// fragments. One attempt, no retries.
    pub async fn generate(
        &self,
        prompt: &str,
        mut on_fragment: impl FnMut(&str),
    ) -> Result<String> {
        let request = GenerateRequest {
            model: self.model.clone(),
            prompt: prompt.to_string(),
        };

        let response = self
            .client
            .post(format!("{}/api/generate", self.base_url))
            .json(&request)
            .send()
            .await
            .map_err(|e| FamtreeError::Generation(format!("Network error: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error response".to_string());
            return Err(FamtreeError::Generation(format!(
                "Generation API error {}: {}",
                status, body
            )));
        }

        let mut stream = response.bytes_stream();
        let mut buffer = String::new();
        let mut output = String::new();

        while let Some(bytes) = stream.next().await {
            let bytes =
                bytes.map_err(|e| FamtreeError::Generation(format!("Stream error: {}", e)))?;
            buffer.push_str(&String::from_utf8_lossy(&bytes));

            // Chunks are newline-delimited; a network read may split a chunk,
            // so only complete lines are parsed and the tail stays buffered.
            while let Some(pos) = buffer.find('\n') {
                let line = buffer[..pos].to_string();
                buffer.drain(..=pos);
                if let Some(fragment) = parse_chunk_line(&line)? {
                    on_fragment(&fragment);
                    output.push_str(&fragment);
                }
            }
        }

        // Trailing chunk without a final newline
        if let Some(fragment) = parse_chunk_line(buffer.trim_end())? {
            on_fragment(&fragment);
            output.push_str(&fragment);
        }

        Ok(output.trim().to_string())
    }

    /// Model name this client generates with.
    pub fn model(&self) -> &str {
        &self.model
    }
}

/// Parse one NDJSON line into its text fragment. Blank lines yield None; a
/// final `done` chunk with no text also yields None.
fn parse_chunk_line(line: &str) -> Result<Option<String>> {
    if line.trim().is_empty() {
        return Ok(None);
    }
    let chunk: GenerateChunk = serde_json::from_str(line)
        .map_err(|e| FamtreeError::Generation(format!("Malformed stream chunk: {}", e)))?;
    if chunk.response.is_empty() && chunk.done {
        return Ok(None);
    }
    Ok(Some(chunk.response))
}
