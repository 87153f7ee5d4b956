// MIT License

/*Copyright (c) 2024 Based Labs

Permission is hereby granted, free of charge, to any person obtaining a copy of this software and associated documentation files (the "Software"), to deal in the Software without restriction, including without limitation the rights to use, copy, modify, merge, publish, distribute, sublicense, and/or sell copies of the Software, and to permit persons to whom the Software is furnished to do so, subject to the following conditions:

The above copyright notice and this permission notice shall be included in all copies or substantial portions of the Software.

THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.*/

use async_trait::async_trait;
use reqwest;
use serde_json::Value;
use std::env;

use crate::api::client::{GenerateOutcome, IdeaClient, IdeaError};
use crate::models::constants::{API_URL_ENV, DEFAULT_API_BASE, GENERATE_PATH};
use crate::models::normalize::normalize_ideas;
use crate::models::types::IdeaRequest;

/// Client for the hosted generation service. Deliberately built without a
/// request timeout: submission is single-flight and the UI keeps its
/// loading state until the server answers.
pub struct RemoteIdeaClient {
    client: reqwest::Client,
    base_url: String,
}

impl RemoteIdeaClient {
    /// Explicit base wins, then the environment override, then the hosted
    /// default.
    pub fn new(base_url: Option<String>) -> Self {
        let base_url = base_url
            .or_else(|| env::var(API_URL_ENV).ok())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), GENERATE_PATH)
    }
}

#[async_trait]
impl IdeaClient for RemoteIdeaClient {
    async fn generate(&self, request: &IdeaRequest) -> GenerateOutcome {
        let response = match self
            .client
            .post(self.endpoint())
            .json(request)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => return Err(IdeaError::Transport(format!("{}", e))),
        };

        let status = response.status();
        if !status.is_success() {
            return Err(IdeaError::Transport(format!(
                "request failed with status {}",
                status
            )));
        }

        let body = match response.json::<Value>().await {
            Ok(body) => body,
            Err(e) => return Err(IdeaError::Transport(format!("JSON parsing error: {}", e))),
        };

        extract_ideas(&body, &request.tech_stack)
    }
}

/// Pull `ideas` out of a service response body and normalize every entry.
/// Anything other than an array under that key is a malformed response.
pub fn extract_ideas(body: &Value, request_stack: &str) -> GenerateOutcome {
    match body.get("ideas").and_then(Value::as_array) {
        Some(items) => Ok(normalize_ideas(items, request_stack)),
        None => Err(IdeaError::MalformedResponse(
            "ideas is not a list".to_string(),
        )),
    }
}
