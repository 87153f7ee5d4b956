// MIT License

/*Copyright (c) 2024 Based Labs

Permission is hereby granted, free of charge, to any person obtaining a copy of this software and associated documentation files (the "Software"), to deal in the Software without restriction, including without limitation the rights to use, copy, modify, merge, publish, distribute, sublicense, and/or sell copies of the Software, and to permit persons to whom the Software is furnished to do so, subject to the following conditions:

The above copyright notice and this permission notice shall be included in all copies or substantial portions of the Software.

THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.*/

use async_trait::async_trait;

use crate::models::types::{IdeaRecord, IdeaRequest};

/// Failure modes of one generation attempt. Transport covers everything on
/// the way to a parsed body; MalformedResponse means the body arrived but
/// the ideas payload has the wrong shape.
#[derive(Debug)]
pub enum IdeaError {
    Transport(String),
    MalformedResponse(String),
}

impl std::error::Error for IdeaError {}

impl std::fmt::Display for IdeaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IdeaError::Transport(msg) => write!(f, "Request error: {}", msg),
            IdeaError::MalformedResponse(msg) => {
                write!(f, "Unexpected response format: {}", msg)
            }
        }
    }
}

pub type GenerateOutcome = Result<Vec<IdeaRecord>, IdeaError>;

/// One form snapshot in, normalized records out. Implementations own their
/// transport; callers only see the outcome.
#[async_trait]
pub trait IdeaClient: Send + Sync {
    async fn generate(&self, request: &IdeaRequest) -> GenerateOutcome;
}

/// Raw prompt-to-text completion, kept behind a trait so the generation
/// pipeline and the HTTP route can run against a scripted model in tests.
#[async_trait]
pub trait TextModel: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, IdeaError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_variants_render_distinct_messages() {
        let transport = IdeaError::Transport("connection refused".to_string());
        let malformed = IdeaError::MalformedResponse("ideas is not a list".to_string());
        let transport_text = transport.to_string();
        let malformed_text = malformed.to_string();
        assert!(transport_text.contains("Request error"));
        assert!(malformed_text.contains("Unexpected response format"));
        assert_ne!(transport_text, malformed_text);
    }
}
