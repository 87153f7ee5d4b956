// MIT License

/*Copyright (c) 2024 Based Labs

Permission is hereby granted, free of charge, to any person obtaining a copy of this software and associated documentation files (the "Software"), to deal in the Software without restriction, including without limitation the rights to use, copy, modify, merge, publish, distribute, sublicense, and/or sell copies of the Software, and to permit persons to whom the Software is furnished to do so, subject to the following conditions:

The above copyright notice and this permission notice shall be included in all copies or substantial portions of the Software.

THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.*/

use async_trait::async_trait;
use reqwest;
use serde_json::{json, Value};
use std::env;
use std::error::Error;

use crate::api::client::{GenerateOutcome, IdeaClient, IdeaError, TextModel};
use crate::models::constants::{
    BODY_TIMEOUT_SECS, DEFAULT_TIME_LIMIT_HOURS, GEMINI_MODEL, GEMINI_TIMEOUT_SECS,
    GOOGLE_KEY_ENV, MAX_OUTPUT_TOKENS, MIN_IDEAS,
};
use crate::models::normalize::normalize_ideas;
use crate::models::types::IdeaRequest;

#[derive(Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new() -> Result<Self, Box<dyn Error>> {
        let api_key = match env::var(GOOGLE_KEY_ENV) {
            Ok(key) if !key.trim().is_empty() => key,
            _ => return Err(format!("{} environment variable not set", GOOGLE_KEY_ENV).into()),
        };
        Ok(Self::with_key(api_key))
    }

    pub fn with_key(api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            model: GEMINI_MODEL.to_string(),
        }
    }
}

#[async_trait]
impl TextModel for GeminiClient {
    async fn complete(&self, prompt: &str) -> Result<String, IdeaError> {
        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent?key={}",
            self.model, self.api_key
        );

        let payload = json!({
            "contents": [{
                "role": "user",
                "parts": [{
                    "text": prompt
                }]
            }],
            "generationConfig": {
                "temperature": 0.9,
                "topP": 0.95,
                "maxOutputTokens": MAX_OUTPUT_TOKENS
            }
        });

        let timeout_duration = std::time::Duration::from_secs(GEMINI_TIMEOUT_SECS);

        let response = match tokio::time::timeout(
            timeout_duration,
            self.client.post(&url).json(&payload).send(),
        )
        .await
        {
            Ok(result) => match result {
                Ok(response) => response,
                Err(e) => return Err(IdeaError::Transport(format!("{}", e))),
            },
            Err(_) => {
                return Err(IdeaError::Transport(format!(
                    "request timed out after {} seconds",
                    GEMINI_TIMEOUT_SECS
                )))
            }
        };

        let status = response.status();
        if !status.is_success() {
            return Err(IdeaError::Transport(format!(
                "model call failed with status {}",
                status
            )));
        }

        let json_response = match tokio::time::timeout(
            std::time::Duration::from_secs(BODY_TIMEOUT_SECS),
            response.json::<Value>(),
        )
        .await
        {
            Ok(result) => match result {
                Ok(json) => json,
                Err(e) => return Err(IdeaError::Transport(format!("JSON parsing error: {}", e))),
            },
            Err(_) => return Err(IdeaError::Transport("JSON parsing timed out".to_string())),
        };

        let text = json_response
            .get("candidates")
            .and_then(|candidates| candidates.get(0))
            .and_then(|first| first.get("content"))
            .and_then(|content| content.get("parts"))
            .and_then(|parts| parts.get(0))
            .and_then(|part| part.get("text"))
            .and_then(|text| text.as_str())
            .ok_or_else(|| {
                IdeaError::MalformedResponse("invalid model response structure".to_string())
            })?;

        Ok(text.to_string())
    }
}

#[async_trait]
impl IdeaClient for GeminiClient {
    async fn generate(&self, request: &IdeaRequest) -> GenerateOutcome {
        let ideas = generate_raw_ideas(self, request).await?;
        Ok(normalize_ideas(&ideas, &request.tech_stack))
    }
}

/// Full generation pipeline: prompt, model call, fence cleanup, JSON parse,
/// idea-count floor. Shared by the HTTP service and the direct client.
pub async fn generate_raw_ideas(
    model: &dyn TextModel,
    request: &IdeaRequest,
) -> Result<Vec<Value>, IdeaError> {
    let prompt = build_prompt(request);
    let text = model.complete(&prompt).await?;

    let cleaned = strip_code_fences(&text);
    let parsed: Value = match serde_json::from_str(cleaned) {
        Ok(value) => value,
        Err(e) => {
            return Err(IdeaError::MalformedResponse(format!(
                "model output is not JSON: {}",
                e
            )))
        }
    };

    let ideas = match parsed {
        Value::Array(items) => items,
        _ => {
            return Err(IdeaError::MalformedResponse(
                "model did not return a JSON array".to_string(),
            ))
        }
    };

    if ideas.len() < MIN_IDEAS {
        return Err(IdeaError::MalformedResponse(
            "Not enough ideas generated".to_string(),
        ));
    }

    Ok(ideas)
}

pub fn build_prompt(request: &IdeaRequest) -> String {
    let time_hours = time_limit_hours(&request.time_limit);
    let ai_ml = if request.ai_ml_needed { "Yes" } else { "No" };

    format!(
        r#"You are an expert hackathon mentor with 15+ years of experience judging top international hackathons.
Generate 12-15 comprehensive hackathon project ideas for the following specifications:

CONTEXT/THEME: {context}
HACKATHON LEVEL: {level}
DIFFICULTY LEVEL: {difficulty}
PREFERRED TECH STACK: {stack}
AI/ML REQUIRED: {ai_ml}
TIME LIMIT: {hours} hours

For each idea, provide the following structured information:
1. name: Creative and catchy project name
2. description: 2-3 sentence description of the project
3. time_estimate: Realistic time estimate for completion
4. tech_stack: Specific technologies to be used
5. innovation_level: Low/Medium/High (based on novelty)
6. potential_impact: Who benefits and how
7. key_features: Array of 4-5 key features/functionalities

Structure each idea as a JSON object with these exact field names.
Return ONLY a JSON array of these idea objects, with no additional text or explanation.

Example of one idea object:
{{
  "name": "EcoRoute Optimizer",
  "description": "A carbon-footprint aware navigation system that suggests the most eco-friendly routes for vehicles while considering time constraints.",
  "time_estimate": "40-50 hours",
  "tech_stack": "React Native, Python Flask, Mapbox API",
  "innovation_level": "High",
  "potential_impact": "Reduces carbon emissions for daily commuters and logistics companies",
  "key_features": [
    "Real-time traffic and emissions data integration",
    "Personalized eco-routing preferences",
    "Carbon savings dashboard",
    "Multi-modal transportation options"
  ]
}}

Now generate 12-15 such comprehensive ideas:"#,
        context = request.context,
        level = request.hackathon_level,
        difficulty = request.difficulty_level,
        stack = request.tech_stack,
        ai_ml = ai_ml,
        hours = time_hours,
    )
}

/// Preset strings map to their hour counts; anything else parses as a bare
/// hour number, defaulting when it does not.
pub fn time_limit_hours(raw: &str) -> u32 {
    match raw.trim() {
        "24h" => 24,
        "48h" => 48,
        "72h" => 72,
        "1week" => 168,
        other => other.parse().unwrap_or(DEFAULT_TIME_LIMIT_HOURS),
    }
}

/// Models like to wrap JSON in markdown fences; peel them off.
pub fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    if let Some(inner) = trimmed
        .strip_prefix("```json")
        .and_then(|rest| rest.strip_suffix("```"))
    {
        return inner.trim();
    }
    if let Some(inner) = trimmed
        .strip_prefix("```")
        .and_then(|rest| rest.strip_suffix("```"))
    {
        return inner.trim();
    }
    trimmed
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ScriptedModel {
        reply: String,
    }

    #[async_trait]
    impl TextModel for ScriptedModel {
        async fn complete(&self, _prompt: &str) -> Result<String, IdeaError> {
            Ok(self.reply.clone())
        }
    }

    fn idea_array_json(count: usize) -> String {
        let ideas: Vec<Value> = (0..count)
            .map(|i| json!({ "name": format!("Idea {}", i) }))
            .collect();
        Value::Array(ideas).to_string()
    }

    fn sample_request() -> IdeaRequest {
        IdeaRequest {
            context: "disaster relief logistics".to_string(),
            time_limit: "48".to_string(),
            hackathon_level: "international".to_string(),
            difficulty_level: "advanced".to_string(),
            tech_stack: "python-flask".to_string(),
            ai_ml_needed: true,
        }
    }

    #[test]
    fn fences_come_off_json_blocks() {
        assert_eq!(strip_code_fences("```json\n[1, 2]\n```"), "[1, 2]");
        assert_eq!(strip_code_fences("```\n[1, 2]\n```"), "[1, 2]");
        assert_eq!(strip_code_fences("  [1, 2]  "), "[1, 2]");
        assert_eq!(strip_code_fences("```json[]```"), "[]");
    }

    #[test]
    fn unterminated_fences_stay_untouched() {
        assert_eq!(strip_code_fences("```json\n[1, 2]"), "```json\n[1, 2]");
    }

    #[test]
    fn preset_time_limits_map_to_hours() {
        assert_eq!(time_limit_hours("24h"), 24);
        assert_eq!(time_limit_hours("48h"), 48);
        assert_eq!(time_limit_hours("72h"), 72);
        assert_eq!(time_limit_hours("1week"), 168);
        assert_eq!(time_limit_hours("36"), 36);
        assert_eq!(time_limit_hours("banana"), 24);
        assert_eq!(time_limit_hours(""), 24);
    }

    #[test]
    fn prompt_carries_every_parameter() {
        let prompt = build_prompt(&sample_request());
        assert!(prompt.contains("CONTEXT/THEME: disaster relief logistics"));
        assert!(prompt.contains("HACKATHON LEVEL: international"));
        assert!(prompt.contains("DIFFICULTY LEVEL: advanced"));
        assert!(prompt.contains("PREFERRED TECH STACK: python-flask"));
        assert!(prompt.contains("AI/ML REQUIRED: Yes"));
        assert!(prompt.contains("TIME LIMIT: 48 hours"));

        let mut request = sample_request();
        request.ai_ml_needed = false;
        request.time_limit = "1week".to_string();
        let prompt = build_prompt(&request);
        assert!(prompt.contains("AI/ML REQUIRED: No"));
        assert!(prompt.contains("TIME LIMIT: 168 hours"));
    }

    #[tokio::test]
    async fn pipeline_accepts_a_full_fenced_batch() {
        let model = ScriptedModel {
            reply: format!("```json\n{}\n```", idea_array_json(12)),
        };
        let ideas = generate_raw_ideas(&model, &sample_request()).await.unwrap();
        assert_eq!(ideas.len(), 12);
        assert_eq!(ideas[0]["name"], "Idea 0");
    }

    #[tokio::test]
    async fn pipeline_rejects_thin_batches() {
        let model = ScriptedModel {
            reply: idea_array_json(3),
        };
        let err = generate_raw_ideas(&model, &sample_request())
            .await
            .unwrap_err();
        match err {
            IdeaError::MalformedResponse(msg) => {
                assert!(msg.contains("Not enough ideas generated"))
            }
            other => panic!("expected MalformedResponse, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn pipeline_rejects_non_json_chatter() {
        let model = ScriptedModel {
            reply: "Sure! Here are some ideas:".to_string(),
        };
        let err = generate_raw_ideas(&model, &sample_request())
            .await
            .unwrap_err();
        assert!(matches!(err, IdeaError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn pipeline_rejects_json_objects() {
        let model = ScriptedModel {
            reply: r#"{"ideas": []}"#.to_string(),
        };
        let err = generate_raw_ideas(&model, &sample_request())
            .await
            .unwrap_err();
        assert!(matches!(err, IdeaError::MalformedResponse(_)));
    }
}
