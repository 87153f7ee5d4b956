// MIT License

/*Copyright (c) 2024 Based Labs

Permission is hereby granted, free of charge, to any person obtaining a copy of this software and associated documentation files (the "Software"), to deal in the Software without restriction, including without limitation the rights to use, copy, modify, merge, publish, distribute, sublicense, and/or sell copies of the Software, and to permit persons to whom the Software is furnished to do so, subject to the following conditions:

The above copyright notice and this permission notice shall be included in all copies or substantial portions of the Software.

THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.*/

use lazy_static::lazy_static;
use std::collections::HashMap;

pub const DEFAULT_API_BASE: &str = "https://saturdayhacknight.onrender.com";
pub const GENERATE_PATH: &str = "/generate-ideas";
pub const DEFAULT_SERVER_PORT: u16 = 3030;
pub const API_URL_ENV: &str = "HACKGEN_API_URL";
pub const GOOGLE_KEY_ENV: &str = "GOOGLE_API_KEY";

// Form constants
pub const TIME_STEP_HOURS: u32 = 2;
pub const CONTEXT_COUNTER_LIMIT: usize = 500;

// Timing constants
pub const EVENT_POLL_MS: u64 = 50;
pub const GEMINI_TIMEOUT_SECS: u64 = 30;
pub const BODY_TIMEOUT_SECS: u64 = 5;

// Generation constants
pub const GEMINI_MODEL: &str = "gemini-2.5-flash";
pub const MAX_OUTPUT_TOKENS: usize = 8192;
pub const MIN_IDEAS: usize = 10;
pub const DEFAULT_TIME_LIMIT_HOURS: u32 = 24;

// Normalization fallbacks
pub const FALLBACK_NAME_PREFIX: &str = "Hackathon Idea";
pub const FALLBACK_NAME_SPAN: u32 = 1000;
pub const FALLBACK_DESCRIPTION: &str = "No description provided";
pub const FALLBACK_TIME_ESTIMATE: &str = "Time estimate not specified";
pub const FALLBACK_INNOVATION: &str = "Medium";
pub const FALLBACK_IMPACT: &str = "Significant potential impact in target domain";
pub const FALLBACK_FEATURES: [&str; 4] = [
    "Innovative solution approach",
    "User-friendly interface",
    "Scalable architecture",
    "Real-world applicability",
];

// Tech stack suggestions as (value, label), in display order
pub const TECH_STACKS: [(&str, &str); 10] = [
    ("react-node", "React + Node.js"),
    ("vue-express", "Vue.js + Express"),
    ("angular-dotnet", "Angular + .NET"),
    ("python-flask", "Python + Flask"),
    ("python-django", "Python + Django"),
    ("react-native", "React Native"),
    ("flutter", "Flutter"),
    ("nextjs", "Next.js"),
    ("svelte", "Svelte/SvelteKit"),
    ("fullstack-js", "Full Stack JavaScript"),
];

lazy_static! {
    static ref TECH_STACK_LABELS: HashMap<&'static str, &'static str> =
        TECH_STACKS.iter().copied().collect();
}

/// Display label for a stack value; free-text entries show as themselves.
pub fn stack_label(value: &str) -> &str {
    TECH_STACK_LABELS.get(value).copied().unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_stack_values_map_to_labels() {
        assert_eq!(stack_label("react-node"), "React + Node.js");
        assert_eq!(stack_label("svelte"), "Svelte/SvelteKit");
    }

    #[test]
    fn free_text_stacks_display_unchanged() {
        assert_eq!(stack_label("cobol-on-wheels"), "cobol-on-wheels");
    }
}
