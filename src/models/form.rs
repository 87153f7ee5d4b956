// MIT License

/*Copyright (c) 2024 Based Labs

Permission is hereby granted, free of charge, to any person obtaining a copy of this software and associated documentation files (the "Software"), to deal in the Software without restriction, including without limitation the rights to use, copy, modify, merge, publish, distribute, sublicense, and/or sell copies of the Software, and to permit persons to whom the Software is furnished to do so, subject to the following conditions:

The above copyright notice and this permission notice shall be included in all copies or substantial portions of the Software.

THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.*/

use crate::models::constants::{TECH_STACKS, TIME_STEP_HOURS};
use crate::models::types::{DifficultyLevel, HackathonLevel, IdeaRequest};

/// Mutable state behind the parameter form. Fields update independently;
/// writing one never touches another.
#[derive(Clone, Debug, Default)]
pub struct FormState {
    pub context: String,
    pub time_limit: Option<u32>,
    pub hackathon_level: Option<HackathonLevel>,
    pub difficulty_level: Option<DifficultyLevel>,
    pub tech_stack: String,
    pub ai_ml_needed: bool,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Direct assignment lands on the nearest even hour below the given
    /// value. The steppers below keep values even on their own.
    pub fn set_time_limit(&mut self, hours: u32) {
        self.time_limit = Some(hours - hours % 2);
    }

    pub fn step_time_up(&mut self) {
        self.time_limit = Some(match self.time_limit {
            Some(hours) => hours + TIME_STEP_HOURS,
            None => TIME_STEP_HOURS,
        });
    }

    pub fn step_time_down(&mut self) {
        self.time_limit = Some(match self.time_limit {
            Some(hours) => hours.saturating_sub(TIME_STEP_HOURS),
            None => 0,
        });
    }

    /// True once every gating field holds a usable value. `ai_ml_needed`
    /// never gates submission; false is a valid answer.
    pub fn is_submittable(&self) -> bool {
        !self.context.trim().is_empty()
            && self.time_limit.is_some()
            && self.hackathon_level.is_some()
            && self.difficulty_level.is_some()
            && !self.tech_stack.is_empty()
    }

    /// Owned wire snapshot of the current form, or None when the form is not
    /// submittable. The dispatcher only ever sees frozen copies.
    pub fn to_request(&self) -> Option<IdeaRequest> {
        let hours = self.time_limit?;
        let level = self.hackathon_level?;
        let difficulty = self.difficulty_level?;
        if self.context.trim().is_empty() || self.tech_stack.is_empty() {
            return None;
        }
        Some(IdeaRequest {
            context: self.context.clone(),
            time_limit: hours.to_string(),
            hackathon_level: level.value().to_string(),
            difficulty_level: difficulty.value().to_string(),
            tech_stack: self.tech_stack.clone(),
            ai_ml_needed: self.ai_ml_needed,
        })
    }

    /// Suggestions whose label contains the current tech-stack text,
    /// case-insensitive. An empty entry matches the whole catalog.
    pub fn stack_suggestions(&self) -> Vec<(&'static str, &'static str)> {
        let needle = self.tech_stack.to_lowercase();
        TECH_STACKS
            .iter()
            .copied()
            .filter(|(_, label)| label.to_lowercase().contains(&needle))
            .collect()
    }
}
