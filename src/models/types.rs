// MIT License

/*Copyright (c) 2024 Based Labs

Permission is hereby granted, free of charge, to any person obtaining a copy of this software and associated documentation files (the "Software"), to deal in the Software without restriction, including without limitation the rights to use, copy, modify, merge, publish, distribute, sublicense, and/or sell copies of the Software, and to permit persons to whom the Software is furnished to do so, subject to the following conditions:

The above copyright notice and this permission notice shall be included in all copies or substantial portions of the Software.

THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.*/

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HackathonLevel {
    International,
    National,
    Regional,
    Local,
    University,
}

impl HackathonLevel {
    pub const ALL: [HackathonLevel; 5] = [
        HackathonLevel::International,
        HackathonLevel::National,
        HackathonLevel::Regional,
        HackathonLevel::Local,
        HackathonLevel::University,
    ];

    pub fn value(&self) -> &'static str {
        match self {
            HackathonLevel::International => "international",
            HackathonLevel::National => "national",
            HackathonLevel::Regional => "regional",
            HackathonLevel::Local => "local",
            HackathonLevel::University => "university",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            HackathonLevel::International => "International",
            HackathonLevel::National => "National",
            HackathonLevel::Regional => "Regional",
            HackathonLevel::Local => "Local",
            HackathonLevel::University => "University",
        }
    }

    pub fn parse(value: &str) -> Option<HackathonLevel> {
        Self::ALL.iter().copied().find(|l| l.value() == value)
    }

    pub fn next(self) -> HackathonLevel {
        let pos = Self::ALL.iter().position(|l| *l == self).unwrap_or(0);
        Self::ALL[(pos + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> HackathonLevel {
        let pos = Self::ALL.iter().position(|l| *l == self).unwrap_or(0);
        Self::ALL[(pos + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyLevel {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl DifficultyLevel {
    pub const ALL: [DifficultyLevel; 4] = [
        DifficultyLevel::Beginner,
        DifficultyLevel::Intermediate,
        DifficultyLevel::Advanced,
        DifficultyLevel::Expert,
    ];

    pub fn value(&self) -> &'static str {
        match self {
            DifficultyLevel::Beginner => "beginner",
            DifficultyLevel::Intermediate => "intermediate",
            DifficultyLevel::Advanced => "advanced",
            DifficultyLevel::Expert => "expert",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DifficultyLevel::Beginner => "Beginner",
            DifficultyLevel::Intermediate => "Intermediate",
            DifficultyLevel::Advanced => "Advanced",
            DifficultyLevel::Expert => "Expert",
        }
    }

    pub fn parse(value: &str) -> Option<DifficultyLevel> {
        Self::ALL.iter().copied().find(|d| d.value() == value)
    }

    pub fn next(self) -> DifficultyLevel {
        let pos = Self::ALL.iter().position(|d| *d == self).unwrap_or(0);
        Self::ALL[(pos + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> DifficultyLevel {
        let pos = Self::ALL.iter().position(|d| *d == self).unwrap_or(0);
        Self::ALL[(pos + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Wire payload for one generation request. Field names match the service
/// contract; `time_limit` travels as a string because the service also
/// accepts preset values like "48h" and "1week".
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IdeaRequest {
    pub context: String,
    pub time_limit: String,
    pub hackathon_level: String,
    pub difficulty_level: String,
    pub tech_stack: String,
    pub ai_ml_needed: bool,
}

/// One generated idea after normalization. Every field is populated; the
/// renderer never has to handle a missing value.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IdeaRecord {
    pub name: String,
    pub description: String,
    pub time_estimate: String,
    pub tech_stack: String,
    pub innovation_level: String,
    pub potential_impact: String,
    pub key_features: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_values_round_trip() {
        for level in HackathonLevel::ALL {
            assert_eq!(HackathonLevel::parse(level.value()), Some(level));
        }
        for difficulty in DifficultyLevel::ALL {
            assert_eq!(DifficultyLevel::parse(difficulty.value()), Some(difficulty));
        }
        assert_eq!(HackathonLevel::parse("galactic"), None);
    }

    #[test]
    fn level_cycling_wraps() {
        assert_eq!(HackathonLevel::University.next(), HackathonLevel::International);
        assert_eq!(HackathonLevel::International.prev(), HackathonLevel::University);
        assert_eq!(DifficultyLevel::Expert.next(), DifficultyLevel::Beginner);
        assert_eq!(DifficultyLevel::Beginner.prev(), DifficultyLevel::Expert);
    }

    #[test]
    fn request_serializes_with_wire_field_names() {
        let request = IdeaRequest {
            context: "campus sustainability".to_string(),
            time_limit: "48".to_string(),
            hackathon_level: "national".to_string(),
            difficulty_level: "intermediate".to_string(),
            tech_stack: "react-node".to_string(),
            ai_ml_needed: true,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["time_limit"], "48");
        assert_eq!(value["hackathon_level"], "national");
        assert_eq!(value["ai_ml_needed"], true);
    }
}
