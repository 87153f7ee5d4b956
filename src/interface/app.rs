// MIT License

/*Copyright (c) 2024 Based Labs

Permission is hereby granted, free of charge, to any person obtaining a copy of this software and associated documentation files (the "Software"), to deal in the Software without restriction, including without limitation the rights to use, copy, modify, merge, publish, distribute, sublicense, and/or sell copies of the Software, and to permit persons to whom the Software is furnished to do so, subject to the following conditions:

The above copyright notice and this permission notice shall be included in all copies or substantial portions of the Software.

THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.*/

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::api::client::GenerateOutcome;
use crate::models::types::{DifficultyLevel, HackathonLevel, IdeaRecord, IdeaRequest};
use crate::models::FormState;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Focus {
    Context,
    TimeLimit,
    Level,
    Difficulty,
    TechStack,
    AiMl,
    Generate,
    Results,
}

const FORM_ORDER: [Focus; 7] = [
    Focus::Context,
    Focus::TimeLimit,
    Focus::Level,
    Focus::Difficulty,
    Focus::TechStack,
    Focus::AiMl,
    Focus::Generate,
];

#[derive(Debug, PartialEq, Eq)]
pub enum Action {
    None,
    Quit,
    Submit,
}

/// Holds the shared loading flag up while alive. Dropping the guard clears
/// the flag, so no exit path out of a request can leave the UI stuck in a
/// loading state.
pub struct LoadingGuard {
    flag: Arc<AtomicBool>,
}

impl LoadingGuard {
    pub fn engage(flag: Arc<AtomicBool>) -> Self {
        flag.store(true, Ordering::SeqCst);
        LoadingGuard { flag }
    }
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

pub struct App {
    pub form: FormState,
    pub focus: Focus,
    pub suggestions_open: bool,
    pub suggestion_cursor: usize,
    pub ideas: Vec<IdeaRecord>,
    pub expanded: Option<usize>,
    pub results_cursor: usize,
    pub last_request: Option<IdeaRequest>,
    pub error: Option<String>,
    pub spinner_frame: usize,
    loading: Arc<AtomicBool>,
}

impl App {
    pub fn new() -> Self {
        Self::with_form(FormState::new())
    }

    pub fn with_form(form: FormState) -> Self {
        App {
            form,
            focus: Focus::Context,
            suggestions_open: false,
            suggestion_cursor: 0,
            ideas: Vec::new(),
            expanded: None,
            results_cursor: 0,
            last_request: None,
            error: None,
            spinner_frame: 0,
            loading: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    pub fn can_submit(&self) -> bool {
        self.form.is_submittable() && !self.is_loading()
    }

    /// Start one generation attempt: wipe previous results and the expanded
    /// selection first, then freeze a request snapshot and raise the loading
    /// flag through a guard the request task must carry.
    pub fn begin_generate(&mut self) -> Option<(IdeaRequest, LoadingGuard)> {
        if self.is_loading() {
            return None;
        }
        let request = self.form.to_request()?;
        self.ideas.clear();
        self.expanded = None;
        self.results_cursor = 0;
        self.error = None;
        self.last_request = Some(request.clone());
        let guard = LoadingGuard::engage(Arc::clone(&self.loading));
        Some((request, guard))
    }

    pub fn apply_outcome(&mut self, outcome: GenerateOutcome) {
        match outcome {
            Ok(ideas) => {
                self.ideas = ideas;
                self.results_cursor = 0;
                if !self.ideas.is_empty() {
                    self.focus = Focus::Results;
                } else if self.focus == Focus::Results {
                    // an empty batch removes the results pane from the
                    // focus cycle; leave the cursor somewhere reachable
                    self.focus = Focus::Generate;
                }
            }
            Err(e) => {
                self.error = Some(format!("Error generating ideas: {}", e));
            }
        }
    }

    /// Same index collapses, any other index switches. At most one idea is
    /// open at a time.
    pub fn toggle_expand(&mut self, index: usize) {
        self.expanded = if self.expanded == Some(index) {
            None
        } else {
            Some(index)
        };
    }

    pub fn tick(&mut self) {
        if self.is_loading() {
            self.spinner_frame = self.spinner_frame.wrapping_add(1);
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Action::Quit;
        }

        // the error popup blocks everything else until dismissed
        if self.error.is_some() {
            self.error = None;
            return Action::None;
        }

        match key.code {
            KeyCode::Tab => {
                self.focus_next();
                return Action::None;
            }
            KeyCode::BackTab => {
                self.focus_prev();
                return Action::None;
            }
            _ => {}
        }

        match self.focus {
            Focus::Context => self.key_in_context(key),
            Focus::TimeLimit => self.key_in_time_limit(key),
            Focus::Level => self.key_in_level(key),
            Focus::Difficulty => self.key_in_difficulty(key),
            Focus::TechStack => self.key_in_tech_stack(key),
            Focus::AiMl => self.key_in_ai_ml(key),
            Focus::Generate => self.key_in_generate(key),
            Focus::Results => self.key_in_results(key),
        }
    }

    fn focus_order(&self) -> Vec<Focus> {
        let mut order = FORM_ORDER.to_vec();
        if !self.ideas.is_empty() {
            order.push(Focus::Results);
        }
        order
    }

    fn focus_next(&mut self) {
        let order = self.focus_order();
        let pos = order.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.set_focus(order[(pos + 1) % order.len()]);
    }

    fn focus_prev(&mut self) {
        let order = self.focus_order();
        let pos = order.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.set_focus(order[(pos + order.len() - 1) % order.len()]);
    }

    fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
        self.suggestions_open = focus == Focus::TechStack;
        self.suggestion_cursor = 0;
    }

    fn key_in_context(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Char(ch) => self.form.context.push(ch),
            KeyCode::Enter => self.form.context.push('\n'),
            KeyCode::Backspace => {
                self.form.context.pop();
            }
            KeyCode::Down => self.focus_next(),
            KeyCode::Up => self.focus_prev(),
            _ => {}
        }
        Action::None
    }

    fn key_in_time_limit(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Right | KeyCode::Char('+') => self.form.step_time_up(),
            KeyCode::Left | KeyCode::Char('-') => self.form.step_time_down(),
            KeyCode::Down | KeyCode::Enter => self.focus_next(),
            KeyCode::Up => self.focus_prev(),
            KeyCode::Char('q') => return Action::Quit,
            _ => {}
        }
        Action::None
    }

    fn key_in_level(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Right => {
                self.form.hackathon_level = Some(match self.form.hackathon_level {
                    Some(level) => level.next(),
                    None => HackathonLevel::ALL[0],
                });
            }
            KeyCode::Left => {
                self.form.hackathon_level = Some(match self.form.hackathon_level {
                    Some(level) => level.prev(),
                    None => HackathonLevel::ALL[HackathonLevel::ALL.len() - 1],
                });
            }
            KeyCode::Down | KeyCode::Enter => self.focus_next(),
            KeyCode::Up => self.focus_prev(),
            KeyCode::Char('q') => return Action::Quit,
            _ => {}
        }
        Action::None
    }

    fn key_in_difficulty(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Right => {
                self.form.difficulty_level = Some(match self.form.difficulty_level {
                    Some(level) => level.next(),
                    None => DifficultyLevel::ALL[0],
                });
            }
            KeyCode::Left => {
                self.form.difficulty_level = Some(match self.form.difficulty_level {
                    Some(level) => level.prev(),
                    None => DifficultyLevel::ALL[DifficultyLevel::ALL.len() - 1],
                });
            }
            KeyCode::Down | KeyCode::Enter => self.focus_next(),
            KeyCode::Up => self.focus_prev(),
            KeyCode::Char('q') => return Action::Quit,
            _ => {}
        }
        Action::None
    }

    fn key_in_tech_stack(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Char(ch) => {
                self.form.tech_stack.push(ch);
                self.suggestions_open = true;
                self.suggestion_cursor = 0;
            }
            KeyCode::Backspace => {
                self.form.tech_stack.pop();
                self.suggestion_cursor = 0;
            }
            KeyCode::Down => {
                let hits = self.form.stack_suggestions().len();
                if self.suggestions_open && hits > 0 {
                    self.suggestion_cursor = (self.suggestion_cursor + 1) % hits;
                } else {
                    self.focus_next();
                }
            }
            KeyCode::Up => {
                let hits = self.form.stack_suggestions().len();
                if self.suggestions_open && hits > 0 {
                    self.suggestion_cursor = (self.suggestion_cursor + hits - 1) % hits;
                } else {
                    self.focus_prev();
                }
            }
            KeyCode::Enter => {
                if self.suggestions_open && self.accept_suggestion() {
                    return Action::None;
                }
                self.focus_next();
            }
            KeyCode::Esc => self.suggestions_open = false,
            _ => {}
        }
        Action::None
    }

    fn accept_suggestion(&mut self) -> bool {
        let hits = self.form.stack_suggestions();
        match hits.get(self.suggestion_cursor) {
            Some((value, _)) => {
                self.form.tech_stack = value.to_string();
                self.suggestions_open = false;
                true
            }
            None => false,
        }
    }

    fn key_in_ai_ml(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Left | KeyCode::Right | KeyCode::Char(' ') => {
                self.form.ai_ml_needed = !self.form.ai_ml_needed;
            }
            KeyCode::Down | KeyCode::Enter => self.focus_next(),
            KeyCode::Up => self.focus_prev(),
            KeyCode::Char('q') => return Action::Quit,
            _ => {}
        }
        Action::None
    }

    fn key_in_generate(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Enter => {
                if self.can_submit() {
                    return Action::Submit;
                }
            }
            KeyCode::Down => self.focus_next(),
            KeyCode::Up => self.focus_prev(),
            KeyCode::Char('q') => return Action::Quit,
            _ => {}
        }
        Action::None
    }

    fn key_in_results(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => {
                if !self.ideas.is_empty() {
                    self.results_cursor = (self.results_cursor + 1) % self.ideas.len();
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if !self.ideas.is_empty() {
                    self.results_cursor =
                        (self.results_cursor + self.ideas.len() - 1) % self.ideas.len();
                }
            }
            KeyCode::Enter => {
                if !self.ideas.is_empty() {
                    self.toggle_expand(self.results_cursor);
                }
            }
            KeyCode::Esc => self.set_focus(Focus::Generate),
            KeyCode::Char('q') => return Action::Quit,
            _ => {}
        }
        Action::None
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::client::IdeaError;
    use crate::models::normalize::idea_from_raw;
    use serde_json::json;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ready_app() -> App {
        let mut app = App::new();
        app.form.context = "wildfire response tooling".to_string();
        app.form.time_limit = Some(24);
        app.form.hackathon_level = Some(HackathonLevel::Regional);
        app.form.difficulty_level = Some(DifficultyLevel::Beginner);
        app.form.tech_stack = "flutter".to_string();
        app
    }

    fn some_ideas(count: usize) -> Vec<IdeaRecord> {
        (0..count)
            .map(|i| idea_from_raw(&json!({ "name": format!("Idea {}", i) }), "flutter"))
            .collect()
    }

    #[test]
    fn expand_toggles_and_switches() {
        let mut app = ready_app();
        app.ideas = some_ideas(3);

        app.toggle_expand(1);
        assert_eq!(app.expanded, Some(1));
        app.toggle_expand(1);
        assert_eq!(app.expanded, None);

        app.toggle_expand(0);
        app.toggle_expand(2);
        assert_eq!(app.expanded, Some(2));
    }

    #[test]
    fn begin_generate_clears_stale_state_first() {
        let mut app = ready_app();
        app.ideas = some_ideas(5);
        app.expanded = Some(2);
        app.results_cursor = 4;

        let (request, guard) = app.begin_generate().expect("submittable form");
        assert!(app.ideas.is_empty());
        assert_eq!(app.expanded, None);
        assert_eq!(app.results_cursor, 0);
        assert_eq!(request.tech_stack, "flutter");
        assert_eq!(app.last_request.as_ref().unwrap().time_limit, "24");
        drop(guard);
    }

    #[test]
    fn loading_flag_follows_the_guard() {
        let mut app = ready_app();
        assert!(!app.is_loading());

        let (_request, guard) = app.begin_generate().expect("submittable form");
        assert!(app.is_loading());
        assert!(!app.can_submit());
        assert!(app.begin_generate().is_none());

        drop(guard);
        assert!(!app.is_loading());
        assert!(app.can_submit());
    }

    #[test]
    fn incomplete_form_cannot_begin() {
        let mut app = App::new();
        assert!(app.begin_generate().is_none());
    }

    #[test]
    fn failed_attempt_leaves_no_ideas_and_no_loading() {
        let mut app = ready_app();
        let (_request, guard) = app.begin_generate().expect("submittable form");
        drop(guard);
        app.apply_outcome(Err(IdeaError::Transport("connection refused".to_string())));

        assert!(app.ideas.is_empty());
        assert!(!app.is_loading());
        let message = app.error.as_ref().expect("error surfaced");
        assert!(message.starts_with("Error generating ideas:"));
    }

    #[test]
    fn successful_attempt_moves_focus_to_results() {
        let mut app = ready_app();
        app.apply_outcome(Ok(some_ideas(12)));
        assert_eq!(app.ideas.len(), 12);
        assert_eq!(app.focus, Focus::Results);

        app.apply_outcome(Ok(Vec::new()));
        assert!(app.ideas.is_empty());
        assert_eq!(app.focus, Focus::Generate);
    }

    #[test]
    fn empty_batch_rehomes_focus_only_from_results() {
        let mut app = ready_app();
        app.apply_outcome(Ok(some_ideas(3)));
        assert_eq!(app.focus, Focus::Results);

        // focus must land back on a pane the tab cycle still reaches
        app.apply_outcome(Ok(Vec::new()));
        assert_eq!(app.focus, Focus::Generate);
        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.focus, Focus::Context);

        let mut app = ready_app();
        app.focus = Focus::TechStack;
        app.apply_outcome(Ok(Vec::new()));
        assert_eq!(app.focus, Focus::TechStack);
    }

    #[test]
    fn error_popup_swallows_the_dismissing_key() {
        let mut app = ready_app();
        app.error = Some("Error generating ideas: boom".to_string());
        app.focus = Focus::Generate;

        assert_eq!(app.handle_key(key(KeyCode::Enter)), Action::None);
        assert_eq!(app.error, None);
        // the next enter goes back to normal handling
        assert_eq!(app.handle_key(key(KeyCode::Enter)), Action::Submit);
    }

    #[test]
    fn ctrl_c_quits_even_under_the_popup() {
        let mut app = ready_app();
        app.error = Some("Error generating ideas: boom".to_string());
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(app.handle_key(ctrl_c), Action::Quit);
    }

    #[test]
    fn typing_stays_in_the_context_field() {
        let mut app = App::new();
        app.handle_key(key(KeyCode::Char('q')));
        app.handle_key(key(KeyCode::Char('!')));
        assert_eq!(app.form.context, "q!");
        app.handle_key(key(KeyCode::Backspace));
        assert_eq!(app.form.context, "q");
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.form.context, "q\n");
    }

    #[test]
    fn stepper_keys_adjust_time_limit() {
        let mut app = App::new();
        app.focus = Focus::TimeLimit;
        app.handle_key(key(KeyCode::Right));
        assert_eq!(app.form.time_limit, Some(2));
        app.handle_key(key(KeyCode::Right));
        app.handle_key(key(KeyCode::Left));
        app.handle_key(key(KeyCode::Left));
        assert_eq!(app.form.time_limit, Some(0));
        app.handle_key(key(KeyCode::Left));
        assert_eq!(app.form.time_limit, Some(0));
    }

    #[test]
    fn selectors_cycle_from_unset() {
        let mut app = App::new();
        app.focus = Focus::Level;
        app.handle_key(key(KeyCode::Right));
        assert_eq!(app.form.hackathon_level, Some(HackathonLevel::International));
        app.handle_key(key(KeyCode::Left));
        app.handle_key(key(KeyCode::Left));
        assert_eq!(app.form.hackathon_level, Some(HackathonLevel::Local));

        app.focus = Focus::Difficulty;
        app.handle_key(key(KeyCode::Left));
        assert_eq!(app.form.difficulty_level, Some(DifficultyLevel::Expert));
    }

    #[test]
    fn suggestion_accept_writes_the_value() {
        let mut app = App::new();
        app.set_focus(Focus::TechStack);
        assert!(app.suggestions_open);

        for ch in "python".chars() {
            app.handle_key(key(KeyCode::Char(ch)));
        }
        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.form.tech_stack, "python-django");
        assert!(!app.suggestions_open);
    }

    #[test]
    fn free_text_stack_survives_enter_without_match() {
        let mut app = App::new();
        app.set_focus(Focus::TechStack);
        for ch in "cobol".chars() {
            app.handle_key(key(KeyCode::Char(ch)));
        }
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.form.tech_stack, "cobol");
        assert_eq!(app.focus, Focus::AiMl);
    }

    #[test]
    fn results_focus_only_reachable_with_ideas() {
        let mut app = ready_app();
        app.focus = Focus::Generate;
        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.focus, Focus::Context);

        app.ideas = some_ideas(2);
        app.focus = Focus::Generate;
        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.focus, Focus::Results);
    }

    #[test]
    fn generate_enter_submits_only_when_ready() {
        let mut app = App::new();
        app.focus = Focus::Generate;
        assert_eq!(app.handle_key(key(KeyCode::Enter)), Action::None);

        let mut app = ready_app();
        app.focus = Focus::Generate;
        assert_eq!(app.handle_key(key(KeyCode::Enter)), Action::Submit);
    }

    #[test]
    fn spinner_advances_only_while_loading() {
        let mut app = ready_app();
        app.tick();
        assert_eq!(app.spinner_frame, 0);
        let (_request, guard) = app.begin_generate().expect("submittable form");
        app.tick();
        app.tick();
        assert_eq!(app.spinner_frame, 2);
        drop(guard);
    }
}
