pub mod app;
pub mod widgets;

use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame, Terminal,
};
use tokio::sync::mpsc;

use crate::api::client::{GenerateOutcome, IdeaClient};
use crate::models::constants::{stack_label, CONTEXT_COUNTER_LIMIT, EVENT_POLL_MS};
use crate::models::types::IdeaRecord;
use crate::models::FormState;
use crate::utils::animations::generation_frame;

pub use self::app::{Action, App, Focus};
pub use self::widgets::{SuggestionList, ToggleSwitch};

const NEON_CYAN: Color = Color::Rgb(0, 255, 255);
const DARK_CYAN: Color = Color::Rgb(0, 128, 128);
const SYSTEM_BLUE: Color = Color::Rgb(41, 171, 226);
const NEON_YELLOW: Color = Color::Rgb(255, 255, 0);
const STARK_ACCENT: Color = Color::Rgb(0, 200, 255);
const WARNING_COLOR: Color = Color::Rgb(255, 100, 0);
const SUCCESS_COLOR: Color = Color::Rgb(0, 255, 150);

const LABEL_WIDTH: usize = 12;
const DROPDOWN_ROWS: usize = 6;

/// Event loop for the interactive form. The generation request runs on its
/// own task so drawing and typing never block on the network; the outcome
/// comes back over the channel and the guard travels with the task.
pub async fn run(client: Arc<dyn IdeaClient>, form: FormState) -> Result<(), io::Error> {
    let mut tui = Tui::new()?;
    let mut app = App::with_form(form);
    let (tx, mut rx) = mpsc::channel::<GenerateOutcome>(1);

    loop {
        tui.draw(&app)?;

        if event::poll(Duration::from_millis(EVENT_POLL_MS))? {
            if let Event::Key(key) = event::read()? {
                match app.handle_key(key) {
                    Action::Quit => break,
                    Action::Submit => {
                        if let Some((request, guard)) = app.begin_generate() {
                            let client = Arc::clone(&client);
                            let tx = tx.clone();
                            tokio::spawn(async move {
                                let _guard = guard;
                                let outcome = client.generate(&request).await;
                                let _ = tx.send(outcome).await;
                            });
                        }
                    }
                    Action::None => {}
                }
            }
        }

        while let Ok(outcome) = rx.try_recv() {
            app.apply_outcome(outcome);
        }

        app.tick();
    }

    tui.cleanup()?;
    Ok(())
}

pub struct Tui {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl Tui {
    pub fn new() -> Result<Self, io::Error> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Tui { terminal })
    }

    pub fn draw(&mut self, app: &App) -> Result<(), io::Error> {
        self.terminal.draw(|f| {
            Self::draw_frame(f, app);
        })?;
        Ok(())
    }

    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        Ok(())
    }

    fn draw_frame(f: &mut Frame, app: &App) {
        let outer = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(10),
                Constraint::Length(1),
            ])
            .split(f.size());

        Self::draw_title(f, outer[0]);

        let main = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(42), Constraint::Percentage(58)])
            .split(outer[1]);

        Self::draw_form_panel(f, app, main[0]);
        Self::draw_results_panel(f, app, main[1]);
        Self::draw_status_bar(f, app);

        if let Some(message) = &app.error {
            Self::draw_error_modal(f, message);
        }
    }

    fn draw_title(f: &mut Frame, area: Rect) {
        let title = Paragraph::new(Line::from(vec![
            Span::styled(
                "◢ H A C K G E N ◣",
                Style::default().fg(NEON_CYAN).add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(
                "saturday hacknight idea engine",
                Style::default().fg(DARK_CYAN),
            ),
        ]))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(DARK_CYAN)),
        );
        f.render_widget(title, area);
    }

    fn draw_form_panel(f: &mut Frame, app: &App, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(NEON_CYAN))
            .title(Span::styled(
                "◢ PARAMETERS ◣",
                Style::default().fg(NEON_CYAN).add_modifier(Modifier::BOLD),
            ));
        let inner = block.inner(area);
        f.render_widget(Clear, area);
        f.render_widget(block, area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(7),
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Length(3),
                Constraint::Min(0),
            ])
            .split(inner);

        Self::draw_context_field(f, app, rows[0]);
        Self::draw_time_field(f, app, rows[1]);
        Self::draw_level_field(f, app, rows[2]);
        Self::draw_difficulty_field(f, app, rows[3]);
        Self::draw_stack_field(f, app, rows[4]);
        Self::draw_ai_ml_field(f, app, rows[5]);
        Self::draw_generate_button(f, app, rows[6]);

        let hits = app.form.stack_suggestions();
        if app.suggestions_open && app.focus == Focus::TechStack && !hits.is_empty() {
            Self::draw_stack_dropdown(f, app, hits, rows[4], inner);
        }
    }

    fn draw_context_field(f: &mut Frame, app: &App, area: Rect) {
        let focused = app.focus == Focus::Context;
        let count = app.form.context.chars().count();
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Self::border_color(focused)))
            .title(Span::styled(
                format!(" CONTEXT [{}/{}] ", count, CONTEXT_COUNTER_LIMIT),
                Style::default().fg(Self::label_color(focused)),
            ));

        let mut text = app.form.context.clone();
        if focused {
            text.push('▌');
        }
        let body = Paragraph::new(text)
            .style(Style::default().fg(SYSTEM_BLUE))
            .wrap(Wrap { trim: false })
            .block(block);
        f.render_widget(body, area);
    }

    fn draw_time_field(f: &mut Frame, app: &App, area: Rect) {
        let focused = app.focus == Focus::TimeLimit;
        let value = match app.form.time_limit {
            Some(hours) => format!("{} hours", hours),
            None => "not set".to_string(),
        };
        let line = Line::from(vec![
            Self::field_label("TIME LIMIT", focused),
            Span::styled("◄ ", Style::default().fg(DARK_CYAN)),
            Span::styled(
                value,
                Style::default()
                    .fg(Self::value_color(app.form.time_limit.is_some()))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" ►", Style::default().fg(DARK_CYAN)),
        ]);
        f.render_widget(Paragraph::new(line), area);
    }

    fn draw_level_field(f: &mut Frame, app: &App, area: Rect) {
        let focused = app.focus == Focus::Level;
        let value = match app.form.hackathon_level {
            Some(level) => level.label().to_string(),
            None => "select".to_string(),
        };
        let line = Line::from(vec![
            Self::field_label("LEVEL", focused),
            Span::styled("◄ ", Style::default().fg(DARK_CYAN)),
            Span::styled(
                value,
                Style::default()
                    .fg(Self::value_color(app.form.hackathon_level.is_some()))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" ►", Style::default().fg(DARK_CYAN)),
        ]);
        f.render_widget(Paragraph::new(line), area);
    }

    fn draw_difficulty_field(f: &mut Frame, app: &App, area: Rect) {
        let focused = app.focus == Focus::Difficulty;
        let value = match app.form.difficulty_level {
            Some(level) => level.label().to_string(),
            None => "select".to_string(),
        };
        let line = Line::from(vec![
            Self::field_label("DIFFICULTY", focused),
            Span::styled("◄ ", Style::default().fg(DARK_CYAN)),
            Span::styled(
                value,
                Style::default()
                    .fg(Self::value_color(app.form.difficulty_level.is_some()))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" ►", Style::default().fg(DARK_CYAN)),
        ]);
        f.render_widget(Paragraph::new(line), area);
    }

    fn draw_stack_field(f: &mut Frame, app: &App, area: Rect) {
        let focused = app.focus == Focus::TechStack;
        let mut spans = vec![Self::field_label("TECH STACK", focused)];
        if app.form.tech_stack.is_empty() && !focused {
            spans.push(Span::styled("type or pick", Style::default().fg(DARK_CYAN)));
        } else {
            spans.push(Span::styled(
                app.form.tech_stack.clone(),
                Style::default().fg(SYSTEM_BLUE).add_modifier(Modifier::BOLD),
            ));
            if focused {
                spans.push(Span::styled("▌", Style::default().fg(NEON_YELLOW)));
            }
            let label = stack_label(&app.form.tech_stack);
            if label != app.form.tech_stack {
                spans.push(Span::styled(
                    format!("  {}", label),
                    Style::default().fg(DARK_CYAN),
                ));
            }
        }
        f.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn draw_ai_ml_field(f: &mut Frame, app: &App, area: Rect) {
        let focused = app.focus == Focus::AiMl;
        f.render_widget(
            Paragraph::new(Line::from(vec![Self::field_label("AI/ML", focused)])),
            area,
        );

        let switch_area = Rect {
            x: area.x + (LABEL_WIDTH + 2) as u16,
            y: area.y,
            width: area.width.saturating_sub((LABEL_WIDTH + 2) as u16),
            height: 1,
        };
        f.render_widget(ToggleSwitch::new(app.form.ai_ml_needed, focused), switch_area);
    }

    fn draw_generate_button(f: &mut Frame, app: &App, area: Rect) {
        let focused = app.focus == Focus::Generate;
        let (text, color) = if app.is_loading() {
            (generation_frame(app.spinner_frame).to_string(), NEON_YELLOW)
        } else if app.form.is_submittable() {
            ("⚡ GENERATE HACKATHON IDEAS".to_string(), SUCCESS_COLOR)
        } else {
            ("fill every field to generate".to_string(), DARK_CYAN)
        };

        let button = Paragraph::new(Span::styled(
            text,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Self::border_color(focused))),
        );
        f.render_widget(button, area);
    }

    fn draw_stack_dropdown(
        f: &mut Frame,
        app: &App,
        hits: Vec<(&'static str, &'static str)>,
        anchor: Rect,
        bounds: Rect,
    ) {
        let height = (hits.len().min(DROPDOWN_ROWS) + 2) as u16;
        let width = 38u16.min(bounds.width.saturating_sub(2));
        let x = (anchor.x + (LABEL_WIDTH + 2) as u16)
            .min(bounds.right().saturating_sub(width));
        let y = anchor.y + 1;
        let height = height.min(bounds.bottom().saturating_sub(y));
        if height < 3 || width < 10 {
            return;
        }

        let area = Rect { x, y, width, height };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(DARK_CYAN));
        let inner = block.inner(area);

        f.render_widget(Clear, area);
        f.render_widget(block, area);
        f.render_widget(SuggestionList::new(hits, app.suggestion_cursor), inner);
    }

    fn draw_results_panel(f: &mut Frame, app: &App, area: Rect) {
        let focused = app.focus == Focus::Results;
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(if focused { NEON_YELLOW } else { NEON_CYAN }))
            .title(Span::styled(
                "◢ IDEAS ◣",
                Style::default().fg(NEON_CYAN).add_modifier(Modifier::BOLD),
            ));
        let inner = block.inner(area);
        f.render_widget(Clear, area);
        f.render_widget(block, area);

        if app.is_loading() {
            let waiting = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    generation_frame(app.spinner_frame),
                    Style::default().fg(NEON_YELLOW).add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from(Span::styled(
                    "the mentor is thinking, results replace this panel",
                    Style::default().fg(DARK_CYAN),
                )),
            ])
            .alignment(Alignment::Center);
            f.render_widget(waiting, inner);
            return;
        }

        if app.ideas.is_empty() {
            let placeholder = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    "no ideas yet",
                    Style::default().fg(DARK_CYAN).add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    "fill the parameters and press generate",
                    Style::default().fg(DARK_CYAN),
                )),
            ])
            .alignment(Alignment::Center);
            f.render_widget(placeholder, inner);
            return;
        }

        let (lines, cursor_line) = Self::idea_lines(app);
        let scroll = cursor_line.saturating_sub((inner.height / 2) as usize) as u16;
        let list = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .scroll((scroll, 0));
        f.render_widget(list, inner);
    }

    fn idea_lines(app: &App) -> (Vec<Line<'static>>, usize) {
        let mut lines: Vec<Line<'static>> = Vec::new();
        let mut cursor_line = 0;

        lines.push(Line::from(Span::styled(
            format!("✦ {} Brilliant Ideas Generated ✦", app.ideas.len()),
            Style::default().fg(SUCCESS_COLOR).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(""));

        for (i, idea) in app.ideas.iter().enumerate() {
            if i == app.results_cursor {
                cursor_line = lines.len();
            }
            lines.push(Self::idea_header_line(app, i, idea));
            if app.expanded == Some(i) {
                Self::push_idea_detail(app, idea, &mut lines);
            }
        }

        (lines, cursor_line)
    }

    fn idea_header_line(app: &App, index: usize, idea: &IdeaRecord) -> Line<'static> {
        let selected = index == app.results_cursor && app.focus == Focus::Results;
        let marker = if app.expanded == Some(index) { "▼ " } else { "▶ " };

        let mut name_style = Style::default().fg(NEON_CYAN).add_modifier(Modifier::BOLD);
        let mut marker_style = Style::default().fg(NEON_YELLOW);
        if selected {
            name_style = name_style.bg(Color::Rgb(0, 60, 60));
            marker_style = marker_style.bg(Color::Rgb(0, 60, 60));
        }

        Line::from(vec![
            Span::styled(marker, marker_style),
            Span::styled(idea.name.clone(), name_style),
            Span::styled(
                format!("  [{}]", idea.innovation_level),
                Style::default().fg(DARK_CYAN),
            ),
        ])
    }

    fn push_idea_detail(app: &App, idea: &IdeaRecord, lines: &mut Vec<Line<'static>>) {
        lines.push(Line::from(Span::styled(
            format!("    {}", idea.description),
            Style::default().fg(SYSTEM_BLUE),
        )));

        let mut badges = vec![
            Span::styled(
                format!("    TIME {} ", idea.time_estimate),
                Style::default().fg(STARK_ACCENT),
            ),
            Span::styled(
                format!("| STACK {} ", idea.tech_stack),
                Style::default().fg(STARK_ACCENT),
            ),
            Span::styled(
                format!("| INNOVATION {}", idea.innovation_level),
                Style::default().fg(STARK_ACCENT),
            ),
        ];
        let ai_ml = app
            .last_request
            .as_ref()
            .map(|request| request.ai_ml_needed)
            .unwrap_or(false);
        if ai_ml {
            badges.push(Span::styled(
                " | AI/ML",
                Style::default().fg(NEON_YELLOW).add_modifier(Modifier::BOLD),
            ));
        }
        lines.push(Line::from(badges));

        lines.push(Line::from(Span::styled(
            "    KEY FEATURES",
            Style::default().fg(STARK_ACCENT).add_modifier(Modifier::BOLD),
        )));
        for feature in &idea.key_features {
            lines.push(Line::from(Span::styled(
                format!("      ► {}", feature),
                Style::default().fg(SYSTEM_BLUE),
            )));
        }

        lines.push(Line::from(Span::styled(
            format!("    IMPACT {}", idea.potential_impact),
            Style::default().fg(SYSTEM_BLUE),
        )));

        let difficulty = app
            .last_request
            .as_ref()
            .map(|request| request.difficulty_level.clone())
            .unwrap_or_else(|| "chosen".to_string());
        lines.push(Line::from(Span::styled(
            format!("    ✦ {}", why_this_could_win(idea, &difficulty)),
            Style::default().fg(SUCCESS_COLOR),
        )));
        lines.push(Line::from(""));
    }

    fn draw_status_bar(f: &mut Frame, app: &App) {
        let phase = if app.is_loading() {
            "◢ GENERATING ◣"
        } else if app.error.is_some() {
            "◢ ERROR ◣"
        } else if !app.ideas.is_empty() {
            "◢ IDEAS READY ◣"
        } else if app.form.is_submittable() {
            "◢ READY ◣"
        } else {
            "◢ FORM ◣"
        };

        let status_text = vec![Line::from(vec![
            Span::styled(
                phase,
                Style::default().fg(NEON_CYAN).add_modifier(Modifier::BOLD),
            ),
            Span::raw(" | "),
            Span::styled(
                format!("FIELD: {}", focus_name(app.focus)),
                Style::default().fg(SYSTEM_BLUE),
            ),
            Span::raw(" | "),
            Span::styled(
                format!("IDEAS: {}", app.ideas.len()),
                Style::default().fg(NEON_YELLOW),
            ),
            Span::raw(" | "),
            Span::styled(
                "TAB move  ◄ ► adjust  ENTER select  CTRL-C quit",
                Style::default().fg(DARK_CYAN),
            ),
        ])];

        let status_bar = Paragraph::new(status_text).style(Style::default().bg(Color::Black));

        let area = Rect {
            x: 0,
            y: f.size().height - 1,
            width: f.size().width,
            height: 1,
        };

        f.render_widget(status_bar, area);
    }

    fn draw_error_modal(f: &mut Frame, message: &str) {
        let size = f.size();
        let width = 62u16.min(size.width.saturating_sub(4));
        let height = 8u16.min(size.height.saturating_sub(2));
        if width < 20 || height < 5 {
            return;
        }
        let area = Rect {
            x: (size.width - width) / 2,
            y: (size.height - height) / 2,
            width,
            height,
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(WARNING_COLOR))
            .title(Span::styled(
                "◢ GENERATION FAILED ◣",
                Style::default().fg(WARNING_COLOR).add_modifier(Modifier::BOLD),
            ));

        let body = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                message.to_string(),
                Style::default().fg(Color::White),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "press any key to continue",
                Style::default().fg(DARK_CYAN),
            )),
        ])
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(block);

        f.render_widget(Clear, area);
        f.render_widget(body, area);
    }

    fn field_label(label: &str, focused: bool) -> Span<'static> {
        let text = if focused {
            format!("▶ {:<width$}", label, width = LABEL_WIDTH)
        } else {
            format!("  {:<width$}", label, width = LABEL_WIDTH)
        };
        Span::styled(
            text,
            Style::default()
                .fg(Self::label_color(focused))
                .add_modifier(if focused { Modifier::BOLD } else { Modifier::empty() }),
        )
    }

    fn label_color(focused: bool) -> Color {
        if focused {
            NEON_YELLOW
        } else {
            STARK_ACCENT
        }
    }

    fn border_color(focused: bool) -> Color {
        if focused {
            NEON_YELLOW
        } else {
            DARK_CYAN
        }
    }

    fn value_color(set: bool) -> Color {
        if set {
            SYSTEM_BLUE
        } else {
            DARK_CYAN
        }
    }
}

fn focus_name(focus: Focus) -> &'static str {
    match focus {
        Focus::Context => "CONTEXT",
        Focus::TimeLimit => "TIME LIMIT",
        Focus::Level => "LEVEL",
        Focus::Difficulty => "DIFFICULTY",
        Focus::TechStack => "TECH STACK",
        Focus::AiMl => "AI/ML",
        Focus::Generate => "GENERATE",
        Focus::Results => "RESULTS",
    }
}

/// Pitch line under an expanded idea, derived from the record and the
/// difficulty the request was made with.
pub fn why_this_could_win(idea: &IdeaRecord, difficulty: &str) -> String {
    format!(
        "With its {} innovation level and {} difficulty, this project stands out for its creativity and technical execution.",
        idea.innovation_level.to_lowercase(),
        difficulty
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::normalize::idea_from_raw;
    use serde_json::json;

    #[test]
    fn pitch_line_reads_from_record_and_request() {
        let idea = idea_from_raw(&json!({ "innovation_level": "High" }), "react-node");
        let text = why_this_could_win(&idea, "intermediate");
        assert_eq!(
            text,
            "With its high innovation level and intermediate difficulty, this project stands out for its creativity and technical execution."
        );
    }

    #[test]
    fn pitch_line_uses_fallback_innovation() {
        let idea = idea_from_raw(&json!({}), "react-node");
        let text = why_this_could_win(&idea, "expert");
        assert!(text.contains("medium innovation level"));
        assert!(text.contains("expert difficulty"));
    }

    #[test]
    fn every_focus_has_a_status_name() {
        for focus in [
            Focus::Context,
            Focus::TimeLimit,
            Focus::Level,
            Focus::Difficulty,
            Focus::TechStack,
            Focus::AiMl,
            Focus::Generate,
            Focus::Results,
        ] {
            assert!(!focus_name(focus).is_empty());
        }
    }
}
