// MIT License

/*Copyright (c) 2024 Based Labs

Permission is hereby granted, free of charge, to any person obtaining a copy of this software and associated documentation files (the "Software"), to deal in the Software without restriction, including without limitation the rights to use, copy, modify, merge, publish, distribute, sublicense, and/or sell copies of the Software, and to permit persons to whom the Software is furnished to do so, subject to the following conditions:

The above copyright notice and this permission notice shall be included in all copies or substantial portions of the Software.

THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.*/

mod api;
mod interface;
mod models;
mod server;
mod utils;

use std::sync::Arc;

use clap::{App, Arg, ArgMatches};
use tokio::signal::ctrl_c;
use tokio::sync::broadcast;

use crate::api::gemini::{time_limit_hours, GeminiClient};
use crate::api::remote::RemoteIdeaClient;
use crate::api::IdeaClient;
use crate::interface::why_this_could_win;
use crate::models::constants::{stack_label, DEFAULT_SERVER_PORT};
use crate::models::types::{DifficultyLevel, HackathonLevel, IdeaRecord, IdeaRequest};
use crate::models::FormState;
use crate::utils::animations::{clear_animation_line, update_generation_animation};
use crate::utils::logging::{
    log_error, log_footer, log_header, log_info, log_metric, log_section_footer,
    log_section_header, log_success, print_banner,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let matches = App::new("hackgen")
        .version("0.1.0")
        .author("Saturday Hacknight")
        .about("Hackathon idea generator: interactive form, headless client, or generation service")
        .arg(
            Arg::with_name("plain")
                .long("plain")
                .help("One-shot headless run; field values come from the flags below")
                .takes_value(false),
        )
        .arg(
            Arg::with_name("serve")
                .long("serve")
                .help("Run the generation service instead of the form")
                .takes_value(false),
        )
        .arg(
            Arg::with_name("direct")
                .long("direct")
                .help("Call the Gemini API in process instead of the hosted service")
                .takes_value(false),
        )
        .arg(
            Arg::with_name("port")
                .short('p')
                .long("port")
                .value_name("PORT")
                .help("Port for --serve (default: 3030)")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("api-url")
                .long("api-url")
                .value_name("URL")
                .help("Generation service base URL (overrides HACKGEN_API_URL)")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("context")
                .short('c')
                .long("context")
                .value_name("TEXT")
                .help("Hackathon context or theme")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("time-limit")
                .short('t')
                .long("time-limit")
                .value_name("HOURS")
                .help("Time limit in hours, or a preset (24h, 48h, 72h, 1week)")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("level")
                .short('l')
                .long("level")
                .value_name("LEVEL")
                .help("Hackathon level: international, national, regional, local, university")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("difficulty")
                .short('d')
                .long("difficulty")
                .value_name("LEVEL")
                .help("Difficulty: beginner, intermediate, advanced, expert")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("tech-stack")
                .short('s')
                .long("tech-stack")
                .value_name("STACK")
                .help("Preferred tech stack, free text or a suggestion value like react-node")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("ai-ml")
                .long("ai-ml")
                .help("Require an AI/ML component")
                .takes_value(false),
        )
        .get_matches();

    if matches.is_present("serve") {
        let port = matches
            .value_of("port")
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_SERVER_PORT);
        return run_server(port).await;
    }

    let client: Arc<dyn IdeaClient> = if matches.is_present("direct") {
        Arc::new(gemini_client()?)
    } else {
        Arc::new(RemoteIdeaClient::new(
            matches.value_of("api-url").map(String::from),
        ))
    };

    let form = form_from_flags(&matches)?;

    if matches.is_present("plain") {
        run_plain(client, form).await
    } else {
        interface::run(client, form).await?;
        Ok(())
    }
}

async fn run_server(port: u16) -> Result<(), Box<dyn std::error::Error>> {
    print_banner();
    let model = Arc::new(gemini_client()?);

    let (shutdown_tx, shutdown_rx) = broadcast::channel(1);
    tokio::spawn(async move {
        if ctrl_c().await.is_ok() {
            let _ = shutdown_tx.send(());
        }
    });

    server::start_server(model, port, shutdown_rx).await;
    Ok(())
}

async fn run_plain(
    client: Arc<dyn IdeaClient>,
    form: FormState,
) -> Result<(), Box<dyn std::error::Error>> {
    print_banner();

    let request = match form.to_request() {
        Some(request) => request,
        None => {
            log_error(
                "plain mode needs --context, --time-limit, --level, --difficulty and --tech-stack",
            );
            std::process::exit(1);
        }
    };

    log_header("IDEA REQUEST");
    log_metric("context chars", request.context.chars().count());
    log_metric("time limit", format!("{} hours", request.time_limit));
    log_metric("level", &request.hackathon_level);
    log_metric("difficulty", &request.difficulty_level);
    log_metric("tech stack", stack_label(&request.tech_stack));
    log_metric("ai/ml", if request.ai_ml_needed { "yes" } else { "no" });
    log_footer();

    let task_client = Arc::clone(&client);
    let task_request = request.clone();
    let handle = tokio::spawn(async move { task_client.generate(&task_request).await });

    let mut frame = 0;
    while !handle.is_finished() {
        update_generation_animation(frame).await;
        frame += 1;
    }
    clear_animation_line();

    match handle.await? {
        Ok(ideas) => {
            print_ideas(&ideas, &request);
            Ok(())
        }
        Err(e) => {
            log_error(&format!("Error generating ideas: {}", e));
            std::process::exit(1);
        }
    }
}

fn print_ideas(ideas: &[IdeaRecord], request: &IdeaRequest) {
    for idea in ideas {
        log_section_header(&idea.name);
        log_info(&idea.description);
        log_metric("time estimate", &idea.time_estimate);
        log_metric("tech stack", &idea.tech_stack);
        log_metric("innovation", &idea.innovation_level);
        for feature in &idea.key_features {
            log_info(&format!("► {}", feature));
        }
        log_info(&format!("IMPACT {}", idea.potential_impact));
        log_info(&why_this_could_win(idea, &request.difficulty_level));
        log_section_footer();
    }
    log_success(&format!("✦ {} Brilliant Ideas Generated ✦", ideas.len()));
}

/// Pre-seed the form from the CLI flags. Unknown enum values are a hard
/// error rather than a silent unset field.
fn form_from_flags(matches: &ArgMatches) -> Result<FormState, Box<dyn std::error::Error>> {
    let mut form = FormState::new();

    if let Some(context) = matches.value_of("context") {
        form.context = context.to_string();
    }
    if let Some(raw) = matches.value_of("time-limit") {
        form.set_time_limit(time_limit_hours(raw));
    }
    if let Some(raw) = matches.value_of("level") {
        let level = HackathonLevel::parse(raw).ok_or_else(|| {
            format!(
                "unknown hackathon level '{}'; expected international, national, regional, local or university",
                raw
            )
        })?;
        form.hackathon_level = Some(level);
    }
    if let Some(raw) = matches.value_of("difficulty") {
        let difficulty = DifficultyLevel::parse(raw).ok_or_else(|| {
            format!(
                "unknown difficulty '{}'; expected beginner, intermediate, advanced or expert",
                raw
            )
        })?;
        form.difficulty_level = Some(difficulty);
    }
    if let Some(stack) = matches.value_of("tech-stack") {
        form.tech_stack = stack.to_string();
    }
    form.ai_ml_needed = matches.is_present("ai-ml");

    Ok(form)
}

fn gemini_client() -> Result<GeminiClient, Box<dyn std::error::Error>> {
    match GeminiClient::new() {
        Ok(client) => Ok(client),
        Err(e) => {
            eprintln!(
                "
╔════════════════════════════════════════════════════════════════╗
║                         ERROR                                  ║
║ GOOGLE_API_KEY environment variable is not set                 ║
║                                                                ║
║ Please set it by running:                                      ║
║ export GOOGLE_API_KEY='your-api-key'                           ║
║                                                                ║
║ You can get an API key from:                                   ║
║ https://aistudio.google.com/apikey                             ║
╚════════════════════════════════════════════════════════════════╝
"
            );
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli() -> App<'static> {
        App::new("hackgen-test")
            .arg(Arg::with_name("context").long("context").takes_value(true))
            .arg(
                Arg::with_name("time-limit")
                    .long("time-limit")
                    .takes_value(true),
            )
            .arg(Arg::with_name("level").long("level").takes_value(true))
            .arg(
                Arg::with_name("difficulty")
                    .long("difficulty")
                    .takes_value(true),
            )
            .arg(
                Arg::with_name("tech-stack")
                    .long("tech-stack")
                    .takes_value(true),
            )
            .arg(Arg::with_name("ai-ml").long("ai-ml").takes_value(false))
    }

    #[test]
    fn full_flag_set_builds_a_submittable_form() {
        let matches = cli().get_matches_from(vec![
            "hackgen-test",
            "--context",
            "rural telehealth",
            "--time-limit",
            "48h",
            "--level",
            "national",
            "--difficulty",
            "advanced",
            "--tech-stack",
            "python-flask",
            "--ai-ml",
        ]);
        let form = form_from_flags(&matches).unwrap();
        assert!(form.is_submittable());
        assert_eq!(form.time_limit, Some(48));
        assert_eq!(form.hackathon_level, Some(HackathonLevel::National));
        assert_eq!(form.difficulty_level, Some(DifficultyLevel::Advanced));
        assert!(form.ai_ml_needed);
    }

    #[test]
    fn preset_and_odd_time_limits_land_on_even_hours() {
        let matches = cli().get_matches_from(vec!["hackgen-test", "--time-limit", "1week"]);
        assert_eq!(form_from_flags(&matches).unwrap().time_limit, Some(168));

        let matches = cli().get_matches_from(vec!["hackgen-test", "--time-limit", "37"]);
        assert_eq!(form_from_flags(&matches).unwrap().time_limit, Some(36));
    }

    #[test]
    fn unknown_enum_values_are_rejected() {
        let matches = cli().get_matches_from(vec!["hackgen-test", "--level", "galactic"]);
        assert!(form_from_flags(&matches).is_err());

        let matches = cli().get_matches_from(vec!["hackgen-test", "--difficulty", "insane"]);
        assert!(form_from_flags(&matches).is_err());
    }

    #[test]
    fn missing_flags_leave_the_form_unsubmittable() {
        let matches = cli().get_matches_from(vec!["hackgen-test", "--context", "x"]);
        let form = form_from_flags(&matches).unwrap();
        assert!(!form.is_submittable());
        assert_eq!(form.time_limit, None);
        assert!(!form.ai_ml_needed);
    }
}
