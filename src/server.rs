// MIT License

/*Copyright (c) 2024 Based Labs

Permission is hereby granted, free of charge, to any person obtaining a copy of this software and associated documentation files (the "Software"), to deal in the Software without restriction, including without limitation the rights to use, copy, modify, merge, publish, distribute, sublicense, and/or sell copies of the Software, and to permit persons to whom the Software is furnished to do so, subject to the following conditions:

The above copyright notice and this permission notice shall be included in all copies or substantial portions of the Software.

THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.*/

use std::convert::Infallible;
use std::sync::Arc;

use serde_json::json;
use tokio::sync::broadcast;
use warp::http::StatusCode;
use warp::Filter;

use crate::api::client::TextModel;
use crate::api::gemini::generate_raw_ideas;
use crate::models::types::IdeaRequest;
use crate::utils::logging::{log_error, log_info, log_success, log_timestamp};

pub async fn start_server(
    model: Arc<dyn TextModel>,
    port: u16,
    mut shutdown_signal: broadcast::Receiver<()>,
) {
    let route = ideas_route(model);
    let server = warp::serve(route).run(([127, 0, 0, 1], port));

    log_success(&format!("idea server listening on 127.0.0.1:{}", port));

    tokio::select! {
        _ = server => {},
        _ = shutdown_signal.recv() => {
            log_info("idea server shutting down");
        }
    }
}

/// POST /generate-ideas with an IdeaRequest body. A good batch comes back
/// as {"ideas": [...]} exactly as the model produced it; any pipeline
/// failure becomes a 500 with a detail message. CORS stays wide open so
/// browser frontends can call a local instance.
pub fn ideas_route(
    model: Arc<dyn TextModel>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    let model_filter = warp::any().map(move || Arc::clone(&model));

    let cors = warp::cors()
        .allow_any_origin()
        .allow_headers(vec!["content-type"])
        .allow_methods(vec!["POST"]);

    warp::path("generate-ideas")
        .and(warp::post())
        .and(warp::body::json())
        .and(model_filter)
        .and_then(handle_generate)
        .with(cors)
}

async fn handle_generate(
    request: IdeaRequest,
    model: Arc<dyn TextModel>,
) -> Result<impl warp::Reply, Infallible> {
    log_timestamp(&format!(
        "generate-ideas <- level:{} difficulty:{} stack:{}",
        request.hackathon_level, request.difficulty_level, request.tech_stack
    ));

    match generate_raw_ideas(model.as_ref(), &request).await {
        Ok(ideas) => {
            log_info(&format!("returning {} ideas", ideas.len()));
            Ok(warp::reply::with_status(
                warp::reply::json(&json!({ "ideas": ideas })),
                StatusCode::OK,
            ))
        }
        Err(e) => {
            log_error(&format!("Error generating ideas: {}", e));
            let detail = format!(
                "Failed to generate ideas: {}. Please try again with more specific parameters.",
                e
            );
            Ok(warp::reply::with_status(
                warp::reply::json(&json!({ "detail": detail })),
                StatusCode::INTERNAL_SERVER_ERROR,
            ))
        }
    }
}
