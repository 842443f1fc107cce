//! Local audio preview server for `ezlo audio`.
//!
//! One page with a text box; submitting it synthesizes speech and swaps in an
//! `<audio>` player. Every request writes its own `<uuid>.mp3`, so two tabs
//! submitting at once never overwrite each other's output.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    Form, Router,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use serde::Deserialize;
use tower_http::services::ServeDir;

use crate::generation::GenerationClient;

pub const DEFAULT_PORT: u16 = 3000;

const EMPTY_PLAYER: &str = r#"<audio controls id="audio"></audio>"#;

const INDEX_HTML: &str = r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>ezlo audio</title>
  <style>
    body { font-family: system-ui, sans-serif; max-width: 48rem; margin: 2rem auto; }
    textarea { width: 100%; min-height: 16rem; }
  </style>
</head>
<body>
  <h1>Audio generator</h1>
  <form id="form" action="/generate" method="post">
    <textarea name="text" placeholder="Paste article text here"></textarea>
    <p><button type="submit">Generate</button></p>
  </form>
  <div id="player"><audio controls id="audio"></audio></div>
  <script>
    const form = document.getElementById('form');
    form.addEventListener('submit', async (event) => {
      event.preventDefault();
      const body = new URLSearchParams(new FormData(form));
      const resp = await fetch('/generate', { method: 'POST', body });
      document.getElementById('player').innerHTML = await resp.text();
    });
  </script>
</body>
</html>
"#;

/// Configuration for the preview server.
pub struct PreviewConfig {
    pub port: u16,
    pub audio_dir: PathBuf,
}

pub struct PreviewState {
    pub client: Arc<dyn GenerationClient>,
    pub audio_dir: PathBuf,
}

#[derive(Debug, Deserialize)]
struct GenerateForm {
    #[serde(default)]
    text: Option<String>,
}

pub fn build_router(state: Arc<PreviewState>) -> Router {
    let audio = ServeDir::new(&state.audio_dir);
    Router::new()
        .route("/", get(index_handler))
        .route("/generate", post(generate_handler))
        .nest_service("/audio", audio)
        .with_state(state)
}

async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn generate_handler(
    State(state): State<Arc<PreviewState>>,
    Form(form): Form<GenerateForm>,
) -> Response {
    let text = form.text.unwrap_or_default();
    if text.is_empty() {
        return Html(EMPTY_PLAYER).into_response();
    }

    let audio = match state.client.synthesize_speech(&text).await {
        Ok(audio) => audio,
        Err(e) => {
            tracing::warn!(error = %e, "speech synthesis failed");
            return (StatusCode::BAD_GATEWAY, format!("Speech synthesis failed: {}", e))
                .into_response();
        }
    };

    let file_name = format!("{}.mp3", uuid::Uuid::new_v4().simple());
    let path = state.audio_dir.join(&file_name);
    if let Err(e) = tokio::fs::write(&path, &audio).await {
        tracing::warn!(error = %e, path = %path.display(), "failed to write audio file");
        return (StatusCode::INTERNAL_SERVER_ERROR, "Failed to save audio").into_response();
    }
    tracing::info!(path = %path.display(), bytes = audio.len(), "generated audio");

    Html(format!(
        r#"<audio controls id="audio"><source src="./audio/{}"></audio>"#,
        file_name
    ))
    .into_response()
}

/// Bind the preview server and serve until Ctrl+C.
pub async fn start_server(config: PreviewConfig, client: Arc<dyn GenerationClient>) -> Result<()> {
    std::fs::create_dir_all(&config.audio_dir).with_context(|| {
        format!(
            "Failed to create audio directory {}",
            config.audio_dir.display()
        )
    })?;

    let state = Arc::new(PreviewState {
        client,
        audio_dir: config.audio_dir,
    });
    let app = build_router(state);

    let addr = format!("127.0.0.1:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    let local_addr = listener.local_addr()?;
    tracing::info!("audio preview listening on http://{}", local_addr);
    println!("Audio generator running at http://{}", local_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    println!("Server shut down gracefully.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    println!("\nShutting down...");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::stub::StubClient;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use tempfile::{TempDir, tempdir};
    use tower::ServiceExt;

    fn test_router() -> (Router, Arc<StubClient>, TempDir) {
        let dir = tempdir().unwrap();
        let client = Arc::new(StubClient::with_completions(Vec::<String>::new()));
        let state = Arc::new(PreviewState {
            client: client.clone(),
            audio_dir: dir.path().to_path_buf(),
        });
        (build_router(state), client, dir)
    }

    fn form_request(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/generate")
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_text(resp: Response) -> String {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_index_serves_form() {
        let (app, _client, _dir) = test_router();
        let req = Request::builder().uri("/").body(Body::empty()).unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(body_text(resp).await.contains(r#"name="text""#));
    }

    #[tokio::test]
    async fn test_empty_text_returns_empty_player() {
        let (app, client, _dir) = test_router();
        let resp = app.oneshot(form_request("text=")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_text(resp).await, EMPTY_PLAYER);
        assert!(client.calls().is_empty());
    }

    #[tokio::test]
    async fn test_missing_text_field_returns_empty_player() {
        let (app, _client, _dir) = test_router();
        let resp = app.oneshot(form_request("")).await.unwrap();
        assert_eq!(body_text(resp).await, EMPTY_PLAYER);
    }

    #[tokio::test]
    async fn test_whitespace_text_is_synthesized() {
        let (app, client, _dir) = test_router();
        let resp = app.oneshot(form_request("text=+")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(body_text(resp).await.contains("<source src=\"./audio/"));
        assert_eq!(client.calls(), vec!["speech: "]);
    }

    #[tokio::test]
    async fn test_generate_writes_unique_audio_files() {
        let (app, client, dir) = test_router();

        let first = body_text(
            app.clone()
                .oneshot(form_request("text=Hello+world"))
                .await
                .unwrap(),
        )
        .await;
        let second = body_text(app.oneshot(form_request("text=Again")).await.unwrap()).await;

        assert!(first.starts_with(r#"<audio controls id="audio"><source src="./audio/"#));
        assert_ne!(first, second);
        assert_eq!(client.calls(), vec!["speech:Hello world", "speech:Again"]);

        let files: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(files.len(), 2);
    }

    #[tokio::test]
    async fn test_generated_audio_is_served() {
        let (app, client, _dir) = test_router();
        let html = body_text(
            app.clone()
                .oneshot(form_request("text=Hi"))
                .await
                .unwrap(),
        )
        .await;

        let src = html
            .split("src=\".")
            .nth(1)
            .and_then(|rest| rest.split('"').next())
            .unwrap()
            .to_string();
        let req = Request::builder().uri(&src).body(Body::empty()).unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(bytes.to_vec(), client.audio_bytes);
    }
}
