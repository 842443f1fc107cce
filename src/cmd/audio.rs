//! Audio preview server command: `ezlo audio`.

use anyhow::Result;
use std::sync::Arc;

use ezlo::generation::GenerationClient;
use ezlo::preview::{PreviewConfig, start_server};
use ezlo::session::Session;
use ezlo::ui::icons::AUDIO;

pub async fn cmd_audio(
    session: &Session,
    client: Arc<dyn GenerationClient>,
    port: u16,
    open: bool,
) -> Result<()> {
    // Spawn browser open before starting the server (which blocks)
    if open {
        let url = format!("http://localhost:{}", port);
        tokio::spawn(async move {
            // Small delay to let the server start binding
            tokio::time::sleep(tokio::time::Duration::from_millis(500)).await;
            if let Err(e) = open::that(&url) {
                tracing::warn!(error = %e, "failed to open browser");
            }
        });
    }

    let audio_dir = session.audio_dir();
    println!("{}Audio files are written to {}", AUDIO, audio_dir.display());

    start_server(PreviewConfig { port, audio_dir }, client).await
}
