//! CLI command implementations.
//!
//! Each submodule owns one or more related `Commands` variants:
//!
//! | Module    | Commands handled                                 |
//! |-----------|--------------------------------------------------|
//! | `config`  | `Config`, `Status`                               |
//! | `ideas`   | `Ideas`                                          |
//! | `draft`   | `Draft`, `Thesis`, `Body`, `Banner`, `Publish`   |
//! | `audio`   | `Audio`                                          |

pub mod audio;
pub mod config;
pub mod draft;
pub mod ideas;

use std::sync::Arc;

use anyhow::Result;
use ezlo::generation::OpenAiClient;
use ezlo::session::Session;
use ezlo::settings::GenerationSettings;

pub use audio::cmd_audio;
pub use config::{ConfigArgs, cmd_config, cmd_status};
pub use draft::{cmd_banner, cmd_body, cmd_draft, cmd_publish, cmd_thesis};
pub use ideas::cmd_ideas;

/// Build the generation client from the stored config and environment.
///
/// Fails with `NotConfigured` when the site path or an API key is missing.
pub fn build_client(session: &Session) -> Result<Arc<OpenAiClient>> {
    let settings = GenerationSettings::require(&session.config()?)?;
    Ok(Arc::new(OpenAiClient::new(settings)))
}
