//! Configuration commands: `ezlo config` and `ezlo status`.

use anyhow::{Context, Result};
use console::style;
use dialoguer::{Input, Password};
use std::path::PathBuf;

use ezlo::session::Session;
use ezlo::settings::{GenerationSettings, mask_secret};

/// Values passed on the command line; any that are missing are prompted for.
#[derive(Debug, Default)]
pub struct ConfigArgs {
    pub site_path: Option<PathBuf>,
    pub api_key: Option<String>,
    pub niche: Option<String>,
}

pub fn cmd_config(session: &mut Session, args: ConfigArgs) -> Result<()> {
    let site_path = match args.site_path {
        Some(path) => path,
        None => {
            let input: String = Input::new()
                .with_prompt("Hugo site path")
                .interact_text()
                .context("Failed to read site path")?;
            PathBuf::from(input.trim())
        }
    };

    let api_key = match args.api_key {
        Some(key) => key,
        None => Password::new()
            .with_prompt("OpenAI API key")
            .interact()
            .context("Failed to read API key")?,
    };

    let niche = match args.niche {
        Some(niche) => niche,
        None => Input::new()
            .with_prompt("A niche blog about...")
            .interact_text()
            .context("Failed to read blog niche")?,
    };

    session.set_config(&site_path, api_key.trim(), niche.trim())?;
    println!("Config saved.");
    Ok(())
}

pub fn cmd_status(session: &Session) -> Result<()> {
    let config = session.config()?;
    let draft = session.draft()?;
    let settings = GenerationSettings::resolve(&config);
    let unset = || style("(not set)").dim().to_string();

    println!();
    println!("{}", style("ezlo status").bold());
    println!();
    println!("Store: {}", session.store_path().display());
    println!();
    println!("[config]");
    println!(
        "  site_path = {}",
        config
            .site_path
            .as_deref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(unset)
    );
    println!(
        "  api_key = {}",
        config
            .api_key
            .as_deref()
            .map(mask_secret)
            .unwrap_or_else(unset)
    );
    println!(
        "  blog_niche = {}",
        config.blog_niche.clone().unwrap_or_else(unset)
    );
    println!("  base_url = {}", settings.base_url);
    println!("  text_model = {}", settings.text_model);
    println!();
    println!("[draft]");
    println!("  stage = {}", session.stage()?);
    println!(
        "  path = {}",
        draft
            .path
            .as_deref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(unset)
    );
    println!("  idea = {}", draft.idea.clone().unwrap_or_else(unset));
    println!(
        "  thesis = {}",
        if draft.thesis.is_some() {
            "yes".to_string()
        } else {
            unset()
        }
    );
    println!(
        "  banner = {}",
        draft
            .banner
            .as_deref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(unset)
    );
    println!();
    Ok(())
}
