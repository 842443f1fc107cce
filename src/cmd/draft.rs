//! Draft lifecycle commands: `draft`, `thesis`, `body`, `banner`, `publish`.

use anyhow::{Context, Result, bail};
use chrono::Utc;
use std::process::Command;

use ezlo::errors::EzloError;
use ezlo::generation::GenerationClient;
use ezlo::session::Session;
use ezlo::ui::Spinner;
use ezlo::ui::icons::{FILE_MOD, FILE_NEW, IMAGE, SPARKLE};
use ezlo::workflow;

use super::super::{BannerAction, DraftAction};

pub fn cmd_draft(session: &mut Session, action: Option<DraftAction>) -> Result<()> {
    match action {
        Some(DraftAction::New) => {
            let path = workflow::new_draft(session)?;
            println!("{}Draft created: {}", FILE_NEW, path.display());
        }
        Some(DraftAction::Edit) => {
            let path = session.draft()?.path.ok_or(EzloError::NoDraft)?;
            let editor = std::env::var("EDITOR").unwrap_or_else(|_| "nano".to_string());
            let status = Command::new(&editor)
                .arg(&path)
                .status()
                .with_context(|| format!("Failed to launch editor '{}'", editor))?;
            if !status.success() {
                bail!(
                    "Editor '{}' exited with code {}",
                    editor,
                    status.code().unwrap_or(-1)
                );
            }
        }
        None => match session.draft()?.path {
            Some(path) => println!("{}", path.display()),
            None => return Err(EzloError::NoDraft.into()),
        },
    }
    Ok(())
}

pub async fn cmd_thesis(
    session: &mut Session,
    client: &dyn GenerationClient,
    index: Option<usize>,
) -> Result<()> {
    let Some(index) = index else {
        let thesis = session.draft()?.thesis.ok_or(EzloError::NoThesis)?;
        println!("{}", thesis);
        return Ok(());
    };

    // Validate before the spinner so a bad index reports cleanly.
    let idea = workflow::idea_at(session, index)?;
    println!("Idea: \"{}\"", idea.text);

    let spinner = Spinner::start("Generating thesis...");
    match workflow::select_idea(session, client, index).await {
        Ok(outcome) => {
            spinner.success("Thesis set in database.");
            println!();
            println!("{}", outcome.thesis);
            if let Some(path) = outcome.appended_to {
                println!();
                println!("{}Thesis appended to draft {}", FILE_MOD, path.display());
            }
            Ok(())
        }
        Err(e) => {
            spinner.fail("Failed to generate thesis");
            Err(e.into())
        }
    }
}

pub async fn cmd_body(session: &mut Session, client: &dyn GenerationClient) -> Result<()> {
    let thesis = session.draft()?.thesis.ok_or(EzloError::NoThesis)?;
    println!("Thesis: \"{}\"", thesis);

    let spinner = Spinner::start("Generating article body...");
    match workflow::generate_body(session, client).await {
        Ok(outcome) => {
            match outcome.appended_to {
                Some(path) => spinner.success(format!(
                    "Article body appended to draft {}",
                    path.display()
                )),
                None => {
                    spinner.success("Article body generated (no active draft).");
                    println!();
                    println!("{}", outcome.body);
                }
            }
            Ok(())
        }
        Err(e) => {
            spinner.fail("Failed to generate article body");
            Err(e.into())
        }
    }
}

pub async fn cmd_banner(
    session: &mut Session,
    client: &dyn GenerationClient,
    action: Option<BannerAction>,
) -> Result<()> {
    match action {
        Some(BannerAction::Gen) => {
            let spinner = Spinner::start("Generating banner image...");
            match workflow::generate_banner(session, client).await {
                Ok(path) => {
                    spinner.success(format!("Banner set in database: {}", path.display()));
                    Ok(())
                }
                Err(e) => {
                    spinner.fail("Failed to generate banner");
                    Err(e.into())
                }
            }
        }
        None => {
            let banner = session.draft()?.banner.ok_or(EzloError::NoBanner)?;
            println!("{}{}", IMAGE, banner.display());
            open::that(&banner)
                .with_context(|| format!("Failed to open {}", banner.display()))?;
            Ok(())
        }
    }
}

pub fn cmd_publish(session: &mut Session) -> Result<()> {
    let published = workflow::publish_draft(session, Utc::now())?;
    println!(
        "{}Article published: {}",
        SPARKLE,
        published.article.display()
    );
    println!("{}Banner copied: {}", IMAGE, published.banner.display());
    Ok(())
}
