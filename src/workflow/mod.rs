//! Draft workflow: idea → thesis → body → banner → publish.
//!
//! Each step checks only the fields it needs and records the resulting
//! [`DraftStage`]. Nothing stops a user from running steps out of order;
//! a missing prerequisite is reported as a distinct `EzloError` before any
//! generation call is made.

pub mod prompts;

use chrono::{DateTime, Utc};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::errors::{EzloError, GenerationError, Result};
use crate::generation::schema::IdeasPayload;
use crate::generation::{BANNER_SIZE, GenerationClient, ResponseFormat};
use crate::publish::{self, Published};
use crate::session::{DraftStage, Idea, IdeaStatus, Session};

/// Result of selecting an idea and generating its thesis.
#[derive(Debug, Clone)]
pub struct ThesisOutcome {
    pub idea: String,
    pub thesis: String,
    /// Draft file the thesis was appended to, if one is active.
    pub appended_to: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct BodyOutcome {
    pub body: String,
    pub appended_to: Option<PathBuf>,
}

/// Create an empty draft file under the drafts directory and make it active.
pub fn new_draft(session: &mut Session) -> Result<PathBuf> {
    let dir = session.drafts_dir();
    std::fs::create_dir_all(&dir).map_err(|source| EzloError::FileWrite {
        path: dir.clone(),
        source,
    })?;

    let id = uuid::Uuid::new_v4().simple().to_string();
    let path = dir.join(format!("{}.md", &id[..13]));
    std::fs::write(&path, "").map_err(|source| EzloError::FileWrite {
        path: path.clone(),
        source,
    })?;

    session.set_draft_path(&path)?;
    session.set_stage(DraftStage::Uninitialized)?;
    tracing::info!(path = %path.display(), "created draft");
    Ok(path)
}

/// Ask for new ideas and append them to the stored list. Returns the new ideas.
pub async fn generate_ideas(
    session: &mut Session,
    client: &dyn GenerationClient,
) -> Result<Vec<String>> {
    let niche = session
        .config()?
        .blog_niche
        .filter(|n| !n.trim().is_empty())
        .ok_or(EzloError::NoNiche)?;
    let previous = session.idea_entries()?;

    let messages = prompts::ideas_messages(&niche, &previous);
    let content = client
        .complete(&messages, ResponseFormat::JsonObject)
        .await?;

    let ideas: Vec<String> = IdeasPayload::parse(&content)?
        .ideas
        .into_iter()
        .map(|i| i.trim().to_string())
        .filter(|i| !i.is_empty())
        .collect();

    if ideas.is_empty() {
        return Err(GenerationError::malformed("ideas", "empty ideas list").into());
    }

    session.append_ideas(ideas.clone())?;
    Ok(ideas)
}

/// Look up idea `index`. Out-of-range and blank entries are `IdeaNotFound`.
pub fn idea_at(session: &Session, index: usize) -> Result<Idea> {
    session
        .ideas()?
        .into_iter()
        .nth(index)
        .filter(|idea| !idea.text.trim().is_empty())
        .ok_or(EzloError::IdeaNotFound { index })
}

/// Make idea `index` the active one and generate its thesis.
///
/// An unknown index fails with `IdeaNotFound` before anything is written.
pub async fn select_idea(
    session: &mut Session,
    client: &dyn GenerationClient,
    index: usize,
) -> Result<ThesisOutcome> {
    let idea = idea_at(session, index)?.text;
    let mut ideas = session.ideas()?;
    ideas[index].status = IdeaStatus::Thesis;
    session.set_ideas(&ideas)?;

    let draft = session.draft()?;
    if draft.idea.as_deref() != Some(idea.as_str()) && draft.banner.is_some() {
        tracing::debug!("active idea changed, dropping stale banner");
        session.clear_draft_banner()?;
    }
    session.set_draft_idea(&idea)?;
    session.set_stage(DraftStage::IdeaSelected)?;

    let niche = session.config()?.blog_niche.unwrap_or_default();
    let thesis = client
        .complete(&prompts::thesis_messages(&niche, &idea), ResponseFormat::Text)
        .await?;

    session.set_draft_thesis(&thesis)?;
    session.set_stage(DraftStage::ThesisGenerated)?;

    let appended_to = match draft.path {
        Some(path) => {
            append_to_draft(&path, &thesis)?;
            Some(path)
        }
        None => None,
    };

    Ok(ThesisOutcome {
        idea,
        thesis,
        appended_to,
    })
}

/// Generate an article body from the stored thesis and append it to the draft.
pub async fn generate_body(
    session: &mut Session,
    client: &dyn GenerationClient,
) -> Result<BodyOutcome> {
    let draft = session.draft()?;
    let thesis = draft.thesis.ok_or(EzloError::NoThesis)?;

    if session.stage()? >= DraftStage::BodyGenerated {
        tracing::warn!("a body was already generated for this draft; appending another");
    }

    let body = client
        .complete(&prompts::body_messages(&thesis), ResponseFormat::Text)
        .await?;

    let appended_to = match draft.path {
        Some(path) => {
            append_to_draft(&path, &body)?;
            Some(path)
        }
        None => None,
    };
    session.set_stage(DraftStage::BodyGenerated)?;

    Ok(BodyOutcome { body, appended_to })
}

/// Generate a banner for the active idea and save it next to the draft.
pub async fn generate_banner(
    session: &mut Session,
    client: &dyn GenerationClient,
) -> Result<PathBuf> {
    let draft = session.draft()?;
    let idea = draft.idea.ok_or(EzloError::NoIdea)?;
    let draft_path = draft.path.ok_or(EzloError::NoDraft)?;

    let mut ideas = session.ideas()?;
    let marked = ideas
        .iter_mut()
        .find(|i| i.text == idea)
        .map(|entry| entry.status = IdeaStatus::Banner)
        .is_some();
    if marked {
        session.set_ideas(&ideas)?;
    } else {
        tracing::debug!(%idea, "active idea is no longer in the idea list");
    }

    let url = client
        .generate_image(&prompts::banner_prompt(&idea), BANNER_SIZE)
        .await?;
    let bytes = client.download(&url).await?;

    let banner = draft_path.with_extension("png");
    std::fs::write(&banner, &bytes).map_err(|source| EzloError::FileWrite {
        path: banner.clone(),
        source,
    })?;

    session.set_draft_banner(&banner)?;
    session.set_stage(DraftStage::BannerGenerated)?;
    Ok(banner)
}

/// Publish the active draft into the configured site.
///
/// `draftPath` stays active afterwards; start the next article with
/// `draft new`.
pub fn publish_draft(session: &mut Session, now: DateTime<Utc>) -> Result<Published> {
    let site = session.config()?.site_path.ok_or(EzloError::NotConfigured)?;
    let draft = session.draft()?;
    let draft_path = draft.path.ok_or(EzloError::NoDraft)?;
    let banner = draft.banner.ok_or(EzloError::NoBanner)?;
    let idea = draft.idea.ok_or(EzloError::NoIdea)?;

    let published = publish::publish(&site, &draft_path, &banner, &idea, now)?;
    session.set_stage(DraftStage::Published)?;
    Ok(published)
}

/// Append generated text, separated from existing content by a blank line.
fn append_to_draft(path: &Path, text: &str) -> Result<()> {
    let write_err = |source| EzloError::FileWrite {
        path: path.to_path_buf(),
        source,
    };

    let has_content = std::fs::metadata(path).map(|m| m.len() > 0).unwrap_or(false);
    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(write_err)?;

    if has_content {
        file.write_all(b"\n\n").map_err(write_err)?;
    }
    file.write_all(text.as_bytes()).map_err(write_err)?;
    Ok(())
}
