//! Typed view over the key/value store.
//!
//! The store uses a flat camelCase key layout (`apiKey`, `prevIdeas`,
//! `draftPath`, ...) so existing store files keep working. `Session` wraps it
//! with typed accessors and records the draft stage explicitly under
//! `draftStage`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::errors::Result;
use crate::store::Store;

pub mod keys {
    pub const API_KEY: &str = "apiKey";
    pub const SITE_PATH: &str = "sitePath";
    pub const BLOG_NICHE: &str = "blogNiche";
    pub const PREV_IDEAS: &str = "prevIdeas";
    pub const DRAFT_PATH: &str = "draftPath";
    pub const DRAFT_IDEA: &str = "draftIdea";
    pub const DRAFT_THESIS: &str = "draftThesis";
    pub const DRAFT_BANNER: &str = "draftBanner";
    pub const DRAFT_STAGE: &str = "draftStage";
}

/// Marker prefix for an idea whose thesis has been generated.
pub const THESIS_MARKER: &str = "✅ ";
/// Marker prefix for an idea whose banner has been generated.
pub const BANNER_MARKER: &str = "🖼️ ";

/// Where the active draft sits in the idea → publish sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftStage {
    #[default]
    Uninitialized,
    IdeaSelected,
    ThesisGenerated,
    BodyGenerated,
    BannerGenerated,
    Published,
}

impl std::fmt::Display for DraftStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            DraftStage::Uninitialized => "uninitialized",
            DraftStage::IdeaSelected => "idea selected",
            DraftStage::ThesisGenerated => "thesis generated",
            DraftStage::BodyGenerated => "body generated",
            DraftStage::BannerGenerated => "banner generated",
            DraftStage::Published => "published",
        };
        write!(f, "{}", s)
    }
}

/// Progress annotation carried by an idea entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdeaStatus {
    Fresh,
    Thesis,
    Banner,
}

/// One entry of `prevIdeas`, with its marker split off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Idea {
    pub status: IdeaStatus,
    pub text: String,
}

impl Idea {
    pub fn parse(entry: &str) -> Self {
        if let Some(text) = entry.strip_prefix(THESIS_MARKER) {
            Self {
                status: IdeaStatus::Thesis,
                text: text.to_string(),
            }
        } else if let Some(text) = entry.strip_prefix(BANNER_MARKER) {
            Self {
                status: IdeaStatus::Banner,
                text: text.to_string(),
            }
        } else {
            Self {
                status: IdeaStatus::Fresh,
                text: entry.to_string(),
            }
        }
    }

    /// Render back to the stored string form.
    pub fn to_entry(&self) -> String {
        match self.status {
            IdeaStatus::Fresh => self.text.clone(),
            IdeaStatus::Thesis => format!("{}{}", THESIS_MARKER, self.text),
            IdeaStatus::Banner => format!("{}{}", BANNER_MARKER, self.text),
        }
    }
}

/// Configuration captured by `ezlo config`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SiteConfig {
    pub api_key: Option<String>,
    pub site_path: Option<PathBuf>,
    pub blog_niche: Option<String>,
}

impl SiteConfig {
    pub fn has_site_path(&self) -> bool {
        self.site_path
            .as_deref()
            .is_some_and(|p| !p.as_os_str().is_empty())
    }
}

/// The active draft's fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub path: Option<PathBuf>,
    pub idea: Option<String>,
    pub thesis: Option<String>,
    pub banner: Option<PathBuf>,
}

pub struct Session {
    store: Store,
}

impl Session {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self::new(Store::open(path)?))
    }

    pub fn store_path(&self) -> &Path {
        self.store.path()
    }

    fn data_dir(&self) -> PathBuf {
        match self.store.path().parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    /// Directory new draft files are created in: `drafts/` next to the store.
    pub fn drafts_dir(&self) -> PathBuf {
        self.data_dir().join("drafts")
    }

    /// Directory the preview server writes synthesized audio to.
    pub fn audio_dir(&self) -> PathBuf {
        self.data_dir().join("audio")
    }

    // -- configuration --------------------------------------------------

    pub fn config(&self) -> Result<SiteConfig> {
        Ok(SiteConfig {
            api_key: self.store.get(keys::API_KEY)?,
            site_path: self.store.get(keys::SITE_PATH)?,
            blog_niche: self.store.get(keys::BLOG_NICHE)?,
        })
    }

    pub fn set_config(&mut self, site_path: &Path, api_key: &str, blog_niche: &str) -> Result<()> {
        self.store.set(keys::SITE_PATH, site_path)?;
        self.store.set(keys::API_KEY, api_key)?;
        self.store.set(keys::BLOG_NICHE, blog_niche)?;
        Ok(())
    }

    // -- ideas ----------------------------------------------------------

    pub fn ideas(&self) -> Result<Vec<Idea>> {
        let entries: Vec<String> = self.store.get(keys::PREV_IDEAS)?.unwrap_or_default();
        Ok(entries.iter().map(|e| Idea::parse(e)).collect())
    }

    /// Raw stored entries, markers included.
    pub fn idea_entries(&self) -> Result<Vec<String>> {
        Ok(self.store.get(keys::PREV_IDEAS)?.unwrap_or_default())
    }

    pub fn set_ideas(&mut self, ideas: &[Idea]) -> Result<()> {
        let entries: Vec<String> = ideas.iter().map(Idea::to_entry).collect();
        self.store.set(keys::PREV_IDEAS, &entries)?;
        Ok(())
    }

    pub fn append_ideas<I: IntoIterator<Item = String>>(&mut self, new: I) -> Result<usize> {
        let mut ideas = self.ideas()?;
        let before = ideas.len();
        ideas.extend(new.into_iter().map(|text| Idea {
            status: IdeaStatus::Fresh,
            text,
        }));
        self.set_ideas(&ideas)?;
        Ok(ideas.len() - before)
    }

    pub fn clear_ideas(&mut self) -> Result<()> {
        self.set_ideas(&[])
    }

    // -- draft ----------------------------------------------------------

    pub fn draft(&self) -> Result<Draft> {
        Ok(Draft {
            path: self.store.get(keys::DRAFT_PATH)?,
            idea: self.store.get(keys::DRAFT_IDEA)?,
            thesis: self.store.get(keys::DRAFT_THESIS)?,
            banner: self.store.get(keys::DRAFT_BANNER)?,
        })
    }

    pub fn set_draft_path(&mut self, path: &Path) -> Result<()> {
        self.store.set(keys::DRAFT_PATH, path)?;
        Ok(())
    }

    pub fn set_draft_idea(&mut self, idea: &str) -> Result<()> {
        self.store.set(keys::DRAFT_IDEA, idea)?;
        Ok(())
    }

    pub fn set_draft_thesis(&mut self, thesis: &str) -> Result<()> {
        self.store.set(keys::DRAFT_THESIS, thesis)?;
        Ok(())
    }

    pub fn set_draft_banner(&mut self, banner: &Path) -> Result<()> {
        self.store.set(keys::DRAFT_BANNER, banner)?;
        Ok(())
    }

    pub fn clear_draft_banner(&mut self) -> Result<()> {
        if self.store.contains(keys::DRAFT_BANNER) {
            self.store.remove(keys::DRAFT_BANNER)?;
        }
        Ok(())
    }

    /// Recorded stage, or one inferred from field presence for stores that
    /// were written before `draftStage` existed.
    pub fn stage(&self) -> Result<DraftStage> {
        if let Some(stage) = self.store.get(keys::DRAFT_STAGE)? {
            return Ok(stage);
        }
        let draft = self.draft()?;
        Ok(if draft.banner.is_some() {
            DraftStage::BannerGenerated
        } else if draft.thesis.is_some() {
            DraftStage::ThesisGenerated
        } else if draft.idea.is_some() {
            DraftStage::IdeaSelected
        } else {
            DraftStage::Uninitialized
        })
    }

    pub fn set_stage(&mut self, stage: DraftStage) -> Result<()> {
        self.store.set(keys::DRAFT_STAGE, &stage)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn session() -> (Session, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let session = Session::open(dir.path().join("store.json")).unwrap();
        (session, dir)
    }

    #[test]
    fn test_idea_parse_markers() {
        assert_eq!(Idea::parse("Plain").status, IdeaStatus::Fresh);

        let thesis = Idea::parse("✅ Sourdough basics");
        assert_eq!(thesis.status, IdeaStatus::Thesis);
        assert_eq!(thesis.text, "Sourdough basics");

        let banner = Idea::parse("🖼️ Sourdough basics");
        assert_eq!(banner.status, IdeaStatus::Banner);
        assert_eq!(banner.text, "Sourdough basics");
    }

    #[test]
    fn test_idea_markers_do_not_stack() {
        let mut idea = Idea::parse("✅ Rye starters");
        idea.status = IdeaStatus::Banner;
        assert_eq!(idea.to_entry(), "🖼️ Rye starters");
    }

    #[test]
    fn test_configure_then_query_returns_same_values() {
        let (mut session, _dir) = session();
        session
            .set_config(Path::new("/srv/site"), "sk-test", "sourdough baking")
            .unwrap();

        let config = session.config().unwrap();
        assert_eq!(config.site_path.as_deref(), Some(Path::new("/srv/site")));
        assert_eq!(config.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.blog_niche.as_deref(), Some("sourdough baking"));
        assert!(config.has_site_path());
    }

    #[test]
    fn test_clear_ideas_always_empties() {
        let (mut session, _dir) = session();
        session.clear_ideas().unwrap();
        assert!(session.ideas().unwrap().is_empty());

        session
            .append_ideas(vec!["A".to_string(), "B".to_string()])
            .unwrap();
        assert_eq!(session.ideas().unwrap().len(), 2);
        session.clear_ideas().unwrap();
        assert!(session.ideas().unwrap().is_empty());
    }

    #[test]
    fn test_stage_inferred_when_not_recorded() {
        let (mut session, _dir) = session();
        assert_eq!(session.stage().unwrap(), DraftStage::Uninitialized);
        session.set_draft_idea("Idea").unwrap();
        assert_eq!(session.stage().unwrap(), DraftStage::IdeaSelected);
        session.set_draft_thesis("Thesis").unwrap();
        assert_eq!(session.stage().unwrap(), DraftStage::ThesisGenerated);
    }

    #[test]
    fn test_recorded_stage_wins_over_inference() {
        let (mut session, _dir) = session();
        session.set_draft_thesis("Thesis").unwrap();
        session.set_stage(DraftStage::BodyGenerated).unwrap();
        assert_eq!(session.stage().unwrap(), DraftStage::BodyGenerated);
    }

    #[test]
    fn test_drafts_dir_is_next_to_store() {
        let (session, dir) = session();
        assert_eq!(session.drafts_dir(), dir.path().join("drafts"));
    }
}
