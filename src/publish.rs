//! Copy a finished draft into a Hugo site.
//!
//! Layout written under the site root:
//!
//! ```text
//! content/posts/<slug>.md   # front matter + draft text
//! static/<slug>.png         # banner
//! ```

use chrono::{DateTime, SecondsFormat, Utc};
use std::path::{Path, PathBuf};

use crate::errors::{EzloError, Result};

/// Paths written by [`publish`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Published {
    pub slug: String,
    pub article: PathBuf,
    pub banner: PathBuf,
}

/// Spaces become hyphens and the result is lower-cased. Nothing else is
/// escaped, so punctuation passes through into the file name and URL.
pub fn slugify(idea: &str) -> String {
    idea.replace(' ', "-").to_lowercase()
}

pub fn front_matter(date: DateTime<Utc>, title: &str, slug: &str) -> String {
    format!(
        "---\ndate: {}\ntitle: \"{}\"\nurl: {}\ncover:\n  image: /{}.png\n---\n\n",
        date.to_rfc3339_opts(SecondsFormat::Millis, true),
        title,
        slug,
        slug
    )
}

/// Write the article and banner into `site`. Targets are overwritten; the
/// draft file itself is left untouched.
pub fn publish(
    site: &Path,
    draft: &Path,
    banner: &Path,
    idea: &str,
    now: DateTime<Utc>,
) -> Result<Published> {
    let slug = slugify(idea);
    let posts_dir = site.join("content").join("posts");
    let static_dir = site.join("static");

    for dir in [&posts_dir, &static_dir] {
        std::fs::create_dir_all(dir).map_err(|source| EzloError::FileWrite {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let body = std::fs::read_to_string(draft).map_err(|source| EzloError::FileRead {
        path: draft.to_path_buf(),
        source,
    })?;

    let article = posts_dir.join(format!("{}.md", slug));
    let target_banner = static_dir.join(format!("{}.png", slug));

    std::fs::copy(banner, &target_banner).map_err(|source| EzloError::FileWrite {
        path: target_banner.clone(),
        source,
    })?;

    let mut content = front_matter(now, idea, &slug);
    content.push_str(&body);
    std::fs::write(&article, content).map_err(|source| EzloError::FileWrite {
        path: article.clone(),
        source,
    })?;

    tracing::info!(article = %article.display(), banner = %target_banner.display(), "published");

    Ok(Published {
        slug,
        article,
        banner: target_banner,
    })
}
