//! Markdown blog loader.
//!
//! DESIGN
//! ======
//! Each post is one `<slug>.md` file in the posts directory, opened by a
//! `---`-fenced YAML front matter block. The file name is the canonical
//! slug; a front-matter `slug` that disagrees is a load error rather than a
//! silent rename. Loading is all-or-nothing: one malformed file fails the
//! whole list so broken posts surface at authoring time.
//!
//! `BlogStore` memoizes the parsed list. Failures are never cached.

use std::cmp::Reverse;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use time::Date;
use time::macros::format_description;
use tokio::sync::RwLock;

// =============================================================================
// TYPES
// =============================================================================

/// A published post as served by `/api/blog`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogPost {
    pub slug: String,
    pub title: String,
    /// Date exactly as written in front matter.
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub content: String,
}

#[derive(Debug, thiserror::Error)]
pub enum BlogError {
    #[error("blog io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("blog post slug mismatch: {file_slug} vs {slug} in {file}")]
    SlugMismatch { file: String, file_slug: String, slug: String },
    #[error("blog post missing title or date: {file}")]
    MissingField { file: String },
    #[error("invalid front matter in {file}: {source}")]
    InvalidFrontMatter {
        file: String,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("invalid date {date:?} in {file}")]
    InvalidDate { file: String, date: String },
}

#[derive(Debug, Default, Deserialize)]
struct FrontMatter {
    slug: Option<String>,
    title: Option<String>,
    date: Option<String>,
    image: Option<String>,
}

// =============================================================================
// PARSING
// =============================================================================

/// Split `raw` into (front matter, body). `None` when the file does not open
/// with a `---` fence or the fence is never closed.
#[must_use]
pub fn split_front_matter(raw: &str) -> Option<(&str, &str)> {
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);
    let (first, rest) = raw.split_once('\n')?;
    if first.trim_end() != "---" {
        return None;
    }

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            let yaml = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return Some((yaml, body));
        }
        offset += line.len();
    }
    None
}

/// Parse a `YYYY-MM-DD` date. A trailing time component (`T...` or a space)
/// is ignored.
#[must_use]
pub fn parse_post_date(raw: &str) -> Option<Date> {
    let day = raw.trim().split(['T', ' ']).next()?;
    Date::parse(day, format_description!("[year]-[month]-[day]")).ok()
}

/// Parse one post file. `file` is the file name including `.md`.
///
/// # Errors
///
/// Returns `BlogError` when the front matter is malformed, the slug
/// disagrees with the file name, or title/date are missing or invalid.
pub fn parse_post(file: &str, raw: &str) -> Result<(Date, BlogPost), BlogError> {
    let file_slug = file.strip_suffix(".md").unwrap_or(file);

    let (front, body) = split_front_matter(raw).unwrap_or(("", raw));
    let meta: FrontMatter = if front.trim().is_empty() {
        FrontMatter::default()
    } else {
        serde_yaml::from_str(front)
            .map_err(|source| BlogError::InvalidFrontMatter { file: file.to_owned(), source })?
    };

    let slug = meta.slug.unwrap_or_else(|| file_slug.to_owned());
    if slug != file_slug {
        return Err(BlogError::SlugMismatch { file: file.to_owned(), file_slug: file_slug.to_owned(), slug });
    }

    let non_blank = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
    let (Some(title), Some(date)) = (non_blank(meta.title), non_blank(meta.date)) else {
        return Err(BlogError::MissingField { file: file.to_owned() });
    };

    let parsed = parse_post_date(&date).ok_or_else(|| BlogError::InvalidDate { file: file.to_owned(), date: date.clone() })?;

    Ok((parsed, BlogPost { slug, title, date, image: meta.image, content: body.trim().to_owned() }))
}

// =============================================================================
// LOADING
// =============================================================================

/// Load every `.md` post in `dir`, newest first; equal dates order by slug.
///
/// # Errors
///
/// Fails if the directory cannot be read or any post fails to parse.
pub fn load_all_posts(dir: &Path) -> Result<Vec<BlogPost>, BlogError> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.ends_with(".md") && entry.file_type()?.is_file() {
            files.push((name, entry.path()));
        }
    }

    let mut posts = Vec::with_capacity(files.len());
    for (name, path) in files {
        let raw = std::fs::read_to_string(&path)?;
        posts.push(parse_post(&name, &raw)?);
    }

    posts.sort_by(|(da, a), (db, b)| (Reverse(*da), &a.slug).cmp(&(Reverse(*db), &b.slug)));
    Ok(posts.into_iter().map(|(_, post)| post).collect())
}

/// Find one post by slug. `Ok(None)` when no post has that slug.
///
/// # Errors
///
/// Same as [`load_all_posts`].
pub fn load_post_by_slug(dir: &Path, slug: &str) -> Result<Option<BlogPost>, BlogError> {
    Ok(load_all_posts(dir)?.into_iter().find(|p| p.slug == slug))
}

/// The first `count` posts of an already-sorted list.
#[must_use]
pub fn recent_posts(posts: &[BlogPost], count: usize) -> &[BlogPost] {
    &posts[..count.min(posts.len())]
}

// =============================================================================
// STORE
// =============================================================================

/// Async front for the loader used by HTTP handlers.
pub struct BlogStore {
    dir: PathBuf,
    cache_enabled: bool,
    cache: RwLock<Option<Arc<Vec<BlogPost>>>>,
}

impl BlogStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>, cache_enabled: bool) -> Self {
        Self { dir: dir.into(), cache_enabled, cache: RwLock::new(None) }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// All posts, newest first.
    ///
    /// # Errors
    ///
    /// Propagates loader failures; a failed load is retried on the next call.
    pub async fn all(&self) -> Result<Arc<Vec<BlogPost>>, BlogError> {
        if self.cache_enabled {
            if let Some(posts) = self.cache.read().await.as_ref() {
                return Ok(Arc::clone(posts));
            }
        }

        let dir = self.dir.clone();
        let posts = tokio::task::spawn_blocking(move || load_all_posts(&dir))
            .await
            .map_err(|e| BlogError::Io(std::io::Error::other(e)))??;
        let posts = Arc::new(posts);
        tracing::debug!(count = posts.len(), dir = %self.dir.display(), "blog posts loaded");

        if self.cache_enabled {
            *self.cache.write().await = Some(Arc::clone(&posts));
        }
        Ok(posts)
    }

    /// One post by slug.
    ///
    /// # Errors
    ///
    /// Same as [`BlogStore::all`].
    pub async fn by_slug(&self, slug: &str) -> Result<Option<BlogPost>, BlogError> {
        if self.cache_enabled {
            return Ok(self.all().await?.iter().find(|p| p.slug == slug).cloned());
        }
        let dir = self.dir.clone();
        let slug = slug.to_owned();
        tokio::task::spawn_blocking(move || load_post_by_slug(&dir, &slug))
            .await
            .map_err(|e| BlogError::Io(std::io::Error::other(e)))?
    }
}

#[cfg(test)]
#[path = "blog_test.rs"]
mod tests;
