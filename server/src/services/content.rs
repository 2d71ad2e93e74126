//! Content service: article files on disk to a browsable catalog.
//!
//! DESIGN
//! ======
//! Articles live at `CONTENT_DIR/<date>/index.md`, each opening with a YAML
//! front matter block fenced by `---`. Loading happens once at startup; the
//! resulting `Catalog` is immutable and shared behind an `Arc`.
//!
//! ERROR HANDLING
//! ==============
//! An unreadable content root fails startup. A single malformed article is
//! logged and skipped so one bad file never takes the site down.

#[cfg(test)]
#[path = "content_test.rs"]
mod content_test;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use blog_wire::{Article, ArticleSummary, Frontmatter, TermCount};
use tracing::{info, warn};

use crate::services::render::render_markdown;

const ARTICLE_FILE: &str = "index.md";
const FENCE: &str = "---";

#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("missing front matter")]
    MissingFrontmatter,
    #[error("invalid front matter: {0}")]
    Frontmatter(#[from] serde_yaml::Error),
}

/// Split `raw` into its front matter and markdown body.
#[must_use]
pub fn split_frontmatter(raw: &str) -> Option<(&str, &str)> {
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);
    let rest = raw.strip_prefix(FENCE)?;
    let rest = rest.strip_prefix("\r\n").or_else(|| rest.strip_prefix('\n'))?;

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == FENCE {
            let body = &rest[offset + line.len()..];
            return Some((&rest[..offset], body));
        }
        offset += line.len();
    }
    None
}

/// Parse one article file found in directory `dir_name`.
///
/// # Errors
///
/// Returns [`ContentError`] when the front matter is missing or invalid.
pub fn parse_article(dir_name: &str, raw: &str) -> Result<Article, ContentError> {
    let (yaml, body) = split_frontmatter(raw).ok_or(ContentError::MissingFrontmatter)?;
    let frontmatter: Frontmatter = serde_yaml::from_str(yaml)?;
    Ok(Article::from_parts(dir_name, frontmatter, render_markdown(body)))
}

/// Load every `<dir>/index.md` under `root` into a catalog.
///
/// # Errors
///
/// Returns [`ContentError::Io`] if `root` cannot be listed.
pub fn load_dir(root: &Path) -> Result<Catalog, ContentError> {
    let entries = std::fs::read_dir(root).map_err(|source| ContentError::Io { path: root.to_owned(), source })?;

    let mut articles = Vec::new();
    for entry in entries.flatten() {
        let dir = entry.path();
        if !dir.is_dir() {
            continue;
        }
        let Some(dir_name) = dir.file_name().and_then(|n| n.to_str()).map(str::to_owned) else {
            continue;
        };
        let file = dir.join(ARTICLE_FILE);
        let raw = match std::fs::read_to_string(&file) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(path = %file.display(), error = %e, "content: skipping unreadable article");
                continue;
            }
        };
        match parse_article(&dir_name, &raw) {
            Ok(article) => articles.push(article),
            Err(e) => warn!(path = %file.display(), error = %e, "content: skipping malformed article"),
        }
    }

    let catalog = Catalog::new(articles);
    info!(root = %root.display(), articles = catalog.len(), "content loaded");
    Ok(catalog)
}

/// Published articles in date order with taxonomy counts.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    articles: Vec<Article>,
    tags: Vec<TermCount>,
    categories: Vec<TermCount>,
}

impl Catalog {
    /// Drop drafts, order by date ascending, link neighbors and count terms.
    #[must_use]
    pub fn new(articles: Vec<Article>) -> Self {
        let mut articles: Vec<Article> = articles.into_iter().filter(|a| !a.draft).collect();
        articles.sort_by(|a, b| a.date.cmp(&b.date));

        let neighbors: Vec<_> = articles.iter().map(Article::neighbor).collect();
        for (index, article) in articles.iter_mut().enumerate() {
            article.prev = index.checked_sub(1).map(|i| neighbors[i].clone());
            article.next = neighbors.get(index + 1).cloned();
        }

        let mut tags = BTreeMap::<String, usize>::new();
        let mut categories = BTreeMap::<String, usize>::new();
        for article in &articles {
            if !article.category.is_empty() {
                *categories.entry(article.category.clone()).or_default() += 1;
            }
            for tag in &article.tags {
                *tags.entry(tag.clone()).or_default() += 1;
            }
        }

        Self { articles, tags: to_terms(tags), categories: to_terms(categories) }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.articles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    #[must_use]
    pub fn summaries(&self) -> Vec<ArticleSummary> {
        self.articles.iter().map(Article::summary).collect()
    }

    /// Find an article by `my-post` or `/posts/my-post`.
    #[must_use]
    pub fn find(&self, slug: &str) -> Option<&Article> {
        let slug = slug.trim_matches('/');
        let slug = slug.strip_prefix("posts/").unwrap_or(slug);
        if slug.is_empty() {
            return None;
        }
        self.articles.iter().find(|a| a.slug.strip_prefix("/posts/") == Some(slug))
    }

    /// Published articles carrying `tag`, oldest first.
    #[must_use]
    pub fn tagged(&self, tag: &str) -> Vec<ArticleSummary> {
        let tag = tag.trim().to_lowercase();
        self.articles.iter().filter(|a| a.tags.contains(&tag)).map(Article::summary).collect()
    }

    /// Published articles filed under `category`, oldest first.
    #[must_use]
    pub fn in_category(&self, category: &str) -> Vec<ArticleSummary> {
        let category = category.trim().to_lowercase();
        if category.is_empty() {
            return Vec::new();
        }
        self.articles.iter().filter(|a| a.category == category).map(Article::summary).collect()
    }

    /// Whether a published article has this id.
    #[must_use]
    pub fn contains_id(&self, id: &str) -> bool {
        self.articles.iter().any(|a| a.id == id)
    }

    #[must_use]
    pub fn tags(&self) -> &[TermCount] {
        &self.tags
    }

    #[must_use]
    pub fn categories(&self) -> &[TermCount] {
        &self.categories
    }
}

fn to_terms(counts: BTreeMap<String, usize>) -> Vec<TermCount> {
    counts.into_iter().map(|(name, count)| TermCount { name, count }).collect()
}
