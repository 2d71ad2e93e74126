//! Article records and the metadata derived from each article file.
//!
//! Articles live one per directory (`<date>/index.md`). The directory name is
//! the publish date and the front matter `uid` drives the URL slug. Category
//! and tags are normalized to lowercase so listing pages group them reliably.

#[cfg(test)]
#[path = "articles_test.rs"]
mod articles_test;

use serde::{Deserialize, Serialize};

/// Front matter block at the top of an article file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frontmatter {
    pub uid: String,
    pub title: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub draft: bool,
}

/// Fields computed from an article's location and front matter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DerivedFields {
    /// Route path, always `/posts/<urlified uid>`.
    pub slug: String,
    pub date: String,
    pub category: String,
    pub tags: Vec<String>,
}

/// Lowercase `input`, collapse every run of non `[a-z0-9]` characters into a
/// single dash, and strip leading/trailing dashes.
#[must_use]
pub fn urlify(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut pending_dash = false;
    for ch in input.chars().flat_map(char::to_lowercase) {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push(ch);
        } else {
            pending_dash = true;
        }
    }
    out
}

/// Derive slug, date, category and tags for one article.
///
/// `dir_name` is the article directory relative to the content root; any
/// surrounding slashes are dropped before it becomes the date.
#[must_use]
pub fn derive_fields(dir_name: &str, frontmatter: &Frontmatter) -> DerivedFields {
    DerivedFields {
        slug: format!("/posts/{}", urlify(&frontmatter.uid)),
        date: dir_name.trim_matches('/').to_owned(),
        category: frontmatter.category.to_lowercase(),
        tags: frontmatter.tags.iter().map(|tag| tag.to_lowercase()).collect(),
    }
}

/// Link to an adjacent article in date order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Neighbor {
    pub path: String,
    pub title: String,
}

/// A tag or category name with the number of published articles using it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermCount {
    pub name: String,
    pub count: usize,
}

/// Listing card data for one article.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleSummary {
    pub id: String,
    pub title: String,
    pub excerpt: String,
    pub slug: String,
    pub date: String,
    pub category: String,
    pub tags: Vec<String>,
}

/// A full article as served to the post page. `body` is rendered HTML.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub id: String,
    pub title: String,
    pub excerpt: String,
    pub tags: Vec<String>,
    pub category: String,
    pub slug: String,
    pub date: String,
    pub draft: bool,
    pub body: String,
    #[serde(default)]
    pub prev: Option<Neighbor>,
    #[serde(default)]
    pub next: Option<Neighbor>,
}

impl Article {
    /// Build an article from its front matter, location and rendered body.
    #[must_use]
    pub fn from_parts(dir_name: &str, frontmatter: Frontmatter, body: String) -> Self {
        let fields = derive_fields(dir_name, &frontmatter);
        Self {
            id: frontmatter.uid.trim().to_owned(),
            title: frontmatter.title,
            excerpt: frontmatter.excerpt,
            tags: fields.tags,
            category: fields.category,
            slug: fields.slug,
            date: fields.date,
            draft: frontmatter.draft,
            body,
            prev: None,
            next: None,
        }
    }

    #[must_use]
    pub fn summary(&self) -> ArticleSummary {
        ArticleSummary {
            id: self.id.clone(),
            title: self.title.clone(),
            excerpt: self.excerpt.clone(),
            slug: self.slug.clone(),
            date: self.date.clone(),
            category: self.category.clone(),
            tags: self.tags.clone(),
        }
    }

    /// The subset of the article the like counter and share link consume.
    #[must_use]
    pub fn reference(&self) -> ArticleRef {
        ArticleRef { article_id: self.id.clone(), title: self.title.clone(), url: self.slug.clone() }
    }

    #[must_use]
    pub fn neighbor(&self) -> Neighbor {
        Neighbor { path: self.slug.clone(), title: self.title.clone() }
    }
}

/// Identity, title and URL of an article.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRef {
    pub article_id: String,
    pub title: String,
    pub url: String,
}
