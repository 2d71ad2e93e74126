use super::*;
use uuid::Uuid;

fn article(date: &str, uid: &str, draft: bool) -> Article {
    let fm = Frontmatter {
        uid: uid.into(),
        title: format!("Title {uid}"),
        excerpt: String::new(),
        tags: vec!["Rust".into(), "web".into()],
        category: "Code".into(),
        draft,
    };
    Article::from_parts(date, fm, String::new())
}

/// Temporary content root removed on drop.
struct ContentRoot(PathBuf);

impl ContentRoot {
    fn new() -> Self {
        let path = std::env::temp_dir().join(format!("blog-content-{}", Uuid::new_v4()));
        std::fs::create_dir_all(&path).expect("create temp content root");
        Self(path)
    }

    fn write(&self, dir: &str, raw: &str) {
        let dir = self.0.join(dir);
        std::fs::create_dir_all(&dir).expect("create article dir");
        std::fs::write(dir.join(ARTICLE_FILE), raw).expect("write article");
    }
}

impl Drop for ContentRoot {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.0);
    }
}

const VALID: &str = "---\nuid: Hello World\ntitle: Hello\ntags: [Rust]\ncategory: Code\n---\n# Hi\n";

// =============================================================================
// split_frontmatter / parse_article
// =============================================================================

#[test]
fn split_frontmatter_separates_yaml_and_body() {
    let (yaml, body) = split_frontmatter("---\ntitle: a\n---\nbody\n").expect("front matter");
    assert_eq!(yaml, "title: a\n");
    assert_eq!(body, "body\n");
}

#[test]
fn split_frontmatter_handles_crlf() {
    let (yaml, body) = split_frontmatter("---\r\ntitle: a\r\n---\r\nbody").expect("front matter");
    assert_eq!(yaml, "title: a\r\n");
    assert_eq!(body, "body");
}

#[test]
fn split_frontmatter_requires_both_fences() {
    assert!(split_frontmatter("title: a\nbody").is_none());
    assert!(split_frontmatter("---\ntitle: a\nbody").is_none());
}

#[test]
fn parse_article_derives_fields_and_renders_body() {
    let article = parse_article("2021-03-04", VALID).expect("valid article");
    assert_eq!(article.id, "Hello World");
    assert_eq!(article.slug, "/posts/hello-world");
    assert_eq!(article.date, "2021-03-04");
    assert_eq!(article.category, "code");
    assert_eq!(article.tags, vec!["rust".to_owned()]);
    assert_eq!(article.body, "<h1>Hi</h1>\n");
}

#[test]
fn parse_article_rejects_missing_frontmatter() {
    assert!(matches!(parse_article("d", "# no front matter"), Err(ContentError::MissingFrontmatter)));
}

#[test]
fn parse_article_rejects_invalid_yaml() {
    assert!(matches!(parse_article("d", "---\ntitle: [unclosed\n---\n"), Err(ContentError::Frontmatter(_))));
}

// =============================================================================
// Catalog
// =============================================================================

#[test]
fn catalog_excludes_drafts_and_sorts_by_date() {
    let catalog = Catalog::new(vec![
        article("2022-01-01", "b", false),
        article("2021-01-01", "a", false),
        article("2023-01-01", "draft", true),
    ]);
    let slugs: Vec<_> = catalog.summaries().into_iter().map(|s| s.slug).collect();
    assert_eq!(slugs, vec!["/posts/a", "/posts/b"]);
    assert_eq!(catalog.len(), 2);
}

#[test]
fn catalog_links_neighbors() {
    let catalog = Catalog::new(vec![
        article("2021-01-01", "a", false),
        article("2021-02-01", "b", false),
        article("2021-03-01", "c", false),
    ]);
    let middle = catalog.find("b").expect("b exists");
    assert_eq!(middle.prev.as_ref().map(|n| n.path.as_str()), Some("/posts/a"));
    assert_eq!(middle.next.as_ref().map(|n| n.path.as_str()), Some("/posts/c"));

    let first = catalog.find("a").expect("a exists");
    assert!(first.prev.is_none());
    let last = catalog.find("c").expect("c exists");
    assert!(last.next.is_none());
}

#[test]
fn catalog_counts_terms_of_published_articles() {
    let catalog = Catalog::new(vec![
        article("2021-01-01", "a", false),
        article("2021-02-01", "b", false),
        article("2021-03-01", "c", true),
    ]);
    assert_eq!(catalog.categories(), &[TermCount { name: "code".into(), count: 2 }]);
    assert_eq!(
        catalog.tags(),
        &[TermCount { name: "rust".into(), count: 2 }, TermCount { name: "web".into(), count: 2 }]
    );
}

#[test]
fn catalog_filters_by_tag_ignoring_case() {
    let mut other = article("2021-02-01", "b", false);
    other.tags = vec!["go".into()];
    let catalog = Catalog::new(vec![
        other,
        article("2021-01-01", "a", false),
        article("2021-03-01", "c", false),
        article("2021-04-01", "draft", true),
    ]);
    let ids: Vec<_> = catalog.tagged("Rust").into_iter().map(|s| s.id).collect();
    assert_eq!(ids, vec!["a", "c"]);
    assert_eq!(catalog.tagged("go").len(), 1);
    assert!(catalog.tagged("missing").is_empty());
}

#[test]
fn catalog_filters_by_category() {
    let mut other = article("2021-02-01", "b", false);
    other.category = "life".into();
    let catalog = Catalog::new(vec![article("2021-01-01", "a", false), other]);
    let ids: Vec<_> = catalog.in_category(" CODE ").into_iter().map(|s| s.id).collect();
    assert_eq!(ids, vec!["a"]);
    assert_eq!(catalog.in_category("life").len(), 1);
    assert!(catalog.in_category("").is_empty());
}

#[test]
fn catalog_contains_only_published_ids() {
    let catalog = Catalog::new(vec![article("2021-01-01", "a", false), article("2021-02-01", "draft", true)]);
    assert!(catalog.contains_id("a"));
    assert!(!catalog.contains_id("draft"));
    assert!(!catalog.contains_id("missing"));
}

#[test]
fn catalog_find_accepts_full_path() {
    let catalog = Catalog::new(vec![article("2021-01-01", "a", false)]);
    assert!(catalog.find("/posts/a").is_some());
    assert!(catalog.find("posts/a/").is_some());
    assert!(catalog.find("").is_none());
    assert!(catalog.find("missing").is_none());
}

// =============================================================================
// load_dir
// =============================================================================

#[test]
fn load_dir_reads_articles_and_skips_bad_files() {
    let root = ContentRoot::new();
    root.write("2021-03-04", VALID);
    root.write("2021-05-06", "no front matter here");
    std::fs::write(root.0.join("README.md"), "not an article").expect("write stray file");

    let catalog = load_dir(&root.0).expect("content root readable");
    assert_eq!(catalog.len(), 1);
    assert!(catalog.find("hello-world").is_some());
}

#[test]
fn load_dir_fails_for_missing_root() {
    let missing = std::env::temp_dir().join(format!("blog-missing-{}", Uuid::new_v4()));
    assert!(matches!(load_dir(&missing), Err(ContentError::Io { .. })));
}
