//! List posts

use anyhow::Result;

use crate::config::SiteConfig;
use crate::content::PostSummary;
use crate::helpers::publication_date;
use crate::pagination::CursorWalker;
use crate::source::{ContentSource, Predicate};
use crate::Blog;

/// How many extra pages to load after the first one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLimit {
    Pages(usize),
    All,
}

impl PageLimit {
    fn max_pages(self) -> Option<usize> {
        match self {
            PageLimit::Pages(n) => Some(n),
            PageLimit::All => None,
        }
    }
}

/// List posts, following the cursor chain up to `limit`
pub async fn run(blog: &Blog, limit: PageLimit) -> Result<()> {
    let source = blog.content_source()?;
    let posts = collect(
        source,
        &blog.post_predicate(),
        blog.config.page_size,
        limit,
    )
    .await?;

    println!("{} - Posts ({}):", blog.config.title, posts.len());
    for post in &posts {
        println!("  {}", format_summary(&blog.config, post));
    }

    Ok(())
}

/// Load the first page, then walk the feed.
///
/// A failed continuation stops the walk and keeps the posts already shown;
/// only a failure on the first page is an error.
pub async fn collect<S: ContentSource>(
    source: S,
    predicate: &Predicate,
    page_size: usize,
    limit: PageLimit,
) -> Result<Vec<PostSummary>> {
    let walker = CursorWalker::start(source, predicate, page_size).await?;

    if let Err(e) = walker.load_pages(limit.max_pages()).await {
        tracing::warn!("Failed to load more posts: {}", e);
    }
    if walker.has_more() {
        tracing::info!("More posts available (use --all to load everything)");
    }

    Ok(walker.into_items())
}

/// One listing line: date, title, author and slug
pub fn format_summary(config: &SiteConfig, post: &PostSummary) -> String {
    let date = publication_date(
        post.publication_date.as_ref(),
        &config.date_format,
        &config.language,
    );
    let mut line = format!("{} - {} ({}) [{}]", date, post.title, post.author, post.id);
    if !post.subtitle.is_empty() {
        line.push_str("\n    ");
        line.push_str(&post.subtitle);
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{PageResult, PostContent};
    use crate::error::{BlogError, Result as BlogResult};
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};

    fn post(id: &str) -> PostSummary {
        PostSummary {
            id: id.to_string(),
            publication_date: None,
            title: id.to_uppercase(),
            subtitle: String::new(),
            author: "Ana".to_string(),
        }
    }

    /// First page, then cursor "p2"; cursor "p3" always fails
    struct Feed;

    #[async_trait]
    impl ContentSource for Feed {
        async fn query(&self, _predicate: &Predicate, page_size: usize) -> BlogResult<PageResult> {
            assert_eq!(page_size, 2);
            Ok(PageResult::new(vec![post("a"), post("b")], Some("p2".to_string())))
        }

        async fn fetch_by_cursor(&self, cursor: &str) -> BlogResult<PageResult> {
            match cursor {
                "p2" => Ok(PageResult::new(vec![post("c"), post("d")], Some("p3".to_string()))),
                _ => Err(BlogError::FetchFailure("connection reset".to_string())),
            }
        }

        async fn get_by_uid(&self, _document_type: &str, uid: &str) -> BlogResult<PostContent> {
            Err(BlogError::NotFound(uid.to_string()))
        }
    }

    fn slugs(posts: &[PostSummary]) -> Vec<&str> {
        posts.iter().map(|p| p.id.as_str()).collect()
    }

    #[tokio::test]
    async fn test_collect_first_page_only() {
        let predicate = Predicate::document_type("post");
        let posts = collect(Feed, &predicate, 2, PageLimit::Pages(0)).await.unwrap();
        assert_eq!(slugs(&posts), ["a", "b"]);
    }

    #[tokio::test]
    async fn test_collect_keeps_posts_on_failure() {
        let predicate = Predicate::document_type("post");
        let posts = collect(Feed, &predicate, 2, PageLimit::All).await.unwrap();
        assert_eq!(slugs(&posts), ["a", "b", "c", "d"]);
    }

    #[test]
    fn test_format_summary() {
        let config = SiteConfig::default();
        let mut summary = post("como-utilizar-hooks");
        summary.title = "Como utilizar Hooks".to_string();
        summary.publication_date = Some(Utc.with_ymd_and_hms(2021, 3, 15, 12, 0, 0).unwrap());
        assert_eq!(
            format_summary(&config, &summary),
            "15 mar 2021 - Como utilizar Hooks (Ana) [como-utilizar-hooks]"
        );

        summary.subtitle = "Pensando em sincronização".to_string();
        assert!(format_summary(&config, &summary).ends_with("\n    Pensando em sincronização"));
    }
}
