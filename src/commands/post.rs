//! Show a single post

use anyhow::Result;

use crate::config::SiteConfig;
use crate::content::PostContent;
use crate::error::BlogError;
use crate::helpers::publication_date;
use crate::source::ContentSource;
use crate::Blog;

/// Fetch the post with `slug` and print it
pub async fn run(blog: &Blog, slug: &str) -> Result<()> {
    let source = blog.content_source()?;
    let post = fetch(&source, &blog.config.post_type, slug).await?;

    for line in describe(&blog.config, &post) {
        println!("{}", line);
    }

    Ok(())
}

/// Fetch a post by slug, turning a missing document into a readable error
pub async fn fetch<S: ContentSource + ?Sized>(
    source: &S,
    post_type: &str,
    slug: &str,
) -> Result<PostContent> {
    match source.get_by_uid(post_type, slug).await {
        Ok(post) => {
            tracing::debug!("Fetched post {:?} ({} sections)", slug, post.sections.len());
            Ok(post)
        }
        Err(BlogError::NotFound(_)) => anyhow::bail!("Post not found: {}", slug),
        Err(e) => Err(e.into()),
    }
}

/// Header lines, then each section heading followed by its paragraphs
pub fn describe(config: &SiteConfig, post: &PostContent) -> Vec<String> {
    let date = publication_date(
        post.publication_date.as_ref(),
        &config.date_format,
        &config.language,
    );

    let meta = format!("{} | {} min", post.author, post.reading_time());
    let mut lines = vec![
        post.title.clone(),
        if date.is_empty() {
            meta
        } else {
            format!("{} | {}", date, meta)
        },
    ];
    if !post.banner_url.is_empty() {
        if post.banner_alt.is_empty() {
            lines.push(format!("Banner: {}", post.banner_url));
        } else {
            lines.push(format!("Banner: {} ({})", post.banner_url, post.banner_alt));
        }
    }
    for section in &post.sections {
        lines.push(format!("  # {}", section.heading));
        for paragraph in &section.body {
            lines.push(format!("    {}", paragraph.text));
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{ContentSection, PageResult, Paragraph};
    use crate::error::Result as BlogResult;
    use crate::source::Predicate;
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};

    fn sample() -> PostContent {
        PostContent {
            publication_date: Some(Utc.with_ymd_and_hms(2021, 8, 2, 9, 0, 0).unwrap()),
            title: "Criando um app CRA do zero".to_string(),
            banner_url: "https://images.prismic.io/banner.png".to_string(),
            banner_alt: "banner".to_string(),
            author: "Danilo Vieira".to_string(),
            sections: vec![
                ContentSection {
                    heading: "Proin et varius".to_string(),
                    body: vec![Paragraph::new(vec!["lorem"; 300].join(" "))],
                },
                ContentSection {
                    heading: "Cras laoreet".to_string(),
                    body: vec![Paragraph::new(vec!["ipsum"; 50].join(" "))],
                },
            ],
        }
    }

    struct OnePost;

    #[async_trait]
    impl ContentSource for OnePost {
        async fn query(&self, _predicate: &Predicate, _page_size: usize) -> BlogResult<PageResult> {
            Ok(PageResult::default())
        }

        async fn fetch_by_cursor(&self, cursor: &str) -> BlogResult<PageResult> {
            Err(BlogError::FetchFailure(cursor.to_string()))
        }

        async fn get_by_uid(&self, document_type: &str, uid: &str) -> BlogResult<PostContent> {
            match (document_type, uid) {
                ("post", "criando-um-app") => Ok(sample()),
                ("post", "offline") => Err(BlogError::FetchFailure("timeout".to_string())),
                _ => Err(BlogError::NotFound(uid.to_string())),
            }
        }
    }

    #[test]
    fn test_describe() {
        let lines = describe(&SiteConfig::default(), &sample());
        let lorem = format!("    {}", vec!["lorem"; 300].join(" "));
        let ipsum = format!("    {}", vec!["ipsum"; 50].join(" "));
        assert_eq!(
            lines,
            [
                "Criando um app CRA do zero",
                "2 ago 2021 | Danilo Vieira | 2 min",
                "Banner: https://images.prismic.io/banner.png (banner)",
                "  # Proin et varius",
                lorem.as_str(),
                "  # Cras laoreet",
                ipsum.as_str(),
            ]
        );
    }

    #[test]
    fn test_describe_unpublished_post() {
        let post = PostContent {
            publication_date: None,
            title: "T".to_string(),
            banner_url: String::new(),
            banner_alt: String::new(),
            author: "A".to_string(),
            sections: vec![ContentSection {
                heading: "H".to_string(),
                body: vec![
                    Paragraph::new("the paragraph text"),
                    Paragraph::new("a second paragraph"),
                ],
            }],
        };
        let lines = describe(&SiteConfig::default(), &post);
        assert_eq!(
            lines,
            [
                "T",
                "A | 1 min",
                "  # H",
                "    the paragraph text",
                "    a second paragraph",
            ]
        );
    }

    #[tokio::test]
    async fn test_fetch() {
        let post = fetch(&OnePost, "post", "criando-um-app").await.unwrap();
        assert_eq!(post.reading_time(), 2);
    }

    #[tokio::test]
    async fn test_fetch_missing() {
        let err = fetch(&OnePost, "post", "nope").await.unwrap_err();
        assert_eq!(err.to_string(), "Post not found: nope");
    }

    #[tokio::test]
    async fn test_fetch_failure_propagates() {
        let err = fetch(&OnePost, "post", "offline").await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<BlogError>(),
            Some(BlogError::FetchFailure(_))
        ));
    }
}
