//! Prismic REST API v2 content source

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tokio::sync::OnceCell;

use super::{ContentSource, Predicate};
use crate::config::SiteConfig;
use crate::content::nullable_timestamp;
use crate::content::{ContentSection, PageResult, Paragraph, PostContent, PostSummary};
use crate::error::{BlogError, Result};

/// API entry point payload; only the refs matter here
#[derive(Debug, Deserialize)]
struct ApiInfo {
    refs: Vec<ApiRef>,
}

#[derive(Debug, Deserialize)]
struct ApiRef {
    #[serde(rename = "ref")]
    reference: String,
    #[serde(rename = "isMasterRef", default)]
    is_master_ref: bool,
}

/// Envelope of `documents/search` responses
#[derive(Debug, Deserialize)]
struct SearchResponse<T> {
    results: Vec<Document<T>>,
    next_page: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Document<T> {
    id: String,
    uid: Option<String>,
    #[serde(deserialize_with = "nullable_timestamp", default)]
    first_publication_date: Option<DateTime<Utc>>,
    data: T,
}

impl<T> Document<T> {
    fn slug(&self) -> String {
        self.uid.clone().unwrap_or_else(|| self.id.clone())
    }
}

#[derive(Debug, Deserialize)]
struct SummaryData {
    title: Option<String>,
    subtitle: Option<String>,
    author: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PostData {
    title: Option<String>,
    #[serde(default)]
    banner: Banner,
    author: Option<String>,
    #[serde(default)]
    content: Vec<SectionData>,
}

#[derive(Debug, Default, Deserialize)]
struct Banner {
    url: Option<String>,
    alt: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SectionData {
    heading: Option<String>,
    #[serde(default)]
    body: Vec<TextBlock>,
}

/// A rich text block; spans and block type are irrelevant for plain text
#[derive(Debug, Deserialize)]
struct TextBlock {
    #[serde(default)]
    text: String,
}

impl From<Document<SummaryData>> for PostSummary {
    fn from(doc: Document<SummaryData>) -> Self {
        let id = doc.slug();
        Self {
            id,
            publication_date: doc.first_publication_date,
            title: doc.data.title.unwrap_or_default(),
            subtitle: doc.data.subtitle.unwrap_or_default(),
            author: doc.data.author.unwrap_or_default(),
        }
    }
}

impl From<Document<PostData>> for PostContent {
    fn from(doc: Document<PostData>) -> Self {
        let data = doc.data;
        Self {
            publication_date: doc.first_publication_date,
            title: data.title.unwrap_or_default(),
            banner_url: data.banner.url.unwrap_or_default(),
            banner_alt: data.banner.alt.unwrap_or_default(),
            author: data.author.unwrap_or_default(),
            sections: data
                .content
                .into_iter()
                .map(|section| ContentSection {
                    heading: section.heading.unwrap_or_default(),
                    body: section.body.into_iter().map(|b| Paragraph::new(b.text)).collect(),
                })
                .collect(),
        }
    }
}

impl From<SearchResponse<SummaryData>> for PageResult {
    fn from(response: SearchResponse<SummaryData>) -> Self {
        PageResult::new(
            response.results.into_iter().map(PostSummary::from).collect(),
            response.next_page,
        )
    }
}

/// HTTP client for a Prismic repository
pub struct PrismicClient {
    http: Client,
    endpoint: Url,
    access_token: Option<String>,
    master_ref: OnceCell<String>,
}

impl PrismicClient {
    /// Create a client for an API endpoint such as
    /// `https://my-repo.cdn.prismic.io/api/v2`
    pub fn new(endpoint: &str, access_token: Option<String>) -> Result<Self> {
        let endpoint = Url::parse(endpoint.trim_end_matches('/'))
            .map_err(|e| BlogError::Config(format!("invalid api_endpoint {:?}: {}", endpoint, e)))?;
        Ok(Self {
            http: Client::new(),
            endpoint,
            access_token,
            master_ref: OnceCell::new(),
        })
    }

    /// Create a client from the site configuration
    pub fn from_config(config: &SiteConfig) -> Result<Self> {
        config.validate()?;
        Self::new(&config.api_endpoint, config.access_token.clone())
    }

    fn search_url(&self) -> Url {
        let mut url = self.endpoint.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(["documents", "search"]);
        }
        url
    }

    /// Whether `url` points at the configured API host
    fn same_host(&self, url: &Url) -> bool {
        url.host_str() == self.endpoint.host_str()
            && url.port_or_known_default() == self.endpoint.port_or_known_default()
    }

    /// Append the access token, but only for requests to the API host
    fn with_token(&self, mut url: Url) -> Url {
        if !self.same_host(&url) {
            return url;
        }
        if let Some(token) = &self.access_token {
            let has_token = url.query_pairs().any(|(k, _)| k == "access_token");
            if !has_token {
                url.query_pairs_mut().append_pair("access_token", token);
            }
        }
        url
    }

    /// GET a URL and decode its JSON body
    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        let url = self.with_token(url);
        tracing::debug!("GET {}", url.path());

        let response = self.http.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(BlogError::FetchFailure(format!(
                "{} returned {}",
                url.path(),
                status
            )));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| BlogError::FetchFailure(format!("invalid response payload: {}", e)))
    }

    /// The master ref, resolved on first use
    async fn master_ref(&self) -> Result<&str> {
        let reference = self
            .master_ref
            .get_or_try_init(|| async {
                let info: ApiInfo = self.get_json(self.endpoint.clone()).await?;
                info.refs
                    .into_iter()
                    .find(|r| r.is_master_ref)
                    .map(|r| r.reference)
                    .ok_or_else(|| BlogError::FetchFailure("API exposes no master ref".to_string()))
            })
            .await?;
        Ok(reference.as_str())
    }

    async fn search<T: DeserializeOwned>(
        &self,
        predicate: &Predicate,
        page_size: usize,
    ) -> Result<SearchResponse<T>> {
        let master_ref = self.master_ref().await?;
        let mut url = self.search_url();
        url.query_pairs_mut()
            .append_pair("ref", master_ref)
            .append_pair("q", &format!("[{}]", predicate))
            .append_pair("pageSize", &page_size.to_string());
        self.get_json(url).await
    }
}

#[async_trait]
impl ContentSource for PrismicClient {
    async fn query(&self, predicate: &Predicate, page_size: usize) -> Result<PageResult> {
        let response: SearchResponse<SummaryData> = self.search(predicate, page_size).await?;
        tracing::debug!("Query {} returned {} documents", predicate, response.results.len());
        Ok(response.into())
    }

    async fn fetch_by_cursor(&self, cursor: &str) -> Result<PageResult> {
        let url = Url::parse(cursor)
            .map_err(|e| BlogError::FetchFailure(format!("invalid cursor {:?}: {}", cursor, e)))?;
        let response: SearchResponse<SummaryData> = self.get_json(url).await?;
        Ok(response.into())
    }

    async fn get_by_uid(&self, document_type: &str, uid: &str) -> Result<PostContent> {
        let predicate = Predicate::uid(document_type, uid);
        let response: SearchResponse<PostData> = self.search(&predicate, 1).await?;
        response
            .results
            .into_iter()
            .next()
            .map(PostContent::from)
            .ok_or_else(|| BlogError::NotFound(format!("{} {:?}", document_type, uid)))
    }
}
