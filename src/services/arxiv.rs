use async_trait::async_trait;
use feed_rs::model::Entry;
use crate::error::TravelError;
use crate::services::PaperSearch;

/// Queries longer than this are cut before being sent.
pub const MAX_QUERY_CHARS: usize = 300;
/// Number of papers requested per search.
pub const TOP_K_RESULTS: usize = 3;
/// Cap on the rendered result text.
pub const MAX_CONTENT_CHARS: usize = 4000;

/// One paper from an arXiv Atom feed.
#[derive(Debug, Clone, PartialEq)]
pub struct ArxivPaper {
    /// `YYYY-MM-DD` of the latest revision
    pub published: String,
    pub title:     String,
    pub authors:   Vec<String>,
    pub summary:   String,
}

/// arXiv wraps titles and abstracts at fixed columns.
fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

impl ArxivPaper {
    fn from_entry(entry: Entry) -> Option<Self> {
        let title = collapse_whitespace(&entry.title?.content);
        let published = entry.updated
            .or(entry.published)
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        let summary = entry.summary
            .map(|s| collapse_whitespace(&s.content))
            .unwrap_or_default();
        let authors = entry.authors.into_iter()
            .map(|p| collapse_whitespace(&p.name))
            .filter(|name| !name.is_empty())
            .collect();
        Some(Self { published, title, authors, summary })
    }
}

/// Parses the entries of an arXiv Atom feed. Entries without a title are
/// skipped.
pub fn parse_atom_feed(xml: &str) -> Result<Vec<ArxivPaper>, TravelError> {
    let feed = feed_rs::parser::parse(xml.as_bytes())
        .map_err(|source| TravelError::Feed { service: "arxiv", source })?;
    Ok(feed.entries.into_iter().filter_map(ArxivPaper::from_entry).collect())
}

/// Renders papers as blank-line separated blocks, capped at
/// [`MAX_CONTENT_CHARS`].
pub fn render_papers(papers: &[ArxivPaper]) -> String {
    let text = papers.iter()
        .map(|p| format!(
            "Published: {}\nTitle: {}\nAuthors: {}\nSummary: {}",
            p.published, p.title, p.authors.join(", "), p.summary
        ))
        .collect::<Vec<_>>()
        .join("\n\n");
    text.chars().take(MAX_CONTENT_CHARS).collect()
}

/// arXiv export API search.
pub struct ArxivClient {
    client:   reqwest::Client,
    api_base: String,
}

impl ArxivClient {
    pub fn new(client: reqwest::Client, api_base: impl Into<String>) -> Self {
        Self { client, api_base: api_base.into() }
    }
}

#[async_trait]
impl PaperSearch for ArxivClient {
    async fn search(&self, query: &str) -> Result<String, TravelError> {
        let url = format!("{}/api/query", self.api_base.trim_end_matches('/'));
        let query: String = query.chars().take(MAX_QUERY_CHARS).collect();
        let max_results = TOP_K_RESULTS.to_string();
        tracing::debug!(%url, query = %query, "arxiv search");

        let xml = self.client.get(&url)
            .query(&[
                ("search_query", query.as_str()),
                ("start",        "0"),
                ("max_results",  max_results.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let papers = parse_atom_feed(&xml)?;
        tracing::debug!(count = papers.len(), "arxiv papers parsed");
        Ok(render_papers(&papers))
    }
}
