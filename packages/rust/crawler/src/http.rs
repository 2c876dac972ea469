//! HTTP-backed [`DocumentSource`] using `reqwest` and `scraper`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use scraper::{ElementRef, Html, Node, Selector};
use tracing::{debug, instrument};
use url::Url;

use wikisync_shared::{
    DocNode, DocumentSource, IndexLink, Result, SelectorsConfig, WikiSyncError,
};

/// User-Agent string for document requests.
const USER_AGENT: &str = concat!("wikisync/", env!("CARGO_PKG_VERSION"));

/// Fetches documents over HTTP and extracts them with CSS selectors.
pub struct HttpSource {
    client: Client,
    index_entry: Selector,
    content: Selector,
}

impl HttpSource {
    /// Build a source from the configured selectors.
    ///
    /// A selector that does not parse is a configuration error.
    pub fn new(selectors: &SelectorsConfig, request_timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(5))
            .timeout(request_timeout)
            .build()
            .map_err(|e| WikiSyncError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            index_entry: parse_selector("index_entry", &selectors.index_entry)?,
            content: parse_selector("content", &selectors.content)?,
        })
    }

    async fn get_text(&self, url: &Url) -> Result<String> {
        debug!(%url, "fetching document");

        let response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .map_err(|e| WikiSyncError::Network(format!("{url}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(WikiSyncError::Network(format!("{url}: HTTP {status}")));
        }

        response
            .text()
            .await
            .map_err(|e| WikiSyncError::Network(format!("{url}: body read failed: {e}")))
    }
}

#[async_trait]
impl DocumentSource for HttpSource {
    #[instrument(skip(self), fields(url = %url))]
    async fn fetch_index(&self, url: &Url) -> Result<Vec<IndexLink>> {
        let body = self.get_text(url).await?;
        let links = extract_index_links(&body, &self.index_entry);
        debug!(links = links.len(), "index parsed");
        Ok(links)
    }

    #[instrument(skip(self), fields(url = %url))]
    async fn fetch_entry(&self, url: &Url) -> Result<DocNode> {
        let body = self.get_text(url).await?;
        extract_content(&body, &self.content)
            .ok_or_else(|| WikiSyncError::parse(format!("{url}: no content region")))
    }
}

fn parse_selector(field: &str, selector: &str) -> Result<Selector> {
    Selector::parse(selector)
        .map_err(|e| WikiSyncError::config(format!("invalid {field} selector '{selector}': {e}")))
}

/// Collect label/href pairs for every element matching `selector`.
///
/// Elements without an `href` or with blank text are skipped.
pub(crate) fn extract_index_links(html: &str, selector: &Selector) -> Vec<IndexLink> {
    let doc = Html::parse_document(html);

    doc.select(selector)
        .filter_map(|el| {
            let href = el.value().attr("href")?.trim();
            let label = el.text().collect::<String>().trim().to_string();
            if href.is_empty() || label.is_empty() {
                return None;
            }
            Some(IndexLink {
                label,
                href: href.to_string(),
            })
        })
        .collect()
}

/// Convert the first element matching `selector` into a [`DocNode`] tree.
pub(crate) fn extract_content(html: &str, selector: &Selector) -> Option<DocNode> {
    let doc = Html::parse_document(html);
    doc.select(selector).next().map(element_to_node)
}

fn element_to_node(el: ElementRef<'_>) -> DocNode {
    let mut children = Vec::new();

    for child in el.children() {
        match child.value() {
            Node::Text(text) => children.push(DocNode::text(text.to_string())),
            Node::Element(_) => {
                if let Some(child_el) = ElementRef::wrap(child) {
                    children.push(element_to_node(child_el));
                }
            }
            // Comments, doctypes, processing instructions
            _ => {}
        }
    }

    DocNode::element(el.value().name(), children)
}
