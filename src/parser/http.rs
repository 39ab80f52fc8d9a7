// src/parser/http.rs
// =============================================================================
// The real PageParser: fetches a page over HTTP and parses its HTML.
//
// Failures (bad URL, network error, non-2xx status) come back as FetchError.
// The crawler treats them as "this page had no words and no links" and moves
// on.
// =============================================================================

use super::{html, PageParser, ParsedPage};
use crate::error::FetchError;
use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;
use url::Url;

#[derive(Debug, Clone)]
pub struct HttpPageParser {
    client: Client,
    ignored_words: Vec<Regex>,
}

impl HttpPageParser {
    /// Creates a parser whose requests give up after `request_timeout`
    pub fn new(request_timeout: Duration, ignored_words: Vec<Regex>) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(request_timeout)
            .redirect(reqwest::redirect::Policy::limited(5))
            .user_agent(concat!("webcrawler/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            ignored_words,
        })
    }

    // Fetches a web page and returns its HTML content
    async fn fetch_page(&self, url: &str) -> Result<String, FetchError> {
        let request_error = |source| FetchError::Request {
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url).send().await.map_err(request_error)?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        response.text().await.map_err(request_error)
    }
}

#[async_trait]
impl PageParser for HttpPageParser {
    async fn parse(&self, url: &str) -> Result<ParsedPage, FetchError> {
        if Url::parse(url).is_err() {
            return Err(FetchError::InvalidUrl {
                url: url.to_string(),
            });
        }

        let body = self.fetch_page(url).await?;
        let page = html::parse_html(&body, url, &self.ignored_words);
        debug!(
            url,
            words = page.words.len(),
            links = page.links.len(),
            "parsed page"
        );
        Ok(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn parser() -> HttpPageParser {
        HttpPageParser::new(Duration::from_secs(5), Vec::new()).unwrap()
    }

    #[tokio::test]
    async fn test_parse_served_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/index.html"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(
                r#"<html><body><p>Hello crawler</p><a href="/next.html">next</a></body></html>"#,
                "text/html",
            ))
            .mount(&server)
            .await;

        let url = format!("{}/index.html", server.uri());
        let page = parser().parse(&url).await.unwrap();

        assert_eq!(page.words, vec!["hello", "crawler"]);
        assert_eq!(page.links, vec![format!("{}/next.html", server.uri())]);
    }

    #[tokio::test]
    async fn test_missing_page_is_status_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let url = format!("{}/missing", server.uri());
        let err = parser().parse(&url).await.unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_invalid_url_is_rejected_without_a_request() {
        let err = parser().parse("not a url").await.unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl { .. }));
    }
}
