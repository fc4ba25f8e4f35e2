//! Client for the backend's public influencer endpoints.
//!
//! - `GET {base}/public/influencers?limit=&offset=` → `{ "items": [...] }` or a bare array
//! - `GET {base}/public/influencers/{slug}` → one influencer object

use std::time::Duration;

use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::error::Error;

#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base: String,
}

impl ApiClient {
    /// `base` is the API origin without a trailing slash.
    pub fn new(base: &str, timeout: Duration) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("crawlfront/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client, base: base.trim_end_matches('/').to_owned() })
    }

    /// First page of the public influencer list. Shapes other than an array
    /// or an object with an `items` array yield an empty list.
    pub async fn list_influencers(&self, limit: usize, offset: usize) -> Result<Vec<Value>, Error> {
        let mut url = Url::parse(&format!("{}/public/influencers", self.base))?;
        url.query_pairs_mut()
            .append_pair("limit", &limit.to_string())
            .append_pair("offset", &offset.to_string());

        let body = self.get_json(url).await?;
        let items = match body {
            Value::Array(items) => items,
            Value::Object(mut map) => match map.remove("items") {
                Some(Value::Array(items)) => items,
                _ => Vec::new(),
            },
            _ => Vec::new(),
        };
        debug!(count = items.len(), "influencer list fetched");
        Ok(items)
    }

    /// Detail record for one slug. The slug is percent-encoded as a single
    /// path segment.
    pub async fn influencer(&self, slug: &str) -> Result<Value, Error> {
        let mut url = Url::parse(&format!("{}/public/influencers/", self.base))?;
        url.path_segments_mut()
            .map_err(|()| Error::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .push(slug);
        self.get_json(url).await
    }

    async fn get_json(&self, url: Url) -> Result<Value, Error> {
        let resp = self.client.get(url.clone()).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(Error::UpstreamStatus { url: url.into(), status: status.as_u16() });
        }
        Ok(resp.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> ApiClient {
        ApiClient::new(&server.uri(), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn list_accepts_items_envelope_and_bare_array() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/public/influencers"))
            .and(query_param("limit", "10"))
            .and(query_param("offset", "0"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [{ "handle": "a" }] })))
            .mount(&server)
            .await;
        let items = client(&server).list_influencers(10, 0).await.unwrap();
        assert_eq!(items, vec![json!({ "handle": "a" })]);

        let bare = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/public/influencers"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "slug": "b" }, { "slug": "c" }])))
            .mount(&bare)
            .await;
        assert_eq!(client(&bare).list_influencers(10, 0).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn unexpected_list_shape_is_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
            .mount(&server)
            .await;
        assert!(client(&server).list_influencers(10, 0).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn detail_encodes_slug_and_reports_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/public/influencers/jane%20doe"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "slug": "jane doe" })))
            .mount(&server)
            .await;
        let detail = client(&server).influencer("jane doe").await.unwrap();
        assert_eq!(detail["slug"], "jane doe");

        let err = client(&server).influencer("missing").await.unwrap_err();
        assert!(matches!(err, Error::UpstreamStatus { status: 404, .. }));
    }
}
