use anyhow::Context;
use async_trait::async_trait;
use common::profile_names::{ProfileNamesQuery, ProfileNamesResponse, clamp_page_size};
use reqwest::StatusCode;

use super::{TherapistTable, list_page};

/// The `listPage(pageSize, cursor)` collaborator walked by the exporter.
#[async_trait]
pub trait ProfileNamesSource: Send + Sync {
    async fn list_page(&self, page_size: u32, cursor: Option<&str>) -> anyhow::Result<ProfileNamesResponse>;
}

/// Serves pages straight from a table, in process.
pub struct LocalProfileNames<T> {
    table: T,
}

impl<T: TherapistTable> LocalProfileNames<T> {
    pub fn new(table: T) -> Self {
        Self { table }
    }
}

#[async_trait]
impl<T: TherapistTable> ProfileNamesSource for LocalProfileNames<T> {
    async fn list_page(&self, page_size: u32, cursor: Option<&str>) -> anyhow::Result<ProfileNamesResponse> {
        list_page(&self.table, page_size as i64, cursor).await
    }
}

/// Calls a deployed profile-names endpoint over HTTP.
pub struct RemoteProfileNames {
    endpoint: String,
    anon_key: Option<String>,
    http: reqwest::Client,
}

impl RemoteProfileNames {
    pub fn new(endpoint: impl Into<String>, anon_key: Option<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            anon_key,
            http: reqwest::Client::new(),
        }
    }
}

impl RemoteProfileNames {
    fn page_request(&self, page_size: u32, cursor: Option<&str>) -> reqwest::RequestBuilder {
        let request = self
            .http
            .get(&self.endpoint)
            .query(&ProfileNamesQuery::new(page_size, cursor));
        match &self.anon_key {
            Some(anon_key) => request.bearer_auth(anon_key),
            None => request,
        }
    }
}

/// Parse one page from the endpoint. Deployments that only report the
/// cursor in their debug block get it derived from the rows: a full page
/// continues after its last id, at worst costing one trailing empty page.
/// A page that reports more rows but yields no cursor is rejected.
fn parse_page(status: StatusCode, body: &str, page_size: u32) -> anyhow::Result<ProfileNamesResponse> {
    if status.is_client_error() || status.is_server_error() {
        anyhow::bail!("Profile names endpoint error: {}: {}", status, body);
    }
    let mut page = serde_json::from_str::<ProfileNamesResponse>(body).context("unexpected profile names page")?;
    if page.data.next_page_token.is_none() && page.data.therapists.len() as u32 == clamp_page_size(page_size as i64) {
        page.data.next_page_token = page.data.therapists.last().map(|t| t.id.clone());
    }
    if page.debug.has_more && page.next_cursor().is_none() {
        anyhow::bail!(
            "profile names page reports hasMore=true but has no cursor after {} rows",
            page.data.therapists.len()
        );
    }
    Ok(page)
}

#[async_trait]
impl ProfileNamesSource for RemoteProfileNames {
    async fn list_page(&self, page_size: u32, cursor: Option<&str>) -> anyhow::Result<ProfileNamesResponse> {
        let response = self
            .page_request(page_size, cursor)
            .send()
            .await
            .with_context(|| format!("profile names request to {} failed", self.endpoint))?;
        let status = response.status();
        let response_txt = response.text().await?;
        parse_page(status, &response_txt, page_size)
    }
}


#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::directory::DirectoryExporter;

    /// Serves `total` rows the way the deployed edge function pages them.
    struct EdgeFunctionPages {
        total: u32,
    }

    #[async_trait]
    impl ProfileNamesSource for EdgeFunctionPages {
        async fn list_page(&self, page_size: u32, cursor: Option<&str>) -> anyhow::Result<ProfileNamesResponse> {
            let start = cursor.map_or(Ok(1), |c| c.parse::<u32>().map(|id| id + 1))?;
            let end = (start + page_size).min(self.total + 1);
            let has_more = end - start == page_size;
            parse_page(StatusCode::OK, &edge_function_body(start..end, has_more), page_size)
        }
    }

    fn edge_function_body(ids: std::ops::Range<u32>, has_more: bool) -> String {
        let therapists = ids
            .clone()
            .map(|i| json!({"name": format!("First{i} Last{i}"), "slug": null, "id": i.to_string()}))
            .collect::<Vec<_>>();
        let names = ids.clone().map(|i| format!("First{i} Last{i}")).collect::<Vec<_>>();
        let mut debug = json!({
            "count": therapists.len(),
            "timestamp": "2024-05-01T12:00:00.000Z",
            "hasMore": has_more,
            "pageSize": 10,
            "currentPage": "first",
        });
        if has_more {
            debug["nextPageToken"] = json!(ids.end.saturating_sub(1).to_string());
        }
        json!({
            "data": {"therapists": therapists, "therapistNames": names, "lastModified": "2024-05-01T12:00:00.000Z"},
            "debug": debug,
        })
        .to_string()
    }

    #[tokio::test]
    async fn exporter_walks_every_edge_function_page() {
        for total in [0, 5, 10, 25, 30] {
            let exporter = DirectoryExporter::new(EdgeFunctionPages { total }).with_page_size(10);
            let entries = exporter.fetch_all().await.unwrap();
            let ids = entries.iter().map(|e| e.id.parse::<u32>().unwrap()).collect::<Vec<_>>();
            assert_eq!(ids, (1..=total).collect::<Vec<_>>(), "total={total}");
        }
    }

    #[test]
    fn query_carries_page_size_token_and_key() {
        let source = RemoteProfileNames::new("https://x.supabase.co/functions/v1/profile-names-sitemap", Some("anon".into()));
        let request = source.page_request(60, Some("42")).build().unwrap();
        assert_eq!(request.url().query(), Some("pageSize=60&pageToken=42"));
        assert_eq!(request.headers()["authorization"], "Bearer anon");

        let source = RemoteProfileNames::new("http://localhost:8080/api/profile-names-sitemap", None);
        let request = source.page_request(10, None).build().unwrap();
        assert_eq!(request.url().query(), Some("pageSize=10"));
        assert!(request.headers().get("authorization").is_none());
    }

    #[test]
    fn full_page_without_data_cursor_continues_after_last_id() {
        let page = parse_page(StatusCode::OK, &edge_function_body(51..61, true), 10).unwrap();
        assert_eq!(page.next_cursor(), Some("60"));
        assert_eq!(page.directory_entries().len(), 10);
    }

    #[test]
    fn short_page_without_data_cursor_is_the_last() {
        let page = parse_page(StatusCode::OK, &edge_function_body(61..64, false), 10).unwrap();
        assert_eq!(page.next_cursor(), None);
    }

    #[test]
    fn full_final_page_costs_one_empty_page() {
        let page = parse_page(StatusCode::OK, &edge_function_body(1..11, false), 10).unwrap();
        assert_eq!(page.next_cursor(), Some("10"));
        let page = parse_page(StatusCode::OK, &edge_function_body(11..11, false), 10).unwrap();
        assert_eq!(page.next_cursor(), None);
    }

    #[test]
    fn page_size_below_minimum_is_clamped_before_deriving() {
        let page = parse_page(StatusCode::OK, &edge_function_body(1..11, true), 3).unwrap();
        assert_eq!(page.next_cursor(), Some("10"));
    }

    #[test]
    fn has_more_disagreeing_with_cursor_fails_the_page() {
        let err = parse_page(StatusCode::OK, &edge_function_body(1..4, true), 10).unwrap_err();
        assert!(format!("{err:#}").contains("hasMore=true"));
    }

    #[test]
    fn explicit_data_cursor_wins() {
        let mut body: serde_json::Value = serde_json::from_str(&edge_function_body(1..11, true)).unwrap();
        body["data"]["nextPageToken"] = json!("10");
        let page = parse_page(StatusCode::OK, &body.to_string(), 10).unwrap();
        assert_eq!(page.next_cursor(), Some("10"));
    }

    #[test]
    fn error_statuses_fail_with_the_body() {
        let body = r#"{"error":"relation does not exist","debug":{"type":"Error"}}"#;
        let err = parse_page(StatusCode::INTERNAL_SERVER_ERROR, body, 60).unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("500"));
        assert!(message.contains("relation does not exist"));
        assert!(parse_page(StatusCode::UNAUTHORIZED, "{}", 60).is_err());
    }

    #[test]
    fn malformed_body_fails() {
        let err = parse_page(StatusCode::OK, "<html>", 60).unwrap_err();
        assert!(format!("{err:#}").contains("unexpected profile names page"));
    }
}
