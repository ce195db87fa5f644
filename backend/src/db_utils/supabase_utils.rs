//! Thin PostgREST client for the Supabase project holding the therapist table.

use anyhow::Context;
use serde::de::DeserializeOwned;

pub const THERAPISTS_TABLE: &str = "therapists";

#[derive(Debug, Clone)]
pub struct SupabaseClient {
    base_url: String,
    anon_key: String,
    http: reqwest::Client,
}

pub fn get_supabase_client() -> anyhow::Result<SupabaseClient> {
    let base_url = std::env::var("SUPABASE_URL").context("SUPABASE_URL is not set")?;
    let anon_key = std::env::var("SUPABASE_ANON_KEY").context("SUPABASE_ANON_KEY is not set")?;
    Ok(SupabaseClient::new(base_url, anon_key))
}

impl SupabaseClient {
    pub fn new(base_url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
            http: reqwest::Client::new(),
        }
    }

    pub fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    /// `GET /rest/v1/{table}` with PostgREST query parameters
    /// (`select`, `order`, `limit`, and column filters such as `id=gt.x`).
    pub async fn select<T: DeserializeOwned>(&self, table: &str, params: &[(String, String)]) -> anyhow::Result<Vec<T>> {
        let t0 = std::time::Instant::now();
        let response = self
            .http
            .get(self.table_url(table))
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
            .query(params)
            .send()
            .await
            .with_context(|| format!("supabase request to {table} failed"))?;
        let status = response.status();
        let response_txt = response.text().await?;
        if status.is_client_error() || status.is_server_error() {
            anyhow::bail!("Supabase error on {}: {}: {}", table, status, response_txt);
        }
        tracing::debug!(
            "supabase select {} returned {} bytes in {}ms",
            table,
            response_txt.len(),
            t0.elapsed().as_millis()
        );
        let rows = serde_json::from_str::<Vec<T>>(&response_txt)
            .with_context(|| format!("unexpected rows from {table}"))?;
        Ok(rows)
    }
}
