//! Environment configuration for the site map export.

use std::time::Duration;

use anyhow::Context;
use common::profile_names::DEFAULT_PAGE_SIZE;

pub const DEFAULT_PAGE_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_PAGE_ATTEMPTS: u32 = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct ExportConfig {
    /// Public origin used to build absolute urls, without a trailing slash.
    pub base_url: String,
    /// Remote profile-names endpoint. When unset the therapist table is
    /// paged directly through Supabase.
    pub profile_names_url: Option<String>,
    pub anon_key: Option<String>,
    pub page_size: u32,
    pub page_timeout: Duration,
    pub max_attempts: u32,
}

impl ExportConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let non_empty = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let base_url = non_empty("PUBLIC_BASE_URL").context("PUBLIC_BASE_URL must be set")?;
        let page_size = match non_empty("SITEMAP_PAGE_SIZE") {
            Some(v) => v.parse::<u32>().with_context(|| format!("invalid SITEMAP_PAGE_SIZE: {v}"))?,
            None => DEFAULT_PAGE_SIZE,
        };
        let page_timeout = match non_empty("SITEMAP_PAGE_TIMEOUT_SECS") {
            Some(v) => Duration::from_secs(v.parse::<u64>().with_context(|| format!("invalid SITEMAP_PAGE_TIMEOUT_SECS: {v}"))?),
            None => DEFAULT_PAGE_TIMEOUT,
        };
        let max_attempts = match non_empty("SITEMAP_PAGE_ATTEMPTS") {
            Some(v) => v.parse::<u32>().with_context(|| format!("invalid SITEMAP_PAGE_ATTEMPTS: {v}"))?,
            None => DEFAULT_PAGE_ATTEMPTS,
        };
        if max_attempts == 0 {
            anyhow::bail!("SITEMAP_PAGE_ATTEMPTS must be at least 1");
        }

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            profile_names_url: non_empty("PROFILE_NAMES_URL"),
            anon_key: non_empty("SUPABASE_ANON_KEY"),
            page_size,
            page_timeout,
            max_attempts,
        })
    }
}
