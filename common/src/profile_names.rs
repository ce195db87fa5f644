//! Wire format of the paginated profile-names listing used to build the
//! site map.

use serde::{Deserialize, Serialize};

use crate::therapist::DirectoryEntry;

pub const MIN_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 1000;
pub const DEFAULT_PAGE_SIZE: u32 = 60;

/// Page size actually served for a requested one.
pub fn clamp_page_size(requested: i64) -> u32 {
    requested.clamp(MIN_PAGE_SIZE as i64, MAX_PAGE_SIZE as i64) as u32
}

/// Query string of `GET /api/profile-names-sitemap`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProfileNamesQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_token: Option<String>,
}

impl ProfileNamesQuery {
    pub fn new(page_size: u32, page_token: Option<&str>) -> Self {
        Self {
            page_size: Some(page_size.to_string()),
            page_token: page_token.map(|t| t.to_string()),
        }
    }

    /// Missing or unparsable sizes fall back to the default.
    pub fn requested_page_size(&self) -> i64 {
        self.page_size
            .as_deref()
            .and_then(|s| s.trim().parse::<i64>().ok())
            .unwrap_or(DEFAULT_PAGE_SIZE as i64)
    }

    pub fn cursor(&self) -> Option<&str> {
        self.page_token.as_deref().filter(|t| !t.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileName {
    pub name: String,
    pub slug: Option<String>,
    pub id: String,
}

impl ProfileName {
    pub fn to_directory_entry(&self) -> DirectoryEntry {
        DirectoryEntry {
            id: self.id.clone(),
            display_name: self.name.clone(),
            slug: self.slug.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileNamesData {
    pub therapists: Vec<ProfileName>,
    /// Convenience copy of the names, kept for older clients.
    pub therapist_names: Vec<String>,
    pub last_modified: String,
    /// Id of the last row when more rows follow; absent on the last page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}

/// Diagnostics only. Callers must not drive pagination from this block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileNamesDebug {
    pub count: usize,
    pub timestamp: String,
    pub has_more: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
    pub page_size: u32,
    pub current_page: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileNamesResponse {
    pub data: ProfileNamesData,
    pub debug: ProfileNamesDebug,
}

impl ProfileNamesResponse {
    pub fn next_cursor(&self) -> Option<&str> {
        self.data.next_page_token.as_deref()
    }

    pub fn directory_entries(&self) -> Vec<DirectoryEntry> {
        self.data.therapists.iter().map(ProfileName::to_directory_entry).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileNamesErrorDebug {
    #[serde(rename = "type")]
    pub error_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileNamesError {
    pub error: String,
    pub debug: ProfileNamesErrorDebug,
}
