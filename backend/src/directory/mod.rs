//! Cursor-paginated listing of the therapist table, and the exporter that
//! walks it to build the site map.
//!
//! Rows are ordered by `id` ascending and a page continues strictly after
//! the last id of the previous page, so a walk terminates and never
//! repeats or skips a row (absent concurrent writes).

use std::cmp::Ordering;

use async_trait::async_trait;
use common::{
    profile_names::{ProfileName, ProfileNamesData, ProfileNamesDebug, ProfileNamesResponse, clamp_page_size},
    slug::is_valid_profile_slug,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::db_utils::therapist_record::{display_name, id_from_string_or_number};

mod exporter;
mod memory;
mod source;
mod supabase_table;

pub use exporter::DirectoryExporter;
pub use memory::InMemoryTherapistTable;
pub use source::{LocalProfileNames, ProfileNamesSource, RemoteProfileNames};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TherapistRow {
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
}

impl TherapistRow {
    pub fn display_name(&self) -> String {
        display_name(self.first_name.as_deref(), self.last_name.as_deref())
    }
}

/// Ordered access to the therapist table.
#[async_trait]
pub trait TherapistTable: Send + Sync {
    /// At most `limit` rows with `id > after`, ordered by `id` ascending.
    async fn fetch_after(&self, limit: u32, after: Option<&str>) -> anyhow::Result<Vec<TherapistRow>>;
}

/// Order of two row ids: numerically when both are integers, otherwise
/// bytewise (uuids in their canonical lowercase form sort the same way as
/// in postgres).
pub fn compare_ids(a: &str, b: &str) -> Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(a), Ok(b)) => a.cmp(&b),
        _ => a.cmp(b),
    }
}

/// One page of the profile-names listing.
///
/// The requested size is clamped to `[10, 1000]`. One extra row is read
/// ahead so that `next_page_token` is present exactly when more rows
/// follow; the last page never points at an empty one.
pub async fn list_page<T: TherapistTable + ?Sized>(
    table: &T,
    requested_page_size: i64,
    cursor: Option<&str>,
) -> anyhow::Result<ProfileNamesResponse> {
    let page_size = clamp_page_size(requested_page_size);
    info!(
        "list_page: page size {} (requested {}), cursor {}",
        page_size,
        requested_page_size,
        cursor.unwrap_or("none (first page)")
    );

    let mut rows = table.fetch_after(page_size + 1, cursor).await?;
    let has_more = rows.len() > page_size as usize;
    rows.truncate(page_size as usize);
    let next_page_token = if has_more { rows.last().map(|row| row.id.clone()) } else { None };

    for row in &rows {
        let slug_ok = row.slug.as_deref().is_some_and(is_valid_profile_slug);
        if !slug_ok {
            warn!(
                "list_page: invalid slug format for therapist {}: {:?}",
                row.id,
                row.slug.as_deref().unwrap_or("null")
            );
        }
    }

    let therapists = rows
        .iter()
        .map(|row| ProfileName {
            name: row.display_name(),
            slug: row.slug.clone(),
            id: row.id.clone(),
        })
        .collect::<Vec<_>>();
    let therapist_names = therapists.iter().map(|t| t.name.clone()).collect::<Vec<_>>();
    let timestamp = chrono::Utc::now().timestamp().to_string();

    info!(
        "list_page: {} therapists, next page token {}",
        therapists.len(),
        next_page_token.as_deref().unwrap_or("none (last page)")
    );

    Ok(ProfileNamesResponse {
        debug: ProfileNamesDebug {
            count: therapists.len(),
            timestamp: timestamp.clone(),
            has_more,
            next_page_token: next_page_token.clone(),
            page_size,
            current_page: cursor.unwrap_or("first").to_string(),
        },
        data: ProfileNamesData {
            therapists,
            therapist_names,
            last_modified: timestamp,
            next_page_token,
        },
    })
}
