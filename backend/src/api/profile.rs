//! Therapist profile lookup by slug.

use common::{slug::slugify, therapist::TherapistProfile};

use crate::db_utils::{
    supabase_utils::{THERAPISTS_TABLE, SupabaseClient, get_supabase_client},
    therapist_record::{THERAPIST_COLUMNS, TherapistRecord},
};

/// How many same-first-name candidates are compared against a name slug.
const NAME_CANDIDATE_LIMIT: u32 = 25;

/// Profile for `slug`. Stored slugs are tried first; site map urls carry
/// slugs derived from the display name, so those are resolved by comparing
/// the slugified names of candidates sharing the first name.
pub async fn get_therapist_profile(slug: String) -> anyhow::Result<Option<TherapistProfile>> {
    let slug = slug.trim().to_ascii_lowercase();
    if slug.is_empty() {
        return Ok(None);
    }
    let client = get_supabase_client()?;

    if let Some(record) = find_by_stored_slug(&client, &slug).await? {
        return Ok(Some(record.into_profile()));
    }

    let Some(first_word) = slug.split('-').next().filter(|w| !w.is_empty()) else {
        return Ok(None);
    };
    let params = vec![
        ("select".to_string(), THERAPIST_COLUMNS.to_string()),
        ("first_name".to_string(), format!("ilike.{first_word}*")),
        ("order".to_string(), "id.asc".to_string()),
        ("limit".to_string(), NAME_CANDIDATE_LIMIT.to_string()),
    ];
    let candidates = client.select::<TherapistRecord>(THERAPISTS_TABLE, &params).await?;
    let found = pick_by_name_slug(candidates, &slug);
    if found.is_none() {
        tracing::info!("get_therapist_profile: no therapist with slug {}", slug);
    }
    Ok(found.map(TherapistRecord::into_profile))
}

async fn find_by_stored_slug(client: &SupabaseClient, slug: &str) -> anyhow::Result<Option<TherapistRecord>> {
    let params = vec![
        ("select".to_string(), THERAPIST_COLUMNS.to_string()),
        ("slug".to_string(), format!("eq.{slug}")),
        ("limit".to_string(), "1".to_string()),
    ];
    let rows = client.select::<TherapistRecord>(THERAPISTS_TABLE, &params).await?;
    Ok(rows.into_iter().next())
}

fn pick_by_name_slug(candidates: Vec<TherapistRecord>, slug: &str) -> Option<TherapistRecord> {
    candidates.into_iter().find(|record| slugify(&record.display_name()) == slug)
}


#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, first: &str, last: &str) -> TherapistRecord {
        TherapistRecord {
            id: id.to_string(),
            first_name: Some(first.to_string()),
            last_name: Some(last.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn name_slug_matches_accented_display_name() {
        let candidates = vec![record("1", "José", "Obrien"), record("2", "José", "O'Brien")];
        let found = pick_by_name_slug(candidates, "jose-o-brien").unwrap();
        assert_eq!(found.id, "2");
        assert!(pick_by_name_slug(vec![record("3", "Jose", "Smith")], "jose-o-brien").is_none());
    }
}
