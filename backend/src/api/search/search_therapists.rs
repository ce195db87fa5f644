//! Search endpoint for therapist result lists.

use common::{filter_criteria::FilterCriteria, therapist::TherapistSearchResponse};
use tracing::info;

use crate::api::search::search_filters::{SEARCH_RESULT_LIMIT, build_postgrest_filters};
use crate::db_utils::{
    supabase_utils::{THERAPISTS_TABLE, get_supabase_client},
    therapist_record::{THERAPIST_COLUMNS, TherapistRecord},
};

pub async fn search_therapists(criteria: FilterCriteria) -> anyhow::Result<TherapistSearchResponse> {
    let criteria = criteria.normalized();
    let mut params = vec![
        ("select".to_string(), THERAPIST_COLUMNS.to_string()),
        ("order".to_string(), "last_name.asc,first_name.asc,id.asc".to_string()),
        ("limit".to_string(), SEARCH_RESULT_LIMIT.to_string()),
    ];
    params.extend(build_postgrest_filters(&criteria));

    let client = get_supabase_client()?;
    let rows = client.select::<TherapistRecord>(THERAPISTS_TABLE, &params).await?;
    info!("search_therapists: {} results for {:?}", rows.len(), criteria);

    Ok(TherapistSearchResponse {
        success: true,
        therapists: rows.iter().map(TherapistRecord::to_summary).collect(),
        criteria,
        error: None,
    })
}
