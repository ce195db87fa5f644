use async_trait::async_trait;

use super::{TherapistRow, TherapistTable};
use crate::db_utils::supabase_utils::{SupabaseClient, THERAPISTS_TABLE};

#[async_trait]
impl TherapistTable for SupabaseClient {
    async fn fetch_after(&self, limit: u32, after: Option<&str>) -> anyhow::Result<Vec<TherapistRow>> {
        let mut params = vec![
            ("select".to_string(), "id,first_name,last_name,slug".to_string()),
            ("order".to_string(), "id.asc".to_string()),
            ("limit".to_string(), limit.to_string()),
        ];
        if let Some(after) = after {
            params.push(("id".to_string(), format!("gt.{after}")));
        }
        self.select::<TherapistRow>(THERAPISTS_TABLE, &params).await
    }
}
