use axum::{
    Json,
    extract::Query,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::profile_names::{ProfileNamesError, ProfileNamesErrorDebug, ProfileNamesQuery, ProfileNamesResponse};
use tracing::{error, info};

use crate::{db_utils::supabase_utils::get_supabase_client, directory::list_page};

const CORS_HEADERS: [(&str, &str); 2] = [
    ("Access-Control-Allow-Origin", "*"),
    ("Access-Control-Allow-Headers", "authorization, x-client-info, apikey, content-type"),
];

/// `GET /api/profile-names-sitemap?pageSize=&pageToken=`
pub async fn profile_names_sitemap(Query(query): Query<ProfileNamesQuery>) -> Response {
    info!(
        "profile-names-sitemap: pageSize={:?} pageToken={:?}",
        query.page_size, query.page_token
    );
    let result = async {
        let client = get_supabase_client()?;
        list_page(&client, query.requested_page_size(), query.cursor()).await
    }
    .await;

    page_response(result)
}

fn page_response(result: anyhow::Result<ProfileNamesResponse>) -> Response {
    match result {
        Ok(page) => (CORS_HEADERS, Json(page)).into_response(),
        Err(e) => {
            error!("profile-names-sitemap failed: {:#}", e);
            let body = ProfileNamesError {
                error: format!("{e:#}"),
                debug: ProfileNamesErrorDebug {
                    error_type: "Error".to_string(),
                },
            };
            (StatusCode::INTERNAL_SERVER_ERROR, CORS_HEADERS, Json(body)).into_response()
        }
    }
}

/// CORS preflight for the listing.
pub async fn profile_names_sitemap_options() -> impl IntoResponse {
    (CORS_HEADERS, "ok")
}
