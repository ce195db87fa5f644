use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use tracing::error;

use crate::{config::ExportConfig, sitemap::generate_sitemap};

/// `GET /sitemap.xml`
pub async fn sitemap_xml() -> Response {
    let result = async {
        let config = ExportConfig::from_env()?;
        generate_sitemap(&config).await
    }
    .await;

    match result {
        Ok(xml) => ([(header::CONTENT_TYPE, "application/xml; charset=utf-8")], xml).into_response(),
        Err(e) => {
            error!("sitemap generation failed: {:#}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "sitemap unavailable").into_response()
        }
    }
}
