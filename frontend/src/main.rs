//! Frontend application entry point.

use frontend::app::App;

fn main() {
    #[cfg(not(feature = "server"))]
    dioxus::launch(App);

    #[cfg(feature = "server")]
    dioxus::serve(|| async move {
        use axum::{extract::Request, middleware::Next};
        use dioxus::server::axum;

        Ok(dioxus::server::router(App)
            .route(
                "/api/profile-names-sitemap",
                axum::routing::get(backend::server_extra::profile_names_sitemap::profile_names_sitemap)
                    .options(backend::server_extra::profile_names_sitemap::profile_names_sitemap_options),
            )
            .route("/sitemap.xml", axum::routing::get(backend::server_extra::sitemap_xml::sitemap_xml))
            .layer(axum::middleware::from_fn(
                |request: Request, next: Next| async move {
                    let path = request.uri().path().to_string();
                    let res = next.run(request).await;
                    if res.status().is_server_error() {
                        dioxus::logger::tracing::warn!("{} -> {}", path, res.status());
                    }
                    res
                },
            )))
    });
}
