//! Site map of the public pages: static routes, browse routes per country
//! and region, and one profile route per therapist in the directory.

use std::io::Cursor;

use chrono::{DateTime, SecondsFormat, Utc};
use common::{location_data::COUNTRIES, slug::slugify, therapist::DirectoryEntry};
use quick_xml::{
    Writer,
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};
use tracing::{error, info};

use crate::{
    config::ExportConfig,
    db_utils::supabase_utils::get_supabase_client,
    directory::{DirectoryExporter, LocalProfileNames, ProfileNamesSource, RemoteProfileNames},
};

const SITEMAP_NAMESPACE: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeFrequency {
    Daily,
    Weekly,
    Monthly,
}

impl ChangeFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeFrequency::Daily => "daily",
            ChangeFrequency::Weekly => "weekly",
            ChangeFrequency::Monthly => "monthly",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SitemapEntry {
    pub url: String,
    pub last_modified: DateTime<Utc>,
    pub change_frequency: ChangeFrequency,
    pub priority: f32,
}

const STATIC_ROUTES: &[(&str, ChangeFrequency, f32)] = &[
    ("", ChangeFrequency::Daily, 1.0),
    ("/about", ChangeFrequency::Weekly, 0.8),
    ("/contact", ChangeFrequency::Monthly, 0.5),
    ("/therapists/browse", ChangeFrequency::Daily, 0.9),
];

/// All routes of the site map, every one stamped with `now`.
pub fn build_sitemap(base_url: &str, entries: &[DirectoryEntry], now: DateTime<Utc>) -> Vec<SitemapEntry> {
    let base_url = base_url.trim_end_matches('/');
    let entry = |url: String, change_frequency, priority| SitemapEntry {
        url,
        last_modified: now,
        change_frequency,
        priority,
    };

    let mut routes = STATIC_ROUTES
        .iter()
        .map(|(path, freq, priority)| entry(format!("{base_url}{path}"), *freq, *priority))
        .collect::<Vec<_>>();

    for country in COUNTRIES {
        routes.push(entry(
            format!("{base_url}/therapists/browse/{}", country.code),
            ChangeFrequency::Daily,
            0.9,
        ));
        for region in country.regions {
            routes.push(entry(
                format!("{base_url}/therapists/browse/{}/{}", country.code, region.code),
                ChangeFrequency::Daily,
                0.9,
            ));
        }
    }

    routes.extend(entries.iter().map(|therapist| {
        entry(
            format!("{base_url}/therapists/{}", slugify(&therapist.display_name)),
            ChangeFrequency::Weekly,
            0.9,
        )
    }));
    routes
}

/// sitemaps.org `urlset` document.
pub fn render_sitemap_xml(entries: &[SitemapEntry]) -> anyhow::Result<String> {
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    writer.write_event(Event::Start(
        BytesStart::new("urlset").with_attributes([("xmlns", SITEMAP_NAMESPACE)]),
    ))?;
    for entry in entries {
        let lastmod = entry.last_modified.to_rfc3339_opts(SecondsFormat::Secs, true);
        let priority = format!("{:.1}", entry.priority);
        writer.write_event(Event::Start(BytesStart::new("url")))?;
        for (tag, value) in [
            ("loc", entry.url.as_str()),
            ("lastmod", lastmod.as_str()),
            ("changefreq", entry.change_frequency.as_str()),
            ("priority", priority.as_str()),
        ] {
            writer.write_event(Event::Start(BytesStart::new(tag)))?;
            writer.write_event(Event::Text(BytesText::new(value)))?;
            writer.write_event(Event::End(BytesEnd::new(tag)))?;
        }
        writer.write_event(Event::End(BytesEnd::new("url")))?;
    }
    writer.write_event(Event::End(BytesEnd::new("urlset")))?;
    let xml = String::from_utf8(writer.into_inner().into_inner())?;
    Ok(xml)
}

/// Site map routes for an export result. A failed export publishes an
/// empty site map rather than a partial one.
pub fn sitemap_routes(
    base_url: &str,
    exported: anyhow::Result<Vec<DirectoryEntry>>,
    now: DateTime<Utc>,
) -> Vec<SitemapEntry> {
    match exported {
        Ok(entries) => build_sitemap(base_url, &entries, now),
        Err(e) => {
            error!("directory export failed, publishing an empty sitemap: {:#}", e);
            Vec::new()
        }
    }
}

/// Export the directory and render the site map.
pub async fn generate_sitemap(config: &ExportConfig) -> anyhow::Result<String> {
    let exported = match &config.profile_names_url {
        Some(url) => export_entries(RemoteProfileNames::new(url.clone(), config.anon_key.clone()), config).await,
        None => export_entries(LocalProfileNames::new(get_supabase_client()?), config).await,
    };
    let routes = sitemap_routes(&config.base_url, exported, Utc::now());
    info!("sitemap: {} routes", routes.len());
    render_sitemap_xml(&routes)
}

async fn export_entries<S: ProfileNamesSource>(source: S, config: &ExportConfig) -> anyhow::Result<Vec<DirectoryEntry>> {
    DirectoryExporter::from_config(source, config).fetch_all().await
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn therapist(id: &str, name: &str) -> DirectoryEntry {
        DirectoryEntry {
            id: id.to_string(),
            display_name: name.to_string(),
            slug: None,
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    fn browse_route_count() -> usize {
        COUNTRIES.iter().map(|c| 1 + c.regions.len()).sum()
    }

    #[test]
    fn static_and_browse_routes_without_therapists() {
        let routes = build_sitemap("https://www.matchya.app/", &[], now());
        assert_eq!(routes.len(), STATIC_ROUTES.len() + browse_route_count());
        assert_eq!(routes[0].url, "https://www.matchya.app");
        assert_eq!(routes[0].priority, 1.0);
        assert_eq!(routes[2].change_frequency, ChangeFrequency::Monthly);
        assert!(routes.iter().any(|r| r.url == "https://www.matchya.app/therapists/browse/ca/on"));
        assert!(routes.iter().all(|r| r.last_modified == now()));
    }

    #[test]
    fn therapist_routes_use_name_slugs() {
        let entries = [therapist("1", "José O'Brien"), therapist("2", "  ")];
        let routes = build_sitemap("http://localhost:8080", &entries, now());
        let therapist_routes = &routes[routes.len() - 2..];
        assert_eq!(therapist_routes[0].url, "http://localhost:8080/therapists/jose-o-brien");
        assert_eq!(therapist_routes[1].url, "http://localhost:8080/therapists/unknown-therapist");
        assert!(therapist_routes.iter().all(|r| r.change_frequency == ChangeFrequency::Weekly));
    }

    #[test]
    fn failed_export_publishes_empty_sitemap() {
        let routes = sitemap_routes("https://www.matchya.app", Err(anyhow::anyhow!("page 2 timed out")), now());
        assert!(routes.is_empty());
        let xml = render_sitemap_xml(&routes).unwrap();
        assert!(xml.contains("<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">"));
        assert_eq!(xml.matches("<url>").count(), 0);

        let routes = sitemap_routes("https://www.matchya.app", Ok(vec![therapist("1", "Jane Doe")]), now());
        assert_eq!(routes.len(), STATIC_ROUTES.len() + browse_route_count() + 1);
    }

    #[test]
    fn xml_is_a_urlset_with_escaped_locations() {
        let routes = vec![SitemapEntry {
            url: "https://example.com/?a=1&b=2".to_string(),
            last_modified: now(),
            change_frequency: ChangeFrequency::Daily,
            priority: 0.9,
        }];
        let xml = render_sitemap_xml(&routes).unwrap();
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains("<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">"));
        assert!(xml.contains("<loc>https://example.com/?a=1&amp;b=2</loc>"));
        assert!(xml.contains("<lastmod>2024-05-01T12:00:00Z</lastmod>"));
        assert!(xml.contains("<changefreq>daily</changefreq>"));
        assert!(xml.contains("<priority>0.9</priority>"));
        assert_eq!(xml.matches("<url>").count(), 1);
    }
}
