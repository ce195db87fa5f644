pub mod profile_names_sitemap;
pub mod sitemap_xml;
