//! PostgREST filter builder for therapist searches.

use common::filter_criteria::{Availability, FilterCriteria, PriceFacet, TagFacet};

/// Search result cap; the UI shows a single scrolling list.
pub const SEARCH_RESULT_LIMIT: u32 = 50;

pub fn price_column(facet: PriceFacet) -> &'static str {
    match facet {
        PriceFacet::Initial => "fee_initial",
        PriceFacet::Subsequent => "fee_subsequent",
    }
}

pub fn tag_column(facet: TagFacet) -> &'static str {
    match facet {
        TagFacet::Format => "formats",
        TagFacet::AreasOfFocus => "areas_of_focus",
        TagFacet::Ethnicity => "ethnicity",
        TagFacet::Sexuality => "sexuality",
        TagFacet::Faith => "faith",
    }
}

/// Element of a PostgREST array literal, always double quoted.
fn quote_array_element(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}

/// Column filters for `criteria`. Absent facets add nothing. A multi-select
/// facet matches therapists whose column overlaps any selected tag.
pub fn build_postgrest_filters(criteria: &FilterCriteria) -> Vec<(String, String)> {
    let mut params = Vec::new();

    for facet in PriceFacet::ALL {
        if let Some(max_price) = criteria.max_price(facet) {
            params.push((price_column(facet).to_string(), format!("lte.{max_price}")));
        }
    }

    if let Some(gender) = criteria.gender {
        params.push(("gender".to_string(), format!("eq.{}", gender.as_str())));
    }

    // no availability filter matches both delivery methods
    match criteria.availability {
        Some(Availability::Online) => params.push(("available_online".to_string(), "eq.true".to_string())),
        Some(Availability::InPerson) => params.push(("available_in_person".to_string(), "eq.true".to_string())),
        None => {}
    }

    for facet in TagFacet::ALL {
        if let Some(tags) = criteria.tags(facet) {
            let values = tags.iter().map(|tag| quote_array_element(tag)).collect::<Vec<_>>().join(",");
            params.push((tag_column(facet).to_string(), format!("ov.{{{values}}}")));
        }
    }

    params
}
