//! Shared filter criteria for the therapist search, and the update actions
//! that mutate them.
//!
//! Every facet is an `Option`: `None` means "no filter". A present
//! multi-select facet always holds at least one tag once
//! [`FilterCriteria::normalized`] has run, so an empty set is never sent
//! to the backend.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};


#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    NonBinary,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::NonBinary];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::NonBinary => "non_binary",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::NonBinary => "Non-Binary",
        }
    }
}

/// Delivery method. An absent availability filter matches therapists
/// offering either method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    Online,
    InPerson,
}

impl Availability {
    pub const ALL: [Availability; 2] = [Availability::Online, Availability::InPerson];

    pub fn as_str(&self) -> &'static str {
        match self {
            Availability::Online => "online",
            Availability::InPerson => "in_person",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Availability::Online => "Online",
            Availability::InPerson => "In Person",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PriceFacet {
    Initial,
    Subsequent,
}

impl PriceFacet {
    pub const ALL: [PriceFacet; 2] = [PriceFacet::Initial, PriceFacet::Subsequent];

    pub fn field_name(&self) -> &'static str {
        match self {
            PriceFacet::Initial => "max_price_initial",
            PriceFacet::Subsequent => "max_price_subsequent",
        }
    }
}

/// Multi-select facets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TagFacet {
    Format,
    AreasOfFocus,
    Ethnicity,
    Sexuality,
    Faith,
}

impl TagFacet {
    pub const ALL: [TagFacet; 5] = [
        TagFacet::Format,
        TagFacet::AreasOfFocus,
        TagFacet::Ethnicity,
        TagFacet::Sexuality,
        TagFacet::Faith,
    ];

    pub fn field_name(&self) -> &'static str {
        match self {
            TagFacet::Format => "format",
            TagFacet::AreasOfFocus => "areas_of_focus",
            TagFacet::Ethnicity => "ethnicity",
            TagFacet::Sexuality => "sexuality",
            TagFacet::Faith => "faith",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            TagFacet::Format => "Therapy Format",
            TagFacet::AreasOfFocus => "Areas of Focus",
            TagFacet::Ethnicity => "Ethnicity",
            TagFacet::Sexuality => "Sexuality",
            TagFacet::Faith => "Faith",
        }
    }
}


#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FilterCriteria {
    pub max_price_initial: Option<f64>,
    pub max_price_subsequent: Option<f64>,
    pub gender: Option<Gender>,
    pub availability: Option<Availability>,
    pub format: Option<BTreeSet<String>>,
    pub areas_of_focus: Option<BTreeSet<String>>,
    pub ethnicity: Option<BTreeSet<String>>,
    pub sexuality: Option<BTreeSet<String>>,
    pub faith: Option<BTreeSet<String>>,
}

/// A single keyed change to one facet. `None` clears the facet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FacetChange {
    MaxPrice(PriceFacet, Option<f64>),
    Gender(Option<Gender>),
    Availability(Option<Availability>),
    Tags(TagFacet, Option<BTreeSet<String>>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FilterUpdate {
    /// Replace the whole criteria.
    Replace(FilterCriteria),
    /// Merge keyed changes into the current criteria, leaving other facets untouched.
    Merge(Vec<FacetChange>),
}

impl From<FacetChange> for FilterUpdate {
    fn from(change: FacetChange) -> Self {
        FilterUpdate::Merge(vec![change])
    }
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    pub fn max_price(&self, facet: PriceFacet) -> Option<f64> {
        match facet {
            PriceFacet::Initial => self.max_price_initial,
            PriceFacet::Subsequent => self.max_price_subsequent,
        }
    }

    fn max_price_mut(&mut self, facet: PriceFacet) -> &mut Option<f64> {
        match facet {
            PriceFacet::Initial => &mut self.max_price_initial,
            PriceFacet::Subsequent => &mut self.max_price_subsequent,
        }
    }

    pub fn tags(&self, facet: TagFacet) -> Option<&BTreeSet<String>> {
        match facet {
            TagFacet::Format => self.format.as_ref(),
            TagFacet::AreasOfFocus => self.areas_of_focus.as_ref(),
            TagFacet::Ethnicity => self.ethnicity.as_ref(),
            TagFacet::Sexuality => self.sexuality.as_ref(),
            TagFacet::Faith => self.faith.as_ref(),
        }
    }

    fn tags_mut(&mut self, facet: TagFacet) -> &mut Option<BTreeSet<String>> {
        match facet {
            TagFacet::Format => &mut self.format,
            TagFacet::AreasOfFocus => &mut self.areas_of_focus,
            TagFacet::Ethnicity => &mut self.ethnicity,
            TagFacet::Sexuality => &mut self.sexuality,
            TagFacet::Faith => &mut self.faith,
        }
    }

    pub fn has_tag(&self, facet: TagFacet, tag: &str) -> bool {
        self.tags(facet).is_some_and(|tags| tags.contains(tag))
    }

    /// Collapse vacuous values to `None`: empty tag sets, blank tags, and
    /// negative or non-finite prices.
    pub fn normalized(mut self) -> Self {
        for facet in PriceFacet::ALL {
            let price = self.max_price_mut(facet);
            *price = normalize_price(*price);
        }
        for facet in TagFacet::ALL {
            let tags = self.tags_mut(facet);
            *tags = normalize_tags(tags.take());
        }
        self
    }

    pub fn apply(&mut self, change: FacetChange) {
        match change {
            FacetChange::MaxPrice(facet, value) => *self.max_price_mut(facet) = normalize_price(value),
            FacetChange::Gender(value) => self.gender = value,
            FacetChange::Availability(value) => self.availability = value,
            FacetChange::Tags(facet, value) => *self.tags_mut(facet) = normalize_tags(value),
        }
    }

    /// The normalized criteria that result from applying `update` to `self`.
    pub fn merged(&self, update: FilterUpdate) -> Self {
        match update {
            FilterUpdate::Replace(criteria) => criteria.normalized(),
            FilterUpdate::Merge(changes) => {
                let mut merged = self.clone();
                for change in changes {
                    merged.apply(change);
                }
                merged.normalized()
            }
        }
    }

    /// Selecting an unselected tag adds it, selecting a selected tag removes
    /// it. Removing the last tag clears the facet.
    pub fn toggle_tag(&self, facet: TagFacet, tag: &str) -> FacetChange {
        let tag = tag.trim();
        let mut tags = self.tags(facet).cloned().unwrap_or_default();
        if !tags.remove(tag) {
            tags.insert(tag.to_string());
        }
        FacetChange::Tags(facet, normalize_tags(Some(tags)))
    }

    pub fn clear_tags(facet: TagFacet) -> FacetChange {
        FacetChange::Tags(facet, None)
    }

    /// Radio-with-deselect: the active value clears, any other value replaces.
    pub fn toggle_gender(&self, gender: Gender) -> FacetChange {
        if self.gender == Some(gender) {
            FacetChange::Gender(None)
        } else {
            FacetChange::Gender(Some(gender))
        }
    }

    pub fn toggle_availability(&self, availability: Availability) -> FacetChange {
        if self.availability == Some(availability) {
            FacetChange::Availability(None)
        } else {
            FacetChange::Availability(Some(availability))
        }
    }
}

pub fn normalize_price(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v >= 0.0)
}

pub fn normalize_tags(tags: Option<BTreeSet<String>>) -> Option<BTreeSet<String>> {
    let tags = tags?
        .into_iter()
        .map(|tag| tag.trim().to_string())
        .filter(|tag| !tag.is_empty())
        .collect::<BTreeSet<_>>();
    if tags.is_empty() { None } else { Some(tags) }
}

/// Parse the text of a price input. Blank text means "no limit"; text that
/// is not a non-negative number is also treated as no limit.
pub fn parse_price_input(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    normalize_price(text.parse::<f64>().ok())
}

pub fn format_price_input(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
