//! Row shape of the `therapists` table and its mapping to shared models.

use common::{
    filter_criteria::Gender,
    therapist::{TherapistProfile, TherapistSummary},
};
use serde::{Deserialize, Deserializer, Serialize};

/// Columns fetched for search results and profile pages.
pub const THERAPIST_COLUMNS: &str = "id,first_name,last_name,slug,title,gender,location,country,\
available_online,available_in_person,fee_initial,fee_subsequent,areas_of_focus,short_summary,\
profile_image_url,bio,clinic,qualifications,approaches,languages,insurance_providers,sliding_scale,\
booking_link,bio_link";

/// Ids are uuids in production but integer keys are accepted too.
pub fn id_from_string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!("unexpected therapist id: {other}"))),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TherapistRecord {
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub slug: Option<String>,
    pub title: Option<String>,
    pub gender: Option<String>,
    pub location: Option<String>,
    pub country: Option<String>,
    pub available_online: Option<bool>,
    pub available_in_person: Option<bool>,
    pub fee_initial: Option<f64>,
    pub fee_subsequent: Option<f64>,
    pub areas_of_focus: Option<Vec<String>>,
    pub short_summary: Option<String>,
    pub profile_image_url: Option<String>,
    pub bio: Option<String>,
    pub clinic: Option<String>,
    pub qualifications: Option<Vec<String>>,
    pub approaches: Option<Vec<String>>,
    pub languages: Option<Vec<String>>,
    pub insurance_providers: Option<Vec<String>>,
    pub sliding_scale: Option<bool>,
    pub booking_link: Option<String>,
    pub bio_link: Option<String>,
}

pub fn display_name(first_name: Option<&str>, last_name: Option<&str>) -> String {
    format!("{} {}", first_name.unwrap_or(""), last_name.unwrap_or("")).trim().to_string()
}

fn parse_gender(value: Option<&str>) -> Option<Gender> {
    match value?.trim().to_ascii_lowercase().replace(['-', ' '], "_").as_str() {
        "male" => Some(Gender::Male),
        "female" => Some(Gender::Female),
        "non_binary" | "nonbinary" => Some(Gender::NonBinary),
        _ => None,
    }
}

impl TherapistRecord {
    pub fn display_name(&self) -> String {
        display_name(self.first_name.as_deref(), self.last_name.as_deref())
    }

    pub fn to_summary(&self) -> TherapistSummary {
        TherapistSummary {
            id: self.id.clone(),
            name: self.display_name(),
            slug: self.slug.clone(),
            title: self.title.clone(),
            gender: parse_gender(self.gender.as_deref()),
            location: self.location.clone(),
            country: self.country.clone(),
            available_online: self.available_online.unwrap_or(false),
            available_in_person: self.available_in_person.unwrap_or(false),
            fee_initial: self.fee_initial,
            fee_subsequent: self.fee_subsequent,
            areas_of_focus: self.areas_of_focus.clone().unwrap_or_default(),
            short_summary: self.short_summary.clone(),
            profile_image_url: self.profile_image_url.clone(),
        }
    }

    pub fn into_profile(self) -> TherapistProfile {
        TherapistProfile {
            summary: self.to_summary(),
            bio: self.bio.unwrap_or_default(),
            clinic: self.clinic,
            qualifications: self.qualifications.unwrap_or_default(),
            approaches: self.approaches.unwrap_or_default(),
            languages: self.languages.unwrap_or_default(),
            insurance_providers: self.insurance_providers.unwrap_or_default(),
            sliding_scale: self.sliding_scale.unwrap_or(false),
            booking_link: self.booking_link,
            bio_link: self.bio_link,
        }
    }
}
