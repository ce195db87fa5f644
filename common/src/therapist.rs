//! Shared therapist records exchanged between frontend and backend.

use serde::{Deserialize, Serialize};

use crate::filter_criteria::{FilterCriteria, Gender};


/// One row of a search result set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TherapistSummary {
    pub id: String,
    pub name: String,
    pub slug: Option<String>,
    pub title: Option<String>,
    pub gender: Option<Gender>,
    pub location: Option<String>,
    pub country: Option<String>,
    pub available_online: bool,
    pub available_in_person: bool,
    pub fee_initial: Option<f64>,
    pub fee_subsequent: Option<f64>,
    pub areas_of_focus: Vec<String>,
    pub short_summary: Option<String>,
    pub profile_image_url: Option<String>,
}

impl TherapistSummary {
    /// Path segment of the profile page. Falls back to a slug derived from
    /// the display name when the stored slug is missing.
    pub fn profile_slug(&self) -> String {
        match &self.slug {
            Some(slug) if !slug.is_empty() => slug.clone(),
            _ => crate::slug::slugify(&self.name),
        }
    }

    pub fn session_types(&self) -> Vec<&'static str> {
        let mut types = Vec::new();
        if self.available_online {
            types.push("Virtual");
        }
        if self.available_in_person {
            types.push("In-person");
        }
        types
    }
}

/// Detailed profile shown on the therapist page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TherapistProfile {
    #[serde(flatten)]
    pub summary: TherapistSummary,
    pub bio: String,
    pub clinic: Option<String>,
    pub qualifications: Vec<String>,
    pub approaches: Vec<String>,
    pub languages: Vec<String>,
    pub insurance_providers: Vec<String>,
    pub sliding_scale: bool,
    pub booking_link: Option<String>,
    pub bio_link: Option<String>,
}

/// Parsed "Degree from Institution (Year)" qualification line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Qualification {
    pub degree: String,
    pub institution: Option<String>,
    pub year: Option<u16>,
}

impl Qualification {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        let parsed = line.rsplit_once(" (").and_then(|(head, tail)| {
            let year = tail.strip_suffix(')')?.trim().parse::<u16>().ok()?;
            let (degree, institution) = head.rsplit_once(" from ")?;
            Some(Qualification {
                degree: degree.trim().to_string(),
                institution: Some(institution.trim().to_string()),
                year: Some(year),
            })
        });
        parsed.unwrap_or_else(|| Qualification { degree: line.to_string(), institution: None, year: None })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TherapistSearchResponse {
    pub success: bool,
    pub criteria: FilterCriteria,
    pub therapists: Vec<TherapistSummary>,
    pub error: Option<String>,
}

/// Record produced by the directory exporter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryEntry {
    pub id: String,
    pub display_name: String,
    pub slug: Option<String>,
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qualification_lines_are_parsed() {
        let q = Qualification::parse("MSW from University of Toronto (2015)");
        assert_eq!(q.degree, "MSW");
        assert_eq!(q.institution.as_deref(), Some("University of Toronto"));
        assert_eq!(q.year, Some(2015));

        let q = Qualification::parse("Registered Psychotherapist");
        assert_eq!(q.degree, "Registered Psychotherapist");
        assert_eq!(q.institution, None);
        assert_eq!(q.year, None);
    }

    #[test]
    fn profile_slug_falls_back_to_name() {
        let mut summary = TherapistSummary { name: "Anne-Marie Côté".to_string(), ..Default::default() };
        assert_eq!(summary.profile_slug(), "anne-marie-cote");
        summary.slug = Some("anne-marie-cote-a1b2c3".to_string());
        assert_eq!(summary.profile_slug(), "anne-marie-cote-a1b2c3");
    }
}
