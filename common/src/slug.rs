//! URL slugs for therapist profile pages.

use unicode_normalization::UnicodeNormalization;

/// Returned when a display name has no ASCII letters or digits left after
/// normalization.
pub const UNKNOWN_SLUG: &str = "unknown-therapist";

/// NFKD-normalize, drop non-ASCII, lowercase, collapse every run of
/// non-alphanumerics into one hyphen and trim hyphens at both ends.
pub fn slugify(display_name: &str) -> String {
    let ascii = display_name
        .nfkd()
        .filter(char::is_ascii)
        .collect::<String>()
        .to_ascii_lowercase();

    let mut slug = String::with_capacity(ascii.len());
    let mut pending_hyphen = false;
    for c in ascii.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c);
        } else {
            pending_hyphen = true;
        }
    }

    if slug.is_empty() {
        UNKNOWN_SLUG.to_string()
    } else {
        slug
    }
}

/// Best-effort display name for a slug, e.g. `dr-jane-q-doe` -> `Dr. Jane Q. Doe`.
pub fn name_from_slug(slug: &str) -> String {
    slug.split('-')
        .filter(|word| !word.is_empty())
        .map(|word| {
            if word == "dr" {
                return "Dr.".to_string();
            }
            if word.len() == 1 {
                return word.to_uppercase() + ".";
            }
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Stored slugs look like `name-part-xxxxxx`: a lowercase name followed by a
/// six character suffix.
pub fn is_valid_profile_slug(slug: &str) -> bool {
    let Some((name_part, suffix)) = slug.rsplit_once('-') else {
        return false;
    };
    let is_slug_char = |c: char| c.is_ascii_lowercase() || c.is_ascii_digit();
    !name_part.is_empty()
        && name_part.chars().all(|c| is_slug_char(c) || c == '-')
        && suffix.len() == 6
        && suffix.chars().all(is_slug_char)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accents_and_apostrophes_are_stripped() {
        assert_eq!(slugify("José O'Brien"), "jose-o-brien");
        assert_eq!(slugify("  Zoë   Saldaña-Pérez "), "zoe-saldana-perez");
        assert_eq!(slugify("Dr. Jane Q. Doe, RP"), "dr-jane-q-doe-rp");
    }

    #[test]
    fn empty_result_falls_back_to_placeholder() {
        assert_eq!(slugify(""), UNKNOWN_SLUG);
        assert_eq!(slugify("---"), UNKNOWN_SLUG);
        assert_eq!(slugify("李小龍"), UNKNOWN_SLUG);
    }

    #[test]
    fn slug_round_trips_to_readable_name() {
        assert_eq!(name_from_slug("dr-jane-q-doe"), "Dr. Jane Q. Doe");
        assert_eq!(name_from_slug("jose-o-brien"), "Jose O. Brien");
    }

    #[test]
    fn stored_slug_format_check() {
        assert!(is_valid_profile_slug("jane-doe-a1b2c3"));
        assert!(!is_valid_profile_slug("jane-doe"));
        assert!(!is_valid_profile_slug("Jane-Doe-a1b2c3"));
        assert!(!is_valid_profile_slug("-a1b2c3"));
        assert!(!is_valid_profile_slug("a1b2c3"));
    }
}
