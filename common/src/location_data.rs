//! Countries and regions that have browse pages.

pub struct Region {
    pub code: &'static str,
    pub name: &'static str,
}

pub struct Country {
    pub code: &'static str,
    pub name: &'static str,
    pub regions: &'static [Region],
}

const CA_REGIONS: &[Region] = &[
    Region { code: "ab", name: "Alberta" },
    Region { code: "bc", name: "British Columbia" },
    Region { code: "mb", name: "Manitoba" },
    Region { code: "nb", name: "New Brunswick" },
    Region { code: "nl", name: "Newfoundland and Labrador" },
    Region { code: "ns", name: "Nova Scotia" },
    Region { code: "nt", name: "Northwest Territories" },
    Region { code: "nu", name: "Nunavut" },
    Region { code: "on", name: "Ontario" },
    Region { code: "pe", name: "Prince Edward Island" },
    Region { code: "qc", name: "Quebec" },
    Region { code: "sk", name: "Saskatchewan" },
    Region { code: "yt", name: "Yukon" },
];

const US_REGIONS: &[Region] = &[
    Region { code: "ca", name: "California" },
    Region { code: "fl", name: "Florida" },
    Region { code: "il", name: "Illinois" },
    Region { code: "ma", name: "Massachusetts" },
    Region { code: "ny", name: "New York" },
    Region { code: "tx", name: "Texas" },
    Region { code: "wa", name: "Washington" },
];

pub const COUNTRIES: &[Country] = &[
    Country { code: "ca", name: "Canada", regions: CA_REGIONS },
    Country { code: "us", name: "United States", regions: US_REGIONS },
];

pub fn find_country(code: &str) -> Option<&'static Country> {
    COUNTRIES.iter().find(|c| c.code.eq_ignore_ascii_case(code))
}

pub fn find_region(country_code: &str, region_code: &str) -> Option<&'static Region> {
    find_country(country_code)?
        .regions
        .iter()
        .find(|r| r.code.eq_ignore_ascii_case(region_code))
}

pub fn is_valid_region(country_code: &str, region_code: &str) -> bool {
    find_region(country_code, region_code).is_some()
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookups_ignore_case() {
        assert_eq!(find_country("CA").map(|c| c.name), Some("Canada"));
        assert_eq!(find_region("ca", "ON").map(|r| r.name), Some("Ontario"));
        assert!(is_valid_region("us", "ny"));
        assert!(!is_valid_region("ca", "ny"));
        assert!(!is_valid_region("fr", "on"));
    }
}
