//! Static jurisdiction map.
//!
//! Maps lowercase jurisdiction keys (state, city, or country) to rule-file
//! locations relative to the base rule file's directory. Unknown keys are
//! not an error; the rule store skips them.

/// US states and DC whose overlay files live under `us_states/`.
const US_STATES: &[&str] = &[
    "alabama",
    "alaska",
    "arizona",
    "arkansas",
    "colorado",
    "connecticut",
    "dc",
    "delaware",
    "florida",
    "georgia",
    "hawaii",
    "idaho",
    "illinois",
    "indiana",
    "iowa",
    "kansas",
    "kentucky",
    "louisiana",
    "maine",
    "maryland",
    "massachusetts",
    "michigan",
    "minnesota",
    "mississippi",
    "missouri",
    "montana",
    "nebraska",
    "nevada",
    "new_hampshire",
    "new_jersey",
    "new_mexico",
    "new_york",
    "north_carolina",
    "north_dakota",
    "ohio",
    "oklahoma",
    "oregon",
    "pennsylvania",
    "rhode_island",
    "south_carolina",
    "south_dakota",
    "tennessee",
    "texas",
    "utah",
    "vermont",
    "virginia",
    "washington",
    "west_virginia",
    "wisconsin",
    "wyoming",
];

/// Countries whose overlay files live under `international/`.
const COUNTRIES: &[&str] = &[
    "australia",
    "brazil",
    "canada",
    "france",
    "germany",
    "india",
    "ireland",
    "japan",
    "mexico",
    "netherlands",
    "new_zealand",
    "singapore",
    "south_africa",
    "spain",
];

/// Resolves a jurisdiction key to its rule file, relative to the base rule
/// directory. Returns `None` for unknown keys.
pub fn rule_file(key: &str) -> Option<String> {
    let key = key.to_lowercase();
    match key.as_str() {
        // City and state overlays with dedicated statutes
        "california" => Some("california_feha.json".to_string()),
        "nyc" | "new_york_city" => Some("nyc_hrl.json".to_string()),
        "washington_dc" => Some("us_states/dc.json".to_string()),
        "uk" | "united_kingdom" => Some("international/uk.json".to_string()),
        _ if US_STATES.contains(&key.as_str()) => Some(format!("us_states/{key}.json")),
        _ if COUNTRIES.contains(&key.as_str()) => Some(format!("international/{key}.json")),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_california_uses_feha_overlay() {
        assert_eq!(rule_file("california").as_deref(), Some("california_feha.json"));
        assert_eq!(rule_file("CALIFORNIA").as_deref(), Some("california_feha.json"));
    }

    #[test]
    fn test_nyc_aliases() {
        assert_eq!(rule_file("nyc"), rule_file("new_york_city"));
        assert_eq!(rule_file("nyc").as_deref(), Some("nyc_hrl.json"));
    }

    #[test]
    fn test_state_keys_resolve_under_us_states() {
        assert_eq!(rule_file("new_york").as_deref(), Some("us_states/new_york.json"));
        assert_eq!(rule_file("texas").as_deref(), Some("us_states/texas.json"));
    }

    #[test]
    fn test_international_keys() {
        assert_eq!(rule_file("uk").as_deref(), Some("international/uk.json"));
        assert_eq!(rule_file("canada").as_deref(), Some("international/canada.json"));
    }

    #[test]
    fn test_unknown_key_is_none() {
        assert_eq!(rule_file("atlantis"), None);
        assert_eq!(rule_file(""), None);
    }
}
