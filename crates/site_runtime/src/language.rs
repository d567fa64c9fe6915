//! Static country → search-language lookup.

include!(concat!(env!("OUT_DIR"), "/country_languages_generated.rs"));

/// Language for `country` (display name or ISO code, case-insensitive), else the fallback.
pub fn language_for_country(country: &str) -> &'static str {
    let country = country.trim();
    COUNTRY_LANGUAGES
        .iter()
        .find(|(name, code, _)| {
            name.eq_ignore_ascii_case(country) || code.eq_ignore_ascii_case(country)
        })
        .map(|(_, _, language)| *language)
        .unwrap_or(FALLBACK_LANGUAGE)
}
