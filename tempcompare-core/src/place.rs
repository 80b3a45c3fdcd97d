//! Free-text place input cleanup before geocoding.
//!
//! The geocoder understands "City, CC" (ISO 3166 alpha-2) far better than
//! "City, Country Name", so common country names in the last comma-separated
//! segment are rewritten to their codes. US state names are left alone.

const COUNTRY_CODES: &[(&str, &str)] = &[
    ("united states", "US"),
    ("united states of america", "US"),
    ("usa", "US"),
    ("america", "US"),
    ("united kingdom", "GB"),
    ("uk", "GB"),
    ("great britain", "GB"),
    ("england", "GB"),
    ("scotland", "GB"),
    ("wales", "GB"),
    ("canada", "CA"),
    ("mexico", "MX"),
    ("france", "FR"),
    ("germany", "DE"),
    ("spain", "ES"),
    ("italy", "IT"),
    ("portugal", "PT"),
    ("netherlands", "NL"),
    ("holland", "NL"),
    ("belgium", "BE"),
    ("switzerland", "CH"),
    ("austria", "AT"),
    ("ireland", "IE"),
    ("sweden", "SE"),
    ("norway", "NO"),
    ("denmark", "DK"),
    ("finland", "FI"),
    ("poland", "PL"),
    ("greece", "GR"),
    ("japan", "JP"),
    ("china", "CN"),
    ("india", "IN"),
    ("australia", "AU"),
    ("new zealand", "NZ"),
    ("brazil", "BR"),
    ("argentina", "AR"),
    ("south africa", "ZA"),
    ("egypt", "EG"),
    ("south korea", "KR"),
    ("korea", "KR"),
];

pub fn country_code(name: &str) -> Option<&'static str> {
    let key = name.trim().to_lowercase();
    COUNTRY_CODES.iter().find(|(country, _)| *country == key).map(|(_, code)| *code)
}

/// Trim each comma segment and swap a known country name for its code.
///
/// `"  Paris ,France "` becomes `"Paris, FR"`; `"Peoria, Illinois"` is
/// returned as `"Peoria, Illinois"`.
pub fn normalize_place(input: &str) -> String {
    let mut parts: Vec<String> = input
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect();

    if parts.len() > 1 {
        if let Some(last) = parts.last_mut() {
            if let Some(code) = country_code(last) {
                *last = code.to_string();
            }
        }
    }

    parts.join(", ")
}
