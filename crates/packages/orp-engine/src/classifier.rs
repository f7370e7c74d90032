use orp_domain::FuelCategory;

/// Checked in order; the first category with a matching synonym wins, so a
/// "Petrol Hybrid" is a hybrid and a "Petrol + CNG" is a CNG car.
const SYNONYMS: &[(FuelCategory, &[&str])] = &[
    (
        FuelCategory::Hybrid,
        &["hybrid", "phev", "hev", "shev", "plug in"],
    ),
    (
        FuelCategory::Electric,
        &["electric", "ev", "bev", "battery", "e v"],
    ),
    (FuelCategory::Cng, &["cng", "bi fuel", "bifuel", "lpg", "gas"]),
    (FuelCategory::Diesel, &["diesel", "crdi", "tdi"]),
    (FuelCategory::Petrol, &["petrol", "gasoline", "benzine"]),
];

/// Mild hybrids are taxed on their combustion fuel, so these markers are
/// dropped before matching.
const MILD_HYBRID: &[&str] = &["mild hybrid", "mhev", "smart hybrid"];

/// Maps a free-form fuel description to a [`FuelCategory`].
///
/// Matching is case-insensitive and works on whole words: punctuation and
/// repeated whitespace are ignored, so "Bi-Fuel" and "bi  fuel" both read as
/// CNG. "Petrol (Mild Hybrid)" reads as petrol. Anything unrecognised is
/// [`FuelCategory::Unknown`].
pub fn classify(raw_fuel_type: &str) -> FuelCategory {
    let words = raw_fuel_type
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ");
    if words.is_empty() {
        return FuelCategory::Unknown;
    }
    let haystack = MILD_HYBRID
        .iter()
        .fold(format!(" {words} "), |haystack, marker| {
            haystack.replace(&format!(" {marker} "), " ")
        });

    SYNONYMS
        .iter()
        .find(|(_, synonyms)| {
            synonyms
                .iter()
                .any(|synonym| haystack.contains(&format!(" {synonym} ")))
        })
        .map_or(FuelCategory::Unknown, |(category, _)| *category)
}
