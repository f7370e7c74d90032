use orp_tables::{StateTaxProfile, TaxTables};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("no tax profile for region {0:?}")]
pub struct UnknownRegion(pub String);

/// Resolves a free-form location such as `"Mumbai, Maharashtra"` to a profile.
///
/// Tried in order: the state token after the first comma, the whole string as
/// a region name, then the leading city token through the city directory.
pub fn resolve_region<'a>(
    tables: &'a TaxTables,
    location: &str,
) -> Result<&'a StateTaxProfile, UnknownRegion> {
    let mut tokens = location.split(',');
    let city = tokens.next().unwrap_or_default();
    let state = tokens.next();

    state
        .and_then(|state| tables.profile(state))
        .or_else(|| tables.profile(location))
        .or_else(|| tables.profile_for_city(city))
        .ok_or_else(|| UnknownRegion(location.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(tables: &TaxTables, location: &str) -> Option<String> {
        resolve_region(tables, location)
            .ok()
            .map(|p| p.region.to_string())
    }

    #[test]
    fn state_token_after_first_comma() {
        let tables = TaxTables::builtin().unwrap();
        assert_eq!(key(&tables, "Mumbai, Maharashtra").as_deref(), Some("MAHARASHTRA"));
        assert_eq!(key(&tables, " Noida ,  uttar pradesh , India").as_deref(), Some("UTTAR PRADESH"));
    }

    #[test]
    fn whole_string_as_region() {
        let tables = TaxTables::builtin().unwrap();
        assert_eq!(key(&tables, "delhi").as_deref(), Some("DELHI"));
        assert_eq!(key(&tables, "Jammu and Kashmir").as_deref(), Some("JAMMU & KASHMIR"));
    }

    #[test]
    fn city_directory_is_last_resort() {
        let tables = TaxTables::builtin().unwrap();
        assert_eq!(key(&tables, "Pune").as_deref(), Some("MAHARASHTRA"));
        // The state token is unusable, so the city decides.
        assert_eq!(key(&tables, "Bengaluru, Atlantis").as_deref(), Some("KARNATAKA"));
    }

    #[test]
    fn unknown_location_is_an_error() {
        let tables = TaxTables::builtin().unwrap();
        assert_eq!(
            resolve_region(&tables, " Atlantis "),
            Err(UnknownRegion("Atlantis".into()))
        );
        assert!(resolve_region(&tables, "").is_err());
        assert!(resolve_region(&tables, ",").is_err());
    }
}
