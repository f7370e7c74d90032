use orp_domain::{FuelCategory, Money, Rate};
use orp_error::Error;
use orp_tables::{Exemption, TaxPolicy, TaxTables};
use rust_decimal_macros::dec;

const MINIMAL: &str = r#"
{
    "version": "test",
    "default_region": "Testland",
    "regions": [
        {
            "region": "Testland",
            "display_name": "Testland",
            "aliases": ["Test Land"],
            "policy": "marginal",
            "brackets": [
                {"lower_bound": 0, "upper_bound": 100000, "rate_percent": "5"},
                {"lower_bound": 100000, "upper_bound": null, "rate_percent": "10"}
            ],
            "registration_fees": [{"lower_bound": 0, "upper_bound": null, "fee": 500}]
        }
    ],
    "cities": [{"city": "Testville", "region": "TESTLAND"}],
    "insurance": {
        "Petrol": {"own_damage_rate_percent": "3", "third_party": [{"lower_bound": 0, "fee": 2000}]},
        "Diesel": {"own_damage_rate_percent": "3", "third_party": [{"lower_bound": 0, "fee": 2000}]},
        "CNG": {"own_damage_rate_percent": "3", "third_party": [{"lower_bound": 0, "fee": 2000}]},
        "Electric": {"own_damage_rate_percent": "2", "third_party": [{"lower_bound": 0, "fee": 1500}]},
        "Hybrid": {"own_damage_rate_percent": "3", "third_party": [{"lower_bound": 0, "fee": 2000}]}
    }
}
"#;

#[test]
fn test_builtin_tables_load() {
    let tables = TaxTables::builtin().expect("builtin tables must validate");
    assert_eq!(tables.version(), "2024-11-28");
    assert_eq!(tables.profiles().len(), 35);
    assert_eq!(tables.default_profile().region.as_str(), "MAHARASHTRA");
}

#[test]
fn test_lookup_by_key_display_name_and_alias() {
    let tables = TaxTables::builtin().unwrap();
    for name in ["Delhi", "delhi", "NCT of Delhi", "The Gov of NCT of Delhi (UT)"] {
        let profile = tables.profile(name).unwrap_or_else(|| panic!("{name} not found"));
        assert_eq!(profile.region.as_str(), "DELHI");
    }
    assert_eq!(
        tables.profile("Jammu and Kashmir").unwrap().region.as_str(),
        "JAMMU & KASHMIR"
    );
    assert_eq!(tables.profile("orissa").unwrap().display_name, "Odisha");
    assert!(tables.profile("Atlantis").is_none());
}

#[test]
fn test_city_directory() {
    let tables = TaxTables::builtin().unwrap();
    assert_eq!(tables.profile_for_city("Pune").unwrap().display_name, "Maharashtra");
    assert_eq!(tables.profile_for_city("gurugram").unwrap().display_name, "Haryana");
    assert_eq!(tables.profile_for_city("Bengaluru").unwrap().display_name, "Karnataka");
    assert!(tables.profile_for_city("Gotham").is_none());
}

#[test]
fn test_every_price_maps_to_exactly_one_bracket() {
    let tables = TaxTables::builtin().unwrap();
    for profile in tables.profiles() {
        for (fuel, schedule) in profile.schedules() {
            for bracket in schedule.brackets() {
                let mut edges = vec![bracket.lower_bound.amount() - 1, bracket.lower_bound.amount()];
                if let Some(upper) = bracket.upper_bound {
                    edges.push(upper.amount() - 1);
                    edges.push(upper.amount());
                }
                for price in edges.into_iter().filter(|p| *p >= 0) {
                    let matches = schedule
                        .brackets()
                        .iter()
                        .filter(|b| b.contains(Money::new(price)))
                        .count();
                    assert_eq!(
                        matches, 1,
                        "{} {:?}: price {price} matched {matches} brackets",
                        profile.region, fuel
                    );
                }
            }
        }
    }
}

#[test]
fn test_builtin_exemptions() {
    let tables = TaxTables::builtin().unwrap();
    let delhi = tables.profile("Delhi").unwrap();
    assert_eq!(delhi.exemption_for(FuelCategory::Electric), Some(Exemption::Full));
    assert!(delhi.waives_registration(FuelCategory::Electric));
    assert!(!delhi.waives_registration(FuelCategory::Petrol));

    let maharashtra = tables.profile("Maharashtra").unwrap();
    assert_eq!(
        maharashtra.exemption_for(FuelCategory::Hybrid),
        Some(Exemption::Partial { multiplier: dec!(0.85) })
    );
    assert_eq!(maharashtra.exemption_for(FuelCategory::Petrol), None);
    assert_eq!(maharashtra.cess_rate, Rate::percent(dec!(0.24)));
}

#[test]
fn test_with_default_region() {
    let tables = TaxTables::builtin().unwrap().with_default_region("karnataka").unwrap();
    assert_eq!(tables.default_profile().display_name, "Karnataka");

    let err = TaxTables::builtin().unwrap().with_default_region("Atlantis").unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}

#[test]
fn test_minimal_document() {
    let tables = TaxTables::from_json_str(MINIMAL).unwrap();
    let profile = tables.profile("test land").unwrap();
    assert_eq!(profile.policy, TaxPolicy::Marginal);
    assert_eq!(tables.profile_for_city("TESTVILLE").unwrap().region.as_str(), "TESTLAND");
    assert_eq!(
        tables.insurance().card_for(FuelCategory::Unknown).own_damage_rate,
        Rate::percent(dec!(3))
    );
}

#[test]
fn test_rejects_unknown_default_region() {
    let source = MINIMAL.replace(r#""default_region": "Testland""#, r#""default_region": "Nowhere""#);
    let err = TaxTables::from_json_str(&source).unwrap_err();
    assert!(matches!(err, Error::InvalidTable { .. }));
}

#[test]
fn test_rejects_bracket_gap() {
    let source = MINIMAL.replace(
        r#"{"lower_bound": 100000, "upper_bound": null, "rate_percent": "10"}"#,
        r#"{"lower_bound": 100001, "upper_bound": null, "rate_percent": "10"}"#,
    );
    let err = TaxTables::from_json_str(&source).unwrap_err();
    assert!(err.to_string().contains("gap or overlap"), "{err}");
}

#[test]
fn test_rejects_city_in_unknown_region() {
    let source = MINIMAL.replace(
        r#"{"city": "Testville", "region": "TESTLAND"}"#,
        r#"{"city": "Testville", "region": "ELSEWHERE"}"#,
    );
    assert!(TaxTables::from_json_str(&source).is_err());
}

#[test]
fn test_rejects_malformed_json() {
    let err = TaxTables::from_json_str("{ not json").unwrap_err();
    assert!(matches!(err, Error::InvalidTable { .. }));
}

#[test]
fn test_missing_file_is_a_config_error() {
    let err = TaxTables::from_path("/definitely/not/here.json").unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}

#[test]
fn test_builtin_rates_match_the_sheet() {
    let tables = TaxTables::builtin().unwrap();
    let bracket_at = |region: &str, fuel: FuelCategory, index: usize| {
        tables.profile(region).unwrap().schedule_for(fuel).brackets()[index].clone()
    };

    assert_eq!(bracket_at("Maharashtra", FuelCategory::Petrol, 0).rate_percent, Rate::percent(dec!(12.22)));
    assert_eq!(bracket_at("Maharashtra", FuelCategory::Petrol, 1).rate_percent, Rate::percent(dec!(11.76)));
    assert_eq!(bracket_at("Bihar", FuelCategory::Petrol, 5).rate_percent, Rate::percent(dec!(7.95)));
    assert_eq!(
        bracket_at("Karnataka", FuelCategory::Electric, 5).fixed_amount,
        Some(Money::new(11_530))
    );
}
