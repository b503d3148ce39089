use sidereal_chart::config::*;
use sidereal_chart::error::ChartError;
use sidereal_chart::types::{AspectKind, Body};

// ── Defaults ──

#[test]
fn test_default_config() {
    let config = ChartConfig::default();
    assert_eq!(config.bodies, Body::ALL.to_vec());
    assert_eq!(config.aspects.len(), 5);
    assert!(config.validate().is_ok());

    let square = config.rule(AspectKind::Square).unwrap();
    assert_eq!(square.angle, 90.0);
    assert_eq!(square.max_orb, 8.0);
    assert_eq!(square.base_strength, 8);
    assert_eq!(config.rule(AspectKind::Sextile).unwrap().max_orb, 6.0);
}

#[test]
fn test_default_periodic_terms_are_bounded() {
    let ay = AyanamsaConfig::default();
    assert_eq!(ay.base_offset, 23.853);
    assert!(!ay.periodic_terms.is_empty());
    for term in &ay.periodic_terms {
        assert!(term.amplitude.abs() <= MAX_PERIODIC_AMPLITUDE);
    }
}

// ── TOML ──

#[test]
fn test_empty_toml_is_default() {
    assert_eq!(ChartConfig::from_toml_str("").unwrap(), ChartConfig::default());
}

#[test]
fn test_partial_toml_keeps_other_defaults() {
    let config = ChartConfig::from_toml_str(
        r#"
bodies = ["sun", "moon", "rahu"]

[ayanamsa]
base_offset = 24.0
"#,
    )
    .unwrap();
    assert_eq!(config.bodies, vec![Body::Sun, Body::Moon, Body::Rahu]);
    assert_eq!(config.aspects, default_aspect_rules());
    assert_eq!(config.ayanamsa.base_offset, 24.0);
    assert_eq!(
        config.ayanamsa.precession_arcsec_per_year,
        AyanamsaConfig::default().precession_arcsec_per_year
    );
}

#[test]
fn test_custom_aspect_table() {
    let config = ChartConfig::from_toml_str(
        r#"
[[aspects]]
kind = "conjunction"
angle = 0.0
max_orb = 10.0
base_strength = 10

[[aspects]]
kind = "opposition"
angle = 180.0
max_orb = 5.0
base_strength = 9
"#,
    )
    .unwrap();
    assert_eq!(config.aspects.len(), 2);
    assert_eq!(config.rule(AspectKind::Conjunction).unwrap().max_orb, 10.0);
    assert!(config.rule(AspectKind::Trine).is_none());
}

#[test]
fn test_unknown_body_name_is_parse_error() {
    let err = ChartConfig::from_toml_str(r#"bodies = ["pluto"]"#).unwrap_err();
    assert!(matches!(err, ChartError::ConfigParse(_)));
}

#[test]
fn test_malformed_toml_is_parse_error() {
    let err = ChartConfig::from_toml_str("bodies = [").unwrap_err();
    assert!(matches!(err, ChartError::ConfigParse(_)));
}

// ── Validation ──

#[test]
fn test_oversized_periodic_amplitude_rejected() {
    let err = ChartConfig::from_toml_str(
        r#"
[ayanamsa]
periodic_terms = [{ amplitude = 0.01, period_years = 18.6 }]
"#,
    )
    .unwrap_err();
    assert!(matches!(err, ChartError::InvalidConfig(_)));
}

#[test]
fn test_non_positive_period_rejected() {
    let mut config = ChartConfig::default();
    config.ayanamsa.periodic_terms = vec![PeriodicTerm {
        amplitude: 0.001,
        period_years: 0.0,
    }];
    assert!(matches!(config.validate(), Err(ChartError::InvalidConfig(_))));
}

#[test]
fn test_duplicate_aspect_kind_rejected() {
    let mut config = ChartConfig::default();
    let first = config.aspects[0];
    config.aspects.push(first);
    assert!(matches!(config.validate(), Err(ChartError::InvalidConfig(_))));
}

#[test]
fn test_duplicate_body_rejected() {
    let err = ChartConfig::from_toml_str(r#"bodies = ["sun", "sun"]"#).unwrap_err();
    assert!(matches!(err, ChartError::InvalidConfig(_)));
}

#[test]
fn test_bad_aspect_rule_fields_rejected() {
    let mut config = ChartConfig::default();
    config.aspects[1].max_orb = -1.0;
    assert!(config.validate().is_err());

    let mut config = ChartConfig::default();
    config.aspects[2].angle = 270.0;
    assert!(config.validate().is_err());

    let mut config = ChartConfig::default();
    config.aspects[3].base_strength = 0;
    assert!(config.validate().is_err());

    let mut config = ChartConfig::default();
    config.ayanamsa.base_offset = f64::NAN;
    assert!(config.validate().is_err());
}

// ── Files ──

#[test]
fn test_load_missing_file() {
    let err = ChartConfig::load("/nonexistent/sidereal_chart.toml").unwrap_err();
    assert!(matches!(err, ChartError::ConfigIo(_)));
}

#[test]
fn test_load_from_file() {
    let path = std::env::temp_dir().join(format!("sidereal_chart_{}.toml", std::process::id()));
    std::fs::write(&path, "bodies = [\"saturn\", \"ketu\"]\n").unwrap();
    let config = ChartConfig::load(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(config.bodies, vec![Body::Saturn, Body::Ketu]);
}

#[test]
fn test_config_round_trips_through_toml() {
    let text = toml::to_string(&ChartConfig::default()).unwrap();
    assert_eq!(ChartConfig::from_toml_str(&text).unwrap(), ChartConfig::default());
}
