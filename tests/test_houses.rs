use chrono::NaiveDate;

use sidereal_chart::angles::normalize_angle;
use sidereal_chart::houses::*;
use sidereal_chart::time::convert;
use sidereal_chart::types::{Body, CivilTime, GeoLocation, Sign};

macro_rules! assert_approx {
    ($left:expr, $right:expr, $tol:expr) => {
        let (l, r) = ($left as f64, $right as f64);
        assert!(
            (l - r).abs() <= $tol,
            "assert_approx failed: left={}, right={}, diff={}, tol={}",
            l, r, (l - r).abs(), $tol
        );
    };
}

const OBLIQUITY: f64 = 23.439_291;

// ── Ascendant / MC ──

#[test]
fn test_ascendant_at_equator_cardinal_points() {
    assert_approx!(tropical_ascendant(0.0, 0.0, OBLIQUITY), 90.0, 1e-9);
    assert_approx!(tropical_ascendant(90.0, 0.0, OBLIQUITY), 180.0, 1e-9);
    assert_approx!(tropical_ascendant(180.0, 0.0, OBLIQUITY), 270.0, 1e-9);
    let asc = tropical_ascendant(270.0, 0.0, OBLIQUITY);
    assert!(asc < 1e-9 || asc > 360.0 - 1e-9, "asc={}", asc);
}

#[test]
fn test_midheaven_cardinal_points() {
    assert_approx!(midheaven(0.0, OBLIQUITY), 0.0, 1e-9);
    assert_approx!(midheaven(90.0, OBLIQUITY), 90.0, 1e-9);
    assert_approx!(midheaven(180.0, OBLIQUITY), 180.0, 1e-9);
}

#[test]
fn test_ascendant_lies_east_of_midheaven() {
    for lat in [-60.0, -23.0, 0.0, 28.6, 51.5, 65.0] {
        let mut lst = 0.0;
        while lst < 360.0 {
            let asc = tropical_ascendant(lst, lat, OBLIQUITY);
            let mc = midheaven(lst, OBLIQUITY);
            let east = normalize_angle(asc - mc);
            assert!(
                east > 0.0 && east < 180.0,
                "lat={} lst={} asc={} mc={}",
                lat, lst, asc, mc
            );
            lst += 7.5;
        }
    }
}

#[test]
fn test_ascendant_handles_poles() {
    for lat in [90.0, -90.0] {
        let asc = tropical_ascendant(123.0, lat, OBLIQUITY);
        assert!(asc.is_finite() && (0.0..360.0).contains(&asc));
    }
}

// ── Cusps ──

#[test]
fn test_equal_house_cusps_partition_circle() {
    for asc in [0.0, 17.25, 200.0, 345.5, 359.999] {
        let cusps = equal_house_cusps(asc);
        assert_eq!(cusps.len(), 12);
        assert_approx!(cusps[0].longitude, asc, 1e-12);
        for (i, cusp) in cusps.iter().enumerate() {
            assert_eq!(cusp.house as usize, i + 1);
            assert!((0.0..360.0).contains(&cusp.longitude));
            let next = &cusps[(i + 1) % 12];
            assert_approx!(normalize_angle(next.longitude - cusp.longitude), 30.0, 1e-9);
        }
    }
}

#[test]
fn test_cusp_sign_and_ruler() {
    let cusps = equal_house_cusps(345.0);
    assert_eq!(cusps[0].sign, Sign::Pisces);
    assert_eq!(cusps[0].ruler, Body::Jupiter);
    assert_approx!(cusps[1].longitude, 15.0, 1e-9);
    assert_eq!(cusps[1].sign, Sign::Aries);
    assert_eq!(cusps[1].ruler, Body::Mars);
}

// ── House membership ──

#[test]
fn test_house_of_wraps_past_zero() {
    assert_eq!(house_of(350.0, 350.0), 1);
    assert_eq!(house_of(10.0, 350.0), 1);
    assert_eq!(house_of(20.0, 350.0), 2);
    assert_eq!(house_of(345.0, 350.0), 12);
    assert_eq!(house_of(170.0, 350.0), 7);
}

#[test]
fn test_house_of_consistent_with_cusps() {
    let asc = 123.4;
    let cusps = equal_house_cusps(asc);
    let mut lon = 0.0;
    while lon < 360.0 {
        let h = house_of(lon, asc);
        assert!((1..=12).contains(&h));
        let start = cusps[(h - 1) as usize].longitude;
        assert!(normalize_angle(lon - start) < 30.0 + 1e-9, "lon={} house={}", lon, h);
        lon += 1.7;
    }
}

// ── Geometry ──

#[test]
fn test_build_geometry_shifts_by_ayanamsa() {
    let local = NaiveDate::from_ymd_opt(1990, 5, 15)
        .unwrap()
        .and_hms_opt(10, 15, 0)
        .unwrap();
    let loc = GeoLocation {
        latitude: 28.61,
        longitude: 77.21,
    };
    let ctx = convert(&CivilTime::zoned(local, "Asia/Kolkata"), &loc).unwrap();
    let geo = build_geometry(&ctx, loc.latitude, 23.72);

    assert_approx!(
        normalize_angle(geo.tropical_ascendant - geo.ascendant),
        23.72,
        1e-9
    );
    assert_eq!(geo.cusps.len(), 12);
    assert_approx!(geo.cusps[0].longitude, geo.ascendant, 1e-12);
}
