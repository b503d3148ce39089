//! Sign and nakshatra lookup over sidereal longitude.
//!
//! Twelve signs of 30° starting at 0° Aries, and 27 nakshatras of 13°20′
//! starting at 0° Ashwini, each split into four padas of 3°20′.

use crate::angles::normalize_angle;
use crate::types::{Body, Sign, ZodiacPlacement};

pub const SIGN_WIDTH: f64 = 30.0;
pub const NAKSHATRA_WIDTH: f64 = 360.0 / 27.0;
pub const PADA_WIDTH: f64 = 90.0 / 27.0;

// (name, Vimshottari lord)
const NAKSHATRAS: [(&str, Body); 27] = [
    ("Ashwini", Body::Ketu),
    ("Bharani", Body::Venus),
    ("Krittika", Body::Sun),
    ("Rohini", Body::Moon),
    ("Mrigashira", Body::Mars),
    ("Ardra", Body::Rahu),
    ("Punarvasu", Body::Jupiter),
    ("Pushya", Body::Saturn),
    ("Ashlesha", Body::Mercury),
    ("Magha", Body::Ketu),
    ("Purva Phalguni", Body::Venus),
    ("Uttara Phalguni", Body::Sun),
    ("Hasta", Body::Moon),
    ("Chitra", Body::Mars),
    ("Swati", Body::Rahu),
    ("Vishakha", Body::Jupiter),
    ("Anuradha", Body::Saturn),
    ("Jyeshtha", Body::Mercury),
    ("Mula", Body::Ketu),
    ("Purva Ashadha", Body::Venus),
    ("Uttara Ashadha", Body::Sun),
    ("Shravana", Body::Moon),
    ("Dhanishta", Body::Mars),
    ("Shatabhisha", Body::Rahu),
    ("Purva Bhadrapada", Body::Jupiter),
    ("Uttara Bhadrapada", Body::Saturn),
    ("Revati", Body::Mercury),
];

pub fn sign_index(longitude: f64) -> u8 {
    ((normalize_angle(longitude) / SIGN_WIDTH).floor() as u8) % 12
}

pub fn sign_of(longitude: f64) -> Sign {
    Sign::ALL[sign_index(longitude) as usize]
}

pub fn degree_in_sign(longitude: f64) -> f64 {
    let lon = normalize_angle(longitude);
    (lon - sign_index(lon) as f64 * SIGN_WIDTH).max(0.0)
}

pub fn nakshatra_index(longitude: f64) -> u8 {
    ((normalize_angle(longitude) / NAKSHATRA_WIDTH).floor() as u8).min(26)
}

pub fn nakshatra_name(index: u8) -> &'static str {
    NAKSHATRAS[index as usize % 27].0
}

pub fn nakshatra_lord(index: u8) -> Body {
    NAKSHATRAS[index as usize % 27].1
}

/// Quarter within the nakshatra, 1..=4.
pub fn pada(longitude: f64) -> u8 {
    let offset = normalize_angle(longitude).rem_euclid(NAKSHATRA_WIDTH);
    ((offset / PADA_WIDTH).floor() as u8 + 1).clamp(1, 4)
}

pub fn placement(sidereal_longitude: f64) -> ZodiacPlacement {
    let index = nakshatra_index(sidereal_longitude);
    let sign = sign_of(sidereal_longitude);
    ZodiacPlacement {
        sign,
        sign_sanskrit: sign.sanskrit_name().to_string(),
        degree_in_sign: degree_in_sign(sidereal_longitude),
        nakshatra_index: index,
        nakshatra_name: nakshatra_name(index).to_string(),
        nakshatra_lord: nakshatra_lord(index),
        pada: pada(sidereal_longitude),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_widths_tile_the_circle() {
        assert!((NAKSHATRA_WIDTH * 27.0 - 360.0).abs() < 1e-9);
        assert!((PADA_WIDTH * 4.0 - NAKSHATRA_WIDTH).abs() < 1e-12);
    }

    #[test]
    fn lords_follow_nine_fold_cycle() {
        for i in 0..18u8 {
            assert_eq!(nakshatra_lord(i), nakshatra_lord(i + 9));
        }
    }
}
