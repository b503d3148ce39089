use crate::angles::{deg_to_rad, normalize_angle, rad_to_deg};
use crate::ayanamsa::to_sidereal;
use crate::types::{ChartGeometry, HouseCusp, TimeContext};
use crate::zodiac::{sign_of, SIGN_WIDTH};

pub const HOUSE_COUNT: u8 = 12;

/// Tropical ecliptic longitude rising on the eastern horizon.
///
/// `asc = atan2(cos θ, -(sin θ·cos ε + tan φ·sin ε))` with θ the local
/// sidereal time, ε the obliquity and φ the geographic latitude.
pub fn tropical_ascendant(local_sidereal_time: f64, latitude: f64, obliquity: f64) -> f64 {
    let theta = deg_to_rad(local_sidereal_time);
    let eps = deg_to_rad(obliquity);
    let phi = deg_to_rad(latitude);
    let y = theta.cos();
    let x = -(theta.sin() * eps.cos() + phi.tan() * eps.sin());
    normalize_angle(rad_to_deg(y.atan2(x)))
}

/// Tropical ecliptic longitude culminating on the meridian.
pub fn midheaven(local_sidereal_time: f64, obliquity: f64) -> f64 {
    let theta = deg_to_rad(local_sidereal_time);
    let eps = deg_to_rad(obliquity);
    normalize_angle(rad_to_deg(theta.sin().atan2(theta.cos() * eps.cos())))
}

/// Twelve 30° cusps starting at `ascendant`.
pub fn equal_house_cusps(ascendant: f64) -> Vec<HouseCusp> {
    (1..=HOUSE_COUNT)
        .map(|house| {
            let longitude = normalize_angle(ascendant + (house - 1) as f64 * SIGN_WIDTH);
            let sign = sign_of(longitude);
            HouseCusp {
                house,
                longitude,
                sign,
                ruler: sign.ruler(),
            }
        })
        .collect()
}

/// House number `n` such that `longitude` lies in `[cusp(n), cusp(n+1))`
/// measured around the circle from the ascendant.
pub fn house_of(longitude: f64, ascendant: f64) -> u8 {
    let offset = normalize_angle(longitude - ascendant);
    ((offset / SIGN_WIDTH).floor() as u8 + 1).min(HOUSE_COUNT)
}

/// Ascendant, midheaven and cusps in the sidereal frame of `ayanamsa`.
pub fn build_geometry(time: &TimeContext, latitude: f64, ayanamsa: f64) -> ChartGeometry {
    let tropical = tropical_ascendant(time.local_sidereal_time, latitude, time.obliquity);
    let ascendant = to_sidereal(tropical, ayanamsa);
    let mc = to_sidereal(midheaven(time.local_sidereal_time, time.obliquity), ayanamsa);
    ChartGeometry {
        tropical_ascendant: tropical,
        ascendant,
        midheaven: mc,
        cusps: equal_house_cusps(ascendant),
    }
}
