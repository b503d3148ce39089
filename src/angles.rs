use crate::types::Dms;

pub const FULL_CIRCLE: f64 = 360.0;
pub const HALF_CIRCLE: f64 = 180.0;

pub fn deg_to_rad(deg: f64) -> f64 {
    deg * (std::f64::consts::PI / 180.0)
}

pub fn rad_to_deg(rad: f64) -> f64 {
    rad * (180.0 / std::f64::consts::PI)
}

/// Reduce any angle to [0, 360).
pub fn normalize_angle(angle: f64) -> f64 {
    let a = angle.rem_euclid(FULL_CIRCLE);
    // rem_euclid rounds tiny negatives up to exactly 360.0
    if a >= FULL_CIRCLE {
        0.0
    } else {
        a
    }
}

/// Signed shortest difference `a - b`, in (-180, 180].
pub fn signed_delta(a: f64, b: f64) -> f64 {
    let d = normalize_angle(a - b);
    if d > HALF_CIRCLE {
        d - FULL_CIRCLE
    } else {
        d
    }
}

/// Unsigned angular separation in [0, 180].
pub fn angular_separation(a: f64, b: f64) -> f64 {
    let raw = (normalize_angle(a) - normalize_angle(b)).abs();
    raw.min(FULL_CIRCLE - raw)
}

pub fn deg_to_dms(deg: f64) -> Dms {
    let d = deg.abs();
    let mut degrees = d.floor();
    let rem_min = (d - degrees) * 60.0;
    let mut minutes = rem_min.floor();
    let mut seconds = (rem_min - minutes) * 60.0;
    // carry rounding noise such as 59.9999999″
    if seconds >= 60.0 - 1e-9 {
        seconds = 0.0;
        minutes += 1.0;
    }
    if minutes >= 60.0 {
        minutes -= 60.0;
        degrees += 1.0;
    }
    Dms {
        degrees: degrees as u16,
        minutes: minutes as u8,
        seconds,
    }
}

pub fn dms_to_deg(dms: &Dms) -> f64 {
    dms.degrees as f64 + dms.minutes as f64 / 60.0 + dms.seconds / 3600.0
}
