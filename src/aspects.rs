use crate::angles::{angular_separation, signed_delta};
use crate::config::AspectRule;
use crate::types::{Aspect, BodyPosition};

/// Orb below which an aspect is flagged exact.
pub const EXACT_ORB: f64 = 0.1;

// days to project forward when deciding applying vs separating
const PROJECTION_STEP: f64 = 0.01;

/// Best-fitting rule for `separation` (the one with the smallest orb), if any
/// rule admits it.
pub fn classify(separation: f64, rules: &[AspectRule]) -> Option<(&AspectRule, f64)> {
    rules
        .iter()
        .map(|rule| (rule, (separation - rule.angle).abs()))
        .filter(|(rule, orb)| *orb <= rule.max_orb)
        .min_by(|a, b| a.1.total_cmp(&b.1))
}

/// Base score reduced by 2 for an orb over 3°, by 1 for an orb in (1°, 3°],
/// clamped to 1..=10.
pub fn strength(base: u8, orb: f64) -> u8 {
    let penalty = if orb > 3.0 {
        2
    } else if orb > 1.0 {
        1
    } else {
        0
    };
    base.saturating_sub(penalty).clamp(1, 10)
}

/// Whether the faster of the two bodies is still closing on the exact angle.
///
/// Uses mean daily motion only; bodies with equal absolute speed never apply.
pub fn is_applying(a: &BodyPosition, b: &BodyPosition, exact_angle: f64) -> bool {
    let (fast, slow) = match a.speed.abs().total_cmp(&b.speed.abs()) {
        std::cmp::Ordering::Greater => (a, b),
        std::cmp::Ordering::Less => (b, a),
        std::cmp::Ordering::Equal => return false,
    };
    let relative = fast.speed - slow.speed;
    let now = angular_separation(fast.sidereal_longitude, slow.sidereal_longitude);
    let later = signed_delta(
        fast.sidereal_longitude + relative * PROJECTION_STEP,
        slow.sidereal_longitude,
    )
    .abs();
    (later - exact_angle).abs() < (now - exact_angle).abs()
}

/// All aspects between unordered pairs of `positions`, in input order.
pub fn detect_aspects(positions: &[BodyPosition], rules: &[AspectRule]) -> Vec<Aspect> {
    let mut aspects = Vec::new();
    for (i, a) in positions.iter().enumerate() {
        for b in &positions[i + 1..] {
            if a.body == b.body {
                continue;
            }
            let separation = angular_separation(a.sidereal_longitude, b.sidereal_longitude);
            let Some((rule, orb)) = classify(separation, rules) else {
                continue;
            };
            aspects.push(Aspect {
                body_a: a.body,
                body_b: b.body,
                kind: rule.kind,
                separation,
                orb,
                applying: is_applying(a, b, rule.angle),
                is_exact: orb < EXACT_ORB,
                strength: strength(rule.base_strength, orb),
            });
        }
    }
    aspects
}
