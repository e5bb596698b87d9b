use crate::angles::{angular_separation, normalize_full, normalize_signed};
use crate::aspects::types::{Aspect, AspectCatalogue, PointMotion};

/// Days to project points forward when judging applying vs separating
const PROJECTION_STEP: f64 = 0.1;

/// Orbs below this are reported as exact
const EXACT_ORB: f64 = 0.1;

/// Aspect calculator
#[derive(Debug, Clone, Default)]
pub struct AspectCalculator {
    catalogue: AspectCatalogue,
}

impl AspectCalculator {
    /// Create a new aspect calculator
    pub fn new(catalogue: AspectCatalogue) -> Self {
        Self { catalogue }
    }

    pub fn catalogue(&self) -> &AspectCatalogue {
        &self.catalogue
    }

    /// Aspects among `bodies`, then between each body and each of `angles`.
    ///
    /// Output order follows the input: body pairs (i < j) first, then body
    /// against angle, kinds in catalogue order within a pair. Angles are not
    /// aspected to one another.
    pub fn detect(&self, bodies: &[PointMotion], angles: &[PointMotion]) -> Vec<Aspect> {
        let mut aspects = Vec::new();

        for i in 0..bodies.len() {
            for j in (i + 1)..bodies.len() {
                aspects.extend(self.calculate_aspects(&bodies[i], &bodies[j]));
            }
        }

        for body in bodies {
            for angle in angles {
                aspects.extend(self.calculate_aspects(body, angle));
            }
        }

        aspects
    }

    /// Every catalogue aspect formed by one pair, at most one per kind.
    pub fn calculate_aspects(&self, a: &PointMotion, b: &PointMotion) -> Vec<Aspect> {
        let separation = angular_separation(a.longitude, b.longitude);

        self.catalogue
            .definitions()
            .iter()
            .filter_map(|def| {
                let exact_angle = def.kind.angle();
                let orb = (separation - exact_angle).abs();
                if orb > def.orb {
                    return None;
                }
                Some(Aspect {
                    from: a.point,
                    to: b.point,
                    kind: def.kind,
                    exact_angle,
                    orb,
                    is_applying: is_applying(a, b, exact_angle),
                    is_exact: orb < EXACT_ORB,
                })
            })
            .collect()
    }
}

/// Distance of a signed separation from the exact angle, whichever side of
/// the circle the aspect forms on.
fn distance_to_exact(signed_separation: f64, exact_angle: f64) -> f64 {
    (signed_separation - exact_angle)
        .abs()
        .min((signed_separation + exact_angle).abs())
}

/// Whether the pair moves toward the exact angle over the next step.
pub fn is_applying(a: &PointMotion, b: &PointMotion, exact_angle: f64) -> bool {
    let now = normalize_signed(a.longitude - b.longitude);
    let current_distance = distance_to_exact(now, exact_angle);

    let future_a = normalize_full(a.longitude + a.speed * PROJECTION_STEP);
    let future_b = normalize_full(b.longitude + b.speed * PROJECTION_STEP);
    let future = normalize_signed(future_a - future_b);
    let future_distance = distance_to_exact(future, exact_angle);

    future_distance < current_distance
}
