//! Ecliptic longitude geometry.

/// Reduce an angle into [0, 360).
pub fn normalize_full(angle: f64) -> f64 {
    let reduced = angle % 360.0;
    let wrapped = if reduced < 0.0 { reduced + 360.0 } else { reduced };
    // -1e-15 % 360 + 360 rounds to 360.0 in f64
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Reduce an angle into (-180, 180].
pub fn normalize_signed(angle: f64) -> f64 {
    let full = normalize_full(angle);
    if full > 180.0 {
        full - 360.0
    } else {
        full
    }
}

/// Shortest, non-directional distance between two longitudes, in [0, 180].
pub fn angular_separation(a: f64, b: f64) -> f64 {
    let diff = (normalize_full(a) - normalize_full(b)).abs();
    if diff > 180.0 {
        360.0 - diff
    } else {
        diff
    }
}
