use crate::ephemeris::Body;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Major aspect kinds, in catalogue order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AspectKind {
    Conjunction,
    Opposition,
    Trine,
    Square,
    Sextile,
}

impl AspectKind {
    pub const ALL: [AspectKind; 5] = [
        AspectKind::Conjunction,
        AspectKind::Opposition,
        AspectKind::Trine,
        AspectKind::Square,
        AspectKind::Sextile,
    ];

    /// Exact angle for this aspect (0, 60, 90, 120, 180)
    pub fn angle(self) -> f64 {
        match self {
            AspectKind::Conjunction => 0.0,
            AspectKind::Opposition => 180.0,
            AspectKind::Trine => 120.0,
            AspectKind::Square => 90.0,
            AspectKind::Sextile => 60.0,
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            AspectKind::Conjunction => "conjunction",
            AspectKind::Opposition => "opposition",
            AspectKind::Trine => "trine",
            AspectKind::Square => "square",
            AspectKind::Sextile => "sextile",
        }
    }
}

impl fmt::Display for AspectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

pub const DEFAULT_ORB: f64 = 8.0;
pub const DEFAULT_SEXTILE_ORB: f64 = 6.0;

/// One catalogue entry: the kind and its orb tolerance in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AspectDefinition {
    pub kind: AspectKind,
    pub orb: f64,
}

/// Aspect kinds and orbs checked for every pair of points.
#[derive(Debug, Clone, PartialEq)]
pub struct AspectCatalogue {
    definitions: Vec<AspectDefinition>,
}

impl AspectCatalogue {
    pub fn new(definitions: Vec<AspectDefinition>) -> Self {
        Self { definitions }
    }

    /// Replace the orb of one kind, keeping catalogue order.
    pub fn with_orb(mut self, kind: AspectKind, orb: f64) -> Self {
        for def in self.definitions.iter_mut().filter(|d| d.kind == kind) {
            def.orb = orb;
        }
        self
    }

    pub fn definitions(&self) -> &[AspectDefinition] {
        &self.definitions
    }

    pub fn orb(&self, kind: AspectKind) -> Option<f64> {
        self.definitions.iter().find(|d| d.kind == kind).map(|d| d.orb)
    }
}

impl Default for AspectCatalogue {
    fn default() -> Self {
        Self::new(
            AspectKind::ALL
                .into_iter()
                .map(|kind| AspectDefinition {
                    kind,
                    orb: if kind == AspectKind::Sextile { DEFAULT_SEXTILE_ORB } else { DEFAULT_ORB },
                })
                .collect(),
        )
    }
}

/// Anything that can take part in an aspect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartPoint {
    Body(Body),
    Ascendant,
    Midheaven,
}

impl ChartPoint {
    pub fn slug(self) -> &'static str {
        match self {
            ChartPoint::Body(body) => body.slug(),
            ChartPoint::Ascendant => "asc",
            ChartPoint::Midheaven => "mc",
        }
    }
}

impl Serialize for ChartPoint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.slug())
    }
}

impl fmt::Display for ChartPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// A point's longitude and its rate of motion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointMotion {
    pub point: ChartPoint,
    /// Longitude in degrees (0-360)
    pub longitude: f64,
    /// Degrees per day; 0 for angles
    pub speed: f64,
}

impl PointMotion {
    pub fn body(body: Body, longitude: f64, speed: f64) -> Self {
        Self { point: ChartPoint::Body(body), longitude, speed }
    }

    pub fn stationary(point: ChartPoint, longitude: f64) -> Self {
        Self { point, longitude, speed: 0.0 }
    }
}

/// Core aspect information
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Aspect {
    pub from: ChartPoint,
    pub to: ChartPoint,
    pub kind: AspectKind,
    /// Exact angle for this aspect (0, 60, 90, 120, 180)
    pub exact_angle: f64,
    /// Orb value (deviation from exact angle)
    #[serde(serialize_with = "crate::rounding::serialize_round2")]
    pub orb: f64,
    /// Whether the aspect is applying (approaching exact)
    pub is_applying: bool,
    /// Whether the aspect is exact (within 0.1 degrees)
    pub is_exact: bool,
}
