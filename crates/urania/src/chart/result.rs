use crate::aspects::{Aspect, AspectKind, ChartPoint};
use crate::ephemeris::{Body, HouseSystem};
use crate::houses::HouseCusp;
use crate::rounding::{serialize_round2, serialize_round6};
use crate::western::signs::SignPlacement;
use crate::western::Catalogue;
use serde::Serialize;

/// Birth input echoed back with the time actually used.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BirthInfo {
    pub date: String,
    pub time: String,
    pub latitude: f64,
    pub longitude: f64,
    pub timezone: String,
    #[serde(serialize_with = "serialize_round6")]
    pub julian_day: f64,
    /// UTC moment the chart was cast for, ISO 8601
    pub utc_time: String,
    pub utc_offset_seconds: i32,
    /// False when the timezone could not be resolved and the local time was
    /// read as UTC
    pub timezone_resolved: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedBody {
    pub id: Body,
    pub name: String,
    #[serde(serialize_with = "serialize_round6")]
    pub longitude: f64,
    #[serde(serialize_with = "serialize_round6")]
    pub latitude: f64,
    #[serde(serialize_with = "serialize_round6")]
    pub distance: f64,
    #[serde(serialize_with = "serialize_round6")]
    pub speed: f64,
    pub retrograde: bool,
    #[serde(flatten)]
    pub placement: SignPlacement,
    pub sign_name: String,
    pub house: u8,
}

/// Ascendant, Midheaven or Vertex.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AngularPoint {
    #[serde(serialize_with = "serialize_round6")]
    pub longitude: f64,
    #[serde(flatten)]
    pub placement: SignPlacement,
    pub sign_name: String,
}

impl AngularPoint {
    pub fn new(longitude: f64, catalogue: &Catalogue) -> Self {
        let placement = SignPlacement::from_longitude(longitude);
        Self {
            longitude,
            placement,
            sign_name: catalogue.sign_name(placement.sign).to_string(),
        }
    }
}

/// An aspect with display names attached.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartAspect {
    pub planet1: ChartPoint,
    pub planet1_name: String,
    pub planet2: ChartPoint,
    pub planet2_name: String,
    pub aspect: AspectKind,
    pub aspect_name: String,
    pub angle: f64,
    #[serde(serialize_with = "serialize_round2")]
    pub orb: f64,
    pub applying: bool,
    pub exact: bool,
}

impl ChartAspect {
    pub fn new(aspect: &Aspect, catalogue: &Catalogue) -> Self {
        Self {
            planet1: aspect.from,
            planet1_name: catalogue.point_name(aspect.from).to_string(),
            planet2: aspect.to,
            planet2_name: catalogue.point_name(aspect.to).to_string(),
            aspect: aspect.kind,
            aspect_name: catalogue.aspect_name(aspect.kind).to_string(),
            angle: aspect.exact_angle,
            orb: aspect.orb,
            applying: aspect.is_applying,
            exact: aspect.is_exact,
        }
    }
}

/// A body left out of the chart and why.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailedBody {
    pub body: Body,
    pub reason: String,
}

/// Complete natal chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartResult {
    pub birth_info: BirthInfo,
    pub house_system: HouseSystem,
    pub planets: Vec<PlacedBody>,
    pub houses: Vec<HouseCusp>,
    pub ascendant: AngularPoint,
    pub mc: AngularPoint,
    pub vertex: AngularPoint,
    pub aspects: Vec<ChartAspect>,
    pub failed_bodies: Vec<FailedBody>,
    pub catalogue_version: &'static str,
}

impl ChartResult {
    pub fn planet(&self, body: Body) -> Option<&PlacedBody> {
        self.planets.iter().find(|p| p.id == body)
    }
}
