use crate::angles::normalize_full;
use crate::aspects::{AspectCalculator, ChartPoint, PointMotion};
use crate::chart::request::{BirthData, BirthRequest};
use crate::chart::result::{AngularPoint, BirthInfo, ChartAspect, ChartResult, FailedBody, PlacedBody};
use crate::chart::settings::ChartSettings;
use crate::chart::ChartError;
use crate::ephemeris::{Body, BodyPosition, EphemerisProvider, HouseFrame};
use crate::houses::{assign_house, HouseCusp};
use crate::time::{normalize_to_utc, JulianDay, TimezoneDatabase};
use crate::western::signs::SignPlacement;
use std::sync::Arc;

/// Bodies that resolved, and those that did not.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BodyOutcome {
    pub resolved: Vec<(Body, BodyPosition)>,
    pub failed: Vec<FailedBody>,
}

/// Builds natal charts from birth data.
///
/// Holds no per-request state; one assembler serves concurrent requests.
pub struct ChartAssembler {
    ephemeris: Arc<dyn EphemerisProvider>,
    timezones: Arc<dyn TimezoneDatabase>,
    settings: ChartSettings,
    calculator: AspectCalculator,
}

impl ChartAssembler {
    pub fn new(
        ephemeris: Arc<dyn EphemerisProvider>,
        timezones: Arc<dyn TimezoneDatabase>,
        settings: ChartSettings,
    ) -> Self {
        let calculator = AspectCalculator::new(settings.aspects.clone());
        Self {
            ephemeris,
            timezones,
            settings,
            calculator,
        }
    }

    pub fn settings(&self) -> &ChartSettings {
        &self.settings
    }

    /// Validate raw input, then assemble.
    pub fn calculate(&self, request: &BirthRequest) -> Result<ChartResult, ChartError> {
        let birth = BirthData::parse(request)?;
        self.assemble(&birth)
    }

    pub fn assemble(&self, birth: &BirthData) -> Result<ChartResult, ChartError> {
        let catalogue = &self.settings.catalogue;
        let resolution = normalize_to_utc(&birth.local, &birth.timezone, self.timezones.as_ref());
        let jd = resolution.julian_day;
        log::debug!(
            "Casting chart for {} {} ({}) -> {} UTC, JD {:.6}",
            birth.date,
            birth.time,
            birth.timezone,
            resolution.utc,
            jd.value()
        );

        let frame = self
            .ephemeris
            .houses(jd, birth.latitude, birth.longitude, self.settings.house_system)
            .map_err(|e| {
                log::error!("House calculation failed at JD {:.6}: {}", jd.value(), e);
                ChartError::Houses(e)
            })
            .map(normalize_frame)?;

        let outcome = self.resolve_bodies(jd);

        let planets: Vec<PlacedBody> = outcome
            .resolved
            .iter()
            .map(|(body, pos)| {
                let placement = SignPlacement::from_longitude(pos.longitude);
                PlacedBody {
                    id: *body,
                    name: catalogue.body_name(*body).to_string(),
                    longitude: pos.longitude,
                    latitude: pos.latitude,
                    distance: pos.distance,
                    speed: pos.speed,
                    retrograde: pos.is_retrograde(),
                    placement,
                    sign_name: catalogue.sign_name(placement.sign).to_string(),
                    house: assign_house(pos.longitude, &frame.cusps),
                }
            })
            .collect();

        let aspects = self.detect_aspects(&outcome, &frame);

        Ok(ChartResult {
            birth_info: BirthInfo {
                date: birth.date.clone(),
                time: birth.time.clone(),
                latitude: birth.latitude,
                longitude: birth.longitude,
                timezone: birth.timezone.clone(),
                julian_day: jd.value(),
                utc_time: format!("{}Z", resolution.utc),
                utc_offset_seconds: resolution.offset_seconds,
                timezone_resolved: resolution.zone_resolved,
            },
            house_system: self.settings.house_system,
            planets,
            houses: self.house_cusps(&frame),
            ascendant: AngularPoint::new(frame.ascendant, catalogue),
            mc: AngularPoint::new(frame.mc, catalogue),
            vertex: AngularPoint::new(frame.vertex, catalogue),
            aspects,
            failed_bodies: outcome.failed,
            catalogue_version: catalogue.version(),
        })
    }

    /// Query every configured body; a failure drops only that body.
    pub fn resolve_bodies(&self, jd: JulianDay) -> BodyOutcome {
        let mut outcome = BodyOutcome::default();
        for &body in &self.settings.bodies {
            match self.ephemeris.position(jd, body) {
                Ok(pos) => outcome.resolved.push((
                    body,
                    BodyPosition {
                        longitude: normalize_full(pos.longitude),
                        ..pos
                    },
                )),
                Err(e) => {
                    log::warn!("Omitting {} from chart: {}", body, e);
                    outcome.failed.push(FailedBody {
                        body,
                        reason: e.to_string(),
                    });
                }
            }
        }
        outcome
    }

    fn house_cusps(&self, frame: &HouseFrame) -> Vec<HouseCusp> {
        let catalogue = &self.settings.catalogue;
        frame
            .cusps
            .iter()
            .enumerate()
            .map(|(i, &cusp)| {
                let house = (i + 1) as u8;
                let placement = SignPlacement::from_longitude(cusp);
                HouseCusp {
                    house,
                    label: catalogue.house_label(house).to_string(),
                    cusp,
                    placement,
                    sign_name: catalogue.sign_name(placement.sign).to_string(),
                }
            })
            .collect()
    }

    fn detect_aspects(&self, outcome: &BodyOutcome, frame: &HouseFrame) -> Vec<ChartAspect> {
        let bodies: Vec<PointMotion> = outcome
            .resolved
            .iter()
            .map(|(body, pos)| PointMotion::body(*body, pos.longitude, pos.speed))
            .collect();
        let angles = [
            PointMotion::stationary(ChartPoint::Ascendant, frame.ascendant),
            PointMotion::stationary(ChartPoint::Midheaven, frame.mc),
        ];

        self.calculator
            .detect(&bodies, &angles)
            .iter()
            .map(|aspect| ChartAspect::new(aspect, &self.settings.catalogue))
            .collect()
    }
}

fn normalize_frame(frame: HouseFrame) -> HouseFrame {
    HouseFrame {
        cusps: frame.cusps.map(normalize_full),
        ascendant: normalize_full(frame.ascendant),
        mc: normalize_full(frame.mc),
        vertex: normalize_full(frame.vertex),
    }
}
