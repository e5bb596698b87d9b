use std::collections::HashMap;
use std::sync::Arc;
use urania::aspects::{AspectKind, ChartPoint};
use urania::chart::{ChartError, Coordinate, InputError};
use urania::ephemeris::{BodyPosition, EphemerisError, HouseFrame, HouseSystem};
use urania::time::{julian_day, JulianDay};
use urania::western::{Locale, ZodiacSign};
use urania::{Body, BirthRequest, ChartAssembler, ChartSettings, EphemerisProvider, IanaTimezones};

/// Provider answering from fixed tables regardless of the moment asked.
struct FixedEphemeris {
    bodies: HashMap<Body, BodyPosition>,
    frame: Option<HouseFrame>,
}

impl EphemerisProvider for FixedEphemeris {
    fn position(&self, julian_day: JulianDay, body: Body) -> Result<BodyPosition, EphemerisError> {
        self.bodies
            .get(&body)
            .copied()
            .ok_or(EphemerisError::CalculationFailed {
                body,
                julian_day: julian_day.value(),
                message: "no data for body".to_string(),
            })
    }

    fn houses(
        &self,
        _julian_day: JulianDay,
        latitude: f64,
        _longitude: f64,
        system: HouseSystem,
    ) -> Result<HouseFrame, EphemerisError> {
        self.frame.ok_or(EphemerisError::HouseCalculationFailed {
            message: format!("{} houses undefined at latitude {}", system.name(), latitude),
        })
    }
}

fn position(longitude: f64, speed: f64) -> BodyPosition {
    BodyPosition {
        longitude,
        latitude: 0.0,
        distance: 1.0,
        speed,
    }
}

fn equal_frame(ascendant: f64, mc: f64) -> HouseFrame {
    let mut cusps = [0.0; 12];
    for (i, cusp) in cusps.iter_mut().enumerate() {
        *cusp = (ascendant + 30.0 * i as f64) % 360.0;
    }
    HouseFrame {
        cusps,
        ascendant,
        mc,
        vertex: 280.0,
    }
}

fn fixed_ephemeris() -> FixedEphemeris {
    let mut bodies = HashMap::new();
    bodies.insert(Body::Sun, position(10.0, 1.0));
    bodies.insert(Body::Moon, position(190.0, 13.0));
    bodies.insert(Body::Mars, position(123.4567891234, -0.5));
    FixedEphemeris {
        bodies,
        frame: Some(equal_frame(100.0, 10.0)),
    }
}

fn settings() -> ChartSettings {
    ChartSettings {
        bodies: vec![Body::Sun, Body::Moon, Body::Mars, Body::Chiron],
        ..ChartSettings::default()
    }
}

fn assembler_with(ephemeris: FixedEphemeris, settings: ChartSettings) -> ChartAssembler {
    ChartAssembler::new(Arc::new(ephemeris), Arc::new(IanaTimezones), settings)
}

fn request(date: &str, time: &str, timezone: &str) -> BirthRequest {
    BirthRequest {
        birth_date: Some(date.to_string()),
        birth_time: Some(time.to_string()),
        latitude: Some(Coordinate::Number(40.7128)),
        longitude: Some(Coordinate::Text("-74.0060".to_string())),
        timezone: Some(timezone.to_string()),
    }
}

#[test]
fn test_places_bodies_in_signs_and_houses() {
    let assembler = assembler_with(fixed_ephemeris(), settings());
    let chart = assembler
        .calculate(&request("1985-11-21", "03:09", "America/New_York"))
        .unwrap();

    let sun = chart.planet(Body::Sun).unwrap();
    assert_eq!(sun.placement.sign, ZodiacSign::Aries);
    assert_eq!(sun.sign_name, "Aries");
    assert_eq!(sun.house, 10);
    assert!(!sun.retrograde);

    let moon = chart.planet(Body::Moon).unwrap();
    assert_eq!(moon.placement.sign, ZodiacSign::Libra);
    assert_eq!(moon.house, 4);

    let mars = chart.planet(Body::Mars).unwrap();
    assert_eq!(mars.placement.sign, ZodiacSign::Leo);
    assert_eq!(mars.house, 1);
    assert!(mars.retrograde);

    assert_eq!(chart.houses.len(), 12);
    assert_eq!(chart.houses[0].label, "House 1 (Ascendant)");
    assert_eq!(chart.houses[0].placement.sign, ZodiacSign::Cancer);
    assert_eq!(chart.ascendant.placement.sign, ZodiacSign::Cancer);
    assert_eq!(chart.mc.placement.sign, ZodiacSign::Aries);
    assert_eq!(chart.vertex.placement.sign, ZodiacSign::Capricorn);
    assert_eq!(chart.house_system, HouseSystem::Placidus);
}

#[test]
fn test_failed_body_is_omitted_not_fatal() {
    let assembler = assembler_with(fixed_ephemeris(), settings());
    let chart = assembler
        .calculate(&request("1985-11-21", "03:09", "America/New_York"))
        .unwrap();

    assert_eq!(chart.planets.len(), 3);
    assert!(chart.planet(Body::Chiron).is_none());
    assert_eq!(chart.failed_bodies.len(), 1);
    assert_eq!(chart.failed_bodies[0].body, Body::Chiron);
    assert!(chart.failed_bodies[0].reason.contains("no data for body"));

    let outcome = assembler.resolve_bodies(JulianDay::J2000);
    assert_eq!(outcome.resolved.len(), 3);
    assert_eq!(outcome.failed.len(), 1);
}

#[test]
fn test_house_failure_aborts_chart() {
    let ephemeris = FixedEphemeris {
        frame: None,
        ..fixed_ephemeris()
    };
    let assembler = assembler_with(ephemeris, settings());

    let err = assembler
        .calculate(&request("1985-11-21", "03:09", "America/New_York"))
        .unwrap_err();

    assert!(matches!(err, ChartError::Houses(EphemerisError::HouseCalculationFailed { .. })));
    assert!(err.to_string().starts_with("Failed to calculate houses"));
}

#[test]
fn test_invalid_input_never_reaches_ephemeris() {
    let assembler = assembler_with(fixed_ephemeris(), settings());

    let mut missing = request("1985-11-21", "03:09", "UTC");
    missing.birth_date = None;
    assert_eq!(
        assembler.calculate(&missing).unwrap_err(),
        ChartError::Input(InputError::Missing("birthDate"))
    );

    let mut polar = request("1985-11-21", "03:09", "UTC");
    polar.latitude = Some(Coordinate::Number(91.0));
    assert!(matches!(
        assembler.calculate(&polar).unwrap_err(),
        ChartError::Input(InputError::OutOfRange { field: "latitude", .. })
    ));

    let bad_date = request("1985-13-21", "03:09", "UTC");
    assert!(matches!(
        assembler.calculate(&bad_date).unwrap_err(),
        ChartError::Input(InputError::InvalidDate(_))
    ));
}

#[test]
fn test_local_time_converted_to_utc() {
    let assembler = assembler_with(fixed_ephemeris(), settings());
    let chart = assembler
        .calculate(&request("1985-11-21", "03:09", "America/New_York"))
        .unwrap();

    let info = &chart.birth_info;
    assert_eq!(info.utc_time, "1985-11-21T08:09:00Z");
    assert_eq!(info.utc_offset_seconds, -5 * 3600);
    assert!(info.timezone_resolved);
    let expected = julian_day(1985, 11, 21, 8.0 + 9.0 / 60.0).value();
    assert!((info.julian_day - expected).abs() < 1e-9);
}

#[test]
fn test_summer_time_offset() {
    let assembler = assembler_with(fixed_ephemeris(), settings());
    let chart = assembler
        .calculate(&request("2020-07-04", "12:00", "America/New_York"))
        .unwrap();

    assert_eq!(chart.birth_info.utc_time, "2020-07-04T16:00:00Z");
    assert_eq!(chart.birth_info.utc_offset_seconds, -4 * 3600);
}

#[test]
fn test_unknown_zone_read_as_utc() {
    let assembler = assembler_with(fixed_ephemeris(), settings());
    let chart = assembler
        .calculate(&request("1985-11-21", "03:09", "Mars/Olympus_Mons"))
        .unwrap();

    assert_eq!(chart.birth_info.utc_time, "1985-11-21T03:09:00Z");
    assert_eq!(chart.birth_info.utc_offset_seconds, 0);
    assert!(!chart.birth_info.timezone_resolved);
}

#[test]
fn test_aspects_include_angles_in_order() {
    let assembler = assembler_with(fixed_ephemeris(), settings());
    let chart = assembler
        .calculate(&request("1985-11-21", "03:09", "America/New_York"))
        .unwrap();

    let found: Vec<(ChartPoint, ChartPoint, AspectKind)> = chart
        .aspects
        .iter()
        .map(|a| (a.planet1, a.planet2, a.aspect))
        .collect();
    assert_eq!(
        found,
        vec![
            (ChartPoint::Body(Body::Sun), ChartPoint::Body(Body::Moon), AspectKind::Opposition),
            (ChartPoint::Body(Body::Sun), ChartPoint::Body(Body::Mars), AspectKind::Trine),
            (ChartPoint::Body(Body::Sun), ChartPoint::Ascendant, AspectKind::Square),
            (ChartPoint::Body(Body::Sun), ChartPoint::Midheaven, AspectKind::Conjunction),
            (ChartPoint::Body(Body::Moon), ChartPoint::Ascendant, AspectKind::Square),
            (ChartPoint::Body(Body::Moon), ChartPoint::Midheaven, AspectKind::Opposition),
            (ChartPoint::Body(Body::Mars), ChartPoint::Midheaven, AspectKind::Trine),
        ]
    );

    let opposition = &chart.aspects[0];
    assert!(opposition.exact);
    assert_eq!(opposition.planet1_name, "Sun");
    assert_eq!(opposition.aspect_name, "Opposition");
    assert_eq!(chart.aspects[2].planet2_name, "Ascendant");
}

#[test]
fn test_json_output_is_rounded() {
    let assembler = assembler_with(fixed_ephemeris(), settings());
    let chart = assembler
        .calculate(&request("1985-11-21", "03:09", "America/New_York"))
        .unwrap();
    let json = serde_json::to_value(&chart).unwrap();

    let mars = &json["planets"][2];
    assert_eq!(mars["id"], "mars");
    assert_eq!(mars["longitude"].as_f64(), Some(123.456789));
    assert_eq!(mars["sign"], "leo");
    assert_eq!(mars["signName"], "Leo");
    assert_eq!(mars["retrograde"], true);

    // Sun-Mars trine is 6.5432... from exact
    let trine = &json["aspects"][1];
    assert_eq!(trine["planet1"], "sun");
    assert_eq!(trine["planet2"], "mars");
    assert_eq!(trine["aspect"], "trine");
    assert_eq!(trine["orb"].as_f64(), Some(6.54));

    assert_eq!(json["houseSystem"], "placidus");
    assert_eq!(json["failedBodies"][0]["body"], "chiron");
    assert_eq!(json["catalogueVersion"], "2024.1");
    assert_eq!(json["birthInfo"]["utcTime"], "1985-11-21T08:09:00Z");
}

#[test]
fn test_spanish_labels() {
    let assembler = assembler_with(fixed_ephemeris(), settings().with_locale(Locale::Es));
    let chart = assembler
        .calculate(&request("1985-11-21", "03:09", "America/New_York"))
        .unwrap();

    let sun = chart.planet(Body::Sun).unwrap();
    assert_eq!(sun.name, "Sol");
    assert_eq!(sun.sign_name, "Aries");
    assert_eq!(chart.planet(Body::Moon).unwrap().sign_name, "Libra");
    assert_eq!(chart.planet(Body::Mars).unwrap().name, "Marte");
    assert_eq!(chart.houses[0].label, "Casa 1 (Ascendente)");
    assert_eq!(chart.aspects[0].aspect_name, "Oposición");
    assert_eq!(chart.aspects[2].planet2_name, "Ascendente");
}

#[test]
fn test_raw_provider_values_are_normalized() {
    let mut bodies = HashMap::new();
    bodies.insert(Body::Sun, position(370.0, 1.0));
    let mut frame = equal_frame(100.0, 10.0);
    frame.ascendant = 460.0;
    frame.cusps[0] = -260.0;
    let ephemeris = FixedEphemeris {
        bodies,
        frame: Some(frame),
    };
    let settings = ChartSettings {
        bodies: vec![Body::Sun],
        ..ChartSettings::default()
    };
    let chart = assembler_with(ephemeris, settings)
        .calculate(&request("2000-01-01", "12:00", "UTC"))
        .unwrap();

    let sun = chart.planet(Body::Sun).unwrap();
    assert!((sun.longitude - 10.0).abs() < 1e-9);
    assert_eq!(sun.house, 10);
    assert!((chart.ascendant.longitude - 100.0).abs() < 1e-9);
    assert!((chart.houses[0].cusp - 100.0).abs() < 1e-9);
}

#[test]
fn test_lilith_optional() {
    let without = ChartSettings::default().with_lilith(false);
    assert!(!without.bodies.contains(&Body::Lilith));

    let with = ChartSettings::default().with_lilith(true);
    assert_eq!(with.bodies.last(), Some(&Body::Lilith));
}
