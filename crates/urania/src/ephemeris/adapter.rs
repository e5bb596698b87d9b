use crate::angles::normalize_full;
use crate::ephemeris::types::{
    Body, BodyPosition, EphemerisError, EphemerisProvider, HouseFrame, HouseSystem,
};
use crate::time::JulianDay;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use swisseph::swe::{calc_ut, houses_ex};
use swisseph::{AscMc, Cusp};

// Swiss Ephemeris flags
const FLG_SWIEPH: i32 = 2;
const FLG_SPEED: i32 = 256;

const DEFAULT_EPHEMERIS_PATH: &str = "/usr/local/share/swisseph";

// The C library keeps its state in process globals.
static SWISS_LOCK: Mutex<()> = Mutex::new(());

/// Read-only configuration for the Swiss Ephemeris adapter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EphemerisConfig {
    /// Directory holding the `.se1` data files. Falls back to
    /// `SWISS_EPHEMERIS_PATH`, then to the system default.
    pub path: Option<PathBuf>,
}

impl EphemerisConfig {
    pub fn resolved_path(&self) -> PathBuf {
        self.path.clone().unwrap_or_else(|| {
            env::var("SWISS_EPHEMERIS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_EPHEMERIS_PATH))
        })
    }
}

/// Swiss Ephemeris adapter implementation
#[derive(Debug)]
pub struct SwissEphemerisAdapter {
    ephemeris_path: PathBuf,
}

impl SwissEphemerisAdapter {
    /// Create a new adapter from its configuration
    pub fn new(config: &EphemerisConfig) -> Result<Self, EphemerisError> {
        let path = config.resolved_path();

        if !path.exists() {
            return Err(EphemerisError::FileNotFound {
                path: path.display().to_string(),
                message: "Ephemeris path does not exist. Please ensure Swiss Ephemeris data files are installed.".to_string(),
            });
        }

        // The library reads SE_EPHE_PATH when it initialises on the first
        // calculation; set it before any call goes out.
        env::set_var("SE_EPHE_PATH", &path);
        log::info!("Swiss Ephemeris data path: {}", path.display());

        Ok(Self { ephemeris_path: path })
    }

    pub fn ephemeris_path(&self) -> &Path {
        &self.ephemeris_path
    }
}

impl EphemerisProvider for SwissEphemerisAdapter {
    fn position(&self, julian_day: JulianDay, body: Body) -> Result<BodyPosition, EphemerisError> {
        let jd = julian_day.value();
        let flags = FLG_SWIEPH | FLG_SPEED;

        let result = {
            let _guard = SWISS_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            calc_ut(jd, body.swiss_code() as u32, flags as u32)
        }
        .map_err(|e| EphemerisError::CalculationFailed {
            body,
            julian_day: jd,
            message: format!("Swiss Ephemeris error: {}", e),
        })?;

        let out = result.out;
        if out[..4].iter().any(|v| !v.is_finite()) {
            return Err(EphemerisError::CalculationFailed {
                body,
                julian_day: jd,
                message: "non-finite coordinates".to_string(),
            });
        }

        Ok(BodyPosition {
            longitude: normalize_full(out[0]),
            latitude: out[1],
            distance: out[2],
            speed: out[3],
        })
    }

    fn houses(
        &self,
        julian_day: JulianDay,
        latitude: f64,
        longitude: f64,
        system: HouseSystem,
    ) -> Result<HouseFrame, EphemerisError> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(EphemerisError::HouseCalculationFailed {
                message: format!("observer out of range: lat {}, lon {}", latitude, longitude),
            });
        }

        let (c, a) = {
            let _guard = SWISS_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            houses_ex(julian_day.value(), FLG_SWIEPH, latitude, longitude, system.code() as i32)
        };

        // ascmc[3] is the vertex
        let vertex = a[3];
        let cusps = Cusp::from_array(c);
        let ascmc = AscMc::from_array(a);

        let raw = [
            cusps.first, cusps.second, cusps.third, cusps.fourth,
            cusps.fifth, cusps.sixth, cusps.seventh, cusps.eighth,
            cusps.ninth, cusps.tenth, cusps.eleventh, cusps.twelfth,
        ];

        let mut frame = HouseFrame {
            cusps: [0.0; 12],
            ascendant: ascmc.ascendant,
            mc: ascmc.mc,
            vertex,
        };
        for (slot, cusp) in frame.cusps.iter_mut().zip(raw) {
            *slot = cusp;
        }

        let all_finite = frame.cusps.iter().chain([&frame.ascendant, &frame.mc, &frame.vertex]).all(|v| v.is_finite());
        if !all_finite {
            return Err(EphemerisError::HouseCalculationFailed {
                message: format!("{} houses undefined at latitude {}", system.name(), latitude),
            });
        }

        frame.cusps.iter_mut().for_each(|c| *c = normalize_full(*c));
        frame.ascendant = normalize_full(frame.ascendant);
        frame.mc = normalize_full(frame.mc);
        frame.vertex = normalize_full(frame.vertex);

        Ok(frame)
    }
}
