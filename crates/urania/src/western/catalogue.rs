//! Display name tables for signs, bodies, aspects and houses.
//!
//! Tables are immutable and versioned. A chart carries the version of the
//! catalogue it was labelled with so clients can detect naming changes.

use crate::aspects::{AspectKind, ChartPoint};
use crate::ephemeris::Body;
use crate::western::signs::ZodiacSign;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub const CATALOGUE_VERSION: &str = "2024.1";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Es,
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "en" | "english" => Ok(Locale::En),
            "es" | "spanish" | "español" => Ok(Locale::Es),
            other => Err(format!("Unknown locale: {}", other)),
        }
    }
}

const SIGNS_EN: [&str; 12] = [
    "Aries", "Taurus", "Gemini", "Cancer", "Leo", "Virgo",
    "Libra", "Scorpio", "Sagittarius", "Capricorn", "Aquarius", "Pisces",
];

const SIGNS_ES: [&str; 12] = [
    "Aries", "Tauro", "Géminis", "Cáncer", "Leo", "Virgo",
    "Libra", "Escorpio", "Sagitario", "Capricornio", "Acuario", "Piscis",
];

// (body, english, spanish)
const BODY_NAMES: &[(Body, &str, &str)] = &[
    (Body::Sun, "Sun", "Sol"),
    (Body::Moon, "Moon", "Luna"),
    (Body::Mercury, "Mercury", "Mercurio"),
    (Body::Venus, "Venus", "Venus"),
    (Body::Mars, "Mars", "Marte"),
    (Body::Jupiter, "Jupiter", "Júpiter"),
    (Body::Saturn, "Saturn", "Saturno"),
    (Body::Uranus, "Uranus", "Urano"),
    (Body::Neptune, "Neptune", "Neptuno"),
    (Body::Pluto, "Pluto", "Plutón"),
    (Body::NorthNode, "North Node", "Nodo Norte"),
    (Body::Chiron, "Chiron", "Quirón"),
    (Body::Lilith, "Lilith", "Lilith"),
];

const ASPECT_NAMES: &[(AspectKind, &str, &str)] = &[
    (AspectKind::Conjunction, "Conjunction", "Conjunción"),
    (AspectKind::Opposition, "Opposition", "Oposición"),
    (AspectKind::Trine, "Trine", "Trígono"),
    (AspectKind::Square, "Square", "Cuadratura"),
    (AspectKind::Sextile, "Sextile", "Sextil"),
];

const HOUSES_EN: [&str; 12] = [
    "House 1 (Ascendant)", "House 2", "House 3", "House 4 (IC)",
    "House 5", "House 6", "House 7 (Descendant)", "House 8",
    "House 9", "House 10 (MC)", "House 11", "House 12",
];

const HOUSES_ES: [&str; 12] = [
    "Casa 1 (Ascendente)", "Casa 2", "Casa 3", "Casa 4 (IC)",
    "Casa 5", "Casa 6", "Casa 7 (Descendente)", "Casa 8",
    "Casa 9", "Casa 10 (MC)", "Casa 11", "Casa 12",
];

/// Localized labels used when assembling a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Catalogue {
    locale: Locale,
}

impl Catalogue {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    pub fn version(&self) -> &'static str {
        CATALOGUE_VERSION
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn sign_name(&self, sign: ZodiacSign) -> &'static str {
        match self.locale {
            Locale::En => SIGNS_EN[sign.index()],
            Locale::Es => SIGNS_ES[sign.index()],
        }
    }

    pub fn body_name(&self, body: Body) -> &'static str {
        BODY_NAMES
            .iter()
            .find(|(b, _, _)| *b == body)
            .map(|(_, en, es)| match self.locale {
                Locale::En => *en,
                Locale::Es => *es,
            })
            .unwrap_or_else(|| body.slug())
    }

    pub fn aspect_name(&self, kind: AspectKind) -> &'static str {
        ASPECT_NAMES
            .iter()
            .find(|(k, _, _)| *k == kind)
            .map(|(_, en, es)| match self.locale {
                Locale::En => *en,
                Locale::Es => *es,
            })
            .unwrap_or_else(|| kind.slug())
    }

    /// Name of a body or angle taking part in an aspect.
    pub fn point_name(&self, point: ChartPoint) -> &'static str {
        match (point, self.locale) {
            (ChartPoint::Body(body), _) => self.body_name(body),
            (ChartPoint::Ascendant, Locale::En) => "Ascendant",
            (ChartPoint::Ascendant, Locale::Es) => "Ascendente",
            (ChartPoint::Midheaven, Locale::En) => "Midheaven",
            (ChartPoint::Midheaven, Locale::Es) => "Medio Cielo",
        }
    }

    /// Label for house `number` (1-12).
    pub fn house_label(&self, number: u8) -> &'static str {
        let idx = (number.clamp(1, 12) - 1) as usize;
        match self.locale {
            Locale::En => HOUSES_EN[idx],
            Locale::Es => HOUSES_ES[idx],
        }
    }
}

impl Default for Catalogue {
    fn default() -> Self {
        Self::new(Locale::default())
    }
}
