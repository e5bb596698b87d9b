use crate::aspects::{AspectCatalogue, AspectKind};
use crate::ephemeris::{Body, HouseSystem};
use crate::western::{Catalogue, Locale};

/// What a chart includes and how it is labelled.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSettings {
    pub house_system: HouseSystem,
    /// Bodies to place, in output order
    pub bodies: Vec<Body>,
    pub aspects: AspectCatalogue,
    pub catalogue: Catalogue,
}

impl ChartSettings {
    pub fn with_house_system(mut self, system: HouseSystem) -> Self {
        self.house_system = system;
        self
    }

    pub fn with_sextile_orb(mut self, orb: f64) -> Self {
        self.aspects = self.aspects.with_orb(AspectKind::Sextile, orb);
        self
    }

    pub fn with_lilith(mut self, include: bool) -> Self {
        self.bodies.retain(|b| *b != Body::Lilith);
        if include {
            self.bodies.push(Body::Lilith);
        }
        self
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.catalogue = Catalogue::new(locale);
        self
    }
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            house_system: HouseSystem::Placidus,
            bodies: Body::ALL.to_vec(),
            aspects: AspectCatalogue::default(),
            catalogue: Catalogue::default(),
        }
    }
}
