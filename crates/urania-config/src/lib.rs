use serde::Deserialize;
use std::env;
use std::fs;
use std::path::PathBuf;
use urania::ephemeris::{EphemerisConfig, HouseSystem};
use urania::western::Locale;
use urania::ChartSettings;

/// Runtime settings for the chart service.
#[derive(Debug, Clone, PartialEq)]
pub struct UraniaConfig {
    pub ephemeris_path: Option<PathBuf>,
    pub house_system: HouseSystem,
    pub sextile_orb: f64,
    pub include_lilith: bool,
    pub locale: Locale,
    pub host: String,
    pub port: u16,
}

impl Default for UraniaConfig {
    fn default() -> Self {
        Self {
            ephemeris_path: None,
            house_system: HouseSystem::Placidus,
            sextile_orb: default_sextile_orb(),
            include_lilith: true,
            locale: Locale::En,
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct EphemerisToml {
    #[serde(default)]
    path: Option<PathBuf>,
    #[serde(default)]
    house_system: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct AspectsToml {
    #[serde(default = "default_sextile_orb")]
    sextile_orb: f64,
}

impl Default for AspectsToml {
    fn default() -> Self {
        Self { sextile_orb: default_sextile_orb() }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct ChartToml {
    #[serde(default = "default_true")]
    include_lilith: bool,
    #[serde(default)]
    locale: Option<String>,
}

impl Default for ChartToml {
    fn default() -> Self {
        Self {
            include_lilith: true,
            locale: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct ServerToml {
    #[serde(default = "default_host")]
    host: String,
    #[serde(default = "default_port")]
    port: u16,
}

impl Default for ServerToml {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RootConfigToml {
    #[serde(default)]
    ephemeris: EphemerisToml,
    #[serde(default)]
    aspects: AspectsToml,
    #[serde(default)]
    chart: ChartToml,
    #[serde(default)]
    server: ServerToml,
}

fn default_sextile_orb() -> f64 {
    urania::aspects::DEFAULT_SEXTILE_ORB
}

fn default_true() -> bool {
    true
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Read `configs/urania.toml`, or the file named by `URANIA_CONFIG`.
///
/// Returns `None` when no config file is present at the usual paths; an
/// explicit `URANIA_CONFIG` that cannot be read is an error.
pub fn read_config_text() -> anyhow::Result<Option<String>> {
    if let Ok(explicit) = env::var("URANIA_CONFIG") {
        let text = fs::read_to_string(&explicit)
            .map_err(|e| anyhow::anyhow!("Could not read URANIA_CONFIG={}: {e}", explicit))?;
        return Ok(Some(text));
    }
    let paths = ["configs/urania.toml", "../../configs/urania.toml"];
    for p in &paths {
        if let Ok(c) = fs::read_to_string(p) {
            return Ok(Some(c));
        }
    }
    Ok(None)
}

/// Parse config text; absent keys take their defaults.
pub fn parse_config(text: &str) -> anyhow::Result<UraniaConfig> {
    let root: RootConfigToml =
        toml::from_str(text).map_err(|e| anyhow::anyhow!("Failed to parse urania.toml: {e}"))?;
    let RootConfigToml {
        ephemeris,
        aspects,
        chart,
        server,
    } = root;

    let house_system = match ephemeris.house_system {
        Some(name) => name
            .parse::<HouseSystem>()
            .map_err(|e| anyhow::anyhow!("ephemeris.house_system: {e}"))?,
        None => HouseSystem::default(),
    };
    let locale = match chart.locale {
        Some(name) => name
            .parse::<Locale>()
            .map_err(|e| anyhow::anyhow!("chart.locale: {e}"))?,
        None => Locale::default(),
    };
    if !aspects.sextile_orb.is_finite() || aspects.sextile_orb < 0.0 {
        anyhow::bail!("aspects.sextile_orb must be a non-negative number, got {}", aspects.sextile_orb);
    }

    Ok(UraniaConfig {
        ephemeris_path: ephemeris.path,
        house_system,
        sextile_orb: aspects.sextile_orb,
        include_lilith: chart.include_lilith,
        locale,
        host: server.host,
        port: server.port,
    })
}

/// Load the config file (or defaults) and apply environment overrides.
pub fn load_config() -> anyhow::Result<UraniaConfig> {
    let mut config = match read_config_text()? {
        Some(text) => parse_config(&text)?,
        None => UraniaConfig::default(),
    };
    config.apply_overrides(|key| env::var(key).ok())?;
    Ok(config)
}

impl UraniaConfig {
    /// Apply `SWISS_EPHEMERIS_PATH` and `PORT` from `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> anyhow::Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("SWISS_EPHEMERIS_PATH").filter(|p| !p.trim().is_empty()) {
            self.ephemeris_path = Some(PathBuf::from(path));
        }
        if let Some(port) = lookup("PORT") {
            self.port = port
                .trim()
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a port number, got {:?}", port))?;
        }
        Ok(())
    }

    pub fn chart_settings(&self) -> ChartSettings {
        ChartSettings::default()
            .with_house_system(self.house_system)
            .with_sextile_orb(self.sextile_orb)
            .with_lilith(self.include_lilith)
            .with_locale(self.locale)
    }

    pub fn ephemeris_config(&self) -> EphemerisConfig {
        EphemerisConfig {
            path: self.ephemeris_path.clone(),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use urania::aspects::AspectKind;
    use urania::Body;

    #[test]
    fn test_empty_text_gives_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config, UraniaConfig::default());
        assert_eq!(config.bind_address(), "0.0.0.0:8080");
    }

    #[test]
    fn test_full_config() {
        let text = r#"
            [ephemeris]
            path = "/srv/ephe"
            house_system = "W"

            [aspects]
            sextile_orb = 4.5

            [chart]
            include_lilith = false
            locale = "es"

            [server]
            host = "127.0.0.1"
            port = 9000
        "#;
        let config = parse_config(text).unwrap();
        assert_eq!(config.ephemeris_path, Some(PathBuf::from("/srv/ephe")));
        assert_eq!(config.house_system, HouseSystem::WholeSign);
        assert_eq!(config.locale, Locale::Es);
        assert_eq!(config.bind_address(), "127.0.0.1:9000");

        let settings = config.chart_settings();
        assert_eq!(settings.house_system, HouseSystem::WholeSign);
        assert_eq!(settings.aspects.orb(AspectKind::Sextile), Some(4.5));
        assert!(!settings.bodies.contains(&Body::Lilith));
        assert_eq!(config.ephemeris_config().path, Some(PathBuf::from("/srv/ephe")));
    }

    #[test]
    fn test_unknown_house_system_rejected() {
        let err = parse_config("[ephemeris]\nhouse_system = \"topocentric-ish\"").unwrap_err();
        assert!(err.to_string().contains("ephemeris.house_system"));
    }

    #[test]
    fn test_negative_orb_rejected() {
        assert!(parse_config("[aspects]\nsextile_orb = -1.0").is_err());
    }

    #[test]
    fn test_environment_overrides() {
        let env: HashMap<&str, &str> =
            [("SWISS_EPHEMERIS_PATH", "/data/ephe"), ("PORT", "5001")].into_iter().collect();
        let mut config = parse_config("[ephemeris]\npath = \"/srv/ephe\"").unwrap();

        config
            .apply_overrides(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.ephemeris_path, Some(PathBuf::from("/data/ephe")));
        assert_eq!(config.port, 5001);
    }

    #[test]
    fn test_bad_port_override() {
        let mut config = UraniaConfig::default();
        assert!(config
            .apply_overrides(|key| (key == "PORT").then(|| "http".to_string()))
            .is_err());
    }
}
