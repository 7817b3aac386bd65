use anyhow::{Context, Result, anyhow};
use directories::BaseDirs;
use ini::{Ini, ParseOption};
use std::{
    env, fs,
    path::{Path, PathBuf},
    str::FromStr,
};

/// Locale for which imperial units become the default.
const US_LOCALE: &str = "en_US";

/// Rejected unit value, either from a CLI flag or the config file.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UnitError {
    #[error("temperature unit is neither (C)elsius, nor (F)ahrenheit: {0:?}")]
    Temperature(String),
    #[error("distance unit is neither km, nor miles: {0:?}")]
    Distance(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    pub fn symbol(&self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "°C",
            TemperatureUnit::Fahrenheit => "°F",
        }
    }
}

impl FromStr for TemperatureUnit {
    type Err = UnitError;

    /// Only the first character counts, so `c`, `Celsius` and `F` are all accepted.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.chars().next().map(|c| c.to_ascii_uppercase()) {
            Some('C') => Ok(TemperatureUnit::Celsius),
            Some('F') => Ok(TemperatureUnit::Fahrenheit),
            _ => Err(UnitError::Temperature(value.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DistanceUnit {
    #[default]
    Kilometers,
    Miles,
}

impl DistanceUnit {
    /// Unit label used next to the wind speed.
    pub fn speed_unit(&self) -> &'static str {
        match self {
            DistanceUnit::Kilometers => "km/h",
            DistanceUnit::Miles => "mph",
        }
    }
}

impl FromStr for DistanceUnit {
    type Err = UnitError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "km" => Ok(DistanceUnit::Kilometers),
            "miles" => Ok(DistanceUnit::Miles),
            _ => Err(UnitError::Distance(value.to_string())),
        }
    }
}

/// Section holding the settings, as in Python's `configparser` files.
const DEFAULT_SECTION: &str = "DEFAULT";

/// Keys accepted under the `[DEFAULT]` section of the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigSection {
    pub city: Option<String>,
    pub temperature: Option<String>,
    pub distance: Option<String>,
}

/// Configuration stored on disk, an INI file:
///
/// ```ini
/// [DEFAULT]
/// city = New York
/// temperature = F
/// distance = miles
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileConfig {
    pub defaults: ConfigSection,
}

impl FileConfig {
    /// Load config from `path`. A missing or broken file yields an empty config.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Self::default();
        }

        match Self::read(path) {
            Ok(cfg) => cfg,
            Err(err) => {
                tracing::warn!("ignoring config file: {err:#}");
                Self::default()
            }
        }
    }

    fn read(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::parse(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Parse INI text. Values are taken literally, without quote or escape handling.
    pub fn parse(contents: &str) -> Result<Self> {
        let options = ParseOption {
            enabled_quote: false,
            enabled_escape: false,
            ..ParseOption::default()
        };
        let ini = Ini::load_from_str_opt(contents, options)?;

        let Some(section) = ini.section(Some(DEFAULT_SECTION)) else {
            return Ok(Self::default());
        };
        let value = |key: &str| section.get(key).map(str::to_string);

        Ok(Self {
            defaults: ConfigSection {
                city: value("city"),
                temperature: value("temperature"),
                distance: value("distance"),
            },
        })
    }

    /// Path to the config file.
    pub fn default_path() -> Result<PathBuf> {
        let dirs = BaseDirs::new()
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("weather.cfg"))
    }
}

/// Values given on the command line. They win over every other source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub city: Option<String>,
    pub temperature: Option<TemperatureUnit>,
    pub distance: Option<DistanceUnit>,
}

/// Fully resolved settings for one invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    /// `None` lets the weather service locate the caller by IP.
    pub city: Option<String>,
    pub temperature: TemperatureUnit,
    pub distance: DistanceUnit,
}

impl Settings {
    /// Layer defaults, the config file, the locale and CLI overrides, lowest priority first.
    ///
    /// `locale` is a normalised locale name such as `en_US` (see [`locale_name`]).
    pub fn resolve(file: &FileConfig, locale: Option<&str>, overrides: &Overrides) -> Self {
        let section = &file.defaults;

        let mut temperature = section
            .temperature
            .as_deref()
            .and_then(config_value::<TemperatureUnit>);
        let mut distance = section
            .distance
            .as_deref()
            .and_then(config_value::<DistanceUnit>);

        if locale == Some(US_LOCALE) {
            temperature.get_or_insert(TemperatureUnit::Fahrenheit);
            distance.get_or_insert(DistanceUnit::Miles);
        }

        let city = overrides
            .city
            .clone()
            .or_else(|| section.city.clone())
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());

        Self {
            city,
            temperature: overrides.temperature.or(temperature).unwrap_or_default(),
            distance: overrides.distance.or(distance).unwrap_or_default(),
        }
    }
}

fn config_value<T>(raw: &str) -> Option<T>
where
    T: FromStr<Err = UnitError>,
{
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    raw.parse()
        .map_err(|err| tracing::warn!("ignoring config value: {err}"))
        .ok()
}

/// Locale governing number formatting, taken from the usual environment variables.
pub fn system_locale() -> Option<String> {
    locale_from(|key| env::var(key).ok())
}

/// First non-empty of `LC_ALL`, `LC_NUMERIC` and `LANG`, as looked up by `var`.
pub fn locale_from<F>(var: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    ["LC_ALL", "LC_NUMERIC", "LANG"]
        .into_iter()
        .filter_map(var)
        .find(|value| !value.is_empty())
        .and_then(|raw| locale_name(&raw))
}

/// Strip codeset and modifier: `en_US.UTF-8@euro` -> `en_US`.
pub fn locale_name(raw: &str) -> Option<String> {
    let name = raw.split(['.', '@']).next().unwrap_or_default().trim();
    (!name.is_empty()).then(|| name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(city: Option<&str>, temperature: Option<&str>, distance: Option<&str>) -> FileConfig {
        FileConfig {
            defaults: ConfigSection {
                city: city.map(Into::into),
                temperature: temperature.map(Into::into),
                distance: distance.map(Into::into),
            },
        }
    }

    #[test]
    fn temperature_uses_first_character_case_insensitively() {
        for (raw, unit) in [
            ("C", TemperatureUnit::Celsius),
            ("c", TemperatureUnit::Celsius),
            ("celsius", TemperatureUnit::Celsius),
            ("F", TemperatureUnit::Fahrenheit),
            ("fahrenheit", TemperatureUnit::Fahrenheit),
        ] {
            assert_eq!(raw.parse::<TemperatureUnit>(), Ok(unit), "{raw}");
        }
    }

    #[test]
    fn temperature_rejects_other_values() {
        for raw in ["", "K", "kelvin", " C"] {
            let err = raw.parse::<TemperatureUnit>().unwrap_err();
            assert!(err.to_string().contains("neither (C)elsius"), "{raw}");
        }
    }

    #[test]
    fn distance_requires_exact_word() {
        assert_eq!("KM".parse::<DistanceUnit>(), Ok(DistanceUnit::Kilometers));
        assert_eq!("Miles".parse::<DistanceUnit>(), Ok(DistanceUnit::Miles));

        for raw in ["", "k", "mile", "mi", "kilometers"] {
            let err = raw.parse::<DistanceUnit>().unwrap_err();
            assert_eq!(err, UnitError::Distance(raw.to_string()));
        }
    }

    #[test]
    fn defaults_without_any_source() {
        let settings = Settings::resolve(&FileConfig::default(), None, &Overrides::default());

        assert_eq!(settings, Settings::default());
        assert_eq!(settings.temperature, TemperatureUnit::Celsius);
        assert_eq!(settings.distance, DistanceUnit::Kilometers);
        assert!(settings.city.is_none());
    }

    #[test]
    fn us_locale_fills_only_unset_fields() {
        let settings = Settings::resolve(&FileConfig::default(), Some("en_US"), &Overrides::default());
        assert_eq!(settings.temperature, TemperatureUnit::Fahrenheit);
        assert_eq!(settings.distance, DistanceUnit::Miles);

        let cfg = file(None, Some("C"), None);
        let settings = Settings::resolve(&cfg, Some("en_US"), &Overrides::default());
        assert_eq!(settings.temperature, TemperatureUnit::Celsius);
        assert_eq!(settings.distance, DistanceUnit::Miles);
    }

    #[test]
    fn other_english_locales_keep_metric() {
        for locale in ["en_GB", "en_CA", "en", "C"] {
            let settings =
                Settings::resolve(&FileConfig::default(), Some(locale), &Overrides::default());
            assert_eq!(settings.temperature, TemperatureUnit::Celsius, "{locale}");
            assert_eq!(settings.distance, DistanceUnit::Kilometers, "{locale}");
        }
    }

    #[test]
    fn overrides_beat_config_and_locale() {
        let cfg = file(Some("Paris"), Some("C"), Some("km"));

        for temperature in [TemperatureUnit::Celsius, TemperatureUnit::Fahrenheit] {
            for distance in [DistanceUnit::Kilometers, DistanceUnit::Miles] {
                let overrides = Overrides {
                    city: Some("Oslo".into()),
                    temperature: Some(temperature),
                    distance: Some(distance),
                };
                let settings = Settings::resolve(&cfg, Some("en_US"), &overrides);

                assert_eq!(settings.city.as_deref(), Some("Oslo"));
                assert_eq!(settings.temperature, temperature);
                assert_eq!(settings.distance, distance);
            }
        }
    }

    #[test]
    fn empty_city_override_requests_auto_detection() {
        let cfg = file(Some("Paris"), None, None);
        let overrides = Overrides {
            city: Some(String::new()),
            ..Overrides::default()
        };

        assert!(Settings::resolve(&cfg, None, &overrides).city.is_none());
    }

    #[test]
    fn invalid_config_values_are_ignored() {
        let cfg = file(None, Some("kelvin"), Some("leagues"));
        let settings = Settings::resolve(&cfg, Some("en_US"), &Overrides::default());

        assert_eq!(settings.temperature, TemperatureUnit::Fahrenheit);
        assert_eq!(settings.distance, DistanceUnit::Miles);
    }

    #[test]
    fn load_from_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = FileConfig::load_from(&dir.path().join("weather.cfg"));

        assert_eq!(cfg, FileConfig::default());
    }

    #[test]
    fn load_from_reads_unquoted_ini_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("weather.cfg");
        fs::write(
            &path,
            "[DEFAULT]\ncity = New York\ntemperature = F\ndistance = miles\n",
        )
        .unwrap();

        let cfg = FileConfig::load_from(&path);

        assert_eq!(cfg, file(Some("New York"), Some("F"), Some("miles")));

        let settings = Settings::resolve(&cfg, None, &Overrides::default());
        assert_eq!(settings.city.as_deref(), Some("New York"));
        assert_eq!(settings.temperature, TemperatureUnit::Fahrenheit);
        assert_eq!(settings.distance, DistanceUnit::Miles);
    }

    #[test]
    fn load_from_unreadable_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("weather.cfg");
        fs::write(&path, [0xff, 0xfe, 0x00, b'[']).unwrap();

        assert_eq!(FileConfig::load_from(&path), FileConfig::default());
    }

    #[test]
    fn parse_keeps_values_literal_and_skips_comments() {
        let cfg = FileConfig::parse("; weather module\n[DEFAULT]\ncity = St. John's\n").unwrap();

        assert_eq!(cfg, file(Some("St. John's"), None, None));
    }

    #[test]
    fn parse_without_default_section_is_empty() {
        let cfg = FileConfig::parse("[other]\ncity = Rome\n").unwrap();

        assert_eq!(cfg, FileConfig::default());
    }

    #[test]
    fn locale_lookup_order_skips_empty_values() {
        let env = |vars: &'static [(&'static str, &'static str)]| {
            move |key: &str| {
                vars.iter()
                    .find(|(name, _)| *name == key)
                    .map(|(_, value)| value.to_string())
            }
        };

        let all = env(&[("LC_ALL", "de_DE.UTF-8"), ("LC_NUMERIC", "fr_FR"), ("LANG", "en_US")]);
        assert_eq!(locale_from(all).as_deref(), Some("de_DE"));

        let numeric = env(&[("LC_ALL", ""), ("LC_NUMERIC", "en_US.UTF-8"), ("LANG", "C")]);
        assert_eq!(locale_from(numeric).as_deref(), Some("en_US"));

        let lang = env(&[("LANG", "en_GB.UTF-8")]);
        assert_eq!(locale_from(lang).as_deref(), Some("en_GB"));

        assert_eq!(locale_from(env(&[])), None);
    }

    #[test]
    fn locale_name_strips_codeset_and_modifier() {
        assert_eq!(locale_name("en_US.UTF-8").as_deref(), Some("en_US"));
        assert_eq!(locale_name("de_DE@euro").as_deref(), Some("de_DE"));
        assert_eq!(locale_name("en_US").as_deref(), Some("en_US"));
        assert_eq!(locale_name(".UTF-8"), None);
        assert_eq!(locale_name(""), None);
    }
}
