use crate::{
    config::{DistanceUnit, Settings, TemperatureUnit},
    icons::icon_for,
    model::{Output, OutputClass, Snapshot},
};

/// Text shown when neither the service nor the cache can provide data.
pub const UNAVAILABLE_TEXT: &str = "🌡 N/A";

/// Render a snapshot in the units chosen by `settings`.
pub fn render(snapshot: &Snapshot, settings: &Settings) -> Output {
    let (temp, feels_like) = match settings.temperature {
        TemperatureUnit::Celsius => (&snapshot.temp_c, &snapshot.feels_like_c),
        TemperatureUnit::Fahrenheit => (&snapshot.temp_f, &snapshot.feels_like_f),
    };
    let wind_speed = match settings.distance {
        DistanceUnit::Kilometers => &snapshot.wind_kmph,
        DistanceUnit::Miles => &snapshot.wind_mph,
    };
    let unit = settings.temperature.symbol();

    Output {
        text: format!("{} {temp}{unit}", icon_for(&snapshot.weather_code)),
        tooltip: format!(
            "{}, {}\n{}\nFeels like: {feels_like}{unit}\nWind: {wind_speed} {} {}\nHumidity: {}%",
            snapshot.area_name,
            snapshot.country,
            snapshot.description,
            settings.distance.speed_unit(),
            snapshot.wind_direction,
            snapshot.humidity,
        ),
        class: OutputClass::Weather,
    }
}

/// Output used when no weather data can be shown at all.
pub fn unavailable(error: &str) -> Output {
    Output {
        text: UNAVAILABLE_TEXT.to_string(),
        tooltip: format!("Weather data unavailable\nError: {error}"),
        class: OutputClass::WeatherError,
    }
}
