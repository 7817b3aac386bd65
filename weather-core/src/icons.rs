//! wttr.in weather codes and the glyph shown for each of them.

/// Shown for codes missing from [`WEATHER_ICONS`].
pub const FALLBACK_ICON: &str = "🌡️";

/// Sorted by code so lookups can binary search.
const WEATHER_ICONS: &[(&str, &str)] = &[
    ("113", "☀️"),  // Clear/Sunny
    ("116", "⛅"),  // Partly cloudy
    ("119", "☁️"),  // Cloudy
    ("122", "☁️"),  // Overcast
    ("143", "🌫️"), // Mist
    ("176", "🌦️"), // Patchy rain nearby
    ("179", "🌨️"), // Patchy snow nearby
    ("182", "🌧️"), // Patchy sleet nearby
    ("185", "🌧️"), // Patchy freezing drizzle nearby
    ("200", "⛈️"),  // Thundery outbreaks nearby
    ("227", "🌨️"), // Blowing snow
    ("230", "🌨️"), // Blizzard
    ("248", "🌫️"), // Fog
    ("260", "🌫️"), // Freezing fog
    ("263", "🌦️"), // Patchy light drizzle
    ("266", "🌦️"), // Light drizzle
    ("281", "🌧️"), // Freezing drizzle
    ("284", "🌧️"), // Heavy freezing drizzle
    ("293", "🌦️"), // Patchy light rain
    ("296", "🌦️"), // Light rain
    ("299", "🌧️"), // Moderate rain at times
    ("302", "🌧️"), // Moderate rain
    ("305", "🌧️"), // Heavy rain at times
    ("308", "🌧️"), // Heavy rain
    ("311", "🌧️"), // Light freezing rain
    ("314", "🌧️"), // Moderate or heavy freezing rain
    ("317", "🌨️"), // Light sleet
    ("320", "🌨️"), // Moderate or heavy sleet
    ("323", "🌨️"), // Patchy light snow
    ("326", "🌨️"), // Light snow
    ("329", "🌨️"), // Patchy moderate snow
    ("332", "🌨️"), // Moderate snow
    ("335", "🌨️"), // Patchy heavy snow
    ("338", "🌨️"), // Heavy snow
    ("350", "🌧️"), // Ice pellets
    ("353", "🌦️"), // Light rain shower
    ("356", "🌧️"), // Moderate or heavy rain shower
    ("359", "🌧️"), // Torrential rain shower
    ("362", "🌨️"), // Light sleet showers
    ("365", "🌨️"), // Moderate or heavy sleet showers
    ("368", "🌨️"), // Light snow showers
    ("371", "🌨️"), // Moderate or heavy snow showers
    ("374", "🌧️"), // Light showers of ice pellets
    ("377", "🌧️"), // Moderate or heavy showers of ice pellets
    ("386", "⛈️"),  // Patchy light rain in area with thunder
    ("389", "⛈️"),  // Moderate or heavy rain in area with thunder
    ("392", "⛈️"),  // Patchy light snow in area with thunder
    ("395", "⛈️"),  // Moderate or heavy snow in area with thunder
];

pub fn icon_for(code: &str) -> &'static str {
    WEATHER_ICONS
        .binary_search_by(|(known, _)| (*known).cmp(code))
        .map(|idx| WEATHER_ICONS[idx].1)
        .unwrap_or(FALLBACK_ICON)
}
