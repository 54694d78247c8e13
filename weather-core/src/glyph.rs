//! OpenWeatherMap icon codes to emoji.
//!
//! See: https://openweathermap.org/weather-conditions#Icon-list

/// Shown for any icon code missing from [`ICON_GLYPHS`].
pub const FALLBACK_GLYPH: &str = "❓";

pub const ICON_GLYPHS: &[(&str, &str)] = &[
    ("01d", "☀️"),
    ("01n", "🌑"),
    ("02d", "⛅"),
    ("02n", "☁️"),
    ("03d", "☁️"),
    ("03n", "☁️"),
    ("04d", "🌧️"),
    ("04n", "🌧️"),
    ("09d", "🌧️"),
    ("09n", "🌧️"),
    ("10d", "🌦️"),
    ("10n", "🌦️"),
    ("11d", "⛈️"),
    ("11n", "⛈️"),
    ("13d", "❄️"),
    ("13n", "❄️"),
    ("50d", "🌫️"),
    ("50n", "🌫️"),
];

pub fn glyph_for(icon_code: &str) -> &'static str {
    ICON_GLYPHS
        .iter()
        .find(|(code, _)| *code == icon_code)
        .map(|(_, glyph)| *glyph)
        .unwrap_or(FALLBACK_GLYPH)
}
