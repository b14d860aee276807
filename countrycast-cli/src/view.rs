//! Terminal rendering for the weather panel.

use countrycast_core::WeatherSnapshot;

/// Render the weather panel in its fully-entered form.
pub fn render_panel(snapshot: &WeatherSnapshot) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "{}  {}\n",
        snapshot.location_name,
        condition_glyph(snapshot.icon_code())
    ));
    out.push_str(&format!("{}°C\n", format_number(snapshot.temp_c)));
    out.push_str(&format!("Feels like {}°C\n", format_number(snapshot.feelslike_c)));
    out.push_str(&format!("Condition: {}\n", snapshot.condition));
    out.push_str(&format!("Humidity: {}%\n", snapshot.humidity_pct));
    out.push_str(&format!("Wind: {} km/h\n", format_number(snapshot.wind_kph)));
    out.push_str(&format!("Updated: {}", snapshot.observation_time.format("%H:%M UTC")));

    out
}

/// Whole numbers print bare ("30"), everything else with one decimal ("29.5").
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}

/// Map a WeatherAPI.com condition code (the icon file stem) to a glyph.
fn condition_glyph(code: Option<u32>) -> &'static str {
    match code {
        Some(113) => "☀",
        Some(116) => "⛅",
        Some(119 | 122) => "☁",
        Some(143 | 248 | 260) => "🌫",
        Some(
            176 | 185 | 263 | 266 | 281 | 284 | 293 | 296 | 299 | 302 | 305 | 308 | 311 | 314
            | 353 | 356 | 359,
        ) => "🌧",
        Some(
            179 | 182 | 227 | 230 | 317 | 320 | 323 | 326 | 329 | 332 | 335 | 338 | 350 | 362
            | 365 | 368 | 371 | 374 | 377,
        ) => "🌨",
        Some(200 | 386 | 389 | 392 | 395) => "⛈",
        _ => "•",
    }
}
