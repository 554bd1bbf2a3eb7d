use crate::model::WeatherResult;

/// Render a result as the multi-line text shown in the output label.
pub fn format_report(result: &WeatherResult) -> String {
    format!(
        "--- Погода в {} ---\n\
         Температура: {}°C\n\
         Описание: {}\n\
         Влажность: {}%\n\
         Скорость ветра: {} км/ч",
        result.location_name,
        format_decimal(result.temperature_c),
        result.condition,
        result.humidity_pct,
        format_decimal(result.wind_kph),
    )
}

/// Upper-case the first character and lower-case the rest.
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

// Whole numbers keep one fractional digit so "18.0" does not collapse to "18".
fn format_decimal(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 { format!("{value:.1}") } else { value.to_string() }
}
