/// Icon name for an OpenWeatherMap icon code ("01d", "10n", ...).
/// Unknown codes have no icon.
pub fn icon_name(code: &str) -> Option<&'static str> {
    let name = match code {
        "01d" => "clear-day",
        "01n" => "clear-night",
        "02d" => "partly-cloudy-day",
        "02n" => "partly-cloudy-night",
        "03d" | "03n" | "04d" | "04n" => "cloudy",
        "09d" | "09n" | "10d" | "10n" => "rain",
        "11d" | "11n" => "thunderstorm",
        "13d" | "13n" => "snow",
        "50d" | "50n" => "fog",
        _ => return None,
    };
    Some(name)
}
