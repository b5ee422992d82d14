use chrono::Weekday;

/// Languages with localized weekday names. Any other provider language code
/// falls back to English labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    ChineseSimplified,
    Japanese,
    #[default]
    English,
}

impl Language {
    /// Map an OpenWeatherMap `lang` code to a label language
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_lowercase().as_str() {
            "zh_cn" => Self::ChineseSimplified,
            "ja" => Self::Japanese,
            _ => Self::English,
        }
    }

    pub fn weekday_name(self, weekday: Weekday) -> &'static str {
        let index = weekday.num_days_from_monday() as usize;
        match self {
            Self::ChineseSimplified => {
                ["星期一", "星期二", "星期三", "星期四", "星期五", "星期六", "星期日"][index]
            }
            Self::Japanese => {
                ["月曜日", "火曜日", "水曜日", "木曜日", "金曜日", "土曜日", "日曜日"][index]
            }
            Self::English => [
                "Monday",
                "Tuesday",
                "Wednesday",
                "Thursday",
                "Friday",
                "Saturday",
                "Sunday",
            ][index],
        }
    }
}
