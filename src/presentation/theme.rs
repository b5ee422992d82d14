use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::classify::{Season, TimeOfDay};

/// Ambient particle drawn over the background
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum ParticleKind {
    CherryBlossom,
    Leaf,
    MapleLeaf,
    Snowflake,
}

struct SeasonStyle {
    particle: ParticleKind,
    /// primary, secondary, accent, text, background
    colors: [&'static str; 5],
    /// morning, day, evening, night: (background, particle color, text color)
    variants: [(&'static str, &'static str, &'static str); 4],
}

const SPRING: SeasonStyle = SeasonStyle {
    particle: ParticleKind::CherryBlossom,
    colors: ["#ffb7c5", "#ffd1dc", "#ff85a2", "#4a4a4a", "#fff6f6"],
    variants: [
        ("linear-gradient(135deg, #ffecd2 0%, #fcb69f 100%)", "#ffd1dc", "#4a4a4a"),
        ("linear-gradient(120deg, #fdfbfb 0%, #ffd1dc 100%)", "#ffb7c5", "#4a4a4a"),
        (
            "linear-gradient(to right, #ff8177 0%, #ff867a 0%, #ff8c7f 21%, #f99185 52%, #cf556c 78%, #b12a5b 100%)",
            "#ffcad4",
            "#fff",
        ),
        ("linear-gradient(to bottom, #09203f 0%, #537895 100%)", "#ffc3d4", "#fff"),
    ],
};

const SUMMER: SeasonStyle = SeasonStyle {
    particle: ParticleKind::Leaf,
    colors: ["#48cae4", "#90e0ef", "#00b4d8", "#03045e", "#caf0f8"],
    variants: [
        ("linear-gradient(120deg, #84fab0 0%, #8fd3f4 100%)", "#90e0ef", "#03045e"),
        ("linear-gradient(to right, #4facfe 0%, #00f2fe 100%)", "#caf0f8", "#03045e"),
        ("linear-gradient(135deg, #667eea 0%, #764ba2 100%)", "#90e0ef", "#fff"),
        ("linear-gradient(to bottom, #1e3c72 0%, #2a5298 100%)", "#48cae4", "#fff"),
    ],
};

const AUTUMN: SeasonStyle = SeasonStyle {
    particle: ParticleKind::MapleLeaf,
    colors: ["#e76f51", "#f4a261", "#e9c46a", "#264653", "#fdf6e3"],
    variants: [
        ("linear-gradient(to right, #f6d365 0%, #fda085 100%)", "#f4a261", "#264653"),
        ("linear-gradient(120deg, #f6d365 0%, #e76f51 100%)", "#e9c46a", "#264653"),
        ("linear-gradient(to right, #f83600 0%, #f9d423 100%)", "#f4a261", "#264653"),
        ("linear-gradient(to bottom, #243949 0%, #517fa4 100%)", "#e76f51", "#fff"),
    ],
};

const WINTER: SeasonStyle = SeasonStyle {
    particle: ParticleKind::Snowflake,
    colors: ["#8ecae6", "#e0fbfc", "#219ebc", "#023047", "#f8f9fa"],
    variants: [
        ("linear-gradient(to top, #e6e9f0 0%, #eef1f5 100%)", "#e0fbfc", "#023047"),
        ("linear-gradient(120deg, #e0c3fc 0%, #8ec5fc 100%)", "#8ecae6", "#023047"),
        ("linear-gradient(to right, #6a11cb 0%, #2575fc 100%)", "#e0fbfc", "#fff"),
        (
            "linear-gradient(to bottom, #0f2027 0%, #203a43 50%, #2c5364 100%)",
            "#8ecae6",
            "#fff",
        ),
    ],
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Palette {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub text: String,
    pub background: String,
}

/// Colors for one season at one time of day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Theme {
    pub season: Season,
    pub time_of_day: TimeOfDay,
    pub particle: ParticleKind,
    pub palette: Palette,
    /// CSS background for the page
    pub background: String,
    pub particle_color: String,
    pub text_color: String,
}

impl Theme {
    pub fn for_moment(season: Season, time_of_day: TimeOfDay) -> Self {
        let style = match season {
            Season::Spring => &SPRING,
            Season::Summer => &SUMMER,
            Season::Autumn => &AUTUMN,
            Season::Winter => &WINTER,
        };
        let (background, particle_color, text_color) = style.variants[match time_of_day {
            TimeOfDay::Morning => 0,
            TimeOfDay::Day => 1,
            TimeOfDay::Evening => 2,
            TimeOfDay::Night => 3,
        }];
        let [primary, secondary, accent, text, page] = style.colors;

        Self {
            season,
            time_of_day,
            particle: style.particle,
            palette: Palette {
                primary: primary.to_string(),
                secondary: secondary.to_string(),
                accent: accent.to_string(),
                text: text.to_string(),
                background: page.to_string(),
            },
            background: background.to_string(),
            particle_color: particle_color.to_string(),
            text_color: text_color.to_string(),
        }
    }
}
