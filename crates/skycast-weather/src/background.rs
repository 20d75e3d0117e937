//! Background selection from the current condition and time of day.

use serde::{Deserialize, Serialize};

/// Closed set of dashboard backgrounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Background {
    ClearDay,
    FewCloudsDay,
    OvercastDay,
    CloudsDay,
    LightRainDay,
    RainDay,
    DrizzleDay,
    ThunderDay,
    SnowDay,
    MistDay,
    DustDay,
    SmokeDay,
    ClearNight,
    CloudsNight,
    RainNight,
    ThunderNight,
    SnowNight,
    /// Every other condition after dark
    Night,
    #[default]
    Default,
}

impl Background {
    /// Stable identifier for renderers.
    pub fn id(self) -> &'static str {
        match self {
            Self::ClearDay => "clear-day",
            Self::FewCloudsDay => "few-clouds-day",
            Self::OvercastDay => "overcast-day",
            Self::CloudsDay => "clouds-day",
            Self::LightRainDay => "light-rain-day",
            Self::RainDay => "rain-day",
            Self::DrizzleDay => "drizzle-day",
            Self::ThunderDay => "thunder-day",
            Self::SnowDay => "snow-day",
            Self::MistDay => "mist-day",
            Self::DustDay => "dust-day",
            Self::SmokeDay => "smoke-day",
            Self::ClearNight => "clear-night",
            Self::CloudsNight => "clouds-night",
            Self::RainNight => "rain-night",
            Self::ThunderNight => "thunder-night",
            Self::SnowNight => "snow-night",
            Self::Night => "night",
            Self::Default => "default",
        }
    }

    /// CSS gradient for web renderers.
    pub fn gradient(self) -> &'static str {
        match self {
            Self::ClearDay => "linear-gradient(135deg, #667eea 0%, #764ba2 50%, #f093fb 100%)",
            Self::FewCloudsDay => "linear-gradient(135deg, #a8c0ff 0%, #6b73ff 50%, #9795f0 100%)",
            Self::OvercastDay => "linear-gradient(135deg, #bdc3c7 0%, #8e9eab 50%, #718093 100%)",
            Self::CloudsDay => "linear-gradient(135deg, #c9d6ff 0%, #a1c4fd 50%, #92b4ec 100%)",
            Self::LightRainDay => "linear-gradient(135deg, #5f72bd 0%, #7f8c9f 50%, #8e9eab 100%)",
            Self::RainDay => "linear-gradient(135deg, #3a6073 0%, #4a7c8f 50%, #5b8fa3 100%)",
            Self::DrizzleDay => "linear-gradient(135deg, #6a85b6 0%, #7e9eb8 50%, #92b5c1 100%)",
            Self::ThunderDay => "linear-gradient(135deg, #283048 0%, #3f5169 50%, #4e6388 100%)",
            Self::SnowDay => "linear-gradient(135deg, #e0eafc 0%, #cfdef3 50%, #dfe9f3 100%)",
            Self::MistDay => "linear-gradient(135deg, #d7dde8 0%, #b8c6db 50%, #a2b1c6 100%)",
            Self::DustDay => "linear-gradient(135deg, #d4a574 0%, #b8936f 50%, #9d7f6a 100%)",
            Self::SmokeDay => "linear-gradient(135deg, #757f9a 0%, #878ea0 50%, #9da5b4 100%)",
            Self::ClearNight => "linear-gradient(135deg, #0f2027 0%, #203a43 50%, #2c5364 100%)",
            Self::CloudsNight => "linear-gradient(135deg, #1a2a6c 0%, #2c3e50 50%, #34495e 100%)",
            Self::RainNight => "linear-gradient(135deg, #1f1c2c 0%, #2c3e50 50%, #34495e 100%)",
            Self::ThunderNight => "linear-gradient(135deg, #141e30 0%, #243b55 100%)",
            Self::SnowNight => "linear-gradient(135deg, #2c3e50 0%, #3f5871 50%, #516b8b 100%)",
            Self::Night => "linear-gradient(135deg, #232526 0%, #414345 100%)",
            Self::Default => "linear-gradient(135deg, #667eea 0%, #764ba2 100%)",
        }
    }
}

/// How a rule picks its daytime background.
#[derive(Debug, Clone, Copy)]
enum DayVariant {
    Fixed(Background),
    /// First description refinement whose keywords match, else the fallback
    ByDescription(&'static [(&'static [&'static str], Background)], Background),
}

#[derive(Debug, Clone, Copy)]
struct Rule {
    keywords: &'static [&'static str],
    day: DayVariant,
    night: Background,
}

/// Evaluated top to bottom; the first rule with a matching keyword wins.
const RULES: &[Rule] = &[
    Rule {
        keywords: &["clear"],
        day: DayVariant::Fixed(Background::ClearDay),
        night: Background::ClearNight,
    },
    Rule {
        keywords: &["cloud"],
        day: DayVariant::ByDescription(
            &[
                (&["few", "scattered"], Background::FewCloudsDay),
                (&["broken", "overcast"], Background::OvercastDay),
            ],
            Background::CloudsDay,
        ),
        night: Background::CloudsNight,
    },
    Rule {
        keywords: &["rain"],
        day: DayVariant::ByDescription(
            &[(&["light"], Background::LightRainDay)],
            Background::RainDay,
        ),
        night: Background::RainNight,
    },
    Rule {
        keywords: &["drizzle"],
        day: DayVariant::Fixed(Background::DrizzleDay),
        night: Background::RainNight,
    },
    Rule {
        keywords: &["thunder"],
        day: DayVariant::Fixed(Background::ThunderDay),
        night: Background::ThunderNight,
    },
    Rule {
        keywords: &["snow"],
        day: DayVariant::Fixed(Background::SnowDay),
        night: Background::SnowNight,
    },
    Rule {
        keywords: &["mist", "fog", "haze"],
        day: DayVariant::Fixed(Background::MistDay),
        night: Background::Night,
    },
    Rule {
        keywords: &["dust", "sand", "ash"],
        day: DayVariant::Fixed(Background::DustDay),
        night: Background::Night,
    },
    Rule {
        keywords: &["smoke"],
        day: DayVariant::Fixed(Background::SmokeDay),
        night: Background::Night,
    },
];

fn contains_any(haystack: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| haystack.contains(keyword))
}

/// Pick the background for a condition.
///
/// Matching is a case-insensitive substring test on `condition_main`;
/// `condition_description` only refines daytime clouds and rain.
pub fn select(condition_main: &str, condition_description: &str, is_daytime: bool) -> Background {
    let condition = condition_main.to_lowercase();

    let Some(rule) = RULES
        .iter()
        .find(|rule| contains_any(&condition, rule.keywords))
    else {
        return if is_daytime {
            Background::Default
        } else {
            Background::Night
        };
    };

    if !is_daytime {
        return rule.night;
    }

    match rule.day {
        DayVariant::Fixed(background) => background,
        DayVariant::ByDescription(refinements, fallback) => {
            let description = condition_description.to_lowercase();
            refinements
                .iter()
                .find(|(keywords, _)| contains_any(&description, keywords))
                .map_or(fallback, |(_, background)| *background)
        }
    }
}
