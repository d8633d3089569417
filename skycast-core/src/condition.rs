use crate::model::ConditionCategory;

/// Fold a provider condition label into a [`ConditionCategory`].
///
/// Matching is exact after ASCII case folding; anything outside the table is
/// [`ConditionCategory::Unknown`].
pub fn classify(raw: &str) -> ConditionCategory {
    match raw.to_ascii_lowercase().as_str() {
        "clear" | "sunny" => ConditionCategory::Clear,
        "rain" | "rainy" => ConditionCategory::Rain,
        "snow" | "snowy" => ConditionCategory::Snow,
        "clouds" | "cloudy" => ConditionCategory::Clouds,
        "mist" | "fog" => ConditionCategory::Mist,
        _ => ConditionCategory::Unknown,
    }
}

impl ConditionCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConditionCategory::Clear => "clear",
            ConditionCategory::Rain => "rain",
            ConditionCategory::Snow => "snow",
            ConditionCategory::Clouds => "clouds",
            ConditionCategory::Mist => "mist",
            ConditionCategory::Unknown => "unknown",
        }
    }

    /// Terminal stand-in for the animated icon.
    pub fn glyph(&self) -> &'static str {
        match self {
            ConditionCategory::Clear => "☀",
            ConditionCategory::Rain => "☂",
            ConditionCategory::Snow => "❄",
            ConditionCategory::Clouds => "☁",
            ConditionCategory::Mist => "≋",
            ConditionCategory::Unknown => "?",
        }
    }
}

impl std::fmt::Display for ConditionCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
