use std::fmt;

/// User-selected ambience category. Changing it is the main way a new
/// track gets requested.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum WeatherMood {
    #[default]
    Sunny,
    Rainy,
    Snowy,
}

impl WeatherMood {
    pub const ALL: [WeatherMood; 3] = [WeatherMood::Sunny, WeatherMood::Rainy, WeatherMood::Snowy];

    /// The token that appears in parentheses in track file names.
    pub fn token(&self) -> &'static str {
        match self {
            WeatherMood::Sunny => "Sunny",
            WeatherMood::Rainy => "Rainy",
            WeatherMood::Snowy => "Snowy",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "Sunny" => Some(WeatherMood::Sunny),
            "Rainy" => Some(WeatherMood::Rainy),
            "Snowy" => Some(WeatherMood::Snowy),
            _ => None,
        }
    }
}

impl fmt::Display for WeatherMood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}
