use serde::Serialize;
use std::fmt;

/// Display color attached to a continent, as 8-bit RGB
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "&'static str")]
pub enum Continent {
    Europe,
    Asia,
    NorthAmerica,
    LatinAmerica,
    Africa,
    Oceania,
}

impl Continent {
    pub const ALL: [Self; 6] = [
        Self::Europe,
        Self::Asia,
        Self::NorthAmerica,
        Self::LatinAmerica,
        Self::Africa,
        Self::Oceania,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Europe => "Europe",
            Self::Asia => "Asia",
            Self::NorthAmerica => "North America",
            Self::LatinAmerica => "Latin America",
            Self::Africa => "Africa",
            Self::Oceania => "Oceania",
        }
    }

    /// Short form used where the breakdown bar has little room
    pub const fn abbreviation(self) -> &'static str {
        match self {
            Self::Europe => "EU",
            Self::Asia => "AS",
            Self::NorthAmerica => "NA",
            Self::LatinAmerica => "LA",
            Self::Africa => "AF",
            Self::Oceania => "OC",
        }
    }

    pub const fn color(self) -> Rgb {
        match self {
            Self::Europe => Rgb(0x3b, 0x82, 0xf6),
            Self::Asia => Rgb(0x10, 0xb9, 0x81),
            Self::NorthAmerica => Rgb(0x8b, 0x5c, 0xf6),
            Self::LatinAmerica => Rgb(0xf5, 0x9e, 0x0b),
            Self::Africa => Rgb(0xef, 0x44, 0x44),
            Self::Oceania => Rgb(0xec, 0x48, 0x99),
        }
    }

    /// Feed revisions label the same grouping "South America" or "Latin America".
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "europe" => Some(Self::Europe),
            "asia" => Some(Self::Asia),
            "north america" => Some(Self::NorthAmerica),
            "latin america" | "south america" => Some(Self::LatinAmerica),
            "africa" => Some(Self::Africa),
            "oceania" => Some(Self::Oceania),
            _ => None,
        }
    }
}

impl From<Continent> for &'static str {
    fn from(continent: Continent) -> Self {
        continent.label()
    }
}

impl fmt::Display for Continent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
