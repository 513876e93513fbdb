use serde::Serialize;
use std::fmt;

/// A dated edition of the poll
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "&'static str")]
pub enum PollYear {
    Y1952,
    Y1962,
    Y1972,
    Y1982,
    Y1992,
    Y2002,
    Y2012,
    Y2022,
}

impl PollYear {
    /// Newest first, the order the filter sidebar lists them in
    pub const NEWEST_FIRST: [Self; 8] = [
        Self::Y2022,
        Self::Y2012,
        Self::Y2002,
        Self::Y1992,
        Self::Y1982,
        Self::Y1972,
        Self::Y1962,
        Self::Y1952,
    ];

    pub const LATEST: Self = Self::Y2022;

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Y1952 => "1952",
            Self::Y1962 => "1962",
            Self::Y1972 => "1972",
            Self::Y1982 => "1982",
            Self::Y1992 => "1992",
            Self::Y2002 => "2002",
            Self::Y2012 => "2012",
            Self::Y2022 => "2022",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::NEWEST_FIRST
            .into_iter()
            .find(|year| year.as_str() == value.trim())
    }
}

impl From<PollYear> for &'static str {
    fn from(year: PollYear) -> Self {
        year.as_str()
    }
}

impl fmt::Display for PollYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(into = "&'static str")]
pub enum PollSelector {
    #[default]
    All,
    Year(PollYear),
}

impl PollSelector {
    /// Sidebar order: the combined view first, then every poll newest first
    pub const OPTIONS: [Self; 9] = [
        Self::All,
        Self::Year(PollYear::Y2022),
        Self::Year(PollYear::Y2012),
        Self::Year(PollYear::Y2002),
        Self::Year(PollYear::Y1992),
        Self::Year(PollYear::Y1982),
        Self::Year(PollYear::Y1972),
        Self::Year(PollYear::Y1962),
        Self::Year(PollYear::Y1952),
    ];

    /// Unrecognized values resolve to `All`.
    pub fn parse(value: &str) -> Self {
        PollYear::parse(value).map_or(Self::All, Self::Year)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Year(year) => year.as_str(),
        }
    }

    pub fn label(self) -> String {
        match self {
            Self::All => "All Polls Combined".to_string(),
            Self::Year(PollYear::LATEST) => format!("{} (Latest)", PollYear::LATEST),
            Self::Year(year) => year.to_string(),
        }
    }

    pub fn banner_text(self) -> String {
        match self {
            Self::All => "All Polls Combined".to_string(),
            Self::Year(year) => format!("{year} Poll"),
        }
    }

    pub fn index(self) -> usize {
        Self::OPTIONS
            .iter()
            .position(|option| *option == self)
            .unwrap_or(0)
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::OPTIONS.get(index).copied()
    }
}

impl From<PollSelector> for &'static str {
    fn from(poll: PollSelector) -> Self {
        poll.as_str()
    }
}

/// Restriction to films ranked within the top N of a poll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(into = "&'static str")]
pub enum RankRange {
    #[default]
    All,
    Top100,
    Top250,
    Top500,
    Top1000,
}

impl RankRange {
    pub const OPTIONS: [Self; 5] = [
        Self::All,
        Self::Top100,
        Self::Top250,
        Self::Top500,
        Self::Top1000,
    ];

    /// Unrecognized values resolve to `All`.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "top100" => Self::Top100,
            "top250" => Self::Top250,
            "top500" => Self::Top500,
            "top1000" => Self::Top1000,
            _ => Self::All,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Top100 => "top100",
            Self::Top250 => "top250",
            Self::Top500 => "top500",
            Self::Top1000 => "top1000",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All Films",
            Self::Top100 => "Top 100",
            Self::Top250 => "Top 250",
            Self::Top500 => "Top 500",
            Self::Top1000 => "Top 1000",
        }
    }

    pub const fn banner_text(self) -> &'static str {
        match self {
            Self::All => "All Films",
            Self::Top100 => "Top 100 Films",
            Self::Top250 => "Top 250 Films",
            Self::Top500 => "Top 500 Films",
            Self::Top1000 => "Top 1000 Films",
        }
    }

    /// Approximate share of a country's films that fall inside the tier.
    /// Only used when the feed has no exact count for the tier.
    pub const fn estimate_multiplier(self) -> f64 {
        match self {
            Self::Top100 => 0.15,
            Self::Top250 => 0.35,
            Self::All | Self::Top500 | Self::Top1000 => 1.0,
        }
    }

    pub fn index(self) -> usize {
        Self::OPTIONS
            .iter()
            .position(|option| *option == self)
            .unwrap_or(0)
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::OPTIONS.get(index).copied()
    }
}

impl From<RankRange> for &'static str {
    fn from(rank: RankRange) -> Self {
        rank.as_str()
    }
}

/// The active poll and rank-range pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Filters {
    pub poll: PollSelector,
    pub rank: RankRange,
}

impl Filters {
    pub const fn new(poll: PollSelector, rank: RankRange) -> Self {
        Self { poll, rank }
    }

    /// "2022 Poll • Top 100 Films"
    pub fn description(self) -> String {
        format!("{} • {}", self.poll.banner_text(), self.rank.banner_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_poll_values_fall_back_to_all() {
        assert_eq!(PollSelector::parse("2022"), PollSelector::Year(PollYear::Y2022));
        assert_eq!(PollSelector::parse("all"), PollSelector::All);
        assert_eq!(PollSelector::parse("1999"), PollSelector::All);
        assert_eq!(PollSelector::parse(""), PollSelector::All);
    }

    #[test]
    fn unknown_rank_values_fall_back_to_all() {
        assert_eq!(RankRange::parse("top250"), RankRange::Top250);
        assert_eq!(RankRange::parse("TOP100"), RankRange::Top100);
        assert_eq!(RankRange::parse("top50"), RankRange::All);
    }

    #[test]
    fn option_indices_round_trip() {
        for option in PollSelector::OPTIONS {
            assert_eq!(PollSelector::from_index(option.index()), Some(option));
        }
        for option in RankRange::OPTIONS {
            assert_eq!(RankRange::from_index(option.index()), Some(option));
        }
        assert_eq!(RankRange::from_index(RankRange::OPTIONS.len()), None);
    }

    #[test]
    fn filter_description_reads_like_the_banner() {
        let filters = Filters::new(PollSelector::Year(PollYear::Y2012), RankRange::Top100);
        assert_eq!(filters.description(), "2012 Poll • Top 100 Films");
        assert_eq!(
            Filters::default().description(),
            "All Polls Combined • All Films"
        );
    }

    #[test]
    fn latest_poll_is_labeled() {
        assert_eq!(PollSelector::Year(PollYear::Y2022).label(), "2022 (Latest)");
        assert_eq!(PollSelector::Year(PollYear::Y1952).label(), "1952");
    }
}
