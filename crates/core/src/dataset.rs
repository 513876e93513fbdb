use crate::continent::Continent;
use crate::error::DatasetError;
use crate::poll::{PollYear, RankRange};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

/// Per-poll counts for one country. `total` is always present; every tier
/// field is optional because feed revisions carry different subsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PollCounts {
    pub total: u64,
    #[serde(default)]
    pub top100: Option<u64>,
    #[serde(default)]
    pub top250: Option<u64>,
    #[serde(default)]
    pub top500: Option<u64>,
    #[serde(default)]
    pub top1000: Option<u64>,
    #[serde(default)]
    pub distinct_films: Option<u64>,
    #[serde(default)]
    pub distinct_films_top100: Option<u64>,
}

impl PollCounts {
    pub const fn new(total: u64) -> Self {
        Self {
            total,
            top100: None,
            top250: None,
            top500: None,
            top1000: None,
            distinct_films: None,
            distinct_films_top100: None,
        }
    }

    #[must_use]
    pub const fn with_top100(mut self, top100: u64) -> Self {
        self.top100 = Some(top100);
        self
    }

    #[must_use]
    pub const fn with_top250(mut self, top250: u64) -> Self {
        self.top250 = Some(top250);
        self
    }

    /// Exact count for the tier, if the feed recorded one
    pub const fn tier(&self, rank: RankRange) -> Option<u64> {
        match rank {
            RankRange::All => Some(self.total),
            RankRange::Top100 => self.top100,
            RankRange::Top250 => self.top250,
            RankRange::Top500 => self.top500,
            RankRange::Top1000 => self.top1000,
        }
    }

    fn tiers(&self) -> [(&'static str, Option<u64>); 4] {
        [
            ("top100", self.top100),
            ("top250", self.top250),
            ("top500", self.top500),
            ("top1000", self.top1000),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountryRecord {
    pub name: String,
    pub continent: Continent,
    pub total_films: u64,
    pub by_poll: BTreeMap<PollYear, PollCounts>,
    pub by_decade: BTreeMap<String, u64>,
}

impl CountryRecord {
    pub fn new(name: impl Into<String>, continent: Continent, total_films: u64) -> Self {
        Self {
            name: name.into(),
            continent,
            total_films,
            by_poll: BTreeMap::new(),
            by_decade: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_poll(mut self, year: PollYear, counts: PollCounts) -> Self {
        self.by_poll.insert(year, counts);
        self
    }

    pub fn poll(&self, year: PollYear) -> Option<&PollCounts> {
        self.by_poll.get(&year)
    }
}

/// A feed irregularity that does not stop the load
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataWarning {
    pub country: String,
    /// `None` when the warning concerns the whole record
    pub year: Option<PollYear>,
    pub message: String,
}

impl fmt::Display for DataWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.year {
            Some(year) => write!(f, "{} ({year}): {}", self.country, self.message),
            None => write!(f, "{}: {}", self.country, self.message),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCountry {
    continent: String,
    total_films: u64,
    #[serde(default)]
    by_poll: BTreeMap<String, PollCounts>,
    #[serde(default)]
    by_decade: BTreeMap<String, u64>,
}

/// The read-only country dataset, keyed by country name
#[derive(Debug, Clone, Default)]
pub struct CountryStore {
    countries: BTreeMap<String, CountryRecord>,
    warnings: Vec<DataWarning>,
}

impl CountryStore {
    pub fn from_records(records: impl IntoIterator<Item = CountryRecord>) -> Self {
        let countries = records
            .into_iter()
            .map(|record| (record.name.clone(), record))
            .collect();

        Self {
            countries,
            warnings: Vec::new(),
        }
    }

    /// Parses and validates the `countries.json` feed
    pub fn from_json(json: &str) -> Result<Self, DatasetError> {
        let raw: BTreeMap<String, RawCountry> = serde_json::from_str(json)?;
        let mut countries = BTreeMap::new();
        let mut warnings = Vec::new();

        for (name, raw_country) in raw {
            match validate_country(name, raw_country, &mut warnings) {
                Ok(record) => {
                    countries.insert(record.name.clone(), record);
                }
                // One unmapped country is skipped, not fatal to the feed
                Err(DatasetError::UnknownContinent { country, continent }) => {
                    warnings.push(DataWarning {
                        message: format!("skipped, unknown continent {continent:?}"),
                        country,
                        year: None,
                    });
                }
                Err(err) => return Err(err),
            }
        }

        for warning in &warnings {
            tracing::warn!(%warning, "country feed irregularity");
        }
        tracing::debug!(
            countries = countries.len(),
            warnings = warnings.len(),
            "country feed parsed"
        );

        Ok(Self {
            countries,
            warnings,
        })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn len(&self) -> usize {
        self.countries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&CountryRecord> {
        self.countries.get(name)
    }

    pub fn records(&self) -> impl Iterator<Item = &CountryRecord> {
        self.countries.values()
    }

    pub fn warnings(&self) -> &[DataWarning] {
        &self.warnings
    }
}

fn validate_country(
    name: String,
    raw: RawCountry,
    warnings: &mut Vec<DataWarning>,
) -> Result<CountryRecord, DatasetError> {
    let Some(continent) = Continent::parse(&raw.continent) else {
        return Err(DatasetError::UnknownContinent {
            country: name,
            continent: raw.continent,
        });
    };

    let mut by_poll = BTreeMap::new();
    for (year_key, counts) in raw.by_poll {
        let Some(year) = PollYear::parse(&year_key) else {
            return Err(DatasetError::UnknownPollYear {
                country: name,
                year: year_key,
            });
        };

        for (field, value) in counts.tiers() {
            if let Some(value) = value.filter(|value| *value > counts.total) {
                return Err(DatasetError::InvalidPollCounts {
                    country: name,
                    year: year.as_str(),
                    field,
                    value,
                    total: counts.total,
                });
            }
        }

        // Expected ordering: distinctFilmsTop100 <= distinctFilms <= total.
        if let Some(distinct) = counts.distinct_films.filter(|d| *d > counts.total) {
            warnings.push(DataWarning {
                country: name.clone(),
                year: Some(year),
                message: format!("distinctFilms ({distinct}) exceeds total ({})", counts.total),
            });
        }
        if let (Some(top), Some(distinct)) = (counts.distinct_films_top100, counts.distinct_films) {
            if top > distinct {
                warnings.push(DataWarning {
                    country: name.clone(),
                    year: Some(year),
                    message: format!(
                        "distinctFilmsTop100 ({top}) exceeds distinctFilms ({distinct})"
                    ),
                });
            }
        }

        by_poll.insert(year, counts);
    }

    Ok(CountryRecord {
        name,
        continent,
        total_films: raw.total_films,
        by_poll,
        by_decade: raw.by_decade,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED: &str = r#"{
        "United States": {
            "continent": "North America",
            "totalFilms": 1250,
            "byPoll": {
                "2022": {"total": 847, "top100": 21, "top250": 60, "top500": 120},
                "2012": {"total": 790, "top100": 25}
            },
            "byDecade": {"1950s": 80}
        },
        "Brazil": {
            "continent": "South America",
            "totalFilms": 150,
            "byPoll": {"2022": {"total": 143, "top100": 1, "distinctFilms": 140, "distinctFilmsTop100": 1}}
        }
    }"#;

    #[test]
    fn parses_feed_into_typed_records() -> Result<(), Box<dyn std::error::Error>> {
        let store = CountryStore::from_json(FEED)?;
        assert_eq!(store.len(), 2);

        let usa = store.get("United States").ok_or("missing USA")?;
        assert_eq!(usa.continent, Continent::NorthAmerica);
        assert_eq!(usa.total_films, 1250);
        let poll = usa.poll(PollYear::Y2022).ok_or("missing 2022")?;
        assert_eq!(poll.tier(RankRange::Top250), Some(60));
        assert_eq!(poll.tier(RankRange::Top1000), None);
        assert_eq!(usa.by_decade.get("1950s"), Some(&80));

        let brazil = store.get("Brazil").ok_or("missing Brazil")?;
        assert_eq!(brazil.continent, Continent::LatinAmerica);
        assert!(store.warnings().is_empty());
        Ok(())
    }

    #[test]
    fn unknown_continent_drops_only_that_country() -> Result<(), Box<dyn std::error::Error>> {
        let feed = r#"{
            "France": {"continent": "Europe", "totalFilms": 980, "byPoll": {}},
            "Atlantis": {"continent": "Unknown", "totalFilms": 1, "byPoll": {}}
        }"#;
        let store = CountryStore::from_json(feed)?;

        assert_eq!(store.len(), 1);
        assert!(store.get("France").is_some());
        assert!(store.get("Atlantis").is_none());

        let warning = store.warnings().first().ok_or("missing warning")?;
        assert_eq!(warning.country, "Atlantis");
        assert_eq!(warning.year, None);
        assert_eq!(warning.to_string(), "Atlantis: skipped, unknown continent \"Unknown\"");
        Ok(())
    }

    #[test]
    fn tier_above_total_is_rejected() {
        let feed = r#"{"France": {"continent": "Europe", "totalFilms": 10,
            "byPoll": {"2022": {"total": 5, "top100": 6}}}}"#;
        let err = CountryStore::from_json(feed).err();
        assert!(matches!(
            err,
            Some(DatasetError::InvalidPollCounts { field: "top100", value: 6, total: 5, .. })
        ));
    }

    #[test]
    fn unknown_poll_year_is_rejected() {
        let feed = r#"{"France": {"continent": "Europe", "totalFilms": 10,
            "byPoll": {"2032": {"total": 5}}}}"#;
        assert!(matches!(
            CountryStore::from_json(feed),
            Err(DatasetError::UnknownPollYear { .. })
        ));
    }

    #[test]
    fn distinct_film_irregularities_are_warnings() -> Result<(), Box<dyn std::error::Error>> {
        let feed = r#"{"Japan": {"continent": "Asia", "totalFilms": 300,
            "byPoll": {"2022": {"total": 200, "top100": 10,
                "distinctFilms": 250, "distinctFilmsTop100": 260}}}}"#;
        let store = CountryStore::from_json(feed)?;
        assert_eq!(store.len(), 1);
        assert_eq!(store.warnings().len(), 2);
        assert!(store.warnings()[0].message.contains("distinctFilms"));
        Ok(())
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(
            CountryStore::from_json("{not json"),
            Err(DatasetError::Parse(_))
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = CountryStore::load("/definitely/not/here/countries.json");
        assert!(matches!(result, Err(DatasetError::Io { .. })));
    }
}
