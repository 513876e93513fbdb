use crate::continent::Continent;
use crate::transform::{percent, DerivedCountryEntry};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContinentGroup {
    pub continent: Continent,
    /// Film count descending, then name ascending
    pub countries: Vec<DerivedCountryEntry>,
    pub total_films: u64,
}

impl ContinentGroup {
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.countries.iter().map(|country| country.name.as_str())
    }
}

/// A continent's slice of the grand total, for the breakdown bar
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ContinentShare {
    pub continent: Continent,
    pub total_films: u64,
    pub percent_of_total: f64,
}

/// Groups non-zero entries by continent. Continents are ordered by their
/// summed film count descending, ties by continent label.
pub fn group(entries: &[DerivedCountryEntry]) -> Vec<ContinentGroup> {
    let mut buckets: BTreeMap<Continent, Vec<DerivedCountryEntry>> = BTreeMap::new();

    for entry in entries.iter().filter(|entry| entry.film_count > 0) {
        buckets
            .entry(entry.continent)
            .or_default()
            .push(entry.clone());
    }

    let mut groups: Vec<ContinentGroup> = buckets
        .into_iter()
        .map(|(continent, mut countries)| {
            countries.sort_by(|a, b| {
                b.film_count
                    .cmp(&a.film_count)
                    .then_with(|| a.name.cmp(&b.name))
            });
            let total_films = countries.iter().map(|country| country.film_count).sum();
            ContinentGroup {
                continent,
                countries,
                total_films,
            }
        })
        .collect();

    groups.sort_by(|a, b| {
        b.total_films
            .cmp(&a.total_films)
            .then_with(|| a.continent.label().cmp(b.continent.label()))
    });

    groups
}

pub fn continent_shares(groups: &[ContinentGroup], grand_total: u64) -> Vec<ContinentShare> {
    groups
        .iter()
        .map(|group| ContinentShare {
            continent: group.continent,
            total_films: group.total_films,
            percent_of_total: percent(group.total_films, grand_total),
        })
        .collect()
}
