use crate::continent::Continent;
use crate::dataset::{CountryRecord, CountryStore};
use crate::poll::{Filters, PollSelector, RankRange};
use serde::Serialize;

/// One country's count under the active filters
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedCountryEntry {
    pub name: String,
    pub continent: Continent,
    pub film_count: u64,
    pub percent_of_total: f64,
}

/// Whether every count came from an exact feed field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum CountMethod {
    #[default]
    Exact,
    /// At least one count was approximated with a rank-tier multiplier
    Estimated,
}

impl CountMethod {
    const fn merge(self, other: Self) -> Self {
        match (self, other) {
            (Self::Exact, Self::Exact) => Self::Exact,
            _ => Self::Estimated,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Transform {
    pub filters: Filters,
    /// Sorted by film count descending, then name ascending
    pub entries: Vec<DerivedCountryEntry>,
    pub grand_total: u64,
    pub method: CountMethod,
}

impl Transform {
    pub fn non_zero(&self) -> impl Iterator<Item = &DerivedCountryEntry> {
        self.entries.iter().filter(|entry| entry.film_count > 0)
    }
}

/// Derives per-country counts and shares for the given filters.
///
/// Single poll, any tier: the tier's per-poll field, or an estimate from the
/// poll total when the feed lacks it. All polls, `All` tier: the
/// deduplicated `totalFilms`. All polls with a tier: no deduplicated tier
/// count exists, so `totalFilms` is scaled by the tier multiplier and the
/// result is marked [`CountMethod::Estimated`].
pub fn transform(store: &CountryStore, filters: Filters) -> Transform {
    let mut method = CountMethod::Exact;
    let mut grand_total = 0_u64;

    let mut entries: Vec<DerivedCountryEntry> = store
        .records()
        .map(|record| {
            let (film_count, record_method) = count_for(record, filters);
            method = method.merge(record_method);
            grand_total += film_count;
            DerivedCountryEntry {
                name: record.name.clone(),
                continent: record.continent,
                film_count,
                percent_of_total: 0.0,
            }
        })
        .collect();

    for entry in &mut entries {
        entry.percent_of_total = percent(entry.film_count, grand_total);
    }

    entries.sort_by(|a, b| {
        b.film_count
            .cmp(&a.film_count)
            .then_with(|| a.name.cmp(&b.name))
    });

    if method == CountMethod::Estimated {
        tracing::debug!(
            poll = filters.poll.as_str(),
            rank = filters.rank.as_str(),
            "rank tier counts estimated from totals"
        );
    }

    Transform {
        filters,
        entries,
        grand_total,
        method,
    }
}

fn count_for(record: &CountryRecord, filters: Filters) -> (u64, CountMethod) {
    match filters.poll {
        PollSelector::All => match filters.rank {
            RankRange::All => (record.total_films, CountMethod::Exact),
            rank => (estimate(record.total_films, rank), CountMethod::Estimated),
        },
        PollSelector::Year(year) => {
            let Some(counts) = record.poll(year) else {
                return (0, CountMethod::Exact);
            };
            counts.tier(filters.rank).map_or_else(
                || (estimate(counts.total, filters.rank), CountMethod::Estimated),
                |count| (count, CountMethod::Exact),
            )
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn estimate(base: u64, rank: RankRange) -> u64 {
    (base as f64 * rank.estimate_multiplier()).round() as u64
}

/// Share of `total`, rounded to one decimal; 0 when `total` is 0
pub fn percent(count: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (count as f64 * 1000.0 / total as f64).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::PollCounts;
    use crate::poll::PollYear;

    fn sample_store() -> CountryStore {
        CountryStore::from_records([
            CountryRecord::new("United States", Continent::NorthAmerica, 1250)
                .with_poll(PollYear::Y2022, PollCounts::new(847).with_top100(21))
                .with_poll(PollYear::Y2012, PollCounts::new(790).with_top100(25)),
            CountryRecord::new("France", Continent::Europe, 980)
                .with_poll(PollYear::Y2022, PollCounts::new(623).with_top100(18))
                .with_poll(PollYear::Y2012, PollCounts::new(0).with_top100(0)),
            CountryRecord::new("Japan", Continent::Asia, 512)
                .with_poll(PollYear::Y2022, PollCounts::new(349)),
            CountryRecord::new("Fiji", Continent::Oceania, 1),
        ])
    }

    #[test]
    fn two_country_scenario_matches_expected_shares() {
        let store = CountryStore::from_records([
            CountryRecord::new("USA", Continent::NorthAmerica, 900)
                .with_poll(PollYear::Y2022, PollCounts::new(847)),
            CountryRecord::new("FRA", Continent::Europe, 700)
                .with_poll(PollYear::Y2022, PollCounts::new(623)),
        ]);
        let result = transform(
            &store,
            Filters::new(PollSelector::Year(PollYear::Y2022), RankRange::All),
        );

        assert_eq!(result.grand_total, 1470);
        assert_eq!(result.method, CountMethod::Exact);
        let rows: Vec<(&str, u64, f64)> = result
            .entries
            .iter()
            .map(|e| (e.name.as_str(), e.film_count, e.percent_of_total))
            .collect();
        assert_eq!(rows, vec![("USA", 847, 57.6), ("FRA", 623, 42.4)]);
    }

    #[test]
    fn counts_sum_to_grand_total_and_percents_to_one_hundred() {
        let store = sample_store();
        for poll in PollSelector::OPTIONS {
            for rank in RankRange::OPTIONS {
                let result = transform(&store, Filters::new(poll, rank));
                let sum: u64 = result.entries.iter().map(|e| e.film_count).sum();
                assert_eq!(sum, result.grand_total, "{poll:?}/{rank:?}");

                if result.grand_total > 0 {
                    let pct: f64 = result.entries.iter().map(|e| e.percent_of_total).sum();
                    let tolerance = result.entries.len() as f64 * 0.05;
                    assert!(
                        (pct - 100.0).abs() <= tolerance,
                        "{poll:?}/{rank:?}: percent sum {pct}"
                    );
                }
            }
        }
    }

    #[test]
    fn all_polls_uses_precomputed_total_not_a_resum() {
        let result = transform(&sample_store(), Filters::default());
        let usa = &result.entries[0];
        assert_eq!(usa.name, "United States");
        assert_eq!(usa.film_count, 1250);
        assert_eq!(result.method, CountMethod::Exact);
    }

    #[test]
    fn exact_tier_field_wins_over_multiplier() {
        let result = transform(
            &sample_store(),
            Filters::new(PollSelector::Year(PollYear::Y2022), RankRange::Top100),
        );
        let usa = result
            .entries
            .iter()
            .find(|e| e.name == "United States")
            .map(|e| e.film_count);
        assert_eq!(usa, Some(21));
        // Japan has no top100 field for 2022: round(349 * 0.15) = 52
        let japan = result.entries.iter().find(|e| e.name == "Japan").map(|e| e.film_count);
        assert_eq!(japan, Some(52));
        assert_eq!(result.method, CountMethod::Estimated);
    }

    #[test]
    fn tiers_across_all_polls_are_labeled_estimates() {
        let result = transform(
            &sample_store(),
            Filters::new(PollSelector::All, RankRange::Top250),
        );
        assert_eq!(result.method, CountMethod::Estimated);
        // round(980 * 0.35) = 343
        let france = result.entries.iter().find(|e| e.name == "France");
        assert_eq!(france.map(|e| e.film_count), Some(343));
    }

    #[test]
    fn zero_count_countries_are_retained() {
        let result = transform(
            &sample_store(),
            Filters::new(PollSelector::Year(PollYear::Y2012), RankRange::All),
        );
        assert_eq!(result.entries.len(), 4);
        assert_eq!(result.non_zero().count(), 1);
        let france = result.entries.iter().find(|e| e.name == "France");
        assert_eq!(france.map(|e| e.percent_of_total), Some(0.0));
    }

    #[test]
    fn empty_store_is_an_empty_result() {
        let result = transform(&CountryStore::default(), Filters::default());
        assert!(result.entries.is_empty());
        assert_eq!(result.grand_total, 0);
    }

    #[test]
    fn ties_break_by_name() {
        let store = CountryStore::from_records([
            CountryRecord::new("Sweden", Continent::Europe, 10),
            CountryRecord::new("Denmark", Continent::Europe, 10),
        ]);
        let result = transform(&store, Filters::default());
        assert_eq!(result.entries[0].name, "Denmark");
        assert_eq!(result.entries[1].name, "Sweden");
    }

    #[test]
    fn percent_of_zero_total_is_zero() {
        assert!(percent(5, 0).abs() < f64::EPSILON);
        assert!((percent(1, 3) - 33.3).abs() < 1e-9);
    }
}
