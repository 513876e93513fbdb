use crate::dataset::CountryStore;
use crate::error::DatasetError;
use crate::grouping::{continent_shares, group, ContinentGroup, ContinentShare};
use crate::poll::{Filters, PollSelector, RankRange};
use crate::selection::SelectionState;
use crate::transform::{transform, CountMethod, DerivedCountryEntry, Transform};
use serde::Serialize;
use std::fmt;

/// Countries committed when the dataset first arrives
pub const DEFAULT_TOP_N: usize = 10;

/// Quick "top N" choices offered next to the chart
pub const TOP_N_PRESETS: [usize; 4] = [10, 15, 20, 30];

/// Lifecycle of the one asynchronous input: the country feed
#[derive(Debug, Clone, Default)]
pub enum DataState {
    #[default]
    Loading,
    /// A reload is in flight; the previous store stays on screen
    Reloading(CountryStore),
    Ready(CountryStore),
    Unavailable(String),
}

/// Info banner contents
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub countries: usize,
    pub grand_total: u64,
    pub metric: &'static str,
    pub filters: String,
    pub method: CountMethod,
}

impl Summary {
    /// "Showing 117 countries across 3,817 films"
    pub fn headline(&self) -> String {
        format!(
            "Showing {} countries across {} {}",
            self.countries,
            thousands(self.grand_total),
            self.metric
        )
    }
}

/// Session-scoped controller: owns the feed, the filters, the selection and
/// the data derived from them. Every view renders from one of these.
#[derive(Debug, Default)]
pub struct Dashboard {
    data: DataState,
    filters: Filters,
    selection: SelectionState,
    top_n: usize,
    derived: Transform,
    groups: Vec<ContinentGroup>,
}

impl Dashboard {
    pub fn new(filters: Filters, top_n: usize) -> Self {
        Self {
            filters,
            top_n,
            ..Self::default()
        }
    }

    pub const fn data(&self) -> &DataState {
        &self.data
    }

    pub const fn is_loading(&self) -> bool {
        matches!(self.data, DataState::Loading | DataState::Reloading(_))
    }

    pub fn unavailable_reason(&self) -> Option<&str> {
        match &self.data {
            DataState::Unavailable(reason) => Some(reason),
            _ => None,
        }
    }

    pub fn store(&self) -> Option<&CountryStore> {
        match &self.data {
            DataState::Ready(store) | DataState::Reloading(store) => Some(store),
            _ => None,
        }
    }

    pub const fn filters(&self) -> Filters {
        self.filters
    }

    pub const fn top_n(&self) -> usize {
        self.top_n
    }

    pub const fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut SelectionState {
        &mut self.selection
    }

    pub const fn derived(&self) -> &Transform {
        &self.derived
    }

    pub fn groups(&self) -> &[ContinentGroup] {
        &self.groups
    }

    /// Marks a load in flight. A loaded store and the selection stay until
    /// the result arrives.
    pub fn begin_loading(&mut self) {
        self.data = match std::mem::take(&mut self.data) {
            DataState::Ready(store) | DataState::Reloading(store) => DataState::Reloading(store),
            DataState::Loading | DataState::Unavailable(_) => DataState::Loading,
        };
        self.recompute();
    }

    /// Records the outcome of a feed load. A successful first load seeds
    /// the committed selection with the top N countries; a reload keeps the
    /// user's selection.
    pub fn load_finished(&mut self, result: Result<CountryStore, DatasetError>) {
        match result {
            Ok(store) => {
                tracing::info!(countries = store.len(), "country feed ready");
                self.data = DataState::Ready(store);
                self.recompute();
                if self.selection.committed().is_empty() {
                    self.reset_to_top_n(self.top_n);
                }
            }
            Err(err) => self.load_failed(err),
        }
    }

    /// A failed reload falls back to the store already on screen. Without
    /// one the dashboard is empty but usable.
    pub fn load_failed(&mut self, reason: impl fmt::Display) {
        self.data = match std::mem::take(&mut self.data) {
            DataState::Reloading(store) | DataState::Ready(store) => {
                tracing::warn!(error = %reason, "country feed reload failed; keeping previous data");
                DataState::Ready(store)
            }
            DataState::Loading | DataState::Unavailable(_) => {
                tracing::error!(error = %reason, "country feed unavailable");
                DataState::Unavailable(reason.to_string())
            }
        };
        self.recompute();
    }

    pub fn set_filters(&mut self, filters: Filters) {
        if filters != self.filters {
            self.filters = filters;
            self.recompute();
        }
    }

    pub fn set_poll(&mut self, poll: PollSelector) {
        self.set_filters(Filters::new(poll, self.filters.rank));
    }

    pub fn set_rank(&mut self, rank: RankRange) {
        self.set_filters(Filters::new(self.filters.poll, rank));
    }

    pub fn cycle_poll(&mut self, forward: bool) {
        let len = PollSelector::OPTIONS.len();
        let index = step(self.filters.poll.index(), len, forward);
        if let Some(poll) = PollSelector::from_index(index) {
            self.set_poll(poll);
        }
    }

    pub fn cycle_rank(&mut self, forward: bool) {
        let len = RankRange::OPTIONS.len();
        let index = step(self.filters.rank.index(), len, forward);
        if let Some(rank) = RankRange::from_index(index) {
            self.set_rank(rank);
        }
    }

    pub fn reset_to_top_n(&mut self, n: usize) -> usize {
        let count = self.selection.reset_to_top_n(&self.derived.entries, n);
        tracing::info!(requested = n, committed = count, "selection reset to top countries");
        count
    }

    pub fn open_selector(&mut self) {
        self.selection.open_dialog(&self.groups);
    }

    /// Chart rows under the current filters
    pub fn chart_rows(&self) -> Vec<&DerivedCountryEntry> {
        self.selection.rendered(&self.derived.entries)
    }

    pub fn continent_shares(&self) -> Vec<ContinentShare> {
        continent_shares(&self.groups, self.derived.grand_total)
    }

    pub fn summary(&self) -> Summary {
        let metric = match self.derived.method {
            CountMethod::Exact => "films",
            CountMethod::Estimated => "films (est.)",
        };
        Summary {
            countries: self.derived.non_zero().count(),
            grand_total: self.derived.grand_total,
            metric,
            filters: self.filters.description(),
            method: self.derived.method,
        }
    }

    fn recompute(&mut self) {
        self.derived = self
            .store()
            .map(|store| transform(store, self.filters))
            .unwrap_or_else(|| Transform {
                filters: self.filters,
                ..Transform::default()
            });
        self.groups = group(&self.derived.entries);
    }
}

const fn step(index: usize, len: usize, forward: bool) -> usize {
    if len == 0 {
        return 0;
    }
    if forward {
        (index + 1) % len
    } else if index == 0 {
        len - 1
    } else {
        index - 1
    }
}

fn thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::continent::Continent;
    use crate::dataset::{CountryRecord, PollCounts};
    use crate::poll::PollYear;

    fn store() -> CountryStore {
        CountryStore::from_records([
            CountryRecord::new("USA", Continent::NorthAmerica, 1250)
                .with_poll(PollYear::Y2022, PollCounts::new(847))
                .with_poll(PollYear::Y2012, PollCounts::new(790)),
            CountryRecord::new("FRA", Continent::Europe, 980)
                .with_poll(PollYear::Y2022, PollCounts::new(623))
                .with_poll(PollYear::Y2012, PollCounts::new(0)),
        ])
    }

    fn loaded(filters: Filters) -> Dashboard {
        let mut dashboard = Dashboard::new(filters, DEFAULT_TOP_N);
        dashboard.load_finished(Ok(store()));
        dashboard
    }

    fn row_names(dashboard: &Dashboard) -> Vec<String> {
        dashboard
            .chart_rows()
            .iter()
            .map(|entry| entry.name.clone())
            .collect()
    }

    #[test]
    fn first_load_seeds_top_countries() {
        let dashboard = loaded(Filters::default());
        assert_eq!(dashboard.selection().committed().len(), 2);
        assert_eq!(row_names(&dashboard), vec!["USA", "FRA"]);
    }

    #[test]
    fn sticky_membership_survives_a_poll_round_trip() {
        let mut dashboard = loaded(Filters::new(
            PollSelector::Year(PollYear::Y2022),
            RankRange::All,
        ));
        assert_eq!(row_names(&dashboard), vec!["USA", "FRA"]);

        dashboard.set_poll(PollSelector::Year(PollYear::Y2012));
        assert_eq!(row_names(&dashboard), vec!["USA"]);
        assert!(dashboard.selection().is_committed("FRA"));

        dashboard.set_poll(PollSelector::Year(PollYear::Y2022));
        assert_eq!(row_names(&dashboard), vec!["USA", "FRA"]);
    }

    #[test]
    fn failed_load_is_an_empty_unavailable_state() {
        let mut dashboard = Dashboard::new(Filters::default(), DEFAULT_TOP_N);
        let err = CountryStore::from_json("[]").err();
        assert!(err.is_some());
        if let Some(err) = err {
            dashboard.load_finished(Err(err));
        }
        assert!(dashboard.unavailable_reason().is_some());
        assert!(dashboard.chart_rows().is_empty());
        assert!(dashboard.groups().is_empty());
        assert_eq!(dashboard.summary().grand_total, 0);
    }

    #[test]
    fn reload_keeps_the_users_selection() {
        let mut dashboard = loaded(Filters::default());
        dashboard.reset_to_top_n(1);
        dashboard.begin_loading();
        assert!(dashboard.is_loading());
        dashboard.load_finished(Ok(store()));
        assert_eq!(row_names(&dashboard), vec!["USA"]);
    }

    #[test]
    fn rows_stay_visible_while_reloading() {
        let mut dashboard = loaded(Filters::default());
        dashboard.begin_loading();
        assert!(dashboard.is_loading());
        assert!(dashboard.store().is_some());
        assert_eq!(row_names(&dashboard), vec!["USA", "FRA"]);
    }

    #[test]
    fn failed_reload_keeps_the_previous_store() {
        let mut dashboard = loaded(Filters::default());
        dashboard.begin_loading();
        dashboard.load_failed("feed went missing");

        assert!(!dashboard.is_loading());
        assert!(dashboard.unavailable_reason().is_none());
        assert_eq!(row_names(&dashboard), vec!["USA", "FRA"]);
        assert_eq!(dashboard.groups().len(), 2);
    }

    #[test]
    fn cycling_wraps_around_the_options() {
        let mut dashboard = loaded(Filters::default());
        dashboard.cycle_poll(false);
        assert_eq!(dashboard.filters().poll, PollSelector::Year(PollYear::Y1952));
        dashboard.cycle_poll(true);
        assert_eq!(dashboard.filters().poll, PollSelector::All);
        dashboard.cycle_rank(true);
        assert_eq!(dashboard.filters().rank, RankRange::Top100);
    }

    #[test]
    fn summary_reports_counts_and_filters() {
        let dashboard = loaded(Filters::new(
            PollSelector::Year(PollYear::Y2022),
            RankRange::All,
        ));
        let summary = dashboard.summary();
        assert_eq!(summary.countries, 2);
        assert_eq!(summary.headline(), "Showing 2 countries across 1,470 films");
        assert_eq!(summary.filters, "2022 Poll • All Films");
    }

    #[test]
    fn estimated_counts_are_labeled_in_the_summary() {
        let dashboard = loaded(Filters::new(PollSelector::All, RankRange::Top100));
        assert_eq!(dashboard.summary().method, CountMethod::Estimated);
        assert_eq!(dashboard.summary().metric, "films (est.)");
    }

    #[test]
    fn thousands_groups_digits() {
        assert_eq!(thousands(0), "0");
        assert_eq!(thousands(999), "999");
        assert_eq!(thousands(3817), "3,817");
        assert_eq!(thousands(1_234_567), "1,234,567");
    }
}
