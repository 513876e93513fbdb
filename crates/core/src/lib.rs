//! Country-of-origin aggregation for the Sight & Sound poll canon.
//!
//! The dashboards in `apps/` render from a [`Dashboard`]: it owns the loaded
//! [`CountryStore`], the active [`Filters`] and the bounded country
//! [`SelectionState`], and keeps the derived chart data in step with them.

pub mod continent;
pub mod dataset;
pub mod error;
pub mod grouping;
pub mod poll;
pub mod search;
pub mod selection;
pub mod session;
pub mod transform;

pub use continent::{Continent, Rgb};
pub use dataset::{CountryRecord, CountryStore, DataWarning, PollCounts};
pub use error::{DatasetError, SelectionError};
pub use grouping::{ContinentGroup, ContinentShare};
pub use poll::{Filters, PollSelector, PollYear, RankRange};
pub use selection::{
    ContinentToggle, SelectionState, SelectorDialog, ToggleOutcome, MAX_SELECTION,
};
pub use session::{Dashboard, DataState, Summary, DEFAULT_TOP_N, TOP_N_PRESETS};
pub use transform::{CountMethod, DerivedCountryEntry, Transform};
